//! Reusable UI components.

pub mod panel;
pub mod status_bar;
pub mod tab_bar;
