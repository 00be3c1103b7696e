//! Tab layouts.

pub mod dashboard;
pub mod watchlist;
