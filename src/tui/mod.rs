//! Terminal dashboard.
//!
//! A Ratatui front end over the analysis pipeline: a dashboard tab with the
//! symbol input, analysis panels and price chart, and a watchlist tab.

pub mod app;
pub mod components;
pub mod event;
pub mod input;
pub mod runner;
pub mod tabs;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use event::{Action, Event, Message};
pub use runner::run;
pub use terminal::{Tui, restore_terminal, setup_terminal};
pub use ui::render;
