//! Simulated market analysis dashboard.
//!
//! Generates mock price, technical and market-sentiment data for a symbol,
//! derives trading signals and predictions from it, and renders the result
//! in a terminal dashboard with a persisted watchlist.

pub mod analysis;
pub mod config;
pub mod error;
pub mod feed;
pub mod format;
pub mod generator;
pub mod models;
pub mod refresh;
pub mod session;
pub mod signals;
pub mod tui;
pub mod watchlist;

pub use error::{Result, ScopeError};
