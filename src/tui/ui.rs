//! Main UI rendering coordinator.

use ratatui::Frame;

use super::app::{App, Tab};
use super::tabs::{dashboard, watchlist};

/// Renders the entire application UI.
pub fn render(frame: &mut Frame, app: &App) {
    match app.current_tab() {
        Tab::Dashboard => dashboard::render(frame, app),
        Tab::Watchlist => watchlist::render(frame, app),
    }
}
