//! Status bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::app::{App, Mode, StatusKind};

/// Renders the status bar: selectors, mode and the transient status message.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let mode_span = match app.mode {
        Mode::Normal => Span::styled(
            " NORMAL ",
            Style::default().fg(Color::Black).bg(Color::Blue),
        ),
        Mode::Insert => Span::styled(
            " INSERT ",
            Style::default().fg(Color::Black).bg(Color::Green),
        ),
    };

    let status_span = match app.status {
        Some(ref status) => {
            let color = match status.kind {
                StatusKind::Loading => Color::Yellow,
                StatusKind::Success => Color::Green,
                StatusKind::Error => Color::Red,
            };
            Span::styled(format!(" {} ", status.message), Style::default().fg(color))
        }
        None => Span::raw(""),
    };

    let updated = app
        .analysis
        .as_ref()
        .map(|a| format!(" Updated {} ", a.generated_at.format("%H:%M:%S")))
        .unwrap_or_default();

    let line = Line::from(vec![
        mode_span,
        Span::styled(
            format!(" {} ", app.asset_type.label()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("│"),
        Span::styled(
            format!(" {} ", app.timeframe.label()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("│"),
        Span::styled(updated, Style::default().fg(Color::White)),
        Span::raw("│"),
        status_span,
    ]);

    let para = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}
