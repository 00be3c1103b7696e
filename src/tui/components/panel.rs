//! Bordered panel helpers shared by the tabs.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

/// Builds a titled, bordered block. Focused panels get a cyan border.
pub fn block(title: &str, focused: bool) -> Block<'static> {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Renders `lines` inside an unfocused panel.
pub fn render_lines(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line>) {
    let para = Paragraph::new(lines).block(block(title, false));
    frame.render_widget(para, area);
}

/// Renders a dimmed placeholder inside an unfocused panel.
pub fn render_placeholder(frame: &mut Frame, area: Rect, title: &str, text: &str) {
    let para = Paragraph::new(text.to_string())
        .style(Style::default().fg(Color::DarkGray))
        .block(block(title, false));
    frame.render_widget(para, area);
}
