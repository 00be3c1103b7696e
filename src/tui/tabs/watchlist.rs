//! Watchlist tab: add symbols and see their latest prices.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

use crate::format::{format_currency, format_percent};
use crate::tui::app::{App, Focus, Mode, QuoteState};
use crate::tui::components::{panel, status_bar, tab_bar};

/// Renders the watchlist tab.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Status bar
            Constraint::Length(3), // Add symbol input
            Constraint::Min(5),    // Symbols
            Constraint::Length(1), // Keybindings help
        ])
        .split(area);

    tab_bar::render(frame, main_layout[0], app);
    status_bar::render(frame, main_layout[1], app);
    render_input(frame, main_layout[2], app);
    render_list(frame, main_layout[3], app);
    render_keybindings(frame, main_layout[4]);
}

fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let editing = app.mode == Mode::Insert && app.focus == Focus::WatchlistInput;
    let block = panel::block("Add to Watchlist", editing);

    let para = if app.watchlist_input.as_str().is_empty() && !editing {
        Paragraph::new("Press [i] to add a symbol").style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(app.watchlist_input.as_str())
    };

    let inner = block.inner(area);
    frame.render_widget(para.block(block), area);

    if editing {
        frame.set_cursor_position((inner.x + app.watchlist_input.cursor_width(), inner.y));
    }
}

/// One row per symbol. Quotes that are still loading or failed never hide the symbol.
fn quote_line<'a>(symbol: &'a str, state: Option<&QuoteState>) -> Line<'a> {
    let mut spans = vec![Span::styled(
        format!("{symbol:<10}"),
        Style::default().add_modifier(Modifier::BOLD),
    )];

    match state {
        Some(QuoteState::Ready(quote)) => {
            let color = if quote.is_up() { Color::Green } else { Color::Red };
            spans.push(Span::raw(format!("{:>16} ", format_currency(quote.price, false))));
            spans.push(Span::styled(
                format!("{:>9}", format_percent(quote.percent_change)),
                Style::default().fg(color),
            ));
        }
        Some(QuoteState::Unavailable) => {
            spans.push(Span::styled("unavailable", Style::default().fg(Color::Red)));
        }
        Some(QuoteState::Loading) | None => {
            spans.push(Span::styled("loading...", Style::default().fg(Color::DarkGray)));
        }
    }

    Line::from(spans)
}

fn render_list(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::WatchlistItems;
    let title = format!("Watchlist ({}) [{}]", app.watchlist.len(), app.asset_type.label());
    let block = panel::block(&title, focused);

    if app.watchlist.is_empty() {
        let para = Paragraph::new("Watchlist is empty")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(para, area);
        return;
    }

    let items: Vec<ListItem> = app
        .watchlist
        .symbols()
        .iter()
        .map(|symbol| ListItem::new(quote_line(symbol.as_str(), app.quotes.get(symbol))))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.watchlist_index));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_keybindings(frame: &mut Frame, area: Rect) {
    let help = "[i]add [j/k]select [d]remove [Enter]analyze [t]asset type [r]efresh [Tab]dashboard [q]quit";

    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}
