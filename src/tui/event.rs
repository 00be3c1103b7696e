//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use tokio::sync::mpsc;

use crate::analysis::{Analysis, AnalysisRequest, Quote, QuoteRequest};
use crate::models::Symbol;
use crate::session::RequestId;

use super::app::{App, Focus, Mode, Tab};

/// Events that can occur in the application.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI housekeeping.
    Tick,
}

/// Messages that update application state.
#[derive(Debug)]
pub enum Message {
    /// Input event from terminal.
    Input(Event),

    /// Analyze whatever is in the symbol field (startup default load).
    AnalyzeInput,
    /// A spawned analysis finished.
    AnalysisFinished {
        id: RequestId,
        result: crate::Result<Analysis>,
    },
    /// Watchlist prices came back.
    QuotesFinished {
        id: RequestId,
        quotes: Vec<(Symbol, crate::Result<Quote>)>,
    },
    /// The auto-refresh timer fired.
    RefreshDue,
}

/// Side effects the event loop performs on behalf of [`update`].
#[derive(Debug, PartialEq)]
pub enum Action {
    /// Spawn an analysis and restart the refresh timer.
    Analyze {
        request: AnalysisRequest,
        id: RequestId,
    },
    /// Fetch prices for the given watchlist symbols.
    FetchQuotes {
        request: QuoteRequest,
        id: RequestId,
    },
    /// Persist the current watchlist.
    SaveWatchlist,
}

/// Spawns a task that polls for terminal events and sends them to a channel.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        loop {
            match tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            })
            .await
            {
                Ok(Some(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                    if tx.send(Message::Input(Event::Key(key))).is_err() {
                        break;
                    }
                }
                Ok(Some(CrosstermEvent::Resize(w, h))) => {
                    if tx.send(Message::Input(Event::Resize(w, h))).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    });
}

/// Spawns a task that sends periodic tick events.
pub fn spawn_tick_timer(tx: mpsc::UnboundedSender<Message>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        loop {
            interval.tick().await;
            if tx.send(Message::Input(Event::Tick)).is_err() {
                break;
            }
        }
    });
}

/// Sends [`Message::AnalyzeInput`] once after `delay`.
pub fn spawn_startup_analysis(tx: mpsc::UnboundedSender<Message>, delay: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let _ = tx.send(Message::AnalyzeInput);
    });
}

/// Updates application state based on a message.
pub fn update(app: &mut App, message: Message) -> Vec<Action> {
    match message {
        Message::Input(event) => handle_input(app, event),
        Message::AnalyzeInput => analyze_input(app),
        Message::AnalysisFinished { id, result } => {
            app.apply_analysis(id, result);
            Vec::new()
        }
        Message::QuotesFinished { id, quotes } => {
            app.apply_quotes(id, quotes);
            Vec::new()
        }
        Message::RefreshDue => {
            let mut actions: Vec<Action> = app
                .request_refresh()
                .map(|(request, id)| Action::Analyze { request, id })
                .into_iter()
                .collect();
            actions.extend(quote_refresh(app));
            actions
        }
    }
}

fn analyze_input(app: &mut App) -> Vec<Action> {
    app.request_analysis()
        .map(|(request, id)| Action::Analyze { request, id })
        .into_iter()
        .collect()
}

/// Re-prices the watchlist. `None` when there is nothing to price.
pub fn quote_refresh(app: &mut App) -> Option<Action> {
    let (request, id) = app.begin_quote_refresh();
    (!request.symbols.is_empty()).then_some(Action::FetchQuotes { request, id })
}

/// Save and re-price after the watchlist changed.
fn watchlist_changed(app: &mut App) -> Vec<Action> {
    let mut actions = vec![Action::SaveWatchlist];
    actions.extend(quote_refresh(app));
    actions
}

/// Handles input events and updates application state.
fn handle_input(app: &mut App, event: Event) -> Vec<Action> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Resize(_, _) => Vec::new(),
        Event::Tick => {
            app.clear_stale_status();
            Vec::new()
        }
    }
}

/// Handles key press events.
fn handle_key(app: &mut App, key: KeyEvent) -> Vec<Action> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return Vec::new();
    }

    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Insert => handle_insert_mode(app, key),
    }
}

/// Handles keys in normal mode.
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            Vec::new()
        }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.previous_tab();
            } else {
                app.next_tab();
            }
            Vec::new()
        }
        KeyCode::BackTab => {
            app.previous_tab();
            Vec::new()
        }

        // Selectors
        KeyCode::Char('t') => {
            app.asset_type.toggle();
            Vec::new()
        }
        KeyCode::Char('f') => {
            app.timeframe.cycle();
            app.request_refresh()
                .map(|(request, id)| Action::Analyze { request, id })
                .into_iter()
                .collect()
        }
        KeyCode::Char('r') => update(app, Message::RefreshDue),

        _ => match app.current_tab() {
            Tab::Dashboard => handle_dashboard_keys(app, key),
            Tab::Watchlist => handle_watchlist_keys(app, key),
        },
    }
}

fn handle_dashboard_keys(app: &mut App, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Char('i') | KeyCode::Enter => {
            app.focus = Focus::SymbolInput;
            app.mode = Mode::Insert;
            Vec::new()
        }
        KeyCode::Char('a') => analyze_input(app),
        _ => Vec::new(),
    }
}

fn handle_watchlist_keys(app: &mut App, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Char('i') => {
            app.focus = Focus::WatchlistInput;
            app.mode = Mode::Insert;
            Vec::new()
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next_item();
            Vec::new()
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_previous_item();
            Vec::new()
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if app.remove_selected() {
                watchlist_changed(app)
            } else {
                Vec::new()
            }
        }
        KeyCode::Enter => {
            let Some(symbol) = app.watchlist.get(app.watchlist_index).cloned() else {
                return Vec::new();
            };
            app.symbol_input.set(symbol.as_str());
            app.select_tab(Tab::Dashboard);
            analyze_input(app)
        }
        _ => Vec::new(),
    }
}

/// Handles keys in insert mode (text input).
fn handle_insert_mode(app: &mut App, key: KeyEvent) -> Vec<Action> {
    let input = match app.focus {
        Focus::SymbolInput => &mut app.symbol_input,
        Focus::WatchlistInput => &mut app.watchlist_input,
        Focus::WatchlistItems => {
            app.mode = Mode::Normal;
            return Vec::new();
        }
    };

    match key.code {
        KeyCode::Esc => {
            app.mode = Mode::Normal;
            if app.focus == Focus::WatchlistInput {
                app.focus = Focus::WatchlistItems;
            }
            Vec::new()
        }
        KeyCode::Enter => {
            app.mode = Mode::Normal;
            match app.focus {
                Focus::SymbolInput => analyze_input(app),
                _ => {
                    app.focus = Focus::WatchlistItems;
                    if app.add_to_watchlist() {
                        watchlist_changed(app)
                    } else {
                        Vec::new()
                    }
                }
            }
        }
        KeyCode::Char(c) => {
            input.insert(c);
            Vec::new()
        }
        KeyCode::Backspace => {
            input.backspace();
            Vec::new()
        }
        KeyCode::Delete => {
            input.delete();
            Vec::new()
        }
        KeyCode::Left => {
            input.move_left();
            Vec::new()
        }
        KeyCode::Right => {
            input.move_right();
            Vec::new()
        }
        KeyCode::Home => {
            input.move_home();
            Vec::new()
        }
        KeyCode::End => {
            input.move_end();
            Vec::new()
        }
        _ => Vec::new(),
    }
}
