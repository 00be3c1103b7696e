//! The main event loop and the side effects behind [`Action`]s.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{error, info};

use crate::analysis::{analyze, fetch_quotes};
use crate::config::AppConfig;
use crate::feed::MockFeed;
use crate::refresh::RefreshTimer;
use crate::watchlist::WatchlistStore;

use super::app::App;
use super::event::{self, Action, Message};
use super::terminal::{Tui, restore_terminal, setup_terminal};
use super::ui;

/// Housekeeping tick for status expiry.
const TICK_INTERVAL_MS: u64 = 250;

/// Delay before the default symbol is analyzed at startup.
pub const STARTUP_DELAY: Duration = Duration::from_secs(1);

/// Symbol analyzed when the dashboard opens.
pub const DEFAULT_SYMBOL: &str = "BTC";

/// Runs the dashboard until the user quits.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up, drawn to, or restored.
pub async fn run(config: AppConfig) -> crate::Result<()> {
    let store = WatchlistStore::new(&config.storage.watchlist_path);
    let mut app = App::new(store.load());
    app.symbol_input.set(DEFAULT_SYMBOL);

    let (tx, rx) = mpsc::unbounded_channel();
    let mut dispatcher = Dispatcher::new(
        MockFeed::new(&config.feed),
        store,
        config.refresh_interval,
        tx.clone(),
    );

    let mut terminal = setup_terminal()?;
    event::spawn_event_reader(tx.clone());
    event::spawn_tick_timer(tx.clone(), TICK_INTERVAL_MS);
    event::spawn_startup_analysis(tx, STARTUP_DELAY);

    if let Some(action) = event::quote_refresh(&mut app) {
        dispatcher.perform(&mut app, action);
    }

    let result = event_loop(&mut terminal, &mut app, &mut dispatcher, rx).await;
    dispatcher.shutdown();

    // Restore even when the loop failed, then report the first error.
    let restored = restore_terminal(&mut terminal);
    result.and(restored)
}

async fn event_loop(
    terminal: &mut Tui,
    app: &mut App,
    dispatcher: &mut Dispatcher,
    mut rx: mpsc::UnboundedReceiver<Message>,
) -> crate::Result<()> {
    info!("Dashboard started");
    while !app.should_quit {
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| crate::ScopeError::Io(format!("failed to draw: {e}")))?;

        let Some(message) = rx.recv().await else {
            break;
        };
        for action in event::update(app, message) {
            dispatcher.perform(app, action);
        }
    }
    info!("Dashboard stopped");
    Ok(())
}

/// Executes actions: spawns mock fetches, drives the refresh timer and
/// persists the watchlist.
pub struct Dispatcher {
    feed: MockFeed,
    store: WatchlistStore,
    refresh: RefreshTimer,
    tx: mpsc::UnboundedSender<Message>,
}

impl Dispatcher {
    pub fn new(
        feed: MockFeed,
        store: WatchlistStore,
        refresh_interval: Duration,
        tx: mpsc::UnboundedSender<Message>,
    ) -> Self {
        Self {
            feed,
            store,
            refresh: RefreshTimer::new(refresh_interval),
            tx,
        }
    }

    pub fn perform(&mut self, app: &mut App, action: Action) {
        match action {
            Action::Analyze { request, id } => {
                let mut feed = self.feed.fork();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = analyze(&mut feed, request).await;
                    let _ = tx.send(Message::AnalysisFinished { id, result });
                });
                self.refresh.restart(self.tx.clone(), || Message::RefreshDue);
            }
            Action::FetchQuotes { request, id } => {
                let mut feed = self.feed.fork();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let quotes =
                        fetch_quotes(&mut feed, &request.symbols, request.asset_type).await;
                    let _ = tx.send(Message::QuotesFinished { id, quotes });
                });
            }
            Action::SaveWatchlist => {
                if let Err(e) = self.store.save(&app.watchlist) {
                    error!(
                        path = %self.store.path().display(),
                        error = %e,
                        "Failed to save watchlist"
                    );
                    app.show_error(&e);
                }
            }
        }
    }

    /// Whether the auto-refresh timer is running.
    pub fn refresh_active(&self) -> bool {
        self.refresh.is_active()
    }

    pub fn shutdown(&mut self) {
        self.refresh.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Symbol;
    use crate::watchlist::Watchlist;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn dispatcher(
        dir: &tempfile::TempDir,
        period: Duration,
    ) -> (Dispatcher, mpsc::UnboundedReceiver<Message>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let feed = MockFeed::with_rng(StdRng::seed_from_u64(11), false, 0.0);
        let store = WatchlistStore::new(dir.path().join("watchlist.json"));
        (Dispatcher::new(feed, store, period, tx), rx)
    }

    #[tokio::test]
    async fn analyze_action_delivers_result_and_starts_timer() {
        let dir = tempfile::tempdir().unwrap();
        let (mut dispatcher, mut rx) = dispatcher(&dir, Duration::from_secs(30));
        let mut app = App::new(Watchlist::new());
        app.symbol_input.set("BTC");

        for action in event::update(&mut app, Message::AnalyzeInput) {
            dispatcher.perform(&mut app, action);
        }
        assert!(dispatcher.refresh_active());

        let message = rx.recv().await.unwrap();
        assert!(matches!(message, Message::AnalysisFinished { .. }));
        event::update(&mut app, message);
        assert_eq!(app.analysis.as_ref().unwrap().request.symbol.as_str(), "BTC");
        assert!(app.pending.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_tick_arrives_after_period() {
        let dir = tempfile::tempdir().unwrap();
        let (mut dispatcher, mut rx) = dispatcher(&dir, Duration::from_secs(30));
        let mut app = App::new(Watchlist::new());
        app.symbol_input.set("ETH");

        for action in event::update(&mut app, Message::AnalyzeInput) {
            dispatcher.perform(&mut app, action);
        }
        assert!(matches!(rx.recv().await, Some(Message::AnalysisFinished { .. })));

        tokio::time::sleep(Duration::from_secs(31)).await;
        assert!(matches!(rx.recv().await, Some(Message::RefreshDue)));
    }

    #[tokio::test]
    async fn save_action_writes_watchlist() {
        let dir = tempfile::tempdir().unwrap();
        let (mut dispatcher, _rx) = dispatcher(&dir, Duration::from_secs(30));
        let mut app = App::new(Watchlist::from_symbols([Symbol::parse("SOL").unwrap()]));

        dispatcher.perform(&mut app, Action::SaveWatchlist);

        let reloaded = WatchlistStore::new(dir.path().join("watchlist.json")).load();
        assert_eq!(reloaded, app.watchlist);
    }

    #[tokio::test]
    async fn quotes_come_back_per_symbol() {
        let dir = tempfile::tempdir().unwrap();
        let (mut dispatcher, mut rx) = dispatcher(&dir, Duration::from_secs(30));
        let mut app = App::new(Watchlist::from_symbols([
            Symbol::parse("BTC").unwrap(),
            Symbol::parse("ETH").unwrap(),
        ]));

        let action = event::quote_refresh(&mut app).unwrap();
        dispatcher.perform(&mut app, action);

        match rx.recv().await {
            Some(Message::QuotesFinished { id, quotes }) => {
                assert_eq!(quotes.len(), 2);
                assert!(quotes.iter().all(|(_, q)| q.is_ok()));
                assert!(app.apply_quotes(id, quotes));
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }
}
