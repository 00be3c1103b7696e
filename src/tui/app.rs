//! Application state for the TUI.
//!
//! [`App`] is built once at startup and owned by the event loop. Every
//! handler receives it explicitly; there is no global analyzer instance.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::{debug, error, info};

use crate::ScopeError;
use crate::analysis::{Analysis, AnalysisRequest, Quote, QuoteRequest};
use crate::models::{AssetType, Symbol, Timeframe};
use crate::session::{RequestId, RequestTracker};
use crate::watchlist::Watchlist;

use super::input::TextInput;

/// How long non-loading status messages stay visible.
pub const STATUS_TTL: Duration = Duration::from_secs(3);

/// Shown for every analysis failure, whatever the cause.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch data. Try again later.";

/// Shown when analyze is triggered with an empty symbol field.
pub const EMPTY_SYMBOL_MESSAGE: &str = "Enter a symbol first!";

/// Central application state container.
pub struct App {
    // -- Tab State --
    pub tabs: Vec<Tab>,
    pub active_tab: usize,

    // -- Inputs --
    pub symbol_input: TextInput,
    pub watchlist_input: TextInput,
    pub asset_type: AssetType,
    pub timeframe: Timeframe,

    // -- Analysis State --
    /// Symbol of the most recent analyze action.
    pub current_symbol: Option<Symbol>,
    /// Last successfully completed analysis.
    pub analysis: Option<Analysis>,
    /// Request currently awaiting a result.
    pub pending: Option<RequestId>,
    pub requests: RequestTracker,

    // -- Watchlist State --
    pub watchlist: Watchlist,
    pub quotes: HashMap<Symbol, QuoteState>,
    pub quote_requests: RequestTracker,
    /// Highlighted row in the watchlist panel.
    pub watchlist_index: usize,

    // -- UI State --
    pub focus: Focus,
    pub mode: Mode,
    pub status: Option<StatusMessage>,

    // -- Internal --
    pub should_quit: bool,
}

impl App {
    /// Creates the app around a previously loaded watchlist.
    pub fn new(watchlist: Watchlist) -> Self {
        Self {
            tabs: vec![Tab::Dashboard, Tab::Watchlist],
            active_tab: 0,

            symbol_input: TextInput::new(),
            watchlist_input: TextInput::new(),
            asset_type: AssetType::default(),
            timeframe: Timeframe::default(),

            current_symbol: None,
            analysis: None,
            pending: None,
            requests: RequestTracker::new(),

            watchlist,
            quotes: HashMap::new(),
            quote_requests: RequestTracker::new(),
            watchlist_index: 0,

            focus: Focus::SymbolInput,
            mode: Mode::Normal,
            status: None,

            should_quit: false,
        }
    }

    pub fn current_tab(&self) -> Tab {
        self.tabs[self.active_tab]
    }

    pub fn next_tab(&mut self) {
        self.active_tab = (self.active_tab + 1) % self.tabs.len();
        self.update_focus_for_tab();
    }

    pub fn previous_tab(&mut self) {
        self.active_tab = self
            .active_tab
            .checked_sub(1)
            .unwrap_or(self.tabs.len() - 1);
        self.update_focus_for_tab();
    }

    pub fn select_tab(&mut self, tab: Tab) {
        if let Some(pos) = self.tabs.iter().position(|t| *t == tab) {
            self.active_tab = pos;
            self.update_focus_for_tab();
        }
    }

    fn update_focus_for_tab(&mut self) {
        self.mode = Mode::Normal;
        self.focus = match self.current_tab() {
            Tab::Dashboard => Focus::SymbolInput,
            Tab::Watchlist => Focus::WatchlistItems,
        };
    }

    /// Validates the symbol field and issues a new analysis request.
    ///
    /// Blank or malformed input is reported in the status bar and no
    /// request is issued.
    pub fn request_analysis(&mut self) -> Option<(AnalysisRequest, RequestId)> {
        match Symbol::parse(self.symbol_input.as_str()) {
            Ok(symbol) => Some(self.begin_analysis(symbol)),
            Err(_) if self.symbol_input.is_blank() => {
                self.show_status(StatusKind::Error, EMPTY_SYMBOL_MESSAGE);
                None
            }
            Err(e) => {
                self.show_status(StatusKind::Error, e.to_string());
                None
            }
        }
    }

    /// Re-runs the analysis of the current symbol, if there is one.
    pub fn request_refresh(&mut self) -> Option<(AnalysisRequest, RequestId)> {
        let symbol = self.current_symbol.clone()?;
        Some(self.begin_analysis(symbol))
    }

    fn begin_analysis(&mut self, symbol: Symbol) -> (AnalysisRequest, RequestId) {
        let id = self.requests.begin();
        self.show_status(StatusKind::Loading, format!("Analyzing {symbol}..."));
        self.current_symbol = Some(symbol.clone());
        self.pending = Some(id);
        info!(symbol = %symbol, request = %id, "Analysis requested");
        (
            AnalysisRequest {
                symbol,
                asset_type: self.asset_type,
                timeframe: self.timeframe,
            },
            id,
        )
    }

    /// Applies a finished analysis if it belongs to the newest request.
    ///
    /// Returns `false` when the result was stale and discarded. On failure
    /// the previous analysis stays on screen and a generic message is shown.
    pub fn apply_analysis(&mut self, id: RequestId, result: crate::Result<Analysis>) -> bool {
        if !self.requests.is_current(id) {
            debug!(request = %id, "Discarding stale analysis result");
            return false;
        }
        self.pending = None;

        match result {
            Ok(analysis) => {
                let symbol = analysis.request.symbol.clone();
                self.analysis = Some(analysis);
                self.show_status(StatusKind::Success, format!("Analysis for {symbol} loaded!"));
            }
            Err(e) => {
                error!(request = %id, error = %e, "Error analyzing asset");
                self.show_status(StatusKind::Error, FETCH_FAILED_MESSAGE);
            }
        }
        true
    }

    /// Adds the watchlist field's symbol. Returns `true` if the list changed.
    ///
    /// Blank input is ignored. A duplicate leaves the field untouched.
    pub fn add_to_watchlist(&mut self) -> bool {
        if self.watchlist_input.is_blank() {
            return false;
        }
        match Symbol::parse(self.watchlist_input.as_str()) {
            Ok(symbol) => {
                if !self.watchlist.add(symbol.clone()) {
                    return false;
                }
                info!(symbol = %symbol, "Added to watchlist");
                self.quotes.insert(symbol, QuoteState::Loading);
                self.watchlist_input.clear();
                true
            }
            Err(e) => {
                self.show_status(StatusKind::Error, e.to_string());
                false
            }
        }
    }

    /// Removes the highlighted watchlist entry. Returns `true` if the list changed.
    pub fn remove_selected(&mut self) -> bool {
        let Some(symbol) = self.watchlist.get(self.watchlist_index).cloned() else {
            return false;
        };
        self.remove_from_watchlist(&symbol)
    }

    pub fn remove_from_watchlist(&mut self, symbol: &Symbol) -> bool {
        if !self.watchlist.remove(symbol) {
            return false;
        }
        info!(symbol = %symbol, "Removed from watchlist");
        self.quotes.remove(symbol);
        self.watchlist_index = self
            .watchlist_index
            .min(self.watchlist.len().saturating_sub(1));
        true
    }

    pub fn select_next_item(&mut self) {
        if self.watchlist_index + 1 < self.watchlist.len() {
            self.watchlist_index += 1;
        }
    }

    pub fn select_previous_item(&mut self) {
        self.watchlist_index = self.watchlist_index.saturating_sub(1);
    }

    /// Marks every watchlist symbol as loading and issues a quote request.
    ///
    /// Any quote request still in flight is superseded.
    pub fn begin_quote_refresh(&mut self) -> (QuoteRequest, RequestId) {
        let symbols = self.watchlist.symbols().to_vec();
        for symbol in &symbols {
            self.quotes.insert(symbol.clone(), QuoteState::Loading);
        }
        let id = self.quote_requests.begin();
        let request = QuoteRequest {
            symbols,
            asset_type: self.asset_type,
        };
        (request, id)
    }

    /// Stores quote results for symbols still on the watchlist.
    ///
    /// Returns `false` when the batch belongs to a superseded request and
    /// was discarded.
    pub fn apply_quotes(
        &mut self,
        id: RequestId,
        quotes: Vec<(Symbol, crate::Result<Quote>)>,
    ) -> bool {
        if !self.quote_requests.is_current(id) {
            debug!(request = %id, "Discarding stale watchlist quotes");
            return false;
        }
        for (symbol, result) in quotes {
            if !self.watchlist.contains(&symbol) {
                continue;
            }
            let state = match result {
                Ok(quote) => QuoteState::Ready(quote),
                Err(_) => QuoteState::Unavailable,
            };
            self.quotes.insert(symbol, state);
        }
        true
    }

    pub fn show_status(&mut self, kind: StatusKind, message: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind,
            message: message.into(),
            shown_at: Instant::now(),
        });
    }

    /// Clears non-loading status messages older than [`STATUS_TTL`].
    pub fn clear_stale_status(&mut self) {
        if let Some(ref status) = self.status
            && status.kind != StatusKind::Loading
            && status.shown_at.elapsed() > STATUS_TTL
        {
            self.status = None;
        }
    }

    /// Shows an error raised outside the analysis pipeline.
    pub fn show_error(&mut self, error: &ScopeError) {
        self.show_status(StatusKind::Error, error.to_string());
    }
}

/// Tabs in the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Watchlist,
}

impl Tab {
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Watchlist => "Watchlist",
        }
    }
}

/// UI focus targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    SymbolInput,
    WatchlistInput,
    WatchlistItems,
}

/// Input mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    Insert,
}

/// Price line state of one watchlist entry.
#[derive(Clone, Debug, PartialEq)]
pub enum QuoteState {
    Loading,
    Ready(Quote),
    Unavailable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Loading,
    Success,
    Error,
}

/// Transient message shown in the status bar.
#[derive(Clone, Debug)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub message: String,
    pub shown_at: Instant,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(Watchlist::new())
    }

    #[test]
    fn blank_symbol_shows_inline_error() {
        let mut app = app();
        app.symbol_input.set("   ");
        assert!(app.request_analysis().is_none());
        let status = app.status.as_ref().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.message, EMPTY_SYMBOL_MESSAGE);
        assert!(app.pending.is_none());
    }

    #[test]
    fn request_uppercases_symbol_and_sets_loading() {
        let mut app = app();
        app.symbol_input.set(" eth ");
        app.asset_type = AssetType::Crypto;
        let (request, id) = app.request_analysis().unwrap();
        assert_eq!(request.symbol.as_str(), "ETH");
        assert_eq!(app.pending, Some(id));
        assert_eq!(app.status.as_ref().unwrap().kind, StatusKind::Loading);
    }

    #[test]
    fn refresh_without_symbol_does_nothing() {
        assert!(app().request_refresh().is_none());
    }

    #[test]
    fn loading_status_does_not_expire() {
        let mut app = app();
        app.show_status(StatusKind::Loading, "Analyzing...");
        app.status.as_mut().unwrap().shown_at = Instant::now() - Duration::from_secs(10);
        app.clear_stale_status();
        assert!(app.status.is_some());

        app.show_status(StatusKind::Success, "done");
        app.status.as_mut().unwrap().shown_at = Instant::now() - Duration::from_secs(4);
        app.clear_stale_status();
        assert!(app.status.is_none());
    }

    #[test]
    fn duplicate_watchlist_add_keeps_input() {
        let mut app = app();
        app.watchlist_input.set("btc");
        assert!(app.add_to_watchlist());
        assert!(app.watchlist_input.as_str().is_empty());

        app.watchlist_input.set("BTC");
        assert!(!app.add_to_watchlist());
        assert_eq!(app.watchlist_input.as_str(), "BTC");
        assert_eq!(app.watchlist.len(), 1);
    }

    #[test]
    fn removing_last_item_clamps_selection() {
        let mut app = App::new(Watchlist::from_symbols([
            Symbol::parse("A").unwrap(),
            Symbol::parse("B").unwrap(),
        ]));
        app.select_next_item();
        assert_eq!(app.watchlist_index, 1);
        assert!(app.remove_selected());
        assert_eq!(app.watchlist_index, 0);
        assert!(app.remove_selected());
        assert!(!app.remove_selected());
    }

    fn quote(symbol: &Symbol, price: f64) -> (Symbol, crate::Result<Quote>) {
        (
            symbol.clone(),
            Ok(Quote {
                symbol: symbol.clone(),
                price,
                percent_change: 0.0,
            }),
        )
    }

    #[test]
    fn quotes_for_removed_symbols_are_ignored() {
        let mut app = app();
        let gone = Symbol::parse("GONE").unwrap();
        let (_, id) = app.begin_quote_refresh();
        assert!(app.apply_quotes(id, vec![quote(&gone, 1.0)]));
        assert!(!app.quotes.contains_key(&gone));
    }

    #[test]
    fn older_quote_batch_arriving_late_is_discarded() {
        let btc = Symbol::parse("BTC").unwrap();
        let mut app = App::new(Watchlist::from_symbols([btc.clone()]));

        let (crypto, old_id) = app.begin_quote_refresh();
        assert_eq!(crypto.asset_type, AssetType::Crypto);
        app.asset_type.toggle();
        let (stock, new_id) = app.begin_quote_refresh();
        assert_eq!(stock.asset_type, AssetType::Stock);

        assert!(app.apply_quotes(new_id, vec![quote(&btc, 2.0)]));
        assert!(!app.apply_quotes(old_id, vec![quote(&btc, 1.0)]));

        match app.quotes.get(&btc) {
            Some(QuoteState::Ready(q)) => assert_eq!(q.price, 2.0),
            other => panic!("unexpected quote state: {other:?}"),
        }
    }
}
