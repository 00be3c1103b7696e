//! User-curated list of tracked symbols and its on-disk store.
//!
//! The store is a single JSON document holding an array of uppercase
//! strings. A missing or unreadable file loads as an empty list so a
//! corrupt store never prevents startup.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::models::Symbol;

/// Ordered, duplicate-free list of symbols in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Watchlist {
    symbols: Vec<Symbol>,
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a watchlist from existing symbols, dropping repeats.
    pub fn from_symbols(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        let mut list = Self::new();
        for symbol in symbols {
            list.add(symbol);
        }
        list
    }

    /// Appends a symbol. Returns `false` if it was already present.
    pub fn add(&mut self, symbol: Symbol) -> bool {
        if self.contains(&symbol) {
            return false;
        }
        self.symbols.push(symbol);
        true
    }

    /// Removes a symbol. Returns `false` if it was not present.
    pub fn remove(&mut self, symbol: &Symbol) -> bool {
        let before = self.symbols.len();
        self.symbols.retain(|s| s != symbol);
        self.symbols.len() != before
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.symbols.iter().any(|s| s == symbol)
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn get(&self, index: usize) -> Option<&Symbol> {
        self.symbols.get(index)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// JSON file holding the persisted watchlist.
#[derive(Clone, Debug)]
pub struct WatchlistStore {
    path: PathBuf,
}

impl WatchlistStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the watchlist, falling back to an empty list on any problem.
    ///
    /// Entries that are not valid symbols are skipped; valid ones are
    /// uppercased and deduplicated.
    pub fn load(&self) -> Watchlist {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No watchlist file, starting empty");
                return Watchlist::new();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read watchlist");
                return Watchlist::new();
            }
        };

        let raw: Vec<String> = match serde_json::from_str(&contents) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Watchlist is not a JSON string array"
                );
                return Watchlist::new();
            }
        };

        let watchlist = Watchlist::from_symbols(raw.iter().filter_map(|entry| {
            Symbol::parse(entry)
                .inspect_err(|e| warn!(entry = %entry, error = %e, "Skipping watchlist entry"))
                .ok()
        }));
        info!(path = %self.path.display(), count = watchlist.len(), "Loaded watchlist");
        watchlist
    }

    /// Writes the watchlist as a JSON array of strings.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Io`](crate::ScopeError::Io) if the file cannot
    /// be written.
    pub fn save(&self, watchlist: &Watchlist) -> crate::Result<()> {
        let json = serde_json::to_string(watchlist.symbols())?;
        std::fs::write(&self.path, json).map_err(|e| {
            crate::ScopeError::Io(format!("failed to write {}: {e}", self.path.display()))
        })?;
        debug!(path = %self.path.display(), count = watchlist.len(), "Saved watchlist");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(s: &str) -> Symbol {
        Symbol::parse(s).unwrap()
    }

    #[test]
    fn repeated_adds_do_not_duplicate() {
        let mut list = Watchlist::new();
        assert!(list.add(sym("BTC")));
        for _ in 0..5 {
            assert!(!list.add(sym("btc")));
        }
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn keeps_insertion_order() {
        let list = Watchlist::from_symbols([sym("ETH"), sym("BTC"), sym("ETH"), sym("ADA")]);
        let names: Vec<&str> = list.symbols().iter().map(Symbol::as_str).collect();
        assert_eq!(names, vec!["ETH", "BTC", "ADA"]);
    }

    #[test]
    fn add_then_remove_restores_prior_state() {
        let mut list = Watchlist::from_symbols([sym("AAPL"), sym("MSFT")]);
        let before = list.clone();
        assert!(list.add(sym("TSLA")));
        assert!(list.remove(&sym("TSLA")));
        assert_eq!(list, before);
    }

    #[test]
    fn removing_missing_symbol_is_noop() {
        let mut list = Watchlist::from_symbols([sym("AAPL")]);
        assert!(!list.remove(&sym("GOOGL")));
        assert_eq!(list.len(), 1);
    }
}
