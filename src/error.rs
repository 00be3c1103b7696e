//! Crate-level error types.
//!
//! [`ScopeError`] covers configuration, terminal and file I/O, JSON, symbol
//! validation and mock fetch failures.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ScopeError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum ScopeError {
    /// An environment variable held a value that could not be used.
    #[error("configuration error: {0}")]
    Config(String),

    /// A terminal or filesystem operation failed.
    #[error("io error: {0}")]
    Io(String),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// User input could not be turned into a ticker symbol.
    #[error("invalid symbol: {0}")]
    InvalidSymbol(String),

    /// A mock data fetch failed for the given symbol.
    #[error("failed to fetch {symbol}: {reason}")]
    Fetch { symbol: String, reason: String },
}
