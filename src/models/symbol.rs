//! Validated ticker symbols.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ScopeError;

/// Longest symbol accepted from user input.
pub const MAX_SYMBOL_LEN: usize = 15;

/// An uppercase ticker symbol such as `BTC` or `AAPL`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Trims raw input, checks it, then uppercases it into a symbol.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::InvalidSymbol`] if the input is blank, longer
    /// than [`MAX_SYMBOL_LEN`], or contains characters other than ASCII
    /// alphanumerics, `.`, `-` and `/`.
    pub fn parse(raw: &str) -> crate::Result<Self> {
        let symbol = raw.trim();
        if symbol.is_empty() {
            return Err(ScopeError::InvalidSymbol("symbol is empty".to_string()));
        }
        if symbol.chars().count() > MAX_SYMBOL_LEN {
            return Err(ScopeError::InvalidSymbol(format!(
                "{symbol} is longer than {MAX_SYMBOL_LEN} characters"
            )));
        }
        if let Some(bad) = symbol
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '/')))
        {
            return Err(ScopeError::InvalidSymbol(format!(
                "{symbol} contains unsupported character {bad:?}"
            )));
        }
        Ok(Self(symbol.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Symbol {
    type Error = ScopeError;

    fn try_from(value: String) -> crate::Result<Self> {
        Self::parse(&value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
