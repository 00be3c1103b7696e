use serde::{Deserialize, Serialize};

use super::{Sentiment, TradeSignal};

/// Randomly drawn indicator values plus the labels derived from them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSnapshot {
    pub rsi: f64,
    pub rsi_signal: Sentiment,
    pub macd: f64,
    pub macd_signal: Sentiment,
    /// 20-period moving average stand-in.
    pub ma20: f64,
    /// Drawn by coin flip, independent of `ma20`.
    pub ma_signal: Sentiment,
    pub support: f64,
    pub resistance: f64,
    /// Result of the RSI/MACD vote. Can disagree with the technical summary.
    pub overall_signal: TradeSignal,
}
