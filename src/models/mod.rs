//! Structured records produced by the mock data layer.
//!
//! Contains the selector enums (asset type, timeframe), the qualitative
//! labels attached to generated indicators, and the snapshot types consumed
//! by the dashboard.

pub mod market;
pub mod prediction;
pub mod price;
pub mod symbol;
pub mod technical;

use serde::{Deserialize, Serialize};

pub use market::{MarketOverview, MarketSnapshot};
pub use prediction::{Prediction, PredictionDirection, PredictionTerm, PriceTargets, TradePlan};
pub use price::{ChartSeries, HistoricalPoint, PriceSnapshot};
pub use symbol::Symbol;
pub use technical::TechnicalSnapshot;

/// Kind of asset being analyzed. Selects the base-price table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    #[default]
    Crypto,
    Stock,
}

impl AssetType {
    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            AssetType::Crypto => "Crypto",
            AssetType::Stock => "Stock",
        }
    }

    /// Example symbols shown as the input placeholder.
    pub fn placeholder(&self) -> &'static str {
        match self {
            AssetType::Crypto => "Enter a symbol (e.g. BTC, ETH, ADA)",
            AssetType::Stock => "Enter a symbol (e.g. AAPL, GOOGL, TSLA)",
        }
    }

    /// Switches between crypto and stock.
    pub fn toggle(&mut self) {
        *self = match self {
            AssetType::Crypto => AssetType::Stock,
            AssetType::Stock => AssetType::Crypto,
        };
    }
}

/// Analysis timeframe selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1h")]
    H1,
    #[serde(rename = "4h")]
    H4,
    #[default]
    #[serde(rename = "1d")]
    D1,
    #[serde(rename = "1w")]
    W1,
}

impl Timeframe {
    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::H1 => "1h",
            Timeframe::H4 => "4h",
            Timeframe::D1 => "1d",
            Timeframe::W1 => "1w",
        }
    }

    /// Advances to the next timeframe, wrapping around.
    pub fn cycle(&mut self) {
        *self = match self {
            Timeframe::H1 => Timeframe::H4,
            Timeframe::H4 => Timeframe::D1,
            Timeframe::D1 => Timeframe::W1,
            Timeframe::W1 => Timeframe::H1,
        };
    }
}

/// Qualitative reading of a single indicator or of the technical summary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Bullish,
    Bearish,
    Neutral,
}

impl Sentiment {
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Bullish => "Bullish",
            Sentiment::Bearish => "Bearish",
            Sentiment::Neutral => "Neutral",
        }
    }
}

/// Overall trading recommendation derived from RSI and MACD votes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSignal {
    Buy,
    Sell,
    Hold,
}

impl TradeSignal {
    pub fn label(&self) -> &'static str {
        match self {
            TradeSignal::Buy => "BUY",
            TradeSignal::Sell => "SELL",
            TradeSignal::Hold => "HOLD",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalStrength {
    Strong,
    Medium,
    Weak,
}

impl SignalStrength {
    pub fn label(&self) -> &'static str {
        match self {
            SignalStrength::Strong => "Strong",
            SignalStrength::Medium => "Medium",
            SignalStrength::Weak => "Weak",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::High => "High Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::Low => "Low Risk",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_type_toggles_back_and_forth() {
        let mut asset = AssetType::default();
        assert_eq!(asset, AssetType::Crypto);
        asset.toggle();
        assert_eq!(asset, AssetType::Stock);
        assert!(asset.placeholder().contains("AAPL"));
        asset.toggle();
        assert_eq!(asset, AssetType::Crypto);
    }

    #[test]
    fn timeframe_cycles_through_all() {
        let mut tf = Timeframe::default();
        let mut seen = vec![tf.label()];
        for _ in 0..4 {
            tf.cycle();
            seen.push(tf.label());
        }
        assert_eq!(seen, vec!["1d", "1w", "1h", "4h", "1d"]);
    }

    #[test]
    fn timeframe_serializes_as_label() {
        assert_eq!(serde_json::to_string(&Timeframe::H4).unwrap(), "\"4h\"");
    }
}
