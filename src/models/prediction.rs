use serde::{Deserialize, Serialize};

/// Horizon of a generated prediction. Selects the confidence range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictionTerm {
    Short,
    Medium,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictionDirection {
    Bullish,
    Bearish,
    Sideways,
}

impl PredictionDirection {
    pub const ALL: [PredictionDirection; 3] = [
        PredictionDirection::Bullish,
        PredictionDirection::Bearish,
        PredictionDirection::Sideways,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PredictionDirection::Bullish => "Bullish",
            PredictionDirection::Bearish => "Bearish",
            PredictionDirection::Sideways => "Sideways",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub term: PredictionTerm,
    pub direction: PredictionDirection,
    /// Whole percent.
    pub confidence: u32,
}

/// Entry, stop-loss and take-profit levels around the current price.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TradePlan {
    pub entry: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
}

impl TradePlan {
    pub fn from_price(price: f64) -> Self {
        Self {
            entry: price * 0.98,
            stop_loss: price * 0.95,
            take_profit: price * 1.05,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceTargets {
    pub bullish: f64,
    pub bearish: f64,
}

impl PriceTargets {
    pub fn from_price(price: f64) -> Self {
        Self {
            bullish: price * 1.15,
            bearish: price * 0.85,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trade_plan_levels() {
        let plan = TradePlan::from_price(200.0);
        assert!((plan.entry - 196.0).abs() < 1e-9);
        assert!((plan.stop_loss - 190.0).abs() < 1e-9);
        assert!((plan.take_profit - 210.0).abs() < 1e-9);
    }

    #[test]
    fn price_targets_are_fifteen_percent_away() {
        let targets = PriceTargets::from_price(100.0);
        assert!((targets.bullish - 115.0).abs() < 1e-9);
        assert!((targets.bearish - 85.0).abs() < 1e-9);
    }
}
