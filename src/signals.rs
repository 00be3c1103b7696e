//! Threshold classifiers over the generated indicator values.
//!
//! Two independent vote counters live here: [`overall_signal`] turns raw
//! RSI/MACD numbers into buy/sell/hold, while [`technical_summary`] tallies
//! the three qualitative indicator labels. They are not reconciled and can
//! disagree for the same snapshot.

use crate::models::{RiskLevel, Sentiment, SignalStrength, TradeSignal};

/// RSI at or below this level is oversold.
pub const RSI_OVERSOLD: f64 = 30.0;
/// RSI at or above this level is overbought.
pub const RSI_OVERBOUGHT: f64 = 70.0;

/// Classifies an RSI reading: oversold is bullish, overbought is bearish.
pub fn rsi_signal(rsi: f64) -> Sentiment {
    if rsi > RSI_OVERBOUGHT {
        Sentiment::Bearish
    } else if rsi < RSI_OVERSOLD {
        Sentiment::Bullish
    } else {
        Sentiment::Neutral
    }
}

/// Classifies a MACD reading. Zero counts as bearish.
pub fn macd_signal(macd: f64) -> Sentiment {
    if macd > 0.0 {
        Sentiment::Bullish
    } else {
        Sentiment::Bearish
    }
}

/// Counts RSI and MACD votes into a trading recommendation.
///
/// RSI below 30 and positive MACD vote bullish; RSI above 70 and negative
/// MACD vote bearish. A MACD of exactly zero casts no vote. Ties hold.
pub fn overall_signal(rsi: f64, macd: f64) -> TradeSignal {
    let mut bullish = 0;
    let mut bearish = 0;

    if rsi < RSI_OVERSOLD {
        bullish += 1;
    }
    if rsi > RSI_OVERBOUGHT {
        bearish += 1;
    }
    if macd > 0.0 {
        bullish += 1;
    }
    if macd < 0.0 {
        bearish += 1;
    }

    match bullish.cmp(&bearish) {
        std::cmp::Ordering::Greater => TradeSignal::Buy,
        std::cmp::Ordering::Less => TradeSignal::Sell,
        std::cmp::Ordering::Equal => TradeSignal::Hold,
    }
}

/// Tallies the RSI, MACD and moving-average labels into one sentiment.
pub fn technical_summary(rsi: Sentiment, macd: Sentiment, ma: Sentiment) -> Sentiment {
    let signals = [rsi, macd, ma];
    let bullish = signals.iter().filter(|s| **s == Sentiment::Bullish).count();
    let bearish = signals.iter().filter(|s| **s == Sentiment::Bearish).count();

    match bullish.cmp(&bearish) {
        std::cmp::Ordering::Greater => Sentiment::Bullish,
        std::cmp::Ordering::Less => Sentiment::Bearish,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    }
}

/// Distance of RSI from 50 plus ten times the MACD magnitude.
pub fn signal_strength(rsi: f64, macd: f64) -> SignalStrength {
    let strength = (rsi - 50.0).abs() + macd.abs() * 10.0;
    if strength > 25.0 {
        SignalStrength::Strong
    } else if strength > 15.0 {
        SignalStrength::Medium
    } else {
        SignalStrength::Weak
    }
}

pub fn risk_level(rsi: f64, macd: f64) -> RiskLevel {
    if rsi > RSI_OVERBOUGHT || rsi < RSI_OVERSOLD {
        RiskLevel::High
    } else if macd.abs() > 1.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

pub fn fear_greed_label(value: f64) -> &'static str {
    if value < 25.0 {
        "Extreme Fear"
    } else if value < 45.0 {
        "Fear"
    } else if value < 55.0 {
        "Neutral"
    } else if value < 75.0 {
        "Greed"
    } else {
        "Extreme Greed"
    }
}
