//! Synthetic market data.
//!
//! Every generator is a pure function of an injected [`Rng`], so seeding a
//! [`rand::rngs::StdRng`] reproduces the exact same snapshot. Nothing here
//! sleeps or performs I/O; latency is layered on by [`crate::feed`].

use chrono::{Days, NaiveDate};
use rand::Rng;

use crate::models::{
    AssetType, HistoricalPoint, MarketOverview, MarketSnapshot, Prediction, PredictionDirection,
    PredictionTerm, PriceSnapshot, Sentiment, Symbol, TechnicalSnapshot,
};
use crate::signals;

/// Number of days covered by the synthetic history.
pub const HISTORY_DAYS: u64 = 30;

/// Reference prices for well-known crypto assets.
const CRYPTO_BASE_PRICES: &[(&str, f64)] = &[
    ("BTC", 45_000.0),
    ("ETH", 3_000.0),
    ("ADA", 0.5),
    ("DOT", 25.0),
    ("LINK", 15.0),
    ("UNI", 8.0),
    ("DOGE", 0.08),
    ("XRP", 0.6),
    ("LTC", 150.0),
    ("BCH", 400.0),
];

/// Reference prices for well-known stocks.
const STOCK_BASE_PRICES: &[(&str, f64)] = &[
    ("AAPL", 175.0),
    ("GOOGL", 2_800.0),
    ("TSLA", 800.0),
    ("AMZN", 3_200.0),
    ("MSFT", 300.0),
    ("NVDA", 220.0),
    ("META", 320.0),
    ("NFLX", 400.0),
    ("AMD", 100.0),
    ("BABA", 85.0),
];

/// Looks up the fixed reference price for a symbol, if it has one.
pub fn known_base_price(asset_type: AssetType, symbol: &Symbol) -> Option<f64> {
    let table = match asset_type {
        AssetType::Crypto => CRYPTO_BASE_PRICES,
        AssetType::Stock => STOCK_BASE_PRICES,
    };
    table
        .iter()
        .find(|(s, _)| *s == symbol.as_str())
        .map(|(_, p)| *p)
}

/// Reference price for a symbol. Unknown symbols draw a random price:
/// up to 1000 for crypto, up to 500 for stocks.
pub fn base_price<R: Rng + ?Sized>(rng: &mut R, asset_type: AssetType, symbol: &Symbol) -> f64 {
    known_base_price(asset_type, symbol).unwrap_or_else(|| {
        let ceiling = match asset_type {
            AssetType::Crypto => 1_000.0,
            AssetType::Stock => 500.0,
        };
        rng.random::<f64>() * ceiling
    })
}

/// Draws a price snapshot within ±5% of the base price, with a fresh history.
pub fn price_snapshot<R: Rng + ?Sized>(
    rng: &mut R,
    symbol: &Symbol,
    asset_type: AssetType,
    today: NaiveDate,
) -> PriceSnapshot {
    let base_price = base_price(rng, asset_type, symbol);

    let change = (rng.random::<f64>() - 0.5) * 0.1;
    let current_price = base_price * (1.0 + change);
    let price_change = current_price - base_price;
    let percent_change = if base_price == 0.0 {
        0.0
    } else {
        price_change / base_price * 100.0
    };

    let high_24h = current_price * (1.0 + rng.random::<f64>() * 0.05);
    let low_24h = current_price * (1.0 - rng.random::<f64>() * 0.05);
    let volume_24h = rng.random::<f64>() * 1e9;
    let historical = historical_series(rng, base_price, HISTORY_DAYS, today);

    PriceSnapshot {
        symbol: symbol.clone(),
        base_price,
        current_price,
        price_change,
        percent_change,
        high_24h,
        low_24h,
        volume_24h,
        historical,
    }
}

/// Random walk of `days + 1` daily points ending at `today`, oldest first.
///
/// Each step moves the price by up to ±2.5% before recording it.
pub fn historical_series<R: Rng + ?Sized>(
    rng: &mut R,
    base_price: f64,
    days: u64,
    today: NaiveDate,
) -> Vec<HistoricalPoint> {
    let mut price = base_price;
    (0..=days)
        .rev()
        .map(|days_ago| {
            price *= 1.0 + (rng.random::<f64>() - 0.5) * 0.05;
            HistoricalPoint {
                date: today.checked_sub_days(Days::new(days_ago)).unwrap_or(today),
                price,
                volume: rng.random::<f64>() * 1e6,
            }
        })
        .collect()
}

/// Draws indicator values and derives their labels.
///
/// RSI is drawn from `[30, 70)`, so its own label is always neutral.
pub fn technical_snapshot<R: Rng + ?Sized>(rng: &mut R) -> TechnicalSnapshot {
    let rsi = 30.0 + rng.random::<f64>() * 40.0;
    let macd = (rng.random::<f64>() - 0.5) * 2.0;
    let ma20 = rng.random::<f64>() * 100.0;
    let ma_signal = if rng.random::<f64>() > 0.5 {
        Sentiment::Bullish
    } else {
        Sentiment::Bearish
    };
    let support = rng.random::<f64>() * 50_000.0;
    let resistance = rng.random::<f64>() * 60_000.0;

    TechnicalSnapshot {
        rsi,
        rsi_signal: signals::rsi_signal(rsi),
        macd,
        macd_signal: signals::macd_signal(macd),
        ma20,
        ma_signal,
        support,
        resistance,
        overall_signal: signals::overall_signal(rsi, macd),
    }
}

pub fn market_snapshot<R: Rng + ?Sized>(rng: &mut R) -> MarketSnapshot {
    MarketSnapshot {
        market_cap: rng.random::<f64>() * 1e11,
        rank: (rng.random::<f64>() * 100.0).floor() as u32 + 1,
        supply: rng.random::<f64>() * 1e9,
        fear_greed_index: (rng.random::<f64>() * 100.0).floor() as u32,
        vix: 15.0 + rng.random::<f64>() * 20.0,
    }
}

/// Market-wide fear/greed and volatility readings.
pub fn market_overview<R: Rng + ?Sized>(rng: &mut R) -> MarketOverview {
    let fear_greed = 20.0 + rng.random::<f64>() * 60.0;
    let vix = 15.0 + rng.random::<f64>() * 20.0;
    MarketOverview {
        fear_greed,
        fear_greed_label: signals::fear_greed_label(fear_greed).to_string(),
        vix,
    }
}

/// Picks a direction at random. Short-term confidence is 60-84%,
/// medium-term 40-74%.
pub fn prediction<R: Rng + ?Sized>(rng: &mut R, term: PredictionTerm) -> Prediction {
    let direction = PredictionDirection::ALL[rng.random_range(0..PredictionDirection::ALL.len())];
    let confidence = match term {
        PredictionTerm::Short => (60.0 + rng.random::<f64>() * 25.0).floor(),
        PredictionTerm::Medium => (40.0 + rng.random::<f64>() * 35.0).floor(),
    } as u32;
    Prediction {
        term,
        direction,
        confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn sym(s: &str) -> Symbol {
        Symbol::parse(s).unwrap()
    }

    #[test]
    fn same_seed_same_snapshot() {
        let a = price_snapshot(
            &mut StdRng::seed_from_u64(7),
            &sym("BTC"),
            AssetType::Crypto,
            today(),
        );
        let b = price_snapshot(
            &mut StdRng::seed_from_u64(7),
            &sym("BTC"),
            AssetType::Crypto,
            today(),
        );
        assert_eq!(a, b);
    }

    #[test]
    fn known_symbols_stay_within_five_percent() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let snap = price_snapshot(&mut rng, &sym("BTC"), AssetType::Crypto, today());
            assert_eq!(snap.base_price, 45_000.0);
            assert!(snap.current_price >= 45_000.0 * 0.95);
            assert!(snap.current_price <= 45_000.0 * 1.05);
            assert!(snap.high_24h >= snap.current_price);
            assert!(snap.low_24h <= snap.current_price);
            assert!(snap.percent_change.abs() <= 5.0);
        }
    }

    #[test]
    fn base_price_table_depends_on_asset_type() {
        assert_eq!(
            known_base_price(AssetType::Stock, &sym("AAPL")),
            Some(175.0)
        );
        assert_eq!(known_base_price(AssetType::Crypto, &sym("AAPL")), None);
        assert_eq!(known_base_price(AssetType::Crypto, &sym("DOGE")), Some(0.08));
    }

    #[test]
    fn unknown_stock_base_price_is_below_ceiling() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let price = base_price(&mut rng, AssetType::Stock, &sym("ZZZZ"));
            assert!((0.0..500.0).contains(&price));
        }
    }

    #[test]
    fn history_covers_thirty_days_ending_today() {
        let mut rng = StdRng::seed_from_u64(11);
        let series = historical_series(&mut rng, 100.0, HISTORY_DAYS, today());
        assert_eq!(series.len(), 31);
        assert_eq!(series.last().unwrap().date, today());
        assert_eq!(
            series.first().unwrap().date,
            NaiveDate::from_ymd_opt(2024, 5, 16).unwrap()
        );
        assert!(series.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn history_steps_are_bounded() {
        let mut rng = StdRng::seed_from_u64(5);
        let series = historical_series(&mut rng, 100.0, HISTORY_DAYS, today());
        let mut prev = 100.0;
        for point in &series {
            let ratio = point.price / prev;
            assert!((0.975..=1.025).contains(&ratio));
            assert!((0.0..1e6).contains(&point.volume));
            prev = point.price;
        }
    }

    #[test]
    fn technical_values_in_range_and_labels_consistent() {
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let t = technical_snapshot(&mut rng);
            assert!((30.0..70.0).contains(&t.rsi));
            assert!((-1.0..1.0).contains(&t.macd));
            assert!((0.0..100.0).contains(&t.ma20));
            assert_eq!(t.rsi_signal, Sentiment::Neutral);
            assert_eq!(t.macd_signal, signals::macd_signal(t.macd));
            assert_eq!(t.overall_signal, signals::overall_signal(t.rsi, t.macd));
            assert_ne!(t.ma_signal, Sentiment::Neutral);
        }
    }

    #[test]
    fn market_values_in_range() {
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let m = market_snapshot(&mut rng);
            assert!((1..=100).contains(&m.rank));
            assert!(m.fear_greed_index < 100);
            assert!((15.0..35.0).contains(&m.vix));

            let o = market_overview(&mut rng);
            assert!((20.0..80.0).contains(&o.fear_greed));
            assert_eq!(o.fear_greed_label, signals::fear_greed_label(o.fear_greed));
        }
    }

    #[test]
    fn prediction_confidence_ranges() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..200 {
            let short = prediction(&mut rng, PredictionTerm::Short);
            assert!((60..85).contains(&short.confidence));
            let medium = prediction(&mut rng, PredictionTerm::Medium);
            assert!((40..75).contains(&medium.confidence));
        }
    }
}
