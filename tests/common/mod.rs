//! Shared test utilities.

#![allow(dead_code)]

use std::path::PathBuf;

use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tickerscope::analysis::AnalysisRequest;
use tickerscope::feed::MockFeed;
use tickerscope::models::{AssetType, Symbol, Timeframe};

/// Path to the test fixtures directory.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// A reproducible feed without simulated latency.
pub fn seeded_feed(seed: u64, failure_rate: f64) -> MockFeed {
    MockFeed::with_rng(StdRng::seed_from_u64(seed), false, failure_rate)
        .with_today(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap())
}

pub fn symbol(s: &str) -> Symbol {
    Symbol::parse(s).expect("valid test symbol")
}

pub fn crypto_request(s: &str) -> AnalysisRequest {
    AnalysisRequest {
        symbol: symbol(s),
        asset_type: AssetType::Crypto,
        timeframe: Timeframe::D1,
    }
}
