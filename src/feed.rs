//! Mock market-data feed.
//!
//! Stands in for a remote API: each fetch waits a fixed latency, may fail
//! with a configured probability, then returns data from [`crate::generator`].

use std::time::Duration;

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::ScopeError;
use crate::config::FeedConfig;
use crate::generator;
use crate::models::{AssetType, MarketSnapshot, PriceSnapshot, Symbol, TechnicalSnapshot};

/// Simulated latency of the price endpoint.
pub const PRICE_LATENCY: Duration = Duration::from_millis(1000);
/// Simulated latency of the technical-indicator endpoint.
pub const TECHNICAL_LATENCY: Duration = Duration::from_millis(800);
/// Simulated latency of the market-statistics endpoint.
pub const MARKET_LATENCY: Duration = Duration::from_millis(600);

/// In-process replacement for a market-data API client.
#[derive(Debug)]
pub struct MockFeed {
    rng: StdRng,
    simulate_latency: bool,
    failure_rate: f64,
    today: Option<NaiveDate>,
}

impl MockFeed {
    /// Creates a feed from configuration, seeding from the OS unless a seed is set.
    pub fn new(config: &FeedConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(rng, config.simulate_latency, config.failure_rate)
    }

    pub fn with_rng(rng: StdRng, simulate_latency: bool, failure_rate: f64) -> Self {
        Self {
            rng,
            simulate_latency,
            failure_rate,
            today: None,
        }
    }

    /// Pins the date that generated histories end on.
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Derives an independent feed with the same settings for a spawned request.
    ///
    /// The child is seeded from this feed's generator, so a seeded parent
    /// yields a reproducible sequence of children.
    pub fn fork(&mut self) -> Self {
        Self {
            rng: StdRng::seed_from_u64(self.rng.random()),
            simulate_latency: self.simulate_latency,
            failure_rate: self.failure_rate,
            today: self.today,
        }
    }

    /// Direct access to the generator for draws that have no endpoint.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub async fn fetch_price(
        &mut self,
        symbol: &Symbol,
        asset_type: AssetType,
    ) -> crate::Result<PriceSnapshot> {
        debug!(symbol = %symbol, asset_type = asset_type.label(), "Fetching price");
        self.wait(PRICE_LATENCY).await;
        self.roll_failure(symbol, "price")?;
        let today = self.today();
        Ok(generator::price_snapshot(
            &mut self.rng,
            symbol,
            asset_type,
            today,
        ))
    }

    pub async fn fetch_technical(&mut self, symbol: &Symbol) -> crate::Result<TechnicalSnapshot> {
        debug!(symbol = %symbol, "Fetching technical indicators");
        self.wait(TECHNICAL_LATENCY).await;
        self.roll_failure(symbol, "technical indicators")?;
        Ok(generator::technical_snapshot(&mut self.rng))
    }

    pub async fn fetch_market(&mut self, symbol: &Symbol) -> crate::Result<MarketSnapshot> {
        debug!(symbol = %symbol, "Fetching market statistics");
        self.wait(MARKET_LATENCY).await;
        self.roll_failure(symbol, "market statistics")?;
        Ok(generator::market_snapshot(&mut self.rng))
    }

    fn today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    async fn wait(&self, latency: Duration) {
        if self.simulate_latency {
            tokio::time::sleep(latency).await;
        }
    }

    /// Fails the current fetch with probability `failure_rate`.
    ///
    /// No random draw happens when failures are disabled, so the data
    /// sequence of a seeded feed does not depend on this check.
    fn roll_failure(&mut self, symbol: &Symbol, endpoint: &str) -> crate::Result<()> {
        if self.failure_rate > 0.0 && self.rng.random::<f64>() < self.failure_rate {
            warn!(symbol = %symbol, endpoint, "Simulated fetch failure");
            return Err(ScopeError::Fetch {
                symbol: symbol.to_string(),
                reason: format!("{endpoint} endpoint unavailable"),
            });
        }
        Ok(())
    }
}
