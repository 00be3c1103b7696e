//! The analysis pipeline: symbol in, complete dashboard view-model out.
//!
//! All three mock endpoints are queried and every derived value is computed
//! before anything is returned, so a failure part-way through yields an
//! error and never a half-filled [`Analysis`].

use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::feed::MockFeed;
use crate::generator;
use crate::models::{
    AssetType, ChartSeries, MarketOverview, MarketSnapshot, Prediction, PredictionTerm,
    PriceSnapshot, PriceTargets, RiskLevel, Sentiment, SignalStrength, Symbol, TechnicalSnapshot,
    Timeframe, TradePlan,
};
use crate::signals;

/// What the user asked to analyze.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub symbol: Symbol,
    pub asset_type: AssetType,
    pub timeframe: Timeframe,
}

/// Everything the dashboard panels display for one symbol.
#[derive(Clone, Debug)]
pub struct Analysis {
    pub request: AnalysisRequest,
    pub price: PriceSnapshot,
    pub technical: TechnicalSnapshot,
    pub market: MarketSnapshot,
    /// Label vote over RSI/MACD/MA signals. Independent of `technical.overall_signal`.
    pub summary: Sentiment,
    pub strength: SignalStrength,
    pub trade_plan: TradePlan,
    pub short_term: Prediction,
    pub medium_term: Prediction,
    pub targets: PriceTargets,
    pub risk: RiskLevel,
    pub overview: MarketOverview,
    pub chart: ChartSeries,
    pub generated_at: DateTime<Local>,
}

/// Runs the full mock fetch sequence and derives every dashboard value.
///
/// # Errors
///
/// Returns the first [`ScopeError::Fetch`](crate::ScopeError::Fetch) raised
/// by the feed. No partial result is produced.
pub async fn analyze(feed: &mut MockFeed, request: AnalysisRequest) -> crate::Result<Analysis> {
    info!(
        symbol = %request.symbol,
        asset_type = request.asset_type.label(),
        timeframe = request.timeframe.label(),
        "Analyzing"
    );

    let price = feed.fetch_price(&request.symbol, request.asset_type).await?;
    let technical = feed.fetch_technical(&request.symbol).await?;
    let market = feed.fetch_market(&request.symbol).await?;

    let summary = signals::technical_summary(
        technical.rsi_signal,
        technical.macd_signal,
        technical.ma_signal,
    );
    let strength = signals::signal_strength(technical.rsi, technical.macd);
    let risk = signals::risk_level(technical.rsi, technical.macd);
    let short_term = generator::prediction(feed.rng(), PredictionTerm::Short);
    let medium_term = generator::prediction(feed.rng(), PredictionTerm::Medium);
    let overview = generator::market_overview(feed.rng());

    let trade_plan = TradePlan::from_price(price.current_price);
    let targets = PriceTargets::from_price(price.current_price);
    let chart = price.chart_series();

    info!(
        symbol = %request.symbol,
        price = price.current_price,
        signal = technical.overall_signal.label(),
        summary = summary.label(),
        "Analysis complete"
    );

    Ok(Analysis {
        request,
        price,
        technical,
        market,
        summary,
        strength,
        trade_plan,
        short_term,
        medium_term,
        targets,
        risk,
        overview,
        chart,
        generated_at: Local::now(),
    })
}

/// Watchlist symbols to price, and the asset type to price them as.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuoteRequest {
    pub symbols: Vec<Symbol>,
    pub asset_type: AssetType,
}

/// Latest price line for a watchlist entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Quote {
    pub symbol: Symbol,
    pub price: f64,
    pub percent_change: f64,
}

impl Quote {
    pub fn is_up(&self) -> bool {
        self.percent_change >= 0.0
    }
}

/// Fetches a quote for each symbol in order.
///
/// Symbols are fetched one at a time and each failure is logged and kept
/// in its own slot, so one failing symbol never blocks the rest.
pub async fn fetch_quotes(
    feed: &mut MockFeed,
    symbols: &[Symbol],
    asset_type: AssetType,
) -> Vec<(Symbol, crate::Result<Quote>)> {
    let mut quotes = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        let result = feed
            .fetch_price(symbol, asset_type)
            .await
            .map(|snapshot| Quote {
                symbol: symbol.clone(),
                price: snapshot.current_price,
                percent_change: snapshot.percent_change,
            });
        if let Err(ref e) = result {
            warn!(symbol = %symbol, error = %e, "Watchlist price update failed");
        }
        quotes.push((symbol.clone(), result));
    }
    quotes
}
