use serde::{Deserialize, Serialize};

/// Per-symbol market statistics shown in the quick-stats panel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub market_cap: f64,
    pub rank: u32,
    pub supply: f64,
    pub fear_greed_index: u32,
    pub vix: f64,
}

/// Market-wide sentiment readings, drawn fresh on every render pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketOverview {
    pub fear_greed: f64,
    pub fear_greed_label: String,
    pub vix: f64,
}
