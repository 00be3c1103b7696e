use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Symbol;

/// Point-in-time price bundle for one symbol.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    pub symbol: Symbol,
    /// Reference price the current price was drawn around.
    pub base_price: f64,
    pub current_price: f64,
    /// Absolute change from the base price.
    pub price_change: f64,
    /// Change from the base price in percent.
    pub percent_change: f64,
    pub high_24h: f64,
    pub low_24h: f64,
    pub volume_24h: f64,
    /// Daily random walk ending today, oldest first.
    pub historical: Vec<HistoricalPoint>,
}

impl PriceSnapshot {
    /// Whether the price moved up (or stayed flat) against the base.
    pub fn is_up(&self) -> bool {
        self.price_change >= 0.0
    }

    /// Builds the label/value pair consumed by the chart renderer.
    pub fn chart_series(&self) -> ChartSeries {
        ChartSeries {
            labels: self
                .historical
                .iter()
                .map(|p| p.date.format("%d/%m/%Y").to_string())
                .collect(),
            prices: self.historical.iter().map(|p| p.price).collect(),
        }
    }
}

/// One day of the synthetic history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    pub date: NaiveDate,
    pub price: f64,
    pub volume: f64,
}

/// Formatted date labels and the matching price series for a line chart.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub prices: Vec<f64>,
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Lowest and highest price, or `None` for an empty series.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        let first = *self.prices.first()?;
        Some(
            self.prices
                .iter()
                .fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p))),
        )
    }

    /// `(x, y)` pairs with the day index on the x axis.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.prices
            .iter()
            .enumerate()
            .map(|(i, &p)| (i as f64, p))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> PriceSnapshot {
        let day = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        PriceSnapshot {
            symbol: Symbol::parse("BTC").unwrap(),
            base_price: 100.0,
            current_price: 98.0,
            price_change: -2.0,
            percent_change: -2.0,
            high_24h: 101.0,
            low_24h: 97.0,
            volume_24h: 5_000.0,
            historical: vec![
                HistoricalPoint {
                    date: day,
                    price: 99.0,
                    volume: 10.0,
                },
                HistoricalPoint {
                    date: day.succ_opt().unwrap(),
                    price: 103.5,
                    volume: 12.0,
                },
            ],
        }
    }

    #[test]
    fn chart_series_formats_day_first_labels() {
        let series = snapshot().chart_series();
        assert_eq!(series.labels, vec!["09/03/2024", "10/03/2024"]);
        assert_eq!(series.prices, vec![99.0, 103.5]);
        assert_eq!(series.points(), vec![(0.0, 99.0), (1.0, 103.5)]);
    }

    #[test]
    fn bounds_of_series() {
        let series = snapshot().chart_series();
        assert_eq!(series.bounds(), Some((99.0, 103.5)));
        assert_eq!(ChartSeries::default().bounds(), None);
    }

    #[test]
    fn negative_change_is_down() {
        assert!(!snapshot().is_up());
    }
}
