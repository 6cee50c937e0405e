//! Reference price feeds (spot and perp mark).

use serde::{Deserialize, Serialize};

/// Which reference feed a price CSV represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceFeed {
    Spot,
    Perp,
}

impl PriceFeed {
    /// CSV column carrying the price for this feed.
    pub fn price_column(self) -> &'static str {
        match self {
            PriceFeed::Spot => "price",
            PriceFeed::Perp => "mark_price",
        }
    }

    /// Legend label.
    pub fn label(self) -> &'static str {
        match self {
            PriceFeed::Spot => "Spot",
            PriceFeed::Perp => "Perp Mark",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: i64,
    pub price: f64,
}

/// Price points of one feed, in file order, already clipped to a tick span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub feed: PriceFeed,
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
