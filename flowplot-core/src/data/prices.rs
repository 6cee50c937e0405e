//! Reference price CSV loader, clipped to the tick time span.

use std::path::Path;

use super::table::{load_table, Table};
use super::ticks::TIMESTAMP_COLUMN;
use super::DataError;
use crate::domain::{PriceFeed, PricePoint, PriceSeries};

/// Keep rows with `span.0 <= timestamp <= span.1`, in file order.
///
/// Only rows inside the span have their price parsed.
pub fn prices_from_table(
    table: &Table,
    feed: PriceFeed,
    span: (i64, i64),
) -> Result<PriceSeries, DataError> {
    let (start, end) = span;
    let column = feed.price_column();
    let mut points = Vec::new();

    for row in table.rows() {
        let timestamp = row.parse::<i64>(TIMESTAMP_COLUMN)?;
        if timestamp < start || timestamp > end {
            continue;
        }
        points.push(PricePoint {
            timestamp,
            price: row.parse::<f64>(column)?,
        });
    }

    Ok(PriceSeries { feed, points })
}

pub fn load_price_series(
    path: &Path,
    feed: PriceFeed,
    span: (i64, i64),
) -> Result<PriceSeries, DataError> {
    let table = load_table(path)?;
    let series = prices_from_table(&table, feed, span)?;
    tracing::debug!(
        path = %path.display(),
        feed = feed.label(),
        kept = series.points.len(),
        total = table.len(),
        "loaded reference prices"
    );
    Ok(series)
}
