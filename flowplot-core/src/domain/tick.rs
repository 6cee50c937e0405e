//! Engine tick dump records.

use serde::{Deserialize, Serialize};

/// One simulation tick: timestamp, total value locked, and per-venue value.
///
/// `venue_values` is positional; index `i` belongs to `TickSet::venue_ids[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickRecord {
    /// Epoch seconds.
    pub timestamp: i64,
    pub tvl: f64,
    pub venue_values: Vec<f64>,
}

/// All ticks from one CSV file, in file order.
///
/// Every record carries one value per venue column declared in the header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickSet {
    pub venue_ids: Vec<String>,
    pub records: Vec<TickRecord>,
}

impl TickSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn timestamps(&self) -> Vec<i64> {
        self.records.iter().map(|r| r.timestamp).collect()
    }

    pub fn tvl(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.tvl).collect()
    }

    pub fn has_venue(&self, venue_id: &str) -> bool {
        self.venue_ids.iter().any(|v| v == venue_id)
    }

    /// Values of one venue across all ticks, or `None` if the venue is not a column.
    pub fn venue_series(&self, venue_id: &str) -> Option<Vec<f64>> {
        let idx = self.venue_ids.iter().position(|v| v == venue_id)?;
        Some(self.records.iter().map(|r| r.venue_values[idx]).collect())
    }

    /// Smallest and largest timestamp. Ticks are not re-sorted, so this scans.
    pub fn span(&self) -> Option<(i64, i64)> {
        let min = self.records.iter().map(|r| r.timestamp).min()?;
        let max = self.records.iter().map(|r| r.timestamp).max()?;
        Some((min, max))
    }
}
