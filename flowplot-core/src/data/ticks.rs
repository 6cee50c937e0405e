//! Tick CSV loader: `timestamp,tvl,<venue_id>...`.

use std::path::Path;

use super::table::{load_table, Table};
use super::DataError;
use crate::domain::{TickRecord, TickSet};

pub const TIMESTAMP_COLUMN: &str = "timestamp";
pub const TVL_COLUMN: &str = "tvl";

/// Venue columns: every header except `timestamp` and `tvl`, in header order.
///
/// A repeated venue header appears once, at its first position; its values
/// come from the last column carrying that name.
pub fn venue_columns(headers: &[String]) -> Vec<String> {
    let mut venues: Vec<String> = Vec::new();
    for h in headers {
        if h != TIMESTAMP_COLUMN && h != TVL_COLUMN && !venues.contains(h) {
            venues.push(h.clone());
        }
    }
    venues
}

/// Build a `TickSet` from a parsed table. A header-only table yields an empty set.
pub fn ticks_from_table(table: &Table) -> Result<TickSet, DataError> {
    let venue_ids = venue_columns(&table.headers);
    let mut records = Vec::with_capacity(table.len());

    for row in table.rows() {
        let timestamp = row.parse::<i64>(TIMESTAMP_COLUMN)?;
        let tvl = row.parse::<f64>(TVL_COLUMN)?;
        let venue_values = venue_ids
            .iter()
            .map(|venue| row.parse::<f64>(venue))
            .collect::<Result<Vec<_>, _>>()?;
        records.push(TickRecord {
            timestamp,
            tvl,
            venue_values,
        });
    }

    Ok(TickSet { venue_ids, records })
}

/// Load an engine tick CSV.
pub fn load_ticks(path: &Path) -> Result<TickSet, DataError> {
    let table = load_table(path)?;
    ticks_from_table(&table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(csv: &str) -> Result<TickSet, DataError> {
        ticks_from_table(&Table::from_reader(csv.as_bytes()).unwrap())
    }

    #[test]
    fn venue_columns_exclude_timestamp_and_tvl() {
        let ticks = parse("timestamp,buy_eth,tvl,short_eth\n1,6.0,10.0,4.0\n").unwrap();
        assert_eq!(ticks.venue_ids, vec!["buy_eth", "short_eth"]);
        assert_eq!(ticks.records[0].venue_values, vec![6.0, 4.0]);
        assert_eq!(ticks.records[0].tvl, 10.0);
    }

    #[test]
    fn repeated_venue_column_keeps_last_value() {
        let ticks = parse("timestamp,tvl,buy_eth,buy_eth\n1,10,3,7\n").unwrap();
        assert_eq!(ticks.venue_ids, vec!["buy_eth"]);
        assert_eq!(ticks.records[0].venue_values, vec![7.0]);
        assert_eq!(ticks.venue_series("buy_eth"), Some(vec![7.0]));
    }

    #[test]
    fn header_only_file_is_empty_set() {
        let ticks = parse("timestamp,tvl,buy_eth\n").unwrap();
        assert!(ticks.is_empty());
        assert_eq!(ticks.venue_ids, vec!["buy_eth"]);
    }

    #[test]
    fn timestamp_must_be_integer_seconds() {
        let err = parse("timestamp,tvl\n1700000000.5,10.0\n").unwrap_err();
        assert!(matches!(err, DataError::InvalidValue { ref column, .. } if column == "timestamp"));
    }

    #[test]
    fn missing_tvl_column_is_missing_field() {
        let err = parse("timestamp,buy_eth\n1,2.0\n").unwrap_err();
        assert!(matches!(err, DataError::MissingField { ref field } if field == "tvl"));
    }
}
