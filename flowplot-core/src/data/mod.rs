//! Loaders for engine artifacts: tick CSVs, reference price CSVs, backtest JSON.

pub mod backtest;
pub mod error;
pub mod prices;
pub mod table;
pub mod ticks;

pub use backtest::{load_backtest_output, parse_backtest_output};
pub use error::DataError;
pub use prices::{load_price_series, prices_from_table};
pub use table::{load_table, Table, TableRow};
pub use ticks::{load_ticks, ticks_from_table};
