//! Domain types for engine output artifacts.

pub mod backtest;
pub mod price;
pub mod tick;

pub use backtest::{
    BacktestOutput, HistoricalResult, MonteCarloOutput, SimulationResult, TrajectoryPoint,
};
pub use price::{PriceFeed, PricePoint, PriceSeries};
pub use tick::{TickRecord, TickSet};
