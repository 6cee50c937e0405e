//! Derivers: loaded records → figure models.
//!
//! Figure models are plain data. Every number a chart draws is computed here,
//! so the chart invariants (stacking, percentage floor, percentile bands, PnL
//! sign convention, histogram reference lines) are testable without pixels.

pub mod allocation;
pub mod format;
pub mod monte_carlo;
pub mod pnl;
pub mod stats;
pub mod trajectory;

pub use allocation::{allocation_title, AllocationFigure, StackedLayer, TVL_FLOOR};
pub use format::{format_usd, format_signed_usd, value_annotation};
pub use monte_carlo::{HistogramPanel, McFigure, McSummary, PercentileRow};
pub use pnl::{PnlBar, PnlFigure};
pub use stats::{percentile, return_pct, sorted, Histogram};
pub use trajectory::{percentile_bands, PercentileBands, TrajectoryFigure};

/// Text label pinned to a data point (final portfolio value).
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub timestamp: i64,
    pub value: f64,
    pub text: String,
}
