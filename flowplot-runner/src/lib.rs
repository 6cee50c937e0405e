//! FlowPlot Runner: the allocation and backtest report pipelines.
//!
//! Each pipeline is Load → Derive → Render:
//! - [`allocations::run_allocations`] turns an engine tick CSV (plus optional
//!   reference price feeds) into one three-panel allocation chart.
//! - [`backtest_report::run_backtest_report`] turns a backtest JSON document into
//!   `trajectory.png`, `pnl_breakdown.png` and, when Monte Carlo data exists,
//!   `mc_distributions.png`.
//!
//! Rendering sits behind [`reporting::ChartRenderer`]; the production
//! implementation is [`reporting::PlottersRenderer`].

pub mod allocations;
pub mod backtest_report;
pub mod reporting;

pub use allocations::{run_allocations, AllocationOptions, DEFAULT_ALLOCATION_OUTPUT};
pub use backtest_report::{
    resolve_output_dir, run_backtest_report, BacktestReport, BacktestReportOptions,
};
pub use reporting::{
    BacktestArtifacts, ChartRenderer, PlottersRenderer, ReportProgress, SilentProgress,
    StdoutProgress,
};
