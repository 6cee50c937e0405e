//! Rendering seam, artifact bookkeeping and console summaries.

pub mod artifacts;
pub mod charts;
pub mod summary;

use anyhow::Result;
use std::path::Path;

use flowplot_core::derive::{AllocationFigure, McFigure, PnlFigure, TrajectoryFigure};

pub use artifacts::{BacktestArtifacts, MC_FILE, PNL_FILE, TRAJECTORY_FILE};
pub use charts::PlottersRenderer;

/// Draws figure models to image files. One call writes exactly one file.
pub trait ChartRenderer {
    fn render_allocations(&self, figure: &AllocationFigure, path: &Path) -> Result<()>;

    fn render_trajectory(&self, figure: &TrajectoryFigure, path: &Path) -> Result<()>;

    fn render_pnl(&self, figure: &PnlFigure, path: &Path) -> Result<()>;

    fn render_monte_carlo(&self, figure: &McFigure, path: &Path) -> Result<()>;
}

/// Progress callback for multi-artifact runs.
pub trait ReportProgress {
    /// Called right after an artifact is written.
    fn on_saved(&self, path: &Path);
}

/// Prints each saved artifact to stdout.
pub struct StdoutProgress;

impl ReportProgress for StdoutProgress {
    fn on_saved(&self, path: &Path) {
        println!("  Saved {}", path.display());
    }
}

pub struct SilentProgress;

impl ReportProgress for SilentProgress {
    fn on_saved(&self, _path: &Path) {}
}
