//! Fixed artifact names for the backtest report.

use std::path::{Path, PathBuf};

pub const TRAJECTORY_FILE: &str = "trajectory.png";
pub const PNL_FILE: &str = "pnl_breakdown.png";
pub const MC_FILE: &str = "mc_distributions.png";

/// Paths written by one backtest report run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BacktestArtifacts {
    pub trajectory: PathBuf,
    pub pnl_breakdown: PathBuf,
    /// Absent when the input carries no Monte Carlo simulations.
    pub mc_distributions: Option<PathBuf>,
}

impl BacktestArtifacts {
    pub fn in_dir(output_dir: &Path, with_monte_carlo: bool) -> Self {
        Self {
            trajectory: output_dir.join(TRAJECTORY_FILE),
            pnl_breakdown: output_dir.join(PNL_FILE),
            mc_distributions: with_monte_carlo.then(|| output_dir.join(MC_FILE)),
        }
    }

    /// All paths in write order.
    pub fn paths(&self) -> Vec<&Path> {
        let mut paths = vec![self.trajectory.as_path(), self.pnl_breakdown.as_path()];
        if let Some(mc) = &self.mc_distributions {
            paths.push(mc);
        }
        paths
    }
}
