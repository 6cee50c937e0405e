//! Backtest report pipeline: backtest JSON → trajectory, PnL and Monte Carlo charts.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use flowplot_core::data::load_backtest_output;
use flowplot_core::derive::{McFigure, PnlFigure, TrajectoryFigure};
use flowplot_core::domain::BacktestOutput;
use flowplot_core::PlotConfig;

use crate::reporting::{BacktestArtifacts, ChartRenderer, ReportProgress};

#[derive(Debug, Clone)]
pub struct BacktestReportOptions {
    pub input: PathBuf,
    /// Defaults to the input file's directory.
    pub output_dir: Option<PathBuf>,
}

/// What a report run loaded and wrote.
#[derive(Debug, Clone)]
pub struct BacktestReport {
    pub output: BacktestOutput,
    pub artifacts: BacktestArtifacts,
}

/// Explicit directory, else the input's parent, else the working directory.
pub fn resolve_output_dir(input: &Path, explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(dir) => dir.to_path_buf(),
        None => input
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf),
    }
}

/// Charts are written in order; a failure leaves earlier ones on disk.
pub fn run_backtest_report<R, P>(
    opts: &BacktestReportOptions,
    config: &PlotConfig,
    renderer: &R,
    progress: &P,
) -> Result<BacktestReport>
where
    R: ChartRenderer + ?Sized,
    P: ReportProgress + ?Sized,
{
    let output = load_backtest_output(&opts.input)
        .with_context(|| format!("Failed to load backtest output {}", opts.input.display()))?;

    let output_dir = resolve_output_dir(&opts.input, opts.output_dir.as_deref());
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

    let trajectory = TrajectoryFigure::derive(&output)?;
    let pnl = PnlFigure::derive(&output.historical);
    let mc = McFigure::derive(&output, config.monte_carlo.histogram_bins);
    tracing::debug!(
        trajectory = %trajectory.fingerprint(),
        pnl = %pnl.fingerprint(),
        monte_carlo = ?mc.as_ref().map(|f| f.fingerprint().to_string()),
        "derived backtest figures"
    );

    let artifacts = BacktestArtifacts::in_dir(&output_dir, mc.is_some());

    renderer.render_trajectory(&trajectory, &artifacts.trajectory)?;
    progress.on_saved(&artifacts.trajectory);

    renderer.render_pnl(&pnl, &artifacts.pnl_breakdown)?;
    progress.on_saved(&artifacts.pnl_breakdown);

    match (&mc, &artifacts.mc_distributions) {
        (Some(figure), Some(path)) => {
            renderer.render_monte_carlo(figure, path)?;
            progress.on_saved(path);
        }
        _ => tracing::info!("no Monte Carlo simulations; skipping distribution chart"),
    }

    tracing::info!(
        dir = %output_dir.display(),
        count = artifacts.paths().len(),
        "wrote backtest charts"
    );
    Ok(BacktestReport { output, artifacts })
}
