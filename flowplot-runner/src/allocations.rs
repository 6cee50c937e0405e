//! Allocation pipeline: tick CSV (+ reference prices) → three-panel chart.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use flowplot_core::data::{load_price_series, load_ticks};
use flowplot_core::derive::allocation::AllocationInputs;
use flowplot_core::derive::AllocationFigure;
use flowplot_core::domain::{PriceFeed, PriceSeries};
use flowplot_core::PlotConfig;

use crate::reporting::ChartRenderer;

pub const DEFAULT_ALLOCATION_OUTPUT: &str = "backtest_allocations.png";

#[derive(Debug, Clone)]
pub struct AllocationOptions {
    pub tick_csv: PathBuf,
    pub spot_csv: Option<PathBuf>,
    pub perp_csv: Option<PathBuf>,
    pub output: PathBuf,
    /// Wins over the title picked from the venue columns.
    pub title: Option<String>,
}

impl AllocationOptions {
    pub fn new(tick_csv: impl Into<PathBuf>) -> Self {
        Self {
            tick_csv: tick_csv.into(),
            spot_csv: None,
            perp_csv: None,
            output: PathBuf::from(DEFAULT_ALLOCATION_OUTPUT),
            title: None,
        }
    }
}

fn load_feed(
    path: Option<&Path>,
    feed: PriceFeed,
    span: (i64, i64),
) -> Result<Option<PriceSeries>> {
    path.map(|p| {
        load_price_series(p, feed, span)
            .with_context(|| format!("Failed to load {} prices from {}", feed.label(), p.display()))
    })
    .transpose()
}

/// Returns the written path, or `None` when the tick file has no rows.
pub fn run_allocations<R: ChartRenderer + ?Sized>(
    opts: &AllocationOptions,
    config: &PlotConfig,
    renderer: &R,
) -> Result<Option<PathBuf>> {
    let ticks = load_ticks(&opts.tick_csv)
        .with_context(|| format!("Failed to load ticks from {}", opts.tick_csv.display()))?;

    let Some(span) = ticks.span() else {
        tracing::warn!(path = %opts.tick_csv.display(), "tick file has no rows; nothing to plot");
        return Ok(None);
    };

    let spot = load_feed(opts.spot_csv.as_deref(), PriceFeed::Spot, span)?;
    let perp = load_feed(opts.perp_csv.as_deref(), PriceFeed::Perp, span)?;

    let inputs = AllocationInputs {
        ticks: &ticks,
        spot: spot.as_ref(),
        perp: perp.as_ref(),
        title: opts.title.as_deref(),
    };
    let Some(figure) = AllocationFigure::derive(&inputs, &config.palette(), &config.stack_order)
    else {
        return Ok(None);
    };
    tracing::debug!(
        ticks = ticks.len(),
        venues = figure.value_layers.len(),
        fingerprint = %figure.fingerprint(),
        "derived allocation figure"
    );

    renderer.render_allocations(&figure, &opts.output)?;
    tracing::info!(path = %opts.output.display(), "wrote allocation chart");
    Ok(Some(opts.output.clone()))
}
