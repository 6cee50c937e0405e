//! Portfolio trajectory with Monte Carlo confidence bands.

use super::format::value_annotation;
use super::stats::{percentile, sorted};
use super::Annotation;
use crate::data::DataError;
use crate::domain::{BacktestOutput, HistoricalResult, SimulationResult};
use crate::fingerprint::{SeriesDigest, SeriesHasher};

/// Per-tick 5th/25th/75th/95th percentiles of simulated TVL.
#[derive(Debug, Clone, PartialEq)]
pub struct PercentileBands {
    pub p5: Vec<f64>,
    pub p25: Vec<f64>,
    pub p75: Vec<f64>,
    pub p95: Vec<f64>,
    /// Simulations long enough to take part.
    pub simulations: usize,
}

/// Bands over the first `n_ticks` of every simulation with at least that many ticks.
///
/// Simulations align with the historical run by tick index, not timestamp.
/// `None` when no simulation qualifies.
pub fn percentile_bands(sims: &[SimulationResult], n_ticks: usize) -> Option<PercentileBands> {
    let qualifying: Vec<&SimulationResult> = sims
        .iter()
        .filter(|s| s.trajectory.len() >= n_ticks)
        .collect();
    if qualifying.is_empty() {
        return None;
    }

    let mut bands = PercentileBands {
        p5: Vec::with_capacity(n_ticks),
        p25: Vec::with_capacity(n_ticks),
        p75: Vec::with_capacity(n_ticks),
        p95: Vec::with_capacity(n_ticks),
        simulations: qualifying.len(),
    };
    let mut column = Vec::with_capacity(qualifying.len());
    for tick in 0..n_ticks {
        column.clear();
        column.extend(qualifying.iter().map(|s| s.trajectory[tick].tvl));
        let col = sorted(&column);
        bands.p5.push(percentile(&col, 5.0));
        bands.p25.push(percentile(&col, 25.0));
        bands.p75.push(percentile(&col, 75.0));
        bands.p95.push(percentile(&col, 95.0));
    }
    Some(bands)
}

/// Stats box lines: TWRR, annualized, max drawdown, Sharpe.
pub fn stats_lines(hist: &HistoricalResult) -> Vec<String> {
    vec![
        format!("TWRR: {:+.2}%", hist.twrr_pct),
        format!("Ann.: {:+.2}%", hist.annualized_pct),
        format!("Max DD: {:.2}%", hist.max_drawdown_pct),
        format!("Sharpe: {:.3}", hist.sharpe),
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryFigure {
    pub title: String,
    pub timestamps: Vec<i64>,
    pub tvl: Vec<f64>,
    pub bands: Option<PercentileBands>,
    /// Starting value, drawn as a dashed reference line.
    pub baseline: f64,
    pub annotation: Annotation,
    pub stats_lines: Vec<String>,
}

impl TrajectoryFigure {
    pub fn derive(output: &BacktestOutput) -> Result<Self, DataError> {
        let hist = &output.historical;
        let first = hist.trajectory.first().ok_or(DataError::EmptyTrajectory)?;
        let last = hist.trajectory.last().ok_or(DataError::EmptyTrajectory)?;

        let timestamps: Vec<i64> = hist.trajectory.iter().map(|p| p.timestamp).collect();
        let tvl: Vec<f64> = hist.trajectory.iter().map(|p| p.tvl).collect();
        let bands = output
            .simulations()
            .and_then(|sims| percentile_bands(sims, tvl.len()));

        Ok(Self {
            title: hist.label.clone(),
            timestamps,
            bands,
            baseline: first.tvl,
            annotation: Annotation {
                timestamp: last.timestamp,
                value: last.tvl,
                text: value_annotation(first.tvl, last.tvl),
            },
            stats_lines: stats_lines(hist),
            tvl,
        })
    }

    pub fn fingerprint(&self) -> SeriesDigest {
        let mut h = SeriesHasher::new();
        h.text(&self.title)
            .timestamps(&self.timestamps)
            .values(&self.tvl)
            .value(self.baseline)
            .text(&self.annotation.text);
        if let Some(b) = &self.bands {
            h.values(&b.p5).values(&b.p25).values(&b.p75).values(&b.p95);
        }
        for line in &self.stats_lines {
            h.text(line);
        }
        h.finish()
    }
}
