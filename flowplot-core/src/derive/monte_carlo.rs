//! Monte Carlo outcome distributions and percentile summary.

use super::stats::{percentile, sorted, Histogram};
use crate::domain::{BacktestOutput, HistoricalResult, SimulationResult};
use crate::fingerprint::{SeriesDigest, SeriesHasher};
use crate::venue::Rgb;

/// One histogram with a vertical reference line at the historical value.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramPanel {
    pub title: &'static str,
    pub x_label: &'static str,
    pub color: Rgb,
    pub values: Vec<f64>,
    pub histogram: Histogram,
    /// Exact historical value; never rounded.
    pub reference: f64,
    pub reference_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct McFigure {
    pub title: String,
    /// TWRR, max drawdown, Sharpe.
    pub panels: Vec<HistogramPanel>,
}

impl McFigure {
    /// `None` when Monte Carlo data is absent or empty.
    pub fn derive(output: &BacktestOutput, bins: usize) -> Option<Self> {
        let sims = output.simulations()?;
        let mc = output.monte_carlo.as_ref()?;
        let hist = &output.historical;

        let panel = |title, x_label, color, values: Vec<f64>, reference: f64, label: String| {
            HistogramPanel {
                title,
                x_label,
                color,
                histogram: Histogram::from_values(&values, bins),
                values,
                reference,
                reference_label: label,
            }
        };

        let panels = vec![
            panel(
                "TWRR Distribution",
                "TWRR (%)",
                Rgb(70, 130, 180),
                sims.iter().map(|s| s.twrr_pct).collect(),
                hist.twrr_pct,
                format!("Historical: {:+.1}%", hist.twrr_pct),
            ),
            panel(
                "Max Drawdown Distribution",
                "Max Drawdown (%)",
                Rgb(255, 127, 80),
                sims.iter().map(|s| s.max_drawdown_pct).collect(),
                hist.max_drawdown_pct,
                format!("Historical: {:.2}%", hist.max_drawdown_pct),
            ),
            panel(
                "Sharpe Ratio Distribution",
                "Sharpe",
                Rgb(60, 179, 113),
                sims.iter().map(|s| s.sharpe).collect(),
                hist.sharpe,
                format!("Historical: {:.3}", hist.sharpe),
            ),
        ];

        Some(Self {
            title: format!("{} - Monte Carlo ({} sims)", hist.label, mc.n_simulations),
            panels,
        })
    }

    pub fn fingerprint(&self) -> SeriesDigest {
        let mut h = SeriesHasher::new();
        h.text(&self.title);
        for p in &self.panels {
            let counts: Vec<f64> = p.histogram.counts.iter().map(|&c| c as f64).collect();
            h.text(p.title)
                .values(&p.values)
                .values(&p.histogram.edges)
                .values(&counts)
                .value(p.reference);
        }
        h.finish()
    }
}

/// One row of the percentile table.
#[derive(Debug, Clone, PartialEq)]
pub struct PercentileRow {
    pub label: &'static str,
    pub twrr_pct: f64,
    pub max_drawdown_pct: f64,
    pub sharpe: f64,
    pub net_pnl: Option<f64>,
}

/// Percentile table over the simulation set, plus VaR on simulated net PnL.
#[derive(Debug, Clone, PartialEq)]
pub struct McSummary {
    pub simulations: usize,
    pub historical_twrr_pct: f64,
    pub historical_max_drawdown_pct: f64,
    pub historical_sharpe: f64,
    pub rows: Vec<PercentileRow>,
    /// 5th percentile of net PnL.
    pub var_95: Option<f64>,
    /// 1st percentile of net PnL.
    pub var_99: Option<f64>,
}

const SUMMARY_LEVELS: [(&str, f64); 5] = [
    ("5th", 5.0),
    ("25th", 25.0),
    ("50th", 50.0),
    ("75th", 75.0),
    ("95th", 95.0),
];

impl McSummary {
    /// Net PnL columns appear only when every simulation reports `net_pnl`.
    pub fn derive(hist: &HistoricalResult, sims: &[SimulationResult]) -> Option<Self> {
        if sims.is_empty() {
            return None;
        }
        let twrrs = sorted(&sims.iter().map(|s| s.twrr_pct).collect::<Vec<_>>());
        let drawdowns = sorted(&sims.iter().map(|s| s.max_drawdown_pct).collect::<Vec<_>>());
        let sharpes = sorted(&sims.iter().map(|s| s.sharpe).collect::<Vec<_>>());
        let pnls: Option<Vec<f64>> = sims.iter().map(|s| s.net_pnl).collect();
        let pnls = pnls.map(|p| sorted(&p));

        let rows = SUMMARY_LEVELS
            .iter()
            .map(|&(label, pct)| PercentileRow {
                label,
                twrr_pct: percentile(&twrrs, pct),
                max_drawdown_pct: percentile(&drawdowns, pct),
                sharpe: percentile(&sharpes, pct),
                net_pnl: pnls.as_deref().map(|p| percentile(p, pct)),
            })
            .collect();

        Some(Self {
            simulations: sims.len(),
            historical_twrr_pct: hist.twrr_pct,
            historical_max_drawdown_pct: hist.max_drawdown_pct,
            historical_sharpe: hist.sharpe,
            rows,
            var_95: pnls.as_deref().map(|p| percentile(p, 5.0)),
            var_99: pnls.as_deref().map(|p| percentile(p, 1.0)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MonteCarloOutput;

    fn hist() -> HistoricalResult {
        HistoricalResult {
            label: "v2".into(),
            trajectory: vec![],
            twrr_pct: 12.34,
            annualized_pct: 30.0,
            max_drawdown_pct: 4.56,
            sharpe: 1.2345,
            funding_pnl: 0.0,
            lending_interest: 0.0,
            rewards_pnl: 0.0,
            premium_pnl: 0.0,
            lp_fees: 0.0,
            swap_costs: 0.0,
            net_pnl: 0.0,
            rebalances: None,
            liquidations: None,
            ticks: None,
        }
    }

    fn sims(n: usize, with_pnl: bool) -> Vec<SimulationResult> {
        (0..n)
            .map(|i| SimulationResult {
                trajectory: vec![],
                twrr_pct: i as f64,
                max_drawdown_pct: 1.0 + i as f64 * 0.1,
                sharpe: 0.5 + i as f64 * 0.01,
                net_pnl: with_pnl.then(|| i as f64 * 10.0 - 200.0),
            })
            .collect()
    }

    fn output(sims: Option<Vec<SimulationResult>>) -> BacktestOutput {
        BacktestOutput {
            historical: hist(),
            monte_carlo: sims.map(|simulations| MonteCarloOutput {
                n_simulations: 250,
                simulations,
            }),
        }
    }

    #[test]
    fn reference_lines_sit_on_historical_values() {
        let fig = McFigure::derive(&output(Some(sims(50, false))), 40).unwrap();
        assert_eq!(fig.panels.len(), 3);
        assert_eq!(fig.panels[0].reference, 12.34);
        assert_eq!(fig.panels[0].reference_label, "Historical: +12.3%");
        assert_eq!(fig.panels[1].reference, 4.56);
        assert_eq!(fig.panels[1].reference_label, "Historical: 4.56%");
        assert_eq!(fig.panels[2].reference_label, "Historical: 1.234");
        assert_eq!(fig.panels[0].histogram.counts.len(), 40);
        assert_eq!(fig.panels[0].histogram.total(), 50);
    }

    #[test]
    fn title_uses_declared_simulation_count() {
        let fig = McFigure::derive(&output(Some(sims(3, false))), 10).unwrap();
        assert_eq!(fig.title, "v2 - Monte Carlo (250 sims)");
    }

    #[test]
    fn absent_or_empty_monte_carlo_derives_nothing() {
        assert!(McFigure::derive(&output(None), 40).is_none());
        assert!(McFigure::derive(&output(Some(vec![])), 40).is_none());
    }

    #[test]
    fn summary_percentiles_and_var() {
        let summary = McSummary::derive(&hist(), &sims(101, true)).unwrap();
        assert_eq!(summary.simulations, 101);
        let median = &summary.rows[2];
        assert_eq!(median.label, "50th");
        assert_eq!(median.twrr_pct, 50.0);
        assert_eq!(median.net_pnl, Some(300.0));
        assert_eq!(summary.var_95, Some(-150.0));
        assert_eq!(summary.var_99, Some(-190.0));
    }

    #[test]
    fn summary_without_net_pnl_omits_pnl_columns() {
        let summary = McSummary::derive(&hist(), &sims(10, false)).unwrap();
        assert!(summary.rows.iter().all(|r| r.net_pnl.is_none()));
        assert_eq!(summary.var_95, None);
    }
}
