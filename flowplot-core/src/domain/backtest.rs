//! Backtest JSON output: historical run plus optional Monte Carlo ensemble.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    /// Epoch seconds.
    pub timestamp: i64,
    pub tvl: f64,
}

/// Top-level document written by the engine's backtest command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestOutput {
    pub historical: HistoricalResult,
    #[serde(default)]
    pub monte_carlo: Option<MonteCarloOutput>,
}

impl BacktestOutput {
    /// Simulations, or `None` when Monte Carlo is absent or produced nothing.
    pub fn simulations(&self) -> Option<&[SimulationResult]> {
        self.monte_carlo
            .as_ref()
            .map(|mc| mc.simulations.as_slice())
            .filter(|sims| !sims.is_empty())
    }
}

/// Historical backtest with PnL attribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalResult {
    pub label: String,
    pub trajectory: Vec<TrajectoryPoint>,
    pub twrr_pct: f64,
    pub annualized_pct: f64,
    pub max_drawdown_pct: f64,
    pub sharpe: f64,
    pub funding_pnl: f64,
    pub lending_interest: f64,
    pub rewards_pnl: f64,
    pub premium_pnl: f64,
    pub lp_fees: f64,
    /// Positive number; a cost, not a signed contribution.
    pub swap_costs: f64,
    pub net_pnl: f64,
    #[serde(default)]
    pub rebalances: Option<u32>,
    #[serde(default)]
    pub liquidations: Option<u32>,
    #[serde(default)]
    pub ticks: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloOutput {
    pub n_simulations: usize,
    pub simulations: Vec<SimulationResult>,
}

/// One resampled run. Trajectories align with the historical one by tick index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    #[serde(default)]
    pub trajectory: Vec<TrajectoryPoint>,
    pub twrr_pct: f64,
    pub max_drawdown_pct: f64,
    pub sharpe: f64,
    #[serde(default)]
    pub net_pnl: Option<f64>,
}
