//! Console summary tables for a backtest result.

use std::fmt::Write;

use flowplot_core::derive::McSummary;
use flowplot_core::domain::{BacktestOutput, HistoricalResult};

const HISTORICAL_RULE: usize = 130;
const MC_RULE: usize = 68;

fn count_cell<T: std::fmt::Display>(value: Option<T>, width: usize) -> String {
    match value {
        Some(v) => format!("{v:>width$}"),
        None => format!("{:>width$}", "-"),
    }
}

/// Historical results row with its header.
pub fn historical_table(hist: &HistoricalResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "═".repeat(HISTORICAL_RULE));
    let _ = writeln!(out, "  Backtest Results");
    let _ = writeln!(out, "{}", "═".repeat(HISTORICAL_RULE));
    let _ = writeln!(
        out,
        "  {:<30} {:>7} {:>7} {:>7} {:>7} {:>6} {:>5} {:>10} {:>10} {:>8} {:>8} {:>8}",
        "Strategy", "TWRR%", "Ann.%", "MxDD%", "Sharpe", "Rebal", "Liqs", "Funding", "Premium",
        "LP Fees", "Lending", "NetPnL",
    );
    let _ = writeln!(out, "  {}", "-".repeat(HISTORICAL_RULE - 6));
    let _ = writeln!(
        out,
        "  {:<30} {:>+7.2} {:>+7.2} {:>7.2} {:>7.3} {} {} {:>+10.2} {:>+10.2} {:>+8.2} {:>+8.2} {:>+8.2}",
        hist.label,
        hist.twrr_pct,
        hist.annualized_pct,
        hist.max_drawdown_pct,
        hist.sharpe,
        count_cell(hist.rebalances, 6),
        count_cell(hist.liquidations, 5),
        hist.funding_pnl,
        hist.premium_pnl,
        hist.lp_fees,
        hist.lending_interest,
        hist.net_pnl,
    );
    let _ = writeln!(out, "{}", "═".repeat(HISTORICAL_RULE));
    let ticks = hist.ticks.unwrap_or(hist.trajectory.len());
    let _ = writeln!(out, "  {} ticks, swap costs: {:.2}", ticks, hist.swap_costs);
    out
}

/// Percentile table over the simulations; net PnL columns only when every
/// simulation reports it.
pub fn monte_carlo_table(summary: &McSummary) -> String {
    let with_pnl = summary.var_95.is_some();
    let mut out = String::new();
    let _ = writeln!(out, "{}", "═".repeat(MC_RULE));
    let _ = writeln!(out, "  Monte Carlo Results ({} simulations)", summary.simulations);
    let _ = writeln!(out, "{}", "═".repeat(MC_RULE));
    let _ = writeln!(
        out,
        "  Historical:  TWRR={:+.2}%  MxDD={:.2}%  Sharpe={:.3}",
        summary.historical_twrr_pct, summary.historical_max_drawdown_pct, summary.historical_sharpe
    );
    let _ = writeln!(out);

    let mut header = format!(
        "  {:>12}  {:>8}  {:>8}  {:>8}",
        "Percentiles", "TWRR%", "MxDD%", "Sharpe"
    );
    if with_pnl {
        let _ = write!(header, "  {:>10}", "NetPnL");
    }
    let _ = writeln!(out, "{header}");
    let _ = writeln!(out, "  {}", "─".repeat(if with_pnl { 52 } else { 40 }));

    for row in &summary.rows {
        let _ = write!(
            out,
            "  {:>12}  {:>+8.2}  {:>8.2}  {:>8.3}",
            row.label, row.twrr_pct, row.max_drawdown_pct, row.sharpe
        );
        if let Some(pnl) = row.net_pnl {
            let _ = write!(out, "  {pnl:>+10.0}");
        }
        let _ = writeln!(out);
    }

    if let (Some(var95), Some(var99)) = (summary.var_95, summary.var_99) {
        let _ = writeln!(out);
        let _ = writeln!(out, "  VaR(95%): ${var95:+.0}   VaR(99%): ${var99:+.0}");
    }
    let _ = writeln!(out, "{}", "═".repeat(MC_RULE));
    out
}

/// Full console summary: historical row, then the Monte Carlo table when present.
pub fn render_summary(output: &BacktestOutput) -> String {
    let mut out = historical_table(&output.historical);
    if let Some(summary) = output
        .simulations()
        .and_then(|sims| McSummary::derive(&output.historical, sims))
    {
        out.push('\n');
        out.push_str(&monte_carlo_table(&summary));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowplot_core::data::parse_backtest_output;

    const HISTORICAL: &str = r#""historical":{"label":"v2 delta neutral","trajectory":[{"timestamp":1,"tvl":100.0}],
        "twrr_pct":2.5,"annualized_pct":31.0,"max_drawdown_pct":0.4,"sharpe":3.21,"funding_pnl":180.0,
        "lending_interest":90.0,"rewards_pnl":0.0,"premium_pnl":0.0,"lp_fees":0.0,"swap_costs":20.0,
        "net_pnl":250.0,"rebalances":14,"ticks":8760}"#;

    #[test]
    fn historical_row_shows_known_and_unknown_counts() {
        let output = parse_backtest_output(&format!("{{{HISTORICAL}}}")).unwrap();
        let text = render_summary(&output);
        assert!(text.contains("v2 delta neutral"));
        assert!(text.contains("+2.50"));
        assert!(text.contains("    14     -"));
        assert!(text.contains("8760 ticks, swap costs: 20.00"));
        assert!(!text.contains("Monte Carlo"));
    }

    #[test]
    fn monte_carlo_table_with_var() {
        let sims: Vec<String> = (0..=100)
            .map(|i| {
                format!(
                    r#"{{"twrr_pct":{i},"max_drawdown_pct":1.0,"sharpe":1.0,"net_pnl":{}}}"#,
                    i * 10 - 200
                )
            })
            .collect();
        let json = format!(
            r#"{{{HISTORICAL},"monte_carlo":{{"n_simulations":101,"simulations":[{}]}}}}"#,
            sims.join(",")
        );
        let output = parse_backtest_output(&json).unwrap();
        let text = render_summary(&output);
        assert!(text.contains("Monte Carlo Results (101 simulations)"));
        assert!(text.contains("NetPnL"));
        assert!(text.contains("VaR(95%): $-150   VaR(99%): $-190"));
    }

    #[test]
    fn monte_carlo_table_without_net_pnl() {
        let json = format!(
            r#"{{{HISTORICAL},"monte_carlo":{{"n_simulations":2,"simulations":[
                {{"twrr_pct":1.0,"max_drawdown_pct":1.0,"sharpe":1.0}},
                {{"twrr_pct":2.0,"max_drawdown_pct":2.0,"sharpe":2.0}}]}}}}"#
        );
        let output = parse_backtest_output(&json).unwrap();
        let sims = output.simulations().unwrap();
        let summary = McSummary::derive(&output.historical, sims).unwrap();
        let table = monte_carlo_table(&summary);
        assert!(table.contains("Monte Carlo Results (2 simulations)"));
        let header = table.lines().find(|l| l.contains("Percentiles")).unwrap();
        assert!(!header.contains("NetPnL"));
        assert!(!table.contains("NetPnL"));
        assert!(!table.contains("VaR"));
        assert!(render_summary(&output).contains("Monte Carlo Results (2 simulations)"));
    }
}
