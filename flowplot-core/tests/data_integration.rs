//! Loaders against files on disk, end to end through the derivers.

use std::fs;
use std::path::Path;

use flowplot_core::data::{load_backtest_output, load_price_series, load_ticks, DataError};
use flowplot_core::derive::allocation::AllocationInputs;
use flowplot_core::derive::{AllocationFigure, McFigure, PnlFigure, TrajectoryFigure};
use flowplot_core::domain::PriceFeed;
use flowplot_core::PlotConfig;

const TICKS: &str = "\
timestamp,tvl,lend_usdc,short_eth,buy_eth
1700000000,10000.0,4000.0,1000.0,5000.0
1700003600,10100.0,4000.0,1050.0,5050.0
1700007200,10250.0,4100.0,1050.0,5100.0
";

const SPOT: &str = "\
timestamp,price
1699990000,1990.0
1700000000,2000.0
1700003600,2010.0
1700007200,2025.0
1700010800,2030.0
";

const PERP: &str = "\
timestamp,mark_price,funding_rate
1700000000,2001.0,0.0001
1700007200,2026.5,0.0001
";

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn backtest_json(with_mc: bool) -> String {
    let trajectory = r#"[{"timestamp":1700000000,"tvl":10000.0},{"timestamp":1700003600,"tvl":10100.0},{"timestamp":1700007200,"tvl":10250.0}]"#;
    let mc = if with_mc {
        let sims: Vec<String> = (0..20)
            .map(|i| {
                let d = i as f64 * 10.0;
                format!(
                    r#"{{"trajectory":[{{"timestamp":0,"tvl":10000.0}},{{"timestamp":1,"tvl":{}}},{{"timestamp":2,"tvl":{}}}],"twrr_pct":{},"max_drawdown_pct":{},"sharpe":{},"net_pnl":{}}}"#,
                    10_000.0 + d,
                    10_050.0 + 2.0 * d,
                    i as f64 * 0.5,
                    1.0 + i as f64 * 0.1,
                    0.8 + i as f64 * 0.05,
                    -100.0 + d,
                )
            })
            .collect();
        format!(r#"{{"n_simulations":20,"simulations":[{}]}}"#, sims.join(","))
    } else {
        "null".to_string()
    };
    format!(
        r#"{{"historical":{{"label":"v2 delta neutral","trajectory":{trajectory},"twrr_pct":2.5,"annualized_pct":310.2,"max_drawdown_pct":0.4,"sharpe":3.21,"funding_pnl":180.0,"lending_interest":90.0,"rewards_pnl":0.0,"premium_pnl":0.0,"lp_fees":0.0,"swap_costs":20.0,"net_pnl":250.0}},"monte_carlo":{mc}}}"#
    )
}

#[test]
fn allocation_figure_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let ticks = load_ticks(&write(dir.path(), "ticks.csv", TICKS)).unwrap();
    let span = ticks.span().unwrap();
    let spot =
        load_price_series(&write(dir.path(), "spot.csv", SPOT), PriceFeed::Spot, span).unwrap();
    let perp =
        load_price_series(&write(dir.path(), "perp.csv", PERP), PriceFeed::Perp, span).unwrap();

    assert_eq!(spot.points.len(), 3);
    assert_eq!(perp.points.len(), 2);

    let config = PlotConfig::default();
    let inputs = AllocationInputs {
        ticks: &ticks,
        spot: Some(&spot),
        perp: Some(&perp),
        title: None,
    };
    let fig = AllocationFigure::derive(&inputs, &config.palette(), &config.stack_order).unwrap();

    let ids: Vec<&str> = fig.value_layers.iter().map(|l| l.venue_id.as_str()).collect();
    assert_eq!(ids, vec!["buy_eth", "short_eth", "lend_usdc"]);
    assert_eq!(fig.stack_top(), vec![10_000.0, 10_100.0, 10_250.0]);
    assert_eq!(fig.title, "v1: Spot ETH + Short Perp + USDC Lending  (group-aware rebalance)");
    assert_eq!(fig.annotation.text, "$10,250 (+2.5%)");
}

#[test]
fn header_only_ticks_load_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "ticks.csv", "timestamp,tvl,buy_eth\n");
    let ticks = load_ticks(&path).unwrap();
    assert!(ticks.is_empty());
    assert_eq!(ticks.venue_ids, vec!["buy_eth".to_string()]);
}

#[test]
fn missing_tick_file_is_file_access() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_ticks(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, DataError::FileAccess { .. }));
}

#[test]
fn backtest_figures_with_monte_carlo() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "backtest.json", &backtest_json(true));
    let output = load_backtest_output(&path).unwrap();

    let traj = TrajectoryFigure::derive(&output).unwrap();
    let bands = traj.bands.as_ref().unwrap();
    assert_eq!(bands.simulations, 20);
    assert_eq!(bands.p5[0], 10_000.0);
    assert_eq!(traj.baseline, 10_000.0);

    let pnl = PnlFigure::derive(&output.historical);
    assert_eq!(pnl.values(), vec![180.0, 90.0, 0.0, 0.0, 0.0, -20.0]);

    let mc = McFigure::derive(&output, 40).unwrap();
    assert_eq!(mc.title, "v2 delta neutral - Monte Carlo (20 sims)");
    assert_eq!(mc.panels[0].reference, 2.5);
}

#[test]
fn backtest_figures_without_monte_carlo() {
    let output = flowplot_core::data::parse_backtest_output(&backtest_json(false)).unwrap();
    assert!(output.monte_carlo.is_none());
    assert!(TrajectoryFigure::derive(&output).unwrap().bands.is_none());
    assert!(McFigure::derive(&output, 40).is_none());
}

#[test]
fn derived_figures_are_deterministic() {
    let a = flowplot_core::data::parse_backtest_output(&backtest_json(true)).unwrap();
    let b = flowplot_core::data::parse_backtest_output(&backtest_json(true)).unwrap();

    assert_eq!(
        TrajectoryFigure::derive(&a).unwrap().fingerprint(),
        TrajectoryFigure::derive(&b).unwrap().fingerprint()
    );
    assert_eq!(
        PnlFigure::derive(&a.historical).fingerprint(),
        PnlFigure::derive(&b.historical).fingerprint()
    );
    assert_eq!(
        McFigure::derive(&a, 40).unwrap().fingerprint(),
        McFigure::derive(&b, 40).unwrap().fingerprint()
    );
}
