//! FlowPlot CLI: render charts from backtest engine artifacts.
//!
//! Commands:
//! - `allocations`: venue allocation chart from an engine tick CSV
//! - `backtest`: trajectory, PnL and Monte Carlo charts from a backtest JSON,
//!   followed by a console summary

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use flowplot_core::PlotConfig;
use flowplot_runner::reporting::summary::render_summary;
use flowplot_runner::{
    run_allocations, run_backtest_report, AllocationOptions, BacktestReportOptions,
    PlottersRenderer, StdoutProgress, DEFAULT_ALLOCATION_OUTPUT,
};

#[derive(Parser)]
#[command(
    name = "flowplot",
    about = "FlowPlot CLI: charts for capital-allocation backtests"
)]
struct Cli {
    /// Debug-level diagnostics on stderr (RUST_LOG overrides).
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plot venue allocations from an engine tick CSV.
    Allocations {
        /// Path to engine tick CSV output.
        tick_csv: PathBuf,

        /// Path to spot price CSV.
        #[arg(long)]
        spot: Option<PathBuf>,

        /// Path to perp price CSV.
        #[arg(long)]
        perp: Option<PathBuf>,

        /// Output image path.
        #[arg(short, long, default_value = DEFAULT_ALLOCATION_OUTPUT)]
        output: PathBuf,

        /// Override chart title.
        #[arg(long)]
        title: Option<String>,

        /// Plot configuration TOML.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Plot trajectory, PnL breakdown and Monte Carlo distributions from a backtest JSON.
    Backtest {
        /// Path to the backtest output JSON.
        backtest_output_path: PathBuf,

        /// Output directory. Defaults to the input file's directory.
        output_dir: Option<PathBuf>,

        /// Plot configuration TOML.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<PlotConfig> {
    PlotConfig::load(path).with_context(|| match path {
        Some(p) => format!("Failed to load plot config {}", p.display()),
        None => "Failed to build default plot config".to_string(),
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Allocations {
            tick_csv,
            spot,
            perp,
            output,
            title,
            config,
        } => run_allocations_cmd(
            AllocationOptions {
                tick_csv,
                spot_csv: spot,
                perp_csv: perp,
                output,
                title,
            },
            config,
        ),
        Commands::Backtest {
            backtest_output_path,
            output_dir,
            config,
        } => run_backtest_cmd(
            BacktestReportOptions {
                input: backtest_output_path,
                output_dir,
            },
            config,
        ),
    }
}

fn run_allocations_cmd(opts: AllocationOptions, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path.as_deref())?;
    let renderer = PlottersRenderer::new(config.clone());

    match run_allocations(&opts, &config, &renderer)? {
        Some(path) => println!("Saved: {}", path.display()),
        None => println!("No tick data found"),
    }
    Ok(())
}

fn run_backtest_cmd(opts: BacktestReportOptions, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path.as_deref())?;
    let renderer = PlottersRenderer::new(config.clone());

    let report = run_backtest_report(&opts, &config, &renderer, &StdoutProgress)?;
    println!("  Done.");
    println!();
    print!("{}", render_summary(&report.output));
    Ok(())
}
