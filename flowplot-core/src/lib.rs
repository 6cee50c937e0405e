//! FlowPlot Core: loaders, venue palette, and derived chart series for backtest artifacts.
//!
//! This crate holds everything that happens before pixels:
//! - Domain types for engine tick dumps, reference price feeds, and backtest JSON output
//! - Tabular (CSV) and structured (JSON) loaders with typed errors
//! - Derivers that turn loaded records into figure models (stacked allocations,
//!   percentile bands, PnL bars, Monte Carlo histograms)
//! - Venue palette and TOML plot configuration
//! - BLAKE3 fingerprints over derived series for determinism checks

pub mod config;
pub mod data;
pub mod derive;
pub mod domain;
pub mod fingerprint;
pub mod venue;

pub use config::{ConfigError, FigureSize, PlotConfig};
pub use data::DataError;
pub use fingerprint::SeriesDigest;
pub use venue::{Palette, Rgb, VenueStyle};
