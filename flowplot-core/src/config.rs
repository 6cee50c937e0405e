//! Plot configuration loaded from an optional TOML file.
//!
//! Every field has a default, so an empty file (or no file) reproduces the
//! built-in figure sizes, histogram resolution, palette, and stacking order.
//!
//! ```toml
//! stack_order = ["lend_eth", "short_eth", "lend_usdc"]
//!
//! [allocations]
//! width = 2100
//! height = 1500
//!
//! [monte_carlo]
//! histogram_bins = 60
//!
//! [venues.pendle_pt]
//! label = "Pendle PT"
//! color = "#3F51B5"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::venue::{Palette, Rgb, VenueStyle, DEFAULT_STACK_ORDER};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Output image size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FigureSize {
    pub width: u32,
    pub height: u32,
}

impl FigureSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// `[allocations]`: 14×10 in at 150 dpi.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationsSection {
    pub width: u32,
    pub height: u32,
}

impl Default for AllocationsSection {
    fn default() -> Self {
        Self {
            width: 2100,
            height: 1500,
        }
    }
}

impl AllocationsSection {
    pub fn size(&self) -> FigureSize {
        FigureSize::new(self.width, self.height)
    }
}

/// `[trajectory]`: 14×6 in at 150 dpi.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrajectorySection {
    pub width: u32,
    pub height: u32,
}

impl Default for TrajectorySection {
    fn default() -> Self {
        Self {
            width: 2100,
            height: 900,
        }
    }
}

impl TrajectorySection {
    pub fn size(&self) -> FigureSize {
        FigureSize::new(self.width, self.height)
    }
}

/// `[pnl]`: 10×5 in at 150 dpi.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PnlSection {
    pub width: u32,
    pub height: u32,
}

impl Default for PnlSection {
    fn default() -> Self {
        Self {
            width: 1500,
            height: 750,
        }
    }
}

impl PnlSection {
    pub fn size(&self) -> FigureSize {
        FigureSize::new(self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteCarloSection {
    pub width: u32,
    pub height: u32,
    pub histogram_bins: usize,
}

impl Default for MonteCarloSection {
    fn default() -> Self {
        Self {
            width: 2400,
            height: 750,
            histogram_bins: 40,
        }
    }
}

impl MonteCarloSection {
    pub fn size(&self) -> FigureSize {
        FigureSize::new(self.width, self.height)
    }
}

/// Palette override for one venue. Omitted fields keep the built-in value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VenueOverride {
    pub label: Option<String>,
    pub color: Option<Rgb>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub allocations: AllocationsSection,
    pub trajectory: TrajectorySection,
    pub pnl: PnlSection,
    pub monte_carlo: MonteCarloSection,
    pub stack_order: Vec<String>,
    pub venues: BTreeMap<String, VenueOverride>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            allocations: AllocationsSection::default(),
            trajectory: TrajectorySection::default(),
            pnl: PnlSection::default(),
            monte_carlo: MonteCarloSection::default(),
            stack_order: DEFAULT_STACK_ORDER.iter().map(|s| s.to_string()).collect(),
            venues: BTreeMap::new(),
        }
    }
}

impl PlotConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: PlotConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            ("allocations", self.allocations.size()),
            ("trajectory", self.trajectory.size()),
            ("pnl", self.pnl.size()),
            ("monte_carlo", self.monte_carlo.size()),
        ];
        for (name, size) in sizes {
            if size.width == 0 || size.height == 0 {
                return Err(ConfigError::Invalid(format!(
                    "[{name}] width and height must be positive"
                )));
            }
        }
        if self.monte_carlo.histogram_bins == 0 {
            return Err(ConfigError::Invalid(
                "[monte_carlo] histogram_bins must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Built-in palette with `[venues.*]` overrides applied.
    pub fn palette(&self) -> Palette {
        let mut palette = Palette::default();
        for (venue_id, over) in &self.venues {
            let base = palette.style_for(venue_id);
            palette.insert(
                venue_id.clone(),
                VenueStyle {
                    label: over.label.clone().unwrap_or(base.label),
                    color: over.color.unwrap_or(base.color),
                },
            );
        }
        palette
    }
}
