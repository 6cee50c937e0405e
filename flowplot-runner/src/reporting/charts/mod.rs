//! plotters-backed PNG rendering.

mod allocation;
mod monte_carlo;
mod pnl;
pub(crate) mod style;
mod trajectory;

use anyhow::{Context, Result};
use std::path::Path;

use flowplot_core::derive::{AllocationFigure, McFigure, PnlFigure, TrajectoryFigure};
use flowplot_core::PlotConfig;

use super::ChartRenderer;

/// Renders figure models to PNG via plotters' bitmap backend, sized from
/// [`PlotConfig`].
#[derive(Debug, Clone, Default)]
pub struct PlottersRenderer {
    config: PlotConfig,
}

impl PlottersRenderer {
    pub fn new(config: PlotConfig) -> Self {
        Self { config }
    }
}

impl ChartRenderer for PlottersRenderer {
    fn render_allocations(&self, figure: &AllocationFigure, path: &Path) -> Result<()> {
        allocation::draw(figure, self.config.allocations.size(), path)
            .with_context(|| format!("Failed to render allocation chart {}", path.display()))
    }

    fn render_trajectory(&self, figure: &TrajectoryFigure, path: &Path) -> Result<()> {
        trajectory::draw(figure, self.config.trajectory.size(), path)
            .with_context(|| format!("Failed to render trajectory chart {}", path.display()))
    }

    fn render_pnl(&self, figure: &PnlFigure, path: &Path) -> Result<()> {
        pnl::draw(figure, self.config.pnl.size(), path)
            .with_context(|| format!("Failed to render PnL chart {}", path.display()))
    }

    fn render_monte_carlo(&self, figure: &McFigure, path: &Path) -> Result<()> {
        monte_carlo::draw(figure, self.config.monte_carlo.size(), path)
            .with_context(|| format!("Failed to render Monte Carlo chart {}", path.display()))
    }
}
