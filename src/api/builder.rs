use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{AxisDim, CartesianKey, CartesianView, GridIndex, TextMeasurer, Viewport};
use crate::error::{ChartError, ChartResult};

use super::{ChartModel, CoordinateSystemKind, Grid, LayoutContext};

/// The plane a series is plotted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesBinding {
    pub grid: GridIndex,
    pub cartesian: CartesianKey,
}

/// Result of one layout pass: every declared grid plus the plane each
/// series resolved to.
///
/// `series` is parallel to the model's series list; `None` marks a series
/// that cannot be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    grids: Vec<Grid>,
    series: Vec<Option<SeriesBinding>>,
}

impl ChartLayout {
    /// Grids in declaration order, invalid ones included.
    #[must_use]
    pub fn grids(&self) -> &[Grid] {
        &self.grids
    }

    #[must_use]
    pub fn grid(&self, index: GridIndex) -> Option<&Grid> {
        self.grids.get(index.raw())
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn series_binding(&self, series_index: usize) -> Option<SeriesBinding> {
        self.series.get(series_index).copied().flatten()
    }

    /// The plane series `series_index` is plotted in, with its axes.
    #[must_use]
    pub fn series_cartesian(&self, series_index: usize) -> Option<CartesianView<'_>> {
        let binding = self.series_binding(series_index)?;
        self.grid(binding.grid)?
            .cartesian(binding.cartesian.x_index, binding.cartesian.y_index)
    }

    /// Lays every grid out again against a new viewport. Scales are kept.
    pub fn resize(
        &mut self,
        model: &ChartModel,
        viewport: Viewport,
        measurer: &dyn TextMeasurer,
    ) -> ChartResult<()> {
        ensure_viewport(viewport)?;
        for grid in &mut self.grids {
            if let Some(config) = model.grid_config(grid.index()) {
                grid.resize(config, viewport, measurer)?;
            }
        }
        Ok(())
    }
}

/// Builds and lays out every grid in `model`, then binds each cartesian
/// series to the plane its axis indices select.
pub fn create(
    model: &ChartModel,
    viewport: Viewport,
    measurer: &dyn TextMeasurer,
) -> ChartResult<ChartLayout> {
    create_grids(model, &LayoutContext::new(viewport, measurer))
}

/// Cartesian coordinate-system factory.
pub fn create_grids(model: &ChartModel, context: &LayoutContext<'_>) -> ChartResult<ChartLayout> {
    ensure_viewport(context.viewport)?;

    let mut grids = Vec::with_capacity(model.grid.len());
    for (index, config) in model.grid.iter().enumerate() {
        let mut grid = Grid::new(GridIndex::new(index), model);
        grid.resize(config, context.viewport, context.measurer)?;
        grids.push(grid);
    }

    let series = model
        .series
        .iter()
        .enumerate()
        .map(|(series_index, series)| {
            if series.coordinate_system != CoordinateSystemKind::Cartesian2d {
                return None;
            }
            let binding = bind_series(model, &grids, series.x_axis_index, series.y_axis_index);
            if binding.is_none() {
                warn!(
                    series = series_index,
                    x_axis = series.x_axis_index,
                    y_axis = series.y_axis_index,
                    "series does not resolve to a cartesian; leaving it unbound"
                );
            }
            binding
        })
        .collect::<Vec<_>>();

    debug!(
        grids = grids.len(),
        valid_grids = grids.iter().filter(|grid| grid.is_valid()).count(),
        bound_series = series.iter().flatten().count(),
        "created cartesian coordinate systems"
    );
    Ok(ChartLayout { grids, series })
}

/// Locates the owning grid through the x axis configuration, then the plane.
fn bind_series(
    model: &ChartModel,
    grids: &[Grid],
    x_index: usize,
    y_index: usize,
) -> Option<SeriesBinding> {
    let x_config = model.axis_config(AxisDim::X, x_index)?;
    let grid_index = model.resolve_grid(x_config.grid_index)?;
    let grid = grids.get(grid_index.raw())?;
    let cartesian = grid.cartesian(x_index, y_index)?;
    Some(SeriesBinding {
        grid: cartesian.grid(),
        cartesian: cartesian.key(),
    })
}

fn ensure_viewport(viewport: Viewport) -> ChartResult<()> {
    if viewport.is_valid() {
        Ok(())
    } else {
        Err(ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        })
    }
}
