use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::core::{Axis, AxisDim, AxisKey, AxisPosition, Cartesian, CartesianKey, Scale, ScaleKind};

use super::{AxisConfig, ChartModel, Grid};

/// Axis indices allocated to a grid for one dimension, in declaration order.
type AxisIndices = SmallVec<[usize; 2]>;

/// Which physical sides already carry an axis.
#[derive(Debug, Default)]
struct SideOccupancy {
    top: bool,
    bottom: bool,
    left: bool,
    right: bool,
}

impl SideOccupancy {
    fn slot(&mut self, side: AxisPosition) -> &mut bool {
        match side {
            AxisPosition::Top => &mut self.top,
            AxisPosition::Bottom => &mut self.bottom,
            AxisPosition::Left => &mut self.left,
            AxisPosition::Right => &mut self.right,
        }
    }

    /// Resolves the requested side, flipping to the opposite side when it is taken.
    ///
    /// A third axis contesting the same side lands on the flipped side again:
    /// the last one wins.
    fn claim(&mut self, dim: AxisDim, requested: Option<AxisPosition>) -> AxisPosition {
        let mut side = AxisPosition::resolve_for(dim, requested);
        if *self.slot(side) {
            side = side.opposite();
        }
        *self.slot(side) = true;
        side
    }
}

/// Builds the scale an axis configuration declares.
fn create_scale(config: &AxisConfig) -> Scale {
    let mut scale = match config.kind {
        ScaleKind::Category => Scale::category(config.data.clone()),
        kind => Scale::new(kind),
    };
    if let Some(interval) = config.interval {
        scale.set_interval(interval);
    }
    scale
}

impl Grid {
    pub(super) fn init_cartesian(&mut self, model: &ChartModel) {
        let mut sides = SideOccupancy::default();
        let x_indices = self.allocate_axes(model, AxisDim::X, &mut sides);
        let y_indices = self.allocate_axes(model, AxisDim::Y, &mut sides);

        if x_indices.is_empty() || y_indices.is_empty() {
            warn!(
                grid = %self.name(),
                x_axes = x_indices.len(),
                y_axes = y_indices.len(),
                "grid requires at least one x axis and one y axis; rolling back"
            );
            self.mark_invalid(x_indices.len(), y_indices.len());
            return;
        }

        let grid = self.index();
        for &x_index in &x_indices {
            for &y_index in &y_indices {
                let key = CartesianKey::new(x_index, y_index);
                self.cartesians.insert(key, Cartesian::new(key, grid));
            }
        }

        self.update_extents_from_series(model);
        self.fix_axis_on_zero(model, &x_indices, &y_indices);

        debug!(
            grid = %self.name(),
            axes = self.axes.len(),
            cartesians = self.cartesians.len(),
            "built grid"
        );
    }

    /// Allocates every axis of `dim` declared in this grid.
    ///
    /// Indices are positions in the unfiltered component list, so axes keep
    /// their global numbering when other grids own some of them.
    fn allocate_axes(
        &mut self,
        model: &ChartModel,
        dim: AxisDim,
        sides: &mut SideOccupancy,
    ) -> AxisIndices {
        let mut allocated = AxisIndices::new();
        for (index, config) in model.axes(dim).iter().enumerate() {
            if !model.axis_belongs_to_grid(dim, index, self.index()) {
                continue;
            }

            let position = sides.claim(dim, config.position);
            let key = AxisKey::new(dim, index);
            let axis = Axis::new(key, create_scale(config), position)
                .with_on_band(config.on_band())
                .with_inverse(config.inverse)
                .with_on_zero(config.axis_line.on_zero)
                .with_label(config.axis_label);
            trace!(grid = %self.name(), axis = %key, position = ?position, "allocated axis");

            self.axes.insert(key, axis);
            allocated.push(index);
        }
        allocated
    }
}
