use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    Axis, AxisDim, AxisKey, AxisPosition, Cartesian, CartesianKey, CartesianView, GridIndex,
    LayoutRect, TextMeasurer, Viewport, resolve_box,
};
use crate::error::ChartResult;

use super::{ChartModel, GridConfig};

/// Outcome of axis discovery for a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridValidity {
    Valid,
    /// The grid owns no x axis or no y axis; it holds no axes and no planes.
    MissingAxes { x_axes: usize, y_axes: usize },
}

/// A rectangular region owning a set of axes and the cartesian planes they form.
///
/// Both maps keep insertion order, so they double as the ordered axis and
/// plane lists.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    index: GridIndex,
    name: String,
    rect: LayoutRect,
    validity: GridValidity,
    pub(super) axes: IndexMap<AxisKey, Axis>,
    pub(super) cartesians: IndexMap<CartesianKey, Cartesian>,
}

impl Grid {
    /// Builds the grid declared at `index`: allocates its axes, pairs them
    /// into planes, unions series extents into the scales and applies the
    /// cross-zero correction. Pixel extents are assigned by [`Grid::resize`].
    #[must_use]
    pub fn new(index: GridIndex, model: &ChartModel) -> Self {
        let mut grid = Self {
            index,
            name: format!("grid_{}", index.raw()),
            rect: LayoutRect::default(),
            validity: GridValidity::Valid,
            axes: IndexMap::new(),
            cartesians: IndexMap::new(),
        };
        grid.init_cartesian(model);
        grid
    }

    #[must_use]
    pub fn index(&self) -> GridIndex {
        self.index
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Plotting rectangle from the last resize.
    #[must_use]
    pub fn rect(&self) -> LayoutRect {
        self.rect
    }

    #[must_use]
    pub fn validity(&self) -> GridValidity {
        self.validity
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validity == GridValidity::Valid
    }

    pub(super) fn mark_invalid(&mut self, x_axes: usize, y_axes: usize) {
        self.validity = GridValidity::MissingAxes { x_axes, y_axes };
        self.axes.clear();
        self.cartesians.clear();
    }

    /// Axis `dim[index]`, or the first axis of `dim` when `index` is `None`.
    #[must_use]
    pub fn axis(&self, dim: AxisDim, index: Option<usize>) -> Option<&Axis> {
        match index {
            Some(index) => self.axes.get(&AxisKey::new(dim, index)),
            None => self.axes.values().find(|axis| axis.dim() == dim),
        }
    }

    /// All axes in allocation order.
    pub fn axes(&self) -> impl Iterator<Item = &Axis> {
        self.axes.values()
    }

    #[must_use]
    pub fn axis_count(&self) -> usize {
        self.axes.len()
    }

    /// The plane joining x axis `x_index` and y axis `y_index`.
    #[must_use]
    pub fn cartesian(&self, x_index: usize, y_index: usize) -> Option<CartesianView<'_>> {
        let cartesian = self.cartesians.get(&CartesianKey::new(x_index, y_index))?;
        self.view(*cartesian)
    }

    /// All planes in creation order.
    pub fn cartesians(&self) -> impl Iterator<Item = CartesianView<'_>> {
        self.cartesians.values().filter_map(|cartesian| self.view(*cartesian))
    }

    #[must_use]
    pub fn cartesian_count(&self) -> usize {
        self.cartesians.len()
    }

    fn view(&self, cartesian: Cartesian) -> Option<CartesianView<'_>> {
        let key = cartesian.key();
        let x_axis = self.axes.get(&key.x_axis())?;
        let y_axis = self.axes.get(&key.y_axis())?;
        Some(CartesianView::new(cartesian, x_axis, y_axis))
    }

    /// Lays the grid out against the viewport.
    ///
    /// With `contain_label` set, each axis' tick-label box plus its margin is
    /// carved out of the declared rectangle on the axis' side. Label
    /// suppression is decided against the declared rectangle, so the result
    /// only depends on the configuration and the viewport. Every axis then
    /// spans the resulting rectangle; vertical axes run bottom to top.
    pub fn resize(
        &mut self,
        config: &GridConfig,
        viewport: Viewport,
        measurer: &dyn TextMeasurer,
    ) -> ChartResult<()> {
        let declared = resolve_box(config.layout_params(), viewport)?;
        let mut rect = declared;

        if config.contain_label {
            for axis in self.axes.values() {
                let extent = pixel_extent(axis, declared);
                let Some(label_rect) = axis.label_union_rect(extent, measurer) else {
                    continue;
                };
                let margin = axis.label_options().margin;
                match axis.position() {
                    AxisPosition::Left => {
                        let reserved = label_rect.width + margin;
                        rect.x += reserved;
                        rect.width -= reserved;
                    }
                    AxisPosition::Right => rect.width -= label_rect.width + margin,
                    AxisPosition::Top => {
                        let reserved = label_rect.height + margin;
                        rect.y += reserved;
                        rect.height -= reserved;
                    }
                    AxisPosition::Bottom => rect.height -= label_rect.height + margin,
                }
            }
        }

        self.rect = rect;
        for axis in self.axes.values_mut() {
            let (start, end) = pixel_extent(axis, rect);
            axis.set_extent(start, end);
        }

        debug!(
            grid = %self.name,
            x = rect.x,
            y = rect.y,
            width = rect.width,
            height = rect.height,
            "resized grid"
        );
        Ok(())
    }
}

/// Pixel extent of `axis` when it spans `rect`, honoring `inverse`.
fn pixel_extent(axis: &Axis, rect: LayoutRect) -> (f64, f64) {
    let (start, end) = if axis.is_horizontal() {
        (rect.x, rect.right())
    } else {
        (rect.bottom(), rect.y)
    };
    if axis.inverse() { (end, start) } else { (start, end) }
}
