use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{Axis, AxisDim, AxisKey, DataPoint, GridIndex, ScaleKind};
use crate::error::{ChartError, ChartResult};

/// Composite key of a cartesian plane: the indices of its x and y axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CartesianKey {
    pub x_index: usize,
    pub y_index: usize,
}

impl CartesianKey {
    #[must_use]
    pub const fn new(x_index: usize, y_index: usize) -> Self {
        Self { x_index, y_index }
    }

    #[must_use]
    pub const fn x_axis(self) -> AxisKey {
        AxisKey::x(self.x_index)
    }

    #[must_use]
    pub const fn y_axis(self) -> AxisKey {
        AxisKey::y(self.y_index)
    }
}

impl fmt::Display for CartesianKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}y{}", self.x_index, self.y_index)
    }
}

/// A 2D plane formed by one x axis and one y axis of the same grid.
///
/// The axes themselves are owned by the grid; a cartesian only records
/// which pair it joins and which grid it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cartesian {
    key: CartesianKey,
    grid: GridIndex,
}

impl Cartesian {
    #[must_use]
    pub const fn new(key: CartesianKey, grid: GridIndex) -> Self {
        Self { key, grid }
    }

    #[must_use]
    pub const fn key(self) -> CartesianKey {
        self.key
    }

    #[must_use]
    pub const fn grid(self) -> GridIndex {
        self.grid
    }
}

/// Borrowed view of a cartesian together with its two axes.
#[derive(Debug, Clone, Copy)]
pub struct CartesianView<'a> {
    cartesian: Cartesian,
    x_axis: &'a Axis,
    y_axis: &'a Axis,
}

impl<'a> CartesianView<'a> {
    #[must_use]
    pub fn new(cartesian: Cartesian, x_axis: &'a Axis, y_axis: &'a Axis) -> Self {
        Self {
            cartesian,
            x_axis,
            y_axis,
        }
    }

    #[must_use]
    pub fn key(&self) -> CartesianKey {
        self.cartesian.key()
    }

    #[must_use]
    pub fn grid(&self) -> GridIndex {
        self.cartesian.grid()
    }

    #[must_use]
    pub fn x_axis(&self) -> &'a Axis {
        self.x_axis
    }

    #[must_use]
    pub fn y_axis(&self) -> &'a Axis {
        self.y_axis
    }

    #[must_use]
    pub fn axis(&self, dim: AxisDim) -> &'a Axis {
        match dim {
            AxisDim::X => self.x_axis,
            AxisDim::Y => self.y_axis,
        }
    }

    /// The axis series are laid out along: the category axis if there is
    /// one (x first), otherwise x.
    #[must_use]
    pub fn base_axis(&self) -> &'a Axis {
        if self.y_axis.kind() == ScaleKind::Category && self.x_axis.kind() != ScaleKind::Category
        {
            self.y_axis
        } else {
            self.x_axis
        }
    }

    #[must_use]
    pub fn other_axis(&self, axis: &Axis) -> &'a Axis {
        match axis.dim() {
            AxisDim::X => self.y_axis,
            AxisDim::Y => self.x_axis,
        }
    }

    /// Maps a data point to pixel coordinates.
    pub fn data_to_point(&self, point: DataPoint) -> ChartResult<(f64, f64)> {
        if !point.x.is_finite() || !point.y.is_finite() {
            return Err(ChartError::InvalidData(
                "data point must be finite".to_owned(),
            ));
        }
        Ok((
            self.x_axis.data_to_coord(point.x),
            self.y_axis.data_to_coord(point.y),
        ))
    }

    /// Maps pixel coordinates back to a data point.
    pub fn point_to_data(&self, x: f64, y: f64) -> ChartResult<DataPoint> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }
        Ok(DataPoint::new(
            self.x_axis.coord_to_data(x),
            self.y_axis.coord_to_data(y),
        ))
    }

    #[must_use]
    pub fn contain_point(&self, x: f64, y: f64) -> bool {
        self.x_axis.contain(x) && self.y_axis.contain(y)
    }

    #[must_use]
    pub fn contain_data(&self, point: DataPoint) -> bool {
        self.x_axis.scale().contains(point.x) && self.y_axis.scale().contains(point.y)
    }
}
