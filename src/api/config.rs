use serde::{Deserialize, Deserializer, Serialize};

use crate::core::{
    AxisDim, AxisLabelOptions, AxisPosition, BoxLayoutParams, DEFAULT_SPLIT_NUMBER, GridIndex,
    LayoutValue, ListData, ScaleKind,
};
use crate::error::{ChartError, ChartResult};

use super::CoordinateSystemKind;

/// Declarative chart options the grid builder reads from.
///
/// Components are identified by their position in these lists: an axis
/// refers to its grid by `grid_index`, a series to its axes by
/// `x_axis_index`/`y_axis_index`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartModel {
    pub grid: Vec<GridConfig>,
    pub x_axis: Vec<AxisConfig>,
    pub y_axis: Vec<AxisConfig>,
    pub series: Vec<SeriesConfig>,
}

impl ChartModel {
    /// Parses options from JSON. Axes declared without any grid get a default one.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let mut model: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse chart options: {e}")))?;
        if model.grid.is_empty() && (!model.x_axis.is_empty() || !model.y_axis.is_empty()) {
            model.grid.push(GridConfig::default());
        }
        Ok(model)
    }

    /// Resolves a grid reference to a declared grid component.
    #[must_use]
    pub fn resolve_grid(&self, grid_index: usize) -> Option<GridIndex> {
        (grid_index < self.grid.len()).then_some(GridIndex::new(grid_index))
    }

    #[must_use]
    pub fn grid_config(&self, index: GridIndex) -> Option<&GridConfig> {
        self.grid.get(index.raw())
    }

    #[must_use]
    pub fn axes(&self, dim: AxisDim) -> &[AxisConfig] {
        match dim {
            AxisDim::X => &self.x_axis,
            AxisDim::Y => &self.y_axis,
        }
    }

    #[must_use]
    pub fn axis_config(&self, dim: AxisDim, index: usize) -> Option<&AxisConfig> {
        self.axes(dim).get(index)
    }

    /// Whether the axis component `dim[index]` is declared as a member of `grid`.
    #[must_use]
    pub fn axis_belongs_to_grid(&self, dim: AxisDim, index: usize, grid: GridIndex) -> bool {
        self.axis_config(dim, index)
            .and_then(|axis| self.resolve_grid(axis.grid_index))
            == Some(grid)
    }
}

/// Placement of one grid inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub left: LayoutValue,
    pub top: LayoutValue,
    pub right: LayoutValue,
    pub bottom: LayoutValue,
    pub width: Option<LayoutValue>,
    pub height: Option<LayoutValue>,
    /// Shrink the plotting area so axis tick labels fit inside the declared box.
    pub contain_label: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            left: LayoutValue::Pixels(80.0),
            top: LayoutValue::Pixels(60.0),
            right: LayoutValue::Pixels(80.0),
            bottom: LayoutValue::Pixels(60.0),
            width: None,
            height: None,
            contain_label: false,
        }
    }
}

impl GridConfig {
    #[must_use]
    pub fn layout_params(&self) -> BoxLayoutParams {
        BoxLayoutParams {
            left: Some(self.left),
            top: Some(self.top),
            right: Some(self.right),
            bottom: Some(self.bottom),
            width: self.width,
            height: self.height,
        }
    }
}

/// Gap between the data extent and the axis ends.
///
/// Category axes read it as a flag (ticks on band centres); numeric axes
/// read it as a pair of fractions of the data span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoundaryGap {
    Flag(bool),
    Range([GapValue; 2]),
}

/// One end of a numeric boundary gap: a bare fraction of the data span
/// (`0.2`) or a percentage of it (`"20%"`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "LayoutValue", into = "LayoutValue")]
pub enum GapValue {
    Fraction(f64),
    Percent(f64),
}

impl GapValue {
    /// The gap as a fraction of the data span.
    #[must_use]
    pub fn fraction(self) -> f64 {
        match self {
            Self::Fraction(fraction) => fraction,
            Self::Percent(percent) => percent / 100.0,
        }
    }
}

impl From<LayoutValue> for GapValue {
    fn from(value: LayoutValue) -> Self {
        match value {
            LayoutValue::Pixels(fraction) => Self::Fraction(fraction),
            LayoutValue::Percent(percent) => Self::Percent(percent),
        }
    }
}

impl From<GapValue> for LayoutValue {
    fn from(value: GapValue) -> Self {
        match value {
            GapValue::Fraction(fraction) => Self::Pixels(fraction),
            GapValue::Percent(percent) => Self::Percent(percent),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisLineConfig {
    pub on_zero: bool,
}

impl Default for AxisLineConfig {
    fn default() -> Self {
        Self { on_zero: true }
    }
}

/// One x or y axis component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
    #[serde(rename = "type")]
    pub kind: ScaleKind,
    pub grid_index: usize,
    /// Requested side. Values that do not fit the axis orientation fall back to the default side.
    #[serde(deserialize_with = "lenient_position")]
    pub position: Option<AxisPosition>,
    pub inverse: bool,
    pub boundary_gap: Option<BoundaryGap>,
    pub axis_line: AxisLineConfig,
    pub axis_label: AxisLabelOptions,
    /// When `false`, a value axis is forced to include zero.
    pub scale: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub split_number: usize,
    pub interval: Option<f64>,
    /// Category names, for category axes.
    pub data: Vec<String>,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            kind: ScaleKind::Value,
            grid_index: 0,
            position: None,
            inverse: false,
            boundary_gap: None,
            axis_line: AxisLineConfig::default(),
            axis_label: AxisLabelOptions::default(),
            scale: false,
            min: None,
            max: None,
            split_number: DEFAULT_SPLIT_NUMBER,
            interval: None,
            data: Vec::new(),
        }
    }
}

impl AxisConfig {
    #[must_use]
    pub fn new(kind: ScaleKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn category<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: ScaleKind::Category,
            data: names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_grid_index(mut self, grid_index: usize) -> Self {
        self.grid_index = grid_index;
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: AxisPosition) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn with_inverse(mut self, inverse: bool) -> Self {
        self.inverse = inverse;
        self
    }

    #[must_use]
    pub fn with_boundary_gap(mut self, boundary_gap: BoundaryGap) -> Self {
        self.boundary_gap = Some(boundary_gap);
        self
    }

    #[must_use]
    pub fn with_on_zero(mut self, on_zero: bool) -> Self {
        self.axis_line.on_zero = on_zero;
        self
    }

    #[must_use]
    pub fn with_label(mut self, axis_label: AxisLabelOptions) -> Self {
        self.axis_label = axis_label;
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: bool) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub fn with_min_max(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Whether the axis must include zero (bar baselines and the like).
    #[must_use]
    pub fn needs_cross_zero(&self) -> bool {
        self.kind == ScaleKind::Value && !self.scale
    }

    /// Whether category ticks sit on band centres.
    #[must_use]
    pub fn on_band(&self) -> bool {
        self.kind == ScaleKind::Category
            && match self.boundary_gap {
                None | Some(BoundaryGap::Range(_)) => true,
                Some(BoundaryGap::Flag(flag)) => flag,
            }
    }

    /// Fractions of the data span added below and above a numeric extent.
    #[must_use]
    pub fn value_boundary_gap(&self) -> (f64, f64) {
        match self.boundary_gap {
            Some(BoundaryGap::Range([lo, hi])) => (lo.fraction(), hi.fraction()),
            None | Some(BoundaryGap::Flag(_)) => (0.0, 0.0),
        }
    }

    /// Explicit `min` the scale can honor. Log axes ignore non-positive bounds.
    #[must_use]
    pub fn min_bound(&self) -> Option<f64> {
        self.min.filter(|value| self.accepts_bound(*value))
    }

    /// Explicit `max` the scale can honor. Log axes ignore non-positive bounds.
    #[must_use]
    pub fn max_bound(&self) -> Option<f64> {
        self.max.filter(|value| self.accepts_bound(*value))
    }

    fn accepts_bound(&self, value: f64) -> bool {
        value.is_finite() && (self.kind != ScaleKind::Log || value > 0.0)
    }
}

fn lenient_position<'de, D>(deserializer: D) -> Result<Option<AxisPosition>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|text| match text.as_str() {
        "top" => Some(AxisPosition::Top),
        "bottom" => Some(AxisPosition::Bottom),
        "left" => Some(AxisPosition::Left),
        "right" => Some(AxisPosition::Right),
        _ => None,
    }))
}

/// One data series and the axes it is plotted against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesConfig {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinate_system: CoordinateSystemKind,
    pub x_axis_index: usize,
    pub y_axis_index: usize,
    pub data: ListData,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            name: None,
            kind: "line".to_owned(),
            coordinate_system: CoordinateSystemKind::Cartesian2d,
            x_axis_index: 0,
            y_axis_index: 0,
            data: ListData::default(),
        }
    }
}

impl SeriesConfig {
    #[must_use]
    pub fn new(kind: impl Into<String>, data: ListData) -> Self {
        Self {
            kind: kind.into(),
            data,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_axes(mut self, x_axis_index: usize, y_axis_index: usize) -> Self {
        self.x_axis_index = x_axis_index;
        self.y_axis_index = y_axis_index;
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_coordinate_system(mut self, coordinate_system: CoordinateSystemKind) -> Self {
        self.coordinate_system = coordinate_system;
        self
    }
}
