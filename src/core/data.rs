use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{AxisDim, DataPoint};

/// Read contract the grid builder needs from a series' data container.
pub trait SeriesDataStore {
    /// Number of rows.
    fn count(&self) -> usize;

    /// Raw value of `row` along `dim`; `None` when the row does not exist.
    fn value(&self, dim: AxisDim, row: usize) -> Option<f64>;

    /// `[min, max]` of the values along `dim`, or `None` when no row qualifies.
    ///
    /// With `numeric_filter` set, only finite values count. Without it the
    /// dimension is read as ordinal positions: finite, non-negative values
    /// snapped to the nearest index.
    fn data_extent(&self, dim: AxisDim, numeric_filter: bool) -> Option<(f64, f64)>;

    /// Per-row visual attribute (color, symbol size, ...) attached by the visual layer.
    fn item_visual(&self, row: usize, key: &str) -> Option<&serde_json::Value>;
}

/// Column-oriented two-dimensional series data.
///
/// Missing values are stored as `NaN`. Data declared as a flat list of
/// values places each value on `y` and its row index on `x`, which is what
/// a category x-axis expects.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "SeriesDataInput", into = "SeriesDataInput")]
pub struct ListData {
    x: Vec<f64>,
    y: Vec<f64>,
    visuals: Vec<IndexMap<String, serde_json::Value>>,
}

/// Wire shapes accepted for series `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesDataInput {
    Values(Vec<Option<f64>>),
    Pairs(Vec<[Option<f64>; 2]>),
}

impl From<SeriesDataInput> for ListData {
    fn from(input: SeriesDataInput) -> Self {
        match input {
            SeriesDataInput::Values(values) => {
                Self::from_values(values.into_iter().map(|v| v.unwrap_or(f64::NAN)))
            }
            SeriesDataInput::Pairs(pairs) => Self::from_points(pairs.into_iter().map(|[x, y]| {
                DataPoint::new(x.unwrap_or(f64::NAN), y.unwrap_or(f64::NAN))
            })),
        }
    }
}

impl From<ListData> for SeriesDataInput {
    fn from(data: ListData) -> Self {
        let finite = |value: f64| value.is_finite().then_some(value);
        Self::Pairs(
            data.x
                .iter()
                .zip(&data.y)
                .map(|(x, y)| [finite(*x), finite(*y)])
                .collect(),
        )
    }
}

impl ListData {
    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = DataPoint>) -> Self {
        let (x, y): (Vec<f64>, Vec<f64>) = points.into_iter().map(|p| (p.x, p.y)).unzip();
        Self {
            x,
            y,
            visuals: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let y: Vec<f64> = values.into_iter().collect();
        let x = (0..y.len()).map(|index| index as f64).collect();
        Self {
            x,
            y,
            visuals: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    fn column(&self, dim: AxisDim) -> &[f64] {
        match dim {
            AxisDim::X => &self.x,
            AxisDim::Y => &self.y,
        }
    }

    /// Attaches a visual attribute to `row`. Returns `false` for rows out of range.
    pub fn set_item_visual(
        &mut self,
        row: usize,
        key: impl Into<String>,
        value: serde_json::Value,
    ) -> bool {
        if row >= self.x.len() {
            return false;
        }
        if self.visuals.len() < self.x.len() {
            self.visuals.resize_with(self.x.len(), IndexMap::new);
        }
        self.visuals[row].insert(key.into(), value);
        true
    }
}

impl SeriesDataStore for ListData {
    fn count(&self) -> usize {
        self.x.len()
    }

    fn value(&self, dim: AxisDim, row: usize) -> Option<f64> {
        self.column(dim).get(row).copied()
    }

    fn data_extent(&self, dim: AxisDim, numeric_filter: bool) -> Option<(f64, f64)> {
        let values = self.column(dim).iter().copied().filter(|v| v.is_finite());
        let values: Box<dyn Iterator<Item = f64> + '_> = if numeric_filter {
            Box::new(values)
        } else {
            Box::new(values.filter(|v| *v >= 0.0).map(f64::round))
        };
        values.fold(None, |extent, value| match extent {
            None => Some((value, value)),
            Some((min, max)) => Some((f64::min(min, value), f64::max(max, value))),
        })
    }

    fn item_visual(&self, row: usize, key: &str) -> Option<&serde_json::Value> {
        self.visuals.get(row)?.get(key)
    }
}
