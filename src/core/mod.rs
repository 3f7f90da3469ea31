pub mod axis;
pub mod cartesian;
pub mod data;
pub mod label;
pub mod layout;
pub mod scale;
pub mod types;

pub use axis::{Axis, AxisKey};
pub use cartesian::{Cartesian, CartesianKey, CartesianView};
pub use data::{ListData, SeriesDataInput, SeriesDataStore};
pub use label::{AxisLabelOptions, HeuristicTextMeasurer, TextMeasurer};
pub use layout::{BoxLayoutParams, LayoutValue, resolve_box};
pub use scale::{DEFAULT_SPLIT_NUMBER, Scale, ScaleKind, nice_interval};
pub use types::{AxisDim, AxisPosition, DataPoint, GridIndex, LayoutRect, Viewport};
