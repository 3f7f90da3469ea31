//! chart-grid: cartesian coordinate-system builder for 2D charts.
//!
//! Given declarative grid, axis and series options, this crate allocates
//! axes to the sides of each grid, pairs them into cartesian planes, derives
//! scale extents from series data and lays every grid out against a
//! viewport, optionally reserving room for axis tick labels.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{ChartLayout, ChartModel, Grid, create};
pub use error::{ChartError, ChartResult};
