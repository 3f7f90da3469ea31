mod builder;
mod config;
mod grid;
mod grid_axes;
mod grid_extent;
mod registry;
mod snapshot;

pub use builder::{ChartLayout, SeriesBinding, create, create_grids};
pub use config::{
    AxisConfig, AxisLineConfig, BoundaryGap, ChartModel, GapValue, GridConfig, SeriesConfig,
};
pub use grid::{Grid, GridValidity};
pub use registry::{
    CoordinateSystemFactory, CoordinateSystemKind, CoordinateSystemRegistry, LayoutContext,
};
pub use snapshot::{
    AxisSnapshot, GRID_LAYOUT_SNAPSHOT_JSON_SCHEMA_V1, GridLayoutSnapshot,
    GridLayoutSnapshotJsonContractV1, GridSnapshot,
};
