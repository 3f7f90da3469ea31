use serde::{Deserialize, Serialize};

use crate::core::{AxisDim, AxisKey, AxisPosition, CartesianKey, LayoutRect, ScaleKind};
use crate::error::{ChartError, ChartResult};

use super::{ChartLayout, Grid, GridValidity, SeriesBinding};

pub const GRID_LAYOUT_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSnapshot {
    pub key: AxisKey,
    pub kind: ScaleKind,
    pub position: AxisPosition,
    pub scale_extent: (f64, f64),
    pub pixel_extent: (f64, f64),
    pub interval: Option<f64>,
    pub inverse: bool,
    pub on_band: bool,
    pub on_zero: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub name: String,
    pub validity: GridValidity,
    pub rect: LayoutRect,
    pub axes: Vec<AxisSnapshot>,
    pub cartesians: Vec<CartesianKey>,
}

/// Serializable deterministic view of a layout pass, used by regression
/// tests and debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLayoutSnapshot {
    pub grids: Vec<GridSnapshot>,
    pub series: Vec<Option<SeriesBinding>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLayoutSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: GridLayoutSnapshot,
}

impl Grid {
    #[must_use]
    pub fn snapshot(&self) -> GridSnapshot {
        let axes = self
            .axes()
            .map(|axis| AxisSnapshot {
                key: axis.key(),
                kind: axis.kind(),
                position: axis.position(),
                scale_extent: axis.scale().extent(),
                pixel_extent: axis.extent(),
                interval: axis.scale().interval(),
                inverse: axis.inverse(),
                on_band: axis.on_band(),
                on_zero: axis.on_zero(),
            })
            .collect();
        GridSnapshot {
            name: self.name().to_owned(),
            validity: self.validity(),
            rect: self.rect(),
            axes,
            cartesians: self.cartesians().map(|view| view.key()).collect(),
        }
    }
}

impl ChartLayout {
    #[must_use]
    pub fn snapshot(&self) -> GridLayoutSnapshot {
        GridLayoutSnapshot {
            grids: self.grids().iter().map(Grid::snapshot).collect(),
            series: (0..self.series_count())
                .map(|index| self.series_binding(index))
                .collect(),
        }
    }
}

impl GridSnapshot {
    /// First axis of `dim` in allocation order.
    #[must_use]
    pub fn axis(&self, dim: AxisDim) -> Option<&AxisSnapshot> {
        self.axes.iter().find(|axis| axis.key.dim == dim)
    }
}

impl GridLayoutSnapshot {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize grid layout snapshot: {e}"))
        })
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = GridLayoutSnapshotJsonContractV1 {
            schema_version: GRID_LAYOUT_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!(
                "failed to serialize grid layout snapshot contract v1: {e}"
            ))
        })
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<GridLayoutSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: GridLayoutSnapshotJsonContractV1 =
            serde_json::from_str(input).map_err(|e| {
                ChartError::InvalidData(format!("failed to parse grid layout snapshot json: {e}"))
            })?;
        if payload.schema_version != GRID_LAYOUT_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported grid layout snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}
