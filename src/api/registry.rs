use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{TextMeasurer, Viewport};
use crate::error::{ChartError, ChartResult};

use super::{ChartLayout, ChartModel, create_grids};

/// Coordinate system a series declares it is plotted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateSystemKind {
    #[default]
    Cartesian2d,
    Polar,
    Geo,
}

impl CoordinateSystemKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cartesian2d => "cartesian2d",
            Self::Polar => "polar",
            Self::Geo => "geo",
        }
    }
}

/// Environment a coordinate-system factory lays itself out against.
#[derive(Clone, Copy)]
pub struct LayoutContext<'a> {
    pub viewport: Viewport,
    pub measurer: &'a dyn TextMeasurer,
}

impl<'a> LayoutContext<'a> {
    #[must_use]
    pub fn new(viewport: Viewport, measurer: &'a dyn TextMeasurer) -> Self {
        Self { viewport, measurer }
    }
}

pub type CoordinateSystemFactory = fn(&ChartModel, &LayoutContext<'_>) -> ChartResult<ChartLayout>;

/// Maps coordinate-system kinds to the factory that builds them.
///
/// The default registry only knows `cartesian2d`.
#[derive(Clone)]
pub struct CoordinateSystemRegistry {
    factories: IndexMap<CoordinateSystemKind, CoordinateSystemFactory>,
}

impl Default for CoordinateSystemRegistry {
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register(CoordinateSystemKind::Cartesian2d, create_grids);
        registry
    }
}

impl std::fmt::Debug for CoordinateSystemRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoordinateSystemRegistry")
            .field("kinds", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl CoordinateSystemRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: IndexMap::new(),
        }
    }

    /// Registers `factory` for `kind`, returning the factory it replaces.
    pub fn register(
        &mut self,
        kind: CoordinateSystemKind,
        factory: CoordinateSystemFactory,
    ) -> Option<CoordinateSystemFactory> {
        self.factories.insert(kind, factory)
    }

    #[must_use]
    pub fn contains(&self, kind: CoordinateSystemKind) -> bool {
        self.factories.contains_key(&kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = CoordinateSystemKind> + '_ {
        self.factories.keys().copied()
    }

    /// Builds the coordinate systems of `kind` declared in `model`.
    pub fn create(
        &self,
        kind: CoordinateSystemKind,
        model: &ChartModel,
        context: &LayoutContext<'_>,
    ) -> ChartResult<ChartLayout> {
        let factory = self.factories.get(&kind).ok_or_else(|| {
            ChartError::InvalidConfig(format!(
                "no coordinate system registered for `{}`",
                kind.as_str()
            ))
        })?;
        factory(model, context)
    }
}
