use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::label::{AxisLabelOptions, TextMeasurer, auto_label_interval, text_rect};
use crate::core::{AxisDim, AxisPosition, LayoutRect, Scale, ScaleKind};

/// Identity of an axis configuration: its dimension plus its index in the
/// chart's unfiltered per-dimension component list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AxisKey {
    pub dim: AxisDim,
    pub index: usize,
}

impl AxisKey {
    #[must_use]
    pub const fn new(dim: AxisDim, index: usize) -> Self {
        Self { dim, index }
    }

    #[must_use]
    pub const fn x(index: usize) -> Self {
        Self::new(AxisDim::X, index)
    }

    #[must_use]
    pub const fn y(index: usize) -> Self {
        Self::new(AxisDim::Y, index)
    }
}

impl fmt::Display for AxisKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.dim.as_str(), self.index)
    }
}

/// One labeled dimension of a grid: a scale, a side and a pixel extent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    key: AxisKey,
    position: AxisPosition,
    scale: Scale,
    extent: (f64, f64),
    data_extent: Option<(f64, f64)>,
    inverse: bool,
    on_band: bool,
    on_zero: bool,
    label: AxisLabelOptions,
}

impl Axis {
    /// Creates an axis with a placeholder `[0, 0]` pixel extent.
    #[must_use]
    pub fn new(key: AxisKey, scale: Scale, position: AxisPosition) -> Self {
        Self {
            key,
            position,
            scale,
            extent: (0.0, 0.0),
            data_extent: None,
            inverse: false,
            on_band: false,
            on_zero: false,
            label: AxisLabelOptions::default(),
        }
    }

    #[must_use]
    pub fn with_inverse(mut self, inverse: bool) -> Self {
        self.inverse = inverse;
        self
    }

    /// Band placement only takes effect on category axes.
    #[must_use]
    pub fn with_on_band(mut self, on_band: bool) -> Self {
        self.on_band = on_band && self.scale.is_ordinal();
        self
    }

    #[must_use]
    pub fn with_on_zero(mut self, on_zero: bool) -> Self {
        self.on_zero = on_zero;
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: AxisLabelOptions) -> Self {
        self.label = label;
        self
    }

    #[must_use]
    pub fn key(&self) -> AxisKey {
        self.key
    }

    #[must_use]
    pub fn dim(&self) -> AxisDim {
        self.key.dim
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.key.index
    }

    #[must_use]
    pub fn kind(&self) -> ScaleKind {
        self.scale.kind()
    }

    #[must_use]
    pub fn position(&self) -> AxisPosition {
        self.position
    }

    #[must_use]
    pub fn is_horizontal(&self) -> bool {
        self.position.is_horizontal()
    }

    #[must_use]
    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    pub fn scale_mut(&mut self) -> &mut Scale {
        &mut self.scale
    }

    #[must_use]
    pub fn extent(&self) -> (f64, f64) {
        self.extent
    }

    pub fn set_extent(&mut self, start: f64, end: f64) {
        self.extent = (start, end);
    }

    /// Scale extent as unioned from series data, before cross-zero and nice rounding.
    #[must_use]
    pub fn data_extent(&self) -> Option<(f64, f64)> {
        self.data_extent
    }

    pub(crate) fn record_data_extent(&mut self) {
        self.data_extent = self.scale.has_extent().then(|| self.scale.extent());
    }

    #[must_use]
    pub fn inverse(&self) -> bool {
        self.inverse
    }

    #[must_use]
    pub fn on_band(&self) -> bool {
        self.on_band
    }

    #[must_use]
    pub fn on_zero(&self) -> bool {
        self.on_zero
    }

    pub fn set_on_zero(&mut self, on_zero: bool) {
        self.on_zero = on_zero;
    }

    #[must_use]
    pub fn label_options(&self) -> AxisLabelOptions {
        self.label
    }

    /// Whether a pixel coordinate lies within the axis extent.
    #[must_use]
    pub fn contain(&self, coord: f64) -> bool {
        let (a, b) = self.extent;
        coord >= a.min(b) && coord <= a.max(b)
    }

    /// Pixel width of one category band; the full extent for non-category axes.
    #[must_use]
    pub fn band_width(&self) -> f64 {
        let size = (self.extent.1 - self.extent.0).abs();
        match self.band_count() {
            Some(count) => size / count as f64,
            None => size,
        }
    }

    fn band_count(&self) -> Option<usize> {
        if !self.scale.is_ordinal() {
            return None;
        }
        let (min, max) = self.scale.extent();
        let count = (max - min).round() + 1.0;
        (count.is_finite() && count >= 1.0).then_some(count as usize)
    }

    /// Pixel extent narrowed by half a band on each end when ticks sit on band centres.
    fn band_extent_px(&self, extent: (f64, f64)) -> (f64, f64) {
        let (mut start, mut end) = extent;
        if self.on_band {
            if let Some(count) = self.band_count() {
                let margin = (end - start) / count as f64 / 2.0;
                start += margin;
                end -= margin;
            }
        }
        (start, end)
    }

    /// Maps a data value to a pixel coordinate along this axis.
    #[must_use]
    pub fn data_to_coord(&self, value: f64) -> f64 {
        self.data_to_coord_within(self.extent, value)
    }

    fn data_to_coord_within(&self, extent: (f64, f64), value: f64) -> f64 {
        let (start, end) = self.band_extent_px(extent);
        start + self.scale.normalize(value) * (end - start)
    }

    /// Maps a pixel coordinate back to a data value.
    #[must_use]
    pub fn coord_to_data(&self, coord: f64) -> f64 {
        let (start, end) = self.band_extent_px(self.extent);
        let normalized = if end == start {
            0.5
        } else {
            (coord - start) / (end - start)
        };
        self.scale.scale(normalized)
    }

    /// Pixel coordinates of every scale tick.
    #[must_use]
    pub fn tick_coords(&self) -> Vec<f64> {
        self.tick_coords_within(self.extent)
    }

    fn tick_coords_within(&self, extent: (f64, f64)) -> Vec<f64> {
        self.scale
            .ticks()
            .into_iter()
            .map(|tick| self.data_to_coord_within(extent, tick))
            .collect()
    }

    /// Resolved label interval against the current pixel extent.
    #[must_use]
    pub fn label_interval(&self, measurer: &dyn TextMeasurer) -> usize {
        self.label_interval_within(self.extent, measurer)
    }

    /// Label interval the axis would use if it spanned `extent`: the
    /// configured one, or on category axes the smallest one at which shown
    /// labels do not overlap.
    #[must_use]
    pub fn label_interval_within(&self, extent: (f64, f64), measurer: &dyn TextMeasurer) -> usize {
        if let Some(interval) = self.label.interval {
            return interval;
        }
        if !self.scale.is_ordinal() || extent.0 == extent.1 {
            return 0;
        }
        let horizontal = self.is_horizontal();
        let mut sizes: Vec<f64> = self
            .scale
            .tick_labels()
            .iter()
            .map(|text| {
                let rect = text_rect(text, self.label.font_size, measurer);
                if horizontal { rect.width } else { rect.height }
            })
            .collect();
        let mut coords = self.tick_coords_within(extent);
        if coords.first() > coords.last() {
            coords.reverse();
            sizes.reverse();
        }
        auto_label_interval(&coords, &sizes)
    }

    /// Whether the label of tick `index` is suppressed at the current pixel extent.
    #[must_use]
    pub fn is_label_ignored(&self, index: usize, measurer: &dyn TextMeasurer) -> bool {
        self.skips_label(index, self.label_interval(measurer))
    }

    fn skips_label(&self, index: usize, interval: usize) -> bool {
        !self.label.show || (interval > 0 && index % (interval + 1) != 0)
    }

    /// Union of the bounding boxes of every label shown when the axis spans
    /// `extent`, or `None` when no label is shown.
    #[must_use]
    pub fn label_union_rect(
        &self,
        extent: (f64, f64),
        measurer: &dyn TextMeasurer,
    ) -> Option<LayoutRect> {
        if !self.label.show {
            return None;
        }
        let interval = self.label_interval_within(extent, measurer);
        self.scale
            .tick_labels()
            .iter()
            .enumerate()
            .filter(|(index, _)| !self.skips_label(*index, interval))
            .map(|(_, text)| text_rect(text, self.label.font_size, measurer))
            .reduce(LayoutRect::union)
    }
}
