//! Axis tick-label measurement.
//!
//! Label layout is driven by renderer text metrics, which live outside this
//! crate. Callers plug in a [`TextMeasurer`]; [`HeuristicTextMeasurer`]
//! covers tests and early layout.

use serde::{Deserialize, Serialize};

use crate::core::LayoutRect;

/// Default gap between an axis line and its tick labels, in pixels.
pub const DEFAULT_LABEL_MARGIN: f64 = 8.0;
/// Default label font size, in pixels.
pub const DEFAULT_LABEL_FONT_SIZE: f64 = 12.0;

/// Measures the bounding box of a formatted label.
pub trait TextMeasurer {
    /// Returns `(width, height)` in pixels.
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64);
}

/// Assumes an average glyph width of ~0.6em and a line height of 1em.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64) {
        let width = 0.6 * font_size * text.chars().count() as f64;
        (width, font_size)
    }
}

impl<F> TextMeasurer for F
where
    F: Fn(&str, f64) -> (f64, f64),
{
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64) {
        self(text, font_size)
    }
}

/// Tick-label options read from the axis configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisLabelOptions {
    pub show: bool,
    /// Show every `interval + 1`-th label; `None` picks an interval that avoids overlap.
    pub interval: Option<usize>,
    pub margin: f64,
    pub font_size: f64,
}

impl Default for AxisLabelOptions {
    fn default() -> Self {
        Self {
            show: true,
            interval: None,
            margin: DEFAULT_LABEL_MARGIN,
            font_size: DEFAULT_LABEL_FONT_SIZE,
        }
    }
}

/// Bounding box of a label anchored at the origin.
#[must_use]
pub fn text_rect(text: &str, font_size: f64, measurer: &dyn TextMeasurer) -> LayoutRect {
    let (width, height) = measurer.measure(text, font_size);
    LayoutRect::new(0.0, 0.0, width.max(0.0), height.max(0.0))
}

/// Smallest label interval at which no two shown labels overlap.
///
/// `tick_coords` and `label_sizes` run in tick order; sizes are measured
/// along the axis direction and padded by half to keep breathing room.
#[must_use]
pub fn auto_label_interval(tick_coords: &[f64], label_sizes: &[f64]) -> usize {
    let mut taken: Option<(f64, f64)> = None;
    let mut accumulated = 0_usize;
    let mut interval = 0_usize;
    for (coord, size) in tick_coords.iter().zip(label_sizes) {
        let span = (*coord, coord + size * 1.5);
        match taken {
            None => taken = Some(span),
            Some((start, end)) if span.0 <= end && span.1 >= start => {
                accumulated += 1;
                interval = interval.max(accumulated);
            }
            Some((start, end)) => {
                taken = Some((start.min(span.0), end.max(span.1)));
                accumulated = 0;
            }
        }
    }
    interval
}
