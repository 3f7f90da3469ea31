use serde::{Deserialize, Serialize};

use crate::core::{LayoutRect, Viewport};
use crate::error::{ChartError, ChartResult};

/// A box-model length: absolute pixels or a percentage of the container.
///
/// Deserializes from a JSON number (`80`) or a string (`"10%"`, `"80"`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLayoutValue", into = "RawLayoutValue")]
pub enum LayoutValue {
    Pixels(f64),
    Percent(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawLayoutValue {
    Number(f64),
    Text(String),
}

impl TryFrom<RawLayoutValue> for LayoutValue {
    type Error = ChartError;

    fn try_from(raw: RawLayoutValue) -> ChartResult<Self> {
        match raw {
            RawLayoutValue::Number(value) => Self::pixels(value),
            RawLayoutValue::Text(text) => Self::parse(&text),
        }
    }
}

impl From<LayoutValue> for RawLayoutValue {
    fn from(value: LayoutValue) -> Self {
        match value {
            LayoutValue::Pixels(px) => Self::Number(px),
            LayoutValue::Percent(pct) => Self::Text(format!("{pct}%")),
        }
    }
}

impl LayoutValue {
    pub fn pixels(value: f64) -> ChartResult<Self> {
        if !value.is_finite() {
            return Err(ChartError::InvalidConfig(
                "layout length must be finite".to_owned(),
            ));
        }
        Ok(Self::Pixels(value))
    }

    pub fn percent(value: f64) -> ChartResult<Self> {
        if !value.is_finite() {
            return Err(ChartError::InvalidConfig(
                "layout percentage must be finite".to_owned(),
            ));
        }
        Ok(Self::Percent(value))
    }

    /// Parses `"12.5%"` or a bare pixel number.
    pub fn parse(text: &str) -> ChartResult<Self> {
        let text = text.trim();
        let (number, is_percent) = match text.strip_suffix('%') {
            Some(number) => (number.trim(), true),
            None => (text, false),
        };
        let value: f64 = number.parse().map_err(|_| {
            ChartError::InvalidConfig(format!("invalid layout length: {text:?}"))
        })?;
        if is_percent {
            Self::percent(value)
        } else {
            Self::pixels(value)
        }
    }

    /// Absolute pixel length against a container dimension.
    #[must_use]
    pub fn resolve(self, total: f64) -> f64 {
        match self {
            Self::Pixels(px) => px,
            Self::Percent(pct) => total * pct / 100.0,
        }
    }
}

/// Declared placement of a box inside its container; unset sides are derived.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoxLayoutParams {
    pub left: Option<LayoutValue>,
    pub top: Option<LayoutValue>,
    pub right: Option<LayoutValue>,
    pub bottom: Option<LayoutValue>,
    pub width: Option<LayoutValue>,
    pub height: Option<LayoutValue>,
}

/// Resolves declared placement into an absolute rectangle.
///
/// A missing size is what remains between the two offsets; a missing
/// leading offset is derived from the trailing offset and the size.
pub fn resolve_box(params: BoxLayoutParams, viewport: Viewport) -> ChartResult<LayoutRect> {
    if !viewport.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    let container_w = f64::from(viewport.width);
    let container_h = f64::from(viewport.height);

    let (x, width) = resolve_span(params.left, params.right, params.width, container_w);
    let (y, height) = resolve_span(params.top, params.bottom, params.height, container_h);
    Ok(LayoutRect::new(x, y, width, height))
}

fn resolve_span(
    start: Option<LayoutValue>,
    end: Option<LayoutValue>,
    size: Option<LayoutValue>,
    total: f64,
) -> (f64, f64) {
    let start = start.map(|value| value.resolve(total));
    let end = end.map(|value| value.resolve(total));
    let size = size
        .map(|value| value.resolve(total))
        .unwrap_or_else(|| total - start.unwrap_or(0.0) - end.unwrap_or(0.0));
    let start = start.unwrap_or_else(|| match end {
        Some(end) => total - end - size,
        None => 0.0,
    });
    (start, size)
}
