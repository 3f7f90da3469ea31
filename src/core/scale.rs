use chrono::{DateTime, Timelike, Utc};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Default number of segments a nice extent is split into.
pub const DEFAULT_SPLIT_NUMBER: usize = 5;

const MAX_TICKS: usize = 10_000;

/// Value-domain family of a scale; mirrors the declared axis `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    /// Continuous numeric values.
    #[default]
    Value,
    /// Ordered list of named categories addressed by ordinal index.
    Category,
    /// Continuous positive values spaced in base-10 log units.
    Log,
    /// Unix timestamps in milliseconds.
    Time,
}

/// One-dimensional value extent plus the nice-rounding and tick state derived from it.
///
/// An empty scale reports an extent of `(0.0, 0.0)`; unions only ever widen it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    kind: ScaleKind,
    extent: Option<(f64, f64)>,
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    interval: Option<f64>,
}

impl Scale {
    #[must_use]
    pub fn new(kind: ScaleKind) -> Self {
        Self {
            kind,
            extent: None,
            categories: Vec::new(),
            interval: None,
        }
    }

    /// Creates a category scale whose extent spans the ordinal indices of `categories`.
    #[must_use]
    pub fn category(categories: Vec<String>) -> Self {
        let extent = if categories.is_empty() {
            None
        } else {
            Some((0.0, (categories.len() - 1) as f64))
        };
        Self {
            kind: ScaleKind::Category,
            extent,
            categories,
            interval: None,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ScaleKind {
        self.kind
    }

    #[must_use]
    pub fn is_ordinal(&self) -> bool {
        self.kind == ScaleKind::Category
    }

    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    #[must_use]
    pub fn has_extent(&self) -> bool {
        self.extent.is_some()
    }

    #[must_use]
    pub fn extent(&self) -> (f64, f64) {
        self.extent.unwrap_or((0.0, 0.0))
    }

    /// Tick step chosen by the last nice pass, if any.
    #[must_use]
    pub fn interval(&self) -> Option<f64> {
        self.interval
    }

    pub fn set_extent(&mut self, min: f64, max: f64) {
        self.extent = Some((min, max));
    }

    pub fn set_interval(&mut self, interval: f64) {
        if interval.is_finite() && interval > 0.0 {
            self.interval = Some(interval);
        }
    }

    /// Widens the extent to cover `range`.
    ///
    /// Non-finite bounds are treated as absent, and log scales also skip
    /// non-positive bounds. Idempotent and commutative.
    pub fn union_extent(&mut self, range: (f64, f64)) {
        let kind = self.kind;
        let accept = |value: f64| value.is_finite() && (kind != ScaleKind::Log || value > 0.0);
        for value in [range.0, range.1].into_iter().filter(|value| accept(*value)) {
            self.extent = Some(match self.extent {
                None => (value, value),
                Some((min, max)) => (min.min(value), max.max(value)),
            });
        }
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        let (min, max) = self.extent();
        value >= min && value <= max
    }

    /// Rounds the extent outward to readable tick boundaries.
    ///
    /// `fix_min`/`fix_max` keep the respective end unrounded, which is how
    /// explicit axis `min`/`max` overrides survive the pass.
    pub fn nice_extent(&mut self, split_number: usize, fix_min: bool, fix_max: bool) {
        let split_number = split_number.max(1);
        match self.kind {
            ScaleKind::Category => {
                let (min, max) = self.extent();
                if !(max - min).is_finite() {
                    self.extent = Some((0.0, 0.0));
                }
            }
            ScaleKind::Value | ScaleKind::Time => {
                self.nice_interval_extent(split_number, fix_min, fix_max);
            }
            ScaleKind::Log => self.nice_log_extent(split_number, fix_min, fix_max),
        }
    }

    fn nice_interval_extent(&mut self, split_number: usize, fix_min: bool, fix_max: bool) {
        let (mut min, mut max) = self.extent();
        if min == max {
            if min != 0.0 {
                let expand = min.abs() / 2.0;
                min -= expand;
                max += expand;
            } else {
                max = 1.0;
            }
        }
        if !(max - min).is_finite() {
            min = 0.0;
            max = 1.0;
        }

        let interval = match self.interval {
            Some(interval) => interval,
            None => nice_interval(max - min, split_number),
        };
        if !fix_min {
            min = round_to_step((min / interval).floor() * interval, interval);
        }
        if !fix_max {
            max = round_to_step((max / interval).ceil() * interval, interval);
        }
        self.interval = Some(interval);
        self.extent = Some((min, max));
    }

    fn nice_log_extent(&mut self, split_number: usize, fix_min: bool, fix_max: bool) {
        let (min, max) = match self.extent {
            Some((min, max)) if min > 0.0 && max > 0.0 => (min, max),
            _ => (1.0, 10.0),
        };
        let mut lo = min.log10();
        let mut hi = max.log10();
        if lo == hi {
            lo = lo.floor();
            hi = lo + 1.0;
        }
        let decades = ((hi - lo) / split_number as f64).ceil().max(1.0);
        let lo_nice = if fix_min {
            lo
        } else {
            (lo / decades).floor() * decades
        };
        let hi_nice = if fix_max {
            hi
        } else {
            (hi / decades).ceil() * decades
        };
        self.interval = Some(decades);
        self.extent = Some((10_f64.powf(lo_nice), 10_f64.powf(hi_nice)));
    }

    /// Maps a value into `[0, 1]` relative to the extent.
    #[must_use]
    pub fn normalize(&self, value: f64) -> f64 {
        let (min, max) = self.transformed_extent();
        let value = self.transform(value);
        if max == min {
            return 0.5;
        }
        (value - min) / (max - min)
    }

    /// Inverse of [`Scale::normalize`].
    #[must_use]
    pub fn scale(&self, normalized: f64) -> f64 {
        let (min, max) = self.transformed_extent();
        let transformed = min + normalized * (max - min);
        match self.kind {
            ScaleKind::Log => 10_f64.powf(transformed),
            _ => transformed,
        }
    }

    fn transform(&self, value: f64) -> f64 {
        match self.kind {
            ScaleKind::Log => value.log10(),
            _ => value,
        }
    }

    fn transformed_extent(&self) -> (f64, f64) {
        let (min, max) = self.extent();
        (self.transform(min), self.transform(max))
    }

    /// Tick values inside the current extent, ascending.
    #[must_use]
    pub fn ticks(&self) -> Vec<f64> {
        let Some((min, max)) = self.extent else {
            return Vec::new();
        };
        let mut ticks = match self.kind {
            ScaleKind::Category => {
                let start = min.ceil().max(0.0);
                let mut ticks = Vec::new();
                let mut tick = start;
                while tick <= max && ticks.len() < MAX_TICKS {
                    ticks.push(tick);
                    tick += 1.0;
                }
                ticks
            }
            ScaleKind::Value | ScaleKind::Time => {
                let interval = self
                    .interval
                    .unwrap_or_else(|| nice_interval(max - min, DEFAULT_SPLIT_NUMBER));
                step_ticks(min, max, interval)
            }
            ScaleKind::Log => {
                if min <= 0.0 || max <= 0.0 {
                    return Vec::new();
                }
                let decades = self.interval.unwrap_or(1.0);
                step_ticks(min.log10(), max.log10(), decades)
                    .into_iter()
                    .map(|exponent| 10_f64.powf(exponent))
                    .collect()
            }
        };
        ticks.dedup_by_key(|tick| OrderedFloat(*tick));
        ticks
    }

    /// Formats a tick value for display on an axis.
    #[must_use]
    pub fn label(&self, value: f64) -> String {
        match self.kind {
            ScaleKind::Category => {
                let index = value.round();
                if index >= 0.0 {
                    if let Some(name) = self.categories.get(index as usize) {
                        return name.clone();
                    }
                }
                format_number(value)
            }
            ScaleKind::Value | ScaleKind::Log => format_number(value),
            ScaleKind::Time => format_time(value),
        }
    }

    /// Formatted labels for every tick, in tick order.
    #[must_use]
    pub fn tick_labels(&self) -> Vec<String> {
        self.ticks().into_iter().map(|tick| self.label(tick)).collect()
    }
}

/// Picks a readable step so that `span` splits into roughly `split_number` parts.
#[must_use]
pub fn nice_interval(span: f64, split_number: usize) -> f64 {
    if !span.is_finite() || span <= 0.0 {
        return 1.0;
    }
    let split_number = split_number.max(1) as f64;
    let mut step = 10_f64.powf((span / split_number).log10().floor());
    let err = split_number / span * step;
    if err <= 0.15 {
        step *= 10.0;
    } else if err <= 0.3 {
        step *= 5.0;
    } else if err <= 0.45 {
        step *= 3.0;
    } else if err <= 0.75 {
        step *= 2.0;
    }
    step
}

fn step_ticks(min: f64, max: f64, interval: f64) -> Vec<f64> {
    if !interval.is_finite() || interval <= 0.0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    let epsilon = interval * 1e-9;
    let mut ticks = Vec::new();
    let mut tick = round_to_step((min / interval).ceil() * interval, interval);
    while tick <= max + epsilon && ticks.len() < MAX_TICKS {
        ticks.push(tick);
        tick = round_to_step(tick + interval, interval);
    }
    ticks
}

/// Strips float noise (`0.30000000000000004`) using the step's precision.
fn round_to_step(value: f64, step: f64) -> f64 {
    let digits = (-step.abs().log10().floor()).max(0.0) as i32 + 2;
    let factor = 10_f64.powi(digits.min(15));
    let rounded = (value * factor).round() / factor;
    if rounded.is_finite() { rounded } else { value }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{value:.0}");
    }
    let text = format!("{value:.10}");
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}

fn format_time(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let Some(time) = DateTime::<Utc>::from_timestamp_millis(value as i64) else {
        return format_number(value);
    };
    if time.hour() == 0 && time.minute() == 0 && time.second() == 0 {
        time.format("%Y-%m-%d").to_string()
    } else {
        time.format("%m-%d %H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{Scale, ScaleKind, nice_interval};

    #[test]
    fn empty_scale_reports_zero_extent() {
        let scale = Scale::new(ScaleKind::Value);
        assert!(!scale.has_extent());
        assert_eq!(scale.extent(), (0.0, 0.0));
    }

    #[test]
    fn union_ignores_non_finite_bounds() {
        let mut scale = Scale::new(ScaleKind::Value);
        scale.union_extent((f64::NAN, 4.0));
        scale.union_extent((-2.0, f64::INFINITY));
        assert_eq!(scale.extent(), (-2.0, 4.0));
    }

    #[test]
    fn log_union_skips_non_positive_values() {
        let mut scale = Scale::new(ScaleKind::Log);
        scale.union_extent((0.0, 100.0));
        assert_eq!(scale.extent(), (100.0, 100.0));
    }

    #[test]
    fn nice_extent_rounds_outward() {
        let mut scale = Scale::new(ScaleKind::Value);
        scale.union_extent((3.0, 97.0));
        scale.nice_extent(5, false, false);
        assert_eq!(scale.extent(), (0.0, 100.0));
        assert_eq!(scale.interval(), Some(20.0));
    }

    #[test]
    fn nice_extent_expands_degenerate_extents() {
        let mut zero = Scale::new(ScaleKind::Value);
        zero.nice_extent(5, false, false);
        assert_eq!(zero.extent(), (0.0, 1.0));

        let mut single = Scale::new(ScaleKind::Value);
        single.union_extent((10.0, 10.0));
        single.nice_extent(5, false, false);
        let (min, max) = single.extent();
        assert!(min <= 5.0 && max >= 15.0);
    }

    #[test]
    fn nice_extent_keeps_fixed_ends() {
        let mut scale = Scale::new(ScaleKind::Value);
        scale.union_extent((3.0, 97.0));
        scale.nice_extent(5, true, false);
        assert_eq!(scale.extent(), (3.0, 100.0));
    }

    #[test]
    fn log_nice_extent_snaps_to_decades() {
        let mut scale = Scale::new(ScaleKind::Log);
        scale.union_extent((3.0, 420.0));
        scale.nice_extent(5, false, false);
        let (min, max) = scale.extent();
        assert!((min - 1.0).abs() < 1e-9);
        assert!((max - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn category_scale_spans_ordinals_and_labels_by_name() {
        let scale = Scale::category(vec!["a".into(), "b".into(), "c".into()]);
        assert_eq!(scale.extent(), (0.0, 2.0));
        assert_eq!(scale.ticks(), vec![0.0, 1.0, 2.0]);
        assert_eq!(scale.label(1.0), "b");
    }

    #[test]
    fn nice_interval_follows_step_ladder() {
        assert_eq!(nice_interval(100.0, 5), 20.0);
        assert_eq!(nice_interval(10.0, 5), 2.0);
        assert_eq!(nice_interval(1.0, 5), 0.2);
    }

    #[test]
    fn value_ticks_are_free_of_float_noise() {
        let mut scale = Scale::new(ScaleKind::Value);
        scale.union_extent((0.0, 1.0));
        scale.nice_extent(5, false, false);
        let ticks = scale.ticks();
        assert_eq!(ticks, vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(scale.label(0.6), "0.6");
    }

    #[test]
    fn normalize_round_trips_through_scale() {
        let mut scale = Scale::new(ScaleKind::Log);
        scale.union_extent((1.0, 1000.0));
        let normalized = scale.normalize(10.0);
        assert!((normalized - 1.0 / 3.0).abs() < 1e-12);
        assert!((scale.scale(normalized) - 10.0).abs() < 1e-9);
    }
}
