use crate::core::{Axis, AxisDim, AxisKey, CartesianKey, ScaleKind, SeriesDataStore};

use super::{AxisConfig, ChartModel, CoordinateSystemKind, Grid};

impl Grid {
    /// Unions each cartesian-bound series' data extent into the scales of
    /// the axes it is plotted against.
    ///
    /// Only series whose x and y axes both belong to this grid take part.
    /// Union is commutative and idempotent, so series order is irrelevant.
    pub(super) fn update_extents_from_series(&mut self, model: &ChartModel) {
        let grid = self.index();
        for series in &model.series {
            if series.coordinate_system != CoordinateSystemKind::Cartesian2d {
                continue;
            }
            if !model.axis_belongs_to_grid(AxisDim::X, series.x_axis_index, grid)
                || !model.axis_belongs_to_grid(AxisDim::Y, series.y_axis_index, grid)
            {
                continue;
            }
            let key = CartesianKey::new(series.x_axis_index, series.y_axis_index);
            if !self.cartesians.contains_key(&key) {
                continue;
            }

            for axis_key in [key.x_axis(), key.y_axis()] {
                let Some(axis) = self.axes.get_mut(&axis_key) else {
                    continue;
                };
                let numeric = !axis.scale().is_ordinal();
                if let Some(extent) = series.data.data_extent(axis_key.dim, numeric) {
                    axis.scale_mut().union_extent(extent);
                }
            }
        }

        for axis in self.axes.values_mut() {
            axis.record_data_extent();
        }
    }

    /// Resolves axis-line placement and finalizes scale extents.
    ///
    /// An axis cannot sit on the zero line of a partner that is a category
    /// axis or whose extent does not reach zero. Axes that must include
    /// zero are widened to it, then every axis is nice-rounded once.
    pub(super) fn fix_axis_on_zero(
        &mut self,
        model: &ChartModel,
        x_indices: &[usize],
        y_indices: &[usize],
    ) {
        for &x_index in x_indices {
            for &y_index in y_indices {
                let (Some(x_config), Some(y_config)) = (
                    model.axis_config(AxisDim::X, x_index),
                    model.axis_config(AxisDim::Y, y_index),
                ) else {
                    continue;
                };
                let x_key = AxisKey::x(x_index);
                let y_key = AxisKey::y(y_index);
                let (Some(x_axis), Some(y_axis)) = (self.axes.get(&x_key), self.axes.get(&y_key))
                else {
                    continue;
                };

                let x_anchors = can_anchor_on_zero(x_axis, x_config);
                let y_anchors = can_anchor_on_zero(y_axis, y_config);
                if !x_anchors {
                    if let Some(y_axis) = self.axes.get_mut(&y_key) {
                        y_axis.set_on_zero(false);
                    }
                }
                if !y_anchors {
                    if let Some(x_axis) = self.axes.get_mut(&x_key) {
                        x_axis.set_on_zero(false);
                    }
                }
            }
        }

        for axis in self.axes.values_mut() {
            let Some(config) = model.axis_config(axis.dim(), axis.index()) else {
                continue;
            };
            if config.needs_cross_zero() {
                axis.scale_mut().union_extent((0.0, 0.0));
            }
            nice_scale_extent(axis, config);
        }
    }
}

/// Whether a perpendicular axis may be drawn through this axis' zero.
fn can_anchor_on_zero(axis: &Axis, config: &AxisConfig) -> bool {
    axis.kind() != ScaleKind::Category && crosses_zero(axis, config)
}

/// Whether the axis extent, widened by explicit `min`/`max`, reaches zero.
/// Axes that must include zero always do.
fn crosses_zero(axis: &Axis, config: &AxisConfig) -> bool {
    let (mut min, mut max) = axis.scale().extent();
    if let Some(opt_min) = config.min_bound() {
        min = min.min(opt_min);
    }
    if let Some(opt_max) = config.max_bound() {
        max = max.max(opt_max);
    }
    let one_signed = (min > 0.0 && max > 0.0) || (min < 0.0 && max < 0.0);
    !one_signed || config.needs_cross_zero()
}

/// Applies boundary gap and explicit bounds, then rounds to nice ticks.
fn nice_scale_extent(axis: &mut Axis, config: &AxisConfig) {
    let min_bound = config.min_bound();
    let max_bound = config.max_bound();
    let fix_min = min_bound.is_some();
    let fix_max = max_bound.is_some();
    let scale = axis.scale_mut();
    if scale.is_ordinal() {
        scale.nice_extent(config.split_number, fix_min, fix_max);
        return;
    }

    if scale.has_extent() || fix_min || fix_max {
        let log = scale.kind() == ScaleKind::Log;
        let (min, max) = padded_extent(scale.extent(), config.value_boundary_gap(), log);
        scale.set_extent(min_bound.unwrap_or(min), max_bound.unwrap_or(max));
    }
    scale.nice_extent(config.split_number, fix_min, fix_max);
}

/// Pads an extent by fractions of its span. Log extents are padded in decades.
fn padded_extent((min, max): (f64, f64), (gap_min, gap_max): (f64, f64), log: bool) -> (f64, f64) {
    if log && min > 0.0 && max > 0.0 {
        let (lo, hi) = (min.log10(), max.log10());
        let span = hi - lo;
        return (10_f64.powf(lo - gap_min * span), 10_f64.powf(hi + gap_max * span));
    }
    let span = max - min;
    (min - gap_min * span, max + gap_max * span)
}
