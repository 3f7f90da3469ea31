use chart_grid::api::{
    AxisConfig, ChartModel, CoordinateSystemKind, CoordinateSystemRegistry, GridConfig,
    GridLayoutSnapshot, LayoutContext, SeriesBinding, SeriesConfig, create,
};
use chart_grid::core::{
    AxisDim, CartesianKey, GridIndex, HeuristicTextMeasurer, LayoutRect, ListData, ScaleKind,
    Viewport,
};

fn two_grid_model() -> ChartModel {
    ChartModel {
        grid: vec![GridConfig::default(), GridConfig::default()],
        x_axis: vec![
            AxisConfig::new(ScaleKind::Value),
            AxisConfig::new(ScaleKind::Value).with_grid_index(1),
        ],
        y_axis: vec![
            AxisConfig::new(ScaleKind::Value),
            AxisConfig::new(ScaleKind::Value).with_grid_index(1),
        ],
        series: vec![
            SeriesConfig::new("line", ListData::from_values([1.0, 2.0])).with_axes(0, 0),
            SeriesConfig::new("line", ListData::from_values([3.0, 4.0])).with_axes(1, 1),
            SeriesConfig::new("line", ListData::from_values([5.0, 6.0])).with_axes(0, 1),
        ],
    }
}

#[test]
fn series_bind_to_the_cartesian_of_their_axes() {
    let model = two_grid_model();
    let layout = create(&model, Viewport::new(800, 600), &HeuristicTextMeasurer).expect("layout");

    assert_eq!(layout.grids().len(), 2);
    assert_eq!(
        layout.series_binding(0),
        Some(SeriesBinding {
            grid: GridIndex::new(0),
            cartesian: CartesianKey::new(0, 0),
        })
    );
    assert_eq!(
        layout.series_binding(1),
        Some(SeriesBinding {
            grid: GridIndex::new(1),
            cartesian: CartesianKey::new(1, 1),
        })
    );
    let view = layout.series_cartesian(1).expect("bound series");
    assert_eq!(view.x_axis().index(), 1);
    assert_eq!(view.y_axis().index(), 1);
}

#[test]
fn series_spanning_two_grids_stays_unbound() {
    let model = two_grid_model();
    let layout = create(&model, Viewport::new(800, 600), &HeuristicTextMeasurer).expect("layout");
    assert!(layout.series_binding(2).is_none());
    assert!(layout.series_cartesian(2).is_none());

    // The stray series contributes to neither grid.
    let y1 = layout.grids()[1].axis(AxisDim::Y, Some(1)).expect("y1");
    assert_eq!(y1.data_extent(), Some((3.0, 4.0)));
}

#[test]
fn series_with_unknown_axis_index_stays_unbound() {
    let model = ChartModel {
        grid: vec![GridConfig::default()],
        x_axis: vec![AxisConfig::new(ScaleKind::Value); 2],
        y_axis: vec![AxisConfig::new(ScaleKind::Value)],
        series: vec![
            SeriesConfig::new("scatter", ListData::from_values([1.0])).with_axes(2, 0),
            SeriesConfig::new("scatter", ListData::from_values([1.0])).with_axes(1, 0),
        ],
    };
    let layout = create(&model, Viewport::new(800, 600), &HeuristicTextMeasurer).expect("layout");

    assert_eq!(layout.series_count(), 2);
    assert!(layout.series_binding(0).is_none());
    assert!(layout.series_binding(1).is_some());
}

#[test]
fn non_cartesian_series_are_left_alone() {
    let mut model = two_grid_model();
    model.series[0] = model.series[0]
        .clone()
        .with_coordinate_system(CoordinateSystemKind::Polar);
    let layout = create(&model, Viewport::new(800, 600), &HeuristicTextMeasurer).expect("layout");
    assert!(layout.series_binding(0).is_none());
}

#[test]
fn json_options_build_a_bound_layout() {
    let model = ChartModel::from_json_str(
        r#"{
            "grid": [{"left": "10%", "top": 40, "right": "10%", "bottom": 40}],
            "x_axis": [{"type": "category", "data": ["Mon", "Tue", "Wed"]}],
            "y_axis": [{"type": "value", "axis_line": {"on_zero": false}}],
            "series": [{"type": "bar", "name": "visits", "data": [120, null, 150]}]
        }"#,
    )
    .expect("options");
    let layout = create(&model, Viewport::new(1000, 400), &HeuristicTextMeasurer).expect("layout");
    let grid = &layout.grids()[0];

    assert_eq!(grid.rect(), LayoutRect::new(100.0, 40.0, 800.0, 320.0));
    let view = layout.series_cartesian(0).expect("bound");
    assert_eq!(view.base_axis().dim(), AxisDim::X);
    assert_eq!(view.x_axis().scale().categories().len(), 3);
    assert!(!view.y_axis().on_zero());
    assert_eq!(view.y_axis().scale().extent(), (0.0, 150.0));
}

#[test]
fn unparsable_options_are_config_errors() {
    let err = ChartModel::from_json_str(r#"{"grid": [{"left": "wide"}]}"#).expect_err("bad length");
    assert!(err.to_string().contains("invalid config"));
}

#[test]
fn registry_dispatches_to_the_cartesian_factory() {
    let model = two_grid_model();
    let measurer = HeuristicTextMeasurer;
    let context = LayoutContext::new(Viewport::new(800, 600), &measurer);
    let registry = CoordinateSystemRegistry::default();

    let via_registry = registry
        .create(CoordinateSystemKind::Cartesian2d, &model, &context)
        .expect("layout");
    let direct = create(&model, Viewport::new(800, 600), &measurer).expect("layout");
    assert_eq!(via_registry, direct);
    assert!(
        CoordinateSystemRegistry::new()
            .create(CoordinateSystemKind::Cartesian2d, &model, &context)
            .is_err()
    );
}

#[test]
fn snapshot_json_contract_round_trips() {
    let model = two_grid_model();
    let layout = create(&model, Viewport::new(800, 600), &HeuristicTextMeasurer).expect("layout");
    let snapshot = layout.snapshot();

    assert_eq!(snapshot.grids[0].name, "grid_0");
    assert_eq!(snapshot.grids[1].cartesians, vec![CartesianKey::new(1, 1)]);
    assert_eq!(snapshot.series.len(), 3);
    assert!(snapshot.series[2].is_none());

    let json = snapshot.to_json_contract_v1_pretty().expect("serialize");
    assert!(json.contains("\"schema_version\": 1"));
    let parsed = GridLayoutSnapshot::from_json_compat_str(&json).expect("parse contract");
    assert_eq!(parsed, snapshot);

    let bare = snapshot.to_json_pretty().expect("serialize");
    let parsed = GridLayoutSnapshot::from_json_compat_str(&bare).expect("parse bare");
    assert_eq!(parsed, snapshot);
}
