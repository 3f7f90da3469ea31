use chart_grid::api::{AxisConfig, ChartModel, GridConfig, GridValidity, SeriesConfig, create};
use chart_grid::core::{
    AxisDim, AxisPosition, CartesianKey, GridIndex, HeuristicTextMeasurer, ListData, ScaleKind,
    Viewport,
};

fn build(model: &ChartModel) -> chart_grid::ChartLayout {
    create(model, Viewport::new(800, 600), &HeuristicTextMeasurer).expect("layout")
}

#[test]
fn unset_positions_default_to_bottom_and_left() {
    let model = ChartModel {
        grid: vec![GridConfig::default()],
        x_axis: vec![AxisConfig::new(ScaleKind::Value)],
        y_axis: vec![AxisConfig::new(ScaleKind::Value)],
        ..ChartModel::default()
    };
    let layout = build(&model);
    let grid = &layout.grids()[0];

    assert_eq!(grid.name(), "grid_0");
    assert!(grid.is_valid());
    let x = grid.axis(AxisDim::X, Some(0)).expect("x0");
    let y = grid.axis(AxisDim::Y, Some(0)).expect("y0");
    assert_eq!(x.position(), AxisPosition::Bottom);
    assert_eq!(y.position(), AxisPosition::Left);
}

#[test]
fn second_axis_on_contested_side_flips() {
    let model = ChartModel {
        grid: vec![GridConfig::default()],
        x_axis: vec![
            AxisConfig::new(ScaleKind::Value).with_position(AxisPosition::Bottom),
            AxisConfig::new(ScaleKind::Value).with_position(AxisPosition::Bottom),
        ],
        y_axis: vec![
            AxisConfig::new(ScaleKind::Value).with_position(AxisPosition::Right),
            AxisConfig::new(ScaleKind::Value).with_position(AxisPosition::Right),
        ],
        ..ChartModel::default()
    };
    let layout = build(&model);
    let grid = &layout.grids()[0];

    let side = |dim, index| grid.axis(dim, Some(index)).expect("axis").position();
    assert_eq!(side(AxisDim::X, 0), AxisPosition::Bottom);
    assert_eq!(side(AxisDim::X, 1), AxisPosition::Top);
    assert_eq!(side(AxisDim::Y, 0), AxisPosition::Right);
    assert_eq!(side(AxisDim::Y, 1), AxisPosition::Left);
}

#[test]
fn third_axis_on_contested_side_reuses_flipped_side() {
    let model = ChartModel {
        grid: vec![GridConfig::default()],
        x_axis: vec![AxisConfig::new(ScaleKind::Value); 3],
        y_axis: vec![AxisConfig::new(ScaleKind::Value)],
        ..ChartModel::default()
    };
    let layout = build(&model);
    let grid = &layout.grids()[0];

    let sides: Vec<AxisPosition> = (0..3)
        .map(|index| grid.axis(AxisDim::X, Some(index)).expect("axis").position())
        .collect();
    assert_eq!(
        sides,
        vec![AxisPosition::Bottom, AxisPosition::Top, AxisPosition::Top]
    );
}

#[test]
fn positions_of_the_wrong_orientation_fall_back_to_defaults() {
    let model = ChartModel::from_json_str(
        r#"{
            "x_axis": [{"position": "left"}],
            "y_axis": [{"position": "bottom"}]
        }"#,
    )
    .expect("options");
    let layout = build(&model);
    let grid = &layout.grids()[0];

    assert_eq!(
        grid.axis(AxisDim::X, None).expect("x").position(),
        AxisPosition::Bottom
    );
    assert_eq!(
        grid.axis(AxisDim::Y, None).expect("y").position(),
        AxisPosition::Left
    );
}

#[test]
fn axes_keep_global_indices_across_grids() {
    let model = ChartModel {
        grid: vec![GridConfig::default(), GridConfig::default()],
        x_axis: vec![
            AxisConfig::new(ScaleKind::Value),
            AxisConfig::new(ScaleKind::Value).with_grid_index(1),
            AxisConfig::new(ScaleKind::Value),
        ],
        y_axis: vec![
            AxisConfig::new(ScaleKind::Value).with_grid_index(1),
            AxisConfig::new(ScaleKind::Value),
        ],
        ..ChartModel::default()
    };
    let layout = build(&model);
    let first = layout.grid(GridIndex::new(0)).expect("grid 0");
    let second = layout.grid(GridIndex::new(1)).expect("grid 1");

    assert!(first.axis(AxisDim::X, Some(0)).is_some());
    assert!(first.axis(AxisDim::X, Some(1)).is_none());
    assert_eq!(
        first.axis(AxisDim::X, Some(2)).expect("x2").position(),
        AxisPosition::Top
    );
    assert_eq!(first.axis(AxisDim::Y, None).expect("y").index(), 1);

    assert_eq!(
        second.axis(AxisDim::X, None).expect("x1").position(),
        AxisPosition::Bottom
    );
    assert_eq!(second.name(), "grid_1");

    let keys: Vec<CartesianKey> = first.cartesians().map(|view| view.key()).collect();
    assert_eq!(keys, vec![CartesianKey::new(0, 1), CartesianKey::new(2, 1)]);
    assert!(second.cartesian(1, 0).is_some());
}

#[test]
fn every_axis_pair_forms_a_cartesian() {
    let model = ChartModel {
        grid: vec![GridConfig::default()],
        x_axis: vec![AxisConfig::new(ScaleKind::Value); 2],
        y_axis: vec![AxisConfig::new(ScaleKind::Value); 2],
        ..ChartModel::default()
    };
    let layout = build(&model);
    let grid = &layout.grids()[0];

    assert_eq!(grid.axis_count(), 4);
    assert_eq!(grid.cartesian_count(), 4);
    let keys: Vec<String> = grid.cartesians().map(|view| view.key().to_string()).collect();
    assert_eq!(keys, vec!["x0y0", "x0y1", "x1y0", "x1y1"]);
    for view in grid.cartesians() {
        assert_eq!(view.grid(), grid.index());
        assert_eq!(view.x_axis().index(), view.key().x_index);
        assert_eq!(view.y_axis().index(), view.key().y_index);
    }
}

#[test]
fn grid_without_y_axes_rolls_back_to_empty() {
    let model = ChartModel {
        grid: vec![GridConfig::default()],
        x_axis: vec![AxisConfig::new(ScaleKind::Value)],
        y_axis: vec![AxisConfig::new(ScaleKind::Value).with_grid_index(3)],
        series: vec![SeriesConfig::new("line", ListData::from_values([1.0, 2.0]))],
    };
    let layout = build(&model);
    let grid = &layout.grids()[0];

    assert!(!grid.is_valid());
    assert_eq!(
        grid.validity(),
        GridValidity::MissingAxes {
            x_axes: 1,
            y_axes: 0
        }
    );
    assert_eq!(grid.axis_count(), 0);
    assert_eq!(grid.cartesian_count(), 0);
    assert!(grid.axis(AxisDim::X, Some(0)).is_none());
    assert!(grid.cartesian(0, 0).is_none());
    assert!(layout.series_binding(0).is_none());
}
