use approx::assert_abs_diff_eq;
use chart_grid::api::{AxisConfig, ChartModel, GridConfig, SeriesConfig, create};
use chart_grid::core::{
    AxisDim, DataPoint, HeuristicTextMeasurer, ListData, ScaleKind, Viewport,
};

fn bar_chart() -> ChartModel {
    ChartModel {
        grid: vec![GridConfig::default()],
        x_axis: vec![AxisConfig::category(["a", "b", "c", "d"])],
        y_axis: vec![AxisConfig::new(ScaleKind::Value)],
        series: vec![SeriesConfig::new(
            "bar",
            ListData::from_values([10.0, 40.0, 25.0, 100.0]),
        )],
    }
}

#[test]
fn band_axis_maps_categories_to_band_centres() {
    let model = bar_chart();
    let layout = create(&model, Viewport::new(800, 600), &HeuristicTextMeasurer).expect("layout");
    let view = layout.series_cartesian(0).expect("bound");

    // Plot area (80, 60, 640, 480): four 160px bands.
    assert_abs_diff_eq!(view.x_axis().band_width(), 160.0, epsilon = 1e-9);
    let (px, py) = view.data_to_point(DataPoint::new(0.0, 0.0)).expect("finite");
    assert_abs_diff_eq!(px, 160.0, epsilon = 1e-9);
    assert_abs_diff_eq!(py, 540.0, epsilon = 1e-9);
    let (px, py) = view.data_to_point(DataPoint::new(3.0, 100.0)).expect("finite");
    assert_abs_diff_eq!(px, 640.0, epsilon = 1e-9);
    assert_abs_diff_eq!(py, 60.0, epsilon = 1e-9);
}

#[test]
fn pixels_map_back_to_data() {
    let model = bar_chart();
    let layout = create(&model, Viewport::new(800, 600), &HeuristicTextMeasurer).expect("layout");
    let view = layout.series_cartesian(0).expect("bound");

    let data = view.point_to_data(400.0, 300.0).expect("finite");
    assert_abs_diff_eq!(data.x, 1.5, epsilon = 1e-9);
    assert_abs_diff_eq!(data.y, 50.0, epsilon = 1e-9);
    assert!(view.contain_point(400.0, 300.0));
    assert!(!view.contain_point(40.0, 300.0));
    assert!(view.contain_data(DataPoint::new(2.0, 75.0)));
    assert!(view.point_to_data(f64::INFINITY, 0.0).is_err());
}

#[test]
fn tick_coordinates_follow_the_pixel_extent() {
    let model = bar_chart();
    let layout = create(&model, Viewport::new(800, 600), &HeuristicTextMeasurer).expect("layout");
    let y = layout.grids()[0].axis(AxisDim::Y, None).expect("y");

    assert_eq!(y.scale().tick_labels(), vec!["0", "20", "40", "60", "80", "100"]);
    let coords = y.tick_coords();
    assert_eq!(coords.len(), 6);
    assert_abs_diff_eq!(coords[0], 540.0, epsilon = 1e-9);
    assert_abs_diff_eq!(coords[5], 60.0, epsilon = 1e-9);
    assert!(coords.windows(2).all(|pair| pair[1] < pair[0]));
}

#[test]
fn horizontal_bars_use_the_category_y_axis_as_base() {
    let model = ChartModel {
        grid: vec![GridConfig::default()],
        x_axis: vec![AxisConfig::new(ScaleKind::Value)],
        y_axis: vec![AxisConfig::category(["north", "south"])],
        series: vec![SeriesConfig::new(
            "bar",
            ListData::from_points([DataPoint::new(12.0, 0.0), DataPoint::new(7.0, 1.0)]),
        )],
    };
    let layout = create(&model, Viewport::new(800, 600), &HeuristicTextMeasurer).expect("layout");
    let view = layout.series_cartesian(0).expect("bound");

    let base = view.base_axis();
    assert_eq!(base.dim(), AxisDim::Y);
    assert_eq!(view.other_axis(base).dim(), AxisDim::X);
    assert_eq!(base.scale().label(1.0), "south");
}

#[test]
fn time_axis_labels_are_calendar_dates() {
    let day = 86_400_000.0;
    let model = ChartModel {
        grid: vec![GridConfig::default()],
        x_axis: vec![AxisConfig::new(ScaleKind::Time).with_scale(true)],
        y_axis: vec![AxisConfig::new(ScaleKind::Value)],
        series: vec![SeriesConfig::new(
            "line",
            ListData::from_points([DataPoint::new(0.0, 1.0), DataPoint::new(4.0 * day, 2.0)]),
        )],
    };
    let layout = create(&model, Viewport::new(800, 600), &HeuristicTextMeasurer).expect("layout");
    let x = layout.grids()[0].axis(AxisDim::X, None).expect("x");

    assert_eq!(x.scale().label(0.0), "1970-01-01");
    assert_eq!(x.scale().label(day), "1970-01-02");
}
