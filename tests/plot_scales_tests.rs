use approx::assert_relative_eq;
use graph_rs::core::{LinearScale, PlotRect, PlotScales, Point};
use graph_rs::error::{GraphError, ScaleAxis};

fn plot() -> PlotRect {
    PlotRect::new(40.0, 40.0, 340.0, 225.0)
}

#[test]
fn explicit_range_overrides_point_extrema() {
    let points = [Point::new(0, 10.0), Point::new(3_600, 20.0)];
    let scales = PlotScales::build(&points, Some((0.0, 100.0)), plot()).expect("scales");

    assert_relative_eq!(scales.value_to_y(0.0), 265.0);
    assert_relative_eq!(scales.value_to_y(100.0), 40.0);
    assert_relative_eq!(scales.value_to_y(10.0), 242.5);
    assert_eq!(scales.extent().min_value, 0.0);
    assert_eq!(scales.extent().max_value, 100.0);
}

#[test]
fn data_extent_spans_the_plot() {
    let points = [
        Point::new(1_000, 3.0),
        Point::new(2_000, -1.0),
        Point::new(5_000, 7.0),
    ];
    let scales = PlotScales::build(&points, None, plot()).expect("scales");

    assert_relative_eq!(scales.time_to_x(1_000), 40.0);
    assert_relative_eq!(scales.time_to_x(5_000), 380.0);
    assert_relative_eq!(scales.time_to_x(3_000), 210.0);
    assert_relative_eq!(scales.value_to_y(-1.0), 265.0);
    assert_relative_eq!(scales.value_to_y(7.0), 40.0);
    assert!(!scales.is_degenerate(ScaleAxis::Time));
    assert!(!scales.is_degenerate(ScaleAxis::Value));
}

#[test]
fn single_point_renders_in_plot_centre() {
    let points = [Point::new(1_700_000_000, 42.0)];
    let scales = PlotScales::build(&points, None, plot()).expect("scales");

    assert!(scales.is_degenerate(ScaleAxis::Time));
    assert!(scales.is_degenerate(ScaleAxis::Value));
    assert_relative_eq!(scales.time_to_x(1_700_000_000), 210.0);
    assert_relative_eq!(scales.value_to_y(42.0), 152.5);
}

#[test]
fn flat_series_is_a_horizontal_line_at_mid_height() {
    let points = [Point::new(0, 5.0), Point::new(600, 5.0), Point::new(1_200, 5.0)];
    let scales = PlotScales::build(&points, None, plot()).expect("scales");

    assert!(!scales.is_degenerate(ScaleAxis::Time));
    assert!(scales.is_degenerate(ScaleAxis::Value));
    for point in points {
        assert_relative_eq!(scales.value_to_y(point.value), 152.5);
    }
}

#[test]
fn strict_scale_rejects_zero_width_domain() {
    let err = LinearScale::new(ScaleAxis::Value, (3.0, 3.0), (0.0, 100.0))
        .expect_err("degenerate domain");
    assert!(matches!(
        err,
        GraphError::DegenerateScale {
            axis: ScaleAxis::Value
        }
    ));
}

#[test]
fn inverted_scale_maps_back() {
    let scale = LinearScale::new(ScaleAxis::Value, (0.0, 50.0), (200.0, 0.0)).expect("scale");
    assert_relative_eq!(scale.map(10.0), 160.0);
    assert_relative_eq!(scale.invert(160.0), 10.0);

    let constant = LinearScale::centered(7.0, (0.0, 10.0)).expect("scale");
    assert_relative_eq!(constant.map(1_000.0), 5.0);
    assert_relative_eq!(constant.invert(3.0), 7.0);
}

#[test]
fn scales_need_points() {
    assert!(matches!(
        PlotScales::build(&[], None, plot()),
        Err(GraphError::InvalidData(_))
    ));
}

#[test]
fn values_spanning_most_of_f64_map_inside_plot() {
    let points = [Point::new(0, -1.0e308), Point::new(3_600, 1.0e308)];
    let scales = PlotScales::build(&points, None, plot()).expect("scales");

    assert!(!scales.is_degenerate(ScaleAxis::Value));
    assert_relative_eq!(scales.value_to_y(-1.0e308), 265.0);
    assert_relative_eq!(scales.value_to_y(1.0e308), 40.0);
    assert_relative_eq!(scales.value_to_y(0.0), 152.5);
}
