use std::time::Duration;

use approx::assert_relative_eq;
use graph_rs::api::{GraphConfig, GraphEngine, GraphStyle, Theme};
use graph_rs::core::{Annotation, Dataset, ElementId, Point, Viewport};
use graph_rs::render::{
    CanvasLayerKind, NullRenderer, TextExtent, TextHAlign, TextMeasurer,
};

fn dataset() -> Dataset {
    Dataset::new("Load", vec![Point::new(0, 0.0), Point::new(3_600, 10.0)])
        .with_notes(vec![Annotation::new(1_800, "Restart")])
        .with_units("kW")
}

fn engine(dataset: Dataset) -> GraphEngine<NullRenderer> {
    GraphEngine::new(
        NullRenderer::default(),
        dataset,
        Viewport::new(400, 300),
        GraphConfig::default(),
    )
    .expect("engine init")
}

struct NoMetrics;

impl TextMeasurer for NoMetrics {
    fn measure(&self, _text: &str, _font_size_px: f64) -> Option<TextExtent> {
        None
    }
}

#[test]
fn layers_follow_drawing_order() {
    let frame = engine(dataset()).build_render_frame(Duration::ZERO).expect("frame");
    let kinds: Vec<_> = frame.layers.iter().map(|layer| layer.kind).collect();
    assert_eq!(
        kinds,
        vec![
            CanvasLayerKind::Annotations,
            CanvasLayerKind::Grid,
            CanvasLayerKind::Title,
            CanvasLayerKind::Series,
            CanvasLayerKind::Markers,
            CanvasLayerKind::Labels,
        ]
    );
    assert_eq!(frame.background, GraphStyle::light().background);
}

#[test]
fn grid_has_time_and_value_rules() {
    let frame = engine(dataset()).build_render_frame(Duration::ZERO).expect("frame");
    let grid = frame.layer(CanvasLayerKind::Grid).expect("grid layer");

    // two half-hour rules plus eleven value rules (0..=10)
    assert_eq!(grid.lines.len(), 13);

    let time_texts: Vec<_> = grid
        .texts
        .iter()
        .filter(|text| text.h_align == TextHAlign::Center)
        .collect();
    assert_eq!(
        time_texts.iter().map(|t| t.text.as_str()).collect::<Vec<_>>(),
        vec!["00:00", "00:30"]
    );
    assert_relative_eq!(time_texts[0].x, 40.0);
    assert_relative_eq!(time_texts[1].x, 210.0);
    assert_relative_eq!(time_texts[0].y, 287.1);

    let first_time_rule = grid.lines[0];
    assert_relative_eq!(first_time_rule.y1, 40.0);
    assert_relative_eq!(first_time_rule.y2, 264.0);

    let value_texts: Vec<_> = grid
        .texts
        .iter()
        .filter(|text| text.h_align == TextHAlign::Right)
        .collect();
    assert_eq!(value_texts.len(), 11);
    assert_eq!(value_texts[0].text, "0");
    assert_eq!(value_texts[10].text, "10");
    assert_relative_eq!(value_texts[0].x, 30.0);
    assert_relative_eq!(value_texts[0].y, 268.5);
}

#[test]
fn title_is_centred_above_plot() {
    let frame = engine(dataset()).build_render_frame(Duration::ZERO).expect("frame");
    let title = &frame.layer(CanvasLayerKind::Title).expect("title").texts[0];
    assert_eq!(title.text, "Load");
    assert_relative_eq!(title.x, 190.0);
    assert_relative_eq!(title.y, 25.0);

    let untitled = Dataset::new("", vec![Point::new(0, 1.0), Point::new(60, 2.0)]);
    let frame = engine(untitled).build_render_frame(Duration::ZERO).expect("frame");
    assert!(frame.layer(CanvasLayerKind::Title).expect("title").is_empty());
}

#[test]
fn series_markers_and_bands_carry_element_ids() {
    let frame = engine(dataset()).build_render_frame(Duration::ZERO).expect("frame");

    let series = frame.layer(CanvasLayerKind::Series).expect("series");
    assert_eq!(series.polylines[0].points, vec![(40.0, 265.0), (380.0, 40.0)]);

    let markers = frame.layer(CanvasLayerKind::Markers).expect("markers");
    let ids: Vec<_> = markers.circles.iter().map(|circle| circle.element).collect();
    assert_eq!(
        ids,
        vec![Some(ElementId::DataPoint(0)), Some(ElementId::DataPoint(1))]
    );
    assert_eq!(markers.circles[0].radius, 3.5);
    assert_eq!(markers.circles[0].fill_color, GraphStyle::light().marker.idle_fill);

    let bands = frame.layer(CanvasLayerKind::Annotations).expect("bands");
    let band = bands.rects[0];
    assert_eq!(band.element, Some(ElementId::Annotation(0)));
    assert_relative_eq!(band.x, 207.0);
    assert_relative_eq!(band.width, 6.0);
    assert_relative_eq!(band.height, 225.0);
}

#[test]
fn labels_start_hidden_and_appear_on_hover() {
    let mut engine = engine(dataset());
    let frame = engine.build_render_frame(Duration::ZERO).expect("frame");
    let labels: Vec<_> = frame.labels().collect();
    assert_eq!(labels.len(), 3);
    assert_eq!(labels[0].element, ElementId::Annotation(0));
    assert_eq!(labels[0].text.text, "00:30: Restart");
    assert_eq!(labels[1].text.text, "00:00: 0 kW");
    assert!(labels.iter().all(|label| label.opacity == 0.0));

    engine.hover(ElementId::DataPoint(1), Duration::ZERO);
    engine.render(Duration::from_millis(150)).expect("render");
    assert_eq!(engine.renderer().last_visible_label_count, 1);
    assert_eq!(engine.renderer().frames_rendered, 1);

    let frame = engine
        .build_render_frame(Duration::from_millis(150))
        .expect("frame");
    let label = frame
        .labels()
        .find(|label| label.element == ElementId::DataPoint(1))
        .expect("label");
    assert_eq!(label.opacity, 1.0);
    assert_relative_eq!(label.text.y, 25.0);
    let plot_right = 380.0;
    assert!(label.background.x + label.background.width <= plot_right + 5.0 + 1e-9);
}

#[test]
fn unmeasurable_labels_are_skipped() {
    let mut engine = GraphEngine::with_measurer(
        NullRenderer::default(),
        dataset(),
        Viewport::new(400, 300),
        GraphConfig::default(),
        NoMetrics,
    )
    .expect("engine init");

    assert!(
        engine
            .context()
            .point_labels()
            .iter()
            .all(|label| !label.is_placeable())
    );
    engine.hover(ElementId::DataPoint(0), Duration::ZERO);
    let frame = engine
        .build_render_frame(Duration::from_millis(150))
        .expect("frame");
    assert_eq!(frame.labels().count(), 0);
    assert_eq!(frame.circles().count(), 2);
}

#[test]
fn dark_theme_changes_palette() {
    let engine = GraphEngine::new(
        NullRenderer::default(),
        dataset(),
        Viewport::new(400, 300),
        GraphConfig::default().with_theme(Theme::Dark),
    )
    .expect("engine init");
    let frame = engine.build_render_frame(Duration::ZERO).expect("frame");
    assert_eq!(frame.background, GraphStyle::dark().background);
    assert_ne!(frame.background, GraphStyle::light().background);
}

#[test]
fn extreme_finite_values_still_render() {
    let dataset = Dataset::new(
        "Extremes",
        vec![Point::new(0, -1.0e308), Point::new(3_600, 1.0e308)],
    );
    let mut engine = engine(dataset);
    engine.render(Duration::ZERO).expect("render");
    assert_eq!(engine.renderer().last_circle_count, 2);

    let frame = engine.build_render_frame(Duration::ZERO).expect("frame");
    let grid = frame.layer(CanvasLayerKind::Grid).expect("grid layer");
    assert!(!grid.lines.is_empty());
    assert!(grid.lines.iter().all(|line| line.y1.is_finite() && line.y2.is_finite()));
}
