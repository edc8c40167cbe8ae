use std::time::Duration;

use graph_rs::api::{GraphConfig, GraphEngine};
use graph_rs::core::{Annotation, Dataset, ElementId, Point, Viewport};
use graph_rs::render::{
    CanvasLayerKind, Color, RectPrimitive, RenderFrame, Renderer, SvgRenderer, TextHAlign,
    TextPrimitive, element_dom_id,
};

fn engine() -> GraphEngine<SvgRenderer> {
    let dataset = Dataset::new(
        "Temps <daily>",
        vec![Point::new(0, 1.0), Point::new(1_800, 4.0), Point::new(3_600, 2.0)],
    )
    .with_notes(vec![Annotation::new(900, "Door & window")]);
    GraphEngine::new(
        SvgRenderer::new(),
        dataset,
        Viewport::new(480, 320),
        GraphConfig::default(),
    )
    .expect("engine init")
}

#[test]
fn document_has_viewbox_and_stable_ids() {
    let mut engine = engine();
    engine.render(Duration::ZERO).expect("render");
    let svg = engine.renderer().document();

    assert!(svg.starts_with("<svg "));
    assert!(svg.contains(r#"viewBox="0 0 480 320""#));
    assert!(svg.contains(r#"preserveAspectRatio="xMinYMin meet""#));
    for id in ["point-0", "point-2", "note-0", "point-label-1", "note-label-0"] {
        assert!(svg.contains(&format!(r#"id="{id}""#)), "missing id {id}");
    }
    assert!(svg.contains(r#"<path class="line" pointer-events="none""#));
    assert!(svg.trim_end().ends_with("</svg>"));

    let stats = engine.renderer().last_stats();
    assert_eq!(stats.circles_written, 3);
    assert_eq!(stats.labels_written, 4);
    assert_eq!(stats.polylines_written, 1);
}

#[test]
fn text_is_escaped() {
    let mut engine = engine();
    engine.render(Duration::ZERO).expect("render");
    let svg = engine.renderer().document();
    assert!(svg.contains("Temps &lt;daily&gt;"));
    assert!(svg.contains("Door &amp; window"));
    assert!(!svg.contains("Door & window"));
}

#[test]
fn hovered_label_is_opaque() {
    let mut engine = engine();
    engine.hover(ElementId::DataPoint(1), Duration::ZERO);
    engine.render(Duration::from_millis(500)).expect("render");
    let svg = engine.renderer().document();
    assert!(svg.contains(r#"<g id="point-label-1" class="label" pointer-events="none" opacity="1">"#));
    assert!(svg.contains(r#"<g id="point-label-0" class="label" pointer-events="none" opacity="0">"#));
}

#[test]
fn dom_ids_cover_labels_and_elements() {
    assert_eq!(element_dom_id(ElementId::DataPoint(4), false), "point-4");
    assert_eq!(element_dom_id(ElementId::Annotation(1), true), "note-label-1");
}

#[test]
fn invalid_frame_is_rejected() {
    let mut frame = RenderFrame::new(Viewport::new(100, 100), Color::rgb(1.0, 1.0, 1.0));
    frame.push_rect(
        CanvasLayerKind::Grid,
        RectPrimitive::new(0.0, 0.0, -1.0, 10.0, Color::rgb(0.0, 0.0, 0.0)),
    );
    let mut renderer = SvgRenderer::new();
    assert!(renderer.render(&frame).is_err());

    let mut frame = RenderFrame::new(Viewport::new(100, 100), Color::rgb(1.0, 1.0, 1.0));
    frame.push_text(
        CanvasLayerKind::Title,
        TextPrimitive::new(
            "ok",
            50.0,
            20.0,
            12.0,
            Color::rgb(0.0, 0.0, 0.0),
            TextHAlign::Center,
        ),
    );
    renderer.render(&frame).expect("valid frame");
    assert!(renderer.document().contains(r#"text-anchor="middle""#));
}
