use std::time::Duration;

use graph_rs::api::{GraphConfig, GraphEngine, INLINE_DATASET_NAME};
use graph_rs::core::{Dataset, DatasetRegistry, ElementId, Point, TickGranularity, Viewport};
use graph_rs::error::GraphError;
use graph_rs::render::{NullRenderer, SvgRenderer};

const REGISTRY_JSON: &str = r#"{
  "kitchen": {
    "title": "Kitchen temperature",
    "points": [
      {"time": 1300000000, "value": 19.5},
      {"time": 1300001800, "value": 20.0},
      {"time": 1300003600, "value": 21.25}
    ],
    "notes": [{"time": 1300002000, "text": "Oven on"}],
    "range": [0, 0],
    "units": "C"
  }
}"#;

fn registry() -> DatasetRegistry {
    DatasetRegistry::from_json_str(REGISTRY_JSON).expect("registry")
}

#[test]
fn query_string_selects_dataset_and_renders() {
    let registry = registry();
    let mut engine = GraphEngine::from_registry_query(
        NullRenderer::default(),
        &registry,
        "https://example.org/graph.html?kitchen",
        Viewport::new(600, 300),
        GraphConfig::default(),
    )
    .expect("engine init");

    assert_eq!(engine.dataset().title, "Kitchen temperature");
    assert_eq!(
        engine.context().time_axis().granularity,
        TickGranularity::HalfHour
    );
    engine.render(Duration::ZERO).expect("render");
    assert_eq!(engine.renderer().frames_rendered, 1);
    assert_eq!(engine.renderer().last_circle_count, 3);
}

#[test]
fn unknown_query_reports_missing_data() {
    let registry = registry();
    let result = GraphEngine::from_registry_query(
        NullRenderer::default(),
        &registry,
        "?garage",
        Viewport::new(600, 300),
        GraphConfig::default(),
    );
    match result {
        Err(err @ GraphError::DatasetNotFound { .. }) => {
            assert_eq!(err.to_string(), "data not found for \"garage\"");
        }
        other => panic!("expected DatasetNotFound, got {other:?}", other = other.err()),
    }
}

#[test]
fn hovering_then_rendering_svg_shows_label() {
    let registry = registry();
    let mut engine = GraphEngine::from_registry_query(
        SvgRenderer::new(),
        &registry,
        "?kitchen",
        Viewport::new(600, 300),
        GraphConfig::default(),
    )
    .expect("engine init");

    assert!(engine.hover(ElementId::DataPoint(2), Duration::ZERO));
    engine.render(Duration::from_secs(1)).expect("render");
    let svg = engine.renderer().document();
    assert!(svg.contains("21.25 C"));
    assert!(svg.contains("Oven on"));
}

#[test]
fn tiny_viewport_is_rejected() {
    let registry = registry();
    let result = GraphEngine::from_registry_query(
        NullRenderer::default(),
        &registry,
        "?kitchen",
        Viewport::new(30, 30),
        GraphConfig::default(),
    );
    assert!(matches!(result, Err(GraphError::InvalidViewport { .. })));
}

#[test]
fn bare_dataset_errors_use_inline_name() {
    let dataset = Dataset::new("Kitchen temperature", vec![Point::new(10, 1.0), Point::new(5, 2.0)]);
    let result = GraphEngine::new(
        NullRenderer::default(),
        dataset,
        Viewport::new(600, 300),
        GraphConfig::default(),
    );
    match result {
        Err(GraphError::MalformedPoint { dataset, index, .. }) => {
            assert_eq!(dataset, INLINE_DATASET_NAME);
            assert_eq!(index, 1);
        }
        other => panic!("expected MalformedPoint, got {other:?}", other = other.err()),
    }
}
