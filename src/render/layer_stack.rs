use serde::{Deserialize, Serialize};

/// Drawing layers of a graph, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    Annotations,
    Grid,
    Title,
    Series,
    Markers,
    Labels,
}

impl CanvasLayerKind {
    /// Stable name used for backend grouping (for example SVG `class`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Annotations => "notes",
            Self::Grid => "rules",
            Self::Title => "title",
            Self::Series => "series",
            Self::Markers => "markers",
            Self::Labels => "labels",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerStack {
    pub layers: Vec<CanvasLayerKind>,
}

impl LayerStack {
    /// Bands sit under the rules so grid lines stay visible through them;
    /// labels are always on top of markers.
    #[must_use]
    pub fn canonical() -> Self {
        Self {
            layers: vec![
                CanvasLayerKind::Annotations,
                CanvasLayerKind::Grid,
                CanvasLayerKind::Title,
                CanvasLayerKind::Series,
                CanvasLayerKind::Markers,
                CanvasLayerKind::Labels,
            ],
        }
    }
}
