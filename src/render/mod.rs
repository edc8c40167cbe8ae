mod frame;
mod layer_stack;
mod null_renderer;
mod primitives;
mod svg_backend;
mod text_measure;

pub use frame::{LayerPrimitives, RenderFrame};
pub use layer_stack::{CanvasLayerKind, LayerStack};
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, LabelPrimitive, LinePrimitive, PolylinePrimitive, RectPrimitive,
    TextHAlign, TextPrimitive,
};
pub use svg_backend::{SvgRenderStats, SvgRenderer, element_dom_id};
pub use text_measure::{HeuristicTextMeasurer, TextExtent, TextMeasurer};

use crate::error::GraphResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from graph layout and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> GraphResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{
    CairoContextRenderer, CairoRenderStats, CairoRenderer, PangoTextMeasurer,
};
