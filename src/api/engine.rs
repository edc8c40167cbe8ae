use std::time::Duration;

use tracing::debug;

use crate::core::{Dataset, DatasetRegistry, ElementId, Viewport, dataset_name_from_query};
use crate::error::GraphResult;
use crate::interaction::InteractionState;
#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;
use crate::render::{HeuristicTextMeasurer, RenderFrame, Renderer, TextMeasurer};

use super::frame_builder::build_render_frame;
use super::render_context::RenderContext;
use super::GraphConfig;

/// Name reported in dataset errors for engines built from a bare [`Dataset`].
pub const INLINE_DATASET_NAME: &str = "inline";

/// One interactive graph bound to a renderer.
///
/// The render context is rebuilt only on resize; hover events mutate the
/// interaction state alone. Time is passed in by the host as a monotonic
/// offset, so the engine never reads a clock.
pub struct GraphEngine<R: Renderer> {
    renderer: R,
    measurer: Box<dyn TextMeasurer>,
    context: RenderContext,
    interaction: InteractionState,
}

impl<R: Renderer> GraphEngine<R> {
    /// Builds an engine that measures label text with the heuristic measurer.
    pub fn new(
        renderer: R,
        dataset: Dataset,
        viewport: Viewport,
        config: GraphConfig,
    ) -> GraphResult<Self> {
        Self::with_measurer(
            renderer,
            dataset,
            viewport,
            config,
            HeuristicTextMeasurer::default(),
        )
    }

    /// Builds an engine with its own text measurer. Dataset errors report
    /// the name [`INLINE_DATASET_NAME`].
    pub fn with_measurer(
        renderer: R,
        dataset: Dataset,
        viewport: Viewport,
        config: GraphConfig,
        measurer: impl TextMeasurer + 'static,
    ) -> GraphResult<Self> {
        Self::build(
            renderer,
            INLINE_DATASET_NAME,
            dataset,
            viewport,
            config,
            Box::new(measurer),
        )
    }

    /// Resolves the dataset named by a page query string (`?name`) and
    /// builds an engine for it.
    pub fn from_registry_query(
        renderer: R,
        registry: &DatasetRegistry,
        query: &str,
        viewport: Viewport,
        config: GraphConfig,
    ) -> GraphResult<Self> {
        let dataset = registry.resolve_query(query)?.clone();
        Self::build(
            renderer,
            dataset_name_from_query(query),
            dataset,
            viewport,
            config,
            Box::new(HeuristicTextMeasurer::default()),
        )
    }

    fn build(
        renderer: R,
        name: &str,
        dataset: Dataset,
        viewport: Viewport,
        config: GraphConfig,
        measurer: Box<dyn TextMeasurer>,
    ) -> GraphResult<Self> {
        config.validate()?;
        dataset.validate(name)?;

        let context = RenderContext::build(dataset, viewport, config, measurer.as_ref())?;
        let style = context.style();
        let interaction = InteractionState::new(
            context.dataset().points.len(),
            context.dataset().notes.len(),
            style.marker,
            style.band,
            config.transitions,
        );
        debug!(
            dataset = name,
            title = %context.dataset().title,
            points = context.dataset().points.len(),
            notes = context.dataset().notes.len(),
            granularity = ?context.time_axis().granularity,
            "graph engine initialized"
        );

        Ok(Self {
            renderer,
            measurer,
            context,
            interaction,
        })
    }

    #[must_use]
    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    #[must_use]
    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.context.viewport()
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        self.context.dataset()
    }

    #[must_use]
    pub fn config(&self) -> GraphConfig {
        self.context.config()
    }

    /// Lays the graph out again for `viewport`, keeping every element's
    /// hover state and in-flight transitions.
    pub fn resize(&mut self, viewport: Viewport) -> GraphResult<()> {
        if viewport == self.viewport() {
            return Ok(());
        }
        self.context = self.context.resized(viewport, self.measurer.as_ref())?;
        debug!(width = viewport.width, height = viewport.height, "graph reflowed");
        Ok(())
    }

    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<ElementId> {
        self.context.hit_test(x, y)
    }

    /// Pointer moved to `(x, y)` in surface pixels. Returns whether any
    /// element changed hover state.
    pub fn pointer_move(&mut self, x: f64, y: f64, now: Duration) -> bool {
        let target = self.context.hit_test(x, y);
        self.interaction.set_pointer_target(target, now)
    }

    /// Pointer left the surface.
    pub fn pointer_leave(&mut self, now: Duration) -> bool {
        self.interaction.pointer_leave(now)
    }

    pub fn hover(&mut self, target: ElementId, now: Duration) -> bool {
        self.interaction.hover(target, now)
    }

    pub fn unhover(&mut self, target: ElementId, now: Duration) -> bool {
        self.interaction.unhover(target, now)
    }

    /// Whether frames rendered after `now` would still differ.
    #[must_use]
    pub fn is_animating(&self, now: Duration) -> bool {
        self.interaction.is_animating(now)
    }

    pub fn build_render_frame(&self, now: Duration) -> GraphResult<RenderFrame> {
        build_render_frame(&self.context, &self.interaction, now)
    }

    pub fn render(&mut self, now: Duration) -> GraphResult<()> {
        let frame = self.build_render_frame(now)?;
        self.renderer.render(&frame)
    }

    /// Renders the frame into an external cairo context, as a GTK draw
    /// callback does.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(
        &mut self,
        context: &cairo::Context,
        now: Duration,
    ) -> GraphResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_render_frame(now)?;
        self.renderer.render_on_cairo_context(context, &frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
