use std::f64::consts::TAU;
use std::io::Write;

use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;

use crate::error::{GraphError, GraphResult};
use crate::render::{
    Color, LabelPrimitive, LayerPrimitives, RectPrimitive, RenderFrame, Renderer, TextExtent,
    TextHAlign, TextMeasurer, TextPrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub circles_drawn: usize,
    pub texts_drawn: usize,
    pub labels_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> GraphResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// Renders either offscreen into an image surface through `Renderer::render`
/// or in place on an external Cairo context through `CairoContextRenderer`.
/// Labels with zero opacity are skipped.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> GraphResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(GraphError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Encodes the offscreen surface as PNG.
    pub fn write_png<W: Write>(&self, writer: &mut W) -> GraphResult<()> {
        self.surface
            .write_to_png(writer)
            .map_err(|err| GraphError::InvalidData(format!("failed to encode png: {err}")))
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> GraphResult<()> {
        frame.validate()?;

        apply_color(context, frame.background);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();
        for layer in &frame.layers {
            draw_layer(context, layer, &mut stats)?;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> GraphResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> GraphResult<()> {
        self.render_with_context(context, frame)
    }
}

/// Measures text with Pango on a scratch surface.
#[derive(Debug)]
pub struct PangoTextMeasurer {
    context: Context,
}

impl PangoTextMeasurer {
    pub fn new() -> GraphResult<Self> {
        let surface = ImageSurface::create(Format::ARgb32, 1, 1)
            .map_err(|err| map_backend_error("failed to create measuring surface", err))?;
        let context = Context::new(&surface)
            .map_err(|err| map_backend_error("failed to create measuring context", err))?;
        Ok(Self { context })
    }
}

impl TextMeasurer for PangoTextMeasurer {
    fn measure(&self, text: &str, font_size_px: f64) -> Option<TextExtent> {
        if text.is_empty() || !font_size_px.is_finite() || font_size_px <= 0.0 {
            return None;
        }
        let layout = text_layout(&self.context, text, font_size_px);
        let (_ink, logical) = layout.pixel_extents();
        let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);
        Some(TextExtent {
            width: f64::from(logical.width()),
            ascent: baseline,
            descent: (f64::from(logical.height()) - baseline).max(0.0),
        })
    }
}

fn draw_layer(
    context: &Context,
    layer: &LayerPrimitives,
    stats: &mut CairoRenderStats,
) -> GraphResult<()> {
    for rect in &layer.rects {
        draw_rect(context, rect)?;
        stats.rects_drawn += 1;
    }

    for line in &layer.lines {
        apply_color(context, line.color);
        context.set_line_width(line.stroke_width);
        context.move_to(line.x1, line.y1);
        context.line_to(line.x2, line.y2);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke line", err))?;
        stats.lines_drawn += 1;
    }

    for polyline in &layer.polylines {
        let mut points = polyline.points.iter();
        if let Some((x, y)) = points.next() {
            context.move_to(*x, *y);
            for (x, y) in points {
                context.line_to(*x, *y);
            }
            apply_color(context, polyline.color);
            context.set_line_width(polyline.stroke_width);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke polyline", err))?;
            stats.lines_drawn += 1;
        }
    }

    for circle in &layer.circles {
        context.new_sub_path();
        context.arc(circle.cx, circle.cy, circle.radius, 0.0, TAU);
        apply_color(context, circle.fill_color);
        if circle.stroke_width > 0.0 {
            context
                .fill_preserve()
                .map_err(|err| map_backend_error("failed to fill circle", err))?;
            apply_color(context, circle.stroke_color);
            context.set_line_width(circle.stroke_width);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke circle", err))?;
        } else {
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill circle", err))?;
        }
        stats.circles_drawn += 1;
    }

    for text in &layer.texts {
        draw_text(context, text)?;
        stats.texts_drawn += 1;
    }

    for label in layer.labels.iter().filter(|label| label.is_visible()) {
        draw_label(context, label)?;
        stats.labels_drawn += 1;
    }

    Ok(())
}

fn draw_rect(context: &Context, rect: &RectPrimitive) -> GraphResult<()> {
    context.rectangle(rect.x, rect.y, rect.width, rect.height);
    apply_color(context, rect.fill_color);
    if rect.border_width > 0.0 {
        context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
        apply_color(context, rect.border_color);
        context.set_line_width(rect.border_width);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke rectangle border", err))?;
    } else {
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
    }
    Ok(())
}

fn draw_text(context: &Context, text: &TextPrimitive) -> GraphResult<()> {
    let layout = text_layout(context, &text.text, text.font_size_px);
    let (_ink, logical) = layout.pixel_extents();
    let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);
    let width = f64::from(logical.width());
    let x = match text.h_align {
        TextHAlign::Left => text.x,
        TextHAlign::Center => text.x - width / 2.0,
        TextHAlign::Right => text.x - width,
    };

    apply_color(context, text.color);
    context.move_to(x, text.y - baseline);
    pangocairo::functions::show_layout(context, &layout);
    Ok(())
}

fn draw_label(context: &Context, label: &LabelPrimitive) -> GraphResult<()> {
    paint_group_with_alpha(context, label.opacity, |context| {
        draw_rect(context, &label.background)?;
        draw_text(context, &label.text)
    })
}

/// Draws into a temporary group and paints it at `opacity`. The group is
/// popped even when `draw` fails.
fn paint_group_with_alpha(
    context: &Context,
    opacity: f64,
    draw: impl FnOnce(&Context) -> GraphResult<()>,
) -> GraphResult<()> {
    context.push_group();
    let drawn = draw(context);
    let composed = context
        .pop_group_to_source()
        .map_err(|err| map_backend_error("failed to compose label", err));
    drawn?;
    composed?;
    context
        .paint_with_alpha(opacity)
        .map_err(|err| map_backend_error("failed to paint label", err))
}

fn text_layout(context: &Context, text: &str, font_size_px: f64) -> pango::Layout {
    let layout = pangocairo::functions::create_layout(context);
    let mut font_description = FontDescription::from_string("Sans");
    font_description.set_absolute_size(font_size_px * f64::from(pango::SCALE));
    layout.set_font_description(Some(&font_description));
    layout.set_text(text);
    layout
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> GraphError {
    GraphError::InvalidData(format!("{prefix}: {err}"))
}
