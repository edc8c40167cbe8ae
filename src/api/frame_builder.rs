use std::time::Duration;

use crate::core::{ElementId, TimeFormatContext, format_time, format_value_tick};
use crate::error::GraphResult;
use crate::interaction::{ElementVisuals, InteractionState};
use crate::render::{
    CanvasLayerKind, CirclePrimitive, Color, LabelPrimitive, LinePrimitive, PolylinePrimitive,
    RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
};

use super::label_layout::PlacedLabel;
use super::render_context::RenderContext;

/// Baseline shift of time-axis text, in ems.
const TIME_RULE_TEXT_DY_EM: f64 = 0.71;
/// Baseline shift of value-axis text, in ems.
const VALUE_RULE_TEXT_DY_EM: f64 = 0.35;

/// Builds the frame for `context` with hover visuals sampled at `now`.
pub fn build_render_frame(
    context: &RenderContext,
    interaction: &InteractionState,
    now: Duration,
) -> GraphResult<RenderFrame> {
    let style = context.style();
    let mut frame = RenderFrame::new(context.viewport(), style.background);

    push_annotation_bands(&mut frame, context, interaction, now);
    push_time_rules(&mut frame, context);
    push_value_rules(&mut frame, context);
    push_title(&mut frame, context);
    push_series(&mut frame, context, interaction, now);
    push_labels(&mut frame, context.note_labels(), context, interaction, now);
    push_labels(&mut frame, context.point_labels(), context, interaction, now);

    frame.validate()?;
    Ok(frame)
}

fn visuals_or_idle(
    interaction: &InteractionState,
    element: ElementId,
    now: Duration,
    idle_fill: Color,
    idle_stroke: Color,
) -> ElementVisuals {
    interaction
        .visuals(element, now)
        .unwrap_or(ElementVisuals {
            fill: idle_fill,
            stroke: idle_stroke,
            label_opacity: 0.0,
        })
}

fn push_annotation_bands(
    frame: &mut RenderFrame,
    context: &RenderContext,
    interaction: &InteractionState,
    now: Duration,
) {
    let scales = context.scales();
    let plot = scales.plot();
    let markers = context.config().markers;
    let palette = context.style().band;

    for (index, note) in context.dataset().notes.iter().enumerate() {
        let element = ElementId::Annotation(index);
        let visuals =
            visuals_or_idle(interaction, element, now, palette.idle_fill, palette.idle_stroke);
        let band = RectPrimitive::new(
            scales.time_to_x(note.time) - 0.5 * markers.band_width,
            plot.top,
            markers.band_width,
            plot.height,
            visuals.fill,
        )
        .with_border(markers.band_border_width, visuals.stroke)
        .with_element(element);
        frame.push_rect(CanvasLayerKind::Annotations, band);
    }
}

fn push_time_rules(frame: &mut RenderFrame, context: &RenderContext) {
    let scales = context.scales();
    let plot = scales.plot();
    let style = context.style();
    let labels = context.config().labels;
    let rule_width = context.config().markers.rule_width;
    let plan = context.time_axis();
    let text_baseline = plot.bottom()
        + labels.time_rule_text_offset
        + TIME_RULE_TEXT_DY_EM * labels.rule_font_size_px;

    for tick in &plan.ticks {
        let x = scales.time_to_x(tick.instant);
        frame.push_line(
            CanvasLayerKind::Grid,
            LinePrimitive::new(x, plot.top, x, plot.bottom() - 1.0, rule_width, style.rule_color),
        );
        frame.push_text(
            CanvasLayerKind::Grid,
            TextPrimitive::new(
                format_time(tick.instant, plan.granularity, TimeFormatContext::Axis),
                x,
                text_baseline,
                labels.rule_font_size_px,
                style.rule_text_color,
                TextHAlign::Center,
            ),
        );
    }
}

fn push_value_rules(frame: &mut RenderFrame, context: &RenderContext) {
    let scales = context.scales();
    let plot = scales.plot();
    let style = context.style();
    let labels = context.config().labels;
    let rule_width = context.config().markers.rule_width;
    let ticks = context.value_ticks();

    for value in &ticks.values {
        let y = scales.value_to_y(*value);
        frame.push_line(
            CanvasLayerKind::Grid,
            LinePrimitive::new(plot.left, y, plot.right() + 1.0, y, rule_width, style.rule_color),
        );
        frame.push_text(
            CanvasLayerKind::Grid,
            TextPrimitive::new(
                format_value_tick(*value, ticks.step),
                plot.left - labels.value_rule_text_offset,
                y + VALUE_RULE_TEXT_DY_EM * labels.rule_font_size_px,
                labels.rule_font_size_px,
                style.rule_text_color,
                TextHAlign::Right,
            ),
        );
    }
}

fn push_title(frame: &mut RenderFrame, context: &RenderContext) {
    let title = &context.dataset().title;
    if title.is_empty() {
        return;
    }
    let layout = context.layout();
    frame.push_text(
        CanvasLayerKind::Title,
        TextPrimitive::new(
            title.clone(),
            layout.title_x,
            layout.title_baseline,
            context.config().labels.title_font_size_px,
            context.style().title_color,
            TextHAlign::Center,
        ),
    );
}

fn push_series(
    frame: &mut RenderFrame,
    context: &RenderContext,
    interaction: &InteractionState,
    now: Duration,
) {
    let scales = context.scales();
    let style = context.style();
    let markers = context.config().markers;
    let positions: Vec<(f64, f64)> = context
        .dataset()
        .points
        .iter()
        .map(|point| (scales.time_to_x(point.time), scales.value_to_y(point.value)))
        .collect();

    frame.push_polyline(
        CanvasLayerKind::Series,
        PolylinePrimitive::new(positions.clone(), markers.line_width, style.line_color),
    );

    for (index, (cx, cy)) in positions.into_iter().enumerate() {
        let element = ElementId::DataPoint(index);
        let visuals = visuals_or_idle(
            interaction,
            element,
            now,
            style.marker.idle_fill,
            style.marker.idle_stroke,
        );
        let marker = CirclePrimitive::new(cx, cy, markers.radius, visuals.fill)
            .with_stroke(markers.marker_stroke_width, visuals.stroke)
            .with_element(element);
        frame.push_circle(CanvasLayerKind::Markers, marker);
    }
}

fn push_labels(
    frame: &mut RenderFrame,
    labels: &[PlacedLabel],
    context: &RenderContext,
    interaction: &InteractionState,
    now: Duration,
) {
    let style = context.style();
    let config = context.config();

    for label in labels {
        let Some(bounds) = label.bounds else {
            continue;
        };
        let opacity = interaction
            .visuals(label.element, now)
            .map_or(0.0, |visuals| visuals.label_opacity);
        let background = RectPrimitive::new(
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height,
            style.label_fill,
        )
        .with_border(config.markers.label_border_width, style.label_border);
        let text = TextPrimitive::new(
            label.text.clone(),
            label.center_x,
            label.baseline_y,
            config.labels.label_font_size_px,
            style.label_text_color,
            TextHAlign::Center,
        );
        frame.push_label(
            CanvasLayerKind::Labels,
            LabelPrimitive {
                element: label.element,
                opacity,
                background,
                text,
            },
        );
    }
}
