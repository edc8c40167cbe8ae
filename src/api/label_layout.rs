use tracing::warn;

use crate::core::{
    Annotation, Dataset, ElementId, PlotRect, PlotScales, Point, TickGranularity,
    TimeFormatContext, format_time,
};
use crate::render::TextMeasurer;

use super::LabelConfig;

/// Background box of a hover label, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Final geometry of one hover label.
///
/// `bounds` is `None` when the text could not be measured; such a label is
/// never drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLabel {
    pub element: ElementId,
    pub text: String,
    /// Horizontal centre of the text after clamping, in surface pixels.
    pub center_x: f64,
    pub baseline_y: f64,
    pub bounds: Option<LabelBox>,
}

impl PlacedLabel {
    #[must_use]
    pub fn is_placeable(&self) -> bool {
        self.bounds.is_some()
    }
}

/// Clamps a label centre so a label `2 * half_width` wide stays inside
/// `[0, plot_width]`. Labels wider than the plot are centred.
#[must_use]
pub fn clamp_label_center(x: f64, half_width: f64, plot_width: f64) -> f64 {
    if plot_width <= 2.0 * half_width {
        plot_width * 0.5
    } else {
        x.clamp(half_width, plot_width - half_width)
    }
}

/// `"<label time>: <value>[ <units>]"`.
#[must_use]
pub fn data_label_text(point: Point, granularity: TickGranularity, units: Option<&str>) -> String {
    let time = format_time(point.time, granularity, TimeFormatContext::Label);
    match units {
        Some(units) if !units.is_empty() => {
            format!("{time}: {} {units}", format_point_value(point.value))
        }
        _ => format!("{time}: {}", format_point_value(point.value)),
    }
}

/// Shortest round-trip text of `value`, in the notation a web page prints
/// numbers with: plain decimals for magnitudes in `[1e-6, 1e21)`, otherwise
/// exponent form with an explicit sign (`1e+21`, `1.5e-7`). Negative zero
/// prints as `0`.
#[must_use]
pub fn format_point_value(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_owned();
    }
    if value == 0.0 {
        return "0".to_owned();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }
    let exponent_form = format!("{value:e}");
    match exponent_form.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => exponent_form,
    }
}

/// `"<label time>: <text>"`.
#[must_use]
pub fn note_label_text(note: &Annotation, granularity: TickGranularity) -> String {
    let time = format_time(note.time, granularity, TimeFormatContext::Label);
    format!("{time}: {}", note.text)
}

/// Places one label centred on `anchor_x` (surface pixels) with its baseline
/// at `baseline_y`, clamped into the plot's horizontal extent.
pub fn place_label(
    element: ElementId,
    text: String,
    anchor_x: f64,
    baseline_y: f64,
    plot: PlotRect,
    config: LabelConfig,
    measurer: &dyn TextMeasurer,
) -> PlacedLabel {
    let Some(extent) = measurer.measure(&text, config.label_font_size_px) else {
        warn!(?element, text = %text, "label text could not be measured, label hidden");
        return PlacedLabel {
            element,
            text,
            center_x: anchor_x,
            baseline_y,
            bounds: None,
        };
    };

    let half_width = 0.5 * extent.width;
    let local_x = clamp_label_center(anchor_x - plot.left, half_width, plot.width);
    let center_x = plot.left + local_x;
    let bounds = LabelBox {
        x: center_x - half_width - config.padding_x,
        y: baseline_y - extent.ascent - config.padding_y,
        width: extent.width + 2.0 * config.padding_x,
        height: extent.height() + 2.0 * config.padding_y,
    };

    PlacedLabel {
        element,
        text,
        center_x,
        baseline_y,
        bounds: Some(bounds),
    }
}

/// Labels of every data point, in point order.
pub fn layout_point_labels(
    dataset: &Dataset,
    scales: &PlotScales,
    granularity: TickGranularity,
    config: LabelConfig,
    measurer: &dyn TextMeasurer,
) -> Vec<PlacedLabel> {
    dataset
        .points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            place_label(
                ElementId::DataPoint(index),
                data_label_text(*point, granularity, dataset.units.as_deref()),
                scales.time_to_x(point.time),
                scales.value_to_y(point.value) - config.data_label_spacing,
                scales.plot(),
                config,
                measurer,
            )
        })
        .collect()
}

/// Labels of every annotation, in annotation order.
pub fn layout_note_labels(
    dataset: &Dataset,
    scales: &PlotScales,
    granularity: TickGranularity,
    config: LabelConfig,
    measurer: &dyn TextMeasurer,
) -> Vec<PlacedLabel> {
    let plot = scales.plot();
    dataset
        .notes
        .iter()
        .enumerate()
        .map(|(index, note)| {
            place_label(
                ElementId::Annotation(index),
                note_label_text(note, granularity),
                scales.time_to_x(note.time),
                plot.top + config.note_label_spacing,
                plot,
                config,
                measurer,
            )
        })
        .collect()
}
