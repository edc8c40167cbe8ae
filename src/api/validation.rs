use crate::error::{GraphError, GraphResult};

use super::{LabelConfig, LayoutConfig, MarkerConfig};

pub(super) fn validate_layout_config(layout: LayoutConfig) -> GraphResult<()> {
    for (field, value) in [
        ("edge padding", layout.edge_padding),
        ("x axis space", layout.x_axis_space),
        ("y axis space", layout.y_axis_space),
        ("title space", layout.title_space),
        ("title offset", layout.title_offset),
    ] {
        require_non_negative(field, value)?;
    }
    Ok(())
}

pub(super) fn validate_label_config(labels: LabelConfig) -> GraphResult<()> {
    for (field, value) in [
        ("label padding x", labels.padding_x),
        ("label padding y", labels.padding_y),
        ("data label spacing", labels.data_label_spacing),
        ("note label spacing", labels.note_label_spacing),
        ("time rule text offset", labels.time_rule_text_offset),
        ("value rule text offset", labels.value_rule_text_offset),
    ] {
        require_non_negative(field, value)?;
    }
    for (field, value) in [
        ("label font size", labels.label_font_size_px),
        ("title font size", labels.title_font_size_px),
        ("rule font size", labels.rule_font_size_px),
    ] {
        require_positive(field, value)?;
    }
    Ok(())
}

pub(super) fn validate_marker_config(markers: MarkerConfig) -> GraphResult<()> {
    for (field, value) in [
        ("marker radius", markers.radius),
        ("marker stroke width", markers.marker_stroke_width),
        ("line width", markers.line_width),
        ("band width", markers.band_width),
        ("rule width", markers.rule_width),
    ] {
        require_positive(field, value)?;
    }
    require_non_negative("band border width", markers.band_border_width)?;
    require_non_negative("label border width", markers.label_border_width)
}

fn require_non_negative(field: &str, value: f64) -> GraphResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(GraphError::InvalidData(format!(
            "{field} must be finite and >= 0"
        )));
    }
    Ok(())
}

fn require_positive(field: &str, value: f64) -> GraphResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(GraphError::InvalidData(format!(
            "{field} must be finite and > 0"
        )));
    }
    Ok(())
}
