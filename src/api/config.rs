use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};
use crate::interaction::TransitionConfig;

use super::style::{GraphStyle, Theme};
use super::validation::{
    validate_label_config, validate_layout_config, validate_marker_config,
};

fn default_edge_padding() -> f64 {
    20.0
}

fn default_x_axis_space() -> f64 {
    15.0
}

fn default_y_axis_space() -> f64 {
    20.0
}

fn default_title_space() -> f64 {
    20.0
}

fn default_title_offset() -> f64 {
    5.0
}

fn default_label_padding_x() -> f64 {
    5.0
}

fn default_label_padding_y() -> f64 {
    3.0
}

fn default_data_label_spacing() -> f64 {
    15.0
}

fn default_note_label_spacing() -> f64 {
    20.0
}

fn default_label_font_size_px() -> f64 {
    11.0
}

fn default_title_font_size_px() -> f64 {
    12.0
}

fn default_rule_font_size_px() -> f64 {
    10.0
}

fn default_time_rule_text_offset() -> f64 {
    15.0
}

fn default_value_rule_text_offset() -> f64 {
    10.0
}

fn default_marker_radius() -> f64 {
    3.5
}

fn default_stroke_width() -> f64 {
    1.5
}

fn default_band_width() -> f64 {
    6.0
}

fn default_hairline_width() -> f64 {
    1.0
}

fn default_theme() -> Theme {
    Theme::Light
}

/// Surface paddings around the plot rectangle, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_edge_padding")]
    pub edge_padding: f64,
    /// Room below the plot for time-axis text.
    #[serde(default = "default_x_axis_space")]
    pub x_axis_space: f64,
    /// Room left of the plot for value-axis text.
    #[serde(default = "default_y_axis_space")]
    pub y_axis_space: f64,
    #[serde(default = "default_title_space")]
    pub title_space: f64,
    /// Distance from the top of the title space down to the title baseline.
    #[serde(default = "default_title_offset")]
    pub title_offset: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            edge_padding: default_edge_padding(),
            x_axis_space: default_x_axis_space(),
            y_axis_space: default_y_axis_space(),
            title_space: default_title_space(),
            title_offset: default_title_offset(),
        }
    }
}

/// Hover label and axis text settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelConfig {
    #[serde(default = "default_label_padding_x")]
    pub padding_x: f64,
    #[serde(default = "default_label_padding_y")]
    pub padding_y: f64,
    /// Gap between a data point and its label baseline.
    #[serde(default = "default_data_label_spacing")]
    pub data_label_spacing: f64,
    /// Note label baseline, measured down from the plot top.
    #[serde(default = "default_note_label_spacing")]
    pub note_label_spacing: f64,
    #[serde(default = "default_label_font_size_px")]
    pub label_font_size_px: f64,
    #[serde(default = "default_title_font_size_px")]
    pub title_font_size_px: f64,
    #[serde(default = "default_rule_font_size_px")]
    pub rule_font_size_px: f64,
    /// Time-axis text distance below the plot bottom.
    #[serde(default = "default_time_rule_text_offset")]
    pub time_rule_text_offset: f64,
    /// Value-axis text distance left of the plot.
    #[serde(default = "default_value_rule_text_offset")]
    pub value_rule_text_offset: f64,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            padding_x: default_label_padding_x(),
            padding_y: default_label_padding_y(),
            data_label_spacing: default_data_label_spacing(),
            note_label_spacing: default_note_label_spacing(),
            label_font_size_px: default_label_font_size_px(),
            title_font_size_px: default_title_font_size_px(),
            rule_font_size_px: default_rule_font_size_px(),
            time_rule_text_offset: default_time_rule_text_offset(),
            value_rule_text_offset: default_value_rule_text_offset(),
        }
    }
}

/// Geometry of the series, markers and annotation bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerConfig {
    #[serde(default = "default_marker_radius")]
    pub radius: f64,
    #[serde(default = "default_stroke_width")]
    pub marker_stroke_width: f64,
    #[serde(default = "default_stroke_width")]
    pub line_width: f64,
    #[serde(default = "default_band_width")]
    pub band_width: f64,
    #[serde(default = "default_hairline_width")]
    pub band_border_width: f64,
    #[serde(default = "default_hairline_width")]
    pub rule_width: f64,
    #[serde(default = "default_hairline_width")]
    pub label_border_width: f64,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            radius: default_marker_radius(),
            marker_stroke_width: default_stroke_width(),
            line_width: default_stroke_width(),
            band_width: default_band_width(),
            band_border_width: default_hairline_width(),
            rule_width: default_hairline_width(),
            label_border_width: default_hairline_width(),
        }
    }
}

/// Public graph configuration.
///
/// Serializable so embedders can ship it next to the dataset registry.
/// Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct GraphConfig {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub labels: LabelConfig,
    #[serde(default)]
    pub markers: MarkerConfig,
    #[serde(default)]
    pub transitions: TransitionConfig,
    #[serde(default = "default_theme")]
    pub theme: Theme,
}

impl GraphConfig {
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_labels(mut self, labels: LabelConfig) -> Self {
        self.labels = labels;
        self
    }

    #[must_use]
    pub fn with_markers(mut self, markers: MarkerConfig) -> Self {
        self.markers = markers;
        self
    }

    #[must_use]
    pub fn with_transitions(mut self, transitions: TransitionConfig) -> Self {
        self.transitions = transitions;
        self
    }

    /// Palette the configured theme resolves to.
    #[must_use]
    pub fn style(self) -> GraphStyle {
        GraphStyle::for_theme(self.theme)
    }

    pub fn validate(self) -> GraphResult<()> {
        validate_layout_config(self.layout)?;
        validate_label_config(self.labels)?;
        validate_marker_config(self.markers)
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(self) -> GraphResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| GraphError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> GraphResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| GraphError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}
