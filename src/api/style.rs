use serde::{Deserialize, Serialize};

use crate::interaction::HoverPalette;
use crate::render::Color;

/// Page colour scheme the graph follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme `{other}` (expected light or dark)")),
        }
    }
}

/// Resolved palette of one theme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphStyle {
    pub background: Color,
    pub title_color: Color,
    pub rule_color: Color,
    pub rule_text_color: Color,
    pub line_color: Color,
    /// Point marker paint; stroke stays the series colour.
    pub marker: HoverPalette,
    /// Annotation band paint.
    pub band: HoverPalette,
    pub label_fill: Color,
    pub label_border: Color,
    pub label_text_color: Color,
}

const STEEL_BLUE: Color = Color::rgb8(0x46, 0x82, 0xb4);

impl GraphStyle {
    #[must_use]
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::light(),
            Theme::Dark => Self::dark(),
        }
    }

    #[must_use]
    pub fn light() -> Self {
        let white = Color::rgb8(0xff, 0xff, 0xff);
        Self {
            background: white,
            title_color: Color::rgb8(0x00, 0x00, 0x00),
            rule_color: Color::rgb8(0xee, 0xee, 0xee),
            rule_text_color: Color::rgb8(0x00, 0x00, 0x00),
            line_color: STEEL_BLUE,
            marker: HoverPalette {
                idle_fill: white,
                idle_stroke: STEEL_BLUE,
                hover_fill: STEEL_BLUE,
                hover_stroke: STEEL_BLUE,
            },
            band: HoverPalette {
                idle_fill: Color::rgb8(0xf5, 0xf5, 0xf5),
                idle_stroke: Color::rgb8(0xee, 0xee, 0xee),
                hover_fill: Color::rgb8(0xee, 0xee, 0xee),
                hover_stroke: Color::rgb8(0xdd, 0xdd, 0xdd),
            },
            label_fill: Color::rgb8(0xff, 0xfb, 0xe0),
            label_border: Color::rgb8(0xd2, 0xcf, 0xb9),
            label_text_color: Color::rgb8(0x00, 0x00, 0x00),
        }
    }

    #[must_use]
    pub fn dark() -> Self {
        let background = Color::rgb8(0x1e, 0x1e, 0x1e);
        let series = Color::rgb8(0x6f, 0xa8, 0xdc);
        Self {
            background,
            title_color: Color::rgb8(0xe0, 0xe0, 0xe0),
            rule_color: Color::rgb8(0x33, 0x33, 0x33),
            rule_text_color: Color::rgb8(0xbb, 0xbb, 0xbb),
            line_color: series,
            marker: HoverPalette {
                idle_fill: background,
                idle_stroke: series,
                hover_fill: series,
                hover_stroke: series,
            },
            band: HoverPalette {
                idle_fill: Color::rgb8(0x2a, 0x2a, 0x2a),
                idle_stroke: Color::rgb8(0x33, 0x33, 0x33),
                hover_fill: Color::rgb8(0x3a, 0x3a, 0x3a),
                hover_stroke: Color::rgb8(0x4a, 0x4a, 0x4a),
            },
            label_fill: Color::rgb8(0x3b, 0x39, 0x2a),
            label_border: Color::rgb8(0x6b, 0x68, 0x52),
            label_text_color: Color::rgb8(0xee, 0xee, 0xee),
        }
    }
}
