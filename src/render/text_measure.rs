/// Extents of a single line of text, relative to its baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextExtent {
    pub width: f64,
    /// Distance from the baseline up to the top of the text box.
    pub ascent: f64,
    /// Distance from the baseline down to the bottom of the text box.
    pub descent: f64,
}

impl TextExtent {
    #[must_use]
    pub fn height(self) -> f64 {
        self.ascent + self.descent
    }

    fn is_valid(self) -> bool {
        [self.width, self.ascent, self.descent]
            .iter()
            .all(|value| value.is_finite() && *value >= 0.0)
    }
}

/// Text measurement capability a backend provides to label layout.
///
/// Returning `None` means the text could not be measured; the caller hides
/// whatever depended on the measurement.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font_size_px: f64) -> Option<TextExtent>;
}

/// Font-agnostic estimate based on character count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicTextMeasurer {
    pub char_width_em: f64,
    pub ascent_em: f64,
    pub descent_em: f64,
}

impl Default for HeuristicTextMeasurer {
    fn default() -> Self {
        Self {
            char_width_em: 0.6,
            ascent_em: 0.8,
            descent_em: 0.2,
        }
    }
}

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_size_px: f64) -> Option<TextExtent> {
        if text.is_empty() || !font_size_px.is_finite() || font_size_px <= 0.0 {
            return None;
        }
        let extent = TextExtent {
            width: text.chars().count() as f64 * self.char_width_em * font_size_px,
            ascent: self.ascent_em * font_size_px,
            descent: self.descent_em * font_size_px,
        };
        extent.is_valid().then_some(extent)
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, font_size_px: f64) -> Option<TextExtent> {
        (**self).measure(text, font_size_px)
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for Box<T> {
    fn measure(&self, text: &str, font_size_px: f64) -> Option<TextExtent> {
        (**self).measure(text, font_size_px)
    }
}

#[cfg(test)]
mod tests {
    use super::{HeuristicTextMeasurer, TextMeasurer};

    #[test]
    fn heuristic_width_scales_with_chars_and_font() {
        let measurer = HeuristicTextMeasurer::default();
        let short = measurer.measure("ab", 10.0).expect("measured");
        let long = measurer.measure("abcd", 10.0).expect("measured");
        assert!((short.width - 12.0).abs() < 1e-9);
        assert!((long.width - 2.0 * short.width).abs() < 1e-9);
        assert!((short.height() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn empty_text_is_not_measurable() {
        assert!(HeuristicTextMeasurer::default().measure("", 10.0).is_none());
        assert!(HeuristicTextMeasurer::default().measure("x", 0.0).is_none());
    }
}
