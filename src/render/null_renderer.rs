use crate::error::GraphResult;
use crate::render::{RenderFrame, Renderer};

/// Renderer that draws nothing and keeps per-frame counts.
///
/// Frames are still validated, so headless hosts and tests see the same
/// geometry errors a drawing backend would.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_line_count: usize,
    pub last_circle_count: usize,
    pub last_text_count: usize,
    pub last_visible_label_count: usize,
    pub frames_rendered: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> GraphResult<()> {
        frame.validate()?;
        self.last_line_count = frame.layers.iter().map(|layer| layer.lines.len()).sum();
        self.last_circle_count = frame.circles().count();
        self.last_text_count = frame.texts().count();
        self.last_visible_label_count = frame.labels().filter(|label| label.is_visible()).count();
        self.frames_rendered += 1;
        Ok(())
    }
}
