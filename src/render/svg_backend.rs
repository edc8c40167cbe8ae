use std::fmt::Write as _;

use crate::core::ElementId;
use crate::error::{GraphError, GraphResult};
use crate::render::{
    CirclePrimitive, Color, LabelPrimitive, LayerPrimitives, LinePrimitive, PolylinePrimitive,
    RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SvgRenderStats {
    pub rects_written: usize,
    pub lines_written: usize,
    pub polylines_written: usize,
    pub circles_written: usize,
    pub texts_written: usize,
    pub labels_written: usize,
}

/// Serializes frames into standalone SVG documents.
///
/// Hoverable elements carry stable ids (`point-3`, `note-0`, `point-label-3`,
/// `note-label-0`) so a retained-mode host can restyle them in place.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
    last_stats: SvgRenderStats,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Document produced by the last `render` call.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }

    #[must_use]
    pub fn last_stats(&self) -> SvgRenderStats {
        self.last_stats
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> GraphResult<()> {
        frame.validate()?;
        let mut stats = SvgRenderStats::default();
        let document = write_document(frame, &mut stats)
            .map_err(|err| GraphError::InvalidData(format!("failed to write svg: {err}")))?;
        self.document = document;
        self.last_stats = stats;
        Ok(())
    }
}

/// DOM id of a hoverable element or of its label.
#[must_use]
pub fn element_dom_id(element: ElementId, label: bool) -> String {
    let (prefix, index) = match element {
        ElementId::DataPoint(index) => ("point", index),
        ElementId::Annotation(index) => ("note", index),
    };
    if label {
        format!("{prefix}-label-{index}")
    } else {
        format!("{prefix}-{index}")
    }
}

fn write_document(frame: &RenderFrame, stats: &mut SvgRenderStats) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    let (width, height) = (frame.viewport.width, frame.viewport.height);
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="graph" preserveAspectRatio="xMinYMin meet" viewBox="0 0 {width} {height}" width="{width}" height="{height}">"#
    )?;
    writeln!(
        out,
        r#"<rect class="background" x="0" y="0" width="{width}" height="{height}"{}/>"#,
        paint_attrs("fill", frame.background)
    )?;

    for layer in frame.layers.iter().filter(|layer| !layer.is_empty()) {
        write_layer(&mut out, layer, stats)?;
    }

    out.push_str("</svg>\n");
    Ok(out)
}

fn write_layer(
    out: &mut String,
    layer: &LayerPrimitives,
    stats: &mut SvgRenderStats,
) -> std::fmt::Result {
    writeln!(out, r#"<g class="{}">"#, layer.kind.as_str())?;
    for rect in &layer.rects {
        write_rect(out, rect, true)?;
        stats.rects_written += 1;
    }
    for line in &layer.lines {
        write_line(out, line)?;
        stats.lines_written += 1;
    }
    for polyline in &layer.polylines {
        write_polyline(out, polyline)?;
        stats.polylines_written += 1;
    }
    for circle in &layer.circles {
        write_circle(out, circle)?;
        stats.circles_written += 1;
    }
    for text in &layer.texts {
        write_text(out, text)?;
        stats.texts_written += 1;
    }
    for label in &layer.labels {
        write_label(out, label)?;
        stats.labels_written += 1;
    }
    out.push_str("</g>\n");
    Ok(())
}

fn write_rect(out: &mut String, rect: &RectPrimitive, with_id: bool) -> std::fmt::Result {
    out.push_str("<rect");
    if let Some(element) = rect.element.filter(|_| with_id) {
        write!(out, r#" id="{}""#, element_dom_id(element, false))?;
    }
    write!(
        out,
        r#" x="{}" y="{}" width="{}" height="{}"{}"#,
        num(rect.x),
        num(rect.y),
        num(rect.width),
        num(rect.height),
        paint_attrs("fill", rect.fill_color)
    )?;
    if rect.border_width > 0.0 {
        write!(
            out,
            r#"{} stroke-width="{}""#,
            paint_attrs("stroke", rect.border_color),
            num(rect.border_width)
        )?;
    }
    out.push_str("/>\n");
    Ok(())
}

fn write_line(out: &mut String, line: &LinePrimitive) -> std::fmt::Result {
    writeln!(
        out,
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{} stroke-width="{}"/>"#,
        num(line.x1),
        num(line.y1),
        num(line.x2),
        num(line.y2),
        paint_attrs("stroke", line.color),
        num(line.stroke_width)
    )
}

fn write_polyline(out: &mut String, polyline: &PolylinePrimitive) -> std::fmt::Result {
    let mut data = String::new();
    for (index, (x, y)) in polyline.points.iter().enumerate() {
        let command = if index == 0 { 'M' } else { 'L' };
        write!(data, "{command}{},{}", num(*x), num(*y))?;
    }
    writeln!(
        out,
        r#"<path class="line" pointer-events="none" d="{data}" fill="none"{} stroke-width="{}"/>"#,
        paint_attrs("stroke", polyline.color),
        num(polyline.stroke_width)
    )
}

fn write_circle(out: &mut String, circle: &CirclePrimitive) -> std::fmt::Result {
    out.push_str("<circle");
    if let Some(element) = circle.element {
        write!(out, r#" id="{}""#, element_dom_id(element, false))?;
    }
    write!(
        out,
        r#" cx="{}" cy="{}" r="{}"{}"#,
        num(circle.cx),
        num(circle.cy),
        num(circle.radius),
        paint_attrs("fill", circle.fill_color)
    )?;
    if circle.stroke_width > 0.0 {
        write!(
            out,
            r#"{} stroke-width="{}""#,
            paint_attrs("stroke", circle.stroke_color),
            num(circle.stroke_width)
        )?;
    }
    out.push_str("/>\n");
    Ok(())
}

fn write_text(out: &mut String, text: &TextPrimitive) -> std::fmt::Result {
    let anchor = match text.h_align {
        TextHAlign::Left => "start",
        TextHAlign::Center => "middle",
        TextHAlign::Right => "end",
    };
    writeln!(
        out,
        r#"<text x="{}" y="{}" font-size="{}" text-anchor="{anchor}"{}>{}</text>"#,
        num(text.x),
        num(text.y),
        num(text.font_size_px),
        paint_attrs("fill", text.color),
        escape_xml(&text.text)
    )
}

fn write_label(out: &mut String, label: &LabelPrimitive) -> std::fmt::Result {
    writeln!(
        out,
        r#"<g id="{}" class="label" pointer-events="none" opacity="{}">"#,
        element_dom_id(label.element, true),
        num(label.opacity)
    )?;
    write_rect(out, &label.background, false)?;
    write_text(out, &label.text)?;
    out.push_str("</g>\n");
    Ok(())
}

fn paint_attrs(attr: &str, color: Color) -> String {
    if color.alpha >= 1.0 {
        format!(r#" {attr}="{}""#, color.to_hex())
    } else {
        format!(
            r#" {attr}="{}" {attr}-opacity="{}""#,
            color.to_hex(),
            num(color.alpha)
        )
    }
}

/// Compact decimal form: at most three fractional digits, no trailing zeros.
fn num(value: f64) -> String {
    let fixed = format!("{value:.3}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_owned(),
        other => other.to_owned(),
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{escape_xml, num};

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(num(12.0), "12");
        assert_eq!(num(3.5), "3.5");
        assert_eq!(num(0.12345), "0.123");
        assert_eq!(num(-0.0001), "0");
    }

    #[test]
    fn markup_characters_are_escaped() {
        assert_eq!(escape_xml("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
    }
}
