use crate::canvas::{Canvas, SvgStyle};
use crate::text::{DeterministicTextMeasurer, TextMeasurer, TextStyle};
use seqdraw_core::geom::{Gravity, Rect, RectExt, rect};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    #[default]
    Middle,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
struct TextLine {
    text: String,
    width: i32,
}

/// A block of text measured once, at construction.
///
/// An empty string measures as a zero-sized box so that callers only reserve their own padding
/// and margin for it.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    lines: Vec<TextLine>,
    style: TextStyle,
    align: TextAlign,
    color: Option<String>,
    line_height: i32,
    width: i32,
    height: i32,
}

impl TextBox {
    pub fn new(
        text: &str,
        style: &TextStyle,
        align: TextAlign,
        measurer: &dyn TextMeasurer,
    ) -> Self {
        let mut lines = Vec::new();
        let mut line_height = 0;
        if !text.is_empty() {
            for line in DeterministicTextMeasurer::text_lines(text) {
                let metrics = measurer.measure(line, style);
                line_height = line_height.max(metrics.height.ceil() as i32);
                lines.push(TextLine {
                    text: line.to_string(),
                    width: metrics.width.ceil() as i32,
                });
            }
        }
        let width = lines.iter().map(|l| l.width).max().unwrap_or(0);
        let height = line_height * lines.len() as i32;

        Self {
            lines,
            style: style.clone(),
            align,
            color: None,
            line_height,
            width,
            height,
        }
    }

    pub fn with_color(mut self, color: Option<String>) -> Self {
        self.color = color;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The text's extent, positioned at the origin.
    pub fn bounding_rect(&self) -> Rect {
        rect(0, 0, self.width, self.height)
    }

    /// Draws the text so that its bounding rect's `gravity` point lands on `(x, y)`.
    pub fn render(&self, canvas: &mut Canvas, x: i32, y: i32, gravity: Gravity) {
        let frame = self.bounding_rect().position_at(x, y, gravity);
        let baseline_offset = self.style.font_size.round() as i32;
        let style = self.svg_style();

        for (i, line) in self.lines.iter().enumerate() {
            if line.text.trim().is_empty() {
                continue;
            }
            let line_x = match self.align {
                TextAlign::Left => frame.origin.x,
                TextAlign::Middle => frame.origin.x + (frame.size.width - line.width) / 2,
                TextAlign::Right => frame.origin.x + frame.size.width - line.width,
            };
            let line_top = frame.origin.y + self.line_height * i as i32;
            canvas.text(line_x, line_top + baseline_offset, &line.text, style.clone());
        }
    }

    fn svg_style(&self) -> SvgStyle {
        let mut style = SvgStyle::new();
        if let Some(family) = &self.style.font_family {
            style.set("font-family", family.as_str());
        }
        style.set("font-size", format!("{}px", self.style.font_size));
        if let Some(weight) = &self.style.font_weight {
            style.set("font-weight", weight.as_str());
        }
        style.set("fill", self.color.as_deref().unwrap_or("black"));
        style
    }
}
