use super::textbox::{TextAlign, TextBox};
use crate::canvas::SvgStyle;
use crate::grid::{CellSpan, Constraint, ConstraintApplier, DrawContext, Graphic};
use crate::text::{TextMeasurer, TextStyle};
use seqdraw_core::NotePosition;
use seqdraw_core::geom::{Gravity, Point, Rect, RectExt, rect};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteBoxStyle {
    pub font: TextStyle,
    pub padding: Point,
    pub margin: Point,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub text_color: Option<String>,
}

/// A note beside or over one lifeline, or stretched over two.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteBox {
    frame: Rect,
    text: TextBox,
    style: NoteBoxStyle,
    pos: NotePosition,
    /// How far a note placed over several lifelines reaches past the outer ones.
    overlap: i32,
}

impl NoteBox {
    pub fn new(
        text: &str,
        style: &NoteBoxStyle,
        pos: NotePosition,
        measurer: &dyn TextMeasurer,
    ) -> Self {
        let text = TextBox::new(text, &style.font, TextAlign::Middle, measurer)
            .with_color(style.text_color.clone());
        let frame = text.bounding_rect().blow_out(style.padding);
        Self {
            frame,
            text,
            style: style.clone(),
            pos,
            overlap: 0,
        }
    }

    pub fn with_overlap(mut self, overlap: i32) -> Self {
        self.overlap = overlap;
        self
    }

    pub fn position(&self) -> NotePosition {
        self.pos
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// How far the frame reaches left and right of its anchors.
    pub fn reach(&self, span: CellSpan) -> (i32, i32) {
        let w = self.frame.size.width;
        let m = self.style.margin;
        if span.from.col != span.to.col {
            return (self.overlap, self.overlap);
        }
        match self.pos {
            NotePosition::LeftOf => (m.x + w, 0),
            NotePosition::RightOf => (0, m.x + w),
            NotePosition::Over => (w / 2, w - w / 2),
        }
    }

    fn frame_style(&self) -> SvgStyle {
        SvgStyle::new()
            .with("stroke", self.style.color.as_deref().unwrap_or("black"))
            .with("fill", "white")
            .with("stroke-width", "2px")
    }
}

impl Graphic for NoteBox {
    fn constraint(&self, span: CellSpan, applier: &mut dyn ConstraintApplier) {
        let w = self.frame.size.width;
        let h = self.frame.size.height;
        let m = self.style.margin;

        if span.from.col != span.to.col {
            let (first, last) = if span.from.col < span.to.col {
                (span.from, span.to)
            } else {
                (span.to, span.from)
            };
            let reach = self.overlap + m.x;
            applier.apply(Constraint::size(first, reach, 0, 0, 0));
            applier.apply(Constraint::size(last, 0, reach, 0, 0));
            applier.apply(Constraint::total_size(
                first,
                last,
                (w - 2 * self.overlap).max(0),
                0,
            ));
        } else {
            let horizontal = match self.pos {
                NotePosition::LeftOf => Constraint::size(span.from, w + m.x * 2, m.x, 0, 0),
                NotePosition::RightOf => Constraint::size(span.from, m.x, w + m.x * 2, 0, 0),
                NotePosition::Over => {
                    Constraint::size(span.from, w / 2 + m.x, w - w / 2 + m.x, 0, 0)
                }
            };
            applier.apply(horizontal);
        }

        applier.apply(Constraint::add_size(
            span.from,
            0,
            0,
            h / 2 + m.y,
            h - h / 2 + m.y,
        ));
    }

    fn draw(&self, ctx: &mut DrawContext<'_>, anchor: Point) {
        let (cx, cy) = (anchor.x, anchor.y);
        let m = self.style.margin;
        let pad = self.style.padding;

        if ctx.span_end.x != anchor.x {
            let left = anchor.x.min(ctx.span_end.x) - self.overlap;
            let right = anchor.x.max(ctx.span_end.x) + self.overlap;
            let width = (right - left).max(self.frame.size.width);
            let mid = (left + right) / 2;
            let r = rect(
                mid - width / 2,
                cy - self.frame.size.height / 2,
                width,
                self.frame.size.height,
            );
            ctx.canvas.rect(
                r.origin.x,
                r.origin.y,
                r.size.width,
                r.size.height,
                self.frame_style(),
            );
            self.text.render(ctx.canvas, mid, cy, Gravity::Center);
            return;
        }

        let (frame, text_x, gravity) = match self.pos {
            NotePosition::Over => (
                self.frame.position_at(cx, cy, Gravity::Center),
                cx,
                Gravity::Center,
            ),
            NotePosition::LeftOf => (
                self.frame.position_at(cx - m.x, cy, Gravity::East),
                cx - m.x - pad.x,
                Gravity::East,
            ),
            NotePosition::RightOf => (
                self.frame.position_at(cx + m.x, cy, Gravity::West),
                cx + m.x + pad.x,
                Gravity::West,
            ),
        };
        ctx.canvas.rect(
            frame.origin.x,
            frame.origin.y,
            frame.size.width,
            frame.size.height,
            self.frame_style(),
        );
        self.text.render(ctx.canvas, text_x, cy, gravity);
    }
}
