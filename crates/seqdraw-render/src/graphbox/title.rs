use super::textbox::{TextAlign, TextBox};
use crate::grid::{CellSpan, Constraint, ConstraintApplier, DrawContext, Graphic};
use crate::text::{TextMeasurer, TextStyle};
use seqdraw_core::geom::{Gravity, Point};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleStyle {
    pub font: TextStyle,
    pub padding: Point,
}

/// The diagram title, centered over all columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Title {
    text: TextBox,
    style: TitleStyle,
}

impl Title {
    pub fn new(title: &str, style: &TitleStyle, measurer: &dyn TextMeasurer) -> Self {
        Self {
            text: TextBox::new(title, &style.font, TextAlign::Middle, measurer),
            style: style.clone(),
        }
    }
}

impl Graphic for Title {
    fn constraint(&self, span: CellSpan, applier: &mut dyn ConstraintApplier) {
        let size = self.text.bounding_rect().size;
        let p = self.style.padding;
        let (w, h) = (size.width, size.height);

        if span.from.col == span.to.col {
            applier.apply(Constraint::size(
                span.from,
                w / 2 + p.x,
                w - w / 2 + p.x,
                h / 2 + p.y,
                h - h / 2 + p.y,
            ));
        } else {
            applier.apply(Constraint::total_size(span.from, span.to, w + 2 * p.x, 0));
            applier.apply(Constraint::size(span.from, 0, 0, h / 2 + p.y, h - h / 2 + p.y));
        }
    }

    fn draw(&self, ctx: &mut DrawContext<'_>, anchor: Point) {
        let mid = (anchor.x + ctx.span_end.x) / 2;
        self.text
            .render(ctx.canvas, mid, anchor.y, Gravity::Center);
    }
}
