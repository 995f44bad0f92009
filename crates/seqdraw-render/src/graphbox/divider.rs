use super::textbox::{TextAlign, TextBox};
use crate::canvas::SvgStyle;
use crate::grid::{CellSpan, Constraint, ConstraintApplier, DrawContext, Graphic};
use crate::text::{TextMeasurer, TextStyle};
use seqdraw_core::DividerType;
use seqdraw_core::geom::{Gravity, Point, RectExt};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DividerShape {
    /// Borderless white band covering the lifelines.
    FullRect,
    /// Bordered white band.
    FramedRect,
    /// Horizontal rule, the label knocked out of it.
    FullLine,
    /// Nothing but room (and the label, if any).
    SpacerRect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividerStyle {
    pub font: TextStyle,
    pub padding: Point,
    pub margin: Point,
    pub text_padding: Point,
    pub shape: DividerShape,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividerStyles {
    pub gap: DividerStyle,
    pub frame: DividerStyle,
    pub line: DividerStyle,
    pub spacer: DividerStyle,
}

impl DividerStyles {
    pub fn get(&self, divider_type: DividerType) -> &DividerStyle {
        match divider_type {
            DividerType::Gap => &self.gap,
            DividerType::Frame => &self.frame,
            DividerType::Line => &self.line,
            DividerType::Spacer => &self.spacer,
        }
    }
}

/// A horizontal band across every lifeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Divider {
    text: TextBox,
    style: DividerStyle,
}

impl Divider {
    pub fn new(label: &str, style: &DividerStyle, measurer: &dyn TextMeasurer) -> Self {
        Self {
            text: TextBox::new(label, &style.font, TextAlign::Middle, measurer),
            style: style.clone(),
        }
    }

    pub fn shape(&self) -> DividerShape {
        self.style.shape
    }

    fn band_height(&self) -> i32 {
        self.text.bounding_rect().size.height + 2 * self.style.padding.y
    }
}

impl Graphic for Divider {
    fn constraint(&self, span: CellSpan, applier: &mut dyn ConstraintApplier) {
        let w = self.text.bounding_rect().size.width + 2 * self.style.padding.x;
        let h = self.band_height();
        let m = self.style.margin;

        if span.from.col == span.to.col {
            applier.apply(Constraint::size(
                span.from,
                w / 2,
                w - w / 2,
                h / 2 + m.y,
                h - h / 2 + m.y,
            ));
        } else {
            applier.apply(Constraint::total_size(span.from, span.to, w, 0));
            applier.apply(Constraint::size(span.from, 0, 0, h / 2 + m.y, h - h / 2 + m.y));
        }
    }

    fn draw(&self, ctx: &mut DrawContext<'_>, anchor: Point) {
        let h = self.band_height();
        let left = ctx.bounds.min_x();
        let width = ctx.bounds.size.width;
        let top = anchor.y - h / 2;
        let mid = (anchor.x + ctx.span_end.x) / 2;

        match self.style.shape {
            DividerShape::FullRect => {
                let style = SvgStyle::new()
                    .with("stroke", "none")
                    .with("fill", "white");
                ctx.canvas.rect(left, top, width, h, style);
            }
            DividerShape::FramedRect => {
                let style = SvgStyle::new()
                    .with("stroke", "black")
                    .with("fill", "white")
                    .with("stroke-width", "2px");
                ctx.canvas.rect(left, top, width, h, style);
            }
            DividerShape::FullLine => {
                let style = SvgStyle::new()
                    .with("stroke", "black")
                    .with("stroke-width", "2px");
                ctx.canvas
                    .line(left, anchor.y, left + width, anchor.y, style);
                if !self.text.is_empty() {
                    let knockout = self
                        .text
                        .bounding_rect()
                        .blow_out(self.style.text_padding)
                        .position_at(mid, anchor.y, Gravity::Center);
                    ctx.canvas.rect(
                        knockout.origin.x,
                        knockout.origin.y,
                        knockout.size.width,
                        knockout.size.height,
                        SvgStyle::new().with("stroke", "none").with("fill", "white"),
                    );
                }
            }
            DividerShape::SpacerRect => {}
        }

        self.text
            .render(ctx.canvas, mid, anchor.y, Gravity::Center);
    }
}
