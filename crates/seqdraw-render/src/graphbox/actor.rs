use super::icon::Icon;
use super::textbox::{TextAlign, TextBox};
use crate::canvas::SvgStyle;
use crate::grid::{CellSpan, Constraint, ConstraintApplier, DrawContext, Graphic};
use crate::text::{TextMeasurer, TextStyle};
use seqdraw_core::geom::{Gravity, Point, Rect, RectExt};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorBoxStyle {
    pub font: TextStyle,
    pub padding: Point,
    pub margin: Point,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub text_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorIconBoxStyle {
    pub font: TextStyle,
    pub padding: Point,
    pub margin: Point,
    /// Space between the icon and the label below it.
    pub icon_gap: i32,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub text_color: Option<String>,
}

/// Which actor row a box belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorBoxPos {
    Top,
    /// The mirrored row below the last event. Column widths are owned by the top row.
    Bottom,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActorBox {
    frame: Rect,
    text: TextBox,
    style: ActorBoxStyle,
    pos: ActorBoxPos,
}

impl ActorBox {
    pub fn new(
        name: &str,
        style: &ActorBoxStyle,
        pos: ActorBoxPos,
        measurer: &dyn TextMeasurer,
    ) -> Self {
        let text = TextBox::new(name, &style.font, TextAlign::Middle, measurer)
            .with_color(style.text_color.clone());
        let frame = text.bounding_rect().blow_out(style.padding);
        Self {
            frame,
            text,
            style: style.clone(),
            pos,
        }
    }

    pub fn pos(&self) -> ActorBoxPos {
        self.pos
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }
}

impl Graphic for ActorBox {
    fn constraint(&self, span: CellSpan, applier: &mut dyn ConstraintApplier) {
        let w = self.frame.size.width;
        let h = self.frame.size.height;
        let m = self.style.margin;
        applier.apply(Constraint::size(
            span.from,
            w / 2 + m.x,
            w - w / 2 + m.x,
            h / 2 + m.y,
            h - h / 2 + m.y,
        ));
    }

    fn draw(&self, ctx: &mut DrawContext<'_>, anchor: Point) {
        let r = self.frame.position_at(anchor.x, anchor.y, Gravity::Center);
        let style = SvgStyle::new()
            .with("stroke", self.style.color.as_deref().unwrap_or("black"))
            .with("fill", "white")
            .with("stroke-width", "2px");
        ctx.canvas.rect(
            r.origin.x,
            r.origin.y,
            r.size.width,
            r.size.height,
            style,
        );
        self.text
            .render(ctx.canvas, anchor.x, anchor.y, Gravity::Center);
    }
}

/// An actor drawn as an icon with its name underneath.
#[derive(Debug, Clone, PartialEq)]
pub struct ActorIconBox {
    icon: Icon,
    text: TextBox,
    style: ActorIconBoxStyle,
    pos: ActorBoxPos,
}

impl ActorIconBox {
    pub fn new(
        name: &str,
        icon: Icon,
        style: &ActorIconBoxStyle,
        pos: ActorBoxPos,
        measurer: &dyn TextMeasurer,
    ) -> Self {
        let text = TextBox::new(name, &style.font, TextAlign::Middle, measurer)
            .with_color(style.text_color.clone());
        Self {
            icon,
            text,
            style: style.clone(),
            pos,
        }
    }

    pub fn icon(&self) -> Icon {
        self.icon
    }

    pub fn pos(&self) -> ActorBoxPos {
        self.pos
    }
}

impl Graphic for ActorIconBox {
    fn constraint(&self, span: CellSpan, applier: &mut dyn ConstraintApplier) {
        let (icon_w, icon_h) = self.icon.size();
        let text = self.text.bounding_rect();
        let w = icon_w.max(text.size.width) + self.style.padding.x;
        let m = self.style.margin;

        let top_h = icon_h / 2;
        let bottom_h =
            icon_h - icon_h / 2 + text.size.height + self.style.icon_gap + self.style.padding.y;

        // The icon's width stacks on top of the column's margin. The bottom row repeats the top
        // row's actors, so only the top row contributes it.
        if self.pos == ActorBoxPos::Top {
            applier.apply(Constraint::size(span.from, m.x / 2, m.x / 2, 0, 0));
            applier.apply(Constraint::add_size(span.from, w / 2, w - w / 2, 0, 0));
        }
        applier.apply(Constraint::size(span.from, 0, 0, top_h, bottom_h));
    }

    fn draw(&self, ctx: &mut DrawContext<'_>, anchor: Point) {
        let (icon_w, icon_h) = self.icon.size();
        let gap = self.style.icon_gap;
        let text_y = anchor.y + icon_h - icon_h / 2 + gap;
        let label = self
            .text
            .bounding_rect()
            .position_at(anchor.x, text_y, Gravity::North);

        // Knock out the lifeline behind the label and the icon.
        let knockout = SvgStyle::new()
            .with("stroke", "white")
            .with("fill", "white");
        if !self.text.is_empty() {
            ctx.canvas.rect(
                label.origin.x,
                label.origin.y - gap,
                label.size.width,
                label.size.height + gap,
                knockout.clone().with("stroke-width", "2px"),
            );
            self.text
                .render(ctx.canvas, anchor.x, text_y, Gravity::North);
        }
        ctx.canvas.rect(
            anchor.x - icon_w / 2,
            anchor.y - icon_h / 2,
            icon_w,
            icon_h,
            knockout.with("stroke-width", "1px"),
        );

        let icon_style = SvgStyle::new()
            .with("stroke", self.style.color.as_deref().unwrap_or("black"))
            .with("fill", "white")
            .with("stroke-width", "2px");
        self.icon.draw(ctx.canvas, anchor.x, anchor.y, &icon_style);
    }
}
