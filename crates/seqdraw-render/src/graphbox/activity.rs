use super::textbox::{TextAlign, TextBox};
use crate::canvas::{Canvas, SvgStyle};
use crate::grid::{CellSpan, Constraint, ConstraintApplier, DrawContext, Graphic};
use crate::text::{TextMeasurer, TextStyle};
use seqdraw_core::geom::{Gravity, Point, point};
use seqdraw_core::{Arrow, ArrowDirection, ArrowHead, ArrowStem};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLineStyle {
    pub font: TextStyle,
    pub margin: Point,
    /// Space between the label's bottom edge and the line.
    pub text_gap: i32,
    pub self_ref_width: i32,
    pub self_ref_height: i32,
    #[serde(default)]
    pub color: Option<String>,
}

/// Shape of one arrow head, for a head pointing in +x with its tip at the origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrowHeadStyle {
    pub xs: Vec<i32>,
    pub ys: Vec<i32>,
    pub base_style: String,
}

impl ArrowHeadStyle {
    pub fn new(xs: &[i32], ys: &[i32], base_style: &str) -> Self {
        Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            base_style: base_style.to_string(),
        }
    }

    /// Head outline with its tip on `tip`. `dir` is `1` for a head pointing right, `-1` for left.
    pub fn points(&self, tip: Point, dir: i32) -> Vec<Point> {
        self.xs
            .iter()
            .zip(&self.ys)
            .map(|(&x, &y)| point(tip.x + x * dir, tip.y + y))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrowHeadStyles {
    pub solid: ArrowHeadStyle,
    pub open: ArrowHeadStyle,
    pub barb: ArrowHeadStyle,
    pub lower_barb: ArrowHeadStyle,
}

impl ArrowHeadStyles {
    pub fn get(&self, head: ArrowHead) -> &ArrowHeadStyle {
        match head {
            ArrowHead::Solid => &self.solid,
            ArrowHead::Open => &self.open,
            ArrowHead::Barb => &self.barb,
            ArrowHead::LowerBarb => &self.lower_barb,
        }
    }
}

/// A message: a line between two lifelines (or a loop back to the same one) with its label.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityLine {
    text: TextBox,
    style: ActivityLineStyle,
    arrow: Arrow,
    head: ArrowHeadStyle,
    self_ref: bool,
}

impl ActivityLine {
    pub fn new(
        label: &str,
        arrow: Arrow,
        self_ref: bool,
        style: &ActivityLineStyle,
        heads: &ArrowHeadStyles,
        measurer: &dyn TextMeasurer,
    ) -> Self {
        let align = if self_ref {
            TextAlign::Left
        } else {
            TextAlign::Middle
        };
        let text = TextBox::new(label, &style.font, align, measurer);
        Self {
            text,
            style: style.clone(),
            arrow,
            head: heads.get(arrow.head).clone(),
            self_ref,
        }
    }

    pub fn arrow(&self) -> Arrow {
        self.arrow
    }

    pub fn is_self_ref(&self) -> bool {
        self.self_ref
    }

    /// How far the drawing reaches left and right of its anchors. Only self messages reach out.
    pub fn reach(&self) -> (i32, i32) {
        if self.self_ref {
            let text = self.text.bounding_rect().size.width;
            (0, self.style.self_ref_width + self.style.text_gap + text)
        } else {
            (0, 0)
        }
    }

    fn stem_style(&self) -> SvgStyle {
        let color = self.style.color.as_deref().unwrap_or("black");
        let style = SvgStyle::new().with("stroke", color);
        match self.arrow.stem {
            ArrowStem::Solid => style.with("stroke-width", "2px"),
            ArrowStem::Dashed => style
                .with("stroke-dasharray", "4,2")
                .with("stroke-width", "2px"),
            ArrowStem::Thick => style.with("stroke-width", "4px"),
        }
    }

    fn draw_head(&self, canvas: &mut Canvas, tip: Point, dir: i32) {
        let points = self.head.points(tip, dir);
        let style = SvgStyle::parse(&self.head.base_style);
        match self.arrow.head {
            ArrowHead::Solid | ArrowHead::Open => canvas.polygon(points, style),
            ArrowHead::Barb | ArrowHead::LowerBarb => canvas.polyline(points, style),
        }
    }

    fn self_ref_extent(&self) -> i32 {
        self.style
            .self_ref_height
            .max(self.text.bounding_rect().size.height)
    }

    fn draw_self_ref(&self, ctx: &mut DrawContext<'_>, anchor: Point) {
        let w = self.style.self_ref_width;
        let h = self.style.self_ref_height;
        let y0 = anchor.y - h / 2;
        let y1 = y0 + h;
        let x1 = anchor.x + w;

        ctx.canvas.polyline(
            vec![
                point(anchor.x, y0),
                point(x1, y0),
                point(x1, y1),
                point(anchor.x, y1),
            ],
            self.stem_style().with("fill", "none"),
        );
        self.draw_head(ctx.canvas, point(anchor.x, y1), -1);
        if self.arrow.direction == ArrowDirection::Both {
            self.draw_head(ctx.canvas, point(anchor.x, y0), -1);
        }
        self.text
            .render(ctx.canvas, x1 + self.style.text_gap, anchor.y, Gravity::West);
    }
}

impl Graphic for ActivityLine {
    fn constraint(&self, span: CellSpan, applier: &mut dyn ConstraintApplier) {
        let text = self.text.bounding_rect().size;
        let m = self.style.margin;

        if self.self_ref {
            let extent = self.self_ref_extent();
            let right = self.style.self_ref_width + self.style.text_gap + text.width + m.x;
            applier.apply(Constraint::size(
                span.from,
                0,
                right,
                extent / 2 + m.y,
                extent - extent / 2 + m.y,
            ));
            return;
        }

        applier.apply(Constraint::total_size(
            span.from,
            span.to,
            text.width + 2 * m.x,
            0,
        ));
        applier.apply(Constraint::size(
            span.from,
            0,
            0,
            m.y + text.height + self.style.text_gap,
            m.y,
        ));
    }

    fn draw(&self, ctx: &mut DrawContext<'_>, anchor: Point) {
        if self.self_ref {
            self.draw_self_ref(ctx, anchor);
            return;
        }

        let from = anchor.x;
        let to = ctx.span_end.x;
        let y = anchor.y;
        let dir = if to >= from { 1 } else { -1 };

        ctx.canvas.line(from, y, to, y, self.stem_style());
        self.draw_head(ctx.canvas, point(to, y), dir);
        if self.arrow.direction == ArrowDirection::Both {
            self.draw_head(ctx.canvas, point(from, y), -dir);
        }

        let mid = (from + to) / 2;
        self.text
            .render(ctx.canvas, mid, y - self.style.text_gap, Gravity::South);
    }
}
