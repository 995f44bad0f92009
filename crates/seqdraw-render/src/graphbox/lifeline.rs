use crate::canvas::SvgStyle;
use crate::grid::{CellSpan, ConstraintApplier, DrawContext, Graphic};
use seqdraw_core::geom::Point;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeLineStyle {
    pub stroke_width: i32,
    pub dash: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// Where the lifeline stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeLineEnd {
    /// At the anchor of the last spanned row (the mirrored actor's center).
    Anchor,
    /// At the bottom grid line of the last spanned row.
    Edge,
}

/// The vertical dashed line below an actor. Takes no room of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifeLine {
    style: LifeLineStyle,
    end: LifeLineEnd,
}

impl LifeLine {
    pub fn new(style: &LifeLineStyle, end: LifeLineEnd) -> Self {
        Self {
            style: style.clone(),
            end,
        }
    }
}

impl Graphic for LifeLine {
    fn constraint(&self, _span: CellSpan, _applier: &mut dyn ConstraintApplier) {}

    fn draw(&self, ctx: &mut DrawContext<'_>, anchor: Point) {
        let end_y = match self.end {
            LifeLineEnd::Anchor => ctx.span_end.y,
            LifeLineEnd::Edge => ctx.bounds.max_y(),
        };
        let style = SvgStyle::new()
            .with("stroke", self.style.color.as_deref().unwrap_or("black"))
            .with("stroke-dasharray", self.style.dash.as_str())
            .with("stroke-width", format!("{}px", self.style.stroke_width));
        ctx.canvas.line(anchor.x, anchor.y, anchor.x, end_y, style);
    }
}
