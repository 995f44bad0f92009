//! The closed set of elements a sequence diagram is made of.
//!
//! Every variant measures its text once, at construction, holds an immutable copy of its style
//! record and implements [`Graphic`]: sizing constraints around its cell, and drawing at the
//! resolved anchor.

mod activity;
mod actor;
mod block;
mod divider;
mod icon;
mod lifeline;
mod note;
mod textbox;
mod title;

pub use activity::{ActivityLine, ActivityLineStyle, ArrowHeadStyle, ArrowHeadStyles};
pub use actor::{ActorBox, ActorBoxPos, ActorBoxStyle, ActorIconBox, ActorIconBoxStyle};
pub use block::{Block, BlockSeparator, BlockStyle, FrameEdges};
pub use divider::{Divider, DividerShape, DividerStyle, DividerStyles};
pub use icon::Icon;
pub use lifeline::{LifeLine, LifeLineEnd, LifeLineStyle};
pub use note::{NoteBox, NoteBoxStyle};
pub use textbox::{TextAlign, TextBox};
pub use title::{Title, TitleStyle};

use crate::grid::{CellSpan, ConstraintApplier, DrawContext, Graphic};
use seqdraw_core::geom::Point;

#[derive(Debug, Clone, PartialEq)]
pub enum GraphBox {
    ActorBox(ActorBox),
    ActorIconBox(ActorIconBox),
    NoteBox(NoteBox),
    ActivityLine(ActivityLine),
    LifeLine(LifeLine),
    Divider(Divider),
    Title(Title),
    Block(Block),
    BlockSeparator(BlockSeparator),
}

impl GraphBox {
    pub fn kind(&self) -> &'static str {
        match self {
            GraphBox::ActorBox(_) => "actor_box",
            GraphBox::ActorIconBox(_) => "actor_icon_box",
            GraphBox::NoteBox(_) => "note_box",
            GraphBox::ActivityLine(_) => "activity_line",
            GraphBox::LifeLine(_) => "life_line",
            GraphBox::Divider(_) => "divider",
            GraphBox::Title(_) => "title",
            GraphBox::Block(_) => "block",
            GraphBox::BlockSeparator(_) => "block_separator",
        }
    }

    /// How far the drawing reaches left of its first anchor and right of its last one, beyond
    /// what the span itself covers. Frames around the element use it to stay clear.
    pub fn reach(&self, span: CellSpan) -> (i32, i32) {
        match self {
            GraphBox::NoteBox(b) => b.reach(span),
            GraphBox::ActivityLine(b) => b.reach(),
            _ => (0, 0),
        }
    }

    fn as_graphic(&self) -> &dyn Graphic {
        match self {
            GraphBox::ActorBox(b) => b,
            GraphBox::ActorIconBox(b) => b,
            GraphBox::NoteBox(b) => b,
            GraphBox::ActivityLine(b) => b,
            GraphBox::LifeLine(b) => b,
            GraphBox::Divider(b) => b,
            GraphBox::Title(b) => b,
            GraphBox::Block(b) => b,
            GraphBox::BlockSeparator(b) => b,
        }
    }
}

impl Graphic for GraphBox {
    fn constraint(&self, span: CellSpan, applier: &mut dyn ConstraintApplier) {
        self.as_graphic().constraint(span, applier);
    }

    fn draw(&self, ctx: &mut DrawContext<'_>, anchor: Point) {
        self.as_graphic().draw(ctx, anchor);
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident),+ $(,)?) => {
        $(
            impl From<$variant> for GraphBox {
                fn from(value: $variant) -> Self {
                    GraphBox::$variant(value)
                }
            }
        )+
    };
}

impl_from_variant!(
    ActorBox,
    ActorIconBox,
    NoteBox,
    ActivityLine,
    LifeLine,
    Divider,
    Title,
    Block,
    BlockSeparator,
);
