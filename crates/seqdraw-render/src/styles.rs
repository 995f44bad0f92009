//! Named style tables.
//!
//! A [`DiagramStyles`] value is chosen once per render and threaded through layout by
//! reference; every element copies the record it needs at construction.

use crate::graphbox::{
    ActivityLineStyle, ActorBoxStyle, ActorIconBoxStyle, ArrowHeadStyle, ArrowHeadStyles,
    BlockStyle, DividerShape, DividerStyle, DividerStyles, LifeLineStyle, NoteBoxStyle,
    TitleStyle,
};
use crate::text::TextStyle;
use seqdraw_core::geom::{Point, point};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const HEAD_STYLE_FILLED: &str = "stroke:black;fill:black;stroke-width:2px;";
const HEAD_STYLE_OPEN: &str = "stroke:black;fill:none;stroke-width:2px;";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramStyles {
    /// Room between the outermost grid lines and the document edge.
    pub margin: Point,
    pub actor_box: ActorBoxStyle,
    pub actor_icon_box: ActorIconBoxStyle,
    pub note_box: NoteBoxStyle,
    /// How far a note over several actors reaches past the outer lifelines.
    pub multi_note_overlap: i32,
    pub activity_line: ActivityLineStyle,
    pub arrow_heads: ArrowHeadStyles,
    pub title: TitleStyle,
    pub block: BlockStyle,
    pub divider: DividerStyles,
    pub lifeline: LifeLineStyle,
}

impl Default for DiagramStyles {
    fn default() -> Self {
        Self::default_style()
    }
}

impl DiagramStyles {
    pub fn default_style() -> Self {
        Self {
            margin: point(8, 8),
            actor_box: ActorBoxStyle {
                font: TextStyle::sized(16.0),
                padding: point(16, 8),
                margin: point(8, 8),
                color: None,
                text_color: None,
            },
            actor_icon_box: ActorIconBoxStyle {
                font: TextStyle::sized(16.0),
                padding: point(16, 8),
                margin: point(8, 8),
                icon_gap: 4,
                color: None,
                text_color: None,
            },
            note_box: NoteBoxStyle {
                font: TextStyle::sized(14.0),
                padding: point(8, 4),
                margin: point(8, 8),
                color: None,
                text_color: None,
            },
            multi_note_overlap: 16,
            activity_line: ActivityLineStyle {
                font: TextStyle::sized(14.0),
                margin: point(16, 8),
                text_gap: 4,
                self_ref_width: 48,
                self_ref_height: 24,
                color: None,
            },
            arrow_heads: arrow_heads(9, 5, 11, 7),
            title: TitleStyle {
                font: TextStyle::sized(20.0),
                padding: point(4, 16),
            },
            block: BlockStyle {
                font: TextStyle::sized(14.0),
                margin: point(8, 8),
                text_padding: point(4, 4),
                message_padding: point(4, 4),
                gap_width: 4,
                prefix_extra_width: 4,
                mid_margin: 4,
            },
            divider: DividerStyles {
                gap: divider(14.0, point(16, 8), point(8, 8), point(0, 0), DividerShape::FullRect),
                frame: divider(
                    14.0,
                    point(16, 8),
                    point(8, 8),
                    point(0, 0),
                    DividerShape::FramedRect,
                ),
                line: divider(14.0, point(16, 4), point(8, 16), point(4, 2), DividerShape::FullLine),
                spacer: divider(
                    14.0,
                    point(16, 4),
                    point(8, 16),
                    point(0, 0),
                    DividerShape::SpacerRect,
                ),
            },
            lifeline: LifeLineStyle {
                stroke_width: 2,
                dash: "4,4".to_string(),
                color: None,
            },
        }
    }

    /// Same horizontal dimensions as the default table, tighter vertically.
    pub fn tight() -> Self {
        let mut s = Self::default_style();
        s.actor_box.padding = point(16, 4);
        s.actor_box.margin = point(8, 4);
        s.actor_icon_box.margin = point(8, 4);
        s.note_box.margin = point(8, 4);
        s.activity_line.self_ref_height = 12;
        s.activity_line.margin = point(16, 4);
        s.title.padding = point(4, 8);
        s
    }

    /// Smaller fonts and margins throughout.
    pub fn small() -> Self {
        Self {
            margin: point(4, 4),
            actor_box: ActorBoxStyle {
                font: TextStyle::sized(14.0),
                padding: point(12, 6),
                margin: point(8, 8),
                color: None,
                text_color: None,
            },
            actor_icon_box: ActorIconBoxStyle {
                font: TextStyle::sized(14.0),
                padding: point(12, 6),
                margin: point(8, 8),
                icon_gap: 2,
                color: None,
                text_color: None,
            },
            note_box: NoteBoxStyle {
                font: TextStyle::sized(12.0),
                padding: point(6, 3),
                margin: point(6, 6),
                color: None,
                text_color: None,
            },
            multi_note_overlap: 8,
            activity_line: ActivityLineStyle {
                font: TextStyle::sized(12.0),
                margin: point(8, 8),
                text_gap: 4,
                self_ref_width: 32,
                self_ref_height: 12,
                color: None,
            },
            arrow_heads: arrow_heads(7, 4, 9, 5),
            title: TitleStyle {
                font: TextStyle::sized(18.0),
                padding: point(2, 8),
            },
            block: BlockStyle {
                font: TextStyle::sized(12.0),
                margin: point(5, 5),
                text_padding: point(3, 2),
                message_padding: point(3, 2),
                gap_width: 3,
                prefix_extra_width: 3,
                mid_margin: 2,
            },
            divider: DividerStyles {
                gap: divider(12.0, point(12, 6), point(6, 6), point(0, 0), DividerShape::FullRect),
                frame: divider(
                    12.0,
                    point(12, 6),
                    point(6, 6),
                    point(0, 0),
                    DividerShape::FramedRect,
                ),
                line: divider(12.0, point(12, 6), point(6, 12), point(2, 1), DividerShape::FullLine),
                spacer: divider(
                    12.0,
                    point(12, 6),
                    point(6, 12),
                    point(2, 1),
                    DividerShape::SpacerRect,
                ),
            },
            lifeline: LifeLineStyle {
                stroke_width: 1,
                dash: "4,4".to_string(),
                color: None,
            },
        }
    }

    pub fn named(name: StyleName) -> Self {
        match name {
            StyleName::Default => Self::default_style(),
            StyleName::Tight => Self::tight(),
            StyleName::Small => Self::small(),
        }
    }

    /// Loads a complete caller-supplied table.
    pub fn from_json_str(text: &str) -> seqdraw_core::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// `solid`/`open` heads are `head_len` long and `2 * head_half` wide; barbs use their own size.
fn arrow_heads(head_len: i32, head_half: i32, barb_len: i32, barb_rise: i32) -> ArrowHeadStyles {
    ArrowHeadStyles {
        solid: ArrowHeadStyle::new(
            &[-head_len, 0, -head_len],
            &[-head_half, 0, head_half],
            HEAD_STYLE_FILLED,
        ),
        open: ArrowHeadStyle::new(
            &[-head_len, 0, -head_len],
            &[-head_half, 0, head_half],
            HEAD_STYLE_OPEN,
        ),
        barb: ArrowHeadStyle::new(&[-barb_len, 0], &[-barb_rise, 0], HEAD_STYLE_FILLED),
        lower_barb: ArrowHeadStyle::new(&[-barb_len, 0], &[barb_rise, 0], HEAD_STYLE_FILLED),
    }
}

fn divider(
    font_size: f64,
    padding: Point,
    margin: Point,
    text_padding: Point,
    shape: DividerShape,
) -> DividerStyle {
    DividerStyle {
        font: TextStyle::sized(font_size),
        padding,
        margin,
        text_padding,
        shape,
    }
}

/// The built-in style tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StyleName {
    #[default]
    Default,
    Tight,
    Small,
}

impl StyleName {
    pub const ALL: [StyleName; 3] = [StyleName::Default, StyleName::Tight, StyleName::Small];

    pub fn as_str(self) -> &'static str {
        match self {
            StyleName::Default => "default",
            StyleName::Tight => "tight",
            StyleName::Small => "small",
        }
    }
}

impl FromStr for StyleName {
    type Err = seqdraw_core::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        StyleName::ALL
            .into_iter()
            .find(|style| style.as_str() == name)
            .ok_or_else(|| seqdraw_core::Error::unknown("style", name))
    }
}

impl fmt::Display for StyleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_names_parse_and_reject_unknown() {
        for name in StyleName::ALL {
            assert_eq!(name.as_str().parse::<StyleName>().unwrap(), name);
        }
        let err = "fancy".parse::<StyleName>().unwrap_err();
        assert_eq!(err.to_string(), "unknown style `fancy`");
    }

    #[test]
    fn default_table_values() {
        let s = DiagramStyles::default_style();
        assert_eq!(s.margin, point(8, 8));
        assert_eq!(s.actor_box.font.font_size, 16.0);
        assert_eq!(s.activity_line.self_ref_width, 48);
        assert_eq!(s.arrow_heads.solid.xs, vec![-9, 0, -9]);
        assert_eq!(s.arrow_heads.lower_barb.ys, vec![7, 0]);
        assert_eq!(s.divider.line.shape, DividerShape::FullLine);
    }

    #[test]
    fn tight_only_shrinks_vertically() {
        let d = DiagramStyles::default_style();
        let t = DiagramStyles::tight();
        assert_eq!(d.actor_box.padding.x, t.actor_box.padding.x);
        assert!(t.actor_box.padding.y < d.actor_box.padding.y);
        assert!(t.activity_line.self_ref_height < d.activity_line.self_ref_height);
        assert_eq!(d.activity_line.margin.x, t.activity_line.margin.x);
    }

    #[test]
    fn tables_survive_json() {
        let small = DiagramStyles::small();
        let text = serde_json::to_string(&small).unwrap();
        assert_eq!(DiagramStyles::from_json_str(&text).unwrap(), small);
        assert!(DiagramStyles::from_json_str("{\"margin\": [1, 1]}").is_err());
    }
}
