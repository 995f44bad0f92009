use super::textbox::{TextAlign, TextBox};
use crate::canvas::SvgStyle;
use crate::grid::{Cell, CellSpan, Constraint, ConstraintApplier, DrawContext, Graphic};
use crate::text::{TextMeasurer, TextStyle};
use seqdraw_core::geom::{Gravity, Point, point};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockStyle {
    pub font: TextStyle,
    /// Per-level frame inset (x) and room above the header and below the footer (y).
    pub margin: Point,
    /// Padding around the kind tag and condition text.
    pub text_padding: Point,
    /// Room between the header and the first wrapped event.
    pub message_padding: Point,
    /// Space between the kind tag and the condition.
    pub gap_width: i32,
    /// Extra tag width, also the size of the tag's cut corner.
    pub prefix_extra_width: i32,
    /// Room above and below a segment separator.
    #[serde(default)]
    pub mid_margin: i32,
}

/// Horizontal placement of a block frame, shared by the frame and its segment separators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameEdges {
    /// Distance from the first column's anchor to the frame's left edge.
    pub left: i32,
    /// Distance from the last column's anchor to the frame's right edge.
    pub right: i32,
    /// The frame is never narrower than this.
    pub min_width: i32,
}

impl FrameEdges {
    /// Reserves room for the frame on `row`, between columns `first` and `last`.
    pub fn apply(
        &self,
        row: usize,
        first: usize,
        last: usize,
        applier: &mut dyn ConstraintApplier,
    ) {
        let first_cell = Cell::new(row, first);
        let last_cell = Cell::new(row, last);
        applier.apply(Constraint::size(first_cell, self.left, 0, 0, 0));
        applier.apply(Constraint::size(last_cell, 0, self.right, 0, 0));
        if first == last {
            let (_, right) = self.outer(true);
            applier.apply(Constraint::size(first_cell, 0, right, 0, 0));
        } else {
            applier.apply(Constraint::total_size(
                first_cell,
                last_cell,
                (self.min_width - self.left - self.right).max(0),
                0,
            ));
        }
    }

    /// The frame's left and right x, given the anchors of its first and last column.
    pub fn x_range(&self, first_x: i32, last_x: i32) -> (i32, i32) {
        let x0 = first_x - self.left;
        let x1 = (last_x + self.right).max(x0 + self.min_width);
        (x0, x1)
    }

    /// How far the frame reaches past its first and last anchors once `min_width` is honoured.
    /// Spanning frames get their width from a span constraint instead.
    pub fn outer(&self, single_column: bool) -> (i32, i32) {
        if single_column {
            (self.left, self.right.max(self.min_width - self.left))
        } else {
            (self.left, self.right)
        }
    }
}

/// A frame around a run of events (`alt`, `loop`, `opt`, ...).
///
/// Placed as a span from the header cell (header row, first column) to the footer cell (footer
/// row, last column). The frame's top edge sits on the header row's anchor, its bottom edge on the
/// footer row's anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    kind: TextBox,
    condition: TextBox,
    style: BlockStyle,
    inset: i32,
    edges: FrameEdges,
}

impl Block {
    /// `nested_depth` is the number of block levels inside this one; outer frames are inset
    /// further so that nested frames never touch.
    pub fn new(
        kind: &str,
        condition: &str,
        nested_depth: usize,
        style: &BlockStyle,
        measurer: &dyn TextMeasurer,
    ) -> Self {
        let mut kind_font = style.font.clone();
        kind_font.font_weight = Some("bold".to_string());
        let inset = style.margin.x * (nested_depth as i32 + 1);
        let mut block = Self {
            kind: TextBox::new(kind, &kind_font, TextAlign::Left, measurer),
            condition: TextBox::new(
                &bracketed(condition),
                &style.font,
                TextAlign::Left,
                measurer,
            ),
            style: style.clone(),
            inset,
            edges: FrameEdges::default(),
        };
        block.edges = FrameEdges {
            left: inset,
            right: inset,
            min_width: block.min_width(),
        };
        block
    }

    /// Replaces the default edges (inset only) with ones that also cover the block's contents.
    pub fn with_edges(mut self, edges: FrameEdges) -> Self {
        self.edges = edges;
        self
    }

    pub fn inset(&self) -> i32 {
        self.inset
    }

    pub fn edges(&self) -> FrameEdges {
        self.edges
    }

    /// Width of the header: the kind tag plus the condition.
    pub fn min_width(&self) -> i32 {
        self.header_size().0
    }

    fn tag_size(&self) -> (i32, i32) {
        let kind = self.kind.bounding_rect().size;
        let tp = self.style.text_padding;
        (
            kind.width + 2 * tp.x + self.style.prefix_extra_width,
            kind.height + 2 * tp.y,
        )
    }

    fn header_size(&self) -> (i32, i32) {
        let (tag_w, tag_h) = self.tag_size();
        let cond = self.condition.bounding_rect().size;
        let tp = self.style.text_padding;
        if self.condition.is_empty() {
            (tag_w, tag_h)
        } else {
            (
                tag_w + self.style.gap_width + cond.width + tp.x,
                tag_h.max(cond.height + 2 * tp.y),
            )
        }
    }
}

impl Graphic for Block {
    fn constraint(&self, span: CellSpan, applier: &mut dyn ConstraintApplier) {
        let (_, header_h) = self.header_size();
        let m = self.style.margin;
        let header = span.from;
        let footer = span.to;

        applier.apply(Constraint::size(
            header,
            0,
            0,
            m.y,
            header_h + self.style.message_padding.y,
        ));
        applier.apply(Constraint::size(footer, 0, 0, m.y, m.y));
        self.edges.apply(header.row, header.col, footer.col, applier);
    }

    fn draw(&self, ctx: &mut DrawContext<'_>, anchor: Point) {
        let (x0, x1) = self.edges.x_range(anchor.x, ctx.span_end.x);
        let y0 = anchor.y;
        let y1 = ctx.span_end.y;
        let tp = self.style.text_padding;

        ctx.canvas.rect(
            x0,
            y0,
            x1 - x0,
            y1 - y0,
            SvgStyle::new()
                .with("stroke", "black")
                .with("fill", "none")
                .with("stroke-width", "2px"),
        );

        let (tag_w, tag_h) = self.tag_size();
        let cut = self.style.prefix_extra_width;
        ctx.canvas.polygon(
            vec![
                point(x0, y0),
                point(x0 + tag_w, y0),
                point(x0 + tag_w, y0 + tag_h - cut),
                point(x0 + tag_w - cut, y0 + tag_h),
                point(x0, y0 + tag_h),
            ],
            SvgStyle::new()
                .with("stroke", "black")
                .with("fill", "white")
                .with("stroke-width", "2px"),
        );
        self.kind
            .render(ctx.canvas, x0 + tp.x, y0 + tp.y, Gravity::NorthWest);

        if !self.condition.is_empty() {
            self.condition.render(
                ctx.canvas,
                x0 + tag_w + self.style.gap_width,
                y0 + tp.y,
                Gravity::NorthWest,
            );
        }
    }
}

/// A dashed rule across a block frame that starts its next segment, with the segment's
/// condition underneath.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockSeparator {
    condition: TextBox,
    style: BlockStyle,
    edges: FrameEdges,
}

impl BlockSeparator {
    pub fn new(condition: &str, style: &BlockStyle, measurer: &dyn TextMeasurer) -> Self {
        let condition =
            TextBox::new(&bracketed(condition), &style.font, TextAlign::Left, measurer);
        let mut separator = Self {
            condition,
            style: style.clone(),
            edges: FrameEdges::default(),
        };
        separator.edges.min_width = separator.min_width();
        separator
    }

    /// Uses the edges of the enclosing frame.
    pub fn with_edges(mut self, edges: FrameEdges) -> Self {
        self.edges = edges;
        self
    }

    pub fn edges(&self) -> FrameEdges {
        self.edges
    }

    /// Width of the condition label and its padding.
    pub fn min_width(&self) -> i32 {
        if self.condition.is_empty() {
            0
        } else {
            self.condition.bounding_rect().size.width + 2 * self.style.text_padding.x
        }
    }

    fn label_height(&self) -> i32 {
        if self.condition.is_empty() {
            0
        } else {
            self.condition.bounding_rect().size.height + 2 * self.style.text_padding.y
        }
    }
}

impl Graphic for BlockSeparator {
    fn constraint(&self, span: CellSpan, applier: &mut dyn ConstraintApplier) {
        let mid = self.style.mid_margin;
        applier.apply(Constraint::size(
            span.from,
            0,
            0,
            mid,
            self.label_height() + mid,
        ));
        self.edges.apply(span.from.row, span.from.col, span.to.col, applier);
    }

    fn draw(&self, ctx: &mut DrawContext<'_>, anchor: Point) {
        let (x0, x1) = self.edges.x_range(anchor.x, ctx.span_end.x);
        let tp = self.style.text_padding;
        ctx.canvas.line(
            x0,
            anchor.y,
            x1,
            anchor.y,
            SvgStyle::new()
                .with("stroke", "black")
                .with("stroke-dasharray", "4,4")
                .with("stroke-width", "1px"),
        );
        if !self.condition.is_empty() {
            self.condition.render(
                ctx.canvas,
                x0 + tp.x,
                anchor.y + tp.y,
                Gravity::NorthWest,
            );
        }
    }
}

fn bracketed(condition: &str) -> String {
    let condition = condition.trim();
    if condition.is_empty() {
        String::new()
    } else {
        format!("[{condition}]")
    }
}
