//! Sequence diagram assembly: actors become columns, events become rows.
//!
//! Row layout, top to bottom:
//! - the title row, when the diagram has a title;
//! - the actor row;
//! - one row per message, note, divider and block segment, and a header and a footer row per
//!   block;
//! - the mirrored actor row, when [`LayoutOptions::mirror_actors`] is set.

use crate::canvas::Canvas;
use crate::graphbox::{
    ActivityLine, ActorBox, ActorBoxPos, ActorIconBox, Block, BlockSeparator, Divider, FrameEdges,
    GraphBox, Icon, LifeLine, LifeLineEnd, NoteBox, Title,
};
use crate::grid::{Cell, CellSpan, Grid, GridLayout};
use crate::styles::{DiagramStyles, StyleName};
use crate::svg::{self, SvgRenderOptions};
use crate::text::TextMeasurer;
use crate::{LayoutOptions, Result};
use seqdraw_core::geom::Size;
use seqdraw_core::{BlockSegment, BlockStart, Diagram, Directives, Event, NotePosition};
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Which grid row each part of the diagram landed on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RowMap {
    pub title: Option<usize>,
    pub actors: usize,
    /// Row of every event, in event order. Block starts map to their header row, block segments
    /// to their separator row and block ends to their footer row.
    pub events: Vec<usize>,
    pub bottom_actors: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct SequenceDiagramLayout {
    grid: Grid<GraphBox>,
    resolved: GridLayout,
    rows: RowMap,
    directives: Directives,
}

impl SequenceDiagramLayout {
    pub fn grid(&self) -> &Grid<GraphBox> {
        &self.grid
    }

    pub fn resolved(&self) -> &GridLayout {
        &self.resolved
    }

    pub fn rows(&self) -> &RowMap {
        &self.rows
    }

    /// Settings carried by the diagram's processing instructions.
    pub fn directives(&self) -> &Directives {
        &self.directives
    }

    pub fn size(&self) -> Size {
        self.resolved.size()
    }

    pub fn draw(&self) -> Canvas {
        let mut canvas = Canvas::new();
        self.grid.draw(&self.resolved, &mut canvas);
        canvas
    }

    pub fn render_svg(&self, options: &SvgRenderOptions) -> String {
        svg::render_svg(&self.draw(), self.size(), options)
    }

    pub fn write_svg<W: std::io::Write>(
        &self,
        writer: &mut W,
        options: &SvgRenderOptions,
    ) -> Result<()> {
        svg::write_svg(writer, &self.draw(), self.size(), options)
    }
}

#[derive(Debug)]
struct OpenBlock<'a> {
    start: &'a BlockStart,
    header_row: usize,
    /// Columns the block's events touch, with how far they draw left and right of each.
    reach: BTreeMap<usize, (i32, i32)>,
    segments: Vec<(usize, &'a BlockSegment)>,
    nested_depth: usize,
}

impl<'a> OpenBlock<'a> {
    fn new(start: &'a BlockStart, header_row: usize) -> Self {
        Self {
            start,
            header_row,
            reach: BTreeMap::new(),
            segments: Vec::new(),
            nested_depth: 0,
        }
    }

    fn touch(&mut self, col: usize, left: i32, right: i32) {
        let entry = self.reach.entry(col).or_insert((0, 0));
        entry.0 = entry.0.max(left);
        entry.1 = entry.1.max(right);
    }

    fn columns(&self) -> (usize, usize) {
        match (self.reach.keys().next(), self.reach.keys().next_back()) {
            (Some(&lo), Some(&hi)) => (lo, hi),
            _ => (0, 0),
        }
    }

    fn reach_at(&self, col: usize) -> (i32, i32) {
        self.reach.get(&col).copied().unwrap_or((0, 0))
    }
}

fn touch_innermost(stack: &mut [OpenBlock<'_>], span: CellSpan, reach: (i32, i32)) {
    if let Some(block) = stack.last_mut() {
        let lo = span.from.col.min(span.to.col);
        let hi = span.from.col.max(span.to.col);
        block.touch(lo, reach.0, 0);
        block.touch(hi, 0, reach.1);
    }
}

pub fn layout_sequence_diagram(
    diagram: &Diagram,
    styles: &DiagramStyles,
    options: &LayoutOptions,
) -> Result<SequenceDiagramLayout> {
    diagram.validate()?;

    let directives = Directives::from_instructions(&diagram.processing_instructions);
    let styles: Cow<'_, DiagramStyles> = match directives.style.as_deref() {
        Some(name) => Cow::Owned(DiagramStyles::named(name.parse::<StyleName>()?)),
        None => Cow::Borrowed(styles),
    };
    let styles = styles.as_ref();
    let measurer: &dyn TextMeasurer = options.text_measurer.as_ref();

    let icons = diagram
        .actors
        .iter()
        .map(|actor| actor.icon.as_deref().map(str::parse::<Icon>).transpose())
        .collect::<seqdraw_core::Result<Vec<_>>>()?;

    let actor_count = diagram.actors.len();
    let last_col = actor_count.saturating_sub(1);
    let mut next_row = 0usize;
    let mut take_row = || {
        let row = next_row;
        next_row += 1;
        row
    };

    let mut rows = RowMap {
        title: diagram.title.as_ref().map(|_| take_row()),
        actors: take_row(),
        ..RowMap::default()
    };

    let mut event_items: Vec<(CellSpan, GraphBox)> = Vec::new();
    let mut stack: Vec<OpenBlock<'_>> = Vec::new();

    for event in &diagram.events {
        match event {
            Event::Message(msg) => {
                let row = take_row();
                rows.events.push(row);
                let line: GraphBox = ActivityLine::new(
                    &msg.label,
                    msg.arrow,
                    msg.from == msg.to,
                    &styles.activity_line,
                    &styles.arrow_heads,
                    measurer,
                )
                .into();
                let span = CellSpan::new(Cell::new(row, msg.from), Cell::new(row, msg.to));
                touch_innermost(&mut stack, span, line.reach(span));
                event_items.push((span, line));
            }
            Event::Note(note) => {
                let row = take_row();
                rows.events.push(row);
                let other = match note.span_to {
                    Some(other) if other != note.actor && note.position != NotePosition::Over => {
                        tracing::warn!(
                            position = %note.position,
                            "note spans two actors but is not placed over them; ignoring the second actor"
                        );
                        note.actor
                    }
                    Some(other) => other,
                    None => note.actor,
                };
                let mut note_box =
                    NoteBox::new(&note.text, &styles.note_box, note.position, measurer);
                let (lo, hi) = (note.actor.min(other), note.actor.max(other));
                if lo != hi {
                    note_box = note_box.with_overlap(styles.multi_note_overlap);
                }
                let note_box: GraphBox = note_box.into();
                let span = CellSpan::new(Cell::new(row, lo), Cell::new(row, hi));
                touch_innermost(&mut stack, span, note_box.reach(span));
                event_items.push((span, note_box));
            }
            Event::BlockStart(start) => {
                let row = take_row();
                rows.events.push(row);
                stack.push(OpenBlock::new(start, row));
            }
            Event::BlockSegment(segment) => {
                let row = take_row();
                rows.events.push(row);
                // Segments inside a block are checked by `Diagram::validate`.
                if let Some(block) = stack.last_mut() {
                    block.segments.push((row, segment));
                }
            }
            Event::BlockEnd => {
                let row = take_row();
                rows.events.push(row);
                // Balanced blocks are checked by `Diagram::validate`.
                let Some(block) = stack.pop() else {
                    continue;
                };
                let (lo, hi) = block.columns();
                let frame = Block::new(
                    &block.start.kind,
                    &block.start.condition,
                    block.nested_depth,
                    &styles.block,
                    measurer,
                );
                let separators: Vec<(usize, BlockSeparator)> = block
                    .segments
                    .iter()
                    .map(|(row, segment)| {
                        let separator =
                            BlockSeparator::new(&segment.condition, &styles.block, measurer);
                        (*row, separator)
                    })
                    .collect();
                let min_width = separators
                    .iter()
                    .map(|(_, separator)| separator.min_width())
                    .fold(frame.min_width(), i32::max);
                let edges = FrameEdges {
                    left: frame.inset() + block.reach_at(lo).0,
                    right: frame.inset() + block.reach_at(hi).1,
                    min_width,
                };

                if let Some(parent) = stack.last_mut() {
                    let (left, right) = edges.outer(lo == hi);
                    parent.touch(lo, left - frame.inset(), 0);
                    parent.touch(hi, 0, right - frame.inset());
                    parent.nested_depth = parent.nested_depth.max(block.nested_depth + 1);
                }
                event_items.push((
                    CellSpan::new(Cell::new(block.header_row, lo), Cell::new(row, hi)),
                    frame.with_edges(edges).into(),
                ));
                for (sep_row, separator) in separators {
                    event_items.push((
                        CellSpan::new(Cell::new(sep_row, lo), Cell::new(sep_row, hi)),
                        separator.with_edges(edges).into(),
                    ));
                }
            }
            Event::Divider(divider) => {
                let row = take_row();
                rows.events.push(row);
                let shape = Divider::new(
                    &divider.label,
                    styles.divider.get(divider.divider_type),
                    measurer,
                );
                event_items.push((
                    CellSpan::new(Cell::new(row, 0), Cell::new(row, last_col)),
                    shape.into(),
                ));
            }
        }
    }

    if options.mirror_actors && actor_count > 0 {
        rows.bottom_actors = Some(take_row());
    }
    let row_count = next_row;
    let last_row = row_count.saturating_sub(1);

    let mut grid: Grid<GraphBox> = Grid::new(styles.margin);
    grid.ensure_size(row_count, actor_count);

    let lifeline_end = if rows.bottom_actors.is_some() {
        LifeLineEnd::Anchor
    } else {
        LifeLineEnd::Edge
    };
    for col in 0..actor_count {
        grid.put_span(
            CellSpan::new(Cell::new(rows.actors, col), Cell::new(last_row, col)),
            LifeLine::new(&styles.lifeline, lifeline_end).into(),
        );
    }

    let actor_rows = [
        Some((rows.actors, ActorBoxPos::Top)),
        rows.bottom_actors.map(|row| (row, ActorBoxPos::Bottom)),
    ];
    for (row, pos) in actor_rows.into_iter().flatten() {
        for (col, (actor, icon)) in diagram.actors.iter().zip(&icons).enumerate() {
            let item: GraphBox = match icon {
                Some(icon) => {
                    ActorIconBox::new(&actor.name, *icon, &styles.actor_icon_box, pos, measurer)
                        .into()
                }
                None => ActorBox::new(&actor.name, &styles.actor_box, pos, measurer).into(),
            };
            grid.put(Cell::new(row, col), item);
        }
    }

    if let (Some(row), Some(title)) = (rows.title, diagram.title.as_deref()) {
        grid.put_span(
            CellSpan::new(Cell::new(row, 0), Cell::new(row, last_col)),
            Title::new(title, &styles.title, measurer).into(),
        );
    }

    for (span, item) in event_items {
        grid.put_span(span, item);
    }

    let resolved = grid.resolve();
    tracing::debug!(
        actors = actor_count,
        events = diagram.events.len(),
        rows = grid.rows(),
        cols = grid.cols(),
        width = resolved.size().width,
        height = resolved.size().height,
        "laid out sequence diagram"
    );

    Ok(SequenceDiagramLayout {
        grid,
        resolved,
        rows,
        directives,
    })
}
