//! Grid constraint layout.
//!
//! Elements are placed on a sparse row/column grid. Every element describes how much room it
//! needs around its cell's anchor; the grid turns those requirements into absolute grid lines.
//!
//! Terminology used below:
//! - a *band* is one row or one column, bounded by two grid lines;
//! - a band's *anchor* sits between its lines: `before` pixels after the leading line and
//!   `after` pixels before the trailing line;
//! - elements draw relative to the anchor of the cell they were placed in.
//!
//! Layout is three phases: [`Grid::collect_constraints`], [`ConstraintSet::resolve`] and
//! [`Grid::draw`].

use crate::canvas::Canvas;
use rustc_hash::FxHashMap;
use seqdraw_core::geom::{Point, Rect, Size, point, rect};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// An inclusive rectangle of cells. The element's anchor is the anchor of `from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellSpan {
    pub from: Cell,
    pub to: Cell,
}

impl CellSpan {
    pub fn single(cell: Cell) -> Self {
        Self {
            from: cell,
            to: cell,
        }
    }

    pub fn new(from: Cell, to: Cell) -> Self {
        Self { from, to }
    }

    pub fn is_single(&self) -> bool {
        self.from == self.to
    }
}

/// A sizing requirement emitted by an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Minimum distance from the cell's anchor to each surrounding grid line.
    /// Max-combined with every other requirement on the same side of the same band.
    Size {
        cell: Cell,
        left: i32,
        right: i32,
        top: i32,
        bottom: i32,
    },
    /// Extra room stacked on top of whatever the band already requires. Summed.
    AddSize {
        cell: Cell,
        left: i32,
        right: i32,
        top: i32,
        bottom: i32,
    },
    /// Minimum distance between the anchors of two columns (`width`) and of two rows
    /// (`height`). Max-combined per pair of bands.
    TotalSize {
        from: Cell,
        to: Cell,
        width: i32,
        height: i32,
    },
}

impl Constraint {
    pub fn size(cell: Cell, left: i32, right: i32, top: i32, bottom: i32) -> Self {
        Constraint::Size {
            cell,
            left,
            right,
            top,
            bottom,
        }
    }

    pub fn add_size(cell: Cell, left: i32, right: i32, top: i32, bottom: i32) -> Self {
        Constraint::AddSize {
            cell,
            left,
            right,
            top,
            bottom,
        }
    }

    pub fn total_size(from: Cell, to: Cell, width: i32, height: i32) -> Self {
        Constraint::TotalSize {
            from,
            to,
            width,
            height,
        }
    }
}

/// Receives constraints during collection.
pub trait ConstraintApplier {
    fn apply(&mut self, constraint: Constraint);
}

impl ConstraintApplier for Vec<Constraint> {
    fn apply(&mut self, constraint: Constraint) {
        self.push(constraint);
    }
}

/// The two accumulators kept for one side of one band.
///
/// Keeping them apart makes collection order irrelevant: `max` and `+` each commute, and the
/// two only meet in [`Extent::resolve`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Extent {
    pub required: i32,
    pub added: i32,
}

impl Extent {
    pub fn combine_max(&mut self, value: i32) {
        self.required = self.required.max(value);
    }

    pub fn combine_add(&mut self, value: i32) {
        self.added += value;
    }

    pub fn resolve(&self) -> i32 {
        self.required + self.added
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BandExtents {
    /// Leading line to anchor (left for columns, top for rows).
    pub before: Extent,
    /// Anchor to trailing line.
    pub after: Extent,
}

#[derive(Debug, Clone, Copy)]
enum Combine {
    Max,
    Add,
}

/// Accumulated requirements for every band of a grid.
#[derive(Debug, Clone, Default)]
pub struct ConstraintSet {
    cols: Vec<BandExtents>,
    rows: Vec<BandExtents>,
    col_spans: FxHashMap<(usize, usize), i32>,
    row_spans: FxHashMap<(usize, usize), i32>,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn col(&self, col: usize) -> BandExtents {
        self.cols.get(col).copied().unwrap_or_default()
    }

    pub fn row(&self, row: usize) -> BandExtents {
        self.rows.get(row).copied().unwrap_or_default()
    }

    pub fn col_span(&self, from: usize, to: usize) -> Option<i32> {
        self.col_spans.get(&(from, to)).copied()
    }

    pub fn row_span(&self, from: usize, to: usize) -> Option<i32> {
        self.row_spans.get(&(from, to)).copied()
    }

    /// Turns the accumulated requirements into grid lines for a `rows` x `cols` grid whose
    /// first lines sit at `margin`.
    pub fn resolve(&self, margin: Point, rows: usize, cols: usize) -> GridLayout {
        let layout = GridLayout {
            margin,
            cols: resolve_axis(margin.x, cols, &self.cols, &self.col_spans),
            rows: resolve_axis(margin.y, rows, &self.rows, &self.row_spans),
        };
        tracing::debug!(
            rows,
            cols,
            width = layout.size().width,
            height = layout.size().height,
            "resolved grid"
        );
        layout
    }

    fn apply_sides(&mut self, cell: Cell, sides: [i32; 4], combine: Combine) {
        let [left, right, top, bottom] = sides.map(|v| clamp_extent(v, cell));
        let col = band_mut(&mut self.cols, cell.col);
        combine_into(&mut col.before, left, combine);
        combine_into(&mut col.after, right, combine);
        let row = band_mut(&mut self.rows, cell.row);
        combine_into(&mut row.before, top, combine);
        combine_into(&mut row.after, bottom, combine);
    }
}

impl ConstraintApplier for ConstraintSet {
    fn apply(&mut self, constraint: Constraint) {
        match constraint {
            Constraint::Size {
                cell,
                left,
                right,
                top,
                bottom,
            } => self.apply_sides(cell, [left, right, top, bottom], Combine::Max),
            Constraint::AddSize {
                cell,
                left,
                right,
                top,
                bottom,
            } => self.apply_sides(cell, [left, right, top, bottom], Combine::Add),
            Constraint::TotalSize {
                from,
                to,
                width,
                height,
            } => {
                let width = clamp_extent(width, from);
                let height = clamp_extent(height, from);
                if from.col != to.col {
                    combine_span(&mut self.col_spans, from.col, to.col, width);
                }
                if from.row != to.row {
                    combine_span(&mut self.row_spans, from.row, to.row, height);
                }
            }
        }
    }
}

fn clamp_extent(value: i32, cell: Cell) -> i32 {
    if value < 0 {
        tracing::warn!(
            row = cell.row,
            col = cell.col,
            value,
            "negative size requirement clamped to zero"
        );
        0
    } else {
        value
    }
}

fn band_mut(bands: &mut Vec<BandExtents>, idx: usize) -> &mut BandExtents {
    if bands.len() <= idx {
        bands.resize(idx + 1, BandExtents::default());
    }
    &mut bands[idx]
}

fn combine_into(extent: &mut Extent, value: i32, combine: Combine) {
    match combine {
        Combine::Max => extent.combine_max(value),
        Combine::Add => extent.combine_add(value),
    }
}

fn combine_span(spans: &mut FxHashMap<(usize, usize), i32>, a: usize, b: usize, value: i32) {
    let key = (a.min(b), a.max(b));
    let slot = spans.entry(key).or_insert(0);
    *slot = (*slot).max(value);
}

fn resolve_axis(
    margin: i32,
    count: usize,
    bands: &[BandExtents],
    spans: &FxHashMap<(usize, usize), i32>,
) -> AxisLayout {
    let mut spans_ending_at: Vec<Vec<(usize, i32)>> = vec![Vec::new(); count];
    for (&(from, to), &width) in spans {
        if let Some(list) = spans_ending_at.get_mut(to) {
            list.push((from, width));
        }
    }

    let mut lines = Vec::with_capacity(count + 1);
    let mut anchors = Vec::with_capacity(count);
    lines.push(margin);
    for (i, ending) in spans_ending_at.iter().enumerate() {
        let band = bands.get(i).copied().unwrap_or_default();
        let mut anchor = lines[i] + band.before.resolve();
        for &(from, width) in ending {
            anchor = anchor.max(anchors[from] + width);
        }
        anchors.push(anchor);
        lines.push(anchor + band.after.resolve());
    }

    AxisLayout { lines, anchors }
}

/// Resolved positions along one axis. `lines` has one more entry than `anchors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AxisLayout {
    pub lines: Vec<i32>,
    pub anchors: Vec<i32>,
}

impl AxisLayout {
    pub fn band_count(&self) -> usize {
        self.anchors.len()
    }

    pub fn anchor(&self, idx: usize) -> i32 {
        match self.anchors.get(idx) {
            Some(&v) => v,
            None => self.end(),
        }
    }

    pub fn line(&self, idx: usize) -> i32 {
        match self.lines.get(idx) {
            Some(&v) => v,
            None => self.end(),
        }
    }

    /// The trailing line of the last band.
    pub fn end(&self) -> i32 {
        self.lines.last().copied().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridLayout {
    pub margin: Point,
    pub cols: AxisLayout,
    pub rows: AxisLayout,
}

impl GridLayout {
    pub fn anchor(&self, cell: Cell) -> Point {
        point(self.cols.anchor(cell.col), self.rows.anchor(cell.row))
    }

    /// The rectangle between the leading lines of `span.from` and the trailing lines of
    /// `span.to`.
    pub fn span_bounds(&self, span: CellSpan) -> Rect {
        let (c0, c1) = ordered(span.from.col, span.to.col);
        let (r0, r1) = ordered(span.from.row, span.to.row);
        let x0 = self.cols.line(c0);
        let x1 = self.cols.line(c1 + 1);
        let y0 = self.rows.line(r0);
        let y1 = self.rows.line(r1 + 1);
        rect(x0, y0, x1 - x0, y1 - y0)
    }

    /// Document size: the last grid lines plus the trailing margin.
    pub fn size(&self) -> Size {
        Size::new(
            self.cols.end() + self.margin.x,
            self.rows.end() + self.margin.y,
        )
    }
}

fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Everything an element may touch while drawing.
pub struct DrawContext<'a> {
    pub canvas: &'a mut Canvas,
    /// Anchor of the last cell the element spans.
    pub span_end: Point,
    /// Bounding grid lines of the element's span.
    pub bounds: Rect,
}

/// A visual element that can live on a [`Grid`].
pub trait Graphic {
    /// Emits the element's sizing requirements. Must be free of side effects and give the same
    /// constraints on every call.
    fn constraint(&self, span: CellSpan, applier: &mut dyn ConstraintApplier);

    fn draw(&self, ctx: &mut DrawContext<'_>, anchor: Point);
}

#[derive(Debug, Clone)]
pub struct Placed<T> {
    pub span: CellSpan,
    pub item: T,
}

#[derive(Debug, Clone)]
pub struct Grid<T> {
    margin: Point,
    items: Vec<Placed<T>>,
    rows: usize,
    cols: usize,
}

impl<T: Graphic> Grid<T> {
    pub fn new(margin: Point) -> Self {
        Self {
            margin,
            items: Vec::new(),
            rows: 0,
            cols: 0,
        }
    }

    pub fn margin(&self) -> Point {
        self.margin
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn items(&self) -> &[Placed<T>] {
        &self.items
    }

    /// Grows the grid so it has at least `rows` x `cols` bands, even if nothing is placed there.
    pub fn ensure_size(&mut self, rows: usize, cols: usize) {
        self.rows = self.rows.max(rows);
        self.cols = self.cols.max(cols);
    }

    pub fn put(&mut self, cell: Cell, item: T) {
        self.put_span(CellSpan::single(cell), item);
    }

    pub fn put_span(&mut self, span: CellSpan, item: T) {
        self.ensure_size(
            span.from.row.max(span.to.row) + 1,
            span.from.col.max(span.to.col) + 1,
        );
        self.items.push(Placed { span, item });
    }

    /// Invokes every element's [`Graphic::constraint`] once, in placement order.
    pub fn collect_constraints(&self, applier: &mut dyn ConstraintApplier) {
        for placed in &self.items {
            placed.item.constraint(placed.span, applier);
        }
    }

    pub fn resolve(&self) -> GridLayout {
        let mut set = ConstraintSet::new();
        self.collect_constraints(&mut set);
        set.resolve(self.margin, self.rows, self.cols)
    }

    /// Draws every element at its resolved anchor, in placement order.
    pub fn draw(&self, layout: &GridLayout, canvas: &mut Canvas) {
        for placed in &self.items {
            let anchor = layout.anchor(placed.span.from);
            let mut ctx = DrawContext {
                canvas: &mut *canvas,
                span_end: layout.anchor(placed.span.to),
                bounds: layout.span_bounds(placed.span),
            };
            placed.item.draw(&mut ctx, anchor);
        }
    }
}

#[cfg(test)]
mod tests;
