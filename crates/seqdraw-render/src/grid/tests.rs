use super::*;
use seqdraw_core::geom::point;

/// Emits constraints relative to its own cell and draws a marker rect.
struct Probe {
    make: fn(Cell) -> Vec<Constraint>,
}

impl Probe {
    fn new(make: fn(Cell) -> Vec<Constraint>) -> Self {
        Self { make }
    }
}

impl Graphic for Probe {
    fn constraint(&self, span: CellSpan, applier: &mut dyn ConstraintApplier) {
        for c in (self.make)(span.from) {
            applier.apply(c);
        }
    }

    fn draw(&self, ctx: &mut DrawContext<'_>, anchor: Point) {
        ctx.canvas.rect(
            anchor.x,
            anchor.y,
            ctx.span_end.x - anchor.x,
            ctx.span_end.y - anchor.y,
            Default::default(),
        );
    }
}

fn resolve(constraints: &[Constraint], rows: usize, cols: usize) -> GridLayout {
    let mut set = ConstraintSet::new();
    for c in constraints {
        set.apply(*c);
    }
    set.resolve(point(8, 8), rows, cols)
}

#[test]
fn empty_grid_is_just_the_margins() {
    let grid: Grid<Probe> = Grid::new(point(8, 8));
    let layout = grid.resolve();
    assert_eq!(layout.size(), Size::new(16, 16));
    assert_eq!(layout.cols.lines, vec![8]);
    assert!(layout.rows.anchors.is_empty());
}

#[test]
fn size_constraints_max_combine() {
    let cell = Cell::new(0, 0);
    let layout = resolve(
        &[
            Constraint::size(cell, 20, 0, 0, 0),
            Constraint::size(cell, 30, 0, 0, 0),
        ],
        1,
        1,
    );
    assert_eq!(layout.cols.anchors, vec![8 + 30]);
}

#[test]
fn add_size_stacks_on_required_in_either_order() {
    let cell = Cell::new(0, 0);
    let add = Constraint::add_size(cell, 0, 0, 10, 0);
    let size = Constraint::size(cell, 0, 0, 40, 0);

    let a = resolve(&[add, size], 1, 1);
    let b = resolve(&[size, add], 1, 1);
    assert_eq!(a, b);
    assert_eq!(a.rows.anchors, vec![8 + 50]);
}

#[test]
fn add_size_accumulates() {
    let cell = Cell::new(0, 0);
    let layout = resolve(
        &[
            Constraint::add_size(cell, 5, 0, 0, 0),
            Constraint::add_size(cell, 7, 0, 0, 0),
            Constraint::size(cell, 3, 0, 0, 0),
        ],
        1,
        1,
    );
    assert_eq!(layout.cols.anchors, vec![8 + 15]);
}

#[test]
fn lines_are_anchor_plus_trailing_extent() {
    let layout = resolve(
        &[
            Constraint::size(Cell::new(0, 0), 10, 20, 1, 2),
            Constraint::size(Cell::new(1, 1), 30, 40, 3, 4),
        ],
        2,
        2,
    );
    assert_eq!(layout.cols.lines, vec![8, 38, 108]);
    assert_eq!(layout.cols.anchors, vec![18, 68]);
    assert_eq!(layout.rows.lines, vec![8, 11, 18]);
    assert_eq!(layout.anchor(Cell::new(1, 1)), point(68, 14));
    assert_eq!(layout.size(), Size::new(116, 26));
}

#[test]
fn lines_are_monotonic() {
    let layout = resolve(
        &[
            Constraint::size(Cell::new(0, 2), 5, 0, 0, 9),
            Constraint::add_size(Cell::new(3, 1), 0, 4, 2, 0),
            Constraint::total_size(Cell::new(0, 0), Cell::new(0, 3), 100, 0),
        ],
        5,
        5,
    );
    for axis in [&layout.cols, &layout.rows] {
        assert!(axis.lines.windows(2).all(|w| w[0] <= w[1]), "{axis:?}");
        for (i, anchor) in axis.anchors.iter().enumerate() {
            assert!(axis.lines[i] <= *anchor && *anchor <= axis.lines[i + 1]);
        }
    }
}

#[test]
fn negative_requirements_are_clamped() {
    let layout = resolve(&[Constraint::size(Cell::new(0, 0), -10, -10, -3, 5)], 1, 1);
    assert_eq!(layout.cols.lines, vec![8, 8]);
    assert_eq!(layout.rows.lines, vec![8, 13]);
}

#[test]
fn total_size_pushes_the_later_anchor() {
    let a = Cell::new(0, 0);
    let b = Cell::new(0, 2);
    let layout = resolve(
        &[
            Constraint::size(a, 10, 10, 0, 0),
            Constraint::size(b, 10, 10, 0, 0),
            Constraint::total_size(a, b, 200, 0),
            Constraint::total_size(b, a, 150, 0),
        ],
        1,
        3,
    );
    assert_eq!(layout.cols.anchor(2) - layout.cols.anchor(0), 200);
    // The middle column is untouched by the span.
    assert_eq!(layout.cols.anchor(1), layout.cols.line(1));
}

#[test]
fn total_size_already_satisfied_is_a_no_op() {
    let a = Cell::new(0, 0);
    let b = Cell::new(0, 1);
    let base = [Constraint::size(a, 0, 50, 0, 0), Constraint::size(b, 50, 0, 0, 0)];
    let without = resolve(&base, 1, 2);
    let mut with = base.to_vec();
    with.push(Constraint::total_size(a, b, 60, 0));
    assert_eq!(resolve(&with, 1, 2), without);
}

#[test]
fn collection_is_idempotent_and_order_free() {
    let mut grid = Grid::new(point(8, 8));
    grid.put(
        Cell::new(0, 0),
        Probe::new(|c| vec![Constraint::size(c, 12, 12, 4, 4)]),
    );
    grid.put(
        Cell::new(0, 0),
        Probe::new(|c| vec![Constraint::add_size(c, 3, 0, 0, 6)]),
    );
    grid.put(
        Cell::new(1, 1),
        Probe::new(|c| vec![Constraint::total_size(Cell::new(c.row, 0), c, 80, 0)]),
    );

    let mut first = Vec::new();
    grid.collect_constraints(&mut first);
    let mut second = Vec::new();
    grid.collect_constraints(&mut second);
    assert_eq!(first, second);

    let forward = resolve(&first, 2, 2);
    let mut reversed = first.clone();
    reversed.reverse();
    assert_eq!(forward, resolve(&reversed, 2, 2));
    assert_eq!(forward, grid.resolve());
}

#[test]
fn draw_visits_items_in_placement_order_at_their_anchors() {
    let mut grid = Grid::new(point(8, 8));
    grid.put(
        Cell::new(0, 0),
        Probe::new(|c| vec![Constraint::size(c, 10, 10, 10, 10)]),
    );
    grid.put_span(
        CellSpan::new(Cell::new(0, 0), Cell::new(1, 1)),
        Probe::new(|c| {
            vec![Constraint::size(Cell::new(c.row + 1, c.col + 1), 10, 10, 10, 10)]
        }),
    );
    let layout = grid.resolve();
    let mut canvas = Canvas::new();
    grid.draw(&layout, &mut canvas);

    let prims = canvas.primitives();
    assert_eq!(prims.len(), 2);
    match (&prims[0], &prims[1]) {
        (
            crate::canvas::Primitive::Rect { x, y, w, h, .. },
            crate::canvas::Primitive::Rect {
                x: x2,
                y: y2,
                w: w2,
                h: h2,
                ..
            },
        ) => {
            assert_eq!((*x, *y, *w, *h), (18, 18, 0, 0));
            assert_eq!((*x2, *y2), (18, 18));
            assert_eq!((*w2, *h2), (20, 20));
        }
        other => panic!("unexpected primitives {other:?}"),
    }
    assert_eq!(
        layout.span_bounds(CellSpan::new(Cell::new(0, 0), Cell::new(1, 1))),
        rect(8, 8, 40, 40)
    );
}
