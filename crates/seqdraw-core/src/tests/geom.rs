use crate::geom::{Gravity, RectExt, point, rect};

#[test]
fn position_at_round_trips_through_anchor_for_every_gravity() {
    for (w, h) in [(0, 0), (1, 1), (7, 3), (40, 17), (120, 64)] {
        let r = rect(5, -9, w, h);
        for gravity in Gravity::ALL {
            let placed = r.position_at(31, -12, gravity);
            assert_eq!(placed.anchor(gravity), point(31, -12), "{gravity:?} {w}x{h}");
            assert_eq!(placed.size, r.size);
        }
    }
}

#[test]
fn position_at_uses_the_named_reference_point() {
    let r = rect(0, 0, 20, 10);
    assert_eq!(r.position_at(100, 50, Gravity::NorthWest), rect(100, 50, 20, 10));
    assert_eq!(r.position_at(100, 50, Gravity::North), rect(90, 50, 20, 10));
    assert_eq!(r.position_at(100, 50, Gravity::East), rect(80, 45, 20, 10));
    assert_eq!(r.position_at(100, 50, Gravity::West), rect(100, 45, 20, 10));
    assert_eq!(r.position_at(100, 50, Gravity::Center), rect(90, 45, 20, 10));
    assert_eq!(r.position_at(100, 50, Gravity::SouthEast), rect(80, 40, 20, 10));
}

#[test]
fn position_at_does_not_clamp_negative_coordinates() {
    let r = rect(0, 0, 30, 30);
    assert_eq!(r.position_at(0, 0, Gravity::Center), rect(-15, -15, 30, 30));
}

#[test]
fn blow_out_grows_symmetrically_and_keeps_the_center() {
    let r = rect(10, 20, 30, 12);
    let grown = r.blow_out(point(4, 3));
    assert_eq!(grown, rect(6, 17, 38, 18));
    assert_eq!(grown.anchor(Gravity::Center), r.anchor(Gravity::Center));
}

#[test]
fn blow_out_of_an_empty_rect_is_just_the_padding() {
    let grown = rect(0, 0, 0, 0).blow_out(point(8, 4));
    assert_eq!(grown.size.width, 16);
    assert_eq!(grown.size.height, 8);
}
