use super::*;
use kurbo::{PathEl, Shape};

#[test]
fn every_logo_letter_has_an_outline() {
    for letter in LOGO_TEXT.chars() {
        let mut path = BezPath::new();
        assert!(push_glyph(&mut path, letter, Point::ZERO, 10.0), "{letter}");
        assert!(!path.elements().is_empty());
    }
}

#[test]
fn unknown_letters_draw_nothing() {
    let mut path = BezPath::new();
    assert!(!push_glyph(&mut path, 'Z', Point::ZERO, 10.0));
    assert!(path.elements().is_empty());
}

#[test]
fn glyphs_fill_a_one_by_two_cell() {
    let mut path = BezPath::new();
    push_glyph(&mut path, 'S', Point::new(5.0, 5.0), 10.0);
    let bbox = path.bounding_box();
    assert_eq!(bbox.x0, 5.0);
    assert_eq!(bbox.y0, 5.0);
    assert_eq!(bbox.x1, 15.0);
    assert_eq!(bbox.y1, 25.0);
}

#[test]
fn crossbars_start_new_subpaths() {
    let mut path = BezPath::new();
    push_glyph(&mut path, 'A', Point::ZERO, 1.0);
    let moves = path
        .elements()
        .iter()
        .filter(|el| matches!(el, PathEl::MoveTo(_)))
        .count();
    assert_eq!(moves, 2);
}
