use crate::foundation::core::{BezPath, Point};

/// Letters spelled out by the arena logo.
pub const LOGO_TEXT: &str = "SCRAPPERS";

/// Append the stroke outline of `letter` to `path`.
///
/// Glyphs live in a cell one `unit` wide and two `unit`s tall with `origin` at the top-left.
/// Only the letters of [`LOGO_TEXT`] have outlines; anything else returns `false`.
pub fn push_glyph(path: &mut BezPath, letter: char, origin: Point, unit: f64) -> bool {
    let at = |dx: f64, dy: f64| Point::new(origin.x + dx * unit, origin.y + dy * unit);
    let strokes: &[&[(f64, f64)]] = match letter {
        'S' => &[&[(1.0, 0.0), (0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 2.0), (0.0, 2.0)]],
        'C' => &[&[(1.0, 0.0), (0.0, 0.0), (0.0, 2.0), (1.0, 2.0)]],
        'R' => &[
            &[(0.0, 2.0), (0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)],
            &[(0.5, 1.0), (1.0, 2.0)],
        ],
        'A' => &[
            &[(0.0, 2.0), (0.0, 0.0), (1.0, 0.0), (1.0, 2.0)],
            &[(0.0, 1.0), (1.0, 1.0)],
        ],
        'P' => &[&[(0.0, 2.0), (0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]],
        'E' => &[
            &[(1.0, 0.0), (0.0, 0.0), (0.0, 2.0), (1.0, 2.0)],
            &[(0.0, 1.0), (1.0, 1.0)],
        ],
        _ => return false,
    };

    for stroke in strokes {
        let mut points = stroke.iter().map(|&(dx, dy)| at(dx, dy));
        if let Some(first) = points.next() {
            path.move_to(first);
        }
        for p in points {
            path.line_to(p);
        }
    }
    true
}

#[cfg(test)]
#[path = "../../tests/unit/render/logo.rs"]
mod tests;
