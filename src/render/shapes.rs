use std::f64::consts::TAU;

use crate::foundation::core::{BezPath, Point};

/// Closed circle approximation made of two cubic segments.
///
/// The path runs from the top extreme down the right side to the bottom extreme and back up the
/// left side. Control points sit `r * 4/3` to the side of the extremes, which traces a circle of
/// radius `r` for each half.
pub fn circle(center: Point, radius: f64) -> BezPath {
    let cp = radius * 4.0 / 3.0;
    let top = Point::new(center.x, center.y - radius);
    let bottom = Point::new(center.x, center.y + radius);

    let mut path = BezPath::new();
    path.move_to(top);
    path.curve_to(
        Point::new(center.x + cp, center.y - radius),
        Point::new(center.x + cp, center.y + radius),
        bottom,
    );
    path.curve_to(
        Point::new(center.x - cp, center.y + radius),
        Point::new(center.x - cp, center.y - radius),
        top,
    );
    path.close_path();
    path
}

/// Closed regular hexagon with vertices at `k * 60°` from the positive x axis.
pub fn hexagon(center: Point, radius: f64) -> BezPath {
    const SIDES: usize = 6;

    let mut path = BezPath::new();
    for k in 1..=SIDES {
        let angle = TAU * (k as f64) / (SIDES as f64);
        let p = Point::new(
            center.x + angle.cos() * radius,
            center.y + angle.sin() * radius,
        );
        if k == 1 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    path.close_path();
    path
}

#[cfg(test)]
#[path = "../../tests/unit/render/shapes.rs"]
mod tests;
