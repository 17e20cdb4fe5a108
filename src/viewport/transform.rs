use crate::foundation::core::{Point, WorldPoint};
use crate::replay::model::WorldBounds;

/// World-to-raster mapping for a square canvas.
///
/// The stored bounds are padded and then squared: the longer axis spans the canvas edge to edge
/// and the shorter axis is widened evenly on both sides, so one scale factor serves both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    bounds: WorldBounds,
    scale: f64,
    size: u32,
}

impl Viewport {
    /// Fit `bounds` (grown by `padding` on every side) onto a `size`×`size` raster.
    pub fn fit(bounds: WorldBounds, padding: i64, size: u32) -> Self {
        let mut b = bounds.inflate(padding);
        let x_len = b.width();
        let y_len = b.height();

        let long = if x_len > y_len {
            let extra = x_len.saturating_sub(y_len);
            b.min.y = b.min.y.saturating_sub(extra / 2);
            b.max.y = b.max.y.saturating_add(extra - extra / 2);
            x_len
        } else {
            let extra = y_len.saturating_sub(x_len);
            b.min.x = b.min.x.saturating_sub(extra / 2);
            b.max.x = b.max.x.saturating_add(extra - extra / 2);
            y_len
        };

        Self {
            bounds: b,
            scale: f64::from(size) / (long.max(1) as f64),
            size,
        }
    }

    /// Padded, squared world bounds covered by the raster.
    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    /// Raster pixels per world unit.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Side length of the target raster.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Raster x for a world x.
    pub fn x(&self, x: i64) -> f64 {
        x.saturating_sub(self.bounds.min.x) as f64 * self.scale
    }

    /// Raster y for a world y.
    pub fn y(&self, y: i64) -> f64 {
        y.saturating_sub(self.bounds.min.y) as f64 * self.scale
    }

    /// Raster position of a world point.
    pub fn point(&self, p: WorldPoint) -> Point {
        Point::new(self.x(p.x), self.y(p.y))
    }

    /// Scale a world length into raster pixels.
    pub fn length(&self, len: f64) -> f64 {
        len * self.scale
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/transform.rs"]
mod tests;
