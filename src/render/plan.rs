use crate::foundation::core::{BezPath, Canvas, Point, Rgba8};
use crate::foundation::error::{ScrappersError, ScrappersResult};
use crate::render::logo::{LOGO_TEXT, push_glyph};
use crate::render::shapes::{circle, hexagon};
use crate::render::style;
use crate::replay::model::{Bot, Tick};
use crate::viewport::transform::Viewport;

/// What part of the scene a [`DrawOp`] belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrawLayer {
    /// World grid lines.
    Grid,
    /// One letter of the arena logo.
    Logo,
    /// Shot from a bot to its impact point.
    Tracer,
    /// Disc over a destroyed bot.
    Explosion,
    /// Living bot body.
    Body,
    /// Black overlay showing lost health.
    Damage,
    /// Ring around a shielded bot.
    Shield,
}

/// How a path is painted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
    /// Fill only.
    Fill(Rgba8),
    /// Stroke only (transparent fill).
    Stroke {
        /// Stroke color.
        color: Rgba8,
        /// Stroke width in raster pixels.
        width: f64,
    },
    /// Fill, then stroke on top.
    FillStroke {
        /// Fill color.
        fill: Rgba8,
        /// Stroke color.
        stroke: Rgba8,
        /// Stroke width in raster pixels.
        width: f64,
    },
}

/// One path in raster coordinates plus its paint.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawOp {
    /// Scene layer, for inspection.
    pub layer: DrawLayer,
    /// Outline in raster pixel coordinates.
    pub path: BezPath,
    /// Paint applied to `path`.
    pub paint: Paint,
}

/// Backend-agnostic description of one frame, in painter's order.
#[derive(Clone, Debug, PartialEq)]
pub struct FramePlan {
    /// Output raster size.
    pub canvas: Canvas,
    /// Color the raster starts from.
    pub clear: Rgba8,
    /// Draw operations; later ops cover earlier ones.
    pub ops: Vec<DrawOp>,
}

impl FramePlan {
    /// Number of ops on `layer`.
    pub fn count(&self, layer: DrawLayer) -> usize {
        self.ops.iter().filter(|op| op.layer == layer).count()
    }
}

/// Lay out one tick through `viewport`.
///
/// The grid is left out once its lines would fall less than a pixel apart. Fails when a living
/// bot belongs to a player other than `1` (circles) or `2` (hexagons).
pub fn compile_tick(tick: &Tick, viewport: &Viewport) -> ScrappersResult<FramePlan> {
    let mut ops = Vec::with_capacity(32 + tick.bots.len() * 3);
    push_grid(&mut ops, viewport);
    push_logo(&mut ops, viewport);

    for bot in tick.bots.iter().filter(|b| b.fired) {
        let mut path = BezPath::new();
        path.move_to(viewport.point(bot.hit_position()));
        path.line_to(viewport.point(bot.position()));
        ops.push(DrawOp {
            layer: DrawLayer::Tracer,
            path,
            paint: Paint::Stroke {
                color: style::COLOR_TRACER,
                width: 1.0,
            },
        });
    }

    for bot in tick.bots.iter().filter(|b| !b.is_alive()) {
        ops.push(DrawOp {
            layer: DrawLayer::Explosion,
            path: circle(
                viewport.point(bot.position()),
                viewport.length((style::BOT_SIZE * 2) as f64),
            ),
            paint: Paint::Fill(style::COLOR_EXPLOSION),
        });
    }

    for bot in tick.bots.iter().filter(|b| b.is_alive()) {
        push_bot(&mut ops, tick, bot, viewport)?;
    }

    Ok(FramePlan {
        canvas: Canvas::square(viewport.size()),
        clear: style::COLOR_BACKGROUND,
        ops,
    })
}

fn push_grid(ops: &mut Vec<DrawOp>, viewport: &Viewport) {
    // Lines closer than a pixel apart would only smear the background.
    if viewport.length(style::GRID_LINE_SPACING as f64) < 1.0 {
        return;
    }
    let b = viewport.bounds();
    let paint = Paint::Stroke {
        color: style::COLOR_GRID,
        width: 1.0,
    };

    for x in grid_lines(b.min.x, b.max.x) {
        let mut path = BezPath::new();
        path.move_to((viewport.x(x), viewport.y(b.min.y)));
        path.line_to((viewport.x(x), viewport.y(b.max.y)));
        ops.push(DrawOp {
            layer: DrawLayer::Grid,
            path,
            paint,
        });
    }
    for y in grid_lines(b.min.y, b.max.y) {
        let mut path = BezPath::new();
        path.move_to((viewport.x(b.min.x), viewport.y(y)));
        path.line_to((viewport.x(b.max.x), viewport.y(y)));
        ops.push(DrawOp {
            layer: DrawLayer::Grid,
            path,
            paint,
        });
    }
}

/// Multiples of the grid spacing inside `[min, max]`.
pub(crate) fn grid_lines(min: i64, max: i64) -> impl Iterator<Item = i64> {
    let s = style::GRID_LINE_SPACING;
    let first = if min.rem_euclid(s) == 0 {
        min
    } else {
        min - min.rem_euclid(s) + s
    };
    (first..=max).step_by(s as usize)
}

fn push_logo(ops: &mut Vec<DrawOp>, viewport: &Viewport) {
    let unit = viewport.length(style::LOGO_UNIT);
    let paint = Paint::Stroke {
        color: style::COLOR_GRID,
        width: viewport.length(style::LOGO_STROKE),
    };

    let mut x = style::LOGO_ANCHOR.x;
    for letter in LOGO_TEXT.chars() {
        let origin = Point::new(viewport.x(x), viewport.y(style::LOGO_ANCHOR.y));
        let mut path = BezPath::new();
        if push_glyph(&mut path, letter, origin, unit) {
            ops.push(DrawOp {
                layer: DrawLayer::Logo,
                path,
                paint,
            });
        }
        x += style::LOGO_ADVANCE;
    }
}

fn push_bot(ops: &mut Vec<DrawOp>, tick: &Tick, bot: &Bot, viewport: &Viewport) -> ScrappersResult<()> {
    let shape: fn(Point, f64) -> BezPath = match bot.pid {
        1 => circle,
        2 => hexagon,
        other => {
            return Err(ScrappersError::data(format!(
                "tick {}: bot {} belongs to player {other}; only players 1 and 2 can be drawn",
                tick.number, bot.bid
            )));
        }
    };

    let center = viewport.point(bot.position());
    let radius = viewport.length((style::BOT_SIZE / 2) as f64);

    ops.push(DrawOp {
        layer: DrawLayer::Body,
        path: shape(center, radius),
        paint: Paint::FillStroke {
            fill: style::body_color(bot.fire_power, bot.move_power, bot.shield_power),
            stroke: style::COLOR_BLACK,
            width: 1.0,
        },
    });

    let damage = style::damage_fraction(bot.health);
    if damage > 0.0 {
        ops.push(DrawOp {
            layer: DrawLayer::Damage,
            path: shape(center, radius * damage),
            paint: Paint::Fill(style::COLOR_BLACK),
        });
    }

    if bot.shield {
        ops.push(DrawOp {
            layer: DrawLayer::Shield,
            path: circle(center, radius * 1.1),
            paint: Paint::Stroke {
                color: style::COLOR_WHITE,
                width: 1.0,
            },
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;
