//! Arena geometry and palette shared by the viewport policy and the frame compiler.

use crate::foundation::core::{Rgba8, WorldPoint};

/// Bot body diameter in world units.
pub const BOT_SIZE: i64 = 60;
/// Health of an undamaged bot.
pub const MAX_BOT_HEALTH: i64 = 12;
/// Highest level of each power allocation.
pub const MAX_POWER: i64 = 12;
/// Grid lines are drawn at world coordinates divisible by this.
pub const GRID_LINE_SPACING: i64 = 180;
/// Channel intensity contributed by each power level (integer `255 / 12`).
pub const POWER_COLOR_WEIGHT: i64 = 255 / MAX_POWER;

/// Top-left corner of the first logo glyph.
pub const LOGO_ANCHOR: WorldPoint = WorldPoint::new(-650, -100);
/// Horizontal distance between logo glyph origins.
pub const LOGO_ADVANCE: i64 = 150;
/// Logo glyph cell unit (cells are 1×2 units).
pub const LOGO_UNIT: f64 = 100.0;
/// Logo stroke width in world units.
pub const LOGO_STROKE: f64 = 24.0;

/// Canvas clear color.
pub const COLOR_BACKGROUND: Rgba8 = Rgba8::opaque(0x00, 0x00, 0x00);
/// Body outlines and the damage overlay.
pub const COLOR_BLACK: Rgba8 = Rgba8::opaque(0x00, 0x00, 0x00);
/// Shield ring.
pub const COLOR_WHITE: Rgba8 = Rgba8::opaque(0xff, 0xff, 0xff);
/// Grid lines and logo strokes.
pub const COLOR_GRID: Rgba8 = Rgba8::opaque(0x1a, 0x1a, 0x1a);
/// Shot tracers.
pub const COLOR_TRACER: Rgba8 = Rgba8::opaque(0xff, 0x00, 0x00);
/// Translucent explosion disc.
pub const COLOR_EXPLOSION: Rgba8 = Rgba8::new(0xff, 0x00, 0x00, 0xcc);

/// Body fill: fire, move and shield power drive red, green and blue.
pub fn body_color(fire: i64, movement: i64, shield: i64) -> Rgba8 {
    let channel = |power: i64| (power.clamp(0, MAX_POWER) * POWER_COLOR_WEIGHT) as u8;
    Rgba8::opaque(channel(fire), channel(movement), channel(shield))
}

/// Fraction of the body covered by the black damage overlay.
pub fn damage_fraction(health: i64) -> f64 {
    (MAX_BOT_HEALTH - health) as f64 / MAX_BOT_HEALTH as f64
}
