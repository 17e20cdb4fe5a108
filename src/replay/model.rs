use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::WorldPoint;
use crate::foundation::error::{ScrappersError, ScrappersResult};

/// Largest absolute world coordinate a replay may use.
pub const MAX_WORLD_COORD: i64 = 1 << 40;

/// One bot as recorded in a single tick.
///
/// Field names follow the match recorder's JSON output (`PID`, `FPow`, ...). Missing fields
/// decode to zero / `false`.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Bot {
    /// Owning player id. Only players `1` and `2` can be drawn.
    #[serde(rename = "PID", alias = "pid")]
    pub pid: i64,
    /// Bot id, unique per player.
    #[serde(rename = "BID", alias = "bid")]
    pub bid: i64,
    /// Current position, horizontal.
    #[serde(rename = "X", alias = "x")]
    pub x: i64,
    /// Current position, vertical.
    #[serde(rename = "Y", alias = "y")]
    pub y: i64,
    /// Movement target, horizontal.
    #[serde(rename = "TX", alias = "tx")]
    pub tx: i64,
    /// Movement target, vertical.
    #[serde(rename = "TY", alias = "ty")]
    pub ty: i64,
    /// Remaining health; `<= 0` means the bot exploded this tick.
    #[serde(rename = "Health", alias = "health")]
    pub health: i64,
    /// Whether the bot fired this tick.
    #[serde(rename = "Fired", alias = "fired")]
    pub fired: bool,
    /// Impact point of this tick's shot, horizontal.
    #[serde(rename = "HitX", alias = "hitx")]
    pub hit_x: i64,
    /// Impact point, vertical.
    #[serde(rename = "HitY", alias = "hity")]
    pub hit_y: i64,
    /// Scrap collected so far.
    #[serde(rename = "Scrap", alias = "scrap")]
    pub scrap: u64,
    /// Whether the shield is up.
    #[serde(rename = "Shield", alias = "shield")]
    pub shield: bool,
    /// Fire power allocation, `0..=12`.
    #[serde(rename = "FPow", alias = "fpow")]
    pub fire_power: i64,
    /// Movement power allocation, `0..=12`.
    #[serde(rename = "MPow", alias = "mpow")]
    pub move_power: i64,
    /// Shield power allocation, `0..=12`.
    #[serde(rename = "SPow", alias = "spow")]
    pub shield_power: i64,
}

impl Bot {
    /// Current position.
    pub fn position(&self) -> WorldPoint {
        WorldPoint::new(self.x, self.y)
    }

    /// Where this tick's shot landed.
    pub fn hit_position(&self) -> WorldPoint {
        WorldPoint::new(self.hit_x, self.hit_y)
    }

    /// `true` while the bot has health left.
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

/// A single simulation snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Tick {
    /// Sequence number assigned by the simulator.
    #[serde(rename = "Tick", alias = "tick", default)]
    pub number: i64,
    /// Every bot alive (or exploding) at this instant.
    #[serde(rename = "Bots", alias = "bots", default)]
    pub bots: Vec<Bot>,
}

impl Tick {
    /// Axis-aligned bounds of every bot position in this tick.
    ///
    /// A tick without bots has no bounds and is rejected, as is any drawn position beyond
    /// [`MAX_WORLD_COORD`].
    pub fn bounds(&self) -> ScrappersResult<WorldBounds> {
        for bot in &self.bots {
            self.check_in_world(bot, "position", bot.position())?;
            if bot.fired {
                self.check_in_world(bot, "hit position", bot.hit_position())?;
            }
        }
        WorldBounds::enclosing(self.bots.iter().map(Bot::position)).ok_or_else(|| {
            ScrappersError::data(format!("tick {} contains no bots", self.number))
        })
    }

    fn check_in_world(&self, bot: &Bot, what: &str, p: WorldPoint) -> ScrappersResult<()> {
        let limit = MAX_WORLD_COORD.unsigned_abs();
        if p.x.unsigned_abs() > limit || p.y.unsigned_abs() > limit {
            return Err(ScrappersError::data(format!(
                "tick {}: bot {} of player {} has {what} ({}, {}) outside ±{MAX_WORLD_COORD}",
                self.number, bot.bid, bot.pid, p.x, p.y
            )));
        }
        Ok(())
    }
}

/// Inclusive axis-aligned rectangle in world coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorldBounds {
    /// Top-left corner.
    pub min: WorldPoint,
    /// Bottom-right corner.
    pub max: WorldPoint,
}

impl WorldBounds {
    /// Create bounds from two corners.
    pub const fn new(min: WorldPoint, max: WorldPoint) -> Self {
        Self { min, max }
    }

    /// Smallest bounds containing every point, or `None` for an empty iterator.
    pub fn enclosing(points: impl IntoIterator<Item = WorldPoint>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut out = Self::new(first, first);
        for p in points {
            out.min.x = out.min.x.min(p.x);
            out.min.y = out.min.y.min(p.y);
            out.max.x = out.max.x.max(p.x);
            out.max.y = out.max.y.max(p.y);
        }
        Some(out)
    }

    /// Grow every side by `by` world units, saturating at the `i64` range.
    pub fn inflate(self, by: i64) -> Self {
        Self {
            min: WorldPoint::new(self.min.x.saturating_sub(by), self.min.y.saturating_sub(by)),
            max: WorldPoint::new(self.max.x.saturating_add(by), self.max.y.saturating_add(by)),
        }
    }

    /// Horizontal extent (`max.x - min.x`), saturating.
    pub fn width(self) -> i64 {
        self.max.x.saturating_sub(self.min.x)
    }

    /// Vertical extent (`max.y - min.y`), saturating.
    pub fn height(self) -> i64 {
        self.max.y.saturating_sub(self.min.y)
    }

    /// `true` when `other` lies entirely inside `self` (edges inclusive).
    pub fn contains(self, other: WorldBounds) -> bool {
        other.min.x >= self.min.x
            && other.min.y >= self.min.y
            && other.max.x <= self.max.x
            && other.max.y <= self.max.y
    }
}

/// A full match recording: ticks in playback order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Replay {
    /// Ticks in the order they are rendered.
    pub ticks: Vec<Tick>,
}

impl Replay {
    /// Wrap already decoded ticks.
    pub fn new(ticks: Vec<Tick>) -> Self {
        Self { ticks }
    }

    /// Decode a replay from its JSON form (a top-level array of ticks).
    pub fn from_json_reader(reader: impl std::io::Read) -> ScrappersResult<Self> {
        let ticks: Vec<Tick> = serde_json::from_reader(reader)
            .map_err(|e| ScrappersError::serde(format!("failed to parse replay JSON: {e}")))?;
        Ok(Self { ticks })
    }

    /// Decode a replay from a JSON string.
    pub fn from_json_str(json: &str) -> ScrappersResult<Self> {
        Self::from_json_reader(json.as_bytes())
    }

    /// Read and decode a replay file.
    pub fn load(path: &Path) -> ScrappersResult<Self> {
        let f = std::fs::File::open(path)
            .with_context(|| format!("open replay '{}'", path.display()))?;
        Self::from_json_reader(std::io::BufReader::new(f))
    }

    /// Number of ticks.
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    /// `true` when there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Reject replays that cannot produce an animation.
    ///
    /// Every tick needs at least one bot so its bounds exist, and drawn coordinates must stay
    /// within [`MAX_WORLD_COORD`]. Unsupported player ids are only detected while drawing, since
    /// exploded bots are never shaped.
    pub fn validate(&self) -> ScrappersResult<()> {
        if self.ticks.is_empty() {
            return Err(ScrappersError::data("replay contains no ticks"));
        }
        for (i, tick) in self.ticks.iter().enumerate() {
            if tick.bots.is_empty() {
                return Err(ScrappersError::data(format!(
                    "tick {} (index {i}) contains no bots",
                    tick.number
                )));
            }
            tick.bounds()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/replay/model.rs"]
mod tests;
