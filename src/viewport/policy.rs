use crate::foundation::error::ScrappersResult;
use crate::render::style::BOT_SIZE;
use crate::replay::model::{Tick, WorldBounds};
use crate::viewport::transform::Viewport;

/// Why the active [`Viewport`] was replaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RebuildReason {
    /// First tick of the replay.
    Initial,
    /// Bots (plus their radius margin) left the viewport.
    Overflow,
    /// Bots occupy a small fraction of the viewport on both axes.
    Shrink,
}

/// Decides when a tick's bots no longer fit the active viewport well.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewportPolicy {
    /// World units added around tick bounds when fitting a new viewport.
    pub padding: i64,
    /// World units a bot needs around its center to stay fully visible.
    pub margin: i64,
    /// Rebuild once tick extents drop to this percentage of the viewport on both axes.
    pub shrink_percent: i64,
}

impl Default for ViewportPolicy {
    fn default() -> Self {
        Self {
            padding: BOT_SIZE * 2,
            margin: BOT_SIZE,
            shrink_percent: 75,
        }
    }
}

impl ViewportPolicy {
    /// Fit a fresh viewport around raw tick bounds.
    pub fn fit(&self, tick_bounds: WorldBounds, size: u32) -> Viewport {
        Viewport::fit(tick_bounds, self.padding, size)
    }

    /// `true` when margin-grown tick bounds cross any edge of the viewport.
    pub fn overflows(&self, tick_bounds: WorldBounds, current: &Viewport) -> bool {
        !current.bounds().contains(tick_bounds.inflate(self.margin))
    }

    /// `true` when tick extents are at most `shrink_percent` of the viewport on both axes.
    ///
    /// Percentages use integer truncation.
    pub fn shrunk(&self, tick_bounds: WorldBounds, current: &Viewport) -> bool {
        let vb = current.bounds();
        let pct = |this: i64, of: i64| this.checked_mul(100)?.checked_div(of);
        match (
            pct(tick_bounds.width(), vb.width()),
            pct(tick_bounds.height(), vb.height()),
        ) {
            (Some(x), Some(y)) => x <= self.shrink_percent && y <= self.shrink_percent,
            _ => false,
        }
    }

    /// Reason to replace `current` for a tick with `tick_bounds`, if any.
    pub fn rebuild_reason(
        &self,
        tick_bounds: WorldBounds,
        current: &Viewport,
    ) -> Option<RebuildReason> {
        if self.overflows(tick_bounds, current) {
            Some(RebuildReason::Overflow)
        } else if self.shrunk(tick_bounds, current) {
            Some(RebuildReason::Shrink)
        } else {
            None
        }
    }
}

/// Carries the active viewport from tick to tick.
#[derive(Clone, Debug)]
pub struct ViewportTracker {
    policy: ViewportPolicy,
    size: u32,
    current: Option<Viewport>,
}

impl ViewportTracker {
    /// Tracker for a `size`×`size` raster with no viewport yet.
    pub fn new(policy: ViewportPolicy, size: u32) -> Self {
        Self {
            policy,
            size,
            current: None,
        }
    }

    /// Viewport used for the most recent tick.
    pub fn current(&self) -> Option<&Viewport> {
        self.current.as_ref()
    }

    /// Viewport to draw `tick` with, rebuilding it first when the policy asks for it.
    pub fn advance(&mut self, tick: &Tick) -> ScrappersResult<(Viewport, Option<RebuildReason>)> {
        let tick_bounds = tick.bounds()?;
        let reason = match &self.current {
            None => Some(RebuildReason::Initial),
            Some(vp) => self.policy.rebuild_reason(tick_bounds, vp),
        };
        let viewport = match (reason, self.current) {
            (None, Some(vp)) => vp,
            _ => {
                let vp = self.policy.fit(tick_bounds, self.size);
                tracing::debug!(
                    tick = tick.number,
                    ?reason,
                    scale = vp.scale(),
                    "viewport rebuilt"
                );
                vp
            }
        };
        self.current = Some(viewport);
        Ok((viewport, reason))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/policy.rs"]
mod tests;
