use super::*;
use crate::foundation::core::WorldPoint;
use crate::foundation::error::ScrappersError;
use crate::replay::model::Bot;

fn wb(min_x: i64, min_y: i64, max_x: i64, max_y: i64) -> WorldBounds {
    WorldBounds::new(WorldPoint::new(min_x, min_y), WorldPoint::new(max_x, max_y))
}

fn tick_with(points: &[(i64, i64)]) -> Tick {
    Tick {
        number: 0,
        bots: points
            .iter()
            .map(|&(x, y)| Bot {
                pid: 1,
                x,
                y,
                health: 12,
                ..Bot::default()
            })
            .collect(),
    }
}

// Fitted bounds span -120..880 on both axes: 1000x1000 world units.
fn thousand_square() -> Viewport {
    ViewportPolicy::default().fit(wb(0, 0, 760, 760), 600)
}

#[test]
fn default_policy_matches_bot_geometry() {
    let p = ViewportPolicy::default();
    assert_eq!(p.padding, 120);
    assert_eq!(p.margin, 60);
    assert_eq!(p.shrink_percent, 75);
    let vp = thousand_square();
    assert_eq!(vp.bounds().width(), 1000);
    assert_eq!(vp.bounds().height(), 1000);
}

#[test]
fn shrink_triggers_without_overflow() {
    let p = ViewportPolicy::default();
    let vp = thousand_square();
    let tick = wb(100, 100, 800, 800);
    assert!(!p.overflows(tick, &vp));
    assert!(p.shrunk(tick, &vp));
    assert_eq!(p.rebuild_reason(tick, &vp), Some(RebuildReason::Shrink));
}

#[test]
fn shrink_needs_both_axes() {
    let p = ViewportPolicy::default();
    let vp = thousand_square();
    assert!(!p.shrunk(wb(100, 0, 800, 760), &vp));
    assert_eq!(p.rebuild_reason(wb(0, 0, 760, 760), &vp), None);
}

#[test]
fn shrink_percentage_truncates() {
    let p = ViewportPolicy::default();
    let vp = thousand_square();
    // 759/1000 = 75.9% truncates to 75 and still counts as shrunk.
    assert!(p.shrunk(wb(0, 0, 759, 759), &vp));
    assert!(!p.shrunk(wb(0, 0, 760, 760), &vp));
}

#[test]
fn margin_crossing_any_edge_overflows() {
    let p = ViewportPolicy::default();
    let vp = thousand_square();
    assert!(!p.overflows(wb(-60, -60, 820, 820), &vp));
    assert!(p.overflows(wb(-61, 0, 760, 760), &vp));
    assert!(p.overflows(wb(0, -61, 760, 760), &vp));
    assert!(p.overflows(wb(0, 0, 821, 760), &vp));
    assert!(p.overflows(wb(0, 0, 760, 821), &vp));
    assert_eq!(
        p.rebuild_reason(wb(0, 0, 900, 760), &vp),
        Some(RebuildReason::Overflow)
    );
}

#[test]
fn decision_is_idempotent() {
    let p = ViewportPolicy::default();
    let vp = thousand_square();
    for tick in [
        wb(100, 100, 800, 800),
        wb(0, 0, 760, 760),
        wb(-500, 0, 10, 10),
    ] {
        assert_eq!(p.rebuild_reason(tick, &vp), p.rebuild_reason(tick, &vp));
    }
}

#[test]
fn tracker_builds_on_first_tick_and_keeps_stable_viewport() {
    let mut tracker = ViewportTracker::new(ViewportPolicy::default(), 600);
    assert!(tracker.current().is_none());

    let (first, reason) = tracker.advance(&tick_with(&[(0, 0), (760, 760)])).unwrap();
    assert_eq!(reason, Some(RebuildReason::Initial));

    let (second, reason) = tracker.advance(&tick_with(&[(0, 0), (770, 765)])).unwrap();
    assert_eq!(reason, None);
    assert_eq!(first, second);
    assert_eq!(tracker.current(), Some(&second));
}

#[test]
fn tracker_rebuilds_from_raw_tick_bounds() {
    let policy = ViewportPolicy::default();
    let mut tracker = ViewportTracker::new(policy, 600);
    tracker.advance(&tick_with(&[(0, 0), (760, 760)])).unwrap();

    let tick = tick_with(&[(2000, 0), (2100, 50)]);
    let (vp, reason) = tracker.advance(&tick).unwrap();
    assert_eq!(reason, Some(RebuildReason::Overflow));
    assert_eq!(vp, policy.fit(tick.bounds().unwrap(), 600));
}

#[test]
fn tracker_single_bot_tick_has_usable_viewport() {
    let mut tracker = ViewportTracker::new(ViewportPolicy::default(), 600);
    let (vp, _) = tracker.advance(&tick_with(&[(5, 5)])).unwrap();
    assert_eq!(vp.bounds().width(), 240);
    assert!((vp.scale() - 2.5).abs() < 1e-12);
}

#[test]
fn tracker_rejects_empty_tick() {
    let mut tracker = ViewportTracker::new(ViewportPolicy::default(), 600);
    assert!(tracker.advance(&tick_with(&[])).is_err());
}

#[test]
fn tracker_rejects_coordinates_near_the_integer_limit() {
    let mut tracker = ViewportTracker::new(ViewportPolicy::default(), 600);
    let err = tracker
        .advance(&tick_with(&[(i64::MAX - 10, 0), (0, 0)]))
        .unwrap_err();
    assert!(matches!(err, ScrappersError::Data(_)), "{err}");
    assert!(tracker.current().is_none());
}

#[test]
fn extreme_padding_does_not_overflow() {
    let policy = ViewportPolicy {
        padding: i64::MAX,
        ..ViewportPolicy::default()
    };
    let vp = policy.fit(wb(0, 0, 10, 10), 600);
    assert!(vp.scale() > 0.0);
    assert!(!policy.shrunk(wb(0, 0, i64::MAX, i64::MAX), &vp));
}
