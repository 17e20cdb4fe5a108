use super::*;
use crate::foundation::core::WorldPoint;
use crate::viewport::policy::ViewportPolicy;
use kurbo::Shape;

fn bot(pid: i64, x: i64, y: i64, health: i64) -> Bot {
    Bot {
        pid,
        bid: 1,
        x,
        y,
        health,
        ..Bot::default()
    }
}

fn plan_for(bots: Vec<Bot>) -> ScrappersResult<FramePlan> {
    let tick = Tick { number: 3, bots };
    let vp = ViewportPolicy::default().fit(tick.bounds().unwrap(), 600);
    compile_tick(&tick, &vp)
}

#[test]
fn lone_healthy_bot_draws_only_grid_logo_and_body() {
    let plan = plan_for(vec![bot(1, 0, 0, 12)]).unwrap();
    assert_eq!(plan.canvas, Canvas::square(600));
    assert_eq!(plan.clear, style::COLOR_BACKGROUND);
    // Viewport spans -120..=120: one vertical and one horizontal line at 0.
    assert_eq!(plan.count(DrawLayer::Grid), 2);
    assert_eq!(plan.count(DrawLayer::Logo), LOGO_TEXT.len());
    assert_eq!(plan.count(DrawLayer::Body), 1);
    for layer in [
        DrawLayer::Tracer,
        DrawLayer::Explosion,
        DrawLayer::Damage,
        DrawLayer::Shield,
    ] {
        assert_eq!(plan.count(layer), 0, "{layer:?}");
    }
}

#[test]
fn layers_follow_painter_order() {
    let mut shooter = bot(1, 0, 0, 6);
    shooter.fired = true;
    shooter.hit_x = 300;
    shooter.hit_y = 40;
    shooter.shield = true;
    let plan = plan_for(vec![shooter, bot(2, 400, 400, 0)]).unwrap();

    let rank = |layer: DrawLayer| match layer {
        DrawLayer::Grid => 0,
        DrawLayer::Logo => 1,
        DrawLayer::Tracer => 2,
        DrawLayer::Explosion => 3,
        DrawLayer::Body | DrawLayer::Damage | DrawLayer::Shield => 4,
    };
    let ranks: Vec<_> = plan.ops.iter().map(|op| rank(op.layer)).collect();
    assert!(ranks.windows(2).all(|w| w[0] <= w[1]), "{ranks:?}");

    let tail: Vec<_> = plan.ops.iter().rev().take(3).map(|op| op.layer).collect();
    assert_eq!(
        tail,
        vec![DrawLayer::Shield, DrawLayer::Damage, DrawLayer::Body]
    );
}

#[test]
fn tracer_runs_from_impact_to_bot() {
    let mut b = bot(1, 0, 0, 12);
    b.fired = true;
    b.hit_x = 100;
    b.hit_y = 0;
    let tick = Tick {
        number: 0,
        bots: vec![b],
    };
    let vp = ViewportPolicy::default().fit(tick.bounds().unwrap(), 600);
    let plan = compile_tick(&tick, &vp).unwrap();
    let tracer = plan
        .ops
        .iter()
        .find(|op| op.layer == DrawLayer::Tracer)
        .unwrap();
    let els = tracer.path.elements();
    assert_eq!(els[0], kurbo::PathEl::MoveTo(vp.point(WorldPoint::new(100, 0))));
    assert_eq!(els[1], kurbo::PathEl::LineTo(vp.point(WorldPoint::new(0, 0))));
    assert!(matches!(
        tracer.paint,
        Paint::Stroke { color, width } if color == style::COLOR_TRACER && width == 1.0
    ));
}

#[test]
fn dead_bots_explode_instead_of_drawing_a_body() {
    let plan = plan_for(vec![bot(1, 0, 0, 12), bot(2, 50, 50, -3)]).unwrap();
    assert_eq!(plan.count(DrawLayer::Explosion), 1);
    assert_eq!(plan.count(DrawLayer::Body), 1);

    let explosion = plan
        .ops
        .iter()
        .find(|op| op.layer == DrawLayer::Explosion)
        .unwrap();
    assert_eq!(explosion.paint, Paint::Fill(style::COLOR_EXPLOSION));
    let body = plan
        .ops
        .iter()
        .find(|op| op.layer == DrawLayer::Body)
        .unwrap();
    let ratio = explosion.path.bounding_box().height() / body.path.bounding_box().height();
    assert!((ratio - 4.0).abs() < 1e-9, "{ratio}");
}

#[test]
fn damage_overlay_scales_with_lost_health() {
    let plan = plan_for(vec![bot(2, 0, 0, 6)]).unwrap();
    let body = plan.ops.iter().find(|op| op.layer == DrawLayer::Body).unwrap();
    let damage = plan
        .ops
        .iter()
        .find(|op| op.layer == DrawLayer::Damage)
        .unwrap();
    let ratio = damage.path.bounding_box().width() / body.path.bounding_box().width();
    assert!((ratio - 0.5).abs() < 1e-9, "{ratio}");
    assert_eq!(damage.paint, Paint::Fill(style::COLOR_BLACK));
}

#[test]
fn overhealed_bots_have_no_damage_overlay() {
    let plan = plan_for(vec![bot(1, 0, 0, 20)]).unwrap();
    assert_eq!(plan.count(DrawLayer::Damage), 0);
}

#[test]
fn shield_ring_is_wider_than_the_body() {
    let mut b = bot(1, 0, 0, 12);
    b.shield = true;
    let plan = plan_for(vec![b]).unwrap();
    let body = plan.ops.iter().find(|op| op.layer == DrawLayer::Body).unwrap();
    let shield = plan
        .ops
        .iter()
        .find(|op| op.layer == DrawLayer::Shield)
        .unwrap();
    let ratio = shield.path.bounding_box().height() / body.path.bounding_box().height();
    assert!((ratio - 1.1).abs() < 1e-9);
    assert!(matches!(shield.paint, Paint::Stroke { color, .. } if color == style::COLOR_WHITE));
}

#[test]
fn body_color_comes_from_power_levels() {
    let mut b = bot(1, 0, 0, 12);
    b.fire_power = 12;
    b.move_power = 6;
    b.shield_power = 0;
    let plan = plan_for(vec![b]).unwrap();
    let body = plan.ops.iter().find(|op| op.layer == DrawLayer::Body).unwrap();
    assert_eq!(
        body.paint,
        Paint::FillStroke {
            fill: Rgba8::opaque(252, 126, 0),
            stroke: style::COLOR_BLACK,
            width: 1.0,
        }
    );
}

#[test]
fn unknown_player_is_a_data_error() {
    let err = plan_for(vec![bot(3, 0, 0, 12)]).unwrap_err();
    assert!(matches!(err, ScrappersError::Data(_)));
    assert!(err.to_string().contains("player 3"));
}

#[test]
fn unknown_player_is_fine_once_exploded() {
    let plan = plan_for(vec![bot(3, 0, 0, 0)]).unwrap();
    assert_eq!(plan.count(DrawLayer::Explosion), 1);
}

#[test]
fn grid_lines_hit_exact_multiples() {
    assert_eq!(grid_lines(-120, 120).collect::<Vec<_>>(), vec![0]);
    assert_eq!(
        grid_lines(-400, 400).collect::<Vec<_>>(),
        vec![-360, -180, 0, 180, 360]
    );
    assert_eq!(grid_lines(180, 360).collect::<Vec<_>>(), vec![180, 360]);
    assert_eq!(grid_lines(1, 179).count(), 0);
}

#[test]
fn grid_is_dropped_when_lines_would_be_sub_pixel() {
    let wide = plan_for(vec![bot(1, -20_000_000, 0, 12), bot(2, 20_000_000, 0, 12)]).unwrap();
    assert_eq!(wide.count(DrawLayer::Grid), 0);
    assert_eq!(wide.count(DrawLayer::Body), 2);

    // 100_000 units plus padding still leaves about a pixel between lines.
    let dense = plan_for(vec![bot(1, 0, 0, 12), bot(2, 100_000, 0, 12)]).unwrap();
    assert!(dense.count(DrawLayer::Grid) > 1000);
}
