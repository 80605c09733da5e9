use sidesheet_drawer::policy::{apply_resistance, resolve_release, RESISTANCE_FACTOR};
use sidesheet_drawer::{
    DrawerConfig, DrawerPhase, KeyboardPhase, SafeAreaInsets, ScreenGeometry, SettleKind,
    SettleTarget, SurfaceHit, Theme,
};
use sidesheet_testing::robot_assertions::{
    assert_approx_eq, assert_color_approx_eq, assert_non_decreasing, assert_rect_approx_eq,
};
use sidesheet_testing::DrawerRobot;
use sidesheet_ui_graphics::{Color, Point, Rect};

const W: f32 = 390.0;
const H: f32 = 844.0;

fn robot() -> DrawerRobot {
    DrawerRobot::new(W, H)
}

fn open(robot: &mut DrawerRobot) {
    robot.drag(10.0, 400.0, 250.0, 400.0);
    robot.wait_for_idle();
    assert_eq!(robot.phase(), DrawerPhase::IdleOpen);
    assert_eq!(robot.offset(), W);
}

#[test]
fn drag_tracks_finger_then_resists_overtravel() {
    let mut robot = robot();
    robot.press(10.0, 400.0);
    robot.move_to(30.0, 400.0);
    assert_eq!(robot.offset(), 20.0);
    robot.move_to(10.0 + W, 400.0);
    assert_eq!(robot.offset(), W);

    let mut previous = robot.offset();
    for extra in [50.0, 100.0, 200.0, 400.0] {
        robot.move_to(10.0 + W + extra, 400.0);
        let expected = W + extra * RESISTANCE_FACTOR;
        assert_approx_eq(robot.offset(), expected, 1e-3, "resisted offset");
        assert!(robot.offset() > previous);
        previous = robot.offset();
    }
}

#[test]
fn progress_always_equals_offset_over_threshold() {
    let mut robot = robot();
    robot.press(10.0, 400.0);
    for step in 1..40 {
        robot.move_to(10.0 + step as f32 * 15.0, 400.0);
        let frame = robot.frame();
        assert_eq!(frame.progress, frame.offset / W);
    }
    robot.release();
    for _ in 0..60 {
        robot.advance_frame();
        let frame = robot.frame();
        assert_eq!(frame.progress, frame.offset / W);
    }
}

#[test]
fn slow_rightward_release_from_tiny_drag_still_opens() {
    let mut robot = robot();
    robot.drag_with_steps(10.0, 400.0, 24.0, 400.0, 7);
    assert_eq!(
        robot.phase(),
        DrawerPhase::Settling(SettleKind::Spring { target: W })
    );
    robot.wait_for_idle();
    assert_eq!(robot.phase(), DrawerPhase::IdleOpen);
}

#[test]
fn fast_leftward_fling_from_half_open_decays_closed() {
    let mut robot = robot();
    robot.drag_and_hold(10.0, 400.0, 10.0 + W * 0.5);
    robot.wait_for_idle();
    assert_eq!(robot.offset(), W * 0.5);

    robot.drag(300.0, 400.0, 200.0, 400.0);
    assert_eq!(robot.phase(), DrawerPhase::Settling(SettleKind::Decay));
    let offsets = robot.record_offsets_until_idle();
    let descending: Vec<f32> = offsets.iter().map(|offset| -offset).collect();
    assert_non_decreasing(&descending, "decay only moves left");
    assert_eq!(robot.offset(), 0.0);
    assert_eq!(robot.phase(), DrawerPhase::IdleClosed);
}

#[test]
fn leftward_nudge_when_mostly_open_springs_back() {
    let mut robot = robot();
    open(&mut robot);
    robot.drag_with_steps(200.0, 400.0, 180.0, 400.0, 20);
    assert_eq!(
        robot.phase(),
        DrawerPhase::Settling(SettleKind::Spring { target: W })
    );
    robot.wait_for_idle();
    assert_eq!(robot.offset(), W);
}

#[test]
fn zero_velocity_release_is_total() {
    let mut robot = robot();
    robot.drag_and_hold(10.0, 400.0, 160.0);
    assert_eq!(robot.phase(), DrawerPhase::Settling(SettleKind::Decay));
    robot.wait_for_idle();
    assert!(robot.offset().is_finite());
    assert_eq!(robot.offset(), 150.0);
    assert_eq!(robot.phase(), DrawerPhase::IdleClosed);
}

#[test]
fn policy_examples() {
    assert_eq!(
        resolve_release(0.3 * W, 500.0, W),
        SettleTarget::Spring { target: W }
    );
    match resolve_release(0.5 * W, -800.0, W) {
        SettleTarget::Decay(config) => {
            assert_approx_eq(config.velocity_factor, 1.25, 1e-6, "velocity factor");
            assert_eq!(config.deceleration, 1.0);
            assert_eq!(config.clamp, (0.0, W));
        }
        other => panic!("expected decay, got {other:?}"),
    }
    assert_eq!(
        resolve_release(0.95 * W, -50.0, W),
        SettleTarget::Spring { target: W }
    );
    assert_approx_eq(apply_resistance(W + 100.0, W), W + 3.0, 1e-3, "resistance");
}

#[test]
fn backdrop_tap_closes_from_open() {
    let mut robot = robot();
    open(&mut robot);
    assert!(robot.click_at(W - 20.0, 400.0));
    assert_eq!(
        robot.phase(),
        DrawerPhase::Settling(SettleKind::Spring { target: 0.0 })
    );
    robot.wait_for_idle();
    assert_eq!(robot.offset(), 0.0);
    assert_eq!(robot.phase(), DrawerPhase::IdleClosed);
}

#[test]
fn backdrop_tap_interrupts_opening_spring() {
    let mut robot = robot();
    robot.drag(10.0, 400.0, 200.0, 400.0);
    robot.advance_time(100_000_000);
    let offset = robot.offset();
    assert!(offset < W);
    let surface = robot.controller().surface();
    let catcher = Point::new(surface.panel.right() + 5.0, 400.0);
    assert_eq!(surface.hit_test(catcher), SurfaceHit::Backdrop);

    robot.click_at(catcher.x, catcher.y);
    robot.wait_for_idle();
    assert_eq!(robot.offset(), 0.0);
}

#[test]
fn panel_tap_does_not_close() {
    let mut robot = robot();
    open(&mut robot);
    assert!(!robot.click_at(100.0, 300.0));
    assert_eq!(robot.phase(), DrawerPhase::IdleOpen);
}

#[test]
fn new_drag_takes_over_during_settle() {
    let mut robot = robot();
    robot.drag(10.0, 400.0, 150.0, 400.0);
    robot.advance_time(50_000_000);
    let mid = robot.offset();

    robot.press(200.0, 400.0);
    robot.move_to(180.0, 400.0);
    assert_eq!(robot.phase(), DrawerPhase::Dragging { start_offset: mid });
    assert_approx_eq(robot.offset(), mid - 20.0, 1e-3, "drag continues from mid-settle");
    robot.advance_time(100_000_000);
    assert_approx_eq(robot.offset(), mid - 20.0, 1e-3, "settle no longer writes");
}

#[test]
fn cancelled_drag_settles() {
    let mut robot = robot();
    robot.press(10.0, 400.0);
    robot.move_to(100.0, 400.0);
    robot.cancel();
    assert_eq!(robot.phase(), DrawerPhase::Settling(SettleKind::Decay));
    robot.wait_for_idle();
    assert!(robot.phase().is_idle());
    assert!((0.0..=W).contains(&robot.offset()));
}

#[test]
fn vertical_drag_is_left_to_the_list() {
    let mut robot = robot();
    robot.drag(100.0, 400.0, 110.0, 200.0);
    robot.wait_for_idle();
    assert_eq!(robot.offset(), 0.0);
    assert_eq!(robot.dismiss_count(), 0);
}

#[test]
fn overlay_follows_progress() {
    let mut robot = robot();
    let theme = Theme::light();
    assert_eq!(robot.frame().overlay_color, Color::TRANSPARENT);

    robot.press(10.0, 400.0);
    let mut alphas = Vec::new();
    for step in 1..=20 {
        robot.move_to(10.0 + step as f32 * W / 20.0, 400.0);
        alphas.push(robot.frame().overlay_color.a());
    }
    assert_non_decreasing(&alphas, "overlay alpha");
    assert_color_approx_eq(
        robot.frame().overlay_color,
        theme.backdrop_color(),
        1e-4,
        "overlay at full progress",
    );

    robot.move_to(10.0 + 2.0 * W, 400.0);
    assert_eq!(robot.frame().overlay_color, theme.backdrop_color());
}

#[test]
fn keyboard_reflows_open_drawer() {
    let screen = ScreenGeometry::new(W, H)
        .unwrap()
        .with_safe_area(SafeAreaInsets::new(47.0, 34.0));
    let mut robot = DrawerRobot::with_config(screen, DrawerConfig::default(), Theme::dark());
    open(&mut robot);

    robot.show_keyboard(336.0, 12);
    let frame = robot.frame();
    assert_rect_approx_eq(
        frame.container,
        Rect::new(0.0, 0.0, W, H - 336.0 - 5.0),
        1e-3,
        "container above keyboard",
    );
    assert_rect_approx_eq(
        frame.panel,
        Rect::new(5.0, 5.0, W - 10.0, H - 336.0 - 15.0),
        1e-3,
        "panel widened",
    );
    assert_approx_eq(frame.chat_insets.bottom_bar_offset, 302.0, 1e-3, "bar lift");
    assert_approx_eq(frame.chat_insets.list_footer_height, -336.0, 1e-3, "footer");

    robot.emit_keyboard(KeyboardPhase::Interactive, 0.5, 336.0);
    assert_approx_eq(robot.frame().panel.width, (0.8 * W + W - 10.0) / 2.0, 1e-3, "half width");

    robot.hide_keyboard(336.0, 12);
    let frame = robot.frame();
    assert_rect_approx_eq(frame.container, Rect::new(0.0, 0.0, W, H), 1e-3, "restored");
    assert_approx_eq(frame.panel.width, 0.8 * W, 1e-3, "restored width");
}

#[test]
fn keyboard_is_dismissed_once_per_drag() {
    let mut robot = robot();
    robot.drag(10.0, 400.0, 200.0, 400.0);
    robot.wait_for_idle();
    robot.drag(300.0, 400.0, 100.0, 400.0);
    robot.wait_for_idle();
    assert_eq!(robot.dismiss_count(), 2);
}

#[test]
fn programmatic_close_from_any_phase() {
    let mut robot = robot();
    robot.press(10.0, 400.0);
    robot.move_to(200.0, 400.0);
    robot.controller().close();
    robot.move_to(300.0, 400.0);
    robot.release();
    robot.wait_for_idle();
    assert_eq!(robot.offset(), 0.0);
    assert_eq!(robot.phase(), DrawerPhase::IdleClosed);
}
