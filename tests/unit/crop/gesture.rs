use smallvec::smallvec;

use super::*;

#[test]
fn mouse_drag_pans_relative_to_press() {
    let mut g = GestureTracker::default();
    let origin = Vec2::new(10.0, 5.0);
    assert_eq!(
        g.handle(&InputEvent::MouseDown(Point::new(100.0, 100.0)), origin),
        GestureEffect::None
    );
    assert!(g.is_dragging());
    assert_eq!(
        g.handle(&InputEvent::MouseMove(Point::new(130.0, 90.0)), origin),
        GestureEffect::PanTo(Vec2::new(40.0, -5.0))
    );
    g.handle(&InputEvent::MouseLeave, origin);
    assert!(!g.is_dragging());
    assert_eq!(
        g.handle(&InputEvent::MouseMove(Point::new(0.0, 0.0)), origin),
        GestureEffect::None
    );
}

#[test]
fn wheel_direction_maps_to_step_sign() {
    let mut g = GestureTracker::default();
    assert_eq!(
        g.handle(&InputEvent::Wheel { delta_y: 53.0 }, Vec2::ZERO),
        GestureEffect::WheelStep(-1.0)
    );
    assert_eq!(
        g.handle(&InputEvent::Wheel { delta_y: -1.0 }, Vec2::ZERO),
        GestureEffect::WheelStep(1.0)
    );
}

#[test]
fn pinch_reports_ratio_and_centroid_delta() {
    let mut g = GestureTracker::default();
    g.handle(
        &InputEvent::TouchStart(smallvec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]),
        Vec2::ZERO,
    );
    let effect = g.handle(
        &InputEvent::TouchMove(smallvec![Point::new(0.0, 10.0), Point::new(200.0, 10.0)]),
        Vec2::ZERO,
    );
    assert_eq!(
        effect,
        GestureEffect::Pinch {
            scale: Some(2.0),
            pan: Vec2::new(50.0, 10.0)
        }
    );
}

#[test]
fn lifting_one_finger_resumes_single_touch_drag() {
    let mut g = GestureTracker::default();
    g.handle(
        &InputEvent::TouchStart(smallvec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]),
        Vec2::ZERO,
    );
    let pos = Vec2::new(7.0, 7.0);
    g.handle(&InputEvent::TouchEnd(smallvec![Point::new(50.0, 50.0)]), pos);
    assert!(g.is_dragging());
    assert_eq!(
        g.handle(&InputEvent::TouchMove(smallvec![Point::new(55.0, 45.0)]), pos),
        GestureEffect::PanTo(Vec2::new(12.0, 2.0))
    );

    // The pinch baseline was dropped: the next two-finger move only pans.
    let effect = g.handle(
        &InputEvent::TouchMove(smallvec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]),
        pos,
    );
    assert!(matches!(effect, GestureEffect::Pinch { scale: None, .. }));

    g.handle(&InputEvent::TouchCancel(smallvec![]), pos);
    assert!(!g.is_dragging());
}
