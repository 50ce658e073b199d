// Host-side tests for click/touch-and-drag look-around.

use glam::{Quat, Vec2};
use pano_core::constants::PITCH_LIMIT;
use pano_core::drag::DragLook;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn mouse_drag_maps_pixels_to_yaw_and_pitch() {
    let mut drag = DragLook::default();
    drag.mouse_down(Vec2::new(100.0, 100.0));
    assert!(drag.mouse_move(Vec2::new(150.0, 130.0)));
    assert!(approx(drag.yaw, 0.25));
    assert!(approx(drag.pitch, 0.15));
    let expected = Quat::from_rotation_y(0.25) * Quat::from_rotation_x(0.15);
    assert!(drag.orientation().abs_diff_eq(expected, 1e-6));
}

#[test]
fn deltas_accumulate_from_the_last_position() {
    let mut drag = DragLook::default();
    drag.mouse_down(Vec2::ZERO);
    drag.mouse_move(Vec2::new(10.0, 0.0));
    drag.mouse_move(Vec2::new(30.0, 0.0));
    assert!(approx(drag.yaw, 0.15));
}

#[test]
fn mouse_move_without_press_does_nothing() {
    let mut drag = DragLook::default();
    assert!(!drag.mouse_move(Vec2::new(50.0, 50.0)));
    drag.mouse_down(Vec2::ZERO);
    drag.mouse_up();
    assert!(!drag.is_pressed());
    assert!(!drag.mouse_move(Vec2::new(80.0, 80.0)));
    assert_eq!(drag.yaw, 0.0);
    assert_eq!(drag.pitch, 0.0);
}

#[test]
fn pitch_is_clamped_to_the_poles() {
    let mut drag = DragLook::default();
    drag.mouse_down(Vec2::ZERO);
    drag.mouse_move(Vec2::new(0.0, 10_000.0));
    assert_eq!(drag.pitch, PITCH_LIMIT);
    drag.mouse_move(Vec2::new(0.0, -30_000.0));
    assert_eq!(drag.pitch, -PITCH_LIMIT);
}

#[test]
fn yaw_is_unbounded() {
    let mut drag = DragLook::default();
    drag.mouse_down(Vec2::ZERO);
    drag.mouse_move(Vec2::new(4000.0, 0.0));
    assert!((drag.yaw - 20.0).abs() < 1e-4);
}

#[test]
fn single_touch_drags() {
    let mut drag = DragLook::default();
    drag.touch_start(&[Vec2::new(10.0, 10.0)]);
    assert!(drag.touch_move(&[Vec2::new(30.0, 20.0)]));
    assert!(approx(drag.yaw, 0.1));
    assert!(approx(drag.pitch, 0.05));
}

#[test]
fn multi_touch_is_ignored() {
    let mut drag = DragLook::default();
    let two = [Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)];
    drag.touch_start(&two);
    assert!(!drag.touch_move(&[Vec2::new(50.0, 50.0), Vec2::new(150.0, 50.0)]));
    assert_eq!(drag.yaw, 0.0);
    // no anchor yet, so the first single-finger move only records a position
    assert!(!drag.touch_move(&[Vec2::new(60.0, 60.0)]));
    assert!(drag.touch_move(&[Vec2::new(70.0, 60.0)]));
    assert!(approx(drag.yaw, 0.05));
}
