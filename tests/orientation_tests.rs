// Host-side tests for the device-orientation mapping and tilt control.

use glam::{Quat, Vec3};
use pano_core::camera::{CameraHandle, PerspectiveCamera};
use pano_core::orientation::*;

const EPS: f32 = 1e-5;

fn assert_quat_eq(a: Quat, b: Quat) {
    assert!(a.abs_diff_eq(b, EPS), "{:?} != {:?}", a, b);
}

fn assert_vec_eq(a: Vec3, b: Vec3) {
    assert!(a.abs_diff_eq(b, 1e-4), "{:?} != {:?}", a, b);
}

#[test]
fn result_is_unit_length_across_angle_grid() {
    let original = Quat::from_rotation_y(0.7) * Quat::from_rotation_x(-0.2);
    for alpha in (0..360).step_by(45) {
        for beta in (-180..=180).step_by(60) {
            for gamma in (-90..=90).step_by(30) {
                for screen in [-90.0, 0.0, 90.0, 180.0, 270.0] {
                    let q = compute_camera_orientation(
                        original,
                        alpha as f64,
                        beta as f64,
                        gamma as f64,
                        screen,
                    );
                    assert!(
                        (q.length() - 1.0).abs() < 1e-4,
                        "non-unit for {} {} {} {}",
                        alpha,
                        beta,
                        gamma,
                        screen
                    );
                }
            }
        }
    }
}

#[test]
fn zero_angles_give_original_times_world_alignment() {
    let original = Quat::from_rotation_y(1.1);
    let q = compute_camera_orientation(original, 0.0, 0.0, 0.0, 0.0);
    assert_quat_eq(q, original * WORLD_ALIGNMENT);
}

#[test]
fn world_alignment_is_minus_quarter_turn_about_x() {
    assert_quat_eq(
        WORLD_ALIGNMENT,
        Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2),
    );
}

#[test]
fn flat_device_looks_down_and_upright_device_looks_ahead() {
    let flat = compute_camera_orientation(Quat::IDENTITY, 0.0, 0.0, 0.0, 0.0);
    assert_vec_eq(flat * Vec3::NEG_Z, Vec3::NEG_Y);

    let upright = compute_camera_orientation(Quat::IDENTITY, 0.0, 90.0, 0.0, 0.0);
    assert_vec_eq(upright * Vec3::NEG_Z, Vec3::NEG_Z);
}

#[test]
fn alpha_turns_the_upright_view_about_vertical() {
    let q = compute_camera_orientation(Quat::IDENTITY, 90.0, 90.0, 0.0, 0.0);
    // +90° about Y carries -Z onto -X
    assert_vec_eq(q * Vec3::NEG_Z, Vec3::NEG_X);
}

#[test]
fn screen_angle_is_periodic_in_full_turns() {
    for screen in [0.0, 30.0, 90.0, -90.0, 180.0] {
        let a = compute_camera_orientation(Quat::IDENTITY, 12.0, 34.0, -5.0, screen);
        let b = compute_camera_orientation(Quat::IDENTITY, 12.0, 34.0, -5.0, screen + 360.0);
        assert_quat_eq(a, b);
    }
}

#[test]
fn screen_correction_of_zero_is_identity() {
    assert_quat_eq(screen_correction(0.0), Quat::IDENTITY);
    assert_quat_eq(screen_correction(360.0), Quat::IDENTITY);
}

#[test]
fn screen_correction_matches_negative_half_angle_about_y() {
    let q = screen_correction(90.0);
    let h = -std::f32::consts::FRAC_PI_4;
    assert_quat_eq(q, Quat::from_xyzw(0.0, h.sin(), 0.0, h.cos()));
}

#[test]
fn missing_axes_read_as_zero() {
    let sample = OrientationSample {
        alpha: None,
        beta: Some(45.0),
        gamma: Some(f64::NAN),
    };
    assert_eq!(sample.degrees(), (0.0, 45.0, 0.0));
}

#[test]
fn control_snapshots_original_rotation_on_connect() {
    let mut camera = PerspectiveCamera::default();
    let start = Quat::from_rotation_y(0.5);
    camera.set_orientation(start);

    let mut control = OrientationControl::new();
    control.connect(&camera, 0.0);
    assert!(control.is_connected());
    assert_quat_eq(control.original_rotation(), start);

    control.on_device_orientation(OrientationSample::new(0.0, 90.0, 0.0));
    assert!(control.update(&mut camera));
    // upright device keeps the starting heading
    assert_vec_eq(camera.orientation() * Vec3::NEG_Z, start * Vec3::NEG_Z);
}

#[test]
fn disconnected_control_ignores_events_and_leaves_camera_alone() {
    let mut camera = PerspectiveCamera::default();
    let mut control = OrientationControl::new();
    control.connect(&camera, 0.0);
    control.disconnect();
    control.disconnect();
    assert!(!control.is_connected());

    control.on_device_orientation(OrientationSample::new(10.0, 20.0, 30.0));
    control.on_screen_orientation(90.0);
    assert_eq!(control.latest_sample(), OrientationSample::default());
    assert_eq!(control.screen_orientation(), 0.0);

    assert!(!control.update(&mut camera));
    assert_quat_eq(camera.orientation(), Quat::IDENTITY);
}

#[test]
fn reconnect_clears_previous_sample() {
    let camera = PerspectiveCamera::default();
    let mut control = OrientationControl::new();
    control.connect(&camera, 0.0);
    control.on_device_orientation(OrientationSample::new(10.0, 20.0, 30.0));
    control.disconnect();
    control.connect(&camera, 90.0);
    assert_eq!(control.latest_sample(), OrientationSample::default());
    assert_eq!(control.screen_orientation(), 90.0);
}
