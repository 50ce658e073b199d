//! Device-orientation look-around.
//!
//! Maps the W3C device-orientation angles (alpha/beta/gamma, intrinsic
//! Z-X'-Y'') plus the current screen rotation onto a camera quaternion. The
//! result is relative to the camera rotation captured when the control was
//! connected, so the view starts wherever the camera was pointing.

use crate::camera::CameraHandle;
use glam::Quat;
use std::f32::consts::FRAC_1_SQRT_2;

/// -90° about X: the camera looks out of the back of the device, not its top.
pub const WORLD_ALIGNMENT: Quat = Quat::from_xyzw(-FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2);

/// One reading from the orientation sensor, in degrees. Missing axes read as 0.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrientationSample {
    pub alpha: Option<f64>,
    pub beta: Option<f64>,
    pub gamma: Option<f64>,
}

impl OrientationSample {
    pub fn new(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self {
            alpha: Some(alpha),
            beta: Some(beta),
            gamma: Some(gamma),
        }
    }

    /// `(alpha, beta, gamma)` in degrees with absent or non-finite axes as 0.
    pub fn degrees(&self) -> (f64, f64, f64) {
        (
            axis_or_zero(self.alpha),
            axis_or_zero(self.beta),
            axis_or_zero(self.gamma),
        )
    }
}

#[inline]
fn axis_or_zero(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Rotation compensating for the screen being turned relative to the device.
#[inline]
pub fn screen_correction(screen_orient_deg: f64) -> Quat {
    // Reduce first so θ and θ+360 give the same quaternion, not its negation.
    let orient = axis_or_zero(Some(screen_orient_deg)).rem_euclid(360.0);
    let minus_half_angle = -(orient.to_radians() as f32) / 2.0;
    Quat::from_xyzw(0.0, minus_half_angle.sin(), 0.0, minus_half_angle.cos())
}

/// Device rotation from sensor angles in degrees.
///
/// The sensor reports Z-X'-Y'' angles; the camera uses Y-X-Z, so alpha turns
/// about Y, beta about X and the negated gamma about Z.
#[inline]
pub fn device_rotation(alpha_deg: f64, beta_deg: f64, gamma_deg: f64) -> Quat {
    let alpha = alpha_deg.to_radians() as f32;
    let beta = beta_deg.to_radians() as f32;
    let gamma = gamma_deg.to_radians() as f32;
    Quat::from_rotation_y(alpha) * Quat::from_rotation_x(beta) * Quat::from_rotation_z(-gamma)
}

/// `original · device · screen · world`
pub fn compute_camera_orientation(
    original: Quat,
    alpha_deg: f64,
    beta_deg: f64,
    gamma_deg: f64,
    screen_orient_deg: f64,
) -> Quat {
    original
        * device_rotation(alpha_deg, beta_deg, gamma_deg)
        * screen_correction(screen_orient_deg)
        * WORLD_ALIGNMENT
}

/// Tilt control for one viewer: buffers the latest sensor state between
/// frames and writes the derived orientation into the camera on `update`.
#[derive(Clone, Debug)]
pub struct OrientationControl {
    enabled: bool,
    original: Quat,
    sample: OrientationSample,
    screen_orient_deg: f64,
}

impl Default for OrientationControl {
    fn default() -> Self {
        Self::new()
    }
}

impl OrientationControl {
    pub fn new() -> Self {
        Self {
            enabled: false,
            original: Quat::IDENTITY,
            sample: OrientationSample::default(),
            screen_orient_deg: 0.0,
        }
    }

    /// Snapshot the camera's current rotation as the tilt basis and start
    /// accepting sensor events.
    pub fn connect<C: CameraHandle>(&mut self, camera: &C, screen_orient_deg: f64) {
        self.sample = OrientationSample::default();
        self.original = camera.orientation();
        self.screen_orient_deg = axis_or_zero(Some(screen_orient_deg));
        self.enabled = true;
        log::info!("[tilt] connected (screen {}°)", self.screen_orient_deg);
    }

    /// Safe to call repeatedly or before `connect`.
    pub fn disconnect(&mut self) {
        if self.enabled {
            log::info!("[tilt] disconnected");
        }
        self.enabled = false;
    }

    pub fn is_connected(&self) -> bool {
        self.enabled
    }

    pub fn original_rotation(&self) -> Quat {
        self.original
    }

    pub fn latest_sample(&self) -> OrientationSample {
        self.sample
    }

    pub fn screen_orientation(&self) -> f64 {
        self.screen_orient_deg
    }

    pub fn on_device_orientation(&mut self, sample: OrientationSample) {
        if self.enabled {
            self.sample = sample;
        }
    }

    pub fn on_screen_orientation(&mut self, screen_orient_deg: f64) {
        if self.enabled {
            self.screen_orient_deg = axis_or_zero(Some(screen_orient_deg));
        }
    }

    /// Returns false without touching the camera when disconnected.
    pub fn update<C: CameraHandle>(&self, camera: &mut C) -> bool {
        if !self.enabled {
            return false;
        }
        let (alpha, beta, gamma) = self.sample.degrees();
        camera.set_orientation(compute_camera_orientation(
            self.original,
            alpha,
            beta,
            gamma,
            self.screen_orient_deg,
        ));
        true
    }
}
