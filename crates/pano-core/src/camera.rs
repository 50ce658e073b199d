//! Camera state shared between the look-around controls and the renderer.
//!
//! The camera sits at the origin of the panorama sphere and only rotates, so
//! its full pose is a single unit quaternion plus projection parameters.

use crate::constants::{CAMERA_FOVY_DEG, CAMERA_ZFAR, CAMERA_ZNEAR};
use glam::{Mat4, Quat, Vec3};

/// Minimal handle the controls need from whatever camera the backend owns.
pub trait CameraHandle {
    fn orientation(&self) -> Quat;
    fn set_orientation(&mut self, orientation: Quat);
    /// Called on viewport resize.
    fn set_aspect(&mut self, aspect: f32);
}

/// Right-handed perspective camera looking down -Z in its local frame.
#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    pub orientation: Quat,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl PerspectiveCamera {
    pub fn new(aspect: f32) -> Self {
        Self {
            orientation: Quat::IDENTITY,
            aspect: sanitize_aspect(aspect),
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// World to view: the inverse of the camera rotation.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_quat(self.orientation.conjugate())
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Used by the fullscreen panorama pass to turn NDC back into view rays.
    pub fn inverse_view_projection(&self) -> Mat4 {
        self.view_projection().inverse()
    }

    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl CameraHandle for PerspectiveCamera {
    fn orientation(&self) -> Quat {
        self.orientation
    }

    fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = orientation;
    }

    fn set_aspect(&mut self, aspect: f32) {
        self.aspect = sanitize_aspect(aspect);
    }
}

#[inline]
fn sanitize_aspect(aspect: f32) -> f32 {
    if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    }
}
