//! Per-viewer state and the per-frame driver.
//!
//! Input callbacks write into the session between frames; `tick` runs once per
//! animation frame, brings the camera up to date for the active control mode
//! and hands it to the render backend.

use crate::camera::{CameraHandle, PerspectiveCamera};
use crate::drag::DragLook;
use crate::fade::Fade;
use crate::negotiation::ControlMode;
use crate::orientation::{OrientationControl, OrientationSample};
use glam::Vec2;

/// Whatever actually draws the panorama.
pub trait RenderBackend {
    type Error: std::fmt::Debug;
    fn render(&mut self, camera: &PerspectiveCamera, opacity: f32) -> Result<(), Self::Error>;
}

/// No backend means nothing is drawn; fades and controls still advance.
impl<R: RenderBackend> RenderBackend for Option<R> {
    type Error = R::Error;

    fn render(&mut self, camera: &PerspectiveCamera, opacity: f32) -> Result<(), R::Error> {
        match self {
            Some(backend) => backend.render(camera, opacity),
            None => Ok(()),
        }
    }
}

#[derive(Debug)]
pub struct ViewerSession {
    camera: PerspectiveCamera,
    mode: ControlMode,
    tilt: OrientationControl,
    drag: DragLook,
    texture_fade: Option<Fade>,
    opacity: f32,
}

impl ViewerSession {
    pub fn new(aspect: f32) -> Self {
        Self {
            camera: PerspectiveCamera::new(aspect),
            mode: ControlMode::Undetermined,
            tilt: OrientationControl::new(),
            drag: DragLook::default(),
            texture_fade: None,
            opacity: 0.0,
        }
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn drag(&self) -> &DragLook {
        &self.drag
    }

    pub fn tilt(&self) -> &OrientationControl {
        &self.tilt
    }

    /// Fix the control mode for the rest of the session. Only the first
    /// determined mode is accepted.
    pub fn activate(&mut self, mode: ControlMode, screen_orient_deg: f64) -> bool {
        if self.mode != ControlMode::Undetermined || mode == ControlMode::Undetermined {
            log::warn!("[session] ignoring {:?}, mode is {:?}", mode, self.mode);
            return false;
        }
        self.mode = mode;
        match mode {
            ControlMode::TiltEnabled => self.tilt.connect(&self.camera, screen_orient_deg),
            ControlMode::TouchEnabled => log::info!("[drag] touch controls enabled"),
            ControlMode::Undetermined => {}
        }
        true
    }

    /// Stop consuming sensor input. Idempotent.
    pub fn disconnect(&mut self) {
        self.tilt.disconnect();
    }

    /// `pagehide` handling. A page kept in the back/forward cache may be
    /// shown again, so tilt stays connected; returns whether the sensor
    /// listeners should be torn down.
    pub fn on_page_hide(&mut self, persisted: bool) -> bool {
        if persisted {
            log::info!("[session] page cached, keeping tilt connected");
            return false;
        }
        self.disconnect();
        true
    }

    pub fn on_device_orientation(&mut self, sample: OrientationSample) {
        self.tilt.on_device_orientation(sample);
    }

    pub fn on_screen_orientation(&mut self, screen_orient_deg: f64) {
        self.tilt.on_screen_orientation(screen_orient_deg);
    }

    pub fn mouse_down(&mut self, pos: Vec2) {
        if self.mode == ControlMode::TouchEnabled {
            self.drag.mouse_down(pos);
        }
    }

    pub fn mouse_move(&mut self, pos: Vec2) {
        if self.mode == ControlMode::TouchEnabled && self.drag.mouse_move(pos) {
            self.camera.set_orientation(self.drag.orientation());
        }
    }

    pub fn mouse_up(&mut self) {
        self.drag.mouse_up();
    }

    pub fn touch_start(&mut self, touches: &[Vec2]) {
        if self.mode == ControlMode::TouchEnabled {
            self.drag.touch_start(touches);
        }
    }

    pub fn touch_move(&mut self, touches: &[Vec2]) {
        if self.mode == ControlMode::TouchEnabled && self.drag.touch_move(touches) {
            self.camera.set_orientation(self.drag.orientation());
        }
    }

    pub fn touch_end(&mut self) {
        self.drag.touch_end();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.camera.set_aspect(width as f32 / height as f32);
        }
    }

    /// Fade the panorama in from black over `secs`.
    pub fn start_texture_fade(&mut self, secs: f64) {
        self.texture_fade = Some(Fade::from_secs(secs));
    }

    pub fn tick<R: RenderBackend>(&mut self, now_ms: f64, backend: &mut R) -> Result<(), R::Error> {
        if self.mode == ControlMode::TiltEnabled {
            self.tilt.update(&mut self.camera);
        }
        if let Some(fade) = &mut self.texture_fade {
            self.opacity = fade.progress(now_ms);
            if fade.is_complete(now_ms) {
                self.texture_fade = None;
            }
        }
        backend.render(&self.camera, self.opacity)
    }
}
