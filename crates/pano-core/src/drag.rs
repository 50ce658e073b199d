use crate::constants::{DRAG_RADIANS_PER_PX, PITCH_LIMIT};
use glam::{Quat, Vec2};

/// Click/touch-and-drag look-around. Positions are client pixels.
#[derive(Clone, Copy, Debug, Default)]
pub struct DragLook {
    pub yaw: f32,
    pub pitch: f32,
    pressed: bool,
    prev: Option<Vec2>,
}

impl DragLook {
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn mouse_down(&mut self, pos: Vec2) {
        self.pressed = true;
        self.prev = Some(pos);
    }

    /// Returns true when the view changed.
    pub fn mouse_move(&mut self, pos: Vec2) -> bool {
        if !self.pressed {
            return false;
        }
        self.drag_to(pos)
    }

    pub fn mouse_up(&mut self) {
        self.pressed = false;
    }

    /// Only single-finger gestures look around.
    pub fn touch_start(&mut self, touches: &[Vec2]) {
        if let [pos] = touches {
            self.prev = Some(*pos);
        }
    }

    pub fn touch_move(&mut self, touches: &[Vec2]) -> bool {
        match touches {
            [pos] => self.drag_to(*pos),
            _ => false,
        }
    }

    pub fn touch_end(&mut self) {}

    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch)
    }

    fn drag_to(&mut self, pos: Vec2) -> bool {
        let moved = match self.prev {
            Some(prev) => {
                self.apply_delta(pos - prev);
                true
            }
            None => false,
        };
        self.prev = Some(pos);
        moved
    }

    fn apply_delta(&mut self, delta: Vec2) {
        self.yaw += delta.x * DRAG_RADIANS_PER_PX;
        self.pitch = (self.pitch + delta.y * DRAG_RADIANS_PER_PX).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }
}
