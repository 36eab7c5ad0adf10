use glam::Vec3;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

use super::camera::INITIAL_DISTANCE;

/// Fraction of the pending rotation retained each update; the remainder
/// keeps gliding, giving the drag a soft stop.
const DAMPING: f32 = 0.05;
/// Radians of orbit per pixel of drag.
const ROTATE_SPEED: f32 = 0.005;
/// Distance multiplier per scroll line (wheel up zooms in).
const ZOOM_STEP: f32 = 0.95;
const MIN_DISTANCE: f32 = 2.0;
const MAX_DISTANCE: f32 = 50.0;
/// Keep pitch away from the poles so the view never flips.
const MAX_PITCH: f32 = 1.55;
/// Pixels of scroll treated as one wheel line on touchpad-style devices.
const PIXELS_PER_LINE: f64 = 120.0;

/// Damped orbit controller: yaw/pitch/distance around a fixed target,
/// driven by left-drag and wheel events. Reads nothing but pointer input;
/// writes only the camera eye.
#[derive(Debug, Clone, Copy)]
pub struct OrbitControls {
    pub target: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    // Pending rotation, consumed (and decayed) by `update`.
    yaw_vel: f32,
    pitch_vel: f32,
    dragging: bool,
    last_cursor: Option<(f64, f64)>,
}

impl OrbitControls {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            yaw: 0.0,
            pitch: 0.0,
            distance: INITIAL_DISTANCE,
            yaw_vel: 0.0,
            pitch_vel: 0.0,
            dragging: false,
            last_cursor: None,
        }
    }

    /// Feed a window event. Returns true if the event was consumed.
    pub fn process_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.dragging = *state == ElementState::Pressed;
                if !self.dragging {
                    self.last_cursor = None;
                }
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                let current = (position.x, position.y);
                if self.dragging {
                    if let Some((lx, ly)) = self.last_cursor {
                        let dx = (current.0 - lx) as f32;
                        let dy = (current.1 - ly) as f32;
                        self.rotate(dx, dy);
                    }
                }
                self.last_cursor = Some(current);
                self.dragging
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => (pos.y / PIXELS_PER_LINE) as f32,
                };
                self.zoom(lines);
                true
            }
            _ => false,
        }
    }

    /// Queue a rotation from a drag delta in pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw_vel += dx * ROTATE_SPEED;
        self.pitch_vel += dy * ROTATE_SPEED;
    }

    /// Zoom by a number of wheel lines (positive zooms in).
    pub fn zoom(&mut self, lines: f32) {
        self.distance =
            (self.distance * ZOOM_STEP.powf(lines)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Apply pending rotation and decay it. Call once per frame.
    pub fn update(&mut self) {
        self.yaw += self.yaw_vel;
        self.pitch = (self.pitch + self.pitch_vel).clamp(-MAX_PITCH, MAX_PITCH);
        self.yaw_vel *= 1.0 - DAMPING;
        self.pitch_vel *= 1.0 - DAMPING;
    }

    /// Current eye position on the orbit sphere.
    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vec3::new(sy * cp, sp, cy * cp) * self.distance
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_positive_z() {
        let orbit = OrbitControls::new(Vec3::ZERO);
        let eye = orbit.eye();
        assert_eq!(eye, Vec3::new(0.0, 0.0, INITIAL_DISTANCE));
    }

    #[test]
    fn zoom_clamps_to_range() {
        let mut orbit = OrbitControls::new(Vec3::ZERO);
        orbit.zoom(1000.0);
        assert_eq!(orbit.distance(), MIN_DISTANCE);
        orbit.zoom(-1000.0);
        assert_eq!(orbit.distance(), MAX_DISTANCE);
    }

    #[test]
    fn drag_glides_to_a_stop() {
        let mut orbit = OrbitControls::new(Vec3::ZERO);
        orbit.rotate(100.0, 0.0);
        let mut last_yaw = 0.0;
        for _ in 0..400 {
            orbit.update();
            let eye = orbit.eye();
            assert!((eye - orbit.target).length() > 0.0);
            last_yaw = orbit.yaw;
        }
        // Velocity has decayed to nothing; yaw settled at the damped sum.
        orbit.update();
        assert!((orbit.yaw - last_yaw).abs() < 1e-4);
        assert!(orbit.yaw > 0.0);
    }

    #[test]
    fn pitch_stays_off_the_poles() {
        let mut orbit = OrbitControls::new(Vec3::ZERO);
        for _ in 0..100 {
            orbit.rotate(0.0, 10_000.0);
            orbit.update();
        }
        let eye = orbit.eye();
        // Eye never reaches straight overhead, so look_at keeps a valid up.
        assert!(eye.y < orbit.distance());
        assert!((eye - orbit.target).length() > 1.0);
    }

    #[test]
    fn eye_keeps_orbit_radius() {
        let mut orbit = OrbitControls::new(Vec3::new(1.0, 2.0, 3.0));
        orbit.rotate(37.0, -12.0);
        for _ in 0..10 {
            orbit.update();
        }
        let radius = (orbit.eye() - orbit.target).length();
        assert!((radius - orbit.distance()).abs() < 1e-4);
    }
}
