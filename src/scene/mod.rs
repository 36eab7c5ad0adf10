pub mod camera;
pub mod lights;
pub mod orbit;

use glam::Vec3;

use crate::horse::parts::Part;
use crate::horse::{self, HorseRig};

use self::camera::Camera;
use self::lights::Lights;
use self::orbit::OrbitControls;

/// All mutable scene state, explicitly owned and passed to the update
/// functions. Nothing here touches the GPU, so the whole scene can be
/// exercised in unit tests without a display.
pub struct Scene {
    pub horse: HorseRig,
    pub ground: Part,
    pub camera: Camera,
    pub orbit: OrbitControls,
    pub lights: Lights,
}

impl Scene {
    pub fn new(aspect: f32) -> Self {
        Self {
            horse: HorseRig::build(),
            ground: horse::build_ground(),
            camera: Camera::new(aspect),
            orbit: OrbitControls::new(Vec3::ZERO),
            lights: Lights::new(),
        }
    }

    /// Advance the figure to elapsed time `t` and settle the orbit camera.
    /// One call per frame; each call fully determines the frame's pose.
    pub fn update(&mut self, t: f32) {
        horse::gait::advance(&mut self.horse, t);
        self.orbit.update();
        self.camera.eye = self.orbit.eye();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_moves_figure_but_not_ground() {
        let mut scene = Scene::new(16.0 / 9.0);
        let ground_before = scene.ground;
        scene.update(1.7);
        assert_eq!(scene.ground, ground_before);
        assert!(scene.horse.root.position.y != 0.0);
    }

    #[test]
    fn camera_follows_orbit() {
        let mut scene = Scene::new(1.0);
        scene.orbit.rotate(200.0, 50.0);
        scene.update(0.5);
        let expected = scene.orbit.eye();
        assert_eq!(scene.camera.eye, expected);
    }
}
