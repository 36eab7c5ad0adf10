use glam::{Mat4, Vec3};

/// Vertical field of view in degrees.
const FOV_Y_DEG: f32 = 75.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 1000.0;
/// Initial eye distance on +z, looking at the figure.
pub const INITIAL_DISTANCE: f32 = 10.0;

/// Perspective camera. The eye is written by the orbit controller each
/// frame; the aspect ratio only changes on window resize.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub aspect: f32,
    fov_y_deg: f32,
    near: f32,
    far: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, INITIAL_DISTANCE),
            target: Vec3::ZERO,
            aspect,
            fov_y_deg: FOV_Y_DEG,
            near: Z_NEAR,
            far: Z_FAR,
        }
    }

    /// Recompute the aspect ratio from a new viewport size.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    pub fn view_proj(&self) -> Mat4 {
        let proj = Mat4::perspective_rh(
            self.fov_y_deg.to_radians(),
            self.aspect,
            self.near,
            self.far,
        );
        let view = Mat4::look_at_rh(self.eye, self.target, Vec3::Y);
        proj * view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_recomputes_aspect() {
        let mut camera = Camera::new(1.0);
        camera.set_aspect(1280, 720);
        assert_eq!(camera.aspect, 1280.0 / 720.0);
    }

    #[test]
    fn zero_sized_resize_is_ignored() {
        let mut camera = Camera::new(1.5);
        camera.set_aspect(0, 720);
        camera.set_aspect(1280, 0);
        assert_eq!(camera.aspect, 1.5);
    }

    #[test]
    fn starts_in_front_of_the_figure() {
        let camera = Camera::new(16.0 / 9.0);
        assert!(camera.eye.z > 0.0);
        assert_eq!(camera.target, Vec3::ZERO);
    }

    #[test]
    fn view_proj_maps_target_in_front_of_eye() {
        let camera = Camera::new(16.0 / 9.0);
        let clip = camera.view_proj() * camera.target.extend(1.0);
        // Target projects inside the frustum, in front of the near plane.
        assert!(clip.w > 0.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
    }
}
