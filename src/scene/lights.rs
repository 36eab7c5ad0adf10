use glam::Vec3;

/// Uniform fill light with no direction.
#[derive(Debug, Clone, Copy)]
pub struct AmbientLight {
    pub color: Vec3,
    pub intensity: f32,
}

/// Parallel key light, positioned high and to the side.
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    pub color: Vec3,
    pub intensity: f32,
    /// World-space position the light shines from, toward the origin.
    pub position: Vec3,
}

impl DirectionalLight {
    /// Unit vector from the scene toward the light.
    pub fn direction(&self) -> Vec3 {
        self.position.normalize()
    }
}

/// The scene's full light rig: one ambient, one directional.
#[derive(Debug, Clone, Copy)]
pub struct Lights {
    pub ambient: AmbientLight,
    pub directional: DirectionalLight,
}

impl Lights {
    pub fn new() -> Self {
        Self {
            ambient: AmbientLight {
                color: Vec3::ONE,
                intensity: 0.6,
            },
            directional: DirectionalLight {
                color: Vec3::ONE,
                intensity: 0.6,
                position: Vec3::new(10.0, 20.0, 10.0),
            },
        }
    }

    /// Number of light sources added to the scene.
    pub fn count(&self) -> usize {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_two_sources() {
        assert_eq!(Lights::new().count(), 2);
    }

    #[test]
    fn key_light_shines_from_above() {
        let lights = Lights::new();
        let dir = lights.directional.direction();
        assert!(dir.y > 0.0);
        assert!((dir.length() - 1.0).abs() < 1e-6);
    }
}
