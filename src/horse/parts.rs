use glam::Vec3;

/// A single rigid box segment of the figure.
///
/// `base_position` is the rest-pose anchor the gait offsets from each frame;
/// it never changes after construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Part {
    /// Current local position (meters, relative to the root group).
    pub position: Vec3,
    /// Current local rotation (Euler XYZ, radians).
    pub rotation: Vec3,
    /// Box dimensions (full extents, not half).
    pub dims: Vec3,
    /// RGBA packed as u32.
    pub color: u32,
    /// Rest-pose position the animated offsets are applied to.
    pub base_position: Vec3,
}

impl Part {
    pub fn new(position: Vec3, dims: Vec3, color: u32) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
            dims,
            color,
            base_position: position,
        }
    }
}

/// Transform of the root group. Composes with each part's local transform;
/// moving it moves the whole figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootTransform {
    pub position: Vec3,
    /// Euler XYZ, radians.
    pub rotation: Vec3,
}

impl RootTransform {
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
        }
    }
}

/// Leg index, front-left first. Determines the gait phase offset that keeps
/// the four legs from ever moving in sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LegId {
    FrontLeft = 0,
    FrontRight = 1,
    BackLeft = 2,
    BackRight = 3,
}

impl LegId {
    pub const ALL: [LegId; 4] = [
        Self::FrontLeft,
        Self::FrontRight,
        Self::BackLeft,
        Self::BackRight,
    ];

    pub fn is_left(self) -> bool {
        matches!(self, Self::FrontLeft | Self::BackLeft)
    }

    pub fn is_front(self) -> bool {
        matches!(self, Self::FrontLeft | Self::FrontRight)
    }

    /// Phase offset added to the gait's time argument for this leg.
    pub fn phase(self) -> f32 {
        let side = if self.is_left() {
            0.0
        } else {
            std::f32::consts::PI
        };
        let pair = if self.is_front() {
            0.0
        } else {
            std::f32::consts::FRAC_PI_2
        };
        side + pair
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::FrontLeft => "front-left",
            Self::FrontRight => "front-right",
            Self::BackLeft => "back-left",
            Self::BackRight => "back-right",
        }
    }
}

/// Pack RGB into the RGBA u32 layout the instance buffer expects.
pub const fn pack_color(r: u8, g: u8, b: u8) -> u32 {
    (r as u32) << 24 | (g as u32) << 16 | (b as u32) << 8 | 0xFF
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn leg_phases_are_distinct() {
        let phases: Vec<f32> = LegId::ALL.iter().map(|l| l.phase()).collect();
        assert_eq!(phases, vec![0.0, PI, FRAC_PI_2, PI + FRAC_PI_2]);
    }

    #[test]
    fn base_position_survives_construction() {
        let p = Part::new(Vec3::new(0.6, -1.0, 0.4), Vec3::ONE, pack_color(1, 2, 3));
        assert_eq!(p.base_position, p.position);
        assert_eq!(p.rotation, Vec3::ZERO);
    }

    #[test]
    fn color_packs_rgba() {
        assert_eq!(pack_color(0xFF, 0x00, 0x00), 0xFF0000FF);
        assert_eq!(pack_color(0x8B, 0x45, 0x13), 0x8B4513FF);
    }
}
