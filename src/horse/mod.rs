pub mod gait;
pub mod parts;

use glam::Vec3;

use self::parts::{pack_color, LegId, Part, RootTransform};

/// Coat color for every horse part (saddle brown).
const COAT: u32 = pack_color(0x8B, 0x45, 0x13);
/// Slightly darker shade for mane-adjacent parts (tail, ears).
const COAT_DARK: u32 = pack_color(0x5C, 0x30, 0x17);
/// Ground plane color.
const GROUND_COLOR: u32 = pack_color(0x56, 0x7D, 0x46);

/// Rest-pose height of the root group above the world origin.
pub const BASE_HEIGHT: f32 = 0.0;

/// Leg rest positions, indexed by `LegId`. Front pair sits under the head
/// (+x); left is +z. Hoisted here so the gait reads them from part data
/// instead of capturing a local.
const LEG_BASE_POSITIONS: [Vec3; 4] = [
    Vec3::new(0.6, -1.0, 0.4),   // front-left
    Vec3::new(0.6, -1.0, -0.4),  // front-right
    Vec3::new(-0.6, -1.0, 0.4),  // back-left
    Vec3::new(-0.6, -1.0, -0.4), // back-right
];

/// The complete figure: one named field per part, all positioned relative to
/// `root`. Tail and ears are cosmetic and may be absent; the gait skips them
/// without failing.
#[derive(Debug, Clone, PartialEq)]
pub struct HorseRig {
    pub root: RootTransform,
    pub body: Part,
    pub neck: Part,
    pub head: Part,
    pub ears: Option<[Part; 2]>,
    pub tail: Option<Part>,
    pub legs: [Part; 4],
}

impl HorseRig {
    /// Build the full figure at its rest pose. Box dimensions and anchor
    /// positions follow the classic box-horse proportions: a 2x1x1.5 body,
    /// a 0.8 cube-ish head ahead of it, and 0.2-thick legs at each corner.
    pub fn build() -> Self {
        let body = Part::new(Vec3::ZERO, Vec3::new(2.0, 1.0, 1.5), COAT);
        let neck = Part::new(
            Vec3::new(0.95, 0.4, 0.0),
            Vec3::new(0.45, 0.7, 0.45),
            COAT,
        );
        let head = Part::new(
            Vec3::new(1.2, 0.2, 0.0),
            Vec3::new(0.8, 0.8, 0.5),
            COAT,
        );

        let ears = [
            Part::new(
                Vec3::new(1.25, 0.72, 0.22),
                Vec3::new(0.12, 0.25, 0.08),
                COAT_DARK,
            ),
            Part::new(
                Vec3::new(1.25, 0.72, -0.22),
                Vec3::new(0.12, 0.25, 0.08),
                COAT_DARK,
            ),
        ];

        let mut tail = Part::new(
            Vec3::new(-1.1, 0.3, 0.0),
            Vec3::new(0.15, 0.7, 0.15),
            COAT_DARK,
        );
        tail.rotation.z = gait::TAIL_REST_ANGLE;

        let legs = LEG_BASE_POSITIONS
            .map(|pos| Part::new(pos, Vec3::new(0.2, 1.0, 0.2), COAT));

        Self {
            root: RootTransform::identity(),
            body,
            neck,
            head,
            ears: Some(ears),
            tail: Some(tail),
            legs,
        }
    }

    pub fn leg(&self, id: LegId) -> &Part {
        &self.legs[id as usize]
    }

    /// Number of parts currently present.
    pub fn part_count(&self) -> usize {
        let mut n = 3 + self.legs.len(); // body, neck, head, legs
        if self.ears.is_some() {
            n += 2;
        }
        if self.tail.is_some() {
            n += 1;
        }
        n
    }

    /// Visit every present part, in a stable order.
    pub fn for_each_part(&self, mut f: impl FnMut(&Part)) {
        f(&self.body);
        f(&self.neck);
        f(&self.head);
        if let Some(ears) = &self.ears {
            for ear in ears {
                f(ear);
            }
        }
        if let Some(tail) = &self.tail {
            f(tail);
        }
        for leg in &self.legs {
            f(leg);
        }
    }
}

/// Build the static ground plane. Lives outside the rig's root group so the
/// body bob never moves it.
pub fn build_ground() -> Part {
    Part::new(
        Vec3::new(0.0, -1.75, 0.0),
        Vec3::new(20.0, 0.1, 20.0),
        GROUND_COLOR,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_rig_has_expected_parts() {
        let rig = HorseRig::build();
        assert_eq!(rig.legs.len(), 4);
        assert_eq!(rig.ears.as_ref().map(|e| e.len()), Some(2));
        assert!(rig.tail.is_some());
        assert_eq!(rig.part_count(), 11);

        let mut visited = 0;
        rig.for_each_part(|_| visited += 1);
        assert_eq!(visited, 11);
    }

    #[test]
    fn legs_sit_at_distinct_hoisted_anchors() {
        let rig = HorseRig::build();
        for id in LegId::ALL {
            let leg = rig.leg(id);
            assert_eq!(leg.position, leg.base_position, "{}", id.label());
        }
        // Mirror symmetry: left/right differ only in z, front/back only in x.
        assert_eq!(
            rig.leg(LegId::FrontLeft).base_position.z,
            -rig.leg(LegId::FrontRight).base_position.z
        );
        assert_eq!(
            rig.leg(LegId::FrontLeft).base_position.x,
            -rig.leg(LegId::BackLeft).base_position.x
        );
    }

    #[test]
    fn ground_sits_below_extended_hooves() {
        let rig = HorseRig::build();
        let ground = build_ground();
        let hoof_bottom = rig.leg(LegId::FrontLeft).base_position.y - 0.5;
        let ground_top = ground.position.y + ground.dims.y * 0.5;
        // Deepest root bob is BASE_HEIGHT - 0.1; hooves must stay above ground.
        assert!(ground_top < hoof_bottom - 0.1);
    }

    #[test]
    fn part_count_tracks_missing_options() {
        let mut rig = HorseRig::build();
        rig.tail = None;
        assert_eq!(rig.part_count(), 10);
        rig.ears = None;
        assert_eq!(rig.part_count(), 8);
    }
}
