//! The per-frame gait: every animated transform is recomputed from absolute
//! elapsed time, so re-evaluating at the same instant always yields the same
//! pose. No state is carried between frames.

use std::f32::consts::PI;

use super::parts::LegId;
use super::{HorseRig, BASE_HEIGHT};

/// Body bob/sway frequency (rad/s multiplier on t).
const BODY_FREQ: f32 = 2.0;
/// Vertical bob amplitude.
const BOB_AMP: f32 = 0.1;
/// Pitch sway amplitude.
const SWAY_PITCH_AMP: f32 = 0.02;
/// Roll sway amplitude.
const SWAY_ROLL_AMP: f32 = 0.03;
/// Gentle whole-figure yaw amplitude (frequency 1).
const YAW_AMP: f32 = 0.1;

/// Tail rest tilt about z.
pub const TAIL_REST_ANGLE: f32 = 0.5;
const TAIL_SWISH_AMP: f32 = 0.2;
const TAIL_WAG_AMP: f32 = 0.1;

/// Ear rest tilt about z.
pub const EAR_REST_ANGLE: f32 = 0.15;
const EAR_TILT_AMP: f32 = 0.1;
const EAR_TWITCH_AMP: f32 = 0.1;

/// Leg cycle frequency (rad/s multiplier on t).
const LEG_FREQ: f32 = 2.0;
/// Hoof lift amplitude. The lift term is |sin|, so legs never dip below
/// their base height.
const LEG_LIFT_AMP: f32 = 0.2;
/// Fore/aft stride amplitude along z.
const LEG_STRIDE_AMP: f32 = 0.1;
/// Swing rotation amplitude about x.
const LEG_SWING_AMP: f32 = 0.2;

/// Recompute every animated transform for elapsed time `t` (seconds since
/// scene creation). Missing optional parts are skipped; the rest of the
/// figure keeps animating.
pub fn advance(rig: &mut HorseRig, t: f32) {
    // Whole-figure bob and sway on the root group.
    rig.root.position.y = BASE_HEIGHT + (t * BODY_FREQ).sin() * BOB_AMP;
    rig.root.rotation.x = (t * BODY_FREQ).sin() * SWAY_PITCH_AMP;
    rig.root.rotation.y = t.sin() * YAW_AMP;
    rig.root.rotation.z = (t * BODY_FREQ).sin() * SWAY_ROLL_AMP;

    if let Some(tail) = rig.tail.as_mut() {
        tail.rotation.z = TAIL_REST_ANGLE + (t * 3.0).sin() * TAIL_SWISH_AMP;
        tail.rotation.y = (t * 2.0).sin() * TAIL_WAG_AMP;
    }

    if let Some(ears) = rig.ears.as_mut() {
        for (index, ear) in ears.iter_mut().enumerate() {
            // Opposite phase between the two ears.
            let offset = index as f32 * PI;
            ear.rotation.z = EAR_REST_ANGLE + (t * 2.0 + offset).sin() * EAR_TILT_AMP;
            ear.rotation.y = (t * 3.0 + offset).sin() * EAR_TWITCH_AMP;
        }
    }

    for id in LegId::ALL {
        let phase = id.phase();
        let cycle = t * LEG_FREQ + phase;
        let leg = &mut rig.legs[id as usize];
        leg.position.x = leg.base_position.x;
        leg.position.y = leg.base_position.y + cycle.sin().abs() * LEG_LIFT_AMP;
        leg.position.z = leg.base_position.z + cycle.cos() * LEG_STRIDE_AMP;
        leg.rotation.x = cycle.sin() * LEG_SWING_AMP;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f32, b: f32, what: &str) {
        assert!((a - b).abs() < 1e-5, "{what}: {a} vs {b}");
    }

    #[test]
    fn reevaluation_is_bit_identical() {
        let mut a = HorseRig::build();
        let mut b = HorseRig::build();
        for step in 0..50 {
            let t = step as f32 * 0.37;
            advance(&mut a, t);
            advance(&mut b, t);
            assert_eq!(a, b, "t={t}");
        }
        // Also idempotent on the same rig: a second pass at the same t
        // changes nothing.
        advance(&mut a, 12.5);
        let snapshot = a.clone();
        advance(&mut a, 12.5);
        assert_eq!(a, snapshot);
    }

    #[test]
    fn hooves_never_dip_below_base() {
        let mut rig = HorseRig::build();
        for step in 0..2000 {
            let t = step as f32 * 0.013;
            advance(&mut rig, t);
            for id in LegId::ALL {
                let leg = rig.leg(id);
                assert!(
                    leg.position.y >= leg.base_position.y,
                    "{} dipped at t={t}",
                    id.label()
                );
            }
        }
    }

    #[test]
    fn leg_x_is_held_fixed() {
        let mut rig = HorseRig::build();
        for step in 0..500 {
            advance(&mut rig, step as f32 * 0.041);
            for id in LegId::ALL {
                let leg = rig.leg(id);
                assert_eq!(leg.position.x, leg.base_position.x);
            }
        }
    }

    #[test]
    fn ears_swing_in_opposite_phase() {
        let mut rig = HorseRig::build();
        for step in 0..200 {
            let t = step as f32 * 0.073;
            advance(&mut rig, t);
            let ears = rig.ears.as_ref().unwrap();
            let dev0 = ears[0].rotation.z - EAR_REST_ANGLE;
            let dev1 = ears[1].rotation.z - EAR_REST_ANGLE;
            assert_close(dev0, -dev1, "ear z deviation");
        }
    }

    #[test]
    fn rest_pose_at_time_zero() {
        let mut rig = HorseRig::build();
        advance(&mut rig, 0.0);

        assert_eq!(rig.root.position.y, BASE_HEIGHT);
        assert_eq!(rig.root.rotation.x, 0.0);
        assert_eq!(rig.root.rotation.y, 0.0);
        assert_eq!(rig.root.rotation.z, 0.0);
        assert_eq!(rig.tail.as_ref().unwrap().rotation.z, TAIL_REST_ANGLE);

        // Phase 0 leg: every sine term vanishes exactly.
        let fl = rig.leg(LegId::FrontLeft);
        assert_eq!(fl.rotation.x, 0.0);
        assert_eq!(fl.position.y, fl.base_position.y);
        // pi-phased legs land within float error of the closed form.
        let fr = rig.leg(LegId::FrontRight);
        assert_close(fr.rotation.x, 0.0, "front-right swing");
        // The back pair carries a pi/2 phase, so its swing is at full
        // amplitude at t=0 by construction.
        let bl = rig.leg(LegId::BackLeft);
        assert_close(bl.rotation.x, 0.2, "back-left swing");
    }

    #[test]
    fn missing_optional_parts_are_skipped() {
        let mut rig = HorseRig::build();
        rig.tail = None;
        rig.ears = None;

        advance(&mut rig, 3.2);

        // Everything else still animated.
        assert!(rig.root.position.y != BASE_HEIGHT);
        assert!(rig.leg(LegId::FrontLeft).rotation.x != 0.0);
    }
}
