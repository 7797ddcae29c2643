//! Closed form circular orbits.
//!
//! Every pose here is a pure function of elapsed time and the body's static parameters.
//! Nothing is integrated, so a pose at `t` is the same whether we got there in one frame
//! or in a thousand.
//!
//! Time comes in as f64 seconds. Angles are reduced in f64 and only narrowed to f32 once they
//! are small, so positions stay smooth however long the app has been running.

use std::f64::consts::TAU;

use bevy::{
    math::{Quat, Vec3},
    transform::components::Transform,
};

use super::components::{AngularSpeed, Length, OrbitalMotion, Spin};

/// Multiplier from a configured [AngularSpeed] to orbital radians per second
pub const ORBIT_RATE_FACTOR: f32 = 100.0;

/// Multiplier from a configured [AngularSpeed] to spin radians per second
pub const SPIN_RATE_FACTOR: f32 = 10.0;

/// Position on a circle of radius `distance` in the X-Z plane at time `t`.
pub fn orbital_position(t: f64, distance: Length, speed: AngularSpeed) -> Vec3 {
    let (sin, cos) = (t * f64::from(speed.orbit_rate())).sin_cos();
    Vec3::new(cos as f32 * distance.0, 0.0, sin as f32 * distance.0)
}

/// `angle` in `[0, 2π)`, narrowed to f32
fn wrap_angle(angle: f64) -> f32 {
    angle.rem_euclid(TAU) as f32
}

/// Seconds for one full revolution, None if the body doesn't move.
pub fn orbital_period(speed: AngularSpeed) -> Option<f64> {
    let rate = f64::from(speed.orbit_rate()).abs();
    if rate > 0.0 {
        Some(TAU / rate)
    } else {
        None
    }
}

impl OrbitalMotion {
    /// Position in the parent's frame at time `t`
    pub fn position_at(&self, t: f64) -> Vec3 {
        orbital_position(t, self.distance, self.speed)
    }
}

impl Spin {
    /// Rotation angle around Y in radians at time `t`, wrapped to one turn
    pub fn angle(&self, t: f64) -> f32 {
        match self {
            Spin::Steady => wrap_angle(t),
            Spin::Scaled(speed) => wrap_angle(t * f64::from(speed.spin_rate())),
            Spin::Fixed(speed) => speed.spin_rate(),
        }
    }
}

/// The instantaneous translation and Y rotation of a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub translation: Vec3,
    pub rotation_y: f32,
}

impl Pose {
    /// Bodies without an orbit stay at their parent's origin.
    pub fn at(t: f64, motion: Option<&OrbitalMotion>, spin: &Spin) -> Self {
        Self {
            translation: motion.map_or(Vec3::ZERO, |m| m.position_at(t)),
            rotation_y: spin.angle(t),
        }
    }

    /// Writes the pose into a transform, leaving the scale alone
    pub fn apply(&self, transform: &mut Transform) {
        transform.translation = self.translation;
        transform.rotation = Quat::from_rotation_y(self.rotation_y);
    }

    /// Builds a fresh transform with the given uniform scale
    pub fn to_transform(self, scale: f32) -> Transform {
        let mut transform = Transform::from_scale(Vec3::splat(scale));
        self.apply(&mut transform);
        transform
    }
}
