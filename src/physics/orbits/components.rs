#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use bevy::ecs::component::Component;
use derive_more::{Add, AddAssign, Mul, Sub, SubAssign};

use super::circular::{ORBIT_RATE_FACTOR, SPIN_RATE_FACTOR};

/// A length in scene units.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Add, Sub, AddAssign, SubAssign, Mul)]
pub struct Length(pub f32);

/// The configured angular speed of a body.
/// This is not radians per second, it is scaled by [ORBIT_RATE_FACTOR] for orbits
/// and by [SPIN_RATE_FACTOR] for spin.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Add, Sub, AddAssign, SubAssign, Mul)]
pub struct AngularSpeed(pub f32);

impl AngularSpeed {
    /// Radians per second travelled along the orbit
    pub fn orbit_rate(&self) -> f32 {
        self.0 * ORBIT_RATE_FACTOR
    }

    /// Radians per second of spin around the body's own Y axis
    pub fn spin_rate(&self) -> f32 {
        self.0 * SPIN_RATE_FACTOR
    }
}

/// A circular orbit in the X-Z plane of the parent's local frame.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct OrbitalMotion {
    /// The orbital radius
    pub distance: Length,
    /// How fast the body goes around its parent
    pub speed: AngularSpeed,
}

impl OrbitalMotion {
    /// Creates a new orbit
    pub fn new(distance: Length, speed: AngularSpeed) -> Self {
        Self { distance, speed }
    }
}

/// How a body spins around its own Y axis.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum Spin {
    /// One radian per second, regardless of any configured speed. Used by the sun.
    Steady,
    /// Spins at [AngularSpeed::spin_rate] radians per second. Used by planets.
    Scaled(AngularSpeed),
    /// Held at a constant angle of `speed * SPIN_RATE_FACTOR` radians. Used by moons.
    Fixed(AngularSpeed),
}
