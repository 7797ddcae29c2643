//! An animated solar system: a sun, textured planets on circular orbits and their moons.
//!
//! Every pose is computed from elapsed time alone, see [physics::orbits::circular].

pub mod driver;
pub mod entities;
pub mod gui;
pub mod physics;
