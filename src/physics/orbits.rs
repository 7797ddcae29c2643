//! Circular orbits, evaluated in closed form from elapsed time.

pub mod animation;
pub mod circular;
pub mod components;
