//! Celestials are the sun, the planets and their moons.
//! The registry describes them, the celestial module spawns them.

pub mod celestial;
pub mod planet;
pub mod registry;
pub mod sun;
pub mod textures;
