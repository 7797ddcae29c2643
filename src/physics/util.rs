//! Engine agnostic helpers shared by the physics modules.

pub mod clock;
