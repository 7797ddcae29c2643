use bevy::{ecs::component::Component, math::Vec3};

/// Radius for spherical entities.
/// The shared sphere mesh has radius 1, so this doubles as the uniform scale.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Radius(pub f32);

impl Radius {
    /// The scale to apply to the unit sphere mesh
    pub fn to_scale(self) -> Vec3 {
        Vec3::splat(self.0)
    }
}

/// Display name of a spawned body
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct CelestialName(pub String);
