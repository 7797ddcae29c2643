use crate::entities::utils::Radius;

use super::textures::BodyTexture;

/// The star at the center of the system.
/// It never moves, it only spins.
#[derive(Debug, Clone, PartialEq)]
pub struct SunData {
    pub name: String,
    pub radius: Radius,
    pub texture: BodyTexture,
}

pub struct SunBuilder {
    name: String,
    radius: f32,
    texture: BodyTexture,
}

impl Default for SunBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SunBuilder {
    pub fn new() -> Self {
        Self {
            name: "Sun".to_string(),
            radius: 5.0,
            texture: BodyTexture::Sun,
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn texture(mut self, texture: BodyTexture) -> Self {
        self.texture = texture;
        self
    }

    pub fn build(self) -> SunData {
        SunData {
            name: self.name,
            radius: Radius(self.radius),
            texture: self.texture,
        }
    }
}
