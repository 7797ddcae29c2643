use crate::{
    entities::utils::Radius,
    physics::orbits::components::{AngularSpeed, Length, OrbitalMotion, Spin},
};

use super::textures::BodyTexture;

/// One orbiting body, a planet or a moon.
/// Moons are expressed in their planet's local frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBody {
    pub name: String,
    pub radius: Radius,
    pub distance: Length,
    pub speed: AngularSpeed,
    pub texture: BodyTexture,
    pub moons: Vec<CelestialBody>,
}

impl CelestialBody {
    pub fn builder(name: &str) -> CelestialBodyBuilder {
        CelestialBodyBuilder::new(name)
    }

    pub fn orbit(&self) -> OrbitalMotion {
        OrbitalMotion::new(self.distance, self.speed)
    }

    /// Planets spin with time, moons hold a constant angle
    pub fn spin(&self, is_moon: bool) -> Spin {
        if is_moon {
            Spin::Fixed(self.speed)
        } else {
            Spin::Scaled(self.speed)
        }
    }
}

pub struct CelestialBodyBuilder {
    name: String,
    radius: f32,
    distance: f32,
    speed: f32,
    texture: BodyTexture,
    moons: Vec<CelestialBody>,
}

impl CelestialBodyBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            radius: 1.0,
            distance: 0.0,
            speed: 0.0,
            texture: BodyTexture::Moon,
            moons: Vec::new(),
        }
    }

    pub fn radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn distance(mut self, distance: f32) -> Self {
        self.distance = distance;
        self
    }

    pub fn speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn texture(mut self, texture: BodyTexture) -> Self {
        self.texture = texture;
        self
    }

    pub fn moon(mut self, moon: CelestialBody) -> Self {
        self.moons.push(moon);
        self
    }

    pub fn build(self) -> CelestialBody {
        CelestialBody {
            name: self.name,
            radius: Radius(self.radius),
            distance: Length(self.distance),
            speed: AngularSpeed(self.speed),
            texture: self.texture,
            moons: self.moons,
        }
    }
}
