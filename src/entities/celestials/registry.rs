//! The static description of the solar system.
//! Built once at startup, read only afterwards.

use std::{error::Error, fmt};

use bevy::{
    ecs::system::Resource,
    math::Vec3,
    transform::components::Transform,
};

use crate::physics::orbits::{circular::Pose, components::Spin};

use super::{
    planet::CelestialBody,
    sun::{SunBuilder, SunData},
    textures::BodyTexture,
};

/// Why a body was rejected
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InvalidBodyReason {
    NonPositiveRadius(f32),
    NegativeDistance(f32),
    NonFinite,
}

/// A body whose parameters can't be drawn or animated
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidBodyError {
    pub name: String,
    pub reason: InvalidBodyReason,
}

impl fmt::Display for InvalidBodyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.reason {
            InvalidBodyReason::NonPositiveRadius(r) => {
                write!(f, "{} has radius {}, it must be greater than 0", self.name, r)
            }
            InvalidBodyReason::NegativeDistance(d) => {
                write!(f, "{} has orbital distance {}, it can't be negative", self.name, d)
            }
            InvalidBodyReason::NonFinite => {
                write!(f, "{} has a parameter that is NaN or infinite", self.name)
            }
        }
    }
}

impl Error for InvalidBodyError {}

/// The sun and everything orbiting it
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SolarSystem {
    pub sun: SunData,
    pub planets: Vec<CelestialBody>,
}

impl Default for SolarSystem {
    fn default() -> Self {
        let moon = |name: &str, radius: f32, distance: f32, speed: f32| {
            CelestialBody::builder(name)
                .radius(radius)
                .distance(distance)
                .speed(speed)
                .texture(BodyTexture::Moon)
                .build()
        };
        Self {
            sun: SunBuilder::new().build(),
            planets: vec![
                CelestialBody::builder("Mercury")
                    .radius(0.5)
                    .distance(10.0)
                    .speed(0.01)
                    .texture(BodyTexture::Mercury)
                    .build(),
                CelestialBody::builder("Venus")
                    .radius(0.8)
                    .distance(15.0)
                    .speed(0.007)
                    .texture(BodyTexture::Venus)
                    .build(),
                CelestialBody::builder("Earth")
                    .radius(1.0)
                    .distance(20.0)
                    .speed(0.005)
                    .texture(BodyTexture::Earth)
                    .moon(moon("Moon", 0.3, 3.0, 0.015))
                    .build(),
                CelestialBody::builder("Mars")
                    .radius(0.7)
                    .distance(25.0)
                    .speed(0.003)
                    .texture(BodyTexture::Mars)
                    .moon(moon("Phobos", 0.1, 2.0, 0.02))
                    .moon(moon("Deimos", 0.2, 3.0, 0.015))
                    .build(),
            ],
        }
    }
}

/// A body visited by [SolarSystem::iter_bodies]
#[derive(Debug, Clone, Copy)]
pub struct BodyVisit<'a> {
    pub body: &'a CelestialBody,
    /// 0 for planets, 1 for their moons and so on
    pub depth: usize,
}

/// Where a body is at some instant
#[derive(Debug, Clone, PartialEq)]
pub struct BodyPose {
    pub name: String,
    /// Pose in the parent's frame
    pub local: Pose,
    /// Position after composing every parent transform
    pub world: Vec3,
}

impl SolarSystem {
    /// Depth first, planets before their moons
    pub fn iter_bodies(&self) -> impl Iterator<Item = BodyVisit<'_>> {
        let mut out = Vec::new();
        for planet in &self.planets {
            Self::visit(planet, 0, &mut out);
        }
        out.into_iter()
    }

    fn visit<'a>(body: &'a CelestialBody, depth: usize, out: &mut Vec<BodyVisit<'a>>) {
        out.push(BodyVisit { body, depth });
        for moon in &body.moons {
            Self::visit(moon, depth + 1, out);
        }
    }

    /// Number of bodies including the sun
    pub fn body_count(&self) -> usize {
        1 + self.iter_bodies().count()
    }

    /// Checks every radius is positive and every distance is non negative
    pub fn validate(&self) -> Result<(), InvalidBodyError> {
        let sun_radius = self.sun.radius.0;
        if !sun_radius.is_finite() {
            return Err(InvalidBodyError {
                name: self.sun.name.clone(),
                reason: InvalidBodyReason::NonFinite,
            });
        }
        if sun_radius <= 0.0 {
            return Err(InvalidBodyError {
                name: self.sun.name.clone(),
                reason: InvalidBodyReason::NonPositiveRadius(sun_radius),
            });
        }
        self.iter_bodies()
            .try_for_each(|visit| Self::validate_body(visit.body))
    }

    fn validate_body(body: &CelestialBody) -> Result<(), InvalidBodyError> {
        let reason = if !(body.radius.0.is_finite()
            && body.distance.0.is_finite()
            && body.speed.0.is_finite())
        {
            Some(InvalidBodyReason::NonFinite)
        } else if body.radius.0 <= 0.0 {
            Some(InvalidBodyReason::NonPositiveRadius(body.radius.0))
        } else if body.distance.0 < 0.0 {
            Some(InvalidBodyReason::NegativeDistance(body.distance.0))
        } else {
            None
        };
        match reason {
            Some(reason) => Err(InvalidBodyError {
                name: body.name.clone(),
                reason,
            }),
            None => Ok(()),
        }
    }

    /// Evaluates every body at time `t` without an ECS world.
    /// The sun comes first, then the same order as [SolarSystem::iter_bodies].
    pub fn poses_at(&self, t: f64) -> Vec<BodyPose> {
        let sun = Pose::at(t, None, &Spin::Steady);
        let mut out = vec![BodyPose {
            name: self.sun.name.clone(),
            local: sun,
            world: sun.translation,
        }];
        for planet in &self.planets {
            Self::pose_body(planet, t, 0, Transform::IDENTITY, &mut out);
        }
        out
    }

    fn pose_body(
        body: &CelestialBody,
        t: f64,
        depth: usize,
        parent: Transform,
        out: &mut Vec<BodyPose>,
    ) {
        let local = Pose::at(t, Some(&body.orbit()), &body.spin(depth > 0));
        let world = parent.mul_transform(local.to_transform(body.radius.0));
        out.push(BodyPose {
            name: body.name.clone(),
            local,
            world: world.translation,
        });
        for moon in &body.moons {
            Self::pose_body(moon, t, depth + 1, world, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy::math::Quat;

    use super::*;

    const EPSILON: f32 = 1e-3;

    fn find<'a>(poses: &'a [BodyPose], name: &str) -> &'a BodyPose {
        poses.iter().find(|p| p.name == name).unwrap()
    }

    #[test]
    fn test_default_layout() {
        let system = SolarSystem::default();
        assert_eq!(system.sun.radius.0, 5.0);
        let names = system
            .iter_bodies()
            .map(|v| (v.body.name.as_str(), v.depth))
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                ("Mercury", 0),
                ("Venus", 0),
                ("Earth", 0),
                ("Moon", 1),
                ("Mars", 0),
                ("Phobos", 1),
                ("Deimos", 1),
            ]
        );
        assert_eq!(system.body_count(), 8);
        assert!(system.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_radius() {
        let mut system = SolarSystem::default();
        system.planets[3].moons[1].radius.0 = 0.0;
        let err = system.validate().unwrap_err();
        assert_eq!(err.name, "Deimos");
        assert_eq!(err.reason, InvalidBodyReason::NonPositiveRadius(0.0));
        assert!(err.to_string().contains("Deimos"));
    }

    #[test]
    fn test_validate_rejects_negative_distance_and_nan() {
        let mut system = SolarSystem::default();
        system.planets[0].distance.0 = -1.0;
        assert_eq!(
            system.validate().unwrap_err().reason,
            InvalidBodyReason::NegativeDistance(-1.0)
        );

        let mut system = SolarSystem::default();
        system.planets[1].speed.0 = f32::NAN;
        assert_eq!(
            system.validate().unwrap_err().reason,
            InvalidBodyReason::NonFinite
        );
    }

    #[test]
    fn test_poses_are_deterministic() {
        let system = SolarSystem::default();
        assert_eq!(system.poses_at(12.34), system.poses_at(12.34));
    }

    #[test]
    fn test_poses_do_not_depend_on_frame_count() {
        let system = SolarSystem::default();
        let direct = system.poses_at(5.0);
        let mut stepped = system.poses_at(0.0);
        for i in 1..=500 {
            stepped = system.poses_at(f64::from(i) * 0.01);
        }
        for (a, b) in direct.iter().zip(stepped.iter()) {
            assert_eq!(a.name, b.name);
            assert!((a.world - b.world).length() < EPSILON, "{:?} {:?}", a, b);
            assert!((a.local.rotation_y - b.local.rotation_y).abs() < EPSILON);
        }
    }

    #[test]
    fn test_every_local_orbit_stays_on_circle() {
        let system = SolarSystem::default();
        for t in [0.0, 1.0, 7.5, 99.0] {
            let poses = system.poses_at(t);
            for visit in system.iter_bodies() {
                let pose = find(&poses, &visit.body.name);
                let p = pose.local.translation;
                let d = visit.body.distance.0;
                assert!((p.x * p.x + p.z * p.z - d * d).abs() < EPSILON * d * d);
                assert_eq!(p.y, 0.0);
            }
        }
    }

    #[test]
    fn test_moon_follows_planet() {
        let system = SolarSystem::default();
        let t: f32 = 3.7;
        let poses = system.poses_at(f64::from(t));
        let mars = find(&poses, "Mars");
        let phobos = find(&poses, "Phobos");

        // Compose by hand: the moon offset is rotated by the planet spin and scaled by its radius
        let mars_radius = 0.7;
        let mars_spin = t * 0.003 * 10.0;
        let angle = t * 0.02 * 100.0;
        let offset = Vec3::new(angle.cos() * 2.0, 0.0, angle.sin() * 2.0);
        let mars_at = Vec3::new((t * 0.3).cos() * 25.0, 0.0, (t * 0.3).sin() * 25.0);
        let expected = mars_at + Quat::from_rotation_y(mars_spin) * (offset * mars_radius);

        assert!((mars.world - mars_at).length() < EPSILON);
        assert!(
            (phobos.world - expected).length() < EPSILON,
            "{:?} != {:?}",
            phobos.world,
            expected
        );
    }

    #[test]
    fn test_sun_spins_once_per_second() {
        let poses = SolarSystem::default().poses_at(2.0);
        assert_eq!(poses[0].name, "Sun");
        assert_eq!(poses[0].local.rotation_y, 2.0);
        assert_eq!(poses[0].world, Vec3::ZERO);
    }
}
