//! Applies the closed form orbits to every spawned body each frame.

use bevy::{
    app::{App, Plugin, Update},
    core::FrameCount,
    ecs::{
        schedule::IntoSystemConfigs,
        system::{Query, Res},
    },
    log::trace,
    time::{Real, Time},
    transform::components::Transform,
};

use crate::driver::FrameSet;
use crate::physics::util::clock::Clock;

use super::{
    circular::Pose,
    components::{OrbitalMotion, Spin},
};

/// Moves every body with a [Spin] to its pose at the current elapsed time
pub struct OrbitAnimationPlugin;

impl Plugin for OrbitAnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            OrbitAnimationPlugin::animate_orbits_system.in_set(FrameSet::Animate),
        );
    }
}

impl OrbitAnimationPlugin {
    /// Poses are written in each body's parent frame.
    /// Moons are children of their planet so they get carried along during transform propagation.
    /// Reads the real clock, the virtual one caps long frames and would fall behind.
    pub fn animate_orbits_system(
        time: Res<Time<Real>>,
        frame_count: Res<FrameCount>,
        mut bodies: Query<(&Spin, Option<&OrbitalMotion>, &mut Transform)>,
    ) {
        let clock = Clock::new(*time, *frame_count);
        let t = clock.get_elapsed_seconds();
        for (spin, motion, mut transform) in bodies.iter_mut() {
            Pose::at(t, motion, spin).apply(&mut transform);
        }
        trace!("Animated bodies for {:?}", clock);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::{
        app::AppExit,
        core::FrameCountPlugin,
        ecs::{entity::Entity, schedule::Schedule, world::World},
        hierarchy::BuildWorldChildren,
        math::{Quat, Vec3},
        time::{TimePlugin, TimeUpdateStrategy},
        transform::{
            components::GlobalTransform,
            systems::{propagate_transforms, sync_simple_transforms},
            TransformBundle,
        },
    };

    use crate::{
        driver::FrameDriverPlugin,
        physics::orbits::{
            circular::orbital_position,
            components::{AngularSpeed, Length},
        },
    };

    use super::*;

    const EPSILON: f32 = 1e-3;

    fn world_at(seconds: f64) -> World {
        let mut world = World::new();
        let mut time = Time::<Real>::default();
        time.advance_by(Duration::from_secs_f64(seconds));
        world.insert_resource(time);
        world.insert_resource(FrameCount(0));
        world
    }

    fn schedule() -> Schedule {
        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                OrbitAnimationPlugin::animate_orbits_system,
                sync_simple_transforms,
                propagate_transforms,
            )
                .chain(),
        );
        schedule
    }

    fn run(world: &mut World) {
        schedule().run(world);
    }

    fn spawn_earth(world: &mut World) -> Entity {
        let earth_speed = AngularSpeed(0.005);
        world
            .spawn((
                TransformBundle::from_transform(Transform::from_xyz(20.0, 0.0, 0.0)),
                Spin::Scaled(earth_speed),
                OrbitalMotion::new(Length(20.0), earth_speed),
            ))
            .id()
    }

    #[test]
    fn test_earth_and_sun() {
        let mut world = world_at(std::f64::consts::PI);
        let sun = world
            .spawn((
                TransformBundle::from_transform(Transform::from_scale(Vec3::splat(5.0))),
                Spin::Steady,
            ))
            .id();
        let earth = spawn_earth(&mut world);
        run(&mut world);

        let sun = world.get::<Transform>(sun).unwrap();
        assert_eq!(sun.scale, Vec3::splat(5.0));
        assert_eq!(sun.translation, Vec3::ZERO);
        assert!(sun.rotation.angle_between(Quat::from_rotation_y(std::f32::consts::PI)) < EPSILON);

        // A quarter of the way around
        let earth = world.get::<Transform>(earth).unwrap();
        assert!((earth.translation - Vec3::new(0.0, 0.0, 20.0)).length() < EPSILON);
    }

    #[test]
    fn test_moon_world_position_is_nested() {
        let t: f32 = 2.0;
        let mut world = world_at(f64::from(t));
        let mars_speed = AngularSpeed(0.003);
        let mars = world
            .spawn((
                TransformBundle::from_transform(Transform::from_scale(Vec3::splat(0.7))),
                Spin::Scaled(mars_speed),
                OrbitalMotion::new(Length(25.0), mars_speed),
            ))
            .id();
        let deimos_speed = AngularSpeed(0.015);
        let deimos = world
            .spawn((
                TransformBundle::from_transform(Transform::from_scale(Vec3::splat(0.2))),
                Spin::Fixed(deimos_speed),
                OrbitalMotion::new(Length(3.0), deimos_speed),
            ))
            .id();
        world.entity_mut(mars).push_children(&[deimos]);
        run(&mut world);

        let mars_at = Vec3::new((t * 0.3).cos() * 25.0, 0.0, (t * 0.3).sin() * 25.0);
        let local = Vec3::new((t * 1.5).cos() * 3.0, 0.0, (t * 1.5).sin() * 3.0);
        let expected = mars_at + Quat::from_rotation_y(t * 0.03) * (local * 0.7);

        let local_transform = world.get::<Transform>(deimos).unwrap();
        assert!((local_transform.translation - local).length() < EPSILON);
        let global = world.get::<GlobalTransform>(deimos).unwrap();
        assert!(
            (global.translation() - expected).length() < EPSILON,
            "{:?} != {:?}",
            global.translation(),
            expected
        );
    }

    #[test]
    fn test_untagged_entities_are_left_alone() {
        let mut world = world_at(10.0);
        let still = world
            .spawn(TransformBundle::from_transform(Transform::from_xyz(1.0, 2.0, 3.0)))
            .id();
        run(&mut world);
        assert_eq!(
            world.get::<Transform>(still).unwrap().translation,
            Vec3::new(1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn test_one_big_step_matches_many_small_ones() {
        let mut direct = world_at(5.0);
        let direct_earth = spawn_earth(&mut direct);
        run(&mut direct);

        let mut stepped = world_at(0.0);
        let stepped_earth = spawn_earth(&mut stepped);
        let mut schedule = schedule();
        for frame in 1..=500 {
            stepped
                .resource_mut::<Time<Real>>()
                .advance_by(Duration::from_millis(10));
            stepped.resource_mut::<FrameCount>().0 = frame;
            schedule.run(&mut stepped);
        }

        assert_eq!(
            stepped.resource::<Time<Real>>().elapsed(),
            Duration::from_secs(5)
        );
        let a = direct.get::<Transform>(direct_earth).unwrap();
        let b = stepped.get::<Transform>(stepped_earth).unwrap();
        assert!((a.translation - b.translation).length() < EPSILON, "{:?} {:?}", a, b);
        assert!(a.rotation.angle_between(b.rotation) < EPSILON);
    }

    #[test]
    fn test_long_frames_keep_up_with_the_wall_clock() {
        let mut app = App::new();
        app.add_event::<AppExit>()
            .add_plugins((
                TimePlugin,
                FrameCountPlugin,
                FrameDriverPlugin,
                OrbitAnimationPlugin,
            ))
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs(2)));
        let earth = spawn_earth(&mut app.world);
        for _ in 0..4 {
            app.update();
        }

        // The first update only starts the real clock
        let real = app.world.resource::<Time<Real>>().elapsed_seconds_f64();
        assert!((real - 6.0).abs() < 1e-9, "real={}", real);
        // Virtual time clamps every 2s frame, orbits must not follow it
        assert!(app.world.resource::<Time>().elapsed_seconds_f64() < real);

        let expected = orbital_position(real, Length(20.0), AngularSpeed(0.005));
        let at = app.world.get::<Transform>(earth).unwrap().translation;
        assert!((at - expected).length() < EPSILON, "{:?} != {:?}", at, expected);
    }
}
