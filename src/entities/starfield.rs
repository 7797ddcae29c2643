//! The milky way backdrop.
//! A big sphere textured on the inside that travels with the camera but never rotates with it,
//! so it looks infinitely far away.
//!
//! The sphere lives on its own render layer and is drawn by a sky camera before the main camera.
//! The main camera starts from a fresh depth buffer, so the sky never hides a body.

use bevy::{
    app::{App, Plugin, Startup, Update},
    core_pipeline::{
        clear_color::ClearColorConfig,
        core_3d::{Camera3d, Camera3dBundle},
    },
    ecs::{
        component::Component,
        entity::Entity,
        query::{With, Without},
        schedule::IntoSystemConfigs,
        system::{Commands, Query},
    },
    math::Vec3,
    pbr::{NotShadowCaster, PbrBundle},
    render::{
        camera::{Camera, Projection},
        color::Color,
        view::RenderLayers,
    },
    transform::components::Transform,
    utils::default,
};

use crate::{driver::FrameSet, gui::camera::MainCamera};

use super::celestials::{celestial::SceneAssets, textures::BodyTexture};

/// Has to stay inside the camera's far clip plane
pub const STARFIELD_RADIUS: f32 = 80.0;

/// Only the sky camera sees this layer
pub const STARFIELD_LAYER: u8 = 1;

#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Starfield;

/// Draws the starfield underneath everything else
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct SkyCamera;

impl Starfield {
    pub fn spawn(commands: &mut Commands, assets: &SceneAssets) -> Entity {
        commands
            .spawn((
                PbrBundle {
                    mesh: assets.sphere.clone(),
                    material: assets.material(BodyTexture::Stars),
                    transform: Transform::from_scale(Vec3::splat(STARFIELD_RADIUS)),
                    ..default()
                },
                NotShadowCaster,
                RenderLayers::layer(STARFIELD_LAYER),
                Starfield,
            ))
            .id()
    }
}

pub struct StarfieldPlugin;

impl Plugin for StarfieldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, StarfieldPlugin::setup_sky_camera)
            .add_systems(
                Update,
                (
                    StarfieldPlugin::follow_camera_system,
                    StarfieldPlugin::sync_sky_camera_system,
                )
                    .after(FrameSet::View),
            );
    }
}

impl StarfieldPlugin {
    fn setup_sky_camera(mut commands: Commands) {
        commands.spawn((
            Camera3dBundle {
                camera: Camera {
                    // Before the main camera
                    order: -1,
                    ..default()
                },
                camera_3d: Camera3d {
                    clear_color: ClearColorConfig::Custom(Color::BLACK),
                    ..default()
                },
                ..default()
            },
            RenderLayers::layer(STARFIELD_LAYER),
            SkyCamera,
        ));
    }

    /// Copies only the translation, the sky must not turn when the camera orbits
    pub fn follow_camera_system(
        camera: Query<&Transform, (With<MainCamera>, Without<Starfield>)>,
        mut starfield: Query<&mut Transform, With<Starfield>>,
    ) {
        let Some(camera) = camera.iter().next() else {
            return;
        };
        for mut transform in starfield.iter_mut() {
            transform.translation = camera.translation;
        }
    }

    /// The sky camera looks exactly where the main camera looks
    pub fn sync_sky_camera_system(
        main: Query<(&Transform, &Projection), (With<MainCamera>, Without<SkyCamera>)>,
        mut sky: Query<(&mut Transform, &mut Projection), With<SkyCamera>>,
    ) {
        let Some((camera, projection)) = main.iter().next() else {
            return;
        };
        for (mut transform, mut sky_projection) in sky.iter_mut() {
            *transform = *camera;
            *sky_projection = projection.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy::{
        ecs::{schedule::Schedule, world::World},
        math::Quat,
        render::camera::PerspectiveProjection,
    };

    use super::*;

    #[test]
    fn test_follows_translation_only() {
        let mut world = World::new();
        let camera_transform =
            Transform::from_xyz(3.0, 4.0, 35.0).with_rotation(Quat::from_rotation_x(0.5));
        world.spawn((camera_transform, MainCamera));
        let stars = world
            .spawn((Transform::from_scale(Vec3::splat(STARFIELD_RADIUS)), Starfield))
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(StarfieldPlugin::follow_camera_system);
        schedule.run(&mut world);

        let stars = world.get::<Transform>(stars).unwrap();
        assert_eq!(stars.translation, Vec3::new(3.0, 4.0, 35.0));
        assert_eq!(stars.rotation, Quat::IDENTITY);
    }

    #[test]
    fn test_sky_camera_matches_main_camera() {
        let mut world = World::new();
        let camera_transform =
            Transform::from_xyz(0.0, 10.0, 80.0).looking_at(Vec3::ZERO, Vec3::Y);
        let projection = PerspectiveProjection {
            fov: 75f32.to_radians(),
            near: 0.1,
            far: 90.0,
            aspect_ratio: 2.0,
        };
        world.spawn((
            camera_transform,
            Projection::Perspective(projection.clone()),
            MainCamera,
        ));
        let sky = world
            .spawn((
                Transform::IDENTITY,
                Projection::Perspective(PerspectiveProjection::default()),
                SkyCamera,
            ))
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(StarfieldPlugin::sync_sky_camera_system);
        schedule.run(&mut world);

        assert_eq!(*world.get::<Transform>(sky).unwrap(), camera_transform);
        match world.get::<Projection>(sky).unwrap() {
            Projection::Perspective(p) => {
                assert_eq!(p.aspect_ratio, 2.0);
                assert_eq!(p.far, projection.far);
            }
            Projection::Orthographic(_) => panic!("Expected a perspective projection"),
        }
    }

    #[test]
    fn test_only_the_sky_camera_sees_the_stars() {
        let stars = RenderLayers::layer(STARFIELD_LAYER);
        assert!(!RenderLayers::default().intersects(&stars));
        assert!(stars.intersects(&RenderLayers::layer(STARFIELD_LAYER)));
    }
}
