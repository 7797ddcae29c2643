//! Turns the [SolarSystem] registry into entities.
//! Every body becomes one sphere, moons become children of their planet.

use bevy::{
    app::{App, Plugin, Startup},
    asset::{AssetServer, Assets, Handle},
    ecs::{
        bundle::Bundle,
        component::Component,
        entity::Entity,
        schedule::{apply_deferred, IntoSystemConfigs},
        system::{Commands, Res, ResMut, Resource},
    },
    hierarchy::BuildChildren,
    log::{debug, error, info},
    pbr::{PbrBundle, StandardMaterial},
    render::{
        mesh::{shape, Mesh},
        texture::Image,
    },
    transform::components::Transform,
    utils::default,
};
use hashbrown::HashMap;
use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::{
    entities::{
        starfield::Starfield,
        utils::{CelestialName, Radius},
    },
    physics::orbits::components::{OrbitalMotion, Spin},
};

use super::{planet::CelestialBody, registry::SolarSystem, textures::BodyTexture};

/// Number of longitude and latitude segments of the shared sphere
const SPHERE_SEGMENTS: usize = 36;

/// Marks the star at the origin
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Sun;

/// Marks a body orbiting the sun
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Planet;

/// Marks a body orbiting a planet
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Moon;

/// Everything a spawned body carries besides its marker and orbit
#[derive(Bundle)]
pub struct CelestialBundle {
    pub pbr: PbrBundle,
    pub name: CelestialName,
    pub radius: Radius,
    pub spin: Spin,
}

/// Mesh and materials shared by every body
#[derive(Resource, Debug, Clone, Default)]
pub struct SceneAssets {
    pub sphere: Handle<Mesh>,
    pub materials: HashMap<BodyTexture, Handle<StandardMaterial>>,
}

impl SceneAssets {
    /// A missing material falls back to the default handle, which renders untextured
    pub fn material(&self, texture: BodyTexture) -> Handle<StandardMaterial> {
        self.materials.get(&texture).cloned().unwrap_or_default()
    }

    /// The material for one texture. Sun and stars are unlit so they read as light sources.
    pub fn material_for(texture: BodyTexture, image: Handle<Image>) -> StandardMaterial {
        if texture.is_unlit() {
            StandardMaterial {
                base_color_texture: Some(image),
                unlit: true,
                // The starfield is seen from the inside
                cull_mode: None,
                ..default()
            }
        } else {
            StandardMaterial {
                base_color_texture: Some(image),
                perceptual_roughness: 1.0,
                metallic: 0.0,
                ..default()
            }
        }
    }

    /// Loads every texture once and builds one material per texture
    pub fn load_system(
        mut commands: Commands,
        asset_server: Res<AssetServer>,
        mut meshes: ResMut<Assets<Mesh>>,
        mut materials: ResMut<Assets<StandardMaterial>>,
    ) {
        let sphere = meshes.add(Mesh::from(shape::UVSphere {
            radius: 1.0,
            sectors: SPHERE_SEGMENTS,
            stacks: SPHERE_SEGMENTS,
        }));
        let handles = BodyTexture::iter()
            .map(|texture| {
                let path = texture.asset_path();
                debug!("Loading {} texture from {}", texture.as_ref(), path);
                let image = asset_server.load(path);
                (texture, materials.add(Self::material_for(texture, image)))
            })
            .collect::<HashMap<_, _>>();
        commands.insert_resource(SceneAssets {
            sphere,
            materials: handles,
        });
    }
}

/// Handles of every spawned node, in registry order
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetNode {
    pub entity: Entity,
    pub moons: Vec<Entity>,
}

/// The spawned scene.
/// Its shape mirrors [SolarSystem]: one node per body.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SceneContext {
    pub sun: Entity,
    pub planets: Vec<PlanetNode>,
    pub starfield: Entity,
}

impl SceneContext {
    /// Pairs every planet node with the body it was spawned from
    pub fn planets_with_bodies<'a>(
        &'a self,
        system: &'a SolarSystem,
    ) -> impl Iterator<Item = (&'a PlanetNode, &'a CelestialBody)> {
        self.planets.iter().zip_eq(system.planets.iter())
    }

    pub fn node_count(&self) -> usize {
        1 + self
            .planets
            .iter()
            .map(|planet| 1 + planet.moons.len())
            .sum::<usize>()
    }
}

/// Spawns the sun, the planets and their moons
pub struct CelestialPlugin;

impl Plugin for CelestialPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SolarSystem>().add_systems(
            Startup,
            (
                SceneAssets::load_system,
                apply_deferred,
                CelestialPlugin::spawn_solar_system_system,
            )
                .chain(),
        );
    }
}

impl CelestialPlugin {
    pub fn spawn_solar_system_system(
        mut commands: Commands,
        system: Res<SolarSystem>,
        assets: Res<SceneAssets>,
    ) {
        if let Err(err) = system.validate() {
            error!("Invalid solar system: {}", err);
        }

        let sun = commands
            .spawn((
                CelestialBundle {
                    pbr: PbrBundle {
                        mesh: assets.sphere.clone(),
                        material: assets.material(system.sun.texture),
                        transform: Transform::from_scale(system.sun.radius.to_scale()),
                        ..default()
                    },
                    name: CelestialName(system.sun.name.clone()),
                    radius: system.sun.radius,
                    spin: Spin::Steady,
                },
                Sun,
            ))
            .id();
        debug!("Spawned {} as {:?}", system.sun.name, sun);

        let planets = system
            .planets
            .iter()
            .map(|planet| {
                let entity = Self::spawn_body(&mut commands, &assets, planet, 0);
                let moons = planet
                    .moons
                    .iter()
                    .map(|moon| {
                        let moon_entity = Self::spawn_body(&mut commands, &assets, moon, 1);
                        commands.entity(entity).add_child(moon_entity);
                        moon_entity
                    })
                    .collect::<Vec<_>>();
                PlanetNode { entity, moons }
            })
            .collect::<Vec<_>>();

        let starfield = Starfield::spawn(&mut commands, &assets);

        let context = SceneContext {
            sun,
            planets,
            starfield,
        };
        info!("Spawned solar system with {} bodies", context.node_count());
        commands.insert_resource(context);
    }

    /// Spawns one orbiting body at its starting position `(distance, 0, 0)`.
    /// Moons of moons get attached here, only the first level is tracked by [SceneContext].
    fn spawn_body(
        commands: &mut Commands,
        assets: &SceneAssets,
        body: &CelestialBody,
        depth: usize,
    ) -> Entity {
        let is_moon = depth > 0;
        let mut transform = Transform::from_scale(body.radius.to_scale());
        transform.translation.x = body.distance.0;

        let mut entity = commands.spawn((
            CelestialBundle {
                pbr: PbrBundle {
                    mesh: assets.sphere.clone(),
                    material: assets.material(body.texture),
                    transform,
                    ..default()
                },
                name: CelestialName(body.name.clone()),
                radius: body.radius,
                spin: body.spin(is_moon),
            },
            body.orbit(),
        ));
        if is_moon {
            entity.insert(Moon);
        } else {
            entity.insert(Planet);
        }
        let id = entity.id();
        debug!("Spawned {} as {:?} at depth {}", body.name, id, depth);

        if depth > 0 {
            for moon in &body.moons {
                let child = Self::spawn_body(commands, assets, moon, depth + 1);
                commands.entity(id).add_child(child);
            }
        }
        id
    }
}
