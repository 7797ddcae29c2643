use bevy::{
    app::{App, Plugin, Startup},
    ecs::system::Commands,
    pbr::{AmbientLight, PointLight, PointLightBundle},
    render::color::Color,
    transform::components::Transform,
    utils::default,
};

/// Warm white, roughly the color of sunlight
pub const SUNLIGHT_COLOR: Color = Color::rgb(
    0xF6 as f32 / 255.0,
    0xED as f32 / 255.0,
    0xA1 as f32 / 255.0,
);

/// A faint white fill so the night side of planets isn't pitch black,
/// plus one bright point light next to the sun.
pub struct LightingPlugin;

impl Plugin for LightingPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(AmbientLight {
            color: Color::WHITE,
            brightness: 0.1,
        })
        .add_systems(Startup, LightingPlugin::setup);
    }
}

impl LightingPlugin {
    fn setup(mut commands: Commands) {
        commands.spawn(PointLightBundle {
            point_light: PointLight {
                color: SUNLIGHT_COLOR,
                intensity: 2000.0,
                // Reaches past the outermost orbit
                range: 100.0,
                shadows_enabled: false,
                ..default()
            },
            transform: Transform::from_xyz(2.0, 2.0, 2.0),
            ..default()
        });
    }
}
