use bevy::{
    diagnostic::FrameTimeDiagnosticsPlugin,
    log::LogPlugin,
    prelude::*,
    window::WindowResolution,
};
use bevy_egui::EguiPlugin;
use solar_system::{
    driver::FrameDriverPlugin, entities::EntitiesPluginGroup, gui::camera::MAX_PIXEL_RATIO,
    gui::GuiPluginGroup, physics::PhysicsPluginGroup,
};

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    level: bevy::log::Level::INFO,
                    filter: "wgpu=error,naga=warn,solar_system=debug".to_string(),
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Solar System".to_string(),
                        resolution: WindowResolution::default()
                            .with_scale_factor_override(MAX_PIXEL_RATIO),
                        // On the web, draw into the page's canvas and fill the viewport
                        canvas: Some("#box".to_string()),
                        fit_canvas_to_parent: true,
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins(EguiPlugin)
        .add_plugins(FrameTimeDiagnosticsPlugin)
        .add_plugins(FrameDriverPlugin)
        .add_plugins(PhysicsPluginGroup)
        .add_plugins(EntitiesPluginGroup)
        .add_plugins(GuiPluginGroup)
        .run();
}
