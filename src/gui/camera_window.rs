use bevy::{
    app::{App, Plugin, Update},
    core::FrameCount,
    diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin},
    ecs::{
        entity::Entity,
        query::With,
        system::{Local, Query, Res, ResMut},
    },
    log::{error, info},
    render::view::screenshot::ScreenshotManager,
    time::{Real, Time},
    transform::components::GlobalTransform,
    window::PrimaryWindow,
};
use bevy_egui::{egui, EguiContexts};

use crate::{
    driver::FrameDriver,
    entities::celestials::{celestial::SceneContext, registry::SolarSystem},
    physics::util::clock::Clock,
};

use super::camera::OrbitController;

/// Where screenshots are written
const SCREENSHOT_DIR: &str = "./save/screenshots";

/// A small window with frame stats, the body list and a stop button
pub struct CameraWindowPlugin;

impl Plugin for CameraWindowPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, camera_window_system);
    }
}

#[allow(clippy::too_many_arguments)]
pub fn camera_window_system(
    mut contexts: EguiContexts,
    diagnostics: Res<DiagnosticsStore>,
    time: Res<Time<Real>>,
    frame_count: Res<FrameCount>,
    mut driver: ResMut<FrameDriver>,
    system: Res<SolarSystem>,
    scene: Option<Res<SceneContext>>,
    bodies: Query<&GlobalTransform>,
    camera: Query<&OrbitController>,
    main_window: Query<Entity, With<PrimaryWindow>>,
    mut screenshot_manager: ResMut<ScreenshotManager>,
    mut screenshot_counter: Local<u32>,
) {
    let fps = diagnostics
        .get(FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed())
        .unwrap_or(0.0);
    let distance = camera.iter().next().map_or(0.0, |c| c.radius);
    // Same clock the orbits are evaluated at
    let clock = Clock::new(*time, *frame_count);

    egui::Window::new("Solar System").show(contexts.ctx_mut(), |ui| {
        ui.label(format!("FPS: {:.0}", fps));
        ui.label(format!("Elapsed: {:.1}s", clock.get_elapsed_seconds()));
        ui.label(format!("Frame: {}", clock.get_current_frame()));
        ui.label(format!("Camera distance: {:.1}", distance));

        if let Some(scene) = &scene {
            ui.separator();
            for (node, body) in scene.planets_with_bodies(&system) {
                let at = bodies
                    .get(node.entity)
                    .map(|t| t.translation())
                    .unwrap_or_default();
                ui.label(format!(
                    "{} ({:.1}, {:.1}) moons: {}",
                    body.name,
                    at.x,
                    at.z,
                    body.moons.len()
                ));
            }
        }

        ui.separator();
        ui.label(format!("Animation: {:?}", *driver));
        if ui.button("Stop").clicked() {
            info!("Stop requested from the scene window");
            driver.stop();
        }
        if ui.button("Screenshot").clicked() {
            if let Err(err) = std::fs::create_dir_all(SCREENSHOT_DIR) {
                error!("Could not create {}: {}", SCREENSHOT_DIR, err);
                return;
            }
            let Ok(window) = main_window.get_single() else {
                return;
            };
            let path = format!("{}/screenshot-{}.png", SCREENSHOT_DIR, *screenshot_counter);
            *screenshot_counter += 1;
            match screenshot_manager.save_screenshot_to_disk(window, &path) {
                Ok(()) => info!("Saving screenshot to {}", path),
                Err(err) => error!("Error saving to {}: {}", path, err),
            }
        }
    });
}
