//! The bevy camera for the scene

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::f32::consts::{PI, TAU};

use bevy::{
    app::{App, Plugin, PreUpdate, Startup, Update},
    core_pipeline::{
        clear_color::ClearColorConfig,
        core_3d::{Camera3d, Camera3dBundle},
    },
    ecs::{
        component::Component,
        entity::Entity,
        event::EventReader,
        query::With,
        schedule::IntoSystemConfigs,
        system::{Commands, Query, Res, ResMut, Resource},
    },
    input::{
        mouse::{MouseButton, MouseMotion, MouseScrollUnit, MouseWheel},
        touch::Touches,
        Input,
    },
    log::{debug, info},
    math::{Vec2, Vec3},
    render::camera::{PerspectiveProjection, Projection},
    transform::components::Transform,
    utils::default,
    window::{PrimaryWindow, Window, WindowBackendScaleFactorChanged, WindowResized},
};
use bevy_egui::{egui, EguiContexts};

use crate::driver::FrameSet;

/// Never render more than one device pixel per logical pixel
pub const MAX_PIXEL_RATIO: f64 = 1.0;

/// Keeps the pitch away from the poles where the look direction degenerates
const PITCH_EPSILON: f32 = 1e-6;

/// Wheel events in pixels are converted to lines with this
const PIXELS_PER_LINE: f32 = 100.0;

/// Used to help identify our main camera
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct MainCamera;

/// Camera configuration. Insert your own before adding [CameraPlugin] to override it.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewSettings {
    /// Vertical field of view
    pub fov_degrees: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
    /// Where the camera starts
    pub start_position: Vec3,
    /// What the camera orbits around
    pub target: Vec3,
    /// Share of the pending motion applied each frame
    pub damping_factor: f32,
    /// Multiplier on drag rotation
    pub rotate_speed: f32,
    /// Distance is multiplied by this per wheel line towards the target
    pub zoom_ratio: f32,
    /// Multiplier on drag panning
    pub pan_speed: f32,
    /// Closest the camera gets to the target
    pub min_distance: f32,
    /// Furthest the camera gets from the target
    pub max_distance: f32,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 90.0,
            start_position: Vec3::new(0.0, 0.0, 35.0),
            target: Vec3::ZERO,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_ratio: 0.95,
            pan_speed: 1.0,
            min_distance: 1.0,
            max_distance: 85.0,
        }
    }
}

impl ViewSettings {
    /// The perspective projection for a given aspect ratio
    pub fn projection(&self, aspect_ratio: f32) -> PerspectiveProjection {
        PerspectiveProjection {
            fov: self.fov_degrees.to_radians(),
            near: self.near,
            far: self.far,
            aspect_ratio,
        }
    }
}

/// The size of the output surface in logical pixels
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewportSize(pub Vec2);

impl Default for ViewportSize {
    fn default() -> Self {
        ViewportSize(Vec2::new(1280.0, 720.0))
    }
}

impl ViewportSize {
    /// Width over height
    pub fn aspect_ratio(&self) -> f32 {
        self.0.x / self.0.y
    }
}

/// Orbits, zooms and pans around a target with inertia.
/// Input only queues motion, [OrbitController::update] applies a damped share of it every frame.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct OrbitController {
    /// The point being looked at
    pub target: Vec3,
    /// Distance to the target
    pub radius: f32,
    /// Angle around Y, 0 looks down the -Z axis from +Z
    pub yaw: f32,
    /// Angle from the +Y axis
    pub pitch: f32,
    /// Share of the pending motion applied per update
    pub damping_factor: f32,
    /// Closest allowed distance
    pub min_distance: f32,
    /// Furthest allowed distance
    pub max_distance: f32,
    /// Yaw not yet applied
    pending_yaw: f32,
    /// Pitch not yet applied
    pending_pitch: f32,
    /// Target translation not yet applied
    pending_pan: Vec3,
    /// Distance multiplier not yet applied
    pending_zoom: f32,
}

impl OrbitController {
    /// A controller whose camera sits at `settings.start_position` looking at `settings.target`
    pub fn from_settings(settings: &ViewSettings) -> Self {
        let offset = settings.start_position - settings.target;
        let radius = offset.length();
        let (yaw, pitch) = if radius > 0.0 {
            (
                offset.x.atan2(offset.z),
                (offset.y / radius).clamp(-1.0, 1.0).acos(),
            )
        } else {
            (0.0, PI / 2.0)
        };
        Self {
            target: settings.target,
            radius: radius.clamp(settings.min_distance, settings.max_distance),
            yaw,
            pitch: pitch.clamp(PITCH_EPSILON, PI - PITCH_EPSILON),
            damping_factor: settings.damping_factor,
            min_distance: settings.min_distance,
            max_distance: settings.max_distance,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_pan: Vec3::ZERO,
            pending_zoom: 1.0,
        }
    }

    /// Queues a rotation in radians
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.pending_yaw += delta_yaw;
        self.pending_pitch += delta_pitch;
    }

    /// Queues a translation of the target
    pub fn pan(&mut self, offset: Vec3) {
        self.pending_pan += offset;
    }

    /// Queues a distance multiplier, below 1 moves closer
    pub fn zoom(&mut self, factor: f32) {
        if factor.is_finite() && factor > 0.0 {
            self.pending_zoom *= factor;
        }
    }

    /// Queues a rotation from a pointer drag in logical pixels.
    /// Dragging the full viewport height turns the camera once around.
    pub fn drag_rotate(&mut self, delta: Vec2, viewport_height: f32, rotate_speed: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        self.rotate(
            -TAU * delta.x / viewport_height * rotate_speed,
            -TAU * delta.y / viewport_height * rotate_speed,
        );
    }

    /// Queues a pan from a pointer drag in logical pixels.
    /// The target moves with the pointer at the target's depth.
    pub fn drag_pan(
        &mut self,
        delta: Vec2,
        viewport_height: f32,
        fov: f32,
        camera: &Transform,
        pan_speed: f32,
    ) {
        if viewport_height <= 0.0 {
            return;
        }
        let target_distance = self.radius * (fov / 2.0).tan();
        let scale = 2.0 * target_distance / viewport_height * pan_speed;
        let right = camera.right();
        let up = camera.up();
        self.pan(right * (-delta.x * scale) + up * (delta.y * scale));
    }

    /// Applies a damped share of the queued motion and decays the rest
    pub fn update(&mut self) {
        let d = self.damping_factor.clamp(0.0, 1.0);
        self.yaw += self.pending_yaw * d;
        self.pitch = (self.pitch + self.pending_pitch * d).clamp(PITCH_EPSILON, PI - PITCH_EPSILON);
        self.radius = (self.radius * self.pending_zoom).clamp(self.min_distance, self.max_distance);
        self.target += self.pending_pan * d;

        self.pending_yaw *= 1.0 - d;
        self.pending_pitch *= 1.0 - d;
        self.pending_pan *= 1.0 - d;
        self.pending_zoom = 1.0;
    }

    /// True when nothing is left to apply
    pub fn is_settled(&self) -> bool {
        const SETTLED: f32 = 1e-6;
        self.pending_yaw.abs() < SETTLED
            && self.pending_pitch.abs() < SETTLED
            && self.pending_pan.length() < SETTLED
            && self.pending_zoom == 1.0
    }

    /// Camera position in world space
    pub fn position(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        self.target
            + self.radius * Vec3::new(sin_pitch * sin_yaw, cos_pitch, sin_pitch * cos_yaw)
    }

    /// Camera transform looking at the target
    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position()).looking_at(self.target, Vec3::Y)
    }
}

/// The plugin for the camera system
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    /// Build the camera plugin
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewSettings>()
            .init_resource::<ViewportSize>()
            .add_systems(
                Startup,
                (Self::setup_main_camera, Self::cap_initial_pixel_ratio),
            )
            .add_systems(
                PreUpdate,
                (Self::resize_viewport_system, Self::cap_pixel_ratio_system),
            )
            .add_systems(
                Update,
                (
                    Self::mouse_input_system,
                    Self::touch_input_system,
                    Self::apply_controller_system,
                )
                    .chain()
                    .in_set(FrameSet::View),
            );
    }
}

/// Startup functions
impl CameraPlugin {
    /// Setup the main camera
    pub fn setup_main_camera(
        mut commands: Commands,
        settings: Res<ViewSettings>,
        viewport: Res<ViewportSize>,
        windows: Query<&Window, With<PrimaryWindow>>,
    ) {
        let aspect_ratio = windows
            .get_single()
            .map(|window| window.width() / window.height())
            .ok()
            .filter(|ratio| ratio.is_finite())
            .unwrap_or_else(|| viewport.aspect_ratio());
        let controller = OrbitController::from_settings(&settings);
        commands.spawn((
            Camera3dBundle {
                // The sky camera has already cleared to black and drawn the stars
                camera_3d: Camera3d {
                    clear_color: ClearColorConfig::None,
                    ..default()
                },
                projection: Projection::Perspective(settings.projection(aspect_ratio)),
                transform: controller.transform(),
                ..default()
            },
            controller,
            MainCamera,
        ));
        info!("Main camera at {}", controller.position());
    }

    /// Applies the pixel ratio cap before the first frame
    fn cap_initial_pixel_ratio(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
        for mut window in windows.iter_mut() {
            let capped = capped_scale_factor(window.resolution.base_scale_factor());
            window.resolution.set_scale_factor_override(Some(capped));
        }
    }
}

/// Caps the device pixel ratio at [MAX_PIXEL_RATIO]
pub fn capped_scale_factor(device_scale_factor: f64) -> f64 {
    device_scale_factor.min(MAX_PIXEL_RATIO)
}

/// Update functions
impl CameraPlugin {
    /// Keeps the projection's aspect ratio in step with the window.
    /// Runs in PreUpdate so the next frame is drawn with the new aspect.
    pub fn resize_viewport_system(
        mut resized: EventReader<WindowResized>,
        primary: Query<Entity, With<PrimaryWindow>>,
        mut viewport: ResMut<ViewportSize>,
        mut cameras: Query<&mut Projection, With<MainCamera>>,
    ) {
        let primary = primary.get_single().ok();
        for event in resized.read() {
            if primary.is_some_and(|primary| primary != event.window) {
                continue;
            }
            if event.width <= 0.0 || event.height <= 0.0 {
                continue;
            }
            viewport.0 = Vec2::new(event.width, event.height);
            let aspect_ratio = viewport.aspect_ratio();
            for mut projection in cameras.iter_mut() {
                if let Projection::Perspective(perspective) = projection.as_mut() {
                    perspective.aspect_ratio = aspect_ratio;
                }
            }
            debug!(
                "Viewport resized to {}x{}, aspect {}",
                event.width, event.height, aspect_ratio
            );
        }
    }

    /// Re-applies the pixel ratio cap when the window moves to another display
    fn cap_pixel_ratio_system(
        mut changed: EventReader<WindowBackendScaleFactorChanged>,
        mut windows: Query<&mut Window>,
    ) {
        for event in changed.read() {
            if let Ok(mut window) = windows.get_mut(event.window) {
                let capped = capped_scale_factor(event.scale_factor);
                if window.resolution.scale_factor_override() != Some(capped) {
                    window.resolution.set_scale_factor_override(Some(capped));
                    debug!("Capped scale factor {} to {}", event.scale_factor, capped);
                }
            }
        }
    }

    /// Left drag orbits, right or middle drag pans, the wheel zooms
    fn mouse_input_system(
        settings: Res<ViewSettings>,
        buttons: Res<Input<MouseButton>>,
        mut motion: EventReader<MouseMotion>,
        mut wheel: EventReader<MouseWheel>,
        windows: Query<&Window, With<PrimaryWindow>>,
        mut contexts: EguiContexts,
        mut cameras: Query<(&mut OrbitController, &Transform), With<MainCamera>>,
    ) {
        let drag: Vec2 = motion.read().map(|event| event.delta).sum();
        let lines: f32 = wheel
            .read()
            .map(|event| match event.unit {
                MouseScrollUnit::Line => event.y,
                MouseScrollUnit::Pixel => event.y / PIXELS_PER_LINE,
            })
            .sum();

        if ui_has_pointer(contexts.ctx_mut()) {
            return;
        }
        let Ok(window) = windows.get_single() else {
            return;
        };
        let height = window.height();
        let fov = settings.fov_degrees.to_radians();

        for (mut controller, transform) in cameras.iter_mut() {
            if buttons.pressed(MouseButton::Left) {
                controller.drag_rotate(drag, height, settings.rotate_speed);
            } else if buttons.pressed(MouseButton::Right) || buttons.pressed(MouseButton::Middle) {
                controller.drag_pan(drag, height, fov, transform, settings.pan_speed);
            }
            if lines != 0.0 {
                controller.zoom(settings.zoom_ratio.powf(lines));
            }
        }
    }

    /// One finger orbits, two fingers pinch to zoom
    fn touch_input_system(
        settings: Res<ViewSettings>,
        touches: Res<Touches>,
        windows: Query<&Window, With<PrimaryWindow>>,
        mut contexts: EguiContexts,
        mut cameras: Query<&mut OrbitController, With<MainCamera>>,
    ) {
        // bevy_egui feeds touches to egui as pointer events
        if ui_has_pointer(contexts.ctx_mut()) {
            return;
        }
        let Ok(window) = windows.get_single() else {
            return;
        };
        let active = touches.iter().collect::<Vec<_>>();
        for mut controller in cameras.iter_mut() {
            match active.as_slice() {
                [finger] => {
                    controller.drag_rotate(finger.delta(), window.height(), settings.rotate_speed)
                }
                [a, b] => {
                    let before = a.previous_position().distance(b.previous_position());
                    let now = a.position().distance(b.position());
                    if before > 0.0 && now > 0.0 {
                        controller.zoom(before / now);
                    }
                }
                _ => {}
            }
        }
    }

    /// Moves the camera with the damped controller state
    fn apply_controller_system(
        mut cameras: Query<(&mut OrbitController, &mut Transform), With<MainCamera>>,
    ) {
        for (mut controller, mut transform) in cameras.iter_mut() {
            controller.update();
            *transform = controller.transform();
        }
    }
}

/// True while a finger or the mouse is on an egui window, the camera should ignore it then
fn ui_has_pointer(ctx: &egui::Context) -> bool {
    ctx.is_pointer_over_area() || ctx.wants_pointer_input()
}
