//! The frame driver owns the animation loop.
//! Bevy draws every frame, this decides whether the bodies move and when the app should exit.

use bevy::{
    app::{App, AppExit, Last, Plugin, Startup, Update},
    ecs::{
        event::EventWriter,
        schedule::{IntoSystemConfigs, IntoSystemSetConfigs, SystemSet},
        system::{Res, ResMut, Resource},
    },
    log::info,
};

/// Ordering of the per frame work inside [Update]
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Bodies are moved to their pose for this frame
    Animate,
    /// The camera reacts to input, after the bodies have moved. Not gated by the driver.
    View,
}

/// Lifecycle of the animation loop
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FrameDriver {
    /// Created but not started yet
    #[default]
    Idle,
    /// Animating every frame
    Running,
    /// Stopped for good, the app exits at the end of the frame
    Stopped,
}

impl FrameDriver {
    /// Begins animating. Does nothing once stopped.
    pub fn start(&mut self) {
        if *self == FrameDriver::Idle {
            *self = FrameDriver::Running;
        }
    }

    /// Cancels the loop
    pub fn stop(&mut self) {
        *self = FrameDriver::Stopped;
    }

    pub fn is_running(&self) -> bool {
        *self == FrameDriver::Running
    }

    /// Run condition for systems that only run while animating
    pub fn running(driver: Res<FrameDriver>) -> bool {
        driver.is_running()
    }
}

pub struct FrameDriverPlugin;

impl Plugin for FrameDriverPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FrameDriver>()
            .configure_sets(Update, (FrameSet::Animate, FrameSet::View).chain())
            .configure_sets(Update, FrameSet::Animate.run_if(FrameDriver::running))
            .add_systems(Startup, Self::start_system)
            .add_systems(Last, Self::exit_when_stopped_system);
    }
}

impl FrameDriverPlugin {
    fn start_system(mut driver: ResMut<FrameDriver>) {
        driver.start();
        info!("Frame driver started");
    }

    fn exit_when_stopped_system(driver: Res<FrameDriver>, mut exit: EventWriter<AppExit>) {
        if *driver == FrameDriver::Stopped {
            info!("Frame driver stopped, exiting");
            exit.send(AppExit);
        }
    }
}
