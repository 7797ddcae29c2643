//! This module contains all the GUI related code.
//! The camera and things that are drawn to via screen coordinates rather than world coordinates.

use bevy::app::{PluginGroup, PluginGroupBuilder};

pub mod camera;
pub mod camera_window;

pub struct GuiPluginGroup;

impl PluginGroup for GuiPluginGroup {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::start::<Self>()
            .add(camera::CameraPlugin)
            .add(camera_window::CameraWindowPlugin)
    }
}
