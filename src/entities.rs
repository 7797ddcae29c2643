//! This module contains all the top level bundles.
//! These are entities that are used in the scene.

use bevy::app::{PluginGroup, PluginGroupBuilder};

pub mod celestials;
pub mod lighting;
pub mod starfield;
pub mod utils;

pub struct EntitiesPluginGroup;

impl PluginGroup for EntitiesPluginGroup {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::start::<Self>()
            .add(celestials::celestial::CelestialPlugin)
            .add(starfield::StarfieldPlugin)
            .add(lighting::LightingPlugin)
    }
}
