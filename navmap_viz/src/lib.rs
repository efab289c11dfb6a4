// navmap_viz/src/lib.rs

use bevy::prelude::*;

// Import the plugins defined within the visualization crate.
use crate::visualization::core::app_state::{AppState, MapSet};
use crate::visualization::plugins::input::MapInputPlugin;
use crate::visualization::plugins::scene::ScenePlugin;
use crate::visualization::plugins::sources::buoy_drift::BuoyDriftPlugin;
use crate::visualization::plugins::sources::navigation::NavigationSourcePlugin;
use crate::visualization::plugins::tracking::TrackingPlugin;

// This prelude is for convenience for other files WITHIN the navmap_viz crate.
pub mod prelude;

pub mod cli;
pub mod visualization;

/// The main plugin that brings together the whole live map.
/// The binary inserts a `VizConfig` resource and adds this one plugin.
pub struct NavigationMapVizPlugin;

impl Plugin for NavigationMapVizPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>()
            .configure_sets(
                Update,
                (
                    MapSet::Input,
                    MapSet::Sources,
                    MapSet::Tracking,
                    MapSet::Render,
                )
                    .chain(),
            )
            .add_plugins((
                // Owns the navigation map and feeds events into it.
                TrackingPlugin,
                // Markers, trails, grid and the follow camera.
                ScenePlugin,
                // Enter / R / zoom keys.
                MapInputPlugin,
                // Synthetic inputs standing in for the vehicle and the buoy.
                NavigationSourcePlugin,
                BuoyDriftPlugin,
            ));
    }
}
