// navmap_viz/src/prelude.rs

// Re-export the entire Bevy prelude for convenience.
pub use bevy::prelude::*;

// Re-export the navmap_core prelude so the pure tracking types are at hand.
pub use navmap_core::prelude::*;

pub use crate::cli::Cli;
pub use crate::visualization::core::app_state::{AppState, MapSet};
pub use crate::visualization::core::config::VizConfig;
pub use crate::visualization::core::events::{
    BuoyFixEvent, NavigationSampleEvent, ResetMapEvent, StartTrackingEvent,
};
pub use crate::visualization::plugins::tracking::MapController;
pub use crate::NavigationMapVizPlugin;
