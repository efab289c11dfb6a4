// navmap_viz/src/visualization/core/app_state.rs

use bevy::{ecs::schedule::SystemSet, prelude::States};

/// The two phases of a map session.
#[derive(States, Debug, Clone, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    /// Waiting for the operator to pick a start point. Nothing is tracked.
    #[default]
    Idle,

    /// The buoy is seeded and navigation samples are being drawn.
    Tracking,
}

// =========================================================================
// == Per-Frame Data Flow ==
// =========================================================================

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum MapSet {
    /// Keyboard handling and session control (start, reset, zoom).
    Input,
    /// Systems that produce navigation samples and buoy fixes.
    Sources,
    /// Feeds the produced events into the navigation map.
    Tracking,
    /// Turns the map's scene commands into entities and gizmos. Runs last.
    Render,
}
