// navmap_viz/src/visualization/core/events.rs
use bevy::prelude::Event;
// The pure data structs from the core library
use navmap_core::types::{BuoyFixInput, GeodeticAnchor, RelativePose};

/// One navigation sample from the vehicle.
#[derive(Event, Clone, Debug)]
pub struct NavigationSampleEvent(pub RelativePose);

/// A buoy fix request, absolute or bearing/distance.
#[derive(Event, Clone, Debug)]
pub struct BuoyFixEvent(pub BuoyFixInput);

/// The operator picked a start point.
#[derive(Event, Clone, Debug)]
pub struct StartTrackingEvent(pub GeodeticAnchor);

/// Clears both trails and every marker.
#[derive(Event, Clone, Debug, Default)]
pub struct ResetMapEvent;
