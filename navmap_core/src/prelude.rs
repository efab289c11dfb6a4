// navmap_core/src/prelude.rs

// --- Core Abstractions (the collaborator contracts) ---
pub use crate::geo::{GeoResolver, LocalTangentPlane};
pub use crate::integration::{IntegrationMethod, NoFilter};
pub use crate::scene::{SceneAdapter, SceneColor, SceneCommand, SceneCommandQueue};

// --- Core Data Structures ---
pub use crate::trail::{TrailEntry, TrailHistory};
pub use crate::types::{
    BuoyFix, BuoyFixInput, FixSource, GeodeticAnchor, Pose, RelativePose, BUOY_SURFACE_OFFSET,
};

// --- Trackers and the map controller ---
pub use crate::config::NavigationMapConfig;
pub use crate::error::TrackingError;
pub use crate::navigation_map::NavigationMap;
pub use crate::tracking::{BuoyResolver, PoseTracker, TrackingState};
