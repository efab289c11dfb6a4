// navmap_core/src/config.rs

use serde::Deserialize;

use crate::types::GeodeticAnchor;

/// # NavigationMapConfig
/// Everything the map controller needs to know about presentation. None of
/// these values change the tracking math.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)] // Fail if the TOML has fields not in our struct
pub struct NavigationMapConfig {
    /// Only show the vehicle's absolute orientation: no ghost vehicle markers
    /// and a camera that looks straight along the water plane.
    #[serde(default)]
    pub orientation_mode: bool,

    /// Initial distance of the follow camera from the vehicle, in metres.
    #[serde(default = "default_camera_distance")]
    pub camera_distance: f64,

    /// How much one zoom step changes the camera distance, in metres.
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f64,

    /// The camera never gets closer than this.
    #[serde(default = "default_min_camera_distance")]
    pub min_camera_distance: f64,

    /// Buoy accuracy radius used when no fix has reported one.
    #[serde(default = "default_buoy_accuracy")]
    pub default_buoy_accuracy: f64,

    /// Geodetic point that maps to the local origin (0, 0).
    #[serde(default = "default_origin")]
    pub origin: GeodeticAnchor,
}

fn default_camera_distance() -> f64 {
    5.0
}
fn default_zoom_step() -> f64 {
    0.1
}
fn default_min_camera_distance() -> f64 {
    0.5
}
fn default_buoy_accuracy() -> f64 {
    1.0
}
fn default_origin() -> GeodeticAnchor {
    GeodeticAnchor {
        lat: 51.037669,
        lon: 13.735245,
    }
}

impl Default for NavigationMapConfig {
    fn default() -> Self {
        Self {
            orientation_mode: false,
            camera_distance: default_camera_distance(),
            zoom_step: default_zoom_step(),
            min_camera_distance: default_min_camera_distance(),
            default_buoy_accuracy: default_buoy_accuracy(),
            origin: default_origin(),
        }
    }
}
