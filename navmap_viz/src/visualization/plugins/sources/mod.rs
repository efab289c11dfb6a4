// navmap_viz/src/visualization/plugins/sources/mod.rs

//! Synthetic stand-ins for the vehicle's navigation stream and the buoy's
//! acoustic fixes.

pub mod buoy_drift;
pub mod navigation;
