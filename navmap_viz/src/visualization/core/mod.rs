// navmap_viz/src/visualization/core/mod.rs

pub mod app_state;
pub mod config;
pub mod events;
pub mod prng;
pub mod transforms;
