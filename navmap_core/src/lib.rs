// navmap_core/src/lib.rs

//! Pose accumulation and position resolution for an ROV and its surface buoy.
//!
//! This crate is framework-agnostic. Rendering, geodesy and sensor fusion are
//! reached only through the traits in [`scene`], [`geo`] and [`integration`].

pub mod config;
pub mod error;
pub mod geo;
pub mod integration;
pub mod navigation_map;
pub mod prelude;
pub mod scene;
pub mod tracking;
pub mod trail;
pub mod types;
