// navmap_viz/src/visualization/core/config.rs

//! The front end's TOML configuration. Everything the map controller itself
//! needs lives in `[map]`; the other sections drive the synthetic sources and
//! the log filter.

use bevy::prelude::Resource;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::path::Path;

use navmap_core::config::NavigationMapConfig;
use navmap_core::types::GeodeticAnchor;

pub const DEFAULT_CONFIG_PATH: &str = "assets/config/navigation_map.toml";

#[derive(Resource, Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VizConfig {
    #[serde(default)]
    pub map: NavigationMapConfig,

    /// Where the buoy is seeded when tracking starts. Falls back to the map
    /// origin.
    #[serde(default)]
    pub start: Option<GeodeticAnchor>,

    #[serde(default)]
    pub source: NavigationSourceConfig,

    #[serde(default)]
    pub buoy_drift: BuoyDriftConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl VizConfig {
    /// Loads `path` (a missing file yields the defaults) and lets
    /// `NAVMAP_`-prefixed environment variables override single keys, e.g.
    /// `NAVMAP_MAP__ORIENTATION_MODE=true`.
    pub fn load(path: &Path) -> Result<Self, figment::Error> {
        Self::from_figment(
            Figment::new()
                .merge(Toml::file(path))
                .merge(Env::prefixed("NAVMAP_").split("__")),
        )
    }

    pub fn from_figment(figment: Figment) -> Result<Self, figment::Error> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn start_anchor(&self) -> GeodeticAnchor {
        self.start.unwrap_or(self.map.origin)
    }

    fn validate(&self) -> Result<(), figment::Error> {
        for anchor in std::iter::once(&self.map.origin).chain(self.start.as_ref()) {
            GeodeticAnchor::new(anchor.lat, anchor.lon)
                .map_err(|e| figment::Error::from(e.to_string()))?;
        }
        let positive = [
            ("map.camera_distance", self.map.camera_distance),
            ("map.min_camera_distance", self.map.min_camera_distance),
            ("map.zoom_step", self.map.zoom_step),
            ("source.rate_hz", self.source.rate_hz as f64),
            ("buoy_drift.rate_hz", self.buoy_drift.rate_hz as f64),
        ];
        if let Some((key, value)) = positive.iter().find(|(_, v)| !is_positive(*v)) {
            return Err(format!("{} must be a positive number, got {}", key, value).into());
        }
        let accuracy = self.map.default_buoy_accuracy;
        if !accuracy.is_finite() || accuracy < 0.0 {
            return Err(format!(
                "map.default_buoy_accuracy must not be negative, got {}",
                accuracy
            )
            .into());
        }
        if !self.buoy_drift.max_distance.is_finite() || self.buoy_drift.max_distance < 0.0 {
            return Err("buoy_drift: max_distance must not be negative".into());
        }
        Ok(())
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// The synthetic vehicle: it cruises forward, turns slowly and dives with a
/// constant nose-down pitch.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavigationSourceConfig {
    #[serde(default = "default_source_rate")]
    pub rate_hz: f32,
    /// `None` seeds from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_forward_speed")]
    pub forward_speed: f64,
    #[serde(default = "default_turn_rate")]
    pub turn_rate: f64,
    #[serde(default = "default_dive_pitch")]
    pub dive_pitch: f64,
    #[serde(default = "default_attitude_noise")]
    pub attitude_noise_stddev: f64,
    #[serde(default = "default_translation_noise")]
    pub translation_noise_stddev: f64,
    #[serde(default = "default_initial_depth")]
    pub initial_depth: f64,
}

fn default_source_rate() -> f32 {
    10.0
}
fn default_forward_speed() -> f64 {
    0.3
}
fn default_turn_rate() -> f64 {
    0.05
}
fn default_dive_pitch() -> f64 {
    0.05
}
fn default_attitude_noise() -> f64 {
    0.005
}
fn default_translation_noise() -> f64 {
    0.002
}
fn default_initial_depth() -> f64 {
    2.0
}

impl Default for NavigationSourceConfig {
    fn default() -> Self {
        Self {
            rate_hz: default_source_rate(),
            seed: None,
            forward_speed: default_forward_speed(),
            turn_rate: default_turn_rate(),
            dive_pitch: default_dive_pitch(),
            attitude_noise_stddev: default_attitude_noise(),
            translation_noise_stddev: default_translation_noise(),
            initial_depth: default_initial_depth(),
        }
    }
}

/// Bearing/distance fixes that let the buoy wander around its last position.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuoyDriftConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_drift_rate")]
    pub rate_hz: f32,
    #[serde(default = "default_drift_distance")]
    pub max_distance: f64,
    /// Reported with every fix. `None` keeps the previous accuracy.
    #[serde(default)]
    pub accuracy: Option<f64>,
}

fn default_true() -> bool {
    true
}
fn default_drift_rate() -> f32 {
    0.5
}
fn default_drift_distance() -> f64 {
    0.2
}

impl Default for BuoyDriftConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rate_hz: default_drift_rate(),
            max_distance: default_drift_distance(),
            accuracy: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "info,wgpu_core=error,wgpu_hal=error,navmap_viz=debug,navmap_core=debug".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn parse(toml: &str) -> Result<VizConfig, figment::Error> {
        VizConfig::from_figment(Figment::from(Toml::string(toml)))
    }

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = parse("").unwrap();
        assert!(!config.map.orientation_mode);
        assert_abs_diff_eq!(config.map.camera_distance, 5.0);
        assert_abs_diff_eq!(config.map.zoom_step, 0.1);
        assert_abs_diff_eq!(config.map.default_buoy_accuracy, 1.0);
        assert!(config.start.is_none());
        assert_eq!(config.start_anchor(), config.map.origin);
        assert!(config.buoy_drift.enabled);
        assert!(config.log.filter.contains("navmap_core=debug"));
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = parse(
            r#"
            [map]
            orientation_mode = true
            camera_distance = 8.0

            [start]
            lat = 51.04
            lon = 13.74

            [source]
            seed = 42
            rate_hz = 5.0

            [buoy_drift]
            enabled = false
            "#,
        )
        .unwrap();

        assert!(config.map.orientation_mode);
        assert_abs_diff_eq!(config.map.camera_distance, 8.0);
        // Untouched keys in an overridden section keep their default.
        assert_abs_diff_eq!(config.map.min_camera_distance, 0.5);
        assert_eq!(config.start_anchor(), GeodeticAnchor { lat: 51.04, lon: 13.74 });
        assert_eq!(config.source.seed, Some(42));
        assert_abs_diff_eq!(config.source.rate_hz, 5.0);
        assert!(!config.buoy_drift.enabled);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(parse("[map]\nzoom = 3.0\n").is_err());
    }

    #[test]
    fn test_out_of_range_start_is_rejected() {
        assert!(parse("[start]\nlat = 91.0\nlon = 0.0\n").is_err());
    }

    #[test]
    fn test_non_positive_rate_is_rejected() {
        assert!(parse("[source]\nrate_hz = 0.0\n").is_err());
    }

    #[test]
    fn test_nan_rates_are_rejected() {
        assert!(parse("[source]\nrate_hz = nan\n").is_err());
        assert!(parse("[buoy_drift]\nrate_hz = nan\n").is_err());
        assert!(parse("[source]\nrate_hz = inf\n").is_err());
    }

    #[test]
    fn test_camera_distance_and_accuracy_are_checked() {
        assert!(parse("[map]\ncamera_distance = nan\n").is_err());
        assert!(parse("[map]\ncamera_distance = -1.0\n").is_err());
        assert!(parse("[map]\ndefault_buoy_accuracy = -0.5\n").is_err());
        assert!(parse("[map]\ndefault_buoy_accuracy = nan\n").is_err());
        assert!(parse("[map]\ndefault_buoy_accuracy = 0.0\n").is_ok());
    }
}
