use bevy::prelude::Resource;
use clap::Parser;
use std::path::PathBuf;

use navmap_core::error::TrackingError;
use navmap_core::types::GeodeticAnchor;

use crate::visualization::core::config::{VizConfig, DEFAULT_CONFIG_PATH};

/// Live map of an underwater vehicle and its surface buoy.
///
/// Command-line flags take precedence over the configuration file.
#[derive(Parser, Debug, Resource, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the map TOML file.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Only show the vehicle's orientation: no ghost markers, level camera.
    #[arg(long, default_value_t = false)]
    pub orientation_mode: bool,

    /// Start latitude in decimal degrees. Requires `--lon`.
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<String>,

    /// Start longitude in decimal degrees. Requires `--lat`.
    #[arg(long, allow_hyphen_values = true)]
    pub lon: Option<String>,

    /// Start tracking immediately instead of waiting for `Enter`.
    #[arg(long, default_value_t = false)]
    pub auto_start: bool,
}

impl Cli {
    /// Folds the flags into a loaded configuration.
    pub fn apply_overrides(&self, config: &mut VizConfig) -> Result<(), TrackingError> {
        if self.orientation_mode {
            config.map.orientation_mode = true;
        }
        match (&self.lat, &self.lon) {
            (Some(lat), Some(lon)) => config.start = Some(GeodeticAnchor::parse(lat, lon)?),
            (None, None) => {}
            (Some(given), None) | (None, Some(given)) => {
                return Err(TrackingError::InvalidCoordinate {
                    input: given.clone(),
                    reason: "--lat and --lon must be given together".to_string(),
                })
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["navmap"]).unwrap();
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert!(!cli.orientation_mode);
        assert!(!cli.auto_start);

        let mut config = VizConfig::default();
        cli.apply_overrides(&mut config).unwrap();
        assert!(!config.map.orientation_mode);
        assert!(config.start.is_none());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "navmap",
            "--orientation-mode",
            "--lat",
            "-33.5",
            "--lon",
            "151.25",
        ])
        .unwrap();

        let mut config = VizConfig::default();
        cli.apply_overrides(&mut config).unwrap();
        assert!(config.map.orientation_mode);
        assert_eq!(
            config.start,
            Some(GeodeticAnchor {
                lat: -33.5,
                lon: 151.25
            })
        );
    }

    #[test]
    fn test_lat_without_lon_is_rejected() {
        let cli = Cli::try_parse_from(["navmap", "--lat", "51.0"]).unwrap();
        let mut config = VizConfig::default();
        assert!(cli.apply_overrides(&mut config).is_err());
    }

    #[test]
    fn test_unparsable_coordinate_is_rejected() {
        let cli = Cli::try_parse_from(["navmap", "--lat", "north", "--lon", "13.7"]).unwrap();
        let mut config = VizConfig::default();
        let err = cli.apply_overrides(&mut config).unwrap_err();
        assert!(matches!(err, TrackingError::InvalidCoordinate { .. }));
        assert!(config.start.is_none());
    }
}
