// navmap_core/src/error.rs

use thiserror::Error;

/// Everything that can go wrong while feeding the trackers.
///
/// Every variant is raised before any history is touched, so a failed update
/// leaves the trajectory exactly as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackingError {
    /// A relative pose sample carried a NaN or infinite value.
    #[error("invalid navigation sample: `{field}` is not finite ({value})")]
    InvalidSample { field: &'static str, value: f64 },

    /// A buoy fix had neither absolute coordinates nor a complete
    /// bearing/distance pair, or one of its values was unusable.
    #[error("invalid buoy fix: {reason}")]
    InvalidFix { reason: &'static str },

    /// `add_fix` was called on an empty history with nothing to seed from.
    #[error("buoy resolver has no prior fix and the input carries no position to seed from")]
    NotSeeded,

    /// A latitude/longitude string could not be turned into a coordinate.
    #[error("invalid geodetic coordinate `{input}`: {reason}")]
    InvalidCoordinate { input: String, reason: String },
}
