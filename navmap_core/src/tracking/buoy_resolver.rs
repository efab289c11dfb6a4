// navmap_core/src/tracking/buoy_resolver.rs

use nalgebra::{Point2, Vector2};
use tracing::{debug, info, warn};

use super::TrackingState;
use crate::error::TrackingError;
use crate::geo::GeoResolver;
use crate::trail::TrailHistory;
use crate::types::{BuoyFix, BuoyFixInput, FixSource, GeodeticAnchor};

/// Accuracy radius used when neither the input nor an earlier fix gives one.
pub const DEFAULT_BUOY_ACCURACY: f64 = 1.0;

/// Resolves buoy fixes given either as absolute local coordinates or as a
/// bearing/distance off the previous fix, and keeps their trail.
///
/// Bearings are measured counter-clockwise from the +x (east) axis, the same
/// right-handed convention as the vehicle yaw.
#[derive(Debug)]
pub struct BuoyResolver {
    geo: Box<dyn GeoResolver>,
    default_accuracy: f64,
    state: TrackingState<Point2<f64>>,
    history: TrailHistory<BuoyFix>,
}

impl BuoyResolver {
    pub fn new(geo: Box<dyn GeoResolver>) -> Self {
        Self {
            geo,
            default_accuracy: DEFAULT_BUOY_ACCURACY,
            state: TrackingState::Unseeded,
            history: TrailHistory::new(),
        }
    }

    pub fn with_default_accuracy(mut self, accuracy: f64) -> Self {
        self.default_accuracy = accuracy;
        self
    }

    pub fn reset(&mut self) {
        info!(
            "Resetting buoy trail ({} fixes discarded).",
            self.history.len()
        );
        self.state = TrackingState::Unseeded;
        self.history.reset();
    }

    /// Starts a new buoy trail at a geodetic anchor.
    ///
    /// Any earlier trail is discarded; the anchor becomes fix #0.
    pub fn seed(&mut self, anchor: GeodeticAnchor) -> BuoyFix {
        if !self.history.is_empty() {
            self.reset();
        }
        let planar = self.geo.to_local_meters(&anchor);
        let mut fix = BuoyFix::at(planar, self.default_accuracy, FixSource::Geodetic);
        fix.coordinates = Some(anchor);

        info!(
            "Seeded buoy at lat={:.6}, lon={:.6} -> x={:.3}, y={:.3}",
            anchor.lat, anchor.lon, fix.x, fix.y
        );
        self.store(fix)
    }

    /// Resolves `input` against the trail and appends the result.
    ///
    /// On the relative branch the resolved `x`/`y` are written back into
    /// `input`, so whoever produced the fix sees where it landed.
    pub fn add_fix(&mut self, input: &mut BuoyFixInput) -> Result<BuoyFix, TrackingError> {
        let (planar, source) = match self.resolve(input) {
            Ok(resolved) => resolved,
            Err(e) => {
                warn!("Rejecting buoy fix: {}", e);
                return Err(e);
            }
        };
        if source == FixSource::Relative {
            input.x = Some(planar.x);
            input.y = Some(planar.y);
        }

        let accuracy = input
            .accuracy
            .or_else(|| self.history.last().map(|fix| fix.accuracy))
            .unwrap_or(self.default_accuracy);

        let mut fix = BuoyFix::at(planar, accuracy, source);
        fix.coordinates = input.coordinates;

        debug!(
            "Buoy fix #{} ({:?}): x={:.3}, y={:.3}",
            self.history.len(),
            source,
            fix.x,
            fix.y
        );
        Ok(self.store(fix))
    }

    /// Picks the representation the fix is read in and checks only the
    /// fields that representation uses.
    fn resolve(&self, input: &BuoyFixInput) -> Result<(Point2<f64>, FixSource), TrackingError> {
        validate_accuracy(input.accuracy)?;
        match (input.absolute_position(), input.bearing_distance()) {
            (Some(absolute), _) => {
                if !absolute.x.is_finite() || !absolute.y.is_finite() {
                    return Err(TrackingError::InvalidFix {
                        reason: "absolute position is not finite",
                    });
                }
                Ok((absolute, FixSource::Absolute))
            }
            (None, Some((bearing, distance))) => {
                validate_relative(bearing, distance)?;
                // With no previous fix the pair is read relative to the map origin.
                let reference = self
                    .state
                    .reference()
                    .copied()
                    .unwrap_or_else(Point2::origin);
                Ok((
                    compose_bearing_distance(&reference, bearing, distance),
                    FixSource::Relative,
                ))
            }
            (None, None) if self.state.is_tracking() => Err(TrackingError::InvalidFix {
                reason: "neither absolute x/y nor a complete bearing/distance pair",
            }),
            (None, None) => Err(TrackingError::NotSeeded),
        }
    }

    fn store(&mut self, fix: BuoyFix) -> BuoyFix {
        self.state = TrackingState::Tracking(fix.planar());
        self.history.append(fix);
        fix
    }

    pub fn state(&self) -> &TrackingState<Point2<f64>> {
        &self.state
    }

    pub fn history(&self) -> &TrailHistory<BuoyFix> {
        &self.history
    }

    pub fn last(&self) -> Option<&BuoyFix> {
        self.history.last()
    }

    pub fn ghost(&self) -> Option<&BuoyFix> {
        self.history.ghost()
    }

    pub fn segment(&self) -> Option<(&BuoyFix, &BuoyFix)> {
        self.history.segment()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

/// Heads off from `reference` along `bearing` for `distance` metres.
pub fn compose_bearing_distance(
    reference: &Point2<f64>,
    bearing: f64,
    distance: f64,
) -> Point2<f64> {
    let heading = Vector2::new(bearing.cos(), bearing.sin());
    Point2::from(reference.coords + heading * distance)
}

fn validate_relative(bearing: f64, distance: f64) -> Result<(), TrackingError> {
    if !bearing.is_finite() || !distance.is_finite() {
        return Err(TrackingError::InvalidFix {
            reason: "bearing/distance is not finite",
        });
    }
    if distance < 0.0 {
        return Err(TrackingError::InvalidFix {
            reason: "distance must not be negative",
        });
    }
    Ok(())
}

fn validate_accuracy(accuracy: Option<f64>) -> Result<(), TrackingError> {
    match accuracy {
        Some(a) if !a.is_finite() => Err(TrackingError::InvalidFix {
            reason: "accuracy radius is not finite",
        }),
        Some(a) if a < 0.0 => Err(TrackingError::InvalidFix {
            reason: "accuracy radius must not be negative",
        }),
        _ => Ok(()),
    }
}
