// navmap_core/src/tracking/mod.rs

//! The two trackers: the vehicle's dead-reckoned trajectory and the buoy's
//! resolved fixes. Both are small state machines over [`TrackingState`].

/// Whether a tracker has been anchored yet.
///
/// The first successful update moves a tracker from `Unseeded` to `Tracking`,
/// carrying the reference every later update composes onto. Only `reset`
/// goes back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackingState<T> {
    Unseeded,
    Tracking(T),
}

impl<T> Default for TrackingState<T> {
    fn default() -> Self {
        TrackingState::Unseeded
    }
}

impl<T> TrackingState<T> {
    pub fn is_tracking(&self) -> bool {
        matches!(self, TrackingState::Tracking(_))
    }

    /// The current reference, if anchored.
    pub fn reference(&self) -> Option<&T> {
        match self {
            TrackingState::Unseeded => None,
            TrackingState::Tracking(reference) => Some(reference),
        }
    }
}

mod buoy_resolver;
mod pose_tracker;

pub use buoy_resolver::BuoyResolver;
pub use pose_tracker::PoseTracker;
