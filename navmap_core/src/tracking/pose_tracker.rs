// navmap_core/src/tracking/pose_tracker.rs

use nalgebra::{Isometry3, Point3, Translation3};
use tracing::{debug, info, warn};

use super::TrackingState;
use crate::error::TrackingError;
use crate::trail::TrailHistory;
use crate::types::{Pose, RelativePose};

/// Dead-reckons the vehicle trajectory from relative navigation samples.
///
/// The first sample only anchors the trajectory at `(0, 0, -depth)`. Every
/// later sample sets the vehicle attitude and moves it by the sample's
/// translation along the body axes of that new attitude, starting from the
/// previous world position.
#[derive(Debug, Clone, Default)]
pub struct PoseTracker {
    state: TrackingState<Isometry3<f64>>,
    history: TrailHistory<Pose>,
}

impl PoseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the whole trajectory. The next sample anchors a new one.
    pub fn reset(&mut self) {
        info!(
            "Resetting vehicle trajectory ({} poses discarded).",
            self.history.len()
        );
        self.state = TrackingState::Unseeded;
        self.history.reset();
    }

    /// Composes `sample` onto the trajectory and returns the stored pose.
    pub fn add_pose(&mut self, sample: &RelativePose) -> Result<Pose, TrackingError> {
        if let Err(e) = sample.validate() {
            warn!("Rejecting navigation sample: {}", e);
            return Err(e);
        }

        let (world, pose) = match &self.state {
            TrackingState::Unseeded => {
                let anchor = Point3::new(0.0, 0.0, -sample.depth);
                info!("Anchoring vehicle trajectory at depth {:.2} m.", sample.depth);
                (
                    Isometry3::translation(anchor.x, anchor.y, anchor.z),
                    Pose::new(anchor, 0.0, 0.0, 0.0),
                )
            }
            TrackingState::Tracking(previous) => {
                // The translation is expressed in the body frame of the NEW attitude.
                let rotation = sample.attitude();
                let position = previous.translation.vector + rotation * sample.translation();
                (
                    Isometry3::from_parts(Translation3::from(position), rotation),
                    Pose::new(Point3::from(position), sample.roll, sample.pitch, sample.yaw),
                )
            }
        };

        self.state = TrackingState::Tracking(world);
        self.history.append(pose);
        debug!(
            "Vehicle pose #{}: x={:.3}, y={:.3}, z={:.3}",
            self.history.len() - 1,
            pose.x,
            pose.y,
            pose.z
        );
        Ok(pose)
    }

    pub fn state(&self) -> &TrackingState<Isometry3<f64>> {
        &self.state
    }

    /// The world transform the next sample will be composed onto.
    pub fn world_transform(&self) -> Option<&Isometry3<f64>> {
        self.state.reference()
    }

    pub fn history(&self) -> &TrailHistory<Pose> {
        &self.history
    }

    pub fn last(&self) -> Option<&Pose> {
        self.history.last()
    }

    pub fn ghost(&self) -> Option<&Pose> {
        self.history.ghost()
    }

    pub fn segment(&self) -> Option<(&Pose, &Pose)> {
        self.history.segment()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
