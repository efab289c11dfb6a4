// navmap_core/src/integration.rs

use std::fmt::Debug;

use crate::types::{BuoyFix, BuoyFixInput, Pose};

/// A GPS/INS integration step: given the newest vehicle pose, it may derive
/// the next buoy fix (for instance from acoustic ranging to the vehicle).
pub trait IntegrationMethod: Debug + Send + Sync {
    /// A short name for logs.
    fn name(&self) -> &str;

    /// Returns a fix to feed into the buoy resolver, or `None` to leave the
    /// buoy where it is.
    fn next_buoy_fix(&mut self, pose: &Pose, last_buoy: Option<&BuoyFix>) -> Option<BuoyFixInput>;
}

/// The pass-through integration: the buoy is only moved by explicit fixes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFilter;

impl IntegrationMethod for NoFilter {
    fn name(&self) -> &str {
        "NoFilter"
    }

    fn next_buoy_fix(&mut self, _pose: &Pose, _last_buoy: Option<&BuoyFix>) -> Option<BuoyFixInput> {
        None
    }
}
