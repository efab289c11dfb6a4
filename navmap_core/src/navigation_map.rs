// navmap_core/src/navigation_map.rs

use nalgebra::Point3;
use tracing::{debug, info, warn};

use crate::config::NavigationMapConfig;
use crate::error::TrackingError;
use crate::geo::GeoResolver;
use crate::integration::IntegrationMethod;
use crate::scene::{SceneAdapter, SceneColor};
use crate::tracking::{BuoyResolver, PoseTracker};
use crate::types::{BuoyFix, BuoyFixInput, GeodeticAnchor, Pose, RelativePose};

/// The map controller: feeds navigation events into the two trackers and
/// mirrors every resolved pose and fix into the scene.
///
/// All collaborators are handed in at construction; nothing is looked up
/// globally.
#[derive(Debug)]
pub struct NavigationMap<S: SceneAdapter> {
    config: NavigationMapConfig,
    scene: S,
    poses: PoseTracker,
    buoy: BuoyResolver,
    integration: Box<dyn IntegrationMethod>,
    camera_distance: f64,
    tracking_started: bool,
}

impl<S: SceneAdapter> NavigationMap<S> {
    pub fn new(
        config: NavigationMapConfig,
        scene: S,
        geo: Box<dyn GeoResolver>,
        integration: Box<dyn IntegrationMethod>,
    ) -> Self {
        info!(
            "Creating navigation map (orientation mode: {}, integration: {}).",
            config.orientation_mode,
            integration.name()
        );
        let buoy = BuoyResolver::new(geo).with_default_accuracy(config.default_buoy_accuracy);
        Self {
            camera_distance: config.camera_distance,
            config,
            scene,
            poses: PoseTracker::new(),
            buoy,
            integration,
            tracking_started: false,
        }
    }

    /// Starts a fresh run: clears both trails, seeds the buoy at `anchor` and
    /// begins accepting navigation samples.
    pub fn start_tracking(&mut self, anchor: GeodeticAnchor) -> BuoyFix {
        self.poses.reset();
        let fix = self.buoy.seed(anchor);
        self.scene.place_buoy_marker(fix.position(), fix.accuracy);
        self.tracking_started = true;
        info!("Tracking started.");
        fix
    }

    /// Handles one vehicle telemetry sample.
    ///
    /// Returns `Ok(None)` when tracking has not been started yet.
    pub fn on_navigation_sample(
        &mut self,
        sample: &RelativePose,
    ) -> Result<Option<Pose>, TrackingError> {
        if !self.tracking_started {
            debug!("Ignoring navigation sample, tracking not started.");
            return Ok(None);
        }

        let pose = self.poses.add_pose(sample)?;
        self.scene
            .place_vehicle_marker(pose.position(), pose.rotation());

        if let Some((ghost, last)) = self.poses.segment() {
            if !self.config.orientation_mode {
                self.scene
                    .place_ghost_vehicle_marker(ghost.position(), ghost.rotation());
            }
            self.scene
                .draw_segment(ghost.position(), last.position(), SceneColor::VEHICLE_TRAIL);
        }

        if let Some(mut input) = self.integration.next_buoy_fix(&pose, self.buoy.last()) {
            // A bad derived fix must not cost us the vehicle pose.
            if let Err(e) = self.on_buoy_fix_request(&mut input) {
                warn!(
                    "Integration '{}' produced an unusable buoy fix: {}",
                    self.integration.name(),
                    e
                );
            }
        }

        Ok(Some(pose))
    }

    /// Handles a buoy fix, from the user or from an integration step.
    pub fn on_buoy_fix_request(
        &mut self,
        input: &mut BuoyFixInput,
    ) -> Result<BuoyFix, TrackingError> {
        let fix = self.buoy.add_fix(input)?;
        self.scene.place_buoy_marker(fix.position(), fix.accuracy);

        if let Some((ghost, last)) = self.buoy.segment() {
            self.scene
                .place_ghost_buoy_marker(ghost.position(), ghost.accuracy);
            self.scene
                .draw_segment(ghost.position(), last.position(), SceneColor::BUOY_TRAIL);
        }
        Ok(fix)
    }

    /// Called once per rendered frame. Keeps the camera on the newest pose.
    pub fn render_tick(&mut self) {
        if let Some(pose) = self.poses.last() {
            let target = pose.position();
            let eye = self.camera_eye(&target);
            self.scene.follow_camera(target, eye);
        }
    }

    /// Where the camera sits for a given target: behind (south of) and above
    /// the vehicle, or level with it in orientation mode.
    pub fn camera_eye(&self, target: &Point3<f64>) -> Point3<f64> {
        let d = self.camera_distance;
        if self.config.orientation_mode {
            Point3::new(target.x, target.y - d, target.z)
        } else {
            Point3::new(target.x, target.y - d, target.z + d)
        }
    }

    pub fn zoom_in(&mut self) {
        self.camera_distance =
            (self.camera_distance - self.config.zoom_step).max(self.config.min_camera_distance);
    }

    pub fn zoom_out(&mut self) {
        self.camera_distance += self.config.zoom_step;
    }

    /// Drops both trails and stops accepting samples until the next start.
    pub fn reset(&mut self) {
        self.poses.reset();
        self.buoy.reset();
        self.tracking_started = false;
        info!("Navigation map reset.");
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking_started
    }

    pub fn camera_distance(&self) -> f64 {
        self.camera_distance
    }

    pub fn config(&self) -> &NavigationMapConfig {
        &self.config
    }

    pub fn pose_tracker(&self) -> &PoseTracker {
        &self.poses
    }

    pub fn buoy_resolver(&self) -> &BuoyResolver {
        &self.buoy
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }
}
