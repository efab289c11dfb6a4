// navmap_core/src/scene.rs

use nalgebra::{Point3, UnitQuaternion};

/// A linear RGB colour handed to the renderer, components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl SceneColor {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Segment colour of the vehicle trail.
    pub const VEHICLE_TRAIL: SceneColor = SceneColor::rgb(1.0, 1.0, 0.0);
    /// Segment colour of the buoy trail.
    pub const BUOY_TRAIL: SceneColor = SceneColor::rgb(0.0, 1.0, 0.0);
}

/// The contract the tracking core needs from a renderer.
///
/// All values are world-space (x east, y north, z up). Information only
/// flows into the adapter; the core never reads anything back.
pub trait SceneAdapter: Send + Sync {
    fn place_vehicle_marker(&mut self, position: Point3<f64>, orientation: UnitQuaternion<f64>);

    fn place_ghost_vehicle_marker(
        &mut self,
        position: Point3<f64>,
        orientation: UnitQuaternion<f64>,
    );

    fn place_buoy_marker(&mut self, position: Point3<f64>, radius: f64);

    fn place_ghost_buoy_marker(&mut self, position: Point3<f64>, radius: f64);

    fn draw_segment(&mut self, a: Point3<f64>, b: Point3<f64>, color: SceneColor);

    /// Points the camera at `target` from `eye`. Called once per render tick.
    fn follow_camera(&mut self, target: Point3<f64>, eye: Point3<f64>);
}

/// One recorded call on a [`SceneAdapter`].
#[derive(Debug, Clone, PartialEq)]
pub enum SceneCommand {
    VehicleMarker {
        position: Point3<f64>,
        orientation: UnitQuaternion<f64>,
    },
    GhostVehicleMarker {
        position: Point3<f64>,
        orientation: UnitQuaternion<f64>,
    },
    BuoyMarker {
        position: Point3<f64>,
        radius: f64,
    },
    GhostBuoyMarker {
        position: Point3<f64>,
        radius: f64,
    },
    Segment {
        a: Point3<f64>,
        b: Point3<f64>,
        color: SceneColor,
    },
    FollowCamera {
        target: Point3<f64>,
        eye: Point3<f64>,
    },
}

/// A [`SceneAdapter`] that just queues every call.
///
/// Renderers that cannot be driven synchronously drain the queue on their own
/// schedule.
#[derive(Debug, Clone, Default)]
pub struct SceneCommandQueue {
    commands: Vec<SceneCommand>,
}

impl SceneCommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[SceneCommand] {
        &self.commands
    }

    /// Takes every queued command, oldest first.
    pub fn drain(&mut self) -> Vec<SceneCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl SceneAdapter for SceneCommandQueue {
    fn place_vehicle_marker(&mut self, position: Point3<f64>, orientation: UnitQuaternion<f64>) {
        self.commands.push(SceneCommand::VehicleMarker {
            position,
            orientation,
        });
    }

    fn place_ghost_vehicle_marker(
        &mut self,
        position: Point3<f64>,
        orientation: UnitQuaternion<f64>,
    ) {
        self.commands.push(SceneCommand::GhostVehicleMarker {
            position,
            orientation,
        });
    }

    fn place_buoy_marker(&mut self, position: Point3<f64>, radius: f64) {
        self.commands
            .push(SceneCommand::BuoyMarker { position, radius });
    }

    fn place_ghost_buoy_marker(&mut self, position: Point3<f64>, radius: f64) {
        self.commands
            .push(SceneCommand::GhostBuoyMarker { position, radius });
    }

    fn draw_segment(&mut self, a: Point3<f64>, b: Point3<f64>, color: SceneColor) {
        self.commands.push(SceneCommand::Segment { a, b, color });
    }

    fn follow_camera(&mut self, target: Point3<f64>, eye: Point3<f64>) {
        self.commands.push(SceneCommand::FollowCamera { target, eye });
    }
}
