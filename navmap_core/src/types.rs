// navmap_core/src/types.rs

use nalgebra::{Isometry3, Point2, Point3, Translation3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::TrackingError;

/// Height of every resolved buoy fix above the water plane (z = 0).
pub const BUOY_SURFACE_OFFSET: f64 = 0.01;

// =========================================================================
// == Vehicle Poses ==
// =========================================================================

/// A navigation sample as it arrives from the vehicle.
///
/// `roll`, `pitch` and `yaw` are the vehicle attitude in radians (intrinsic
/// X-then-Y-then-Z order). The `trans_*` fields are a translation delta in
/// metres along the body axes of that attitude. `depth` (metres, positive down)
/// is only used for the first sample of a trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RelativePose {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
    pub trans_x: f64,
    pub trans_y: f64,
    pub trans_z: f64,
    pub depth: f64,
}

impl RelativePose {
    /// A sample that only moves the vehicle, keeping a level attitude.
    pub fn translation_only(trans_x: f64, trans_y: f64, trans_z: f64) -> Self {
        Self {
            trans_x,
            trans_y,
            trans_z,
            ..Default::default()
        }
    }

    /// The sample that anchors a trajectory at the given depth.
    pub fn at_depth(depth: f64) -> Self {
        Self {
            depth,
            ..Default::default()
        }
    }

    pub fn with_attitude(mut self, roll: f64, pitch: f64, yaw: f64) -> Self {
        self.roll = roll;
        self.pitch = pitch;
        self.yaw = yaw;
        self
    }

    /// Rejects the sample if any field is NaN or infinite.
    pub fn validate(&self) -> Result<(), TrackingError> {
        let fields = [
            ("roll", self.roll),
            ("pitch", self.pitch),
            ("yaw", self.yaw),
            ("trans_x", self.trans_x),
            ("trans_y", self.trans_y),
            ("trans_z", self.trans_z),
            ("depth", self.depth),
        ];
        match fields.iter().find(|(_, value)| !value.is_finite()) {
            Some(&(field, value)) => Err(TrackingError::InvalidSample { field, value }),
            None => Ok(()),
        }
    }

    /// The attitude carried by this sample.
    pub fn attitude(&self) -> UnitQuaternion<f64> {
        intrinsic_xyz(self.roll, self.pitch, self.yaw)
    }

    /// The body-frame translation delta.
    pub fn translation(&self) -> Vector3<f64> {
        Vector3::new(self.trans_x, self.trans_y, self.trans_z)
    }
}

/// Builds a rotation from Euler angles applied about the body X, then the new
/// Y, then the new Z axis: `R = Rx(roll) * Ry(pitch) * Rz(yaw)`.
///
/// Note that nalgebra's `from_euler_angles` is the extrinsic (ZYX intrinsic)
/// convention, which is not what the vehicle reports.
pub fn intrinsic_xyz(roll: f64, pitch: f64, yaw: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::x_axis(), roll)
        * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), pitch)
        * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), yaw)
}

/// A resolved vehicle pose in the world frame (x east, y north, z up).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

impl Pose {
    pub fn new(position: Point3<f64>, roll: f64, pitch: f64, yaw: f64) -> Self {
        Self {
            x: position.x,
            y: position.y,
            z: position.z,
            roll,
            pitch,
            yaw,
        }
    }

    pub fn position(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }

    pub fn rotation(&self) -> UnitQuaternion<f64> {
        intrinsic_xyz(self.roll, self.pitch, self.yaw)
    }

    pub fn isometry(&self) -> Isometry3<f64> {
        Isometry3::from_parts(
            Translation3::new(self.x, self.y, self.z),
            self.rotation(),
        )
    }
}

// =========================================================================
// == Geodetic Coordinates ==
// =========================================================================

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeodeticAnchor {
    pub lat: f64,
    pub lon: f64,
}

impl GeodeticAnchor {
    pub fn new(lat: f64, lon: f64) -> Result<Self, TrackingError> {
        if !lat.is_finite() || lat.abs() > 90.0 {
            return Err(TrackingError::InvalidCoordinate {
                input: lat.to_string(),
                reason: "latitude must lie within [-90, 90] degrees".to_string(),
            });
        }
        if !lon.is_finite() || lon.abs() > 180.0 {
            return Err(TrackingError::InvalidCoordinate {
                input: lon.to_string(),
                reason: "longitude must lie within [-180, 180] degrees".to_string(),
            });
        }
        Ok(Self { lat, lon })
    }

    /// Parses the two decimal strings typed into the start-tracking form.
    pub fn parse(lat: &str, lon: &str) -> Result<Self, TrackingError> {
        let parse_one = |text: &str| -> Result<f64, TrackingError> {
            text.trim()
                .parse::<f64>()
                .map_err(|e| TrackingError::InvalidCoordinate {
                    input: text.to_string(),
                    reason: e.to_string(),
                })
        };
        Self::new(parse_one(lat)?, parse_one(lon)?)
    }
}

// =========================================================================
// == Buoy Fixes ==
// =========================================================================

/// A buoy position update in one of two representations.
///
/// Absolute coordinates win when both `x` and `y` are set; otherwise the fix
/// is read as `bearing` (radians, counter-clockwise from +x) and `distance`
/// (metres) from the previous buoy position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BuoyFixInput {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub bearing: Option<f64>,
    pub distance: Option<f64>,
    /// Radius of the position uncertainty in metres.
    pub accuracy: Option<f64>,
    pub coordinates: Option<GeodeticAnchor>,
}

impl BuoyFixInput {
    pub fn absolute(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    pub fn relative(bearing: f64, distance: f64) -> Self {
        Self {
            bearing: Some(bearing),
            distance: Some(distance),
            ..Default::default()
        }
    }

    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = Some(accuracy);
        self
    }

    /// `Some` only when both absolute coordinates are present.
    pub fn absolute_position(&self) -> Option<Point2<f64>> {
        Some(Point2::new(self.x?, self.y?))
    }

    /// `Some((bearing, distance))` only when the pair is complete.
    pub fn bearing_distance(&self) -> Option<(f64, f64)> {
        Some((self.bearing?, self.distance?))
    }
}

/// Which branch of the resolver produced a fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FixSource {
    /// Converted from a latitude/longitude anchor.
    Geodetic,
    /// Taken verbatim from absolute local coordinates.
    Absolute,
    /// Composed from a bearing and distance off the previous fix.
    Relative,
}

/// A resolved buoy position in the world frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuoyFix {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub accuracy: f64,
    pub coordinates: Option<GeodeticAnchor>,
    pub source: FixSource,
}

impl BuoyFix {
    pub(crate) fn at(planar: Point2<f64>, accuracy: f64, source: FixSource) -> Self {
        Self {
            x: planar.x,
            y: planar.y,
            z: BUOY_SURFACE_OFFSET,
            accuracy,
            coordinates: None,
            source,
        }
    }

    pub fn position(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }

    pub fn planar(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_validate_reports_first_non_finite_field() {
        let sample = RelativePose {
            trans_y: f64::NAN,
            depth: f64::INFINITY,
            ..Default::default()
        };
        match sample.validate() {
            Err(TrackingError::InvalidSample { field, .. }) => assert_eq!(field, "trans_y"),
            other => panic!("expected InvalidSample, got {:?}", other),
        }
        assert!(RelativePose::at_depth(3.0).validate().is_ok());
    }

    #[test]
    fn test_intrinsic_xyz_applies_roll_before_yaw() {
        // Rx(90) * Rz(90) maps body X -> Rx(90) * (0,1,0) = (0,0,1).
        let q = intrinsic_xyz(FRAC_PI_2, 0.0, FRAC_PI_2);
        let body_x = q * Vector3::x();
        assert_abs_diff_eq!(body_x.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(body_x.y, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(body_x.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_geodetic_parse_accepts_decimal_strings() {
        let anchor = GeodeticAnchor::parse(" 51.037669", "13.735245 ").unwrap();
        assert_abs_diff_eq!(anchor.lat, 51.037669);
        assert_abs_diff_eq!(anchor.lon, 13.735245);
    }

    #[test]
    fn test_geodetic_parse_rejects_garbage_and_out_of_range() {
        assert!(matches!(
            GeodeticAnchor::parse("north", "13.7"),
            Err(TrackingError::InvalidCoordinate { .. })
        ));
        assert!(GeodeticAnchor::parse("91.0", "0").is_err());
        assert!(GeodeticAnchor::parse("0", "-180.5").is_err());
    }

    #[test]
    fn test_buoy_input_representations() {
        let mut input = BuoyFixInput::relative(0.5, 2.0);
        assert_eq!(input.absolute_position(), None);
        assert_eq!(input.bearing_distance(), Some((0.5, 2.0)));

        // Only one absolute coordinate is not an absolute fix.
        input.x = Some(1.0);
        assert_eq!(input.absolute_position(), None);
        input.y = Some(4.0);
        assert_eq!(input.absolute_position(), Some(Point2::new(1.0, 4.0)));
    }
}
