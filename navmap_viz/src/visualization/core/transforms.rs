// navmap_viz/src/visualization/core/transforms.rs

use bevy::prelude::{Quat as BevyQuat, Transform as BevyTransform, Vec3 as BevyVec3};
use nalgebra::{Point3, UnitQuaternion, Vector3};
use std::f64::consts::FRAC_PI_2;

// =========================================================================
// == Map (z-up) <-> Bevy (y-up) Conversion ==
// =========================================================================
//
// The map frame is x = east, y = north, z = up. Bevy is x = right, y = up,
// z = towards the viewer. East stays X, up becomes Bevy Y and north becomes
// Bevy -Z, i.e. a -90° rotation about X.

thread_local! {
    /// Rotation taking map-frame basis vectors to their Bevy-frame equivalents.
    pub static Q_MAP_FRAME_TO_BEVY_FRAME: UnitQuaternion<f64> =
        UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -FRAC_PI_2);
}

/// Converts a map-frame vector to Bevy world coordinates.
pub fn map_vector_to_bevy(v: &Vector3<f64>) -> BevyVec3 {
    BevyVec3::new(v.x as f32, v.z as f32, -v.y as f32)
}

pub fn map_point_to_bevy(p: &Point3<f64>) -> BevyVec3 {
    map_vector_to_bevy(&p.coords)
}

/// Re-expresses an object's orientation from the map frame in the Bevy frame.
pub fn map_quat_to_bevy(q_map: &UnitQuaternion<f64>) -> BevyQuat {
    let q = Q_MAP_FRAME_TO_BEVY_FRAME.with(|frame| *frame * q_map * frame.inverse());
    BevyQuat::from_xyzw(
        q.coords.x as f32,
        q.coords.y as f32,
        q.coords.z as f32,
        q.coords.w as f32,
    )
}

/// Builds the Bevy transform for a marker at a map-frame pose.
pub fn map_pose_to_bevy_transform(
    position: &Point3<f64>,
    orientation: &UnitQuaternion<f64>,
) -> BevyTransform {
    BevyTransform {
        translation: map_point_to_bevy(position),
        rotation: map_quat_to_bevy(orientation),
        scale: BevyVec3::ONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::PI as PI_F32;
    use std::f64::consts::PI as PI_F64;

    const F32_EPSILON: f32 = 1e-5;

    fn assert_bevy_quat_approx_eq(q1: &BevyQuat, q2: &BevyQuat) {
        // q and -q are the same rotation.
        let dot = q1.dot(*q2);
        assert!(
            dot.abs() > 1.0 - F32_EPSILON,
            "BevyQuats not approx equal: {:?} vs {:?}, dot: {}",
            q1,
            q2,
            dot
        );
    }

    fn assert_bevy_vec3_approx_eq(v1: &BevyVec3, v2: &BevyVec3) {
        assert_abs_diff_eq!(v1.x, v2.x, epsilon = F32_EPSILON);
        assert_abs_diff_eq!(v1.y, v2.y, epsilon = F32_EPSILON);
        assert_abs_diff_eq!(v1.z, v2.z, epsilon = F32_EPSILON);
    }

    #[test]
    fn test_map_vector_to_bevy() {
        let east_north_up = Vector3::new(1.0, 2.0, 3.0);
        let bevy = map_vector_to_bevy(&east_north_up);
        assert_bevy_vec3_approx_eq(&bevy, &BevyVec3::new(1.0, 3.0, -2.0));
    }

    #[test]
    fn test_vehicle_below_surface_is_below_bevy_ground() {
        let submerged = Point3::new(0.0, 0.0, -4.0);
        assert_abs_diff_eq!(map_point_to_bevy(&submerged).y, -4.0);
    }

    #[test]
    fn test_map_yaw_becomes_bevy_rotation_about_y() {
        let map_yaw = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), PI_F64 / 2.0);
        let bevy = map_quat_to_bevy(&map_yaw);
        assert_bevy_quat_approx_eq(&bevy, &BevyQuat::from_rotation_y(PI_F32 / 2.0));
    }

    #[test]
    fn test_map_roll_stays_about_x() {
        let map_roll = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), PI_F64 / 2.0);
        let bevy = map_quat_to_bevy(&map_roll);
        assert_bevy_quat_approx_eq(&bevy, &BevyQuat::from_rotation_x(PI_F32 / 2.0));
    }

    #[test]
    fn test_rotation_keeps_vectors_consistent_with_positions() {
        // Rotating a map vector then converting must match converting then
        // rotating in Bevy.
        let q = UnitQuaternion::from_euler_angles(0.1, -0.4, 2.0);
        let v = Vector3::new(0.3, -1.2, 0.7);
        let expected = map_vector_to_bevy(&(q * v));
        let actual = map_quat_to_bevy(&q) * map_vector_to_bevy(&v);
        assert_bevy_vec3_approx_eq(&actual, &expected);
    }

    #[test]
    fn test_heading_north_points_along_bevy_negative_z() {
        // A vehicle yawed to face north should have its nose along Bevy -Z.
        let facing_north = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), PI_F64 / 2.0);
        let transform = map_pose_to_bevy_transform(&Point3::new(1.0, 2.0, -0.5), &facing_north);

        assert_bevy_vec3_approx_eq(&transform.translation, &BevyVec3::new(1.0, -0.5, -2.0));
        let nose = transform.rotation * BevyVec3::X;
        assert_bevy_vec3_approx_eq(&nose, &BevyVec3::new(0.0, 0.0, -1.0));
    }
}
