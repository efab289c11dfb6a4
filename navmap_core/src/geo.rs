// navmap_core/src/geo.rs

use nalgebra::Point2;
use std::fmt::Debug;

use crate::types::GeodeticAnchor;

/// WGS-84 semi-major axis in metres.
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS-84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;

/// The contract for anything that can place a latitude/longitude on the local
/// map plane (x east, y north, metres).
pub trait GeoResolver: Debug + Send + Sync {
    fn to_local_meters(&self, anchor: &GeodeticAnchor) -> Point2<f64>;
}

/// A small-area projection onto the plane tangent to the WGS-84 ellipsoid at
/// `origin`.
///
/// Uses the meridional and prime-vertical radii of curvature at the origin
/// latitude. Good to centimetres over the few hundred metres an ROV tether
/// allows; not meant for long baselines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTangentPlane {
    origin: GeodeticAnchor,
    metres_per_rad_north: f64,
    metres_per_rad_east: f64,
}

impl LocalTangentPlane {
    pub fn new(origin: GeodeticAnchor) -> Self {
        let e2 = WGS84_F * (2.0 - WGS84_F);
        let sin_lat = origin.lat.to_radians().sin();
        let w = (1.0 - e2 * sin_lat * sin_lat).sqrt();

        let meridional = WGS84_A * (1.0 - e2) / (w * w * w);
        let prime_vertical = WGS84_A / w;

        Self {
            origin,
            metres_per_rad_north: meridional,
            metres_per_rad_east: prime_vertical * origin.lat.to_radians().cos(),
        }
    }
}

impl GeoResolver for LocalTangentPlane {
    fn to_local_meters(&self, anchor: &GeodeticAnchor) -> Point2<f64> {
        let d_lat = (anchor.lat - self.origin.lat).to_radians();
        // Shortest way round across the antimeridian.
        let mut d_lon_deg = anchor.lon - self.origin.lon;
        if d_lon_deg > 180.0 {
            d_lon_deg -= 360.0;
        } else if d_lon_deg < -180.0 {
            d_lon_deg += 360.0;
        }
        Point2::new(
            d_lon_deg.to_radians() * self.metres_per_rad_east,
            d_lat * self.metres_per_rad_north,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn dresden() -> GeodeticAnchor {
        GeodeticAnchor::new(51.037669, 13.735245).unwrap()
    }

    #[test]
    fn test_origin_maps_to_zero() {
        let plane = LocalTangentPlane::new(dresden());
        let local = plane.to_local_meters(&dresden());
        assert_abs_diff_eq!(local.x, 0.0);
        assert_abs_diff_eq!(local.y, 0.0);
    }

    #[test]
    fn test_north_and_east_offsets_have_expected_scale() {
        let plane = LocalTangentPlane::new(dresden());

        // One arc-minute of latitude is roughly 1854 m at 51°N.
        let north = plane
            .to_local_meters(&GeodeticAnchor::new(51.037669 + 1.0 / 60.0, 13.735245).unwrap());
        assert_abs_diff_eq!(north.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(north.y, 1854.2, epsilon = 1.0);

        // Longitude shrinks with cos(lat): one arc-minute east is ~1169 m there.
        let east = plane
            .to_local_meters(&GeodeticAnchor::new(51.037669, 13.735245 + 1.0 / 60.0).unwrap());
        assert!(east.x > 0.0);
        assert_abs_diff_eq!(east.x, 1169.0, epsilon = 1.0);
        assert_abs_diff_eq!(east.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_antimeridian_wraps_to_short_offset() {
        let plane = LocalTangentPlane::new(GeodeticAnchor::new(0.0, 179.999).unwrap());
        let across = plane.to_local_meters(&GeodeticAnchor::new(0.0, -179.999).unwrap());
        // 0.002° of longitude at the equator, about 222.6 m, eastwards.
        assert_abs_diff_eq!(across.x, 222.6, epsilon = 0.5);
    }
}
