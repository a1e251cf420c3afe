//! Angle representation and spherical/Cartesian conversion helpers.

pub mod angle;

pub use angle::Angle;

use nalgebra::Vector3;

/// Unit vector for a (longitude, latitude) pair on the sphere.
///
/// The x-axis points to longitude 0 on the fundamental plane, the z-axis to
/// the +90 degree pole.
pub fn unit_vector(lon: Angle, lat: Angle) -> Vector3<f64> {
    let (sin_lon, cos_lon) = lon.sin_cos();
    let (sin_lat, cos_lat) = lat.sin_cos();
    Vector3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat)
}

/// Longitude (reduced to [0, 360) degrees) and latitude of a direction vector.
///
/// The vector need not be normalized; the zero vector maps to (0, 0).
pub fn spherical(v: &Vector3<f64>) -> (Angle, Angle) {
    let r_xy = v.x.hypot(v.y);
    let lon = Angle::from_radians(v.y.atan2(v.x)).reduce();
    let lat = Angle::from_radians(v.z.atan2(r_xy));
    (lon, lat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::f64::consts::PI;

    #[test]
    fn test_unit_vector_axes() {
        let x = unit_vector(Angle::ZERO, Angle::ZERO);
        assert_relative_eq!(x.x, 1.0, epsilon = 1e-12);
        let pole = unit_vector(Angle::ZERO, Angle::from_degrees(90.0));
        assert_relative_eq!(pole.z, 1.0, epsilon = 1e-12);
        assert_relative_eq!(pole.x, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_spherical_roundtrip() {
        let mut rng = StdRng::seed_from_u64(7101);
        for _ in 0..200 {
            let lon = Angle::from_radians(rng.gen::<f64>() * 2.0 * PI);
            let lat = Angle::from_radians((rng.gen::<f64>() - 0.5) * PI * 0.99);
            let (lon2, lat2) = spherical(&unit_vector(lon, lat));
            assert_relative_eq!(lon2.sin(), lon.sin(), epsilon = 1e-10);
            assert_relative_eq!(lon2.cos(), lon.cos(), epsilon = 1e-10);
            assert_relative_eq!(lat2.radians(), lat.radians(), epsilon = 1e-10);
        }
    }
}
