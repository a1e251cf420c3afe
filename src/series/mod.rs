//! Astrophysical series: pure functions of Julian Date
//!
//! Everything in this module recomputes from the epoch on every call; there
//! is no caching layer. Callers that want per-epoch caching use
//! [`crate::almanac::Almanac`].

pub mod earthvel;
pub mod nutation;

pub use earthvel::earth_velocity;
pub use nutation::{nutation, Nutation};

use crate::coordinates::Angle;
use crate::time::JulianDate;

/// Mean anomaly of the Sun at `jd`, unreduced.
pub fn sun_mean_anomaly(jd: JulianDate) -> Angle {
    let t = jd.centuries_since_j2000();
    Angle::from_degrees(357.529_11 + t * (35_999.050_29 - 0.000_153_7 * t))
}

/// Eccentricity of the Earth's orbit at `jd`. Dimensionless, slowly
/// shrinking over the current epoch.
pub fn earth_eccentricity(jd: JulianDate) -> f64 {
    let t = jd.centuries_since_j2000();
    0.016_708_634 - t * (0.000_042_037 + 0.000_000_126_7 * t)
}

/// Mean obliquity of the ecliptic at `jd`.
///
/// Laskar's polynomial, tenth order in units of 100 Julian centuries since
/// J2000.0, good to a fraction of an arcsecond over +/- 100 centuries.
pub fn mean_obliquity(jd: JulianDate) -> Angle {
    let u = jd.centuries_since_j2000() / 100.0;
    let arcsec = -4680.93 * u
        + u * u
            * (-1.55
                + u * (1999.25
                    + u * (-51.38
                        + u * (-249.67
                            + u * (-39.05 + u * (7.12 + u * (27.87 + u * (5.79 + u * 2.45))))))));
    Angle::from_degrees(23.0 + 26.0 / 60.0 + (21.448 + arcsec) / 3600.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_mean_obliquity_j2000() {
        // 23 deg 26' 21.448"
        let eps = mean_obliquity(JulianDate::J2000);
        assert_abs_diff_eq!(eps.degrees(), 23.439_291_111_111, epsilon = 1e-9);
    }

    #[test]
    fn test_sun_mean_anomaly_1992() {
        // 1992 October 13.0 TD: M = 278.99397 degrees
        let m = sun_mean_anomaly(JulianDate::new(2_448_908.5)).reduce();
        assert_abs_diff_eq!(m.degrees(), 278.993_97, epsilon = 1e-4);
    }

    #[test]
    fn test_eccentricity_shrinks() {
        let e0 = earth_eccentricity(JulianDate::J2000);
        assert_abs_diff_eq!(e0, 0.016_708_634);
        assert!(earth_eccentricity(JulianDate::J2000 + 36_525.0) < e0);
    }

    #[test]
    fn test_mean_obliquity_1987() {
        // 1987 April 10: 23 deg 26' 27.407"
        let eps = mean_obliquity(JulianDate::new(2_446_895.5));
        assert_abs_diff_eq!(eps.degrees(), 23.440_946, epsilon = 1e-5);
    }
}
