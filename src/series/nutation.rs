//! Truncated IAU-1980-style nutation series
//!
//! A 63-row table of integer multipliers over the five fundamental lunisolar
//! arguments, with matching longitude/obliquity amplitudes and per-century
//! rates in units of 0.0001 arcsecond. The truncation keeps every term with
//! an amplitude of at least 0.0003 arcsecond, which holds the result to
//! sub-arcsecond accuracy over several centuries around J2000.

use crate::time::JulianDate;

/// Nutation deltas at one epoch, in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nutation {
    /// Nutation in ecliptic longitude (delta psi)
    pub longitude: f64,
    /// Nutation in obliquity (delta epsilon)
    pub obliquity: f64,
}

/// Integer multipliers of (D, M, M', F, Omega) per series row
const MULTIPLIERS: [[i32; 5]; 63] = [
    [0, 0, 0, 0, 1],
    [-2, 0, 0, 2, 2],
    [0, 0, 0, 2, 2],
    [0, 0, 0, 0, 2],
    [0, 1, 0, 0, 0],
    [0, 0, 1, 0, 0],
    [-2, 1, 0, 2, 2],
    [0, 0, 0, 2, 1],
    [0, 0, 1, 2, 2],
    [-2, -1, 0, 2, 2],
    [-2, 0, 1, 0, 0],
    [-2, 0, 0, 2, 1],
    [0, 0, -1, 2, 2],
    [2, 0, 0, 0, 0],
    [0, 0, 1, 0, 1],
    [2, 0, -1, 2, 2],
    [0, 0, -1, 0, 1],
    [0, 0, 1, 2, 1],
    [-2, 0, 2, 0, 0],
    [0, 0, -2, 2, 1],
    [2, 0, 0, 2, 2],
    [0, 0, 2, 2, 2],
    [0, 0, 2, 0, 0],
    [-2, 0, 1, 2, 2],
    [0, 0, 0, 2, 0],
    [-2, 0, 0, 2, 0],
    [0, 0, -1, 2, 1],
    [0, 2, 0, 0, 0],
    [2, 0, -1, 0, 1],
    [-2, 2, 0, 2, 2],
    [0, 1, 0, 0, 1],
    [-2, 0, 1, 0, 1],
    [0, -1, 0, 0, 1],
    [0, 0, 2, -2, 0],
    [2, 0, -1, 2, 1],
    [2, 0, 1, 2, 2],
    [0, 1, 0, 2, 2],
    [-2, 1, 1, 0, 0],
    [0, -1, 0, 2, 2],
    [2, 0, 0, 2, 1],
    [2, 0, 1, 0, 0],
    [-2, 0, 2, 2, 2],
    [-2, 0, 1, 2, 1],
    [2, 0, -2, 0, 1],
    [2, 0, 0, 0, 1],
    [0, -1, 1, 0, 0],
    [-2, -1, 0, 2, 1],
    [-2, 0, 0, 0, 1],
    [0, 0, 2, 2, 1],
    [-2, 0, 2, 0, 1],
    [-2, 1, 0, 2, 1],
    [0, 0, 1, -2, 0],
    [-1, 0, 1, 0, 0],
    [-2, 1, 0, 0, 0],
    [1, 0, 0, 0, 0],
    [0, 0, 1, 2, 0],
    [0, 0, -2, 2, 2],
    [-1, -1, 1, 0, 0],
    [0, 1, 1, 0, 0],
    [0, -1, 1, 2, 2],
    [2, -1, -1, 2, 2],
    [0, 0, 3, 2, 2],
    [2, -1, 0, 2, 2],
];

/// Longitude amplitude, longitude rate, obliquity amplitude, obliquity rate,
/// in 0.0001 arcsecond (rates per Julian century)
const AMPLITUDES: [[f64; 4]; 63] = [
    [-171996.0, -174.2, 92025.0, 8.9],
    [-13187.0, -1.6, 5736.0, -3.1],
    [-2274.0, -0.2, 977.0, -0.5],
    [2062.0, 0.2, -895.0, 0.5],
    [1426.0, -3.4, 54.0, -0.1],
    [712.0, 0.1, -7.0, 0.0],
    [-517.0, 1.2, 224.0, -0.6],
    [-386.0, -0.4, 200.0, 0.0],
    [-301.0, 0.0, 129.0, -0.1],
    [217.0, -0.5, -95.0, 0.3],
    [-158.0, 0.0, 0.0, 0.0],
    [129.0, 0.1, -70.0, 0.0],
    [123.0, 0.0, -53.0, 0.0],
    [63.0, 0.0, 0.0, 0.0],
    [63.0, 0.1, -33.0, 0.0],
    [-59.0, 0.0, 26.0, 0.0],
    [-58.0, -0.1, 32.0, 0.0],
    [-51.0, 0.0, 27.0, 0.0],
    [48.0, 0.0, 0.0, 0.0],
    [46.0, 0.0, -24.0, 0.0],
    [-38.0, 0.0, 16.0, 0.0],
    [-31.0, 0.0, 13.0, 0.0],
    [29.0, 0.0, 0.0, 0.0],
    [29.0, 0.0, -12.0, 0.0],
    [26.0, 0.0, 0.0, 0.0],
    [-22.0, 0.0, 0.0, 0.0],
    [21.0, 0.0, -10.0, 0.0],
    [17.0, -0.1, 0.0, 0.0],
    [16.0, 0.0, -8.0, 0.0],
    [-16.0, 0.1, 7.0, 0.0],
    [-15.0, 0.0, 9.0, 0.0],
    [-13.0, 0.0, 7.0, 0.0],
    [-12.0, 0.0, 6.0, 0.0],
    [11.0, 0.0, 0.0, 0.0],
    [-10.0, 0.0, 5.0, 0.0],
    [-8.0, 0.0, 3.0, 0.0],
    [7.0, 0.0, -3.0, 0.0],
    [-7.0, 0.0, 0.0, 0.0],
    [-7.0, 0.0, 3.0, 0.0],
    [-7.0, 0.0, 3.0, 0.0],
    [6.0, 0.0, 0.0, 0.0],
    [6.0, 0.0, -3.0, 0.0],
    [6.0, 0.0, -3.0, 0.0],
    [-6.0, 0.0, 3.0, 0.0],
    [-6.0, 0.0, 3.0, 0.0],
    [5.0, 0.0, 0.0, 0.0],
    [-5.0, 0.0, 3.0, 0.0],
    [-5.0, 0.0, 3.0, 0.0],
    [-5.0, 0.0, 3.0, 0.0],
    [4.0, 0.0, 0.0, 0.0],
    [4.0, 0.0, 0.0, 0.0],
    [4.0, 0.0, 0.0, 0.0],
    [-4.0, 0.0, 0.0, 0.0],
    [-4.0, 0.0, 0.0, 0.0],
    [-4.0, 0.0, 0.0, 0.0],
    [3.0, 0.0, 0.0, 0.0],
    [-3.0, 0.0, 0.0, 0.0],
    [-3.0, 0.0, 0.0, 0.0],
    [-3.0, 0.0, 0.0, 0.0],
    [-3.0, 0.0, 0.0, 0.0],
    [-3.0, 0.0, 0.0, 0.0],
    [-3.0, 0.0, 0.0, 0.0],
    [-3.0, 0.0, 0.0, 0.0],
];

/// Fundamental lunisolar arguments at `t` Julian centuries since J2000.0,
/// in degrees: mean elongation of the Moon, mean anomaly of the Sun, mean
/// anomaly of the Moon, argument of latitude of the Moon, and longitude of
/// the Moon's ascending node.
fn fundamental_arguments(t: f64) -> [f64; 5] {
    let t2 = t * t;
    let t3 = t2 * t;
    [
        297.850_36 + 445_267.111_480 * t - 0.001_914_2 * t2 + t3 / 189_474.0,
        357.527_72 + 35_999.050_340 * t - 0.000_160_3 * t2 - t3 / 300_000.0,
        134.962_98 + 477_198.867_398 * t + 0.008_697_2 * t2 + t3 / 56_250.0,
        93.271_91 + 483_202.017_538 * t - 0.003_682_5 * t2 + t3 / 327_270.0,
        125.044_52 - 1_934.136_261 * t + 0.002_070_8 * t2 + t3 / 450_000.0,
    ]
}

/// Nutation in longitude and obliquity at `jd`, in degrees.
///
/// Pure recomputation from the Julian date on every call; sine terms feed the
/// longitude sum, cosine terms the obliquity sum.
pub fn nutation(jd: JulianDate) -> Nutation {
    let t = jd.centuries_since_j2000();
    let args = fundamental_arguments(t);

    let mut longitude = 0.0;
    let mut obliquity = 0.0;
    for (multipliers, amplitudes) in MULTIPLIERS.iter().zip(AMPLITUDES.iter()) {
        let argument: f64 = multipliers
            .iter()
            .zip(args.iter())
            .map(|(&m, &a)| f64::from(m) * a)
            .sum();
        let argument = argument.to_radians();
        longitude += (amplitudes[0] + amplitudes[1] * t) * argument.sin();
        obliquity += (amplitudes[2] + amplitudes[3] * t) * argument.cos();
    }

    // 0.0001 arcsecond units to degrees
    Nutation {
        longitude: longitude * 1e-4 / 3600.0,
        obliquity: obliquity * 1e-4 / 3600.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::JULIAN_CENTURY_DAYS;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_table_shapes() {
        assert_eq!(MULTIPLIERS.len(), 63);
        assert_eq!(AMPLITUDES.len(), 63);
    }

    #[test]
    fn test_classical_1987_reference() {
        // 1987 April 10: delta psi = -3.788", delta eps = +9.443"
        let nut = nutation(JulianDate::new(2_446_895.5));
        assert_abs_diff_eq!(nut.longitude * 3600.0, -3.788, epsilon = 1e-3);
        assert_abs_diff_eq!(nut.obliquity * 3600.0, 9.443, epsilon = 1e-3);
    }

    #[test]
    fn test_reference_epoch_plus_one_century() {
        let nut = nutation(JulianDate::J2000 + JULIAN_CENTURY_DAYS);
        assert_abs_diff_eq!(nut.longitude, 0.000_907_811_631_698_114_2, epsilon = 1e-9);
        assert_abs_diff_eq!(nut.obliquity, 0.002_382_753_992_574_053_4, epsilon = 1e-9);
    }

    #[test]
    fn test_amplitude_bounds() {
        // Nutation never exceeds ~17.5" in longitude or ~9.5" in obliquity
        for offset in (-73050..73050).step_by(997) {
            let nut = nutation(JulianDate::J2000 + f64::from(offset));
            assert!(nut.longitude.abs() * 3600.0 < 20.0);
            assert!(nut.obliquity.abs() * 3600.0 < 11.0);
        }
    }
}
