//! Earth barycentric velocity series
//!
//! A 36-term harmonic fit to the barycentric velocity of the Earth. Each term
//! is a linear combination of eleven fundamental angles (seven planetary mean
//! longitudes, Venus through Neptune, and four lunar arguments), each linear
//! in Julian centuries since J2000.0. Coefficients are sine/cosine amplitude
//! pairs per axis in units of 1e-8 AU/day; the intrinsic accuracy of the
//! truncation is a few 1e-7 AU/day.

use nalgebra::Vector3;

use crate::constants::{AU_KM, DAY_S};
use crate::time::JulianDate;

/// Fundamental mean-longitude phases, radians at J2000.0
const PHASE: [f64; 11] = [
    3.176_146_7, // Venus
    1.753_470_3, // Earth
    6.203_480_9, // Mars
    0.599_546_5, // Jupiter
    0.874_016_8, // Saturn
    5.481_293_9, // Uranus
    5.311_886_3, // Neptune
    3.810_344_4, // Moon mean longitude
    5.198_466_7, // Moon mean elongation
    2.355_555_9, // Moon mean anomaly
    1.627_905_2, // Moon argument of latitude
];

/// Fundamental mean-longitude rates, radians per Julian century
const RATE: [f64; 11] = [
    1_021.328_554_6,
    628.307_584_9,
    334.061_243_1,
    52.969_096_5,
    21.329_909_5,
    7.478_159_9,
    3.813_303_6,
    8_399.684_733_7,
    7_771.377_148_6,
    8_328.691_428_9,
    8_433.466_160_1,
];

/// Integer multipliers of the eleven fundamental angles per term
const MULTIPLIERS: [[i32; 11]; 36] = [
    [0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0],
    [0, 3, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [0, 0, 0, 0, 0, 0, 0, 1, 0, 1, 0],
    [0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0],
    [0, 2, 0, -1, 0, 0, 0, 0, 0, 0, 0],
    [0, 3, -8, 3, 0, 0, 0, 0, 0, 0, 0],
    [0, 5, -8, 3, 0, 0, 0, 0, 0, 0, 0],
    [2, -1, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0],
    [0, 1, 0, -2, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0],
    [0, 1, 0, 1, 0, 0, 0, 0, 0, 0, 0],
    [2, -2, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 1, 0, -1, 0, 0, 0, 0, 0, 0, 0],
    [0, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 3, 0, -2, 0, 0, 0, 0, 0, 0, 0],
    [1, -2, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [2, -3, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0],
    [2, -4, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 3, -2, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 1, 2, -1, 0],
    [8, -12, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [8, -14, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0],
    [3, -4, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 2, 0, -2, 0, 0, 0, 0, 0, 0, 0],
    [3, -3, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 2, -2, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 1, -2, 0, 0],
];

/// Per-term amplitudes: x-sin, x-sin rate, x-cos, x-cos rate, then the same
/// four for y and for z, in 1e-8 AU/day (rates per Julian century)
const AMPLITUDES: [[f64; 12]; 36] = [
    [-1719914.0, -2.0, -25.0, 0.0, 25.0, -13.0, 1578089.0, 156.0, 10.0, 32.0, 684185.0, -358.0],
    [6434.0, 141.0, 28007.0, -107.0, 25697.0, -95.0, -5904.0, -130.0, 11141.0, -48.0, -2559.0, -55.0],
    [715.0, 0.0, 0.0, 0.0, 6.0, 0.0, -657.0, 0.0, -15.0, 0.0, -282.0, 0.0],
    [715.0, 0.0, 0.0, 0.0, 0.0, 0.0, -656.0, 0.0, 0.0, 0.0, -285.0, 0.0],
    [486.0, -5.0, -236.0, -4.0, -216.0, -4.0, -446.0, 5.0, -94.0, 0.0, -193.0, 0.0],
    [159.0, 0.0, 0.0, 0.0, 2.0, 0.0, -147.0, 0.0, -6.0, 0.0, -61.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 26.0, 0.0, 0.0, 0.0, -59.0, 0.0],
    [39.0, 0.0, 0.0, 0.0, 0.0, 0.0, -36.0, 0.0, 0.0, 0.0, -16.0, 0.0],
    [33.0, 0.0, -10.0, 0.0, -9.0, 0.0, -30.0, 0.0, -5.0, 0.0, -13.0, 0.0],
    [31.0, 0.0, 1.0, 0.0, 1.0, 0.0, -28.0, 0.0, 0.0, 0.0, -12.0, 0.0],
    [8.0, 0.0, -28.0, 0.0, 25.0, 0.0, 8.0, 0.0, 11.0, 0.0, 3.0, 0.0],
    [8.0, 0.0, -28.0, 0.0, -25.0, 0.0, -8.0, 0.0, -11.0, 0.0, -3.0, 0.0],
    [21.0, 0.0, 0.0, 0.0, 0.0, 0.0, -19.0, 0.0, 0.0, 0.0, -8.0, 0.0],
    [-19.0, 0.0, 0.0, 0.0, 0.0, 0.0, 17.0, 0.0, 0.0, 0.0, 8.0, 0.0],
    [16.0, 0.0, 0.0, 0.0, 1.0, 0.0, -15.0, 0.0, -3.0, 0.0, -6.0, 0.0],
    [16.0, 0.0, 0.0, 0.0, 0.0, 0.0, 15.0, 0.0, 1.0, 0.0, 7.0, 0.0],
    [17.0, 0.0, 0.0, 0.0, 0.0, 0.0, -16.0, 0.0, 0.0, 0.0, -7.0, 0.0],
    [11.0, 0.0, -1.0, 0.0, -1.0, 0.0, -10.0, 0.0, -1.0, 0.0, -5.0, 0.0],
    [0.0, 0.0, -11.0, 0.0, -10.0, 0.0, 0.0, 0.0, -4.0, 0.0, 0.0, 0.0],
    [-11.0, 0.0, -2.0, 0.0, -2.0, 0.0, 9.0, 0.0, -1.0, 0.0, 4.0, 0.0],
    [-7.0, 0.0, -8.0, 0.0, -8.0, 0.0, 6.0, 0.0, -3.0, 0.0, 3.0, 0.0],
    [-10.0, 0.0, 0.0, 0.0, 0.0, 0.0, 9.0, 0.0, 0.0, 0.0, 4.0, 0.0],
    [-9.0, 0.0, 0.0, 0.0, 0.0, 0.0, -9.0, 0.0, 0.0, 0.0, -4.0, 0.0],
    [-9.0, 0.0, 0.0, 0.0, 0.0, 0.0, -8.0, 0.0, 0.0, 0.0, -4.0, 0.0],
    [0.0, 0.0, -9.0, 0.0, -8.0, 0.0, 0.0, 0.0, -3.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, -9.0, 0.0, 8.0, 0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0],
    [8.0, 0.0, 0.0, 0.0, 0.0, 0.0, -8.0, 0.0, 0.0, 0.0, -3.0, 0.0],
    [8.0, 0.0, 0.0, 0.0, 0.0, 0.0, -7.0, 0.0, 0.0, 0.0, -3.0, 0.0],
    [-4.0, 0.0, -7.0, 0.0, -6.0, 0.0, 4.0, 0.0, -3.0, 0.0, 2.0, 0.0],
    [-4.0, 0.0, -7.0, 0.0, 6.0, 0.0, -4.0, 0.0, 3.0, 0.0, -2.0, 0.0],
    [-6.0, 0.0, -5.0, 0.0, -4.0, 0.0, 5.0, 0.0, -2.0, 0.0, 2.0, 0.0],
    [-1.0, 0.0, -1.0, 0.0, -2.0, 0.0, -7.0, 0.0, 1.0, 0.0, -4.0, 0.0],
    [4.0, 0.0, -6.0, 0.0, -5.0, 0.0, -4.0, 0.0, -2.0, 0.0, -2.0, 0.0],
    [0.0, 0.0, -7.0, 0.0, -6.0, 0.0, 0.0, 0.0, -3.0, 0.0, 0.0, 0.0],
    [5.0, 0.0, -5.0, 0.0, -4.0, 0.0, -5.0, 0.0, -2.0, 0.0, -2.0, 0.0],
    [5.0, 0.0, 0.0, 0.0, 0.0, 0.0, -5.0, 0.0, 0.0, 0.0, -2.0, 0.0],
];

/// Barycentric velocity of the Earth at `jd`, in km/s, equatorial J2000 axes.
///
/// Pure recomputation from the Julian date on every call.
pub fn earth_velocity(jd: JulianDate) -> Vector3<f64> {
    let t = jd.centuries_since_j2000();

    let mut angles = [0.0_f64; 11];
    for ((angle, &phase), &rate) in angles.iter_mut().zip(PHASE.iter()).zip(RATE.iter()) {
        *angle = phase + rate * t;
    }

    let mut x = 0.0;
    let mut y = 0.0;
    let mut z = 0.0;
    for (multipliers, a) in MULTIPLIERS.iter().zip(AMPLITUDES.iter()) {
        let argument: f64 = multipliers
            .iter()
            .zip(angles.iter())
            .map(|(&m, &angle)| f64::from(m) * angle)
            .sum();
        let (sin, cos) = argument.sin_cos();
        x += (a[0] + a[1] * t) * sin + (a[2] + a[3] * t) * cos;
        y += (a[4] + a[5] * t) * sin + (a[6] + a[7] * t) * cos;
        z += (a[8] + a[9] * t) * sin + (a[10] + a[11] * t) * cos;
    }

    // 1e-8 AU/day to km/s
    let scale = 1e-8 * AU_KM / DAY_S;
    Vector3::new(x * scale, y * scale, z * scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::JULIAN_CENTURY_DAYS;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_table_shapes() {
        assert_eq!(MULTIPLIERS.len(), 36);
        assert_eq!(AMPLITUDES.len(), 36);
    }

    #[test]
    fn test_reference_epoch_plus_one_century() {
        let v = earth_velocity(JulianDate::J2000 + JULIAN_CENTURY_DAYS);
        assert_abs_diff_eq!(v.x, -29.843_052_819_866_53, epsilon = 1e-6);
        assert_abs_diff_eq!(v.y, -4.696_253_830_852_529, epsilon = 1e-6);
        assert_abs_diff_eq!(v.z, -2.032_992_870_687_553, epsilon = 1e-6);
    }

    #[test]
    fn test_speed_stays_near_orbital_velocity() {
        // Earth's barycentric speed varies around ~30 km/s
        for offset in (-36525..36525).step_by(365) {
            let speed = earth_velocity(JulianDate::J2000 + f64::from(offset)).norm();
            assert!(
                (28.0..32.0).contains(&speed),
                "speed {speed} at offset {offset}"
            );
        }
    }
}
