//! Annual aberration via conformal stereographic scaling
//!
//! In a frame with the observer's velocity apex on +y, aberration acts on the
//! celestial sphere as a conformal map: project stereographically onto the
//! plane, scale by the exponential rapidity, and project back. No per-point
//! trigonometry is needed. Two projection branches are required, one through
//! each pole, so the map stays numerically stable on the whole sphere.

use nalgebra::Vector3;

use crate::constants::C_KM_S;
use crate::series;
use crate::time::JulianDate;

/// Exponential rapidity for an observer speed in km/s.
///
/// exp(atanh(v/c)), written as sqrt((1+beta)/(1-beta)). Equal to 1 at rest.
pub fn rapidity(speed_km_s: f64) -> f64 {
    let beta = speed_km_s / C_KM_S;
    ((1.0 + beta) / (1.0 - beta)).sqrt()
}

/// Exponential rapidity of the Earth at `jd`, from the barycentric velocity
/// series
pub fn earth_rapidity(jd: JulianDate) -> f64 {
    rapidity(series::earth_velocity(jd).norm())
}

/// Aberrate a unit direction `p`, expressed in the Earth-velocity-aligned
/// frame, by the given exponential rapidity.
///
/// Points with y < 0 are projected through the north pole and scaled up by
/// the rapidity; the rest are projected through the south pole and scaled
/// down, which is the same map approached from the other chart. Both poles
/// are fixed points; a rapidity of 1 is the identity.
pub fn aberrate(p: &Vector3<f64>, rapidity: f64) -> Vector3<f64> {
    if p.y < 0.0 {
        let px = p.x / (1.0 - p.y);
        let pz = p.z / (1.0 - p.y);
        let ax = rapidity * px;
        let az = rapidity * pz;
        let n = ax * ax + az * az;
        let d = 1.0 + n;
        Vector3::new(2.0 * ax / d, (n - 1.0) / d, 2.0 * az / d)
    } else {
        let px = p.x / (1.0 + p.y);
        let pz = p.z / (1.0 + p.y);
        let ax = px / rapidity;
        let az = pz / rapidity;
        let n = ax * ax + az * az;
        let d = 1.0 + n;
        Vector3::new(2.0 * ax / d, (1.0 - n) / d, 2.0 * az / d)
    }
}
