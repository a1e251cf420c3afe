//! Per-epoch almanac: the slowly varying numbers for one moment
//!
//! [`Almanac`] evaluates the series and transform constructors once for a
//! Julian date and caches the results, mirroring the bulk point-cloud engine
//! one point at a time. Single-point callers (labels, cursors, legacy code
//! paths) use this instead of paying the series cost per point.

use nalgebra::Vector3;

use crate::aberration;
use crate::coordinates::Angle;
use crate::series::{self, Nutation};
use crate::time::JulianDate;
use crate::transforms::RotationTransform;
use crate::Result;

/// Cached astrophysical quantities for one epoch
#[derive(Debug, Clone)]
pub struct Almanac {
    jd: JulianDate,
    obliquity: Angle,
    obliquity_sin_cos: (f64, f64),
    nutation: Nutation,
    earth_velocity: Vector3<f64>,
    rapidity: f64,
    precession: RotationTransform,
    catalog_to_apparent: RotationTransform,
    eq_date_to_earth_vel: RotationTransform,
}

impl Almanac {
    /// Evaluate every series once at `jd`
    pub fn new(jd: JulianDate) -> Result<Self> {
        let obliquity = series::mean_obliquity(jd);
        let nutation = series::nutation(jd);
        let earth_velocity = series::earth_velocity(jd);
        let precession = RotationTransform::precess_to(jd);
        let catalog_to_apparent = RotationTransform::nutate(jd) * precession;
        let eq_date_to_earth_vel =
            RotationTransform::ecl_to_earth_vel(jd)? * RotationTransform::eq_to_ecl(jd);
        Ok(Self {
            jd,
            obliquity,
            obliquity_sin_cos: obliquity.sin_cos(),
            nutation,
            earth_velocity,
            rapidity: aberration::rapidity(earth_velocity.norm()),
            precession,
            catalog_to_apparent,
            eq_date_to_earth_vel,
        })
    }

    /// The epoch these numbers belong to
    pub fn julian_date(&self) -> JulianDate {
        self.jd
    }

    /// Mean obliquity of the ecliptic
    pub fn obliquity(&self) -> Angle {
        self.obliquity
    }

    /// Cached sine and cosine of the mean obliquity
    pub fn obliquity_sin_cos(&self) -> (f64, f64) {
        self.obliquity_sin_cos
    }

    /// Nutation deltas in degrees
    pub fn nutation(&self) -> Nutation {
        self.nutation
    }

    /// Barycentric velocity of the Earth, km/s, equatorial J2000 axes
    pub fn earth_velocity(&self) -> Vector3<f64> {
        self.earth_velocity
    }

    /// Exponential aberration rapidity for the Earth's current speed
    pub fn rapidity(&self) -> f64 {
        self.rapidity
    }

    /// Precession from J2000 to this epoch
    pub fn precession(&self) -> RotationTransform {
        self.precession
    }

    /// Catalog J2000 to the true equinox of date (precession then nutation)
    pub fn catalog_to_apparent(&self) -> RotationTransform {
        self.catalog_to_apparent
    }

    /// Apparent place of one catalog J2000 direction: precession, nutation,
    /// then annual aberration, returned in true-equinox-of-date axes.
    pub fn apparent_place(&self, catalog: &Vector3<f64>) -> Vector3<f64> {
        let of_date = self.catalog_to_apparent * *catalog;
        let in_vel_frame = self.eq_date_to_earth_vel * of_date;
        let aberrated = aberration::aberrate(&in_vel_frame, self.rapidity);
        self.eq_date_to_earth_vel.inverse() * aberrated
    }
}
