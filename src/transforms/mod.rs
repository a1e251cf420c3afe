//! Coordinate transform algebra
//!
//! Named rigid rotations between the supported reference frames, composed by
//! matrix multiplication. Application order is left to right: the transform
//! applied first is the rightmost factor of a product. Every constructor has
//! an inverse partner built from the transpose, so chains stay orthonormal.
//!
//! Conventions: frames are right handed with x toward longitude zero on the
//! fundamental plane and z toward the +90 degree pole, except the horizontal
//! frame, which flips x so azimuth reads north through east, and the
//! Earth-velocity frame, which puts the velocity apex on +y to match the
//! aberration kernel.

use std::ops::Mul;

use nalgebra::{Matrix3, Rotation3, Vector3};
use once_cell::sync::Lazy;

use crate::constants::ASEC2RAD;
use crate::coordinates::Angle;
use crate::series;
use crate::time::JulianDate;
use crate::{Result, SkyframeError};

/// Galactic north pole, B1950 right ascension (192.25 degrees)
const GAL_POLE_RA_DEG: f64 = 192.25;
/// Galactic north pole, B1950 declination (27.4 degrees)
const GAL_POLE_DEC_DEG: f64 = 27.4;
/// Galactic longitude of the ascending node of the galactic plane
const GAL_NODE_LON_DEG: f64 = 33.0;

/// B1950 equatorial to galactic, three fixed Euler rotations
static B1950_TO_GAL: Lazy<Matrix3<f64>> = Lazy::new(|| {
    rot_z(GAL_NODE_LON_DEG.to_radians())
        * rot_x((GAL_POLE_DEC_DEG - 90.0).to_radians())
        * rot_z(-(GAL_POLE_RA_DEG + 90.0).to_radians())
});

fn rot_x(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(1.0, 0.0, 0.0, 0.0, c, -s, 0.0, s, c)
}

fn rot_y(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(c, 0.0, s, 0.0, 1.0, 0.0, -s, 0.0, c)
}

fn rot_z(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0)
}

/// An orthonormal 3x3 rotation between two reference frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationTransform {
    matrix: Matrix3<f64>,
}

impl RotationTransform {
    /// The identity transform
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    fn new(matrix: Matrix3<f64>) -> Self {
        Self { matrix }
    }

    /// Mean-equinox precession from J2000 to `jd`.
    ///
    /// Three-angle (zeta, theta, z) formulation with cubic polynomials in
    /// centuries since J2000.
    pub fn precess_to(jd: JulianDate) -> Self {
        let (zeta, z, theta) = precession_angles(jd);
        Self::new(rot_z(z.radians()) * rot_y(-theta.radians()) * rot_z(zeta.radians()))
    }

    /// Mean-equinox precession from `jd` back to J2000
    pub fn precess_from(jd: JulianDate) -> Self {
        Self::precess_to(jd).inverse()
    }

    /// Equatorial of date to ecliptic of date: obliquity rotation about the
    /// shared equinox axis
    pub fn eq_to_ecl(jd: JulianDate) -> Self {
        Self::new(rot_x(-series::mean_obliquity(jd).radians()))
    }

    /// Ecliptic of date to equatorial of date
    pub fn ecl_to_eq(jd: JulianDate) -> Self {
        Self::eq_to_ecl(jd).inverse()
    }

    /// Mean to true equinox of date.
    ///
    /// Nutation is tabulated in ecliptic longitude, so the small longitude
    /// rotation is conjugated through the ecliptic transform to act on
    /// equatorial coordinates.
    pub fn nutate(jd: JulianDate) -> Self {
        let delta_psi = series::nutation(jd).longitude.to_radians();
        Self::new(
            Self::ecl_to_eq(jd).matrix * rot_z(delta_psi) * Self::eq_to_ecl(jd).matrix,
        )
    }

    /// True to mean equinox of date
    pub fn denutate(jd: JulianDate) -> Self {
        Self::nutate(jd).inverse()
    }

    /// Equatorial of date to horizontal, for local sidereal time `lst` and
    /// geographic latitude `lat`.
    ///
    /// A sidereal-time rotation brings the meridian to x, a latitude rotation
    /// brings the zenith to z, and an x flip makes azimuth read north through
    /// east while altitude keeps its conventional sign.
    pub fn eq_to_hor(lst: Angle, lat: Angle) -> Self {
        let flip = Matrix3::new(-1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0);
        Self::new(
            flip * rot_y(lat.radians() - std::f64::consts::FRAC_PI_2) * rot_z(-lst.radians()),
        )
    }

    /// Horizontal to equatorial of date
    pub fn hor_to_eq(lst: Angle, lat: Angle) -> Self {
        Self::eq_to_hor(lst, lat).inverse()
    }

    /// B1950 equatorial to galactic
    pub fn b1950_to_gal() -> Self {
        Self::new(*B1950_TO_GAL)
    }

    /// Galactic to B1950 equatorial
    pub fn gal_to_b1950() -> Self {
        Self::b1950_to_gal().inverse()
    }

    /// Ecliptic of date to the Earth-velocity-aligned frame at `jd`.
    ///
    /// The shortest-arc rotation carrying the unit instantaneous barycentric
    /// velocity of the Earth onto the +y axis, where the aberration kernel
    /// expects the apex. Errors if the velocity vector vanishes.
    pub fn ecl_to_earth_vel(jd: JulianDate) -> Result<Self> {
        // The series yields J2000 equatorial axes; move into the ecliptic
        // frame of date before aligning.
        let v_eq = series::earth_velocity(jd);
        if v_eq.norm() == 0.0 {
            return Err(SkyframeError::DegenerateGeometry(format!(
                "zero Earth velocity at {jd}"
            )));
        }
        let v_ecl = (Self::eq_to_ecl(jd) * Self::precess_to(jd)).matrix * v_eq;
        let rotation = Rotation3::rotation_between(&v_ecl, &Vector3::y())
            .unwrap_or_else(|| Rotation3::from_axis_angle(&Vector3::x_axis(), std::f64::consts::PI));
        Ok(Self::new(rotation.into_inner()))
    }

    /// Earth-velocity-aligned frame back to ecliptic of date
    pub fn earth_vel_to_ecl(jd: JulianDate) -> Result<Self> {
        Ok(Self::ecl_to_earth_vel(jd)?.inverse())
    }

    /// The inverse rotation; for an orthonormal matrix this is the transpose
    pub fn inverse(&self) -> Self {
        Self::new(self.matrix.transpose())
    }

    /// Apply the rotation to a vector
    pub fn apply(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.matrix * v
    }

    /// The underlying matrix
    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }
}

/// Precession angles zeta, z and theta at `jd`, unreduced.
///
/// Reduction belongs to callers that feed the angles into additive
/// compositions; the matrix constructors use them as built.
pub fn precession_angles(jd: JulianDate) -> (Angle, Angle, Angle) {
    let t = jd.centuries_since_j2000();
    let t2 = t * t;
    let t3 = t2 * t;
    let zeta = (2306.2181 * t + 0.30188 * t2 + 0.017998 * t3) * ASEC2RAD;
    let z = (2306.2181 * t + 1.09468 * t2 + 0.018203 * t3) * ASEC2RAD;
    let theta = (2004.3109 * t - 0.42665 * t2 - 0.041833 * t3) * ASEC2RAD;
    (
        Angle::from_radians(zeta),
        Angle::from_radians(z),
        Angle::from_radians(theta),
    )
}

impl Mul for RotationTransform {
    type Output = RotationTransform;

    /// Compose two rotations; the right factor applies first
    fn mul(self, rhs: RotationTransform) -> RotationTransform {
        RotationTransform::new(self.matrix * rhs.matrix)
    }
}

impl Mul<Vector3<f64>> for RotationTransform {
    type Output = Vector3<f64>;

    fn mul(self, v: Vector3<f64>) -> Vector3<f64> {
        self.matrix * v
    }
}
