//! Radian-valued angle with sexagesimal-degree parsing and formatting
//!
//! Angles are stored in radians and reduced to the [0, 360) degree range only
//! when [`Angle::reduce`] is called. Additive compositions are exact; callers
//! reduce after construction so wrap-boundary discontinuities never leak into
//! intermediate values.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::{DEG2RAD, RAD2DEG, TAU};
use crate::{Result, SkyframeError};

/// Matches `[+-]D[.D]`, `[+-]D M[.M]` or `[+-]D M S[.S]` with `:`, spaces or
/// the d/m/s and degree/arcminute/arcsecond marks as separators.
static SEXAGESIMAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?x)^\s*
        (?P<sign>[-+])?\s*
        (?P<deg>\d+(?:\.\d+)?)\s*
        (?:[:d°\s]\s*
            (?P<min>\d+(?:\.\d+)?)\s*
            (?:[:'m\s]\s*
                (?P<sec>\d+(?:\.\d+)?)\s*[”"s]?
            )?'?
        )?°?\s*$"#,
    )
    .expect("sexagesimal pattern is valid")
});

/// An angle, stored in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Angle {
    radians: f64,
}

impl Angle {
    /// The zero angle
    pub const ZERO: Angle = Angle { radians: 0.0 };

    /// Create an angle from radians
    pub fn from_radians(radians: f64) -> Self {
        Self { radians }
    }

    /// Create an angle from decimal degrees
    pub fn from_degrees(degrees: f64) -> Self {
        Self {
            radians: degrees * DEG2RAD,
        }
    }

    /// Parse a sexagesimal degree string, e.g. `"-12:34:56.7"`,
    /// `"12 34 56"` or `"12d34m56.7s"`.
    pub fn parse_sexagesimal(text: &str) -> Result<Self> {
        let caps = SEXAGESIMAL_RE
            .captures(text)
            .ok_or_else(|| SkyframeError::AngleParse(format!("unrecognized angle {text:?}")))?;

        let field = |name: &str| -> Result<f64> {
            match caps.name(name) {
                Some(m) => m
                    .as_str()
                    .parse::<f64>()
                    .map_err(|e| SkyframeError::AngleParse(format!("{text:?}: {e}"))),
                None => Ok(0.0),
            }
        };

        let degrees = field("deg")?;
        let minutes = field("min")?;
        let seconds = field("sec")?;
        if minutes >= 60.0 || seconds >= 60.0 {
            return Err(SkyframeError::AngleParse(format!(
                "minutes/seconds out of range in {text:?}"
            )));
        }

        let magnitude = degrees + minutes / 60.0 + seconds / 3600.0;
        let signed = if caps.name("sign").map(|m| m.as_str()) == Some("-") {
            -magnitude
        } else {
            magnitude
        };
        Ok(Self::from_degrees(signed))
    }

    /// The angle in radians
    pub fn radians(&self) -> f64 {
        self.radians
    }

    /// The angle in decimal degrees
    pub fn degrees(&self) -> f64 {
        self.radians * RAD2DEG
    }

    /// Normalize into [0, 360) degrees
    pub fn reduce(&self) -> Self {
        let mut radians = self.radians.rem_euclid(TAU);
        // rem_euclid rounds tiny negatives up to the modulus itself
        if radians >= TAU {
            radians = 0.0;
        }
        Self { radians }
    }

    /// Sine of the angle
    pub fn sin(&self) -> f64 {
        self.radians.sin()
    }

    /// Cosine of the angle
    pub fn cos(&self) -> f64 {
        self.radians.cos()
    }

    /// Sine and cosine in one call, for callers that cache both
    pub fn sin_cos(&self) -> (f64, f64) {
        self.radians.sin_cos()
    }

    /// Degree, arcminute and arcsecond components of the absolute value,
    /// paired with the overall sign.
    pub fn to_dms(&self) -> (i8, u32, u32, f64) {
        let sign = if self.radians < 0.0 { -1 } else { 1 };
        let total = self.degrees().abs();
        let degrees = total.floor();
        let minutes = ((total - degrees) * 60.0).floor();
        let seconds = (total - degrees - minutes / 60.0) * 3600.0;
        (sign, degrees as u32, minutes as u32, seconds)
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, other: Angle) -> Angle {
        Angle::from_radians(self.radians + other.radians)
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, other: Angle) -> Angle {
        Angle::from_radians(self.radians - other.radians)
    }
}

impl Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Angle {
        Angle::from_radians(-self.radians)
    }
}

impl Mul<f64> for Angle {
    type Output = Angle;

    fn mul(self, factor: f64) -> Angle {
        Angle::from_radians(self.radians * factor)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (sign, d, m, s) = self.to_dms();
        let sign = if sign < 0 { "-" } else { "+" };
        write!(f, "{sign}{d:02}:{m:02}:{s:05.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_degree_radian_roundtrip() {
        for &deg in &[0.0, 45.0, 123.456789, -280.5, 359.999999] {
            let angle = Angle::from_degrees(deg);
            assert_relative_eq!(angle.degrees(), deg, epsilon = 1e-12);
            assert_relative_eq!(
                Angle::from_radians(angle.radians()).degrees(),
                deg,
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_reduce_range() {
        assert_relative_eq!(
            Angle::from_degrees(-30.0).reduce().degrees(),
            330.0,
            epsilon = 1e-10
        );
        assert_relative_eq!(
            Angle::from_degrees(725.0).reduce().degrees(),
            5.0,
            epsilon = 1e-10
        );
        for &deg in &[-720.0, -0.25, 0.0, 359.999, 360.0, 1234.5] {
            let reduced = Angle::from_degrees(deg).reduce().degrees();
            assert!((0.0..360.0).contains(&reduced), "{deg} reduced to {reduced}");
        }
    }

    #[test]
    fn test_additive_composition_then_reduce() {
        let sum = (Angle::from_degrees(350.0) + Angle::from_degrees(20.0)).reduce();
        assert_relative_eq!(sum.degrees(), 10.0, epsilon = 1e-10);
        let diff = (Angle::from_degrees(10.0) - Angle::from_degrees(20.0)).reduce();
        assert_relative_eq!(diff.degrees(), 350.0, epsilon = 1e-10);
    }

    #[rstest]
    #[case("12:34:56.7", 12.0 + 34.0 / 60.0 + 56.7 / 3600.0)]
    #[case("-12:34:56.7", -(12.0 + 34.0 / 60.0 + 56.7 / 3600.0))]
    #[case("12 34 56", 12.0 + 34.0 / 60.0 + 56.0 / 3600.0)]
    #[case("12d34m56.7s", 12.0 + 34.0 / 60.0 + 56.7 / 3600.0)]
    #[case("+41.054063", 41.054063)]
    #[case("0:30", 0.5)]
    fn test_parse_sexagesimal(#[case] text: &str, #[case] expected_degrees: f64) {
        let angle = Angle::parse_sexagesimal(text).unwrap();
        assert_relative_eq!(angle.degrees(), expected_degrees, epsilon = 1e-9);
    }

    #[rstest]
    #[case("")]
    #[case("north")]
    #[case("12:61:00")]
    #[case("12:00:60.5")]
    fn test_parse_rejects(#[case] text: &str) {
        assert!(Angle::parse_sexagesimal(text).is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        let angle = Angle::from_degrees(-12.5824);
        let shown = format!("{angle}");
        let back = Angle::parse_sexagesimal(&shown).unwrap();
        assert_relative_eq!(back.degrees(), angle.degrees(), epsilon = 1e-6);
    }
}
