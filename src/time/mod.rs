//! Julian Date handling
//!
//! All series and transform code takes time as a [`JulianDate`]; the primary
//! derived quantity is Julian centuries elapsed since the J2000.0 epoch.

use std::fmt;
use std::ops::{Add, Sub};

use chrono::{DateTime, Utc};

use crate::constants::{B1950, DAY_S, J2000, JULIAN_CENTURY_DAYS};

/// Julian Date of the Unix epoch (1970-01-01T00:00:00Z)
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// A continuous day count on the Julian Date time axis
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct JulianDate {
    days: f64,
}

impl JulianDate {
    /// The J2000.0 epoch (2000 January 1.5 TT)
    pub const J2000: JulianDate = JulianDate { days: J2000 };

    /// The B1950.0 epoch
    pub const B1950: JulianDate = JulianDate { days: B1950 };

    /// Create a Julian date from a raw day count
    pub fn new(days: f64) -> Self {
        Self { days }
    }

    /// Create a Julian date from a UTC timestamp
    pub fn from_utc(utc: &DateTime<Utc>) -> Self {
        let seconds = utc.timestamp() as f64 + f64::from(utc.timestamp_subsec_nanos()) * 1e-9;
        Self {
            days: UNIX_EPOCH_JD + seconds / DAY_S,
        }
    }

    /// Raw day count
    pub fn value(&self) -> f64 {
        self.days
    }

    /// Julian centuries elapsed since J2000.0
    pub fn centuries_since_j2000(&self) -> f64 {
        (self.days - J2000) / JULIAN_CENTURY_DAYS
    }
}

impl Add<f64> for JulianDate {
    type Output = JulianDate;

    /// Offset a Julian date by a number of days
    fn add(self, days: f64) -> JulianDate {
        JulianDate::new(self.days + days)
    }
}

impl Sub<JulianDate> for JulianDate {
    type Output = f64;

    /// Interval between two Julian dates, in days
    fn sub(self, other: JulianDate) -> f64 {
        self.days - other.days
    }
}

impl fmt::Display for JulianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JD {:.6}", self.days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    #[test]
    fn test_epoch_centuries() {
        assert_eq!(JulianDate::J2000.centuries_since_j2000(), 0.0);
        let one_century = JulianDate::J2000 + 36525.0;
        assert_relative_eq!(one_century.centuries_since_j2000(), 1.0);
        assert_relative_eq!(
            JulianDate::B1950.centuries_since_j2000(),
            -0.500002,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_from_utc() {
        // 2000-01-01T12:00:00 UTC is JD 2451545.0 on the UTC axis
        let noon = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        let jd = JulianDate::from_utc(&noon);
        assert_relative_eq!(jd.value(), 2_451_545.0, epsilon = 1e-9);
    }

    #[test]
    fn test_day_arithmetic() {
        let jd = JulianDate::new(2_450_000.0);
        assert_relative_eq!((jd + 1.5).value(), 2_450_001.5);
        assert_relative_eq!((jd + 1.5) - jd, 1.5);
    }
}
