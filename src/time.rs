//! # Query instants
//!
//! [`JulianDay`] is the time coordinate every bulletin query takes. It stores a single Julian
//! Day count and derives the Modified Julian Day on demand, so `mjd == jd - 2400000.5` holds
//! by construction.
//!
//! ```rust
//! use iers::time::JulianDay;
//!
//! let t = JulianDay::from_mjd(51545.0);
//! assert_eq!(t.jd(), 2451545.5);
//! ```
use hifitime::Epoch;

use crate::{
    constants::{JD, JDTOMJD, MJD},
    iers_errors::IersError,
};

/// An immutable instant expressed as a Julian Day count (UTC).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JulianDay {
    jd: JD,
}

impl JulianDay {
    /// Create an instant from a Julian Day count.
    pub const fn from_jd(jd: JD) -> Self {
        JulianDay { jd }
    }

    /// Create an instant from a Modified Julian Day count.
    pub fn from_mjd(mjd: MJD) -> Self {
        JulianDay { jd: JDTOMJD + mjd }
    }

    /// The current UTC instant, read from the system clock.
    ///
    /// Return
    /// ------
    /// * the current instant, or [`IersError::TimeError`] if the clock cannot be read
    pub fn now() -> Result<Self, IersError> {
        Ok(Epoch::now()?.into())
    }

    /// Julian Day count of this instant.
    pub fn jd(&self) -> JD {
        self.jd
    }

    /// Modified Julian Day count of this instant.
    pub fn mjd(&self) -> MJD {
        self.jd - JDTOMJD
    }

    /// Two-part form `(2400000.5, mjd)` consumed by [`jd_to_cal`](crate::calendar::jd_to_cal).
    ///
    /// Splitting at the MJD epoch keeps the day fraction precise for modern dates.
    pub fn split(&self) -> (f64, f64) {
        (JDTOMJD, self.mjd())
    }
}

impl From<Epoch> for JulianDay {
    fn from(epoch: Epoch) -> Self {
        JulianDay::from_jd(epoch.to_jde_utc_days())
    }
}

impl std::fmt::Display for JulianDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JD {}", self.jd)
    }
}
