//! # Constants and type definitions for the IERS engine
//!
//! This module centralizes the **time-scale offsets**, the **dispatch boundaries** used when
//! selecting a bulletin source, and the **type aliases** shared across the crate.
//!
//! ## Overview
//!
//! - Julian Day ↔ Modified Julian Day offset
//! - Validity bounds of the calendar algorithms
//! - Epoch constants of the ΔT bulletins (historic / current / predicted)
//! - Type aliases documenting the unit carried by a bare `f64`

// -------------------------------------------------------------------------------------------------
// Time-scale offsets
// -------------------------------------------------------------------------------------------------

/// Conversion factor between Julian Date and Modified Julian Date
pub const JDTOMJD: f64 = 2400000.5;

/// Number of seconds in an hour
pub const SECONDS_PER_HOUR: f64 = 3_600.0;

// -------------------------------------------------------------------------------------------------
// Calendar algorithm bounds
// -------------------------------------------------------------------------------------------------

/// Earliest year accepted by the calendar → JD conversion (4800 BC)
pub const MIN_CALENDAR_YEAR: i32 = -4799;

/// Smallest Julian Day accepted by the JD → calendar conversion
pub const MIN_JULIAN_DAY: f64 = -68569.5;

/// Largest Julian Day accepted by the JD → calendar conversion
pub const MAX_JULIAN_DAY: f64 = 1e9;

// -------------------------------------------------------------------------------------------------
// Bulletin epochs
// -------------------------------------------------------------------------------------------------

/// First Julian Day covered by `deltat.data` (1973-02-01); earlier dates use the historic table.
pub const HISTORIC_DELTA_T_BOUNDARY_JD: f64 = 2441714.5;

/// Year of the first monthly record of `deltat.data`
pub const DELTA_T_DATA_FIRST_YEAR: i32 = 1973;

/// Year of the first half-yearly record of `historic_deltat.data`
pub const HISTORIC_DELTA_T_FIRST_YEAR: i32 = 1657;

/// Default number of records taken on each side of the query when interpolating
pub const DEFAULT_HALF_WIDTH: usize = 5;

/// Default minimum interval, in hours, between two refreshes of the local bulletins
pub const DEFAULT_UPDATE_INTERVAL_HOURS: f64 = 0.25;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Julian Day (days)
pub type JD = f64;
/// Modified Julian Day (days)
pub type MJD = f64;
/// Angle in arcseconds
pub type ArcSec = f64;
/// Duration in seconds
pub type Seconds = f64;
