//! Earth orientation parameters interpolated from the IERS / USNO bulletins.
//!
//! [`EarthOrientation`] answers UT1−UTC, polar motion, ΔT and leap second queries for a
//! [`JulianDay`], reading the bulletins through a [`BulletinStore`](bulletin::store::BulletinStore).
//! [`IersEnv`] keeps a local copy of the bulletins up to date.
pub mod bulletin;
pub mod calendar;
pub mod config;
pub mod constants;
pub mod earth_orientation;
pub mod env_state;
pub mod iers_errors;
pub mod interpolation;
pub mod leap_seconds;
pub mod time;

pub use bulletin::{
    store::{BulletinLines, BulletinStore, LocalBulletinStore, MemoryBulletinStore},
    BulletinFile,
};
pub use config::IersConfig;
pub use earth_orientation::EarthOrientation;
pub use env_state::IersEnv;
pub use iers_errors::IersError;
pub use time::JulianDay;
