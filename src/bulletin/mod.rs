//! IERS / USNO bulletin files.
//!
//! The engine reads five plain-text bulletins, each holding one fixed-width record per line.
//! This module names them and groups the pieces needed to turn a query time into a window
//! of parsed records:
//!
//! - [`layout`]: byte offsets and widths of every field, one `const` descriptor per file.
//! - [`fields`]: extraction of typed values from a line given a [`layout::Column`].
//! - [`locator`]: pointer formulas and the clamping policy producing an
//!   [`locator::InterpolationWindow`].
//! - [`store`]: the [`store::BulletinStore`] capability giving line-indexed access to the
//!   current local content of a file, with an on-disk and an in-memory implementation.
//!
//! # Files
//!
//! | File | Content | Record spacing |
//! |------|---------|----------------|
//! | `finals.all` | UT1−UTC and polar motion, Bulletin A and B columns | daily |
//! | `deltat.data` | observed ΔT | monthly |
//! | `deltat.preds` | predicted ΔT | quarterly |
//! | `historic_deltat.data` | historic ΔT from 1657 | half-yearly |
//! | `tai-utc.dat` | TAI−UTC leap second table | irregular |
//!
//! `readme` and `readme.finals` are fetched alongside by the updater but never parsed.
use std::str::FromStr;

pub mod fields;
pub mod layout;
pub mod locator;
pub mod store;

/// A bulletin file known to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BulletinFile {
    DeltaTData,
    DeltaTPreds,
    FinalsAll,
    HistoricDeltaT,
    TaiUtc,
    Readme,
    ReadmeFinals,
}

impl BulletinFile {
    /// Every file kept in the local storage, in download order.
    pub const ALL: [BulletinFile; 7] = [
        BulletinFile::DeltaTData,
        BulletinFile::DeltaTPreds,
        BulletinFile::FinalsAll,
        BulletinFile::HistoricDeltaT,
        BulletinFile::TaiUtc,
        BulletinFile::Readme,
        BulletinFile::ReadmeFinals,
    ];

    /// File name on the IERS servers and in the local storage.
    pub fn file_name(&self) -> &'static str {
        match self {
            BulletinFile::DeltaTData => "deltat.data",
            BulletinFile::DeltaTPreds => "deltat.preds",
            BulletinFile::FinalsAll => "finals.all",
            BulletinFile::HistoricDeltaT => "historic_deltat.data",
            BulletinFile::TaiUtc => "tai-utc.dat",
            BulletinFile::Readme => "readme",
            BulletinFile::ReadmeFinals => "readme.finals",
        }
    }

    /// Parse a `BulletinFile` from its file name.
    pub fn from_file_name(name: &str) -> Option<Self> {
        BulletinFile::ALL
            .into_iter()
            .find(|file| file.file_name() == name)
    }
}

impl std::fmt::Display for BulletinFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.file_name())
    }
}

impl FromStr for BulletinFile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BulletinFile::from_file_name(s).ok_or_else(|| format!("Unknown bulletin file: {s}"))
    }
}
