//! # Leap second table
//!
//! Parsed content of `tai-utc.dat`, the USNO history of TAI−UTC.
//!
//! Before 1972 UTC drifted against TAI at a published rate, so each entry carries
//! a drift term:
//!
//! ```text
//! TAI − UTC = offset + (MJD − reference_mjd) · drift_rate
//! ```
//!
//! From 1972 on the drift rate is zero and the offset is the accumulated number of
//! leap seconds.
//!
//! ## Lookup rule
//! -----------------
//! The entry in force at `jd` is the last one with `effective_jd ≤ jd`: at the exact
//! instant of a transition the new value applies. Before the first entry the offset is `0`.
use crate::{
    bulletin::{
        fields::Record,
        layout::{TaiUtcLayout, TAI_UTC},
        store::BulletinLines,
    },
    constants::{JD, JDTOMJD, Seconds},
    iers_errors::IersError,
};

/// One line of the leap second table.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LeapSecondEntry {
    /// Julian Day from which the entry applies
    pub effective_jd: JD,
    /// TAI−UTC at `reference_mjd`, in seconds
    pub offset: Seconds,
    pub reference_mjd: f64,
    /// Seconds per day
    pub drift_rate: f64,
}

impl LeapSecondEntry {
    /// TAI−UTC at `jd` including the drift term.
    pub fn tai_minus_utc(&self, jd: JD) -> Seconds {
        self.offset + (jd - JDTOMJD - self.reference_mjd) * self.drift_rate
    }
}

/// Leap second entries, strictly increasing by effective date.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LeapSecondTable {
    entries: Vec<LeapSecondEntry>,
}

impl LeapSecondTable {
    /// Build a table from entries already sorted by effective date.
    ///
    /// Return
    /// ------
    /// * the table, or [`IersError::UnsortedLeapSecondTable`] with the index of the first entry
    ///   not strictly after its predecessor
    pub fn new(entries: Vec<LeapSecondEntry>) -> Result<Self, IersError> {
        if let Some(i) = entries
            .windows(2)
            .position(|w| w[1].effective_jd <= w[0].effective_jd)
        {
            return Err(IersError::UnsortedLeapSecondTable { line: i + 1 });
        }
        Ok(LeapSecondTable { entries })
    }

    /// Parse the lines of `tai-utc.dat`.
    ///
    /// Lines are read from the top; the first blank line ends the table.
    pub fn parse(lines: &BulletinLines) -> Result<Self, IersError> {
        Self::parse_with_layout(lines, &TAI_UTC)
    }

    fn parse_with_layout(lines: &BulletinLines, layout: &TaiUtcLayout) -> Result<Self, IersError> {
        let entries = lines
            .iter()
            .enumerate()
            .take_while(|(_, text)| !text.trim().is_empty())
            .map(|(i, text)| {
                let rec = Record::new(layout.file, i, text);
                Ok(LeapSecondEntry {
                    effective_jd: rec.required_f64(layout.jd)?,
                    offset: rec.required_f64(layout.offset)?,
                    reference_mjd: rec.required_f64(layout.reference_mjd)?,
                    drift_rate: rec.required_f64(layout.drift_rate)?,
                })
            })
            .collect::<Result<Vec<_>, IersError>>()?;

        Self::new(entries)
    }

    pub fn entries(&self) -> &[LeapSecondEntry] {
        &self.entries
    }

    /// Entry in force at `jd`, `None` before the first one.
    pub fn entry_at(&self, jd: JD) -> Option<&LeapSecondEntry> {
        let idx = self.entries.partition_point(|e| e.effective_jd <= jd);
        idx.checked_sub(1).map(|i| &self.entries[i])
    }

    /// Tabulated TAI−UTC offset at `jd`, `0` before the first entry.
    pub fn offset_at(&self, jd: JD) -> Seconds {
        self.entry_at(jd).map_or(0.0, |e| e.offset)
    }

    /// TAI−UTC at `jd` with the pre-1972 drift term applied, `0` before the first entry.
    pub fn tai_minus_utc(&self, jd: JD) -> Seconds {
        self.entry_at(jd).map_or(0.0, |e| e.tai_minus_utc(jd))
    }
}
