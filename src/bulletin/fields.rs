//! # Fixed-width field extraction
//!
//! Bulletin records are read by slicing a line at the byte offsets of a
//! [`Column`](super::layout::Column) and parsing the trimmed text.
//!
//! ## Slicing semantics
//! -----------------
//! * A field starting past the end of the line is **empty** (short trailing records are
//!   common in `finals.all`, whose Bulletin B columns are absent for recent days).
//! * A field running past the end of the line is **truncated** to what is present.
//! * Blank text parses to `None`; any other unparsable text is an
//!   [`IersError::MalformedRecord`] carrying the file, line and field name.
//!
//! ## Final / predicted slots
//! -----------------
//! [`Record::final_or_predicted`] implements the selection rule shared by `dut1`, `x` and
//! `y`: the final (Bulletin B) value when present, else the predicted (Bulletin A) value,
//! else nothing. A record with neither value makes the whole query unavailable.
use super::{
    layout::{Column, DualColumn},
    BulletinFile,
};
use crate::iers_errors::IersError;

/// Extract the raw text of `column` from `line`, with substring semantics.
///
/// Returns `"?"` when the column boundaries split a multi-byte character, so that parsing
/// fails instead of silently reading a blank.
pub fn field(line: &str, column: Column) -> &str {
    if column.start >= line.len() {
        return "";
    }
    let end = column.end().min(line.len());
    line.get(column.start..end).unwrap_or("?")
}

/// One line of a bulletin file, with its position for error reporting.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    pub file: BulletinFile,
    pub index: usize,
    pub text: &'a str,
}

impl<'a> Record<'a> {
    pub fn new(file: BulletinFile, index: usize, text: &'a str) -> Self {
        Record { file, index, text }
    }

    /// Trimmed text of a column.
    pub fn field(&self, column: Column) -> &'a str {
        field(self.text, column).trim()
    }

    fn malformed(&self, column: Column, text: &str) -> IersError {
        IersError::MalformedRecord {
            file: self.file.file_name().to_string(),
            line: self.index,
            field: column.name,
            text: text.to_string(),
        }
    }

    fn parse<T: std::str::FromStr>(&self, column: Column) -> Result<Option<T>, IersError> {
        let text = self.field(column);
        if text.is_empty() {
            return Ok(None);
        }
        text.parse::<T>()
            .map(Some)
            .map_err(|_| self.malformed(column, text))
    }

    /// Parse a floating point column, `None` when blank.
    pub fn f64(&self, column: Column) -> Result<Option<f64>, IersError> {
        self.parse(column)
    }

    /// Parse an integer column, `None` when blank.
    pub fn i32(&self, column: Column) -> Result<Option<i32>, IersError> {
        self.parse(column)
    }

    /// Parse a floating point column that must be present.
    pub fn required_f64(&self, column: Column) -> Result<f64, IersError> {
        self.f64(column)?.ok_or_else(|| self.malformed(column, ""))
    }

    /// Parse an integer column that must be present.
    pub fn required_i32(&self, column: Column) -> Result<i32, IersError> {
        self.i32(column)?.ok_or_else(|| self.malformed(column, ""))
    }

    /// The final value of a dual column if present, otherwise the predicted one.
    ///
    /// Return
    /// ------
    /// * `Ok(Some(v))` with the first non-blank slot, final first
    /// * `Ok(None)` when both slots are blank
    /// * [`IersError::MalformedRecord`] when the selected slot is not a number
    pub fn final_or_predicted(&self, dual: DualColumn) -> Result<Option<f64>, IersError> {
        match self.f64(dual.final_value)? {
            Some(value) => Ok(Some(value)),
            None => self.f64(dual.predicted),
        }
    }
}

#[cfg(test)]
mod fields_test {
    use super::*;
    use crate::bulletin::layout::{DELTAT_DATA, FINALS_ALL, TAI_UTC};

    const DELTAT_LINE: &str = " 1973  2  1  43.4724";

    #[test]
    fn test_field_slicing() {
        let col = Column::new("c", 2, 4);
        assert_eq!(field("abcdefgh", col), "cdef");
        assert_eq!(field("abcd", col), "cd");
        assert_eq!(field("ab", col), "");
        assert_eq!(field("", col), "");
    }

    #[test]
    fn test_field_multibyte_boundary() {
        let col = Column::new("c", 2, 2);
        assert_eq!(field("aΔTb", col), "?");
    }

    #[test]
    fn test_deltat_record() {
        let rec = Record::new(BulletinFile::DeltaTData, 0, DELTAT_LINE);
        assert_eq!(rec.required_i32(DELTAT_DATA.year).unwrap(), 1973);
        assert_eq!(rec.required_i32(DELTAT_DATA.month).unwrap(), 2);
        assert_eq!(rec.required_i32(DELTAT_DATA.day).unwrap(), 1);
        assert_eq!(rec.required_f64(DELTAT_DATA.value).unwrap(), 43.4724);
    }

    #[test]
    fn test_tai_utc_record() {
        let line =
            " 1963 NOV  1 =JD 2438334.5  TAI-UTC=   1.9458580 S + (MJD - 37665.) X 0.0011232S";
        let rec = Record::new(BulletinFile::TaiUtc, 3, line);
        assert_eq!(rec.required_f64(TAI_UTC.jd).unwrap(), 2438334.5);
        assert_eq!(rec.required_f64(TAI_UTC.offset).unwrap(), 1.945858);
        assert_eq!(rec.required_f64(TAI_UTC.reference_mjd).unwrap(), 37665.0);
        assert_eq!(rec.required_f64(TAI_UTC.drift_rate).unwrap(), 0.0011232);
    }

    #[test]
    fn test_malformed_field() {
        let rec = Record::new(BulletinFile::DeltaTData, 7, " 19x3  2  1  43.4724");
        assert_eq!(
            rec.required_i32(DELTAT_DATA.year),
            Err(IersError::MalformedRecord {
                file: "deltat.data".into(),
                line: 7,
                field: "year",
                text: "19x3".into(),
            })
        );
    }

    #[test]
    fn test_blank_required_field() {
        let rec = Record::new(BulletinFile::DeltaTData, 2, " 1973  2  1");
        assert_eq!(rec.f64(DELTAT_DATA.value).unwrap(), None);
        assert!(matches!(
            rec.required_f64(DELTAT_DATA.value),
            Err(IersError::MalformedRecord { line: 2, .. })
        ));
    }

    fn finals_line(pm_x_a: &str, pm_x_b: &str) -> String {
        let mut line = vec![b' '; 185];
        let mut put = |col: Column, text: &str| {
            let start = col.end() - text.len();
            line[start..col.end()].copy_from_slice(text.as_bytes());
        };
        put(FINALS_ALL.mjd, "50116.00");
        put(FINALS_ALL.pole_x.predicted, pm_x_a);
        put(FINALS_ALL.pole_x.final_value, pm_x_b);
        String::from_utf8(line).unwrap()
    }

    #[test]
    fn test_final_preferred_over_predicted() {
        let line = finals_line("-0.222150", "-.222200");
        let rec = Record::new(BulletinFile::FinalsAll, 0, &line);
        assert_eq!(
            rec.final_or_predicted(FINALS_ALL.pole_x).unwrap(),
            Some(-0.2222)
        );
    }

    #[test]
    fn test_predicted_fallback() {
        let line = finals_line("-0.222150", "");
        let rec = Record::new(BulletinFile::FinalsAll, 0, &line);
        assert_eq!(
            rec.final_or_predicted(FINALS_ALL.pole_x).unwrap(),
            Some(-0.22215)
        );
    }

    #[test]
    fn test_both_slots_blank() {
        let line = finals_line("", "");
        let rec = Record::new(BulletinFile::FinalsAll, 0, &line);
        assert_eq!(rec.final_or_predicted(FINALS_ALL.pole_x).unwrap(), None);

        // a line cut before the Bulletin B columns behaves the same
        let rec = Record::new(BulletinFile::FinalsAll, 0, "73 1 2 41684.00");
        assert_eq!(rec.final_or_predicted(FINALS_ALL.dut1).unwrap(), None);
    }
}
