use thiserror::Error;

/// Calendar component rejected by [`cal_to_jd`](crate::calendar::cal_to_jd).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarField {
    Year,
    Month,
    Day,
}

impl std::fmt::Display for CalendarField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalendarField::Year => write!(f, "year"),
            CalendarField::Month => write!(f, "month"),
            CalendarField::Day => write!(f, "day"),
        }
    }
}

#[derive(Error, Debug)]
pub enum IersError {
    #[error("Invalid {field} in calendar date {year}-{month}-{day}")]
    InvalidDate {
        field: CalendarField,
        year: i32,
        month: u32,
        day: u32,
    },

    #[error("Julian day {0} is outside the supported range")]
    OutOfRange(f64),

    #[error("No data available for JD={0}: the predictions are exhausted")]
    NoDataAvailable(f64),

    #[error("Malformed interpolation dataset: {0}")]
    MalformedDataset(String),

    #[error("Malformed record in {file} at line {line}, field {field}: {text:?}")]
    MalformedRecord {
        file: String,
        line: usize,
        field: &'static str,
        text: String,
    },

    #[error("Bulletin file not found: {0}")]
    MissingBulletin(String),

    #[error("Leap second table is not increasing at line {line}")]
    UnsortedLeapSecondTable { line: usize },

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP ureq error: {0}")]
    UreqHttpError(#[from] ureq::Error),

    #[error("UTF-8 Path error: {0}")]
    Utf8PathError(String),

    #[error("Storage dir creation error for IERS bulletins: {0}")]
    UnableToCreateStorageDir(String),

    #[error("Unable to connect to any IERS server to download data")]
    NoServerAvailable,

    #[error("System clock error: {0}")]
    TimeError(String),
}

impl From<hifitime::HifitimeError> for IersError {
    fn from(err: hifitime::HifitimeError) -> Self {
        IersError::TimeError(err.to_string())
    }
}

impl PartialEq for IersError {
    fn eq(&self, other: &Self) -> bool {
        use IersError::*;
        match (self, other) {
            (
                InvalidDate {
                    field: f1,
                    year: y1,
                    month: m1,
                    day: d1,
                },
                InvalidDate {
                    field: f2,
                    year: y2,
                    month: m2,
                    day: d2,
                },
            ) => f1 == f2 && y1 == y2 && m1 == m2 && d1 == d2,
            (OutOfRange(a), OutOfRange(b)) => a == b,
            (NoDataAvailable(a), NoDataAvailable(b)) => a == b,
            (MalformedDataset(a), MalformedDataset(b)) => a == b,
            (
                MalformedRecord {
                    file: f1,
                    line: l1,
                    field: c1,
                    text: t1,
                },
                MalformedRecord {
                    file: f2,
                    line: l2,
                    field: c2,
                    text: t2,
                },
            ) => f1 == f2 && l1 == l2 && c1 == c2 && t1 == t2,
            (MissingBulletin(a), MissingBulletin(b)) => a == b,
            (UnsortedLeapSecondTable { line: a }, UnsortedLeapSecondTable { line: b }) => a == b,

            // payloads are not comparable, same variant is enough
            (IoError(_), IoError(_)) => true,
            (UreqHttpError(_), UreqHttpError(_)) => true,

            (Utf8PathError(a), Utf8PathError(b)) => a == b,
            (UnableToCreateStorageDir(a), UnableToCreateStorageDir(b)) => a == b,
            (NoServerAvailable, NoServerAvailable) => true,
            (TimeError(a), TimeError(b)) => a == b,

            _ => false,
        }
    }
}
