//! Fixed-width layouts of the bulletin files.
//!
//! Offsets are 0-based byte positions, widths in bytes. They follow the format descriptions
//! published with the files (`readme`, `readme.finals`).
use super::BulletinFile;

/// A fixed-width field: `width` bytes starting at byte `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub start: usize,
    pub width: usize,
    pub name: &'static str,
}

impl Column {
    pub const fn new(name: &'static str, start: usize, width: usize) -> Self {
        Column { start, width, name }
    }

    /// Exclusive end offset of the field.
    pub const fn end(&self) -> usize {
        self.start + self.width
    }
}

/// A quantity published in two slots: the final value and the earlier predicted one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DualColumn {
    pub final_value: Column,
    pub predicted: Column,
}

/// Layout of `finals.all`: one line per day, Bulletin A (rapid / predicted) and Bulletin B
/// (final) values side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalsLayout {
    pub file: BulletinFile,
    pub mjd: Column,
    pub pole_x: DualColumn,
    pub pole_y: DualColumn,
    pub dut1: DualColumn,
}

/// Layout of a ΔT file with explicit year / month / day fields (`deltat.data`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeltaTLayout {
    pub file: BulletinFile,
    pub first_record: usize,
    pub year: Column,
    pub month: Column,
    pub day: Column,
    pub value: Column,
}

/// Layout of a ΔT file indexed by fractional year (`deltat.preds`, `historic_deltat.data`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FractionalYearLayout {
    pub file: BulletinFile,
    /// Index of the first data line, the lines before it are headers
    pub first_record: usize,
    pub year: Column,
    pub value: Column,
}

/// Layout of the leap second table `tai-utc.dat`.
///
/// A line reads
/// ` 1961 JAN  1 =JD 2437300.5  TAI-UTC=   1.4228180 S + (MJD - 37300.) X 0.001296 S`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaiUtcLayout {
    pub file: BulletinFile,
    pub jd: Column,
    pub offset: Column,
    pub reference_mjd: Column,
    pub drift_rate: Column,
}

pub const FINALS_ALL: FinalsLayout = FinalsLayout {
    file: BulletinFile::FinalsAll,
    mjd: Column::new("mjd", 7, 8),
    pole_x: DualColumn {
        final_value: Column::new("pm_x_b", 134, 10),
        predicted: Column::new("pm_x_a", 18, 9),
    },
    pole_y: DualColumn {
        final_value: Column::new("pm_y_b", 144, 10),
        predicted: Column::new("pm_y_a", 37, 9),
    },
    dut1: DualColumn {
        final_value: Column::new("ut1_utc_b", 154, 11),
        predicted: Column::new("ut1_utc_a", 58, 10),
    },
};

pub const DELTAT_DATA: DeltaTLayout = DeltaTLayout {
    file: BulletinFile::DeltaTData,
    first_record: 0,
    year: Column::new("year", 1, 4),
    month: Column::new("month", 6, 2),
    day: Column::new("day", 9, 2),
    value: Column::new("delta_t", 13, 7),
};

pub const DELTAT_PREDS: FractionalYearLayout = FractionalYearLayout {
    file: BulletinFile::DeltaTPreds,
    first_record: 4,
    year: Column::new("year", 1, 7),
    value: Column::new("delta_t", 14, 6),
};

pub const HISTORIC_DELTAT: FractionalYearLayout = FractionalYearLayout {
    file: BulletinFile::HistoricDeltaT,
    first_record: 2,
    year: Column::new("year", 0, 8),
    value: Column::new("delta_t", 13, 6),
};

pub const TAI_UTC: TaiUtcLayout = TaiUtcLayout {
    file: BulletinFile::TaiUtc,
    jd: Column::new("jd", 17, 9),
    offset: Column::new("tai_utc", 38, 10),
    reference_mjd: Column::new("reference_mjd", 60, 6),
    drift_rate: Column::new("drift_rate", 70, 9),
};
