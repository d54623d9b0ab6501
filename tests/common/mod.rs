//! Synthetic bulletins shared by the integration tests.
//!
//! The files follow the published fixed-width layouts. Values are smooth functions of time,
//! except at a few dates where the values published by the IERS are written instead: a query
//! falling exactly on a record reproduces it exactly, so these dates give reference results.
#![allow(dead_code)]

use std::sync::LazyLock;

use camino::Utf8Path;
use iers::bulletin::layout::{Column, FINALS_ALL};
use iers::calendar::jd_to_cal;
use iers::{BulletinFile, MemoryBulletinStore};

pub const TAI_UTC: &str = include_str!("../data/tai-utc.dat");

/// MJD of the first line of `finals.all` (1973-01-02)
pub const FINALS_FIRST_MJD: i64 = 41684;
/// Bulletin B (final) values are published before this MJD
pub const FINALS_FINAL_END_MJD: i64 = 57600;
/// Bulletin A (predicted) values are published before this MJD
pub const FINALS_PREDICTED_END_MJD: i64 = 57700;
/// MJD of the last line of `finals.all`
pub const FINALS_LAST_MJD: i64 = 57800;

/// Offset between the predicted and the final value of a record, so that tests can tell
/// which one was used.
pub const PREDICTED_BIAS: f64 = 1e-4;

pub static BULLETINS: LazyLock<MemoryBulletinStore> = LazyLock::new(bulletins);

#[derive(Debug, Clone, Copy)]
pub struct Eop {
    pub pole_x: f64,
    pub pole_y: f64,
    pub dut1: f64,
}

pub fn smooth_eop(mjd: f64) -> Eop {
    Eop {
        pole_x: 0.2 * (mjd / 60.7).cos(),
        pole_y: 0.3 + 0.15 * (mjd / 73.1).sin(),
        dut1: 0.4 * (mjd / 91.3).sin(),
    }
}

/// IERS values at the reference dates.
pub fn published_eop(mjd: i64) -> Option<Eop> {
    let (pole_x, pole_y, dut1) = match mjd {
        43880 => (0.143, 0.069, 0.5776),
        48411 => (-0.1241, 0.5085, 0.27303),
        50116 => (-0.2222, 0.2987, 0.49641),
        57646 => (0.211645, 0.015793, 0.2065257),
        _ => return None,
    };
    Some(Eop {
        pole_x,
        pole_y,
        dut1,
    })
}

pub fn eop_at(mjd: i64) -> Eop {
    published_eop(mjd).unwrap_or_else(|| smooth_eop(mjd as f64))
}

fn put(line: &mut [u8], column: Column, text: &str) {
    let start = column.end() - text.len();
    line[start..column.end()].copy_from_slice(text.as_bytes());
}

/// One `finals.all` line, blank slots left out and trailing spaces trimmed.
pub fn finals_line(mjd: i64, predicted: Option<Eop>, final_value: Option<Eop>) -> String {
    let mut line = vec![b' '; 185];
    let date = jd_to_cal(2400000.5, mjd as f64).unwrap();
    let ymd = format!(
        "{:2}{:2}{:2}",
        date.year() % 100,
        date.month(),
        date.day()
    );
    line[..6].copy_from_slice(ymd.as_bytes());
    put(&mut line, FINALS_ALL.mjd, &format!("{mjd}.00"));

    if let Some(a) = predicted {
        put(&mut line, FINALS_ALL.pole_x.predicted, &format!("{:9.6}", a.pole_x));
        put(&mut line, FINALS_ALL.pole_y.predicted, &format!("{:9.6}", a.pole_y));
        put(&mut line, FINALS_ALL.dut1.predicted, &format!("{:10.7}", a.dut1));
    }
    if let Some(b) = final_value {
        put(&mut line, FINALS_ALL.pole_x.final_value, &format!("{:10.6}", b.pole_x));
        put(&mut line, FINALS_ALL.pole_y.final_value, &format!("{:10.6}", b.pole_y));
        put(&mut line, FINALS_ALL.dut1.final_value, &format!("{:11.7}", b.dut1));
    }

    String::from_utf8(line).unwrap().trim_end().to_string()
}

/// Daily records from MJD 41684 to 57800: final and predicted values up to MJD 57599,
/// predicted values only up to MJD 57699, no value afterwards.
pub fn finals_all() -> String {
    let mut content = String::new();
    for mjd in FINALS_FIRST_MJD..=FINALS_LAST_MJD {
        let value = eop_at(mjd);
        let biased = Eop {
            pole_x: value.pole_x + PREDICTED_BIAS,
            pole_y: value.pole_y + PREDICTED_BIAS,
            dut1: value.dut1 + PREDICTED_BIAS,
        };
        let line = if mjd < FINALS_FINAL_END_MJD {
            finals_line(mjd, Some(biased), Some(value))
        } else if mjd < FINALS_PREDICTED_END_MJD {
            finals_line(mjd, Some(value), None)
        } else {
            finals_line(mjd, None, None)
        };
        content.push_str(&line);
        content.push('\n');
    }
    content
}

/// `(year, month)` of the `i`-th record of `deltat.data`.
pub fn deltat_data_month(i: usize) -> (i32, u32) {
    let m = 1 + i;
    (1973 + (m / 12) as i32, (m % 12) as u32 + 1)
}

/// ΔT written in `deltat.data` for a month.
pub fn deltat_data_value(i: usize) -> f64 {
    match deltat_data_month(i) {
        (1973, 2) => 43.4724,
        (1994, 2) => 60.0564,
        (2013, 10) => 67.1717,
        _ => 43.4724 + 0.047 * i as f64,
    }
}

/// Monthly observed ΔT from 1973-02-01 to 2016-10-01.
pub fn deltat_data() -> String {
    (0..=524)
        .map(|i| {
            let (year, month) = deltat_data_month(i);
            format!(
                " {year:4} {month:2}  1  {:7.4}\n",
                deltat_data_value(i)
            )
        })
        .collect()
}

/// Fractional year of the `k`-th record of `deltat.preds`.
pub fn deltat_preds_year(k: usize) -> f64 {
    2016.75 + 0.25 * k as f64
}

pub fn deltat_preds_value(k: usize) -> f64 {
    match k {
        1 => 68.6,
        19 => 71.0,
        _ => (683.0 + k as f64) / 10.0,
    }
}

/// Quarterly predicted ΔT from 2016.75 to 2026.00, after four header lines.
pub fn deltat_preds() -> String {
    let mut content = String::from(
        "       ΔT PREDICTIONS\n\
         \n  YEAR        TT-UT PREDICTION   UT1-UTC PREDICTION  ERROR\n\
         \n",
    );
    for k in 0..=37 {
        content.push_str(&format!(
            " {:7.2}      {:6.2}\n",
            deltat_preds_year(k),
            deltat_preds_value(k)
        ));
    }
    content
}

pub fn historic_year(k: usize) -> f64 {
    1657.0 + 0.5 * k as f64
}

pub fn historic_value(k: usize) -> f64 {
    if k == 496 {
        // 1905.0
        3.92
    } else {
        // two decimals, as written in the file
        ((10.0 + 25.0 * (k as f64 / 97.0).cos()) * 100.0).round() / 100.0
    }
}

/// Half-yearly historic ΔT from 1657.0 to 1984.5, after two header lines.
pub fn historic_deltat() -> String {
    let mut content = String::from("    Year      TT-UT\n\n");
    for k in 0..=655 {
        content.push_str(&format!(
            "{:8.1}     {:6.2}\n",
            historic_year(k),
            historic_value(k)
        ));
    }
    content
}

pub fn bulletins() -> MemoryBulletinStore {
    MemoryBulletinStore::new()
        .with(BulletinFile::FinalsAll, finals_all())
        .with(BulletinFile::DeltaTData, deltat_data())
        .with(BulletinFile::DeltaTPreds, deltat_preds())
        .with(BulletinFile::HistoricDeltaT, historic_deltat())
        .with(BulletinFile::TaiUtc, TAI_UTC)
        .with(BulletinFile::Readme, "readme\n")
        .with(BulletinFile::ReadmeFinals, "readme.finals\n")
}

/// Write every bulletin into `dir`.
pub fn write_bulletins(dir: &Utf8Path) {
    let store = bulletins();
    for file in BulletinFile::ALL {
        let lines = iers::BulletinStore::open(&store, file).unwrap();
        let mut content = lines.iter().collect::<Vec<_>>().join("\n");
        content.push('\n');
        std::fs::write(dir.join(file.file_name()), content).unwrap();
    }
}
