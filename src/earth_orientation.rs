//! # Earth orientation queries
//!
//! [`EarthOrientation`] turns the discrete bulletin records into continuous functions of time.
//! Every interpolated quantity follows the same steps:
//!
//! 1. map the query instant to an approximate record line with the pointer formula of the source,
//! 2. clamp it into a full window of `2·W` records ([`clamp_window`]),
//! 3. parse the `(time, value)` sample of each record in the window,
//! 4. evaluate the Lagrange polynomial through the samples at the query time.
//!
//! ## Quantities
//!
//! | Method | Source | Abscissa | Unit |
//! |--------|--------|----------|------|
//! | [`dut1`](EarthOrientation::dut1) | `finals.all` | MJD | s |
//! | [`pole_x`](EarthOrientation::pole_x), [`pole_y`](EarthOrientation::pole_y) | `finals.all` | MJD | arcsec |
//! | [`delta_t`](EarthOrientation::delta_t) | `historic_deltat.data`, `deltat.data`, `deltat.preds` | JD | s |
//! | [`leap_seconds`](EarthOrientation::leap_seconds) | `tai-utc.dat` | JD (step) | s |
//!
//! ## Availability
//!
//! A query returns `Ok(None)` when the bulletins do not cover the instant: before the first record,
//! after the last one, or when a record of the window has no value. Errors are reserved for
//! unreadable or malformed bulletins, and for a ΔT query past the end of the predictions
//! ([`IersError::NoDataAvailable`]).
//!
//! The last non-blank line of a file closes the window range. A query on the last record itself is
//! answered by extrapolating from the records just before it.
//!
//! ```rust
//! use iers::{bulletin::{store::MemoryBulletinStore, BulletinFile}, EarthOrientation, JulianDay};
//!
//! let table = " 1972 JAN  1 =JD 2441317.5  TAI-UTC=  10.0       S + (MJD - 41317.) X 0.0      S\n";
//! let eop = EarthOrientation::from_store(MemoryBulletinStore::new().with(BulletinFile::TaiUtc, table));
//! assert_eq!(eop.leap_seconds(JulianDay::from_jd(2441317.5)).unwrap(), 10.0);
//! ```
use log::debug;

use crate::{
    bulletin::{
        fields::Record,
        layout::{
            DualColumn, FractionalYearLayout, DELTAT_DATA, DELTAT_PREDS, FINALS_ALL,
            HISTORIC_DELTAT,
        },
        locator::{
            clamp_window, daily_pointer, half_yearly_pointer, locate_window, monthly_pointer,
            quarterly_pointer, InterpolationWindow,
        },
        store::{BulletinLines, BulletinStore},
        BulletinFile,
    },
    calendar::{cal_to_jd, jd_to_cal},
    config::IersConfig,
    constants::{ArcSec, Seconds, DEFAULT_HALF_WIDTH, HISTORIC_DELTA_T_BOUNDARY_JD, JD},
    iers_errors::IersError,
    interpolation::{lagrange_interp, Sample},
    leap_seconds::LeapSecondTable,
    time::JulianDay,
};

/// Earth orientation parameters read from a [`BulletinStore`].
///
/// The engine holds no parsed state: each query reads the current content of its source through
/// the store, so an update of the files is visible to the next query.
#[derive(Debug, Clone)]
pub struct EarthOrientation<S> {
    store: S,
    half_width: usize,
}

impl<S: BulletinStore> EarthOrientation<S> {
    /// Create an engine over `store`, taking the interpolation half-width from `config`.
    pub fn new(store: S, config: &IersConfig) -> Self {
        EarthOrientation {
            store,
            half_width: config.half_width,
        }
    }

    /// Create an engine over `store` with the default half-width of five records.
    pub fn from_store(store: S) -> Self {
        EarthOrientation {
            store,
            half_width: DEFAULT_HALF_WIDTH,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn half_width(&self) -> usize {
        self.half_width
    }

    /// UT1 − UTC at `t`, in seconds.
    ///
    /// Arguments
    /// ---------
    /// * `t`: query instant
    ///
    /// Return
    /// ------
    /// * `Ok(Some(dut1))` interpolated over the daily records of `finals.all`, the final
    ///   (Bulletin B) value of a record being preferred to its predicted (Bulletin A) one
    /// * `Ok(None)` when `finals.all` does not cover `t`
    ///
    /// See also
    /// --------
    /// * [`EarthOrientation::pole_x`], [`EarthOrientation::pole_y`] – same lookup on the pole columns
    pub fn dut1(&self, t: JulianDay) -> Result<Option<Seconds>, IersError> {
        self.finals_value(t, FINALS_ALL.dut1)
    }

    /// x coordinate of the celestial pole at `t`, in arcseconds.
    pub fn pole_x(&self, t: JulianDay) -> Result<Option<ArcSec>, IersError> {
        self.finals_value(t, FINALS_ALL.pole_x)
    }

    /// y coordinate of the celestial pole at `t`, in arcseconds.
    pub fn pole_y(&self, t: JulianDay) -> Result<Option<ArcSec>, IersError> {
        self.finals_value(t, FINALS_ALL.pole_y)
    }

    fn finals_value(&self, t: JulianDay, dual: DualColumn) -> Result<Option<f64>, IersError> {
        let file = FINALS_ALL.file;
        let lines = self.store.open(file)?;
        let Some(max_line) = lines.max_line() else {
            return Ok(None);
        };

        let first_mjd = record(&lines, file, 0)?.required_f64(FINALS_ALL.mjd)?.floor() as i64;
        let mjd = t.mjd();
        let Some(pointer) = daily_pointer(mjd, first_mjd) else {
            debug!("{file}: MJD {mjd} precedes the first record (MJD {first_mjd})");
            return Ok(None);
        };
        // line pointer + 1 holds the day of the query
        if pointer + 1 > max_line as i64 {
            debug!("{file}: MJD {mjd} is after the last record");
            return Ok(None);
        }
        let Some(window) = clamp_window(pointer, self.half_width, 0, max_line) else {
            return Ok(None);
        };
        debug!("{file}: MJD {mjd} -> lines {:?}", window.lines());

        let samples = window_samples(&lines, file, window, |rec| {
            let x = rec.required_f64(FINALS_ALL.mjd)?;
            Ok(rec.final_or_predicted(dual)?.map(|y| Sample::new(x, y)))
        })?;

        match samples {
            Some(samples) => lagrange_interp(mjd, &samples).map(Some),
            None => {
                debug!("{file}: a record around MJD {mjd} has neither a final nor a predicted value");
                Ok(None)
            }
        }
    }

    /// ΔT = TT − UT1 at `t`, in seconds.
    ///
    /// The source depends on the date:
    /// 1. before 1973-02-01 (JD 2441714.5), the half-yearly `historic_deltat.data`,
    /// 2. after the last usable record of `deltat.data`, the quarterly predictions of `deltat.preds`,
    /// 3. otherwise the monthly observed values of `deltat.data`.
    ///
    /// Return
    /// ------
    /// * `Ok(Some(delta_t))` interpolated over the selected source
    /// * `Ok(None)` when `t` lies before the first record of the selected source
    /// * [`IersError::NoDataAvailable`] when `t` lies beyond the last prediction
    pub fn delta_t(&self, t: JulianDay) -> Result<Option<Seconds>, IersError> {
        let jd = t.jd();
        if jd < HISTORIC_DELTA_T_BOUNDARY_JD {
            debug!("delta_t({t}): historic table");
            return self.historic_delta_t(t);
        }

        match self.last_delta_t_jd()? {
            Some(last) if jd > last => {
                debug!("delta_t({t}): after JD {last}, predictions");
                self.predicted_delta_t(t)
            }
            _ => {
                debug!("delta_t({t}): observed values");
                self.observed_delta_t(t)
            }
        }
    }

    /// Julian Day of the last usable record of `deltat.data`.
    ///
    /// ΔT queries after this instant are answered from the predictions.
    ///
    /// Return
    /// ------
    /// * `Ok(None)` if the file holds fewer than two records
    pub fn last_delta_t_jd(&self) -> Result<Option<JD>, IersError> {
        let lines = self.store.open(DELTAT_DATA.file)?;
        match lines.max_line() {
            Some(max_line) if max_line > DELTAT_DATA.first_record => {
                let rec = record(&lines, DELTAT_DATA.file, max_line - 1)?;
                monthly_record_jd(&rec).map(Some)
            }
            _ => Ok(None),
        }
    }

    fn observed_delta_t(&self, t: JulianDay) -> Result<Option<Seconds>, IersError> {
        let (dj1, dj2) = t.split();
        let date = jd_to_cal(dj1, dj2)?;
        let pointer = monthly_pointer(date.year(), date.month());

        let file = DELTAT_DATA.file;
        let lines = self.store.open(file)?;
        let window = lines.max_line().and_then(|max_line| {
            locate_window(pointer, self.half_width, DELTAT_DATA.first_record, max_line)
        });
        let Some(window) = window else {
            debug!("{file}: no window for {t} (pointer {pointer})");
            return Ok(None);
        };
        debug!("{file}: {t} -> lines {:?}", window.lines());

        let samples = window_samples(&lines, file, window, |rec| {
            let x = monthly_record_jd(&rec)?;
            let y = rec.required_f64(DELTAT_DATA.value)?;
            Ok(Some(Sample::new(x, y)))
        })?;
        interpolate(t.jd(), samples)
    }

    fn historic_delta_t(&self, t: JulianDay) -> Result<Option<Seconds>, IersError> {
        let (dj1, dj2) = t.split();
        let date = jd_to_cal(dj1, dj2)?;
        let pointer = half_yearly_pointer(date.year());

        let layout = HISTORIC_DELTAT;
        let lines = self.store.open(layout.file)?;
        let window = lines.max_line().and_then(|max_line| {
            locate_window(pointer, self.half_width, layout.first_record, max_line)
        });
        let Some(window) = window else {
            debug!("{}: no window for {t} (pointer {pointer})", layout.file);
            return Ok(None);
        };
        debug!("{}: {t} -> lines {:?}", layout.file, window.lines());

        let samples = window_samples(&lines, layout.file, window, |rec| {
            fractional_year_sample(&rec, &layout, half_year_month).map(Some)
        })?;
        interpolate(t.jd(), samples)
    }

    fn predicted_delta_t(&self, t: JulianDay) -> Result<Option<Seconds>, IersError> {
        let layout = DELTAT_PREDS;
        let lines = self.store.open(layout.file)?;
        let Some(max_line) = lines.max_line().filter(|&m| m > layout.first_record) else {
            debug!("{}: no prediction records", layout.file);
            return Ok(None);
        };

        let last_record = record(&lines, layout.file, max_line)?;
        let last = fractional_year_sample(&last_record, &layout, quarter_month)?;
        if t.jd() > last.x {
            return Err(IersError::NoDataAvailable(t.jd()));
        }

        let first_year =
            record(&lines, layout.file, layout.first_record)?.required_f64(layout.year)?;
        let (dj1, dj2) = t.split();
        let date = jd_to_cal(dj1, dj2)?;
        let pointer = quarterly_pointer(date.year(), first_year);

        let Some(window) = locate_window(pointer, self.half_width, layout.first_record, max_line)
        else {
            debug!("{}: no window for {t} (pointer {pointer})", layout.file);
            return Ok(None);
        };
        debug!("{}: {t} -> lines {:?}", layout.file, window.lines());

        let samples = window_samples(&lines, layout.file, window, |rec| {
            fractional_year_sample(&rec, &layout, quarter_month).map(Some)
        })?;
        interpolate(t.jd(), samples)
    }

    /// Parse the leap second table from `tai-utc.dat`.
    pub fn leap_second_table(&self) -> Result<LeapSecondTable, IersError> {
        let lines = self.store.open(BulletinFile::TaiUtc)?;
        LeapSecondTable::parse(&lines)
    }

    /// Accumulated leap seconds (tabulated TAI − UTC) at `t`.
    ///
    /// Return
    /// ------
    /// * the offset of the last table entry effective at or before `t`, `0` before the first entry
    ///
    /// See also
    /// --------
    /// * [`EarthOrientation::tai_minus_utc`] – includes the drift of the pre-1972 entries
    pub fn leap_seconds(&self, t: JulianDay) -> Result<Seconds, IersError> {
        Ok(self.leap_second_table()?.offset_at(t.jd()))
    }

    /// TAI − UTC at `t`, including the drift term of the pre-1972 entries.
    pub fn tai_minus_utc(&self, t: JulianDay) -> Result<Seconds, IersError> {
        Ok(self.leap_second_table()?.tai_minus_utc(t.jd()))
    }
}

fn record<'a>(
    lines: &'a BulletinLines,
    file: BulletinFile,
    index: usize,
) -> Result<Record<'a>, IersError> {
    lines
        .line(index)
        .map(|text| Record::new(file, index, text))
        .ok_or_else(|| IersError::MalformedDataset(format!("{file} has no line {index}")))
}

/// Samples of every record of the window, `None` as soon as one record has no value.
fn window_samples<F>(
    lines: &BulletinLines,
    file: BulletinFile,
    window: InterpolationWindow,
    mut sample: F,
) -> Result<Option<Vec<Sample>>, IersError>
where
    F: FnMut(Record<'_>) -> Result<Option<Sample>, IersError>,
{
    let samples = window
        .lines()
        .map(|i| sample(record(lines, file, i)?))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(samples.into_iter().collect())
}

fn interpolate(x: f64, samples: Option<Vec<Sample>>) -> Result<Option<f64>, IersError> {
    samples
        .map(|samples| lagrange_interp(x, &samples))
        .transpose()
}

/// Julian Day of a `deltat.data` record from its year, month and day fields.
fn monthly_record_jd(rec: &Record<'_>) -> Result<JD, IersError> {
    let year = rec.required_i32(DELTAT_DATA.year)?;
    let month = rec.required_i32(DELTAT_DATA.month)?;
    let day = rec.required_i32(DELTAT_DATA.day)?;
    calendar_jd(rec, year, month, day)
}

fn calendar_jd(rec: &Record<'_>, year: i32, month: i32, day: i32) -> Result<JD, IersError> {
    let (Ok(month), Ok(day)) = (u32::try_from(month), u32::try_from(day)) else {
        return Err(IersError::MalformedRecord {
            file: rec.file.file_name().to_string(),
            line: rec.index,
            field: "date",
            text: rec.text.trim().to_string(),
        });
    };
    let (djm0, djm) = cal_to_jd(year, month, day)?;
    Ok(djm0 + djm)
}

/// Month of a half-yearly record: whole years fall in January, `.5` years in June.
fn half_year_month(fraction: f64) -> Option<u32> {
    if fraction == 0.0 {
        Some(1)
    } else if fraction == 0.5 {
        Some(6)
    } else {
        None
    }
}

/// Month of a quarterly record, tested in order.
fn quarter_month(fraction: f64) -> Option<u32> {
    if fraction == 0.0 {
        Some(1)
    } else if fraction <= 0.25 {
        Some(3)
    } else if fraction <= 0.5 {
        Some(6)
    } else if fraction <= 0.75 {
        Some(9)
    } else {
        None
    }
}

/// Sample of a record indexed by fractional year, dated on the first day of its month.
fn fractional_year_sample(
    rec: &Record<'_>,
    layout: &FractionalYearLayout,
    month_of: fn(f64) -> Option<u32>,
) -> Result<Sample, IersError> {
    let fractional_year = rec.required_f64(layout.year)?;
    let year = fractional_year.floor();
    let Some(month) = month_of(fractional_year - year) else {
        return Err(IersError::MalformedRecord {
            file: rec.file.file_name().to_string(),
            line: rec.index,
            field: layout.year.name,
            text: rec.field(layout.year).to_string(),
        });
    };
    let x = calendar_jd(rec, year as i32, month as i32, 1)?;
    let y = rec.required_f64(layout.value)?;
    Ok(Sample::new(x, y))
}
