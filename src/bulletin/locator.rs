//! Record location inside a bulletin file.
//!
//! Each bulletin has a pointer formula mapping the query date to the approximate line of
//! the matching record. The pointer is then clamped so that a full window of `2·W`
//! consecutive records, `[p - W, p + W)`, fits inside the data lines of the file.
//!
//! Clamping near the ends of a file keeps the window full at the cost of an off-centre
//! interpolation there.
use std::ops::Range;

use crate::constants::{DELTA_T_DATA_FIRST_YEAR, HISTORIC_DELTA_T_FIRST_YEAR, MJD};

/// `2·half_width` consecutive line indices centred as near as possible on a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpolationWindow {
    center: usize,
    half_width: usize,
}

impl InterpolationWindow {
    pub fn center(&self) -> usize {
        self.center
    }

    pub fn half_width(&self) -> usize {
        self.half_width
    }

    /// Line indices of the window, `[center - W, center + W)`.
    pub fn lines(&self) -> Range<usize> {
        self.center - self.half_width..self.center + self.half_width
    }

    pub fn len(&self) -> usize {
        2 * self.half_width
    }

    pub fn is_empty(&self) -> bool {
        self.half_width == 0
    }
}

/// Clamp a pointer into a full window of the file.
///
/// Arguments
/// ---------
/// * `pointer`: approximate line of the query, possibly outside the file
/// * `half_width`: `W`, number of records on each side of the pointer
/// * `first_record`: index of the first data line (header lines come before it)
/// * `max_line`: index of the last data line
///
/// Return
/// ------
/// * the window, with `p < first_record + W` moved up to `first_record + W` and
///   `p + W > max_line` moved down to `max_line - W`
/// * `None` when the file holds fewer than `2·W` lines between `first_record` and `max_line`
pub fn clamp_window(
    pointer: i64,
    half_width: usize,
    first_record: usize,
    max_line: usize,
) -> Option<InterpolationWindow> {
    if half_width == 0 || max_line < first_record + 2 * half_width {
        return None;
    }

    let w = half_width as i64;
    let lower = (first_record + half_width) as i64;
    let upper = max_line as i64 - w;

    let mut p = pointer;
    if p < lower {
        p = lower;
    }
    if p + w > max_line as i64 {
        p = upper;
    }

    Some(InterpolationWindow {
        center: p as usize,
        half_width,
    })
}

/// Same as [`clamp_window`], but a negative pointer means the query predates the file
/// and yields `None`.
pub fn locate_window(
    pointer: i64,
    half_width: usize,
    first_record: usize,
    max_line: usize,
) -> Option<InterpolationWindow> {
    if pointer < 0 {
        return None;
    }
    clamp_window(pointer, half_width, first_record, max_line)
}

/// Pointer into `finals.all` (one record per day).
///
/// Arguments
/// ---------
/// * `mjd`: query MJD
/// * `first_mjd`: integer MJD of the first line of the file
///
/// Return
/// ------
/// * `floor(mjd) - first_mjd - 1`, or `None` when the query precedes the first record
pub fn daily_pointer(mjd: MJD, first_mjd: i64) -> Option<i64> {
    if mjd < first_mjd as f64 {
        return None;
    }
    Some(mjd.floor() as i64 - first_mjd - 1)
}

/// Pointer into `deltat.data` (one record per month from 1973-02-01).
pub fn monthly_pointer(year: i32, month: u32) -> i64 {
    (year as i64 - DELTA_T_DATA_FIRST_YEAR as i64) * 12 + month as i64 - 2
}

/// Pointer into `deltat.preds` (one record per quarter).
///
/// Arguments
/// ---------
/// * `year`: calendar year of the query
/// * `first_year`: fractional year of the first record of the file
///
/// Return
/// ------
/// * `(year - floor(first_year))·4 + q0 - 2` with `q0` the quarter of the first record
pub fn quarterly_pointer(year: i32, first_year: f64) -> i64 {
    let whole = first_year.floor();
    let quarter = ((first_year - whole) * 4.0).round() as i64;
    (year as i64 - whole as i64) * 4 + quarter - 2
}

/// Pointer into `historic_deltat.data` (two records per year from 1657).
pub fn half_yearly_pointer(year: i32) -> i64 {
    (year as i64 - HISTORIC_DELTA_T_FIRST_YEAR as i64) * 2 + 2
}
