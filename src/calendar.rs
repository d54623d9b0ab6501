//! # Gregorian calendar ↔ Julian Day
//!
//! Pure conversions between proleptic Gregorian calendar dates and two-part Julian Day
//! counts. The bulletins index their records by calendar date (year/month/day or fractional
//! year) while queries arrive as Julian Days, so both directions are needed by the record
//! locator.
//!
//! ## Conventions
//! -----------------
//! * Julian Days are handled as a pair `(dj1, dj2)` whose sum is the date. [`cal_to_jd`]
//!   always returns `(2400000.5, mjd)`.
//! * The calendar is the proleptic Gregorian one; year 0 exists and negative years are
//!   accepted down to [`MIN_CALENDAR_YEAR`].
//! * Day fractions are measured from midnight, `0 ≤ fraction < 1`.
//!
//! ## See also
//! ------------
//! * [`crate::time::JulianDay::split`] – two-part form of a query instant.
use crate::{
    constants::{JDTOMJD, MAX_JULIAN_DAY, MIN_CALENDAR_YEAR, MIN_JULIAN_DAY, MJD},
    iers_errors::{CalendarField, IersError},
};

/// Month lengths of a common year
const MONTH_DAYS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// A Gregorian calendar date with a day fraction.
///
/// Values are only produced by [`jd_to_cal`], which guarantees `1 ≤ month ≤ 12`,
/// a valid day of month and `0 ≤ fraction < 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CalendarDate {
    year: i32,
    month: u32,
    day: u32,
    fraction: f64,
}

impl CalendarDate {
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Fraction of the day elapsed since midnight.
    pub fn fraction(&self) -> f64 {
        self.fraction
    }
}

/// `true` when `year` is a Gregorian leap year.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days of `month` in `year`, or `None` for a month outside 1–12.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let base = *MONTH_DAYS.get(month.checked_sub(1)? as usize)?;
    Some(if month == 2 && is_leap_year(year) {
        base + 1
    } else {
        base
    })
}

/// Convert a Gregorian calendar date to a two-part Julian Day.
///
/// Arguments
/// ---------
/// * `year`: calendar year, proleptic, not earlier than -4799
/// * `month`: month number 1–12
/// * `day`: day of month, checked against the month length (leap-year aware)
///
/// Return
/// ------
/// * `(2400000.5, mjd)` at 0h of the given date
/// * [`IersError::InvalidDate`] naming the rejected component otherwise
///
/// Formula
/// -------
/// Integer arithmetic of the Fliegel & Van Flandern algorithm, evaluated with truncating
/// division on the shifted year `year + (month - 14) / 12`.
pub fn cal_to_jd(year: i32, month: u32, day: u32) -> Result<(f64, MJD), IersError> {
    let invalid = |field| IersError::InvalidDate {
        field,
        year,
        month,
        day,
    };

    if year < MIN_CALENDAR_YEAR {
        return Err(invalid(CalendarField::Year));
    }
    let month_days = days_in_month(year, month).ok_or_else(|| invalid(CalendarField::Month))?;
    if day < 1 || day > month_days {
        return Err(invalid(CalendarField::Day));
    }

    let (iy, im, id) = (year as i64, month as i64, day as i64);
    let my = (im - 14) / 12;
    let iypmy = iy + my;

    let mjd = (1461 * (iypmy + 4800)) / 4 + (367 * (im - 2 - 12 * my)) / 12
        - (3 * ((iypmy + 4900) / 100)) / 4
        + id
        - 2432076;

    Ok((JDTOMJD, mjd as f64))
}

/// Convert a two-part Julian Day to a Gregorian calendar date.
///
/// Arguments
/// ---------
/// * `dj1`, `dj2`: the Julian Day is `dj1 + dj2`; any split is accepted, the larger part is
///   processed first to limit rounding
///
/// Return
/// ------
/// * the [`CalendarDate`] with `0 ≤ fraction < 1`
/// * [`IersError::OutOfRange`] when `dj1 + dj2` lies outside `[-68569.5, 1e9]`
///
/// Remarks
/// -------
/// The fractional parts of both halves are summed separately from the integer parts. When
/// that sum is negative the fraction wraps into `[0, 1)` and the integer day moves back by
/// one.
pub fn jd_to_cal(dj1: f64, dj2: f64) -> Result<CalendarDate, IersError> {
    let dj = dj1 + dj2;
    if !(MIN_JULIAN_DAY..=MAX_JULIAN_DAY).contains(&dj) {
        return Err(IersError::OutOfRange(dj));
    }

    // big then small, re-aligned to midnight
    let (d1, mut d2) = if dj1 >= dj2 { (dj1, dj2) } else { (dj2, dj1) };
    d2 -= 0.5;

    let f1 = d1 % 1.0;
    let f2 = d2 % 1.0;
    let mut f = (f1 + f2) % 1.0;
    if f < 0.0 {
        f += 1.0;
    }
    let d = (d1 - f1).round() + (d2 - f2).round() + (f1 + f2 - f).round();
    let jd = d.round() as i64 + 1;

    let mut l = jd + 68569;
    let n = (4 * l) / 146097;
    l -= (146097 * n + 3) / 4;
    let i = (4000 * (l + 1)) / 1461001;
    l -= (1461 * i) / 4 - 31;
    let k = (80 * l) / 2447;
    let day = l - (2447 * k) / 80;
    l = k / 11;
    let month = k + 2 - 12 * l;
    let year = 100 * (n - 49) + i + l;

    Ok(CalendarDate {
        year: year as i32,
        month: month as u32,
        day: day as u32,
        fraction: f,
    })
}

#[cfg(test)]
mod calendar_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cal_to_jd_j2000() {
        let (djm0, djm) = cal_to_jd(2000, 1, 1).unwrap();
        assert_eq!(djm0, 2400000.5);
        assert_eq!(djm, 51544.0);
    }

    #[test]
    fn test_cal_to_jd_bulletin_epochs() {
        let (djm0, djm) = cal_to_jd(1973, 2, 1).unwrap();
        assert_eq!(djm0 + djm, 2441714.5);

        let (djm0, djm) = cal_to_jd(1905, 1, 1).unwrap();
        assert_eq!(djm0 + djm, 2416846.5);

        let (djm0, djm) = cal_to_jd(2021, 6, 1).unwrap();
        assert_eq!(djm0 + djm, 2459366.5);
    }

    #[test]
    fn test_cal_to_jd_negative_year() {
        // 4713 BC January 1 (Julian) is 4714 BC November 24 (Gregorian) = JD 0.5 - 0.5
        let (djm0, djm) = cal_to_jd(-4713, 11, 24).unwrap();
        assert_eq!(djm0 + djm, -0.5);
    }

    #[test]
    fn test_cal_to_jd_invalid() {
        assert_eq!(
            cal_to_jd(-4800, 1, 1),
            Err(IersError::InvalidDate {
                field: CalendarField::Year,
                year: -4800,
                month: 1,
                day: 1
            })
        );
        assert!(matches!(
            cal_to_jd(2000, 13, 1),
            Err(IersError::InvalidDate {
                field: CalendarField::Month,
                ..
            })
        ));
        assert!(matches!(
            cal_to_jd(2000, 0, 1),
            Err(IersError::InvalidDate {
                field: CalendarField::Month,
                ..
            })
        ));
        assert!(matches!(
            cal_to_jd(2001, 2, 29),
            Err(IersError::InvalidDate {
                field: CalendarField::Day,
                ..
            })
        ));
        assert!(matches!(
            cal_to_jd(1900, 2, 29),
            Err(IersError::InvalidDate {
                field: CalendarField::Day,
                ..
            })
        ));
        assert!(matches!(
            cal_to_jd(2000, 4, 0),
            Err(IersError::InvalidDate {
                field: CalendarField::Day,
                ..
            })
        ));
    }

    #[test]
    fn test_leap_days_accepted() {
        assert!(cal_to_jd(2000, 2, 29).is_ok());
        assert!(cal_to_jd(2024, 2, 29).is_ok());
        assert!(cal_to_jd(-4, 2, 29).is_ok());
    }

    #[test]
    fn test_jd_to_cal() {
        let date = jd_to_cal(2400000.5, 51544.75).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2000, 1, 1));
        assert_relative_eq!(date.fraction(), 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_jd_to_cal_single_part() {
        let date = jd_to_cal(2451545.0, 0.0).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2000, 1, 1));
        assert_relative_eq!(date.fraction(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_jd_to_cal_negative_fraction() {
        // parts whose fractions sum below zero must wrap and step back a day
        let date = jd_to_cal(2400000.5, -0.25).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (1858, 11, 16));
        assert_relative_eq!(date.fraction(), 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_jd_to_cal_out_of_range() {
        assert_eq!(jd_to_cal(-68570.0, 0.0), Err(IersError::OutOfRange(-68570.0)));
        assert_eq!(jd_to_cal(1e9, 1.0), Err(IersError::OutOfRange(1e9 + 1.0)));
        assert!(jd_to_cal(-68569.5, 0.0).is_ok());
    }

    #[test]
    fn test_round_trip() {
        for year in [-4799, -1000, -1, 0, 1, 1582, 1657, 1900, 1973, 2000, 2024, 2100, 9999] {
            for month in 1..=12 {
                let last = days_in_month(year, month).unwrap();
                for day in [1, 15, last] {
                    let (dj1, dj2) = cal_to_jd(year, month, day).unwrap();
                    let date = jd_to_cal(dj1, dj2).unwrap();
                    assert_eq!(
                        (date.year(), date.month(), date.day()),
                        (year, month, day),
                        "round trip of {year}-{month}-{day}"
                    );
                    assert_eq!(date.fraction(), 0.0);
                }
            }
        }
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2000, 2), Some(29));
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2023, 12), Some(31));
        assert_eq!(days_in_month(2023, 0), None);
        assert_eq!(days_in_month(2023, 13), None);
    }
}
