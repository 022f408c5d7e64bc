// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar date ↔ Julian day conversion.
//!
//! Dates use astronomical year numbering (1 BC is year 0, 2 BC is year −1)
//! and carry the time of day as fractional hours.  Both directions are
//! total: out-of-range days or hours are carried arithmetically, never
//! rejected.  [`date_conversion`] is the checked variant.
//!
//! The forward direction treats January and February as months 13 and 14
//! of the preceding year so that the leap day falls at the end of the
//! counted year:
//!
//! ```text
//! JD = ⌊365.25 (y + 4716)⌋ + ⌊30.6001 (m + 1)⌋ + d + B − 1524.5 + h / 24
//! B  = 2 − ⌊y / 100⌋ + ⌊y / 400⌋      (Gregorian)
//! B  = 0                             (Julian)
//! ```
//!
//! All divisions are floored so that negative years stay on the same
//! day grid as positive ones.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};

use crate::constants::{SE_GREG_CAL, SE_JUL_CAL};
use crate::error::TimeError;
use crate::JulianDate;

// ═══════════════════════════════════════════════════════════════════════════
// CalendarSystem
// ═══════════════════════════════════════════════════════════════════════════

/// Intercalation rule governing a conversion.
///
/// The discriminants are the published selector values (`SE_JUL_CAL`,
/// `SE_GREG_CAL`) and must not change.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CalendarSystem {
    /// Leap year every fourth year.
    Julian = SE_JUL_CAL,
    /// Leap year every fourth year, except centuries not divisible by 400.
    #[default]
    Gregorian = SE_GREG_CAL,
}

impl CalendarSystem {
    /// The integer selector understood by external ephemeris libraries.
    #[inline]
    pub const fn flag(self) -> i32 {
        self as i32
    }

    /// Whether `year` (astronomical numbering) has a 29 February.
    pub const fn is_leap_year(self, year: i32) -> bool {
        match self {
            Self::Julian => year.rem_euclid(4) == 0,
            Self::Gregorian => {
                year.rem_euclid(4) == 0 && (year.rem_euclid(100) != 0 || year.rem_euclid(400) == 0)
            }
        }
    }

    /// Number of days in `month` of `year`, or `None` for a month outside 1–12.
    pub const fn days_in_month(self, year: i32, month: i32) -> Option<i32> {
        let days = match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if self.is_leap_year(year) => 29,
            2 => 28,
            _ => return None,
        };
        Some(days)
    }

    /// The calendar in civil use on a date: Julian before 1582-10-15,
    /// Gregorian from then on.
    ///
    /// Days 1582-10-05 … 1582-10-14 never existed; they are read as Gregorian.
    pub fn for_date(year: i32, month: i32, day: i32) -> Self {
        if (year, month, day) < (1582, 10, 15) {
            Self::Julian
        } else {
            Self::Gregorian
        }
    }

    /// The calendar in civil use at a Julian day (see [`Self::for_date`]).
    pub fn for_julian_day(jd: JulianDate) -> Self {
        if jd < JulianDate::GREGORIAN_REFORM {
            Self::Julian
        } else {
            Self::Gregorian
        }
    }
}

impl From<CalendarSystem> for i32 {
    #[inline]
    fn from(system: CalendarSystem) -> Self {
        system.flag()
    }
}

impl TryFrom<i32> for CalendarSystem {
    type Error = TimeError;

    fn try_from(flag: i32) -> Result<Self, Self::Error> {
        match flag {
            SE_JUL_CAL => Ok(Self::Julian),
            SE_GREG_CAL => Ok(Self::Gregorian),
            other => Err(TimeError::InvalidCalendarFlag(other)),
        }
    }
}

impl TryFrom<char> for CalendarSystem {
    type Error = TimeError;

    /// `'g'` / `'j'`, case-insensitive.
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_lowercase() {
            'j' => Ok(Self::Julian),
            'g' => Ok(Self::Gregorian),
            _ => Err(TimeError::InvalidCalendarChar(c)),
        }
    }
}

impl FromStr for CalendarSystem {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "j" | "julian" => Ok(Self::Julian),
            "g" | "gregorian" => Ok(Self::Gregorian),
            _ => Err(TimeError::InvalidCalendarName(s.to_owned())),
        }
    }
}

impl fmt::Display for CalendarSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Julian => f.write_str("julian"),
            Self::Gregorian => f.write_str("gregorian"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// CalendarDate
// ═══════════════════════════════════════════════════════════════════════════

/// A calendar date with the time of day in fractional hours.
///
/// `hour` may lie outside `[0, 24)` when it is the result of arithmetic;
/// conversions carry the excess into the day count.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalendarDate {
    /// Astronomical year: 1 BC is `0`, 2 BC is `-1`.
    pub year: i32,
    /// Month, `1..=12`.
    pub month: i32,
    /// Day of the month.
    pub day: i32,
    /// Time of day in hours since midnight.
    pub hour: f64,
}

impl CalendarDate {
    /// Date from its components; nothing is validated.
    #[inline]
    pub const fn new(year: i32, month: i32, day: i32, hour: f64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
        }
    }

    /// Build from a wall-clock time of day.
    pub fn from_hms(year: i32, month: i32, day: i32, hour: i32, minute: i32, second: f64) -> Self {
        Self::new(
            year,
            month,
            day,
            hour as f64 + minute as f64 / 60.0 + second / 3600.0,
        )
    }

    /// `(year, month, day)` without the time of day.
    #[inline]
    pub const fn ymd(&self) -> (i32, i32, i32) {
        (self.year, self.month, self.day)
    }

    /// Split the fractional hour into `(hour, minute, second)`.
    pub fn split_hour(&self) -> (i32, i32, f64) {
        let h = self.hour.floor();
        let minutes = (self.hour - h) * 60.0;
        let m = minutes.floor();
        (h as i32, m as i32, (minutes - m) * 60.0)
    }

    /// Julian day of this date under `system`.
    #[inline]
    pub fn to_julian_day(&self, system: CalendarSystem) -> JulianDate {
        to_julian_day(*self, system)
    }

    /// Proleptic Gregorian `NaiveDateTime` for this date.
    ///
    /// Julian-calendar dates are first mapped onto the Gregorian day grid;
    /// `hour` is added as an offset from midnight so overflow is carried.
    /// Returns `None` for an invalid day or a year outside chrono's range.
    pub fn to_naive_datetime(&self, system: CalendarSystem) -> Option<NaiveDateTime> {
        let (year, month, day) = match system {
            CalendarSystem::Gregorian => self.ymd(),
            CalendarSystem::Julian => {
                let midnight = Self::new(self.year, self.month, self.day, 0.0);
                to_calendar_date(to_julian_day(midnight, system), CalendarSystem::Gregorian).ymd()
            }
        };
        let midnight = NaiveDate::from_ymd_opt(
            year,
            u32::try_from(month).ok()?,
            u32::try_from(day).ok()?,
        )?
        .and_hms_opt(0, 0, 0)?;
        let offset = chrono::Duration::nanoseconds((self.hour * 3.6e12).round() as i64);
        midnight.checked_add_signed(offset)
    }
}

impl From<NaiveDateTime> for CalendarDate {
    /// Read a chrono timestamp as a proleptic Gregorian date.
    fn from(dt: NaiveDateTime) -> Self {
        let seconds = dt.second() as f64 + dt.nanosecond() as f64 / 1e9;
        Self::from_hms(
            dt.year(),
            dt.month() as i32,
            dt.day() as i32,
            dt.hour() as i32,
            dt.minute() as i32,
            seconds,
        )
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = self.split_hour();
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:06.3}",
            self.year, self.month, self.day, h, m, s
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Conversions
// ═══════════════════════════════════════════════════════════════════════════

/// Julian day of a calendar date.
///
/// ```rust
/// use swecal::{to_julian_day, CalendarDate, CalendarSystem};
///
/// let jd = to_julian_day(CalendarDate::new(2000, 1, 1, 12.0), CalendarSystem::Gregorian);
/// assert_eq!(jd.value(), 2_451_545.0);
/// ```
#[inline]
pub fn to_julian_day(date: CalendarDate, system: CalendarSystem) -> JulianDate {
    JulianDate::new(julian_day_value(&date, system))
}

/// Calendar date of a Julian day, with `hour` in `[0, 24)`.
#[inline]
pub fn to_calendar_date(jd: JulianDate, system: CalendarSystem) -> CalendarDate {
    calendar_date_from_value(jd.value(), system)
}

/// Checked calendar → Julian day conversion.
///
/// Rejects a month outside 1–12, a day outside the month under `system`'s
/// leap rule, and an hour outside `[0, 24)`.
///
/// ```rust
/// use swecal::{date_conversion, CalendarDate, CalendarSystem};
///
/// let leap_day = CalendarDate::new(1900, 2, 29, 0.0);
/// assert!(date_conversion(leap_day, CalendarSystem::Julian).is_ok());
/// assert!(date_conversion(leap_day, CalendarSystem::Gregorian).is_err());
/// ```
pub fn date_conversion(date: CalendarDate, system: CalendarSystem) -> Result<JulianDate, TimeError> {
    let invalid = || TimeError::InvalidDate {
        year: date.year,
        month: date.month,
        day: date.day,
    };
    let month_len = system
        .days_in_month(date.year, date.month)
        .ok_or_else(invalid)?;
    if !(1..=month_len).contains(&date.day) {
        return Err(invalid());
    }
    if !(0.0..24.0).contains(&date.hour) {
        return Err(TimeError::HourOutOfRange(date.hour));
    }
    Ok(to_julian_day(date, system))
}

/// Day of the week of a Julian day; the civil day begins at midnight
/// (JD x.5).
#[inline]
pub fn day_of_week(jd: JulianDate) -> Weekday {
    weekday_from_value(jd.value())
}

pub(crate) fn julian_day_value(date: &CalendarDate, system: CalendarSystem) -> f64 {
    let (mut y, mut m) = (i64::from(date.year), i64::from(date.month));
    if m <= 2 {
        y -= 1;
        m += 12;
    }
    let b = match system {
        CalendarSystem::Gregorian => {
            let a = y.div_euclid(100);
            2 - a + a.div_euclid(4)
        }
        CalendarSystem::Julian => 0,
    };
    (365.25 * (y + 4716) as f64).floor()
        + (30.6001 * (m + 1) as f64).floor()
        + (i64::from(date.day) + b) as f64
        - 1524.5
        + date.hour / 24.0
}

pub(crate) fn calendar_date_from_value(jd: f64, system: CalendarSystem) -> CalendarDate {
    let z = (jd + 0.5).floor();
    let f = jd + 0.5 - z;
    let a = match system {
        CalendarSystem::Gregorian => {
            let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
            z + 1.0 + alpha - (alpha / 4.0).floor()
        }
        CalendarSystem::Julian => z,
    };
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = b - d - (30.6001 * e).floor();
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };
    CalendarDate::new(year as i32, month as i32, day as i32, f * 24.0)
}

pub(crate) fn weekday_from_value(jd: f64) -> Weekday {
    const FROM_MONDAY: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];
    let day = (jd + 0.5).floor() as i64;
    FROM_MONDAY[day.rem_euclid(7) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const GREG: CalendarSystem = CalendarSystem::Gregorian;
    const JUL: CalendarSystem = CalendarSystem::Julian;

    fn assert_date(date: CalendarDate, ymd: (i32, i32, i32), hour: f64) {
        assert_eq!(date.ymd(), ymd, "date {date}");
        assert!(
            (date.hour - hour).abs() < 1e-6,
            "hour {} expected {}",
            date.hour,
            hour
        );
    }

    #[test]
    fn j2000_calibration() {
        let jd = to_julian_day(CalendarDate::new(2000, 1, 1, 12.0), GREG);
        assert_eq!(jd.value(), 2_451_545.0);
        assert_date(to_calendar_date(JulianDate::J2000, GREG), (2000, 1, 1), 12.0);
    }

    #[test]
    fn sputnik_launch() {
        // 1957 October 4.81
        let jd = to_julian_day(CalendarDate::new(1957, 10, 4, 0.81 * 24.0), GREG);
        assert!((jd.value() - 2_436_116.31).abs() < 1e-9);
        assert_date(
            to_calendar_date(JulianDate::new(2_436_116.31), GREG),
            (1957, 10, 4),
            0.81 * 24.0,
        );
    }

    #[test]
    fn julian_calendar_reference_dates() {
        let jd = to_julian_day(CalendarDate::new(333, 1, 27, 12.0), JUL);
        assert_eq!(jd.value(), 1_842_713.0);
        assert_date(to_calendar_date(jd, JUL), (333, 1, 27), 12.0);

        // 585 BC, May 28.63
        assert_date(
            to_calendar_date(JulianDate::new(1_507_900.13), JUL),
            (-584, 5, 28),
            0.63 * 24.0,
        );
    }

    #[test]
    fn epoch_of_the_count() {
        let jd = to_julian_day(CalendarDate::new(-4712, 1, 1, 12.0), JUL);
        assert_eq!(jd.value(), 0.0);
        assert_date(to_calendar_date(JulianDate::new(0.0), JUL), (-4712, 1, 1), 12.0);
    }

    #[test]
    fn gregorian_reform_is_contiguous() {
        let last_julian = to_julian_day(CalendarDate::new(1582, 10, 4, 0.0), JUL);
        let first_gregorian = to_julian_day(CalendarDate::new(1582, 10, 15, 0.0), GREG);
        assert_eq!(first_gregorian.value() - last_julian.value(), 1.0);
    }

    #[test]
    fn century_leap_rule_differs() {
        let feb28 = CalendarDate::new(1900, 2, 28, 0.0);
        let mar1 = CalendarDate::new(1900, 3, 1, 0.0);
        assert_eq!(
            to_julian_day(mar1, GREG).value() - to_julian_day(feb28, GREG).value(),
            1.0
        );
        assert_eq!(
            to_julian_day(mar1, JUL).value() - to_julian_day(feb28, JUL).value(),
            2.0
        );
        let y2000 = to_julian_day(CalendarDate::new(2000, 3, 1, 0.0), GREG).value()
            - to_julian_day(CalendarDate::new(2000, 2, 28, 0.0), GREG).value();
        assert_eq!(y2000, 2.0);
    }

    #[test]
    fn roundtrip_across_both_calendars() {
        for system in [JUL, GREG] {
            for year in (-4000..=3000).step_by(53) {
                for month in 1..=12 {
                    let last = system.days_in_month(year, month).unwrap();
                    for day in [1, 15, last] {
                        let date = CalendarDate::new(year, month, day, 6.0 + 18.0 / 60.0);
                        let back = to_calendar_date(to_julian_day(date, system), system);
                        assert_date(back, date.ymd(), date.hour);
                    }
                }
            }
        }
    }

    #[test]
    fn strictly_increasing_day_by_day() {
        for system in [JUL, GREG] {
            let mut prev = f64::NEG_INFINITY;
            for year in [-1, 0, 1, 1899, 1900, 2000] {
                for month in 1..=12 {
                    for day in 1..=system.days_in_month(year, month).unwrap() {
                        let jd = to_julian_day(CalendarDate::new(year, month, day, 0.0), system);
                        assert!(jd.value() > prev);
                        prev = jd.value();
                    }
                }
            }
        }
    }

    #[test]
    fn hour_overflow_carries_into_the_date() {
        let overflow = to_julian_day(CalendarDate::new(2000, 12, 31, 30.0), GREG);
        let normal = to_julian_day(CalendarDate::new(2001, 1, 1, 6.0), GREG);
        assert_eq!(overflow, normal);

        let underflow = to_julian_day(CalendarDate::new(2000, 3, 1, -6.0), GREG);
        let normal = to_julian_day(CalendarDate::new(2000, 2, 29, 18.0), GREG);
        assert_eq!(underflow, normal);
    }

    #[test]
    fn out_of_range_day_is_carried() {
        let carried = to_julian_day(CalendarDate::new(2001, 2, 30, 0.0), GREG);
        let normal = to_julian_day(CalendarDate::new(2001, 3, 2, 0.0), GREG);
        assert_eq!(carried, normal);
    }

    #[test]
    fn date_conversion_validates() {
        assert!(date_conversion(CalendarDate::new(2024, 2, 29, 0.0), GREG).is_ok());
        assert!(matches!(
            date_conversion(CalendarDate::new(2023, 2, 29, 0.0), GREG),
            Err(TimeError::InvalidDate { day: 29, .. })
        ));
        assert!(matches!(
            date_conversion(CalendarDate::new(2023, 13, 1, 0.0), GREG),
            Err(TimeError::InvalidDate { month: 13, .. })
        ));
        assert!(date_conversion(CalendarDate::new(2023, 4, 0, 0.0), GREG).is_err());
        assert!(matches!(
            date_conversion(CalendarDate::new(2023, 4, 1, 24.0), GREG),
            Err(TimeError::HourOutOfRange(_))
        ));
        let ok = date_conversion(CalendarDate::new(2000, 1, 1, 12.0), GREG).unwrap();
        assert_eq!(ok, JulianDate::J2000);
    }

    #[test]
    fn weekdays() {
        assert_eq!(day_of_week(JulianDate::J2000), Weekday::Sat);
        // 1954 June 30
        assert_eq!(day_of_week(JulianDate::new(2_434_923.5)), Weekday::Wed);
        // JD 0 is a Monday noon; the day before is a Sunday.
        assert_eq!(day_of_week(JulianDate::new(0.0)), Weekday::Mon);
        assert_eq!(day_of_week(JulianDate::new(-1.0)), Weekday::Sun);
    }

    #[test]
    fn calendar_flags() {
        assert_eq!(CalendarSystem::Julian.flag(), 0);
        assert_eq!(CalendarSystem::Gregorian.flag(), 1);
        assert_eq!(CalendarSystem::try_from(1).unwrap(), GREG);
        assert!(matches!(
            CalendarSystem::try_from(2),
            Err(TimeError::InvalidCalendarFlag(2))
        ));
        assert_eq!(CalendarSystem::try_from('J').unwrap(), JUL);
        assert!(CalendarSystem::try_from('x').is_err());
        assert_eq!("Gregorian".parse::<CalendarSystem>().unwrap(), GREG);
        assert_eq!(CalendarSystem::default(), GREG);
    }

    #[test]
    fn historical_calendar_selection() {
        assert_eq!(CalendarSystem::for_date(1582, 10, 4), JUL);
        assert_eq!(CalendarSystem::for_date(1582, 10, 15), GREG);
        assert_eq!(
            CalendarSystem::for_julian_day(JulianDate::new(2_299_160.0)),
            JUL
        );
        assert_eq!(CalendarSystem::for_julian_day(JulianDate::J2000), GREG);
    }

    #[test]
    fn extreme_years_do_not_overflow() {
        for system in [JUL, GREG] {
            let last = to_julian_day(CalendarDate::new(i32::MAX, 6, 1, 0.0), system).value();
            let before = to_julian_day(CalendarDate::new(i32::MAX - 1, 6, 1, 0.0), system).value();
            assert!((365.0..=366.0).contains(&(last - before)), "{system}");

            let first = to_julian_day(CalendarDate::new(i32::MIN, 1, 1, 0.0), system).value();
            let next = to_julian_day(CalendarDate::new(i32::MIN + 1, 1, 1, 0.0), system).value();
            assert!((365.0..=366.0).contains(&(next - first)), "{system}");

            let far_day = to_julian_day(CalendarDate::new(2000, 1, i32::MAX, 0.0), system);
            assert!(far_day.value().is_finite());
        }
    }

    #[test]
    fn split_hour_and_from_hms() {
        let date = CalendarDate::from_hms(2024, 3, 20, 3, 6, 30.0);
        let (h, m, s) = date.split_hour();
        assert_eq!((h, m), (3, 6));
        assert!((s - 30.0).abs() < 1e-6);
    }

    #[test]
    fn chrono_interop() {
        let dt = NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let date = CalendarDate::from(dt);
        assert_eq!(date, CalendarDate::new(2000, 1, 1, 12.0));
        assert_eq!(date.to_naive_datetime(GREG), Some(dt));

        // 1582-10-04 Julian is the day before 1582-10-15 Gregorian.
        let julian = CalendarDate::new(1582, 10, 4, 0.0);
        let expected = NaiveDate::from_ymd_opt(1582, 10, 14)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(julian.to_naive_datetime(JUL), Some(expected));

        assert_eq!(CalendarDate::new(2001, 2, 30, 0.0).to_naive_datetime(GREG), None);
    }
}
