// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! UTC ↔ Julian day with leap seconds.
//!
//! Three regimes:
//!
//! * **Before 1972-01-01** UTC had no leap seconds; the civil time is read
//!   as UT1 and TT follows from ΔT.
//! * **While the leap-second table is valid**, `TAI − UTC = 10 s + n`,
//!   where `n` counts the leap seconds inserted before the date, and
//!   `TT = TAI + 32.184 s`.  UT1 is taken equal to UTC (|DUT1| < 0.9 s).
//! * **After the table expires** the leap seconds to come are unknown; the
//!   civil time is read as UT1 again and a warning is logged.
//!
//! ```rust
//! use swecal::utc::{utc_to_jd, LeapSeconds, UtcTimestamp};
//! use swecal::CalendarSystem;
//!
//! let leap = LeapSeconds::builtin();
//! let ts = UtcTimestamp::new(2016, 12, 31, 23, 59, 60.0);
//! let jd = utc_to_jd(&ts, CalendarSystem::Gregorian, &leap).unwrap();
//! assert!(jd.tt.value() > jd.ut1.value());
//! ```

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use tracing::{debug, warn};

use crate::calendar::{
    date_conversion, to_calendar_date, to_julian_day, CalendarDate, CalendarSystem,
};
use crate::error::TimeError;
use crate::instant::Time;
use crate::scales::{TAI, TT, UT};
use crate::JulianDate;

/// `TAI − UTC` on 1972-01-01, in seconds.
const NLEAP_INIT: f64 = 10.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Days at whose end a leap second was inserted, as `YYYYMMDD`.
const BUILTIN_LEAP_DAYS: [i32; 27] = [
    19720630, 19721231, 19731231, 19741231, 19751231, 19761231, 19771231, 19781231, 19791231,
    19810630, 19820630, 19830630, 19850630, 19871231, 19891231, 19901231, 19920630, 19930630,
    19940630, 19951231, 19970630, 19981231, 20051231, 20081231, 20120630, 20150630, 20161231,
];

/// Last day the built-in table is known to be complete (IERS Bulletin C 70).
const BUILTIN_EXPIRES: i32 = 20260628;

// ═══════════════════════════════════════════════════════════════════════════
// UtcTimestamp
// ═══════════════════════════════════════════════════════════════════════════

/// Broken-down UTC time.  `second` lies in `[60, 61)` during a leap second.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UtcTimestamp {
    /// Astronomical year.
    pub year: i32,
    /// Month, `1..=12`.
    pub month: i32,
    /// Day of the month.
    pub day: i32,
    /// Hour, `0..=23`.
    pub hour: i32,
    /// Minute, `0..=59`.
    pub minute: i32,
    /// Seconds including the fraction; `[60, 61)` inside a leap second.
    pub second: f64,
}

impl UtcTimestamp {
    /// Timestamp from its components; validated only by the conversions.
    pub const fn new(year: i32, month: i32, day: i32, hour: i32, minute: i32, second: f64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    fn from_date_hour(date: CalendarDate) -> Self {
        let (hour, minute, second) = date.split_hour();
        Self::new(date.year, date.month, date.day, hour, minute, second)
    }

    /// The date with the time of day as fractional hours.
    pub fn to_calendar_date(&self) -> CalendarDate {
        CalendarDate::from_hms(
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
        )
    }

    /// As a chrono timestamp; a leap second maps onto chrono's
    /// `nanosecond >= 1_000_000_000` convention.
    ///
    /// The seconds are rounded to the nanosecond before splitting, so a
    /// value that rounds up to a whole minute carries into the next minute.
    /// Returns `None` for an invalid date or time.
    pub fn to_chrono(&self) -> Option<DateTime<Utc>> {
        if !(0.0..61.0).contains(&self.second) {
            return None;
        }
        let date = NaiveDate::from_ymd_opt(
            self.year,
            u32::try_from(self.month).ok()?,
            u32::try_from(self.day).ok()?,
        )?;
        let hour = u32::try_from(self.hour).ok()?;
        let minute = u32::try_from(self.minute).ok()?;

        let in_leap_second = self.second >= 60.0;
        let seconds = if in_leap_second {
            self.second - 1.0
        } else {
            self.second
        };
        let elapsed_ns = (seconds * 1e9).round() as i64;
        let naive = if in_leap_second && elapsed_ns < 60 * NANOS_PER_SECOND {
            let nanos = u32::try_from(elapsed_ns - 59 * NANOS_PER_SECOND).ok()?;
            date.and_hms_nano_opt(hour, minute, 59, nanos + 1_000_000_000)?
        } else {
            date.and_hms_opt(hour, minute, 0)?
                .checked_add_signed(chrono::Duration::nanoseconds(elapsed_ns))?
        };
        Some(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc))
    }
}

impl From<DateTime<Utc>> for UtcTimestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::new(
            dt.year(),
            dt.month() as i32,
            dt.day() as i32,
            dt.hour() as i32,
            dt.minute() as i32,
            dt.second() as f64 + dt.nanosecond() as f64 / 1e9,
        )
    }
}

impl fmt::Display for UtcTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:06.3}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// LeapSeconds
// ═══════════════════════════════════════════════════════════════════════════

/// Table of leap-second days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeapSeconds {
    days: Vec<i32>,
    expires: i32,
}

impl Default for LeapSeconds {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LeapSeconds {
    /// File looked up by [`Self::load`]: one `YYYYMMDD` per line, `#` comments.
    pub const FILE_NAME: &'static str = "seleapsec.txt";

    pub fn builtin() -> Self {
        Self {
            days: BUILTIN_LEAP_DAYS.to_vec(),
            expires: BUILTIN_EXPIRES,
        }
    }

    /// Built-in table extended with the entries of `dir/seleapsec.txt`.
    pub fn load(dir: &Path) -> Result<Self, TimeError> {
        let path = dir.join(Self::FILE_NAME);
        let text = std::fs::read_to_string(&path)?;
        let mut table = Self::builtin();
        table.extend_from_str(&text, &path)?;
        debug!(
            path = %path.display(),
            entries = table.days.len(),
            expires = table.expires,
            "loaded leap-second table"
        );
        Ok(table)
    }

    /// Add entries from leap-second file text.  `source` only labels errors.
    pub fn extend_from_str(&mut self, text: &str, source: &Path) -> Result<(), TimeError> {
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let key = line
                .get(..8)
                .filter(|k| k.bytes().all(|b| b.is_ascii_digit()))
                .and_then(|k| k.parse::<i32>().ok())
                .filter(|&k| valid_day_key(k))
                .ok_or_else(|| TimeError::LeapSecondEntry {
                    path: source.to_path_buf(),
                    line: line.to_owned(),
                })?;
            self.days.push(key);
            self.expires = self.expires.max(key);
        }
        self.days.sort_unstable();
        self.days.dedup();
        Ok(())
    }

    /// Leap-second days, ascending.
    pub fn days(&self) -> &[i32] {
        &self.days
    }

    /// Last day (`YYYYMMDD`) for which the table is complete.
    pub fn expires(&self) -> i32 {
        self.expires
    }

    /// Whether a leap second ends the Gregorian day `YYYYMMDD`.
    pub fn is_leap_day(&self, key: i32) -> bool {
        self.days.binary_search(&key).is_ok()
    }

    /// Leap seconds inserted before the start of day `YYYYMMDD`.
    pub fn count_before(&self, key: i32) -> usize {
        self.days.partition_point(|&d| d < key)
    }

    /// `TAI − UTC` in seconds during day `YYYYMMDD` (1972 onwards).
    pub fn tai_minus_utc(&self, key: i32) -> f64 {
        NLEAP_INIT + self.count_before(key) as f64
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Conversions
// ═══════════════════════════════════════════════════════════════════════════

/// A UTC instant on the two axes position lookups need.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtcJulianDays {
    /// Ephemeris time.
    pub tt: Time<TT>,
    pub ut1: Time<UT>,
}

/// UTC → JD(TT) and JD(UT1).
///
/// The date is read in `system`; leap seconds are always looked up on the
/// Gregorian date.  Fails on an invalid date or time of day, and on
/// `second >= 60` for a day without a leap second.
pub fn utc_to_jd(
    utc: &UtcTimestamp,
    system: CalendarSystem,
    leap: &LeapSeconds,
) -> Result<UtcJulianDays, TimeError> {
    let midnight = date_conversion(CalendarDate::new(utc.year, utc.month, utc.day, 0.0), system)?;
    if !(0..24).contains(&utc.hour)
        || !(0..60).contains(&utc.minute)
        || !(0.0..61.0).contains(&utc.second)
    {
        return Err(TimeError::InvalidTime {
            hour: utc.hour,
            minute: utc.minute,
            second: utc.second,
        });
    }

    let seconds_of_day = utc.hour as f64 * 3600.0 + utc.minute as f64 * 60.0 + utc.second;
    let civil = midnight.value() + seconds_of_day / SECONDS_PER_DAY;

    if midnight < JulianDate::J1972 {
        return Ok(read_as_ut1(civil));
    }

    let gregorian = to_calendar_date(midnight, CalendarSystem::Gregorian);
    let key = day_key(gregorian.year, gregorian.month, gregorian.day);
    if utc.second >= 60.0 && !leap.is_leap_day(key) {
        return Err(TimeError::NoLeapSecond {
            year: gregorian.year,
            month: gregorian.month,
            day: gregorian.day,
        });
    }
    if key > leap.expires() {
        warn!(
            date = key,
            expires = leap.expires(),
            "leap-second table expired, reading UTC as UT1"
        );
        return Ok(read_as_ut1(civil));
    }

    let tai = Time::<TAI>::new(civil + leap.tai_minus_utc(key) / SECONDS_PER_DAY);
    Ok(UtcJulianDays {
        tt: tai.to::<TT>(),
        ut1: Time::<UT>::new(civil),
    })
}

/// JD(TT) → UTC, reporting `second` in `[60, 61)` inside a leap second.
pub fn jd_et_to_utc(tt: Time<TT>, system: CalendarSystem, leap: &LeapSeconds) -> UtcTimestamp {
    let tt_1972 = JulianDate::J1972.value() + (NLEAP_INIT + 32.184) / SECONDS_PER_DAY;
    if tt.value() < tt_1972 {
        return jd_ut1_to_utc(tt.to::<UT>(), system);
    }

    let tai = tt.to::<TAI>().value();
    let mut nleap = 0usize;
    let mut in_leap_second = false;
    for (k, &day) in leap.days().iter().enumerate() {
        // TAI at which 23:59:60 of `day` begins.
        let start = day_after(day).value() + (NLEAP_INIT + k as f64) / SECONDS_PER_DAY;
        if tai >= start + 1.0 / SECONDS_PER_DAY {
            nleap = k + 1;
        } else {
            in_leap_second = tai >= start;
            break;
        }
    }

    let extra = if in_leap_second { 1.0 } else { 0.0 };
    let civil = tai - (NLEAP_INIT + nleap as f64 + extra) / SECONDS_PER_DAY;
    let date = to_calendar_date(JulianDate::new(civil), CalendarSystem::Gregorian);
    if day_key(date.year, date.month, date.day) > leap.expires() {
        warn!(
            jd_tt = tt.value(),
            expires = leap.expires(),
            "leap-second table expired, reporting UT1"
        );
        return jd_ut1_to_utc(tt.to::<UT>(), system);
    }

    let mut ts = UtcTimestamp::from_date_hour(date);
    ts.second += extra;
    in_calendar(ts, system)
}

/// JD(UT1) → UTC, with UTC taken equal to UT1.  No leap second is ever
/// reported since UT1 has none.
pub fn jd_ut1_to_utc(ut1: Time<UT>, system: CalendarSystem) -> UtcTimestamp {
    UtcTimestamp::from_date_hour(ut1.to_calendar(system))
}

/// Shift a broken-down time by a time-zone offset in hours.
///
/// The offset is *subtracted*: pass `+tz` to go from local time to UTC and
/// `−tz` to go from UTC to local time (east of Greenwich is positive).
/// A leap second (`second >= 60`) is carried through unchanged.
pub fn utc_time_zone(ts: &UtcTimestamp, timezone_hours: f64) -> UtcTimestamp {
    let (second, leap) = if ts.second >= 60.0 {
        (ts.second - 1.0, 1.0)
    } else {
        (ts.second, 0.0)
    };
    let mut seconds =
        ts.hour as f64 * 3600.0 + ts.minute as f64 * 60.0 + second - timezone_hours * 3600.0;
    let mut jd = to_julian_day(
        CalendarDate::new(ts.year, ts.month, ts.day, 0.0),
        CalendarSystem::Gregorian,
    );
    if seconds < 0.0 {
        jd -= qtty::Days::new(1.0);
        seconds += SECONDS_PER_DAY;
    }
    if seconds >= SECONDS_PER_DAY {
        jd += qtty::Days::new(1.0);
        seconds -= SECONDS_PER_DAY;
    }
    // Nudge off midnight so the day is read unambiguously.
    let (year, month, day) =
        to_calendar_date(jd + qtty::Days::new(0.001), CalendarSystem::Gregorian).ymd();
    let hour = (seconds / 3600.0).floor();
    let minute = ((seconds - hour * 3600.0) / 60.0).floor();
    UtcTimestamp::new(
        year,
        month,
        day,
        hour as i32,
        minute as i32,
        seconds - hour * 3600.0 - minute * 60.0 + leap,
    )
}

// ═══════════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════════

fn read_as_ut1(civil: f64) -> UtcJulianDays {
    let ut1 = Time::<UT>::new(civil);
    UtcJulianDays {
        tt: ut1.to::<TT>(),
        ut1,
    }
}

/// Re-express a Gregorian timestamp's date in `system`.
fn in_calendar(ts: UtcTimestamp, system: CalendarSystem) -> UtcTimestamp {
    match system {
        CalendarSystem::Gregorian => ts,
        CalendarSystem::Julian => {
            let midnight = to_julian_day(
                CalendarDate::new(ts.year, ts.month, ts.day, 0.0),
                CalendarSystem::Gregorian,
            );
            let (year, month, day) = to_calendar_date(midnight, system).ymd();
            UtcTimestamp {
                year,
                month,
                day,
                ..ts
            }
        }
    }
}

const fn day_key(year: i32, month: i32, day: i32) -> i32 {
    year * 10_000 + month * 100 + day
}

fn split_day_key(key: i32) -> (i32, i32, i32) {
    (key / 10_000, key % 10_000 / 100, key % 100)
}

fn valid_day_key(key: i32) -> bool {
    let (year, month, day) = split_day_key(key);
    CalendarSystem::Gregorian
        .days_in_month(year, month)
        .is_some_and(|len| (1..=len).contains(&day))
}

/// Midnight starting the day after `key`.
fn day_after(key: i32) -> JulianDate {
    let (year, month, day) = split_day_key(key);
    to_julian_day(
        CalendarDate::new(year, month, day, 24.0),
        CalendarSystem::Gregorian,
    )
}
