// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type for checked calendar and UTC conversions.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from validated calendar and UTC conversions.
///
/// The raw calendrical conversions never fail; only the checked entry
/// points ([`crate::date_conversion`], [`crate::utc`]) return these.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TimeError {
    #[error("invalid calendar flag {0}: expected 0 (Julian) or 1 (Gregorian)")]
    InvalidCalendarFlag(i32),

    #[error("invalid calendar character {0:?}: expected 'j' or 'g'")]
    InvalidCalendarChar(char),

    #[error("unknown calendar {0:?}: expected \"julian\" or \"gregorian\"")]
    InvalidCalendarName(String),

    #[error("invalid date {year}/{month}/{day}")]
    InvalidDate { year: i32, month: i32, day: i32 },

    #[error("invalid time {hour}:{minute}:{second}")]
    InvalidTime { hour: i32, minute: i32, second: f64 },

    #[error("hour {0} outside [0, 24)")]
    HourOutOfRange(f64),

    #[error("no leap second at the end of {year}/{month}/{day}")]
    NoLeapSecond { year: i32, month: i32, day: i32 },

    #[error("malformed leap-second entry {line:?} in {path}")]
    LeapSecondEntry { path: PathBuf, line: String },

    #[error("unable to read leap-second file: {0}")]
    Io(#[from] std::io::Error),
}
