// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Julian day ↔ calendar conversion in the Swiss Ephemeris convention.
//!
//! A Julian day number (JD) is a continuous count of days since noon of
//! 1 January 4713 BC (proleptic Julian calendar).  This crate converts
//! between JD values and `(year, month, day, hour)` tuples in either the
//! Julian or the Gregorian calendar, using astronomical year numbering
//! (1 BC = year 0, 2 BC = year −1).
//!
//! # Core types
//!
//! - [`Time<S>`] — generic instant parameterised by a [`TimeScale`] marker.
//! - [`JulianDate`] — type alias for `Time<JD>`.
//! - [`CalendarDate`] — broken-down `(year, month, day, hour)` date.
//! - [`CalendarSystem`] — Julian or Gregorian; wire values `0` and `1`.
//!
//! # Conversions
//!
//! ```rust
//! use swecal::{to_calendar_date, to_julian_day, CalendarDate, CalendarSystem, JulianDate};
//!
//! let jd = to_julian_day(CalendarDate::new(2000, 1, 1, 12.0), CalendarSystem::Gregorian);
//! assert_eq!(jd, JulianDate::J2000);
//!
//! let date = to_calendar_date(jd, CalendarSystem::Gregorian);
//! assert_eq!(date.ymd(), (2000, 1, 1));
//! ```
//!
//! Out-of-range components are not rejected: `hour = 36` lands at noon of
//! the following day.  Use [`date_conversion`] for a checked variant.
//!
//! # Time scales
//!
//! | Marker | Scale |
//! |--------|-------|
//! | [`JD`] | Julian Day |
//! | [`MJD`] | Modified Julian Date |
//! | [`TT`] | Terrestrial Time |
//! | [`TAI`] | International Atomic Time |
//! | [`UT`] | Universal Time (Earth rotation) |
//!
//! The difference **ΔT = TT − UT** is applied automatically by the [`UT`]
//! scale; the raw value is available via
//! [`Time::<UT>::delta_t()`](Time::delta_t).  Civil UTC with leap seconds is
//! handled by the [`utc`] module, and [`ephemeris`] holds the typed request
//! surface for external position backends.

mod calendar;
pub mod constants;
mod delta_t;
pub mod ephemeris;
mod error;
pub(crate) mod instant;
mod julian_date_ext;
pub(crate) mod scales;
pub mod utc;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use calendar::{date_conversion, day_of_week, to_calendar_date, to_julian_day};
pub use calendar::{CalendarDate, CalendarSystem};
pub use error::TimeError;
pub use instant::{CalendarScale, Time, TimeScale};
pub use scales::{JD, MJD, TAI, TT, UT};

// ── Type aliases ──────────────────────────────────────────────────────────

/// Julian Date — continuous count of days since noon, 1 January 4713 BC.
///
/// This is a type alias for [`Time<JD>`].
pub type JulianDate = Time<JD>;

/// Modified Julian Date — `JD − 2 400 000.5`.
pub type ModifiedJulianDate = Time<MJD>;

/// Universal Time — Earth-rotation civil time scale.
pub type UniversalTime = Time<UT>;

/// Terrestrial Time — the ephemeris time argument.
pub type TerrestrialTime = Time<TT>;
