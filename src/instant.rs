// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Scale-tagged Julian day instant.
//!
//! [`Time<S>`] stores a scalar quantity in [`Days`] whose *meaning* is fixed
//! by the compile-time marker `S: TimeScale`.  A `Time<UT>` holds a Julian
//! day on the Universal Time axis, a `Time<TT>` one on the Terrestrial Time
//! axis, and so on.  Conversion between axes always routes through JD(TT).
//!
//! Calendar conversion is only offered for scales whose quantity *is* a
//! Julian day ([`CalendarScale`]); counters with a shifted epoch such as
//! [`MJD`](super::scales::MJD) go through `.to::<JD>()` first.

use chrono::Weekday;
use qtty::*;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::calendar::{self, CalendarDate, CalendarSystem};

// ═══════════════════════════════════════════════════════════════════════════
// TimeScale trait
// ═══════════════════════════════════════════════════════════════════════════

/// Marker trait for time scales.
///
/// A **time scale** defines a display label and a pair of conversion
/// functions between the scale's native quantity (in [`Days`]) and the
/// canonical **Julian Date in TT**.
pub trait TimeScale: Copy + Clone + std::fmt::Debug + PartialEq + PartialOrd + 'static {
    /// Display label used by [`Time`] formatting.
    const LABEL: &'static str;

    /// Convert a quantity in this scale's native unit to an absolute JD(TT).
    fn to_jd_tt(value: Days) -> Days;

    /// Convert an absolute JD(TT) back to this scale's native quantity.
    fn from_jd_tt(jd_tt: Days) -> Days;
}

/// Scales whose native quantity is a Julian day counted from the
/// conventional epoch (noon, 1 January 4713 BC, proleptic Julian).
///
/// Only these scales can be built from, or broken down into, a
/// [`CalendarDate`] without an epoch shift.
pub trait CalendarScale: TimeScale {}

// ═══════════════════════════════════════════════════════════════════════════
// Time<S>
// ═══════════════════════════════════════════════════════════════════════════

/// A point on time scale `S`.
///
/// Layout-identical to a single `f64`; `PhantomData` is zero-sized.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Time<S: TimeScale> {
    quantity: Days,
    _scale: PhantomData<S>,
}

impl<S: TimeScale> Time<S> {
    /// Create from a raw scalar (days on this scale).
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self {
            quantity: Days::new(value),
            _scale: PhantomData,
        }
    }

    /// Create from a [`Days`] quantity.
    #[inline]
    pub const fn from_days(days: Days) -> Self {
        Self {
            quantity: days,
            _scale: PhantomData,
        }
    }

    /// The underlying quantity in days.
    #[inline]
    pub const fn quantity(&self) -> Days {
        self.quantity
    }

    /// The underlying scalar value in days.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.quantity.value()
    }

    /// Absolute Julian Day (TT) corresponding to this instant.
    #[inline]
    pub fn julian_day(&self) -> Days {
        S::to_jd_tt(self.quantity)
    }

    /// Build an instant from an absolute Julian Day (TT).
    #[inline]
    pub fn from_julian_day(jd: Days) -> Self {
        Self::from_days(S::from_jd_tt(jd))
    }

    /// Convert this instant to another time scale through JD(TT).
    #[inline]
    pub fn to<T: TimeScale>(&self) -> Time<T> {
        Time::<T>::from_julian_day(S::to_jd_tt(self.quantity))
    }
}

impl<S: CalendarScale> Time<S> {
    /// Julian day of a calendar date read on this scale's axis.
    ///
    /// ```rust
    /// use swecal::{CalendarDate, CalendarSystem, Time, UT};
    ///
    /// let noon = CalendarDate::new(2000, 1, 1, 12.0);
    /// let ut = Time::<UT>::from_calendar(noon, CalendarSystem::Gregorian);
    /// assert_eq!(ut.value(), 2_451_545.0);
    /// ```
    #[inline]
    pub fn from_calendar(date: CalendarDate, system: CalendarSystem) -> Self {
        Self::new(calendar::julian_day_value(&date, system))
    }

    /// Calendar date of this instant, read on this scale's axis.
    #[inline]
    pub fn to_calendar(&self, system: CalendarSystem) -> CalendarDate {
        calendar::calendar_date_from_value(self.value(), system)
    }

    /// Day of the week the instant falls on (civil day starting at midnight).
    #[inline]
    pub fn day_of_week(&self) -> Weekday {
        calendar::weekday_from_value(self.value())
    }
}

// ── Display ───────────────────────────────────────────────────────────────

impl<S: TimeScale> std::fmt::Display for Time<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", S::LABEL, self.quantity)
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl<S: TimeScale> Serialize for Time<S> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.serialize_f64(self.value())
    }
}

#[cfg(feature = "serde")]
impl<'de, S: TimeScale> Deserialize<'de> for Time<S> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = f64::deserialize(deserializer)?;
        Ok(Self::new(v))
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl<S: TimeScale> Add<Days> for Time<S> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity + rhs)
    }
}

impl<S: TimeScale> AddAssign<Days> for Time<S> {
    #[inline]
    fn add_assign(&mut self, rhs: Days) {
        self.quantity += rhs;
    }
}

impl<S: TimeScale> Sub<Days> for Time<S> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity - rhs)
    }
}

impl<S: TimeScale> SubAssign<Days> for Time<S> {
    #[inline]
    fn sub_assign(&mut self, rhs: Days) {
        self.quantity -= rhs;
    }
}

impl<S: TimeScale> Sub for Time<S> {
    type Output = Days;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.quantity - rhs.quantity
    }
}

impl<S: TimeScale> From<Days> for Time<S> {
    #[inline]
    fn from(days: Days) -> Self {
        Self::from_days(days)
    }
}

impl<S: TimeScale> From<Time<S>> for Days {
    #[inline]
    fn from(time: Time<S>) -> Self {
        time.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::super::scales::{JD, MJD, TT, UT};
    use super::*;

    #[test]
    fn julian_day_creation() {
        let jd = Time::<JD>::new(2_451_545.0);
        assert_eq!(jd.quantity(), Days::new(2_451_545.0));
        assert_eq!(jd.value(), 2_451_545.0);
    }

    #[test]
    fn from_calendar_hits_j2000() {
        let jd = Time::<JD>::from_calendar(
            CalendarDate::new(2000, 1, 1, 12.0),
            CalendarSystem::Gregorian,
        );
        assert_eq!(jd.value(), 2_451_545.0);
    }

    #[test]
    fn to_calendar_on_tt_axis() {
        let tt = Time::<TT>::new(2_451_545.0);
        let date = tt.to_calendar(CalendarSystem::Gregorian);
        assert_eq!(date.ymd(), (2000, 1, 1));
        assert!((date.hour - 12.0).abs() < 1e-9);
    }

    #[test]
    fn calendar_on_ut_axis_keeps_ut_value() {
        let ut = Time::<UT>::from_calendar(
            CalendarDate::new(1999, 12, 31, 0.0),
            CalendarSystem::Gregorian,
        );
        assert_eq!(ut.value(), 2_451_543.5);
        // The TT view is shifted by ΔT, never by the calendar.
        assert!(ut.to::<TT>().value() > ut.value());
    }

    #[test]
    fn day_of_week_at_j2000_is_saturday() {
        assert_eq!(Time::<JD>::new(2_451_545.0).day_of_week(), Weekday::Sat);
    }

    #[test]
    fn jd_mjd_through_to() {
        let mjd = Time::<JD>::new(2_451_545.0).to::<MJD>();
        assert!((mjd.quantity() - Days::new(51_544.5)).abs() < Days::new(1e-10));
    }

    #[test]
    fn display_carries_label() {
        let s = format!("{}", Time::<JD>::new(2_451_545.0));
        assert!(s.contains("Julian Day"));
        let s = format!("{}", Time::<MJD>::new(51_544.5));
        assert!(s.contains("MJD"));
    }

    #[test]
    fn add_sub_days() {
        let mut jd = Time::<JD>::new(2_451_545.0);
        jd += Days::new(1.0);
        assert_eq!(jd.quantity(), Days::new(2_451_546.0));
        jd -= Days::new(0.5);
        assert_eq!(jd.quantity(), Days::new(2_451_545.5));
        let later = jd + Days::new(2.0);
        assert_eq!(later - jd, Days::new(2.0));
        assert_eq!((later - Days::new(2.0)).value(), jd.value());
    }

    #[test]
    fn days_roundtrip() {
        let jd = Time::<JD>::new(2_451_547.5);
        let days: Days = jd.into();
        assert_eq!(Time::<JD>::from(days), jd);
    }
}
