// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Julian Date (`Time<JD>`) specific extensions.

use qtty::*;

use super::instant::Time;
use super::scales::{JD, MJD};

impl Time<JD> {
    /// J2000.0 epoch: 2000-01-01T12:00:00 (JD 2 451 545.0).
    pub const J2000: Self = Self::new(2_451_545.0);

    /// First day of the Gregorian calendar, 1582-10-15T00:00 (JD 2 299 160.5).
    ///
    /// The preceding day is 1582-10-04 in the Julian calendar.
    pub const GREGORIAN_REFORM: Self = Self::new(2_299_160.5);

    /// Start of UTC with leap seconds, 1972-01-01T00:00 (JD 2 441 317.5).
    pub const J1972: Self = Self::new(2_441_317.5);

    /// One Julian year expressed in days.
    pub const JULIAN_YEAR: Days = Days::new(365.25);

    /// One Julian century expressed in days.
    pub const JULIAN_CENTURY: Days = Days::new(36_525.0);

    /// Julian centuries since J2000.0.
    #[inline]
    pub fn julian_centuries(&self) -> Centuries {
        Centuries::new(
            ((*self - Self::J2000) / Self::JULIAN_CENTURY)
                .simplify()
                .value(),
        )
    }

    /// Julian years since J2000.0.
    #[inline]
    pub fn julian_years(&self) -> JulianYears {
        JulianYears::new(
            ((*self - Self::J2000) / Self::JULIAN_YEAR)
                .simplify()
                .value(),
        )
    }

    /// Convenience wrapper for `self.to::<MJD>()`.
    #[inline]
    pub fn to_mjd(&self) -> Time<MJD> {
        self.to::<MJD>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CalendarDate, CalendarSystem};

    #[test]
    fn epochs_match_their_calendar_dates() {
        let reform = Time::<JD>::from_calendar(
            CalendarDate::new(1582, 10, 15, 0.0),
            CalendarSystem::Gregorian,
        );
        assert_eq!(reform, Time::<JD>::GREGORIAN_REFORM);

        let utc_start = Time::<JD>::from_calendar(
            CalendarDate::new(1972, 1, 1, 0.0),
            CalendarSystem::Gregorian,
        );
        assert_eq!(utc_start, Time::<JD>::J1972);
    }

    #[test]
    fn julian_centuries_and_years() {
        let jd = Time::<JD>::J2000 + Days::new(36_525.0 * 3.0);
        assert!((jd.julian_centuries() - Centuries::new(3.0)).abs() < Centuries::new(1e-12));
        assert!((jd.julian_years() - JulianYears::new(300.0)).abs() < JulianYears::new(1e-9));
    }

    #[test]
    fn to_mjd_offsets_epoch() {
        assert_eq!(Time::<JD>::J2000.to_mjd().value(), 51_544.5);
    }
}
