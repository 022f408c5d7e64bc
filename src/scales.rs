// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time-scale marker types.
//!
//! | Marker | Quantity | Relation to JD(TT) |
//! |--------|----------|--------------------|
//! | [`JD`]  | Julian day, axis left to the caller | identity |
//! | [`MJD`] | Modified Julian Date | `JD − 2 400 000.5` |
//! | [`TT`]  | Julian day, Terrestrial Time | identity |
//! | [`TAI`] | Julian day, International Atomic Time | `TT − 32.184 s` |
//! | [`UT`]  | Julian day, Universal Time (UT1) | `TT − ΔT` |

use super::instant::{CalendarScale, TimeScale};
use qtty::Days;

/// Scales that differ from JD(TT) by a fixed number of days.
macro_rules! offset_scale {
    ($(#[$meta:meta])* $name:ident, $label:literal, $offset:expr) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
        pub struct $name;

        impl TimeScale for $name {
            const LABEL: &'static str = $label;

            #[inline(always)]
            fn to_jd_tt(value: Days) -> Days {
                value + $offset
            }

            #[inline(always)]
            fn from_jd_tt(jd_tt: Days) -> Days {
                jd_tt - $offset
            }
        }
    };
}

/// `JD = MJD + 2 400 000.5`.
const MJD_EPOCH: Days = Days::new(2_400_000.5);

/// `TT − TAI` expressed in days.
pub(crate) const TT_MINUS_TAI: Days = Days::new(32.184 / 86_400.0);

const NO_OFFSET: Days = Days::new(0.0);

offset_scale!(
    /// Plain Julian day number.
    ///
    /// Calendar conversions produce and consume this scale; it says nothing
    /// about whether the day is counted in UT or TT.  Cross-scale conversion
    /// treats it as JD(TT).
    JD, "Julian Day:", NO_OFFSET
);

offset_scale!(
    /// Modified Julian Date, `JD − 2 400 000.5`.
    MJD, "MJD", MJD_EPOCH
);

offset_scale!(
    /// Terrestrial Time (ephemeris time), the argument of ephemeris lookups.
    TT, "TT", NO_OFFSET
);

offset_scale!(
    /// International Atomic Time.
    ///
    /// `TT = TAI + 32.184 s`.  UTC differs from TAI by an integral number of
    /// seconds taken from the leap-second table (see [`crate::utc`]).
    TAI, "TAI", TT_MINUS_TAI
);

impl CalendarScale for JD {}
impl CalendarScale for TT {}
impl CalendarScale for TAI {}

// ---------------------------------------------------------------------------
// Universal Time (Earth-rotation based)
// ---------------------------------------------------------------------------

/// Universal Time — the civil time scale tied to Earth's rotation.
///
/// `UT` holds a Julian Day on the **UT** axis; the conversion to JD(TT)
/// adds the epoch-dependent **ΔT** from [`crate::delta_t`], and the inverse
/// uses a three-iteration fixed-point solver.  Position lookups that take
/// "JD UT" (see [`crate::ephemeris`]) expect this scale.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct UT;

impl TimeScale for UT {
    const LABEL: &'static str = "UT";

    #[inline]
    fn to_jd_tt(ut_value: Days) -> Days {
        let jd_ut = super::instant::Time::<JD>::from_days(ut_value);
        let dt_secs = super::delta_t::delta_t_seconds_from_ut(jd_ut);
        ut_value + dt_secs.to::<qtty::Day>()
    }

    #[inline]
    fn from_jd_tt(jd_tt: Days) -> Days {
        // ut + ΔT(ut) = tt; dΔT/dJD is tiny so three steps converge.
        let mut ut = jd_tt;
        for _ in 0..3 {
            let jd_ut = super::instant::Time::<JD>::from_days(ut);
            let dt_days = super::delta_t::delta_t_seconds_from_ut(jd_ut).to::<qtty::Day>();
            ut = jd_tt - dt_days;
        }
        ut
    }
}

impl CalendarScale for UT {}

// ---------------------------------------------------------------------------
// Cross-scale From/Into  (generated by macro)
// ---------------------------------------------------------------------------

/// Generate pairwise `From<Time<A>> for Time<B>` implementations.
macro_rules! impl_time_conversions {
    ($single:ty) => {};

    ($first:ty, $($rest:ty),+ $(,)?) => {
        $(
            impl From<super::instant::Time<$first>> for super::instant::Time<$rest> {
                #[inline]
                fn from(t: super::instant::Time<$first>) -> Self {
                    t.to::<$rest>()
                }
            }

            impl From<super::instant::Time<$rest>> for super::instant::Time<$first> {
                #[inline]
                fn from(t: super::instant::Time<$rest>) -> Self {
                    t.to::<$first>()
                }
            }
        )+

        impl_time_conversions!($($rest),+);
    };
}

impl_time_conversions!(JD, MJD, TT, TAI, UT);

#[cfg(test)]
mod tests {
    use super::super::instant::Time;
    use super::*;
    use qtty::{Day, Second, Seconds};

    #[test]
    fn jd_mjd_from_into() {
        let jd = Time::<JD>::new(2_451_545.0);
        let mjd: Time<MJD> = jd.into();
        assert!((mjd.quantity() - Days::new(51_544.5)).abs() < Days::new(1e-10));
        let back: Time<JD> = Time::from(mjd);
        assert!((back.quantity() - Days::new(2_451_545.0)).abs() < Days::new(1e-10));
    }

    #[test]
    fn tai_tt_offset() {
        let tai = Time::<TAI>::new(2_451_545.0);
        let tt: Time<TT> = tai.to::<TT>();
        let expected_offset = Seconds::new(32.184).to::<Day>();
        assert!((tt.quantity() - (tai.quantity() + expected_offset)).abs() < Days::new(1e-9));
    }

    #[test]
    fn ut_to_tt_applies_delta_t() {
        let ut = Time::<UT>::new(2_451_545.0);
        let tt: Time<TT> = ut.to::<TT>();
        let offset_secs = (tt.quantity() - ut.quantity()).to::<Second>();
        assert!(
            (offset_secs - Seconds::new(63.83)).abs() < Seconds::new(1.0),
            "UT→TT offset = {} s, expected ~63.83 s",
            offset_secs
        );
    }

    #[test]
    fn ut_tt_roundtrip() {
        let tt = Time::<TT>::new(2_460_000.5);
        let back: Time<TT> = tt.to::<UT>().to::<TT>();
        assert!(
            (back.quantity() - tt.quantity()).abs() < Days::new(1e-9),
            "roundtrip error: {} days",
            (back.quantity() - tt.quantity()).abs()
        );
    }

    #[test]
    fn ut_from_into() {
        let ut = Time::<UT>::new(2_451_545.0);
        let jd: Time<JD> = ut.into();
        let back: Time<UT> = jd.into();
        assert!((back.quantity() - ut.quantity()).abs() < Days::new(1e-9));
    }
}
