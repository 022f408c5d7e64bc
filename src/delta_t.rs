// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # ΔT (Delta T) — UT↔TT Correction Layer
//!
//! Piecewise model for **ΔT = TT − UT**:
//!
//! | Range | Source |
//! |-------|--------|
//! | before 948 | Stephenson & Houlden (1986), quadratic |
//! | 948–1600 | Stephenson & Houlden (1986), second quadratic |
//! | 1600–1992 | Meeus biennial table, bicubic interpolation |
//! | 1992–2005 | Espenak & Meeus (2006), quintic |
//! | 2005–2050 | Espenak & Meeus (2006), quadratic |
//! | 2050–2150 | Morrison & Stephenson (2004) parabola with linear blend |
//! | after 2150 | Morrison & Stephenson (2004) parabola |
//!
//! The correction is applied by the [`UT`](super::UT) scale whenever a
//! `Time<UT>` is converted to a TT-based scale.
//!
//! ```rust
//! use swecal::{Time, TT, UT};
//!
//! let ut = Time::<UT>::new(2_451_545.0);
//! let tt = ut.to::<TT>();
//! assert!(tt.value() > ut.value());
//! println!("ΔT = {}", ut.delta_t());
//! ```

use super::instant::Time;
use super::scales::UT;
use super::JulianDate;
use qtty::{Days, Seconds, Simplify};

/// Total number of tabulated terms (biennial 1620–1992).
const TERMS: usize = 187;

/// Biennial ΔT table from 1620 to 1992 (in seconds), compiled by J. Meeus.
#[rustfmt::skip]
const DELTA_T: [Seconds; TERMS] = qtty::qtty_vec!(
    Seconds;
    124.0,115.0,106.0, 98.0, 91.0, 85.0, 79.0, 74.0, 70.0, 65.0,
     62.0, 58.0, 55.0, 53.0, 50.0, 48.0, 46.0, 44.0, 42.0, 40.0,
     37.0, 35.0, 33.0, 31.0, 28.0, 26.0, 24.0, 22.0, 20.0, 18.0,
     16.0, 14.0, 13.0, 12.0, 11.0, 10.0,  9.0,  9.0,  9.0,  9.0,
      9.0,  9.0,  9.0,  9.0, 10.0, 10.0, 10.0, 10.0, 10.0, 11.0,
     11.0, 11.0, 11.0, 11.0, 11.0, 11.0, 12.0, 12.0, 12.0, 12.0,
     12.0, 12.0, 13.0, 13.0, 13.0, 13.0, 14.0, 14.0, 14.0, 15.0,
     15.0, 15.0, 15.0, 16.0, 16.0, 16.0, 16.0, 16.0, 17.0, 17.0,
     17.0, 17.0, 17.0, 17.0, 17.0, 17.0, 16.0, 16.0, 15.0, 14.0,
     13.7, 13.1, 12.7, 12.5, 12.5, 12.5, 12.5, 12.5, 12.5, 12.3,
     12.0, 11.4, 10.6,  9.6,  8.6,  7.5,  6.6,  6.0,  5.7,  5.6,
      5.7,  5.9,  6.2,  6.5,  6.8,  7.1,  7.3,  7.5,  7.7,  7.8,
      7.9,  7.5,  6.4,  5.4,  2.9,  1.6, -1.0, -2.7, -3.6, -4.7,
     -5.4, -5.2, -5.5, -5.6, -5.8, -5.9, -6.2, -6.4, -6.1, -4.7,
     -2.7,  0.0,  2.6,  5.4,  7.7, 10.5, 13.4, 16.0, 18.2, 20.2,
     21.2, 22.4, 23.5, 23.9, 24.3, 24.0, 23.9, 23.9, 23.7, 24.0,
     24.3, 25.3, 26.2, 27.3, 28.2, 29.1, 30.0, 30.7, 31.4, 32.2,
     33.1, 34.0, 35.0, 36.5, 38.3, 40.2, 42.2, 44.5, 46.5, 48.5,
     50.5, 52.2, 53.8, 54.9, 55.8, 56.9, 58.3,
);

/// 1992-01-01T00:00 UT.
const JD_1992: JulianDate = JulianDate::new(2_448_622.5);
/// 2005-01-01T00:00 UT.
const JD_2005: JulianDate = JulianDate::new(2_453_371.5);
/// 2050-01-01T00:00 UT.
const JD_2050: JulianDate = JulianDate::new(2_469_807.5);
/// 2150-01-01T00:00 UT.
const JD_2150: JulianDate = JulianDate::new(2_506_331.5);

// ------------------------------------------------------------------------------------
// ΔT Approximation Sections by Time Interval
// ------------------------------------------------------------------------------------

/// **Years < 948 CE**
#[inline]
fn delta_t_ancient(jd: JulianDate) -> Seconds {
    const DT_A0_S: Seconds = Seconds::new(1_830.0);
    const DT_A1_S: Seconds = Seconds::new(-405.0);
    const DT_A2_S: Seconds = Seconds::new(46.5);
    const JD_EPOCH_948_UT: JulianDate = JulianDate::new(2_067_314.5);
    let c = days_ratio(jd - JD_EPOCH_948_UT, JulianDate::JULIAN_CENTURY);
    DT_A0_S + DT_A1_S * c + DT_A2_S * c * c
}

/// **Years 948–1600 CE**
#[inline]
fn delta_t_medieval(jd: JulianDate) -> Seconds {
    const JD_EPOCH_1850_UT: JulianDate = JulianDate::new(2_396_758.5);
    const DT_A2_S: Seconds = Seconds::new(22.5);

    let c = days_ratio(jd - JD_EPOCH_1850_UT, JulianDate::JULIAN_CENTURY);
    DT_A2_S * c * c
}

/// **Years 1600–1992**, bicubic interpolation in the biennial table.
#[inline]
fn delta_t_table(jd: JulianDate) -> Seconds {
    const JD_TABLE_START_1620: JulianDate = JulianDate::new(2_312_752.5);
    const BIENNIAL_STEP_D: Days = Days::new(730.5);

    let mut i = days_ratio(jd - JD_TABLE_START_1620, BIENNIAL_STEP_D) as usize;
    if i > TERMS - 3 {
        i = TERMS - 3;
    }
    let a: Seconds = DELTA_T[i + 1] - DELTA_T[i];
    let b: Seconds = DELTA_T[i + 2] - DELTA_T[i + 1];
    let c: Seconds = a - b;
    let n = days_ratio(
        jd - (JD_TABLE_START_1620 + BIENNIAL_STEP_D * i as f64),
        BIENNIAL_STEP_D,
    );
    DELTA_T[i + 1] + n / 2.0 * (a + b + n * c)
}

/// **Years 1992–2005**, Espenak & Meeus quintic in `t = y − 2000`.
#[inline]
fn delta_t_recent(jd: JulianDate) -> Seconds {
    let t = decimal_year(jd) - 2000.0;
    let t2 = t * t;
    let t3 = t2 * t;
    Seconds::new(
        63.86 + 0.3345 * t - 0.060_374 * t2 + 0.001_727_5 * t3 + 0.000_651_814 * t2 * t2
            + 0.000_023_735_99 * t3 * t2,
    )
}

/// **Years 2005–2050**, Espenak & Meeus quadratic in `t = y − 2000`.
#[inline]
fn delta_t_predicted(jd: JulianDate) -> Seconds {
    let t = decimal_year(jd) - 2000.0;
    Seconds::new(62.92 + 0.322_17 * t + 0.005_589 * t * t)
}

/// **Years > 2050**, long-term parabola `−20 + 32 u²`, `u = (y − 1820)/100`,
/// blended linearly into the 2005–2050 polynomial until 2150.
#[inline]
fn delta_t_extrapolated(jd: JulianDate) -> Seconds {
    let y = decimal_year(jd);
    let u = (y - 1820.0) / 100.0;
    let parabola = -20.0 + 32.0 * u * u;
    if jd < JD_2150 {
        Seconds::new(parabola - 0.5628 * (2150.0 - y))
    } else {
        Seconds::new(parabola)
    }
}

#[inline]
fn days_ratio(num: Days, den: Days) -> f64 {
    (num / den).simplify().value()
}

/// Gregorian decimal year, good to a fraction of a day for ΔT purposes.
#[inline]
fn decimal_year(jd: JulianDate) -> f64 {
    const JD_2000_JAN_0_UT: JulianDate = JulianDate::new(2_451_544.5);
    const GREGORIAN_YEAR_D: Days = Days::new(365.2425);
    2000.0 + days_ratio(jd - JD_2000_JAN_0_UT, GREGORIAN_YEAR_D)
}

/// Returns **ΔT** in seconds for a Julian Day on the **UT** axis.
#[inline]
pub(crate) fn delta_t_seconds_from_ut(jd_ut: JulianDate) -> Seconds {
    match jd_ut {
        jd if jd < JulianDate::new(2_067_314.5) => delta_t_ancient(jd),
        jd if jd < JulianDate::new(2_305_447.5) => delta_t_medieval(jd),
        jd if jd < JD_1992 => delta_t_table(jd),
        jd if jd < JD_2005 => delta_t_recent(jd),
        jd if jd < JD_2050 => delta_t_predicted(jd),
        _ => delta_t_extrapolated(jd_ut),
    }
}

impl Time<UT> {
    /// Returns **ΔT = TT − UT** in seconds for this UT epoch.
    #[inline]
    pub fn delta_t(&self) -> Seconds {
        delta_t_seconds_from_ut(JulianDate::from_days(self.quantity()))
    }
}
