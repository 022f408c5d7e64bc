// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Published numeric selectors of the Swiss Ephemeris API.
//!
//! These values cross the boundary to external ephemeris libraries and
//! must match them bit for bit.  Typed wrappers live in
//! [`crate::CalendarSystem`], [`crate::ephemeris::BodyId`] and
//! [`crate::ephemeris::CalcFlags`].

// ── Calendar selectors ────────────────────────────────────────────────────

pub const SE_JUL_CAL: i32 = 0;
pub const SE_GREG_CAL: i32 = 1;

// ── Status codes ──────────────────────────────────────────────────────────

pub const SE_OK: i32 = 0;
pub const SE_ERR: i32 = -1;

// ── Bodies ────────────────────────────────────────────────────────────────

pub const SE_ECL_NUT: i32 = -1;
pub const SE_SUN: i32 = 0;
pub const SE_MOON: i32 = 1;
pub const SE_MERCURY: i32 = 2;
pub const SE_VENUS: i32 = 3;
pub const SE_MARS: i32 = 4;
pub const SE_JUPITER: i32 = 5;
pub const SE_SATURN: i32 = 6;
pub const SE_URANUS: i32 = 7;
pub const SE_NEPTUNE: i32 = 8;
pub const SE_PLUTO: i32 = 9;
pub const SE_MEAN_NODE: i32 = 10;
pub const SE_TRUE_NODE: i32 = 11;
pub const SE_MEAN_APOG: i32 = 12;
pub const SE_OSCU_APOG: i32 = 13;
pub const SE_EARTH: i32 = 14;
pub const SE_CHIRON: i32 = 15;
pub const SE_PHOLUS: i32 = 16;
pub const SE_CERES: i32 = 17;
pub const SE_PALLAS: i32 = 18;
pub const SE_JUNO: i32 = 19;
pub const SE_VESTA: i32 = 20;
pub const SE_INTP_APOG: i32 = 21;
pub const SE_INTP_PERG: i32 = 22;
pub const SE_NPLANETS: i32 = 23;

/// Planetary moons are numbered from here.
pub const SE_PLMOON_OFFSET: i32 = 9000;
/// Numbered asteroids are `SE_AST_OFFSET + MPC number`.
pub const SE_AST_OFFSET: i32 = 10000;

// ── Calculation flags ─────────────────────────────────────────────────────

pub const SEFLG_JPLEPH: i32 = 1;
pub const SEFLG_SWIEPH: i32 = 2;
pub const SEFLG_MOSEPH: i32 = 4;
pub const SEFLG_EPHMASK: i32 = SEFLG_JPLEPH | SEFLG_SWIEPH | SEFLG_MOSEPH;
pub const SEFLG_HELCTR: i32 = 8;
pub const SEFLG_TRUEPOS: i32 = 16;
pub const SEFLG_J2000: i32 = 32;
pub const SEFLG_NONUT: i32 = 64;
pub const SEFLG_SPEED3: i32 = 128;
pub const SEFLG_SPEED: i32 = 256;
pub const SEFLG_NOGDEFL: i32 = 512;
pub const SEFLG_NOABERR: i32 = 1024;
pub const SEFLG_ASTROMETRIC: i32 = SEFLG_NOABERR | SEFLG_NOGDEFL;
pub const SEFLG_EQUATORIAL: i32 = 2 * 1024;
pub const SEFLG_XYZ: i32 = 4 * 1024;
pub const SEFLG_RADIANS: i32 = 8 * 1024;
pub const SEFLG_BARYCTR: i32 = 16 * 1024;
pub const SEFLG_TOPOCTR: i32 = 32 * 1024;
pub const SEFLG_TROPICAL: i32 = 0;
pub const SEFLG_SIDEREAL: i32 = 64 * 1024;
pub const SEFLG_ICRS: i32 = 128 * 1024;
pub const SEFLG_DPSIDEPS_1980: i32 = 256 * 1024;
pub const SEFLG_JPLHOR: i32 = SEFLG_DPSIDEPS_1980;
pub const SEFLG_JPLHOR_APPROX: i32 = 512 * 1024;
pub const SEFLG_CENTER_BODY: i32 = 1024 * 1024;
pub const SEFLG_DEFAULTEPH: i32 = SEFLG_SWIEPH;
