// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Interface to an external ephemeris library.
//!
//! Position computation (ephemeris files, precession, nutation, aberration,
//! topocentric geometry) is not done here.  This module fixes the boundary:
//! an [`EphemerisBackend`] computes positions, and the [`Ephemeris`] facade
//! hands it the full [`EphemerisConfig`] on every call.  There is no
//! "set path" or "set location" state to order calls around.
//!
//! ```rust
//! use swecal::ephemeris::{
//!     BodyId, CalcFlags, Ephemeris, EphemerisBackend, EphemerisConfig, EphemerisError,
//!     GeoPosition, Position, StarPosition,
//! };
//! use swecal::{Time, UT};
//!
//! struct Origin;
//!
//! impl EphemerisBackend for Origin {
//!     fn position_ut(
//!         &self,
//!         _config: &EphemerisConfig,
//!         _jd: Time<UT>,
//!         _body: BodyId,
//!         _flags: CalcFlags,
//!     ) -> Result<Position, EphemerisError> {
//!         Ok(Position::default())
//!     }
//!
//!     fn fixed_star_ut(
//!         &self,
//!         _config: &EphemerisConfig,
//!         name: &str,
//!         _jd: Time<UT>,
//!         _flags: CalcFlags,
//!     ) -> Result<StarPosition, EphemerisError> {
//!         Ok(StarPosition { name: name.to_owned(), position: Position::default() })
//!     }
//! }
//!
//! let config = EphemerisConfig::new()
//!     .with_ephemeris_path("/usr/share/sweph")
//!     .with_topocentric_location(GeoPosition::new(8.55, 47.37, 400.0));
//! let eph = Ephemeris::new(Origin, config);
//! let flags = CalcFlags::SWIEPH | CalcFlags::SPEED | CalcFlags::TOPOCTR;
//! assert!(eph.position_ut(Time::<UT>::new(2_451_545.0), BodyId::MOON, flags).is_ok());
//! ```

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::calendar::{CalendarDate, CalendarSystem};
use crate::constants::*;
use crate::error::TimeError;
use crate::utc::LeapSeconds;
use crate::{Time, UT};

// ═══════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EphemerisError {
    /// Failure reported by the backend (missing file, date out of range, …).
    /// The message is passed through untouched.
    #[error("ephemeris backend error {code}: {message}")]
    Backend { code: i32, message: String },

    #[error("topocentric position requested without an observer location")]
    MissingTopocentricLocation,

    #[error("empty fixed star name")]
    EmptyStarName,

    #[error(transparent)]
    Time(#[from] TimeError),
}

impl EphemerisError {
    /// Backend failure with the conventional `SE_ERR` status code.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            code: SE_ERR,
            message: message.into(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Configuration
// ═══════════════════════════════════════════════════════════════════════════

/// Geographic observer position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPosition {
    /// Degrees, east positive.
    pub longitude: f64,
    /// Degrees, north positive.
    pub latitude: f64,
    /// Metres above sea level.
    pub altitude: f64,
}

impl GeoPosition {
    pub const fn new(longitude: f64, latitude: f64, altitude: f64) -> Self {
        Self {
            longitude,
            latitude,
            altitude,
        }
    }
}

/// Everything a position lookup depends on besides its arguments.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EphemerisConfig {
    ephemeris_path: Option<PathBuf>,
    topocentric: Option<GeoPosition>,
}

impl EphemerisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory list (platform path separator) searched for ephemeris files.
    pub fn with_ephemeris_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ephemeris_path = Some(path.into());
        self
    }

    /// Observer for `SEFLG_TOPOCTR` lookups.
    pub fn with_topocentric_location(mut self, location: GeoPosition) -> Self {
        self.topocentric = Some(location);
        self
    }

    pub fn ephemeris_path(&self) -> Option<&Path> {
        self.ephemeris_path.as_deref()
    }

    pub fn topocentric(&self) -> Option<GeoPosition> {
        self.topocentric
    }

    /// Individual directories of the ephemeris path, in search order.
    pub fn search_dirs(&self) -> Vec<PathBuf> {
        match &self.ephemeris_path {
            Some(path) => std::env::split_paths(path)
                .filter(|p| !p.as_os_str().is_empty())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Leap-second table, extended from the first `seleapsec.txt` found on
    /// the ephemeris path.  Falls back to the built-in table.
    pub fn leap_seconds(&self) -> Result<LeapSeconds, EphemerisError> {
        for dir in self.search_dirs() {
            if dir.join(LeapSeconds::FILE_NAME).is_file() {
                return Ok(LeapSeconds::load(&dir)?);
            }
        }
        Ok(LeapSeconds::builtin())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Typed selectors
// ═══════════════════════════════════════════════════════════════════════════

/// Body selector, numerically identical to the `SE_*` body ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub i32);

impl BodyId {
    pub const ECL_NUT: Self = Self(SE_ECL_NUT);
    pub const SUN: Self = Self(SE_SUN);
    pub const MOON: Self = Self(SE_MOON);
    pub const MERCURY: Self = Self(SE_MERCURY);
    pub const VENUS: Self = Self(SE_VENUS);
    pub const MARS: Self = Self(SE_MARS);
    pub const JUPITER: Self = Self(SE_JUPITER);
    pub const SATURN: Self = Self(SE_SATURN);
    pub const URANUS: Self = Self(SE_URANUS);
    pub const NEPTUNE: Self = Self(SE_NEPTUNE);
    pub const PLUTO: Self = Self(SE_PLUTO);
    pub const MEAN_NODE: Self = Self(SE_MEAN_NODE);
    pub const TRUE_NODE: Self = Self(SE_TRUE_NODE);
    pub const MEAN_APOG: Self = Self(SE_MEAN_APOG);
    pub const OSCU_APOG: Self = Self(SE_OSCU_APOG);
    pub const EARTH: Self = Self(SE_EARTH);
    pub const CHIRON: Self = Self(SE_CHIRON);
    pub const PHOLUS: Self = Self(SE_PHOLUS);
    pub const CERES: Self = Self(SE_CERES);
    pub const PALLAS: Self = Self(SE_PALLAS);
    pub const JUNO: Self = Self(SE_JUNO);
    pub const VESTA: Self = Self(SE_VESTA);
    pub const INTP_APOG: Self = Self(SE_INTP_APOG);
    pub const INTP_PERG: Self = Self(SE_INTP_PERG);

    /// Numbered minor planet (MPC catalogue number).
    pub const fn asteroid(number: i32) -> Self {
        Self(SE_AST_OFFSET + number)
    }

    /// Planetary moon, numbered relative to `SE_PLMOON_OFFSET` (`planetary_moon(501)` is Io).
    pub const fn planetary_moon(id: i32) -> Self {
        Self(SE_PLMOON_OFFSET + id)
    }

    #[inline]
    pub const fn id(self) -> i32 {
        self.0
    }
}

/// Calculation flag bitmask, numerically identical to `SEFLG_*`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CalcFlags(i32);

impl CalcFlags {
    pub const JPLEPH: Self = Self(SEFLG_JPLEPH);
    pub const SWIEPH: Self = Self(SEFLG_SWIEPH);
    pub const MOSEPH: Self = Self(SEFLG_MOSEPH);
    pub const HELCTR: Self = Self(SEFLG_HELCTR);
    pub const TRUEPOS: Self = Self(SEFLG_TRUEPOS);
    pub const J2000: Self = Self(SEFLG_J2000);
    pub const NONUT: Self = Self(SEFLG_NONUT);
    pub const SPEED: Self = Self(SEFLG_SPEED);
    pub const NOGDEFL: Self = Self(SEFLG_NOGDEFL);
    pub const NOABERR: Self = Self(SEFLG_NOABERR);
    pub const ASTROMETRIC: Self = Self(SEFLG_ASTROMETRIC);
    pub const EQUATORIAL: Self = Self(SEFLG_EQUATORIAL);
    pub const XYZ: Self = Self(SEFLG_XYZ);
    pub const RADIANS: Self = Self(SEFLG_RADIANS);
    pub const BARYCTR: Self = Self(SEFLG_BARYCTR);
    pub const TOPOCTR: Self = Self(SEFLG_TOPOCTR);
    pub const SIDEREAL: Self = Self(SEFLG_SIDEREAL);
    pub const ICRS: Self = Self(SEFLG_ICRS);
    pub const CENTER_BODY: Self = Self(SEFLG_CENTER_BODY);

    #[inline]
    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn bits(self) -> i32 {
        self.0
    }

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Ephemeris source bits (`SEFLG_EPHMASK`); empty means the default.
    #[inline]
    pub const fn ephemeris(self) -> Self {
        Self(self.0 & SEFLG_EPHMASK)
    }
}

impl BitOr for CalcFlags {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CalcFlags {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for CalcFlags {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Debug for CalcFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CalcFlags({:#x})", self.0)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Results
// ═══════════════════════════════════════════════════════════════════════════

/// Six-component result of a position lookup.
///
/// Polar by default (longitude, latitude, distance and their daily rates);
/// with `XYZ` the components are cartesian.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub longitude: f64,
    pub latitude: f64,
    pub distance: f64,
    pub speed_longitude: f64,
    pub speed_latitude: f64,
    pub speed_distance: f64,
}

impl From<[f64; 6]> for Position {
    fn from(xx: [f64; 6]) -> Self {
        Self {
            longitude: xx[0],
            latitude: xx[1],
            distance: xx[2],
            speed_longitude: xx[3],
            speed_latitude: xx[4],
            speed_distance: xx[5],
        }
    }
}

impl From<Position> for [f64; 6] {
    fn from(p: Position) -> Self {
        [
            p.longitude,
            p.latitude,
            p.distance,
            p.speed_longitude,
            p.speed_latitude,
            p.speed_distance,
        ]
    }
}

/// Fixed star lookup result.  `name` is the catalogue name the backend
/// resolved the query to (`"Aldebaran,alTau"` for `"Aldebaran"`).
#[derive(Debug, Clone, PartialEq)]
pub struct StarPosition {
    pub name: String,
    pub position: Position,
}

// ═══════════════════════════════════════════════════════════════════════════
// Backend + facade
// ═══════════════════════════════════════════════════════════════════════════

/// An ephemeris implementation.
///
/// Implementations receive the whole configuration on each call and must
/// not rely on earlier calls.  Whether a backend may be shared between
/// threads is expressed through `Send`/`Sync` on the implementing type.
pub trait EphemerisBackend {
    /// Position and speed of `body` at a UT Julian day.
    fn position_ut(
        &self,
        config: &EphemerisConfig,
        jd: Time<UT>,
        body: BodyId,
        flags: CalcFlags,
    ) -> Result<Position, EphemerisError>;

    /// Position of a catalogued fixed star identified by name.
    fn fixed_star_ut(
        &self,
        config: &EphemerisConfig,
        name: &str,
        jd: Time<UT>,
        flags: CalcFlags,
    ) -> Result<StarPosition, EphemerisError>;
}

impl<B: EphemerisBackend + ?Sized> EphemerisBackend for &B {
    fn position_ut(
        &self,
        config: &EphemerisConfig,
        jd: Time<UT>,
        body: BodyId,
        flags: CalcFlags,
    ) -> Result<Position, EphemerisError> {
        (**self).position_ut(config, jd, body, flags)
    }

    fn fixed_star_ut(
        &self,
        config: &EphemerisConfig,
        name: &str,
        jd: Time<UT>,
        flags: CalcFlags,
    ) -> Result<StarPosition, EphemerisError> {
        (**self).fixed_star_ut(config, name, jd, flags)
    }
}

/// A backend bound to one configuration.
#[derive(Debug, Clone)]
pub struct Ephemeris<B> {
    backend: B,
    config: EphemerisConfig,
}

impl<B: EphemerisBackend> Ephemeris<B> {
    pub fn new(backend: B, config: EphemerisConfig) -> Self {
        Self { backend, config }
    }

    pub fn config(&self) -> &EphemerisConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Same backend, different configuration.
    pub fn with_config(self, config: EphemerisConfig) -> Self {
        Self { config, ..self }
    }

    /// Position of `body`; backend failures are returned unchanged.
    pub fn position_ut(
        &self,
        jd: Time<UT>,
        body: BodyId,
        flags: CalcFlags,
    ) -> Result<Position, EphemerisError> {
        self.check_flags(flags)?;
        debug!(jd = jd.value(), body = body.id(), flags = flags.bits(), "position lookup");
        self.backend.position_ut(&self.config, jd, body, flags)
    }

    /// [`Self::position_ut`] for a UT calendar date.
    pub fn position_at(
        &self,
        date: CalendarDate,
        system: CalendarSystem,
        body: BodyId,
        flags: CalcFlags,
    ) -> Result<Position, EphemerisError> {
        self.position_ut(Time::<UT>::from_calendar(date, system), body, flags)
    }

    /// Position of a fixed star; surrounding whitespace in `name` is ignored.
    pub fn fixed_star_ut(
        &self,
        name: &str,
        jd: Time<UT>,
        flags: CalcFlags,
    ) -> Result<StarPosition, EphemerisError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EphemerisError::EmptyStarName);
        }
        self.check_flags(flags)?;
        debug!(jd = jd.value(), star = name, flags = flags.bits(), "fixed star lookup");
        self.backend.fixed_star_ut(&self.config, name, jd, flags)
    }

    fn check_flags(&self, flags: CalcFlags) -> Result<(), EphemerisError> {
        if flags.contains(CalcFlags::TOPOCTR) && self.config.topocentric.is_none() {
            return Err(EphemerisError::MissingTopocentricLocation);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records what it was called with; answers with the Julian day in
    /// the longitude slot and the observer altitude in the distance slot.
    #[derive(Default)]
    struct Recorder {
        seen: RefCell<Vec<(Option<PathBuf>, i32, i32)>>,
    }

    impl EphemerisBackend for Recorder {
        fn position_ut(
            &self,
            config: &EphemerisConfig,
            jd: Time<UT>,
            body: BodyId,
            flags: CalcFlags,
        ) -> Result<Position, EphemerisError> {
            self.seen.borrow_mut().push((
                config.ephemeris_path().map(Path::to_path_buf),
                body.id(),
                flags.bits(),
            ));
            if body == BodyId::asteroid(99_999) {
                return Err(EphemerisError::backend("seas_99.se1 not found"));
            }
            let altitude = config.topocentric().map_or(0.0, |g| g.altitude);
            Ok(Position::from([jd.value(), 0.0, altitude, 0.0, 0.0, 0.0]))
        }

        fn fixed_star_ut(
            &self,
            _config: &EphemerisConfig,
            name: &str,
            _jd: Time<UT>,
            _flags: CalcFlags,
        ) -> Result<StarPosition, EphemerisError> {
            match name {
                "Aldebaran" => Ok(StarPosition {
                    name: "Aldebaran,alTau".to_owned(),
                    position: Position::from([69.79, -5.47, 0.0, 0.0, 0.0, 0.0]),
                }),
                other => Err(EphemerisError::backend(format!("star {other} not found"))),
            }
        }
    }

    #[test]
    fn config_is_passed_on_every_call() {
        let config = EphemerisConfig::new().with_ephemeris_path("/data/ephe");
        let eph = Ephemeris::new(Recorder::default(), config);
        let jd = Time::<UT>::new(2_451_545.0);

        eph.position_ut(jd, BodyId::SUN, CalcFlags::SWIEPH).unwrap();
        eph.position_ut(jd, BodyId::MARS, CalcFlags::SWIEPH | CalcFlags::SPEED)
            .unwrap();

        let seen = eph.backend().seen.borrow();
        assert_eq!(seen.len(), 2);
        assert!(seen
            .iter()
            .all(|(path, _, _)| path.as_deref() == Some(Path::new("/data/ephe"))));
        assert_eq!(seen[1].1, SE_MARS);
        assert_eq!(seen[1].2, SEFLG_SWIEPH | SEFLG_SPEED);
    }

    #[test]
    fn topocentric_needs_a_location() {
        let eph = Ephemeris::new(Recorder::default(), EphemerisConfig::new());
        let jd = Time::<UT>::new(2_451_545.0);
        let err = eph
            .position_ut(jd, BodyId::MOON, CalcFlags::TOPOCTR)
            .unwrap_err();
        assert!(matches!(err, EphemerisError::MissingTopocentricLocation));
        assert!(eph.backend().seen.borrow().is_empty());

        let eph = eph.with_config(
            EphemerisConfig::new().with_topocentric_location(GeoPosition::new(0.0, 51.5, 35.0)),
        );
        let pos = eph.position_ut(jd, BodyId::MOON, CalcFlags::TOPOCTR).unwrap();
        assert_eq!(pos.distance, 35.0);
    }

    #[test]
    fn backend_errors_surface_unchanged() {
        let eph = Ephemeris::new(Recorder::default(), EphemerisConfig::new());
        let err = eph
            .position_ut(
                Time::<UT>::new(2_451_545.0),
                BodyId::asteroid(99_999),
                CalcFlags::SWIEPH,
            )
            .unwrap_err();
        match err {
            EphemerisError::Backend { code, message } => {
                assert_eq!(code, SE_ERR);
                assert_eq!(message, "seas_99.se1 not found");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn position_at_calendar_date() {
        let eph = Ephemeris::new(Recorder::default(), EphemerisConfig::new());
        let pos = eph
            .position_at(
                CalendarDate::new(2000, 1, 1, 12.0),
                CalendarSystem::Gregorian,
                BodyId::SUN,
                CalcFlags::default(),
            )
            .unwrap();
        assert_eq!(pos.longitude, 2_451_545.0);
    }

    #[test]
    fn fixed_star_lookup() {
        let eph = Ephemeris::new(Recorder::default(), EphemerisConfig::new());
        let jd = Time::<UT>::new(2_451_545.0);
        let star = eph.fixed_star_ut("  Aldebaran ", jd, CalcFlags::SWIEPH).unwrap();
        assert_eq!(star.name, "Aldebaran,alTau");
        assert!(matches!(
            eph.fixed_star_ut("   ", jd, CalcFlags::SWIEPH),
            Err(EphemerisError::EmptyStarName)
        ));
        assert!(matches!(
            eph.fixed_star_ut("Vulcan", jd, CalcFlags::SWIEPH),
            Err(EphemerisError::Backend { .. })
        ));
    }

    #[test]
    fn flag_algebra() {
        let flags = CalcFlags::MOSEPH | CalcFlags::SPEED | CalcFlags::EQUATORIAL;
        assert!(flags.contains(CalcFlags::SPEED));
        assert!(!flags.contains(CalcFlags::TOPOCTR));
        assert_eq!(flags.ephemeris(), CalcFlags::MOSEPH);
        assert_eq!((flags & CalcFlags::SPEED).bits(), SEFLG_SPEED);
        assert_eq!(CalcFlags::ASTROMETRIC.bits(), SEFLG_NOABERR | SEFLG_NOGDEFL);
    }

    #[test]
    fn body_offsets() {
        assert_eq!(BodyId::asteroid(433).id(), 10_433);
        assert_eq!(BodyId::planetary_moon(501).id(), 9_501);
    }

    #[test]
    fn search_dirs_split_the_path() {
        let joined = std::env::join_paths(["/a/ephe", "/b/ephe"]).unwrap();
        let config = EphemerisConfig::new().with_ephemeris_path(PathBuf::from(joined));
        assert_eq!(
            config.search_dirs(),
            vec![PathBuf::from("/a/ephe"), PathBuf::from("/b/ephe")]
        );
        assert!(EphemerisConfig::new().search_dirs().is_empty());
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("swecal-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn leap_file_found_on_later_path_entry() {
        let first = scratch_dir("ephe-first");
        let second = scratch_dir("ephe-second");
        std::fs::write(second.join(LeapSeconds::FILE_NAME), "# extra\n20291231\n").unwrap();

        let path = std::env::join_paths([&first, &second]).unwrap();
        let config = EphemerisConfig::new().with_ephemeris_path(path);
        assert_eq!(config.search_dirs(), vec![first.clone(), second.clone()]);

        let leap = config.leap_seconds().unwrap();
        assert!(leap.is_leap_day(20291231));
        assert_eq!(leap.expires(), 20291231);

        std::fs::remove_dir_all(&first).unwrap();
        std::fs::remove_dir_all(&second).unwrap();
    }

    #[test]
    fn leap_table_falls_back_to_builtin() {
        let empty = scratch_dir("ephe-empty");
        let config = EphemerisConfig::new().with_ephemeris_path(&empty);
        assert_eq!(config.leap_seconds().unwrap(), LeapSeconds::builtin());
        assert_eq!(
            EphemerisConfig::new().leap_seconds().unwrap(),
            LeapSeconds::builtin()
        );
        std::fs::remove_dir_all(&empty).unwrap();
    }

    #[test]
    fn malformed_leap_file_is_reported() {
        let dir = scratch_dir("ephe-malformed");
        std::fs::write(dir.join(LeapSeconds::FILE_NAME), "2029-12-31\n").unwrap();

        let config = EphemerisConfig::new().with_ephemeris_path(&dir);
        assert!(matches!(
            config.leap_seconds(),
            Err(EphemerisError::Time(TimeError::LeapSecondEntry { .. }))
        ));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
