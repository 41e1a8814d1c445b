//! # almanac-engine
//!
//! Deterministic conversion between calendar systems: Gregorian, Jalali
//! (Persian), Hijri (Islamic, civil), Hebrew, Buddhist, Coptic, Ethiopian,
//! and the Chinese lunisolar calendar.
//!
//! Every conversion routes through one continuous day count ([`RataDie`]),
//! evaluated at UTC midnight, so each calendar needs only a forward and an
//! inverse rule and the engine stays free of timezone and DST effects. All
//! operations are synchronous, in-memory, pure computation: no I/O, no
//! clock access, no locale handling.
//!
//! # Design Principle
//!
//! Invalid input is rejected, never repaired. A triple that cannot exist in
//! its calendar — day 30 of a 29-day month, a leap month the year does not
//! have — is an error, not a nearby valid date. The one place the engine
//! may guess is the documented Chinese leap-month fallback, and callers can
//! opt out of it by supplying the leap flag explicitly.
//!
//! # Modules
//!
//! - [`converter`] — calendar registry and the per-calendar converters
//! - [`rules`] — forward/inverse day-count rules for each calendar
//! - [`chinese`] — lunisolar table, leap-month disambiguation, cache
//! - [`format`] — placeholder patterns and delimiter handling
//! - [`translit`] — ASCII ↔ Persian digit substitution
//! - [`types`] — calendar identifiers, date triples, the day count
//! - [`error`] — error types
//!
//! # Examples
//!
//! ```
//! use almanac_engine::resolve;
//!
//! let jalali = resolve("jalali").unwrap();
//! assert_eq!(
//!     jalali.from_gregorian_formatted(2025, 8, 13, "/").unwrap(),
//!     "1404/05/22"
//! );
//!
//! let hebrew = resolve("hebrew").unwrap();
//! let date = hebrew.from_gregorian(2025, 9, 23).unwrap();
//! assert_eq!(date.triple(), (5786, 1, 1));
//! ```

pub mod chinese;
pub mod converter;
pub mod error;
pub mod format;
pub mod rules;
pub mod translit;
pub mod types;

pub use chinese::{ChineseDate, LeapMonthCache};
pub use converter::{resolve, Converter};
pub use error::{CalendarError, Result};
pub use format::{detect_delimiter, format_pattern, join_with_delimiter};
pub use types::{CalendarDate, CalendarId, RataDie};
