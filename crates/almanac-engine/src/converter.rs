//! Calendar registry and per-calendar converters.
//!
//! [`resolve`] maps a calendar key (or alias) to a [`Converter`], the
//! adapter the out-of-scope parsing/CLI layer talks to. Each converter is a
//! thin policy layer over [`crate::rules`]: it names its calendar and pairs
//! the two day-count rules into `from_gregorian`/`to_gregorian`. The one
//! exception is Chinese, whose bare triples are ambiguous; that converter
//! owns a [`LeapMonthCache`] and applies the disambiguation protocol
//! described on [`Converter::to_gregorian`].

use std::sync::Mutex;

use crate::chinese::{self, LeapMonthCache};
use crate::error::{CalendarError, Result};
use crate::format;
use crate::rules;
use crate::types::{CalendarDate, CalendarId, RataDie};

/// Resolve a calendar key to a converter.
///
/// Keys are case-insensitive and aliases are recognized: `persian` for
/// `jalali`, `islamic` for `hijri`, `ethiopic` for `ethiopian`.
///
/// # Errors
///
/// Returns [`CalendarError::UnsupportedCalendar`] naming the key when it
/// matches no supported calendar.
///
/// # Examples
///
/// ```
/// use almanac_engine::resolve;
///
/// let converter = resolve("persian").unwrap();
/// assert_eq!(converter.key(), "jalali");
///
/// let date = converter.from_gregorian(2025, 8, 13).unwrap();
/// assert_eq!(date.triple(), (1404, 5, 22));
/// ```
pub fn resolve(key: &str) -> Result<Converter> {
    let id = CalendarId::from_key(key).ok_or_else(|| CalendarError::UnsupportedCalendar {
        key: key.to_string(),
    })?;
    Ok(Converter::new(id))
}

/// A converter between one calendar and Gregorian.
///
/// Converters are stateless except for the Chinese one, which carries the
/// leap-month disambiguation cache. The cache makes forward conversions
/// visible to later reverse conversions on the **same instance**; sharing
/// one instance across threads is safe (the cache sits behind a lock), but
/// the forward-then-reverse round-trip guarantee requires the two calls to
/// be ordered, e.g. by happening on one thread.
#[derive(Debug)]
pub struct Converter {
    id: CalendarId,
    leap_cache: Option<Mutex<LeapMonthCache>>,
}

impl Converter {
    /// A converter for the given calendar, with the default cache capacity
    /// where one is needed.
    pub fn new(id: CalendarId) -> Self {
        let leap_cache = match id {
            CalendarId::Chinese => Some(Mutex::new(LeapMonthCache::default())),
            _ => None,
        };
        Converter { id, leap_cache }
    }

    /// A converter whose disambiguation cache holds at most `capacity`
    /// entries. Capacity only affects the Chinese converter; for every
    /// other calendar this is identical to [`Converter::new`].
    pub fn with_cache_capacity(id: CalendarId, capacity: usize) -> Self {
        let leap_cache = match id {
            CalendarId::Chinese => Some(Mutex::new(LeapMonthCache::new(capacity))),
            _ => None,
        };
        Converter { id, leap_cache }
    }

    /// The canonical identifier of this converter's calendar.
    pub fn key(&self) -> &'static str {
        self.id.canonical_key()
    }

    pub fn id(&self) -> CalendarId {
        self.id
    }

    /// Convert a Gregorian date into this calendar.
    ///
    /// For the Chinese converter this also records the computed leap-month
    /// flag so a later [`to_gregorian`](Converter::to_gregorian) of the
    /// returned triple resolves exactly.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::FieldOutOfRange`] for an invalid Gregorian
    /// triple, or [`CalendarError::Environment`] when the date falls outside
    /// the target calendar's supported span.
    pub fn from_gregorian(&self, year: i32, month: u32, day: u32) -> Result<CalendarDate> {
        let rd = rules::to_rata_die(CalendarId::Gregorian, year, month, day)?;
        if self.id == CalendarId::Chinese {
            let date = chinese::from_rata_die(rd)?;
            self.record_leap_flag(date.year, date.month, date.day, date.leap);
            Ok(CalendarDate::new(
                CalendarId::Chinese,
                date.year,
                date.month,
                date.day,
            ))
        } else {
            rules::from_rata_die(self.id, rd)
        }
    }

    /// Convert a date in this calendar into Gregorian.
    ///
    /// Chinese triples are ambiguous in years with a leap month. This
    /// converter resolves them in order of preference:
    ///
    /// 1. a leap flag previously recorded by
    ///    [`from_gregorian`](Converter::from_gregorian) on this instance;
    /// 2. the single structurally valid reading, when only one exists;
    /// 3. otherwise the chronologically later Gregorian candidate, i.e. the
    ///    leap-month reading.
    ///
    /// Step 3 is a heuristic, not a semantic guarantee. Callers that know
    /// the leap flag should use [`crate::chinese::ChineseDate`] with
    /// [`crate::chinese::to_rata_die`], which never guesses.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::FieldOutOfRange`] when the triple cannot
    /// exist in this calendar, or [`CalendarError::Environment`] outside a
    /// table-driven calendar's supported span.
    pub fn to_gregorian(&self, year: i32, month: u32, day: u32) -> Result<CalendarDate> {
        let rd = if self.id == CalendarId::Chinese {
            self.chinese_to_rata_die(year, month, day)?
        } else {
            rules::to_rata_die(self.id, year, month, day)?
        };
        rules::from_rata_die(CalendarId::Gregorian, rd)
    }

    /// [`from_gregorian`](Converter::from_gregorian), rendered as
    /// `"YYYY{delimiter}MM{delimiter}DD"`.
    pub fn from_gregorian_formatted(
        &self,
        year: i32,
        month: u32,
        day: u32,
        delimiter: &str,
    ) -> Result<String> {
        let date = self.from_gregorian(year, month, day)?;
        Ok(format::join_with_delimiter(
            date.year, date.month, date.day, delimiter,
        ))
    }

    /// [`to_gregorian`](Converter::to_gregorian), rendered as
    /// `"YYYY{delimiter}MM{delimiter}DD"`.
    pub fn to_gregorian_formatted(
        &self,
        year: i32,
        month: u32,
        day: u32,
        delimiter: &str,
    ) -> Result<String> {
        let date = self.to_gregorian(year, month, day)?;
        Ok(format::join_with_delimiter(
            date.year, date.month, date.day, delimiter,
        ))
    }

    fn record_leap_flag(&self, year: i32, month: u32, day: u32, leap: bool) {
        if let Some(cache) = &self.leap_cache {
            let mut cache = cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            cache.record(year, month, day, leap);
        }
    }

    fn recorded_leap_flag(&self, year: i32, month: u32, day: u32) -> Option<bool> {
        let cache = self.leap_cache.as_ref()?;
        let mut cache = cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        cache.lookup(year, month, day)
    }

    fn chinese_to_rata_die(&self, year: i32, month: u32, day: u32) -> Result<RataDie> {
        let (regular, leap) = chinese::candidate_readings(year, month, day);
        match (regular, leap) {
            (Ok(regular), Ok(leap)) => match self.recorded_leap_flag(year, month, day) {
                Some(true) => Ok(leap),
                Some(false) => Ok(regular),
                // The leap month follows the regular month it repeats, so
                // the later candidate is the leap reading.
                None => Ok(regular.max(leap)),
            },
            (Ok(regular), Err(_)) => Ok(regular),
            (Err(_), Ok(leap)) => Ok(leap),
            (Err(err), Err(_)) => Err(err),
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
