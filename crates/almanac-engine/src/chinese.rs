//! Chinese lunisolar calendar rules and leap-month disambiguation.
//!
//! Months track the moon, so a year holds twelve 29- or 30-day months, with
//! a thirteenth leap month inserted in seven years of every nineteen to keep
//! the year aligned with the sun. The leap month repeats the number of the
//! month it follows, which makes a bare `(year, month, day)` triple
//! ambiguous: in a year whose leap month is 6, month 6 day 10 names two
//! different days. [`ChineseDate`] carries the explicit leap flag and is the
//! lossless representation; the converter layer resolves bare triples with a
//! [`LeapMonthCache`] and a documented fallback.
//!
//! The month lengths and leap placements come from a precomputed table
//! covering 1900 through 2100, anchored at the new year of 1900-01-31. This
//! is a table-driven approximation of the astronomical calendar (new moons
//! and solar terms observed at UTC+8), not an ephemeris computation; dates
//! outside the table's span are reported as unavailable.
//!
//! Years are numbered by the Gregorian year containing their first day, so
//! the year that began on 2025-01-29 is year 2025.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::error::{CalendarError, Result};
use crate::types::{CalendarId, RataDie};

// ── Year table ──────────────────────────────────────────────────────────────

/// First year covered by [`LUNAR_YEARS`].
pub const FIRST_YEAR: i32 = 1900;
/// Last year covered by [`LUNAR_YEARS`].
pub const LAST_YEAR: i32 = 2100;

/// One packed entry per year 1900..=2100.
///
/// Bits 4..=15 hold the lengths of months 1..=12 (bit 15 is month 1; set
/// means 30 days, clear 29). Bits 0..=3 hold the leap-month number, 0 when
/// the year has none. Bit 16 set means the leap month has 30 days.
const LUNAR_YEARS: [u32; 201] = [
    0x04bd8, 0x04ae0, 0x0a570, 0x054d5, 0x0d260, 0x0d950, 0x16554, 0x056a0, 0x09ad0, 0x055d2,
    0x04ae0, 0x0a5b6, 0x0a4d0, 0x0d250, 0x1d255, 0x0b540, 0x0d6a0, 0x0ada2, 0x095b0, 0x14977,
    0x04970, 0x0a4b0, 0x0b4b5, 0x06a50, 0x06d40, 0x1ab54, 0x02b60, 0x09570, 0x052f2, 0x04970,
    0x06566, 0x0d4a0, 0x0ea50, 0x06e95, 0x05ad0, 0x02b60, 0x186e3, 0x092e0, 0x1c8d7, 0x0c950,
    0x0d4a0, 0x1d8a6, 0x0b550, 0x056a0, 0x1a5b4, 0x025d0, 0x092d0, 0x0d2b2, 0x0a950, 0x0b557,
    0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5b0, 0x14573, 0x052b0, 0x0a9a8, 0x0e950, 0x06aa0,
    0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, 0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0,
    0x096d0, 0x04dd5, 0x04ad0, 0x0a4d0, 0x0d4d4, 0x0d250, 0x0d558, 0x0b540, 0x0b5a0, 0x195a6,
    0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, 0x06a50, 0x06d40, 0x0af46, 0x0ab60, 0x09570,
    0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, 0x06b58, 0x05ac0, 0x0ab60, 0x096d5, 0x092e0,
    0x0c960, 0x0d954, 0x0d4a0, 0x0da50, 0x07552, 0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5,
    0x0a950, 0x0b4a0, 0x0baa4, 0x0ad50, 0x055d9, 0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930,
    0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, 0x0a6e6, 0x0a4e0, 0x0d260, 0x0ea65, 0x0d530,
    0x05aa0, 0x076a3, 0x096d0, 0x04afb, 0x04ad0, 0x0a4d0, 0x1d0b6, 0x0d250, 0x0d520, 0x0dd45,
    0x0b5a0, 0x056d0, 0x055b2, 0x049b0, 0x0a577, 0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0,
    0x14b63, 0x09370, 0x049f8, 0x04970, 0x064b0, 0x168a6, 0x0ea50, 0x06b20, 0x1a6c4, 0x0aae0,
    0x0a2e0, 0x0d2e3, 0x0c960, 0x0d557, 0x0d4a0, 0x0da50, 0x05d55, 0x056a0, 0x0a6d0, 0x055d4,
    0x052d0, 0x0a9b8, 0x0a950, 0x0b4a0, 0x0b6a6, 0x0ad50, 0x055a0, 0x0aba4, 0x0a5b0, 0x052b0,
    0x0b273, 0x06930, 0x07337, 0x06aa0, 0x0ad50, 0x14b55, 0x04b60, 0x0a570, 0x054e4, 0x0d160,
    0x0e968, 0x0d520, 0x0daa0, 0x16aa6, 0x056d0, 0x04ae0, 0x0a9d4, 0x0a2d0, 0x0d150, 0x0f252,
    0x0d520,
];

/// Day count of month 1, day 1 of year 1900 (Gregorian 1900-01-31).
const ANCHOR_RD: i64 = 693_626;

/// Day counts of month 1, day 1 for every year 1900..=2101; the final entry
/// bounds the last supported day.
static NEW_YEARS: Lazy<Vec<i64>> = Lazy::new(|| {
    let mut starts = Vec::with_capacity(LUNAR_YEARS.len() + 1);
    let mut rd = ANCHOR_RD;
    for year in FIRST_YEAR..=LAST_YEAR {
        starts.push(rd);
        rd += year_days(year);
    }
    starts.push(rd);
    starts
});

fn year_entry(year: i32) -> Result<u32> {
    if (FIRST_YEAR..=LAST_YEAR).contains(&year) {
        Ok(LUNAR_YEARS[(year - FIRST_YEAR) as usize])
    } else {
        Err(unsupported_span())
    }
}

fn unsupported_span() -> CalendarError {
    CalendarError::Environment(format!(
        "Chinese calendar data covers years {FIRST_YEAR}..={LAST_YEAR}"
    ))
}

/// The leap-month number of a year, or `None` when it has none.
pub fn leap_month(year: i32) -> Result<Option<u32>> {
    let entry = year_entry(year)?;
    Ok(match entry & 0xf {
        0 => None,
        m => Some(m),
    })
}

fn leap_month_days(entry: u32) -> u32 {
    if entry & 0x10000 != 0 {
        30
    } else {
        29
    }
}

fn regular_month_days(entry: u32, month: u32) -> u32 {
    if entry & (0x8000 >> (month - 1)) != 0 {
        30
    } else {
        29
    }
}

fn year_days(year: i32) -> i64 {
    let entry = LUNAR_YEARS[(year - FIRST_YEAR) as usize];
    let mut days: i64 = 0;
    for month in 1..=12 {
        days += i64::from(regular_month_days(entry, month));
    }
    if entry & 0xf != 0 {
        days += i64::from(leap_month_days(entry));
    }
    days
}

/// Iterate a year's months in calendar order as `(month, leap, days)`,
/// with the leap month immediately after the regular month it repeats.
fn months_of(entry: u32) -> impl Iterator<Item = (u32, bool, u32)> {
    let leap = entry & 0xf;
    (1..=12u32).flat_map(move |month| {
        let regular = (month, false, regular_month_days(entry, month));
        let inserted = (leap != 0 && month == leap).then(|| (month, true, leap_month_days(entry)));
        std::iter::once(regular).chain(inserted)
    })
}

// ── ChineseDate ─────────────────────────────────────────────────────────────

/// A Chinese lunisolar date with its leap-month flag made explicit.
///
/// This is the lossless form: converting through [`to_rata_die`] never
/// guesses. The bare-triple converter surface drops the flag and relies on
/// the disambiguation protocol instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChineseDate {
    pub year: i32,
    pub month: u32,
    /// True when this date falls in the year's inserted leap month.
    pub leap: bool,
    pub day: u32,
}

/// Convert a day count to the Chinese date containing it, leap flag included.
///
/// # Errors
///
/// Returns [`CalendarError::Environment`] when the day count falls outside
/// the table's span.
pub fn from_rata_die(rd: RataDie) -> Result<ChineseDate> {
    let day = rd.to_i64();
    let starts = &*NEW_YEARS;
    if day < starts[0] || day >= starts[starts.len() - 1] {
        return Err(unsupported_span());
    }

    let index = starts.partition_point(|&start| start <= day) - 1;
    let year = FIRST_YEAR + index as i32;
    let entry = LUNAR_YEARS[index];

    let mut offset = day - starts[index];
    for (month, leap, days) in months_of(entry) {
        if offset < i64::from(days) {
            return Ok(ChineseDate {
                year,
                month,
                leap,
                day: offset as u32 + 1,
            });
        }
        offset -= i64::from(days);
    }
    // months_of always covers year_days(year) days.
    unreachable!("day offset exceeded Chinese year length");
}

/// Convert a Chinese date to its day count.
///
/// # Errors
///
/// Returns [`CalendarError::FieldOutOfRange`] when the month or day does not
/// exist in that year — including a leap flag naming a month the year does
/// not repeat — or [`CalendarError::Environment`] outside the table's span.
pub fn to_rata_die(date: ChineseDate) -> Result<RataDie> {
    let entry = year_entry(date.year)?;
    let out_of_range =
        || CalendarError::out_of_range(CalendarId::Chinese, date.year, date.month, date.day);

    if !(1..=12).contains(&date.month) {
        return Err(out_of_range());
    }
    if date.leap && entry & 0xf != date.month {
        return Err(out_of_range());
    }

    let start = NEW_YEARS[(date.year - FIRST_YEAR) as usize];
    let mut offset: i64 = 0;
    for (month, leap, days) in months_of(entry) {
        if month == date.month && leap == date.leap {
            if date.day < 1 || date.day > days {
                return Err(out_of_range());
            }
            return Ok(RataDie::new(start + offset + i64::from(date.day) - 1));
        }
        offset += i64::from(days);
    }
    Err(out_of_range())
}

/// Both readings of a bare triple, regular first, where each is valid.
pub(crate) fn candidate_readings(
    year: i32,
    month: u32,
    day: u32,
) -> (Result<RataDie>, Result<RataDie>) {
    let regular = to_rata_die(ChineseDate {
        year,
        month,
        leap: false,
        day,
    });
    let leap = to_rata_die(ChineseDate {
        year,
        month,
        leap: true,
        day,
    });
    (regular, leap)
}

/// Position of a year in the sexagenary cycle, 1..=60.
///
/// Year 1 of the cycle is jiǎzǐ; 1984 and 2044 open cycles, and 2000 is
/// year 17, gēngchén.
pub fn sexagenary_year(year: i32) -> u32 {
    (year.rem_euclid(60) as u32 + 2696) % 60 + 1
}

// ── Leap-month cache ────────────────────────────────────────────────────────

/// Default capacity of [`LeapMonthCache`].
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Bounded memory of leap flags observed by forward conversions.
///
/// A forward (Gregorian → Chinese) conversion knows the true leap flag of
/// the triple it produces and records it here, overwriting any earlier
/// entry for the same triple. A reverse conversion consults the recorded
/// flag to pick the correct reading of an ambiguous triple. When the cache
/// is full the least recently touched entry is evicted, so the memory held
/// per converter instance stays bounded at `capacity` entries.
#[derive(Debug)]
pub struct LeapMonthCache {
    capacity: usize,
    clock: u64,
    entries: HashMap<(i32, u32, u32), (bool, u64)>,
}

impl LeapMonthCache {
    /// A cache holding at most `capacity` entries; at least one is kept.
    pub fn new(capacity: usize) -> Self {
        LeapMonthCache {
            capacity: capacity.max(1),
            clock: 0,
            entries: HashMap::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record the leap flag for a triple, overwriting any prior entry.
    pub fn record(&mut self, year: i32, month: u32, day: u32, leap: bool) {
        self.clock += 1;
        let stamp = self.clock;
        self.entries.insert((year, month, day), (leap, stamp));
        if self.entries.len() > self.capacity {
            if let Some(&oldest) = self
                .entries
                .iter()
                .min_by_key(|(_, &(_, touched))| touched)
                .map(|(key, _)| key)
            {
                self.entries.remove(&oldest);
            }
        }
    }

    /// Fetch the recorded flag for a triple, refreshing its recency.
    pub fn lookup(&mut self, year: i32, month: u32, day: u32) -> Option<bool> {
        self.clock += 1;
        let stamp = self.clock;
        self.entries.get_mut(&(year, month, day)).map(|entry| {
            entry.1 = stamp;
            entry.0
        })
    }
}

impl Default for LeapMonthCache {
    fn default() -> Self {
        LeapMonthCache::new(DEFAULT_CACHE_CAPACITY)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
