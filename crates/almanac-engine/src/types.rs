//! Core value types: calendar identifiers, tagged date triples, and the
//! day-count coordinate every conversion routes through.

use std::fmt;

use serde::Serialize;

// ── CalendarId ──────────────────────────────────────────────────────────────

/// The closed set of supported calendar systems.
///
/// Every identifier has a lowercase canonical key (see [`CalendarId::canonical_key`])
/// and may have aliases: `"persian"` resolves to [`CalendarId::Jalali`],
/// `"islamic"` to [`CalendarId::Hijri`], and `"ethiopic"` to
/// [`CalendarId::Ethiopian`]. Key lookup is case-insensitive.
///
/// The Hijri rule set implemented here is the civil (tabular) variant; an
/// astronomical variant would be a distinct identifier, not a substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarId {
    Gregorian,
    Jalali,
    Hijri,
    Hebrew,
    Buddhist,
    Coptic,
    Ethiopian,
    Chinese,
}

impl CalendarId {
    /// All supported identifiers, in canonical-key order.
    pub const ALL: [CalendarId; 8] = [
        CalendarId::Gregorian,
        CalendarId::Jalali,
        CalendarId::Hijri,
        CalendarId::Hebrew,
        CalendarId::Buddhist,
        CalendarId::Coptic,
        CalendarId::Ethiopian,
        CalendarId::Chinese,
    ];

    /// The canonical lowercase key for this calendar.
    pub fn canonical_key(self) -> &'static str {
        match self {
            CalendarId::Gregorian => "gregorian",
            CalendarId::Jalali => "jalali",
            CalendarId::Hijri => "hijri",
            CalendarId::Hebrew => "hebrew",
            CalendarId::Buddhist => "buddhist",
            CalendarId::Coptic => "coptic",
            CalendarId::Ethiopian => "ethiopian",
            CalendarId::Chinese => "chinese",
        }
    }

    /// Look up a calendar by key or alias, case-insensitively.
    ///
    /// Returns `None` for unknown keys; the registry layer turns that into
    /// an [`UnsupportedCalendar`](crate::CalendarError::UnsupportedCalendar)
    /// error naming the key.
    pub fn from_key(key: &str) -> Option<CalendarId> {
        match key.to_ascii_lowercase().as_str() {
            "gregorian" => Some(CalendarId::Gregorian),
            "jalali" | "persian" => Some(CalendarId::Jalali),
            "hijri" | "islamic" => Some(CalendarId::Hijri),
            "hebrew" => Some(CalendarId::Hebrew),
            "buddhist" => Some(CalendarId::Buddhist),
            "coptic" => Some(CalendarId::Coptic),
            "ethiopian" | "ethiopic" => Some(CalendarId::Ethiopian),
            "chinese" => Some(CalendarId::Chinese),
            _ => None,
        }
    }
}

impl fmt::Display for CalendarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_key())
    }
}

// ── CalendarDate ────────────────────────────────────────────────────────────

/// A date triple tagged with the calendar it belongs to.
///
/// Month and day are 1-based. The same numeric triple means a different day
/// in every calendar, so the tag is part of the value: a bare `(1404, 5, 22)`
/// is meaningless until it is known to be a Jalali date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CalendarDate {
    pub calendar: CalendarId,
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CalendarDate {
    pub fn new(calendar: CalendarId, year: i32, month: u32, day: u32) -> Self {
        CalendarDate {
            calendar,
            year,
            month,
            day,
        }
    }

    /// The `(year, month, day)` fields without the calendar tag.
    pub fn triple(&self) -> (i32, u32, u32) {
        (self.year, self.month, self.day)
    }
}

impl fmt::Display for CalendarDate {
    /// Renders as zero-padded `YYYY-MM-DD`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.year, self.month, self.day
        )
    }
}

// ── RataDie ─────────────────────────────────────────────────────────────────

/// The continuous time coordinate: a day count with value 1 on Gregorian
/// 0001-01-01, evaluated at UTC midnight.
///
/// Every conversion passes through this pivot, so each calendar contributes
/// one forward and one inverse rule instead of a pairwise conversion matrix.
/// Whole-day counts at a fixed reference time keep the arithmetic free of
/// timezone and DST effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RataDie(i64);

impl RataDie {
    pub const fn new(day: i64) -> Self {
        RataDie(day)
    }

    pub const fn to_i64(self) -> i64 {
        self.0
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_keys_round_trip() {
        for id in CalendarId::ALL {
            assert_eq!(CalendarId::from_key(id.canonical_key()), Some(id));
        }
    }

    #[test]
    fn test_aliases_resolve() {
        assert_eq!(CalendarId::from_key("persian"), Some(CalendarId::Jalali));
        assert_eq!(CalendarId::from_key("islamic"), Some(CalendarId::Hijri));
        assert_eq!(CalendarId::from_key("ethiopic"), Some(CalendarId::Ethiopian));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(CalendarId::from_key("Hebrew"), Some(CalendarId::Hebrew));
        assert_eq!(CalendarId::from_key("CHINESE"), Some(CalendarId::Chinese));
        assert_eq!(CalendarId::from_key("Persian"), Some(CalendarId::Jalali));
    }

    #[test]
    fn test_unknown_key_is_none() {
        assert_eq!(CalendarId::from_key("mayan"), None);
        assert_eq!(CalendarId::from_key(""), None);
    }

    #[test]
    fn test_date_display_zero_pads() {
        let date = CalendarDate::new(CalendarId::Jalali, 1404, 5, 2);
        assert_eq!(date.to_string(), "1404-05-02");
    }

    #[test]
    fn test_serialize_uses_canonical_key() {
        let date = CalendarDate::new(CalendarId::Hijri, 1447, 1, 1);
        let json = serde_json::to_string(&date).unwrap();
        assert!(json.contains("\"hijri\""), "got: {json}");
    }
}
