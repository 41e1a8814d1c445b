//! Error types for calendar conversion operations.

use thiserror::Error;

use crate::types::CalendarId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// The calendar key is not one of the supported identifiers or aliases.
    #[error("Unsupported calendar: {key}")]
    UnsupportedCalendar { key: String },

    /// The (year, month, day) triple cannot exist under the named calendar's
    /// own rules, e.g. day 30 of a 29-day month. The engine rejects such
    /// input instead of clamping it to a nearby valid date.
    #[error("Date {year}-{month:02}-{day:02} is out of range for the {calendar} calendar")]
    FieldOutOfRange {
        calendar: CalendarId,
        year: i32,
        month: u32,
        day: u32,
    },

    /// Calendar rule data is unavailable for the requested date, e.g. a year
    /// outside a table-driven backend's supported span.
    #[error("Calendar data unavailable: {0}")]
    Environment(String),
}

impl CalendarError {
    pub(crate) fn out_of_range(calendar: CalendarId, year: i32, month: u32, day: u32) -> Self {
        CalendarError::FieldOutOfRange {
            calendar,
            year,
            month,
            day,
        }
    }
}

pub type Result<T> = std::result::Result<T, CalendarError>;
