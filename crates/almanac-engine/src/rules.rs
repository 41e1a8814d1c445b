//! Per-calendar conversion rules.
//!
//! Each supported calendar contributes exactly two operations: a forward
//! rule mapping its `(year, month, day)` fields to a [`RataDie`] day count,
//! and an inverse rule mapping a day count back to fields. Routing every
//! conversion through the shared coordinate means seven rule pairs replace
//! a 7 × 6 matrix of direct conversions.
//!
//! Every rule set is arithmetic (civil/tabular): an epoch offset, a
//! leap-year test, and month lengths derived from the leap position. The
//! Gregorian leg delegates to chrono's `NaiveDate`, which both validates
//! field ranges and supplies the days-from-CE pivot. The Chinese lunisolar
//! rules live in [`crate::chinese`]; the dispatch arms here read a bare
//! Chinese triple as its regular-month interpretation and drop the leap
//! flag, which is only correct for callers that do not need leap-month
//! disambiguation — the converter layer routes Chinese conversions through
//! the disambiguation protocol instead.
//!
//! Forward rules validate month/day bounds for the given year and reject
//! out-of-range fields; they never clamp. Inverse rules always produce a
//! valid 1-based triple.

use chrono::{Datelike, NaiveDate};

use crate::chinese::{self, ChineseDate};
use crate::error::{CalendarError, Result};
use crate::types::{CalendarDate, CalendarId, RataDie};

// ── Dispatch ────────────────────────────────────────────────────────────────

/// Convert calendar fields to the continuous day count.
///
/// # Errors
///
/// Returns [`CalendarError::FieldOutOfRange`] when the triple cannot exist
/// under the calendar's rules, or [`CalendarError::Environment`] when the
/// year falls outside a table-driven rule set's supported span.
pub fn to_rata_die(calendar: CalendarId, year: i32, month: u32, day: u32) -> Result<RataDie> {
    match calendar {
        CalendarId::Gregorian => gregorian_to_rd(year, month, day),
        CalendarId::Jalali => jalali_to_rd(year, month, day),
        CalendarId::Hijri => hijri_to_rd(year, month, day),
        CalendarId::Hebrew => hebrew_to_rd(year, month, day),
        CalendarId::Buddhist => buddhist_to_rd(year, month, day),
        CalendarId::Coptic => {
            epagomenal_to_rd(CalendarId::Coptic, COPTIC_EPOCH, year, month, day)
        }
        CalendarId::Ethiopian => {
            epagomenal_to_rd(CalendarId::Ethiopian, ETHIOPIC_EPOCH, year, month, day)
        }
        CalendarId::Chinese => chinese::to_rata_die(ChineseDate {
            year,
            month,
            leap: false,
            day,
        }),
    }
}

/// Convert the continuous day count to calendar fields.
///
/// The result is always a valid triple, in range for the target calendar.
///
/// # Errors
///
/// Returns [`CalendarError::Environment`] when the day count falls outside
/// the calendar's supported span.
pub fn from_rata_die(calendar: CalendarId, rd: RataDie) -> Result<CalendarDate> {
    match calendar {
        CalendarId::Gregorian => gregorian_from_rd(rd),
        CalendarId::Jalali => jalali_from_rd(rd),
        CalendarId::Hijri => hijri_from_rd(rd),
        CalendarId::Hebrew => hebrew_from_rd(rd),
        CalendarId::Buddhist => buddhist_from_rd(rd),
        CalendarId::Coptic => epagomenal_from_rd(CalendarId::Coptic, COPTIC_EPOCH, rd),
        CalendarId::Ethiopian => epagomenal_from_rd(CalendarId::Ethiopian, ETHIOPIC_EPOCH, rd),
        CalendarId::Chinese => chinese::from_rata_die(rd)
            .map(|date| CalendarDate::new(CalendarId::Chinese, date.year, date.month, date.day)),
    }
}

fn year_i32(year: i64) -> Result<i32> {
    i32::try_from(year).map_err(|_| {
        CalendarError::Environment("day count outside the supported year range".to_string())
    })
}

// ── Gregorian ───────────────────────────────────────────────────────────────

fn gregorian_to_rd(year: i32, month: u32, day: u32) -> Result<RataDie> {
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| CalendarError::out_of_range(CalendarId::Gregorian, year, month, day))?;
    Ok(RataDie::new(i64::from(date.num_days_from_ce())))
}

fn gregorian_from_rd(rd: RataDie) -> Result<CalendarDate> {
    let date = i32::try_from(rd.to_i64())
        .ok()
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .ok_or_else(|| {
            CalendarError::Environment(format!(
                "day count {} outside the supported Gregorian range",
                rd.to_i64()
            ))
        })?;
    Ok(CalendarDate::new(
        CalendarId::Gregorian,
        date.year(),
        date.month(),
        date.day(),
    ))
}

// ── Jalali ──────────────────────────────────────────────────────────────────

/// Years at which the 33-year leap cycle re-anchors. A Jalali year is
/// supported when it falls inside the span these cover.
const JALALI_BREAKS: [i32; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324,
    2394, 2456, 3178,
];

struct JalaliYear {
    /// Years since the previous leap year; 0 means this year is leap.
    leap: i32,
    /// Gregorian year containing 1 Farvardin.
    gy: i32,
    /// Day of March on which 1 Farvardin falls.
    march: u32,
}

fn jalali_year_info(jy: i32) -> Result<JalaliYear> {
    let first = JALALI_BREAKS[0];
    let last = JALALI_BREAKS[JALALI_BREAKS.len() - 1];
    if jy < first || jy >= last {
        return Err(CalendarError::Environment(format!(
            "Jalali year {jy} is outside the supported span {first}..{last}"
        )));
    }

    let gy = jy + 621;
    let mut leap_j = -14;
    let mut jp = first;
    let mut jump = 0;
    for &jb in &JALALI_BREAKS[1..] {
        jump = jb - jp;
        if jy < jb {
            break;
        }
        leap_j += jump / 33 * 8 + jump % 33 / 4;
        jp = jb;
    }

    let mut n = jy - jp;
    leap_j += n / 33 * 8 + (n % 33 + 3) / 4;
    if jump % 33 == 4 && jump - n == 4 {
        leap_j += 1;
    }
    let leap_g = gy / 4 - (gy / 100 + 1) * 3 / 4 - 150;
    let march = 20 + leap_j - leap_g;

    if jump - n < 6 {
        n = n - jump + (jump + 4) / 33 * 33;
    }
    let mut leap = ((n + 1) % 33 - 1) % 4;
    if leap == -1 {
        leap = 4;
    }

    Ok(JalaliYear {
        leap,
        gy,
        march: march as u32,
    })
}

fn jalali_to_rd(jy: i32, jm: u32, jd: u32) -> Result<RataDie> {
    let info = jalali_year_info(jy)?;
    let max_day = match jm {
        1..=6 => 31,
        7..=11 => 30,
        12 if info.leap == 0 => 30,
        12 => 29,
        _ => return Err(CalendarError::out_of_range(CalendarId::Jalali, jy, jm, jd)),
    };
    if jd < 1 || jd > max_day {
        return Err(CalendarError::out_of_range(CalendarId::Jalali, jy, jm, jd));
    }

    let farvardin1 = gregorian_to_rd(info.gy, 3, info.march)?;
    let m = i64::from(jm);
    let offset = (m - 1) * 31 - m / 7 * (m - 7) + i64::from(jd) - 1;
    Ok(RataDie::new(farvardin1.to_i64() + offset))
}

fn jalali_from_rd(rd: RataDie) -> Result<CalendarDate> {
    let greg = gregorian_from_rd(rd)?;
    let mut jy = greg.year - 621;
    let info = jalali_year_info(jy)?;
    let farvardin1 = gregorian_to_rd(info.gy, 3, info.march)?;

    let mut k = rd.to_i64() - farvardin1.to_i64();
    if k >= 0 {
        if k <= 185 {
            return Ok(CalendarDate::new(
                CalendarId::Jalali,
                jy,
                (1 + k / 31) as u32,
                (k % 31 + 1) as u32,
            ));
        }
        k -= 186;
    } else {
        // Before Farvardin 1: the date belongs to the second half of the
        // previous Jalali year, whose Esfand runs long after a leap year.
        jy -= 1;
        k += 179;
        if info.leap == 1 {
            k += 1;
        }
    }
    Ok(CalendarDate::new(
        CalendarId::Jalali,
        jy,
        (7 + k / 30) as u32,
        (k % 30 + 1) as u32,
    ))
}

// ── Hijri (civil/tabular) ───────────────────────────────────────────────────

/// 1 Muharram, AH 1 as a day count (Friday epoch of the tabular calendar).
const HIJRI_EPOCH: i64 = 227_015;

/// Leap years are the 11 years of each 30-year cycle satisfying this test:
/// 2, 5, 7, 10, 13, 16, 18, 21, 24, 26, and 29.
fn hijri_is_leap(year: i64) -> bool {
    (11 * year + 14).rem_euclid(30) < 11
}

fn hijri_month_days(year: i64, month: u32) -> u32 {
    if month % 2 == 1 || (month == 12 && hijri_is_leap(year)) {
        30
    } else {
        29
    }
}

fn hijri_year_start(year: i64) -> i64 {
    HIJRI_EPOCH + 354 * (year - 1) + (11 * year + 3).div_euclid(30)
}

fn hijri_to_rd(y: i32, m: u32, d: u32) -> Result<RataDie> {
    let year = i64::from(y);
    if !(1..=12).contains(&m) || d < 1 || d > hijri_month_days(year, m) {
        return Err(CalendarError::out_of_range(CalendarId::Hijri, y, m, d));
    }
    let month = i64::from(m);
    let rd = hijri_year_start(year) + 29 * (month - 1) + month / 2 + i64::from(d) - 1;
    Ok(RataDie::new(rd))
}

fn hijri_from_rd(rd: RataDie) -> Result<CalendarDate> {
    let day = rd.to_i64();
    let mut year = (30 * (day - HIJRI_EPOCH) + 10_646).div_euclid(10_631);
    if day < hijri_year_start(year) {
        year -= 1;
    } else if day >= hijri_year_start(year + 1) {
        year += 1;
    }

    let mut rem = day - hijri_year_start(year);
    let mut month = 1u32;
    while rem >= i64::from(hijri_month_days(year, month)) {
        rem -= i64::from(hijri_month_days(year, month));
        month += 1;
    }
    Ok(CalendarDate::new(
        CalendarId::Hijri,
        year_i32(year)?,
        month,
        rem as u32 + 1,
    ))
}

// ── Hebrew ──────────────────────────────────────────────────────────────────

/// 1 Tishri, AM 1 as a day count.
const HEBREW_EPOCH: i64 = -1_373_427;

/// Leap years fall on years 0, 3, 6, 8, 11, 14, and 17 of the 19-year
/// Metonic cycle.
fn hebrew_is_leap(year: i64) -> bool {
    (7 * year + 1).rem_euclid(19) < 7
}

/// Days from the epoch's molad to the (uncorrected) molad of Tishri of the
/// given year, with the Monday/Wednesday/Friday postponement applied.
fn hebrew_elapsed_days(year: i64) -> i64 {
    let months = (235 * year - 234).div_euclid(19);
    let parts = 12_084 + 13_753 * months;
    let days = 29 * months + parts.div_euclid(25_920);
    if (3 * (days + 1)).rem_euclid(7) < 3 {
        days + 1
    } else {
        days
    }
}

fn hebrew_new_year(year: i64) -> i64 {
    let ny0 = hebrew_elapsed_days(year - 1);
    let ny1 = hebrew_elapsed_days(year);
    let ny2 = hebrew_elapsed_days(year + 1);
    // The remaining two postponements keep year lengths inside the six
    // permitted values by nudging Rosh Hashanah of the affected year.
    let correction = if ny2 - ny1 == 356 {
        2
    } else if ny1 - ny0 == 382 {
        1
    } else {
        0
    };
    HEBREW_EPOCH + ny1 + correction
}

fn hebrew_year_days(year: i64) -> i64 {
    hebrew_new_year(year + 1) - hebrew_new_year(year)
}

fn hebrew_months_in_year(year: i64) -> u32 {
    if hebrew_is_leap(year) {
        13
    } else {
        12
    }
}

/// Month lengths in civil order (1 = Tishri). Leap years insert Adar I as
/// month 6, pushing Adar II through Elul to positions 7..=13.
fn hebrew_month_days(year: i64, month: u32) -> u32 {
    let year_days = hebrew_year_days(year);
    match month {
        1 => 30,
        // Marheshvan runs long only in complete years (355/385 days).
        2 => {
            if year_days % 10 == 5 {
                30
            } else {
                29
            }
        }
        // Kislev runs short only in deficient years (353/383 days).
        3 => {
            if year_days % 10 == 3 {
                29
            } else {
                30
            }
        }
        4 => 29,
        5 => 30,
        _ => {
            // From Adar on, lengths alternate; the inserted 30-day Adar I
            // flips the parity for the remainder of a leap year.
            if hebrew_is_leap(year) == (month % 2 == 0) {
                30
            } else {
                29
            }
        }
    }
}

fn hebrew_to_rd(y: i32, m: u32, d: u32) -> Result<RataDie> {
    let year = i64::from(y);
    if m < 1 || m > hebrew_months_in_year(year) || d < 1 || d > hebrew_month_days(year, m) {
        return Err(CalendarError::out_of_range(CalendarId::Hebrew, y, m, d));
    }
    let mut rd = hebrew_new_year(year) + i64::from(d) - 1;
    for prior in 1..m {
        rd += i64::from(hebrew_month_days(year, prior));
    }
    Ok(RataDie::new(rd))
}

fn hebrew_from_rd(rd: RataDie) -> Result<CalendarDate> {
    let day = rd.to_i64();
    // Seed with the mean year length (35975351/98496 days), then settle.
    let mut year = ((day - HEBREW_EPOCH) * 98_496).div_euclid(35_975_351) + 1;
    while hebrew_new_year(year) > day {
        year -= 1;
    }
    while hebrew_new_year(year + 1) <= day {
        year += 1;
    }

    let mut rem = day - hebrew_new_year(year);
    let mut month = 1u32;
    while rem >= i64::from(hebrew_month_days(year, month)) {
        rem -= i64::from(hebrew_month_days(year, month));
        month += 1;
    }
    Ok(CalendarDate::new(
        CalendarId::Hebrew,
        year_i32(year)?,
        month,
        rem as u32 + 1,
    ))
}

// ── Buddhist ────────────────────────────────────────────────────────────────

/// Thai solar calendar: Gregorian months and days with years counted in the
/// Buddhist Era.
const BUDDHIST_YEAR_OFFSET: i32 = 543;

fn buddhist_to_rd(y: i32, m: u32, d: u32) -> Result<RataDie> {
    let gy = y
        .checked_sub(BUDDHIST_YEAR_OFFSET)
        .ok_or_else(|| CalendarError::out_of_range(CalendarId::Buddhist, y, m, d))?;
    gregorian_to_rd(gy, m, d)
        .map_err(|_| CalendarError::out_of_range(CalendarId::Buddhist, y, m, d))
}

fn buddhist_from_rd(rd: RataDie) -> Result<CalendarDate> {
    let greg = gregorian_from_rd(rd)?;
    Ok(CalendarDate::new(
        CalendarId::Buddhist,
        greg.year + BUDDHIST_YEAR_OFFSET,
        greg.month,
        greg.day,
    ))
}

// ── Coptic / Ethiopian ──────────────────────────────────────────────────────

/// 1 Thout, year 1 of the Era of Martyrs as a day count.
const COPTIC_EPOCH: i64 = 103_605;
/// 1 Mäskäräm, year 1 Amete Mihret as a day count.
const ETHIOPIC_EPOCH: i64 = 2_796;

/// Both calendars share one shape: twelve 30-day months plus a short
/// epagomenal thirteenth month of 5 days, 6 in leap years.
fn epagomenal_is_leap(year: i64) -> bool {
    year.rem_euclid(4) == 3
}

fn epagomenal_month_days(year: i64, month: u32) -> u32 {
    match month {
        1..=12 => 30,
        13 if epagomenal_is_leap(year) => 6,
        13 => 5,
        _ => 0,
    }
}

fn epagomenal_to_rd(
    calendar: CalendarId,
    epoch: i64,
    y: i32,
    m: u32,
    d: u32,
) -> Result<RataDie> {
    let year = i64::from(y);
    let len = epagomenal_month_days(year, m);
    if len == 0 || d < 1 || d > len {
        return Err(CalendarError::out_of_range(calendar, y, m, d));
    }
    let rd = epoch - 1 + 365 * (year - 1) + year.div_euclid(4) + 30 * i64::from(m - 1)
        + i64::from(d);
    Ok(RataDie::new(rd))
}

fn epagomenal_from_rd(calendar: CalendarId, epoch: i64, rd: RataDie) -> Result<CalendarDate> {
    let day = rd.to_i64();
    let year = (4 * (day - epoch) + 1463).div_euclid(1461);
    let day_of_year = day - (epoch + 365 * (year - 1) + year.div_euclid(4));
    Ok(CalendarDate::new(
        calendar,
        year_i32(year)?,
        (day_of_year.div_euclid(30) + 1) as u32,
        (day_of_year.rem_euclid(30) + 1) as u32,
    ))
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn greg(y: i32, m: u32, d: u32) -> RataDie {
        gregorian_to_rd(y, m, d).unwrap()
    }

    fn round_trip(calendar: CalendarId, y: i32, m: u32, d: u32) {
        let rd = greg(y, m, d);
        let date = from_rata_die(calendar, rd).unwrap();
        let back = to_rata_die(calendar, date.year, date.month, date.day).unwrap();
        assert_eq!(back, rd, "{calendar} round-trip mismatch @ {y}-{m}-{d}");
    }

    // ── Gregorian ───────────────────────────────────────────────────────

    #[test]
    fn test_gregorian_rata_die_anchor() {
        assert_eq!(greg(1, 1, 1).to_i64(), 1);
        assert_eq!(greg(2000, 1, 1).to_i64(), 730_120);
    }

    #[test]
    fn test_gregorian_rejects_invalid_fields() {
        assert!(gregorian_to_rd(2025, 2, 29).is_err());
        assert!(gregorian_to_rd(2025, 13, 1).is_err());
        assert!(gregorian_to_rd(2025, 0, 1).is_err());
        assert!(gregorian_to_rd(2025, 4, 31).is_err());
    }

    // ── Jalali ──────────────────────────────────────────────────────────

    const JALALI_PAIRS: [(i32, u32, u32, i32, u32, u32); 4] = [
        (1404, 5, 22, 2025, 8, 13),
        (1400, 1, 1, 2021, 3, 21),
        (1399, 12, 30, 2021, 3, 20),
        (1402, 12, 29, 2024, 3, 19),
    ];

    #[test]
    fn test_jalali_exact_pairs() {
        for (jy, jm, jd, gy, gm, gd) in JALALI_PAIRS {
            let rd = greg(gy, gm, gd);
            assert_eq!(jalali_to_rd(jy, jm, jd).unwrap(), rd, "{jy}-{jm}-{jd}");
            let date = jalali_from_rd(rd).unwrap();
            assert_eq!(date.triple(), (jy, jm, jd), "{gy}-{gm}-{gd}");
        }
    }

    #[test]
    fn test_jalali_leap_years() {
        assert_eq!(jalali_year_info(1399).unwrap().leap, 0);
        assert_eq!(jalali_year_info(1403).unwrap().leap, 0);
        assert_ne!(jalali_year_info(1400).unwrap().leap, 0);
        assert_ne!(jalali_year_info(1402).unwrap().leap, 0);
    }

    #[test]
    fn test_jalali_esfand_length_follows_leap() {
        // 1399 is leap: Esfand has 30 days. 1402 is common: day 30 rejected.
        assert!(jalali_to_rd(1399, 12, 30).is_ok());
        assert!(matches!(
            jalali_to_rd(1402, 12, 30),
            Err(CalendarError::FieldOutOfRange { .. })
        ));
    }

    #[test]
    fn test_jalali_year_outside_span_is_environment() {
        assert!(matches!(
            jalali_to_rd(3500, 1, 1),
            Err(CalendarError::Environment(_))
        ));
    }

    // ── Hijri ───────────────────────────────────────────────────────────

    #[test]
    fn test_hijri_epoch() {
        assert_eq!(hijri_to_rd(1, 1, 1).unwrap().to_i64(), HIJRI_EPOCH);
    }

    #[test]
    fn test_hijri_leap_cycle() {
        // Years 2, 5, 7, ... of each 30-year cycle are leap.
        assert!(hijri_is_leap(2));
        assert!(hijri_is_leap(29));
        assert!(!hijri_is_leap(1));
        assert!(!hijri_is_leap(30));
        assert!(hijri_is_leap(1447)); // 1447 ≡ 7 (mod 30)
        assert!(!hijri_is_leap(1446));
    }

    #[test]
    fn test_hijri_month_12_length_follows_leap() {
        assert!(hijri_to_rd(1447, 12, 30).is_ok());
        assert!(matches!(
            hijri_to_rd(1446, 12, 30),
            Err(CalendarError::FieldOutOfRange { .. })
        ));
    }

    #[test]
    fn test_hijri_round_trips() {
        for (y, m, d) in [(1, 1, 1), (1400, 1, 1), (1446, 9, 1), (1447, 12, 30)] {
            let rd = hijri_to_rd(y, m, d).unwrap();
            let date = hijri_from_rd(rd).unwrap();
            assert_eq!(date.triple(), (y, m, d));
        }
    }

    // ── Hebrew ──────────────────────────────────────────────────────────

    #[test]
    fn test_hebrew_new_years() {
        assert_eq!(hebrew_to_rd(5784, 1, 1).unwrap(), greg(2023, 9, 16));
        assert_eq!(hebrew_to_rd(5785, 1, 1).unwrap(), greg(2024, 10, 3));
        assert_eq!(hebrew_to_rd(5786, 1, 1).unwrap(), greg(2025, 9, 23));
    }

    #[test]
    fn test_hebrew_leap_years() {
        assert!(hebrew_is_leap(5784));
        assert!(!hebrew_is_leap(5785));
        assert_eq!(hebrew_months_in_year(5784), 13);
        assert_eq!(hebrew_months_in_year(5785), 12);
    }

    #[test]
    fn test_hebrew_year_lengths_are_permitted() {
        for year in 5700..5800 {
            let days = hebrew_year_days(year);
            assert!(
                [353, 354, 355, 383, 384, 385].contains(&days),
                "year {year} has {days} days"
            );
        }
    }

    #[test]
    fn test_hebrew_rejects_day_30_of_short_adar() {
        // 5785 is a common year, so month 6 is the 29-day Adar.
        assert!(matches!(
            hebrew_to_rd(5785, 6, 30),
            Err(CalendarError::FieldOutOfRange { .. })
        ));
        // In leap 5784 month 6 is the 30-day Adar I.
        assert!(hebrew_to_rd(5784, 6, 30).is_ok());
    }

    #[test]
    fn test_hebrew_round_trips() {
        for (y, m, d) in [(5784, 13, 29), (5785, 1, 1), (5786, 7, 15), (5730, 3, 1)] {
            let rd = hebrew_to_rd(y, m, d).unwrap();
            let date = hebrew_from_rd(rd).unwrap();
            assert_eq!(date.triple(), (y, m, d));
        }
    }

    // ── Buddhist ────────────────────────────────────────────────────────

    #[test]
    fn test_buddhist_year_offset() {
        assert_eq!(buddhist_to_rd(2568, 8, 13).unwrap(), greg(2025, 8, 13));
        let date = buddhist_from_rd(greg(2025, 8, 13)).unwrap();
        assert_eq!(date.triple(), (2568, 8, 13));
    }

    #[test]
    fn test_buddhist_rejects_gregorian_invalid_days() {
        assert!(matches!(
            buddhist_to_rd(2568, 2, 29),
            Err(CalendarError::FieldOutOfRange {
                calendar: CalendarId::Buddhist,
                ..
            })
        ));
    }

    // ── Coptic / Ethiopian ──────────────────────────────────────────────

    #[test]
    fn test_coptic_new_year() {
        assert_eq!(
            epagomenal_to_rd(CalendarId::Coptic, COPTIC_EPOCH, 1742, 1, 1).unwrap(),
            greg(2025, 9, 11)
        );
    }

    #[test]
    fn test_ethiopian_new_year() {
        assert_eq!(
            epagomenal_to_rd(CalendarId::Ethiopian, ETHIOPIC_EPOCH, 2018, 1, 1).unwrap(),
            greg(2025, 9, 11)
        );
    }

    #[test]
    fn test_epagomenal_month_length_follows_leap() {
        // Years ≡ 3 (mod 4) have a 6-day thirteenth month.
        assert!(epagomenal_to_rd(CalendarId::Coptic, COPTIC_EPOCH, 1739, 13, 6).is_ok());
        assert!(matches!(
            epagomenal_to_rd(CalendarId::Coptic, COPTIC_EPOCH, 1740, 13, 6),
            Err(CalendarError::FieldOutOfRange { .. })
        ));
        assert!(epagomenal_to_rd(CalendarId::Ethiopian, ETHIOPIC_EPOCH, 2015, 13, 6).is_ok());
        assert!(matches!(
            epagomenal_to_rd(CalendarId::Ethiopian, ETHIOPIC_EPOCH, 2016, 13, 6),
            Err(CalendarError::FieldOutOfRange { .. })
        ));
    }

    #[test]
    fn test_epagomenal_rejects_month_14() {
        assert!(matches!(
            to_rata_die(CalendarId::Ethiopian, 2018, 14, 1),
            Err(CalendarError::FieldOutOfRange { .. })
        ));
    }

    // ── Cross-calendar sweeps ───────────────────────────────────────────

    #[test]
    fn test_leap_day_stress_set() {
        let non_chinese = [
            CalendarId::Jalali,
            CalendarId::Hijri,
            CalendarId::Hebrew,
            CalendarId::Buddhist,
            CalendarId::Coptic,
            CalendarId::Ethiopian,
        ];
        for year in [2000, 2004, 2016, 2020, 2024] {
            for calendar in non_chinese {
                round_trip(calendar, year, 2, 29);
            }
        }
    }

    #[test]
    fn test_gregorian_edge_date_sweep() {
        let samples = [
            (1600, 3, 1),
            (1800, 3, 1),
            (1899, 12, 31),
            (1900, 2, 28),
            (1969, 12, 31),
            (1970, 1, 1),
            (1999, 12, 31),
            (2025, 8, 13),
            (2032, 2, 29),
        ];
        let non_chinese = [
            CalendarId::Jalali,
            CalendarId::Hijri,
            CalendarId::Hebrew,
            CalendarId::Buddhist,
            CalendarId::Coptic,
            CalendarId::Ethiopian,
        ];
        for (y, m, d) in samples {
            for calendar in non_chinese {
                round_trip(calendar, y, m, d);
            }
        }
    }
}
