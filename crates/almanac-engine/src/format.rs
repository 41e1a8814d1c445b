//! Rendering date triples as strings.
//!
//! The pattern language is three placeholders: `Y` for the zero-padded
//! four-digit year, `m` for the two-digit month, `d` for the two-digit day.
//! Every other character passes through unchanged, so `"Y/m/d"` and
//! `"d.m.Y"` both mean what they look like. Nothing here interprets
//! locales, week numbers, or time of day.

/// Render a triple through a placeholder pattern.
///
/// # Examples
///
/// ```
/// use almanac_engine::format_pattern;
///
/// assert_eq!(format_pattern(1404, 5, 22, "Y/m/d"), "1404/05/22");
/// assert_eq!(format_pattern(2025, 8, 13, "d.m.Y"), "13.08.2025");
/// ```
pub fn format_pattern(year: i32, month: u32, day: u32, pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    for ch in pattern.chars() {
        match ch {
            'Y' => out.push_str(&format!("{year:04}")),
            'm' => out.push_str(&format!("{month:02}")),
            'd' => out.push_str(&format!("{day:02}")),
            literal => out.push(literal),
        }
    }
    out
}

/// The delimiter implied by a pattern or a rendered date: the first
/// character that is neither a placeholder nor an ASCII digit.
///
/// # Examples
///
/// ```
/// use almanac_engine::detect_delimiter;
///
/// assert_eq!(detect_delimiter("Y-m-d"), Some('-'));
/// assert_eq!(detect_delimiter("1404/05/22"), Some('/'));
/// assert_eq!(detect_delimiter("Ymd"), None);
/// ```
pub fn detect_delimiter(text: &str) -> Option<char> {
    text.chars()
        .find(|ch| !matches!(ch, 'Y' | 'm' | 'd') && !ch.is_ascii_digit())
}

/// Render a triple as `"YYYY{delimiter}MM{delimiter}DD"`.
pub fn join_with_delimiter(year: i32, month: u32, day: u32, delimiter: &str) -> String {
    format!("{year:04}{delimiter}{month:02}{delimiter}{day:02}")
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_placeholders() {
        assert_eq!(format_pattern(2025, 8, 13, "Y-m-d"), "2025-08-13");
        assert_eq!(format_pattern(1404, 5, 2, "Y/m/d"), "1404/05/02");
    }

    #[test]
    fn test_pattern_literals_pass_through() {
        assert_eq!(format_pattern(2025, 8, 13, "m-d (Y)"), "08-13 (2025)");
        assert_eq!(format_pattern(2025, 8, 13, "week 32"), "week 32");
    }

    #[test]
    fn test_pattern_pads_small_years() {
        assert_eq!(format_pattern(33, 1, 5, "Y-m-d"), "0033-01-05");
    }

    #[test]
    fn test_detect_delimiter_from_pattern() {
        assert_eq!(detect_delimiter("Y-m-d"), Some('-'));
        assert_eq!(detect_delimiter("d.m.Y"), Some('.'));
    }

    #[test]
    fn test_detect_delimiter_from_rendered_date() {
        assert_eq!(detect_delimiter("2025/08/13"), Some('/'));
        assert_eq!(detect_delimiter("20250813"), None);
    }

    #[test]
    fn test_join_with_delimiter() {
        assert_eq!(join_with_delimiter(1404, 5, 22, "/"), "1404/05/22");
        assert_eq!(join_with_delimiter(2025, 8, 13, ""), "20250813");
    }
}
