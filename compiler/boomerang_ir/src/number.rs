//! Canonical decimal numbers.
//!
//! A `Number` node stores its decimal text. Arithmetic parses the text into an
//! `f64`, computes, and renders the result back in canonical form: the
//! shortest text that round-trips, with no trailing zeros, no trailing decimal
//! point, no exponent and no negative zero. `4.5 + 5.5` is `"10"`, never
//! `"10.0"`.

/// Parse a number literal.
///
/// Returns `None` for text that is not a finite decimal. `inf` and `NaN`
/// spellings are rejected even though `f64::from_str` accepts them.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Render a finite number in canonical form.
///
/// Callers reject non-finite values first; they have no canonical text.
pub fn format_number(value: f64) -> String {
    debug_assert!(value.is_finite(), "non-finite numbers have no canonical form");
    if value == 0.0 {
        // Covers -0.0 as well.
        return "0".to_string();
    }
    // `Display` for f64 is the shortest round-trip form and never uses an
    // exponent or a trailing `.0`.
    format!("{value}")
}

/// Canonicalise number text, or `None` if it does not parse.
pub fn normalize(text: &str) -> Option<String> {
    parse_number(text).map(format_number)
}

/// Interpret `value` as an exact integer index.
///
/// Returns `None` when the value has a fractional part or does not fit in an
/// `i64`.
pub fn as_integer(value: f64) -> Option<i64> {
    if value.fract() != 0.0 {
        return None;
    }
    // 2^63 is exactly representable; the valid range is [-2^63, 2^63).
    let bound = 2.0_f64.powi(63);
    if value >= bound || value < -bound {
        return None;
    }
    format!("{value:.0}").parse::<i64>().ok()
}
