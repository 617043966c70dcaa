//! Text formatting helpers for rendering set tables.

/// Format a number with thousands separators and a fixed number of decimals.
///
/// # Examples
///
/// ```
/// use workout_core::formatting::format_number;
///
/// assert_eq!(format_number(12345.0, 0), "12,345");
/// assert_eq!(format_number(1234.5, 1), "1,234.5");
/// assert_eq!(format_number(-9876.25, 2), "-9,876.25");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// ```
pub fn format_number(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.prec$}", value.abs(), prec = decimals);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    // "-0.00" is not worth a sign.
    if value < 0.0 && fixed.bytes().any(|b| (b'1'..=b'9').contains(&b)) {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Format a load in kilograms, dropping a `.0` on whole numbers.
///
/// # Examples
///
/// ```
/// use workout_core::formatting::format_weight;
///
/// assert_eq!(format_weight(40.0), "40 kg");
/// assert_eq!(format_weight(42.5), "42.5 kg");
/// assert_eq!(format_weight(1.25), "1.25 kg");
/// ```
pub fn format_weight(kg: f64) -> String {
    format!("{} kg", trim_decimal(kg))
}

/// Render a float with up to two decimals and no trailing zeros.
pub fn trim_decimal(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Quote a CSV field when it contains a comma, quote or line break.
pub fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of a digit string.
fn group_thousands(digits: &str) -> String {
    let mut grouped: Vec<&str> = Vec::with_capacity(digits.len() / 3 + 1);
    let mut end = digits.len();
    while end > 3 {
        grouped.push(&digits[end - 3..end]);
        end -= 3;
    }
    grouped.push(&digits[..end]);
    grouped.reverse();
    grouped.join(",")
}

// ── Tests ──────────────────────────────────────────────────────────────────────
