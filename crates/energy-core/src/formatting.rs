use unicode_width::UnicodeWidthStr;

/// Format a consumption value with exactly two decimal places and no grouping.
///
/// This is the format used by the plain-text summary.
///
/// ```
/// use energy_core::formatting::format_kwh;
///
/// assert_eq!(format_kwh(15.0), "15.00");
/// assert_eq!(format_kwh(1234.567), "1234.57");
/// ```
pub fn format_kwh(value: f64) -> String {
    format!("{:.2}", value)
}

/// Format a consumption figure for the console table: fixed `decimals`
/// places with commas between thousands.
///
/// A value that rounds to zero is printed without a sign.
///
/// ```
/// use energy_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5, 1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (digits, fraction) = match fixed.split_once('.') {
        Some((digits, fraction)) => (digits, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + digits.len() / 3 + 1);
    if value < 0.0 && fixed.bytes().any(|b| (b'1'..=b'9').contains(&b)) {
        out.push('-');
    }
    out.push_str(&group_thousands(digits));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Share of `whole` taken by `part`, in percent. `0.0` when `whole` is zero.
pub fn share_percent(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}

/// Right-pad `text` with spaces to `width` terminal columns.
///
/// Width is measured in display columns, so wide characters in building
/// names still line up. Text already wider than `width` is returned as is.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let current = UnicodeWidthStr::width(text);
    if current >= width {
        return text.to_string();
    }
    format!("{}{}", text, " ".repeat(width - current))
}

/// Left-pad `text` with spaces to `width` terminal columns.
pub fn pad_left_to_width(text: &str, width: usize) -> String {
    let current = UnicodeWidthStr::width(text);
    if current >= width {
        return text.to_string();
    }
    format!("{}{}", " ".repeat(width - current), text)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Comma-separate a run of ASCII digits in groups of three.
fn group_thousands(digits: &str) -> String {
    let lead = match digits.len() % 3 {
        0 => 3,
        n => n,
    };
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i >= lead && (i - lead) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ── Tests ──────────────────────────────────────────────────────────────────────
