// ---------------------------------------------------------------------------
// Tick label formatting
// ---------------------------------------------------------------------------

const SUPERSCRIPT_DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

fn superscript(exponent: &str) -> String {
    exponent
        .chars()
        .filter_map(|c| match c {
            '-' => Some('⁻'),
            d => d.to_digit(10).map(|d| SUPERSCRIPT_DIGITS[d as usize]),
        })
        .collect()
}

/// Power-of-ten notation, e.g. `65536.0` → `"6.6×10⁴"`.
///
/// Zero is printed as `"0"`; non-finite values fall back to their `Display`.
pub fn format_scientific(value: f64, precision: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }
    // `{:e}` already handles mantissa rounding into the next decade.
    let formatted = format!("{value:.precision$e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => format!("{mantissa}×10{}", superscript(exponent)),
        None => formatted,
    }
}

/// Labels for the time axis: plain decimals in a readable band, scientific
/// notation outside it.
pub fn format_time(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude == 0.0 {
        "0".to_string()
    } else if (1e-2..1e4).contains(&magnitude) {
        format!("{value:.2}")
    } else {
        format_scientific(value, 1)
    }
}
