//! Display formatting and form-input parsing for amounts.

/// Format `value` as dollars with thousands separators and up to two
/// fractional digits, dropping trailing zeros: `1500.5` → `"$1,500.5"`,
/// `-300.0` → `"-$300"`.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return format!("${value}");
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let scaled = (value.abs() * 100.0).round();
    if scaled >= u128::MAX as f64 {
        // Far beyond cent precision; the plain digits are already integral.
        return format!("{sign}${}", group_thousands(&value.abs().to_string()));
    }
    let cents = scaled as u128;
    let whole = cents / 100;
    let frac = cents % 100;

    let mut out = format!("{sign}${}", group_thousands(&whole.to_string()));
    if frac != 0 {
        let digits = format!("{frac:02}");
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
    // "-$0" after rounding a tiny negative
    if out == "-$0" {
        out.remove(0);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Parse the amount field of an add form.
///
/// Everything except ASCII digits and `.` is stripped first. Returns `None`
/// for empty input, more than one decimal point, or more than two
/// fractional digits.
pub fn parse_amount_input(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let mut parts = cleaned.split('.');
    let whole = parts.next().unwrap_or("");
    let frac = parts.next();
    if parts.next().is_some() {
        return None;
    }
    if frac.is_some_and(|f| f.len() > 2) {
        return None;
    }
    if whole.is_empty() && frac.map_or(true, str::is_empty) {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
