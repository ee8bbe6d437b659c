//! Value formatting for the country detail table.

/// Rounds to a whole number and inserts `,` thousands separators.
#[must_use]
pub fn thousands(value: f64) -> String {
    let rounded = format!("{value:.0}");
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) if rest.bytes().any(|b| b != b'0') => ("-", rest),
        Some(rest) => ("", rest),
        None => ("", rounded.as_str()),
    };

    let mut out = String::with_capacity(rounded.len() + digits.len() / 3);
    out.push_str(sign);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Two-decimal fixed point.
#[must_use]
pub fn fixed2(value: f64) -> String {
    format!("{value:.2}")
}

/// Formats an optional value, mapping `None` to the empty string.
#[must_use]
pub fn optional(value: Option<f64>, f: fn(f64) -> String) -> String {
    value.map(f).unwrap_or_default()
}
