//! Lenient integer parsing for count fields.

/// Parse a count field leniently.
///
/// Quote characters and thousands separators are stripped, surrounding
/// whitespace is ignored and the leading integer prefix is taken (`"12 kg"` is
/// 12, `"3.9"` is 3). Anything without leading digits is 0. Negative values
/// are 0 so counters never decrease; values past `u64::MAX` saturate.
pub fn parse_count(raw: &str) -> u64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '\'' | '"' | ','))
        .collect();
    let value = cleaned.trim();

    let (negative, rest) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };

    if negative {
        return 0;
    }

    rest.bytes()
        .take_while(|b| b.is_ascii_digit())
        .fold(0u64, |acc, b| {
            acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
        })
}

/// Returns true if the field reads as a plain number.
pub fn is_numeric_field(raw: &str) -> bool {
    let value = raw.trim();
    value.is_empty() || value.parse::<f64>().is_ok_and(|v| v.is_finite())
}
