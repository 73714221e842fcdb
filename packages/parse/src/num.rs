//! Lenient numeric field parsing.
//!
//! Source extracts store counts as decimal strings (`"6.00000"` floors) and
//! occasionally carry stray suffixes. These helpers take the longest valid
//! numeric prefix and return `None` when there is none, so a parse failure
//! can only ever null a field, never poison a record with NaN.

/// Parses the leading integer prefix of a field (optional sign, then
/// digits). Returns `None` when the field has no leading digits.
#[must_use]
pub fn parse_int(s: &str) -> Option<i64> {
    let s = s.trim();
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };

    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }

    digits.parse::<i64>().ok().map(|v| sign * v)
}

/// Parses a strictly positive integer count. Unparseable, zero, and
/// negative values all map to `None`.
#[must_use]
pub fn positive_count(s: &str) -> Option<u32> {
    parse_int(s)
        .filter(|&v| v > 0)
        .and_then(|v| u32::try_from(v).ok())
}

/// Parses the leading floating-point prefix of a field. Returns `None`
/// when the field has no leading number.
#[must_use]
pub fn parse_float(s: &str) -> Option<f64> {
    let s = s.trim();

    let mut end = 0;
    let bytes = s.as_bytes();
    if end < bytes.len() && (bytes[end] == b'-' || bytes[end] == b'+') {
        end += 1;
    }
    let mut seen_digit = false;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }

    if !seen_digit {
        return None;
    }

    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_integers() {
        assert_eq!(parse_int("40"), Some(40));
        assert_eq!(parse_int(" 40 "), Some(40));
        assert_eq!(parse_int("-5"), Some(-5));
        assert_eq!(parse_int("0"), Some(0));
    }

    #[test]
    fn takes_leading_integer_prefix() {
        assert_eq!(parse_int("6.00000"), Some(6));
        assert_eq!(parse_int("40 units"), Some(40));
    }

    #[test]
    fn rejects_non_numeric_fields() {
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("N/A"), None);
        assert_eq!(parse_int("."), None);
    }

    #[test]
    fn positive_count_rejects_zero_and_negatives() {
        assert_eq!(positive_count("40"), Some(40));
        assert_eq!(positive_count("0"), None);
        assert_eq!(positive_count("-3"), None);
        assert_eq!(positive_count(""), None);
    }

    #[test]
    fn parses_floats() {
        assert!((parse_float("40.7891").unwrap() - 40.7891).abs() < f64::EPSILON);
        assert!((parse_float("-73.9712").unwrap() + 73.9712).abs() < f64::EPSILON);
        assert_eq!(parse_float(""), None);
        assert_eq!(parse_float("abc"), None);
    }

    #[test]
    fn takes_leading_float_prefix() {
        assert!((parse_float("40.78a").unwrap() - 40.78).abs() < f64::EPSILON);
        assert!((parse_float("12.34.56").unwrap() - 12.34).abs() < f64::EPSILON);
    }
}
