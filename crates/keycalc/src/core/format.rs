//! Number formatting for the result display and history
//!
//! Two renderings exist. [`format_number`] is what the user reads: 15
//! significant digits with representation noise trimmed, switching to
//! `E` notation for very large or very small magnitudes. [`raw_numeral`] is
//! what goes back into the token sequence after an evaluation: the shortest
//! decimal text that parses back to the identical `f64`.

/// Significant digits shown in the result display
pub const SIGNIFICANT_DIGITS: usize = 15;

/// Smallest decimal exponent rendered in fixed notation
const MIN_FIXED_EXPONENT: i32 = -4;

/// Formats a value for display with [`SIGNIFICANT_DIGITS`] significant digits
///
/// ```
/// use keycalc::core::format_number;
///
/// assert_eq!(format_number(1.0 / 3.0), "0.333333333333333");
/// assert_eq!(format_number(0.1 + 0.2), "0.3");
/// assert_eq!(format_number(1e15), "1E+15");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    // `{:.14e}` rounds to exactly 15 significant digits, e.g. "3.33333333333333e-1"
    let sci = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value);
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let digits = match digits.trim_end_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };

    let body = if (MIN_FIXED_EXPONENT..SIGNIFICANT_DIGITS as i32).contains(&exponent) {
        fixed_notation(digits, exponent)
    } else {
        scientific_notation(digits, exponent)
    };

    if value.is_sign_negative() {
        format!("-{body}")
    } else {
        body
    }
}

/// Renders the shortest text that parses back to `value`
///
/// Never uses exponent notation, so the result is always a valid numeral
/// token. Negative zero is normalized to `"0"`.
#[must_use]
pub fn raw_numeral(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

fn fixed_notation(digits: &str, exponent: i32) -> String {
    if exponent < 0 {
        let leading_zeros = "0".repeat((-exponent - 1) as usize);
        return format!("0.{leading_zeros}{digits}");
    }

    let int_len = exponent as usize + 1;
    if digits.len() <= int_len {
        format!("{digits}{}", "0".repeat(int_len - digits.len()))
    } else {
        format!("{}.{}", &digits[..int_len], &digits[int_len..])
    }
}

fn scientific_notation(digits: &str, exponent: i32) -> String {
    let (first, rest) = digits.split_at(1);
    let sign = if exponent < 0 { '-' } else { '+' };
    if rest.is_empty() {
        format!("{first}E{sign}{:02}", exponent.abs())
    } else {
        format!("{first}.{rest}E{sign}{:02}", exponent.abs())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    // ===== format_number =====

    #[test]
    fn test_format_integers() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(-42.0), "-42");
        assert_eq!(format_number(1000.0), "1000");
        assert_eq!(format_number(100_000_000_000_000.0), "100000000000000");
    }

    #[test]
    fn test_format_zero() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_format_one_third_has_fifteen_digits() {
        let text = format_number(1.0 / 3.0);
        assert_eq!(text, "0.333333333333333");
        assert_eq!(text.chars().filter(char::is_ascii_digit).count(), 16);
    }

    #[test]
    fn test_format_two_thirds_rounds() {
        assert_eq!(format_number(2.0 / 3.0), "0.666666666666667");
    }

    #[test]
    fn test_format_trims_float_noise() {
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(1.1 * 1.1), "1.21");
    }

    #[test]
    fn test_format_small_fixed() {
        assert_eq!(format_number(0.0001), "0.0001");
        assert_eq!(format_number(-0.00025), "-0.00025");
    }

    #[test]
    fn test_format_small_scientific() {
        assert_eq!(format_number(0.00001), "1E-05");
        assert_eq!(format_number(1.5e-7), "1.5E-07");
    }

    #[test]
    fn test_format_large_scientific() {
        assert_eq!(format_number(1e15), "1E+15");
        assert_eq!(format_number(123_456_789_012_345_678_901.0), "1.23456789012346E+20");
        assert_eq!(format_number(-2.5e100), "-2.5E+100");
    }

    #[test]
    fn test_format_rounding_carries_into_exponent() {
        assert_eq!(format_number(999_999_999_999_999.9), "1E+15");
    }

    #[test]
    fn test_format_is_stable() {
        let first = format_number(1.0 / 7.0);
        for _ in 0..10 {
            assert_eq!(format_number(1.0 / 7.0), first);
        }
    }

    // ===== raw_numeral =====

    #[test]
    fn test_raw_numeral_round_trips() {
        for value in [0.1 + 0.2, 1.0 / 3.0, 1e300, 5e-300, -7.25, 42.0] {
            let text = raw_numeral(value);
            assert!(!text.contains('e'), "{text} uses exponent notation");
            assert_eq!(text.parse::<f64>().unwrap(), value);
        }
    }

    #[test]
    fn test_raw_numeral_integers() {
        assert_eq!(raw_numeral(5.0), "5");
        assert_eq!(raw_numeral(-3.0), "-3");
    }

    #[test]
    fn test_raw_numeral_negative_zero() {
        assert_eq!(raw_numeral(-0.0), "0");
    }
}
