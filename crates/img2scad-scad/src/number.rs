//! Decimal formatting for coordinates.
//!
//! Values are rounded half-up (ties away from zero) on their exact binary
//! value, trailing zeros are dropped and negative zero prints as `0`.

/// Extra digits formatted past the cut to decide the rounding direction.
const GUARD_DIGITS: usize = 24;

/// Enough fractional digits to print any `f64` exactly.
const EXACT_DIGITS: usize = 1074;

/// Format `value` with at most `precision` fractional digits.
///
/// ```
/// use img2scad_scad::format_number;
///
/// assert_eq!(format_number(1.123456, 5), "1.12346");
/// assert_eq!(format_number(-0.0000001, 5), "0");
/// assert_eq!(format_number(90.0, 5), "90");
/// ```
pub fn format_number(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let rounded = round_half_up(value.abs(), precision);
    let trimmed = if rounded.contains('.') {
        rounded.trim_end_matches('0').trim_end_matches('.')
    } else {
        rounded.as_str()
    };

    if trimmed == "0" {
        "0".to_string()
    } else if value.is_sign_negative() {
        format!("-{trimmed}")
    } else {
        trimmed.to_string()
    }
}

/// Round a non-negative finite value to exactly `precision` fractional digits.
fn round_half_up(abs: f64, precision: usize) -> String {
    let guarded = format!("{:.*}", precision + GUARD_DIGITS, abs);
    let exact;
    let (mut kept, mut tail) = split_at_precision(&guarded, precision);

    // A carry out of the guard digits leaves zeros behind it; only then can
    // the first dropped digit differ from the exact expansion.
    if tail[1..].bytes().all(|b| b == b'0') {
        exact = format!("{:.*}", EXACT_DIGITS, abs);
        (kept, tail) = split_at_precision(&exact, precision);
    }

    let first_dropped = tail.as_bytes()[0];
    if first_dropped >= b'5' {
        increment_decimal(kept)
    } else {
        kept.to_string()
    }
}

/// Split a fixed-point string into the part kept at `precision` and the dropped digits.
fn split_at_precision(formatted: &str, precision: usize) -> (&str, &str) {
    // Fixed-point output always contains a '.' when digits follow it.
    let point = formatted.find('.').unwrap_or(formatted.len());
    let cut = point + 1 + precision;
    let kept_end = if precision == 0 { point } else { cut };
    (&formatted[..kept_end], &formatted[cut..])
}

/// Add one unit in the last place of a non-negative decimal string.
fn increment_decimal(digits: &str) -> String {
    let mut bytes = digits.as_bytes().to_vec();
    let mut carry = true;
    for b in bytes.iter_mut().rev() {
        if *b == b'.' {
            continue;
        }
        if *b == b'9' {
            *b = b'0';
        } else {
            *b += 1;
            carry = false;
            break;
        }
    }

    let mut out = String::with_capacity(bytes.len() + 1);
    if carry {
        out.push('1');
    }
    // Only ASCII digits and '.' were touched.
    out.extend(bytes.iter().map(|&b| b as char));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiny_values_round_to_zero() {
        assert_eq!(format_number(0.000001, 5), "0");
        assert_eq!(format_number(0.000004999, 5), "0");
        assert_eq!(format_number(5.5e-15, 5), "0");
    }

    #[test]
    fn test_negative_zero_normalized() {
        assert_eq!(format_number(-0.0000001, 5), "0");
        assert_eq!(format_number(-0.0, 5), "0");
        assert_eq!(format_number(-5.5e-15, 5), "0");
    }

    #[test]
    fn test_rounds_half_up() {
        assert_eq!(format_number(1.123456, 5), "1.12346");
        assert_eq!(format_number(0.5, 0), "1");
        assert_eq!(format_number(2.5, 0), "3");
        assert_eq!(format_number(0.125, 2), "0.13");
        assert_eq!(format_number(-0.125, 2), "-0.13");
    }

    #[test]
    fn test_rounding_uses_exact_binary_value() {
        // 1.000005 is stored just above the tie
        assert_eq!(format_number(-1.000005, 5), "-1.00001");
    }

    #[test]
    fn test_trailing_zeros_trimmed() {
        assert_eq!(format_number(97.2, 5), "97.2");
        assert_eq!(format_number(90.0, 5), "90");
        assert_eq!(format_number(0.00001, 5), "0.00001");
        assert_eq!(format_number(123.456789, 5), "123.45679");
    }

    #[test]
    fn test_carry_into_integer_part() {
        assert_eq!(format_number(9.999996, 5), "10");
        assert_eq!(format_number(-99.999999, 5), "-100");
    }

    #[test]
    fn test_zero_precision() {
        assert_eq!(format_number(97.2, 0), "97");
        assert_eq!(format_number(-0.4, 0), "0");
    }

    #[test]
    fn test_increment_decimal() {
        assert_eq!(increment_decimal("1.23"), "1.24");
        assert_eq!(increment_decimal("1.99"), "2.00");
        assert_eq!(increment_decimal("99.9"), "100.0");
        assert_eq!(increment_decimal("9"), "10");
    }
}
