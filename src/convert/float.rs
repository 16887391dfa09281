// ============================================================================
// Floating-Point Conversion
// ============================================================================
//
// Double-to-decimal goes through a shortest-round-trip digit string (the
// dtoa crate's Grisu-family formatter), which is stateless and thread-safe,
// then rounds to the type's reliable digit count before rescaling.
// Decimal-to-double converts the scale into a binary exponent by extracting
// powers of five, keeping the intermediate shifted to full 128-bit
// precision.

use crate::decimal::Decimal;
use crate::error::{DecimalError, DecimalResult};
use crate::scale::{rescale_128, Discarded, POW10_32, POW5_32};

/// Reliable decimal digits of an f64.
const F64_DIGITS: u32 = 15;

/// Reliable decimal digits of an f32.
const F32_DIGITS: u32 = 7;

impl TryFrom<f64> for Decimal {
    type Error = DecimalError;

    /// Convert a finite double, keeping 15 significant digits.
    ///
    /// # Errors
    /// Returns `Overflow` for non-finite input or magnitudes beyond the
    /// decimal range. Values below the smallest representable fraction
    /// round to zero.
    fn try_from(value: f64) -> DecimalResult<Self> {
        if !value.is_finite() {
            return Err(DecimalError::Overflow);
        }
        let mut buf = dtoa::Buffer::new();
        let formatted = buf.format_finite(value.abs());
        from_float_digits(formatted, value.is_sign_negative(), F64_DIGITS)
    }
}

impl TryFrom<f32> for Decimal {
    type Error = DecimalError;

    /// Convert a finite float, keeping 7 significant digits.
    fn try_from(value: f32) -> DecimalResult<Self> {
        if !value.is_finite() {
            return Err(DecimalError::Overflow);
        }
        let mut buf = dtoa::Buffer::new();
        let formatted = buf.format_finite(value.abs());
        from_float_digits(formatted, value.is_sign_negative(), F32_DIGITS)
    }
}

impl From<Decimal> for f64 {
    fn from(d: Decimal) -> f64 {
        if d.is_zero() {
            return 0.0;
        }
        let mut mantissa = d.mantissa();
        let mut exp = -(d.scale() as i32);
        let mut remaining = d.scale();
        // 10^-scale = 5^-scale * 2^-scale: trade the fives for exponent,
        // shifting left first so each truncating division keeps 128 bits of
        // precision.
        while remaining > 0 {
            let lead = mantissa.leading_zeros();
            mantissa <<= lead;
            exp -= lead as i32;
            let k = remaining.min(13);
            mantissa /= POW5_32[k as usize] as u128;
            remaining -= k;
        }
        // One rounding (nearest even) in the u128 -> f64 conversion; the
        // power-of-two scaling is exact.
        let magnitude = (mantissa as f64) * 2f64.powi(exp);
        if d.is_sign_negative() {
            -magnitude
        } else {
            magnitude
        }
    }
}

impl Decimal {
    /// Narrowing conversion through `f64`.
    pub fn to_f32(self) -> f32 {
        f64::from(self) as f32
    }
}

/// Parse a dtoa-formatted magnitude (digits, optional point, optional
/// exponent), round it to `max_digits` significant digits half-to-even,
/// and rescale into the decimal range.
fn from_float_digits(s: &str, negative: bool, max_digits: u32) -> DecimalResult<Decimal> {
    let (digits, exp) = match s.find(['e', 'E']) {
        Some(pos) => {
            let exp: i32 = s[pos + 1..]
                .parse()
                .map_err(|_| DecimalError::InvalidCharacter)?;
            (&s[..pos], exp)
        }
        None => (s, 0),
    };

    let mut value: u128 = 0;
    let mut frac_digits = 0i32;
    let mut seen_point = false;
    for byte in digits.bytes() {
        if byte == b'.' {
            seen_point = true;
            continue;
        }
        let digit = byte.wrapping_sub(b'0');
        if digit > 9 {
            return Err(DecimalError::InvalidCharacter);
        }
        // Shortest round-trip output never exceeds 17 digits.
        value = value * 10 + digit as u128;
        if seen_point {
            frac_digits += 1;
        }
    }

    let mut scale = frac_digits - exp;
    let mut discarded = Discarded::Exact;
    let digit_count = decimal_digit_count(value);
    if digit_count > max_digits {
        let drop = digit_count - max_digits;
        let divisor = POW10_32[drop as usize] as u128;
        let rem = value % divisor;
        value /= divisor;
        discarded = discarded.div(rem, divisor);
        scale -= drop as i32;
    }

    let (mantissa, scale) = rescale_128(value, scale, 0, 0, 28, true, discarded)?;
    Ok(Decimal::from_internal(mantissa, scale, negative))
}

fn decimal_digit_count(value: u128) -> u32 {
    let mut n = 1;
    let mut v = value;
    while v >= 10 {
        v /= 10;
        n += 1;
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_from_f64_simple() {
        assert_eq!(Decimal::try_from(1.5f64).unwrap(), dec("1.5"));
        assert_eq!(Decimal::try_from(-0.25f64).unwrap(), dec("-0.25"));
        assert_eq!(Decimal::try_from(0.0f64).unwrap(), Decimal::ZERO);
        assert_eq!(Decimal::try_from(-0.0f64).unwrap(), Decimal::ZERO);
        assert_eq!(Decimal::try_from(1e10f64).unwrap(), dec("10000000000"));
    }

    #[test]
    fn test_from_f64_keeps_15_digits() {
        // 0.1 round-trips as "0.1"; one third keeps 15 digits.
        assert_eq!(Decimal::try_from(0.1f64).unwrap(), dec("0.1"));
        let third = Decimal::try_from(1.0f64 / 3.0).unwrap();
        assert_eq!(third, dec("0.333333333333333"));
    }

    #[test]
    fn test_from_f64_range() {
        assert_eq!(Decimal::try_from(1e28f64).unwrap(), dec("10000000000000000000000000000"));
        assert_eq!(Decimal::try_from(1e29f64), Err(DecimalError::Overflow));
        assert_eq!(Decimal::try_from(f64::INFINITY), Err(DecimalError::Overflow));
        assert_eq!(Decimal::try_from(f64::NAN), Err(DecimalError::Overflow));
        // Underflow rounds to zero rather than erroring.
        assert_eq!(Decimal::try_from(1e-30f64).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_from_f32() {
        assert_eq!(Decimal::try_from(2.5f32).unwrap(), dec("2.5"));
        let third = Decimal::try_from(1.0f32 / 3.0).unwrap();
        assert_eq!(third, dec("0.3333333"));
        assert_eq!(Decimal::try_from(f32::NAN), Err(DecimalError::Overflow));
    }

    #[test]
    fn test_to_f64() {
        assert_eq!(f64::from(dec("1.5")), 1.5);
        assert_eq!(f64::from(dec("-0.25")), -0.25);
        assert_eq!(f64::from(Decimal::ZERO), 0.0);
        assert_eq!(f64::from(dec("12345678901234567890")), 12345678901234567890f64);
        // Max value is ~7.92e28.
        let max = f64::from(Decimal::MAX);
        assert!((max - 7.922816251426434e28).abs() / max < 1e-15);
    }

    #[test]
    fn test_to_f64_deep_scale() {
        assert_eq!(f64::from(dec("0.0000000000000000000000000001")), 1e-28);
        assert_eq!(f64::from(dec("0.1")), 0.1);
        assert_eq!(f64::from(dec("0.3333333333333333333333333333")), 1.0 / 3.0);
    }

    #[test]
    fn test_to_f32() {
        assert_eq!(dec("1.5").to_f32(), 1.5f32);
        assert_eq!(dec("0.1").to_f32(), 0.1f32);
    }

    #[test]
    fn test_f64_round_trip() {
        for v in [0.5, 1.0, 100.25, 1e-10, 12345.6789, 9.007199254740992e15] {
            let d = Decimal::try_from(v).unwrap();
            assert_eq!(f64::from(d), v);
        }
    }
}
