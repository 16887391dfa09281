// ============================================================================
// String Conversion
// Digit-buffer parsing and display formatting
// ============================================================================

use crate::decimal::Decimal;
use crate::error::{DecimalError, DecimalResult};
use crate::scale::{rescale_128, Discarded};
use arrayvec::ArrayVec;
use std::fmt;
use std::str::FromStr;

impl Decimal {
    /// Parse a plain digit buffer: no sign, no decimal point. The point's
    /// position is passed separately as an offset from the start of the
    /// buffer, and may lie before the first digit (small fractions) or past
    /// the last (the value is lifted by the missing powers of ten).
    ///
    /// More than 29 significant digits overflow; digits beyond scale 28
    /// round half-to-even.
    ///
    /// # Errors
    /// - `InvalidCharacter` for an empty buffer or any non-digit byte
    /// - `Overflow` when the value cannot be represented
    pub fn from_digit_str(
        digits: &str,
        decimal_point_position: i32,
        negative: bool,
    ) -> DecimalResult<Self> {
        if digits.is_empty() {
            return Err(DecimalError::InvalidCharacter);
        }
        let mut value: u128 = 0;
        let mut significant = 0u32;
        let mut count = 0i64;
        for byte in digits.bytes() {
            let digit = byte.wrapping_sub(b'0');
            if digit > 9 {
                return Err(DecimalError::InvalidCharacter);
            }
            count += 1;
            if value != 0 || digit != 0 {
                significant += 1;
                if significant > 29 {
                    return Err(DecimalError::Overflow);
                }
                value = value * 10 + digit as u128;
            }
        }
        if value == 0 {
            return Ok(Self::ZERO);
        }
        // The point position spans the whole i32 range; resolve the scale in
        // i64 and settle out-of-range magnitudes before the rescale loops.
        let scale = count - decimal_point_position as i64;
        if scale > (Self::MAX_SCALE + 30) as i64 {
            // At most 29 digits this deep rounds below half of the smallest
            // representable fraction.
            return Ok(Self::ZERO);
        }
        if scale < -(Self::MAX_SCALE as i64) {
            // Any nonzero digit lifted past 10^28 exceeds the mantissa range.
            return Err(DecimalError::Overflow);
        }
        let (mantissa, scale) = rescale_128(value, scale as i32, 0, 0, 28, true, Discarded::Exact)?;
        Ok(Self::from_internal(mantissa, scale, negative))
    }
}

impl FromStr for Decimal {
    type Err = DecimalError;

    /// Parse from a decimal string: optional sign, digits, optional decimal
    /// point. No exponent notation and no grouping separators.
    ///
    /// # Examples
    /// - "123" -> 123
    /// - "-1.50" -> -1.50 (scale 2)
    /// - ".5" -> 0.5
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (negative, s) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        match s.find('.') {
            Some(pos) => {
                let (int_part, frac_part) = (&s[..pos], &s[pos + 1..]);
                if int_part.is_empty() && frac_part.is_empty() {
                    return Err(DecimalError::InvalidCharacter);
                }
                let digits = [int_part, frac_part].concat();
                Self::from_digit_str(&digits, int_part.len() as i32, negative)
            }
            None => Self::from_digit_str(s, s.len() as i32, negative),
        }
    }
}

impl fmt::Display for Decimal {
    /// All digits of the current scale; a precision (`{:.N}`) first rounds
    /// half-to-even to N decimal places, then pads the fraction to exactly
    /// N digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = match f.precision() {
            Some(dp) => self.round_dp(dp.min(Decimal::MAX_SCALE as usize) as u32),
            None => *self,
        };

        // Extract digits least significant first.
        let mut digits = ArrayVec::<u8, 29>::new();
        let mut mantissa = d.mantissa();
        loop {
            digits.push(b'0' + (mantissa % 10) as u8);
            mantissa /= 10;
            if mantissa == 0 {
                break;
            }
        }

        let scale = d.scale() as usize;
        let mut out = String::with_capacity(40);
        if digits.len() > scale {
            for &b in digits[scale..].iter().rev() {
                out.push(b as char);
            }
        } else {
            out.push('0');
        }
        let frac_width = f.precision().unwrap_or(scale);
        if frac_width > 0 {
            out.push('.');
            for _ in digits.len()..scale {
                out.push('0');
            }
            for &b in digits[..digits.len().min(scale)].iter().rev() {
                out.push(b as char);
            }
            for _ in scale..frac_width {
                out.push('0');
            }
        }

        f.pad_integral(!d.is_sign_negative(), "", &out)
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Decimal({}, mantissa={}, scale={})",
            self,
            self.mantissa(),
            self.scale()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_digit_str() {
        // "12345" with the point after all five digits: 12345, scale 0
        let d = Decimal::from_digit_str("12345", 5, false).unwrap();
        assert_eq!(d.mantissa(), 12345);
        assert_eq!(d.scale(), 0);
        assert!(!d.is_sign_negative());

        // Point in the middle: 123.45
        let d = Decimal::from_digit_str("12345", 3, true).unwrap();
        assert_eq!(d.mantissa(), 12345);
        assert_eq!(d.scale(), 2);
        assert!(d.is_sign_negative());
    }

    #[test]
    fn test_from_digit_str_point_outside_digits() {
        // Point past the digits lifts by the missing powers of ten.
        let d = Decimal::from_digit_str("5", 3, false).unwrap();
        assert_eq!(d.mantissa(), 500);
        assert_eq!(d.scale(), 0);

        // Point before the digits deepens the fraction.
        let d = Decimal::from_digit_str("5", -2, false).unwrap();
        assert_eq!(d.mantissa(), 5);
        assert_eq!(d.scale(), 3);
    }

    #[test]
    fn test_from_digit_str_rounds_past_scale_28() {
        // 31 fractional digits round down to 28.
        let d = Decimal::from_digit_str("1234567890123456789012345678999", -0, false);
        // 31 significant digits overflow before scale applies
        assert_eq!(d, Err(DecimalError::Overflow));

        let d = Decimal::from_digit_str("123456789012345678901234567899", 30, false);
        assert_eq!(d, Err(DecimalError::Overflow)); // 30 significant digits

        // Leading zeros are not significant; the scale-30 tail rounds away.
        let d = Decimal::from_digit_str("00012345678901234567890123456789", 2, false).unwrap();
        assert_eq!(d.scale(), 28);
        assert_eq!(d.mantissa(), 123_456_789_012_345_678_901_234_568);
    }

    #[test]
    fn test_from_digit_str_extreme_point_positions() {
        // Positions at the ends of the i32 range must not wrap the scale.
        assert_eq!(
            Decimal::from_digit_str("1", i32::MIN, false).unwrap(),
            Decimal::ZERO
        );
        assert_eq!(
            Decimal::from_digit_str("1", i32::MAX, false),
            Err(DecimalError::Overflow)
        );

        // Moderately out-of-range positions settle the same way.
        assert_eq!(
            Decimal::from_digit_str("1", -100, false).unwrap(),
            Decimal::ZERO
        );
        assert_eq!(
            Decimal::from_digit_str("1", 100, false),
            Err(DecimalError::Overflow)
        );

        // A zero buffer is zero no matter where the point sits.
        assert_eq!(
            Decimal::from_digit_str("000", i32::MAX, true).unwrap(),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_from_digit_str_invalid() {
        assert_eq!(
            Decimal::from_digit_str("12a45", 5, false),
            Err(DecimalError::InvalidCharacter)
        );
        assert_eq!(
            Decimal::from_digit_str("", 0, false),
            Err(DecimalError::InvalidCharacter)
        );
    }

    #[test]
    fn test_overflow_boundary() {
        // 30 nines overflow; the 29-digit maximum parses exactly.
        let thirty_nines = "9".repeat(30);
        assert_eq!(
            Decimal::from_digit_str(&thirty_nines, 30, false),
            Err(DecimalError::Overflow)
        );

        let max = "79228162514264337593543950335";
        let d = Decimal::from_digit_str(max, 29, false).unwrap();
        assert_eq!(d, Decimal::MAX);

        // 29 nines exceed the mantissa at scale 0.
        let twenty_nine_nines = "9".repeat(29);
        assert_eq!(
            Decimal::from_digit_str(&twenty_nine_nines, 29, false),
            Err(DecimalError::Overflow)
        );
        // ...but fit at scale 1 by rounding to 10.0.
        let d = Decimal::from_digit_str(&twenty_nine_nines, 1, false).unwrap();
        assert_eq!(d.mantissa(), 10u128.pow(28));
        assert_eq!(d.scale(), 27);
    }

    #[test]
    fn test_from_str() {
        let d: Decimal = "123.456".parse().unwrap();
        assert_eq!(d.mantissa(), 123_456);
        assert_eq!(d.scale(), 3);

        let d: Decimal = "-0.001".parse().unwrap();
        assert_eq!(d.mantissa(), 1);
        assert_eq!(d.scale(), 3);
        assert!(d.is_sign_negative());

        let d: Decimal = "+42".parse().unwrap();
        assert_eq!(d.mantissa(), 42);

        let d: Decimal = ".5".parse().unwrap();
        assert_eq!(d.mantissa(), 5);
        assert_eq!(d.scale(), 1);

        let d: Decimal = " 7 ".parse().unwrap();
        assert_eq!(d.mantissa(), 7);
    }

    #[test]
    fn test_from_str_invalid() {
        assert!("".parse::<Decimal>().is_err());
        assert!(".".parse::<Decimal>().is_err());
        assert!("-".parse::<Decimal>().is_err());
        assert!("1.2.3".parse::<Decimal>().is_err());
        assert!("1e5".parse::<Decimal>().is_err());
        assert!("not_a_number".parse::<Decimal>().is_err());
    }

    #[test]
    fn test_display_preserves_scale() {
        assert_eq!("1.50".parse::<Decimal>().unwrap().to_string(), "1.50");
        assert_eq!("0.001".parse::<Decimal>().unwrap().to_string(), "0.001");
        assert_eq!("-12.30".parse::<Decimal>().unwrap().to_string(), "-12.30");
        assert_eq!(Decimal::ZERO.to_string(), "0");
        assert_eq!(
            Decimal::MAX.to_string(),
            "79228162514264337593543950335"
        );
    }

    #[test]
    fn test_display_precision_rounds_then_pads() {
        let d: Decimal = "2.45".parse().unwrap();
        assert_eq!(format!("{:.1}", d), "2.4"); // banker's: ties to even
        assert_eq!(format!("{:.4}", d), "2.4500");
        assert_eq!(format!("{:.0}", d), "2");

        let neg: Decimal = "-0.004".parse().unwrap();
        assert_eq!(format!("{:.2}", neg), "0.00"); // rounds to canonical zero
    }

    #[test]
    fn test_display_width_and_sign() {
        let d: Decimal = "-1.5".parse().unwrap();
        assert_eq!(format!("{:>8}", d), "    -1.5");
        assert_eq!(format!("{:08}", d), "-00001.5");
    }

    #[test]
    fn test_round_trip() {
        for s in ["0", "1", "-1", "1.50", "0.0000000000000000000000000001",
                  "-79228162514264337593543950335", "123456789.987654321"] {
            let d: Decimal = s.parse().unwrap();
            assert_eq!(d.to_string(), s.trim_start_matches('+'));
            assert_eq!(d.to_string().parse::<Decimal>().unwrap(), d);
        }
    }
}
