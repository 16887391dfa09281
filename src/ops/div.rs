// ============================================================================
// Division
// ============================================================================

use crate::decimal::Decimal;
use crate::error::{DecimalError, DecimalResult};
use crate::scale::{rescale_128, Discarded};
use crate::wide::Wide192;

/// Full-precision division: the quotient's scale fills up to 28 digits with
/// banker's rounding (only binary-exact quotients come out shorter).
pub(crate) fn div(a: Decimal, b: Decimal) -> DecimalResult<Decimal> {
    div_common(a, b, 28, true)
}

/// Integer division: the quotient truncated toward zero, scale 0.
pub(crate) fn div_int(a: Decimal, b: Decimal) -> DecimalResult<Decimal> {
    div_common(a, b, 0, false)
}

/// Remainder: `a - trunc(a / b) * b`. Composed from the other operators and
/// inheriting their overflow behavior on extreme operand ratios.
pub(crate) fn rem(a: Decimal, b: Decimal) -> DecimalResult<Decimal> {
    let quotient = div_int(a, b)?;
    a.checked_sub(quotient.checked_mul(b)?)
}

/// Long division via binary normalization.
///
/// The dividend is shifted into the top of a 192-bit window and the divisor
/// is shifted so its 96th bit is set; the 192-by-96 long division then
/// yields 96 quotient bits, extended by one more 32-bit word computed from
/// the remainder. The shift bookkeeping leaves a binary exponent for the
/// scale engine to eliminate, and the final remainder seeds the discarded
/// fraction so the last decimal digit rounds correctly.
fn div_common(a: Decimal, b: Decimal, max_scale: i32, round: bool) -> DecimalResult<Decimal> {
    if b.is_zero() {
        return Err(DecimalError::DivideByZero);
    }
    if a.is_zero() {
        return Ok(Decimal::ZERO);
    }

    let negative = a.is_sign_negative() != b.is_sign_negative();
    let ma = a.mantissa();
    let mb = b.mantissa();

    let ashift = 192 - Wide192::from_u128(ma).bits();
    let mut dividend = Wide192::from_u128(ma).shl(ashift);

    let bshift = 96 - (128 - mb.leading_zeros());
    let divisor = mb << bshift;

    // Keep the quotient inside 96 bits: the dividend's top window must stay
    // below the divisor. The freshly shifted dividend has zero low bits, so
    // the halving is exact.
    let mut extra = 0u32;
    if dividend.high_96() >= divisor {
        dividend = dividend.shr1();
        extra = 1;
    }

    let (q96, rem96) = dividend.div_rem_u96(divisor);

    // One more 32-bit quotient word from the remainder.
    let num = rem96 << 32;
    let q_ext = num / divisor;
    let rem_ext = num % divisor;
    debug_assert!(q_ext < 1 << 32);

    let quotient = (q96 << 32) | q_ext;
    let exp = (ashift + 32 - extra - bshift) as i32;
    let discarded = Discarded::Exact.div(rem_ext, divisor);

    let scale = a.scale() as i32 - b.scale() as i32;
    let (mantissa, scale) = rescale_128(quotient, scale, exp, 0, max_scale, round, discarded)?;
    Ok(Decimal::from_internal(mantissa, scale, negative))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(
            Decimal::ONE.checked_div(Decimal::ZERO),
            Err(DecimalError::DivideByZero)
        );
        assert_eq!(
            Decimal::ZERO.checked_div(Decimal::ZERO),
            Err(DecimalError::DivideByZero)
        );
    }

    #[test]
    fn test_binary_exact_quotients_stay_short() {
        // Quotients with a finite binary expansion absorb the whole exponent
        // through exact shifts and keep a minimal scale.
        assert_eq!(dec("1") / dec("8"), dec("0.125"));
        assert_eq!((dec("1") / dec("8")).scale(), 3);
        assert_eq!(dec("10") / dec("4"), dec("2.5"));
        assert_eq!(dec("6") / dec("2"), dec("3"));
        assert_eq!((dec("6") / dec("2")).scale(), 0);
    }

    #[test]
    fn test_decimal_quotients_fill_scale() {
        // 1/10 is not binary-exact, so the scale fills to 28.
        let tenth = dec("1") / dec("10");
        assert_eq!(tenth.scale(), 28);
        assert_eq!(tenth.mantissa(), 10u128.pow(27));
        assert_eq!(tenth, dec("0.1"));
    }

    #[test]
    fn test_one_third() {
        let third = Decimal::ONE.checked_div(dec("3")).unwrap();
        assert_eq!(third.scale(), 28);
        assert_eq!(third.mantissa(), 3_333_333_333_333_333_333_333_333_333);

        let two_thirds = dec("2").checked_div(dec("3")).unwrap();
        assert_eq!(two_thirds.scale(), 28);
        assert_eq!(two_thirds.mantissa(), 6_666_666_666_666_666_666_666_666_667);
    }

    #[test]
    fn test_sign_and_scale_combination() {
        assert_eq!(dec("-7.5") / dec("2.5"), dec("-3"));
        assert_eq!(dec("-7.5") / dec("-2.5"), dec("3"));
        // dividend scale below divisor scale
        assert_eq!(dec("1") / dec("0.5"), dec("2"));
        assert_eq!(dec("1") / dec("0.2"), dec("5"));
    }

    #[test]
    fn test_divide_rounds_last_digit() {
        // 2/7 = 0.2857142857142857142857142857142857... -> final 1 rounds down,
        // 5/7 = 0.7142857142857142857142857142857142... -> final 8 stays... check last digit
        let q = dec("2").checked_div(dec("7")).unwrap();
        assert_eq!(q.mantissa(), 2_857_142_857_142_857_142_857_142_857);
        let q = dec("5").checked_div(dec("7")).unwrap();
        assert_eq!(q.mantissa(), 7_142_857_142_857_142_857_142_857_143);
    }

    #[test]
    fn test_divide_overflow() {
        // Quotient magnitude exceeds the mantissa range.
        assert_eq!(
            Decimal::MAX.checked_div(dec("0.1")),
            Err(DecimalError::Overflow)
        );
    }

    #[test]
    fn test_integer_divide_truncates() {
        assert_eq!(dec("7").checked_div_int(dec("2")).unwrap(), dec("3"));
        assert_eq!(dec("-7").checked_div_int(dec("2")).unwrap(), dec("-3"));
        assert_eq!(dec("7.9").checked_div_int(dec("2")).unwrap(), dec("3"));
        assert_eq!(dec("1").checked_div_int(dec("3")).unwrap(), Decimal::ZERO);
        assert_eq!(
            dec("100.5").checked_div_int(dec("0.25")).unwrap(),
            dec("402")
        );
    }

    #[test]
    fn test_remainder() {
        assert_eq!(dec("7").checked_rem(dec("2")).unwrap(), dec("1"));
        assert_eq!(dec("-7").checked_rem(dec("2")).unwrap(), dec("-1"));
        assert_eq!(dec("7.5").checked_rem(dec("2")).unwrap(), dec("1.5"));
        assert_eq!(dec("6").checked_rem(dec("3")).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_division_inverts_multiplication() {
        let a = dec("123.456");
        let b = dec("7.89");
        let product = a.checked_mul(b).unwrap();
        assert_eq!(product.checked_div(b).unwrap(), a);
    }
}
