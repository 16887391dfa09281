// ============================================================================
// Rounding, Truncation, and Exponent Adjustment
// ============================================================================

use crate::decimal::Decimal;
use crate::error::DecimalResult;
use crate::scale::{rescale_128, Discarded, POW10_32};

/// Round to `dp` decimal places, half to even. A monotonic shrink: values
/// already at or below the target scale pass through unchanged, so this
/// never fails.
pub(crate) fn round_dp(d: Decimal, dp: u32) -> Decimal {
    let scale = d.scale();
    if scale <= dp {
        return d;
    }
    let (mantissa, discarded) = divide_out(d.mantissa(), scale - dp);
    let mantissa = apply_rounding(mantissa, discarded);
    Decimal::from_internal(mantissa, dp, d.is_sign_negative())
}

/// Integral part, truncated toward zero.
pub(crate) fn truncate(d: Decimal) -> Decimal {
    let scale = d.scale();
    if scale == 0 {
        return d;
    }
    let (mantissa, _) = divide_out(d.mantissa(), scale);
    Decimal::from_internal(mantissa, 0, d.is_sign_negative())
}

/// Largest integral value at or below `d`: truncation, stepped away from
/// zero when a negative value dropped a nonzero fraction.
pub(crate) fn floor(d: Decimal) -> Decimal {
    let scale = d.scale();
    if scale == 0 {
        return d;
    }
    let (mut mantissa, discarded) = divide_out(d.mantissa(), scale);
    if d.is_sign_negative() && !discarded.is_exact() {
        // Cannot overflow: a value with fractional digits truncates to a
        // mantissa strictly below the 96-bit ceiling.
        mantissa += 1;
    }
    Decimal::from_internal(mantissa, 0, d.is_sign_negative())
}

/// Multiply by `10^exp` by adjusting the scale; deltas leaving [0, 28]
/// rescale with rounding (shrinking) or error on overflow (lifting).
pub(crate) fn set_exponent(d: Decimal, exp: i32) -> DecimalResult<Decimal> {
    if d.is_zero() {
        return Ok(d);
    }
    let new_scale = d.scale() as i32 - exp;
    let (mantissa, scale) = rescale_128(d.mantissa(), new_scale, 0, 0, 28, true, Discarded::Exact)?;
    Ok(Decimal::from_internal(mantissa, scale, d.is_sign_negative()))
}

/// Divide the mantissa by `10^digits` in nine-digit chunks, classifying the
/// discarded fraction.
fn divide_out(mut mantissa: u128, mut digits: u32) -> (u128, Discarded) {
    let mut discarded = Discarded::Exact;
    while digits > 0 {
        let k = digits.min(9);
        let divisor = POW10_32[k as usize] as u128;
        let rem = mantissa % divisor;
        mantissa /= divisor;
        discarded = discarded.div(rem, divisor);
        digits -= k;
    }
    (mantissa, discarded)
}

#[inline]
fn apply_rounding(mantissa: u128, discarded: Discarded) -> u128 {
    if discarded.rounds_up(mantissa & 1 == 1) {
        mantissa + 1
    } else {
        mantissa
    }
}
