// ============================================================================
// Multiplication
// ============================================================================

use crate::decimal::Decimal;
use crate::error::{DecimalError, DecimalResult};
use crate::scale::{rescale_128, Discarded, POW10_32};
use crate::wide::Wide192;

/// Exact 96x96 -> 192-bit multiply, then reduce the product back into a
/// 128-bit intermediate by dividing out powers of ten (consuming scale,
/// tracking the discarded fraction), and hand the rest to the scale engine.
pub(crate) fn mul(a: Decimal, b: Decimal) -> DecimalResult<Decimal> {
    if a.is_zero() || b.is_zero() {
        return Ok(Decimal::ZERO);
    }

    let negative = a.is_sign_negative() != b.is_sign_negative();
    let mut scale = (a.scale() + b.scale()) as i32;
    let mut product = Wide192::widening_mul(a.mantissa(), b.mantissa());
    let mut discarded = Discarded::Exact;

    // The scale engine works on 128 bits; shed the top limb first.
    while product.hi != 0 {
        if scale == 0 {
            return Err(DecimalError::Overflow);
        }
        let k = decimal_digits_u64(product.hi).min(9).min(scale as u32);
        let divisor = POW10_32[k as usize];
        let (quotient, rem) = product.div_rem_u32(divisor);
        discarded = discarded.div(rem as u128, divisor as u128);
        product = quotient;
        scale -= k as i32;
    }

    let (mantissa, scale) = rescale_128(product.as_u128(), scale, 0, 0, 28, true, discarded)?;
    Ok(Decimal::from_internal(mantissa, scale, negative))
}

#[inline]
fn decimal_digits_u64(value: u64) -> u32 {
    debug_assert!(value != 0);
    let mut n = 1;
    let mut v = value;
    while v >= 10 {
        v /= 10;
        n += 1;
    }
    n
}
