// ============================================================================
// Arithmetic Operators
// Thin wrappers that prepare operands and delegate rounding to the scale
// engine
// ============================================================================

mod add;
mod cmp;
mod div;
mod mul;
mod round;

pub(crate) use add::add;
pub(crate) use cmp::cmp;
pub(crate) use div::{div, div_int, rem};
pub(crate) use mul::mul;
pub(crate) use round::{floor, round_dp, set_exponent, truncate};

use crate::decimal::Decimal;

/// Mantissa, scale, and sign with trailing zeros stripped, so that equal
/// values share one representation. Used for hashing.
pub(crate) fn normalized_parts(d: &Decimal) -> (u128, u32, bool) {
    let mut mantissa = d.mantissa();
    let mut scale = d.scale();
    while scale > 0 && mantissa % 10 == 0 {
        mantissa /= 10;
        scale -= 1;
    }
    (mantissa, scale, d.is_sign_negative())
}
