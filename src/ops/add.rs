// ============================================================================
// Addition and Subtraction
// ============================================================================

use crate::decimal::Decimal;
use crate::error::{DecimalError, DecimalResult};
use crate::scale::{adjust_scale_128, log2_128, normalize_128, Discarded};
use std::cmp::Ordering;

/// Highest scale the operand can be lifted to while the lifted mantissa
/// stays below 2^127, keeping the sum of two lifted operands inside u128.
/// Digits of headroom are estimated from log2 (3322/1000 over-approximates
/// log2(10), so the estimate never overshoots). A full 96-bit mantissa
/// still gets nine digits of lift.
fn max_liftable_scale(mantissa: u128, scale: u32) -> u32 {
    debug_assert!(mantissa != 0);
    let headroom_bits = 126 - log2_128(mantissa) as i64;
    scale + (headroom_bits * 1000 / 3322) as u32
}

/// Signed addition. Subtraction negates the second operand before calling.
///
/// Operands at the same scale add directly. Otherwise a common working scale
/// is chosen: the larger of the two scales, capped where lifting would leave
/// the 128-bit intermediate. The sum is reduced and rounded half-to-even in
/// one step by `normalize_128`; only an operand whose scale exceeds the cap
/// loses digits beforehand, truncated by the scale adjustment.
pub(crate) fn add(a: Decimal, b: Decimal) -> DecimalResult<Decimal> {
    if a.is_zero() {
        return Ok(b);
    }
    if b.is_zero() {
        return Ok(a);
    }

    let (ma, sa, neg_a) = (a.mantissa(), a.scale(), a.is_sign_negative());
    let (mb, sb, neg_b) = (b.mantissa(), b.scale(), b.is_sign_negative());

    let working = if sa == sb {
        sa
    } else {
        sa.max(sb)
            .min(max_liftable_scale(ma, sa))
            .min(max_liftable_scale(mb, sb))
    };

    let ma = adjust_scale_128(ma, working as i32 - sa as i32)?;
    let mb = adjust_scale_128(mb, working as i32 - sb as i32)?;

    // Sign-magnitude: equal signs add, opposite signs subtract the smaller
    // magnitude from the larger and take the larger operand's sign.
    let (sum, negative) = if neg_a == neg_b {
        let sum = ma.checked_add(mb).ok_or(DecimalError::Internal)?;
        (sum, neg_a)
    } else {
        match ma.cmp(&mb) {
            Ordering::Greater => (ma - mb, neg_a),
            Ordering::Less => (mb - ma, neg_b),
            Ordering::Equal => return Ok(Decimal::ZERO),
        }
    };

    let (mantissa, scale) = normalize_128(sum, working as i32, true, Discarded::Exact)?;
    Ok(Decimal::from_internal(mantissa, scale, negative))
}
