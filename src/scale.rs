// ============================================================================
// Scale Engine
// Conversion between binary-exponent and decimal-scale representations
// ============================================================================
//
// All arithmetic operators funnel through here: they prepare an up-to-128-bit
// unsigned magnitude plus a (scale, binary exponent) pair, and this module
// decides how the result is rounded back into the 96-bit mantissa and the
// [0, 28] scale range.

use crate::error::{DecimalError, DecimalResult};
use std::cmp::Ordering;

/// Largest representable mantissa: 2^96 - 1.
pub(crate) const MAX_MANTISSA: u128 = (1 << 96) - 1;

/// Largest scale a canonical value may carry.
pub(crate) const MAX_SCALE: u32 = 28;

const fn pow10_u128(n: u32) -> u128 {
    let mut result: u128 = 1;
    let mut i = 0;
    while i < n {
        result *= 10;
        i += 1;
    }
    result
}

const fn pow10_table() -> [u128; 39] {
    let mut table = [0u128; 39];
    let mut i = 0;
    while i < 39 {
        table[i] = pow10_u128(i as u32);
        i += 1;
    }
    table
}

const fn pow5_table() -> [u32; 14] {
    let mut table = [0u32; 14];
    let mut i = 0;
    let mut p: u32 = 1;
    while i < 14 {
        table[i] = p;
        if i < 13 {
            p *= 5;
        }
        i += 1;
    }
    table
}

/// Powers of ten 10^0..10^38 (10^38 is the largest fitting u128 headroom
/// needed by scale adjustment).
pub(crate) const POW10: [u128; 39] = pow10_table();

/// Powers of ten fitting a 32-bit word: 10^0..10^9.
pub(crate) const POW10_32: [u32; 10] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
];

/// Powers of five fitting a 32-bit word: 5^0..5^13.
pub(crate) const POW5_32: [u32; 14] = pow5_table();

/// floor(log2(value)) for a nonzero 128-bit value.
#[inline]
pub(crate) fn log2_128(value: u128) -> u32 {
    debug_assert!(value != 0);
    127 - value.leading_zeros()
}

/// Binary magnitude estimate of `mantissa * 10^-scale`, in thousandths of a
/// bit. 3322/1000 overestimates log2(10) slightly, and the floor in log2
/// loses under one bit, so two estimates more than ~2 whole bits apart order
/// the true magnitudes reliably.
#[inline]
pub(crate) fn log2_with_scale(mantissa: u128, scale: u32) -> i64 {
    debug_assert!(mantissa != 0);
    log2_128(mantissa) as i64 * 1000 - scale as i64 * 3322
}

/// Decimal digit count of a nonzero value, at most `cap`.
#[inline]
fn digit_count_capped(value: u128, cap: u32) -> u32 {
    let mut n = 1;
    while n < cap && value >= POW10[n as usize] {
        n += 1;
    }
    n
}

// ============================================================================
// Discarded-fraction classification
// ============================================================================

/// Classification of everything a truncating reduction has dropped so far,
/// as a fraction of one unit of the current value.
///
/// Composes exactly under further division because every divisor used here
/// is even (a power of ten or two): a prior nonzero-but-sub-half fraction
/// stays sub-half after `/d` unless the new remainder re-crosses the line.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Discarded {
    Exact,
    BelowHalf,
    Half,
    AboveHalf,
}

impl Discarded {
    /// Fold the remainder of a division into the classification. `rem` must
    /// be below `divisor`, and composing onto a prior inexact state needs an
    /// even divisor (otherwise the half line cannot be compared exactly).
    pub(crate) fn div(self, rem: u128, divisor: u128) -> Self {
        debug_assert!(rem < divisor);
        debug_assert!(divisor % 2 == 0 || self == Discarded::Exact);
        match (2 * rem).cmp(&divisor) {
            Ordering::Less => {
                if rem == 0 && self == Discarded::Exact {
                    Discarded::Exact
                } else {
                    Discarded::BelowHalf
                }
            }
            Ordering::Equal => {
                if self == Discarded::Exact {
                    Discarded::Half
                } else {
                    Discarded::AboveHalf
                }
            }
            Ordering::Greater => Discarded::AboveHalf,
        }
    }

    /// Fold one right-shift (division by two) into the classification.
    #[inline]
    pub(crate) fn shr(self, dropped_bit: bool) -> Self {
        self.div(dropped_bit as u128, 2)
    }

    /// Round-half-to-even decision for a value whose low bit parity is given.
    #[inline]
    pub(crate) fn rounds_up(self, low_bit_odd: bool) -> bool {
        match self {
            Discarded::Exact | Discarded::BelowHalf => false,
            Discarded::Half => low_bit_odd,
            Discarded::AboveHalf => true,
        }
    }

    #[inline]
    pub(crate) fn is_exact(self) -> bool {
        self == Discarded::Exact
    }
}

// ============================================================================
// Normalization
// ============================================================================

/// Reduce a 128-bit intermediate into the 96-bit mantissa budget, dividing
/// the scale down as far as needed, then apply the pending rounding decision.
///
/// `scale` must already be within [0, 28]; the returned scale never exceeds
/// it. Errors with `Overflow` when the value still overhangs at scale 0.
pub(crate) fn normalize_128(
    mut value: u128,
    mut scale: i32,
    round: bool,
    mut discarded: Discarded,
) -> DecimalResult<(u128, u32)> {
    debug_assert!((0..=MAX_SCALE as i32).contains(&scale));

    while value > MAX_MANTISSA {
        if scale == 0 {
            return Err(DecimalError::Overflow);
        }
        // Divide by a power of ten sized from the overhang, bounded by the
        // scale still available.
        let overhang = value >> 96;
        let k = digit_count_capped(overhang, 9).min(scale as u32);
        let divisor = POW10_32[k as usize] as u128;
        let rem = value % divisor;
        value /= divisor;
        discarded = discarded.div(rem, divisor);
        scale -= k as i32;
    }

    if round && discarded.rounds_up(value & 1 == 1) {
        value += 1;
        if value > MAX_MANTISSA {
            // Exactly 2^96: one more decimal digit has to go. 2^96 ends in
            // ...50336, so the dropped digit always rounds the quotient up.
            if scale == 0 {
                return Err(DecimalError::Overflow);
            }
            value = value / 10 + 1;
            scale -= 1;
        }
    }

    Ok((value, scale as u32))
}

// ============================================================================
// Rescale
// ============================================================================

/// Convert `value * 10^-scale * 2^-exp` (exp >= 0) into pure decimal form
/// with the scale clamped into `[min_scale, max_scale]`.
///
/// The binary exponent is eliminated by alternating right shifts (free when
/// the low bit is clear, lossy and tracked otherwise) with `*5^k` steps that
/// trade k units of binary exponent for k units of decimal scale. A `*5^k`
/// step amplifies any previously discarded fraction past representability,
/// so it resets the classification; the rounding evidence is then rebuilt
/// from the bits the remaining shifts drop.
pub(crate) fn rescale_128(
    mut value: u128,
    mut scale: i32,
    mut exp: i32,
    min_scale: i32,
    max_scale: i32,
    round: bool,
    mut discarded: Discarded,
) -> DecimalResult<(u128, u32)> {
    debug_assert!(exp >= 0);
    debug_assert!((0..=MAX_SCALE as i32).contains(&min_scale));
    debug_assert!((min_scale..=MAX_SCALE as i32).contains(&max_scale));

    while exp > 0 {
        if value & 1 == 0 {
            value >>= 1;
            exp -= 1;
            discarded = discarded.shr(false);
            continue;
        }
        // Largest *5^k step the headroom and the scale budget allow.
        let budget = (max_scale - scale).min(exp).min(13);
        let mut k = 0;
        while k < budget && value <= u128::MAX / POW5_32[(k + 1) as usize] as u128 {
            k += 1;
        }
        if k > 0 {
            value *= POW5_32[k as usize] as u128;
            scale += k;
            exp -= k;
            if !discarded.is_exact() {
                discarded = Discarded::Exact;
            }
        } else {
            value >>= 1;
            exp -= 1;
            discarded = discarded.shr(true);
        }
    }

    if scale > max_scale {
        let mut delta = (scale - max_scale) as u32;
        while delta > 0 {
            let k = delta.min(9);
            let divisor = POW10_32[k as usize] as u128;
            let rem = value % divisor;
            value /= divisor;
            discarded = discarded.div(rem, divisor);
            delta -= k;
        }
        scale = max_scale;
    } else if scale < min_scale {
        if value == 0 {
            scale = min_scale;
        } else {
            let needed = (min_scale - scale) as u32;
            if needed > MAX_SCALE || value > MAX_MANTISSA / POW10[needed as usize] {
                return Err(DecimalError::Overflow);
            }
            value *= POW10[needed as usize];
            if round && matches!(discarded, Discarded::Half | Discarded::AboveHalf) {
                // A pending half-or-more fraction becomes representable once
                // the value is lifted: re-inject half a pre-lift unit.
                value = value
                    .checked_add(POW10[needed as usize] / 2)
                    .ok_or(DecimalError::Overflow)?;
                discarded = if discarded == Discarded::Half {
                    Discarded::Exact
                } else {
                    Discarded::BelowHalf
                };
            }
            scale = min_scale;
        }
    }

    normalize_128(value, scale, round, discarded)
}

// ============================================================================
// Scale adjustment
// ============================================================================

/// Pure scale shift: multiply by `10^delta` (delta > 0, checked) or divide
/// truncating (delta < 0, no rounding), in chunks of at most nine digits.
pub(crate) fn adjust_scale_128(mut value: u128, delta: i32) -> DecimalResult<u128> {
    if delta.unsigned_abs() > 2 * MAX_SCALE + 9 {
        return Err(DecimalError::Internal);
    }
    if delta >= 0 {
        let mut up = delta as u32;
        while up > 0 {
            let k = up.min(9);
            let factor = POW10_32[k as usize] as u128;
            value = value.checked_mul(factor).ok_or(DecimalError::Overflow)?;
            up -= k;
        }
    } else {
        let mut down = delta.unsigned_abs();
        while down > 0 {
            let k = down.min(9);
            value /= POW10_32[k as usize] as u128;
            down -= k;
        }
    }
    Ok(value)
}

// ============================================================================
// Tests
// ============================================================================
