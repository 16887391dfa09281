// ============================================================================
// Integer Conversion
// ============================================================================

use crate::decimal::Decimal;
use crate::error::{DecimalError, DecimalResult};
use num_traits::{FromPrimitive, One, ToPrimitive, Zero};

impl From<i64> for Decimal {
    #[inline]
    fn from(value: i64) -> Self {
        Self::from_internal(value.unsigned_abs() as u128, 0, value < 0)
    }
}

impl From<u64> for Decimal {
    #[inline]
    fn from(value: u64) -> Self {
        Self::from_internal(value as u128, 0, false)
    }
}

impl From<i32> for Decimal {
    #[inline]
    fn from(value: i32) -> Self {
        Self::from(value as i64)
    }
}

impl From<u32> for Decimal {
    #[inline]
    fn from(value: u32) -> Self {
        Self::from(value as u64)
    }
}

impl TryFrom<Decimal> for i64 {
    type Error = DecimalError;

    /// Round to the nearest integer (half to even), then convert.
    ///
    /// # Errors
    /// Returns `Overflow` when the rounded value leaves the `i64` range.
    fn try_from(d: Decimal) -> DecimalResult<i64> {
        let rounded = d.round_dp(0);
        let magnitude = rounded.mantissa();
        if rounded.is_sign_negative() {
            if magnitude > 1 << 63 {
                return Err(DecimalError::Overflow);
            }
            Ok((magnitude as i64).wrapping_neg())
        } else {
            if magnitude > i64::MAX as u128 {
                return Err(DecimalError::Overflow);
            }
            Ok(magnitude as i64)
        }
    }
}

impl TryFrom<Decimal> for u64 {
    type Error = DecimalError;

    /// Round to the nearest integer (half to even), then convert. A negative
    /// value that rounds to zero converts to zero.
    ///
    /// # Errors
    /// Returns `Overflow` for negative values and magnitudes past `u64::MAX`.
    fn try_from(d: Decimal) -> DecimalResult<u64> {
        let rounded = d.round_dp(0);
        if rounded.is_sign_negative() || rounded.mantissa() > u64::MAX as u128 {
            return Err(DecimalError::Overflow);
        }
        Ok(rounded.mantissa() as u64)
    }
}

// ============================================================================
// num-traits
// ============================================================================

impl Zero for Decimal {
    #[inline]
    fn zero() -> Self {
        Self::ZERO
    }

    #[inline]
    fn is_zero(&self) -> bool {
        Decimal::is_zero(self)
    }
}

impl One for Decimal {
    #[inline]
    fn one() -> Self {
        Self::ONE
    }
}

impl ToPrimitive for Decimal {
    fn to_i64(&self) -> Option<i64> {
        i64::try_from(*self).ok()
    }

    fn to_u64(&self) -> Option<u64> {
        u64::try_from(*self).ok()
    }

    fn to_f64(&self) -> Option<f64> {
        Some((*self).into())
    }
}

impl FromPrimitive for Decimal {
    fn from_i64(n: i64) -> Option<Self> {
        Some(n.into())
    }

    fn from_u64(n: u64) -> Option<Self> {
        Some(n.into())
    }

    fn from_f64(n: f64) -> Option<Self> {
        Decimal::try_from(n).ok()
    }
}
