// ============================================================================
// Decimal
// 96-bit scaled signed decimal value with banker's-rounding arithmetic
// ============================================================================

use crate::error::{DecimalError, DecimalResult};
use crate::ops;
use crate::scale::{MAX_MANTISSA, MAX_SCALE};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::iter::{Product, Sum};
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

/// A 96-bit fixed-point decimal number.
///
/// Represents `(sign ? -1 : 1) * mantissa * 10^-scale` where the mantissa is
/// an unsigned 96-bit integer and the scale is in [0, 28]. The in-memory
/// layout matches the `System.Decimal` wire format: a flags word carrying
/// sign and scale, followed by the high, low, and middle mantissa words (in
/// that order).
///
/// All arithmetic is exact up to the final rounding step, which rounds half
/// to even. A mantissa of zero is always canonicalized to scale 0, positive.
///
/// # Example
/// ```
/// use dec96::Decimal;
///
/// let price: Decimal = "1.50".parse()?;
/// let total = price.checked_mul(Decimal::from(2))?;
/// assert_eq!(total.to_string(), "3.00");
/// # Ok::<(), dec96::DecimalError>(())
/// ```
#[derive(Clone, Copy)]
#[repr(C)]
pub struct Decimal {
    flags: u32,
    hi: u32,
    lo: u32,
    mid: u32,
}

// ============================================================================
// Layout Constants
// ============================================================================

/// Sign bit of the flags word.
const SIGN_MASK: u32 = 0x8000_0000;

/// Scale byte of the flags word.
const SCALE_MASK: u32 = 0x00FF_0000;

/// Bit offset of the scale byte.
const SCALE_SHIFT: u32 = 16;

impl Decimal {
    /// Largest scale a value may carry.
    pub const MAX_SCALE: u32 = MAX_SCALE;

    /// Zero (the canonical representation).
    pub const ZERO: Self = Self {
        flags: 0,
        hi: 0,
        lo: 0,
        mid: 0,
    };

    /// One.
    pub const ONE: Self = Self {
        flags: 0,
        hi: 0,
        lo: 1,
        mid: 0,
    };

    /// Largest representable value, `79228162514264337593543950335`.
    pub const MAX: Self = Self {
        flags: 0,
        hi: u32::MAX,
        lo: u32::MAX,
        mid: u32::MAX,
    };

    /// Smallest representable value, `-79228162514264337593543950335`.
    pub const MIN: Self = Self {
        flags: SIGN_MASK,
        hi: u32::MAX,
        lo: u32::MAX,
        mid: u32::MAX,
    };

    // ========================================================================
    // Construction
    // ========================================================================

    /// Assemble a value from mantissa words, sign, and scale.
    ///
    /// # Errors
    /// Returns `Overflow` if `scale` exceeds [`Decimal::MAX_SCALE`].
    pub fn from_parts(lo: u32, mid: u32, hi: u32, negative: bool, scale: u32) -> DecimalResult<Self> {
        if scale > MAX_SCALE {
            return Err(DecimalError::Overflow);
        }
        let mantissa = ((hi as u128) << 64) | ((mid as u128) << 32) | lo as u128;
        Ok(Self::from_internal(mantissa, scale, negative))
    }

    /// Internal constructor from an already-normalized magnitude.
    /// Canonicalizes zero to scale 0, positive.
    #[inline]
    pub(crate) fn from_internal(mantissa: u128, scale: u32, negative: bool) -> Self {
        debug_assert!(mantissa <= MAX_MANTISSA);
        debug_assert!(scale <= MAX_SCALE);
        if mantissa == 0 {
            return Self::ZERO;
        }
        let mut flags = scale << SCALE_SHIFT;
        if negative {
            flags |= SIGN_MASK;
        }
        Self {
            flags,
            hi: (mantissa >> 64) as u32,
            lo: mantissa as u32,
            mid: (mantissa >> 32) as u32,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The unsigned 96-bit mantissa.
    #[inline]
    pub const fn mantissa(&self) -> u128 {
        ((self.hi as u128) << 64) | ((self.mid as u128) << 32) | self.lo as u128
    }

    /// Low mantissa word.
    #[inline]
    pub const fn lo(&self) -> u32 {
        self.lo
    }

    /// Middle mantissa word.
    #[inline]
    pub const fn mid(&self) -> u32 {
        self.mid
    }

    /// High mantissa word.
    #[inline]
    pub const fn hi(&self) -> u32 {
        self.hi
    }

    /// The decimal scale: the value is `mantissa * 10^-scale`.
    #[inline]
    pub const fn scale(&self) -> u32 {
        (self.flags & SCALE_MASK) >> SCALE_SHIFT
    }

    /// True for negative values. Zero is never negative.
    #[inline]
    pub const fn is_sign_negative(&self) -> bool {
        self.flags & SIGN_MASK != 0
    }

    /// True when the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.lo == 0 && self.mid == 0 && self.hi == 0
    }

    /// Absolute value. Cannot overflow: the magnitude range is symmetric.
    #[inline]
    pub fn abs(self) -> Self {
        Self::from_internal(self.mantissa(), self.scale(), false)
    }

    // ========================================================================
    // Binary layout
    // ========================================================================

    /// Serialize to the 16-byte wire layout: flags, hi, lo, mid as
    /// little-endian 32-bit words.
    pub fn to_bytes(self) -> [u8; 16] {
        let mut bytes = [0u8; 16];
        bytes[0..4].copy_from_slice(&self.flags.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.hi.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.lo.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.mid.to_le_bytes());
        bytes
    }

    /// Deserialize from the 16-byte wire layout, validating the scale and
    /// the reserved flag bits and canonicalizing zero.
    ///
    /// # Errors
    /// Returns `Overflow` when the scale byte exceeds 28 or a reserved flag
    /// bit is set.
    pub fn from_bytes(bytes: [u8; 16]) -> DecimalResult<Self> {
        let flags = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let hi = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        let lo = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
        let mid = u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]);
        if flags & !(SIGN_MASK | SCALE_MASK) != 0 {
            return Err(DecimalError::Overflow);
        }
        let scale = (flags & SCALE_MASK) >> SCALE_SHIFT;
        Self::from_parts(lo, mid, hi, flags & SIGN_MASK != 0, scale)
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    /// Checked addition with banker's rounding on scale reduction.
    #[inline]
    pub fn checked_add(self, rhs: Self) -> DecimalResult<Self> {
        ops::add(self, rhs)
    }

    /// Checked subtraction.
    #[inline]
    pub fn checked_sub(self, rhs: Self) -> DecimalResult<Self> {
        ops::add(self, -rhs)
    }

    /// Checked multiplication.
    #[inline]
    pub fn checked_mul(self, rhs: Self) -> DecimalResult<Self> {
        ops::mul(self, rhs)
    }

    /// Checked division, filling the scale up to 28 digits.
    #[inline]
    pub fn checked_div(self, rhs: Self) -> DecimalResult<Self> {
        ops::div(self, rhs)
    }

    /// Checked integer division: the quotient truncated toward zero.
    #[inline]
    pub fn checked_div_int(self, rhs: Self) -> DecimalResult<Self> {
        ops::div_int(self, rhs)
    }

    /// Checked remainder: `self - (self / rhs).truncate() * rhs`.
    #[inline]
    pub fn checked_rem(self, rhs: Self) -> DecimalResult<Self> {
        ops::rem(self, rhs)
    }

    /// Round to `dp` decimal places, half to even. Values with a scale at or
    /// below `dp` are returned unchanged.
    #[inline]
    pub fn round_dp(self, dp: u32) -> Self {
        ops::round_dp(self, dp)
    }

    /// Largest integral value at or below `self`.
    #[inline]
    pub fn floor(self) -> Self {
        ops::floor(self)
    }

    /// Integral part of `self`, truncated toward zero.
    #[inline]
    pub fn truncate(self) -> Self {
        ops::truncate(self)
    }

    /// Multiply by `10^exp`, rescaling (with rounding) when the resulting
    /// scale leaves [0, 28].
    ///
    /// # Errors
    /// Returns `Overflow` if the shifted value is not representable.
    #[inline]
    pub fn set_exponent(self, exp: i32) -> DecimalResult<Self> {
        ops::set_exponent(self, exp)
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Default for Decimal {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialEq for Decimal {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        ops::cmp(self, other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(ops::cmp(self, other))
    }
}

impl Ord for Decimal {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        ops::cmp(self, other)
    }
}

impl Hash for Decimal {
    /// Hashes the trailing-zero-stripped form so that equal values
    /// (`1.0 == 1.00`) hash identically.
    fn hash<H: Hasher>(&self, state: &mut H) {
        let (mantissa, scale, negative) = ops::normalized_parts(self);
        mantissa.hash(state);
        scale.hash(state);
        negative.hash(state);
    }
}

impl Neg for Decimal {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self::from_internal(self.mantissa(), self.scale(), !self.is_sign_negative())
    }
}

// Infallible operators for ergonomics (panic on overflow - use checked_* in
// production paths)
impl Add for Decimal {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(rhs).expect("Decimal addition overflow")
    }
}

impl Sub for Decimal {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(rhs).expect("Decimal subtraction overflow")
    }
}

impl Mul for Decimal {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        self.checked_mul(rhs).expect("Decimal multiplication overflow")
    }
}

impl Div for Decimal {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self::Output {
        self.checked_div(rhs).expect("Decimal division failed")
    }
}

impl Rem for Decimal {
    type Output = Self;

    #[inline]
    fn rem(self, rhs: Self) -> Self::Output {
        self.checked_rem(rhs).expect("Decimal remainder failed")
    }
}

impl Sum for Decimal {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Decimal> for Decimal {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Product for Decimal {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, Mul::mul)
    }
}

impl<'a> Product<&'a Decimal> for Decimal {
    fn product<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().product()
    }
}

// ============================================================================
// Serde (optional)
// ============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for Decimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Decimal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct DecimalVisitor;

        impl serde::de::Visitor<'_> for DecimalVisitor {
            type Value = Decimal;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a decimal number or its string form")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Decimal, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Decimal, E> {
                Ok(Decimal::from(v))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Decimal, E> {
                Ok(Decimal::from(v))
            }

            fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Decimal, E> {
                Decimal::try_from(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(DecimalVisitor)
    }
}

// ============================================================================
// Tests
// ============================================================================
