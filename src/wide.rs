// ============================================================================
// Wide Integer Kernel
// Fixed-width 192-bit arithmetic for intermediate products and quotients
// ============================================================================
//
// 128-bit quantities use native u128 arithmetic throughout the crate; this
// module covers the width the hardware doesn't. A Wide192 shows up in exactly
// two places: the full 96x96 product in multiplication, and the left-shifted
// dividend in division.

/// Unsigned 192-bit integer as three 64-bit limbs, least significant first.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct Wide192 {
    pub lo: u64,
    pub mid: u64,
    pub hi: u64,
}

impl Wide192 {
    #[inline]
    pub fn from_u128(value: u128) -> Self {
        Self {
            lo: value as u64,
            mid: (value >> 64) as u64,
            hi: 0,
        }
    }

    /// Reinterpret as u128. The top limb must already be clear.
    #[inline]
    pub fn as_u128(self) -> u128 {
        debug_assert!(self.hi == 0);
        ((self.mid as u128) << 64) | self.lo as u128
    }

    /// Bits 96..192, the part that does not fit a 96-bit mantissa.
    #[inline]
    pub fn high_96(self) -> u128 {
        ((self.hi as u128) << 32) | (self.mid >> 32) as u128
    }

    /// Position of the highest set bit plus one; 0 for zero.
    #[inline]
    pub fn bits(self) -> u32 {
        if self.hi != 0 {
            192 - self.hi.leading_zeros()
        } else if self.mid != 0 {
            128 - self.mid.leading_zeros()
        } else if self.lo != 0 {
            64 - self.lo.leading_zeros()
        } else {
            0
        }
    }

    /// Shift left by `n` bits (n < 192). Bits shifted past the top are lost;
    /// callers pre-size so none are.
    pub fn shl(self, n: u32) -> Self {
        debug_assert!(n < 192);
        let (mut lo, mut mid, mut hi) = (self.lo, self.mid, self.hi);
        let mut n = n;
        while n >= 64 {
            hi = mid;
            mid = lo;
            lo = 0;
            n -= 64;
        }
        if n > 0 {
            hi = (hi << n) | (mid >> (64 - n));
            mid = (mid << n) | (lo >> (64 - n));
            lo <<= n;
        }
        Self { lo, mid, hi }
    }

    #[inline]
    pub fn shr1(self) -> Self {
        Self {
            lo: (self.lo >> 1) | (self.mid << 63),
            mid: (self.mid >> 1) | (self.hi << 63),
            hi: self.hi >> 1,
        }
    }

    /// Borrow-propagating subtraction. Requires `self >= rhs`.
    pub fn sub(self, rhs: Self) -> Self {
        debug_assert!(self >= rhs);
        let (lo, borrow_lo) = self.lo.overflowing_sub(rhs.lo);
        let (mid, borrow_a) = self.mid.overflowing_sub(rhs.mid);
        let (mid, borrow_b) = mid.overflowing_sub(borrow_lo as u64);
        let hi = self
            .hi
            .wrapping_sub(rhs.hi)
            .wrapping_sub((borrow_a || borrow_b) as u64);
        Self { lo, mid, hi }
    }

    /// Exact 96x96 -> 192-bit product, limb by limb with carry accumulation.
    pub fn widening_mul(a: u128, b: u128) -> Self {
        debug_assert!(a >> 96 == 0 && b >> 96 == 0);
        let a_lo = a as u64;
        let a_hi = (a >> 64) as u64;
        let b_lo = b as u64;
        let b_hi = (b >> 64) as u64;

        let p0 = (a_lo as u128) * (b_lo as u128);
        let p1 = (a_lo as u128) * (b_hi as u128) + (a_hi as u128) * (b_lo as u128);
        let p2 = (a_hi as u128) * (b_hi as u128);

        let lo = p0 as u64;
        let mid_acc = (p0 >> 64) + (p1 & u64::MAX as u128);
        let hi_acc = (mid_acc >> 64) + (p1 >> 64) + p2;
        debug_assert!(hi_acc >> 64 == 0);
        Self {
            lo,
            mid: mid_acc as u64,
            hi: hi_acc as u64,
        }
    }

    /// Staged division by a 32-bit factor, high limb first.
    /// Returns quotient and remainder.
    pub fn div_rem_u32(self, divisor: u32) -> (Self, u32) {
        debug_assert!(divisor != 0);
        let d = divisor as u128;
        let mut rem: u128 = 0;

        let cur = (rem << 64) | self.hi as u128;
        let hi = (cur / d) as u64;
        rem = cur % d;

        let cur = (rem << 64) | self.mid as u128;
        let mid = (cur / d) as u64;
        rem = cur % d;

        let cur = (rem << 64) | self.lo as u128;
        let lo = (cur / d) as u64;
        rem = cur % d;

        (Self { lo, mid, hi }, rem as u32)
    }

    /// Long division of a 192-bit dividend by a 96-bit divisor, 32 quotient
    /// bits at a time via estimate-and-correct subtraction.
    ///
    /// The divisor must have bit 95 set, and the dividend's high 96 bits must
    /// be below the divisor so the quotient fits 96 bits. Returns quotient
    /// and remainder.
    pub fn div_rem_u96(self, divisor: u128) -> (u128, u128) {
        debug_assert!(divisor >> 95 == 1);
        debug_assert!(self.high_96() < divisor);

        let top_digit = (divisor >> 64) as u32;
        let mut quotient: u128 = 0;
        let mut rem = self;

        for j in (0..3u32).rev() {
            // Top two 32-bit digits of the current window over the divisor's
            // top digit; at most two over the true quotient digit.
            let num = ((rem.digit(j + 3) as u64) << 32) | rem.digit(j + 2) as u64;
            let mut qhat = (num / top_digit as u64).min(u32::MAX as u64);
            loop {
                let prod = Wide192::from_u128(qhat as u128 * divisor).shl(32 * j);
                if prod <= rem {
                    rem = rem.sub(prod);
                    break;
                }
                qhat -= 1;
            }
            quotient = (quotient << 32) | qhat as u128;
        }

        let rem = rem.as_u128();
        debug_assert!(rem < divisor);
        (quotient, rem)
    }

    #[inline]
    fn digit(&self, k: u32) -> u32 {
        let limb = match k / 2 {
            0 => self.lo,
            1 => self.mid,
            _ => self.hi,
        };
        if k % 2 == 0 {
            limb as u32
        } else {
            (limb >> 32) as u32
        }
    }
}

impl PartialOrd for Wide192 {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Wide192 {
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.hi, self.mid, self.lo).cmp(&(other.hi, other.mid, other.lo))
    }
}
