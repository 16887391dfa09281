// ============================================================================
// Comparison
// ============================================================================

use crate::decimal::Decimal;
use crate::scale::{log2_with_scale, POW10};
use std::cmp::Ordering;

/// Numeric-value comparison: `1.0 == 1.00` regardless of representation.
///
/// Zeros and differing signs decide immediately. For same-sign operands a
/// log2-based magnitude estimate settles clearly separated values without
/// exact arithmetic; estimates within the error bound fall back to lifting
/// both mantissas to the larger scale and comparing exactly.
pub(crate) fn cmp(a: &Decimal, b: &Decimal) -> Ordering {
    match (a.is_zero(), b.is_zero()) {
        (true, true) => return Ordering::Equal,
        (true, false) => {
            return if b.is_sign_negative() {
                Ordering::Greater
            } else {
                Ordering::Less
            }
        }
        (false, true) => {
            return if a.is_sign_negative() {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        }
        (false, false) => {}
    }

    match (a.is_sign_negative(), b.is_sign_negative()) {
        (false, true) => return Ordering::Greater,
        (true, false) => return Ordering::Less,
        (negative, _) => {
            let magnitudes = cmp_magnitude(a, b);
            if negative {
                magnitudes.reverse()
            } else {
                magnitudes
            }
        }
    }
}

fn cmp_magnitude(a: &Decimal, b: &Decimal) -> Ordering {
    let (ma, sa) = (a.mantissa(), a.scale());
    let (mb, sb) = (b.mantissa(), b.scale());

    if sa == sb {
        return ma.cmp(&mb);
    }

    // Each estimate is below the true magnitude by under 1.003 bits (floor
    // of log2 plus the rounded log2(10) term), so a gap above two bits
    // orders the true values.
    let est_a = log2_with_scale(ma, sa);
    let est_b = log2_with_scale(mb, sb);
    if est_a > est_b + 2010 {
        return Ordering::Greater;
    }
    if est_b > est_a + 2010 {
        return Ordering::Less;
    }

    // Close estimates: lift the smaller-scale mantissa to the larger scale.
    // In this regime the lifted value stays near the other operand, so a
    // checked multiply only overflows when that operand is in fact larger.
    if sa < sb {
        match ma.checked_mul(POW10[(sb - sa) as usize]) {
            Some(lifted) => lifted.cmp(&mb),
            None => Ordering::Greater,
        }
    } else {
        match mb.checked_mul(POW10[(sa - sb) as usize]) {
            Some(lifted) => ma.cmp(&lifted),
            None => Ordering::Less,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_equal_across_scales() {
        assert_eq!(dec("1.0"), dec("1.00"));
        assert_eq!(dec("-2.50"), dec("-2.5"));
        assert_eq!(dec("0.0"), dec("-0.000"));
    }

    #[test]
    fn test_sign_ordering() {
        assert!(dec("-1") < dec("1"));
        assert!(dec("-0.001") < Decimal::ZERO);
        assert!(Decimal::ZERO < dec("0.001"));
        assert!(dec("-3") < dec("-2"));
        assert!(dec("-2") > dec("-3"));
    }

    #[test]
    fn test_magnitude_fast_path() {
        // Far apart in magnitude, very different scales.
        assert!(dec("1000000000") > dec("0.000000001"));
        assert!(Decimal::MAX > dec("0.0000000000000000000000000001"));
        assert!(dec("-1000000000") < dec("-0.000000001"));
    }

    #[test]
    fn test_close_magnitudes_exact_path() {
        assert!(dec("1.0000000000000000000000000001") > dec("1"));
        assert!(dec("0.9999999999999999999999999999") < dec("1"));
        assert!(dec("127.5") > dec("127.49999"));
        assert!(dec("8") > dec("7.9999999999999999999999999999"));
    }

    #[test]
    fn test_antisymmetry() {
        let values = [
            Decimal::ZERO,
            dec("1"),
            dec("-1"),
            dec("0.5"),
            Decimal::MAX,
            Decimal::MIN,
            dec("1.00"),
            dec("-0.001"),
        ];
        for a in &values {
            for b in &values {
                assert_eq!(cmp(a, b), cmp(b, a).reverse());
            }
            assert_eq!(cmp(a, a), Ordering::Equal);
        }
    }

    #[test]
    fn test_full_scale_gap_exact_path() {
        // Scale 0 against scale 28 with near-identical magnitudes forces the
        // widest possible lift through the exact path.
        let wide = Decimal::from_parts(
            (3u128 * 10u128.pow(28)) as u32,
            ((3u128 * 10u128.pow(28)) >> 32) as u32,
            ((3u128 * 10u128.pow(28)) >> 64) as u32,
            false,
            28,
        )
        .unwrap();
        assert_eq!(dec("3"), wide);
        assert!(dec("3.1") > wide);
        assert!(dec("2.9") < wide);
    }
}
