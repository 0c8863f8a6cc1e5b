//! Wide integer helpers for the accounting path. Every division in this
//! crate truncates toward zero; dust always falls in the protocol's favor.

/// Full 256-bit product of two u128 values, as (high, low) halves.
fn full_mul(a: u128, b: u128) -> (u128, u128) {
    const MASK: u128 = u64::MAX as u128;
    let (a_hi, a_lo) = (a >> 64, a & MASK);
    let (b_hi, b_lo) = (b >> 64, b & MASK);

    let ll = a_lo * b_lo;
    let lh = a_lo * b_hi;
    let hl = a_hi * b_lo;
    let hh = a_hi * b_hi;

    let mid = (ll >> 64) + (lh & MASK) + (hl & MASK);
    let lo = (mid << 64) | (ll & MASK);
    let hi = hh + (lh >> 64) + (hl >> 64) + (mid >> 64);

    (hi, lo)
}

/// Restoring division of a 256-bit value (hi, lo) by a 128-bit divisor.
/// Requires `hi < divisor` so the quotient fits in 128 bits.
fn div_wide(hi: u128, lo: u128, divisor: u128) -> u128 {
    debug_assert!(divisor != 0 && hi < divisor);
    let mut remainder = hi;
    let mut quotient = 0u128;
    for i in (0..128).rev() {
        let carry = remainder >> 127;
        remainder = (remainder << 1) | ((lo >> i) & 1);
        if carry == 1 || remainder >= divisor {
            remainder = remainder.wrapping_sub(divisor);
            quotient |= 1 << i;
        }
    }
    quotient
}

/// `a * b / divisor` with a 256-bit intermediate product, truncating toward
/// zero. `None` when the divisor is zero or the quotient overflows u128.
pub fn mul_div(a: u128, b: u128, divisor: u128) -> Option<u128> {
    if divisor == 0 {
        return None;
    }
    let (hi, lo) = full_mul(a, b);
    if hi == 0 {
        return Some(lo / divisor);
    }
    if hi >= divisor {
        return None;
    }
    Some(div_wide(hi, lo, divisor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_div_small() {
        assert_eq!(mul_div(6, 7, 2), Some(21));
        assert_eq!(mul_div(10, 10, 3), Some(33));
        assert_eq!(mul_div(0, u128::MAX, 5), Some(0));
    }

    #[test]
    fn test_mul_div_zero_divisor() {
        assert_eq!(mul_div(1, 1, 0), None);
    }

    #[test]
    fn test_mul_div_wide_intermediate() {
        // 10^24 wei * 10^25 price exceeds u128 but the quotient fits.
        let amount = 1_000_000_000_000_000_000_000_000u128;
        let price = 10_000_000_000_000_000_000_000_000u128;
        assert_eq!(
            mul_div(amount, price, 10_000_000_000_000_000_000_000u128),
            Some(1_000_000_000_000_000_000_000_000_000u128)
        );
    }

    #[test]
    fn test_mul_div_exact_upper_bound() {
        assert_eq!(mul_div(u128::MAX, 7, 7), Some(u128::MAX));
        assert_eq!(mul_div(u128::MAX, u128::MAX, u128::MAX), Some(u128::MAX));
    }

    #[test]
    fn test_mul_div_overflowing_quotient() {
        assert_eq!(mul_div(u128::MAX, 2, 1), None);
    }

    #[test]
    fn test_mul_div_truncates_toward_zero() {
        let (a, b, d) = (u64::MAX as u128 + 3, u64::MAX as u128 + 5, 10u128);
        let exact = mul_div(a, b, 1).unwrap();
        assert_eq!(mul_div(a, b, d), Some(exact / d));
    }
}
