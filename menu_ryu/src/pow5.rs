//! Power-of-five lookups. The `small` feature swaps the full tables for the
//! sparse ones; callers never branch on the strategy at runtime.

#[cfg(not(feature = "small"))]
use crate::d2s_full_table::{DOUBLE_POW5_INV_SPLIT, DOUBLE_POW5_SPLIT};
#[cfg(feature = "small")]
use crate::d2s_small_table::{compute_inv_pow5, compute_pow5};

/// Top 125 significant bits of `5^i` as `(low, high)`.
pub const fn pow5(i: u32) -> (u64, u64) {
    #[cfg(feature = "small")]
    {
        compute_pow5(i)
    }

    #[cfg(not(feature = "small"))]
    {
        DOUBLE_POW5_SPLIT[i as usize]
    }
}

/// `floor(2^k / 5^i) + 1` normalized to 125 significant bits, as `(low, high)`.
pub const fn inv_pow5(i: u32) -> (u64, u64) {
    #[cfg(feature = "small")]
    {
        compute_inv_pow5(i)
    }

    #[cfg(not(feature = "small"))]
    {
        DOUBLE_POW5_INV_SPLIT[i as usize]
    }
}

#[cfg(test)]
mod tests {
    use crate::common::{DOUBLE_POW5_INV_TABLE_SIZE, DOUBLE_POW5_TABLE_SIZE};
    use crate::d2s_full_table::{DOUBLE_POW5_INV_SPLIT, DOUBLE_POW5_SPLIT};
    use crate::d2s_small_table::{compute_inv_pow5, compute_pow5};

    #[test]
    fn computed_matches_full() {
        for i in 0..DOUBLE_POW5_TABLE_SIZE {
            assert_eq!(compute_pow5(i as u32), DOUBLE_POW5_SPLIT[i], "5^{i}");
        }
        for i in 0..DOUBLE_POW5_INV_TABLE_SIZE {
            assert_eq!(compute_inv_pow5(i as u32), DOUBLE_POW5_INV_SPLIT[i], "5^-{i}");
        }
    }

    #[test]
    fn normalized() {
        // 5^0 is stored as 2^124 and the reciprocal of 5^0 as 2^125 + 1.
        assert_eq!(super::pow5(0), (0, 1 << 60));
        assert_eq!(super::inv_pow5(0), (1, 1 << 61));
        for i in 1..DOUBLE_POW5_TABLE_SIZE as u32 {
            let (_, hi) = super::pow5(i);
            assert_eq!(hi.leading_zeros(), 3, "5^{i}");
        }
    }
}
