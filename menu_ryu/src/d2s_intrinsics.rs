//! 64×64→128 multiplication and the divisibility checks shared by the
//! double-precision paths.
//!
//! Both multiplication tiers are always compiled; the `portable-mul` feature
//! picks which one [`umul128`] dispatches to.

/// Full product of `a` and `b` as `(low, high)` using native `u128`.
#[cfg_attr(feature = "portable-mul", allow(dead_code))]
pub const fn umul128_native(a: u64, b: u64) -> (u64, u64) {
    let product = a as u128 * b as u128;
    (product as u64, (product >> 64) as u64)
}

/// Full product of `a` and `b` as `(low, high)` built from four 32×32→64
/// partial products.
#[cfg_attr(not(feature = "portable-mul"), allow(dead_code))]
pub const fn umul128_portable(a: u64, b: u64) -> (u64, u64) {
    let a_lo = a as u32;
    let a_hi = (a >> 32) as u32;
    let b_lo = b as u32;
    let b_hi = (b >> 32) as u32;

    let b00 = a_lo as u64 * b_lo as u64;
    let b01 = a_lo as u64 * b_hi as u64;
    let b10 = a_hi as u64 * b_lo as u64;
    let b11 = a_hi as u64 * b_hi as u64;

    let b00_lo = b00 as u32;
    let b00_hi = (b00 >> 32) as u32;

    // Neither sum can overflow: (2^32 - 1)^2 + 2 * (2^32 - 1) == 2^64 - 1.
    let mid1 = b10 + b00_hi as u64;
    let mid1_lo = mid1 as u32;
    let mid1_hi = (mid1 >> 32) as u32;

    let mid2 = b01 + mid1_lo as u64;
    let mid2_lo = mid2 as u32;
    let mid2_hi = (mid2 >> 32) as u32;

    let p_hi = b11 + mid1_hi as u64 + mid2_hi as u64;
    let p_lo = ((mid2_lo as u64) << 32) | b00_lo as u64;
    (p_lo, p_hi)
}

pub const fn umul128(a: u64, b: u64) -> (u64, u64) {
    #[cfg(feature = "portable-mul")]
    {
        umul128_portable(a, b)
    }

    #[cfg(not(feature = "portable-mul"))]
    {
        umul128_native(a, b)
    }
}

/// Returns bits `dist..dist + 64` of the 128-bit value `hi:lo`.
pub const fn shiftright128(lo: u64, hi: u64, dist: u32) -> u64 {
    debug_assert!(dist < 64);
    if dist == 0 {
        lo
    } else {
        (hi << (64 - dist)) | (lo >> dist)
    }
}

/// Computes `floor(m * mul / 2^j)` where `mul` is a 128-bit `(low, high)`
/// pair and `64 <= j < 128`.
pub const fn mul_shift64(m: u64, mul: (u64, u64), j: i32) -> u64 {
    debug_assert!(j >= 64 && j < 128);
    let (_, high0) = umul128(m, mul.0);
    let (low1, mut high1) = umul128(m, mul.1);
    let (sum, carry) = high0.overflowing_add(low1);
    if carry {
        high1 += 1;
    }
    shiftright128(sum, high1, (j - 64) as u32)
}

/// Returns `(vr, vp, vm)` for the scaled value and both interval bounds.
pub const fn mul_shift_all64(
    m: u64,
    mul: (u64, u64),
    j: i32,
    mm_shift: u32,
) -> (u64, u64, u64) {
    (
        mul_shift64(4 * m, mul, j),
        mul_shift64(4 * m + 2, mul, j),
        mul_shift64(4 * m - 1 - mm_shift as u64, mul, j),
    )
}

pub const fn pow5_factor(mut value: u64) -> u32 {
    debug_assert!(value != 0);
    let mut count = 0u32;
    while value % 5 == 0 {
        value /= 5;
        count += 1;
    }
    count
}

/// Returns true if `value` is divisible by `5^p`.
pub const fn multiple_of_power_of_5(value: u64, p: u32) -> bool {
    pow5_factor(value) >= p
}

/// Returns true if `value` is divisible by `2^p`.
pub const fn multiple_of_power_of_2(value: u64, p: u32) -> bool {
    debug_assert!(value != 0);
    debug_assert!(p < 64);
    (value & ((1u64 << p) - 1)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn multiply_tiers_agree() {
        let edges = [0, 1, 2, u32::MAX as u64, 1 << 32, u64::MAX - 1, u64::MAX];
        for &a in &edges {
            for &b in &edges {
                assert_eq!(umul128_native(a, b), umul128_portable(a, b), "{a} * {b}");
            }
        }

        let mut rng = StdRng::seed_from_u64(0x5eed_0128);
        for _ in 0..100_000 {
            let a: u64 = rng.random();
            let b: u64 = rng.random();
            assert_eq!(umul128_native(a, b), umul128_portable(a, b), "{a} * {b}");
        }
    }

    #[test]
    fn shift() {
        assert_eq!(shiftright128(0x1234, 0x5678, 0), 0x1234);
        assert_eq!(shiftright128(0, 1, 1), 1 << 63);
        assert_eq!(shiftright128(u64::MAX, 0b101, 4), (0b101 << 60) | (u64::MAX >> 4));
    }

    #[test]
    fn mul_shift() {
        let mul = (0u64, 1u64 << 60);
        // 2^60 * 2^64 * 3 / 2^124 == 3
        assert_eq!(mul_shift64(3, mul, 124), 3);
        assert_eq!(mul_shift64(7, (u64::MAX, u64::MAX), 127), 13);
    }

    #[test]
    fn divisibility() {
        assert_eq!(pow5_factor(1), 0);
        assert_eq!(pow5_factor(125), 3);
        assert_eq!(pow5_factor(7 * 625), 4);
        assert!(multiple_of_power_of_5(250, 3));
        assert!(!multiple_of_power_of_5(250, 4));
        assert!(multiple_of_power_of_2(96, 5));
        assert!(!multiple_of_power_of_2(96, 6));
        assert!(multiple_of_power_of_2(1, 0));
    }
}
