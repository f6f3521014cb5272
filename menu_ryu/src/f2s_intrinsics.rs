use crate::pow5::{inv_pow5, pow5};

pub const fn pow5_factor_32(mut value: u32) -> u32 {
    let mut count = 0u32;
    loop {
        debug_assert!(value != 0);
        let q = value / 5;
        let r = value % 5;
        if r != 0 {
            break;
        }
        value = q;
        count += 1;
    }
    count
}

/// Returns true if `value` is divisible by `5^p`.
pub const fn multiple_of_power_of_5_32(value: u32, p: u32) -> bool {
    pow5_factor_32(value) >= p
}

/// Returns true if `value` is divisible by `2^p`.
pub const fn multiple_of_power_of_2_32(value: u32, p: u32) -> bool {
    debug_assert!(p < 32);
    (value & ((1u32 << p) - 1)) == 0
}

/// Computes `floor(m * factor / 2^shift)` for `shift > 32`.
pub const fn mul_shift32(m: u32, factor: u64, shift: i32) -> u32 {
    debug_assert!(shift > 32);

    let factor_lo = factor as u32;
    let factor_hi = (factor >> 32) as u32;
    let bits0 = m as u64 * factor_lo as u64;
    let bits1 = m as u64 * factor_hi as u64;

    let sum = (bits0 >> 32) + bits1;
    let shifted_sum = sum >> (shift - 32);
    debug_assert!(shifted_sum <= u32::MAX as u64);
    shifted_sum as u32
}

/// `m * 5^-q / 2^j`, using the top word of the double-precision reciprocal.
pub const fn mul_pow5_inv_div_pow2(m: u32, q: u32, j: i32) -> u32 {
    mul_shift32(m, inv_pow5(q).1 + 1, j)
}

/// `m * 5^i / 2^j`, using the top word of the double-precision power.
pub const fn mul_pow5_div_pow2(m: u32, i: u32, j: i32) -> u32 {
    mul_shift32(m, pow5(i).1, j)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divisibility() {
        assert_eq!(pow5_factor_32(1), 0);
        assert_eq!(pow5_factor_32(5u32.pow(13)), 13);
        assert!(multiple_of_power_of_5_32(75, 2));
        assert!(!multiple_of_power_of_5_32(75, 3));
        assert!(multiple_of_power_of_2_32(40, 3));
        assert!(!multiple_of_power_of_2_32(40, 4));
    }

    #[test]
    fn shift() {
        assert_eq!(mul_shift32(3, 1 << 40, 41), 1);
        assert_eq!(mul_shift32(u32::MAX, u64::MAX, 64), u32::MAX - 1);
    }
}
