pub const DOUBLE_MANTISSA_BITS: u32 = 52;
pub const DOUBLE_EXPONENT_BITS: u32 = 11;
pub const DOUBLE_BIAS: i32 = 1023;
pub const DOUBLE_POW5_INV_BITCOUNT: i32 = 125;
pub const DOUBLE_POW5_BITCOUNT: i32 = 125;
pub const DOUBLE_POW5_INV_TABLE_SIZE: usize = 342;
pub const DOUBLE_POW5_TABLE_SIZE: usize = 326;

pub const FLOAT_MANTISSA_BITS: u32 = 23;
pub const FLOAT_EXPONENT_BITS: u32 = 8;
pub const FLOAT_BIAS: i32 = 127;
// The single-precision paths reuse the top word of the double tables.
pub const FLOAT_POW5_INV_BITCOUNT: i32 = DOUBLE_POW5_INV_BITCOUNT - 64;
pub const FLOAT_POW5_BITCOUNT: i32 = DOUBLE_POW5_BITCOUNT - 64;

/// Returns the number of decimal digits in `v`, which must not contain more
/// than 9 digits.
pub const fn decimal_length9(v: u32) -> u32 {
    debug_assert!(v < 1000000000);
    if v >= 100000000 {
        9
    } else if v >= 10000000 {
        8
    } else if v >= 1000000 {
        7
    } else if v >= 100000 {
        6
    } else if v >= 10000 {
        5
    } else if v >= 1000 {
        4
    } else if v >= 100 {
        3
    } else if v >= 10 {
        2
    } else {
        1
    }
}

/// Returns the number of decimal digits in `v`, which must not contain more
/// than 17 digits.
pub const fn decimal_length17(v: u64) -> u32 {
    debug_assert!(v < 100000000000000000);
    if v >= 10000000000000000 {
        17
    } else if v >= 1000000000000000 {
        16
    } else if v >= 100000000000000 {
        15
    } else if v >= 10000000000000 {
        14
    } else if v >= 1000000000000 {
        13
    } else if v >= 100000000000 {
        12
    } else if v >= 10000000000 {
        11
    } else if v >= 1000000000 {
        10
    } else {
        decimal_length9(v as u32)
    }
}

/// Returns `e == 0 ? 1 : ceil(log_2(5^e))`; requires `0 <= e <= 3528`.
pub const fn pow5bits(e: i32) -> i32 {
    // Exact for 0 <= e <= 3528; the multiplication fits in 32 bits there.
    debug_assert!(e >= 0);
    debug_assert!(e <= 3528);
    (((e as u32 * 1217359) >> 19) + 1) as i32
}

/// Returns `floor(log_2(5^e))`; requires `0 <= e <= 3528`.
pub const fn log2_pow5(e: i32) -> i32 {
    debug_assert!(e >= 0);
    debug_assert!(e <= 3528);
    ((e as u32 * 1217359) >> 19) as i32
}

/// Returns `e == 0 ? 1 : ceil(log_2(5^e))`; requires `0 <= e <= 3528`.
pub const fn ceil_log2_pow5(e: i32) -> i32 {
    log2_pow5(e) + 1
}

/// Returns `floor(log_10(2^e))`; requires `0 <= e <= 1650`.
pub const fn log10_pow2(e: i32) -> u32 {
    debug_assert!(e >= 0);
    debug_assert!(e <= 1650);
    (e as u32 * 78913) >> 18
}

/// Returns `floor(log_10(5^e))`; requires `0 <= e <= 2620`.
pub const fn log10_pow5(e: i32) -> u32 {
    debug_assert!(e >= 0);
    debug_assert!(e <= 2620);
    (e as u32 * 732923) >> 20
}

pub const fn floor_log2(v: u64) -> u32 {
    63 - v.leading_zeros()
}

pub const fn floor_log2_32(v: u32) -> u32 {
    31 - v.leading_zeros()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths() {
        assert_eq!(decimal_length9(0), 1);
        assert_eq!(decimal_length9(9), 1);
        assert_eq!(decimal_length9(10), 2);
        assert_eq!(decimal_length9(999999999), 9);
        assert_eq!(decimal_length17(1000000000), 10);
        assert_eq!(decimal_length17(99999999999999999), 17);
    }

    #[test]
    fn logarithms() {
        let mut pow5: u128 = 1;
        for e in 0..55 {
            let bits = 128 - pow5.leading_zeros() as i32;
            assert_eq!(log2_pow5(e), bits - 1, "log2_pow5({e})");
            assert_eq!(pow5bits(e), if e == 0 { 1 } else { bits }, "pow5bits({e})");
            pow5 *= 5;
        }

        let mut pow10: u128 = 1;
        let mut digits = 0;
        for e in 0..127 {
            while pow10 * 10 <= 1u128 << e {
                pow10 *= 10;
                digits += 1;
            }
            assert_eq!(log10_pow2(e as i32), digits, "log10_pow2({e})");
        }

        assert_eq!(log10_pow5(0), 0);
        assert_eq!(log10_pow5(1), 0);
        assert_eq!(log10_pow5(2), 1);
        assert_eq!(log10_pow5(27), 18);
    }
}
