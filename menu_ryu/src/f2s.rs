use crate::common::*;
use crate::f2s_intrinsics::*;

/// A single-precision value written as `mantissa * 10^exponent`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FloatingDecimal32 {
    pub mantissa: u32,
    pub exponent: i32,
}

/// Shortest decimal for a finite nonzero float given its raw fields.
pub const fn f2d(ieee_mantissa: u32, ieee_exponent: u32) -> FloatingDecimal32 {
    let (e2, m2) = if ieee_exponent == 0 {
        (
            1 - FLOAT_BIAS - FLOAT_MANTISSA_BITS as i32 - 2,
            ieee_mantissa,
        )
    } else {
        (
            ieee_exponent as i32 - FLOAT_BIAS - FLOAT_MANTISSA_BITS as i32 - 2,
            (1u32 << FLOAT_MANTISSA_BITS) | ieee_mantissa,
        )
    };
    let even = (m2 & 1) == 0;
    let accept_bounds = even;

    // Step 2: Determine the interval of valid decimal representations.
    let mv = 4 * m2;
    let mp = 4 * m2 + 2;
    let mm_shift = (ieee_mantissa != 0 || ieee_exponent <= 1) as u32;
    let mm = 4 * m2 - 1 - mm_shift;

    // Step 3: Convert to a decimal power base using 64-bit arithmetic.
    let mut vr: u32;
    let mut vp: u32;
    let mut vm: u32;
    let e10: i32;
    let mut vm_is_trailing_zeros = false;
    let mut vr_is_trailing_zeros = false;
    let mut last_removed_digit = 0u8;
    if e2 >= 0 {
        let q = log10_pow2(e2);
        e10 = q as i32;
        let k = FLOAT_POW5_INV_BITCOUNT + pow5bits(q as i32) - 1;
        let i = -e2 + q as i32 + k;
        vr = mul_pow5_inv_div_pow2(mv, q, i);
        vp = mul_pow5_inv_div_pow2(mp, q, i);
        vm = mul_pow5_inv_div_pow2(mm, q, i);
        if q != 0 && (vp - 1) / 10 <= vm / 10 {
            // One more digit than the loop below can remove would be
            // dropped; recover it for rounding.
            let l = FLOAT_POW5_INV_BITCOUNT + pow5bits(q as i32 - 1) - 1;
            last_removed_digit =
                (mul_pow5_inv_div_pow2(mv, q - 1, -e2 + q as i32 - 1 + l) % 10) as u8;
        }
        if q <= 9 {
            // Only one of mp, mv and mm can be a multiple of 5, if any.
            if mv % 5 == 0 {
                vr_is_trailing_zeros = multiple_of_power_of_5_32(mv, q);
            } else if accept_bounds {
                vm_is_trailing_zeros = multiple_of_power_of_5_32(mm, q);
            } else {
                vp -= multiple_of_power_of_5_32(mp, q) as u32;
            }
        }
    } else {
        let q = log10_pow5(-e2);
        e10 = q as i32 + e2;
        let i = -e2 - q as i32;
        let k = pow5bits(i) - FLOAT_POW5_BITCOUNT;
        let mut j = q as i32 - k;
        vr = mul_pow5_div_pow2(mv, i as u32, j);
        vp = mul_pow5_div_pow2(mp, i as u32, j);
        vm = mul_pow5_div_pow2(mm, i as u32, j);
        if q != 0 && (vp - 1) / 10 <= vm / 10 {
            j = q as i32 - 1 - (pow5bits(i + 1) - FLOAT_POW5_BITCOUNT);
            last_removed_digit = (mul_pow5_div_pow2(mv, (i + 1) as u32, j) % 10) as u8;
        }
        if q <= 1 {
            // mv = 4 * m2 always has two trailing 0 bits.
            vr_is_trailing_zeros = true;
            if accept_bounds {
                vm_is_trailing_zeros = mm_shift == 1;
            } else {
                vp -= 1;
            }
        } else if q < 31 {
            vr_is_trailing_zeros = multiple_of_power_of_2_32(mv, q - 1);
        }
    }

    // Step 4: Find the shortest decimal representation in the interval of
    // valid representations.
    let mut removed = 0i32;
    let output = if vm_is_trailing_zeros || vr_is_trailing_zeros {
        while vp / 10 > vm / 10 {
            vm_is_trailing_zeros &= vm % 10 == 0;
            vr_is_trailing_zeros &= last_removed_digit == 0;
            last_removed_digit = (vr % 10) as u8;
            vr /= 10;
            vp /= 10;
            vm /= 10;
            removed += 1;
        }
        if vm_is_trailing_zeros {
            while vm % 10 == 0 {
                vr_is_trailing_zeros &= last_removed_digit == 0;
                last_removed_digit = (vr % 10) as u8;
                vr /= 10;
                vp /= 10;
                vm /= 10;
                removed += 1;
            }
        }
        if vr_is_trailing_zeros && last_removed_digit == 5 && vr % 2 == 0 {
            // Round even if the exact number is .....50..0.
            last_removed_digit = 4;
        }
        vr + ((vr == vm && (!accept_bounds || !vm_is_trailing_zeros))
            || last_removed_digit >= 5) as u32
    } else {
        while vp / 10 > vm / 10 {
            last_removed_digit = (vr % 10) as u8;
            vr /= 10;
            vp /= 10;
            vm /= 10;
            removed += 1;
        }
        vr + (vr == vm || last_removed_digit >= 5) as u32
    };

    FloatingDecimal32 {
        mantissa: output,
        exponent: e10 + removed,
    }
}

/// Exact integers in `[1, 2^24)` with trailing decimal zeros moved into the
/// exponent.
pub const fn f2d_small_int(ieee_mantissa: u32, ieee_exponent: u32) -> Option<FloatingDecimal32> {
    let m2 = (1u32 << FLOAT_MANTISSA_BITS) | ieee_mantissa;
    let e2 = ieee_exponent as i32 - FLOAT_BIAS - FLOAT_MANTISSA_BITS as i32;
    if e2 > 0 || e2 < -(FLOAT_MANTISSA_BITS as i32) {
        return None;
    }
    let mask = (1u32 << -e2) - 1;
    if m2 & mask != 0 {
        return None;
    }

    let mut mantissa = m2 >> -e2;
    let mut exponent = 0;
    while mantissa % 10 == 0 {
        mantissa /= 10;
        exponent += 1;
    }
    Some(FloatingDecimal32 { mantissa, exponent })
}

/// Shortest decimal for any finite nonzero float.
pub const fn shortest(ieee_mantissa: u32, ieee_exponent: u32) -> FloatingDecimal32 {
    match f2d_small_int(ieee_mantissa, ieee_exponent) {
        Some(v) => v,
        None => f2d(ieee_mantissa, ieee_exponent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decimal(v: f32) -> (u32, i32) {
        let bits = v.to_bits();
        let d = shortest(bits & ((1 << FLOAT_MANTISSA_BITS) - 1), (bits >> FLOAT_MANTISSA_BITS) & 0xff);
        (d.mantissa, d.exponent)
    }

    #[test]
    fn basic() {
        assert_eq!(decimal(1.0), (1, 0));
        assert_eq!(decimal(0.1), (1, -1));
        assert_eq!(decimal(1.5e10), (15, 9));
        assert_eq!(decimal(f32::MAX), (34028235, 31));
        assert_eq!(decimal(f32::from_bits(1)), (1, -45));
        assert_eq!(decimal(16777215.0), (16777215, 0));
    }

    #[test]
    fn small_int_agrees_with_interval_search() {
        for v in [1.0f32, 20.0, 8388608.0, 16777215.0, 1230000.0] {
            let bits = v.to_bits();
            let m = bits & ((1 << FLOAT_MANTISSA_BITS) - 1);
            let e = bits >> FLOAT_MANTISSA_BITS;
            let fast = f2d_small_int(m, e).unwrap();
            let mut slow = f2d(m, e);
            while slow.mantissa % 10 == 0 {
                slow.mantissa /= 10;
                slow.exponent += 1;
            }
            assert_eq!(fast, slow, "{v}");
        }
    }
}
