use crate::common::*;
use crate::d2s_intrinsics::*;
use crate::pow5::{inv_pow5, pow5};

/// A double-precision value written as `mantissa * 10^exponent`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FloatingDecimal64 {
    pub mantissa: u64,
    /// Between -324 and 308 inclusive.
    pub exponent: i32,
}

/// Shortest decimal for a finite nonzero double given its raw fields.
pub const fn d2d(ieee_mantissa: u64, ieee_exponent: u32) -> FloatingDecimal64 {
    let (e2, m2) = if ieee_exponent == 0 {
        (
            // We subtract 2 so that the bounds computation has 2 additional bits.
            1 - DOUBLE_BIAS - DOUBLE_MANTISSA_BITS as i32 - 2,
            ieee_mantissa,
        )
    } else {
        (
            ieee_exponent as i32 - DOUBLE_BIAS - DOUBLE_MANTISSA_BITS as i32 - 2,
            (1u64 << DOUBLE_MANTISSA_BITS) | ieee_mantissa,
        )
    };
    let even = (m2 & 1) == 0;
    let accept_bounds = even;

    // Step 2: Determine the interval of valid decimal representations.
    let mv = 4 * m2;
    // The lower bound is closer when the mantissa sits on a binade boundary.
    let mm_shift = (ieee_mantissa != 0 || ieee_exponent <= 1) as u32;

    // Step 3: Convert to a decimal power base using 128-bit arithmetic.
    let (mut vr, mut vp, mut vm, e10, mut vm_is_trailing_zeros, mut vr_is_trailing_zeros) =
        if e2 >= 0 {
            let q = log10_pow2(e2) - (e2 > 3) as u32;
            let k = DOUBLE_POW5_INV_BITCOUNT + pow5bits(q as i32) - 1;
            let i = -e2 + q as i32 + k;
            let (vr, mut vp, vm) = mul_shift_all64(m2, inv_pow5(q), i, mm_shift);
            let mut vm_tz = false;
            let mut vr_tz = false;
            if q <= 21 {
                // Only one of mp, mv and mm can be a multiple of 5, if any.
                if mv % 5 == 0 {
                    vr_tz = multiple_of_power_of_5(mv, q);
                } else if accept_bounds {
                    // e2 >= q, so only the power of 5 matters.
                    vm_tz = multiple_of_power_of_5(mv - 1 - mm_shift as u64, q);
                } else {
                    vp -= multiple_of_power_of_5(mv + 2, q) as u64;
                }
            }
            (vr, vp, vm, q as i32, vm_tz, vr_tz)
        } else {
            let q = log10_pow5(-e2) - (-e2 > 1) as u32;
            let i = -e2 - q as i32;
            let k = pow5bits(i) - DOUBLE_POW5_BITCOUNT;
            let j = q as i32 - k;
            let (vr, mut vp, vm) = mul_shift_all64(m2, pow5(i as u32), j, mm_shift);
            let mut vm_tz = false;
            let mut vr_tz = false;
            if q <= 1 {
                // mv = 4 * m2 always has two trailing 0 bits.
                vr_tz = true;
                if accept_bounds {
                    // mm = mv - 1 - mm_shift has one trailing 0 bit iff mm_shift == 1.
                    vm_tz = mm_shift == 1;
                } else {
                    // mp = mv + 2 always has one trailing 0 bit.
                    vp -= 1;
                }
            } else if q < 63 {
                // -e2 >= q, so only the power of 2 in mv matters.
                vr_tz = multiple_of_power_of_2(mv, q);
            }
            (vr, vp, vm, q as i32 + e2, vm_tz, vr_tz)
        };

    // Step 4: Find the shortest decimal representation in the interval of
    // valid representations.
    let mut removed = 0i32;
    let mut last_removed_digit = 0u8;
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
        // We need to take vr + 1 if vr is outside bounds or we need to round up.
        vr + ((vr == vm && (!accept_bounds || !vm_is_trailing_zeros))
            || last_removed_digit >= 5) as u64
    } else {
        let mut round_up = false;
        if vp / 100 > vm / 100 {
            // Two digits at a time.
            round_up = vr % 100 >= 50;
            vr /= 100;
            vp /= 100;
            vm /= 100;
            removed += 2;
        }
        while vp / 10 > vm / 10 {
            round_up = vr % 10 >= 5;
            vr /= 10;
            vp /= 10;
            vm /= 10;
            removed += 1;
        }
        vr + (vr == vm || round_up) as u64
    };

    FloatingDecimal64 {
        mantissa: output,
        exponent: e10 + removed,
    }
}

/// Exact integers in `[1, 2^53)` skip the interval search; only their
/// trailing decimal zeros are moved into the exponent.
pub const fn d2d_small_int(ieee_mantissa: u64, ieee_exponent: u32) -> Option<FloatingDecimal64> {
    let m2 = (1u64 << DOUBLE_MANTISSA_BITS) | ieee_mantissa;
    let e2 = ieee_exponent as i32 - DOUBLE_BIAS - DOUBLE_MANTISSA_BITS as i32;

    if e2 > 0 {
        // f = m2 * 2^e2 >= 2^53 is an integer.
        // Ignore this case for now.
        return None;
    }

    if e2 < -52 {
        // f < 1.
        return None;
    }

    // Since 2^52 <= m2 < 2^53 and 0 <= -e2 <= 52: 1 <= f = m2 / 2^-e2 < 2^53.
    // Test if the lower -e2 bits of the significand are 0, i.e. whether the
    // fraction is 0.
    let mask = (1u64 << -e2) - 1;
    if m2 & mask != 0 {
        return None;
    }

    let mut mantissa = m2 >> -e2;
    let mut exponent = 0;
    while mantissa % 10 == 0 {
        mantissa /= 10;
        exponent += 1;
    }
    Some(FloatingDecimal64 { mantissa, exponent })
}

/// Shortest decimal for any finite nonzero double.
pub const fn shortest(ieee_mantissa: u64, ieee_exponent: u32) -> FloatingDecimal64 {
    match d2d_small_int(ieee_mantissa, ieee_exponent) {
        Some(v) => v,
        None => d2d(ieee_mantissa, ieee_exponent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decimal(v: f64) -> (u64, i32) {
        let bits = v.to_bits();
        let d = shortest(
            bits & ((1 << DOUBLE_MANTISSA_BITS) - 1),
            (bits >> DOUBLE_MANTISSA_BITS) as u32 & 0x7ff,
        );
        (d.mantissa, d.exponent)
    }

    #[test]
    fn basic() {
        assert_eq!(decimal(1.0), (1, 0));
        assert_eq!(decimal(1.5), (15, -1));
        assert_eq!(decimal(0.3), (3, -1));
        assert_eq!(decimal(123456.0), (123456, 0));
        assert_eq!(decimal(1e23), (1, 23));
        assert_eq!(decimal(5e-324), (5, -324));
        assert_eq!(decimal(f64::MAX), (17976931348623157, 292));
    }

    #[test]
    fn small_int_agrees_with_interval_search() {
        for v in [1.0f64, 7.0, 10.0, 1500.0, 123456789.0, 9007199254740991.0, 4503599627370496.0] {
            let bits = v.to_bits();
            let m = bits & ((1 << DOUBLE_MANTISSA_BITS) - 1);
            let e = (bits >> DOUBLE_MANTISSA_BITS) as u32;
            let fast = d2d_small_int(m, e).unwrap();
            let mut slow = d2d(m, e);
            while slow.mantissa % 10 == 0 {
                slow.mantissa /= 10;
                slow.exponent += 1;
            }
            assert_eq!(fast, slow, "{v}");
        }
        assert_eq!(d2d_small_int(0, 1023 - 1), None);
        assert_eq!(d2d_small_int(1 << 51, 1023), None);
    }
}
