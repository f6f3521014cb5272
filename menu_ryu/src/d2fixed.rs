//! `%f`/`%e`-style formatting with an explicit precision.
//!
//! Digits are produced in blocks of nine from precomputed `2^k / 10^9i`
//! multipliers, so any precision is exact without big-integer arithmetic.

use crate::bits::{Class, Decoded};
use crate::common::{DOUBLE_BIAS, DOUBLE_MANTISSA_BITS, decimal_length9};
use crate::d2fixed_full_table::*;
use crate::d2s_intrinsics::{multiple_of_power_of_2, multiple_of_power_of_5, shiftright128, umul128};
use crate::digit_table::{fill, write_digits, write_digits_with_point, write_str};

/// How to resolve the digits cut off after the last printed position.
#[derive(Copy, Clone, Debug)]
enum Rounding {
    Down,
    Up,
    /// The cut-off part is exactly one half.
    HalfEven,
}

/// Returns the high 64 bits of the low 128 bits of the 256-bit product
/// `a_hi:a_lo * b_hi:b_lo`.
const fn umul256_hi128_lo64(a_hi: u64, a_lo: u64, b_hi: u64, b_lo: u64) -> u64 {
    let (_, b00_hi) = umul128(a_lo, b_lo);
    let (b01_lo, b01_hi) = umul128(a_lo, b_hi);
    let (b10_lo, b10_hi) = umul128(a_hi, b_lo);
    let (b11_lo, _) = umul128(a_hi, b_hi);
    let (t1_lo, carry) = b10_lo.overflowing_add(b00_hi);
    let t1_hi = b10_hi + carry as u64;
    let (_, carry) = b01_lo.overflowing_add(t1_lo);
    let t2_hi = b01_hi + carry as u64;
    b11_lo.wrapping_add(t1_hi).wrapping_add(t2_hi)
}

/// `hi:lo mod 10^9` by multiplication with a fixed-point reciprocal.
pub const fn uint128_mod1e9(hi: u64, lo: u64) -> u32 {
    // Only 29 + 32 bits of the quotient estimate are needed.
    let multiplied = umul256_hi128_lo64(hi, lo, 0x89705F4136B4A597, 0x31680A88F8953031);
    let shifted = (multiplied >> 29) as u32;
    (lo as u32).wrapping_sub(1000000000u32.wrapping_mul(shifted))
}

/// `floor(m * mul / 2^j) mod 10^9` for a 192-bit `mul` and `128 <= j <= 180`.
pub const fn mul_shift_mod1e9(m: u64, mul: &[u64; 3], j: i32) -> u32 {
    let (_, high0) = umul128(m, mul[0]);
    let (low1, high1) = umul128(m, mul[1]);
    let (low2, high2) = umul128(m, mul[2]);
    let (_, c1) = low1.overflowing_add(high0);
    let (t, c2a) = low2.overflowing_add(high1);
    let (s1low, c2b) = t.overflowing_add(c1 as u64);
    let s1high = high2 + (c2a | c2b) as u64;
    debug_assert!(j >= 128 && j <= 180);
    let dist = (j - 128) as u32;
    uint128_mod1e9(s1high >> dist, shiftright128(s1low, s1high, dist))
}

const fn index_for_exponent(e: u32) -> u32 {
    (e + 15) / 16
}

const fn pow10_bits_for_index(idx: u32) -> u32 {
    16 * idx + POW10_ADDITIONAL_BITS
}

const fn length_for_index(idx: u32) -> u32 {
    // +1 for ceil, +16 for mantissa, +8 to round up when dividing by 9
    (crate::common::log10_pow2(16 * idx as i32) + 1 + 16 + 8) / 9
}

/// Writes the text for a non-finite value and returns the new position.
const fn write_special(result: &mut [u8], pos: usize, decoded: Decoded) -> usize {
    match decoded.class() {
        Class::Nan => write_str(result, pos, "NaN"),
        _ if decoded.sign => write_str(result, pos, "-Infinity"),
        _ => write_str(result, pos, "Infinity"),
    }
}

/// `m2 * 2^e2` for a finite nonzero double.
const fn unpack(decoded: Decoded) -> (i32, u64) {
    if decoded.exponent == 0 {
        (1 - DOUBLE_BIAS - DOUBLE_MANTISSA_BITS as i32, decoded.mantissa)
    } else {
        (
            decoded.exponent as i32 - DOUBLE_BIAS - DOUBLE_MANTISSA_BITS as i32,
            (1u64 << DOUBLE_MANTISSA_BITS) | decoded.mantissa,
        )
    }
}

/// Digits of the fraction, nine at a time, starting with block `i` after the
/// decimal point. Returns 0 past the last nonzero block.
const fn fraction_block(m2: u64, e2: i32, i: u32) -> u32 {
    let idx = (-e2 / 16) as usize;
    let j = POW10_ADDITIONAL_BITS as i32 + (-e2 - 16 * idx as i32);
    let p = POW10_OFFSET_2[idx] as u32 + i - MIN_BLOCK_2[idx] as u32;
    if p >= POW10_OFFSET_2[idx + 1] as u32 {
        0
    } else {
        // Shifting by 8 moves j into the range the reduction expects.
        mul_shift_mod1e9(m2 << 8, &POW10_SPLIT_2[p as usize], j + 8)
    }
}

/// Digits of the integer part, nine at a time; block `i` holds the digits
/// for `10^9i` through `10^(9i+8)`.
const fn integer_block(m2: u64, e2: i32, idx: u32, i: u32) -> u32 {
    let j = pow10_bits_for_index(idx) as i32 - e2;
    let p = POW10_OFFSET[idx as usize] as u32 + i;
    mul_shift_mod1e9(m2 << 8, &POW10_SPLIT[p as usize], j + 8)
}

/// Writes the first `count` significant digits, with the decimal point after
/// the first one when requested.
const fn write_leading(result: &mut [u8], index: usize, count: u32, digits: u32, point: bool) -> usize {
    if point {
        write_digits_with_point(result, index, count as usize, digits as u64);
        index + count as usize + 1
    } else {
        debug_assert!(count == 1);
        result[index] = b'0' + digits as u8;
        index + 1
    }
}

/// Adds one unit in the last written position, carrying leftwards. When every
/// digit overflows, writes a new leading `1` and returns the position of the
/// decimal point passed over (0 if there was none).
const fn propagate_carry(result: &mut [u8], start: usize, end: usize, mut rounding: Rounding) -> Option<usize> {
    let mut round_index = end;
    let mut dot_index = 0;
    loop {
        if round_index == start {
            result[round_index] = b'1';
            return Some(dot_index);
        }
        round_index -= 1;
        let c = result[round_index];
        if c == b'.' {
            dot_index = round_index;
            continue;
        }
        if c == b'9' {
            result[round_index] = b'0';
            rounding = Rounding::Up;
            continue;
        }
        if matches!(rounding, Rounding::HalfEven) && c % 2 == 0 {
            return None;
        }
        result[round_index] = c + 1;
        return None;
    }
}

/// Formats `value` with exactly `precision` digits after the decimal point,
/// rounding half to even on the exact binary value. Returns the number of
/// bytes written.
pub const fn format_fixed(value: f64, precision: u32, result: &mut [u8]) -> usize {
    let decoded = Decoded::from_f64(value);
    let mut index = 0;
    if !decoded.is_finite() {
        return write_special(result, 0, decoded);
    }
    if decoded.sign {
        result[index] = b'-';
        index += 1;
    }
    let digits_start = index;
    if matches!(decoded.class(), Class::Zero) {
        result[index] = b'0';
        index += 1;
        if precision > 0 {
            result[index] = b'.';
            index += 1;
            fill(result, index, precision as usize, b'0');
            index += precision as usize;
        }
        return index;
    }

    let (e2, m2) = unpack(decoded);
    let mut nonzero = false;
    if e2 >= -52 {
        let idx = if e2 < 0 { 0 } else { index_for_exponent(e2 as u32) };
        let mut i = length_for_index(idx);
        while i > 0 {
            i -= 1;
            let digits = integer_block(m2, e2, idx, i);
            if nonzero {
                write_digits(result, index, 9, digits as u64);
                index += 9;
            } else if digits != 0 {
                let olength = decimal_length9(digits) as usize;
                write_digits(result, index, olength, digits as u64);
                index += olength;
                nonzero = true;
            }
        }
    }
    if !nonzero {
        result[index] = b'0';
        index += 1;
    }
    if precision > 0 {
        result[index] = b'.';
        index += 1;
    }
    if e2 >= 0 {
        fill(result, index, precision as usize, b'0');
        return index + precision as usize;
    }

    let idx = (-e2 / 16) as usize;
    let min_block = MIN_BLOCK_2[idx] as u32;
    let blocks = precision / 9 + 1;
    let mut rounding = Rounding::Down;
    let mut i = 0;
    if blocks <= min_block {
        i = blocks;
        fill(result, index, precision as usize, b'0');
        index += precision as usize;
    } else if i < min_block {
        i = min_block;
        fill(result, index, 9 * i as usize, b'0');
        index += 9 * i as usize;
    }
    while i < blocks {
        let p = POW10_OFFSET_2[idx] as u32 + i - min_block;
        if p >= POW10_OFFSET_2[idx + 1] as u32 {
            // Every remaining digit is zero; no rounding needed.
            let remaining = (precision - 9 * i) as usize;
            fill(result, index, remaining, b'0');
            index += remaining;
            break;
        }
        let mut digits = fraction_block(m2, e2, i);
        if i < blocks - 1 {
            write_digits(result, index, 9, digits as u64);
            index += 9;
        } else {
            let maximum = precision - 9 * i;
            let mut last_digit = 0;
            let mut k = 0;
            while k < 9 - maximum {
                last_digit = digits % 10;
                digits /= 10;
                k += 1;
            }
            rounding = if last_digit != 5 {
                if last_digit > 5 { Rounding::Up } else { Rounding::Down }
            } else {
                // Is m2 * 2^e2 * 10^(precision + 1) an integer?
                let required_twos = -e2 - precision as i32 - 1;
                let trailing_zeros = required_twos <= 0
                    || (required_twos < 60 && multiple_of_power_of_2(m2, required_twos as u32));
                if trailing_zeros { Rounding::HalfEven } else { Rounding::Up }
            };
            if maximum > 0 {
                write_digits(result, index, maximum as usize, digits as u64);
                index += maximum as usize;
            }
            break;
        }
        i += 1;
    }

    if !matches!(rounding, Rounding::Down) {
        if let Some(dot_index) = propagate_carry(result, digits_start, index, rounding) {
            // 9.99 -> 10.00: the point moves one place right.
            if dot_index > 0 {
                result[dot_index] = b'0';
                result[dot_index + 1] = b'.';
            }
            result[index] = b'0';
            index += 1;
        }
    }
    index
}

/// Formats `value` as `D.DDDe±DD` with exactly `precision` digits after the
/// decimal point. Returns the number of bytes written.
pub const fn format_exponential(value: f64, precision: u32, result: &mut [u8]) -> usize {
    let decoded = Decoded::from_f64(value);
    let mut index = 0;
    if !decoded.is_finite() {
        return write_special(result, 0, decoded);
    }
    if decoded.sign {
        result[index] = b'-';
        index += 1;
    }
    let digits_start = index;
    if matches!(decoded.class(), Class::Zero) {
        result[index] = b'0';
        index += 1;
        if precision > 0 {
            result[index] = b'.';
            index += 1;
            fill(result, index, precision as usize, b'0');
            index += precision as usize;
        }
        return write_str(result, index, "e+00");
    }

    let (e2, m2) = unpack(decoded);
    let print_decimal_point = precision > 0;
    // Significant digits, counting the one before the point.
    let precision = precision + 1;
    let mut digits = 0u32;
    let mut printed_digits = 0u32;
    let mut available_digits = 0u32;
    let mut exp = 0i32;

    if e2 >= -52 {
        let idx = if e2 < 0 { 0 } else { index_for_exponent(e2 as u32) };
        let mut i = length_for_index(idx);
        while i > 0 {
            i -= 1;
            digits = integer_block(m2, e2, idx, i);
            if printed_digits != 0 {
                if printed_digits + 9 > precision {
                    available_digits = 9;
                    break;
                }
                write_digits(result, index, 9, digits as u64);
                index += 9;
                printed_digits += 9;
            } else if digits != 0 {
                available_digits = decimal_length9(digits);
                exp = 9 * i as i32 + available_digits as i32 - 1;
                if available_digits > precision {
                    break;
                }
                index = write_leading(result, index, available_digits, digits, print_decimal_point);
                printed_digits = available_digits;
                available_digits = 0;
            }
        }
    }

    if e2 < 0 && available_digits == 0 {
        let mut i = MIN_BLOCK_2[(-e2 / 16) as usize] as u32;
        // The first nonzero fraction digit of a double is within 36 blocks.
        while i < 200 {
            digits = fraction_block(m2, e2, i);
            if printed_digits != 0 {
                if printed_digits + 9 > precision {
                    available_digits = 9;
                    break;
                }
                write_digits(result, index, 9, digits as u64);
                index += 9;
                printed_digits += 9;
            } else if digits != 0 {
                available_digits = decimal_length9(digits);
                exp = -9 * (i as i32 + 1) + available_digits as i32 - 1;
                if available_digits > precision {
                    break;
                }
                index = write_leading(result, index, available_digits, digits, print_decimal_point);
                printed_digits = available_digits;
                available_digits = 0;
            }
            i += 1;
        }
    }

    let maximum = precision - printed_digits;
    if available_digits == 0 {
        digits = 0;
    }
    let mut last_digit = 0;
    if available_digits > maximum {
        let mut k = 0;
        while k < available_digits - maximum {
            last_digit = digits % 10;
            digits /= 10;
            k += 1;
        }
    }
    let rounding = if last_digit != 5 {
        if last_digit > 5 { Rounding::Up } else { Rounding::Down }
    } else {
        // Is m2 * 2^e2 * 10^(precision - exp) an integer?
        let rexp = precision as i32 - exp;
        let required_twos = -e2 - rexp;
        let mut trailing_zeros = required_twos <= 0
            || (required_twos < 60 && multiple_of_power_of_2(m2, required_twos as u32));
        if rexp < 0 {
            trailing_zeros = trailing_zeros && multiple_of_power_of_5(m2, (-rexp) as u32);
        }
        if trailing_zeros { Rounding::HalfEven } else { Rounding::Up }
    };
    if printed_digits != 0 {
        write_digits(result, index, maximum as usize, digits as u64);
        index += maximum as usize;
    } else {
        index = write_leading(result, index, maximum, digits, print_decimal_point);
    }

    if !matches!(rounding, Rounding::Down)
        && propagate_carry(result, digits_start, index, rounding).is_some()
    {
        // 9.99e0 -> 1.00e1: the digits are all zeros after the new leading one.
        exp += 1;
    }

    result[index] = b'e';
    index += 1;
    if exp < 0 {
        result[index] = b'-';
        exp = -exp;
    } else {
        result[index] = b'+';
    }
    index += 1;
    let exp_len = if exp >= 100 { 3 } else { 2 };
    write_digits(result, index, exp_len, exp as u64);
    index + exp_len
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(value: f64, precision: u32) -> String {
        let mut buf = vec![0u8; 400 + precision as usize];
        let len = format_fixed(value, precision, &mut buf);
        String::from_utf8(buf[..len].to_vec()).unwrap()
    }

    fn exponential(value: f64, precision: u32) -> String {
        let mut buf = vec![0u8; 16 + precision as usize];
        let len = format_exponential(value, precision, &mut buf);
        String::from_utf8(buf[..len].to_vec()).unwrap()
    }

    #[test]
    fn mod1e9() {
        assert_eq!(uint128_mod1e9(0, 0), 0);
        assert_eq!(uint128_mod1e9(0, 1_999_999_999), 999_999_999);
        let v: u128 = 0x1234_5678_9abc_def0_fedc_ba98_7654_3210;
        assert_eq!(uint128_mod1e9((v >> 64) as u64, v as u64), (v % 1_000_000_000) as u32);
        let v = u128::MAX;
        assert_eq!(uint128_mod1e9((v >> 64) as u64, v as u64), (v % 1_000_000_000) as u32);
    }

    #[test]
    fn ties_round_to_even() {
        assert_eq!(fixed(2.5, 0), "2");
        assert_eq!(fixed(3.5, 0), "4");
        assert_eq!(fixed(0.125, 2), "0.12");
        assert_eq!(fixed(0.375, 2), "0.38");
        assert_eq!(exponential(2.5, 0), "2e+00");
        assert_eq!(exponential(125.0, 1), "1.2e+02");
        assert_eq!(exponential(135.0, 1), "1.4e+02");
    }

    #[test]
    fn carries() {
        assert_eq!(fixed(0.9999, 3), "1.000");
        assert_eq!(fixed(9.99, 1), "10.0");
        assert_eq!(fixed(-9.99, 1), "-10.0");
        assert_eq!(fixed(0.96, 0), "1");
        assert_eq!(exponential(9.99, 1), "1.0e+01");
        assert_eq!(exponential(-9.96, 0), "-1e+01");
    }

    #[test]
    fn specials() {
        assert_eq!(fixed(0.0, 0), "0");
        assert_eq!(fixed(-0.0, 2), "-0.00");
        assert_eq!(fixed(f64::NAN, 3), "NaN");
        assert_eq!(fixed(f64::NEG_INFINITY, 3), "-Infinity");
        assert_eq!(exponential(0.0, 2), "0.00e+00");
        assert_eq!(exponential(-0.0, 0), "-0e+00");
        assert_eq!(exponential(f64::INFINITY, 2), "Infinity");
    }

    #[test]
    fn extremes() {
        assert_eq!(fixed(1e-7, 5), "0.00000");
        assert_eq!(exponential(5e-324, 2), "4.94e-324");
        assert_eq!(exponential(f64::MAX, 16), "1.7976931348623157e+308");
        assert_eq!(fixed(123.456, 10), "123.4560000000");
        assert_eq!(fixed(1e22, 1), "10000000000000000000000.0");
    }
}
