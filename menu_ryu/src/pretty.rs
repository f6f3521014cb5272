//! Shortest round-trip output in `D[.DDD]E<exp>` form.

use crate::bits::{Class, Decoded};
use crate::common::{decimal_length9, decimal_length17};
use crate::digit_table::{write_digits, write_digits_with_point, write_str};
use crate::{d2s, f2s};

/// Longest shortest-form output for a double: `-d.ddddddddddddddddE-ddd`.
pub const MAX_SHORTEST_F64: usize = 24;
/// Longest shortest-form output for a float: `-d.ddddddddE-dd`.
pub const MAX_SHORTEST_F32: usize = 15;

const fn write_special(result: &mut [u8], decoded: Decoded) -> Option<usize> {
    let text = match decoded.class() {
        Class::Nan => return Some(write_str(result, 0, "NaN")),
        Class::Infinite => "Infinity",
        Class::Zero => "0E0",
        Class::Subnormal | Class::Normal => return None,
    };
    let mut index = 0;
    if decoded.sign {
        result[0] = b'-';
        index = 1;
    }
    Some(write_str(result, index, text))
}

/// Writes `mantissa * 10^exponent` (with `olength` digits) and returns the
/// new position.
const fn write_decimal(result: &mut [u8], mut index: usize, mantissa: u64, exponent: i32, olength: u32) -> usize {
    if olength > 1 {
        write_digits_with_point(result, index, olength as usize, mantissa);
        index += olength as usize + 1;
    } else {
        write_digits(result, index, 1, mantissa);
        index += 1;
    }

    result[index] = b'E';
    index += 1;
    let mut exp = exponent + olength as i32 - 1;
    if exp < 0 {
        result[index] = b'-';
        index += 1;
        exp = -exp;
    }
    let exp_len = if exp >= 100 {
        3
    } else if exp >= 10 {
        2
    } else {
        1
    };
    write_digits(result, index, exp_len, exp as u64);
    index + exp_len
}

/// Writes the shortest representation of `value` that parses back to the
/// same double. `result` must hold [`MAX_SHORTEST_F64`] bytes for arbitrary
/// input.
pub const fn format_shortest_f64(value: f64, result: &mut [u8]) -> usize {
    let decoded = Decoded::from_f64(value);
    if let Some(len) = write_special(result, decoded) {
        return len;
    }
    let mut index = 0;
    if decoded.sign {
        result[index] = b'-';
        index += 1;
    }
    let v = d2s::shortest(decoded.mantissa, decoded.exponent);
    write_decimal(result, index, v.mantissa, v.exponent, decimal_length17(v.mantissa))
}

/// Single-precision counterpart of [`format_shortest_f64`]; needs at most
/// [`MAX_SHORTEST_F32`] bytes.
pub const fn format_shortest_f32(value: f32, result: &mut [u8]) -> usize {
    let decoded = Decoded::from_f32(value);
    if let Some(len) = write_special(result, decoded) {
        return len;
    }
    let mut index = 0;
    if decoded.sign {
        result[index] = b'-';
        index += 1;
    }
    let v = f2s::shortest(decoded.mantissa as u32, decoded.exponent);
    write_decimal(result, index, v.mantissa as u64, v.exponent, decimal_length9(v.mantissa))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shortest(value: f64) -> String {
        let mut buf = [0u8; MAX_SHORTEST_F64];
        let len = format_shortest_f64(value, &mut buf);
        String::from_utf8(buf[..len].to_vec()).unwrap()
    }

    fn shortest32(value: f32) -> String {
        let mut buf = [0u8; MAX_SHORTEST_F32];
        let len = format_shortest_f32(value, &mut buf);
        String::from_utf8(buf[..len].to_vec()).unwrap()
    }

    #[test]
    fn layout() {
        assert_eq!(shortest(15.0), "1.5E1");
        assert_eq!(shortest(1.0), "1E0");
        assert_eq!(shortest(-0.001), "-1E-3");
        assert_eq!(shortest(1.2345678e100), "1.2345678E100");
        assert_eq!(shortest(-2.2250738585072014e-308), "-2.2250738585072014E-308");
        assert_eq!(shortest32(15.0), "1.5E1");
        assert_eq!(shortest32(-1.1754944e-38), "-1.1754944E-38");
    }

    #[test]
    fn specials() {
        assert_eq!(shortest(0.0), "0E0");
        assert_eq!(shortest(-0.0), "-0E0");
        assert_eq!(shortest(f64::INFINITY), "Infinity");
        assert_eq!(shortest(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(shortest(-f64::NAN), "NaN");
        assert_eq!(shortest32(-0.0), "-0E0");
        assert_eq!(shortest32(f32::NAN), "NaN");
    }
}
