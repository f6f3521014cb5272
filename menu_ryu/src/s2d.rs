use crate::common::*;
use crate::d2s_intrinsics::{mul_shift64, multiple_of_power_of_2, multiple_of_power_of_5};
use crate::parse::{Literal, Rejection, scan};
use crate::pow5::{inv_pow5, pow5};

/// Most significant decimal digits accepted for a double.
pub const MAX_DIGITS: u32 = 17;

/// Nearest double to the decimal literal, ties to even.
pub const fn s2d(input: &[u8]) -> Result<f64, Rejection> {
    match scan(input, MAX_DIGITS) {
        Ok(literal) => Ok(f64::from_bits(literal_to_bits(literal))),
        Err(rejection) => Err(rejection),
    }
}

const fn literal_to_bits(literal: Literal) -> u64 {
    let sign = (literal.negative as u64) << (DOUBLE_MANTISSA_BITS + DOUBLE_EXPONENT_BITS);
    let infinity = sign | (((1u64 << DOUBLE_EXPONENT_BITS) - 1) << DOUBLE_MANTISSA_BITS);
    let m10 = literal.mantissa;
    let e10 = literal.exponent;

    // The smallest subnormal is about 4.9e-324 and the largest double about
    // 1.8e308; outside these bounds no exact arithmetic is needed.
    if m10 == 0 || literal.digits as i32 + e10 <= -324 {
        return sign;
    }
    if literal.digits as i32 + e10 >= 310 {
        return infinity;
    }

    // m2 * 2^e2 approximates the literal; trailing_zeros records whether the
    // truncation so far was exact.
    let (e2, m2, mut trailing_zeros) = if e10 >= 0 {
        // log2(m10 * 10^e10) = log2(m10) + e10 + e10 * log2(5); keep the top
        // 53 bits plus one. floor(log2(5^e10)) may leave one extra bit.
        let e2 = floor_log2(m10) as i32 + e10 + log2_pow5(e10) - (DOUBLE_MANTISSA_BITS as i32 + 1);

        // We now compute [m10 * 10^e10 / 2^e2] = [m10 * 5^e10 / 2^(e2-e10)].
        let j = e2 - e10 - ceil_log2_pow5(e10) + DOUBLE_POW5_BITCOUNT;
        let m2 = mul_shift64(m10, pow5(e10 as u32), j);

        // The quotient is exact iff m10 * 5^e10 is divisible by 2^(e2-e10).
        let trailing_zeros = e2 < e10
            || (e2 - e10 < 64 && multiple_of_power_of_2(m10, (e2 - e10) as u32));
        (e2, m2, trailing_zeros)
    } else {
        let e2 = floor_log2(m10) as i32 + e10
            - ceil_log2_pow5(-e10)
            - (DOUBLE_MANTISSA_BITS as i32 + 1);

        // We now compute [m10 * 10^e10 / 2^e2] = [m10 / (5^(-e10) 2^(e2-e10))].
        let j = e2 - e10 + ceil_log2_pow5(-e10) - 1 + DOUBLE_POW5_INV_BITCOUNT;
        let m2 = mul_shift64(m10, inv_pow5((-e10) as u32), j);

        // The quotient is exact iff m10 is divisible by both 5^(-e10) and
        // 2^(e2-e10).
        let trailing_zeros = (e2 < e10
            || (e2 - e10 < 64 && multiple_of_power_of_2(m10, (e2 - e10) as u32)))
            && multiple_of_power_of_5(m10, (-e10) as u32);
        (e2, m2, trailing_zeros)
    };

    // Compute the final IEEE exponent.
    let mut ieee_e2 = e2 + DOUBLE_BIAS + floor_log2(m2) as i32;
    if ieee_e2 < 0 {
        ieee_e2 = 0;
    }
    if ieee_e2 > 0x7fe {
        return infinity;
    }

    // Subnormals share the exponent of the smallest normal.
    let shift = (if ieee_e2 == 0 { 1 } else { ieee_e2 }) - e2 - DOUBLE_BIAS - DOUBLE_MANTISSA_BITS as i32;
    debug_assert!(shift > 0 && shift < 64);

    // Round up when the removed part exceeds one half, or equals it and the
    // kept part is odd.
    trailing_zeros &= (m2 & ((1u64 << (shift - 1)) - 1)) == 0;
    let last_removed_bit = (m2 >> (shift - 1)) & 1;
    let round_up = last_removed_bit != 0 && (!trailing_zeros || ((m2 >> shift) & 1) != 0);

    let mut ieee_m2 = (m2 >> shift) + round_up as u64;
    debug_assert!(ieee_m2 <= 1u64 << (DOUBLE_MANTISSA_BITS + 1));
    ieee_m2 &= (1u64 << DOUBLE_MANTISSA_BITS) - 1;
    if ieee_m2 == 0 && round_up {
        // Rounding carried into the exponent; an all-ones exponent is infinity.
        ieee_e2 += 1;
    }

    sign | ((ieee_e2 as u64) << DOUBLE_MANTISSA_BITS) | ieee_m2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::ParseError;

    fn parse(s: &str) -> Result<f64, ParseError> {
        s2d(s.as_bytes()).map_err(|r| r.error)
    }

    #[test]
    fn basic() {
        assert_eq!(parse("0"), Ok(0.0));
        assert_eq!(parse("1.5E1"), Ok(15.0));
        assert_eq!(parse("0.1"), Ok(0.1));
        assert_eq!(parse("-2.5"), Ok(-2.5));
        assert_eq!(parse("123456789012345e-3"), Ok(123456789012.345));
        assert_eq!(parse("00000000000000000000001"), Ok(1.0));
    }

    #[test]
    fn signed_zero() {
        assert_eq!(parse("-0").map(f64::to_bits), Ok((-0.0f64).to_bits()));
        assert_eq!(parse("-1e-400").map(f64::to_bits), Ok((-0.0f64).to_bits()));
    }

    #[test]
    fn range() {
        assert_eq!(parse("1e400"), Ok(f64::INFINITY));
        assert_eq!(parse("-1e400"), Ok(f64::NEG_INFINITY));
        assert_eq!(parse("1e-400"), Ok(0.0));
        assert_eq!(parse("1.7976931348623157e308"), Ok(f64::MAX));
        assert_eq!(parse("1.7976931348623159e308"), Ok(f64::INFINITY));
        assert_eq!(parse("2.2250738585072014e-308"), Ok(f64::MIN_POSITIVE));
        assert_eq!(parse("4.9e-324"), Ok(5e-324));
        // Exactly half the smallest subnormal rounds to even, i.e. zero.
        assert_eq!(parse("2.4703282292062327e-324"), Ok(0.0));
        assert_eq!(parse("2.4703282292062328e-324"), Ok(5e-324));
    }

    #[test]
    fn ties() {
        // 2^53 + 1 lies halfway between two doubles.
        assert_eq!(parse("9007199254740993"), Ok(9007199254740992.0));
        assert_eq!(parse("9007199254740995"), Ok(9007199254740996.0));
    }

    #[test]
    fn errors() {
        assert_eq!(parse(""), Err(ParseError::InputTooShort));
        assert_eq!(parse("1..1"), Err(ParseError::MalformedInput));
        assert_eq!(parse("123456789012345678"), Err(ParseError::InputTooLong));
    }
}
