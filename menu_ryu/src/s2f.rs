use crate::common::*;
use crate::f2s_intrinsics::{
    mul_pow5_div_pow2, mul_pow5_inv_div_pow2, multiple_of_power_of_2_32, multiple_of_power_of_5_32,
};
use crate::parse::{Literal, Rejection, scan};

/// Most significant decimal digits accepted for a float.
pub const MAX_DIGITS: u32 = 9;

/// Nearest float to the decimal literal, ties to even.
pub const fn s2f(input: &[u8]) -> Result<f32, Rejection> {
    match scan(input, MAX_DIGITS) {
        Ok(literal) => Ok(f32::from_bits(literal_to_bits(literal))),
        Err(rejection) => Err(rejection),
    }
}

const fn literal_to_bits(literal: Literal) -> u32 {
    let sign = (literal.negative as u32) << (FLOAT_MANTISSA_BITS + FLOAT_EXPONENT_BITS);
    let infinity = sign | (((1u32 << FLOAT_EXPONENT_BITS) - 1) << FLOAT_MANTISSA_BITS);
    // At most 9 digits, so this fits.
    let m10 = literal.mantissa as u32;
    let e10 = literal.exponent;

    // The smallest subnormal is about 1.4e-45 and the largest float about
    // 3.4e38.
    if m10 == 0 || literal.digits as i32 + e10 <= -46 {
        return sign;
    }
    if literal.digits as i32 + e10 >= 40 {
        return infinity;
    }

    let (e2, m2, mut trailing_zeros) = if e10 >= 0 {
        let e2 = floor_log2_32(m10) as i32 + e10 + log2_pow5(e10) - (FLOAT_MANTISSA_BITS as i32 + 1);
        // [m10 * 10^e10 / 2^e2] = [m10 * 5^e10 / 2^(e2-e10)]
        let j = e2 - e10 - ceil_log2_pow5(e10) + FLOAT_POW5_BITCOUNT;
        let m2 = mul_pow5_div_pow2(m10, e10 as u32, j);
        let trailing_zeros = e2 < e10
            || (e2 - e10 < 32 && multiple_of_power_of_2_32(m10, (e2 - e10) as u32));
        (e2, m2, trailing_zeros)
    } else {
        let e2 = floor_log2_32(m10) as i32 + e10
            - ceil_log2_pow5(-e10)
            - (FLOAT_MANTISSA_BITS as i32 + 1);
        // [m10 * 10^e10 / 2^e2] = [m10 / (5^(-e10) 2^(e2-e10))]
        let j = e2 - e10 + ceil_log2_pow5(-e10) - 1 + FLOAT_POW5_INV_BITCOUNT;
        let m2 = mul_pow5_inv_div_pow2(m10, (-e10) as u32, j);
        // Exact only if both the power of 5 and the power of 2 divide m10.
        let trailing_zeros = (e2 < e10
            || (e2 - e10 < 32 && multiple_of_power_of_2_32(m10, (e2 - e10) as u32)))
            && multiple_of_power_of_5_32(m10, (-e10) as u32);
        (e2, m2, trailing_zeros)
    };

    let mut ieee_e2 = e2 + FLOAT_BIAS + floor_log2_32(m2) as i32;
    if ieee_e2 < 0 {
        ieee_e2 = 0;
    }
    if ieee_e2 > 0xfe {
        return infinity;
    }

    let shift = (if ieee_e2 == 0 { 1 } else { ieee_e2 }) - e2 - FLOAT_BIAS - FLOAT_MANTISSA_BITS as i32;
    debug_assert!(shift > 0 && shift < 32);

    trailing_zeros &= (m2 & ((1u32 << (shift - 1)) - 1)) == 0;
    let last_removed_bit = (m2 >> (shift - 1)) & 1;
    let round_up = last_removed_bit != 0 && (!trailing_zeros || ((m2 >> shift) & 1) != 0);

    let mut ieee_m2 = (m2 >> shift) + round_up as u32;
    debug_assert!(ieee_m2 <= 1u32 << (FLOAT_MANTISSA_BITS + 1));
    ieee_m2 &= (1u32 << FLOAT_MANTISSA_BITS) - 1;
    if ieee_m2 == 0 && round_up {
        ieee_e2 += 1;
    }

    sign | ((ieee_e2 as u32) << FLOAT_MANTISSA_BITS) | ieee_m2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::ParseError;

    fn parse(s: &str) -> Result<f32, ParseError> {
        s2f(s.as_bytes()).map_err(|r| r.error)
    }

    #[test]
    fn basic() {
        assert_eq!(parse("1.5E1"), Ok(15.0));
        assert_eq!(parse("0.1"), Ok(0.1));
        assert_eq!(parse("3.4028235e38"), Ok(f32::MAX));
        assert_eq!(parse("1e-45"), Ok(f32::from_bits(1)));
        assert_eq!(parse("1e39"), Ok(f32::INFINITY));
        assert_eq!(parse("1e-50"), Ok(0.0));
    }

    #[test]
    fn exactness_with_fraction() {
        // The truncated quotient ends in a lone half bit, but 792130935 is
        // not a multiple of 4, so this is not an exact tie.
        assert_eq!(parse("792130935e-1"), Ok(79213096.0));
        assert_eq!(parse("79213093.5"), Ok(79213096.0));
    }

    #[test]
    fn errors() {
        assert_eq!(parse("1234567890"), Err(ParseError::InputTooLong));
        assert_eq!(parse("1.2.3"), Err(ParseError::MalformedInput));
    }
}
