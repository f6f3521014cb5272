//! Raw IEEE-754 field access.
//!
//! `to_bits`/`from_bits` are `const`, so the same exact reinterpretation is
//! used at compile time and at runtime. Signed zeros and NaN payloads survive
//! both.

use crate::common::{
    DOUBLE_EXPONENT_BITS, DOUBLE_MANTISSA_BITS, FLOAT_EXPONENT_BITS, FLOAT_MANTISSA_BITS,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Width {
    Single,
    Double,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Class {
    Zero,
    Subnormal,
    Normal,
    Infinite,
    Nan,
}

/// The sign, biased exponent field and mantissa field of a float, without
/// the implicit leading bit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Decoded {
    pub sign: bool,
    pub exponent: u32,
    pub mantissa: u64,
    pub width: Width,
}

impl Decoded {
    pub const fn from_bits64(bits: u64) -> Self {
        Decoded {
            sign: (bits >> (DOUBLE_MANTISSA_BITS + DOUBLE_EXPONENT_BITS)) != 0,
            exponent: (bits >> DOUBLE_MANTISSA_BITS) as u32 & ((1 << DOUBLE_EXPONENT_BITS) - 1),
            mantissa: bits & ((1 << DOUBLE_MANTISSA_BITS) - 1),
            width: Width::Double,
        }
    }

    pub const fn from_bits32(bits: u32) -> Self {
        Decoded {
            sign: (bits >> (FLOAT_MANTISSA_BITS + FLOAT_EXPONENT_BITS)) != 0,
            exponent: (bits >> FLOAT_MANTISSA_BITS) & ((1 << FLOAT_EXPONENT_BITS) - 1),
            mantissa: (bits & ((1 << FLOAT_MANTISSA_BITS) - 1)) as u64,
            width: Width::Single,
        }
    }

    pub const fn from_f64(value: f64) -> Self {
        Self::from_bits64(value.to_bits())
    }

    pub const fn from_f32(value: f32) -> Self {
        Self::from_bits32(value.to_bits())
    }

    pub const fn mantissa_bits(self) -> u32 {
        match self.width {
            Width::Single => FLOAT_MANTISSA_BITS,
            Width::Double => DOUBLE_MANTISSA_BITS,
        }
    }

    pub const fn exponent_bits(self) -> u32 {
        match self.width {
            Width::Single => FLOAT_EXPONENT_BITS,
            Width::Double => DOUBLE_EXPONENT_BITS,
        }
    }

    /// Reassembles the bit pattern. Single-width patterns occupy the low 32 bits.
    pub const fn to_bits(self) -> u64 {
        let mantissa_bits = self.mantissa_bits();
        ((self.sign as u64) << (mantissa_bits + self.exponent_bits()))
            | ((self.exponent as u64) << mantissa_bits)
            | self.mantissa
    }

    /// Exact for both widths.
    pub const fn to_f64(self) -> f64 {
        match self.width {
            Width::Single => f32::from_bits(self.to_bits() as u32) as f64,
            Width::Double => f64::from_bits(self.to_bits()),
        }
    }

    /// Rounds to nearest when the source is double width.
    pub const fn to_f32(self) -> f32 {
        match self.width {
            Width::Single => f32::from_bits(self.to_bits() as u32),
            Width::Double => f64::from_bits(self.to_bits()) as f32,
        }
    }

    pub const fn class(self) -> Class {
        let max_exponent = (1u32 << self.exponent_bits()) - 1;
        if self.exponent == max_exponent {
            if self.mantissa == 0 {
                Class::Infinite
            } else {
                Class::Nan
            }
        } else if self.exponent == 0 {
            if self.mantissa == 0 {
                Class::Zero
            } else {
                Class::Subnormal
            }
        } else {
            Class::Normal
        }
    }

    pub const fn is_finite(self) -> bool {
        !matches!(self.class(), Class::Infinite | Class::Nan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify() {
        assert_eq!(Decoded::from_f64(0.0).class(), Class::Zero);
        assert_eq!(Decoded::from_f64(-0.0).class(), Class::Zero);
        assert_eq!(Decoded::from_f64(5e-324).class(), Class::Subnormal);
        assert_eq!(Decoded::from_f64(1.0).class(), Class::Normal);
        assert_eq!(Decoded::from_f64(f64::NEG_INFINITY).class(), Class::Infinite);
        assert_eq!(Decoded::from_f64(f64::NAN).class(), Class::Nan);
        assert_eq!(Decoded::from_f32(f32::MIN_POSITIVE / 2.0).class(), Class::Subnormal);
        assert_eq!(Decoded::from_f32(f32::INFINITY).class(), Class::Infinite);
    }

    #[test]
    fn fields() {
        let d = Decoded::from_f64(-1.5);
        assert!(d.sign);
        assert_eq!(d.exponent, 1023);
        assert_eq!(d.mantissa, 1 << 51);

        let f = Decoded::from_f32(2.0);
        assert!(!f.sign);
        assert_eq!(f.exponent, 128);
        assert_eq!(f.mantissa, 0);
    }

    #[test]
    fn lossless() {
        for bits in [0u64, 1 << 63, 0x7ff8_0000_0000_0001, 0xfff8_dead_beef_0000, 0x3ff0_0000_0000_0000] {
            assert_eq!(Decoded::from_bits64(bits).to_bits(), bits);
            assert_eq!(Decoded::from_bits64(bits).to_f64().to_bits(), bits);
        }
        for bits in [0u32, 1 << 31, 0x7fc0_0001, 0xffc0_1234, 1] {
            assert_eq!(Decoded::from_bits32(bits).to_bits(), bits as u64);
            assert_eq!(Decoded::from_bits32(bits).to_f32().to_bits(), bits);
        }
        assert_eq!(Decoded::from_f32(0.1).to_f64(), 0.1f32 as f64);
    }

    #[test]
    fn signed_zero_in_const() {
        const NEG: Decoded = Decoded::from_f64(-0.0);
        const POS: Decoded = Decoded::from_f64(0.0);
        assert!(NEG.sign);
        assert!(!POS.sign);
    }
}
