//! Float-to-decimal and decimal-to-float conversion based on the Ryu family of
//! algorithms: shortest round-trip output, `%f`/`%e`-style output with an
//! explicit precision, and correctly rounded parsing.
//!
//! Everything except logging is `const fn` and allocation-free, writing into
//! caller-provided byte buffers. The lower-level writers in [`raw`] panic
//! when the buffer is too small; [`write`] checks capacity first.
//!
//! Features:
//! - `small`: recombine powers of five from a sparse table instead of
//!   storing all of them.
//! - `portable-mul`: build 64×64→128 products from 32-bit halves instead of
//!   native `u128` multiplication.

#![cfg_attr(not(test), no_std)]

mod bits;
mod buffer;
mod common;
mod d2fixed;
mod d2fixed_full_table;
mod d2s;
#[cfg_attr(feature = "small", allow(dead_code))]
mod d2s_full_table;
mod d2s_intrinsics;
#[cfg_attr(not(feature = "small"), allow(dead_code))]
mod d2s_small_table;
mod digit_table;
mod f2s;
mod f2s_intrinsics;
mod parse;
mod pow5;
mod pretty;
mod s2d;
mod s2f;

use log::trace;

pub use crate::bits::{Class, Decoded, Width};
pub use crate::buffer::{Buffer, Float, Format, FormatError, Formatted, write};
pub use crate::d2s::FloatingDecimal64;
pub use crate::f2s::FloatingDecimal32;
pub use crate::parse::ParseError;

/// Writers over caller-sized buffers, usable in constant evaluation.
///
/// Each returns the number of bytes written and panics if `out` cannot hold
/// the output. Shortest output needs at most [`MAX_SHORTEST_F64`](raw::MAX_SHORTEST_F64)
/// or [`MAX_SHORTEST_F32`](raw::MAX_SHORTEST_F32) bytes; [`fixed_len`](raw::fixed_len)
/// and [`exponential_len`](raw::exponential_len) bound the others.
pub mod raw {
    pub use crate::buffer::{exponential_len, fixed_len};
    pub use crate::d2fixed::{format_exponential, format_fixed};
    pub use crate::pretty::{
        MAX_SHORTEST_F32, MAX_SHORTEST_F64, format_shortest_f32, format_shortest_f64,
    };
}

/// Shortest `mantissa * 10^exponent` that parses back to `val`. Zero maps to
/// `0 * 10^0`; the result for infinities and NaN is unspecified.
pub const fn d2d(val: f64) -> FloatingDecimal64 {
    let decoded = Decoded::from_f64(val);
    match decoded.class() {
        Class::Zero => FloatingDecimal64 {
            mantissa: 0,
            exponent: 0,
        },
        _ => d2s::shortest(decoded.mantissa, decoded.exponent),
    }
}

/// Single-precision counterpart of [`d2d`].
pub const fn f2d(val: f32) -> FloatingDecimal32 {
    let decoded = Decoded::from_f32(val);
    match decoded.class() {
        Class::Zero => FloatingDecimal32 {
            mantissa: 0,
            exponent: 0,
        },
        _ => f2s::shortest(decoded.mantissa as u32, decoded.exponent),
    }
}

fn rejected(input: &[u8], rejection: parse::Rejection) -> ParseError {
    trace!(
        "rejected \"{}\" at byte {}: {}",
        input.escape_ascii(),
        rejection.position,
        rejection.error
    );
    rejection.error
}

/// Parses a decimal literal to the nearest double, ties to even.
///
/// At most 17 significant digits and 3 exponent digits are accepted.
/// Literals beyond the double range saturate to infinity or zero.
pub fn parse_f64(input: &[u8]) -> Result<f64, ParseError> {
    s2d::s2d(input).map_err(|rejection| rejected(input, rejection))
}

/// Parses a decimal literal to the nearest float, ties to even.
///
/// At most 9 significant digits and 3 exponent digits are accepted.
pub fn parse_f32(input: &[u8]) -> Result<f32, ParseError> {
    s2f::s2f(input).map_err(|rejection| rejected(input, rejection))
}

/// ```
/// assert_eq!(menu_ryu::parse::<f64>("1.5E1"), Ok(15.0));
/// assert_eq!(menu_ryu::parse::<f32>("-0.25"), Ok(-0.25));
/// ```
pub fn parse<F: Float>(input: &str) -> Result<F, ParseError> {
    F::parse_bytes(input.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_parts() {
        assert_eq!(d2d(0.0), FloatingDecimal64 { mantissa: 0, exponent: 0 });
        assert_eq!(d2d(-0.0), FloatingDecimal64 { mantissa: 0, exponent: 0 });
        assert_eq!(d2d(1.5e-7), FloatingDecimal64 { mantissa: 15, exponent: -8 });
        assert_eq!(d2d(2e20), FloatingDecimal64 { mantissa: 2, exponent: 20 });
        assert_eq!(f2d(0.0), FloatingDecimal32 { mantissa: 0, exponent: 0 });
        assert_eq!(f2d(-7.25), FloatingDecimal32 { mantissa: 725, exponent: -2 });
    }

    #[test]
    fn parse_entry_points() {
        assert_eq!(parse_f64(b"1e400"), Ok(f64::INFINITY));
        assert_eq!(parse_f32(b"1..1"), Err(ParseError::MalformedInput));
        assert_eq!(parse::<f64>(""), Err(ParseError::InputTooShort));
        assert_eq!(parse::<f32>("0.1"), Ok(0.1f32));
    }
}
