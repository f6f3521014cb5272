use core::fmt;

use log::debug;

use crate::bits::{Class, Decoded};
use crate::common::decimal_length17;
use crate::d2fixed::{format_exponential, format_fixed};
use crate::parse::ParseError;
use crate::pretty::{MAX_SHORTEST_F32, MAX_SHORTEST_F64, format_shortest_f32, format_shortest_f64};
use crate::{d2s, parse_f32, parse_f64};

/// Output mode for [`write`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// Fewest digits that parse back to the same value, as `D[.DDD]E<exp>`.
    #[default]
    Shortest,
    /// Exactly this many digits after the decimal point.
    Fixed(u32),
    /// `D.DDDe±DD` with exactly this many digits after the decimal point.
    Exponential(u32),
}

#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum FormatError {
    #[error("output needs up to {needed} bytes but the buffer holds {capacity}")]
    BufferTooSmall { needed: usize, capacity: usize },
}

mod private {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// A floating point type this crate can format and parse.
///
/// This trait is sealed and cannot be implemented for types outside of
/// `menu_ryu`.
pub trait Float: private::Sealed + Copy {
    /// Longest possible shortest-form output.
    const MAX_SHORTEST_LEN: usize;

    #[doc(hidden)]
    fn write_shortest(self, out: &mut [u8]) -> usize;

    /// Exact conversion used by the fixed and exponential formatters.
    #[doc(hidden)]
    fn widen(self) -> f64;

    #[doc(hidden)]
    fn parse_bytes(input: &[u8]) -> Result<Self, ParseError>;
}

impl Float for f32 {
    const MAX_SHORTEST_LEN: usize = MAX_SHORTEST_F32;

    fn write_shortest(self, out: &mut [u8]) -> usize {
        format_shortest_f32(self, out)
    }

    fn widen(self) -> f64 {
        self as f64
    }

    fn parse_bytes(input: &[u8]) -> Result<Self, ParseError> {
        parse_f32(input)
    }
}

impl Float for f64 {
    const MAX_SHORTEST_LEN: usize = MAX_SHORTEST_F64;

    fn write_shortest(self, out: &mut [u8]) -> usize {
        format_shortest_f64(self, out)
    }

    fn widen(self) -> f64 {
        self
    }

    fn parse_bytes(input: &[u8]) -> Result<Self, ParseError> {
        parse_f64(input)
    }
}

const fn ascii(bytes: &[u8]) -> &str {
    // SAFETY: every formatter in this crate writes ASCII only.
    unsafe { core::str::from_utf8_unchecked(bytes) }
}

/// Safe API for formatting floating point numbers to text in the shortest
/// round-trip form.
///
/// ## Example
///
/// ```
/// let mut buffer = menu_ryu::Buffer::new();
/// let printed = buffer.format(1.234);
/// assert_eq!(printed, "1.234E0");
/// ```
#[derive(Copy, Clone)]
pub struct Buffer {
    bytes: [u8; MAX_SHORTEST_F64],
}

impl Buffer {
    /// This is a cheap operation; you don't need to worry about reusing
    /// buffers for efficiency.
    pub const fn new() -> Self {
        Buffer {
            bytes: [0; MAX_SHORTEST_F64],
        }
    }

    /// Print a floating point number into this buffer and return a reference
    /// to its string representation within the buffer.
    pub fn format<F: Float>(&mut self, f: F) -> &str {
        let len = f.write_shortest(&mut self.bytes);
        ascii(&self.bytes[..len])
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Buffer::new()
    }
}

/// Text produced in constant evaluation.
///
/// ```
/// use menu_ryu::Formatted;
///
/// const RATE: Formatted<8> = Formatted::fixed(0.0725, 3);
/// assert_eq!(RATE.as_str(), "0.072");
/// ```
///
/// The capacity `N` must hold the output; in a `const` item an undersized
/// `N` is a compile error.
#[derive(Copy, Clone)]
pub struct Formatted<const N: usize> {
    bytes: [u8; N],
    len: usize,
}

impl<const N: usize> Formatted<N> {
    pub const fn shortest_f64(value: f64) -> Self {
        let mut bytes = [0; N];
        let len = format_shortest_f64(value, &mut bytes);
        Formatted { bytes, len }
    }

    pub const fn shortest_f32(value: f32) -> Self {
        let mut bytes = [0; N];
        let len = format_shortest_f32(value, &mut bytes);
        Formatted { bytes, len }
    }

    pub const fn fixed(value: f64, precision: u32) -> Self {
        let mut bytes = [0; N];
        let len = format_fixed(value, precision, &mut bytes);
        Formatted { bytes, len }
    }

    pub const fn exponential(value: f64, precision: u32) -> Self {
        let mut bytes = [0; N];
        let len = format_exponential(value, precision, &mut bytes);
        Formatted { bytes, len }
    }

    pub const fn as_bytes(&self) -> &[u8] {
        self.bytes.split_at(self.len).0
    }

    pub const fn as_str(&self) -> &str {
        ascii(self.as_bytes())
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<const N: usize> fmt::Display for Formatted<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<const N: usize> fmt::Debug for Formatted<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

/// Decimal exponent of the leading digit of the shortest representation.
/// It is never below the exact value's.
fn leading_exponent(decoded: Decoded) -> i32 {
    let v = d2s::shortest(decoded.mantissa, decoded.exponent);
    v.exponent + decimal_length17(v.mantissa) as i32 - 1
}

fn special_len(decoded: Decoded) -> Option<usize> {
    match decoded.class() {
        Class::Nan => Some("NaN".len()),
        Class::Infinite => Some("Infinity".len() + decoded.sign as usize),
        _ => None,
    }
}

/// Upper bound on the length of [`format_fixed`] output. Exact except when
/// rounding might have added an integer digit.
pub fn fixed_len(value: f64, precision: u32) -> usize {
    let decoded = Decoded::from_f64(value);
    if let Some(len) = special_len(decoded) {
        return len;
    }
    let fraction = if precision > 0 {
        (precision as usize).saturating_add(1)
    } else {
        0
    };
    let integer = match decoded.class() {
        Class::Zero => 1,
        // Rounding can carry into one more digit, as in 9.99 -> 10.0.
        _ => (leading_exponent(decoded) + 2).max(1) as usize,
    };
    (decoded.sign as usize + integer).saturating_add(fraction)
}

/// Upper bound on the length of [`format_exponential`] output.
pub fn exponential_len(value: f64, precision: u32) -> usize {
    let decoded = Decoded::from_f64(value);
    if let Some(len) = special_len(decoded) {
        return len;
    }
    let fraction = if precision > 0 {
        (precision as usize).saturating_add(1)
    } else {
        0
    };
    let exponent_digits = match decoded.class() {
        Class::Zero => 2,
        _ => {
            // The printed exponent is the exact one or one above it.
            let e = leading_exponent(decoded);
            if !(-98..99).contains(&e) { 3 } else { 2 }
        }
    };
    // Leading digit, 'e', exponent sign.
    (decoded.sign as usize + 3 + exponent_digits).saturating_add(fraction)
}

fn check_capacity(needed: usize, capacity: usize) -> Result<(), FormatError> {
    if needed > capacity {
        debug!("formatted value needs up to {needed} bytes, buffer holds {capacity}");
        return Err(FormatError::BufferTooSmall { needed, capacity });
    }
    Ok(())
}

/// Formats `value` into `out` and returns the written text.
///
/// Unlike the functions in [`raw`](crate::raw), this checks the capacity
/// first and leaves `out` untouched when it is too small. `f32` values are
/// widened exactly for [`Format::Fixed`] and [`Format::Exponential`].
pub fn write<F: Float>(value: F, format: Format, out: &mut [u8]) -> Result<&str, FormatError> {
    let len = match format {
        Format::Shortest => {
            let mut scratch = [0u8; MAX_SHORTEST_F64];
            let len = value.write_shortest(&mut scratch);
            check_capacity(len, out.len())?;
            out[..len].copy_from_slice(&scratch[..len]);
            len
        }
        Format::Fixed(precision) => {
            let value = value.widen();
            check_capacity(fixed_len(value, precision), out.len())?;
            format_fixed(value, precision, out)
        }
        Format::Exponential(precision) => {
            let value = value.widen();
            check_capacity(exponential_len(value, precision), out.len())?;
            format_exponential(value, precision, out)
        }
    };
    Ok(ascii(&out[..len]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer() {
        let mut buffer = Buffer::new();
        assert_eq!(buffer.format(1.5f64), "1.5E0");
        assert_eq!(buffer.format(0.1f32), "1E-1");
        assert_eq!(buffer.format(f64::MIN), "-1.7976931348623157E308");
    }

    #[test]
    fn formatted_in_const() {
        const SHORT: Formatted<24> = Formatted::shortest_f64(-0.0);
        const SINGLE: Formatted<15> = Formatted::shortest_f32(3.0e-5);
        const FIXED: Formatted<8> = Formatted::fixed(2.5, 0);
        const EXP: Formatted<12> = Formatted::exponential(1234.5, 3);
        assert_eq!(SHORT.as_str(), "-0E0");
        assert_eq!(SINGLE.as_str(), "3E-5");
        assert_eq!(FIXED.as_str(), "2");
        assert_eq!(EXP.as_str(), "1.234e+03");
        assert_eq!(EXP.len(), 9);
        assert_eq!(format!("{FIXED}"), "2");
    }

    #[test]
    fn const_matches_runtime() {
        for value in [0.3, -1e-300, 123456.789, f64::MAX, 5e-324] {
            let mut buf = [0u8; 24];
            let len = format_shortest_f64(value, &mut buf);
            assert_eq!(Formatted::<24>::shortest_f64(value).as_bytes(), &buf[..len]);
        }
    }

    #[test]
    fn write_each_format() -> Result<(), FormatError> {
        let mut out = [0u8; 32];
        assert_eq!(write(15.0f64, Format::Shortest, &mut out)?, "1.5E1");
        assert_eq!(write(2.5f64, Format::Fixed(2), &mut out)?, "2.50");
        assert_eq!(write(0.1f32, Format::Fixed(10), &mut out)?, "0.1000000015");
        assert_eq!(write(-9.99f64, Format::Exponential(1), &mut out)?, "-1.0e+01");
        assert_eq!(write(f64::NAN, Format::Exponential(3), &mut out)?, "NaN");
        Ok(())
    }

    #[test]
    fn write_rejects_small_buffers() {
        let mut out = [b'#'; 4];
        assert_eq!(
            write(1.5f64, Format::Shortest, &mut out),
            Err(FormatError::BufferTooSmall {
                needed: 5,
                capacity: 4
            })
        );
        assert_eq!(out, [b'#'; 4]);

        assert!(write(1.5f64, Format::Fixed(3), &mut out).is_err());
        assert!(write(1.5f64, Format::Exponential(0), &mut out).is_err());
        assert_eq!(out, [b'#'; 4]);

        assert_eq!(write(1.5f64, Format::Fixed(1), &mut out), Ok("1.5"));
    }

    #[test]
    fn length_bounds() {
        for (value, precision) in [
            (0.9999, 3),
            (9.99, 1),
            (-123.456, 0),
            (1e-100, 2),
            (9.9999e-100, 1),
            (1e100, 0),
            (f64::MAX, 4),
            (5e-324, 3),
            (0.0, 5),
        ] {
            let mut out = [0u8; 400];
            let fixed = format_fixed(value, precision, &mut out);
            assert!(fixed <= fixed_len(value, precision), "{value} {precision}");
            let exponential = format_exponential(value, precision, &mut out);
            assert!(exponential <= exponential_len(value, precision), "{value} {precision}");
        }
    }
}
