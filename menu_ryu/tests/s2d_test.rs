use approx::assert_ulps_eq;
use menu_ryu::raw::{format_exponential, format_fixed};
use menu_ryu::{Buffer, ParseError, parse_f64};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn s2d(s: &str) -> Result<f64, ParseError> {
    parse_f64(s.as_bytes())
}

/// A literal with up to `max_digits` significant digits, a decimal point in
/// the mantissa and an optional exponent.
fn random_literal(rng: &mut StdRng, max_digits: u32, exponents: std::ops::RangeInclusive<i32>) -> String {
    let count = rng.random_range(1..=max_digits) as usize;
    let mut s = String::new();
    if rng.random_bool(0.3) {
        s.push('-');
    }
    for i in 0..count {
        let low = if i == 0 { b'1' } else { b'0' };
        s.push(rng.random_range(low..=b'9') as char);
    }
    if rng.random_bool(0.5) {
        let dot = s.len() - rng.random_range(0..=count);
        s.insert(dot, '.');
    }
    if rng.random_bool(0.8) {
        let e = rng.random_range(exponents);
        s.push_str(&format!("e{e}"));
    }
    s
}

#[test]
fn test_basic() {
    assert_eq!(s2d("0"), Ok(0.0));
    assert_eq!(s2d("-0"), Ok(-0.0));
    assert_eq!(s2d("1"), Ok(1.0));
    assert_eq!(s2d("+1"), Ok(1.0));
    assert_eq!(s2d("-1"), Ok(-1.0));
    assert_eq!(s2d("1.5"), Ok(1.5));
    assert_eq!(s2d(".5"), Ok(0.5));
    assert_eq!(s2d("5."), Ok(5.0));
    assert_eq!(s2d("123456789"), Ok(123456789.0));
    assert_eq!(s2d("1E1"), Ok(10.0));
    assert_eq!(s2d("1e+1"), Ok(10.0));
    assert_eq!(s2d("1.5E-3"), Ok(0.0015));
    assert_eq!(s2d("299792458"), Ok(299792458.0));
    assert_eq!(s2d("3.14159265358979"), Ok(3.14159265358979));
}

#[test]
fn test_min_max() {
    assert_eq!(s2d("1.7976931348623157e308"), Ok(1.7976931348623157e308));
    assert_eq!(s2d("5E-324"), Ok(5e-324));
    assert_eq!(s2d("2.2250738585072011e-308"), Ok(2.2250738585072011e-308));
}

#[test]
fn test_mantissa_rounding_overflow() {
    // All-ones binary mantissa rounds up into the next binade.
    assert_eq!(s2d("0.99999999999999999"), Ok(1.0));
    // Carries out of the exponent too.
    assert_eq!(s2d("1.7976931348623159e308"), Ok(f64::INFINITY));
}

#[test]
fn test_underflow() {
    assert_eq!(s2d("2.4e-324"), Ok(0.0));
    assert_eq!(s2d("1e-324"), Ok(0.0));
    assert_eq!(s2d("9.99999e-325"), Ok(0.0));
    // Either side of half the smallest subnormal.
    assert_eq!(s2d("2.4703282292062327e-324"), Ok(0.0));
    assert_eq!(s2d("2.4703282292062328e-324"), Ok(5e-324));
}

#[test]
fn test_overflow() {
    assert_eq!(s2d("2e308"), Ok(f64::INFINITY));
    assert_eq!(s2d("1e309"), Ok(f64::INFINITY));
    assert_eq!(s2d("-1e999"), Ok(f64::NEG_INFINITY));
}

#[test]
fn test_table_size_denormal() {
    assert_eq!(s2d("4.9406564584124654e-324"), Ok(5e-324));
}

#[test]
fn test_issue157() {
    assert_eq!(
        s2d("1.2999999999999999E+154"),
        Ok(1.2999999999999999e154)
    );
}

#[test]
fn test_errors() {
    assert_eq!(s2d(""), Err(ParseError::InputTooShort));
    assert_eq!(s2d("."), Err(ParseError::MalformedInput));
    assert_eq!(s2d("-"), Err(ParseError::MalformedInput));
    assert_eq!(s2d("e5"), Err(ParseError::MalformedInput));
    assert_eq!(s2d("1e"), Err(ParseError::MalformedInput));
    assert_eq!(s2d("1e+"), Err(ParseError::MalformedInput));
    assert_eq!(s2d("1.2.3"), Err(ParseError::MalformedInput));
    assert_eq!(s2d("1,5"), Err(ParseError::MalformedInput));
    assert_eq!(s2d("NaN"), Err(ParseError::MalformedInput));
    assert_eq!(s2d("Infinity"), Err(ParseError::MalformedInput));
    assert_eq!(s2d("123456789012345678"), Err(ParseError::InputTooLong));
    assert_eq!(s2d("1e1000"), Err(ParseError::InputTooLong));
    // Leading zeros are not significant.
    assert_eq!(s2d("000000000000000000001"), Ok(1.0));
    assert_eq!(s2d("0.000000000000000000001"), Ok(1e-21));
    assert_eq!(s2d("1e-0000000001"), Ok(0.1));
}

#[test]
fn test_error_display() {
    assert_eq!(ParseError::InputTooShort.to_string(), "input is empty");
    assert_eq!(ParseError::InputTooLong.to_string(), "too many significant digits");
    assert_eq!(ParseError::MalformedInput.to_string(), "malformed decimal literal");
}

#[test]
fn test_generic() {
    assert_eq!(menu_ryu::parse::<f64>("2.5e-3"), Ok(0.0025));
    assert_eq!(menu_ryu::parse::<f64>("x"), Err(ParseError::MalformedInput));
}

#[test]
fn test_random_literals() {
    let mut rng = StdRng::seed_from_u64(0x52d);
    for _ in 0..200_000 {
        let s = random_literal(&mut rng, 17, -345..=330);
        let expected: f64 = s.parse().unwrap();
        assert_eq!(s2d(&s).map(f64::to_bits), Ok(expected.to_bits()), "{s}");
    }
}

#[test]
fn test_shortest_round_trip() {
    let mut rng = StdRng::seed_from_u64(0x2d5);
    let mut buffer = Buffer::new();
    for _ in 0..100_000 {
        let f = f64::from_bits(rng.random());
        if !f.is_finite() {
            continue;
        }
        let s = buffer.format(f);
        assert_eq!(s2d(s).map(f64::to_bits), Ok(f.to_bits()), "{s}");
    }
}

#[test]
fn test_exponential_round_trip() {
    // 17 significant digits identify every double.
    let mut rng = StdRng::seed_from_u64(0xe17);
    let mut bytes = [0u8; 32];
    for _ in 0..50_000 {
        let f = f64::from_bits(rng.random());
        if !f.is_finite() {
            continue;
        }
        let n = format_exponential(f, 16, &mut bytes);
        let s = std::str::from_utf8(&bytes[..n]).unwrap();
        assert_eq!(s2d(s).map(f64::to_bits), Ok(f.to_bits()), "{s}");
    }
}

#[test]
fn test_fixed_round_trip() {
    // Below one, 17 fractional digits are at most 17 significant digits.
    let mut rng = StdRng::seed_from_u64(0xf17);
    let mut bytes = [0u8; 32];
    for _ in 0..50_000 {
        let f: f64 = rng.random_range(0.1..1.0);
        let f = if rng.random_bool(0.5) { -f } else { f };
        let n = format_fixed(f, 17, &mut bytes);
        let s = std::str::from_utf8(&bytes[..n]).unwrap();
        let parsed = s2d(s).unwrap();
        assert_ulps_eq!(parsed, f, max_ulps = 1);
    }
}
