use menu_ryu::{Buffer, ParseError, parse_f32};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn s2f(s: &str) -> Result<f32, ParseError> {
    parse_f32(s.as_bytes())
}

#[test]
fn test_basic() {
    assert_eq!(s2f("0"), Ok(0.0));
    assert_eq!(s2f("-0").map(f32::to_bits), Ok((-0.0f32).to_bits()));
    assert_eq!(s2f("1"), Ok(1.0));
    assert_eq!(s2f("-1"), Ok(-1.0));
    assert_eq!(s2f("123456789"), Ok(123456792.0));
    assert_eq!(s2f("299792458"), Ok(299792448.0));
    assert_eq!(s2f("1.5E-3"), Ok(0.0015));
    assert_eq!(s2f(".25"), Ok(0.25));
}

#[test]
fn test_min_max() {
    assert_eq!(s2f("3.4028234664e38"), Err(ParseError::InputTooLong));
    assert_eq!(s2f("3.40282346e38"), Ok(f32::MAX));
    assert_eq!(s2f("3.4028236e38"), Ok(f32::INFINITY));
    assert_eq!(s2f("1.4e-45"), Ok(1e-45));
    assert_eq!(s2f("1.17549435E-38"), Ok(f32::MIN_POSITIVE));
}

#[test]
fn test_range() {
    assert_eq!(s2f("1e39"), Ok(f32::INFINITY));
    assert_eq!(s2f("-1e40"), Ok(f32::NEG_INFINITY));
    assert_eq!(s2f("1e-46"), Ok(0.0));
    assert_eq!(s2f("7e-46"), Ok(0.0));
    assert_eq!(s2f("8e-46"), Ok(1e-45));
}

#[test]
fn test_mantissa_rounding_overflow() {
    assert_eq!(s2f("0.999999999"), Ok(1.0));
}

#[test]
fn test_trailing_zeros() {
    assert_eq!(s2f("26843549.5"), Ok(26843550.0));
    assert_eq!(s2f("50000002.5"), Ok(50000004.0));
    assert_eq!(s2f("99999989.5"), Ok(99999992.0));
}

#[test]
fn test_errors() {
    assert_eq!(s2f(""), Err(ParseError::InputTooShort));
    assert_eq!(s2f("1234567890"), Err(ParseError::InputTooLong));
    assert_eq!(s2f("1e+"), Err(ParseError::MalformedInput));
    assert_eq!(s2f("--1"), Err(ParseError::MalformedInput));
    assert_eq!(menu_ryu::parse::<f32>("1.5"), Ok(1.5));
}

#[test]
fn test_random_literals() {
    let mut rng = StdRng::seed_from_u64(0x52f);
    for _ in 0..200_000 {
        let digits = rng.random_range(1..=9u32);
        let mantissa = rng.random_range(10u64.pow(digits - 1)..10u64.pow(digits));
        let exponent = rng.random_range(-60..=45i32);
        let s = format!("{mantissa}e{exponent}");
        let expected: f32 = s.parse().unwrap();
        assert_eq!(s2f(&s).map(f32::to_bits), Ok(expected.to_bits()), "{s}");
    }
}

#[test]
fn test_shortest_round_trip() {
    let mut rng = StdRng::seed_from_u64(0x2f5);
    let mut buffer = Buffer::new();
    for _ in 0..100_000 {
        let f = f32::from_bits(rng.random());
        if !f.is_finite() {
            continue;
        }
        let s = buffer.format(f);
        assert_eq!(s2f(s).map(f32::to_bits), Ok(f.to_bits()), "{s}");
    }
}
