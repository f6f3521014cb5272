use menu_ryu::raw::{exponential_len, fixed_len, format_exponential, format_fixed};
use menu_ryu::{Format, FormatError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn fixed(f: f64, precision: u32) -> String {
    let mut bytes = vec![0u8; fixed_len(f, precision)];
    let n = format_fixed(f, precision, &mut bytes);
    assert!(n <= bytes.len());
    String::from_utf8(bytes[..n].to_vec()).unwrap()
}

fn exponential(f: f64, precision: u32) -> String {
    let mut bytes = vec![0u8; exponential_len(f, precision)];
    let n = format_exponential(f, precision, &mut bytes);
    assert!(n <= bytes.len());
    String::from_utf8(bytes[..n].to_vec()).unwrap()
}

/// std prints `1.25e-7`; rewrite that as `1.25e-07`.
fn std_exponential(f: f64, precision: usize) -> String {
    let s = format!("{f:.precision$e}");
    let (mantissa, exponent) = s.split_once('e').unwrap();
    let exponent: i32 = exponent.parse().unwrap();
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exponent.abs())
}

#[test]
fn test_basic() {
    assert_eq!(fixed(0.0, 0), "0");
    assert_eq!(fixed(1.0, 0), "1");
    assert_eq!(fixed(1.5, 1), "1.5");
    assert_eq!(fixed(-1.5, 3), "-1.500");
    assert_eq!(fixed(123456789.0, 2), "123456789.00");
    assert_eq!(fixed(0.1, 20), "0.10000000000000000555");
    assert_eq!(exponential(0.0, 0), "0e+00");
    assert_eq!(exponential(1.0, 0), "1e+00");
    assert_eq!(exponential(1.5, 3), "1.500e+00");
    assert_eq!(exponential(-0.001234, 2), "-1.23e-03");
    assert_eq!(exponential(1e100, 1), "1.0e+100");
    assert_eq!(exponential(1e-100, 1), "1.0e-100");
}

#[test]
fn test_non_finite() {
    assert_eq!(fixed(f64::NAN, 2), "NaN");
    assert_eq!(fixed(f64::INFINITY, 2), "Infinity");
    assert_eq!(fixed(f64::NEG_INFINITY, 0), "-Infinity");
    assert_eq!(exponential(f64::NAN, 2), "NaN");
    assert_eq!(exponential(f64::NEG_INFINITY, 5), "-Infinity");
}

#[test]
fn test_round_half_even() {
    assert_eq!(fixed(0.5, 0), "0");
    assert_eq!(fixed(1.5, 0), "2");
    assert_eq!(fixed(2.5, 0), "2");
    assert_eq!(fixed(0.125, 2), "0.12");
    assert_eq!(fixed(0.625, 2), "0.62");
    assert_eq!(fixed(0.875, 2), "0.88");
    // 2.675 is slightly below the tie once stored.
    assert_eq!(fixed(2.675, 2), "2.67");
    assert_eq!(exponential(2.5, 0), "2e+00");
    assert_eq!(exponential(3.5, 0), "4e+00");
    assert_eq!(exponential(1.125, 2), "1.12e+00");
}

#[test]
fn test_carry() {
    assert_eq!(fixed(9.5, 0), "10");
    assert_eq!(fixed(99.96, 1), "100.0");
    assert_eq!(fixed(0.0996, 3), "0.100");
    assert_eq!(fixed(999999999.5, 0), "1000000000");
    assert_eq!(exponential(9.5, 0), "1e+01");
    assert_eq!(exponential(99.96, 2), "1.00e+02");
    assert_eq!(exponential(9.9999e-100, 2), "1.00e-99");
}

#[test]
fn test_extremes() {
    assert_eq!(fixed(5e-324, 3), "0.000");
    assert_eq!(
        fixed(5e-324, 1074).trim_end_matches('0'),
        format!("{:.1074}", 5e-324).trim_end_matches('0')
    );
    assert_eq!(fixed(f64::MAX, 0), format!("{:.0}", f64::MAX));
    assert_eq!(exponential(5e-324, 750), std_exponential(5e-324, 750));
    assert_eq!(exponential(f64::MAX, 308), std_exponential(f64::MAX, 308));
}

#[test]
fn test_precision_sweep() {
    for &f in &[
        0.1,
        1.0 / 3.0,
        2.0 / 3.0,
        std::f64::consts::PI,
        1e21,
        1.7976931348623157e308,
        2.2250738585072014e-308,
        123456.789,
        -0.000123,
    ] {
        for precision in 0..40 {
            assert_eq!(fixed(f, precision), format!("{:.*}", precision as usize, f));
            assert_eq!(exponential(f, precision), std_exponential(f, precision as usize));
        }
    }
}

#[test]
fn test_random() {
    let mut rng = StdRng::seed_from_u64(0xf1c);
    for _ in 0..20_000 {
        let f = f64::from_bits(rng.random());
        if !f.is_finite() {
            continue;
        }
        let precision = rng.random_range(0..30u32);
        assert_eq!(fixed(f, precision), format!("{:.*}", precision as usize, f), "{f:e}");
        assert_eq!(
            exponential(f, precision),
            std_exponential(f, precision as usize),
            "{f:e}"
        );
    }
}

#[test]
fn test_random_moderate() {
    // Values around 1 exercise both sides of the decimal point.
    let mut rng = StdRng::seed_from_u64(0xa11);
    for _ in 0..50_000 {
        let f: f64 = rng.random_range(-1e6..1e6);
        let precision = rng.random_range(0..20u32);
        assert_eq!(fixed(f, precision), format!("{:.*}", precision as usize, f));
        assert_eq!(exponential(f, precision), std_exponential(f, precision as usize));
    }
}

#[test]
fn test_length_bounds() {
    let mut rng = StdRng::seed_from_u64(0x1e9);
    for _ in 0..20_000 {
        let f = f64::from_bits(rng.random());
        let precision = rng.random_range(0..25u32);
        assert!(fixed(f, precision).len() <= fixed_len(f, precision));
        assert!(exponential(f, precision).len() <= exponential_len(f, precision));
    }
}

#[test]
fn test_write() -> Result<(), FormatError> {
    let mut out = [0u8; 32];
    assert_eq!(menu_ryu::write(1.5f64, Format::Fixed(2), &mut out)?, "1.50");
    assert_eq!(menu_ryu::write(1.5f32, Format::Exponential(1), &mut out)?, "1.5e+00");
    assert_eq!(menu_ryu::write(-2.5f64, Format::Shortest, &mut out)?, "-2.5E0");

    let mut small = [0u8; 4];
    assert!(matches!(
        menu_ryu::write(1e10f64, Format::Fixed(0), &mut small),
        Err(FormatError::BufferTooSmall { capacity: 4, .. })
    ));
    Ok(())
}
