//! Seeded random checks against the standard library's float formatting and
//! parsing, which are exact.

use anyhow::{Result, ensure};
use menu_ryu::raw::{exponential_len, fixed_len};
use menu_ryu::{Buffer, Format};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Shortest output of random doubles parses back to the same bits, both
/// with `menu_ryu` and with std.
pub fn shortest_f64(seed: u64, iterations: usize) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut buffer = Buffer::new();
    for _ in 0..iterations {
        let value = f64::from_bits(rng.random());
        if !value.is_finite() {
            continue;
        }
        let s = buffer.format(value);
        ensure!(s.parse::<f64>()?.to_bits() == value.to_bits(), "std parsed {s} differently");
        ensure!(
            menu_ryu::parse_f64(s.as_bytes())?.to_bits() == value.to_bits(),
            "{s} did not round-trip"
        );
    }
    Ok(())
}

pub fn shortest_f32(seed: u64, iterations: usize) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut buffer = Buffer::new();
    for _ in 0..iterations {
        let value = f32::from_bits(rng.random());
        if !value.is_finite() {
            continue;
        }
        let s = buffer.format(value);
        ensure!(s.parse::<f32>()?.to_bits() == value.to_bits(), "std parsed {s} differently");
        ensure!(
            menu_ryu::parse_f32(s.as_bytes())?.to_bits() == value.to_bits(),
            "{s} did not round-trip"
        );
    }
    Ok(())
}

/// std writes `1.5e-7` where `menu_ryu` writes `1.5e-07`.
fn std_exponential(value: f64, precision: usize) -> Result<String> {
    let s = format!("{value:.precision$e}");
    let (mantissa, exponent) = s.split_once('e').unwrap_or((s.as_str(), "0"));
    let exponent: i32 = exponent.parse()?;
    let sign = if exponent < 0 { '-' } else { '+' };
    Ok(format!("{mantissa}e{sign}{:02}", exponent.abs()))
}

/// Fixed and exponential output of random doubles match std digit for digit.
pub fn fixed_f64(seed: u64, iterations: usize) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = vec![];
    for _ in 0..iterations {
        let value = f64::from_bits(rng.random());
        if !value.is_finite() {
            continue;
        }
        let precision = rng.random_range(0..40u32);

        out.resize(fixed_len(value, precision), 0);
        let actual = menu_ryu::write(value, Format::Fixed(precision), &mut out)?;
        let expected = format!("{:.*}", precision as usize, value);
        ensure!(actual == expected, "fixed {value:e} {precision}: {actual} != {expected}");

        out.resize(exponential_len(value, precision), 0);
        let actual = menu_ryu::write(value, Format::Exponential(precision), &mut out)?;
        let expected = std_exponential(value, precision as usize)?;
        ensure!(actual == expected, "exponential {value:e} {precision}: {actual} != {expected}");
    }
    Ok(())
}
