#[macro_use]
mod macros;

use macros::significant_digits;
use menu_ryu::raw::{MAX_SHORTEST_F32, format_shortest_f32};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::str;

fn print(f: f32) -> String {
    let mut bytes = [0u8; MAX_SHORTEST_F32];
    let n = format_shortest_f32(f, &mut bytes);
    str::from_utf8(&bytes[..n]).unwrap().to_owned()
}

#[test]
fn test_basic() {
    check!(0E0, 0.0);
    check!(-0E0, -0.0);
    check!(1E0, 1.0);
    check!(-1E0, -1.0);
    assert_eq!(print(f32::NAN), "NaN");
    assert_eq!(print(f32::INFINITY), "Infinity");
    assert_eq!(print(f32::NEG_INFINITY), "-Infinity");
}

#[test]
fn test_switch_to_subnormal() {
    check!(1.1754944E-38, 1.1754944e-38);
}

#[test]
fn test_min_and_max() {
    assert_eq!(f32::from_bits(0x7f7fffff), 3.4028235e38);
    check!(3.4028235E38, 3.4028235e38);
    assert_eq!(f32::from_bits(1), 1e-45);
    check!(1E-45, 1e-45);
}

// An even mantissa may print its interval boundary.
#[test]
fn test_boundary_round_even() {
    check!(3.355445E7, 33554450.0);
    check!(9E9, 9000000000.0);
    check!(3.436672E10, 34366720000.0);
}

// Halfway between two shortest candidates: round to even.
#[test]
fn test_exact_value_round_even() {
    check!(3.0540412E5, 305404.12);
    check!(8.0990312E3, 8099.0312);
}

#[test]
fn test_lots_of_trailing_zeros() {
    check!(2.4414062E-4, 2.4414062e-4);
    check!(2.4414062E-3, 2.4414062e-3);
    check!(4.3945312E-3, 4.3945312e-3);
    check!(6.3476562E-3, 6.3476562e-3);
}

#[test]
fn test_regression() {
    check!(4.7223665E21, 4.7223665e21);
    check!(8.388608E6, 8388608.0);
    check!(1.6777216E7, 1.6777216e7);
    check!(3.3554436E7, 3.3554436e7);
    check!(6.7131496E7, 6.7131496e7);
    check!(1.9310392E-38, 1.9310392e-38);
    check!(-2.47E-43, -2.47e-43);
    check!(1.993244E-38, 1.993244e-38);
    check!(4.1039004E3, 4103.9004);
    check!(5.3399997E9, 5.3399997e9);
    check!(6.0898E-39, 6.0898e-39);
    check!(1.0310042E-3, 0.0010310042);
    check!(2.882326E17, 2.882326e17);
    check!(9.223404E17, 9.223404e17);
    check!(6.710887E7, 6.710887e7);
    check!(1E-44, 1e-44);
    check!(2.816025E14, 2.816025e14);
    check!(9.223372E18, 9.223372e18);
    check!(1.5846086E29, 1.5846086e29);
    check!(1.1811161E19, 1.1811161e19);
    check!(5.368709E18, 5.368709e18);
    check!(4.6143166E18, 4.6143166e18);
    check!(7.812537E-3, 0.007812537);
    check!(1E-45, 1e-45);
    check!(1.18697725E20, 1.18697725e20);
    check!(1.00014165E-36, 1.00014165e-36);
    check!(2E2, 200.0);
    check!(3.3554432E7, 3.3554432e7);
}

#[test]
fn test_output_length() {
    check!(1E0, 1.0);
    check!(1.2E0, 1.2);
    check!(1.23E0, 1.23);
    check!(1.234E0, 1.234);
    check!(1.2345E0, 1.2345);
    check!(1.23456E0, 1.23456);
    check!(1.234567E0, 1.234567);
    check!(1.2345678E0, 1.2345678);
    check!(1.23456735E-36, 1.23456735e-36);
}

#[test]
fn test_random() {
    let mut rng = StdRng::seed_from_u64(0xf25);
    for _ in 0..200_000 {
        let f = f32::from_bits(rng.random());
        if !f.is_finite() {
            continue;
        }
        let s = print(f);
        assert_eq!(s.parse::<f32>().unwrap().to_bits(), f.to_bits(), "{s}");
        assert_eq!(menu_ryu::parse_f32(s.as_bytes()).map(f32::to_bits), Ok(f.to_bits()), "{s}");
        assert_eq!(significant_digits(&s), significant_digits(&format!("{f:e}")), "{s}");
    }
}

#[test]
fn test_decimal_parts() {
    assert_eq!(
        menu_ryu::f2d(1.5e-7),
        menu_ryu::FloatingDecimal32 {
            mantissa: 15,
            exponent: -8
        }
    );
}
