macro_rules! check {
    ($expected:expr, $value:expr) => {
        assert_eq!(print($value), stringify!($expected));
    };
}

/// Number of significant digits in `D[.DDD]E<exp>` or `D[.DDD]e<exp>` text.
#[allow(dead_code)]
pub fn significant_digits(s: &str) -> usize {
    let mantissa = s.split(['e', 'E']).next().unwrap_or(s);
    mantissa.bytes().filter(u8::is_ascii_digit).count()
}
