//! Scanning of decimal literals:
//! `[+-]? digits ('.' digits)? ([eE] [+-]? digits)?`
//!
//! At least one mantissa digit is required. Leading zeros do not count
//! toward the significant-digit limit.

#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("input is empty")]
    InputTooShort,
    #[error("too many significant digits")]
    InputTooLong,
    #[error("malformed decimal literal")]
    MalformedInput,
}

/// Why and where scanning stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rejection {
    pub error: ParseError,
    pub position: usize,
}

impl Rejection {
    const fn at(error: ParseError, position: usize) -> Self {
        Rejection { error, position }
    }
}

/// `(-1)^negative * mantissa * 10^exponent`, with `digits` significant
/// digits in `mantissa`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Literal {
    pub negative: bool,
    pub mantissa: u64,
    pub digits: u32,
    pub exponent: i32,
}

/// Significant exponent digits; "e1000" and beyond are rejected.
const MAX_EXPONENT_DIGITS: u32 = 3;

const fn is_digit(c: u8) -> bool {
    c.is_ascii_digit()
}

pub const fn scan(input: &[u8], max_digits: u32) -> Result<Literal, Rejection> {
    let len = input.len();
    if len == 0 {
        return Err(Rejection::at(ParseError::InputTooShort, 0));
    }

    let mut i = 0;
    let mut negative = false;
    if input[0] == b'-' || input[0] == b'+' {
        negative = input[0] == b'-';
        i += 1;
    }

    let mut mantissa = 0u64;
    let mut digits = 0u32;
    let mut seen_digit = false;
    let mut seen_dot = false;
    let mut fraction_digits = 0i32;
    while i < len {
        let c = input[i];
        if c == b'.' {
            if seen_dot {
                return Err(Rejection::at(ParseError::MalformedInput, i));
            }
            seen_dot = true;
            i += 1;
            continue;
        }
        if !is_digit(c) {
            break;
        }
        if digits >= max_digits {
            return Err(Rejection::at(ParseError::InputTooLong, i));
        }
        mantissa = 10 * mantissa + (c - b'0') as u64;
        if mantissa != 0 {
            digits += 1;
        }
        seen_digit = true;
        if seen_dot {
            fraction_digits = fraction_digits.saturating_add(1);
        }
        i += 1;
    }
    if !seen_digit {
        return Err(Rejection::at(ParseError::MalformedInput, i));
    }

    let mut exponent = 0i32;
    if i < len && (input[i] == b'e' || input[i] == b'E') {
        i += 1;
        let mut exponent_negative = false;
        if i < len && (input[i] == b'-' || input[i] == b'+') {
            exponent_negative = input[i] == b'-';
            i += 1;
        }
        if i == len {
            return Err(Rejection::at(ParseError::MalformedInput, i));
        }
        let mut exponent_digits = 0u32;
        while i < len {
            let c = input[i];
            if !is_digit(c) {
                return Err(Rejection::at(ParseError::MalformedInput, i));
            }
            if exponent_digits >= MAX_EXPONENT_DIGITS {
                return Err(Rejection::at(ParseError::InputTooLong, i));
            }
            exponent = 10 * exponent + (c - b'0') as i32;
            if exponent != 0 {
                exponent_digits += 1;
            }
            i += 1;
        }
        if exponent_negative {
            exponent = -exponent;
        }
    }
    if i < len {
        return Err(Rejection::at(ParseError::MalformedInput, i));
    }

    Ok(Literal {
        negative,
        mantissa,
        digits,
        exponent: exponent.saturating_sub(fraction_digits),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_str(s: &str) -> Result<Literal, Rejection> {
        scan(s.as_bytes(), 17)
    }

    fn literal(negative: bool, mantissa: u64, digits: u32, exponent: i32) -> Literal {
        Literal {
            negative,
            mantissa,
            digits,
            exponent,
        }
    }

    #[test]
    fn accepted() {
        assert_eq!(scan_str("1.5E1"), Ok(literal(false, 15, 2, 0)));
        assert_eq!(scan_str("-0.001"), Ok(literal(true, 1, 1, -3)));
        assert_eq!(scan_str("+12e-3"), Ok(literal(false, 12, 2, -3)));
        assert_eq!(scan_str("1."), Ok(literal(false, 1, 1, 0)));
        assert_eq!(scan_str(".5"), Ok(literal(false, 5, 1, -1)));
        assert_eq!(scan_str("0000000000000000000000001"), Ok(literal(false, 1, 1, 0)));
        assert_eq!(scan_str("1e0005"), Ok(literal(false, 1, 1, 5)));
    }

    #[test]
    fn rejected() {
        let err = |error, position| Err(Rejection { error, position });
        assert_eq!(scan_str(""), err(ParseError::InputTooShort, 0));
        assert_eq!(scan_str("1..1"), err(ParseError::MalformedInput, 2));
        assert_eq!(scan_str("123456789012345678"), err(ParseError::InputTooLong, 17));
        assert_eq!(scan_str("1e1000"), err(ParseError::InputTooLong, 5));
        assert_eq!(scan_str("."), err(ParseError::MalformedInput, 1));
        assert_eq!(scan_str("-"), err(ParseError::MalformedInput, 1));
        assert_eq!(scan_str("e5"), err(ParseError::MalformedInput, 0));
        assert_eq!(scan_str("1e"), err(ParseError::MalformedInput, 2));
        assert_eq!(scan_str("1e+"), err(ParseError::MalformedInput, 3));
        assert_eq!(scan_str("1x"), err(ParseError::MalformedInput, 1));
        assert_eq!(scan_str("1e5x"), err(ParseError::MalformedInput, 3));
        assert_eq!(scan_str(" 1"), err(ParseError::MalformedInput, 0));
    }

    #[test]
    fn single_precision_limit() {
        assert!(scan(b"123456789", 9).is_ok());
        assert_eq!(
            scan(b"1234567890", 9),
            Err(Rejection {
                error: ParseError::InputTooLong,
                position: 9
            })
        );
    }
}
