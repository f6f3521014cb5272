// A table of all two-digit numbers. This is used to speed up decimal digit
// generation by copying pairs of digits into the final output.
pub const DIGIT_TABLE: &[u8; 200] = b"\
    0001020304050607080910111213141516171819\
    2021222324252627282930313233343536373839\
    4041424344454647484950515253545556575859\
    6061626364656667686970717273747576777879\
    8081828384858687888990919293949596979899";

/// Writes the low `count` decimal digits of `digits` to `out[pos..pos + count]`,
/// zero-padded on the left.
pub const fn write_digits(out: &mut [u8], pos: usize, count: usize, mut digits: u64) {
    let mut end = pos + count;
    while end - pos >= 2 {
        let c = (digits % 100) as usize * 2;
        digits /= 100;
        out[end - 2] = DIGIT_TABLE[c];
        out[end - 1] = DIGIT_TABLE[c + 1];
        end -= 2;
    }
    if end > pos {
        out[pos] = b'0' + (digits % 10) as u8;
    }
}

/// Writes `count` digits as `D.DDD`, occupying `count + 1` bytes.
pub const fn write_digits_with_point(out: &mut [u8], pos: usize, count: usize, digits: u64) {
    write_digits(out, pos + 1, count, digits);
    out[pos] = out[pos + 1];
    out[pos + 1] = b'.';
}

pub const fn fill(out: &mut [u8], pos: usize, count: usize, byte: u8) {
    let mut i = 0;
    while i < count {
        out[pos + i] = byte;
        i += 1;
    }
}

pub const fn write_str(out: &mut [u8], pos: usize, s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        out[pos + i] = bytes[i];
        i += 1;
    }
    pos + bytes.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits() {
        let mut out = [b'x'; 12];
        write_digits(&mut out, 1, 9, 1234567);
        assert_eq!(&out, b"x001234567xx");

        let mut out = [b'x'; 6];
        write_digits_with_point(&mut out, 0, 4, 9876);
        assert_eq!(&out, b"9.876x");

        let mut out = [b'x'; 3];
        write_digits_with_point(&mut out, 0, 1, 7);
        assert_eq!(&out[..1], b"7");
        fill(&mut out, 1, 2, b'0');
        assert_eq!(&out, b"700");
    }
}
