//! Corpus-driven conformance checks for `menu_ryu`.
//!
//! Every `corpus/*.txt` file is embedded at build time. The file stem picks
//! the check (`shortest_f64`, `shortest_f32`, `fixed`, `exponential`,
//! `parse_f64` or `parse_f32`, optionally with a suffix like `_edge`).
//! Blank lines and `#` comments are skipped.

use anyhow::{Context, Result, ensure};
use menu_ryu::raw::{MAX_SHORTEST_F32, MAX_SHORTEST_F64, exponential_len, fixed_len};
use menu_ryu::{Buffer, Format, Formatted};

pub mod fuzz;

include!(concat!(env!("OUT_DIR"), "/generated_files.rs"));

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Kind {
    ShortestF64,
    ShortestF32,
    Fixed,
    Exponential,
    ParseF64,
    ParseF32,
}

impl Kind {
    fn from_name(name: &str) -> Option<Self> {
        const PREFIXES: [(&str, Kind); 6] = [
            ("shortest_f64", Kind::ShortestF64),
            ("shortest_f32", Kind::ShortestF32),
            ("fixed", Kind::Fixed),
            ("exponential", Kind::Exponential),
            ("parse_f64", Kind::ParseF64),
            ("parse_f32", Kind::ParseF32),
        ];
        PREFIXES
            .iter()
            .find(|(prefix, _)| name.starts_with(prefix))
            .map(|&(_, kind)| kind)
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Corpus {
    pub name: &'static str,
    pub kind: Kind,
    text: &'static str,
}

pub fn corpora() -> Result<Vec<Corpus>> {
    get_corpus_files()
        .into_iter()
        .map(|(name, text)| {
            let kind = Kind::from_name(name).context(format!("No check for corpus {name}"))?;
            Ok(Corpus { name, kind, text })
        })
        .collect()
}

impl Corpus {
    /// Checks every case, returning how many there were.
    pub fn check(&self) -> Result<usize> {
        let mut cases = 0;
        for (number, line) in self.text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            check_case(self.kind, line)
                .with_context(|| format!("{}:{}: {line}", self.name, number + 1))?;
            cases += 1;
        }
        tracing::debug!(corpus = self.name, cases, "checked");
        Ok(cases)
    }
}

fn fields<const N: usize>(line: &str) -> Result<[&str; N]> {
    let mut fields = line.split_whitespace();
    let mut out = [""; N];
    for field in &mut out {
        *field = fields.next().context("Missing field")?;
    }
    ensure!(fields.next().is_none(), "Trailing fields");
    Ok(out)
}

fn expect(what: &str, actual: &str, expected: &str) -> Result<()> {
    ensure!(actual == expected, "{what} gave {actual:?}, expected {expected:?}");
    Ok(())
}

fn double(bits: &str) -> Result<f64> {
    Ok(f64::from_bits(u64::from_str_radix(bits, 16)?))
}

fn single(bits: &str) -> Result<f32> {
    Ok(f32::from_bits(u32::from_str_radix(bits, 16)?))
}

fn check_case(kind: Kind, line: &str) -> Result<()> {
    match kind {
        Kind::ShortestF64 => {
            let [bits, expected] = fields::<2>(line)?;
            let value = double(bits)?;
            expect("Buffer", Buffer::new().format(value), expected)?;
            let formatted = Formatted::<MAX_SHORTEST_F64>::shortest_f64(value);
            expect("Formatted", formatted.as_str(), expected)?;
            let mut out = [0u8; MAX_SHORTEST_F64];
            expect("write", menu_ryu::write(value, Format::Shortest, &mut out)?, expected)
        }
        Kind::ShortestF32 => {
            let [bits, expected] = fields::<2>(line)?;
            let value = single(bits)?;
            expect("Buffer", Buffer::new().format(value), expected)?;
            let formatted = Formatted::<MAX_SHORTEST_F32>::shortest_f32(value);
            expect("Formatted", formatted.as_str(), expected)?;
            let mut out = [0u8; MAX_SHORTEST_F32];
            expect("write", menu_ryu::write(value, Format::Shortest, &mut out)?, expected)
        }
        Kind::Fixed => {
            let [bits, precision, expected] = fields::<3>(line)?;
            let (value, precision) = (double(bits)?, precision.parse::<u32>()?);
            let mut out = vec![0u8; fixed_len(value, precision)];
            let actual = menu_ryu::write(value, Format::Fixed(precision), &mut out)?;
            expect("fixed", actual, expected)
        }
        Kind::Exponential => {
            let [bits, precision, expected] = fields::<3>(line)?;
            let (value, precision) = (double(bits)?, precision.parse::<u32>()?);
            let mut out = vec![0u8; exponential_len(value, precision)];
            let actual = menu_ryu::write(value, Format::Exponential(precision), &mut out)?;
            expect("exponential", actual, expected)
        }
        Kind::ParseF64 => {
            let [literal, expected] = fields::<2>(line)?;
            let actual = match menu_ryu::parse_f64(literal.as_bytes()) {
                Ok(value) => format!("{:016x}", value.to_bits()),
                Err(err) => format!("{err:?}"),
            };
            expect("parse_f64", &actual, expected)
        }
        Kind::ParseF32 => {
            let [literal, expected] = fields::<2>(line)?;
            let actual = match menu_ryu::parse_f32(literal.as_bytes()) {
                Ok(value) => format!("{:08x}", value.to_bits()),
                Err(err) => format!("{err:?}"),
            };
            expect("parse_f32", &actual, expected)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(Kind::from_name("shortest_f64_edge"), Some(Kind::ShortestF64));
        assert_eq!(Kind::from_name("parse_f32"), Some(Kind::ParseF32));
        assert_eq!(Kind::from_name("other"), None);
    }

    #[test]
    fn cases() {
        assert!(check_case(Kind::ShortestF64, "3ff8000000000000 1.5E0").is_ok());
        assert!(check_case(Kind::ShortestF64, "3ff8000000000000 1.6E0").is_err());
        assert!(check_case(Kind::Fixed, "3ff8000000000000 2 1.50").is_ok());
        assert!(check_case(Kind::Exponential, "3ff8000000000000 0 2e+00").is_ok());
        assert!(check_case(Kind::ParseF64, "1.5 3ff8000000000000").is_ok());
        assert!(check_case(Kind::ParseF32, "1e InputTooShort").is_err());
        assert!(check_case(Kind::ParseF32, "1e MalformedInput").is_ok());
        assert!(check_case(Kind::ParseF32, "1.5").is_err());
    }
}
