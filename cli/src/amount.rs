//! # STRG Amount Parsing and Formatting
//!
//! Users type amounts in STRG (`2.5`); the ledger counts grains
//! (`2_500_000_000`). The conversion here is pure decimal-string
//! arithmetic: no floating point between a user and their money.

use thiserror::Error;

use strongroom_vault::params::GRAINS_PER_STRG;

/// Number of decimal places in a STRG amount.
const DECIMALS: usize = 9;

/// Errors from parsing a user-supplied STRG amount.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    /// The string is not a decimal number.
    #[error("malformed amount '{0}': expected a decimal STRG value like 2.5")]
    Malformed(String),

    /// More than nine fractional digits.
    #[error("amount '{0}' has more than 9 decimal places")]
    TooPrecise(String),

    /// The amount does not fit in a u64 grain count.
    #[error("amount '{0}' is out of range")]
    OutOfRange(String),
}

/// Parse a decimal STRG string into grains.
///
/// Accepts `"3"`, `"0.1"`, `".5"`, and `"2.500"`; rejects signs,
/// exponents, grouping separators, and anything past nine decimal
/// places.
pub fn parse_strg(input: &str) -> Result<u64, AmountError> {
    let s = input.trim();
    let malformed = || AmountError::Malformed(input.to_string());

    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(malformed());
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(malformed());
    }
    if frac.len() > DECIMALS {
        return Err(AmountError::TooPrecise(input.to_string()));
    }

    let whole_grains = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<u64>()
            .map_err(|_| AmountError::OutOfRange(input.to_string()))?
            .checked_mul(GRAINS_PER_STRG)
            .ok_or_else(|| AmountError::OutOfRange(input.to_string()))?
    };

    // Right-pad the fraction to nine digits: "5" -> 500_000_000.
    let mut frac_grains = 0u64;
    if !frac.is_empty() {
        let padded: String = format!("{:0<width$}", frac, width = DECIMALS);
        frac_grains = padded
            .parse::<u64>()
            .map_err(|_| AmountError::OutOfRange(input.to_string()))?;
    }

    whole_grains
        .checked_add(frac_grains)
        .ok_or_else(|| AmountError::OutOfRange(input.to_string()))
}

/// Format grains as a decimal STRG string, trailing zeros trimmed.
pub fn format_strg(grains: u64) -> String {
    let whole = grains / GRAINS_PER_STRG;
    let frac = grains % GRAINS_PER_STRG;
    if frac == 0 {
        return whole.to_string();
    }
    let frac_str = format!("{:09}", frac);
    format!("{}.{}", whole, frac_str.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_and_fractional_amounts() {
        assert_eq!(parse_strg("3").unwrap(), 3_000_000_000);
        assert_eq!(parse_strg("0.1").unwrap(), 100_000_000);
        assert_eq!(parse_strg(".5").unwrap(), 500_000_000);
        assert_eq!(parse_strg("2.500").unwrap(), 2_500_000_000);
        assert_eq!(parse_strg("0.000000001").unwrap(), 1);
        assert_eq!(parse_strg("0").unwrap(), 0);
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", ".", "abc", "1.2.3", "-1", "+2", "1e9", "1,5"] {
            assert!(parse_strg(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn rejects_excess_precision() {
        assert_eq!(
            parse_strg("0.0000000001").unwrap_err(),
            AmountError::TooPrecise("0.0000000001".into())
        );
    }

    #[test]
    fn rejects_overflow() {
        assert!(matches!(
            parse_strg("99999999999999999999"),
            Err(AmountError::OutOfRange(_))
        ));
    }

    #[test]
    fn formats_with_trimmed_zeros() {
        assert_eq!(format_strg(0), "0");
        assert_eq!(format_strg(100_000_000), "0.1");
        assert_eq!(format_strg(2_500_000_000), "2.5");
        assert_eq!(format_strg(1), "0.000000001");
        assert_eq!(format_strg(3_000_000_000), "3");
    }

    #[test]
    fn parse_format_roundtrip() {
        for grains in [0u64, 1, 100_000_000, 1_234_567_890, 42_000_000_000] {
            assert_eq!(parse_strg(&format_strg(grains)).unwrap(), grains);
        }
    }
}
