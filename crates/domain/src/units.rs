//! Conversion between human decimal strings and on-chain base units.
//!
//! Amounts never pass through floating point: the decimal string is scaled by
//! string manipulation and parsed straight into a [`U256`].

use crate::error::ParseError;
use crate::token::TokenAmount;
use primitive_types::U256;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Largest precision whose scale factor fits in 256 bits.
pub const MAX_DECIMALS: u8 = 77;

/// Parses a non-negative decimal string into base units of a token with
/// `decimals` fractional digits.
///
/// Accepted forms are `12`, `12.5`, `12.` and `.5`.
///
/// # Errors
/// Returns a [`ParseError`] for empty input, signs, exponents, whitespace,
/// repeated dots, more fractional digits than `decimals`, or values that do
/// not fit in 256 bits.
pub fn to_base_units(decimals: u8, input: &str) -> Result<TokenAmount, ParseError> {
    if decimals > MAX_DECIMALS {
        return Err(ParseError::UnsupportedDecimals(decimals));
    }

    let (int_part, frac_part) = input.split_once('.').unwrap_or((input, ""));

    if let Some(found) = int_part
        .chars()
        .chain(frac_part.chars())
        .find(|c| !c.is_ascii_digit())
    {
        return Err(ParseError::InvalidCharacter {
            input: input.to_string(),
            found,
        });
    }
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(ParseError::Empty);
    }
    if frac_part.len() > usize::from(decimals) {
        return Err(ParseError::TooPrecise {
            input: input.to_string(),
            found: frac_part.len(),
            max: decimals,
        });
    }

    let mut digits = String::with_capacity(int_part.len() + usize::from(decimals));
    digits.push_str(int_part);
    digits.push_str(frac_part);
    for _ in frac_part.len()..usize::from(decimals) {
        digits.push('0');
    }

    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Ok(TokenAmount::zero());
    }

    U256::from_dec_str(significant)
        .map(TokenAmount)
        .map_err(|_| ParseError::Overflow(input.to_string()))
}

/// Formats base units as a decimal string.
///
/// Trailing fractional zeros are dropped but one fractional digit is always
/// kept (`1.0`), unless the token has no decimals at all.
#[must_use]
pub fn to_display_units(decimals: u8, amount: TokenAmount) -> String {
    let raw = amount.0.to_string();
    if decimals == 0 {
        return raw;
    }

    let scale = usize::from(decimals);
    let padded = if raw.len() <= scale {
        format!("{}{}", "0".repeat(scale + 1 - raw.len()), raw)
    } else {
        raw
    };

    let (int_part, frac_part) = padded.split_at(padded.len() - scale);
    let frac = frac_part.trim_end_matches('0');
    let frac = if frac.is_empty() { "0" } else { frac };
    format!("{int_part}.{frac}")
}

/// Rounds an already formatted amount to `places` fractional digits for
/// display. Values that do not fit a [`Decimal`] are returned unchanged.
#[must_use]
pub fn round_for_display(formatted: &str, places: u32) -> String {
    match Decimal::from_str(formatted) {
        Ok(value) => value
            .round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
            .normalize()
            .to_string(),
        Err(_) => formatted.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn canonical(input: &str, decimals: u8) -> String {
        let (int_part, frac_part) = input.split_once('.').unwrap_or((input, ""));
        let int_part = int_part.trim_start_matches('0');
        let int_part = if int_part.is_empty() { "0" } else { int_part };
        if decimals == 0 {
            return int_part.to_string();
        }
        let frac_part = frac_part.trim_end_matches('0');
        let frac_part = if frac_part.is_empty() { "0" } else { frac_part };
        format!("{int_part}.{frac_part}")
    }

    #[test]
    fn test_parse_whole_and_fractional() {
        assert_eq!(
            to_base_units(18, "1").unwrap(),
            TokenAmount(U256::exp10(18))
        );
        assert_eq!(
            to_base_units(6, "12.345").unwrap(),
            TokenAmount::from(12_345_000u64)
        );
        assert_eq!(to_base_units(6, ".5").unwrap(), TokenAmount::from(500_000u64));
        assert_eq!(to_base_units(6, "5.").unwrap(), TokenAmount::from(5_000_000u64));
        assert_eq!(to_base_units(0, "42").unwrap(), TokenAmount::from(42u64));
        assert_eq!(to_base_units(6, "000.000").unwrap(), TokenAmount::zero());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(to_base_units(6, ""), Err(ParseError::Empty));
        assert_eq!(to_base_units(6, "."), Err(ParseError::Empty));
        assert!(matches!(
            to_base_units(6, "-1"),
            Err(ParseError::InvalidCharacter { found: '-', .. })
        ));
        assert!(matches!(
            to_base_units(6, "+1"),
            Err(ParseError::InvalidCharacter { found: '+', .. })
        ));
        assert!(matches!(
            to_base_units(6, "1e5"),
            Err(ParseError::InvalidCharacter { found: 'e', .. })
        ));
        assert!(matches!(
            to_base_units(6, "1.2.3"),
            Err(ParseError::InvalidCharacter { found: '.', .. })
        ));
        assert!(matches!(
            to_base_units(6, " 1"),
            Err(ParseError::InvalidCharacter { found: ' ', .. })
        ));
        assert!(matches!(
            to_base_units(6, "abc"),
            Err(ParseError::InvalidCharacter { found: 'a', .. })
        ));
    }

    #[test]
    fn test_parse_rejects_excess_precision() {
        assert_eq!(
            to_base_units(2, "1.001"),
            Err(ParseError::TooPrecise {
                input: "1.001".to_string(),
                found: 3,
                max: 2,
            })
        );
        assert!(matches!(
            to_base_units(0, "1.0"),
            Err(ParseError::TooPrecise { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_overflow_and_unsupported_precision() {
        let too_big = "9".repeat(80);
        assert!(matches!(
            to_base_units(0, &too_big),
            Err(ParseError::Overflow(_))
        ));
        assert_eq!(
            to_base_units(78, "1"),
            Err(ParseError::UnsupportedDecimals(78))
        );
    }

    #[test]
    fn test_display_formatting() {
        assert_eq!(to_display_units(18, TokenAmount(U256::exp10(18))), "1.0");
        assert_eq!(to_display_units(6, TokenAmount::from(50_000u64)), "0.05");
        assert_eq!(to_display_units(6, TokenAmount::zero()), "0.0");
        assert_eq!(to_display_units(6, TokenAmount::from(1u64)), "0.000001");
        assert_eq!(to_display_units(0, TokenAmount::from(7u64)), "7");
        assert_eq!(to_display_units(2, TokenAmount::from(12_345u64)), "123.45");
    }

    #[test]
    fn test_display_normalizes_input() {
        let base = to_base_units(6, "007.50").unwrap();
        assert_eq!(to_display_units(6, base), "7.5");
    }

    #[test]
    fn test_round_for_display() {
        assert_eq!(round_for_display("1.234567", 4), "1.2346");
        assert_eq!(round_for_display("2.5", 0), "3");
        assert_eq!(round_for_display("1.0", 4), "1");
        let huge = format!("{}.5", "9".repeat(40));
        assert_eq!(round_for_display(&huge, 2), huge);
    }

    proptest! {
        #[test]
        fn prop_round_trip_is_canonical(
            decimals in 0u8..=36,
            int_part in "[0-9]{1,30}",
            frac_seed in "[0-9]{0,36}",
        ) {
            let frac: String = frac_seed.chars().take(usize::from(decimals)).collect();
            let input = if frac.is_empty() {
                int_part.clone()
            } else {
                format!("{int_part}.{frac}")
            };
            let base = to_base_units(decimals, &input).unwrap();
            prop_assert_eq!(to_display_units(decimals, base), canonical(&input, decimals));
        }

        #[test]
        fn prop_excess_precision_is_rejected(
            decimals in 0u8..=18,
            extra in "[1-9]",
        ) {
            let input = format!("1.{}{}", "0".repeat(usize::from(decimals)), extra);
            let rejected = matches!(
                to_base_units(decimals, &input),
                Err(ParseError::TooPrecise { .. })
            );
            prop_assert!(rejected);
        }
    }
}
