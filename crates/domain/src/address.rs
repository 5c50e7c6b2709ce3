//! EVM account and contract addresses.

use crate::error::ParseError;

pub use alloy_primitives::Address;

/// Parses a hex address, with or without the `0x` prefix and in any case.
///
/// # Errors
/// Returns [`ParseError::InvalidAddress`] for anything that is not 20 bytes
/// of hex.
pub fn parse(input: &str) -> Result<Address, ParseError> {
    input
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidAddress(input.to_string()))
}

/// Deterministic address whose last eight bytes encode `n`.
///
/// Used for simulated deployments and accounts.
#[must_use]
pub fn from_index(n: u64) -> Address {
    let mut bytes = [0u8; 20];
    bytes[12..].copy_from_slice(&n.to_be_bytes());
    Address::new(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_case_with_prefix() {
        let addr = parse("0x9d2c8D3e68A3d91cAF17F3eD476A793Ef57f49af").unwrap();
        assert_eq!(addr, parse("0x9d2c8d3e68a3d91caf17f3ed476a793ef57f49af").unwrap());
    }

    #[test]
    fn test_parse_without_prefix() {
        let addr = parse("0000000000000000000000000000000000000001").unwrap();
        assert_eq!(addr, from_index(1));
    }

    #[test]
    fn test_rejects_bad_length_and_digits() {
        assert_eq!(
            parse("0x1234"),
            Err(ParseError::InvalidAddress("0x1234".to_string()))
        );
        assert!(parse("0xzz2c8D3e68A3d91cAF17F3eD476A793Ef57f49af").is_err());
    }

    #[test]
    fn test_serde_as_hex_string() {
        let addr = from_index(0xabc);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(
            json.to_lowercase(),
            "\"0x0000000000000000000000000000000000000abc\""
        );
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }
}
