use alloy_primitives::Address;
use shared::{Error, Result};

/// Parse and validate an EVM address.
///
/// Accepts `0x` followed by exactly 40 hex digits. All-lowercase and
/// all-uppercase forms carry no checksum and are accepted as-is; a
/// mixed-case form must match its EIP-55 checksummed rendering exactly.
pub fn parse_address(input: &str) -> Result<Address> {
    let hex_part = input
        .strip_prefix("0x")
        .ok_or_else(|| Error::InvalidAddress("Address must start with 0x".to_string()))?;

    if hex_part.len() != 40 {
        return Err(Error::InvalidAddress(
            "Address must be 42 characters (0x + 40 hex)".to_string(),
        ));
    }

    if !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::InvalidAddress(
            "Address must contain only hexadecimal characters".to_string(),
        ));
    }

    let address: Address = input
        .parse()
        .map_err(|e| Error::InvalidAddress(format!("Unparseable address: {}", e)))?;

    let has_lowercase = hex_part.chars().any(|c| c.is_ascii_lowercase());
    let has_uppercase = hex_part.chars().any(|c| c.is_ascii_uppercase());
    if has_lowercase && has_uppercase && address.to_checksum(None) != input {
        return Err(Error::InvalidAddress(format!(
            "Checksum mismatch for mixed-case address: {}",
            input
        )));
    }

    Ok(address)
}

/// Whether `input` is a well-formed EVM address. Format check only; says
/// nothing about the address existing on any chain.
pub fn is_address(input: &str) -> bool {
    parse_address(input).is_ok()
}
