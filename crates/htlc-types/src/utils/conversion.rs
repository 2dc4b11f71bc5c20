//! Conversion utilities for hex input crossing the CLI and HTTP boundaries.
//!
//! Addresses and signatures are normalized to raw bytes here, so the hashing
//! code only ever sees validated fixed-length values.

use super::formatting::without_0x_prefix;
use crate::claim::ClaimError;
use alloy_primitives::{hex, Address, PrimitiveSignature};

/// Parses a 20-byte address from hex text.
///
/// Accepts input with or without `0x`. All-lowercase and all-uppercase input is
/// taken as-is; mixed-case input must carry a valid EIP-55 checksum.
pub fn parse_address(input: &str) -> Result<Address, ClaimError> {
	let trimmed = input.trim();
	let digits = without_0x_prefix(trimmed);

	if digits.len() != 40 {
		return Err(ClaimError::InvalidAddress(format!(
			"expected 40 hex characters, got {}",
			digits.len()
		)));
	}
	if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
		return Err(ClaimError::InvalidAddress(format!(
			"'{}' is not valid hex",
			trimmed
		)));
	}

	let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
	let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());

	if has_lower && has_upper {
		Address::parse_checksummed(format!("0x{}", digits), None)
			.map_err(|e| ClaimError::InvalidAddress(format!("bad checksum for '{}': {}", trimmed, e)))
	} else {
		digits
			.parse::<Address>()
			.map_err(|e| ClaimError::InvalidAddress(e.to_string()))
	}
}

/// Converts a raw byte slice into an address, which must be exactly 20 bytes.
pub fn address_from_slice(bytes: &[u8]) -> Result<Address, ClaimError> {
	if bytes.len() != 20 {
		return Err(ClaimError::InvalidAddress(format!(
			"expected 20 bytes, got {}",
			bytes.len()
		)));
	}
	Ok(Address::from_slice(bytes))
}

/// Parses a 65-byte `r || s || v` signature from hex text.
///
/// `v` may be given either as a parity bit (0/1) or in the legacy 27/28 form.
pub fn parse_signature(input: &str) -> Result<PrimitiveSignature, ClaimError> {
	let bytes = hex::decode(without_0x_prefix(input.trim()))
		.map_err(|e| ClaimError::InvalidSignature(format!("not valid hex: {}", e)))?;
	if bytes.len() != 65 {
		return Err(ClaimError::InvalidSignature(format!(
			"expected 65 bytes, got {}",
			bytes.len()
		)));
	}
	PrimitiveSignature::from_raw(&bytes).map_err(|e| ClaimError::InvalidSignature(e.to_string()))
}
