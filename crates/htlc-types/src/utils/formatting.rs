//! String formatting utilities.
//!
//! Provides functions for hex prefix stripping, signature rendering and
//! truncation of long identifiers for log output.

use alloy_primitives::{hex, PrimitiveSignature};

/// Utility function to truncate a hex string for display purposes.
///
/// Shows only the first 10 characters (`0x` plus 8 hex digits) followed by ".."
/// for longer strings.
pub fn truncate_id(id: &str) -> String {
	match id.char_indices().nth(10) {
		Some((end, _)) => format!("{}..", &id[..end]),
		None => id.to_string(),
	}
}

/// Removes "0x" or "0X" prefix from a hex string if present.
pub fn without_0x_prefix(hex_str: &str) -> &str {
	hex_str
		.strip_prefix("0x")
		.or_else(|| hex_str.strip_prefix("0X"))
		.unwrap_or(hex_str)
}

/// Renders a recoverable signature in the standard 65-byte `r || s || v` layout
/// (with `v` in `{27, 28}`) as a `0x`-prefixed, 132 character hex string.
pub fn format_signature(signature: &PrimitiveSignature) -> String {
	hex::encode_prefixed(signature.as_bytes())
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::U256;

	#[test]
	fn test_truncate_id() {
		assert_eq!(truncate_id("0x1234"), "0x1234");
		assert_eq!(
			truncate_id("0x1111111111111111111111111111111111111111"),
			"0x11111111.."
		);
		assert_eq!(truncate_id("0x11111111"), "0x11111111");
		// cut on a character boundary
		assert_eq!(truncate_id("0x1111111éé"), "0x1111111é..");
		assert_eq!(truncate_id("ééééééééééé"), "éééééééééé..");
	}

	#[test]
	fn test_prefix_helpers() {
		assert_eq!(without_0x_prefix("0xabcd"), "abcd");
		assert_eq!(without_0x_prefix("0Xabcd"), "abcd");
		assert_eq!(without_0x_prefix("abcd"), "abcd");
	}

	#[test]
	fn test_format_signature_layout() {
		let sig = PrimitiveSignature::new(U256::from(1u8), U256::from(2u8), true);
		let rendered = format_signature(&sig);

		assert_eq!(rendered.len(), 2 + 130);
		assert!(rendered.starts_with("0x"));
		assert!(rendered.ends_with("1c"));
		assert_eq!(&rendered[64..66], "01");
		assert_eq!(&rendered[128..130], "02");
	}
}
