//! Utility functions for EIP-712 encoding and common conversions.
//!
//! This module provides the low-level encoding helpers behind the claim digest,
//! plus parsing and formatting helpers for the hex values that cross the CLI and
//! HTTP boundaries.

pub mod conversion;
pub mod eip712;
pub mod formatting;

pub use conversion::{address_from_slice, parse_address, parse_signature};
pub use eip712::{
	compute_domain_hash, compute_final_digest, Eip712AbiEncoder, CLAIM_TYPE, DOMAIN_TYPE,
	PROTOCOL_NAME, PROTOCOL_VERSION,
};
pub use formatting::{format_signature, truncate_id, without_0x_prefix};
