//! Common types module for the MPHTLC claim signer.
//!
//! This module defines the value types, validation rules and error taxonomy
//! shared by the claim core, the configuration layer and the signer service.
//! Everything here is a plain value object: constructed per request, never
//! mutated and never persisted.

/// API types for the signer HTTP endpoints.
pub mod api;
/// Claim payload types and the claim error taxonomy.
pub mod claim;
/// Secure string wrapper for private key material.
pub mod secret_string;
/// Utility functions for EIP-712 encoding, parsing and formatting.
pub mod utils;

pub use alloy_primitives::{Address, PrimitiveSignature as Signature, B256};
pub use api::*;
pub use claim::{ChainId, Claim, ClaimError, LockId};
pub use secret_string::SecretString;
pub use utils::{
	format_signature, parse_address, parse_signature, truncate_id, without_0x_prefix,
	PROTOCOL_NAME, PROTOCOL_VERSION,
};
