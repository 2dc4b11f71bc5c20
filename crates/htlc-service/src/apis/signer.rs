//! Raw signer endpoints: key identity and signing of arbitrary 32-byte hashes.
//!
//! `/signHash` mirrors what a remote (threshold) signer exposes, so the claim
//! flow can be exercised against this service in place of one.

use alloy_primitives::hex;
use htlc_claim::{sign, ClaimKey};
use htlc_types::{
	format_signature, without_0x_prefix, APIError, AddressResponse, SignHashRequest,
	SignHashResponse, B256,
};

/// Builds the `GET /address` response for `key`.
pub fn address_response(key: &ClaimKey) -> AddressResponse {
	AddressResponse {
		address: key.address().to_checksum(None),
		pubkey_uncompressed: hex::encode_prefixed(key.public_key_uncompressed()),
	}
}

/// Handles a `POST /signHash` request.
pub fn process_sign_hash(
	request: &SignHashRequest,
	key: &ClaimKey,
) -> Result<SignHashResponse, APIError> {
	let bytes = hex::decode(without_0x_prefix(request.hash_hex.trim()))
		.ok()
		.filter(|b| b.len() == 32)
		.ok_or_else(|| APIError::BadRequest {
			error_type: "INVALID_HASH".to_string(),
			message: "hash_hex must be 32 bytes".to_string(),
		})?;
	let hash = B256::from_slice(&bytes);

	let signature = sign(&hash, key)?;
	tracing::debug!(hash = %hash, "Signed raw hash");

	Ok(SignHashResponse {
		r: hex::encode_prefixed(signature.r().to_be_bytes::<32>()),
		s: hex::encode_prefixed(signature.s().to_be_bytes::<32>()),
		v: 27 + signature.v() as u8,
		signature: format_signature(&signature),
	})
}
