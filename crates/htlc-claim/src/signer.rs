//! secp256k1 signing and signer recovery over claim digests.
//!
//! Keys are always handed in explicitly. Nothing in this module reads the
//! environment or keeps a process-wide wallet; where the key comes from is the
//! caller's business.

use alloy_primitives::{hex, Address, PrimitiveSignature, B256, U256};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use htlc_types::{without_0x_prefix, ClaimError, SecretString};
use k256::ecdsa::VerifyingKey;

/// In-memory secp256k1 signing key for claim authorizations.
#[derive(Clone)]
pub struct ClaimKey {
	signer: PrivateKeySigner,
}

impl ClaimKey {
	/// Builds a key from exactly 32 raw bytes.
	///
	/// Zero and values at or above the curve order are rejected.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self, ClaimError> {
		if bytes.len() != 32 {
			return Err(ClaimError::InvalidPrivateKey(format!(
				"expected 32 bytes, got {}",
				bytes.len()
			)));
		}
		let signer = PrivateKeySigner::from_slice(bytes).map_err(|_| {
			ClaimError::InvalidPrivateKey("key is zero or exceeds the curve order".into())
		})?;
		Ok(Self { signer })
	}

	/// Builds a key from hex text, with or without `0x`.
	pub fn from_hex(input: &str) -> Result<Self, ClaimError> {
		let digits = without_0x_prefix(input.trim());
		if digits.is_empty() {
			return Err(ClaimError::InvalidPrivateKey("key is missing".into()));
		}
		let bytes = hex::decode(digits)
			.map_err(|_| ClaimError::InvalidPrivateKey("key is not valid hex".into()))?;
		Self::from_bytes(&bytes)
	}

	/// Builds a key from secret text loaded by an outer layer.
	pub fn from_secret(secret: &SecretString) -> Result<Self, ClaimError> {
		secret.with_exposed(Self::from_hex)
	}

	/// Ethereum address of this key, the public identity `recover_signer` yields.
	pub fn address(&self) -> Address {
		self.signer.address()
	}

	/// Uncompressed SEC1 public key (`0x04 || x || y`).
	pub fn public_key_uncompressed(&self) -> Vec<u8> {
		let verifying_key: &VerifyingKey = self.signer.credential().verifying_key();
		verifying_key.to_encoded_point(false).as_bytes().to_vec()
	}
}

impl std::fmt::Debug for ClaimKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ClaimKey")
			.field("address", &self.address())
			.finish_non_exhaustive()
	}
}

/// Signs a 32-byte signing digest, producing a recoverable signature.
///
/// Signing is deterministic (RFC 6979) and the `s` component is always in the
/// lower half of the curve order.
pub fn sign(signing_digest: &B256, key: &ClaimKey) -> Result<PrimitiveSignature, ClaimError> {
	key.signer
		.sign_hash_sync(signing_digest)
		.map_err(|e| ClaimError::InvalidPrivateKey(format!("signing failed: {}", e)))
}

/// Recovers the address whose key produced `signature` over `signing_digest`.
pub fn recover_signer(
	signing_digest: &B256,
	signature: &PrimitiveSignature,
) -> Result<Address, ClaimError> {
	if signature.r().is_zero() || signature.s().is_zero() {
		return Err(ClaimError::InvalidSignature(
			"signature scalars must be non-zero".into(),
		));
	}
	signature
		.recover_address_from_prehash(signing_digest)
		.map_err(|e| ClaimError::InvalidSignature(format!("recovery failed: {}", e)))
}

/// Completes a bare `(r, s)` pair into a recoverable signature.
///
/// Remote signers (threshold or KMS backends) often return only `r` and `s`.
/// Both recovery parities are tried and the one that recovers `expected` is
/// kept.
pub fn attach_recovery_id(
	signing_digest: &B256,
	r: &B256,
	s: &B256,
	expected: Address,
) -> Result<PrimitiveSignature, ClaimError> {
	let r = U256::from_be_bytes(r.0);
	let s = U256::from_be_bytes(s.0);

	for parity in [false, true] {
		let candidate = PrimitiveSignature::new(r, s, parity);
		if matches!(recover_signer(signing_digest, &candidate), Ok(addr) if addr == expected) {
			return Ok(candidate);
		}
	}

	Err(ClaimError::InvalidSignature(format!(
		"signature does not recover to {}",
		expected
	)))
}
