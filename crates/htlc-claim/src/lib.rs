//! Claim authorization signing for the MPHTLC escrow protocol.
//!
//! A claim lets a designated receiver unlock an escrowed asset identified by a
//! lock id. This crate builds the EIP-712 digest for a claim, signs it with a
//! secp256k1 key and recovers the signer from a signature, so that a signature
//! produced here verifies in the `MPHTLC_LGP` contract's `claimWithSig` (or any
//! other EIP-712 verifier) and nowhere else.
//!
//! The digest is built in three steps:
//!
//! 1. [`build_domain_separator`] binds the protocol name, version, chain id and
//!    verifying contract.
//! 2. [`compute_claim_struct_hash`] hashes `Claim(bytes32 lockId,address receiver)`.
//! 3. [`build_signing_digest`] combines both under the `0x1901` prefix.
//!
//! Every operation is a pure function. Keys are passed in explicitly on each
//! call.

pub mod digest;
pub mod domain;
pub mod signer;

pub use digest::{build_signing_digest, compute_claim_struct_hash};
pub use domain::{build_domain_separator, ClaimDomain};
pub use htlc_types::{ChainId, Claim, ClaimError, LockId};
pub use signer::{attach_recovery_id, recover_signer, sign, ClaimKey};

use alloy_primitives::{Address, PrimitiveSignature, B256};
use htlc_types::truncate_id;

/// A claim signature together with what it commits to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedClaim {
	/// EIP-712 signing digest the key signed.
	pub digest: B256,
	pub signature: PrimitiveSignature,
	/// Address of the signing key.
	pub signer: Address,
}

/// Computes the EIP-712 signing digest of `claim` under `domain`.
pub fn claim_digest(domain: &ClaimDomain, claim: &Claim) -> B256 {
	let domain_separator = domain.separator();
	let struct_hash = compute_claim_struct_hash(&claim.lock_id, &claim.receiver);
	let digest = build_signing_digest(&domain_separator, &struct_hash);

	tracing::debug!(
		chain_id = %domain.chain_id,
		contract = %domain.verifying_contract,
		lock_id = %truncate_id(&claim.lock_id.to_string()),
		receiver = %claim.receiver,
		digest = %digest,
		"Built claim digest"
	);

	digest
}

/// Signs `claim` under `domain` with `key`.
pub fn sign_claim(
	domain: &ClaimDomain,
	claim: &Claim,
	key: &ClaimKey,
) -> Result<SignedClaim, ClaimError> {
	let digest = claim_digest(domain, claim);
	let signature = sign(&digest, key)?;
	Ok(SignedClaim {
		digest,
		signature,
		signer: key.address(),
	})
}

/// Recovers the signer of `signature` over `claim` under `domain`.
pub fn recover_claim_signer(
	domain: &ClaimDomain,
	claim: &Claim,
	signature: &PrimitiveSignature,
) -> Result<Address, ClaimError> {
	recover_signer(&claim_digest(domain, claim), signature)
}

/// Returns whether `signature` authorizes `claim` under `domain` on behalf of
/// `expected`.
///
/// A malformed signature is an error; a well-formed signature from some other
/// key is `Ok(false)`.
pub fn verify_claim(
	domain: &ClaimDomain,
	claim: &Claim,
	signature: &PrimitiveSignature,
	expected: Address,
) -> Result<bool, ClaimError> {
	Ok(recover_claim_signer(domain, claim, signature)? == expected)
}
