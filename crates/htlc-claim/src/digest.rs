//! Claim struct hashing and the final EIP-712 signing digest.

use alloy_primitives::{keccak256, Address, B256};
use htlc_types::{
	utils::{compute_final_digest, Eip712AbiEncoder, CLAIM_TYPE},
	LockId,
};

/// Computes `keccak256(abi.encode(CLAIM_TYPEHASH, lockId, receiver))`.
pub fn compute_claim_struct_hash(lock_id: &LockId, receiver: &Address) -> B256 {
	let claim_type_hash = keccak256(CLAIM_TYPE.as_bytes());
	let mut enc = Eip712AbiEncoder::new();
	enc.push_b256(&claim_type_hash);
	enc.push_b256(lock_id.as_b256());
	enc.push_address(receiver);
	keccak256(enc.finish())
}

/// Combines a domain separator and a claim struct hash into the digest that is
/// actually signed: `keccak256(0x19 || 0x01 || domain || struct)`.
///
/// Operand order is fixed by EIP-712; verifiers reconstruct exactly this value.
pub fn build_signing_digest(domain_separator: &B256, claim_struct_hash: &B256) -> B256 {
	compute_final_digest(domain_separator, claim_struct_hash)
}
