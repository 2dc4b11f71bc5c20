//! EIP-712 utilities for MPHTLC claim authorizations.
//!
//! These helpers provide:
//! - The published protocol constants (domain name and version)
//! - Domain hash computation for the full `EIP712Domain` with version
//! - Final digest computation (0x1901 || domainHash || structHash)
//! - A minimal ABI encoder for the static field types used by claims

use alloy_primitives::{keccak256, Address as AlloyAddress, B256, U256};

/// Domain name shared with the on-chain `MPHTLC_LGP` contract.
pub const PROTOCOL_NAME: &str = "MPHTLC_LGP";
/// Domain version shared with the on-chain `MPHTLC_LGP` contract.
pub const PROTOCOL_VERSION: &str = "1";

pub const DOMAIN_TYPE: &str =
	"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";
pub const CLAIM_TYPE: &str = "Claim(bytes32 lockId,address receiver)";

/// Compute EIP-712 domain hash
/// (keccak256(abi.encode(typeHash, nameHash, versionHash, chainId, verifyingContract))).
pub fn compute_domain_hash(
	name: &str,
	version: &str,
	chain_id: u64,
	verifying_contract: &AlloyAddress,
) -> B256 {
	let domain_type_hash = keccak256(DOMAIN_TYPE.as_bytes());
	let mut enc = Eip712AbiEncoder::new();
	enc.push_b256(&domain_type_hash);
	enc.push_string(name);
	enc.push_string(version);
	enc.push_u256(U256::from(chain_id));
	enc.push_address(verifying_contract);
	keccak256(enc.finish())
}

/// Compute the final EIP-712 digest: keccak256(0x1901 || domainHash || structHash).
pub fn compute_final_digest(domain_hash: &B256, struct_hash: &B256) -> B256 {
	let mut out = Vec::with_capacity(2 + 32 + 32);
	out.push(0x19);
	out.push(0x01);
	out.extend_from_slice(domain_hash.as_slice());
	out.extend_from_slice(struct_hash.as_slice());
	keccak256(out)
}

/// Minimal ABI encoder for static types used in EIP-712 struct hashing.
pub struct Eip712AbiEncoder {
	buf: Vec<u8>,
}

impl Default for Eip712AbiEncoder {
	fn default() -> Self {
		Self::new()
	}
}

impl Eip712AbiEncoder {
	pub fn new() -> Self {
		Self {
			buf: Vec::with_capacity(32 * 5),
		}
	}

	pub fn push_b256(&mut self, v: &B256) {
		self.buf.extend_from_slice(v.as_slice());
	}

	/// Dynamic `string` members are encoded as the keccak256 of their UTF-8 bytes.
	pub fn push_string(&mut self, s: &str) {
		self.push_b256(&keccak256(s.as_bytes()));
	}

	pub fn push_address(&mut self, addr: &AlloyAddress) {
		let mut word = [0u8; 32];
		word[12..].copy_from_slice(addr.as_slice());
		self.buf.extend_from_slice(&word);
	}

	pub fn push_u256(&mut self, v: U256) {
		let word: [u8; 32] = v.to_be_bytes::<32>();
		self.buf.extend_from_slice(&word);
	}

	pub fn finish(self) -> Vec<u8> {
		self.buf
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::{address, b256};

	#[test]
	fn test_domain_type_hash_matches_standard() {
		assert_eq!(
			keccak256(DOMAIN_TYPE.as_bytes()),
			b256!("8b73c3c69bb8fe3d512ecc4cf759cc79239f7b179b0ffacaa9a75d522b39400f")
		);
	}

	#[test]
	fn test_claim_type_hash() {
		assert_eq!(
			keccak256(CLAIM_TYPE.as_bytes()),
			b256!("cd56d84076a99a4023f79d230a6a8af7bf9026249b1fc1ca8ad0b28bb5bfaeac")
		);
	}

	#[test]
	fn test_encoder_word_layout() {
		let mut enc = Eip712AbiEncoder::new();
		enc.push_address(&address!("2222222222222222222222222222222222222222"));
		enc.push_u256(U256::from(11155111u64));
		let out = enc.finish();

		assert_eq!(out.len(), 64);
		// Address is left-padded with 12 zero bytes
		assert!(out[..12].iter().all(|&b| b == 0));
		assert!(out[12..32].iter().all(|&b| b == 0x22));
		// Integer is big-endian in the low bytes of the word
		assert_eq!(&out[60..64], &11155111u32.to_be_bytes());
	}

	#[test]
	fn test_compute_domain_hash() {
		let contract = address!("0000000000000000000000000000000000000001");
		let hash = compute_domain_hash(PROTOCOL_NAME, PROTOCOL_VERSION, 11155111, &contract);
		assert_eq!(
			hash,
			b256!("1a8c07db53768e92c19e83c3ea86d7d101b458cf1c87d3019b950e6d53f6e944")
		);
	}

	#[test]
	fn test_final_digest_prefix_and_order() {
		let domain = B256::repeat_byte(0xaa);
		let strukt = B256::repeat_byte(0xbb);

		let mut expected = vec![0x19, 0x01];
		expected.extend_from_slice(domain.as_slice());
		expected.extend_from_slice(strukt.as_slice());

		assert_eq!(compute_final_digest(&domain, &strukt), keccak256(&expected));
		assert_ne!(
			compute_final_digest(&domain, &strukt),
			compute_final_digest(&strukt, &domain)
		);
	}
}
