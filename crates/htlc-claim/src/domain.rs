//! EIP-712 domain separation for claim signatures.
//!
//! The domain separator binds a signature to one protocol version, one chain
//! and one verifying contract. A claim signed for chain A / contract X hashes to
//! a different digest on chain B or contract Y, so it cannot be replayed there.

use alloy_primitives::{Address, B256};
use htlc_types::{
	utils::{compute_domain_hash, PROTOCOL_NAME, PROTOCOL_VERSION},
	ChainId,
};

/// Builds the EIP-712 domain separator for `(name, version, chain_id, contract)`.
///
/// `chain_id` and `contract` are already validated by construction of their
/// types: the id is non-zero and the address is exactly 20 bytes.
pub fn build_domain_separator(
	protocol_name: &str,
	version: &str,
	chain_id: ChainId,
	contract: &Address,
) -> B256 {
	compute_domain_hash(protocol_name, version, chain_id.get(), contract)
}

/// The four EIP-712 domain fields of a claim signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimDomain {
	pub name: String,
	pub version: String,
	pub chain_id: ChainId,
	pub verifying_contract: Address,
}

impl ClaimDomain {
	pub fn new(
		name: impl Into<String>,
		version: impl Into<String>,
		chain_id: ChainId,
		verifying_contract: Address,
	) -> Self {
		Self {
			name: name.into(),
			version: version.into(),
			chain_id,
			verifying_contract,
		}
	}

	/// Domain of the `MPHTLC_LGP` escrow contract deployed at `verifying_contract`.
	pub fn mphtlc(chain_id: ChainId, verifying_contract: Address) -> Self {
		Self::new(PROTOCOL_NAME, PROTOCOL_VERSION, chain_id, verifying_contract)
	}

	/// Computes the domain separator for these fields.
	pub fn separator(&self) -> B256 {
		build_domain_separator(
			&self.name,
			&self.version,
			self.chain_id,
			&self.verifying_contract,
		)
	}
}
