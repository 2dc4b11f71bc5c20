//! Claim payload types.
//!
//! A claim authorizes `receiver` to unlock the escrow lock identified by
//! `lock_id`. The types here enforce the byte-length and range invariants at
//! construction so that the hashing code downstream never has to re-check them.

use crate::utils::without_0x_prefix;
use alloy_primitives::{hex, Address, B256};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while validating or signing a claim.
///
/// Every variant is a local, non-retryable validation failure. The caller has
/// to fix the input and invoke the operation again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimError {
	/// Address input is malformed or not exactly 20 bytes.
	#[error("Invalid address: {0}")]
	InvalidAddress(String),
	/// Chain id is zero, negative or does not fit in 64 bits.
	#[error("Invalid chain id: {0}")]
	InvalidChainId(String),
	/// Lock identifier is malformed or not exactly 32 bytes.
	#[error("Invalid lock id: {0}")]
	InvalidLockId(String),
	/// Signing key is missing, malformed, zero or out of range.
	#[error("Invalid private key: {0}")]
	InvalidPrivateKey(String),
	/// Signature is malformed or no signer can be recovered from it.
	#[error("Invalid signature: {0}")]
	InvalidSignature(String),
}

impl ClaimError {
	/// Stable machine-readable code for this error, used in API responses.
	pub fn code(&self) -> &'static str {
		match self {
			ClaimError::InvalidAddress(_) => "INVALID_ADDRESS",
			ClaimError::InvalidChainId(_) => "INVALID_CHAIN_ID",
			ClaimError::InvalidLockId(_) => "INVALID_LOCK_ID",
			ClaimError::InvalidPrivateKey(_) => "INVALID_PRIVATE_KEY",
			ClaimError::InvalidSignature(_) => "INVALID_SIGNATURE",
		}
	}
}

/// Identifier of the execution network a claim is valid on.
///
/// Always strictly positive. Held as `u64` so ids such as Sepolia's
/// `11155111` (or any 64-bit id) are represented losslessly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct ChainId(u64);

impl ChainId {
	/// Creates a chain id, rejecting zero.
	pub fn new(id: u64) -> Result<Self, ClaimError> {
		if id == 0 {
			return Err(ClaimError::InvalidChainId(
				"chain id must be greater than 0".into(),
			));
		}
		Ok(Self(id))
	}

	/// Returns the raw numeric id.
	pub fn get(self) -> u64 {
		self.0
	}
}

impl TryFrom<u64> for ChainId {
	type Error = ClaimError;

	fn try_from(id: u64) -> Result<Self, Self::Error> {
		Self::new(id)
	}
}

impl From<ChainId> for u64 {
	fn from(id: ChainId) -> Self {
		id.0
	}
}

impl FromStr for ChainId {
	type Err = ClaimError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let trimmed = s.trim();
		let id = trimmed.parse::<u64>().map_err(|e| {
			ClaimError::InvalidChainId(format!("'{}' is not a 64-bit unsigned integer: {}", trimmed, e))
		})?;
		Self::new(id)
	}
}

impl fmt::Display for ChainId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Opaque 32-byte identifier of an escrow lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LockId(B256);

impl LockId {
	/// Wraps an existing 32-byte value.
	pub const fn new(id: B256) -> Self {
		Self(id)
	}

	/// Builds a lock id from raw bytes, which must be exactly 32 bytes long.
	pub fn from_slice(bytes: &[u8]) -> Result<Self, ClaimError> {
		if bytes.len() != 32 {
			return Err(ClaimError::InvalidLockId(format!(
				"expected 32 bytes, got {}",
				bytes.len()
			)));
		}
		Ok(Self(B256::from_slice(bytes)))
	}

	/// Returns the underlying 32-byte value.
	pub fn as_b256(&self) -> &B256 {
		&self.0
	}
}

impl From<B256> for LockId {
	fn from(id: B256) -> Self {
		Self(id)
	}
}

impl FromStr for LockId {
	type Err = ClaimError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let bytes = hex::decode(without_0x_prefix(s.trim()))
			.map_err(|e| ClaimError::InvalidLockId(format!("not valid hex: {}", e)))?;
		Self::from_slice(&bytes)
	}
}

impl fmt::Display for LockId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// The payload a signer vouches for: `receiver` may unlock `lock_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
	/// Lock being claimed.
	pub lock_id: LockId,
	/// Party authorized to claim the lock.
	pub receiver: Address,
}

impl Claim {
	pub fn new(lock_id: LockId, receiver: Address) -> Self {
		Self { lock_id, receiver }
	}
}
