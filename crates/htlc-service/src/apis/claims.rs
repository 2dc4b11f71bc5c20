//! Claim signing and verification shared by the CLI and the HTTP API.
//!
//! Raw text input (hex lock id, addresses, decimal chain id) is validated here
//! into claim types. Chain id and verifying contract fall back to the configured
//! `[domain]` when a request leaves them out. The domain name and version are
//! always the `MPHTLC_LGP` protocol constants.

use htlc_claim::{claim_digest, recover_signer, sign_claim, ClaimDomain, ClaimKey, SignedClaim};
use htlc_config::DomainConfig;
use htlc_types::{
	format_signature, parse_address, parse_signature, Address, ChainId, Claim, ClaimError, LockId,
	SignClaimRequest, SignClaimResponse, VerifyClaimRequest, VerifyClaimResponse, B256,
};

/// Unvalidated claim input as received from a caller.
#[derive(Debug, Clone, Copy)]
pub struct ClaimInput<'a> {
	pub lock_id: &'a str,
	pub receiver: &'a str,
	pub chain_id: Option<&'a str>,
	pub contract: Option<&'a str>,
}

/// Validates `input` into a domain and claim, using `defaults` for the
/// missing domain fields.
pub fn resolve_claim(
	input: ClaimInput<'_>,
	defaults: &DomainConfig,
) -> Result<(ClaimDomain, Claim), ClaimError> {
	let lock_id: LockId = input.lock_id.parse()?;
	let receiver = parse_address(input.receiver)?;

	let chain_id = match input.chain_id {
		Some(raw) => raw.parse::<ChainId>()?,
		None => ChainId::new(defaults.chain_id)?,
	};

	let contract = match input.contract {
		Some(raw) => parse_address(raw)?,
		None => match defaults.verifying_contract.as_deref() {
			Some(raw) => parse_address(raw)?,
			None => {
				return Err(ClaimError::InvalidAddress(
					"verifying contract is required (no domain.verifying_contract configured)"
						.into(),
				))
			},
		},
	};

	Ok((
		ClaimDomain::mphtlc(chain_id, contract),
		Claim::new(lock_id, receiver),
	))
}

/// Recovers the signer of a claim from hex signature text.
pub fn recover_from_input(
	input: ClaimInput<'_>,
	signature: &str,
	defaults: &DomainConfig,
) -> Result<(B256, Address), ClaimError> {
	let (domain, claim) = resolve_claim(input, defaults)?;
	let signature = parse_signature(signature)?;
	let digest = claim_digest(&domain, &claim);
	let signer = recover_signer(&digest, &signature)?;
	Ok((digest, signer))
}

/// Handles a `POST /claims/sign` request.
pub fn process_sign_claim(
	request: &SignClaimRequest,
	key: &ClaimKey,
	defaults: &DomainConfig,
) -> Result<SignClaimResponse, ClaimError> {
	let input = ClaimInput {
		lock_id: &request.lock_id,
		receiver: &request.receiver,
		chain_id: request.chain_id.as_deref(),
		contract: request.contract.as_deref(),
	};
	let (domain, claim) = resolve_claim(input, defaults)?;
	let SignedClaim {
		digest,
		signature,
		signer,
	} = sign_claim(&domain, &claim, key)?;

	tracing::info!(
		chain_id = %domain.chain_id,
		lock_id = %claim.lock_id,
		receiver = %claim.receiver,
		"Signed claim"
	);

	Ok(SignClaimResponse {
		digest: digest.to_string(),
		signature: format_signature(&signature),
		signer: signer.to_checksum(None),
	})
}

/// Handles a `POST /claims/verify` request.
pub fn process_verify_claim(
	request: &VerifyClaimRequest,
	defaults: &DomainConfig,
) -> Result<VerifyClaimResponse, ClaimError> {
	let input = ClaimInput {
		lock_id: &request.lock_id,
		receiver: &request.receiver,
		chain_id: request.chain_id.as_deref(),
		contract: request.contract.as_deref(),
	};
	let (digest, signer) = recover_from_input(input, &request.signature, defaults)?;

	Ok(VerifyClaimResponse {
		digest: digest.to_string(),
		signer: signer.to_checksum(None),
	})
}
