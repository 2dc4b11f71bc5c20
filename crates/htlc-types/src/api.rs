//! API types for the signer HTTP service.
//!
//! Request and response bodies are plain strings on the wire (hex for bytes,
//! decimal for chain ids) and are validated into claim types by the handlers.
//! Request chain ids are also accepted as JSON numbers.

use crate::claim::ClaimError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Response body of `GET /address`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddressResponse {
	/// Signer address in EIP-55 form.
	pub address: String,
	/// Uncompressed SEC1 public key (`0x04 || x || y`).
	pub pubkey_uncompressed: String,
}

/// Request body of `POST /signHash`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignHashRequest {
	/// 32-byte hash to sign, hex encoded.
	pub hash_hex: String,
}

/// Response body of `POST /signHash`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignHashResponse {
	pub r: String,
	pub s: String,
	/// Recovery indicator in the 27/28 form.
	pub v: u8,
	/// Full 65-byte signature.
	pub signature: String,
}

/// Request body of `POST /claims/sign`.
///
/// `chain_id` and `contract` fall back to the service's configured domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignClaimRequest {
	pub lock_id: String,
	pub receiver: String,
	#[serde(default, deserialize_with = "deserialize_chain_id")]
	pub chain_id: Option<String>,
	#[serde(default)]
	pub contract: Option<String>,
}

/// Reads an optional chain id given either as a JSON number or as a decimal
/// string. Range checks happen when the value is parsed into a `ChainId`.
fn deserialize_chain_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: serde::Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum ChainIdField {
		Number(u64),
		Text(String),
	}

	Ok(
		Option::<ChainIdField>::deserialize(deserializer)?.map(|field| match field {
			ChainIdField::Number(n) => n.to_string(),
			ChainIdField::Text(s) => s,
		}),
	)
}

/// Response body of `POST /claims/sign`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignClaimResponse {
	/// EIP-712 signing digest.
	pub digest: String,
	pub signature: String,
	/// Address of the signing key.
	pub signer: String,
}

/// Request body of `POST /claims/verify`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyClaimRequest {
	pub lock_id: String,
	pub receiver: String,
	pub signature: String,
	#[serde(default, deserialize_with = "deserialize_chain_id")]
	pub chain_id: Option<String>,
	#[serde(default)]
	pub contract: Option<String>,
}

/// Response body of `POST /claims/verify`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyClaimResponse {
	pub digest: String,
	/// Address recovered from the signature over `digest`.
	pub signer: String,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
	/// Error type/code.
	pub error: String,
	/// Human-readable description.
	pub message: String,
}

/// API error type with HTTP status mapping.
#[derive(Debug, Clone)]
pub enum APIError {
	/// Bad request with validation errors (400)
	BadRequest { error_type: String, message: String },
	/// Internal server error (500)
	InternalServerError { error_type: String, message: String },
}

impl APIError {
	/// Get the HTTP status code for this error.
	pub fn status_code(&self) -> u16 {
		match self {
			APIError::BadRequest { .. } => 400,
			APIError::InternalServerError { .. } => 500,
		}
	}

	/// Convert to ErrorResponse for JSON serialization.
	pub fn to_error_response(&self) -> ErrorResponse {
		match self {
			APIError::BadRequest {
				error_type,
				message,
			}
			| APIError::InternalServerError {
				error_type,
				message,
			} => ErrorResponse {
				error: error_type.clone(),
				message: message.clone(),
			},
		}
	}
}

impl From<ClaimError> for APIError {
	fn from(err: ClaimError) -> Self {
		APIError::BadRequest {
			error_type: err.code().to_string(),
			message: err.to_string(),
		}
	}
}

impl fmt::Display for APIError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			APIError::BadRequest { message, .. } => write!(f, "Bad Request: {}", message),
			APIError::InternalServerError { message, .. } => {
				write!(f, "Internal Server Error: {}", message)
			},
		}
	}
}

impl std::error::Error for APIError {}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for APIError {
	fn into_response(self) -> axum::response::Response {
		use axum::{http::StatusCode, response::Json};

		let status = match self.status_code() {
			400 => StatusCode::BAD_REQUEST,
			_ => StatusCode::INTERNAL_SERVER_ERROR,
		};

		(status, Json(self.to_error_response())).into_response()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_claim_error_maps_to_bad_request() {
		let err = APIError::from(ClaimError::InvalidLockId("expected 32 bytes, got 31".into()));
		assert_eq!(err.status_code(), 400);

		let body = err.to_error_response();
		assert_eq!(body.error, "INVALID_LOCK_ID");
		assert!(body.message.contains("expected 32 bytes"));
	}

	#[test]
	fn test_sign_claim_request_optional_fields() {
		let req: SignClaimRequest =
			serde_json::from_str(r#"{"lock_id":"0x11","receiver":"0x22"}"#).unwrap();
		assert!(req.chain_id.is_none());
		assert!(req.contract.is_none());
	}

	#[test]
	fn test_chain_id_accepts_number_or_string() {
		let numeric: SignClaimRequest = serde_json::from_str(
			r#"{"lock_id":"0x11","receiver":"0x22","chain_id":11155111}"#,
		)
		.unwrap();
		assert_eq!(numeric.chain_id.as_deref(), Some("11155111"));

		let text: VerifyClaimRequest = serde_json::from_str(
			r#"{"lock_id":"0x11","receiver":"0x22","signature":"0x","chain_id":"1"}"#,
		)
		.unwrap();
		assert_eq!(text.chain_id.as_deref(), Some("1"));

		let null: SignClaimRequest = serde_json::from_str(
			r#"{"lock_id":"0x11","receiver":"0x22","chain_id":null}"#,
		)
		.unwrap();
		assert!(null.chain_id.is_none());

		assert!(serde_json::from_str::<SignClaimRequest>(
			r#"{"lock_id":"0x11","receiver":"0x22","chain_id":true}"#
		)
		.is_err());
	}
}
