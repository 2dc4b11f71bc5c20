//! HTTP server for the claim signer.
//!
//! Exposes the signing key's identity, raw hash signing and claim
//! sign/verify endpoints. The key is loaded once at startup and shared
//! read-only by all requests.

use crate::apis::{claims, signer};
use axum::{
	extract::State,
	response::Json,
	routing::{get, post},
	Router,
};
use htlc_claim::ClaimKey;
use htlc_config::{ApiConfig, DomainConfig};
use htlc_types::{
	APIError, AddressResponse, SignClaimRequest, SignClaimResponse, SignHashRequest,
	SignHashResponse, VerifyClaimRequest, VerifyClaimResponse,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared application state for the API server.
#[derive(Clone)]
pub struct AppState {
	/// Signing key used for every request.
	pub key: Arc<ClaimKey>,
	/// Domain defaults for claim requests that omit chain id or contract.
	pub domain: Arc<DomainConfig>,
}

/// Builds the router with all signer endpoints.
pub fn build_router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(handle_health))
		.route("/address", get(handle_address))
		.route("/signHash", post(handle_sign_hash))
		.route("/claims/sign", post(handle_sign_claim))
		.route("/claims/verify", post(handle_verify_claim))
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(CorsLayer::permissive()),
		)
		.with_state(state)
}

/// Starts the HTTP server and serves until the process is stopped.
pub async fn start_server(
	api_config: ApiConfig,
	key: ClaimKey,
	domain: DomainConfig,
) -> Result<(), Box<dyn std::error::Error>> {
	let signer_address = key.address();
	let app = build_router(AppState {
		key: Arc::new(key),
		domain: Arc::new(domain),
	});

	let bind_address = format!("{}:{}", api_config.host, api_config.port);
	let listener = TcpListener::bind(&bind_address).await?;

	tracing::info!(
		signer = %signer_address,
		"Claim signer API server starting on {}",
		bind_address
	);

	axum::serve(listener, app).await?;

	Ok(())
}

/// Handles GET /health requests.
async fn handle_health() -> &'static str {
	"ok"
}

/// Handles GET /address requests.
async fn handle_address(State(state): State<AppState>) -> Json<AddressResponse> {
	Json(signer::address_response(&state.key))
}

/// Handles POST /signHash requests.
async fn handle_sign_hash(
	State(state): State<AppState>,
	Json(request): Json<SignHashRequest>,
) -> Result<Json<SignHashResponse>, APIError> {
	match signer::process_sign_hash(&request, &state.key) {
		Ok(response) => Ok(Json(response)),
		Err(e) => {
			tracing::warn!("Sign hash request failed: {}", e);
			Err(e)
		},
	}
}

/// Handles POST /claims/sign requests.
async fn handle_sign_claim(
	State(state): State<AppState>,
	Json(request): Json<SignClaimRequest>,
) -> Result<Json<SignClaimResponse>, APIError> {
	match claims::process_sign_claim(&request, &state.key, &state.domain) {
		Ok(response) => Ok(Json(response)),
		Err(e) => {
			tracing::warn!("Claim sign request failed: {}", e);
			Err(APIError::from(e))
		},
	}
}

/// Handles POST /claims/verify requests.
async fn handle_verify_claim(
	State(state): State<AppState>,
	Json(request): Json<VerifyClaimRequest>,
) -> Result<Json<VerifyClaimResponse>, APIError> {
	match claims::process_verify_claim(&request, &state.domain) {
		Ok(response) => Ok(Json(response)),
		Err(e) => {
			tracing::warn!("Claim verify request failed: {}", e);
			Err(APIError::from(e))
		},
	}
}
