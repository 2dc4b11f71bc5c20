//! Configuration module for the MPHTLC claim signer.
//!
//! Configuration is read from a TOML file. Before parsing, `${VAR}` and
//! `${VAR:-default}` references are replaced with environment values, which is
//! how the signing key usually gets in:
//!
//! ```toml
//! [signer]
//! private_key = "${SIGNER_PK}"
//!
//! [domain]
//! chain_id = 11155111
//! verifying_contract = "0x..."
//! ```
//!
//! Every section is optional. A missing `[domain]` means Sepolia with no
//! default verifying contract. The domain name and version are the fixed
//! `MPHTLC_LGP` protocol constants and cannot be configured.

use htlc_types::{parse_address, Address, ChainId, SecretString};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the input dump
		ConfigError::Parse(err.message().to_string())
	}
}

/// Main configuration structure for the claim signer.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
	/// Signing key source.
	#[serde(default)]
	pub signer: SignerConfig,
	/// Chain id and verifying contract used when a request leaves them out.
	#[serde(default)]
	pub domain: DomainConfig,
	/// Configuration for the signer HTTP service.
	pub api: Option<ApiConfig>,
}

/// Signing key configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SignerConfig {
	/// Hex-encoded secp256k1 private key, usually `"${SIGNER_PK}"`.
	pub private_key: Option<SecretString>,
}

/// Deployment defaults for the claim domain.
///
/// Unknown keys, `name` and `version` included, are rejected.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DomainConfig {
	/// Chain id the verifying contract is deployed on.
	#[serde(default = "default_chain_id")]
	pub chain_id: u64,
	/// Address of the escrow contract that verifies claims.
	pub verifying_contract: Option<String>,
}

impl Default for DomainConfig {
	fn default() -> Self {
		Self {
			chain_id: default_chain_id(),
			verifying_contract: None,
		}
	}
}

impl DomainConfig {
	/// Returns the configured chain id as a validated value.
	pub fn chain_id(&self) -> Result<ChainId, ConfigError> {
		ChainId::new(self.chain_id).map_err(|e| ConfigError::Validation(e.to_string()))
	}

	/// Returns the configured verifying contract, if any, as a parsed address.
	pub fn verifying_contract(&self) -> Result<Option<Address>, ConfigError> {
		self.verifying_contract
			.as_deref()
			.map(parse_address)
			.transpose()
			.map_err(|e| ConfigError::Validation(format!("domain.verifying_contract: {}", e)))
	}
}

/// Returns the default chain id (Sepolia).
fn default_chain_id() -> u64 {
	11155111
}

/// Configuration for the signer HTTP service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
	/// Whether the service should be started by `serve`.
	#[serde(default = "default_api_enabled")]
	pub enabled: bool,
	/// Host address to bind the server to.
	#[serde(default = "default_api_host")]
	pub host: String,
	/// Port to bind the server to.
	#[serde(default = "default_api_port")]
	pub port: u16,
}

impl Default for ApiConfig {
	fn default() -> Self {
		Self {
			enabled: default_api_enabled(),
			host: default_api_host(),
			port: default_api_port(),
		}
	}
}

fn default_api_enabled() -> bool {
	true
}

/// Returns the default API host (localhost only).
fn default_api_host() -> String {
	"127.0.0.1".to_string()
}

/// Returns the default API port.
fn default_api_port() -> u16 {
	8080
}

/// Resolves environment variables in a string.
///
/// Replaces ${VAR_NAME} with the value of the environment variable VAR_NAME.
/// Supports default values with ${VAR_NAME:-default_value}.
///
/// Input strings are limited to 1MB to prevent ReDoS attacks.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	const MAX_INPUT_SIZE: usize = 1024 * 1024;
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut result = String::with_capacity(input.len());
	let mut last = 0;

	for cap in re.captures_iter(input) {
		let (Some(full_match), Some(var_name)) = (cap.get(0), cap.get(1)) else {
			continue;
		};
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match std::env::var(var_name.as_str()) {
			Ok(v) => v,
			Err(_) => match default_value {
				Some(default) => default.to_string(),
				None => {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{}' not found",
						var_name.as_str()
					)))
				},
			},
		};

		result.push_str(&input[last..full_match.start()]);
		result.push_str(&value);
		last = full_match.end();
	}
	result.push_str(&input[last..]);

	Ok(result)
}

impl Config {
	/// Loads configuration from a TOML file, resolving environment variables.
	pub async fn from_file(path: &str) -> Result<Self, ConfigError> {
		let content = tokio::fs::read_to_string(path).await.map_err(|e| {
			ConfigError::Io(std::io::Error::new(
				e.kind(),
				format!("Cannot read config {}: {}", path, e),
			))
		})?;
		content.parse()
	}

	/// Returns the API configuration, falling back to defaults when the
	/// `[api]` section is absent.
	pub fn api_or_default(&self) -> ApiConfig {
		self.api.clone().unwrap_or_default()
	}

	/// Validates the configuration.
	///
	/// - Chain id must be greater than 0
	/// - Verifying contract, when set, must be a 20-byte address
	/// - Signer key, when set, must not be empty
	/// - API port must be non-zero
	fn validate(&self) -> Result<(), ConfigError> {
		self.domain.chain_id()?;
		self.domain.verifying_contract()?;

		if let Some(key) = &self.signer.private_key {
			if key.is_empty() {
				return Err(ConfigError::Validation(
					"signer.private_key cannot be empty".into(),
				));
			}
		}

		if let Some(api) = &self.api {
			if api.port == 0 {
				return Err(ConfigError::Validation(
					"api.port must be greater than 0".into(),
				));
			}
		}

		Ok(())
	}
}

/// Implementation of FromStr trait for Config to enable parsing from string.
///
/// Resolves environment variables, parses TOML and validates the result.
impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::NamedTempFile;

	const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

	#[test]
	fn test_env_var_resolution() {
		std::env::set_var("HTLC_TEST_HOST", "localhost");
		std::env::set_var("HTLC_TEST_PORT", "5432");

		let input = "host = \"${HTLC_TEST_HOST}:${HTLC_TEST_PORT}\"";
		let result = resolve_env_vars(input).unwrap();
		assert_eq!(result, "host = \"localhost:5432\"");

		std::env::remove_var("HTLC_TEST_HOST");
		std::env::remove_var("HTLC_TEST_PORT");
	}

	#[test]
	fn test_env_var_with_default() {
		let input = "value = \"${HTLC_MISSING_VAR:-default_value}\"";
		let result = resolve_env_vars(input).unwrap();
		assert_eq!(result, "value = \"default_value\"");
	}

	#[test]
	fn test_missing_env_var_error() {
		let input = "value = \"${HTLC_MISSING_VAR}\"";
		let result = resolve_env_vars(input);
		assert!(result.is_err());
		assert!(result.unwrap_err().to_string().contains("HTLC_MISSING_VAR"));
	}

	#[test]
	fn test_empty_config_uses_defaults() {
		let config: Config = "".parse().unwrap();

		assert!(config.signer.private_key.is_none());
		assert_eq!(config.domain.chain_id().unwrap().get(), 11155111);
		assert!(config.domain.verifying_contract().unwrap().is_none());
		assert!(config.api.is_none());

		let api = config.api_or_default();
		assert!(api.enabled);
		assert_eq!(api.host, "127.0.0.1");
		assert_eq!(api.port, 8080);
	}

	#[test]
	fn test_config_with_env_key() {
		std::env::set_var("HTLC_TEST_SIGNER_PK", KEY);

		let config_str = r#"
[signer]
private_key = "${HTLC_TEST_SIGNER_PK}"

[domain]
chain_id = 31337
verifying_contract = "0x5FbDB2315678afecb367f032d93F642f64180aa3"

[api]
port = 9000
"#;

		let config: Config = config_str.parse().unwrap();
		let key = config.signer.private_key.as_ref().unwrap();
		key.with_exposed(|k| assert_eq!(k, KEY));
		assert_eq!(config.domain.chain_id().unwrap().get(), 31337);
		assert_eq!(
			config.domain.verifying_contract().unwrap().unwrap(),
			"0x5FbDB2315678afecb367f032d93F642f64180aa3"
				.parse::<Address>()
				.unwrap()
		);
		assert_eq!(config.api_or_default().port, 9000);
		assert_eq!(config.api_or_default().host, "127.0.0.1");

		// Key never appears in debug output
		assert!(!format!("{:?}", config).contains(&KEY[2..]));

		std::env::remove_var("HTLC_TEST_SIGNER_PK");
	}

	#[test]
	fn test_validation_failures() {
		let cases = [
			("[domain]\nchain_id = 0\n", "chain id"),
			(
				"[domain]\nverifying_contract = \"0x1234\"\n",
				"domain.verifying_contract",
			),
			("[signer]\nprivate_key = \"\"\n", "signer.private_key"),
			("[api]\nport = 0\n", "api.port"),
		];

		for (input, needle) in cases {
			let err = input.parse::<Config>().unwrap_err();
			assert!(matches!(err, ConfigError::Validation(_)), "{}", input);
			assert!(err.to_string().contains(needle), "{} -> {}", input, err);
		}
	}

	#[test]
	fn test_domain_name_and_version_are_not_configurable() {
		for input in [
			"[domain]\nname = \"NOT_MPHTLC\"\n",
			"[domain]\nversion = \"7\"\n",
		] {
			let err = input.parse::<Config>().unwrap_err();
			assert!(matches!(err, ConfigError::Parse(_)), "{}", input);
		}
	}

	#[test]
	fn test_negative_chain_id_is_parse_error() {
		let err = "[domain]\nchain_id = -1\n".parse::<Config>().unwrap_err();
		assert!(matches!(err, ConfigError::Parse(_)));
	}

	#[tokio::test]
	async fn test_from_file() {
		let mut file = NamedTempFile::new().unwrap();
		writeln!(
			file,
			"[domain]\nchain_id = 1\nverifying_contract = \"0x0000000000000000000000000000000000000001\"\n"
		)
		.unwrap();

		let config = Config::from_file(file.path().to_str().unwrap())
			.await
			.unwrap();
		assert_eq!(config.domain.chain_id().unwrap().get(), 1);
		assert!(config.domain.verifying_contract().unwrap().is_some());
	}

	#[tokio::test]
	async fn test_from_missing_file() {
		let err = Config::from_file("/nonexistent/htlc-signer.toml")
			.await
			.unwrap_err();
		assert!(matches!(err, ConfigError::Io(_)));
	}
}
