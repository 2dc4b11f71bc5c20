//! Main entry point for the MPHTLC claim signer.
//!
//! This binary signs and verifies EIP-712 claim authorizations for the
//! `MPHTLC_LGP` escrow contract, either one-shot from the command line or as an
//! HTTP signer service. The signing key comes from `--private-key`, the
//! `SIGNER_PK` environment variable or the `[signer]` config section, in that
//! order, and is handed explicitly to the signing code.

use clap::{Args as ClapArgs, Parser, Subcommand};
use htlc_claim::{claim_digest, compute_claim_struct_hash, sign_claim, ClaimKey};
use htlc_config::Config;
use htlc_types::{format_signature, parse_address, ClaimError, SecretString};
use std::path::PathBuf;

mod apis;
mod server;

use apis::claims::{recover_from_input, resolve_claim, ClaimInput};

/// Command-line arguments for the claim signer.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to an optional configuration file
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,

	/// Hex-encoded signing key
	#[arg(long, env = "SIGNER_PK", hide_env_values = true, global = true)]
	private_key: Option<String>,

	#[command(subcommand)]
	command: Command,
}

/// Claim fields shared by the claim subcommands.
#[derive(ClapArgs, Debug, Clone)]
struct ClaimArgs {
	/// 32-byte lock identifier (hex)
	#[arg(long)]
	lock_id: String,

	/// 20-byte receiver address
	#[arg(long)]
	receiver: String,

	/// Chain id of the verifying contract [default: domain.chain_id]
	#[arg(long)]
	chain_id: Option<String>,

	/// Verifying contract address [default: domain.verifying_contract]
	#[arg(long)]
	contract: Option<String>,
}

impl ClaimArgs {
	fn as_input(&self) -> ClaimInput<'_> {
		ClaimInput {
			lock_id: &self.lock_id,
			receiver: &self.receiver,
			chain_id: self.chain_id.as_deref(),
			contract: self.contract.as_deref(),
		}
	}
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Sign a claim and print the 65-byte signature
	SignClaim(ClaimArgs),
	/// Print the domain separator, struct hash and signing digest of a claim
	Digest(ClaimArgs),
	/// Recover the signer of a claim signature
	Verify {
		#[command(flatten)]
		claim: ClaimArgs,

		/// 65-byte signature (hex)
		#[arg(long)]
		signature: String,

		/// Fail unless the signature recovers to this address
		#[arg(long)]
		expected: Option<String>,
	},
	/// Print the signer address of the configured key
	Address,
	/// Run the signer HTTP service
	Serve,
}

/// Main entry point for the claim signer.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging on stderr, keeping stdout for command output
/// 3. Loads configuration if a file was given
/// 4. Runs the selected subcommand
#[tokio::main]
async fn main() {
	let args = Args::parse();

	use tracing_subscriber::{fmt, EnvFilter};

	let env_filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(args.log_level.as_str()));

	fmt()
		.with_env_filter(env_filter)
		.with_writer(std::io::stderr)
		.with_target(true)
		.init();

	if let Err(e) = run(args).await {
		eprintln!("error: {}", e);
		std::process::exit(1);
	}
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
	let config = match &args.config {
		Some(path) => {
			let config = Config::from_file(&path.to_string_lossy()).await?;
			tracing::info!("Loaded configuration from {}", path.display());
			config
		},
		None => Config::default(),
	};

	match &args.command {
		Command::SignClaim(claim_args) => {
			let key = resolve_key(args.private_key.as_deref(), &config)?;
			let (domain, claim) = resolve_claim(claim_args.as_input(), &config.domain)?;
			let signed = sign_claim(&domain, &claim, &key)?;
			println!("{}", format_signature(&signed.signature));
		},
		Command::Digest(claim_args) => {
			let (domain, claim) = resolve_claim(claim_args.as_input(), &config.domain)?;
			println!("domainSeparator: {}", domain.separator());
			println!(
				"structHash:      {}",
				compute_claim_struct_hash(&claim.lock_id, &claim.receiver)
			);
			println!("digest:          {}", claim_digest(&domain, &claim));
		},
		Command::Verify {
			claim,
			signature,
			expected,
		} => {
			let (_, signer) = recover_from_input(claim.as_input(), signature, &config.domain)?;
			println!("{}", signer.to_checksum(None));

			if let Some(expected) = expected {
				let expected = parse_address(expected)?;
				if signer != expected {
					return Err(ClaimError::InvalidSignature(format!(
						"recovered {} but expected {}",
						signer, expected
					))
					.into());
				}
			}
		},
		Command::Address => {
			let key = resolve_key(args.private_key.as_deref(), &config)?;
			println!("{}", key.address().to_checksum(None));
		},
		Command::Serve => {
			let api = config.api_or_default();
			if !api.enabled {
				tracing::warn!("API server disabled in configuration");
				return Ok(());
			}
			let key = resolve_key(args.private_key.as_deref(), &config)?;
			server::start_server(api, key, config.domain.clone()).await?;
		},
	}

	Ok(())
}

/// Picks the signing key: command line / `SIGNER_PK` first, then config.
fn resolve_key(cli_key: Option<&str>, config: &Config) -> Result<ClaimKey, ClaimError> {
	let secret = match cli_key {
		Some(key) => SecretString::from(key),
		None => config.signer.private_key.clone().ok_or_else(|| {
			ClaimError::InvalidPrivateKey(
				"no signing key: set SIGNER_PK, --private-key or signer.private_key".into(),
			)
		})?,
	};
	ClaimKey::from_secret(&secret)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::NamedTempFile;

	const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

	#[test]
	fn test_parse_sign_claim_args() {
		let args = Args::try_parse_from([
			"htlc-signer",
			"sign-claim",
			"--lock-id",
			"0x11",
			"--receiver",
			"0x22",
			"--chain-id",
			"11155111",
			"--contract",
			"0x01",
			"--private-key",
			KEY,
		])
		.unwrap();

		assert_eq!(args.log_level, "info");
		assert_eq!(args.private_key.as_deref(), Some(KEY));
		match args.command {
			Command::SignClaim(claim) => {
				assert_eq!(claim.lock_id, "0x11");
				assert_eq!(claim.chain_id.as_deref(), Some("11155111"));
			},
			other => panic!("unexpected command {:?}", other),
		}
	}

	#[test]
	fn test_parse_requires_claim_fields() {
		assert!(Args::try_parse_from(["htlc-signer", "sign-claim", "--lock-id", "0x11"]).is_err());
		assert!(Args::try_parse_from(["htlc-signer"]).is_err());
	}

	#[test]
	fn test_parse_verify_args() {
		let args = Args::try_parse_from([
			"htlc-signer",
			"verify",
			"--lock-id",
			"0x11",
			"--receiver",
			"0x22",
			"--signature",
			"0xabc",
			"--expected",
			"0x33",
		])
		.unwrap();

		match args.command {
			Command::Verify {
				signature,
				expected,
				..
			} => {
				assert_eq!(signature, "0xabc");
				assert_eq!(expected.as_deref(), Some("0x33"));
			},
			other => panic!("unexpected command {:?}", other),
		}
	}

	#[test]
	fn test_resolve_key_prefers_cli() {
		let config: Config = "[signer]\nprivate_key = \"0x0000000000000000000000000000000000000000000000000000000000000001\"\n"
			.parse()
			.unwrap();

		let from_cli = resolve_key(Some(KEY), &config).unwrap();
		assert_eq!(
			from_cli.address().to_checksum(None),
			"0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
		);

		let from_config = resolve_key(None, &config).unwrap();
		assert_eq!(
			from_config.address().to_checksum(None),
			"0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
		);
	}

	#[test]
	fn test_resolve_key_missing() {
		assert!(matches!(
			resolve_key(None, &Config::default()),
			Err(ClaimError::InvalidPrivateKey(_))
		));
	}

	#[tokio::test]
	async fn test_run_sign_claim_with_config_file() {
		let mut file = NamedTempFile::new().unwrap();
		writeln!(
			file,
			"[signer]\nprivate_key = \"{}\"\n\n[domain]\nverifying_contract = \"0x0000000000000000000000000000000000000001\"\n",
			KEY
		)
		.unwrap();

		let lock_id = format!("0x{}", "11".repeat(32));
		let receiver = format!("0x{}", "22".repeat(20));
		let args = Args::try_parse_from([
			"htlc-signer",
			"--config",
			file.path().to_str().unwrap(),
			"sign-claim",
			"--lock-id",
			lock_id.as_str(),
			"--receiver",
			receiver.as_str(),
		])
		.unwrap();

		// SIGNER_PK may be set in the environment running the tests
		let args = Args {
			private_key: None,
			..args
		};
		assert!(run(args).await.is_ok());
	}

	#[tokio::test]
	async fn test_run_verify_expected_mismatch() {
		let lock_id = format!("0x{}", "11".repeat(32));
		let receiver = format!("0x{}", "22".repeat(20));
		let args = Args::try_parse_from([
			"htlc-signer",
			"verify",
			"--lock-id",
			lock_id.as_str(),
			"--receiver",
			receiver.as_str(),
			"--chain-id",
			"11155111",
			"--contract",
			"0x0000000000000000000000000000000000000001",
			"--signature",
			"0xaa612795fe92f5dfbee0c4bc08fd25d7f1526924cfaf16373e0146489635cfd446d13ec718a84fdbc5446be9e27e41604bb292d2026dbc6ece09253b2341572c1b",
			"--expected",
			"0x0000000000000000000000000000000000000002",
		])
		.unwrap();

		assert!(run(args).await.is_err());
	}
}
