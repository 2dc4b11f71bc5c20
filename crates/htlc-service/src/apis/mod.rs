//! Request processing behind the CLI subcommands and HTTP endpoints.

pub mod claims;
pub mod signer;
