//! Sound.xyz Rust SDK
//!
//! A typed client for the Sound.xyz GraphQL API. Every call posts a GraphQL
//! document with the caller's API key, validates the JSON envelope that comes
//! back, and hands server-reported errors to the caller as data.
//!
//! # Features
//!
//! - **Typed operations**: health check, release metadata and track audio
//! - **Wallet login**: challenge/response through any [`Signer`], including
//!   the in-process [`LocalWallet`]
//! - **Envelope validation**: malformed responses surface as
//!   [`SoundError::UnexpectedApiResponse`] with the offending path
//! - **Contract interface IDs**: ERC-165 selectors of the Sound contracts
//!
//! # Quick Start
//!
//! ```no_run
//! use sound_sdk::{Environment, LocalWallet, ReleaseInfoVariables, SoundClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SoundClient::new(Environment::Production, "my-api-key")?;
//!
//!     let release = client
//!         .release_info(ReleaseInfoVariables::new("0x2c7536e3605d9c16a7a3d7b1898e529396a65c23"))
//!         .await?;
//!     for error in release.errors() {
//!         eprintln!("server error: {}", error.message);
//!     }
//!
//!     let wallet = LocalWallet::from_private_key_hex("0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318")?;
//!     let login = client.login(&wallet).await?;
//!     let authed = SoundClient::builder()
//!         .api_key("my-api-key")
//!         .auth_token(login.auth_token.into_inner())
//!         .build()?;
//!     assert!(authed.is_authenticated());
//!
//!     Ok(())
//! }
//! ```

/// SDK Version constant
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod error;
pub mod types;

// GraphQL communication modules
pub mod graphql;
pub mod mutation;
pub mod query;

// Client module
pub mod client;

// Additional modules
pub mod auth;
pub mod contract;
pub mod wallet;

#[cfg(test)]
mod test_support;

// Re-exports for convenience
pub use auth::{AuthChallenge, AuthToken, LoginResult, Signer};
pub use client::builder::{ClientBuilder, SoundApiConfig};
pub use client::SoundClient;
pub use contract::{InterfaceId, INTERFACE_IDS};
pub use error::{ResponseFailure, Result, SignerError, SoundError, TransportError};
pub use types::Environment;
pub use wallet::LocalWallet;

// GraphQL re-exports
pub use graphql::{
    ErrorLocation, GraphQLClient, GraphQLError, GraphQLRequest, GraphQLResponse, Operation,
    OperationKind, PathSegment, Transport,
};
pub use query::{AudioFromTrackData, CheckErrors, ReleaseInfoData, ReleaseInfoVariables};
