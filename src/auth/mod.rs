//! Wallet-signature login for the Sound API
//!
//! Login is a challenge/response exchange:
//!
//! 1. ask the [`Signer`] for its address and lower-case it,
//! 2. request a challenge nonce for that address (`GenerateAuthChallenge`),
//! 3. have the signer sign [`login_message_to_sign`] for the nonce,
//! 4. exchange the signature for an auth token (`VerifyAuthChallenge`).
//!
//! Either round trip coming back without `data` fails the whole flow with
//! [`SoundError::Login`]; there is no partial result.

use crate::error::{Result, SignerError, SoundError};
use crate::graphql::GraphQLClient;
use crate::mutation::{
    GenerateAuthChallenge, GenerateAuthChallengeVariables, VerifyAuthChallenge,
    VerifyAuthChallengeVariables,
};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Capability that owns a wallet address and can sign messages with it
///
/// Both calls may wait on an external wallet or user for an unbounded time.
#[async_trait::async_trait]
pub trait Signer: Send + Sync {
    /// Public address of the wallet, in any letter case
    async fn get_address(&self) -> std::result::Result<String, SignerError>;

    /// Sign a human-readable message, returning the signature as a string
    async fn sign_message(&self, message: &str) -> std::result::Result<String, SignerError>;
}

/// Server-issued nonce for one login attempt
///
/// The API may encode it as a JSON string or integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AuthChallenge(String);

impl AuthChallenge {
    pub fn new(nonce: impl Into<String>) -> Self {
        AuthChallenge(nonce.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuthChallenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AuthChallenge {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NonceVisitor;

        impl Visitor<'_> for NonceVisitor {
            type Value = AuthChallenge;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a nonce string or integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
                Ok(AuthChallenge::new(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
                Ok(AuthChallenge::new(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
                Ok(AuthChallenge::new(v.to_string()))
            }
        }

        deserializer.deserialize_any(NonceVisitor)
    }
}

/// Opaque bearer token returned by a successful login
///
/// `Debug` does not print the token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        AuthToken(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(..)")
    }
}

/// Result of [`crate::SoundClient::login`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    pub auth_token: AuthToken,
}

/// Message the wallet signs to prove ownership of `public_address`
///
/// Pure function of its inputs; the address is embedded as given, so callers
/// pass the lower-cased form.
pub fn login_message_to_sign(public_address: &str, challenge: &AuthChallenge) -> String {
    format!(
        "Welcome to Sound!\n\n\
         Sign this message to log in with wallet:\n{public_address}\n\n\
         This request will not trigger a blockchain transaction or cost any gas fees.\n\n\
         Nonce: {challenge}"
    )
}

/// Canonical form of an address used in every login round trip
pub fn normalize_address(address: &str) -> String {
    address.trim().to_lowercase()
}

/// Run the challenge/response login against `client`
pub async fn login<S: Signer + ?Sized>(client: &GraphQLClient, signer: &S) -> Result<LoginResult> {
    let public_address = normalize_address(&signer.get_address().await?);
    debug!(%public_address, "requesting auth challenge");

    let challenge = client
        .run::<GenerateAuthChallenge>(Some(&GenerateAuthChallengeVariables {
            public_address: public_address.clone(),
        }))
        .await?;

    let Some(nonce) = challenge.data.and_then(|data| data.generate_auth_challenge) else {
        return Err(login_error(public_address, challenge.errors));
    };

    let message = login_message_to_sign(&public_address, &nonce);
    debug!(%public_address, "waiting for signature");
    let signed_message = signer.sign_message(&message).await?;

    let verification = client
        .run::<VerifyAuthChallenge>(Some(&VerifyAuthChallengeVariables {
            public_address: public_address.clone(),
            signed_message,
        }))
        .await?;

    let Some(auth_token) = verification.data.and_then(|data| data.verify_auth_challenge) else {
        return Err(login_error(public_address, verification.errors));
    };

    info!(%public_address, "logged in");
    Ok(LoginResult { auth_token })
}

fn login_error(
    public_address: String,
    errors: Option<Vec<crate::graphql::GraphQLError>>,
) -> SoundError {
    SoundError::Login {
        public_address,
        graphql_errors: errors.unwrap_or_default(),
    }
}
