//! GenerateAuthChallenge mutation
//!
//! Issues a one-time nonce for a public address. First step of login.

use crate::auth::AuthChallenge;
use crate::graphql::{Operation, OperationKind};
use serde::{Deserialize, Serialize};

/// Mutation requesting a login challenge for an address
#[derive(Debug, Clone, Copy)]
pub struct GenerateAuthChallenge;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateAuthChallengeVariables {
    /// Lower-cased wallet address
    pub public_address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateAuthChallengeData {
    /// `None` when the server refused to issue a challenge
    #[serde(default)]
    pub generate_auth_challenge: Option<AuthChallenge>,
}

impl Operation for GenerateAuthChallenge {
    const NAME: &'static str = "GenerateAuthChallenge";
    const KIND: OperationKind = OperationKind::Mutation;
    const DOCUMENT: &'static str = r"mutation GenerateAuthChallenge($publicAddress: String!) {
  generateAuthChallenge(publicAddress: $publicAddress)
}";

    type Variables = GenerateAuthChallengeVariables;
    type Data = GenerateAuthChallengeData;
}
