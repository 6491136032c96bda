//! VerifyAuthChallenge mutation
//!
//! Exchanges a signed challenge for an auth token. Second step of login.

use crate::auth::AuthToken;
use crate::graphql::{Operation, OperationKind};
use serde::{Deserialize, Serialize};

/// Mutation verifying a signed login challenge
#[derive(Debug, Clone, Copy)]
pub struct VerifyAuthChallenge;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyAuthChallengeVariables {
    /// Lower-cased wallet address, same as in the challenge request
    pub public_address: String,
    /// Signature over the login message
    pub signed_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyAuthChallengeData {
    /// `None` when the signature was rejected
    #[serde(default)]
    pub verify_auth_challenge: Option<AuthToken>,
}

impl Operation for VerifyAuthChallenge {
    const NAME: &'static str = "VerifyAuthChallenge";
    const KIND: OperationKind = OperationKind::Mutation;
    const DOCUMENT: &'static str =
        r"mutation VerifyAuthChallenge($publicAddress: String!, $signedMessage: String!) {
  verifyAuthChallenge(publicAddress: $publicAddress, signedMessage: $signedMessage)
}";

    type Variables = VerifyAuthChallengeVariables;
    type Data = VerifyAuthChallengeData;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_variables_wire_names() {
        let vars = VerifyAuthChallengeVariables {
            public_address: "0xabc".to_string(),
            signed_message: "0xsig".to_string(),
        };
        assert_eq!(
            serde_json::to_value(vars).unwrap(),
            json!({ "publicAddress": "0xabc", "signedMessage": "0xsig" })
        );
    }

    #[test]
    fn test_token_must_be_string() {
        let data: VerifyAuthChallengeData =
            serde_json::from_value(json!({ "verifyAuthChallenge": "tok" })).unwrap();
        assert_eq!(data.verify_auth_challenge.unwrap().as_str(), "tok");
        assert!(serde_json::from_value::<VerifyAuthChallengeData>(json!({ "verifyAuthChallenge": 5 })).is_err());

        let data: VerifyAuthChallengeData =
            serde_json::from_value(json!({ "verifyAuthChallenge": null })).unwrap();
        assert!(data.verify_auth_challenge.is_none());
    }
}
