//! GraphQL mutations used by the login flow
//!
//! Each mutation is a unit struct implementing [`crate::graphql::Operation`],
//! pairing the document with its variables and data types.

pub mod generate_auth_challenge;
pub mod verify_auth_challenge;

pub use generate_auth_challenge::{
    GenerateAuthChallenge, GenerateAuthChallengeData, GenerateAuthChallengeVariables,
};
pub use verify_auth_challenge::{
    VerifyAuthChallenge, VerifyAuthChallengeData, VerifyAuthChallengeVariables,
};
