//! Error types for the Sound SDK
//!
//! Operations raise exactly two API-level failure kinds: an unexpected API
//! response (anything that went wrong between sending the request and holding
//! a well-shaped envelope) and a login error. Server-reported GraphQL errors on
//! every other operation are returned to the caller as data.

use crate::graphql::validation::ValidationError;
use crate::graphql::GraphQLError;
use thiserror::Error;

/// Main error type for the Sound SDK
#[derive(Error, Debug, Clone)]
pub enum SoundError {
    /// Transport failure, non-JSON body or a body that is not a GraphQL envelope
    #[error("Unexpected API response")]
    UnexpectedApiResponse(#[source] ResponseFailure),

    /// One of the login round trips returned no `data`
    #[error("Login failed for {public_address}{}", summarize(.graphql_errors))]
    Login {
        /// Lower-cased public address used for the attempt
        public_address: String,
        /// GraphQL errors reported by the server, possibly empty
        graphql_errors: Vec<GraphQLError>,
    },

    /// The external signer could not provide an address or a signature
    #[error("Signer error: {0}")]
    Signer(#[from] SignerError),

    /// Invalid client construction input
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The request could not be built from the given variables
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Underlying cause of an [`SoundError::UnexpectedApiResponse`]
#[derive(Error, Debug, Clone)]
pub enum ResponseFailure {
    /// The request never produced a response body
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body is not valid JSON
    #[error("malformed JSON: {0}")]
    MalformedJson(String),

    /// The response JSON does not have the GraphQL envelope shape
    #[error(transparent)]
    Envelope(#[from] ValidationError),

    /// The `data` payload does not fit the operation's expected shape
    #[error("unexpected data payload: {0}")]
    Payload(String),
}

/// Failure reported by a [`crate::graphql::Transport`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("transport error: {message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        TransportError { message: message.into() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        TransportError::new(error.to_string())
    }
}

/// Failure reported by a [`crate::auth::Signer`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct SignerError {
    message: String,
}

impl SignerError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        SignerError { message: message.into() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Type alias for Results using SoundError
pub type Result<T> = std::result::Result<T, SoundError>;

impl SoundError {
    /// Create a configuration error with a message
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        SoundError::Configuration(msg.into())
    }

    /// Check if this error is an unexpected API response
    pub fn is_unexpected_response(&self) -> bool {
        matches!(self, SoundError::UnexpectedApiResponse(_))
    }

    /// Check if this error is a login failure
    pub fn is_login_error(&self) -> bool {
        matches!(self, SoundError::Login { .. })
    }

    /// Cause of an unexpected API response, if this is one
    pub fn response_failure(&self) -> Option<&ResponseFailure> {
        match self {
            SoundError::UnexpectedApiResponse(failure) => Some(failure),
            _ => None,
        }
    }
}

impl From<ResponseFailure> for SoundError {
    fn from(failure: ResponseFailure) -> Self {
        SoundError::UnexpectedApiResponse(failure)
    }
}

impl From<TransportError> for SoundError {
    fn from(error: TransportError) -> Self {
        SoundError::UnexpectedApiResponse(ResponseFailure::Transport(error))
    }
}

impl From<ValidationError> for SoundError {
    fn from(error: ValidationError) -> Self {
        SoundError::UnexpectedApiResponse(ResponseFailure::Envelope(error))
    }
}

fn summarize(errors: &[GraphQLError]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let messages = errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!(": {messages}")
}
