//! GraphQL request executor for the Sound API
//!
//! Every operation goes through [`GraphQLClient::execute`]: one HTTP POST to
//! the configured endpoint, one JSON parse, one envelope validation. Anything
//! that goes wrong on that path is folded into
//! [`SoundError::UnexpectedApiResponse`] so callers handle a single failure
//! kind for the exchange itself. GraphQL `errors` reported by the server are
//! not failures here; they are returned inside the envelope.

use crate::error::{ResponseFailure, Result, SoundError, TransportError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

mod transport;
pub mod validation;

pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};

/// Header carrying the client API key on every request
pub const CLIENT_KEY_HEADER: &str = "x-sound-client-key";

/// Kind of GraphQL operation, used for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Query => f.write_str("query"),
            OperationKind::Mutation => f.write_str("mutation"),
        }
    }
}

/// A named GraphQL document with typed variables and data
///
/// Implemented by the unit structs in [`crate::query`] and
/// [`crate::mutation`].
pub trait Operation {
    /// Operation name as declared in the document
    const NAME: &'static str;
    /// Query or mutation
    const KIND: OperationKind;
    /// The GraphQL document sent as `query`
    const DOCUMENT: &'static str;

    /// Variables serialized into the request body
    type Variables: Serialize;
    /// Shape of the `data` payload on success
    type Data: DeserializeOwned;
}

/// GraphQL request body
///
/// Serializes to `{"query": ...}` or `{"query": ..., "variables": {...}}`.
/// `variables` is left out of the body entirely when none were supplied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphQLRequest {
    /// GraphQL document
    pub query: String,
    /// Variables for the operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Map<String, Value>>,
    /// Operation name for logging, never sent
    #[serde(skip)]
    pub operation_name: Option<String>,
}

impl GraphQLRequest {
    /// Create a request with no variables
    pub fn new(query: impl Into<String>) -> Self {
        GraphQLRequest {
            query: query.into(),
            variables: None,
            operation_name: None,
        }
    }

    /// Build the request for a typed operation
    pub fn for_operation<O: Operation>(variables: Option<&O::Variables>) -> Result<Self> {
        let mut request = Self::new(O::DOCUMENT).with_operation_name(O::NAME);
        if let Some(variables) = variables {
            request = request.with_variables(variables)?;
        }
        Ok(request)
    }

    /// Attach variables; they must serialize to a JSON object
    pub fn with_variables<V: Serialize + ?Sized>(mut self, variables: &V) -> Result<Self> {
        match serde_json::to_value(variables) {
            Ok(Value::Object(map)) => {
                self.variables = Some(map);
                Ok(self)
            }
            Ok(other) => Err(SoundError::InvalidRequest(format!(
                "variables must be a JSON object, got {}",
                validation::kind_of(&other)
            ))),
            Err(e) => Err(SoundError::InvalidRequest(e.to_string())),
        }
    }

    /// Set the operation name used in logs
    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    fn label(&self) -> &str {
        self.operation_name.as_deref().unwrap_or("anonymous")
    }
}

/// GraphQL response envelope
///
/// `data` is typed per operation; it defaults to a raw JSON object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphQLResponse<T = Map<String, Value>> {
    /// Response data, `None` when absent or `null`
    pub data: Option<T>,
    /// GraphQL errors, `None` when the field is absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<GraphQLError>>,
    /// Response extensions (server metadata)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
}

impl<T> GraphQLResponse<T> {
    /// Errors reported by the server, empty when the field is absent
    pub fn errors(&self) -> &[GraphQLError] {
        self.errors.as_deref().unwrap_or_default()
    }

    /// Whether the server reported any error
    pub fn has_errors(&self) -> bool {
        !self.errors().is_empty()
    }

}

/// GraphQL error structure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphQLError {
    /// Error message
    pub message: String,
    /// Error locations in the query
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<ErrorLocation>>,
    /// Path to the failing field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<PathSegment>>,
    /// Error extensions (custom error data)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
}

impl GraphQLError {
    /// Create an error with only a message
    pub fn new(message: impl Into<String>) -> Self {
        GraphQLError {
            message: message.into(),
            locations: None,
            path: None,
            extensions: None,
        }
    }
}

/// GraphQL error location
///
/// Kept as reported; servers are not consistent about integer encoding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorLocation {
    pub line: Number,
    pub column: Number,
}

/// One element of a GraphQL error path
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Field name
    Field(String),
    /// List index
    Index(Number),
}

/// Parse a raw response body into a typed envelope
///
/// Malformed JSON and a non-envelope shape are reported as a
/// [`ResponseFailure`]. A `data` payload that does not deserialize into `T`
/// is a failure only when the server reported no errors; otherwise the
/// envelope is returned with `data: None` so the errors reach the caller.
pub fn parse_response<T: DeserializeOwned>(
    body: &[u8],
) -> std::result::Result<GraphQLResponse<T>, ResponseFailure> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| ResponseFailure::MalformedJson(e.to_string()))?;
    let envelope = validation::validate_envelope(value)?;
    let has_errors = envelope.has_errors();
    let GraphQLResponse {
        data,
        errors,
        extensions,
    } = envelope;

    let data = match data.map(|data| serde_json::from_value::<T>(Value::Object(data))).transpose() {
        Ok(data) => data,
        Err(e) if has_errors => {
            debug!(error = %e, "partial data did not decode, returning errors only");
            None
        }
        Err(e) => return Err(ResponseFailure::Payload(e.to_string())),
    };

    Ok(GraphQLResponse {
        data,
        errors,
        extensions,
    })
}

/// Request executor bound to one endpoint and API key
///
/// Cheap to clone; the transport is shared.
#[derive(Clone)]
pub struct GraphQLClient {
    /// Endpoint every request is posted to
    endpoint: Url,
    /// Content type, client key and optional bearer token
    headers: HeaderMap,
    /// HTTP transport
    transport: Arc<dyn Transport>,
}

impl GraphQLClient {
    /// Create an executor for `endpoint` authenticating with `api_key`
    ///
    /// The API key (and auth token, when given) must be valid header values.
    pub fn new(
        endpoint: Url,
        api_key: &str,
        auth_token: Option<&str>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut key = HeaderValue::from_str(api_key)
            .map_err(|_| SoundError::configuration("API key is not a valid header value"))?;
        key.set_sensitive(true);
        headers.insert(HeaderName::from_static(CLIENT_KEY_HEADER), key);

        if let Some(token) = auth_token {
            let mut bearer = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| SoundError::configuration("Auth token is not a valid header value"))?;
            bearer.set_sensitive(true);
            headers.insert(AUTHORIZATION, bearer);
        }

        Ok(GraphQLClient {
            endpoint,
            headers,
            transport,
        })
    }

    /// Endpoint URL
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Whether requests carry a bearer token
    pub fn is_authenticated(&self) -> bool {
        self.headers.contains_key(AUTHORIZATION)
    }

    /// Run a typed operation
    pub async fn run<O: Operation>(
        &self,
        variables: Option<&O::Variables>,
    ) -> Result<GraphQLResponse<O::Data>> {
        let request = GraphQLRequest::for_operation::<O>(variables)?;
        debug!(operation = O::NAME, kind = %O::KIND, "running operation");
        self.execute(&request).await
    }

    /// Send one request and validate the response envelope
    ///
    /// Single attempt, no timeout.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: &GraphQLRequest,
    ) -> Result<GraphQLResponse<T>> {
        let body = serde_json::to_vec(request).map_err(|e| {
            SoundError::from(TransportError::new(format!("failed to encode request body: {e}")))
        })?;

        debug!(
            operation = request.label(),
            endpoint = %self.endpoint,
            has_variables = request.variables.is_some(),
            "sending GraphQL request"
        );

        let response = self
            .transport
            .post(HttpRequest {
                url: self.endpoint.clone(),
                headers: self.headers.clone(),
                body: body.into(),
            })
            .await
            .map_err(|e| {
                warn!(operation = request.label(), error = %e, "GraphQL request failed");
                SoundError::from(e)
            })?;

        if (200..300).contains(&response.status) {
            debug!(operation = request.label(), status = response.status, "received response");
        } else {
            warn!(
                operation = request.label(),
                status = response.status,
                "non-success HTTP status, parsing body as envelope"
            );
        }

        parse_response(&response.body).map_err(|failure| {
            warn!(operation = request.label(), error = %failure, "unexpected API response");
            SoundError::UnexpectedApiResponse(failure)
        })
    }
}

impl fmt::Debug for GraphQLClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphQLClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("authenticated", &self.is_authenticated())
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}
