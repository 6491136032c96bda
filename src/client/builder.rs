//! ClientBuilder for fluent SoundClient configuration
//!
//! # Examples
//!
//! ```no_run
//! use sound_sdk::client::ClientBuilder;
//! use sound_sdk::Environment;
//!
//! # fn main() -> sound_sdk::Result<()> {
//! // Production client
//! let client = ClientBuilder::new().api_key("my-api-key").build()?;
//!
//! // Staging, authenticated with a token from an earlier login
//! let client = ClientBuilder::new()
//!     .environment(Environment::Staging)
//!     .api_key("my-api-key")
//!     .auth_token("token-from-login")
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use crate::client::SoundClient;
use crate::error::{Result, SoundError};
use crate::graphql::{GraphQLClient, ReqwestTransport, Transport};
use crate::types::Environment;
use reqwest::Url;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

/// Builder for creating SoundClient instances with fluent API
#[derive(Clone, Default)]
pub struct ClientBuilder {
    /// Deployment target, production unless set
    environment: Environment,
    /// Client key sent on every request (required)
    api_key: Option<String>,
    /// Bearer token from a previous login
    auth_token: Option<String>,
    /// Overrides the environment's endpoint
    endpoint: Option<String>,
    /// Custom HTTP transport
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    /// Create a new ClientBuilder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the deployment environment
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Set the API key sent as `x-sound-client-key`
    pub fn api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Attach an auth token obtained from [`SoundClient::login`]
    pub fn auth_token<S: Into<String>>(mut self, token: S) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Send requests to `endpoint` instead of the environment's URL
    pub fn endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Use a custom transport
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::sync::Arc;
    /// use sound_sdk::client::ClientBuilder;
    /// use sound_sdk::graphql::ReqwestTransport;
    ///
    /// let http = reqwest::Client::builder().build().unwrap();
    /// let builder = ClientBuilder::new()
    ///     .transport(Arc::new(ReqwestTransport::with_client(http)));
    /// ```
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    fn resolve_endpoint(&self) -> Result<Url> {
        let raw = self
            .endpoint
            .as_deref()
            .unwrap_or_else(|| self.environment.endpoint());
        let url = Url::parse(raw)
            .map_err(|e| SoundError::configuration(format!("Invalid endpoint URL {raw}: {e}")))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(SoundError::configuration(format!(
                "Unsupported endpoint scheme: {other}"
            ))),
        }
    }

    /// Build the SoundClient with the configured settings
    pub fn build(self) -> Result<SoundClient> {
        let api_key = match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => return Err(SoundError::configuration("An API key must be specified")),
        };
        let endpoint = self.resolve_endpoint()?;
        let transport = self
            .transport
            .clone()
            .unwrap_or_else(|| Arc::new(ReqwestTransport::new()));

        let graphql = GraphQLClient::new(endpoint, api_key, self.auth_token.as_deref(), transport)?;
        Ok(SoundClient::from_parts(self.environment, graphql))
    }
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("environment", &self.environment)
            .field("api_key", &self.api_key.as_ref().map(|_| ".."))
            .field("auth_token", &self.auth_token.as_ref().map(|_| ".."))
            .field("endpoint", &self.endpoint)
            .field("custom_transport", &self.transport.is_some())
            .finish()
    }
}

/// Client settings loadable from JSON or any serde format
///
/// ```
/// use sound_sdk::SoundApiConfig;
///
/// let config: SoundApiConfig =
///     serde_json::from_str(r#"{"environment": "preview", "apiKey": "k"}"#).unwrap();
/// let client = config.into_client().unwrap();
/// assert_eq!(client.endpoint().as_str(), "https://preview.api.sound.xyz/graphql");
/// ```
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoundApiConfig {
    #[serde(default)]
    pub environment: Environment,
    pub api_key: String,
    #[serde(default)]
    pub auth_token: Option<String>,
}

impl SoundApiConfig {
    /// Builder preloaded with these settings
    pub fn builder(self) -> ClientBuilder {
        let builder = ClientBuilder::new()
            .environment(self.environment)
            .api_key(self.api_key);
        match self.auth_token {
            Some(token) => builder.auth_token(token),
            None => builder,
        }
    }

    /// Build a client with the default transport
    pub fn into_client(self) -> Result<SoundClient> {
        self.builder().build()
    }
}

impl fmt::Debug for SoundApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoundApiConfig")
            .field("environment", &self.environment)
            .field("has_auth_token", &self.auth_token.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::CLIENT_KEY_HEADER;
    use crate::test_support::ScriptedTransport;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_builder_default() {
        let builder = ClientBuilder::new();
        assert_eq!(builder.environment, Environment::Production);
        assert!(builder.api_key.is_none());
        assert!(builder.endpoint.is_none());
    }

    #[test]
    fn test_build_uses_environment_endpoint() {
        for env in Environment::ALL {
            let client = ClientBuilder::new()
                .environment(env)
                .api_key("k")
                .build()
                .unwrap();
            assert_eq!(client.endpoint().as_str(), env.endpoint());
            assert_eq!(client.environment(), env);
            assert!(!client.is_authenticated());
        }
    }

    #[test]
    fn test_missing_api_key() {
        let err = ClientBuilder::new().build().unwrap_err();
        assert!(err.to_string().contains("API key"));

        let err = ClientBuilder::new().api_key("").build().unwrap_err();
        assert!(matches!(err, SoundError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_api_key_sent_as_given() {
        let transport = ScriptedTransport::new();
        transport.respond_json(&json!({ "data": { "__typename": "Query" } }));

        let client = ClientBuilder::new()
            .api_key(" key-with-padding ")
            .transport(transport.clone())
            .build()
            .unwrap();
        client.check().await.unwrap();

        let sent = &transport.requests()[0];
        assert_eq!(sent.headers[CLIENT_KEY_HEADER].as_bytes(), b" key-with-padding ");
    }

    #[test]
    fn test_endpoint_override() {
        let client = ClientBuilder::new()
            .api_key("k")
            .endpoint("http://127.0.0.1:9999/graphql")
            .build()
            .unwrap();
        assert_eq!(client.endpoint().as_str(), "http://127.0.0.1:9999/graphql");

        for bad in ["not a url", "ftp://example.com/graphql"] {
            let err = ClientBuilder::new().api_key("k").endpoint(bad).build().unwrap_err();
            assert!(matches!(err, SoundError::Configuration(_)), "{bad}");
        }
    }

    #[test]
    fn test_invalid_header_values() {
        let err = ClientBuilder::new().api_key("bad\nkey").build().unwrap_err();
        assert!(matches!(err, SoundError::Configuration(_)));

        let err = ClientBuilder::new()
            .api_key("k")
            .auth_token("bad\ntoken")
            .build()
            .unwrap_err();
        assert!(matches!(err, SoundError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_auth_token_sent_as_bearer() {
        let transport = ScriptedTransport::new();
        transport.respond_json(&json!({ "data": { "__typename": "Query" } }));

        let client = ClientBuilder::new()
            .api_key("key-1")
            .auth_token("tok-1")
            .transport(transport.clone())
            .build()
            .unwrap();
        assert!(client.is_authenticated());
        client.check().await.unwrap();

        let sent = &transport.requests()[0];
        assert_eq!(sent.headers[CLIENT_KEY_HEADER], "key-1");
        assert_eq!(sent.headers[reqwest::header::AUTHORIZATION], "Bearer tok-1");
    }

    #[test]
    fn test_debug_hides_secrets() {
        let builder = ClientBuilder::new().api_key("secret-key").auth_token("secret-token");
        let rendered = format!("{builder:?}");
        assert!(!rendered.contains("secret-key"));
        assert!(!rendered.contains("secret-token"));

        let client = builder.build().unwrap();
        assert!(!format!("{client:?}").contains("secret"));
    }

    #[test]
    fn test_config_from_json() {
        let config: SoundApiConfig = serde_json::from_value(json!({
            "environment": "staging",
            "apiKey": "k",
            "authToken": "t"
        }))
        .unwrap();
        assert_eq!(config.environment, Environment::Staging);
        assert_eq!(config.auth_token.as_deref(), Some("t"));

        let client = config.into_client().unwrap();
        assert_eq!(client.endpoint().as_str(), Environment::Staging.endpoint());
        assert!(client.is_authenticated());
    }

    #[test]
    fn test_config_defaults_to_production() {
        let config: SoundApiConfig = serde_json::from_value(json!({ "apiKey": "k" })).unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert!(config.auth_token.is_none());
        assert!(!format!("{config:?}").contains("\"k\""));

        assert!(serde_json::from_value::<SoundApiConfig>(json!({ "environment": "mainnet", "apiKey": "k" })).is_err());
        assert!(serde_json::from_value::<SoundApiConfig>(json!({ "environment": "production" })).is_err());
    }
}
