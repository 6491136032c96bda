//! Sound API client
//!
//! [`SoundClient`] is an immutable value: endpoint, API key and optional auth
//! token are fixed at construction and every call flows through parameters
//! and return values. Clones share the HTTP transport.

pub mod builder;

use crate::auth::{self, LoginResult, Signer};
use crate::error::Result;
use crate::graphql::{GraphQLClient, GraphQLRequest, GraphQLResponse, Operation};
use crate::query::{
    AudioFromTrack, AudioFromTrackData, AudioFromTrackVariables, CheckErrors, ReleaseInfo,
    ReleaseInfoData, ReleaseInfoVariables, Test,
};
use crate::types::Environment;
pub use builder::ClientBuilder;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Main Sound API client
///
/// # Examples
///
/// ```no_run
/// use sound_sdk::{Environment, SoundClient};
///
/// # async fn run() -> sound_sdk::Result<()> {
/// let client = SoundClient::new(Environment::Production, "my-api-key")?;
/// if let Some(check) = client.check().await? {
///     eprintln!("API reported {} error(s)", check.errors.len());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SoundClient {
    /// Deployment target the endpoint was derived from
    environment: Environment,
    /// Request executor
    graphql: GraphQLClient,
}

impl SoundClient {
    /// Create a client for `environment` with the default transport
    pub fn new(environment: Environment, api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new()
            .environment(environment)
            .api_key(api_key)
            .build()
    }

    /// Start a [`ClientBuilder`]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub(crate) fn from_parts(environment: Environment, graphql: GraphQLClient) -> Self {
        SoundClient {
            environment,
            graphql,
        }
    }

    /// Environment the client was built for
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// GraphQL endpoint requests are sent to
    pub fn endpoint(&self) -> &Url {
        self.graphql.endpoint()
    }

    /// Whether requests carry an auth token
    pub fn is_authenticated(&self) -> bool {
        self.graphql.is_authenticated()
    }

    /// Underlying request executor
    pub fn graphql(&self) -> &GraphQLClient {
        &self.graphql
    }

    /// Health check
    ///
    /// Returns `Some` with the server's errors when the response carries an
    /// `errors` field, `None` otherwise. Server errors are not raised.
    pub async fn check(&self) -> Result<Option<CheckErrors>> {
        let response = self.graphql.run::<Test>(None).await?;
        Ok(response.errors.map(|errors| CheckErrors { errors }))
    }

    /// Release metadata for an edition contract
    pub async fn release_info(
        &self,
        variables: ReleaseInfoVariables,
    ) -> Result<GraphQLResponse<ReleaseInfoData>> {
        self.graphql.run::<ReleaseInfo>(Some(&variables)).await
    }

    /// Playable audio for a track
    pub async fn audio_from_track(
        &self,
        track_id: impl Into<String>,
    ) -> Result<GraphQLResponse<AudioFromTrackData>> {
        let variables = AudioFromTrackVariables {
            track_id: track_id.into(),
        };
        self.graphql.run::<AudioFromTrack>(Some(&variables)).await
    }

    /// Challenge/response login with a wallet signer
    ///
    /// The returned token is not stored; build a new client with
    /// [`ClientBuilder::auth_token`] to use it.
    pub async fn login<S: Signer + ?Sized>(&self, signer: &S) -> Result<LoginResult> {
        auth::login(&self.graphql, signer).await
    }

    /// Run any typed operation
    pub async fn run<O: Operation>(
        &self,
        variables: Option<&O::Variables>,
    ) -> Result<GraphQLResponse<O::Data>> {
        self.graphql.run::<O>(variables).await
    }

    /// Run a raw GraphQL document
    pub async fn execute<T, V>(&self, query: &str, variables: Option<&V>) -> Result<GraphQLResponse<T>>
    where
        T: DeserializeOwned,
        V: Serialize + ?Sized,
    {
        let mut request = GraphQLRequest::new(query);
        if let Some(variables) = variables {
            request = request.with_variables(variables)?;
        }
        self.graphql.execute(&request).await
    }
}
