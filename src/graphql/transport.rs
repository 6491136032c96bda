//! HTTP transport seam
//!
//! The executor only needs "POST these bytes, give me the status and body
//! back". [`ReqwestTransport`] is the default; tests and embedders can supply
//! their own [`Transport`].

use crate::error::TransportError;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{Client, Url};
use std::fmt;

/// Outgoing POST request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Raw response: status code and body bytes
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

/// Sends a single HTTP POST
///
/// Implementations must not retry; the executor treats every error as final.
#[async_trait::async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// [`Transport`] backed by a `reqwest::Client`
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured client (proxies, TLS roots, timeouts)
    pub fn with_client(client: Client) -> Self {
        ReqwestTransport { client }
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .post(request.url)
            .headers(request.headers)
            .body(request.body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(HttpResponse { status, body })
    }
}
