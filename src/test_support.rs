//! In-process doubles for the transport and signer seams

use crate::auth::Signer;
use crate::error::{SignerError, TransportError};
use crate::graphql::{HttpRequest, HttpResponse, Transport};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

impl HttpRequest {
    /// Request body parsed as JSON
    pub fn json_body(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

/// Transport that replays queued responses and records every request
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: &str) {
        self.replies.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            body: body.to_owned().into(),
        }));
    }

    pub fn respond_json(&self, body: &Value) {
        self.respond(200, &body.to_string());
    }

    pub fn fail(&self, message: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(TransportError::new(message)));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::new("no scripted reply")))
    }
}

/// Signer with a fixed address that "signs" by tagging the message
#[derive(Debug)]
pub struct MockSigner {
    address: String,
    signed: Mutex<Vec<String>>,
    reject: bool,
}

impl MockSigner {
    pub fn new(address: &str) -> Self {
        MockSigner {
            address: address.to_string(),
            signed: Mutex::new(Vec::new()),
            reject: false,
        }
    }

    pub fn rejecting(address: &str) -> Self {
        MockSigner {
            reject: true,
            ..Self::new(address)
        }
    }

    pub fn signed_messages(&self) -> Vec<String> {
        self.signed.lock().unwrap().clone()
    }

    pub fn signature_for(message: &str) -> String {
        format!("sig:{}", message.len())
    }
}

#[async_trait::async_trait]
impl Signer for MockSigner {
    async fn get_address(&self) -> Result<String, SignerError> {
        Ok(self.address.clone())
    }

    async fn sign_message(&self, message: &str) -> Result<String, SignerError> {
        self.signed.lock().unwrap().push(message.to_string());
        if self.reject {
            return Err(SignerError::new("user rejected the request"));
        }
        Ok(Self::signature_for(message))
    }
}
