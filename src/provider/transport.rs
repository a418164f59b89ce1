//! HTTP transport seam for provider requests.
//!
//! [`Transport`] is the only place a request leaves the process. The
//! production implementation wraps a [`reqwest::Client`]; tests substitute a
//! scripted transport so request shapes and failure paths can be checked
//! without a network.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;

use super::error::AdapterError;

/// A fully built provider request.
///
/// Not `Debug`: the Google URL carries the credential.
#[derive(Clone)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Value,
}

impl HttpRequest {
    /// Value of the first header named `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw status and body of a provider response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs one JSON POST and returns the raw response.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(&self, request: &HttpRequest) -> Result<HttpResponse, AdapterError>;
}

/// [`Transport`] backed by `reqwest`.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds the HTTP client. No timeout unless one is given.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_json(&self, request: &HttpRequest) -> Result<HttpResponse, AdapterError> {
        let mut builder = self.client.post(&request.url).json(&request.body);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        // Strip the URL from errors so an embedded key is never displayed.
        let response = builder
            .send()
            .await
            .map_err(|e| AdapterError::Transport(e.without_url().to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AdapterError::Transport(e.without_url().to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Answers every request with a fixed status and body, recording requests.
    pub(crate) struct ScriptedTransport {
        status: u16,
        body: String,
        requests: Arc<Mutex<Vec<HttpRequest>>>,
    }

    impl ScriptedTransport {
        pub(crate) fn new(status: u16, body: impl Into<String>) -> Self {
            Self {
                status,
                body: body.into(),
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub(crate) fn ok(payload: Value) -> Self {
            Self::new(200, payload.to_string())
        }

        /// Handle to the recorded requests, usable after the transport is boxed.
        pub(crate) fn requests(&self) -> Arc<Mutex<Vec<HttpRequest>>> {
            Arc::clone(&self.requests)
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn post_json(&self, request: &HttpRequest) -> Result<HttpResponse, AdapterError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(HttpResponse {
                status: self.status,
                body: self.body.clone(),
            })
        }
    }
}
