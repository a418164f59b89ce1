//! Provider client: one request, one reply.
//!
//! Contains the [`ChatClient`] struct which pairs a resolved
//! [`ProviderConfig`] with a [`Transport`], keeping provider-specific wire
//! details (see [`super::family`]) out of the chat loop.

use std::time::Duration;

use anyhow::Result;
use serde_json::Value;
use tracing::{debug, warn};

use super::error::AdapterError;
use super::resolve::ProviderConfig;
use super::transport::{ReqwestTransport, Transport};
use crate::message::Message;

/// A configured LLM provider ready to answer a transcript.
pub struct ChatClient {
    config: ProviderConfig,
    transport: Box<dyn Transport>,
}

impl ChatClient {
    /// Builds a client that talks to the provider over HTTPS.
    pub fn new(config: ProviderConfig, timeout: Option<Duration>) -> Result<Self> {
        let transport = ReqwestTransport::new(timeout)?;
        Ok(Self::with_transport(config, Box::new(transport)))
    }

    pub fn with_transport(config: ProviderConfig, transport: Box<dyn Transport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Sends the whole transcript and returns the reply text.
    ///
    /// Exactly one HTTP round-trip. A non-success status fails before the body
    /// is parsed; shape handling after that is family-specific.
    pub async fn get_response(&self, messages: &[Message]) -> Result<String, AdapterError> {
        let descriptor = self.config.descriptor;
        let request = descriptor.family.build_request(&self.config, messages);

        debug!(
            provider = descriptor.id,
            model = %self.config.model,
            messages = messages.len(),
            "sending chat request"
        );
        let response = self.transport.post_json(&request).await?;

        if !response.is_success() {
            warn!(provider = descriptor.id, status = response.status, "provider returned error status");
            return Err(AdapterError::Status {
                provider: descriptor.name,
                status: response.status,
                body: response.body,
            });
        }

        let payload: Value =
            serde_json::from_str(&response.body).map_err(|source| AdapterError::InvalidJson {
                provider: descriptor.name,
                source,
            })?;
        descriptor.family.extract_reply(descriptor.name, &payload)
    }
}
