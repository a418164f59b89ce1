//! Failure modes of a single provider round-trip.

use thiserror::Error;

/// Error returned by [`super::ChatClient::get_response`].
///
/// Every variant aborts the current chat turn only; the REPL keeps running.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The request never produced an HTTP response (DNS, TLS, timeout...).
    #[error("request failed: {0}")]
    Transport(String),

    /// The provider answered with a non-success status.
    #[error("{provider} returned HTTP {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// The response body was not valid JSON.
    #[error("{provider} returned a non-JSON body: {source}")]
    InvalidJson {
        provider: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The provider reported an error object inside a success payload.
    #[error("{provider} API error: {message}")]
    Provider {
        provider: &'static str,
        message: String,
    },

    /// The payload did not contain a reply where one was expected.
    #[error("unexpected response format from {provider}: {payload}")]
    UnexpectedShape {
        provider: &'static str,
        payload: String,
    },
}
