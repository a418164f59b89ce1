//! LLM provider abstraction for termchat.
//!
//! The [`registry`] names every supported provider; [`ProviderConfig`] pairs
//! one with a credential and model; [`ChatClient`] turns a transcript into a
//! single HTTP request using the provider's [`ProviderFamily`] contract and
//! extracts the reply.

mod client;
mod error;
mod family;
mod listing;
pub mod registry;
mod resolve;
mod transport;

pub use client::ChatClient;
pub use error::AdapterError;
pub use family::ProviderFamily;
pub use listing::list_providers;
pub use registry::ProviderDescriptor;
pub use resolve::ProviderConfig;
#[allow(unused_imports)]
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};

#[cfg(test)]
pub(crate) use transport::testing;
