//! Provider families and their wire contracts.
//!
//! Each [`ProviderFamily`] variant owns one request/response contract: how a
//! transcript becomes a URL, headers and JSON body, and where the reply text
//! lives in the response. Families are chosen from the registry entry, so the
//! match arms below are exhaustive over every supported contract.

use serde_json::{json, Value};

use super::error::AdapterError;
use super::resolve::ProviderConfig;
use super::transport::HttpRequest;
use crate::constants::{
    ANTHROPIC_MAX_TOKENS, ANTHROPIC_VERSION, APP_TITLE, HUGGINGFACE_MAX_NEW_TOKENS,
    HUGGINGFACE_TEMPERATURE, OPENROUTER_REFERER,
};
use crate::message::{Message, Role};

/// Identifies which request/response contract a provider speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderFamily {
    /// OpenAI chat completions (also xAI, DeepSeek, Qwen).
    OpenAi,
    /// OpenAI-compatible, plus attribution headers.
    OpenRouter,
    /// Anthropic Messages API.
    Anthropic,
    /// Google Gemini `generateContent`.
    Google,
    /// HuggingFace hosted inference.
    HuggingFace,
}

impl ProviderFamily {
    /// Build the HTTP request for `messages` under this family's contract.
    pub fn build_request(&self, config: &ProviderConfig, messages: &[Message]) -> HttpRequest {
        match self {
            ProviderFamily::OpenAi => openai_request(config, messages, Vec::new()),
            ProviderFamily::OpenRouter => openai_request(
                config,
                messages,
                vec![
                    ("HTTP-Referer", OPENROUTER_REFERER.to_string()),
                    ("X-Title", APP_TITLE.to_string()),
                ],
            ),
            ProviderFamily::Anthropic => anthropic_request(config, messages),
            ProviderFamily::Google => google_request(config, messages),
            ProviderFamily::HuggingFace => huggingface_request(config, messages),
        }
    }

    /// Pull the reply text out of a successful response payload.
    pub fn extract_reply(&self, provider: &'static str, payload: &Value) -> Result<String, AdapterError> {
        match self {
            ProviderFamily::OpenAi | ProviderFamily::OpenRouter => {
                text_at(payload, "/choices/0/message/content")
                    .ok_or_else(|| unexpected(provider, payload))
            }
            ProviderFamily::Anthropic => {
                text_at(payload, "/content/0/text").ok_or_else(|| unexpected(provider, payload))
            }
            ProviderFamily::Google => {
                if let Some(text) = text_at(payload, "/candidates/0/content/parts/0/text") {
                    return Ok(text);
                }
                match payload.get("error") {
                    Some(error) => {
                        let message = error
                            .get("message")
                            .and_then(Value::as_str)
                            .map(str::to_string)
                            .unwrap_or_else(|| error.to_string());
                        Err(AdapterError::Provider { provider, message })
                    }
                    None => Err(unexpected(provider, payload)),
                }
            }
            // Output shape is unreliable here, so fall back to the raw payload.
            ProviderFamily::HuggingFace => Ok(text_at(payload, "/0/generated_text")
                .unwrap_or_else(|| payload.to_string())),
        }
    }
}

fn bearer(config: &ProviderConfig) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", config.api_key))
}

fn content_type() -> (&'static str, String) {
    ("Content-Type", "application/json".to_string())
}

fn openai_request(
    config: &ProviderConfig,
    messages: &[Message],
    extra_headers: Vec<(&'static str, String)>,
) -> HttpRequest {
    let mut headers = vec![bearer(config), content_type()];
    headers.extend(extra_headers);
    HttpRequest {
        url: config.descriptor.api_url.to_string(),
        headers,
        body: json!({
            "model": config.model,
            "messages": messages,
        }),
    }
}

fn anthropic_request(config: &ProviderConfig, messages: &[Message]) -> HttpRequest {
    let system: Vec<&str> = messages
        .iter()
        .filter(|m| m.role == Role::System)
        .map(Message::text)
        .collect();
    let turns: Vec<&Message> = messages.iter().filter(|m| m.role != Role::System).collect();

    let mut body = json!({
        "model": config.model,
        "messages": turns,
        "max_tokens": ANTHROPIC_MAX_TOKENS,
    });
    if !system.is_empty() {
        body["system"] = Value::String(system.join("\n\n"));
    }

    HttpRequest {
        url: config.descriptor.api_url.to_string(),
        headers: vec![
            ("x-api-key", config.api_key.clone()),
            content_type(),
            ("anthropic-version", ANTHROPIC_VERSION.to_string()),
        ],
        body,
    }
}

fn google_request(config: &ProviderConfig, messages: &[Message]) -> HttpRequest {
    let contents: Vec<Value> = messages
        .iter()
        .map(|m| {
            let role = match m.role {
                Role::Assistant => "model",
                Role::User | Role::System => "user",
            };
            json!({ "role": role, "parts": [{ "text": m.content }] })
        })
        .collect();

    HttpRequest {
        url: format!(
            "{}{}:generateContent?key={}",
            config.descriptor.api_url, config.model, config.api_key
        ),
        headers: vec![content_type()],
        body: json!({ "contents": contents }),
    }
}

fn huggingface_request(config: &ProviderConfig, messages: &[Message]) -> HttpRequest {
    let prompt = messages
        .iter()
        .map(|m| format!("{}: {}", m.role, m.content))
        .collect::<Vec<_>>()
        .join("\n");

    HttpRequest {
        url: format!("{}{}", config.descriptor.api_url, config.model),
        headers: vec![bearer(config), content_type()],
        body: json!({
            "inputs": prompt,
            "parameters": {
                "max_new_tokens": HUGGINGFACE_MAX_NEW_TOKENS,
                "temperature": HUGGINGFACE_TEMPERATURE,
            },
        }),
    }
}

fn text_at(payload: &Value, pointer: &str) -> Option<String> {
    payload
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn unexpected(provider: &'static str, payload: &Value) -> AdapterError {
    AdapterError::UnexpectedShape {
        provider,
        payload: payload.to_string(),
    }
}
