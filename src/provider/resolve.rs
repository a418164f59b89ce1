//! Runtime provider configuration.
//!
//! Combines a static [`ProviderDescriptor`] with the credential and model
//! read from the credential store. Never persisted; derived on demand.

use std::fmt;

use super::registry::ProviderDescriptor;

/// A provider ready to be called: descriptor + credential + resolved model.
#[derive(Clone)]
pub struct ProviderConfig {
    pub descriptor: &'static ProviderDescriptor,
    pub api_key: String,
    pub model: String,
}

impl ProviderConfig {
    /// Resolve the model: a non-empty override wins, else the descriptor default.
    pub fn resolve(
        descriptor: &'static ProviderDescriptor,
        api_key: impl Into<String>,
        model_override: Option<&str>,
    ) -> Self {
        let model = model_override
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(descriptor.default_model)
            .to_string();
        Self {
            descriptor,
            api_key: api_key.into(),
            model,
        }
    }

    /// Display name of the underlying provider.
    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }
}

// Credentials must never reach logs or panic messages.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.descriptor.id)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::registry;

    #[test]
    fn test_model_falls_back_to_default() {
        let desc = registry::find("openai").unwrap();
        assert_eq!(ProviderConfig::resolve(desc, "k", None).model, "gpt-3.5-turbo");
        assert_eq!(ProviderConfig::resolve(desc, "k", Some("  ")).model, "gpt-3.5-turbo");
        assert_eq!(ProviderConfig::resolve(desc, "k", Some("gpt-4o")).model, "gpt-4o");
    }

    #[test]
    fn test_debug_redacts_key() {
        let desc = registry::find("openai").unwrap();
        let config = ProviderConfig::resolve(desc, "sk-secret", None);
        let printed = format!("{:?}", config);
        assert!(!printed.contains("sk-secret"));
    }
}
