//! Static registry of supported LLM providers.
//!
//! This is the single source of truth for provider identity: the credential
//! store, the setup menus, and the response adapter all look providers up
//! here. Order is stable and is the order menus display.

use super::family::ProviderFamily;

/// Build-time description of a provider.
#[derive(Debug, PartialEq, Eq)]
pub struct ProviderDescriptor {
    /// Short registry id persisted as `ACTIVE_PROVIDER` (e.g. `"openai"`).
    pub id: &'static str,
    /// Human-readable name shown in menus and panels.
    pub name: &'static str,
    /// Config key holding the credential.
    pub env_key: &'static str,
    /// Config key holding the optional model override.
    pub model_key: &'static str,
    /// Endpoint URL. Google and HuggingFace append the model to it.
    pub api_url: &'static str,
    /// Model used when no override is configured.
    pub default_model: &'static str,
    /// Request/response contract spoken by this provider.
    pub family: ProviderFamily,
}

pub const PROVIDERS: &[ProviderDescriptor] = &[
    ProviderDescriptor {
        id: "google",
        name: "Google (Gemini)",
        env_key: "GOOGLE_API_KEY",
        model_key: "GOOGLE_MODEL",
        api_url: "https://generativelanguage.googleapis.com/v1beta/models/",
        default_model: "gemini-2.5-pro",
        family: ProviderFamily::Google,
    },
    ProviderDescriptor {
        id: "openrouter",
        name: "OpenRouter",
        env_key: "OPENROUTER_API_KEY",
        model_key: "OPENROUTER_MODEL",
        api_url: "https://openrouter.ai/api/v1/chat/completions",
        default_model: "openai/gpt-oss-20b:free",
        family: ProviderFamily::OpenRouter,
    },
    ProviderDescriptor {
        id: "openai",
        name: "OpenAI",
        env_key: "OPENAI_API_KEY",
        model_key: "OPENAI_MODEL",
        api_url: "https://api.openai.com/v1/chat/completions",
        default_model: "gpt-3.5-turbo",
        family: ProviderFamily::OpenAi,
    },
    ProviderDescriptor {
        id: "anthropic",
        name: "Anthropic (Claude)",
        env_key: "ANTHROPIC_API_KEY",
        model_key: "ANTHROPIC_MODEL",
        api_url: "https://api.anthropic.com/v1/messages",
        default_model: "claude-3-sonnet-20240229",
        family: ProviderFamily::Anthropic,
    },
    ProviderDescriptor {
        id: "xai",
        name: "xAI (Grok)",
        env_key: "XAI_API_KEY",
        model_key: "XAI_MODEL",
        api_url: "https://api.x.ai/v1/chat/completions",
        default_model: "grok-beta",
        family: ProviderFamily::OpenAi,
    },
    ProviderDescriptor {
        id: "deepseek",
        name: "DeepSeek",
        env_key: "DEEPSEEK_API_KEY",
        model_key: "DEEPSEEK_MODEL",
        api_url: "https://api.deepseek.com/v1/chat/completions",
        default_model: "deepseek-chat",
        family: ProviderFamily::OpenAi,
    },
    ProviderDescriptor {
        id: "qwen",
        name: "Qwen",
        env_key: "QWEN_API_KEY",
        model_key: "QWEN_MODEL",
        api_url: "https://dashscope.aliyuncs.com/api/v1/services/aigc/text-generation/generation",
        default_model: "qwen-turbo",
        family: ProviderFamily::OpenAi,
    },
    ProviderDescriptor {
        id: "huggingface",
        name: "HuggingFace",
        env_key: "HUGGINGFACE_API_KEY",
        model_key: "HUGGINGFACE_MODEL",
        api_url: "https://api-inference.huggingface.co/models/",
        default_model: "mistralai/Mistral-7B-Instruct-v0.2",
        family: ProviderFamily::HuggingFace,
    },
];

/// All known providers in menu order.
pub fn all() -> &'static [ProviderDescriptor] {
    PROVIDERS
}

/// Find a provider by registry id (case-insensitive).
pub fn find(id: &str) -> Option<&'static ProviderDescriptor> {
    PROVIDERS.iter().find(|p| p.id.eq_ignore_ascii_case(id.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_find_provider() {
        let provider = find("Anthropic").unwrap();
        assert_eq!(provider.id, "anthropic");
        assert_eq!(provider.family, ProviderFamily::Anthropic);

        assert!(find("nonexistent").is_none());
    }

    #[test]
    fn test_registry_order_is_stable() {
        let ids: Vec<&str> = all().iter().map(|p| p.id).collect();
        assert_eq!(
            ids,
            vec!["google", "openrouter", "openai", "anthropic", "xai", "deepseek", "qwen", "huggingface"]
        );
    }

    #[test]
    fn test_keys_are_unique() {
        let mut keys = HashSet::new();
        for p in all() {
            assert!(keys.insert(p.env_key), "duplicate key {}", p.env_key);
            assert!(keys.insert(p.model_key), "duplicate key {}", p.model_key);
        }
    }
}
