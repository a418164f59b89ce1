//! Centralized constants for termchat.
//!
//! All magic numbers, default strings, and configuration key names live here
//! so they can be changed in one place.

/// Application name used in CLI output and directory paths.
pub const APP_NAME: &str = "termchat";

/// Display title used in headers and request metadata.
pub const APP_TITLE: &str = "TermChat";

/// Credential file name inside the config directory.
pub const ENV_FILENAME: &str = ".env";

/// Readline history filename.
pub const HISTORY_FILENAME: &str = "chat_history.txt";

/// Environment variable holding the log filter directive.
pub const LOG_ENV_VAR: &str = "TERMCHAT_LOG";

/// Slash prefix marking a command rather than a chat message.
pub const COMMAND_PREFIX: char = '/';

// --- Persisted keys ---

/// Key recording the registry id of the active provider.
pub const ACTIVE_PROVIDER_KEY: &str = "ACTIVE_PROVIDER";

/// Key recording the display name of the active provider (informational).
pub const ACTIVE_PROVIDER_NAME_KEY: &str = "ACTIVE_PROVIDER_NAME";

// --- Provider wire constants ---

/// `max_tokens` ceiling sent with every Anthropic request.
pub const ANTHROPIC_MAX_TOKENS: u32 = 4096;

/// Anthropic API version header value.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// `max_new_tokens` generation parameter for HuggingFace inference.
pub const HUGGINGFACE_MAX_NEW_TOKENS: u32 = 500;

/// Sampling temperature for HuggingFace inference.
pub const HUGGINGFACE_TEMPERATURE: f64 = 0.7;

/// `HTTP-Referer` header sent to OpenRouter.
pub const OPENROUTER_REFERER: &str = "https://github.com/termchat";

// --- Display ---

/// Maximum characters of a message body shown by `/history`.
pub const HISTORY_PREVIEW_CHARS: usize = 100;

/// Marker appended to truncated history previews.
pub const ELLIPSIS: &str = "...";

/// Fallback terminal width when the real width cannot be determined.
pub const DEFAULT_TERMINAL_WIDTH: usize = 80;
