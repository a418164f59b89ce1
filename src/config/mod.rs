//! Credential storage for termchat.
//!
//! Provider API keys, per-provider model overrides and the active-provider
//! marker live in a flat `KEY=value` file, by default at the platform's XDG
//! config path (e.g. `~/.config/termchat/.env` on Linux).

mod envfile;
mod paths;
mod store;

pub use store::CredentialStore;
