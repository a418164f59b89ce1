//! Persistent credential store.
//!
//! A [`CredentialStore`] is opened once at startup with an explicit path and
//! owns an in-memory copy of the file. Every mutation is written back before
//! the call returns; nothing is ever read from or written to the process
//! environment.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::envfile;
use crate::constants::{ACTIVE_PROVIDER_KEY, ACTIVE_PROVIDER_NAME_KEY};
use crate::provider::{registry, ProviderConfig, ProviderDescriptor};

/// Flat key-value credential file plus provider-aware accessors.
#[derive(Debug)]
pub struct CredentialStore {
    path: PathBuf,
    entries: Vec<(String, String)>,
}

impl CredentialStore {
    /// Opens the store at `path`, loading it if the file exists.
    ///
    /// A missing file is not an error: the store starts empty and the file is
    /// created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            envfile::read(&path)?
        } else {
            Vec::new()
        };
        debug!(path = %path.display(), keys = entries.len(), "opened credential store");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing file currently exists on disk.
    pub fn exists_on_disk(&self) -> bool {
        self.path.exists()
    }

    /// All stored keys in file order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.upsert(key, value);
        self.flush()
    }

    pub fn remove(&mut self, key: &str) -> Result<()> {
        if self.take(key) {
            self.flush()?;
        }
        Ok(())
    }

    /// The active provider, if one is selected and has a non-empty credential.
    ///
    /// Returns `None` for every incomplete state (nothing active, unknown id,
    /// missing or empty key); callers treat that as "not configured".
    pub fn active_provider(&self) -> Option<ProviderConfig> {
        let descriptor = registry::find(self.get(ACTIVE_PROVIDER_KEY)?)?;
        let api_key = self.credential(descriptor)?;
        Some(ProviderConfig::resolve(
            descriptor,
            api_key,
            self.get(descriptor.model_key),
        ))
    }

    /// Registry id of the active provider, as stored.
    pub fn active_id(&self) -> Option<&str> {
        self.get(ACTIVE_PROVIDER_KEY)
    }

    /// Providers with a non-empty stored credential, in registry order.
    pub fn configured_providers(&self) -> Vec<&'static ProviderDescriptor> {
        registry::all()
            .iter()
            .filter(|p| self.credential(p).is_some())
            .collect()
    }

    /// Whether `descriptor` has a non-empty stored credential.
    pub fn has_credential(&self, descriptor: &ProviderDescriptor) -> bool {
        self.credential(descriptor).is_some()
    }

    /// Configured model for `descriptor`, or its default.
    pub fn model_for(&self, descriptor: &ProviderDescriptor) -> String {
        self.get(descriptor.model_key)
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(descriptor.default_model)
            .to_string()
    }

    /// Marks `provider_id` as the active provider.
    pub fn set_active(&mut self, provider_id: &str) -> Result<&'static ProviderDescriptor> {
        let descriptor = lookup(provider_id)?;
        self.upsert(ACTIVE_PROVIDER_KEY, descriptor.id);
        self.upsert(ACTIVE_PROVIDER_NAME_KEY, descriptor.name);
        self.flush()?;
        info!(provider = descriptor.id, "active provider changed");
        Ok(descriptor)
    }

    /// Stores the credential and model for `provider_id`.
    pub fn set_credential(&mut self, provider_id: &str, credential: &str, model: &str) -> Result<()> {
        let descriptor = lookup(provider_id)?;
        anyhow::ensure!(
            !credential.trim().is_empty(),
            "Refusing to store an empty API key for {}",
            descriptor.name
        );
        self.upsert(descriptor.env_key, credential.trim());
        self.upsert(descriptor.model_key, model.trim());
        self.flush()?;
        info!(provider = descriptor.id, "credential saved");
        Ok(())
    }

    /// Deletes the credential and model for `provider_id`.
    ///
    /// If the provider was active, the active markers are cleared too so the
    /// store never points at a provider without a key. Returns whether it was
    /// the active provider.
    pub fn remove_credential(&mut self, provider_id: &str) -> Result<bool> {
        let descriptor = lookup(provider_id)?;
        let was_active = self
            .active_id()
            .is_some_and(|id| id.eq_ignore_ascii_case(descriptor.id));

        self.take(descriptor.env_key);
        self.take(descriptor.model_key);
        if was_active {
            self.take(ACTIVE_PROVIDER_KEY);
            self.take(ACTIVE_PROVIDER_NAME_KEY);
        }
        self.flush()?;
        info!(provider = descriptor.id, was_active, "credential removed");
        Ok(was_active)
    }

    /// True when the file exists and an active provider resolves.
    pub fn is_configured(&self) -> bool {
        self.exists_on_disk() && self.active_provider().is_some()
    }

    fn credential(&self, descriptor: &ProviderDescriptor) -> Option<&str> {
        self.get(descriptor.env_key).filter(|v| !v.trim().is_empty())
    }

    fn upsert(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
    }

    fn take(&mut self, key: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(k, _)| k != key);
        self.entries.len() != before
    }

    /// Atomically replaces the file with the current entries.
    fn flush(&self) -> Result<()> {
        let parent = self
            .path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty());
        if let Some(dir) = parent {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory {:?}", dir))?;
        }

        // NamedTempFile is created owner-only, so the persisted file is too.
        let mut temp_file = match parent {
            Some(dir) => NamedTempFile::new_in(dir)?,
            None => NamedTempFile::new_in(".")?,
        };
        temp_file.write_all(envfile::render(&self.entries).as_bytes())?;
        temp_file.as_file_mut().sync_all()?;
        temp_file
            .persist(&self.path)
            .with_context(|| format!("Failed to write credential file {:?}", self.path))?;

        debug!(path = %self.path.display(), keys = self.entries.len(), "credential store flushed");
        Ok(())
    }
}

fn lookup(provider_id: &str) -> Result<&'static ProviderDescriptor> {
    registry::find(provider_id).ok_or_else(|| anyhow!("Unknown provider: {}", provider_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, CredentialStore) {
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::open(dir.path().join(".env")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_missing_file_is_unconfigured() {
        let (_dir, store) = temp_store();
        assert!(!store.exists_on_disk());
        assert!(store.active_provider().is_none());
        assert!(!store.is_configured());
        assert!(store.configured_providers().is_empty());
    }

    #[test]
    fn test_credential_round_trip() {
        let (dir, mut store) = temp_store();
        store.set_credential("anthropic", "sk-ant-123", "claude-opus").unwrap();
        store.set_active("anthropic").unwrap();

        let active = store.active_provider().unwrap();
        assert_eq!(active.descriptor.id, "anthropic");
        assert_eq!(active.api_key, "sk-ant-123");
        assert_eq!(active.model, "claude-opus");
        assert!(store.is_configured());

        // Durable: a fresh store sees the same state.
        let reopened = CredentialStore::open(dir.path().join(".env")).unwrap();
        assert_eq!(reopened.get("ANTHROPIC_API_KEY"), Some("sk-ant-123"));
        assert_eq!(reopened.get("ANTHROPIC_MODEL"), Some("claude-opus"));
        assert_eq!(reopened.get("ACTIVE_PROVIDER"), Some("anthropic"));
        assert_eq!(reopened.get("ACTIVE_PROVIDER_NAME"), Some("Anthropic (Claude)"));
        assert!(reopened.is_configured());
    }

    #[test]
    fn test_empty_model_uses_default() {
        let (_dir, mut store) = temp_store();
        store.set_credential("openai", "sk-1", "").unwrap();
        store.set_active("openai").unwrap();
        assert_eq!(store.active_provider().unwrap().model, "gpt-3.5-turbo");
    }

    #[test]
    fn test_empty_credential_is_not_active() {
        let (_dir, mut store) = temp_store();
        store.set("OPENAI_API_KEY", "").unwrap();
        store.set_active("openai").unwrap();
        assert!(store.exists_on_disk());
        assert!(store.active_provider().is_none());
        assert!(!store.is_configured());
    }

    #[test]
    fn test_remove_active_clears_markers() {
        let (_dir, mut store) = temp_store();
        store.set_credential("google", "g-key", "gemini-2.5-pro").unwrap();
        store.set_active("google").unwrap();

        assert!(store.remove_credential("google").unwrap());
        assert!(store.get("GOOGLE_API_KEY").is_none());
        assert!(store.get("GOOGLE_MODEL").is_none());
        assert!(store.get("ACTIVE_PROVIDER").is_none());
        assert!(store.get("ACTIVE_PROVIDER_NAME").is_none());
        assert!(store.active_provider().is_none());
    }

    #[test]
    fn test_remove_inactive_keeps_active() {
        let (_dir, mut store) = temp_store();
        store.set_credential("google", "g-key", "").unwrap();
        store.set_credential("deepseek", "d-key", "").unwrap();
        store.set_active("google").unwrap();

        assert!(!store.remove_credential("deepseek").unwrap());
        assert_eq!(store.active_provider().unwrap().descriptor.id, "google");
    }

    #[test]
    fn test_configured_providers_in_registry_order() {
        let (_dir, mut store) = temp_store();
        store.set_credential("huggingface", "hf", "").unwrap();
        store.set_credential("google", "g", "").unwrap();
        store.set_credential("openai", "o", "").unwrap();
        store.set("XAI_API_KEY", "  ").unwrap();

        let ids: Vec<&str> = store.configured_providers().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["google", "openai", "huggingface"]);
    }

    #[test]
    fn test_unknown_provider_is_error() {
        let (_dir, mut store) = temp_store();
        assert!(store.set_active("nope").is_err());
        assert!(store.set_credential("nope", "k", "m").is_err());
        assert!(store.set_credential("openai", "   ", "m").is_err());
    }

    #[test]
    fn test_unknown_keys_are_preserved() {
        let (dir, mut store) = temp_store();
        store.set("CUSTOM_SETTING", "keep me").unwrap();
        store.set_credential("qwen", "q", "").unwrap();
        store.remove("QWEN_MODEL").unwrap();

        let reopened = CredentialStore::open(dir.path().join(".env")).unwrap();
        assert_eq!(reopened.get("CUSTOM_SETTING"), Some("keep me"));
        assert_eq!(reopened.keys().collect::<Vec<_>>(), vec!["CUSTOM_SETTING", "QWEN_API_KEY"]);
    }
}
