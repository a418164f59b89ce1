//! XDG path resolution for termchat's credential file and cache.

use anyhow::Result;
use std::path::PathBuf;

use super::store::CredentialStore;

impl CredentialStore {
    /// Returns the platform-specific configuration directory for termchat.
    ///
    /// Returns `~/.config/termchat/` on Linux (`XDG_CONFIG_HOME/termchat`).
    ///
    /// # Errors
    ///
    /// Returns an error if the platform's config directory cannot be determined.
    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join(crate::constants::APP_NAME);
        Ok(dir)
    }

    /// Returns the platform-specific cache directory for termchat.
    ///
    /// Returns `~/.cache/termchat/` on Linux (`XDG_CACHE_HOME/termchat`).
    /// Used for storing readline history.
    pub fn cache_dir() -> Result<PathBuf> {
        let dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine cache directory"))?
            .join(crate::constants::APP_NAME);
        Ok(dir)
    }

    /// Returns the default credential file path, `~/.config/termchat/.env` on Linux.
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(crate::constants::ENV_FILENAME))
    }
}
