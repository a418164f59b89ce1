//! Credential file operations for the `termchat config` subcommand family.

use anyhow::Result;
use colored::Colorize;

use super::ConfigAction;
use crate::config::CredentialStore;
use crate::provider::registry;

/// Dispatches a config subcommand to its handler.
pub(crate) fn handle_config(action: ConfigAction, mut store: CredentialStore) -> Result<()> {
    match action {
        ConfigAction::Show => {
            config_show(&store);
            Ok(())
        }
        ConfigAction::Use { provider } => {
            let Some(descriptor) = registry::find(&provider) else {
                anyhow::bail!("Unknown provider '{}'. See `termchat providers`.", provider);
            };
            if !store.has_credential(descriptor) {
                anyhow::bail!(
                    "No API key saved for {}. Add one with /addapi in chat.",
                    descriptor.name
                );
            }
            store.set_active(descriptor.id)?;
            println!(
                "{} Active provider is now {} ({})",
                "✓".green().bold(),
                descriptor.name.cyan(),
                store.model_for(descriptor)
            );
            Ok(())
        }
        ConfigAction::Unset { key } => {
            if store.get(&key).is_none() {
                println!("{} {} is not set", "note:".yellow().bold(), key);
                return Ok(());
            }
            store.remove(&key)?;
            println!("{} Removed {}", "✓".green().bold(), key.cyan());
            Ok(())
        }
    }
}

/// Prints every stored key; credential values are masked.
fn config_show(store: &CredentialStore) {
    println!("{} {}", "Credential file:".bold(), store.path().display());
    if !store.exists_on_disk() {
        println!("{}", "(not created yet -- run `termchat` to set up)".dimmed());
        return;
    }
    println!();
    for key in store.keys() {
        let value = store.get(key).unwrap_or_default();
        let shown = if is_secret(key) {
            mask(value)
        } else {
            value.to_string()
        };
        println!("{}={}", key.cyan(), shown);
    }
}

fn is_secret(key: &str) -> bool {
    registry::all().iter().any(|p| p.env_key == key) || key.ends_with("_API_KEY")
}

/// Keeps the last four characters of long secrets, hides the rest.
fn mask(value: &str) -> String {
    let count = value.chars().count();
    if count <= 8 {
        return "*".repeat(count);
    }
    let tail: String = value.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask() {
        assert_eq!(mask("short"), "*****");
        assert_eq!(mask("sk-1234567890"), "*********7890");
        assert_eq!(mask(""), "");
    }

    #[test]
    fn test_is_secret() {
        assert!(is_secret("OPENAI_API_KEY"));
        assert!(!is_secret("OPENAI_MODEL"));
        assert!(!is_secret("ACTIVE_PROVIDER"));
    }
}
