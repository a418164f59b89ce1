//! Interactive credential management flows.
//!
//! First-run setup and the `/addapi`, `/switch` and `/deleteapi` commands.
//! Each flow shows a numbered menu where `0` cancels, reads answers through
//! a [`Prompter`], and commits to the [`CredentialStore`] only at the end.

use anyhow::Result;
use colored::{Color, Colorize};

use super::prompt::Prompter;
use crate::config::CredentialStore;
use crate::output;
use crate::provider::{registry, ProviderDescriptor};

const CANCEL: &str = "0";

/// Runs first-time setup. Returns whether a provider was configured.
pub(crate) fn first_run(store: &mut CredentialStore, prompter: &mut dyn Prompter) -> Result<bool> {
    output::panel(
        Some("🎉 First Time Setup"),
        &format!(
            "{}\n\n{}",
            "Welcome to TermChat!".cyan().bold(),
            "Let's get you set up. Choose an LLM provider to start chatting."
        ),
        Color::Cyan,
    );

    let Some(provider) = choose_provider(prompter, "Choose your LLM provider (0 - Cancel)")? else {
        println!("{}", "Setup cancelled. You can run setup again later.".yellow());
        return Ok(false);
    };
    let Some((api_key, model)) = prompt_credentials(prompter, provider)? else {
        println!("{}", "Setup cancelled.".yellow());
        return Ok(false);
    };

    store.set_credential(provider.id, &api_key, &model)?;
    store.set_active(provider.id)?;

    output::success(&format!(
        "API key saved!\nActive Provider: {}\nModel: {}",
        provider.name.cyan().bold(),
        model.cyan().bold()
    ));
    Ok(true)
}

/// `/addapi`: store a key for any provider, optionally making it active.
pub(crate) fn add_api_key(store: &mut CredentialStore, prompter: &mut dyn Prompter) -> Result<()> {
    output::panel(None, &"Add a new API key".cyan().bold().to_string(), Color::Cyan);

    let Some(provider) = choose_provider(prompter, "Choose a provider (0 - Cancel)")? else {
        println!("{}", "Operation cancelled.".yellow());
        return Ok(());
    };

    if store.has_credential(provider) {
        let overwrite = prompter.confirm(&format!(
            "{} already has a saved API key. Overwrite it?",
            provider.name
        ))?;
        if !overwrite {
            println!("{}", "Operation cancelled.".yellow());
            return Ok(());
        }
    }

    let Some((api_key, model)) = prompt_credentials(prompter, provider)? else {
        println!("{}", "Operation cancelled.".yellow());
        return Ok(());
    };

    store.set_credential(provider.id, &api_key, &model)?;
    output::success(&format!(
        "{} API key saved!\nModel: {}",
        provider.name,
        model.cyan().bold()
    ));

    if prompter.confirm(&format!("Make {} the active provider?", provider.name))? {
        store.set_active(provider.id)?;
        println!(
            "{} Active provider is now {} ({})",
            "✓".green().bold(),
            provider.name.cyan().bold(),
            model
        );
    }
    Ok(())
}

/// `/switch`: pick which saved provider is active.
pub(crate) fn switch_provider(store: &mut CredentialStore, prompter: &mut dyn Prompter) -> Result<()> {
    output::panel(None, &"Change active provider".cyan().bold().to_string(), Color::Cyan);

    let saved = store.configured_providers();
    if saved.is_empty() {
        output::warning("No API keys saved yet!\nUse /addapi to add one first.");
        return Ok(());
    }

    let Some(provider) = choose_saved(store, prompter, &saved, "Which provider should be active? (0 - Cancel)")? else {
        println!("{}", "Operation cancelled.".yellow());
        return Ok(());
    };

    store.set_active(provider.id)?;
    output::success(&format!(
        "Active provider changed!\nNew Active Provider: {}\nModel: {}",
        provider.name.cyan().bold(),
        store.model_for(provider).cyan().bold()
    ));
    Ok(())
}

/// `/deleteapi`: remove a saved key after confirmation.
pub(crate) fn delete_api_key(store: &mut CredentialStore, prompter: &mut dyn Prompter) -> Result<()> {
    output::panel(None, &"Delete an API key".red().bold().to_string(), Color::Red);

    let saved = store.configured_providers();
    if saved.is_empty() {
        output::warning("No API keys saved!");
        return Ok(());
    }

    let Some(provider) = choose_saved(store, prompter, &saved, "Which provider's key should be deleted? (0 - Cancel)")? else {
        println!("{}", "Operation cancelled.".yellow());
        return Ok(());
    };

    if !prompter.confirm(&format!("Delete the API key for {}?", provider.name))? {
        println!("{}", "Operation cancelled.".dimmed());
        return Ok(());
    }

    if store.remove_credential(provider.id)? {
        output::success(&format!(
            "{} API key deleted!\n{} No provider is active now. Use /switch to pick one.",
            provider.name,
            "Note:".yellow()
        ));
    } else {
        output::success(&format!("{} API key deleted!", provider.name));
    }
    Ok(())
}

/// Shows the full registry and returns the chosen provider, `None` on cancel.
fn choose_provider(
    prompter: &mut dyn Prompter,
    question: &str,
) -> Result<Option<&'static ProviderDescriptor>> {
    let providers = registry::all();
    let mut rows: Vec<Vec<String>> = providers
        .iter()
        .enumerate()
        .map(|(i, p)| vec![(i + 1).to_string(), p.name.to_string()])
        .collect();
    rows.push(vec![CANCEL.to_string(), "Cancel / Skip".to_string()]);
    output::panel(
        Some("Available LLM Providers"),
        &output::table(&["Number", "Provider"], &rows, &[Some(Color::Cyan), None]),
        Color::Blue,
    );

    let choice = prompter.choose(question, &menu_choices(providers.len()))?;
    Ok(pick(providers.iter().collect::<Vec<_>>().as_slice(), &choice))
}

/// Shows saved providers with model and status; returns the chosen one.
fn choose_saved(
    store: &CredentialStore,
    prompter: &mut dyn Prompter,
    saved: &[&'static ProviderDescriptor],
    question: &str,
) -> Result<Option<&'static ProviderDescriptor>> {
    let active = store.active_id();
    let mut rows: Vec<Vec<String>> = saved
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let status = if active.is_some_and(|a| a.eq_ignore_ascii_case(p.id)) {
                "✓ Active"
            } else {
                ""
            };
            vec![
                (i + 1).to_string(),
                p.name.to_string(),
                store.model_for(p),
                status.to_string(),
            ]
        })
        .collect();
    rows.push(vec![CANCEL.to_string(), "Cancel".to_string(), String::new(), String::new()]);
    output::panel(
        Some("Saved API Keys"),
        &output::table(
            &["Number", "Provider", "Model", "Status"],
            &rows,
            &[Some(Color::Cyan), None, Some(Color::BrightBlack), Some(Color::Green)],
        ),
        Color::Blue,
    );

    let choice = prompter.choose(question, &menu_choices(saved.len()))?;
    Ok(pick(saved, &choice))
}

/// Reads the API key (masked) and model. `None` if the user backs out.
fn prompt_credentials(
    prompter: &mut dyn Prompter,
    provider: &ProviderDescriptor,
) -> Result<Option<(String, String)>> {
    println!();
    println!("{}", format!("Enter your {} API key", provider.name).yellow().bold());
    println!("{}", "Input is masked; leave empty and press Enter to cancel.".dimmed());

    let api_key = prompter.secret("API Key")?;
    let api_key = api_key.trim();
    if api_key.is_empty() {
        println!("{}", "No API key entered.".yellow());
        return Ok(None);
    }
    println!(
        "{}",
        format!("✓ API key received: {}", "*".repeat(api_key.chars().count())).green()
    );

    println!();
    println!("{}", format!("Default model: {}", provider.default_model).dimmed());
    println!("{}", "Press Enter to use the default, or type 'cancel' to cancel.".dimmed());
    let model = prompter.ask_with_default("Model name", provider.default_model)?;
    if model.eq_ignore_ascii_case("cancel") {
        return Ok(None);
    }
    Ok(Some((api_key.to_string(), model)))
}

/// `["0", "1", ..., "n"]`.
fn menu_choices(n: usize) -> Vec<String> {
    (0..=n).map(|i| i.to_string()).collect()
}

/// Maps a 1-based menu answer onto `items`; `0` or anything else is `None`.
fn pick(
    items: &[&'static ProviderDescriptor],
    choice: &str,
) -> Option<&'static ProviderDescriptor> {
    let index: usize = choice.parse().ok()?;
    index.checked_sub(1).and_then(|i| items.get(i)).copied()
}

#[cfg(test)]
mod tests {
    use super::super::prompt::testing::ScriptedPrompter;
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, CredentialStore) {
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::open(dir.path().join(".env")).unwrap();
        (dir, store)
    }

    fn position(id: &str) -> String {
        let idx = registry::all().iter().position(|p| p.id == id).unwrap();
        (idx + 1).to_string()
    }

    #[test]
    fn test_first_run_configures_provider() {
        let (_dir, mut store) = temp_store();
        let openai = position("openai");
        let mut prompter = ScriptedPrompter::new(&[&openai, "sk-test", ""]);

        assert!(first_run(&mut store, &mut prompter).unwrap());
        let active = store.active_provider().unwrap();
        assert_eq!(active.descriptor.id, "openai");
        assert_eq!(active.api_key, "sk-test");
        assert_eq!(active.model, "gpt-3.5-turbo");
        assert!(store.is_configured());
    }

    #[test]
    fn test_first_run_cancel_paths() {
        let (_dir, mut store) = temp_store();
        let mut prompter = ScriptedPrompter::new(&["0"]);
        assert!(!first_run(&mut store, &mut prompter).unwrap());

        let mut prompter = ScriptedPrompter::new(&["1", ""]);
        assert!(!first_run(&mut store, &mut prompter).unwrap());

        let mut prompter = ScriptedPrompter::new(&["1", "key", "cancel"]);
        assert!(!first_run(&mut store, &mut prompter).unwrap());

        assert!(!store.exists_on_disk());
    }

    #[test]
    fn test_add_api_key_declined_overwrite_keeps_old_key() {
        let (_dir, mut store) = temp_store();
        store.set_credential("deepseek", "old", "").unwrap();
        let mut prompter = ScriptedPrompter::new(&[&position("deepseek"), "n"]);

        add_api_key(&mut store, &mut prompter).unwrap();
        assert_eq!(store.get("DEEPSEEK_API_KEY"), Some("old"));
        assert_eq!(prompter.remaining(), 0);
    }

    #[test]
    fn test_add_api_key_and_activate() {
        let (_dir, mut store) = temp_store();
        let mut prompter =
            ScriptedPrompter::new(&[&position("huggingface"), "hf_token", "gpt2", "y"]);

        add_api_key(&mut store, &mut prompter).unwrap();
        let active = store.active_provider().unwrap();
        assert_eq!(active.descriptor.id, "huggingface");
        assert_eq!(active.model, "gpt2");
    }

    #[test]
    fn test_switch_uses_saved_numbering() {
        let (_dir, mut store) = temp_store();
        store.set_credential("google", "g", "").unwrap();
        store.set_credential("anthropic", "a", "").unwrap();
        store.set_active("google").unwrap();

        // Saved list is [google, anthropic], so "2" is anthropic.
        let mut prompter = ScriptedPrompter::new(&["2"]);
        switch_provider(&mut store, &mut prompter).unwrap();
        assert_eq!(store.active_id(), Some("anthropic"));
    }

    #[test]
    fn test_delete_active_leaves_no_provider() {
        let (_dir, mut store) = temp_store();
        store.set_credential("xai", "x", "").unwrap();
        store.set_active("xai").unwrap();

        let mut prompter = ScriptedPrompter::new(&["1", "y"]);
        delete_api_key(&mut store, &mut prompter).unwrap();
        assert!(store.active_provider().is_none());
        assert!(store.configured_providers().is_empty());
    }

    #[test]
    fn test_switch_with_nothing_saved_asks_nothing() {
        let (_dir, mut store) = temp_store();
        let mut prompter = ScriptedPrompter::new(&[]);
        switch_provider(&mut store, &mut prompter).unwrap();
        delete_api_key(&mut store, &mut prompter).unwrap();
    }
}
