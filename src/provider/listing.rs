//! Provider listing for the `providers` subcommand.
//!
//! Shows every registered provider with its configured model and whether a
//! key is stored. Isolates display concerns from the provider core.

use colored::Colorize;

use super::registry;
use crate::config::CredentialStore;

/// Print all known providers, marking configured and active ones.
pub fn list_providers(store: &CredentialStore) {
    let active = store.active_id();

    println!("Available providers:\n");
    println!(
        "  {} {} {} {}",
        format!("{:<12}", "ID").bold(),
        format!("{:<20}", "NAME").bold(),
        format!("{:<12}", "KEY").bold(),
        "MODEL".bold(),
    );

    for p in registry::all() {
        // Pad first, then colorize to avoid ANSI escape code width issues
        let id_col = format!("{:<12}", p.id);
        let name_col = format!("{:<20}", p.name);
        let key_col = format!("{:<12}", if store.has_credential(p) { "saved" } else { "-" });
        let marker = if active.is_some_and(|a| a.eq_ignore_ascii_case(p.id)) {
            " (active)"
        } else {
            ""
        };

        println!(
            "  {} {} {} {}{}",
            id_col.cyan(),
            name_col,
            if store.has_credential(p) { key_col.green() } else { key_col.dimmed() },
            store.model_for(p).dimmed(),
            marker.green().bold(),
        );
    }
    println!();
    println!("{} {}", "credentials:".dimmed(), store.path().display());
}
