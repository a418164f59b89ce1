//! Command-line interface definition and dispatch for termchat.
//!
//! Uses [`clap`] for argument parsing with derive macros. With no subcommand
//! termchat starts the interactive chat; credential file operations live in
//! the [`config`] submodule.

mod config;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::config::CredentialStore;
use crate::message::Message;
use crate::provider::ChatClient;
use crate::{chat, format, provider};

/// Top-level CLI structure for termchat.
#[derive(Parser)]
#[command(name = "termchat", version, about = "A multi-provider AI chatbot for the terminal")]
pub struct Cli {
    /// Credential file to use (default: ~/.config/termchat/.env)
    #[arg(long, global = true, value_name = "PATH")]
    pub env_file: Option<PathBuf>,
    /// Request timeout in seconds (default: wait indefinitely)
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the termchat CLI.
///
/// The `///` doc comments on variants double as `--help` text rendered by clap.
#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session (default)
    Chat,
    /// Ask a one-shot question using the active provider
    Ask {
        /// The question to ask
        prompt: Vec<String>,
    },
    /// List supported providers and which have saved keys
    Providers,
    /// Inspect or change the credential file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Subcommands for the `config` command.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the credential file with keys masked
    Show,
    /// Make a provider with a saved key the active one
    Use {
        /// Provider id (see `termchat providers`)
        provider: String,
    },
    /// Delete a single key from the credential file
    Unset {
        /// Key name, e.g. OPENAI_MODEL
        key: String,
    },
}

/// Parses command-line arguments into a [`Cli`] struct.
///
/// Delegates to [`clap::Parser::parse`], which exits the process on invalid input.
pub fn parse() -> Cli {
    Cli::parse()
}

/// Opens the credential store and routes each [`Commands`] variant to its handler.
pub async fn run(cli: Cli) -> Result<()> {
    let path = match cli.env_file {
        Some(path) => path,
        None => CredentialStore::default_path()?,
    };
    let store = CredentialStore::open(path)?;
    let timeout = cli.timeout.map(Duration::from_secs);

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => chat::run_chat(store, timeout).await,
        Commands::Ask { prompt } => {
            let prompt = prompt.join(" ");
            if prompt.trim().is_empty() {
                anyhow::bail!("No prompt provided. Usage: termchat ask \"your question here\"");
            }

            let Some(config) = store.active_provider() else {
                anyhow::bail!("No active provider configured. Run `termchat` to set one up.");
            };

            println!(
                "{} [provider: {}] [model: {}]",
                "termchat".bold().cyan(),
                config.name().yellow(),
                config.model.yellow(),
            );
            println!();
            println!("{} {}", ">".green().bold(), prompt);
            println!();

            let client = ChatClient::new(config, timeout)?;
            let reply = client.get_response(&[Message::user(prompt)]).await?;
            println!("{}", format::render_markdown_lite(&reply));
            Ok(())
        }
        Commands::Providers => {
            provider::list_providers(&store);
            Ok(())
        }
        Commands::Config { action } => config::handle_config(action, store),
    }
}
