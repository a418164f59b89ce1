//! Entry point for termchat, a multi-provider AI chatbot for the terminal.
//!
//! This binary installs logging, parses CLI arguments via [`cli`], and
//! dispatches to the chat REPL or the chosen subcommand.

mod chat;
mod cli;
mod config;
mod constants;
mod format;
mod logging;
mod message;
mod output;
mod provider;

use anyhow::Result;

/// Runs the termchat CLI.
///
/// Everything runs on a single-threaded runtime: one provider request is in
/// flight at most, and the REPL waits for it before reading more input.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    logging::init();
    let cli = cli::parse();
    cli::run(cli).await
}
