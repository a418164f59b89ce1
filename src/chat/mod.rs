//! Interactive chat REPL for termchat.
//!
//! Provides a multi-turn conversation loop using [`rustyline`] for readline
//! support (history, line editing). The full transcript is sent with each
//! request so the provider sees all prior context; the transcript lives only
//! in memory for the life of the process.

mod commands;
mod prompt;
mod replies;
mod setup;

use std::time::Duration;

use anyhow::Result;
use colored::{Color, Colorize};
use rustyline::error::ReadlineError;
use tracing::{debug, info};

use crate::config::CredentialStore;
use crate::constants::COMMAND_PREFIX;
use crate::message::Message;
use crate::output;
use crate::provider::{AdapterError, ChatClient};

use commands::CommandAction;
use prompt::Terminal;

/// Runs the interactive chat REPL.
///
/// Runs first-time setup when the store is not configured, builds the client
/// for the active provider, and enters a readline loop. Slash input goes to
/// the command dispatcher; greetings in the canned-reply table are answered
/// locally; everything else is one provider round-trip.
///
/// # Readline behavior
///
/// - **Ctrl+C**: cancels current input, stays in REPL
/// - **Ctrl+D**: exits cleanly with "goodbye."
/// - Readline history is persisted to `~/.cache/termchat/chat_history.txt`
pub async fn run_chat(mut store: CredentialStore, timeout: Option<Duration>) -> Result<()> {
    let mut terminal = Terminal::new()?;

    if !store.is_configured() {
        info!(path = %store.path().display(), "no usable provider, running first-time setup");
        if !setup::first_run(&mut store, &mut terminal)? {
            anyhow::bail!("Setup failed. Exiting...");
        }
    }

    let Some(initial) = build_client(&store, timeout)? else {
        output::error(
            "Configuration Error",
            "No active provider configured!\nPlease use /addapi to add an API key and /switch to select a provider.",
        );
        anyhow::bail!("No active provider configured");
    };

    output::header();
    output::panel(
        Some("🤖 Ready to Chat"),
        &format!(
            "{} {}\n{} {}\n\n{}",
            "Active Provider:".cyan().bold(),
            initial.config().name(),
            "Model:".cyan().bold(),
            initial.config().model,
            format!(
                "Type your message to chat with the AI, or use {} to see available commands.",
                "/help".cyan().bold()
            )
            .italic()
        ),
        Color::Blue,
    );
    let mut client = Some(initial);

    // Set up readline with persistent history
    let history_path = CredentialStore::cache_dir()?.join(crate::constants::HISTORY_FILENAME);
    if history_path.exists() {
        let _ = terminal.editor().load_history(&history_path);
    }

    let mut transcript: Vec<Message> = Vec::new();

    loop {
        println!();
        let readline = terminal
            .editor()
            .readline(&format!("{} ", "You:".green().bold()));

        match readline {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }

                if line.starts_with(COMMAND_PREFIX) {
                    let _ = terminal.editor().add_history_entry(&line);
                    let action = match commands::handle_slash_command(
                        &line,
                        &mut transcript,
                        &mut store,
                        &mut terminal,
                    ) {
                        Ok(action) => action,
                        Err(e) => {
                            eprintln!("{} {}", "error:".red().bold(), e);
                            continue;
                        }
                    };
                    match action {
                        CommandAction::Continue => {}
                        CommandAction::Exit => break,
                        CommandAction::Reload => {
                            client = build_client(&store, timeout)?;
                            report_reload(client.as_ref());
                        }
                        CommandAction::Unknown(cmd) => {
                            output::panel(
                                None,
                                &format!("Unknown command: {}\nType /help to see available commands.", cmd),
                                Color::Red,
                            );
                        }
                    }
                    continue;
                }

                let _ = terminal.editor().add_history_entry(&line);

                // Canned replies skip the provider call entirely.
                if let Some(reply) = replies::canned_reply(&line) {
                    output::response(reply);
                    continue;
                }

                let Some(ref active) = client else {
                    output::warning(
                        "No active provider configured.\nPlease use /addapi to add an API key and /switch to select a provider.",
                    );
                    continue;
                };

                output::thinking();
                let result = exchange(active, &mut transcript, &line).await;
                output::clear_thinking();

                match result {
                    Ok(reply) => output::response(&reply),
                    Err(e) => eprintln!("\n{} {}", "Error:".red().bold(), e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".dimmed());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "goodbye.".dimmed());
                break;
            }
            Err(e) => {
                eprintln!("{} {}", "error:".red().bold(), e);
                break;
            }
        }
    }

    // Save readline history
    if let Some(parent) = history_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let _ = terminal.editor().save_history(&history_path);

    Ok(())
}

/// Runs one chat turn against `client`.
///
/// The user message is appended before the call. On success the reply is
/// appended too; on failure the user message is removed again, so the
/// transcript only ever holds turns that produced a reply.
pub(crate) async fn exchange(
    client: &ChatClient,
    transcript: &mut Vec<Message>,
    input: &str,
) -> Result<String, AdapterError> {
    transcript.push(Message::user(input));

    match client.get_response(transcript).await {
        Ok(reply) => {
            transcript.push(Message::assistant(reply.clone()));
            Ok(reply)
        }
        Err(e) => {
            // Pop the failed user message so the user can retry
            transcript.pop();
            debug!(turns = transcript.len(), "rolled back failed turn");
            Err(e)
        }
    }
}

/// Builds a client for the store's active provider, if there is one.
pub(crate) fn build_client(
    store: &CredentialStore,
    timeout: Option<Duration>,
) -> Result<Option<ChatClient>> {
    match store.active_provider() {
        Some(config) => {
            info!(provider = config.descriptor.id, model = %config.model, "client ready");
            Ok(Some(ChatClient::new(config, timeout)?))
        }
        None => Ok(None),
    }
}

fn report_reload(client: Option<&ChatClient>) {
    match client {
        Some(c) => output::success(&format!(
            "Client reloaded!\n{} {}\n{} {}",
            "Active Provider:".cyan().bold(),
            c.config().name(),
            "Model:".cyan().bold(),
            c.config().model
        )),
        None => output::warning(
            "Warning: No active provider configured.\nPlease use /addapi to add an API key and /switch to select a provider.",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::testing::ScriptedTransport;
    use crate::provider::{registry, ProviderConfig};
    use serde_json::json;

    fn client(transport: ScriptedTransport) -> ChatClient {
        let config = ProviderConfig::resolve(registry::find("openai").unwrap(), "k", None);
        ChatClient::with_transport(config, Box::new(transport))
    }

    #[tokio::test]
    async fn test_exchange_appends_both_turns() {
        let transport = ScriptedTransport::ok(json!({
            "choices": [{"message": {"content": "pong"}}]
        }));
        let requests = transport.requests();
        let client = client(transport);
        let mut transcript = vec![Message::user("first"), Message::assistant("reply")];

        let reply = exchange(&client, &mut transcript, "ping").await.unwrap();
        assert_eq!(reply, "pong");
        assert_eq!(
            transcript,
            vec![
                Message::user("first"),
                Message::assistant("reply"),
                Message::user("ping"),
                Message::assistant("pong"),
            ]
        );

        // The whole transcript, including the new turn, was sent.
        let sent = &requests.lock().unwrap()[0].body["messages"];
        assert_eq!(sent.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_exchange_rolls_back_on_server_error() {
        let client = client(ScriptedTransport::new(500, "internal error"));
        let mut transcript = vec![Message::user("first"), Message::assistant("reply")];
        let before = transcript.clone();

        let result = exchange(&client, &mut transcript, "ping").await;
        assert!(matches!(result, Err(AdapterError::Status { status: 500, .. })));
        assert_eq!(transcript, before);
    }

    #[tokio::test]
    async fn test_exchange_rolls_back_on_bad_shape() {
        let client = client(ScriptedTransport::ok(json!({"unexpected": true})));
        let mut transcript = Vec::new();

        assert!(exchange(&client, &mut transcript, "ping").await.is_err());
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_build_client_without_provider_is_none() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = CredentialStore::open(dir.path().join(".env")).unwrap();
        assert!(build_client(&store, None).unwrap().is_none());
    }
}
