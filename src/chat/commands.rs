//! Slash command handlers for the chat REPL.
//!
//! Dispatches `/help`, `/exit`, `/clear`, `/joke`, `/history` and the
//! credential commands. Returns a [`CommandAction`] so the REPL loop can
//! decide how to proceed.

use anyhow::Result;
use colored::{Color, Colorize};

use super::prompt::Prompter;
use super::{replies, setup};
use crate::config::CredentialStore;
use crate::format;
use crate::message::Message;
use crate::output;

/// Help table contents, in display order.
const COMMANDS: &[(&str, &str)] = &[
    ("/help", "Show this help message"),
    ("/exit", "Exit the chatbot"),
    ("/clear", "Clear the chat history and screen"),
    ("/joke", "Tell a random programming joke"),
    ("/history", "Show your chat history"),
    ("/addapi", "Add a new LLM provider API key"),
    ("/switch", "Switch active LLM provider"),
    ("/deleteapi", "Delete a saved API key"),
];

/// Action returned by slash command handling.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum CommandAction {
    /// Command was handled; continue the REPL loop.
    Continue,
    /// Leave the REPL.
    Exit,
    /// Credentials changed; rebuild the client from the store.
    Reload,
    /// Unknown command was entered.
    Unknown(String),
}

/// Dispatch and handle a slash command.
///
/// Only the first whitespace-delimited token is matched, case-insensitively.
pub(crate) fn handle_slash_command(
    input: &str,
    transcript: &mut Vec<Message>,
    store: &mut CredentialStore,
    prompter: &mut dyn Prompter,
) -> Result<CommandAction> {
    let command = input
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase();

    match command.as_str() {
        "/help" => {
            show_help();
            Ok(CommandAction::Continue)
        }
        "/exit" => {
            output::panel(None, "Thank you for using TermChat! Goodbye!", Color::Green);
            Ok(CommandAction::Exit)
        }
        "/clear" => {
            transcript.clear();
            output::clear_screen();
            println!("{}", "History cleared.".dimmed());
            Ok(CommandAction::Continue)
        }
        "/joke" => {
            output::panel(Some("Joke"), replies::random_joke(), Color::Yellow);
            Ok(CommandAction::Continue)
        }
        "/history" => {
            show_history(transcript);
            Ok(CommandAction::Continue)
        }
        "/addapi" => {
            setup::add_api_key(store, prompter)?;
            Ok(CommandAction::Reload)
        }
        "/switch" => {
            setup::switch_provider(store, prompter)?;
            Ok(CommandAction::Reload)
        }
        "/deleteapi" => {
            setup::delete_api_key(store, prompter)?;
            Ok(CommandAction::Reload)
        }
        _ => Ok(CommandAction::Unknown(command)),
    }
}

fn show_help() {
    let rows: Vec<Vec<String>> = COMMANDS
        .iter()
        .map(|(cmd, desc)| vec![cmd.to_string(), desc.to_string()])
        .collect();
    output::panel(
        Some("Available Commands"),
        &output::table(&["Command", "Description"], &rows, &[Some(Color::Cyan), None]),
        Color::Blue,
    );
}

fn show_history(transcript: &[Message]) {
    if transcript.is_empty() {
        output::warning("No chat history yet.");
        return;
    }
    output::panel(
        Some("Chat History"),
        &output::table(&["Role", "Message"], &format::history_rows(transcript), &[Some(Color::Green), None]),
        Color::Blue,
    );
}

#[cfg(test)]
mod tests {
    use super::super::prompt::testing::ScriptedPrompter;
    use super::*;
    use tempfile::TempDir;

    fn run(input: &str, transcript: &mut Vec<Message>) -> CommandAction {
        let dir = TempDir::new().unwrap();
        let mut store = CredentialStore::open(dir.path().join(".env")).unwrap();
        let mut prompter = ScriptedPrompter::new(&[]);
        handle_slash_command(input, transcript, &mut store, &mut prompter).unwrap()
    }

    #[test]
    fn test_exit_and_case_insensitivity() {
        let mut transcript = Vec::new();
        assert_eq!(run("/EXIT", &mut transcript), CommandAction::Exit);
        assert_eq!(run("/help extra words", &mut transcript), CommandAction::Continue);
    }

    #[test]
    fn test_clear_wipes_transcript() {
        let mut transcript = vec![Message::user("a"), Message::assistant("b")];
        assert_eq!(run("/clear", &mut transcript), CommandAction::Continue);
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_history_does_not_mutate_transcript() {
        let long = "z".repeat(150);
        let mut transcript = vec![Message::user(long.clone())];
        assert_eq!(run("/history", &mut transcript), CommandAction::Continue);
        assert_eq!(transcript, vec![Message::user(long)]);
    }

    #[test]
    fn test_unknown_command_is_noop() {
        let mut transcript = vec![Message::user("keep")];
        assert_eq!(
            run("/frobnicate now", &mut transcript),
            CommandAction::Unknown("/frobnicate".to_string())
        );
        assert_eq!(transcript.len(), 1);
    }

    #[test]
    fn test_credential_commands_signal_reload() {
        let mut transcript = Vec::new();
        // Nothing saved, so both flows return without prompting.
        assert_eq!(run("/switch", &mut transcript), CommandAction::Reload);
        assert_eq!(run("/deleteapi", &mut transcript), CommandAction::Reload);
    }
}
