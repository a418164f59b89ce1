//! Interactive input for the chat REPL and setup flows.
//!
//! [`Prompter`] is the seam between the setup/command logic and the
//! terminal: menus, confirmations and masked key entry all go through it, so
//! the flows can be driven by a scripted prompter in tests.

use std::io::{self, Write};

use anyhow::{anyhow, Result};
use colored::Colorize;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Source of user answers for interactive flows.
pub(crate) trait Prompter {
    /// Reads one line of free text.
    fn ask(&mut self, prompt: &str) -> Result<String>;

    /// Reads a secret without echoing it.
    fn secret(&mut self, prompt: &str) -> Result<String>;

    /// Reads a line, returning `default` when the answer is empty.
    fn ask_with_default(&mut self, prompt: &str, default: &str) -> Result<String> {
        let answer = self.ask(&format!("{} ({})", prompt, default.dimmed()))?;
        let answer = answer.trim();
        Ok(if answer.is_empty() {
            default.to_string()
        } else {
            answer.to_string()
        })
    }

    /// Asks a yes/no question; anything but `y`/`yes` is no.
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let answer = self.ask(&format!("{} [y/n]", prompt))?;
        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }

    /// Repeats the question until the answer is one of `choices`.
    fn choose(&mut self, prompt: &str, choices: &[String]) -> Result<String> {
        let hint = format!("{} [{}]", prompt, choices.join("/"));
        loop {
            let answer = self.ask(&hint)?;
            let answer = answer.trim();
            if choices.iter().any(|c| c == answer) {
                return Ok(answer.to_string());
            }
            println!("{}", "Please select one of the available options".red());
        }
    }
}

/// The real terminal: `rustyline` for lines, crossterm raw mode for secrets.
pub(crate) struct Terminal {
    editor: DefaultEditor,
}

impl Terminal {
    pub(crate) fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }

    /// Direct access to the line editor, for the chat REPL and its history.
    pub(crate) fn editor(&mut self) -> &mut DefaultEditor {
        &mut self.editor
    }
}

impl Prompter for Terminal {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        match self.editor.readline(&format!("{}: ", prompt)) {
            Ok(line) => Ok(line),
            Err(ReadlineError::Interrupted) => Ok(String::new()),
            Err(ReadlineError::Eof) => Err(anyhow!("input closed")),
            Err(e) => Err(e.into()),
        }
    }

    fn secret(&mut self, prompt: &str) -> Result<String> {
        print!("{}: ", prompt);
        io::stdout().flush()?;

        let _raw = RawModeGuard::enable()?;
        let mut secret = String::new();
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Enter => break,
                KeyCode::Esc => {
                    secret.clear();
                    break;
                }
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    secret.clear();
                    break;
                }
                KeyCode::Backspace => {
                    if secret.pop().is_some() {
                        print!("\x08 \x08");
                    }
                }
                KeyCode::Char(c) => {
                    secret.push(c);
                    print!("*");
                }
                _ => {}
            }
            io::stdout().flush()?;
        }
        // Raw mode does not translate '\n', so return the carriage explicitly.
        print!("\r\n");
        io::stdout().flush()?;
        Ok(secret)
    }
}

/// Restores cooked mode on drop, including on early return.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        terminal::disable_raw_mode().ok();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;

    use super::*;

    /// Replays canned answers in order; running out is an error.
    pub(crate) struct ScriptedPrompter {
        answers: VecDeque<String>,
    }

    impl ScriptedPrompter {
        pub(crate) fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().map(|a| a.to_string()).collect(),
            }
        }

        pub(crate) fn remaining(&self) -> usize {
            self.answers.len()
        }
    }

    impl Prompter for ScriptedPrompter {
        fn ask(&mut self, _prompt: &str) -> Result<String> {
            self.answers
                .pop_front()
                .ok_or_else(|| anyhow!("script exhausted"))
        }

        fn secret(&mut self, prompt: &str) -> Result<String> {
            self.ask(prompt)
        }
    }

    #[test]
    fn test_default_and_confirm() {
        let mut p = ScriptedPrompter::new(&["", "custom", "Y", "nope"]);
        assert_eq!(p.ask_with_default("Model", "gpt").unwrap(), "gpt");
        assert_eq!(p.ask_with_default("Model", "gpt").unwrap(), "custom");
        assert!(p.confirm("Sure?").unwrap());
        assert!(!p.confirm("Sure?").unwrap());
    }

    #[test]
    fn test_choose_retries_until_valid() {
        let mut p = ScriptedPrompter::new(&["9", "x", "2"]);
        let choices = vec!["0".to_string(), "1".to_string(), "2".to_string()];
        assert_eq!(p.choose("Pick", &choices).unwrap(), "2");
        assert_eq!(p.remaining(), 0);
    }
}
