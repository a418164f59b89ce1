//! Terminal presentation for termchat.
//!
//! Draws the header, bordered panels, simple column tables and the reply
//! panel. Panels have a left rule only, so colored content never has to be
//! measured.

use std::io::{self, Write};

use chrono::Local;
use colored::{Color, Colorize};
use rand::seq::SliceRandom;

use crate::constants::{APP_TITLE, DEFAULT_TERMINAL_WIDTH};
use crate::format;

/// Border palette for reply panels; one is picked per reply.
const RESPONSE_THEMES: &[Color] = &[
    Color::Blue,
    Color::Green,
    Color::Magenta,
    Color::Cyan,
    Color::BrightMagenta,
];

/// Current terminal width in columns.
pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(DEFAULT_TERMINAL_WIDTH)
        .max(20)
}

/// Clears the screen and moves the cursor home.
pub fn clear_screen() {
    print!("\x1b[2J\x1b[H");
    io::stdout().flush().ok();
}

/// Prints a bordered panel with an optional title.
pub fn panel(title: Option<&str>, body: &str, color: Color) {
    let width = terminal_width().min(100);
    let top = match title {
        Some(t) => {
            let label = format!("─ {} ", t);
            let fill = width.saturating_sub(label.chars().count() + 1);
            format!("╭{}{}", label, "─".repeat(fill))
        }
        None => format!("╭{}", "─".repeat(width.saturating_sub(1))),
    };
    println!("{}", top.color(color));
    for line in body.lines() {
        println!("{} {}", "│".color(color), line);
    }
    println!("{}", format!("╰{}", "─".repeat(width.saturating_sub(1))).color(color));
}

pub fn success(body: &str) {
    panel(None, &format!("{} {}", "✓".green().bold(), body), Color::Green);
}

pub fn warning(body: &str) {
    panel(None, &body.yellow().to_string(), Color::Yellow);
}

pub fn error(title: &str, body: &str) {
    panel(Some(title), &body.red().to_string(), Color::Red);
}

/// Renders rows as aligned columns under bold headers.
///
/// Cells are padded before coloring so escape codes don't skew alignment;
/// `style` colors a whole column.
pub fn table(headers: &[&str], rows: &[Vec<String>], style: &[Option<Color>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!("{:<w$}", h, w = *w).bold().to_string())
        .collect();
    out.push_str(header_line.join("  ").trim_end());
    out.push('\n');

    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let padded = format!("{:<w$}", cell, w = widths.get(i).copied().unwrap_or(0));
                match style.get(i).copied().flatten() {
                    Some(color) => padded.color(color).to_string(),
                    None => padded,
                }
            })
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }
    out
}

/// Clears the screen and prints the application header.
pub fn header() {
    clear_screen();
    let now = Local::now().format("%B %d, %Y | %H:%M").to_string();
    panel(
        None,
        &format!(
            "{} {}\n{}",
            format!("✨ {}", APP_TITLE).cyan().bold(),
            "- Smart Terminal AI Chatbot",
            now.dimmed().italic()
        ),
        Color::White,
    );
    println!();
}

/// Prints the assistant label and a reply panel with markdown-lite formatting.
pub fn response(text: &str) {
    let color = RESPONSE_THEMES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(Color::Blue);
    println!();
    println!("{}", "AI Assistant".magenta().bold());
    panel(Some("Response"), &format::render_markdown_lite(text), color);
}

/// Shows a transient "thinking" line; [`clear_thinking`] erases it.
pub fn thinking() {
    print!("{}", "AI is thinking...".blue());
    io::stdout().flush().ok();
}

pub fn clear_thinking() {
    print!("\r\x1b[2K");
    io::stdout().flush().ok();
}
