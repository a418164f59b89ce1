use colored::Colorize;

use crate::constants::{ELLIPSIS, HISTORY_PREVIEW_CHARS};
use crate::message::{Message, Role};

/// Shorten `text` to at most `max` characters for display, adding `...`.
///
/// Counts characters, not bytes, so multi-byte text is never split.
pub fn truncate_preview(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let head: String = text.chars().take(max).collect();
    format!("{}{}", head, ELLIPSIS)
}

/// `(role label, preview)` rows for the `/history` table.
///
/// Bodies longer than [`HISTORY_PREVIEW_CHARS`] are shortened and newlines are
/// flattened; the transcript itself is only borrowed.
pub fn history_rows(messages: &[Message]) -> Vec<Vec<String>> {
    messages
        .iter()
        .map(|m| {
            let flat = m.text().replace('\n', " ");
            vec![
                role_label(m.role).to_string(),
                truncate_preview(&flat, HISTORY_PREVIEW_CHARS),
            ]
        })
        .collect()
}

fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => "User",
        Role::Assistant => "Assistant",
        Role::System => "System",
    }
}

/// Minimal markdown renderer for terminal output.
/// Not a full parser. Handles headings, bullets, bold, inline code and
/// fenced code blocks, the common patterns in LLM output.
pub fn render_markdown_lite(text: &str) -> String {
    let mut output = String::new();
    let mut in_code_block = false;

    for line in text.lines() {
        if line.trim_start().starts_with("```") {
            if in_code_block {
                in_code_block = false;
            } else {
                in_code_block = true;
                let lang = line.trim_start().trim_start_matches('`').trim();
                if !lang.is_empty() {
                    output.push_str(&format!("  {}\n", lang.dimmed()));
                }
            }
            continue;
        }

        if in_code_block {
            output.push_str(&format!("  {}\n", line.dimmed()));
            continue;
        }

        let trimmed = line.trim_start();
        if let Some(heading) = heading_text(trimmed) {
            output.push_str(&render_inline(heading).bold().underline().to_string());
        } else if let Some(item) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
        {
            let indent = &line[..line.len() - trimmed.len()];
            output.push_str(&format!("{}• {}", indent, render_inline(item)));
        } else {
            output.push_str(&render_inline(line));
        }
        output.push('\n');
    }

    if output.ends_with('\n') {
        output.pop();
    }
    output
}

fn heading_text(line: &str) -> Option<&str> {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    if (1..=6).contains(&hashes) {
        line[hashes..].strip_prefix(' ')
    } else {
        None
    }
}

/// Handle **bold** and `inline code` within a single line.
fn render_inline(line: &str) -> String {
    let mut result = String::new();
    let chars: Vec<char> = line.chars().collect();
    let len = chars.len();
    let mut i = 0;

    while i < len {
        if i + 1 < len && chars[i] == '*' && chars[i + 1] == '*' {
            if let Some(end) = find_closing_pair(&chars, i + 2, '*') {
                let bold_text: String = chars[i + 2..end].iter().collect();
                result.push_str(&bold_text.bold().to_string());
                i = end + 2;
                continue;
            }
        }

        if chars[i] == '`' {
            if let Some(end) = chars[i + 1..].iter().position(|c| *c == '`') {
                let end = i + 1 + end;
                let code_text: String = chars[i + 1..end].iter().collect();
                result.push_str(&code_text.cyan().to_string());
                i = end + 1;
                continue;
            }
        }

        result.push(chars[i]);
        i += 1;
    }

    result
}

fn find_closing_pair(chars: &[char], start: usize, ch: char) -> Option<usize> {
    chars
        .get(start..)?
        .windows(2)
        .position(|w| w[0] == ch && w[1] == ch)
        .map(|p| start + p)
}
