//! Reading and writing the flat `KEY=value` credential file.
//!
//! Parsing is delegated to [`dotenvy`] so hand-edited files with comments,
//! `export` prefixes and quoting keep working. Rendering quotes any value
//! that `dotenvy` would otherwise reinterpret (whitespace, `#`, `$`).

use std::path::Path;

use anyhow::{Context, Result};

/// Parses the file into ordered `(key, value)` pairs.
pub(super) fn read(path: &Path) -> Result<Vec<(String, String)>> {
    let iter = dotenvy::from_path_iter(path)
        .with_context(|| format!("Failed to open credential file {:?}", path))?;
    let mut entries: Vec<(String, String)> = Vec::new();
    for item in iter {
        let (key, value) =
            item.with_context(|| format!("Failed to parse credential file {:?}", path))?;
        // Later lines win, as when the file is loaded into an environment.
        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => entries.push((key, value)),
        }
    }
    Ok(entries)
}

/// Renders entries one per line, quoting values where needed.
pub(super) fn render(entries: &[(String, String)]) -> String {
    let mut out = String::new();
    for (key, value) in entries {
        out.push_str(key);
        out.push('=');
        out.push_str(&quote(value));
        out.push('\n');
    }
    out
}

fn quote(value: &str) -> String {
    let bare = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "_-./:@+".contains(c));
    if bare && !value.is_empty() {
        return value.to_string();
    }
    if !value.contains('\'') && !value.contains('\n') {
        // Single quotes are literal: no escapes, no substitution.
        return format!("'{}'", value);
    }
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('"');
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '$' => escaped.push_str("\\$"),
            '\n' => escaped.push_str("\\n"),
            c => escaped.push(c),
        }
    }
    escaped.push('"');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_and_read(entries: &[(String, String)]) -> Vec<(String, String)> {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, render(entries)).unwrap();
        read(&path).unwrap()
    }

    #[test]
    fn test_plain_values_are_unquoted() {
        let entries = vec![("OPENAI_API_KEY".to_string(), "sk-abc_123".to_string())];
        assert_eq!(render(&entries), "OPENAI_API_KEY=sk-abc_123\n");
    }

    #[test]
    fn test_awkward_values_survive_parsing() {
        let entries = vec![
            ("A".to_string(), "has space # and $HOME".to_string()),
            ("B".to_string(), "it's \"quoted\" $x".to_string()),
            ("C".to_string(), String::new()),
            ("D".to_string(), "openai/gpt-oss-20b:free".to_string()),
        ];
        assert_eq!(write_and_read(&entries), entries);
    }

    #[test]
    fn test_reads_hand_written_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(
            &path,
            "# comment\nGOOGLE_API_KEY='abc'\n\nACTIVE_PROVIDER=google\nACTIVE_PROVIDER=openai\n",
        )
        .unwrap();
        let entries = read(&path).unwrap();
        assert_eq!(
            entries,
            vec![
                ("GOOGLE_API_KEY".to_string(), "abc".to_string()),
                ("ACTIVE_PROVIDER".to_string(), "openai".to_string()),
            ]
        );
    }
}
