// src/util/helper.rs
use itertools::Itertools;
use std::io::{self, IsTerminal};

/// Splits a comma separated id list, dropping blanks and repeats while keeping order
pub fn split_ids(ids: &str) -> Vec<String> {
    ids.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unique()
        .map(str::to_string)
        .collect()
}

pub fn is_stderr_piped() -> bool {
    !io::stderr().is_terminal()
}

/// Shortens `text` to at most `max_chars` characters, marking the cut with `...`
pub fn abbreviate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    format!("{}...", text.chars().take(keep).collect::<String>())
}
