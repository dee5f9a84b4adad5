//! Session title resolution and filename sanitizing.

use crate::session::model::MessageFragment;

pub const UNTITLED: &str = "untitled";

/// Longest sanitized title kept whole
const MAX_SANITIZED_CHARS: usize = 40;
/// Characters kept before the ellipsis when a sanitized title is too long
const TRUNCATED_SANITIZED_CHARS: usize = 37;
const ELLIPSIS: &str = "...";

const UNSAFE_CHARS: [char; 11] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*', '\n', '\r'];

/// Pick a display title for a session.
///
/// A stored name wins unless it is blank or the `untitled` placeholder. Otherwise
/// the first non-blank line of the first message with text is used, cut to
/// `max_chars` characters.
pub fn resolve_title(
    stored_name: Option<&str>,
    messages: &[MessageFragment],
    max_chars: usize,
) -> String {
    if let Some(name) = stored_name.map(str::trim) {
        if !name.is_empty() && !name.eq_ignore_ascii_case(UNTITLED) {
            return name.to_string();
        }
    }

    messages
        .iter()
        .find(|m| m.has_text())
        .and_then(|m| m.text.lines().map(str::trim).find(|line| !line.is_empty()))
        .map(|line| truncate_chars(line, max_chars).trim_end().to_string())
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string())
}

/// Make a title safe to use as a file name.
///
/// Sanitizing an already sanitized title returns it unchanged.
pub fn sanitize_title(title: &str) -> String {
    let replaced: String = title
        .chars()
        .map(|c| if UNSAFE_CHARS.contains(&c) { '_' } else { c })
        .collect();

    if replaced.chars().count() > MAX_SANITIZED_CHARS {
        format!("{}{}", truncate_chars(&replaced, TRUNCATED_SANITIZED_CHARS), ELLIPSIS)
    } else {
        replaced
    }
}

/// Cut to at most `max_chars` characters without splitting a UTF-8 sequence
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
