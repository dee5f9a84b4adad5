//! Markdown rendering of a canonical session. Pure; no I/O.

use chrono::{Local, TimeZone};
use std::fmt::Write;

use crate::session::{AttachedReference, CodeBlock, FileReference, MessageFragment, Role, Session};

/// Render a session as a standalone Markdown document
pub fn render(session: &Session) -> String {
    let mut md = String::new();
    let _ = write!(md, "# {}\n\n", session.title);
    md.push_str("## Session Info\n\n");

    if let Some(started) = session.created_at.and_then(format_timestamp) {
        let _ = writeln!(md, "- Started: {}", started);
    }
    if let Some(ended) = session.ended_at.and_then(format_timestamp) {
        let _ = writeln!(md, "- Ended: {}", ended);
    }
    if !session.referenced_files.is_empty() {
        md.push_str("- Referenced files:\n");
        for file in &session.referenced_files {
            let _ = writeln!(md, "  - {}", link(file));
        }
    }

    for message in &session.messages {
        match message.role {
            Role::User => render_user(&mut md, message),
            Role::Assistant => render_assistant(&mut md, message),
        }
    }

    md
}

/// Local time for an epoch-millisecond timestamp
pub fn format_timestamp(ms: i64) -> Option<String> {
    Local
        .timestamp_millis_opt(ms)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
}

fn render_user(md: &mut String, message: &MessageFragment) {
    md.push_str("\n## User\n\n");
    if !message.file_references.is_empty() {
        md.push_str("Referenced files:\n");
        for AttachedReference { file, text } in &message.file_references {
            if text.is_empty() {
                let _ = writeln!(md, "- From {}", link(file));
            } else {
                let _ = writeln!(md, "- From {}: {}", link(file), text);
            }
        }
    }
    let _ = writeln!(md, "> {}", message.text);
}

fn render_assistant(md: &mut String, message: &MessageFragment) {
    md.push_str("\n## Assistant\n\n");
    let _ = writeln!(md, "{}", message.text);
    for block in &message.code_blocks {
        render_code_block(md, block);
    }
}

fn render_code_block(md: &mut String, block: &CodeBlock) {
    match &block.reference {
        Some(file) => {
            let _ = writeln!(md, "\n```{} {}", block.language_id, link(file));
        }
        None => {
            let _ = writeln!(md, "\n```{}", block.language_id);
        }
    }
    md.push_str(&block.content);
    md.push_str("\n```\n");
}

fn link(file: &FileReference) -> String {
    format!("[{}]({})", file.display_name, file.path)
}
