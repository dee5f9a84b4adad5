//! Session assembly - turns classified records into canonical sessions.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::config::TitleLimits;
use crate::error::SessionError;
use crate::session::model::{
    AttachedReference, CodeBlock, FileReference, MessageFragment, RawRecord, Role, SchemaVariant,
    Session,
};
use crate::session::observer::{AssemblyObserver, AssemblyOutcome, DropReason};

use super::classifier::{classify, FRAGMENT_KEY_PREFIXES};
use super::records::{
    millis, InlineRecord, ManifestRecord, StoredCodeBlock, StoredContext, StoredMessage,
};
use super::reference::resolve;
use super::title::resolve_title;

/// Legacy `createdAt` values at or after 2025-01-01T00:00:00Z are known to be
/// unreliable and sort as 0. Displayed values are left untouched.
pub const LEGACY_CREATED_AT_CUTOFF_MS: i64 = 1_735_689_600_000;

/// Decoded store contents: classified records in store order plus a key lookup
pub struct RecordStore {
    classified: Vec<(String, SchemaVariant)>,
    values: HashMap<String, Value>,
}

impl RecordStore {
    /// Classify every raw record and keep the decoded values for lookup
    pub fn from_records(records: Vec<RawRecord>, observer: &dyn AssemblyObserver) -> Self {
        let mut classified = Vec::new();
        let mut values = HashMap::with_capacity(records.len());

        for record in records {
            let classification = classify(&record.key, &record.value);
            observer.record_classified(&record.key, classification.variant);

            let Some(value) = classification.value else {
                continue;
            };
            if values.contains_key(&record.key) {
                log::debug!("Ignoring duplicate key {}", record.key);
                continue;
            }
            classified.push((record.key.clone(), classification.variant));
            values.insert(record.key, value);
        }

        Self { classified, values }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Look up `{prefix}:{session_id}:{fragment_id}` under each known prefix
    fn fragment(&self, session_id: &str, fragment_id: &str) -> Option<(String, &Value)> {
        FRAGMENT_KEY_PREFIXES.iter().find_map(|prefix| {
            let key = format!("{}:{}:{}", prefix, session_id, fragment_id);
            let value = self.values.get(&key)?;
            Some((key, value))
        })
    }
}

enum Candidate {
    Built(Session),
    Dropped(DropReason),
}

/// Rebuild every qualifying session, sorted by start time
pub fn assemble(
    store: &RecordStore,
    limits: &TitleLimits,
    observer: &dyn AssemblyObserver,
) -> Vec<Session> {
    let mut sessions = Vec::new();

    for (key, variant) in &store.classified {
        let Some(value) = store.get(key) else {
            continue;
        };
        let built = match variant {
            SchemaVariant::LegacyInline => build_inline(key, value, limits.legacy_inline),
            SchemaVariant::FragmentedHeaders => {
                build_fragmented(key, value, store, limits.fragmented)
            }
            SchemaVariant::Unrecognized => continue,
        };

        match built {
            Ok(Candidate::Built(session)) => match validity_failure(&session) {
                Some(reason) => observer.session_assembled(key, &AssemblyOutcome::Dropped(reason)),
                None => {
                    observer.session_assembled(
                        key,
                        &AssemblyOutcome::Assembled {
                            message_count: session.messages.len(),
                        },
                    );
                    sessions.push(session);
                }
            },
            Ok(Candidate::Dropped(reason)) => {
                observer.session_assembled(key, &AssemblyOutcome::Dropped(reason))
            }
            Err(e) => observer.session_assembled(key, &AssemblyOutcome::Failed(&e)),
        }
    }

    sessions.sort_by_key(start_key);
    sessions
}

/// Why a session fails the validity filter, if it does
pub fn validity_failure(session: &Session) -> Option<DropReason> {
    let has_text = session.messages.iter().any(MessageFragment::has_text);
    if !has_text && session.referenced_files.is_empty() {
        return Some(DropReason::NoContent);
    }
    if let (Some(created), Some(ended)) = (session.created_at, session.ended_at) {
        if ended < created {
            return Some(DropReason::EndsBeforeStart);
        }
    }
    None
}

/// Sort key used to order sessions
pub fn start_key(session: &Session) -> i64 {
    let created = session.created_at.unwrap_or(0);
    if session.variant == SchemaVariant::LegacyInline && created >= LEGACY_CREATED_AT_CUTOFF_MS {
        0
    } else {
        created
    }
}

fn build_inline(key: &str, value: &Value, max_title_chars: usize) -> Result<Candidate, SessionError> {
    let record = InlineRecord::deserialize(value).map_err(|source| SessionError::Malformed {
        key: key.to_string(),
        source,
    })?;

    let created_at = millis(record.created_at.as_ref());
    let mut referenced_files = record
        .context
        .as_ref()
        .map(session_file_selections)
        .unwrap_or_default();
    referenced_files.extend(record.files.iter().filter_map(resolve));

    let name = record.name.clone();
    let stored = record.into_messages();

    // The session ends when its final message finished processing
    let ended_at = stored
        .last()
        .and_then(|m| m.timing_info.as_ref())
        .and_then(|t| millis(t.client_end_time.as_ref()));

    let messages: Vec<MessageFragment> = stored
        .into_iter()
        .filter_map(|m| build_message(m, None))
        .collect();
    let title = resolve_title(name.as_deref(), &messages, max_title_chars);

    Ok(Candidate::Built(Session {
        key: key.to_string(),
        variant: SchemaVariant::LegacyInline,
        stored_name: name,
        title,
        created_at,
        ended_at,
        messages,
        referenced_files,
    }))
}

fn build_fragmented(
    key: &str,
    value: &Value,
    store: &RecordStore,
    max_title_chars: usize,
) -> Result<Candidate, SessionError> {
    let record = ManifestRecord::deserialize(value).map_err(|source| SessionError::Malformed {
        key: key.to_string(),
        source,
    })?;

    let session_id = record
        .composer_id
        .clone()
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| key.split_once(':').map_or(key, |(_, id)| id).to_string());

    let mut messages = Vec::new();
    for header in &record.full_conversation_headers_only {
        let Some((fragment_key, raw)) = store.fragment(&session_id, &header.fragment_id) else {
            log::trace!("Fragment {} of {} is missing", header.fragment_id, key);
            continue;
        };
        // Stored values were unwrapped once during classification
        let stored = StoredMessage::deserialize(raw).map_err(|source| {
            SessionError::MalformedFragment {
                key: fragment_key,
                source,
            }
        })?;
        if let Some(message) = build_message(stored, header.kind) {
            messages.push(message);
        }
    }

    if messages.is_empty() {
        return Ok(Candidate::Dropped(DropReason::NoResolvableFragments));
    }

    let created_at = millis(record.created_at.as_ref());
    let ended_at = millis(record.last_updated_at.as_ref()).or(created_at);
    let referenced_files = record
        .context
        .as_ref()
        .and_then(|c| c.mentions.as_ref())
        .map(|m| {
            m.file_selections
                .keys()
                .filter_map(|uri| resolve(&Value::String(uri.clone())))
                .collect()
        })
        .unwrap_or_default();
    let title = resolve_title(record.name.as_deref(), &messages, max_title_chars);

    Ok(Candidate::Built(Session {
        key: key.to_string(),
        variant: SchemaVariant::FragmentedHeaders,
        stored_name: record.name,
        title,
        created_at,
        ended_at,
        messages,
        referenced_files,
    }))
}

/// Build a message; unknown type codes yield `None`
fn build_message(stored: StoredMessage, fallback_kind: Option<u8>) -> Option<MessageFragment> {
    let role = Role::from_code(stored.kind.or(fallback_kind)?)?;

    let file_references = stored
        .context
        .as_ref()
        .map(attached_references)
        .unwrap_or_default();
    let code_blocks = stored.code_blocks.into_iter().map(build_code_block).collect();

    Some(MessageFragment {
        role,
        text: stored.text.unwrap_or_default(),
        file_references,
        code_blocks,
    })
}

fn build_code_block(block: StoredCodeBlock) -> CodeBlock {
    CodeBlock {
        language_id: block
            .language_id
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| "text".to_string()),
        reference: resolve(&block.uri),
        content: block.content.unwrap_or_default(),
    }
}

/// Per-message references: text selections first, then whole-file selections
fn attached_references(context: &StoredContext) -> Vec<AttachedReference> {
    let selections = context.selections.iter().filter_map(|sel| {
        Some(AttachedReference {
            file: resolve(&sel.uri)?,
            text: sel.text.clone().unwrap_or_default(),
        })
    });
    let files = context.file_selections.iter().filter_map(|raw| {
        Some(AttachedReference {
            file: resolve(raw)?,
            text: String::new(),
        })
    });
    selections.chain(files).collect()
}

fn session_file_selections(context: &StoredContext) -> Vec<FileReference> {
    context.file_selections.iter().filter_map(resolve).collect()
}
