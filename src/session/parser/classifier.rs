//! Raw record classification - decides which schema revision wrote a record.

use serde_json::Value;

use crate::session::model::SchemaVariant;

/// Key Cursor uses for inline diff state; never a chat record
pub const SENTINEL_KEY: &str = "inlineDiffsData";

/// Key prefixes of separately stored messages, in lookup order
pub const FRAGMENT_KEY_PREFIXES: [&str; 2] = ["fragment", "bubbleId"];

/// Fields that mark an object as a version envelope when paired with `data`
const ENVELOPE_VERSION_FIELDS: [&str; 2] = ["_v", "version"];
const ENVELOPE_PAYLOAD_FIELD: &str = "data";

/// Outcome of classifying one raw record
#[derive(Debug, Clone)]
pub struct Classification {
    pub variant: SchemaVariant,
    /// Decoded value with any envelope removed; `None` when decoding was
    /// skipped or failed
    pub value: Option<Value>,
}

impl Classification {
    fn unrecognized(value: Option<Value>) -> Self {
        Self {
            variant: SchemaVariant::Unrecognized,
            value,
        }
    }
}

/// Classify a raw key/value pair by the shape of its value
pub fn classify(key: &str, raw_value: &str) -> Classification {
    if key == SENTINEL_KEY || raw_value.trim() == "[]" {
        return Classification::unrecognized(None);
    }

    let decoded = match serde_json::from_str::<Value>(raw_value) {
        Ok(value) => value,
        Err(e) => {
            log::debug!("Record {} is not valid JSON: {}", key, e);
            return Classification::unrecognized(None);
        }
    };
    let value = unwrap_envelope(decoded);

    // Fragments are only reached through their session's manifest
    if is_fragment_key(key) {
        return Classification::unrecognized(Some(value));
    }

    let variant = variant_of(&value);
    Classification {
        variant,
        value: Some(value),
    }
}

/// Replace a version envelope with its payload. Only one level is removed.
pub fn unwrap_envelope(value: Value) -> Value {
    let is_envelope = value.as_object().is_some_and(|obj| {
        obj.contains_key(ENVELOPE_PAYLOAD_FIELD)
            && ENVELOPE_VERSION_FIELDS.iter().any(|f| obj.contains_key(*f))
    });
    if !is_envelope {
        return value;
    }
    match value {
        Value::Object(mut obj) => obj.remove(ENVELOPE_PAYLOAD_FIELD).unwrap_or(Value::Null),
        other => other,
    }
}

pub fn is_fragment_key(key: &str) -> bool {
    FRAGMENT_KEY_PREFIXES.iter().any(|prefix| {
        key.strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with(':'))
    })
}

fn variant_of(value: &Value) -> SchemaVariant {
    let Some(obj) = value.as_object() else {
        return SchemaVariant::Unrecognized;
    };

    let inline = obj
        .get("conversation")
        .or_else(|| obj.get("messages"))
        .and_then(Value::as_array);
    if inline.is_some_and(|messages| messages.iter().any(is_non_empty_message)) {
        return SchemaVariant::LegacyInline;
    }

    let has_manifest = ["fullConversationHeadersOnly", "headers"]
        .iter()
        .any(|field| obj.get(*field).is_some_and(Value::is_array));
    if has_manifest {
        return SchemaVariant::FragmentedHeaders;
    }

    // Checkpoint-style record: file selections only, no messages
    let inline_is_empty = inline.map_or(true, |messages| messages.is_empty());
    let has_files = obj
        .get("files")
        .and_then(Value::as_array)
        .is_some_and(|files| !files.is_empty());
    if inline_is_empty && has_files {
        return SchemaVariant::LegacyInline;
    }

    SchemaVariant::Unrecognized
}

/// A message counts when it has visible text or at least one code block
fn is_non_empty_message(message: &Value) -> bool {
    let has_text = message
        .get("text")
        .and_then(Value::as_str)
        .is_some_and(|t| !t.trim().is_empty());
    let has_code = message
        .get("codeBlocks")
        .and_then(Value::as_array)
        .is_some_and(|blocks| !blocks.is_empty());
    has_text || has_code
}
