//! Data structures for values stored in `cursorDiskKV`
//!
//! Fields are lenient (`Option`/`default`) so that missing keys never fail a
//! record, and an explicit `null` list reads as empty. A key that is present
//! with any other wrong type does fail, which is how a malformed session gets
//! skipped instead of half-rendered.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// `composerData:*` value holding its messages inline
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct InlineRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub conversation: Option<Vec<StoredMessage>>,
    #[serde(default)]
    pub messages: Option<Vec<StoredMessage>>,
    #[serde(default)]
    pub created_at: Option<Value>,
    #[serde(default)]
    pub context: Option<StoredContext>,
    /// Checkpoint-style records only carry file selections
    #[serde(default, deserialize_with = "null_as_default")]
    pub files: Vec<Value>,
}

impl InlineRecord {
    /// `conversation` wins; `messages` is only read when `conversation` is absent
    pub fn into_messages(self) -> Vec<StoredMessage> {
        self.conversation.or(self.messages).unwrap_or_default()
    }
}

/// `composerData:*` value that lists headers and stores messages as fragments
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ManifestRecord {
    #[serde(default)]
    pub composer_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "headers", deserialize_with = "null_as_default")]
    pub full_conversation_headers_only: Vec<FragmentHeader>,
    #[serde(default)]
    pub created_at: Option<Value>,
    #[serde(default)]
    pub last_updated_at: Option<Value>,
    #[serde(default)]
    pub context: Option<StoredContext>,
}

#[derive(Debug, Deserialize)]
pub struct FragmentHeader {
    #[serde(rename = "fragmentId", alias = "bubbleId")]
    pub fragment_id: String,
    #[serde(rename = "type", default)]
    pub kind: Option<u8>,
}

/// A message, either inline in a conversation or stored as a fragment
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StoredMessage {
    #[serde(rename = "type", default)]
    pub kind: Option<u8>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub context: Option<StoredContext>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code_blocks: Vec<StoredCodeBlock>,
    #[serde(default)]
    pub timing_info: Option<TimingInfo>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TimingInfo {
    #[serde(default)]
    pub client_end_time: Option<Value>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StoredContext {
    /// Text selections, each `{uri, text}`
    #[serde(default, deserialize_with = "null_as_default")]
    pub selections: Vec<StoredSelection>,
    /// Whole-file selections, each `{uri}`
    #[serde(default, deserialize_with = "null_as_default")]
    pub file_selections: Vec<Value>,
    #[serde(default)]
    pub mentions: Option<StoredMentions>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StoredMentions {
    /// Keyed by URI string; the values are not used
    #[serde(default, deserialize_with = "null_as_default")]
    pub file_selections: Map<String, Value>,
}

#[derive(Debug, Deserialize, Default)]
pub struct StoredSelection {
    #[serde(default)]
    pub uri: Value,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StoredCodeBlock {
    #[serde(default)]
    pub language_id: Option<String>,
    #[serde(default)]
    pub uri: Value,
    #[serde(default)]
    pub content: Option<String>,
}

/// Read an epoch-millisecond timestamp, accepting integer or float encodings.
/// Anything else, and non-positive values, read as `None`.
pub fn millis(value: Option<&Value>) -> Option<i64> {
    let ms = match value? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))?,
        _ => return None,
    };
    (ms > 0).then_some(ms)
}

/// Read an explicit `null` as the type's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
