use serde::Serialize;

/// A key/value row as read from the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub key: String,
    pub value: String,
}

impl RawRecord {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Schema revision a raw record was written with
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SchemaVariant {
    /// Messages stored inline under `conversation` (or `messages`)
    LegacyInline,
    /// Header manifest whose messages live under separate fragment keys
    FragmentedHeaders,
    Unrecognized,
}

/// Author of a message
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Map the storage type code (1 = user, 2 = assistant) to a role
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Role::User),
            2 => Some(Role::Assistant),
            _ => None,
        }
    }
}

/// A normalized file identity
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileReference {
    pub display_name: String,
    pub path: String,
}

/// A file reference attached to a message, with the text that was selected from it
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AttachedReference {
    pub file: FileReference,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CodeBlock {
    pub language_id: String,
    pub reference: Option<FileReference>,
    pub content: String,
}

/// A single chat message, whether it was stored inline or as its own fragment
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MessageFragment {
    pub role: Role,
    pub text: String,
    pub file_references: Vec<AttachedReference>,
    pub code_blocks: Vec<CodeBlock>,
}

impl MessageFragment {
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// Canonical reconstructed chat session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Key of the store record the session was built from
    pub key: String,
    pub variant: SchemaVariant,
    pub stored_name: Option<String>,
    pub title: String,
    /// Epoch milliseconds; `None` when the store holds 0 or nothing
    pub created_at: Option<i64>,
    pub ended_at: Option<i64>,
    pub messages: Vec<MessageFragment>,
    pub referenced_files: Vec<FileReference>,
}

/// One row of `list` output
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub key: String,
    pub title: String,
    pub created_at: Option<i64>,
    pub ended_at: Option<i64>,
    pub message_count: usize,
}

impl From<&Session> for SessionSummary {
    fn from(session: &Session) -> Self {
        Self {
            key: session.key.clone(),
            title: session.title.clone(),
            created_at: session.created_at,
            ended_at: session.ended_at,
            message_count: session.messages.len(),
        }
    }
}
