//! File reference resolution across the URI encodings Cursor has used.

use serde_json::Value;

use crate::session::model::FileReference;

const FILE_SCHEME: &str = "file://";

/// Resolve a raw reference into a `(display_name, path)` pair.
///
/// Accepts a URI object (`fsPath` > `external` > `path`), a selection wrapping
/// one under `uri`, or a bare URI string. Returns `None` when nothing usable is
/// present; callers omit the reference.
pub fn resolve(raw: &Value) -> Option<FileReference> {
    let path = match raw {
        Value::String(uri) => decode_uri(uri),
        Value::Object(obj) => {
            if let Some(uri) = obj.get("uri").filter(|v| !v.is_null()) {
                return resolve(uri);
            }
            if let Some(fs_path) = non_empty_str(obj.get("fsPath")) {
                fs_path.to_string()
            } else if let Some(external) = non_empty_str(obj.get("external")) {
                decode_uri(external)
            } else if let Some(path) = non_empty_str(obj.get("path")) {
                path.to_string()
            } else {
                return None;
            }
        }
        _ => return None,
    };

    if path.is_empty() {
        return None;
    }
    Some(FileReference {
        display_name: display_name(&path),
        path,
    })
}

/// Decode a `file://` URI into a path.
///
/// Only the uppercase escapes `%3A` and `%2F` are decoded; this is not a
/// general URI decoder. The scheme is `file://`, so the third slash of
/// `file:///` stays as the root of a Unix path (`file:///home/u/a.py` is
/// `/home/u/a.py`) and is dropped only before a drive letter.
pub fn decode_uri(uri: &str) -> String {
    let without_scheme = uri.strip_prefix(FILE_SCHEME).unwrap_or(uri);
    let decoded = without_scheme.replace("%3A", ":").replace("%2F", "/");

    // `/C:/Users/...` -> `C:/Users/...`
    if has_drive_after_slash(&decoded) {
        decoded[1..].to_string()
    } else {
        decoded
    }
}

/// Final path segment, splitting on `\` when present, otherwise on `/`
pub fn display_name(path: &str) -> String {
    let separator = if path.contains('\\') { '\\' } else { '/' };
    path.rsplit(separator).next().unwrap_or(path).to_string()
}

fn has_drive_after_slash(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 3 && bytes[0] == b'/' && bytes[1].is_ascii_alphabetic() && bytes[2] == b':'
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}
