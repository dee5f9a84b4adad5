//! Session normalization.
//!
//! Turns raw `cursorDiskKV` rows into canonical sessions, whichever schema
//! revision wrote them.
//!
//! # Submodules
//!
//! - `classifier`: Schema variant detection and envelope unwrapping
//! - `reference`: File reference decoding
//! - `records`: Serde shapes of stored values
//! - `assembler`: Session reconstruction, fragment joining, filtering and ordering
//! - `title`: Title fallback and filename sanitizing

mod assembler;
mod classifier;
mod records;
mod reference;
mod title;

// Re-export public API
pub use assembler::{assemble, start_key, validity_failure, RecordStore, LEGACY_CREATED_AT_CUTOFF_MS};
pub use classifier::{classify, unwrap_envelope, Classification, SENTINEL_KEY};
pub use reference::{decode_uri, display_name, resolve as resolve_reference};
pub use title::{resolve_title, sanitize_title, UNTITLED};
