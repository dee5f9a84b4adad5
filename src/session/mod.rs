mod model;
pub mod observer;
pub mod parser;

pub use model::{
    AttachedReference, CodeBlock, FileReference, MessageFragment, RawRecord, Role, SchemaVariant,
    Session, SessionSummary,
};
pub use observer::{AssemblyObserver, AssemblyOutcome, DropReason, LogObserver, NoopObserver};
pub use parser::{
    assemble, classify, resolve_reference, resolve_title, sanitize_title, Classification,
    RecordStore, LEGACY_CREATED_AT_CUTOFF_MS,
};
