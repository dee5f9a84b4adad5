//! Hooks for watching classification and assembly as they happen.

use crate::error::SessionError;
use crate::session::model::SchemaVariant;

/// Why an assembled session was left out of the result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Fragmented record whose manifest resolved to no stored fragments
    NoResolvableFragments,
    /// No message text and no referenced files
    NoContent,
    /// Both timestamps present and the end precedes the start
    EndsBeforeStart,
}

/// What became of one candidate session
#[derive(Debug)]
pub enum AssemblyOutcome<'a> {
    Assembled { message_count: usize },
    Dropped(DropReason),
    Failed(&'a SessionError),
}

/// Observer called by the assembler at each extension point.
///
/// Both methods default to doing nothing.
pub trait AssemblyObserver {
    fn record_classified(&self, _key: &str, _variant: SchemaVariant) {}

    fn session_assembled(&self, _key: &str, _outcome: &AssemblyOutcome<'_>) {}
}

/// Observer that forwards outcomes to the `log` facade
pub struct LogObserver;

impl AssemblyObserver for LogObserver {
    fn record_classified(&self, key: &str, variant: SchemaVariant) {
        log::debug!("Classified {} as {:?}", key, variant);
    }

    fn session_assembled(&self, key: &str, outcome: &AssemblyOutcome<'_>) {
        match outcome {
            AssemblyOutcome::Assembled { message_count } => {
                log::debug!("Assembled {} with {} messages", key, message_count)
            }
            AssemblyOutcome::Dropped(reason) => log::debug!("Dropped {}: {:?}", key, reason),
            AssemblyOutcome::Failed(error) => log::warn!("Skipping session {}: {}", key, error),
        }
    }
}

/// Observer that ignores everything
pub struct NoopObserver;

impl AssemblyObserver for NoopObserver {}
