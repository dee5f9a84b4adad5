//! Command-line surface: argument parsing and the list/export handlers.

mod args;
mod handlers;

pub use args::Args;
pub use handlers::{export_sessions, list_sessions, load_sessions, ExportReport};

use crate::config::{ExportConfig, Mode};
use crate::error::ExportError;
use crate::export::DirectoryWriter;
use crate::session::LogObserver;
use crate::store::SqliteStore;

/// Run one list or export pass
pub fn execute(config: &ExportConfig) -> Result<(), ExportError> {
    // A missing store fails here, before any output directory exists
    let store = SqliteStore::open(&config.db_path)?;
    log::info!("Reading {}", store.path().display());

    let sessions = load_sessions(&store, &config.title_limits, &LogObserver)?;

    match config.mode {
        Mode::List { json } => {
            let stdout = std::io::stdout();
            list_sessions(&sessions, json, &mut stdout.lock())?;
        }
        Mode::Export => {
            let mut writer = DirectoryWriter::new(&config.output_dir);
            let report = export_sessions(&sessions, &mut writer);
            println!(
                "Exported {} of {} sessions to {}",
                report.exported.len(),
                sessions.len(),
                config.output_dir.display()
            );
            for error in &report.failed {
                eprintln!("Skipped: {}", error);
            }
        }
    }

    Ok(())
}
