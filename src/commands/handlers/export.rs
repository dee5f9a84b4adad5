//! Default export handler

use std::path::PathBuf;

use crate::error::SessionError;
use crate::export::{render, DocumentWriter};
use crate::session::{sanitize_title, Session};

/// What happened to each session during an export
#[derive(Debug, Default)]
pub struct ExportReport {
    pub exported: Vec<PathBuf>,
    pub failed: Vec<SessionError>,
}

/// Render and write every session. A failed write skips that session only.
pub fn export_sessions(sessions: &[Session], writer: &mut dyn DocumentWriter) -> ExportReport {
    let mut report = ExportReport::default();

    for session in sessions {
        let content = render(session);
        let name = sanitize_title(&session.title);

        match writer.write(&name, &content) {
            Ok(path) => {
                log::info!("Exported: {}", path.display());
                report.exported.push(path);
            }
            Err(source) => {
                let error = SessionError::Write {
                    key: session.key.clone(),
                    source,
                };
                log::warn!("{}", error);
                report.failed.push(error);
            }
        }
    }

    report
}
