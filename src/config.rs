//! Run configuration and default location discovery.

use std::path::PathBuf;

use crate::error::ExportError;

/// Env var that overrides the default database location
pub const DB_PATH_ENV: &str = "CURSOR_EXPORT_DB";

/// Output directory used when none is given
pub const DEFAULT_OUTPUT_DIR: &str = "markdown_output";

/// Maximum characters of a title derived from message text.
///
/// The two schema revisions have always used different limits; they are kept
/// separate until there is a reason to unify them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleLimits {
    pub legacy_inline: usize,
    pub fragmented: usize,
}

impl Default for TitleLimits {
    fn default() -> Self {
        Self {
            legacy_inline: 25,
            fragmented: 50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    List { json: bool },
    Export,
}

/// Everything a run needs, after flags and env vars are applied
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub mode: Mode,
    pub db_path: PathBuf,
    pub output_dir: PathBuf,
    pub title_limits: TitleLimits,
}

/// Database location: explicit path, then `CURSOR_EXPORT_DB`, then the
/// platform config directory
pub fn resolve_db_path(explicit: Option<PathBuf>) -> Result<PathBuf, ExportError> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    if let Some(path) = env_db_path() {
        return Ok(path);
    }
    default_db_path().ok_or(ExportError::NoDefaultStore)
}

/// `{config_dir}/Cursor/User/globalStorage/state.vscdb`
///
/// `config_dir` is `%APPDATA%` on Windows, `~/Library/Application Support` on
/// macOS and `~/.config` on Linux.
pub fn default_db_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| {
        dir.join("Cursor")
            .join("User")
            .join("globalStorage")
            .join("state.vscdb")
    })
}

fn env_db_path() -> Option<PathBuf> {
    std::env::var_os(DB_PATH_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
