use clap::Parser;
use std::path::PathBuf;

use crate::config::{resolve_db_path, ExportConfig, Mode, TitleLimits, DEFAULT_OUTPUT_DIR};
use crate::error::ExportError;

/// Cursor Chat Export - write Cursor chat sessions out as Markdown
#[derive(Parser, Debug)]
#[command(name = "cursor-chat-export")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// List sessions instead of exporting them
    #[arg(short, long)]
    pub list: bool,

    /// Print the session list as JSON lines
    #[arg(long, requires = "list")]
    pub json: bool,

    /// Path to Cursor's state.vscdb (defaults to the platform location)
    #[arg(long = "db-path")]
    pub db_path: Option<PathBuf>,

    /// Directory the Markdown files are written to
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Log progress to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn into_config(self) -> Result<ExportConfig, ExportError> {
        let mode = if self.list {
            Mode::List { json: self.json }
        } else {
            Mode::Export
        };
        Ok(ExportConfig {
            mode,
            db_path: resolve_db_path(self.db_path)?,
            output_dir: self.output,
            title_limits: TitleLimits::default(),
        })
    }
}
