//! Command handlers
//!
//! - `load`: Store reading and session assembly shared by every mode
//! - `list`: One-line summaries without writing files
//! - `export`: One Markdown document per session

mod export;
mod list;
mod load;

pub use export::{export_sessions, ExportReport};
pub use list::list_sessions;
pub use load::load_sessions;
