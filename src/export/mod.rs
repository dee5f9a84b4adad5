//! Markdown rendering and document output.

mod render;
mod writer;

pub use render::{format_timestamp, render};
pub use writer::{DirectoryWriter, DocumentWriter};
