//! Document output with collision-safe file naming.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

/// Destination for rendered documents
pub trait DocumentWriter {
    /// Write `content` under a name derived from `name`; returns where it landed
    fn write(&mut self, name: &str, content: &str) -> std::io::Result<PathBuf>;
}

/// Writes `{name}.md` files into a directory, adding `_1`, `_2`, ... on collision
pub struct DirectoryWriter {
    dir: PathBuf,
}

impl DirectoryWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DocumentWriter for DirectoryWriter {
    fn write(&mut self, name: &str, content: &str) -> std::io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;

        let mut suffix = 0usize;
        loop {
            let file_name = if suffix == 0 {
                format!("{}.md", name)
            } else {
                format!("{}_{}.md", name, suffix)
            };
            let path = self.dir.join(file_name);

            // create_new: an existing file is never overwritten
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(content.as_bytes())?;
                    return Ok(path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => suffix += 1,
                Err(e) => return Err(e),
            }
        }
    }
}
