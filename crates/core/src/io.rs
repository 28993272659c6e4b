//! Font file I/O.

use std::{
    fs::{create_dir_all, write},
    path::PathBuf,
};

use anyhow::{Context, Result};

/// A font file handle for I/O operations.
#[derive(Debug, Clone)]
pub struct FontFile {
    path: PathBuf,
}

impl FontFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Write font data to the file.
    pub fn write(&self, data: impl AsRef<[u8]>) -> Result<()> {
        write(&self.path, data)
            .with_context(|| format!("Failed to write font: {}", self.path.display()))
    }

    /// Create the parent directory if it doesn't exist.
    ///
    /// Safe to call concurrently for the same or sibling directories.
    pub fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        Ok(())
    }
}
