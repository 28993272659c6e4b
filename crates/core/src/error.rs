//! Fatal errors raised before any per-format job starts.
//!
//! Per-format failures are never surfaced through this type; they are
//! captured in [`GenerationOutcome`](crate::GenerationOutcome) instead.

use std::{io, path::PathBuf, result};

/// Validation and setup errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown collection '{name}', valid collections: {}", .valid.join(", "))]
    UnknownCollection { name: String, valid: Vec<String> },

    #[error("input font not found: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("cannot determine source format of {}", .0.display())]
    UnsupportedInput(PathBuf),

    #[error("failed to read input font {}: {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no output formats requested")]
    NoFormats,

    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = result::Result<T, Error>;
