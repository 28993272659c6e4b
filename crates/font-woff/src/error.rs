//! Error types for WOFF container operations.

use std::result;

use read_fonts::ReadError;

/// Errors that can occur while encoding or decoding WOFF containers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to parse font: {0}")]
    Parse(#[from] ReadError),

    #[error("not a WOFF file (signature {0:#010x})")]
    BadSignature(u32),

    #[error("WOFF data truncated at offset {0}")]
    Truncated(usize),

    #[error("table {tag} failed to inflate: {reason}")]
    Inflate { tag: String, reason: String },

    #[error("table {tag} inflated to {actual} bytes, expected {expected}")]
    LengthMismatch { tag: String, expected: u32, actual: usize },

    #[error("WOFF2 encoding failed: {0}")]
    Woff2(String),
}

pub type Result<T> = result::Result<T, Error>;
