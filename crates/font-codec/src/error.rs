//! Error types for font transcoding.

use std::result;

use read_fonts::ReadError;

use crate::Format;

/// Errors that can occur while converting a font between formats.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown font format: {0}")]
    UnknownFormat(String),

    #[error("{0} is not supported as a source format")]
    UnsupportedSource(Format),

    #[error("failed to parse font: {0}")]
    Parse(#[from] ReadError),

    #[error("subsetting produced no font data")]
    EmptySubset,

    #[error("subsetting failed: {0:#}")]
    Subset(anyhow::Error),

    #[error("{0}")]
    Woff(#[from] fontslim_font_woff::Error),

    #[error("{0}")]
    Eot(#[from] fontslim_font_eot::Error),

    #[error("{0}")]
    Svg(#[from] fontslim_font_svg::Error),
}

pub type Result<T> = result::Result<T, Error>;
