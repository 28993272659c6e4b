//! Font container formats.

use std::{fmt, path::Path, str::FromStr};

use crate::error::Error;

/// A font container encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Ttf,
    Otf,
    Eot,
    Svg,
    Woff,
    Woff2,
}

impl Format {
    /// Every supported format, in declaration order.
    pub const ALL: [Format; 6] =
        [Format::Ttf, Format::Otf, Format::Eot, Format::Svg, Format::Woff, Format::Woff2];

    /// File extension (without the dot), which is also the format identifier.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Ttf => "ttf",
            Format::Otf => "otf",
            Format::Eot => "eot",
            Format::Svg => "svg",
            Format::Woff => "woff",
            Format::Woff2 => "woff2",
        }
    }

    /// Looks up a format by identifier, ignoring ASCII case.
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.extension().eq_ignore_ascii_case(ext))
    }

    /// Format implied by a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension().and_then(|ext| ext.to_str()).and_then(Self::from_extension)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.extension())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s.trim()).ok_or_else(|| Error::UnknownFormat(s.to_string()))
    }
}
