//! Configuration constants for font minification.

use fontslim_font_codec::Format;

/// Collection used when `--collection` is not given.
pub const DEFAULT_COLLECTION: &str = "top500";

/// Formats produced when neither `--formats` nor an output file extension
/// says otherwise.
pub const DEFAULT_FORMATS: &[Format] = &[Format::Woff2, Format::Woff, Format::Ttf];

/// Infix inserted between the base name and the extension of derived outputs.
pub const MIN_SUFFIX: &str = "min";
