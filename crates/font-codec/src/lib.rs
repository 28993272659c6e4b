//! Font container decoding, subsetting and re-encoding.
//!
//! [`FontCodec`] is the seam between batch orchestration and the actual
//! font work: it takes raw bytes in one container, keeps only the requested
//! characters and returns bytes in another container. [`Transcoder`] is the
//! implementation backed by hb-subset and the container crates.
//!
//! # Example
//!
//! ```no_run
//! use fontslim_font_codec::{CodecOptions, FontCodec, Format, Transcoder};
//!
//! let ttf: &[u8] = &[];
//! let woff2 = Transcoder.convert(ttf, Format::Ttf, Format::Woff2, &['A', 'B'], &CodecOptions::default());
//! ```

mod error;
mod format;
mod options;
mod transcoder;

pub use error::{Error, Result};
pub use format::Format;
pub use options::{CodecOptions, ReadOptions, WriteOptions};
pub use transcoder::Transcoder;

/// Converts font bytes between formats while subsetting to a character list.
///
/// Implementations must be stateless per call: the batch generator invokes
/// `convert` concurrently from several threads with shared inputs.
pub trait FontCodec: Sync {
    fn convert(
        &self,
        data: &[u8],
        source: Format,
        target: Format,
        chars: &[char],
        options: &CodecOptions,
    ) -> Result<Vec<u8>>;
}
