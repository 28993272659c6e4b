//! WOFF and WOFF2 container encoding for sfnt fonts.
//!
//! WOFF 1.0 compresses every sfnt table independently with zlib; WOFF2
//! compresses the whole table stream with Brotli.
//!
//! # Example
//!
//! ```no_run
//! use fontslim_font_woff::{decode_woff, encode_woff, encode_woff2};
//!
//! let ttf_data: &[u8] = &[];
//! let woff = encode_woff(ttf_data, 6).unwrap();
//! let sfnt = decode_woff(&woff).unwrap();
//! let woff2 = encode_woff2(&sfnt).unwrap();
//! ```

mod error;
mod woff;
mod woff2;

pub use error::{Error, Result};
pub use woff::{WOFF_SIGNATURE, decode_woff, encode_woff};
pub use woff2::{PROBLEMATIC_CODEPOINTS, WOFF2_SIGNATURE, encode_woff2};
