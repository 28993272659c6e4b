//! WOFF2 encoding.

use log::debug;
use ttf2woff2::BrotliQuality;

use crate::error::{Error, Result};

/// `wOF2` magic number.
pub const WOFF2_SIGNATURE: u32 = 0x774F_4632;

/// Codepoints known to cause WOFF2 OTS validation errors.
///
/// U+F8FF (Apple logo) references `.notdef` as a composite component,
/// which Chrome's OTS parser rejects during WOFF2 decompression. Callers
/// subsetting for WOFF2 should leave these out.
pub const PROBLEMATIC_CODEPOINTS: &[u32] = &[0xF8FF];

/// Compresses sfnt data into a WOFF2 container.
pub fn encode_woff2(sfnt: &[u8]) -> Result<Vec<u8>> {
    let out = ttf2woff2::encode(sfnt, BrotliQuality::default())
        .map_err(|e| Error::Woff2(e.to_string()))?;
    debug!("WOFF2: {} -> {} bytes", sfnt.len(), out.len());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problematic_codepoints() {
        assert!(PROBLEMATIC_CODEPOINTS.contains(&0xF8FF));
    }

    #[test]
    fn test_signature() {
        let woff2 = encode_woff2(font_test_data::VAZIRMATN_VAR).unwrap();
        assert_eq!(u32::from_be_bytes([woff2[0], woff2[1], woff2[2], woff2[3]]), WOFF2_SIGNATURE);
    }
}
