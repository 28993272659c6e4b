//! Codec options deserialized from the `--input-options` and
//! `--output-options` JSON objects.
//!
//! Unknown keys are ignored and missing keys take their defaults.

use serde::Deserialize;

/// Options applied while reading and subsetting the source font.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReadOptions {
    /// Keep hinting tables (`fpgm`, `prep`, `cvt `, ...).
    pub hinting: bool,
    /// Keep the `kern` table and feature.
    pub kerning: bool,
    /// Keep glyph names in the `post` table.
    pub retain_glyph_names: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self { hinting: true, kerning: true, retain_glyph_names: false }
    }
}

/// Options applied while encoding the target container.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WriteOptions {
    /// zlib level for WOFF tables, `0..=10`.
    pub deflate_level: u8,
    /// Text for the `<metadata>` element of SVG fonts.
    pub svg_metadata: Option<String>,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self { deflate_level: 6, svg_metadata: None }
    }
}

/// Options forwarded to the codec for every conversion in a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodecOptions {
    pub input: ReadOptions,
    pub output: WriteOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let read: ReadOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(read, ReadOptions::default());
        let write: WriteOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(write.deflate_level, 6);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let read: ReadOptions =
            serde_json::from_str(r#"{"hinting": false, "somethingElse": [1, 2]}"#).unwrap();
        assert!(!read.hinting);
        assert!(read.kerning);
    }

    #[test]
    fn test_camel_case_keys() {
        let write: WriteOptions =
            serde_json::from_str(r#"{"deflateLevel": 9, "svgMetadata": "made here"}"#).unwrap();
        assert_eq!(write.deflate_level, 9);
        assert_eq!(write.svg_metadata.as_deref(), Some("made here"));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(serde_json::from_str::<ReadOptions>("{hinting: }").is_err());
        assert!(serde_json::from_str::<ReadOptions>(r#"{"hinting": "yes"}"#).is_err());
    }
}
