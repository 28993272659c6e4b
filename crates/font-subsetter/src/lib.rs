//! Code point subsetting wrapper around hb-subset with builder pattern.
//!
//! This crate restricts a TrueType/OpenType font to an explicit list of
//! characters. It operates purely on byte slices with no file I/O.
//!
//! # Example
//!
//! ```no_run
//! use fontslim_font_subsetter::Subsetter;
//!
//! let font_data: &[u8] = &[];
//! let subset = Subsetter::new()
//!     .with_chars("Hello".chars())
//!     .hinting(false)
//!     .subset(font_data);
//! ```

use anyhow::Result;
use hb_subset::{Blob, FontFace, SubsetInput, Tag};

/// Tables carrying TrueType and PostScript hinting instructions.
pub const HINTING_TABLES: &[&[u8; 4]] = &[b"cvt ", b"fpgm", b"prep", b"hdmx", b"VDMX", b"LTSH"];

/// Legacy kerning table dropped when kerning is disabled.
pub const KERNING_TABLES: &[&[u8; 4]] = &[b"kern"];

/// Layout features retained in every subset.
///
/// Covers shaping features needed for correct rendering of the retained
/// characters; `kern` is added separately depending on [`Subsetter::kerning`].
pub const LAYOUT_FEATURES: &[&[u8; 4]] = &[
    b"aalt", b"calt", b"ccmp", b"clig", b"dlig", b"fwid", b"hwid", b"liga", b"locl", b"mark",
    b"mkmk", b"pwid", b"rlig", b"rvrn", b"vert", b"vrt2", b"halt", b"vhal",
];

/// Font subsetter with builder pattern.
#[derive(Debug, Clone)]
pub struct Subsetter {
    chars: Vec<char>,
    hinting: bool,
    kerning: bool,
    retain_glyph_names: bool,
}

impl Default for Subsetter {
    fn default() -> Self {
        Self::new()
    }
}

impl Subsetter {
    /// Creates a subsetter that keeps hinting and kerning and retains no characters.
    pub fn new() -> Self {
        Self { chars: Vec::new(), hinting: true, kerning: true, retain_glyph_names: false }
    }

    /// Adds characters to retain in the subset.
    pub fn with_chars(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.chars.extend(chars);
        self
    }

    /// Sets whether hinting tables survive subsetting.
    pub fn hinting(mut self, keep: bool) -> Self {
        self.hinting = keep;
        self
    }

    /// Sets whether kerning data (`kern` table and feature) survives subsetting.
    pub fn kerning(mut self, keep: bool) -> Self {
        self.kerning = keep;
        self
    }

    /// Sets whether to retain glyph names in the subset.
    pub fn retain_glyph_names(mut self, retain: bool) -> Self {
        self.retain_glyph_names = retain;
        self
    }

    /// Characters that will be retained.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Subsets the font data and returns the result.
    ///
    /// An empty character list is valid: the result still holds the glyphs
    /// hb-subset always keeps (`.notdef`).
    pub fn subset(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut input = SubsetInput::new()?;

        if self.retain_glyph_names {
            input.flags().retain_glyph_names();
        }

        {
            let mut feature_set = input.layout_feature_tag_set();
            for tag in LAYOUT_FEATURES {
                feature_set.insert(Tag::new(*tag));
            }
            if self.kerning {
                feature_set.insert(Tag::new(b"kern"));
            }
        }

        {
            let mut unicode_set = input.unicode_set();
            for c in &self.chars {
                unicode_set.insert(*c);
            }
        }

        {
            let mut drop_tables = input.drop_table_tag_set();
            if !self.hinting {
                for table in HINTING_TABLES {
                    drop_tables.insert(Tag::new(*table));
                }
            }
            if !self.kerning {
                for table in KERNING_TABLES {
                    drop_tables.insert(Tag::new(*table));
                }
            }
        }

        let font = FontFace::new(Blob::from_bytes(data)?)?;
        let subset_font = input.subset_font(&font)?;
        Ok(subset_font.underlying_blob().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use skrifa::{FontRef, MetadataProvider, raw::TableProvider};

    use super::*;

    fn mapped_chars(data: &[u8], limit: usize) -> Vec<char> {
        let font = FontRef::new(data).unwrap();
        font.charmap()
            .mappings()
            .filter_map(|(cp, _)| char::from_u32(cp))
            .take(limit)
            .collect()
    }

    #[test]
    fn test_builder_chain() {
        let subsetter = Subsetter::new()
            .with_chars(['a', 'b'])
            .with_chars("cd".chars())
            .hinting(false)
            .kerning(false)
            .retain_glyph_names(true);

        assert_eq!(subsetter.chars(), &['a', 'b', 'c', 'd']);
        assert!(!subsetter.hinting);
        assert!(!subsetter.kerning);
        assert!(subsetter.retain_glyph_names);
    }

    #[test]
    fn test_defaults_keep_hinting_and_kerning() {
        let subsetter = Subsetter::default();
        assert!(subsetter.hinting);
        assert!(subsetter.kerning);
        assert!(subsetter.chars().is_empty());
    }

    #[test]
    fn test_subset_keeps_requested_chars() {
        let data = font_test_data::VAZIRMATN_VAR;
        let chars = mapped_chars(data, 3);
        assert!(!chars.is_empty());

        let result = Subsetter::new().with_chars(chars.iter().copied()).subset(data).unwrap();
        let output = FontRef::new(&result).unwrap();
        let charmap = output.charmap();
        for c in chars {
            assert!(charmap.map(c).is_some(), "missing {c:?}");
        }
    }

    #[test]
    fn test_empty_subset_is_still_a_font() {
        let data = font_test_data::VAZIRMATN_VAR;
        let result = Subsetter::new().subset(data).unwrap();
        let output = FontRef::new(&result).unwrap();
        assert!(output.head().is_ok());
        assert!(output.maxp().unwrap().num_glyphs() >= 1);
    }
}
