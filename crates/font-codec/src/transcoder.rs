//! Production codec: decode, subset, re-encode.

use fontslim_font_eot::{decode_eot, encode_eot};
use fontslim_font_subsetter::Subsetter;
use fontslim_font_svg::{SvgOptions, encode_svg};
use fontslim_font_woff::{PROBLEMATIC_CODEPOINTS, decode_woff, encode_woff, encode_woff2};
use log::debug;
use read_fonts::FontRef;

use crate::{
    CodecOptions, FontCodec, Format,
    error::{Error, Result},
};

/// Converts fonts between containers with hb-subset doing the subsetting.
#[derive(Debug, Clone, Copy, Default)]
pub struct Transcoder;

impl Transcoder {
    /// Unwraps the source container into sfnt data.
    pub fn decode(&self, data: &[u8], source: Format) -> Result<Vec<u8>> {
        let sfnt = match source {
            Format::Ttf | Format::Otf => data.to_vec(),
            Format::Woff => decode_woff(data)?,
            Format::Eot => decode_eot(data)?,
            Format::Woff2 | Format::Svg => return Err(Error::UnsupportedSource(source)),
        };
        FontRef::new(&sfnt)?;
        Ok(sfnt)
    }

    /// Wraps sfnt data into the target container.
    pub fn encode(&self, sfnt: Vec<u8>, target: Format, options: &CodecOptions) -> Result<Vec<u8>> {
        match target {
            Format::Ttf | Format::Otf => Ok(sfnt),
            Format::Woff => Ok(encode_woff(&sfnt, options.output.deflate_level)?),
            Format::Woff2 => Ok(encode_woff2(&sfnt)?),
            Format::Eot => Ok(encode_eot(&sfnt)?),
            Format::Svg => {
                let svg_options = SvgOptions { metadata: options.output.svg_metadata.clone() };
                Ok(encode_svg(&sfnt, &svg_options)?.into_bytes())
            }
        }
    }

    fn subsetter(&self, chars: &[char], target: Format, options: &CodecOptions) -> Subsetter {
        let keep = chars.iter().copied().filter(|c| {
            target != Format::Woff2 || !PROBLEMATIC_CODEPOINTS.contains(&u32::from(*c))
        });
        Subsetter::new()
            .with_chars(keep)
            .hinting(options.input.hinting)
            .kerning(options.input.kerning)
            .retain_glyph_names(options.input.retain_glyph_names)
    }
}

impl FontCodec for Transcoder {
    fn convert(
        &self,
        data: &[u8],
        source: Format,
        target: Format,
        chars: &[char],
        options: &CodecOptions,
    ) -> Result<Vec<u8>> {
        let sfnt = self.decode(data, source)?;
        let subset = self.subsetter(chars, target, options).subset(&sfnt).map_err(Error::Subset)?;
        if subset.is_empty() {
            return Err(Error::EmptySubset);
        }
        debug!("{source} -> {target}: {} chars, sfnt {} -> {} bytes", chars.len(), sfnt.len(), subset.len());
        self.encode(subset, target, options)
    }
}
