//! Embedded OpenType (EOT) wrapper for sfnt fonts.
//!
//! Only the uncompressed EOT 2.1 layout is written. Decoding accepts any
//! version whose font data is not MTX-compressed and undoes XOR obfuscation.

use std::result;

use log::debug;
use read_fonts::{FontRef, ReadError, TableProvider};

/// EOT version 2.1.
pub const EOT_VERSION: u32 = 0x0002_0001;

/// Magic number stored at byte offset 34 of every EOT header.
pub const EOT_MAGIC: u16 = 0x504C;

const FLAG_TTCOMPRESSED: u32 = 0x0000_0004;
const FLAG_XOR_ENCRYPTED: u32 = 0x1000_0000;
const XOR_KEY: u8 = 0x50;
const DEFAULT_CHARSET: u8 = 1;

const NAME_FAMILY: u16 = 1;
const NAME_SUBFAMILY: u16 = 2;
const NAME_FULL: u16 = 4;
const NAME_VERSION: u16 = 5;

/// Errors that can occur while wrapping or unwrapping EOT data.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to parse font: {0}")]
    Parse(#[from] ReadError),

    #[error("EOT header truncated")]
    Truncated,

    #[error("EOT magic number mismatch: {0:#06x}")]
    BadMagic(u16),

    #[error("MTX-compressed EOT data is not supported")]
    Compressed,

    #[error("font name too long for EOT header: {0} bytes")]
    NameTooLong(usize),
}

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug, Default)]
struct FontNames {
    family: String,
    style: String,
    version: String,
    full: String,
}

fn read_names(font: &FontRef) -> FontNames {
    let mut names = FontNames::default();
    let Ok(name) = font.name() else {
        return names;
    };

    // Windows records win over Mac/Unicode ones when both are present.
    let mut ranked: Vec<_> = name.name_record().iter().collect();
    ranked.sort_by_key(|record| record.platform_id() == 3);

    for record in ranked {
        let Ok(string) = record.string(name.string_data()) else {
            continue;
        };
        let value: String = string.chars().collect();
        match record.name_id().to_u16() {
            NAME_FAMILY => names.family = value,
            NAME_SUBFAMILY => names.style = value,
            NAME_VERSION => names.version = value,
            NAME_FULL => names.full = value,
            _ => {}
        }
    }
    names
}

fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn put_name(out: &mut Vec<u8>, value: &str) -> Result<()> {
    let bytes: Vec<u8> = value.encode_utf16().flat_map(u16::to_le_bytes).collect();
    let size = u16::try_from(bytes.len()).map_err(|_| Error::NameTooLong(bytes.len()))?;
    put_u16(out, size);
    out.extend_from_slice(&bytes);
    Ok(())
}

/// Wraps sfnt data in an EOT 2.1 container.
///
/// Header fields come from the font's `OS/2`, `head` and `name` tables; a
/// missing table leaves its fields zeroed.
pub fn encode_eot(sfnt: &[u8]) -> Result<Vec<u8>> {
    let font = FontRef::new(sfnt)?;
    let names = read_names(&font);

    let mut panose = [0u8; 10];
    let mut italic = 0u8;
    let mut weight = 400u32;
    let mut fs_type = 0u16;
    let mut unicode_ranges = [0u32; 4];
    let mut code_page_ranges = [0u32; 2];
    if let Ok(os2) = font.os2() {
        let source = os2.panose_10();
        let len = source.len().min(panose.len());
        panose[..len].copy_from_slice(&source[..len]);
        italic = (os2.fs_selection().bits() & 1) as u8;
        weight = u32::from(os2.us_weight_class());
        fs_type = os2.fs_type();
        unicode_ranges = [
            os2.ul_unicode_range_1(),
            os2.ul_unicode_range_2(),
            os2.ul_unicode_range_3(),
            os2.ul_unicode_range_4(),
        ];
        code_page_ranges = [
            os2.ul_code_page_range_1().unwrap_or(0),
            os2.ul_code_page_range_2().unwrap_or(0),
        ];
    }
    let checksum_adjustment = font.head().map(|head| head.checksum_adjustment()).unwrap_or(0);

    let mut header = Vec::with_capacity(128);
    // EOTSize is patched once the header length is known.
    put_u32(&mut header, 0);
    put_u32(&mut header, sfnt.len() as u32);
    put_u32(&mut header, EOT_VERSION);
    put_u32(&mut header, 0);
    header.extend_from_slice(&panose);
    header.push(DEFAULT_CHARSET);
    header.push(italic);
    put_u32(&mut header, weight);
    put_u16(&mut header, fs_type);
    put_u16(&mut header, EOT_MAGIC);
    for range in unicode_ranges {
        put_u32(&mut header, range);
    }
    for range in code_page_ranges {
        put_u32(&mut header, range);
    }
    put_u32(&mut header, checksum_adjustment);
    for _ in 0..4 {
        put_u32(&mut header, 0);
    }
    put_u16(&mut header, 0);
    put_name(&mut header, &names.family)?;
    put_u16(&mut header, 0);
    put_name(&mut header, &names.style)?;
    put_u16(&mut header, 0);
    put_name(&mut header, &names.version)?;
    put_u16(&mut header, 0);
    put_name(&mut header, &names.full)?;
    put_u16(&mut header, 0);
    // empty RootString
    put_u16(&mut header, 0);

    let eot_size = (header.len() + sfnt.len()) as u32;
    header[..4].copy_from_slice(&eot_size.to_le_bytes());

    let mut out = header;
    out.extend_from_slice(sfnt);
    debug!("EOT: family {:?}, {} bytes", names.family, out.len());
    Ok(out)
}

fn le_u32(data: &[u8], offset: usize) -> Result<u32> {
    data.get(offset..offset + 4)
        .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .ok_or(Error::Truncated)
}

/// Extracts the sfnt data embedded in an EOT container.
pub fn decode_eot(eot: &[u8]) -> Result<Vec<u8>> {
    let magic = eot.get(34..36).map(|b| u16::from_le_bytes([b[0], b[1]])).ok_or(Error::Truncated)?;
    if magic != EOT_MAGIC {
        return Err(Error::BadMagic(magic));
    }

    let eot_size = le_u32(eot, 0)? as usize;
    let font_data_size = le_u32(eot, 4)? as usize;
    let flags = le_u32(eot, 12)?;
    if flags & FLAG_TTCOMPRESSED != 0 {
        return Err(Error::Compressed);
    }

    // Font data always trails the header regardless of version.
    let end = eot_size.min(eot.len());
    let start = end.checked_sub(font_data_size).ok_or(Error::Truncated)?;
    let mut data = eot[start..end].to_vec();

    if flags & FLAG_XOR_ENCRYPTED != 0 {
        data.iter_mut().for_each(|b| *b ^= XOR_KEY);
    }
    Ok(data)
}
