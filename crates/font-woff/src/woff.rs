//! WOFF 1.0 encoding and decoding.

use log::debug;
use miniz_oxide::{deflate::compress_to_vec_zlib, inflate::decompress_to_vec_zlib};
use read_fonts::{FontRef, types::Tag};
use write_fonts::FontBuilder;

use crate::error::{Error, Result};

/// `wOFF` magic number.
pub const WOFF_SIGNATURE: u32 = 0x774F_4646;

const HEADER_SIZE: usize = 44;
const DIRECTORY_ENTRY_SIZE: usize = 20;
const SFNT_HEADER_SIZE: u32 = 12;
const SFNT_ENTRY_SIZE: u32 = 16;

struct TableEntry<'a> {
    tag: Tag,
    checksum: u32,
    orig: &'a [u8],
    stored: Vec<u8>,
}

fn pad4(len: usize) -> usize {
    (len + 3) & !3
}

fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_be_bytes());
}

/// Wraps sfnt data in a WOFF 1.0 container.
///
/// Each table is zlib-compressed at `level` (clamped to `0..=10`) and stored
/// uncompressed when compression does not make it smaller.
pub fn encode_woff(sfnt: &[u8], level: u8) -> Result<Vec<u8>> {
    let font = FontRef::new(sfnt)?;
    let level = level.min(10);

    let mut entries = Vec::new();
    for record in font.table_directory.table_records() {
        let tag = record.tag();
        let Some(data) = font.table_data(tag) else {
            continue;
        };
        let orig = data.as_bytes();
        let compressed = compress_to_vec_zlib(orig, level);
        let stored = if compressed.len() < orig.len() { compressed } else { orig.to_vec() };
        entries.push(TableEntry { tag, checksum: record.checksum(), orig, stored });
    }
    entries.sort_by_key(|e| e.tag);

    let total_sfnt_size = SFNT_HEADER_SIZE
        + SFNT_ENTRY_SIZE * entries.len() as u32
        + entries.iter().map(|e| pad4(e.orig.len()) as u32).sum::<u32>();

    let directory_size = DIRECTORY_ENTRY_SIZE * entries.len();
    let mut data_offset = HEADER_SIZE + directory_size;
    let mut directory = Vec::with_capacity(directory_size);
    let mut body = Vec::new();
    for entry in &entries {
        directory.extend_from_slice(&entry.tag.to_be_bytes());
        put_u32(&mut directory, data_offset as u32);
        put_u32(&mut directory, entry.stored.len() as u32);
        put_u32(&mut directory, entry.orig.len() as u32);
        put_u32(&mut directory, entry.checksum);

        body.extend_from_slice(&entry.stored);
        body.resize(pad4(body.len()), 0);
        data_offset = HEADER_SIZE + directory_size + body.len();
    }

    let length = HEADER_SIZE + directory.len() + body.len();
    let mut out = Vec::with_capacity(length);
    put_u32(&mut out, WOFF_SIGNATURE);
    put_u32(&mut out, font.table_directory.sfnt_version());
    put_u32(&mut out, length as u32);
    put_u16(&mut out, entries.len() as u16);
    put_u16(&mut out, 0);
    put_u32(&mut out, total_sfnt_size);
    put_u16(&mut out, 1);
    put_u16(&mut out, 0);
    // metadata and private blocks are not emitted
    for _ in 0..5 {
        put_u32(&mut out, 0);
    }
    out.extend_from_slice(&directory);
    out.extend_from_slice(&body);

    debug!("WOFF: {} tables, {} -> {} bytes", entries.len(), sfnt.len(), out.len());
    Ok(out)
}

struct Reader<'a> {
    data: &'a [u8],
}

impl<'a> Reader<'a> {
    fn slice(&self, offset: usize, len: usize) -> Result<&'a [u8]> {
        offset
            .checked_add(len)
            .and_then(|end| self.data.get(offset..end))
            .ok_or(Error::Truncated(offset))
    }

    fn u16(&self, offset: usize) -> Result<u16> {
        let bytes = self.slice(offset, 2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    fn u32(&self, offset: usize) -> Result<u32> {
        let bytes = self.slice(offset, 4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

/// Unwraps a WOFF 1.0 container back into sfnt data.
pub fn decode_woff(woff: &[u8]) -> Result<Vec<u8>> {
    let reader = Reader { data: woff };
    let signature = reader.u32(0)?;
    if signature != WOFF_SIGNATURE {
        return Err(Error::BadSignature(signature));
    }

    let num_tables = reader.u16(12)? as usize;
    let mut builder = FontBuilder::new();

    for i in 0..num_tables {
        let base = HEADER_SIZE + i * DIRECTORY_ENTRY_SIZE;
        let raw_tag = reader.slice(base, 4)?;
        let tag = Tag::new(&[raw_tag[0], raw_tag[1], raw_tag[2], raw_tag[3]]);
        let offset = reader.u32(base + 4)? as usize;
        let comp_length = reader.u32(base + 8)? as usize;
        let orig_length = reader.u32(base + 12)?;

        let stored = reader.slice(offset, comp_length)?;
        let table = if comp_length < orig_length as usize {
            decompress_to_vec_zlib(stored)
                .map_err(|e| Error::Inflate { tag: tag.to_string(), reason: format!("{e:?}") })?
        } else {
            stored.to_vec()
        };

        if table.len() != orig_length as usize {
            return Err(Error::LengthMismatch {
                tag: tag.to_string(),
                expected: orig_length,
                actual: table.len(),
            });
        }
        builder.add_raw(tag, table);
    }

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use read_fonts::TableProvider;

    use super::*;

    #[test]
    fn test_header_fields() {
        let data = font_test_data::VAZIRMATN_VAR;
        let woff = encode_woff(data, 6).unwrap();
        let reader = Reader { data: &woff };

        assert_eq!(reader.u32(0).unwrap(), WOFF_SIGNATURE);
        assert_eq!(reader.u32(8).unwrap() as usize, woff.len());

        let font = FontRef::new(data).unwrap();
        assert_eq!(reader.u16(12).unwrap() as usize, font.table_directory.table_records().len());
    }

    #[test]
    fn test_decode_restores_tables() {
        let data = font_test_data::VAZIRMATN_VAR;
        let woff = encode_woff(data, 9).unwrap();
        let sfnt = decode_woff(&woff).unwrap();

        let original = FontRef::new(data).unwrap();
        let restored = FontRef::new(&sfnt).unwrap();
        for record in original.table_directory.table_records() {
            let tag = record.tag();
            if tag == Tag::new(b"head") {
                continue;
            }
            assert_eq!(
                original.table_data(tag).map(|d| d.as_bytes().to_vec()),
                restored.table_data(tag).map(|d| d.as_bytes().to_vec()),
                "table {tag} differs"
            );
        }
        assert!(restored.head().is_ok());
    }

    #[test]
    fn test_level_zero_stores_tables() {
        let data = font_test_data::VAZIRMATN_VAR;
        let woff = encode_woff(data, 0).unwrap();
        assert!(decode_woff(&woff).is_ok());
    }

    #[test]
    fn test_rejects_non_woff() {
        let err = decode_woff(font_test_data::VAZIRMATN_VAR).unwrap_err();
        assert!(matches!(err, Error::BadSignature(_)));
    }

    #[test]
    fn test_rejects_truncated() {
        let data = font_test_data::VAZIRMATN_VAR;
        let woff = encode_woff(data, 6).unwrap();
        let err = decode_woff(&woff[..60]).unwrap_err();
        assert!(matches!(err, Error::Truncated(_)));
    }
}
