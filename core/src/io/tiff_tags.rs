use crate::error::{Result, SemMetaError};
use crate::extraction::tags::{TagCatalog, INSTRUMENT_TAG};
use crate::types::{RawTagValue, TagId, TagSet};
use log::{debug, warn};
use std::io::Cursor;
use std::path::Path;
use tiff::decoder::ifd::Value;
use tiff::decoder::{Decoder, Limits};
use tiff::tags::Tag;

/// Accepted image extensions, compared case-insensitively
pub const IMAGE_EXTENSIONS: &[&str] = &["tif", "tiff"];

/// Checks that a path names an existing TIFF file
///
/// # Errors
///
/// Returns an error if the path is not a regular file or does not carry
/// a `.tif`/`.tiff` extension.
pub fn validate_image_path(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(SemMetaError::NotFound(path.display().to_string()));
    }

    let accepted = path
        .extension()
        .map(|ext| IMAGE_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
        .unwrap_or(false);

    if !accepted {
        return Err(SemMetaError::UnsupportedExtension(path.display().to_string()));
    }
    Ok(())
}

/// Reads the catalogued tags and the instrument tag from a TIFF file
///
/// Only the first IFD is read. A tag whose value cannot be decoded is
/// logged and treated as absent.
pub fn read_tiff_tags(path: &Path, catalog: &TagCatalog) -> Result<TagSet> {
    validate_image_path(path)?;
    let data = std::fs::read(path)?;
    read_tiff_bytes(&data, catalog)
}

/// Same as [`read_tiff_tags`] for an in-memory TIFF image
pub fn read_tiff_bytes(data: &[u8], catalog: &TagCatalog) -> Result<TagSet> {
    let mut decoder = Decoder::new(Cursor::new(data))?.with_limits(Limits::unlimited());
    let mut tags = TagSet::new();

    for (id, _) in catalog.iter() {
        match decoder.find_tag(Tag::from_u16_exhaustive(id)) {
            Ok(Some(value)) => {
                if let Some(raw) = convert_value(value) {
                    tags.insert(id, raw);
                }
            }
            Ok(None) => {}
            Err(e) => warn!("Skipping tag {}: {}", id, e),
        }
    }

    if let Some(block) = read_instrument_block(&mut decoder, data) {
        tags.insert(INSTRUMENT_TAG, block);
    }

    debug!("Read {} tags from TIFF", tags.len());
    Ok(tags)
}

/// Reads the instrument tag as text, or as raw bytes when it is not ASCII
///
/// Vendor blocks are often Latin-1 or stored as BYTE/UNDEFINED fields.
/// The decoder returns the latter as a list of bytes; an ASCII field holding
/// non-ASCII text is rejected by the decoder and re-read from the classic IFD.
fn read_instrument_block<R: std::io::Read + std::io::Seek>(
    decoder: &mut Decoder<R>,
    data: &[u8],
) -> Option<RawTagValue> {
    match decoder.find_tag(Tag::from_u16_exhaustive(INSTRUMENT_TAG)) {
        Ok(None) => None,
        Ok(Some(Value::Ascii(text))) => {
            Some(RawTagValue::Text(text.trim_end_matches('\0').to_string()))
        }
        Ok(Some(value)) => match byte_payload(&value) {
            Some(bytes) => Some(RawTagValue::Bytes(bytes)),
            None => convert_value(value),
        },
        Err(e) => {
            debug!("Instrument tag not decodable as text ({}), reading raw bytes", e);
            let bytes = raw_tag_bytes(data, INSTRUMENT_TAG);
            if bytes.is_none() {
                warn!("Instrument tag {} could not be read", INSTRUMENT_TAG);
            }
            bytes.map(RawTagValue::Bytes)
        }
    }
}

/// Collects a BYTE/UNDEFINED payload, `None` for any other field type
fn byte_payload(value: &Value) -> Option<Vec<u8>> {
    match value {
        Value::Byte(b) => Some(vec![*b]),
        Value::List(items) => items
            .iter()
            .map(|item| match item {
                Value::Byte(b) => Some(*b),
                _ => None,
            })
            .collect(),
        _ => None,
    }
}

/// Converts a decoder value into a raw tag value
fn convert_value(value: Value) -> Option<RawTagValue> {
    let raw = match value {
        Value::Byte(v) => RawTagValue::Int(v as i64),
        Value::Short(v) => RawTagValue::Int(v as i64),
        Value::Signed(v) => RawTagValue::Int(v as i64),
        Value::SignedBig(v) => RawTagValue::Int(v),
        Value::Unsigned(v) => RawTagValue::Int(v as i64),
        Value::UnsignedBig(v) => RawTagValue::Int(i64::try_from(v).ok()?),
        Value::Ifd(v) => RawTagValue::Int(v as i64),
        Value::IfdBig(v) => RawTagValue::Int(i64::try_from(v).ok()?),
        Value::Float(v) => RawTagValue::Float(v as f64),
        Value::Double(v) => RawTagValue::Float(v),
        Value::Rational(n, d) => RawTagValue::Rational(n as i64, d as i64),
        Value::SRational(n, d) => RawTagValue::Rational(n as i64, d as i64),
        Value::RationalBig(n, d) => {
            RawTagValue::Rational(i64::try_from(n).ok()?, i64::try_from(d).ok()?)
        }
        Value::SRationalBig(n, d) => RawTagValue::Rational(n, d),
        Value::Ascii(s) => RawTagValue::Text(s.trim_end_matches('\0').to_string()),
        Value::List(items) => RawTagValue::List(items.into_iter().filter_map(convert_value).collect()),
        other => {
            debug!("Unsupported TIFF value {:?}", other);
            return None;
        }
    };
    Some(raw)
}

/// Byte order of a TIFF file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endian {
    Little,
    Big,
}

/// Reads the raw payload of one tag from the first IFD of a classic TIFF
fn raw_tag_bytes(data: &[u8], tag: TagId) -> Option<Vec<u8>> {
    let endian = match data.get(0..2)? {
        b"II" => Endian::Little,
        b"MM" => Endian::Big,
        _ => return None,
    };
    let read_u16 = |offset: usize| -> Option<u16> {
        let b: [u8; 2] = data.get(offset..offset + 2)?.try_into().ok()?;
        Some(match endian {
            Endian::Little => u16::from_le_bytes(b),
            Endian::Big => u16::from_be_bytes(b),
        })
    };
    let read_u32 = |offset: usize| -> Option<u32> {
        let b: [u8; 4] = data.get(offset..offset + 4)?.try_into().ok()?;
        Some(match endian {
            Endian::Little => u32::from_le_bytes(b),
            Endian::Big => u32::from_be_bytes(b),
        })
    };

    // BigTIFF (43) is not handled here
    if read_u16(2)? != 42 {
        return None;
    }

    let ifd = read_u32(4)? as usize;
    let count = read_u16(ifd)? as usize;
    for index in 0..count {
        let entry = ifd + 2 + index * 12;
        if read_u16(entry)? != tag {
            continue;
        }
        let size = (read_u32(entry + 4)? as usize).checked_mul(field_size(read_u16(entry + 2)?)?)?;
        let start = if size <= 4 {
            entry + 8
        } else {
            read_u32(entry + 8)? as usize
        };
        return data.get(start..start.checked_add(size)?).map(<[u8]>::to_vec);
    }
    None
}

/// Size in bytes of one element of a TIFF field type
fn field_size(field_type: u16) -> Option<usize> {
    match field_type {
        1 | 2 | 6 | 7 => Some(1),
        3 | 8 => Some(2),
        4 | 9 | 11 | 13 => Some(4),
        5 | 10 | 12 => Some(8),
        _ => None,
    }
}
