//! # xmbcodec-container
//!
//! A reference [`ContainerCodec`] over the generic document tree.
//!
//! The production pipeline treats the schema-owning codec as an
//! external collaborator behind the `ContainerCodec` seam; this crate
//! provides a lossless stand-in so the tool and its round-trip tests
//! work end to end without any proprietary schema knowledge.
//!
//! ## Layout (all integers little-endian)
//! ```text
//! "XBC\x01"                          magic + format version
//! u32 string_count
//! string_count × (u32 len, utf-8 bytes)   deduplicated string table
//! element records, depth-first:
//!   u32 name_idx
//!   u32 attr_count, attr_count × (u32 key_idx, u32 value_idx)
//!   u8  has_text, [u32 text_idx]
//!   u32 child_count, children...
//! u64 crc64 of every preceding byte       integrity footer
//! ```
//!
//! Strings are interned by their CRC64 digest, the same identity the
//! surrounding tooling uses for content fingerprints.

use std::collections::HashMap;
use xmbcodec_core::{CodecError, ContainerCodec, Crc64, Document, Element, StreamingDigest};

const MAGIC: &[u8; 4] = b"XBC\x01";

/// Nesting cap for decoding; guards against pathological inputs.
const MAX_DEPTH: usize = 512;

/// The reference binary container codec. Stateless and shareable.
#[derive(Debug, Default, Clone, Copy)]
pub struct XmbCodec;

impl XmbCodec {
    pub fn new() -> Self {
        Self
    }
}

impl ContainerCodec for XmbCodec {
    fn parse_binary(&self, data: &[u8]) -> Result<Document, CodecError> {
        // Verify the footer before trusting anything else.
        if data.len() < MAGIC.len() + 8 {
            return Err(CodecError::Truncated {
                offset: data.len(),
                needed: MAGIC.len() + 8 - data.len(),
            });
        }
        let (payload, footer) = data.split_at(data.len() - 8);
        let mut raw = [0u8; 8];
        raw.copy_from_slice(footer);
        let stored = u64::from_le_bytes(raw);
        let computed = Crc64::checksum(payload);
        if stored != computed {
            return Err(CodecError::ChecksumMismatch { stored, computed });
        }

        let mut cursor = Cursor::new(payload);
        if cursor.read_bytes(MAGIC.len())? != MAGIC {
            return Err(CodecError::BadMagic);
        }

        let strings = read_string_table(&mut cursor)?;
        let root = read_element(&mut cursor, &strings, 0)?;
        Ok(Document::new(root))
    }

    fn render_binary(&self, doc: &Document) -> Result<Vec<u8>, CodecError> {
        let mut strings = StringTable::default();
        let mut body = Vec::new();
        write_element(&mut body, &mut strings, &doc.root)?;

        let mut out = Vec::with_capacity(body.len() + 64);
        out.extend_from_slice(MAGIC);
        strings.encode_into(&mut out);
        out.extend_from_slice(&body);

        let crc = Crc64::checksum(&out);
        out.extend_from_slice(&crc.to_le_bytes());
        Ok(out)
    }
}

// ─── String table ─────────────────────────────────────────────────────────────

/// Interns strings in first-occurrence order, keyed by CRC64 digest.
#[derive(Default)]
struct StringTable {
    entries: Vec<String>,
    by_digest: HashMap<u64, u32>,
}

impl StringTable {
    fn intern(&mut self, crc: &mut Crc64, s: &str) -> u32 {
        crc.reset();
        crc.write(s.as_bytes());
        let digest = crc.digest();

        if let Some(&idx) = self.by_digest.get(&digest) {
            return idx;
        }
        let idx = self.entries.len() as u32;
        self.entries.push(s.to_owned());
        self.by_digest.insert(digest, idx);
        idx
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&(self.entries.len() as u32).to_le_bytes());
        for entry in &self.entries {
            out.extend_from_slice(&(entry.len() as u32).to_le_bytes());
            out.extend_from_slice(entry.as_bytes());
        }
    }
}

fn read_string_table(cursor: &mut Cursor<'_>) -> Result<Vec<String>, CodecError> {
    let count = cursor.read_u32()?;
    let mut entries = Vec::new();
    for _ in 0..count {
        let len = cursor.read_u32()? as usize;
        let bytes = cursor.read_bytes(len)?;
        entries.push(std::str::from_utf8(bytes)?.to_owned());
    }
    Ok(entries)
}

// ─── Element records ──────────────────────────────────────────────────────────

fn write_element(
    out: &mut Vec<u8>,
    strings: &mut StringTable,
    element: &Element,
) -> Result<(), CodecError> {
    // One engine per tree walk; the table is shared with its forks.
    let mut crc = Crc64::new();
    write_element_inner(out, strings, &mut crc, element)
}

fn write_element_inner(
    out: &mut Vec<u8>,
    strings: &mut StringTable,
    crc: &mut Crc64,
    element: &Element,
) -> Result<(), CodecError> {
    let name_idx = strings.intern(crc, &element.name);
    out.extend_from_slice(&name_idx.to_le_bytes());

    out.extend_from_slice(&(element.attributes.len() as u32).to_le_bytes());
    for (key, value) in &element.attributes {
        let key_idx = strings.intern(crc, key);
        let value_idx = strings.intern(crc, value);
        out.extend_from_slice(&key_idx.to_le_bytes());
        out.extend_from_slice(&value_idx.to_le_bytes());
    }

    match &element.text {
        Some(text) => {
            out.push(1);
            let text_idx = strings.intern(crc, text);
            out.extend_from_slice(&text_idx.to_le_bytes());
        }
        None => out.push(0),
    }

    out.extend_from_slice(&(element.children.len() as u32).to_le_bytes());
    for child in &element.children {
        write_element_inner(out, strings, crc, child)?;
    }
    Ok(())
}

fn read_element(
    cursor: &mut Cursor<'_>,
    strings: &[String],
    depth: usize,
) -> Result<Element, CodecError> {
    if depth >= MAX_DEPTH {
        return Err(CodecError::TooDeep { limit: MAX_DEPTH });
    }

    let mut element = Element::new(read_string(cursor, strings)?);

    let attr_count = cursor.read_u32()?;
    for _ in 0..attr_count {
        let key = read_string(cursor, strings)?;
        let value = read_string(cursor, strings)?;
        element.attributes.push((key, value));
    }

    if cursor.read_u8()? != 0 {
        element.text = Some(read_string(cursor, strings)?);
    }

    let child_count = cursor.read_u32()?;
    for _ in 0..child_count {
        element.children.push(read_element(cursor, strings, depth + 1)?);
    }
    Ok(element)
}

fn read_string(cursor: &mut Cursor<'_>, strings: &[String]) -> Result<String, CodecError> {
    let index = cursor.read_u32()?;
    strings
        .get(index as usize)
        .cloned()
        .ok_or(CodecError::StringIndexOutOfRange {
            index,
            len: strings.len() as u32,
        })
}

// ─── Cursor ───────────────────────────────────────────────────────────────────

/// Bounds-checked reader over the container payload.
struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], CodecError> {
        let remaining = self.data.len() - self.pos;
        if len > remaining {
            return Err(CodecError::Truncated {
                offset: self.pos,
                needed: len - remaining,
            });
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.read_bytes(1)?[0])
    }

    fn read_u32(&mut self) -> Result<u32, CodecError> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}
