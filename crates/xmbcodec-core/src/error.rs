//! Error types for the XmbCodec conversion pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from a container codec while parsing or rendering the
/// binary form of a document.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("unrecognized container magic")]
    BadMagic,

    #[error("unsupported container version {version}")]
    UnsupportedVersion { version: u32 },

    #[error("container truncated: needed {needed} more bytes at offset {offset}")]
    Truncated { offset: usize, needed: usize },

    #[error("container checksum mismatch: stored {stored:#018x}, computed {computed:#018x}")]
    ChecksumMismatch { stored: u64, computed: u64 },

    #[error("string table index {index} out of range ({len} entries)")]
    StringIndexOutOfRange { index: u32, len: u32 },

    #[error("element nesting exceeds {limit} levels")]
    TooDeep { limit: usize },

    #[error("invalid string data: {0}")]
    InvalidString(#[from] std::str::Utf8Error),

    #[error("{0}")]
    Other(String),
}

/// Errors while serializing or parsing the textual document form.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed attribute: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    #[error("document has no root element")]
    MissingRoot,

    #[error("unexpected content after the root element")]
    TrailingContent,

    #[error("serialized document is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors while converting one file in either direction.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Document(#[from] DocumentError),
}
