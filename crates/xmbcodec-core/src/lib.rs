//! # xmbcodec-core
//!
//! Core traits, types, and primitives shared across all XmbCodec crates.
//! The streaming digest abstraction, the CRC64 engine, the generic
//! document tree, and the container codec seam are all defined here.

pub mod codec;
pub mod crc64;
pub mod digest;
pub mod document;
pub mod error;

pub use codec::ContainerCodec;
pub use crc64::Crc64;
pub use digest::StreamingDigest;
pub use document::{Document, Element};
pub use error::{CodecError, ConvertError, DocumentError};
