//! The `ContainerCodec` trait — the seam between this pipeline and the
//! schema-owning binary codec.
//!
//! The pipeline makes no assumption about the container's internal
//! layout: it hands whole byte buffers to the codec and receives a
//! [`Document`], or the reverse. Codecs are stored as
//! `Arc<dyn ContainerCodec>` by the batch engine.

use crate::document::Document;
use crate::error::CodecError;

/// A structural binary ⇄ document codec.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so a single codec instance
/// can be shared across Rayon worker threads without extra locking.
pub trait ContainerCodec: Send + Sync {
    /// Parse the binary container form into a structured document.
    fn parse_binary(&self, data: &[u8]) -> Result<Document, CodecError>;

    /// Render a structured document into its binary container form.
    fn render_binary(&self, doc: &Document) -> Result<Vec<u8>, CodecError>;
}
