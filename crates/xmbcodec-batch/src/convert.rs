//! Single-file conversion in either direction.
//!
//! Both directions are pure orchestration around the codec: exactly
//! one whole-file read and one whole-file write, no retries. A failed
//! conversion may leave a partial output behind; the failure is
//! reported with the input path and callers decide about cleanup.

use std::fs;
use std::path::{Path, PathBuf};
use xmbcodec_core::{ContainerCodec, ConvertError, Document};

/// Binary container extension.
pub const EXT_EXML: &str = "exml";
/// Textual document extension.
pub const EXT_XML: &str = "xml";

/// Conversion direction. The two variants are exhaustively enumerable,
/// each with its own handler and extension-substitution rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Binary container → XML text.
    Export,
    /// XML text → binary container.
    Import,
}

impl Direction {
    /// Extension of the files this direction consumes.
    pub fn source_extension(&self) -> &'static str {
        match self {
            Direction::Export => EXT_EXML,
            Direction::Import => EXT_XML,
        }
    }

    /// Extension of the files this direction produces.
    pub fn target_extension(&self) -> &'static str {
        match self {
            Direction::Export => EXT_XML,
            Direction::Import => EXT_EXML,
        }
    }

    /// Derive the output path by substituting the target extension.
    pub fn derive_output(&self, input: &Path) -> PathBuf {
        input.with_extension(self.target_extension())
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Export => write!(f, "export"),
            Direction::Import => write!(f, "import"),
        }
    }
}

/// Convert one file, delegating structural work to the codec.
pub fn convert(
    codec: &dyn ContainerCodec,
    direction: Direction,
    input: &Path,
    output: &Path,
) -> Result<(), ConvertError> {
    match direction {
        Direction::Export => export(codec, input, output),
        Direction::Import => import(codec, input, output),
    }
}

fn export(codec: &dyn ContainerCodec, input: &Path, output: &Path) -> Result<(), ConvertError> {
    let data = fs::read(input).map_err(|source| ConvertError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let doc = codec.parse_binary(&data)?;
    let text = doc.to_xml()?;
    fs::write(output, text).map_err(|source| ConvertError::Write {
        path: output.to_path_buf(),
        source,
    })
}

fn import(codec: &dyn ContainerCodec, input: &Path, output: &Path) -> Result<(), ConvertError> {
    let text = fs::read_to_string(input).map_err(|source| ConvertError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let doc = Document::from_xml(&text)?;
    let bytes = codec.render_binary(&doc)?;
    fs::write(output, bytes).map_err(|source| ConvertError::Write {
        path: output.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use xmbcodec_container::XmbCodec;
    use xmbcodec_core::Element;

    #[test]
    fn derive_output_substitutes_extension() {
        assert_eq!(
            Direction::Export.derive_output(Path::new("/data/scene.exml")),
            PathBuf::from("/data/scene.xml")
        );
        assert_eq!(
            Direction::Import.derive_output(Path::new("nested/dir/a.xml")),
            PathBuf::from("nested/dir/a.exml")
        );
    }

    #[test]
    fn directions_are_inverse_on_extensions() {
        for dir in [Direction::Export, Direction::Import] {
            assert_ne!(dir.source_extension(), dir.target_extension());
        }
        assert_eq!(
            Direction::Export.source_extension(),
            Direction::Import.target_extension()
        );
    }

    #[test]
    fn export_then_import_is_byte_identical() {
        let codec = XmbCodec::new();
        let doc = xmbcodec_core::Document::new(
            Element::new("package")
                .attr("name", "test")
                .child(Element::new("entity").attr("type", "LightEntity")),
        );
        let original = codec.render_binary(&doc).unwrap();

        let tmp = tempfile::tempdir().unwrap();
        let exml = tmp.path().join("scene.exml");
        let xml = tmp.path().join("scene.xml");
        let back = tmp.path().join("back.exml");
        fs::write(&exml, &original).unwrap();

        convert(&codec, Direction::Export, &exml, &xml).unwrap();
        convert(&codec, Direction::Import, &xml, &back).unwrap();

        assert_eq!(fs::read(&back).unwrap(), original);
    }

    #[test]
    fn export_of_corrupt_container_reports_codec_error() {
        let codec = XmbCodec::new();
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("bad.exml");
        let output = tmp.path().join("bad.xml");
        fs::write(&input, b"not a container").unwrap();

        let err = convert(&codec, Direction::Export, &input, &output).unwrap_err();
        assert!(matches!(err, ConvertError::Codec(_)));
        assert!(!output.exists());
    }

    #[test]
    fn missing_input_reports_read_error_with_path() {
        let codec = XmbCodec::new();
        let err = convert(
            &codec,
            Direction::Export,
            Path::new("/nonexistent/scene.exml"),
            Path::new("/nonexistent/scene.xml"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("scene.exml"));
    }
}
