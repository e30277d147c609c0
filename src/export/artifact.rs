//! Downloadable export products

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::ExportFormat;

/// A file ready to be handed to the host's save action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub filename: String,
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub fn new(filename: impl Into<String>, format: ExportFormat, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            format,
            bytes,
        }
    }

    /// MIME type of the artifact
    pub fn mime(&self) -> &'static str {
        self.format.mime()
    }

    /// Encode as a `data:` URI, the form a browser download link carries
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime(), STANDARD.encode(&self.bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri() {
        let artifact = Artifact::new("a-small.svg", ExportFormat::Svg, b"<svg/>".to_vec());
        assert_eq!(artifact.mime(), "image/svg+xml");
        assert_eq!(artifact.data_uri(), "data:image/svg+xml;base64,PHN2Zy8+");
    }
}
