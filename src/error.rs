//! Error types for rendering, export and print

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while rendering or exporting a QR code
#[derive(Debug, Error)]
pub enum ExportError {
    /// Generation was requested for blank content
    #[error("cannot generate a QR code for empty content")]
    EmptyContent,

    /// The encoder rejected the content (usually too long for any version)
    #[error("QR encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),

    /// Export or print was invoked with nothing rendered on the surface
    #[error("no rendered QR code to export")]
    NotFound,

    /// The vector source could not be decoded into an image
    #[error("failed to decode vector graphic: {0}")]
    Decode(String),

    /// Decoding did not finish within the configured bound
    #[error("decoding the vector graphic did not finish within {}ms", waited.as_millis())]
    DecodeTimeout { waited: Duration },

    /// A raster canvas of the requested size could not be allocated
    #[error("cannot allocate a {pixels}x{pixels} canvas")]
    Canvas { pixels: u32 },

    /// Encoding the canvas to PNG/JPG failed
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    /// The host refused to save the artifact
    #[error("failed to save '{filename}': {source}")]
    Save {
        filename: String,
        #[source]
        source: io::Error,
    },

    /// Print view failure
    #[error("print failed: {0}")]
    Print(#[from] PrintError),
}

impl ExportError {
    /// Create a decode error from any displayable cause
    pub fn decode(cause: impl std::fmt::Display) -> Self {
        Self::Decode(cause.to_string())
    }

    /// Create a save error for the given artifact filename
    pub fn save(filename: impl Into<String>, source: io::Error) -> Self {
        Self::Save {
            filename: filename.into(),
            source,
        }
    }
}

/// Errors raised by a host's print view
#[derive(Debug, Error)]
pub enum PrintError {
    /// The host could not open a print view (pop-up blocked, unwritable target)
    #[error("print view could not be opened: {reason}")]
    Blocked { reason: String },

    /// The print view did not signal readiness in time
    #[error("print view was not ready after {}ms", waited.as_millis())]
    NotReady { waited: Duration },

    /// The configured print command exited unsuccessfully
    #[error("print command '{command}' failed with {status}")]
    Command { command: String, status: String },

    /// I/O failure while writing the print document
    #[error("print I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PrintError {
    /// Create a blocked-view error
    pub fn blocked(reason: impl Into<String>) -> Self {
        Self::Blocked {
            reason: reason.into(),
        }
    }

    /// Create an I/O error tied to a print document path
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
