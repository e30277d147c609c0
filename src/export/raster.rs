//! Rasterize vector text into PNG or JPG
//!
//! Decoding runs on a worker thread so the wait for it can be bounded. The
//! encode step only runs once the worker hands back a finished canvas.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, RgbaImage};
use resvg::tiny_skia::{self, Pixmap};
use resvg::usvg::{Options, Tree};
use tracing::{debug, info};

use crate::error::ExportError;
use crate::host::Host;

use super::{download_filename, Artifact, ExportFormat, SizePreset};

/// Raster output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterFormat {
    Png,
    Jpg,
}

impl RasterFormat {
    pub fn export_format(self) -> ExportFormat {
        match self {
            RasterFormat::Png => ExportFormat::Png,
            RasterFormat::Jpg => ExportFormat::Jpg,
        }
    }

    /// JPG has no alpha channel, so its canvas starts opaque white
    fn opaque(self) -> bool {
        matches!(self, RasterFormat::Jpg)
    }
}

/// Knobs for the raster step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterOptions {
    /// JPG quality, 1-100
    pub jpeg_quality: u8,
    /// Longest time to wait for the vector source to decode
    pub decode_timeout: Duration,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: 90,
            decode_timeout: Duration::from_secs(5),
        }
    }
}

/// Decode `vector_text` and draw it onto a `pixels x pixels` canvas
///
/// The graphic is stretched to fill the canvas exactly.
pub fn rasterize(vector_text: &str, pixels: u32, opaque: bool) -> Result<RgbaImage, ExportError> {
    let tree = Tree::from_str(vector_text, &Options::default()).map_err(ExportError::decode)?;

    let mut pixmap = Pixmap::new(pixels, pixels).ok_or(ExportError::Canvas { pixels })?;
    if opaque {
        pixmap.fill(tiny_skia::Color::WHITE);
    }

    let size = tree.size();
    let transform = tiny_skia::Transform::from_scale(
        pixels as f32 / size.width(),
        pixels as f32 / size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    // tiny-skia stores premultiplied alpha
    let data = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    RgbaImage::from_raw(pixels, pixels, data).ok_or(ExportError::Canvas { pixels })
}

/// Run [`rasterize`] on a worker thread, waiting at most `timeout`
pub fn rasterize_with_timeout(
    vector_text: &str,
    pixels: u32,
    opaque: bool,
    timeout: Duration,
) -> Result<RgbaImage, ExportError> {
    let source = vector_text.to_string();
    run_bounded(timeout, move || rasterize(&source, pixels, opaque))
}

fn run_bounded<T, F>(timeout: Duration, job: F) -> Result<T, ExportError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ExportError> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("qr-decode".to_string())
        .spawn(move || {
            // Receiver may have given up already
            let _ = tx.send(job());
        })
        .map_err(ExportError::decode)?;

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => Err(ExportError::DecodeTimeout { waited: timeout }),
        Err(RecvTimeoutError::Disconnected) => {
            Err(ExportError::decode("decoder stopped before finishing"))
        }
    }
}

/// Encode a canvas to the target format
pub fn encode(
    canvas: RgbaImage,
    format: RasterFormat,
    jpeg_quality: u8,
) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    match format {
        RasterFormat::Png => {
            canvas.write_with_encoder(PngEncoder::new(&mut bytes))?;
        }
        RasterFormat::Jpg => {
            let rgb = DynamicImage::ImageRgba8(canvas).to_rgb8();
            let quality = jpeg_quality.clamp(1, 100);
            rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut bytes, quality))?;
        }
    }
    Ok(bytes)
}

/// Rasterize, encode and hand the result to the host
pub fn export_raster(
    vector_text: &str,
    format: RasterFormat,
    pixels: u32,
    basename: &str,
    preset: SizePreset,
    options: &RasterOptions,
    host: &mut dyn Host,
) -> Result<Artifact, ExportError> {
    debug!(?format, pixels, "rasterizing");
    let canvas =
        rasterize_with_timeout(vector_text, pixels, format.opaque(), options.decode_timeout)?;
    let bytes = encode(canvas, format, options.jpeg_quality)?;

    let export_format = format.export_format();
    let artifact = Artifact::new(
        download_filename(basename, preset, export_format),
        export_format,
        bytes,
    );
    host.save(&artifact)
        .map_err(|e| ExportError::save(&artifact.filename, e))?;
    info!(filename = %artifact.filename, pixels, "exported raster image");
    Ok(artifact)
}
