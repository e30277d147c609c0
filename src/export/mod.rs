//! Export pipeline
//!
//! Format and size resolution, file naming, and the three outputs: raster
//! image, SVG file, or print document.

pub mod artifact;
pub mod filename;
pub mod print;
pub mod raster;
pub mod size;
pub mod vector;

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use tracing::{debug, info_span};

use crate::error::ExportError;
use crate::host::Host;
use crate::surface::DisplaySurface;
use crate::ExportConfig;

pub use artifact::Artifact;
pub use filename::{download_filename, sanitize, DEFAULT_BASENAME};
pub use print::{compose_print_document, print_graphic, PrintDocument, PrintOptions};
pub use raster::{export_raster, RasterFormat, RasterOptions};
pub use size::{resolve, SizePreset};
pub use vector::export_vector;

/// File format selected for a download
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    #[serde(alias = "jpeg")]
    Jpg,
    Svg,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpg => "jpg",
            ExportFormat::Svg => "svg",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpg => "image/jpeg",
            ExportFormat::Svg => "image/svg+xml",
        }
    }

    /// The raster format, or `None` for SVG
    pub fn raster(self) -> Option<RasterFormat> {
        match self {
            ExportFormat::Png => Some(RasterFormat::Png),
            ExportFormat::Jpg => Some(RasterFormat::Jpg),
            ExportFormat::Svg => None,
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "jpg" | "jpeg" => Ok(ExportFormat::Jpg),
            "svg" => Ok(ExportFormat::Svg),
            other => Err(format!("unknown format '{}' (expected png, jpg or svg)", other)),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// User-selected format and size for the next download
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportParameters {
    pub format: ExportFormat,
    pub size: SizePreset,
    custom_pixels: u32,
}

impl Default for ExportParameters {
    fn default() -> Self {
        Self {
            format: ExportFormat::Png,
            size: SizePreset::Medium,
            custom_pixels: 256,
        }
    }
}

impl ExportParameters {
    pub fn new(format: ExportFormat, size: SizePreset) -> Self {
        Self {
            format,
            size,
            ..Self::default()
        }
    }

    /// Set the custom size, clamped to the supported range
    pub fn with_custom_pixels(mut self, pixels: u32) -> Self {
        self.set_custom_pixels(pixels);
        self
    }

    pub fn set_custom_pixels(&mut self, pixels: u32) {
        self.custom_pixels = size::clamp_custom(pixels);
    }

    pub fn custom_pixels(&self) -> u32 {
        self.custom_pixels
    }

    /// Target pixel dimension for these parameters
    pub fn pixels(&self) -> u32 {
        resolve(self.size, self.custom_pixels)
    }
}

/// Export whatever is on the surface and hand it to the host
pub fn export(
    surface: &DisplaySurface,
    params: &ExportParameters,
    label: Option<&str>,
    config: &ExportConfig,
    host: &mut dyn Host,
) -> Result<Artifact, ExportError> {
    let _span = info_span!("export", format = %params.format, size = %params.size).entered();

    let pixels = params.pixels();
    let basename = sanitize(label.unwrap_or_default());
    debug!(pixels, basename, "resolved export parameters");

    let vector_text = surface.extract()?;
    match params.format.raster() {
        Some(format) => export_raster(
            &vector_text,
            format,
            pixels,
            &basename,
            params.size,
            &config.raster,
            host,
        ),
        None => export_vector(&vector_text, &basename, params.size, host),
    }
}

/// Print whatever is on the surface through the host
pub fn print(
    surface: &DisplaySurface,
    label: Option<&str>,
    config: &ExportConfig,
    host: &mut dyn Host,
) -> Result<PrintDocument, ExportError> {
    let _span = info_span!("print").entered();

    let graphic = surface.graphic().ok_or(ExportError::NotFound)?;
    let vector_text = surface.extract()?;
    print_graphic(&vector_text, graphic.content(), label, &config.print, host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!("PNG".parse::<ExportFormat>(), Ok(ExportFormat::Png));
        assert_eq!("jpeg".parse::<ExportFormat>(), Ok(ExportFormat::Jpg));
        assert_eq!("svg".parse::<ExportFormat>(), Ok(ExportFormat::Svg));
        assert!("gif".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_parameters_clamp_custom() {
        let params = ExportParameters::new(ExportFormat::Png, SizePreset::Custom)
            .with_custom_pixels(10_000);
        assert_eq!(params.custom_pixels(), 2048);
        assert_eq!(params.pixels(), 2048);

        let mut params = params;
        params.set_custom_pixels(1);
        assert_eq!(params.pixels(), 50);
    }

    #[test]
    fn test_parameters_preset_ignores_custom() {
        let params = ExportParameters::new(ExportFormat::Jpg, SizePreset::Small)
            .with_custom_pixels(900);
        assert_eq!(params.pixels(), 128);
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(ExportFormat::Png.mime(), "image/png");
        assert_eq!(ExportFormat::Jpg.mime(), "image/jpeg");
        assert_eq!(ExportFormat::Svg.mime(), "image/svg+xml");
    }
}
