//! qr-export - render QR codes and export them as PNG, JPG, SVG or print documents
//!
//! The library encodes text into a QR code, keeps the vector graphic on a
//! [`DisplaySurface`], and exports it through a [`Host`] that owns the
//! actual save and print actions.
//!
//! # Example
//!
//! ```rust
//! use qr_export::render;
//!
//! let svg = render("https://example.com").unwrap();
//! assert!(svg.contains("<svg"));
//! ```

pub mod error;
pub mod export;
pub mod host;
pub mod logging;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod surface;

pub use error::{ExportError, PrintError};
pub use export::{
    compose_print_document, resolve, sanitize, Artifact, ExportFormat, ExportParameters,
    PrintDocument, PrintOptions, RasterOptions, SizePreset,
};
pub use host::{FsHost, Host, PrintAction, PrintView};
pub use renderer::{ErrorCorrection, Palette, QrSvgConfig, RenderedGraphic};
pub use session::{Event, Outcome, QrRequest, Session};
pub use settings::Settings;
pub use surface::DisplaySurface;

/// Configuration for rendering and the export pipeline
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportConfig {
    /// SVG output configuration
    pub svg: QrSvgConfig,
    /// Module colors
    pub palette: Palette,
    /// Raster encoding options
    pub raster: RasterOptions,
    /// Print composition options
    pub print: PrintOptions,
}

impl ExportConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: QrSvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the module colors
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Set raster options
    pub fn with_raster(mut self, options: RasterOptions) -> Self {
        self.raster = options;
        self
    }

    /// Set print options
    pub fn with_print(mut self, options: PrintOptions) -> Self {
        self.print = options;
        self
    }
}

/// Render content to SVG with default configuration
///
/// # Example
///
/// ```rust
/// use qr_export::render;
///
/// let svg = render("Hello").unwrap();
/// assert!(svg.contains(r#"viewBox="0 0 21 21""#));
/// ```
pub fn render(content: &str) -> Result<String, ExportError> {
    render_with_config(content, &ExportConfig::default())
}

/// Render content to SVG with custom configuration
///
/// # Example
///
/// ```rust
/// use qr_export::{render_with_config, ExportConfig, Palette, QrSvgConfig};
///
/// let config = ExportConfig::new()
///     .with_svg(QrSvgConfig::default().with_quiet_zone(4))
///     .with_palette(Palette::new("#1565c0", "#ffffff"));
///
/// let svg = render_with_config("Hello", &config).unwrap();
/// assert!(svg.contains("#1565c0"));
/// ```
pub fn render_with_config(content: &str, config: &ExportConfig) -> Result<String, ExportError> {
    let graphic = RenderedGraphic::new(content, &config.svg, &config.palette)?;
    Ok(renderer::render_svg(&graphic))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_simple() {
        let svg = render("Hello").unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
        assert!(svg.contains(r#"id="qr-code""#));
    }

    #[test]
    fn test_render_empty_content_error() {
        let result = render("");
        assert!(matches!(result, Err(ExportError::EmptyContent)));
    }

    #[test]
    fn test_render_longer_content_grows_symbol() {
        let short = render("a").unwrap();
        let long = render(&"https://example.com/".repeat(10)).unwrap();
        assert!(short.contains(r#"viewBox="0 0 21 21""#));
        assert!(!long.contains(r#"viewBox="0 0 21 21""#));
    }

    #[test]
    fn test_render_with_class_prefix_removed() {
        let config = ExportConfig::new().with_svg(QrSvgConfig::default().without_class_prefix());
        let svg = render_with_config("Hello", &config).unwrap();
        assert!(svg.contains(r#"class="modules""#));
        assert!(!svg.contains("qr-modules"));
    }
}
