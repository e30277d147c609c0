//! SVG generation from an encoded QR matrix

use qrcode::{Color, QrCode};
use tracing::debug;

use crate::error::ExportError;

use super::{ErrorCorrection, Palette, QrSvgConfig};

/// Square grid of modules produced by the encoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    width: usize,
    dark: Vec<bool>,
}

impl QrMatrix {
    /// Build a matrix from row-major module values
    ///
    /// Returns `None` when `dark.len()` is not `width * width`.
    pub fn from_modules(width: usize, dark: Vec<bool>) -> Option<Self> {
        (dark.len() == width * width).then_some(Self { width, dark })
    }

    /// Number of modules along one side (without quiet zone)
    pub fn width(&self) -> usize {
        self.width
    }

    /// Whether the module at column `x`, row `y` is dark
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.width && self.dark[y * self.width + x]
    }

    /// Horizontal runs of dark modules as `(x, y, len)`
    pub fn dark_runs(&self) -> Vec<(usize, usize, usize)> {
        let mut runs = vec![];
        for y in 0..self.width {
            let mut x = 0;
            while x < self.width {
                if self.is_dark(x, y) {
                    let start = x;
                    while x < self.width && self.is_dark(x, y) {
                        x += 1;
                    }
                    runs.push((start, y, x - start));
                } else {
                    x += 1;
                }
            }
        }
        runs
    }
}

/// Encode `content` into a module matrix
pub fn encode(content: &str, level: ErrorCorrection) -> Result<QrMatrix, ExportError> {
    if content.trim().is_empty() {
        return Err(ExportError::EmptyContent);
    }
    let code = QrCode::with_error_correction_level(content.as_bytes(), level.to_ec_level())?;
    let width = code.width();
    let dark = code
        .to_colors()
        .into_iter()
        .map(|c| c == Color::Dark)
        .collect();
    debug!(width, ?level, "encoded QR content");
    Ok(QrMatrix { width, dark })
}

/// The on-screen vector graphic for one QR request
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedGraphic {
    content: String,
    matrix: QrMatrix,
    config: QrSvgConfig,
    palette: Palette,
}

impl RenderedGraphic {
    /// Encode `content` and keep everything needed to serialize it later
    pub fn new(
        content: &str,
        config: &QrSvgConfig,
        palette: &Palette,
    ) -> Result<Self, ExportError> {
        let matrix = encode(content, config.level)?;
        Ok(Self {
            content: content.to_string(),
            matrix,
            config: config.clone(),
            palette: palette.clone(),
        })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn matrix(&self) -> &QrMatrix {
        &self.matrix
    }

    /// Side length of the viewBox in modules, including the quiet zone
    pub fn view_modules(&self) -> usize {
        self.matrix.width() + 2 * self.config.quiet_zone as usize
    }
}

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: QrSvgConfig,
    elements: Vec<String>,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: QrSvgConfig) -> Self {
        Self {
            config,
            elements: vec![],
        }
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> &str {
        if self.config.pretty_print {
            "  "
        } else {
            ""
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add the background rectangle covering the whole viewBox
    pub fn add_background(&mut self, modules: usize, fill: &str) {
        let prefix = self.prefix();
        self.elements.push(format!(
            r#"{}<rect class="{}background" x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            self.indent_str(),
            prefix,
            modules,
            modules,
            escape_xml(fill)
        ));
    }

    /// Add one path covering all dark modules, offset by `origin`
    pub fn add_modules(&mut self, runs: &[(usize, usize, usize)], origin: usize, fill: &str) {
        if runs.is_empty() {
            return;
        }
        let prefix = self.prefix();
        let d = runs_to_d(runs, origin);
        self.elements.push(format!(
            r#"{}<path class="{}modules" d="{}" fill="{}"/>"#,
            self.indent_str(),
            prefix,
            d,
            escape_xml(fill)
        ));
    }

    /// Build the final SVG string
    pub fn build(self, modules: usize) -> String {
        let nl = self.newline();
        let prefix = self.prefix();

        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" id="qr-code" class="{}code" width="{}" height="{}" viewBox="0 0 {} {}" shape-rendering="crispEdges">"#,
            prefix, self.config.size, self.config.size, modules, modules
        );
        svg.push_str(nl);

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");
        svg
    }
}

/// Serialize a rendered graphic to SVG text
pub fn render_svg(graphic: &RenderedGraphic) -> String {
    let modules = graphic.view_modules();
    let mut builder = SvgBuilder::new(graphic.config.clone());

    if graphic.palette.has_background() {
        builder.add_background(modules, &graphic.palette.light);
    }
    builder.add_modules(
        &graphic.matrix.dark_runs(),
        graphic.config.quiet_zone as usize,
        &graphic.palette.dark,
    );

    builder.build(modules)
}

/// Convert module runs to an SVG path d attribute
fn runs_to_d(runs: &[(usize, usize, usize)], origin: usize) -> String {
    runs.iter()
        .map(|(x, y, len)| format!("M{} {}h{}v1h-{}z", x + origin, y + origin, len, len))
        .collect::<Vec<_>>()
        .join("")
}

/// Escape special XML characters
pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
