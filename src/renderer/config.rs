//! Configuration for QR SVG rendering

use serde::Deserialize;

/// Error correction level requested from the encoder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum ErrorCorrection {
    /// Recovers ~7% of data
    #[default]
    #[serde(alias = "l", alias = "low")]
    L,
    /// Recovers ~15% of data
    #[serde(alias = "m", alias = "medium")]
    M,
    /// Recovers ~25% of data
    #[serde(alias = "q", alias = "quartile")]
    Q,
    /// Recovers ~30% of data
    #[serde(alias = "h", alias = "high")]
    H,
}

impl ErrorCorrection {
    pub(crate) fn to_ec_level(self) -> qrcode::EcLevel {
        match self {
            ErrorCorrection::L => qrcode::EcLevel::L,
            ErrorCorrection::M => qrcode::EcLevel::M,
            ErrorCorrection::Q => qrcode::EcLevel::Q,
            ErrorCorrection::H => qrcode::EcLevel::H,
        }
    }
}

/// Configuration options for SVG output
#[derive(Debug, Clone, PartialEq)]
pub struct QrSvgConfig {
    /// Displayed width and height of the graphic in pixels
    pub size: u32,

    /// Light modules added around the symbol on every side
    pub quiet_zone: u32,

    /// Error correction level
    pub level: ErrorCorrection,

    /// Whether to format output with indentation
    pub pretty_print: bool,

    /// Prefix for CSS class names (e.g., "qr-" for "qr-modules")
    pub class_prefix: Option<String>,
}

impl Default for QrSvgConfig {
    fn default() -> Self {
        Self {
            size: 256,
            quiet_zone: 0,
            level: ErrorCorrection::L,
            pretty_print: true,
            class_prefix: Some("qr-".to_string()),
        }
    }
}

impl QrSvgConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the displayed size
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Set the quiet zone width in modules
    pub fn with_quiet_zone(mut self, modules: u32) -> Self {
        self.quiet_zone = modules;
        self
    }

    /// Set the error correction level
    pub fn with_level(mut self, level: ErrorCorrection) -> Self {
        self.level = level;
        self
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Set the CSS class prefix
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    /// Remove the CSS class prefix
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }
}

/// Colors used for dark and light modules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub dark: String,
    pub light: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            dark: "#000000".to_string(),
            light: "#ffffff".to_string(),
        }
    }
}

impl Palette {
    pub fn new(dark: impl Into<String>, light: impl Into<String>) -> Self {
        Self {
            dark: dark.into(),
            light: light.into(),
        }
    }

    /// A palette with no background, leaving light modules transparent
    pub fn transparent(dark: impl Into<String>) -> Self {
        Self::new(dark, "transparent")
    }

    /// Whether light modules are painted at all
    pub fn has_background(&self) -> bool {
        let light = self.light.trim();
        !(light.is_empty()
            || light.eq_ignore_ascii_case("transparent")
            || light.eq_ignore_ascii_case("none"))
    }
}
