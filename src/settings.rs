//! Settings file support
//!
//! Colors, rendering options and export defaults can be kept in a TOML file
//! so repeated exports share a look and naming scheme. Every key is optional.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::export::{ExportFormat, ExportParameters, PrintOptions, RasterOptions, SizePreset};
use crate::host::PrintAction;
use crate::renderer::{ErrorCorrection, Palette, QrSvgConfig};
use crate::ExportConfig;

/// Errors that can occur when loading or parsing settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse settings TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Loaded settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Optional name for the settings profile
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    pub palette: Palette,
    pub qr: QrSvgConfig,
    /// Format, size and custom size preselected for downloads
    pub parameters: ExportParameters,
    pub raster: RasterOptions,
    pub print: PrintOptions,
    /// Directory downloads are saved to
    pub output_dir: Option<PathBuf>,
    /// What happens to a print document once it is written
    pub print_action: PrintAction,
}

/// TOML structure for deserializing settings
#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct TomlSettings {
    metadata: Option<TomlMetadata>,
    colors: TomlColors,
    qr: TomlQr,
    export: TomlExport,
    print: TomlPrint,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TomlColors {
    dark: String,
    light: String,
}

impl Default for TomlColors {
    fn default() -> Self {
        let palette = Palette::default();
        Self {
            dark: palette.dark,
            light: palette.light,
        }
    }
}

#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TomlQr {
    size: u32,
    quiet_zone: u32,
    level: ErrorCorrection,
}

impl Default for TomlQr {
    fn default() -> Self {
        let qr = QrSvgConfig::default();
        Self {
            size: qr.size,
            quiet_zone: qr.quiet_zone,
            level: qr.level,
        }
    }
}

#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TomlExport {
    format: ExportFormat,
    size: SizePreset,
    custom_pixels: u32,
    jpeg_quality: u8,
    decode_timeout_ms: u64,
    output_dir: Option<PathBuf>,
}

impl Default for TomlExport {
    fn default() -> Self {
        let params = ExportParameters::default();
        let raster = RasterOptions::default();
        Self {
            format: params.format,
            size: params.size,
            custom_pixels: params.custom_pixels(),
            jpeg_quality: raster.jpeg_quality,
            decode_timeout_ms: raster.decode_timeout.as_millis() as u64,
            output_dir: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TomlPrint {
    ready_timeout_ms: u64,
    auto_print: bool,
    open: bool,
    command: Option<String>,
}

impl Default for TomlPrint {
    fn default() -> Self {
        let print = PrintOptions::default();
        Self {
            ready_timeout_ms: print.ready_timeout.as_millis() as u64,
            auto_print: print.auto_print,
            open: true,
            command: None,
        }
    }
}

impl From<TomlSettings> for Settings {
    fn from(parsed: TomlSettings) -> Self {
        Settings {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            palette: Palette::new(parsed.colors.dark, parsed.colors.light),
            qr: QrSvgConfig::default()
                .with_size(parsed.qr.size)
                .with_quiet_zone(parsed.qr.quiet_zone)
                .with_level(parsed.qr.level),
            parameters: ExportParameters::new(parsed.export.format, parsed.export.size)
                .with_custom_pixels(parsed.export.custom_pixels),
            raster: RasterOptions {
                jpeg_quality: parsed.export.jpeg_quality.clamp(1, 100),
                decode_timeout: Duration::from_millis(parsed.export.decode_timeout_ms),
            },
            print: PrintOptions {
                ready_timeout: Duration::from_millis(parsed.print.ready_timeout_ms),
                auto_print: parsed.print.auto_print,
            },
            output_dir: parsed.export.output_dir,
            print_action: match parsed.print.command.filter(|c| !c.trim().is_empty()) {
                Some(command) => PrintAction::Command(command),
                None if parsed.print.open => PrintAction::Open,
                None => PrintAction::WriteOnly,
            },
        }
    }
}

/// Annotated defaults, printed by `qr-export --default-config`
pub const DEFAULT_SETTINGS: &str = r##"
[colors]
# Dark modules and background; use "transparent" to drop the background
dark = "#000000"
light = "#ffffff"

[qr]
size = 256          # on-screen size of the SVG in pixels
quiet_zone = 0      # light border in modules
level = "L"         # L, M, Q or H

[export]
format = "png"      # png, jpg or svg
size = "medium"     # small, medium, large, print-a4, custom
custom_pixels = 256 # clamped to 50..=2048
jpeg_quality = 90
decode_timeout_ms = 5000

[print]
ready_timeout_ms = 2000
auto_print = true
open = true         # open the document in the default viewer
# command = "lp"    # or pass its path to a command instead
"##;

impl Settings {
    /// Load settings from TOML file
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load settings from TOML string
    pub fn from_str(content: &str) -> Result<Self, SettingsError> {
        let parsed: TomlSettings = toml::from_str(content)?;
        Ok(parsed.into())
    }

    /// Pipeline configuration described by these settings
    pub fn export_config(&self) -> ExportConfig {
        ExportConfig::new()
            .with_svg(self.qr.clone())
            .with_palette(self.palette.clone())
            .with_raster(self.raster)
            .with_print(self.print)
    }
}

impl Default for Settings {
    fn default() -> Self {
        TomlSettings::default().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_settings_match_annotated_file() {
        let parsed = Settings::from_str(DEFAULT_SETTINGS).expect("Should parse");
        assert_eq!(parsed, Settings::default());
    }

    #[test]
    fn test_empty_file_is_default() {
        let parsed = Settings::from_str("").expect("Should parse");
        assert_eq!(parsed, Settings::default());
    }

    #[test]
    fn test_parse_toml_with_metadata() {
        let toml_str = r##"
[metadata]
name = "Print shop"
description = "High contrast labels"

[colors]
dark = "#112233"

[qr]
quiet_zone = 4
level = "high"

[export]
format = "jpeg"
size = "Print A4"
jpeg_quality = 75
output_dir = "out"

[print]
command = "lp"
"##;
        let settings = Settings::from_str(toml_str).expect("Should parse");
        assert_eq!(settings.name, Some("Print shop".to_string()));
        assert_eq!(settings.description, Some("High contrast labels".to_string()));
        assert_eq!(settings.palette, Palette::new("#112233", "#ffffff"));
        assert_eq!(settings.qr.quiet_zone, 4);
        assert_eq!(settings.qr.level, ErrorCorrection::H);
        assert_eq!(settings.parameters.format, ExportFormat::Jpg);
        assert_eq!(settings.parameters.size, SizePreset::PrintA4);
        assert_eq!(settings.raster.jpeg_quality, 75);
        assert_eq!(settings.output_dir, Some(PathBuf::from("out")));
        assert_eq!(settings.print_action, PrintAction::Command("lp".to_string()));
    }

    #[test]
    fn test_custom_pixels_clamped_and_unknown_size_is_medium() {
        let settings = Settings::from_str(
            r#"
[export]
size = "enormous"
custom_pixels = 9000
"#,
        )
        .expect("Should parse");
        assert_eq!(settings.parameters.size, SizePreset::Medium);
        assert_eq!(settings.parameters.custom_pixels(), 2048);
    }

    #[test]
    fn test_export_config_carries_settings() {
        let settings =
            Settings::from_str("[colors]\nlight = \"transparent\"").expect("Should parse");
        let config = settings.export_config();
        assert!(!config.palette.has_background());
        assert_eq!(config.raster.jpeg_quality, 90);
    }

    #[test]
    fn test_print_action_from_settings() {
        assert_eq!(Settings::default().print_action, PrintAction::Open);

        let settings = Settings::from_str("[print]\nopen = false").expect("Should parse");
        assert_eq!(settings.print_action, PrintAction::WriteOnly);

        let blank = "[print]\nopen = false\ncommand = \"  \"";
        let settings = Settings::from_str(blank).expect("Should parse");
        assert_eq!(settings.print_action, PrintAction::WriteOnly);

        let lp = "[print]\nopen = false\ncommand = \"lp -d office\"";
        let settings = Settings::from_str(lp).expect("Should parse");
        assert_eq!(
            settings.print_action,
            PrintAction::Command("lp -d office".to_string())
        );
    }

    #[test]
    fn test_invalid_toml_error() {
        let invalid = "this is not valid toml {{{{";
        let result = Settings::from_str(invalid);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = Settings::from_str("[export]\nformatt = \"png\"");
        assert!(matches!(result, Err(SettingsError::ParseError(_))));
    }
}
