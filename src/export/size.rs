//! Size presets and their pixel dimensions

use std::fmt;

use serde::Deserialize;
use tracing::warn;

/// Smallest custom raster size in pixels
pub const MIN_CUSTOM_PIXELS: u32 = 50;
/// Largest custom raster size in pixels
pub const MAX_CUSTOM_PIXELS: u32 = 2048;

/// Named size option for an export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum SizePreset {
    Small,
    #[default]
    Medium,
    Large,
    PrintA4,
    Custom,
}

impl SizePreset {
    pub const ALL: [SizePreset; 5] = [
        SizePreset::Small,
        SizePreset::Medium,
        SizePreset::Large,
        SizePreset::PrintA4,
        SizePreset::Custom,
    ];

    /// Parse a preset name; unknown names fall back to `Medium`
    pub fn from_name(name: &str) -> Self {
        let normalized = name.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "small" => SizePreset::Small,
            "medium" => SizePreset::Medium,
            "large" => SizePreset::Large,
            "print-a4" | "printa4" | "a4" => SizePreset::PrintA4,
            "custom" => SizePreset::Custom,
            _ => {
                warn!(preset = name, "unknown size preset, using medium");
                SizePreset::Medium
            }
        }
    }

    /// Human-readable name as shown in a size selector
    pub fn display_name(self) -> &'static str {
        match self {
            SizePreset::Small => "Small",
            SizePreset::Medium => "Medium",
            SizePreset::Large => "Large",
            SizePreset::PrintA4 => "Print A4",
            SizePreset::Custom => "Custom",
        }
    }

    /// Display name lowercased with spaces replaced by hyphens
    pub fn slug(self) -> String {
        self.display_name().to_lowercase().replace(' ', "-")
    }

    /// Fixed pixel size, `None` for `Custom`
    pub fn fixed_pixels(self) -> Option<u32> {
        match self {
            SizePreset::Small => Some(128),
            SizePreset::Medium => Some(256),
            SizePreset::Large => Some(512),
            SizePreset::PrintA4 => Some(150),
            SizePreset::Custom => None,
        }
    }
}

impl From<String> for SizePreset {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl fmt::Display for SizePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Clamp a custom size into the supported range
pub fn clamp_custom(pixels: u32) -> u32 {
    pixels.clamp(MIN_CUSTOM_PIXELS, MAX_CUSTOM_PIXELS)
}

/// Map a preset (or a custom value) to a target pixel dimension
pub fn resolve(preset: SizePreset, custom_pixels: u32) -> u32 {
    preset
        .fixed_pixels()
        .unwrap_or_else(|| clamp_custom(custom_pixels))
}
