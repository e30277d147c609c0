//! Display surface holding the currently rendered QR code

use crate::error::ExportError;
use crate::renderer::{render_svg, RenderedGraphic};

/// Where the rendered graphic lives between generation and export
#[derive(Debug, Clone, Default)]
pub struct DisplaySurface {
    graphic: Option<RenderedGraphic>,
}

impl DisplaySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is shown with `graphic`
    pub fn show(&mut self, graphic: RenderedGraphic) {
        self.graphic = Some(graphic);
    }

    pub fn clear(&mut self) {
        self.graphic = None;
    }

    pub fn graphic(&self) -> Option<&RenderedGraphic> {
        self.graphic.as_ref()
    }

    /// Serialize the current graphic to SVG text
    ///
    /// Serialized fresh on every call; fails with [`ExportError::NotFound`]
    /// when nothing has been rendered.
    pub fn extract(&self) -> Result<String, ExportError> {
        self.graphic
            .as_ref()
            .map(render_svg)
            .ok_or(ExportError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{Palette, QrSvgConfig};

    #[test]
    fn test_extract_empty_surface() {
        let surface = DisplaySurface::new();
        assert!(matches!(surface.extract(), Err(ExportError::NotFound)));
    }

    #[test]
    fn test_extract_follows_latest_graphic() {
        let config = QrSvgConfig::default();
        let palette = Palette::default();
        let mut surface = DisplaySurface::new();

        surface.show(RenderedGraphic::new("first", &config, &palette).unwrap());
        let first = surface.extract().unwrap();
        let longer = "a much longer second payload for a bigger symbol";
        surface.show(RenderedGraphic::new(longer, &config, &palette).unwrap());
        let second = surface.extract().unwrap();
        assert_ne!(first, second);

        surface.clear();
        assert!(surface.extract().is_err());
    }
}
