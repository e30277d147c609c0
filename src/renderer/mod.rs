//! QR rendering component
//!
//! Encodes content with the `qrcode` crate and serializes the module matrix
//! to an SVG string with CSS classes for styling.

pub mod config;
pub mod svg;

pub use config::{ErrorCorrection, Palette, QrSvgConfig};
pub use svg::{encode, render_svg, QrMatrix, RenderedGraphic};
