//! SVG download without rasterization

use tracing::info;

use crate::error::ExportError;
use crate::host::Host;

use super::{download_filename, Artifact, ExportFormat, SizePreset};

/// Save `vector_text` verbatim as an `image/svg+xml` file
pub fn export_vector(
    vector_text: &str,
    basename: &str,
    preset: SizePreset,
    host: &mut dyn Host,
) -> Result<Artifact, ExportError> {
    let artifact = Artifact::new(
        download_filename(basename, preset, ExportFormat::Svg),
        ExportFormat::Svg,
        vector_text.as_bytes().to_vec(),
    );
    host.save(&artifact)
        .map_err(|e| ExportError::save(&artifact.filename, e))?;
    info!(filename = %artifact.filename, "exported vector image");
    Ok(artifact)
}
