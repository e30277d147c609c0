//! View state for one interactive session
//!
//! A session is the record a front end keeps between user events: the text
//! being typed, the last generated request, the selected export parameters
//! and whether the download menu is open. Events go through
//! [`Session::handle`], which is the only place state changes.

use tracing::debug;

use crate::error::ExportError;
use crate::export::{self, Artifact, ExportFormat, ExportParameters, PrintDocument, SizePreset};
use crate::host::Host;
use crate::renderer::RenderedGraphic;
use crate::surface::DisplaySurface;
use crate::ExportConfig;

/// Content and optional label submitted by a generate action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrRequest {
    pub content: String,
    pub label: Option<String>,
}

impl QrRequest {
    /// Label if it has any visible characters
    pub fn display_name(&self) -> Option<&str> {
        self.label.as_deref().filter(|l| !l.trim().is_empty())
    }
}

/// A discrete user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    EditContent(String),
    EditLabel(String),
    Generate,
    ToggleDownloadMenu,
    SelectFormat(ExportFormat),
    SelectSize(SizePreset),
    SetCustomPixels(u32),
    Download,
    Print,
}

/// What handling an event produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// State changed, nothing else to report
    Updated,
    /// The event is not available in the current state
    Ignored,
    Generated,
    Downloaded(Artifact),
    Printed(PrintDocument),
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    draft_content: String,
    draft_label: String,
    request: Option<QrRequest>,
    params: ExportParameters,
    download_menu_open: bool,
    surface: DisplaySurface,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with preselected export parameters
    pub fn with_parameters(params: ExportParameters) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    /// Generate is only offered for non-blank content
    pub fn can_generate(&self) -> bool {
        !self.draft_content.trim().is_empty()
    }

    /// Download and print are only offered once something is generated
    pub fn can_export(&self) -> bool {
        self.request.is_some()
    }

    pub fn request(&self) -> Option<&QrRequest> {
        self.request.as_ref()
    }

    pub fn parameters(&self) -> &ExportParameters {
        &self.params
    }

    pub fn download_menu_open(&self) -> bool {
        self.download_menu_open
    }

    pub fn surface(&self) -> &DisplaySurface {
        &self.surface
    }

    /// Line shown under the rendered code
    pub fn caption(&self) -> Option<String> {
        self.request
            .as_ref()
            .map(|r| format!("QR Code generated for: {}", r.content))
    }

    pub fn handle(
        &mut self,
        event: Event,
        config: &ExportConfig,
        host: &mut dyn Host,
    ) -> Result<Outcome, ExportError> {
        debug!(?event, "session event");
        match event {
            Event::EditContent(text) => {
                self.draft_content = text;
                Ok(Outcome::Updated)
            }
            Event::EditLabel(text) => {
                self.draft_label = text;
                Ok(Outcome::Updated)
            }
            Event::Generate => self.generate(config),
            Event::ToggleDownloadMenu => {
                if !self.can_export() {
                    return Ok(Outcome::Ignored);
                }
                self.download_menu_open = !self.download_menu_open;
                Ok(Outcome::Updated)
            }
            Event::SelectFormat(format) => {
                self.params.format = format;
                Ok(Outcome::Updated)
            }
            Event::SelectSize(size) => {
                self.params.size = size;
                Ok(Outcome::Updated)
            }
            Event::SetCustomPixels(pixels) => {
                self.params.set_custom_pixels(pixels);
                Ok(Outcome::Updated)
            }
            Event::Download => {
                self.download_menu_open = false;
                let label = self.request.as_ref().and_then(|r| r.label.as_deref());
                let artifact = export::export(&self.surface, &self.params, label, config, host)?;
                Ok(Outcome::Downloaded(artifact))
            }
            Event::Print => {
                let name = self.request.as_ref().and_then(QrRequest::display_name);
                let document = export::print(&self.surface, name, config, host)?;
                Ok(Outcome::Printed(document))
            }
        }
    }

    fn generate(&mut self, config: &ExportConfig) -> Result<Outcome, ExportError> {
        if !self.can_generate() {
            return Ok(Outcome::Ignored);
        }
        let graphic = RenderedGraphic::new(&self.draft_content, &config.svg, &config.palette)?;
        let label = Some(self.draft_label.clone()).filter(|l| !l.trim().is_empty());
        self.request = Some(QrRequest {
            content: self.draft_content.clone(),
            label,
        });
        self.surface.show(graphic);
        self.download_menu_open = false;
        Ok(Outcome::Generated)
    }
}
