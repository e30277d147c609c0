//! Host capabilities for saving artifacts and printing
//!
//! The export pipeline produces bytes and markup; the host decides what
//! "download" and "print" mean. [`FsHost`] saves into a directory and hands
//! print documents to the default viewer or an external command.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::error::PrintError;
use crate::export::Artifact;

/// Save and print capabilities supplied by the embedding environment
pub trait Host {
    /// Persist an artifact, returning where it ended up
    fn save(&mut self, artifact: &Artifact) -> io::Result<PathBuf>;

    /// Open a new top-level view to hold a print document
    fn open_print_view(&mut self, title: &str) -> Result<Box<dyn PrintView>, PrintError>;
}

/// A viewing context holding one print document
pub trait PrintView {
    /// Replace the view's content with `markup`
    fn write_document(&mut self, markup: &str) -> Result<(), PrintError>;

    /// Block until the view reports that the document finished loading
    fn wait_until_loaded(&mut self, timeout: Duration) -> Result<(), PrintError>;

    /// Invoke the platform print command against this view
    fn print(&mut self) -> Result<(), PrintError>;

    /// Dispose of the view
    fn close(self: Box<Self>);
}

/// What [`FsHost`] does with a print document once it is on disk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PrintAction {
    /// Open it in the platform's default viewer, where its load handler prints
    #[default]
    Open,
    /// Run `command <document path>`
    Command(String),
    /// Leave the file for the user
    WriteOnly,
}

/// Host backed by a directory on disk
#[derive(Debug, Clone)]
pub struct FsHost {
    output_dir: PathBuf,
    print_action: PrintAction,
}

impl FsHost {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            print_action: PrintAction::default(),
        }
    }

    pub fn with_print_action(mut self, action: PrintAction) -> Self {
        self.print_action = action;
        self
    }

    /// Run `command <document path>` when a print is requested
    pub fn with_print_command(self, command: Option<String>) -> Self {
        match command {
            Some(command) => self.with_print_action(PrintAction::Command(command)),
            None => self,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn print_action(&self) -> &PrintAction {
        &self.print_action
    }

    /// Where the print document titled `title` is written
    pub fn print_path(&self, title: &str) -> PathBuf {
        let stem = crate::export::sanitize(title);
        self.output_dir.join(format!("{}-print.html", stem))
    }
}

impl Host for FsHost {
    fn save(&mut self, artifact: &Artifact) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(&artifact.filename);
        fs::write(&path, &artifact.bytes)?;
        info!(path = %path.display(), bytes = artifact.bytes.len(), "saved artifact");
        Ok(path)
    }

    fn open_print_view(&mut self, title: &str) -> Result<Box<dyn PrintView>, PrintError> {
        fs::create_dir_all(&self.output_dir)
            .map_err(|e| PrintError::blocked(format!("{}: {}", self.output_dir.display(), e)))?;
        let path = self.print_path(title);
        debug!(path = %path.display(), "opened print view");
        Ok(Box::new(FilePrintView {
            path,
            expected_len: None,
            action: self.print_action.clone(),
        }))
    }
}

/// Print view that lives in an HTML file
struct FilePrintView {
    path: PathBuf,
    expected_len: Option<u64>,
    action: PrintAction,
}

impl PrintView for FilePrintView {
    fn write_document(&mut self, markup: &str) -> Result<(), PrintError> {
        fs::write(&self.path, markup).map_err(|e| PrintError::io(&self.path, e))?;
        self.expected_len = Some(markup.len() as u64);
        Ok(())
    }

    fn wait_until_loaded(&mut self, timeout: Duration) -> Result<(), PrintError> {
        let deadline = Instant::now() + timeout;
        loop {
            // Loaded once the whole document is visible on disk
            let on_disk = fs::metadata(&self.path).map(|m| m.len()).ok();
            if self.expected_len.is_some() && on_disk == self.expected_len {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(PrintError::NotReady { waited: timeout });
            }
            thread::sleep(Duration::from_millis(10));
        }
    }

    fn print(&mut self) -> Result<(), PrintError> {
        match &self.action {
            PrintAction::Open => {
                open::that(&self.path).map_err(|e| PrintError::io(&self.path, e))?;
                info!(path = %self.path.display(), "opened print document");
                Ok(())
            }
            PrintAction::Command(command) => run_print_command(command, &self.path),
            PrintAction::WriteOnly => {
                info!(path = %self.path.display(), "print document written, not opened");
                Ok(())
            }
        }
    }

    fn close(self: Box<Self>) {
        debug!(path = %self.path.display(), "closed print view");
    }
}

// "lp -d office" style commands: program, then fixed arguments
fn run_print_command(command: &str, path: &Path) -> Result<(), PrintError> {
    let mut parts = command.split_whitespace();
    let program = parts.next().unwrap_or_default();
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| PrintError::io(path, e))?;
    if !status.success() {
        return Err(PrintError::Command {
            command: command.to_string(),
            status: status.to_string(),
        });
    }
    info!(command, path = %path.display(), "sent document to printer");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportFormat;

    use tempfile::TempDir;

    #[test]
    fn test_save_writes_file() {
        let dir = TempDir::new().unwrap();
        let mut host = FsHost::new(dir.path());
        let artifact = Artifact::new("x-small.svg", ExportFormat::Svg, b"<svg/>".to_vec());
        let path = host.save(&artifact).unwrap();
        assert_eq!(path, host.output_dir().join("x-small.svg"));
        assert_eq!(fs::read(&path).unwrap(), b"<svg/>");
    }

    #[test]
    fn test_print_view_ready_after_write() {
        let dir = TempDir::new().unwrap();
        let mut host = FsHost::new(dir.path()).with_print_action(PrintAction::WriteOnly);
        let mut view = host.open_print_view("QR Code").unwrap();
        view.write_document("<html></html>").unwrap();
        view.wait_until_loaded(Duration::from_millis(500)).unwrap();
        view.print().unwrap();
        view.close();
        let path = host.print_path("QR Code");
        assert_eq!(path, dir.path().join("qr-code-print.html"));
        assert_eq!(fs::read_to_string(path).unwrap(), "<html></html>");
    }

    #[test]
    fn test_print_view_not_ready_without_document() {
        let dir = TempDir::new().unwrap();
        let mut host = FsHost::new(dir.path());
        let mut view = host.open_print_view("QR Code").unwrap();
        let err = view.wait_until_loaded(Duration::from_millis(20)).unwrap_err();
        assert!(matches!(err, PrintError::NotReady { .. }));
    }

    #[test]
    fn test_default_action_opens_viewer() {
        let host = FsHost::new("out");
        assert_eq!(host.print_action(), &PrintAction::Open);
        let host = host.with_print_command(None);
        assert_eq!(host.print_action(), &PrintAction::Open);
        let host = host.with_print_command(Some("lp -d office".to_string()));
        assert_eq!(
            host.print_action(),
            &PrintAction::Command("lp -d office".to_string())
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_print_command_status_is_checked() {
        let dir = TempDir::new().unwrap();
        for (command, succeeds) in [("true", true), ("false", false)] {
            let mut host = FsHost::new(dir.path()).with_print_command(Some(command.to_string()));
            let mut view = host.open_print_view("Lobby").unwrap();
            view.write_document("<html>lobby</html>").unwrap();
            let result = view.print();
            view.close();
            if succeeds {
                result.unwrap();
            } else {
                assert!(matches!(result, Err(PrintError::Command { .. })));
            }
        }
    }
}
