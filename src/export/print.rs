//! Printable HTML document for a QR code

use std::time::Duration;

use tracing::info;

use crate::error::ExportError;
use crate::host::Host;
use crate::renderer::svg::escape_xml;

/// Title used when no display name was supplied
pub const DEFAULT_TITLE: &str = "QR Code";

/// Prints once the document has loaded, closes once printing is done
const AUTO_PRINT_SCRIPT: &str = r#"    <script>
      window.addEventListener('load', function () { window.focus(); window.print(); });
      window.addEventListener('afterprint', function () { window.close(); });
    </script>
"#;

/// Options for composing and printing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintOptions {
    /// Longest time to wait for the print view to report it has loaded
    pub ready_timeout: Duration,
    /// Embed a script that prints on load
    pub auto_print: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            ready_timeout: Duration::from_secs(2),
            auto_print: true,
        }
    }
}

/// A standalone print-ready document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintDocument {
    pub title: String,
    pub content: String,
    pub markup: String,
}

impl PrintDocument {
    /// Caption shown under the graphic
    pub fn caption(&self) -> String {
        format!("Content: {}", self.content)
    }
}

/// Build the print document embedding `vector_text` inline
pub fn compose_print_document(
    vector_text: &str,
    content: &str,
    display_name: Option<&str>,
    auto_print: bool,
) -> PrintDocument {
    let title = display_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_TITLE)
        .to_string();
    let script = if auto_print { AUTO_PRINT_SCRIPT } else { "" };

    let markup = format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>{title}</title>
    <style>
      body {{
        margin: 0;
        padding: 20px;
        font-family: Arial, sans-serif;
        text-align: center;
      }}
      .qr-container {{
        display: inline-block;
        padding: 20px;
        border: 1px solid #ccc;
        margin: 20px 0;
      }}
      .qr-container svg {{
        width: 200px !important;
        height: 200px !important;
        max-width: 200px !important;
        max-height: 200px !important;
      }}
      .qr-info {{
        margin-top: 15px;
        font-size: 14px;
        color: #666;
        word-break: break-all;
      }}
      @media print {{
        body {{ margin: 0; }}
        .qr-container {{ border: none; }}
        .qr-container svg {{
          width: 150px !important;
          height: 150px !important;
          max-width: 150px !important;
          max-height: 150px !important;
        }}
      }}
    </style>
{script}  </head>
  <body>
    <h1>{title}</h1>
    <div class="qr-container">
      {svg}
      <div class="qr-info">
        <strong>Content:</strong> {content}
      </div>
    </div>
  </body>
</html>
"#,
        title = escape_xml(&title),
        script = script,
        svg = vector_text,
        content = escape_xml(content),
    );

    PrintDocument {
        title,
        content: content.to_string(),
        markup,
    }
}

/// Open a print view on the host, wait for it to load, print and close it
pub fn print_graphic(
    vector_text: &str,
    content: &str,
    display_name: Option<&str>,
    options: &PrintOptions,
    host: &mut dyn Host,
) -> Result<PrintDocument, ExportError> {
    let document = compose_print_document(vector_text, content, display_name, options.auto_print);

    let mut view = host.open_print_view(&document.title)?;
    let printed = view
        .write_document(&document.markup)
        .and_then(|()| view.wait_until_loaded(options.ready_timeout))
        .and_then(|()| view.print());
    view.close();
    printed?;

    info!(title = %document.title, "printed QR code");
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" id="qr-code"></svg>"#;

    #[test]
    fn test_default_title_and_caption() {
        let doc = compose_print_document(SVG, "Hi", None, false);
        assert_eq!(doc.title, "QR Code");
        assert_eq!(doc.caption(), "Content: Hi");
        assert!(doc.markup.contains("<title>QR Code</title>"));
        assert!(doc.markup.contains("<strong>Content:</strong> Hi"));
    }

    #[test]
    fn test_blank_display_name_uses_default() {
        let doc = compose_print_document(SVG, "Hi", Some("   "), false);
        assert_eq!(doc.title, "QR Code");
    }

    #[test]
    fn test_embeds_svg_verbatim() {
        let doc = compose_print_document(SVG, "x", Some("Menu"), false);
        assert!(doc.markup.contains(SVG));
        assert!(doc.markup.contains("<title>Menu</title>"));
        assert!(doc.markup.contains("<h1>Menu</h1>"));
    }

    #[test]
    fn test_size_rules() {
        let doc = compose_print_document(SVG, "x", None, false);
        assert!(doc.markup.contains("width: 200px !important;"));
        assert!(doc.markup.contains("@media print"));
        assert!(doc.markup.contains("width: 150px !important;"));
    }

    #[test]
    fn test_escapes_text() {
        let doc = compose_print_document(SVG, "<b>&", Some("A<B"), false);
        assert!(doc.markup.contains("<strong>Content:</strong> &lt;b&gt;&amp;"));
        assert!(doc.markup.contains("<title>A&lt;B</title>"));
        assert_eq!(doc.caption(), "Content: <b>&");
    }

    #[test]
    fn test_auto_print_script() {
        let with = compose_print_document(SVG, "x", None, true);
        assert!(with.markup.contains("window.print()"));
        let without = compose_print_document(SVG, "x", None, false);
        assert!(!without.markup.contains("<script>"));
    }
}
