//! Filesystem-safe download names

use tracing::warn;

use super::{ExportFormat, SizePreset};

/// Base name used when the label is blank or sanitizes to nothing
pub const DEFAULT_BASENAME: &str = "qr-code";

/// Derive a filesystem-safe base name from a free-text label
pub fn sanitize(label: &str) -> String {
    if label.trim().is_empty() {
        return DEFAULT_BASENAME.to_string();
    }

    let mut out = String::with_capacity(label.len());
    let mut pending_hyphen = false;
    for c in label.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(c);
        } else if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        }
    }

    if out.is_empty() {
        warn!(label, "label has no usable characters, using default file name");
        return DEFAULT_BASENAME.to_string();
    }
    out
}

/// `{basename}-{preset slug}.{extension}`
pub fn download_filename(basename: &str, preset: SizePreset, format: ExportFormat) -> String {
    format!("{}-{}.{}", basename, preset.slug(), format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn is_clean(name: &str) -> bool {
        !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
            && !name.starts_with('-')
            && !name.ends_with('-')
            && !name.contains("--")
    }

    #[test]
    fn test_blank_labels() {
        assert_eq!(sanitize(""), "qr-code");
        assert_eq!(sanitize("   "), "qr-code");
        assert_eq!(sanitize("\t\n"), "qr-code");
    }

    #[test]
    fn test_examples() {
        assert_eq!(sanitize("My Business Card!!"), "my-business-card");
        assert_eq!(sanitize("Team Wiki!"), "team-wiki");
        assert_eq!(sanitize("  --Hello -- World--  "), "hello-world");
        assert_eq!(sanitize("a   b\tc"), "a-b-c");
        assert_eq!(sanitize("Room 101"), "room-101");
    }

    #[test]
    fn test_symbol_only_falls_back() {
        assert_eq!(sanitize("!!!"), "qr-code");
        assert_eq!(sanitize("- - -"), "qr-code");
    }

    #[test]
    fn test_stripped_characters_do_not_split_words() {
        assert_eq!(sanitize("Caf\u{e9} Menu"), "caf-menu");
        assert_eq!(sanitize("don't"), "dont");
    }

    proptest! {
        #[test]
        fn test_any_label_gives_clean_name(label in "\\PC*") {
            let name = sanitize(&label);
            prop_assert!(is_clean(&name), "{:?} -> {:?}", label, name);
        }

        #[test]
        fn test_ascii_label_keeps_alphanumerics(
            label in "[ -~\t]*[A-Za-z0-9][ -~\t]*"
        ) {
            let name = sanitize(&label);
            prop_assert!(is_clean(&name));
            let kept: String = label
                .to_lowercase()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect();
            prop_assert_eq!(name.replace('-', ""), kept);
        }
    }

    #[test]
    fn test_download_filename() {
        assert_eq!(
            download_filename("qr-code", SizePreset::Medium, ExportFormat::Png),
            "qr-code-medium.png"
        );
        assert_eq!(
            download_filename("team-wiki", SizePreset::Large, ExportFormat::Svg),
            "team-wiki-large.svg"
        );
        assert_eq!(
            download_filename("menu", SizePreset::PrintA4, ExportFormat::Jpg),
            "menu-print-a4.jpg"
        );
    }
}
