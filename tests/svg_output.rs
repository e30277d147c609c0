//! Regression tests for the rendered SVG
//!
//! Module paths depend on the encoder's mask choice, so these check the
//! fixed parts of the document and that rendering is deterministic.

use qr_export::{render, render_with_config, ErrorCorrection, ExportConfig, Palette, QrSvgConfig};

#[test]
fn test_root_element() {
    let svg = render("Hello").unwrap();
    let root = svg.lines().next().unwrap();
    insta::assert_snapshot!(root, @r#"<svg xmlns="http://www.w3.org/2000/svg" id="qr-code" class="qr-code" width="256" height="256" viewBox="0 0 21 21" shape-rendering="crispEdges">"#);
}

#[test]
fn test_background_element() {
    let svg = render("Hello").unwrap();
    let background = svg.lines().nth(1).unwrap().trim();
    insta::assert_snapshot!(background, @r##"<rect class="qr-background" x="0" y="0" width="21" height="21" fill="#ffffff"/>"##);
}

#[test]
fn test_rendering_is_deterministic() {
    let first = render("https://example.com").unwrap();
    let second = render("https://example.com").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_higher_error_correction_needs_more_modules() {
    let content = "https://example.com/some/longer/path";
    let low = render_with_config(
        content,
        &ExportConfig::new().with_svg(QrSvgConfig::default().with_level(ErrorCorrection::L)),
    )
    .unwrap();
    let high = render_with_config(
        content,
        &ExportConfig::new().with_svg(QrSvgConfig::default().with_level(ErrorCorrection::H)),
    )
    .unwrap();
    assert_ne!(low, high);
    assert!(high.len() > low.len());
}

#[test]
fn test_size_only_changes_displayed_dimensions() {
    let small = render_with_config(
        "Hello",
        &ExportConfig::new().with_svg(QrSvgConfig::default().with_size(128)),
    )
    .unwrap();
    assert!(small.contains(r#"width="128" height="128" viewBox="0 0 21 21""#));

    let default = render("Hello").unwrap();
    let strip = |s: &str| s.lines().skip(1).collect::<Vec<_>>().join("\n");
    assert_eq!(strip(&small), strip(&default));
}

#[test]
fn test_colors_are_escaped() {
    let config = ExportConfig::new().with_palette(Palette::new("\"red\"", "white"));
    let svg = render_with_config("Hello", &config).unwrap();
    assert!(svg.contains(r#"fill="&quot;red&quot;""#));
    assert!(svg.contains(r#"fill="white""#));
}
