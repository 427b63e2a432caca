#![cfg(test)]
/*!
Theme selector lint for the desktop build.

Checks that the classes the story components render still exist in the shared
theme (`ui/assets/theme/main.css`), so a CSS refactor cannot silently unstyle
the packaged desktop build. A plain substring check is enough here.

When a component class is renamed, update the markup and REQUIRED_SELECTORS
together.
*/

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

const REQUIRED_SELECTORS: &[&str] = &[
    // Global / layout
    ":root",
    "body {",
    ".app-main",
    // Deck
    ".deck {",
    ".deck__slide",
    ".deck__dots",
    ".dot.active",
    ".deck__arrow",
    // Text slides
    ".slide {",
    ".highlight-box",
    ".rotating-words",
    // Chart pages
    ".page {",
    ".page__heading",
    ".page__chart",
    ".attribute-select",
    ".factor-columns",
    ".chart {",
    ".chart .hit",
    // Tooltip
    ".tooltip {",
    ".tooltip-heading",
    ".tooltip-row",
    ".tooltip-swatch",
    // Media query token (sanity check responsive block exists)
    "@media (max-width: 720px)",
];

#[test]
fn unified_theme_contains_required_selectors() {
    let missing: Vec<&str> = REQUIRED_SELECTORS
        .iter()
        .copied()
        .filter(|sel| !THEME_CSS.contains(sel))
        .collect();

    assert!(
        missing.is_empty(),
        "Missing {} required CSS selectors/tokens in unified theme:\n{}",
        missing.len(),
        missing.join("\n")
    );
}
