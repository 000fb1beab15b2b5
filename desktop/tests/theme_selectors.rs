#![cfg(test)]
/*!
Theme selector lint for the desktop build.

Purpose:
- Ensure that CSS selectors the dashboard components emit remain present in the
  shared theme: ui/assets/theme/main.css
- Fail fast if a refactor drops or renames a class, preventing a silent styling
  regression in packaged (embedded) desktop builds.

How it works:
- We compile‑time embed the theme using `include_str!` pointing to the shared
  `ui/` location (mirrors the constant in `desktop/src/main.rs`).
- We assert presence of a curated set of selectors / tokens.
- If you intentionally rename or remove a selector:
    1. Update the Dioxus component markup.
    2. Adjust REQUIRED_SELECTORS accordingly.
*/

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

/// Core selectors / tokens that must exist in the shared theme for desktop.
const REQUIRED_SELECTORS: &[&str] = &[
    // Global / layout
    ":root",
    "body {",
    ".dashboard-container",
    ".dashboard-content",
    ".dashboard-state",
    ".visually-hidden",
    // Header
    ".dashboard-header",
    ".indicator-positive",
    ".live-dot",
    // Filters & buttons
    ".filter-bar",
    ".filter-select",
    ".button {",
    ".button--primary",
    ".button--outline",
    ".button--ghost",
    // Change colouring
    ".text-success",
    ".text-danger",
    ".text-muted",
    // KPI cards
    ".kpi-grid",
    ".card-kpi",
    ".text-kpi-value",
    ".progress-track",
    ".progress-fill",
    // Analytics cards
    ".analytics-grid",
    ".card-analytics",
    ".revenue-row",
    ".sparkline__bar",
    ".chart-container",
    ".chart-canvas",
    ".chart-legend__swatch--previous",
    ".chart-legend__swatch--current",
    ".breakdown-grid",
    ".region-card",
    ".bucket-card",
    ".los-bar__segment",
    ".segment--new",
    ".segment--mid",
    ".segment--loyal",
    // Export panel
    ".export-panel__actions",
    ".export-feedback--success",
    ".export-feedback--error",
    // Loading
    ".spinner",
    // Media query token (sanity check responsive block exists)
    "@media (max-width: 720px)",
];

#[test]
fn unified_theme_contains_required_selectors() {
    let mut missing = Vec::new();
    for sel in REQUIRED_SELECTORS {
        if !THEME_CSS.contains(sel) {
            missing.push(*sel);
        }
    }

    if !missing.is_empty() {
        panic!(
            "Missing {} required CSS selectors/tokens in unified theme:\n{}",
            missing.len(),
            missing.join("\n")
        );
    }
}

#[test]
fn unified_theme_not_trivially_empty() {
    let non_ws_len = THEME_CSS.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        non_ws_len > 4_000,
        "Embedded theme appears unexpectedly small ({} non-whitespace chars) – \
         did the file get truncated or path change?",
        non_ws_len
    );
}

#[test]
fn change_classes_are_paired() {
    let has_success = THEME_CSS.contains(".text-success {");
    let has_danger = THEME_CSS.contains(".text-danger {");
    assert!(
        has_success && has_danger,
        "Change colour classes missing (success: {has_success}, danger: {has_danger})"
    );
}
