// SPDX-License-Identifier: MIT
//
// WCAG contrast measurement and the thresholds the token engine enforces.
//
// - Body text: 4.5:1 (AA) or 7.1:1 (AAA, a hair above the WCAG 7:1 so that
//   8-bit rounding never lands a "passing" color under the line)
// - Decorative elements (icons, borders, buttons): 3.1:1 in every mode
//
// Translucent foregrounds are measured as rendered: composited over the
// background before luminance is taken.

use crate::color::{Color, srgb_to_linear};

/// Minimum contrast for body text in AA modes.
pub const AA_TEXT_CONTRAST: f64 = 4.5;

/// Minimum contrast for body text in AAA modes.
pub const AAA_TEXT_CONTRAST: f64 = 7.1;

/// Minimum contrast for icons, borders, and other non-text elements.
pub const DECORATIVE_CONTRAST: f64 = 3.1;

/// Luminance below which a background counts as "dark".
pub const DARK_LUMINANCE: f64 = 0.5;

/// Compute the relative luminance of a color per WCAG 2.1 (alpha ignored).
///
/// Uses the standard sRGB linearization + weighted sum formula:
///   L = 0.2126 * `R_lin` + 0.7152 * `G_lin` + 0.0722 * `B_lin`
///
/// Returns a value in [0.0, 1.0] where 0 is black and 1 is white.
#[must_use]
pub fn relative_luminance(color: Color) -> f64 {
    let (r, g, b) = color.to_srgb();
    let r_lin = f64::from(srgb_to_linear(r));
    let g_lin = f64::from(srgb_to_linear(g));
    let b_lin = f64::from(srgb_to_linear(b));
    0.2126f64.mul_add(r_lin, 0.7152f64.mul_add(g_lin, 0.0722 * b_lin))
}

/// Compute the WCAG 2.1 contrast ratio of `fg` painted on `bg`.
///
/// Returns a value in [1.0, 21.0]. A translucent background is first
/// flattened onto white, a translucent foreground onto the background.
/// For opaque colors the result is symmetric.
#[must_use]
pub fn contrast_ratio(fg: Color, bg: Color) -> f64 {
    let bg = bg.composite_over(Color::WHITE);
    let fg = fg.composite_over(bg);
    let la = relative_luminance(fg);
    let lb = relative_luminance(bg);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// The weakest contrast of `fg` across `backgrounds`.
///
/// An empty background set imposes no constraint and yields infinity.
#[must_use]
pub fn min_contrast(fg: Color, backgrounds: &[Color]) -> f64 {
    backgrounds
        .iter()
        .map(|&bg| contrast_ratio(fg, bg))
        .fold(f64::INFINITY, f64::min)
}

/// Mean contrast of `fg` across `backgrounds` (0 for an empty set).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_contrast(fg: Color, backgrounds: &[Color]) -> f64 {
    if backgrounds.is_empty() {
        return 0.0;
    }
    let total: f64 = backgrounds.iter().map(|&bg| contrast_ratio(fg, bg)).sum();
    total / backgrounds.len() as f64
}

/// Whether `fg` reaches `required` against every background.
#[must_use]
pub fn meets_all(fg: Color, backgrounds: &[Color], required: f64) -> bool {
    backgrounds.iter().all(|&bg| contrast_ratio(fg, bg) >= required)
}

/// Mean luminance of a set of colors (0 for an empty set).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_luminance(colors: &[Color]) -> f64 {
    if colors.is_empty() {
        return 0.0;
    }
    colors.iter().map(|&c| relative_luminance(c)).sum::<f64>() / colors.len() as f64
}

/// Whether a color counts as a dark background.
#[must_use]
pub fn is_dark(color: Color) -> bool {
    relative_luminance(color) < DARK_LUMINANCE
}

/// Whether a color sits in the yellow/orange hue band (20°–60° HSL).
///
/// Ramps in this band do not lighten and darken symmetrically around
/// their midpoint, so neighbor lookups treat them specially.
#[must_use]
pub fn is_yellow_or_orange(color: Color) -> bool {
    !color.is_achromatic() && (20.0..=60.0).contains(&color.hue())
}

/// Black or white, whichever keeps the higher minimum contrast across
/// `backgrounds`. Ties go to black.
#[must_use]
pub fn best_black_or_white(backgrounds: &[Color]) -> Color {
    if min_contrast(Color::WHITE, backgrounds) > min_contrast(Color::BLACK, backgrounds) {
        Color::WHITE
    } else {
        Color::BLACK
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
