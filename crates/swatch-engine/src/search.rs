//! Shade search — picking and nudging colors until they read.
//!
//! Every function here takes a ramp (ordered shades of one hue) and the
//! backgrounds a color will be painted on, and answers with a concrete
//! color. The searches are small linear scans; ramps hold ten rungs and
//! mix scans a hundred steps, so nothing here needs to be clever.
//!
//! Two families:
//!
//! - **Ramp picks** ([`find_shade_with_sufficient_contrast`],
//!   [`adjust_shade_for_contrast`]) return a rung, or a rung nudged in
//!   OKLCH lightness when no rung is good enough.
//! - **Mix scans** ([`generate_quiet_surface_color`], [`find_border_color`])
//!   walk a mix from full strength toward the surface and stop just before
//!   contrast falls to the target, giving the weakest color that still
//!   clears it.

use swatch_color::{
    Color, average_contrast, average_luminance, contrast_ratio, is_dark, meets_all, min_contrast,
};
use swatch_tokens::ColorShade;

/// Lightness step of one adjustment iteration (OKLCH L).
pub const ADJUST_STEP: f32 = 0.05;

/// Lightness jump applied when stepping did not reach every background.
pub const FULL_STEP: f32 = 0.2;

const ADJUST_ITERATIONS: usize = 10;

/// Resolution of mix scans: fractions are `n / MIX_STEPS`.
const MIX_STEPS: u32 = 100;

#[allow(clippy::cast_precision_loss)]
fn fraction(n: u32) -> f32 {
    n as f32 / MIX_STEPS as f32
}

// ---------------------------------------------------------------------------
// Ramp picks
// ---------------------------------------------------------------------------

/// Index of a rung meeting `required` against every background.
///
/// Light backgrounds: the first passing rung. If any background is dark,
/// the ramp is scanned from its light end and the search returns the last
/// passing rung before the first failure (or the final rung if the tail
/// all passes). Rungs that fail before anything has passed are skipped.
///
/// `None` if nothing passes or there are no backgrounds.
#[must_use]
pub fn find_shade_with_sufficient_contrast(
    shades: &[ColorShade],
    backgrounds: &[Color],
    required: f64,
) -> Option<usize> {
    if backgrounds.is_empty() {
        return None;
    }
    let passes = |shade: &ColorShade| meets_all(shade.hex, backgrounds, required);

    if !backgrounds.iter().any(|&bg| is_dark(bg)) {
        return shades.iter().position(passes);
    }

    let mut last_pass = None;
    for (i, shade) in shades.iter().enumerate() {
        if passes(shade) {
            last_pass = Some(i);
        } else if last_pass.is_some() {
            break;
        }
    }
    last_pass
}

/// Best-effort color for `backgrounds` when no rung qualifies.
///
/// Seeds from the rung with the highest average contrast, then steps its
/// lightness away from each background in turn (darker on light, lighter
/// on dark) for up to ten steps. If some background is still unmet, one
/// full step is taken in the direction the backgrounds' average luminance
/// calls for. Always returns a color.
#[must_use]
pub fn adjust_shade_for_contrast(
    shades: &[ColorShade],
    backgrounds: &[Color],
    required: f64,
) -> Color {
    let light_backdrop = average_luminance(backgrounds) >= 0.5;

    let seed = shades
        .iter()
        .map(|s| (s.hex, average_contrast(s.hex, backgrounds)))
        .fold(None, |best: Option<(Color, f64)>, (hex, avg)| match best {
            Some((_, best_avg)) if best_avg >= avg => best,
            _ => Some((hex, avg)),
        })
        .map(|(hex, _)| hex);

    let mut color = seed.unwrap_or(if light_backdrop { Color::BLACK } else { Color::WHITE });

    for &bg in backgrounds {
        for _ in 0..ADJUST_ITERATIONS {
            if contrast_ratio(color, bg) >= required {
                break;
            }
            color = if is_dark(bg) {
                color.lighten(ADJUST_STEP)
            } else {
                color.darken(ADJUST_STEP)
            };
        }
    }

    if !meets_all(color, backgrounds, required) {
        tracing::debug!(color = %color, required, "stepping did not converge, taking full step");
        color = if light_backdrop {
            color.darken(FULL_STEP)
        } else {
            color.lighten(FULL_STEP)
        };
    }

    color
}

// ---------------------------------------------------------------------------
// Mix scans
// ---------------------------------------------------------------------------

/// Scan mix steps from full (`MIX_STEPS`) down to none and return the step
/// just above the first one whose contrast is at or below `target`.
///
/// `None` when even the full mix is at or below `target`, or when nothing
/// crosses.
fn weakest_step_above(target: f64, mut contrast_at: impl FnMut(f32) -> f64) -> Option<u32> {
    for n in (0..=MIX_STEPS).rev() {
        if contrast_at(fraction(n)) <= target {
            return (n < MIX_STEPS).then_some(n + 1);
        }
    }
    None
}

/// A de-emphasized variant of `mix` over `surface`.
///
/// Returns the weakest mix of `surface` toward `mix` whose contrast against
/// `surface` still exceeds `required`. When the full `mix` does not exceed
/// it, `surface` comes back unchanged.
#[must_use]
pub fn generate_quiet_surface_color(surface: Color, mix: Color, required: f64) -> Color {
    weakest_step_above(required, |t| contrast_ratio(surface.mix(mix, t), surface))
        .map_or(surface, |n| surface.mix(mix, fraction(n)))
}

/// The mix step [`find_border_color`] settles on, if any.
fn border_step(surfaces: &[Color], text: Color, target: f64) -> Option<u32> {
    let first = *surfaces.first()?;
    weakest_step_above(target, |t| min_contrast(first.mix(text, t), surfaces))
}

/// A divider color between the first surface and `text`.
///
/// Mixes the first surface toward `text` and keeps the weakest mix whose
/// minimum contrast across all `surfaces` still exceeds `target`. Falls
/// back to `text` itself when no mix clears the target (or there are no
/// surfaces).
#[must_use]
pub fn find_border_color(surfaces: &[Color], text: Color, target: f64) -> Color {
    match (surfaces.first(), border_step(surfaces, text, target)) {
        (Some(&first), Some(n)) => first.mix(text, fraction(n)),
        _ => text,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
