//! Foreground picks — text, buttons, and hyperlinks.
//!
//! Text color depends on the style family. Professional styles keep text
//! neutral: a slightly translucent near-white or near-black, whichever
//! reads better. Tonal styles take text from the brand ramp, trying a short
//! list of rungs in priority order before giving up to plain black/white.

use swatch_color::{
    Color, best_black_or_white, is_dark, meets_all, min_contrast, relative_luminance,
};
use swatch_tokens::{ColorShade, HyperlinkStyle, Mode, SurfaceStyle};

use crate::config::ContrastPolicy;

/// Professional light text: white at 95% opacity.
pub const NEAR_WHITE: Color = Color::rgba8(0xFF, 0xFF, 0xFF, 0xF2);

/// Professional dark text: black at 87% opacity.
pub const NEAR_BLACK: Color = Color::rgba8(0x00, 0x00, 0x00, 0xDE);

/// Link blue used by the `blue` hyperlink style.
pub const HOTLINK_BLUE: Color = Color::rgb8(0x0B, 0x57, 0xD0);

/// How a style chooses its text color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStrategy {
    /// Near-white or near-black, by minimum contrast.
    Professional,
    /// Deep rungs of the ramp.
    LightTonal,
    /// Pale rungs of the ramp.
    DarkTonal,
    /// Either end of the ramp, by surface luminance, then any rung.
    ColorfulTonal,
}

impl TextStrategy {
    #[must_use]
    pub const fn for_style(style: SurfaceStyle) -> Self {
        match style {
            SurfaceStyle::LightTonal => Self::LightTonal,
            SurfaceStyle::DarkTonal => Self::DarkTonal,
            SurfaceStyle::ColorfulTonal => Self::ColorfulTonal,
            SurfaceStyle::LightProfessional
            | SurfaceStyle::GreyProfessional
            | SurfaceStyle::DarkProfessional
            | SurfaceStyle::ColorfulProfessional => Self::Professional,
        }
    }

    /// Ramp indices tried in order. Empty for professional text.
    fn candidates(self, backgrounds: &[Color]) -> &'static [usize] {
        match self {
            Self::Professional => &[],
            Self::LightTonal => &[9, 8, 7, 6],
            Self::DarkTonal => &[0, 1, 2, 3],
            Self::ColorfulTonal => {
                if backgrounds.first().is_none_or(|&bg| !is_dark(bg)) {
                    &[9, 8, 0, 7]
                } else {
                    &[0, 1, 9, 2]
                }
            }
        }
    }
}

/// Text color for `backgrounds` at an explicit threshold.
#[must_use]
pub fn find_on_surface_text_color(
    shades: &[ColorShade],
    backgrounds: &[Color],
    strategy: TextStrategy,
    required: f64,
) -> Color {
    if strategy == TextStrategy::Professional {
        return if min_contrast(NEAR_WHITE, backgrounds) > min_contrast(NEAR_BLACK, backgrounds) {
            NEAR_WHITE
        } else {
            NEAR_BLACK
        };
    }

    let from_list = strategy
        .candidates(backgrounds)
        .iter()
        .filter_map(|&i| shades.get(i))
        .find(|s| meets_all(s.hex, backgrounds, required));
    if let Some(shade) = from_list {
        return shade.hex;
    }

    if strategy == TextStrategy::ColorfulTonal {
        let relaxed = swatch_color::DECORATIVE_CONTRAST;
        if let Some(shade) = shades.iter().find(|s| meets_all(s.hex, backgrounds, relaxed)) {
            tracing::debug!(text = %shade.hex, "colorful text relaxed to decorative contrast");
            return shade.hex;
        }
    }

    best_black_or_white(backgrounds)
}

/// Body text color for `backgrounds` in `mode`.
#[must_use]
pub fn find_text_color(
    shades: &[ColorShade],
    backgrounds: &[Color],
    strategy: TextStrategy,
    mode: Mode,
) -> Color {
    find_on_surface_text_color(shades, backgrounds, strategy, mode.text_contrast())
}

/// A button and the text that goes with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonColors {
    pub button: Color,
    pub text: Color,
    /// `button` at 50% opacity.
    pub half: Color,
    /// Text for the half button, read against the surfaces.
    pub half_text: Color,
}

/// Button fill for `surfaces`.
///
/// Rungs are tried lightest first in light modes and darkest first in dark
/// modes; the first one reaching the decorative threshold on every surface
/// wins, else the first in that order.
#[must_use]
pub fn find_button_color(
    shades: &[ColorShade],
    surfaces: &[Color],
    mode: Mode,
    strategy: TextStrategy,
    policy: &ContrastPolicy,
) -> ButtonColors {
    let mut sorted: Vec<Color> = shades.iter().map(|s| s.hex).collect();
    sorted.sort_by(|a, b| {
        let order = relative_luminance(*a).total_cmp(&relative_luminance(*b));
        if mode.is_dark() { order } else { order.reverse() }
    });

    let button = sorted
        .iter()
        .copied()
        .find(|&c| meets_all(c, surfaces, policy.decorative))
        .or_else(|| sorted.first().copied())
        .unwrap_or_else(|| best_black_or_white(surfaces));

    let required = policy.text(mode);
    ButtonColors {
        button,
        text: find_on_surface_text_color(shades, &[button], strategy, required),
        half: button.half(),
        half_text: find_on_surface_text_color(shades, surfaces, strategy, required),
    }
}

/// A hyperlink color and whether it had to fall back to black/white.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hotlink {
    pub color: Color,
    pub requires_invert: bool,
}

/// Hyperlink color for `surfaces`.
#[must_use]
pub fn find_hotlink_color(
    surfaces: &[Color],
    shades: &[ColorShade],
    style: HyperlinkStyle,
    required: f64,
) -> Hotlink {
    match style {
        HyperlinkStyle::Blue => {
            if meets_all(HOTLINK_BLUE, surfaces, required) {
                Hotlink {
                    color: HOTLINK_BLUE,
                    requires_invert: false,
                }
            } else {
                Hotlink {
                    color: best_black_or_white(surfaces),
                    requires_invert: true,
                }
            }
        }
        HyperlinkStyle::Brand => {
            let light_surface = surfaces.first().is_none_or(|&bg| !is_dark(bg));
            let mut ordered: Vec<Color> = shades.iter().map(|s| s.hex).collect();
            ordered.sort_by(|a, b| {
                let order = relative_luminance(*a).total_cmp(&relative_luminance(*b));
                if light_surface { order.reverse() } else { order }
            });
            let color = ordered
                .into_iter()
                .find(|&c| meets_all(c, surfaces, required))
                .unwrap_or_else(|| best_black_or_white(surfaces));
            Hotlink {
                color,
                requires_invert: false,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{hex, shades_for};
    use pretty_assertions::assert_eq;
    use swatch_color::contrast_ratio;

    fn brand() -> Vec<ColorShade> {
        shades_for(hex("#3366CC"))
    }

    // ── Text ────────────────────────────────────────────────────────

    #[test]
    fn professional_text_on_white_is_near_black() {
        let c =
            find_text_color(&brand(), &[Color::WHITE], TextStrategy::Professional, Mode::AaLight);
        assert_eq!(c, NEAR_BLACK);
        assert_eq!(c.to_hex(), "#000000DE");
    }

    #[test]
    fn professional_text_on_dark_is_near_white() {
        let c = find_text_color(&[], &[hex("#121212")], TextStrategy::Professional, Mode::AaDark);
        assert_eq!(c, NEAR_WHITE);
    }

    #[test]
    fn light_tonal_prefers_deepest_rung() {
        let shades = brand();
        let c = find_text_color(&shades, &[Color::WHITE], TextStrategy::LightTonal, Mode::AaLight);
        assert_eq!(c, shades[9].hex);
    }

    #[test]
    fn dark_tonal_prefers_palest_rung() {
        let shades = brand();
        let c = find_text_color(&shades, &[hex("#121212")], TextStrategy::DarkTonal, Mode::AaDark);
        assert_eq!(c, shades[0].hex);
    }

    #[test]
    fn colorful_list_depends_on_surface() {
        let shades = brand();
        let on_light = find_text_color(
            &shades,
            &[hex("#F0F4FF")],
            TextStrategy::ColorfulTonal,
            Mode::AaLight,
        );
        assert_eq!(on_light, shades[9].hex);
        let on_dark = find_text_color(
            &shades,
            &[hex("#0A1A40")],
            TextStrategy::ColorfulTonal,
            Mode::AaDark,
        );
        assert_eq!(on_dark, shades[0].hex);
    }

    #[test]
    fn colorful_relaxes_before_black_white() {
        // Listed rungs (9, 8, 0, 7) are all too pale for white; rung 3
        // (#888888, about 3.5:1) is the first to reach the decorative level.
        let shades: Vec<ColorShade> = [
            "#FAFAFA", "#F0F0F0", "#E0E0E0", "#888888", "#777777",
            "#555555", "#333333", "#EEEEEE", "#F5F5F5", "#FFFFFF",
        ]
        .iter()
        .map(|c| ColorShade::new(hex(c)))
        .collect();
        let c =
            find_text_color(&shades, &[Color::WHITE], TextStrategy::ColorfulTonal, Mode::AaLight);
        assert_eq!(c, hex("#888888"));
        assert!(contrast_ratio(c, Color::WHITE) < 4.5);
    }

    #[test]
    fn tonal_without_ramp_is_black_or_white() {
        let c = find_text_color(&[], &[Color::WHITE], TextStrategy::LightTonal, Mode::AaaLight);
        assert_eq!(c, Color::BLACK);
        let c = find_text_color(&[], &[Color::BLACK], TextStrategy::DarkTonal, Mode::AaaDark);
        assert_eq!(c, Color::WHITE);
    }

    // ── Buttons ─────────────────────────────────────────────────────

    #[test]
    fn light_mode_button_is_lightest_passing() {
        let shades = brand();
        let policy = ContrastPolicy::default();
        let b = find_button_color(
            &shades,
            &[Color::WHITE],
            Mode::AaLight,
            TextStrategy::LightTonal,
            &policy,
        );
        assert!(contrast_ratio(b.button, Color::WHITE) >= 3.1);
        let lighter_passing = shades.iter().any(|s| {
            relative_luminance(s.hex) > relative_luminance(b.button)
                && contrast_ratio(s.hex, Color::WHITE) >= 3.1
        });
        assert!(!lighter_passing);
    }

    #[test]
    fn half_button_appends_80() {
        let policy = ContrastPolicy::default();
        let b = find_button_color(
            &brand(),
            &[Color::WHITE],
            Mode::AaLight,
            TextStrategy::Professional,
            &policy,
        );
        let full = b.button.to_hex();
        assert_eq!(b.half.to_hex(), format!("{full}80"));
        assert_eq!(b.half.to_hex().len(), 9);
    }

    #[test]
    fn button_text_reads_on_button() {
        let policy = ContrastPolicy::default();
        let b = find_button_color(
            &brand(),
            &[Color::WHITE],
            Mode::AaLight,
            TextStrategy::LightTonal,
            &policy,
        );
        assert!(contrast_ratio(b.text, b.button) >= 3.1);
    }

    #[test]
    fn empty_ramp_button_is_black_or_white() {
        let policy = ContrastPolicy::default();
        let b = find_button_color(
            &[],
            &[hex("#121212")],
            Mode::AaDark,
            TextStrategy::DarkTonal,
            &policy,
        );
        assert_eq!(b.button, Color::WHITE);
    }

    // ── Hotlinks ────────────────────────────────────────────────────

    #[test]
    fn blue_hotlink_on_white() {
        let h = find_hotlink_color(&[Color::WHITE], &[], HyperlinkStyle::Blue, 4.5);
        assert_eq!(h, Hotlink { color: HOTLINK_BLUE, requires_invert: false });
    }

    #[test]
    fn blue_hotlink_on_dark_inverts() {
        let h = find_hotlink_color(&[hex("#121212")], &[], HyperlinkStyle::Blue, 4.5);
        assert_eq!(h, Hotlink { color: Color::WHITE, requires_invert: true });
    }

    #[test]
    fn brand_hotlink_is_lightest_readable_on_light() {
        let shades = brand();
        let h = find_hotlink_color(&[Color::WHITE], &shades, HyperlinkStyle::Brand, 4.5);
        assert!(!h.requires_invert);
        assert!(contrast_ratio(h.color, Color::WHITE) >= 4.5);
        assert!(shades.iter().any(|s| s.hex == h.color));
    }

    #[test]
    fn brand_hotlink_without_ramp_falls_back() {
        let h = find_hotlink_color(&[Color::WHITE], &[], HyperlinkStyle::Brand, 4.5);
        assert_eq!(h, Hotlink { color: Color::BLACK, requires_invert: false });
    }
}
