//! Fixtures shared by the engine's unit tests.

use std::collections::BTreeMap;

use swatch_color::Color;
use swatch_tokens::{
    ColorData, ColorShade, HarmoniesState, Mode, ModeShades, Theme, ThemeColor, ThemeColors,
};

pub fn hex(s: &str) -> Color {
    Color::hex(s).unwrap()
}

/// Ten rungs from near-white to deep, at the base color's hue and chroma.
#[allow(clippy::cast_precision_loss)]
pub fn shades_for(base: Color) -> Vec<ColorShade> {
    let lch = base.to_oklch();
    (0..10)
        .map(|i| ColorShade::new(Color::from_oklch(0.97 - 0.08 * i as f32, lch.c, lch.h)))
        .collect()
}

/// A color whose ramp is the same in every mode.
pub fn color_data(id: &str, base: &str, shade_index: usize) -> ColorData {
    let base = hex(base);
    let ramp = ModeShades {
        all_shades: shades_for(base),
    };
    ColorData {
        id: id.to_owned(),
        name: id.to_owned(),
        base_hex: base,
        shade_index,
        all_modes: Mode::all().iter().map(|&m| (m, ramp.clone())).collect(),
    }
}

pub fn theme() -> Theme {
    Theme {
        name: "Ocean".into(),
        kind: "analogous".into(),
        colors: ThemeColors {
            primary: ThemeColor::Resolved(Box::new(color_data("primary", "#3366CC", 5))),
            secondary: ThemeColor::Resolved(Box::new(color_data("secondary", "#7A3DB8", 5))),
            tertiary: ThemeColor::Hex(hex("#FFD700")),
        },
    }
}

/// Semantic state catalog.
pub fn state_colors() -> Vec<ColorData> {
    vec![
        color_data("success", "#15803D", 6),
        color_data("warning", "#B45309", 6),
        color_data("error", "#B91C1C", 6),
        color_data("info", "#0369A1", 6),
    ]
}

/// Safe catalog holding the tertiary the theme names by hex.
pub fn safe_colors() -> Vec<ColorData> {
    vec![color_data("gold", "#FFD700", 4)]
}

pub fn harmonies() -> HarmoniesState {
    BTreeMap::new()
}
