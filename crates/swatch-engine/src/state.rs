//! State colors — resolving `primary`, `error`, ... to a readable shade.
//!
//! A state names a color indirectly: brand states through the active theme,
//! semantic states through the state catalog. The resolver finds that
//! color's ramp, picks a rung that reaches the threshold on every requested
//! background, and never fails: anything missing along the way yields the
//! state's fixed fallback.

use swatch_color::{Color, DECORATIVE_CONTRAST};
use swatch_tokens::{
    ColorData, HarmoniesState, Level, Mode, State, StyleColors, Theme, ThemeColor,
    is_valid_token_value,
};

use crate::search::{adjust_shade_for_contrast, find_shade_with_sufficient_contrast};

/// The fixed color a state falls back to when it cannot be resolved.
#[must_use]
pub const fn fallback_color(state: State) -> Color {
    match state {
        State::Primary => Color::rgb8(0x25, 0x63, 0xEB),
        State::Secondary => Color::rgb8(0x7C, 0x3A, 0xED),
        State::Tertiary => Color::rgb8(0x0D, 0x94, 0x88),
        State::Success => Color::rgb8(0x15, 0x80, 0x3D),
        State::Warning => Color::rgb8(0xB4, 0x53, 0x09),
        State::Error => Color::rgb8(0xB9, 0x1C, 0x1C),
        State::Info => Color::rgb8(0x03, 0x69, 0xA1),
    }
}

// ---------------------------------------------------------------------------
// Backgrounds
// ---------------------------------------------------------------------------

/// Name of the three surface levels as one background set.
pub const SURFACES: &str = "Surfaces";

/// Name of the five container levels as one background set.
pub const CONTAINERS: &str = "Containers";

/// A single concrete background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundRef {
    Level(Level),
    Hex(Color),
}

/// Expand background names into concrete references.
///
/// `"Surfaces"` and `"Containers"` expand to their levels, a level token
/// name (`"Container-High"`) to that level, and a hex string to itself.
/// Anything else is dropped.
#[must_use]
pub fn expand_background_groups<S: AsRef<str>>(names: &[S]) -> Vec<BackgroundRef> {
    let mut refs = Vec::new();
    for name in names {
        let name = name.as_ref();
        match name {
            SURFACES => refs.extend(Level::SURFACES.map(BackgroundRef::Level)),
            CONTAINERS => refs.extend(Level::CONTAINERS.map(BackgroundRef::Level)),
            _ => {
                if let Some(level) = Level::from_token_name(name) {
                    refs.push(BackgroundRef::Level(level));
                } else if let Some(color) = Color::hex(name) {
                    refs.push(BackgroundRef::Hex(color));
                } else {
                    tracing::debug!(background = name, "unknown background name");
                }
            }
        }
    }
    refs
}

/// Resolve references against the computed levels.
#[must_use]
pub fn get_background_colors(refs: &[BackgroundRef], levels: &StyleColors) -> Vec<Color> {
    refs.iter()
        .map(|r| match *r {
            BackgroundRef::Level(level) => levels.get(level),
            BackgroundRef::Hex(color) => color,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color sources
// ---------------------------------------------------------------------------

/// Everything a state can be looked up in.
#[derive(Debug, Clone, Copy)]
pub struct ColorSources<'a> {
    pub theme: &'a Theme,
    pub safe_colors: &'a [ColorData],
    pub state_colors: &'a [ColorData],
    pub harmonies: &'a HarmoniesState,
}

impl<'a> ColorSources<'a> {
    /// The color data behind `state`, if any source has it.
    #[must_use]
    pub fn state_color(&self, state: State) -> Option<&'a ColorData> {
        get_state_color_data(state, self.theme, self.safe_colors, self.state_colors, self.harmonies)
    }
}

/// Look up the color data for a state.
///
/// Brand states read the theme slot: a resolved slot is used as is, a bare
/// hex is matched by base hex in the safe catalog and then in the harmony
/// triples. Semantic states are matched by id or name in the state catalog.
#[must_use]
pub fn get_state_color_data<'a>(
    state: State,
    theme: &'a Theme,
    safe_colors: &'a [ColorData],
    state_colors: &'a [ColorData],
    harmonies: &'a HarmoniesState,
) -> Option<&'a ColorData> {
    match theme.slot(state) {
        Some(ThemeColor::Resolved(data)) => Some(data.as_ref()),
        Some(ThemeColor::Hex(hex)) => safe_colors
            .iter()
            .find(|c| c.base_hex == *hex)
            .or_else(|| {
                harmonies
                    .values()
                    .flat_map(|triple| triple.iter())
                    .find(|c| c.base_hex == *hex)
            }),
        None => state_colors.iter().find(|c| {
            c.id.eq_ignore_ascii_case(state.name()) || c.name.eq_ignore_ascii_case(state.name())
        }),
    }
}

// ---------------------------------------------------------------------------
// get_contrasting_shade
// ---------------------------------------------------------------------------

/// One state-color resolution.
#[derive(Debug, Clone, Copy)]
pub struct ContrastRequest<'a> {
    pub mode: Mode,
    pub backgrounds: &'a [&'a str],
    pub state: State,
    pub levels: &'a StyleColors,
    pub sources: ColorSources<'a>,
    pub required: f64,
}

impl<'a> ContrastRequest<'a> {
    /// A request at the decorative threshold.
    #[must_use]
    pub const fn new(
        mode: Mode,
        backgrounds: &'a [&'a str],
        state: State,
        levels: &'a StyleColors,
        sources: ColorSources<'a>,
    ) -> Self {
        Self {
            mode,
            backgrounds,
            state,
            levels,
            sources,
            required: DECORATIVE_CONTRAST,
        }
    }

    #[must_use]
    pub const fn with_required(mut self, required: f64) -> Self {
        self.required = required;
        self
    }
}

/// A shade of the state's color that reads on every requested background.
///
/// Picks a passing rung if there is one, otherwise nudges the best rung.
/// Falls back to [`fallback_color`] when the state has no color, its ramp
/// is empty, no background resolves, or the result is not a valid token.
#[must_use]
pub fn get_contrasting_shade(req: &ContrastRequest<'_>) -> Color {
    let fallback = fallback_color(req.state);

    let Some(data) = req.sources.state_color(req.state) else {
        tracing::debug!(state = req.state.name(), "no color data for state, using fallback");
        return fallback;
    };

    let shades = data.shades(req.mode);
    if shades.is_empty() {
        tracing::debug!(state = req.state.name(), mode = %req.mode, "empty ramp, using fallback");
        return fallback;
    }

    let backgrounds =
        get_background_colors(&expand_background_groups(req.backgrounds), req.levels);
    if backgrounds.is_empty() {
        tracing::debug!(state = req.state.name(), "no backgrounds resolved, using fallback");
        return fallback;
    }

    let color = find_shade_with_sufficient_contrast(shades, &backgrounds, req.required)
        .and_then(|i| shades.get(i))
        .map_or_else(
            || adjust_shade_for_contrast(shades, &backgrounds, req.required),
            |shade| shade.hex,
        );

    if is_valid_token_value(&color.to_hex()) {
        color
    } else {
        fallback
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
