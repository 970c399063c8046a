//! The token data model — inputs the engine reads and records it produces.
//!
//! Inputs (`ColorData`, `Theme`, `HarmoniesState`) come from upstream
//! collaborators and are never mutated here. Outputs (`BackgroundTheme`)
//! are recomputed whole for every `(group, mode)` cell.
//!
//! Everything (de)serializes with camelCase keys so request documents and
//! host messages share the host's JSON vocabulary.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use swatch_color::{AA_TEXT_CONTRAST, AAA_TEXT_CONTRAST, Color};

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// An accessibility mode: light/dark polarity plus a text-contrast tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Mode {
    #[serde(rename = "AA-light")]
    AaLight,
    #[serde(rename = "AA-dark")]
    AaDark,
    #[serde(rename = "AAA-light")]
    AaaLight,
    #[serde(rename = "AAA-dark")]
    AaaDark,
}

impl Mode {
    /// The literal mode name used on the wire.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AaLight => "AA-light",
            Self::AaDark => "AA-dark",
            Self::AaaLight => "AAA-light",
            Self::AaaDark => "AAA-dark",
        }
    }

    /// Parse a mode from its wire name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().find(|m| m.name() == name).copied()
    }

    /// All modes, in processing order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::AaLight, Self::AaDark, Self::AaaLight, Self::AaaDark]
    }

    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::AaDark | Self::AaaDark)
    }

    /// Minimum contrast for body text in this mode.
    #[must_use]
    pub const fn text_contrast(self) -> f64 {
        match self {
            Self::AaLight | Self::AaDark => AA_TEXT_CONTRAST,
            Self::AaaLight | Self::AaaDark => AAA_TEXT_CONTRAST,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Ramps
// ---------------------------------------------------------------------------

/// One rung of a shade ramp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorShade {
    pub hex: Color,
    #[serde(default)]
    pub contrast_ratio: f64,
    #[serde(default)]
    pub text_color: Color,
}

impl ColorShade {
    #[must_use]
    pub const fn new(hex: Color) -> Self {
        Self {
            hex,
            contrast_ratio: 1.0,
            text_color: Color::BLACK,
        }
    }
}

/// The shade ramp for a single mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeShades {
    pub all_shades: Vec<ColorShade>,
}

/// A brand or semantic color with its per-mode shade ramps.
///
/// Ramps normally hold 10 rungs with index 0 the lightest. `shade_index`
/// is the rung the base color was found at; values past 9 mark neutrals
/// that are not on any brand ramp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorData {
    pub id: String,
    pub name: String,
    pub base_hex: Color,
    pub shade_index: usize,
    #[serde(default)]
    pub all_modes: BTreeMap<Mode, ModeShades>,
}

impl ColorData {
    /// A color with no ramps.
    #[must_use]
    pub fn solid(id: &str, name: &str, base_hex: Color, shade_index: usize) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            base_hex,
            shade_index,
            all_modes: BTreeMap::new(),
        }
    }

    /// The ramp for `mode`, or an empty slice when none was supplied.
    #[must_use]
    pub fn shades(&self, mode: Mode) -> &[ColorShade] {
        self.all_modes
            .get(&mode)
            .map(|m| m.all_shades.as_slice())
            .unwrap_or_default()
    }

    /// The hex of rung `index` in `mode`, if present.
    #[must_use]
    pub fn shade(&self, mode: Mode, index: usize) -> Option<Color> {
        self.shades(mode).get(index).map(|s| s.hex)
    }
}

// ---------------------------------------------------------------------------
// Styles and levels
// ---------------------------------------------------------------------------

/// The seven surface styles, in two families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SurfaceStyle {
    LightTonal,
    DarkTonal,
    ColorfulTonal,
    LightProfessional,
    GreyProfessional,
    DarkProfessional,
    ColorfulProfessional,
}

impl SurfaceStyle {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LightTonal => "light-tonal",
            Self::DarkTonal => "dark-tonal",
            Self::ColorfulTonal => "colorful-tonal",
            Self::LightProfessional => "light-professional",
            Self::GreyProfessional => "grey-professional",
            Self::DarkProfessional => "dark-professional",
            Self::ColorfulProfessional => "colorful-professional",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().find(|s| s.name() == name).copied()
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::LightTonal, Self::DarkTonal, Self::ColorfulTonal,
            Self::LightProfessional, Self::GreyProfessional,
            Self::DarkProfessional, Self::ColorfulProfessional,
        ]
    }

    /// Tonal styles derive most surfaces from the brand hue.
    #[must_use]
    pub const fn is_tonal(self) -> bool {
        matches!(self, Self::LightTonal | Self::DarkTonal | Self::ColorfulTonal)
    }
}

impl fmt::Display for SurfaceStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the eight synthesized background levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Surface,
    SurfaceDim,
    SurfaceBright,
    Container,
    ContainerLow,
    ContainerLowest,
    ContainerHigh,
    ContainerHighest,
}

impl Level {
    pub const ALL: [Self; 8] = [
        Self::Surface, Self::SurfaceDim, Self::SurfaceBright,
        Self::Container, Self::ContainerLow, Self::ContainerLowest,
        Self::ContainerHigh, Self::ContainerHighest,
    ];

    /// The three surface levels.
    pub const SURFACES: [Self; 3] = [Self::Surface, Self::SurfaceDim, Self::SurfaceBright];

    /// The five container levels.
    pub const CONTAINERS: [Self; 5] = [
        Self::Container, Self::ContainerLow, Self::ContainerLowest,
        Self::ContainerHigh, Self::ContainerHighest,
    ];

    /// Token name of this level (`Surface-Dim`, `Container-Highest`, ...).
    #[must_use]
    pub const fn token_name(self) -> &'static str {
        match self {
            Self::Surface => "Surface",
            Self::SurfaceDim => "Surface-Dim",
            Self::SurfaceBright => "Surface-Bright",
            Self::Container => "Container",
            Self::ContainerLow => "Container-Low",
            Self::ContainerLowest => "Container-Lowest",
            Self::ContainerHigh => "Container-High",
            Self::ContainerHighest => "Container-Highest",
        }
    }

    #[must_use]
    pub fn from_token_name(name: &str) -> Option<Self> {
        Self::ALL.iter().find(|l| l.token_name() == name).copied()
    }
}

/// The eight background levels of a style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleColors {
    pub surface: Color,
    pub surface_dim: Color,
    pub surface_bright: Color,
    pub container: Color,
    pub container_low: Color,
    pub container_lowest: Color,
    pub container_high: Color,
    pub container_highest: Color,
}

impl StyleColors {
    /// Build levels by evaluating `f` for each level.
    pub fn from_fn(mut f: impl FnMut(Level) -> Color) -> Self {
        Self {
            surface: f(Level::Surface),
            surface_dim: f(Level::SurfaceDim),
            surface_bright: f(Level::SurfaceBright),
            container: f(Level::Container),
            container_low: f(Level::ContainerLow),
            container_lowest: f(Level::ContainerLowest),
            container_high: f(Level::ContainerHigh),
            container_highest: f(Level::ContainerHighest),
        }
    }

    #[must_use]
    pub const fn get(&self, level: Level) -> Color {
        match level {
            Level::Surface => self.surface,
            Level::SurfaceDim => self.surface_dim,
            Level::SurfaceBright => self.surface_bright,
            Level::Container => self.container,
            Level::ContainerLow => self.container_low,
            Level::ContainerLowest => self.container_lowest,
            Level::ContainerHigh => self.container_high,
            Level::ContainerHighest => self.container_highest,
        }
    }

    /// `[surface, surfaceDim, surfaceBright]`.
    #[must_use]
    pub const fn surfaces(&self) -> [Color; 3] {
        [self.surface, self.surface_dim, self.surface_bright]
    }

    /// `[container, containerLow, containerLowest, containerHigh, containerHighest]`.
    #[must_use]
    pub const fn containers(&self) -> [Color; 5] {
        [
            self.container,
            self.container_low,
            self.container_lowest,
            self.container_high,
            self.container_highest,
        ]
    }
}

// ---------------------------------------------------------------------------
// States
// ---------------------------------------------------------------------------

/// A brand or semantic state whose color is resolved against backgrounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    Primary,
    Secondary,
    Tertiary,
    Success,
    Warning,
    Error,
    Info,
}

impl State {
    pub const ALL: [Self; 7] = [
        Self::Primary, Self::Secondary, Self::Tertiary,
        Self::Success, Self::Warning, Self::Error, Self::Info,
    ];

    /// Lowercase name, as used for catalog lookups.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Tertiary => "tertiary",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Info => "info",
        }
    }

    /// Capitalized name, as used in token names.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Primary => "Primary",
            Self::Secondary => "Secondary",
            Self::Tertiary => "Tertiary",
            Self::Success => "Success",
            Self::Warning => "Warning",
            Self::Error => "Error",
            Self::Info => "Info",
        }
    }

    /// Brand states come from the theme; the rest from the state catalog.
    #[must_use]
    pub const fn is_brand(self) -> bool {
        matches!(self, Self::Primary | Self::Secondary | Self::Tertiary)
    }
}

// ---------------------------------------------------------------------------
// Theme and harmonies
// ---------------------------------------------------------------------------

/// A theme slot: either a bare hex or a fully resolved color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeColor {
    Hex(Color),
    Resolved(Box<ColorData>),
}

impl ThemeColor {
    /// The slot's base hex, whichever form it takes.
    #[must_use]
    pub fn base_hex(&self) -> Color {
        match self {
            Self::Hex(c) => *c,
            Self::Resolved(data) => data.base_hex,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub primary: ThemeColor,
    pub secondary: ThemeColor,
    pub tertiary: ThemeColor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub colors: ThemeColors,
}

impl Theme {
    /// The slot for a brand state; `None` for semantic states.
    #[must_use]
    pub const fn slot(&self, state: State) -> Option<&ThemeColor> {
        match state {
            State::Primary => Some(&self.colors.primary),
            State::Secondary => Some(&self.colors.secondary),
            State::Tertiary => Some(&self.colors.tertiary),
            _ => None,
        }
    }
}

/// A primary/secondary/tertiary triple produced by harmony generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarmonyTriple {
    pub primary: ColorData,
    pub secondary: ColorData,
    pub tertiary: ColorData,
}

impl HarmonyTriple {
    pub fn iter(&self) -> impl Iterator<Item = &ColorData> {
        [&self.primary, &self.secondary, &self.tertiary].into_iter()
    }
}

/// Harmony type name → triple.
pub type HarmoniesState = BTreeMap<String, HarmonyTriple>;

/// How hyperlinks are colored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HyperlinkStyle {
    /// A fixed link blue when it is readable, black/white otherwise.
    Blue,
    /// A shade from the group's own ramp.
    #[default]
    Brand,
}

// ---------------------------------------------------------------------------
// BackgroundTheme
// ---------------------------------------------------------------------------

/// One resolved icon color per state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateIcons {
    pub primary: Color,
    pub secondary: Color,
    pub tertiary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
}

impl StateIcons {
    pub fn from_fn(mut f: impl FnMut(State) -> Color) -> Self {
        Self {
            primary: f(State::Primary),
            secondary: f(State::Secondary),
            tertiary: f(State::Tertiary),
            success: f(State::Success),
            warning: f(State::Warning),
            error: f(State::Error),
            info: f(State::Info),
        }
    }

    #[must_use]
    pub const fn get(&self, state: State) -> Color {
        match state {
            State::Primary => self.primary,
            State::Secondary => self.secondary,
            State::Tertiary => self.tertiary,
            State::Success => self.success,
            State::Warning => self.warning,
            State::Error => self.error,
            State::Info => self.info,
        }
    }
}

/// Foreground tokens derived for one background set (surfaces or containers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceTokens {
    pub on_color: Color,
    pub on_color_quiet: Color,
    pub border: Color,
    pub button: Color,
    pub button_text: Color,
    pub button_half: Color,
    pub button_half_text: Color,
    pub icon_background: Color,
    pub icons: StateIcons,
    pub hotlink: Color,
    pub hotlink_invert: bool,
}

impl SurfaceTokens {
    fn write_tokens(&self, prefix: &str, out: &mut BTreeMap<String, String>) {
        let mut put = |name: String, color: Color| {
            out.insert(name, color.to_hex());
        };
        put(format!("On-{prefix}"), self.on_color);
        put(format!("On-{prefix}-Quiet"), self.on_color_quiet);
        put(format!("{prefix}-Border"), self.border);
        put(format!("{prefix}-Button"), self.button);
        put(format!("{prefix}-Button-Text"), self.button_text);
        put(format!("{prefix}-Button-Half"), self.button_half);
        put(format!("{prefix}-Button-Half-Text"), self.button_half_text);
        put(format!("{prefix}-Icon-Background"), self.icon_background);
        for state in State::ALL {
            put(format!("{prefix}-Icon-{}", state.title()), self.icons.get(state));
        }
        put(format!("{prefix}-Hotlink"), self.hotlink);
    }
}

/// The complete token bundle for one `(group, mode)` cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundTheme {
    pub id: String,
    pub name: String,
    pub base_hex: Color,
    pub style: SurfaceStyle,
    pub mode: Mode,
    pub levels: StyleColors,
    pub quiet: StyleColors,
    pub surfaces: SurfaceTokens,
    pub containers: SurfaceTokens,
}

impl BackgroundTheme {
    /// Flatten into token name → hex value, ordered by name.
    #[must_use]
    pub fn tokens(&self) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();
        for level in Level::ALL {
            out.insert(level.token_name().to_owned(), self.levels.get(level).to_hex());
            out.insert(format!("{}-Quiet", level.token_name()), self.quiet.get(level).to_hex());
        }
        self.surfaces.write_tokens("Surface", &mut out);
        self.containers.write_tokens("Container", &mut out);
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
