//! Style recipes — the data that tells the seven styles apart.
//!
//! Every style runs the same processor. What differs is captured here:
//! where each of the eight background levels comes from, how text is
//! chosen, and whether icons sit on a colored chip.
//!
//! Levels are built from a small vocabulary: a neutral anchor, an anchor
//! tinted toward the base color, the base itself, or the base stepped in
//! OKLCH lightness.

use swatch_color::Color;
use swatch_tokens::{ColorShade, Level, Mode, StyleColors, SurfaceStyle};

use crate::text::TextStrategy;

/// A neutral starting point for a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// White in light modes, near-black in dark modes.
    Paper,
    /// Light grey in light modes, dark grey in dark modes.
    Mist,
    /// Near-black in every mode.
    Night,
    /// Pure black in every mode.
    Ink,
}

const NIGHT: Color = Color::rgb8(0x12, 0x12, 0x12);

impl Anchor {
    #[must_use]
    pub const fn color(self, mode: Mode) -> Color {
        match (self, mode.is_dark()) {
            (Self::Paper, false) => Color::WHITE,
            (Self::Paper | Self::Night, _) => NIGHT,
            (Self::Mist, false) => Color::rgb8(0xF2, 0xF2, 0xF2),
            (Self::Mist, true) => Color::rgb8(0x1E, 0x1E, 0x1E),
            (Self::Ink, _) => Color::BLACK,
        }
    }
}

/// Where one level's color comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LevelSource {
    Neutral(Anchor),
    /// The anchor mixed toward the base by the given fraction.
    Tint(Anchor, f32),
    Base,
    Lighten(f32),
    Darken(f32),
}

impl LevelSource {
    #[must_use]
    pub fn resolve(self, base: Color, mode: Mode) -> Color {
        match self {
            Self::Neutral(anchor) => anchor.color(mode),
            Self::Tint(anchor, ratio) => anchor.color(mode).mix(base, ratio),
            Self::Base => base,
            Self::Lighten(amount) => base.lighten(amount),
            Self::Darken(amount) => base.darken(amount),
        }
    }
}

/// Sources for the three surface and five container levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelPlan {
    /// `[surface, surfaceDim, surfaceBright]`.
    pub surfaces: [LevelSource; 3],
    /// `[container, containerLow, containerLowest, containerHigh, containerHighest]`.
    pub containers: [LevelSource; 5],
}

impl LevelPlan {
    #[must_use]
    pub const fn source(&self, level: Level) -> LevelSource {
        match level {
            Level::Surface => self.surfaces[0],
            Level::SurfaceDim => self.surfaces[1],
            Level::SurfaceBright => self.surfaces[2],
            Level::Container => self.containers[0],
            Level::ContainerLow => self.containers[1],
            Level::ContainerLowest => self.containers[2],
            Level::ContainerHigh => self.containers[3],
            Level::ContainerHighest => self.containers[4],
        }
    }
}

/// How the icon chip behind state icons is colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconBackgroundRule {
    Transparent,
    /// A rung from the far end of the brand ramp.
    BrandRamp,
}

/// Icon chip colors for the two background sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconBackgrounds {
    pub surfaces: Color,
    pub containers: Color,
}

impl IconBackgroundRule {
    /// Chip colors for a base found at `shade_index` on `shades`.
    ///
    /// Brand chips contrast with the base: a light base gets deep rungs
    /// (8 for surfaces, 7 for containers), a dark base pale ones (0 and 1).
    #[must_use]
    pub fn resolve(self, shades: &[ColorShade], shade_index: usize) -> IconBackgrounds {
        let rung = |i: usize| shades.get(i).map_or(Color::TRANSPARENT, |s| s.hex);
        match (self, shade_index) {
            (Self::BrandRamp, 0..=4) => IconBackgrounds {
                surfaces: rung(8),
                containers: rung(7),
            },
            (Self::BrandRamp, 5..=9) => IconBackgrounds {
                surfaces: rung(0),
                containers: rung(1),
            },
            _ => IconBackgrounds {
                surfaces: Color::TRANSPARENT,
                containers: Color::TRANSPARENT,
            },
        }
    }
}

/// Everything that distinguishes one surface style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleRecipe {
    pub style: SurfaceStyle,
    pub levels: LevelPlan,
    pub text: TextStrategy,
    pub icon_background: IconBackgroundRule,
}

impl StyleRecipe {
    /// The eight levels for `base` in `mode`.
    #[must_use]
    pub fn levels(&self, base: Color, mode: Mode) -> StyleColors {
        StyleColors::from_fn(|level| self.levels.source(level).resolve(base, mode))
    }

    /// The recipe for `style`.
    #[must_use]
    pub const fn for_style(style: SurfaceStyle) -> &'static Self {
        match style {
            SurfaceStyle::LightTonal => &LIGHT_TONAL,
            SurfaceStyle::DarkTonal => &DARK_TONAL,
            SurfaceStyle::ColorfulTonal => &COLORFUL_TONAL,
            SurfaceStyle::LightProfessional => &LIGHT_PROFESSIONAL,
            SurfaceStyle::GreyProfessional => &GREY_PROFESSIONAL,
            SurfaceStyle::DarkProfessional => &DARK_PROFESSIONAL,
            SurfaceStyle::ColorfulProfessional => &COLORFUL_PROFESSIONAL,
        }
    }
}

// ---------------------------------------------------------------------------
// The seven recipes
// ---------------------------------------------------------------------------

use Anchor::{Ink, Mist, Night, Paper};
use LevelSource::{Base, Darken, Lighten, Neutral, Tint};

pub const LIGHT_TONAL: StyleRecipe = StyleRecipe {
    style: SurfaceStyle::LightTonal,
    levels: LevelPlan {
        surfaces: [Tint(Paper, 0.06), Tint(Paper, 0.10), Tint(Paper, 0.03)],
        containers: [
            Tint(Paper, 0.10), Tint(Paper, 0.08), Tint(Paper, 0.04),
            Tint(Paper, 0.14), Tint(Paper, 0.18),
        ],
    },
    text: TextStrategy::LightTonal,
    icon_background: IconBackgroundRule::Transparent,
};

pub const DARK_TONAL: StyleRecipe = StyleRecipe {
    style: SurfaceStyle::DarkTonal,
    levels: LevelPlan {
        surfaces: [Tint(Night, 0.22), Tint(Night, 0.16), Tint(Night, 0.28)],
        containers: [
            Tint(Night, 0.30), Tint(Night, 0.26), Tint(Night, 0.24),
            Tint(Night, 0.36), Tint(Night, 0.42),
        ],
    },
    text: TextStrategy::DarkTonal,
    icon_background: IconBackgroundRule::Transparent,
};

pub const COLORFUL_TONAL: StyleRecipe = StyleRecipe {
    style: SurfaceStyle::ColorfulTonal,
    levels: LevelPlan {
        surfaces: [Base, Darken(0.05), Lighten(0.05)],
        containers: [
            Lighten(0.04), Lighten(0.02), Lighten(0.01),
            Lighten(0.06), Lighten(0.08),
        ],
    },
    text: TextStrategy::ColorfulTonal,
    icon_background: IconBackgroundRule::BrandRamp,
};

pub const LIGHT_PROFESSIONAL: StyleRecipe = StyleRecipe {
    style: SurfaceStyle::LightProfessional,
    levels: LevelPlan {
        surfaces: [Neutral(Paper), Tint(Paper, 0.03), Neutral(Paper)],
        containers: [
            Tint(Paper, 0.05), Tint(Paper, 0.04), Tint(Paper, 0.02),
            Tint(Paper, 0.07), Tint(Paper, 0.09),
        ],
    },
    text: TextStrategy::Professional,
    icon_background: IconBackgroundRule::Transparent,
};

pub const GREY_PROFESSIONAL: StyleRecipe = StyleRecipe {
    style: SurfaceStyle::GreyProfessional,
    levels: LevelPlan {
        surfaces: [Neutral(Mist), Tint(Mist, 0.04), Neutral(Paper)],
        containers: [
            Neutral(Paper), Tint(Paper, 0.02), Tint(Paper, 0.01),
            Tint(Paper, 0.04), Tint(Paper, 0.06),
        ],
    },
    text: TextStrategy::Professional,
    icon_background: IconBackgroundRule::Transparent,
};

pub const DARK_PROFESSIONAL: StyleRecipe = StyleRecipe {
    style: SurfaceStyle::DarkProfessional,
    levels: LevelPlan {
        surfaces: [Neutral(Night), Tint(Ink, 0.05), Tint(Night, 0.04)],
        containers: [
            Tint(Night, 0.10), Tint(Night, 0.08), Tint(Night, 0.06),
            Tint(Night, 0.13), Tint(Night, 0.16),
        ],
    },
    text: TextStrategy::Professional,
    icon_background: IconBackgroundRule::Transparent,
};

pub const COLORFUL_PROFESSIONAL: StyleRecipe = StyleRecipe {
    style: SurfaceStyle::ColorfulProfessional,
    levels: LevelPlan {
        surfaces: [Base, Darken(0.05), Lighten(0.05)],
        containers: [
            Neutral(Paper), Tint(Paper, 0.03), Tint(Paper, 0.01),
            Tint(Paper, 0.05), Tint(Paper, 0.07),
        ],
    },
    text: TextStrategy::Professional,
    icon_background: IconBackgroundRule::Transparent,
};

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
