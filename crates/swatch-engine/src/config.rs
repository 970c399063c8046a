//! Contrast thresholds the engine enforces.
//!
//! The defaults are the WCAG tiers the design system ships with. A request
//! may override any subset; missing keys keep their default.

use serde::{Deserialize, Serialize};
use swatch_color::{AA_TEXT_CONTRAST, AAA_TEXT_CONTRAST, DECORATIVE_CONTRAST};
use swatch_tokens::Mode;

pub use swatch_tokens::BoundaryConfig;

/// Minimum `quiet` level contrast against its own level.
pub const QUIET_LEVEL_CONTRAST: f64 = 1.15;

/// Minimum hyperlink contrast against every surface.
pub const HOTLINK_CONTRAST: f64 = 4.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContrastPolicy {
    /// Body text in AA modes.
    pub aa_text: f64,
    /// Body text in AAA modes.
    pub aaa_text: f64,
    /// Icons, borders, buttons.
    pub decorative: f64,
    /// Quiet level variants.
    pub quiet_level: f64,
    pub hotlink: f64,
}

impl ContrastPolicy {
    /// Body text threshold for `mode`.
    #[must_use]
    pub const fn text(&self, mode: Mode) -> f64 {
        match mode {
            Mode::AaLight | Mode::AaDark => self.aa_text,
            Mode::AaaLight | Mode::AaaDark => self.aaa_text,
        }
    }
}

impl Default for ContrastPolicy {
    fn default() -> Self {
        Self {
            aa_text: AA_TEXT_CONTRAST,
            aaa_text: AAA_TEXT_CONTRAST,
            decorative: DECORATIVE_CONTRAST,
            quiet_level: QUIET_LEVEL_CONTRAST,
            hotlink: HOTLINK_CONTRAST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_mode_tiers() {
        let policy = ContrastPolicy::default();
        for &mode in Mode::all() {
            assert!((policy.text(mode) - mode.text_contrast()).abs() < f64::EPSILON);
        }
        assert!((policy.decorative - 3.1).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let policy: ContrastPolicy = serde_json::from_str(r#"{ "aaText": 5.0 }"#).unwrap();
        assert!((policy.text(Mode::AaDark) - 5.0).abs() < f64::EPSILON);
        assert!((policy.text(Mode::AaaDark) - 7.1).abs() < f64::EPSILON);
        assert!((policy.quiet_level - 1.15).abs() < f64::EPSILON);
    }
}
