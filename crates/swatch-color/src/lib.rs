// SPDX-License-Identifier: MIT
//
// swatch-color — color primitives for the swatch token engine.
//
// Everything downstream speaks hex: ramps arrive as hex strings and tokens
// leave as hex strings. This crate owns the one place where those strings
// become numbers: an sRGB-canonical `Color`, the WCAG luminance/contrast
// math, hue classification, and the perceptual lighten/darken/mix steps the
// search algorithms iterate with. No allocation on the measurement paths.

// Single-char math variables are standard in color science.
#![allow(clippy::many_single_char_names)]
// Hue/lightness/chroma variable names are inherently similar.
#![allow(clippy::similar_names)]

pub mod color;
pub mod contrast;

pub use color::{Color, Oklch};
pub use contrast::{
    AA_TEXT_CONTRAST, AAA_TEXT_CONTRAST, DECORATIVE_CONTRAST, average_contrast,
    average_luminance, best_black_or_white, contrast_ratio, is_dark, is_yellow_or_orange,
    meets_all, min_contrast, relative_luminance,
};

/// Errors produced when turning text into a [`Color`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
}
