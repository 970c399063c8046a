//! swatch-engine — contrast-driven derivation of design tokens.
//!
//! From a handful of brand colors and their shade ramps, the engine
//! computes a full background theme (surfaces, containers, text, borders,
//! buttons, icons, links) for every design-system group in every
//! accessibility mode, each color checked against the backgrounds it will
//! be painted on.
//!
//! Layers, leaf first:
//!
//! - [`search`]: ramp picks and mix scans
//! - [`text`]: text, button, and hyperlink colors
//! - [`state`]: state names to contrast-safe shades
//! - [`recipe`] + [`processor`]: one `(group, mode)` cell
//! - [`orchestrator`]: the mode × group grid, via [`Engine`]

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod processor;
pub mod recipe;
pub mod search;
pub mod state;
pub mod text;

#[cfg(test)]
mod testing;

pub use config::{BoundaryConfig, ContrastPolicy};
pub use error::EngineError;
pub use orchestrator::{
    CellFailure, Engine, GROUPS, ProcessReport, ProcessTokensParams, VariantIndices,
    get_variant_indices, group_style, processor_for,
};
pub use processor::{StyleContext, compute_theme, process_style};
pub use recipe::StyleRecipe;
pub use state::{ColorSources, ContrastRequest, fallback_color, get_contrasting_shade};
