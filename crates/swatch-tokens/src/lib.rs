//! swatch-tokens — the token data model, background store, and host boundary.
//!
//! The engine computes colors; this crate owns everything about where
//! those colors live afterwards:
//!
//! - [`model`]: inputs (`ColorData`, `Theme`, harmonies) and the
//!   `BackgroundTheme` record produced per `(group, mode)`
//! - [`store`]: the session store of computed themes, with subscriptions
//! - [`registry`] + [`emitter`]: deduplicated token writes
//! - [`boundary`]: host messages, sinks, and the timeout-bounded reader

pub mod boundary;
pub mod emitter;
pub mod model;
pub mod registry;
pub mod store;

use std::time::Duration;

pub use boundary::{
    BoundaryConfig, HostMessage, HostSink, JsonLinesSink, TokenQuery, TokenReader, TokenUpdate,
    ValueResponse, is_valid_token_value,
};
pub use emitter::{Emit, EmitStats, TokenEmitter};
pub use model::{
    BackgroundTheme, ColorData, ColorShade, HarmoniesState, HarmonyTriple, HyperlinkStyle, Level,
    Mode, ModeShades, State, StateIcons, StyleColors, SurfaceStyle, SurfaceTokens, Theme,
    ThemeColor, ThemeColors,
};
pub use registry::TokenRegistry;
pub use store::{BackgroundThemeStore, SubscriptionId, ThemeChange};

/// Errors crossing the host boundary.
#[derive(Debug, thiserror::Error)]
pub enum BoundaryError {
    #[error("no response for {variable} within {waited:?}")]
    Timeout { variable: String, waited: Duration },

    #[error("host channel disconnected")]
    Disconnected,

    #[error("host returned invalid value {value:?} for {variable}")]
    InvalidValue { variable: String, value: String },

    #[error("failed to encode host message: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write host message: {0}")]
    Io(#[from] std::io::Error),
}
