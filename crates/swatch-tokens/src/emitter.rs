//! Token emitter — the single path token writes take to the host.
//!
//! Each write is validated, checked against the [`TokenRegistry`], and only
//! then turned into a [`HostMessage::UpdateToken`]. Side-effect messages
//! bypass the registry: they are commands, not values.

use crate::boundary::{HostMessage, HostSink, TokenUpdate, is_valid_token_value};
use crate::model::{BackgroundTheme, Mode};
use crate::registry::TokenRegistry;

/// What happened to one token write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emit {
    /// The value changed and was sent.
    Sent,
    /// The host already has this value.
    Unchanged,
    /// The value is not a hex color and was dropped.
    Dropped,
}

/// Running totals for an emitter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitStats {
    pub sent: usize,
    pub unchanged: usize,
    pub dropped: usize,
}

/// Validating, deduplicating writer of token values.
#[derive(Debug)]
pub struct TokenEmitter<S> {
    sink: S,
    registry: TokenRegistry,
    stats: EmitStats,
}

impl<S: HostSink> TokenEmitter<S> {
    pub const fn new(sink: S) -> Self {
        Self {
            sink,
            registry: TokenRegistry::new(),
            stats: EmitStats {
                sent: 0,
                unchanged: 0,
                dropped: 0,
            },
        }
    }

    /// Write one token.
    pub fn emit(&mut self, group: &str, mode: Mode, variable: &str, value: &str) -> Emit {
        if !is_valid_token_value(value) {
            tracing::warn!(group, %mode, variable, value, "dropping invalid token value");
            self.stats.dropped += 1;
            return Emit::Dropped;
        }
        if !self.registry.record(group, mode, variable, value) {
            self.stats.unchanged += 1;
            return Emit::Unchanged;
        }
        self.sink
            .send(HostMessage::UpdateToken(TokenUpdate::new(group, mode, variable, value)));
        self.stats.sent += 1;
        Emit::Sent
    }

    /// Write every token of a computed theme. Returns how many were sent.
    pub fn emit_theme(&mut self, group: &str, theme: &BackgroundTheme) -> usize {
        theme
            .tokens()
            .iter()
            .filter(|(name, value)| self.emit(group, theme.mode, name, value) == Emit::Sent)
            .count()
    }

    /// Send a side-effect message as is.
    pub fn notify(&mut self, message: HostMessage) {
        self.sink.send(message);
    }

    #[must_use]
    pub const fn stats(&self) -> EmitStats {
        self.stats
    }

    #[must_use]
    pub const fn registry(&self) -> &TokenRegistry {
        &self.registry
    }

    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    pub const fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
