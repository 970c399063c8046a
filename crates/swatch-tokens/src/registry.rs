//! Token registry — the last value sent for every token.
//!
//! The host only needs to hear about a token when its value changes.
//! Every write goes through [`TokenRegistry::record`], which reports whether
//! the value is new so the emitter can skip redundant messages.
//!
//! Keys are `(group, mode, variable)`. A re-run that recomputes an identical
//! bundle therefore sends nothing; a re-run that changes one color sends
//! exactly the tokens that moved.

use std::collections::BTreeMap;

use crate::model::Mode;

/// Identity of one token slot on the host.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenKey {
    pub group: String,
    pub mode: Mode,
    pub variable: String,
}

impl TokenKey {
    #[must_use]
    pub fn new(group: &str, mode: Mode, variable: &str) -> Self {
        Self {
            group: group.to_owned(),
            mode,
            variable: variable.to_owned(),
        }
    }
}

/// Deduplicating cache of emitted token values.
#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    values: BTreeMap<TokenKey, String>,
}

impl TokenRegistry {
    /// Create an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Store `value` for the slot, replacing any previous value.
    ///
    /// Returns `true` when the slot was empty or held a different value,
    /// i.e. when the write must reach the host.
    pub fn record(&mut self, group: &str, mode: Mode, variable: &str, value: &str) -> bool {
        let key = TokenKey::new(group, mode, variable);
        match self.values.get_mut(&key) {
            Some(existing) if existing == value => false,
            Some(existing) => {
                value.clone_into(existing);
                true
            }
            None => {
                self.values.insert(key, value.to_owned());
                true
            }
        }
    }

    /// The last recorded value for a slot.
    #[must_use]
    pub fn get(&self, group: &str, mode: Mode, variable: &str) -> Option<&str> {
        self.values
            .get(&TokenKey::new(group, mode, variable))
            .map(String::as_str)
    }

    /// Forget every slot of `group`, so its next writes are all re-sent.
    pub fn forget_group(&mut self, group: &str) {
        self.values.retain(|key, _| key.group != group);
    }

    /// Number of recorded slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
