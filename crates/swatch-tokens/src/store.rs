//! Background theme store — `groupId → Mode → BackgroundTheme`.
//!
//! The store is the session-lifetime output of the engine. It is an
//! explicit object owned by whoever drives the engine; consumers read it
//! through the query methods and hear about writes through
//! [`subscribe`](BackgroundThemeStore::subscribe).
//!
//! Writes replace the whole record for a `(group, mode)` cell. The last
//! write wins, and every write (even one that stores an identical record)
//! notifies subscribers synchronously, in subscription order.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::model::{BackgroundTheme, Mode};

/// Notification delivered to subscribers on every store write.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeChange<'a> {
    pub group_id: &'a str,
    pub mode: Mode,
    pub theme: &'a BackgroundTheme,
}

/// Handle returned by [`BackgroundThemeStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&ThemeChange<'_>)>;

/// Keyed store of computed background themes with change notification.
#[derive(Default)]
pub struct BackgroundThemeStore {
    themes: BTreeMap<String, BTreeMap<Mode, BackgroundTheme>>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl BackgroundThemeStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `theme` for `(group_id, mode)`, returning the record it replaced.
    pub fn set(
        &mut self,
        group_id: &str,
        mode: Mode,
        theme: BackgroundTheme,
    ) -> Option<BackgroundTheme> {
        let modes = self.themes.entry(group_id.to_owned()).or_default();
        let previous = modes.insert(mode, theme);

        if let Some(stored) = modes.get(&mode) {
            let change = ThemeChange {
                group_id,
                mode,
                theme: stored,
            };
            for (_, listener) in &mut self.listeners {
                listener(&change);
            }
        }

        previous
    }

    /// The theme for `(group_id, mode)`, if computed.
    #[must_use]
    pub fn get(&self, group_id: &str, mode: Mode) -> Option<&BackgroundTheme> {
        self.themes.get(group_id)?.get(&mode)
    }

    /// Whether a theme exists for `(group_id, mode)`.
    #[must_use]
    pub fn contains(&self, group_id: &str, mode: Mode) -> bool {
        self.get(group_id, mode).is_some()
    }

    /// Every group with at least one stored mode, in name order.
    pub fn group_ids(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }

    /// The modes stored for `group_id`, in mode order.
    #[must_use]
    pub fn modes_for_group(&self, group_id: &str) -> Vec<Mode> {
        self.themes
            .get(group_id)
            .map(|modes| modes.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Total number of stored `(group, mode)` records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.themes.values().map(BTreeMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Register a listener for store writes.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&ThemeChange<'_>) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }
}

impl fmt::Debug for BackgroundThemeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackgroundThemeStore")
            .field("themes", &self.themes)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
