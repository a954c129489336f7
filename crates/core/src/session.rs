//! Session state store
//!
//! Per-user selection between "category chosen" and "photo submitted".
//! Process-lifetime only; nothing survives a restart. Backed by a sharded
//! concurrent map so updates for one user can never lose a race against
//! updates for another, and read-modify-write on a single key is atomic
//! within a shard.

use dashmap::DashMap;

use crate::dialogue::SessionEffect;
use crate::selection::SelectionKey;

/// In-memory user id -> selection mapping
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: DashMap<i64, SelectionKey>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores (or replaces) the selection for a user.
    pub fn set(&self, user: i64, key: SelectionKey) {
        self.inner.insert(user, key);
    }

    /// Current selection, if any. Never creates an entry.
    pub fn get(&self, user: i64) -> Option<SelectionKey> {
        self.inner.get(&user).map(|entry| *entry)
    }

    /// Removes the selection for a user, if present.
    pub fn clear(&self, user: i64) {
        self.inner.remove(&user);
    }

    /// Applies a state-machine transition's effect to this store.
    pub fn apply(&self, user: i64, effect: SessionEffect) {
        match effect {
            SessionEffect::Keep => {}
            SessionEffect::Store(key) => self.set(user, key),
            SessionEffect::Clear => self.clear(user),
        }
    }

    /// Number of users with a pending selection.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
