//! Per-record request tracking for row-level actions.
//!
//! DESIGN
//! ======
//! Tables dispatch independent mutations per row (approve, upload, delete).
//! Each id carries its own `RequestState` so one row's failure or pending
//! call never disables another row's controls.

#[cfg(test)]
#[path = "inflight_test.rs"]
mod inflight_test;

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    Failed(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InFlight<K: Eq + Hash> {
    states: HashMap<K, RequestState>,
}

impl<K: Eq + Hash> Default for InFlight<K> {
    fn default() -> Self {
        Self { states: HashMap::new() }
    }
}

impl<K: Eq + Hash + Clone> InFlight<K> {
    pub fn state(&self, key: &K) -> RequestState {
        self.states.get(key).cloned().unwrap_or_default()
    }

    pub fn is_pending(&self, key: &K) -> bool {
        matches!(self.states.get(key), Some(RequestState::Pending))
    }

    /// Mark `key` pending. Returns `false` if it already was, so callers can
    /// skip a duplicate dispatch.
    pub fn begin(&mut self, key: K) -> bool {
        if self.is_pending(&key) {
            return false;
        }
        self.states.insert(key, RequestState::Pending);
        true
    }

    pub fn succeed(&mut self, key: &K) {
        self.states.remove(key);
    }

    pub fn fail(&mut self, key: K, message: impl Into<String>) {
        self.states.insert(key, RequestState::Failed(message.into()));
    }

    pub fn error(&self, key: &K) -> Option<&str> {
        match self.states.get(key) {
            Some(RequestState::Failed(msg)) => Some(msg),
            _ => None,
        }
    }
}
