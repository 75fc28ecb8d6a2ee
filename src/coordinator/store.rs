//! Shared Reading Store
//!
//! The coordinator's single source of truth. The inbound update handler is
//! the only writer of the readings, the message evaluator the only writer
//! of the alert text; display, status endpoint and both evaluators read it.
//!
//! Every access is a copy-in or copy-out under a short-lived lock. The lock
//! is never held across an await point or network I/O, so timer callbacks
//! may read it without suspending.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use time::OffsetDateTime;

use crate::models::{Reading, StoreSnapshot};

#[derive(Debug)]
struct StoreState {
    temperature: f32,
    distance: f32,
    alert_message: String,
    updated_at: Option<OffsetDateTime>,
}

/// Cloneable handle to the shared state
#[derive(Debug, Clone)]
pub struct ReadingStore {
    inner: Arc<Mutex<StoreState>>,
}

impl ReadingStore {
    /// Empty store; both readings start at zero, below every alert threshold
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(StoreState {
                temperature: 0.0,
                distance: 0.0,
                alert_message: String::new(),
                updated_at: None,
            })),
        }
    }

    // The state is plain values with no cross-field invariant a panicking
    // holder could break, so a poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Overwrite both readings in one step
    pub fn update(&self, reading: Reading) {
        let mut state = self.lock();
        state.temperature = reading.temperature;
        state.distance = reading.distance;
        state.updated_at = Some(OffsetDateTime::now_utc());
    }

    /// Both readings as one consistent pair
    pub fn reading(&self) -> Reading {
        let state = self.lock();
        Reading {
            temperature: state.temperature,
            distance: state.distance,
        }
    }

    /// Replace the alert text, returning whether it changed
    pub fn set_alert_message(&self, message: &str) -> bool {
        let mut state = self.lock();
        if state.alert_message == message {
            return false;
        }
        state.alert_message.clear();
        state.alert_message.push_str(message);
        true
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        let state = self.lock();
        StoreSnapshot {
            temperature: state.temperature,
            distance: state.distance,
            alert_message: state.alert_message.clone(),
            updated_at: state.updated_at,
        }
    }
}

impl Default for ReadingStore {
    fn default() -> Self {
        Self::new()
    }
}
