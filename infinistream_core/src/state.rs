//! The widget's only mutable state: the `(mode, turbidity)` pair.
//!
//! One `StateWriter` exists per widget and it is the only handle that can
//! replace the pair; it is not `Clone`. Any number of `StateReader`s may take
//! snapshots. The pair sits behind a single lock and is swapped whole, so a
//! reader never sees a mode from one update with the turbidity of another.

use crate::mode::ReportedMode;
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock};

/// Current mode and turbidity. Also the payload of the display notification.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct WidgetState {
    pub mode: ReportedMode,
    /// NTU, `>= 0`.
    pub turbidity: f64,
}

impl WidgetState {
    pub fn new(mode: impl Into<ReportedMode>, turbidity: f64) -> Self {
        Self {
            mode: mode.into(),
            turbidity,
        }
    }
}

/// Creates the pair at its start-up value `(CONNECTING, 0)`.
pub fn new_state() -> (StateWriter, StateReader) {
    let inner = Arc::new(RwLock::new(WidgetState::default()));
    (
        StateWriter {
            inner: inner.clone(),
        },
        StateReader { inner },
    )
}

pub struct StateWriter {
    inner: Arc<RwLock<WidgetState>>,
}

impl StateWriter {
    /// Swap in `next`, returning the previous pair.
    pub fn replace(&mut self, next: WidgetState) -> WidgetState {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }

    pub fn snapshot(&self) -> WidgetState {
        read(&self.inner)
    }

    pub fn reader(&self) -> StateReader {
        StateReader {
            inner: self.inner.clone(),
        }
    }
}

#[derive(Clone)]
pub struct StateReader {
    inner: Arc<RwLock<WidgetState>>,
}

impl StateReader {
    pub fn snapshot(&self) -> WidgetState {
        read(&self.inner)
    }
}

// A panicking writer cannot leave a half-written pair (the swap is one move),
// so a poisoned lock still holds a consistent value.
fn read(lock: &RwLock<WidgetState>) -> WidgetState {
    lock.read().unwrap_or_else(PoisonError::into_inner).clone()
}
