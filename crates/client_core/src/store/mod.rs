//! Client-side state container.
//!
//! [`Store`] is shared by `Arc` and injected into the coordinator and each
//! controller. Reads go through selector closures; writes go through
//! [`Store::dispatch`] only. Each dispatch is applied atomically and then
//! broadcast to subscribers in dispatch order.

use std::sync::{PoisonError, RwLock};

use tokio::sync::broadcast;
use tracing::debug;

pub mod action;
pub mod reducer;
pub mod selectors;

pub use action::Action;
pub use reducer::{AppState, AuthState, OffersState};

const STORE_EVENT_CAPACITY: usize = 256;

pub struct Store {
    state: RwLock<AppState>,
    events: broadcast::Sender<Action>,
}

impl Default for Store {
    fn default() -> Self {
        Self::with_state(AppState::default())
    }
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(initial: AppState) -> Self {
        let (events, _) = broadcast::channel(STORE_EVENT_CAPACITY);
        Self {
            state: RwLock::new(initial),
            events,
        }
    }

    pub fn dispatch(&self, action: Action) {
        {
            let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
            let current = std::mem::take(&mut *guard);
            *guard = reducer::reduce(current, &action);
        }
        debug!(kind = action.kind(), "dispatched action");
        let _ = self.events.send(action);
    }

    pub fn select<T>(&self, selector: impl FnOnce(&AppState) -> T) -> T {
        let guard = self.state.read().unwrap_or_else(PoisonError::into_inner);
        selector(&guard)
    }

    pub fn snapshot(&self) -> AppState {
        self.select(AppState::clone)
    }

    /// Receives every action after it has been applied.
    pub fn subscribe(&self) -> broadcast::Receiver<Action> {
        self.events.subscribe()
    }
}

#[cfg(test)]
#[path = "../tests/store_tests.rs"]
mod tests;
