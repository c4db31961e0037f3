//! Contains helper functions for hosts that share one `FilterState` across threads.

use std::sync::Mutex;

use super::proxy::StateObserver;
use super::state::FilterState;

/// Locks the shared `FilterState`, performs one mutation, and then hands the
/// resulting state to `observer`.
///
/// The lock is the host's single-writer discipline; `FilterState` itself has
/// no internal locking. A poisoned lock is recovered, since every transition
/// leaves the state valid.
pub fn with_state_and_notify<F, R, O>(state: &Mutex<FilterState>, observer: &O, update_fn: F) -> R
where
    F: FnOnce(&mut FilterState) -> R,
    O: StateObserver + ?Sized,
{
    let mut state_guard = state.lock().unwrap_or_else(|poisoned| {
        tracing::warn!("Filter state lock was poisoned; recovering.");
        poisoned.into_inner()
    });

    let result = update_fn(&mut state_guard);
    observer.state_changed(&state_guard);
    result
}
