//! Defines an abstraction over how the UI learns about state changes.

use super::state::FilterState;

/// Receives a snapshot of the filter state after every applied transition.
///
/// This is "fire-and-forget" and doesn't return a result, simplifying its use.
pub trait StateObserver {
    fn state_changed(&self, state: &FilterState);
}

/// Any closure over the new state can serve as an observer.
impl<F> StateObserver for F
where
    F: Fn(&FilterState),
{
    fn state_changed(&self, state: &FilterState) {
        self(state)
    }
}
