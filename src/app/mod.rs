//! The boundary between a UI host and the crate's state.
//!
//! Raw UI messages come in as JSON strings, are decoded into typed filter
//! transitions, and are applied to the host-owned `FilterState`.

pub mod commands;
pub mod events;
pub mod helpers;
pub mod proxy;
pub mod state;
pub mod view_model;

use std::sync::Mutex;

use crate::core::CoreError;
use events::IpcMessage;
use helpers::with_state_and_notify;
use proxy::StateObserver;
use state::FilterState;

/// Decodes a raw IPC message and applies it to the shared filter state.
///
/// `observer` is notified after every decoded message, with the state left
/// unchanged when the command is rejected.
pub fn handle_ipc_message<O: StateObserver + ?Sized>(
    message: &str,
    state: &Mutex<FilterState>,
    observer: &O,
) -> Result<(), CoreError> {
    let message: IpcMessage = serde_json::from_str(message).map_err(|e| {
        tracing::warn!("Failed to deserialize IPC message: {}", e);
        CoreError::InvalidMessage(e)
    })?;
    tracing::debug!("Handling IPC command: {}", message.command);

    with_state_and_notify(state, observer, |s| commands::dispatch(s, &message))
}
