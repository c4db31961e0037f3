//! Contains the command handlers that are callable from the UI via IPC.
//!
//! Each command name maps onto one [`FilterAction`]. This is the boundary where
//! untyped strings become the enumerated filter values, so out-of-domain input
//! is rejected here with a typed error.

use serde::de::DeserializeOwned;

use super::events::{FilterAction, IpcMessage};
use super::state::{FilterState, SortKey};
use crate::core::CoreError;

/// Translates an IPC message into a typed filter transition.
///
/// Commands and payloads:
/// - `setNameQuery`: string
/// - `setAuthorFilter`: array of strings
/// - `togglePublishStatus`: `"published"` | `"draft"`
/// - `toggleWorkflowType`: `"CWL"` | `"WDL"` | `"NFL"` | `"SMK"`
/// - `setSortKey`: `"name"` | `"date"`, or `null`/absent to cycle
/// - `reset`: no payload
pub fn parse_action(message: &IpcMessage) -> Result<FilterAction, CoreError> {
    let action = match message.command.as_str() {
        "setNameQuery" => FilterAction::SetNameQuery(payload_as(message)?),
        "setAuthorFilter" => FilterAction::SetAuthorFilter(payload_as(message)?),
        "togglePublishStatus" => {
            FilterAction::TogglePublishStatus(payload_as::<String>(message)?.parse()?)
        }
        "toggleWorkflowType" => {
            FilterAction::ToggleWorkflowType(payload_as::<String>(message)?.parse()?)
        }
        "setSortKey" => {
            let key = payload_as::<Option<String>>(message)?
                .map(|key| key.parse::<SortKey>())
                .transpose()?;
            FilterAction::SetSortKey(key)
        }
        "reset" => FilterAction::Reset,
        other => return Err(CoreError::UnknownCommand(other.to_string())),
    };
    Ok(action)
}

/// Parses the message and applies it to `state`.
///
/// A rejected message leaves `state` unchanged.
pub fn dispatch(state: &mut FilterState, message: &IpcMessage) -> Result<(), CoreError> {
    match parse_action(message) {
        Ok(action) => {
            state.apply(action);
            Ok(())
        }
        Err(e) => {
            tracing::warn!("Rejected filter command {:?}: {}", message.command, e);
            Err(e)
        }
    }
}

fn payload_as<T: DeserializeOwned>(message: &IpcMessage) -> Result<T, CoreError> {
    serde_json::from_value(message.payload.clone()).map_err(|source| CoreError::InvalidPayload {
        command: message.command.clone(),
        source,
    })
}
