//! Defines the custom error type for the `core` module.

use thiserror::Error;

/// The primary error type for the crate.
///
/// This enum encapsulates the conditions that can be detected while building
/// a file tree or while turning untyped UI input into filter transitions.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Two nodes of a built tree normalize to the same identifier, or a node
    /// takes the identifier of the root prefix it was built under.
    #[error("Duplicate node identifier: {id:?}")]
    DuplicateIdentifier { id: String },

    /// A string value outside one of the enumerated filter domains.
    #[error("Invalid value {value:?} for {field}")]
    InvalidToggleValue { field: &'static str, value: String },

    /// A UI message that is not a `{command, payload}` JSON object.
    #[error("Malformed IPC message: {0}")]
    InvalidMessage(#[source] serde_json::Error),

    /// An IPC command name that has no corresponding filter action.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// The payload of a known command did not have the expected JSON shape.
    #[error("Invalid payload for command {command}: {source}")]
    InvalidPayload {
        command: String,
        #[source]
        source: serde_json::Error,
    },

    /// The `files` array of a workflow manifest could not be read as file records.
    #[error("Invalid file list in workflow manifest: {0}")]
    InvalidManifest(#[source] serde_json::Error),
}
