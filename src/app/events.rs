//! Defines the message structures passed between the UI and the state owner.

use serde::{Deserialize, Serialize};

use super::state::{PublishStatus, SortKey, WorkflowType};

/// A typed transition of the catalog's [`FilterState`](super::state::FilterState).
///
/// Each variant corresponds to one UI event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAction {
    /// Replace the name query verbatim.
    SetNameQuery(String),
    /// Replace the author filter; duplicates collapse.
    SetAuthorFilter(Vec<String>),
    TogglePublishStatus(PublishStatus),
    ToggleWorkflowType(WorkflowType),
    /// `None` is the cycle signal.
    SetSortKey(Option<SortKey>),
    /// Restore the defaults.
    Reset,
}

/// A message received from the UI.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct IpcMessage {
    /// The name of the command to execute.
    pub command: String,
    /// The payload associated with the command, as a JSON value.
    #[serde(default)]
    pub payload: serde_json::Value,
}
