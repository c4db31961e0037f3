//! Defines the filter and sort state that drives the workflow catalog listing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::events::FilterAction;
use crate::core::CoreError;

/// Whether a catalog entry has been published or is still a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishStatus {
    Published,
    Draft,
}

impl PublishStatus {
    pub const ALL: [PublishStatus; 2] = [PublishStatus::Published, PublishStatus::Draft];

    pub fn as_str(&self) -> &'static str {
        match self {
            PublishStatus::Published => "published",
            PublishStatus::Draft => "draft",
        }
    }
}

/// The workflow language a catalog entry is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WorkflowType {
    Cwl,
    Wdl,
    Nfl,
    Smk,
}

impl WorkflowType {
    pub const ALL: [WorkflowType; 4] = [
        WorkflowType::Cwl,
        WorkflowType::Wdl,
        WorkflowType::Nfl,
        WorkflowType::Smk,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowType::Cwl => "CWL",
            WorkflowType::Wdl => "WDL",
            WorkflowType::Nfl => "NFL",
            WorkflowType::Smk => "SMK",
        }
    }
}

/// The field the catalog list is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Name,
    #[default]
    Date,
}

impl SortKey {
    pub const ALL: [SortKey; 2] = [SortKey::Name, SortKey::Date];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Date => "date",
        }
    }

    /// The key the cycle signal moves to: `date` goes to `name`, anything else to `date`.
    pub fn cycled(self) -> SortKey {
        match self {
            SortKey::Date => SortKey::Name,
            _ => SortKey::Date,
        }
    }
}

macro_rules! impl_wire_value {
    ($ty:ty, $field:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty>::ALL
                    .into_iter()
                    .find(|value| value.as_str() == s)
                    .ok_or_else(|| CoreError::InvalidToggleValue {
                        field: $field,
                        value: s.to_string(),
                    })
            }
        }
    };
}

impl_wire_value!(PublishStatus, "publishStatus");
impl_wire_value!(WorkflowType, "workflowType");
impl_wire_value!(SortKey, "sortKey");

/// Holds the catalog's filter and sort state.
///
/// There is one instance per application. It is only changed through the
/// transition methods below and has no internal locking: the owning layer
/// serializes calls (see [`crate::app::helpers::with_state_and_notify`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Free-text substring filter on the workflow name.
    name_query: String,
    /// Authors to restrict the listing to.
    author_filter: BTreeSet<String>,
    /// Publish states to show. Empty means show nothing.
    publish_status: BTreeSet<PublishStatus>,
    /// Workflow languages to show. Empty means show nothing.
    workflow_type: BTreeSet<WorkflowType>,
    sort_key: SortKey,
}

impl Default for FilterState {
    /// Everything visible, newest first.
    fn default() -> Self {
        Self {
            name_query: String::new(),
            author_filter: BTreeSet::new(),
            publish_status: PublishStatus::ALL.into_iter().collect(),
            workflow_type: WorkflowType::ALL.into_iter().collect(),
            sort_key: SortKey::default(),
        }
    }
}

impl FilterState {
    pub fn name_query(&self) -> &str {
        &self.name_query
    }

    pub fn author_filter(&self) -> &BTreeSet<String> {
        &self.author_filter
    }

    pub fn publish_status(&self) -> &BTreeSet<PublishStatus> {
        &self.publish_status
    }

    pub fn workflow_type(&self) -> &BTreeSet<WorkflowType> {
        &self.workflow_type
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn set_name_query(&mut self, query: impl Into<String>) {
        self.name_query = query.into();
    }

    pub fn set_author_filter<I, S>(&mut self, authors: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.author_filter = authors.into_iter().map(Into::into).collect();
    }

    pub fn toggle_publish_status(&mut self, status: PublishStatus) {
        toggle(&mut self.publish_status, status);
    }

    pub fn toggle_workflow_type(&mut self, wf_type: WorkflowType) {
        toggle(&mut self.workflow_type, wf_type);
    }

    /// Sets the sort key, or flips it when `None` (the cycle signal) is given.
    pub fn set_sort_key(&mut self, key: Option<SortKey>) {
        self.sort_key = match key {
            Some(key) => key,
            None => self.sort_key.cycled(),
        };
    }

    /// Re-issues the defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Applies one transition in place.
    pub fn apply(&mut self, action: FilterAction) {
        tracing::debug!("Applying filter action: {:?}", action);
        match action {
            FilterAction::SetNameQuery(query) => self.set_name_query(query),
            FilterAction::SetAuthorFilter(authors) => self.set_author_filter(authors),
            FilterAction::TogglePublishStatus(status) => self.toggle_publish_status(status),
            FilterAction::ToggleWorkflowType(wf_type) => self.toggle_workflow_type(wf_type),
            FilterAction::SetSortKey(key) => self.set_sort_key(key),
            FilterAction::Reset => self.reset(),
        }
    }

    /// Returns the state that follows `self` under `action`, leaving `self` untouched.
    pub fn reduce(&self, action: FilterAction) -> FilterState {
        let mut next = self.clone();
        next.apply(action);
        next
    }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if !set.remove(&value) {
        set.insert(value);
    }
}
