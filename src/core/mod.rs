pub mod error;
pub mod tree;
pub mod tree_builder;

use serde::{Deserialize, Serialize};

/// Marks the role a file plays in a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Primary,
    Secondary,
}

/// One entry of a workflow's file manifest.
///
/// Field names on the wire follow the TRS file entry (`target`, `type`, `url`),
/// so a manifest's `files` array deserializes straight into `Vec<FileRecord>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Slash-delimited path relative to the workflow root. May be empty.
    #[serde(default)]
    pub target: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<FileKind>,
    #[serde(rename = "url", default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

impl FileRecord {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Default::default()
        }
    }

    pub fn with_kind(mut self, kind: FileKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }
}

pub use error::CoreError;
pub use tree::{directory_ids, find, primary_file, walk, NodeKind, TreeNode};
pub use tree_builder::{BuildDiagnostic, TreeBuild, TreeBuilder};
