//! Responsible for turning a workflow's file manifest into the `FilesView`
//! the tree widget consumes.
//!
//! This module acts as a presentation layer: it builds the file tree and
//! computes the display-related properties that go with it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{AppConfig, DuplicatePolicy};
use crate::core::{
    directory_ids, primary_file, BuildDiagnostic, CoreError, FileRecord, TreeBuilder, TreeNode,
};

/// A serializable bundle of everything the file tree widget needs.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FilesView {
    pub tree: Vec<TreeNode>,
    /// Identifier of the primary workflow file, if the manifest tags one.
    pub primary_file: Option<String>,
    /// Identifiers of the directories to show expanded initially.
    pub expanded: Vec<String>,
    pub diagnostics: Vec<BuildDiagnostic>,
    pub total_files: usize,
}

/// Builds the `FilesView` for a list of file records.
///
/// With [`DuplicatePolicy::Reject`] a duplicated identifier fails the whole
/// view; with [`DuplicatePolicy::Report`] it is listed in `diagnostics`.
pub fn generate_files_view(
    records: &[FileRecord],
    config: &AppConfig,
) -> Result<FilesView, CoreError> {
    let build = TreeBuilder::build_with_diagnostics(records, &config.root_prefix);

    if config.duplicate_policy == DuplicatePolicy::Reject {
        if let Some(id) = build.first_duplicate() {
            return Err(CoreError::DuplicateIdentifier { id: id.to_string() });
        }
    }

    let primary_file = primary_file(&build.nodes).map(|node| node.id.clone());
    let expanded = if config.expand_all_directories {
        directory_ids(&build.nodes)
    } else {
        Vec::new()
    };

    Ok(FilesView {
        tree: build.nodes,
        primary_file,
        expanded,
        diagnostics: build.diagnostics,
        total_files: records.len(),
    })
}

/// Extracts the file records from a workflow manifest.
///
/// Accepts either a workflow config (`{"workflow": {"files": [...]}}`) or a
/// catalog entry wrapping one (`{"config": {"workflow": {"files": [...]}}}`).
/// A manifest without a file list has no files.
pub fn files_from_manifest(manifest: &Value) -> Result<Vec<FileRecord>, CoreError> {
    let files = manifest
        .pointer("/workflow/files")
        .or_else(|| manifest.pointer("/config/workflow/files"));

    match files {
        Some(files) => {
            Vec::<FileRecord>::deserialize(files).map_err(CoreError::InvalidManifest)
        }
        None => {
            tracing::debug!("Workflow manifest has no file list.");
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FileKind;
    use crate::utils::test_helpers::{primary, record};
    use serde_json::json;

    fn scenario() -> Vec<FileRecord> {
        vec![
            primary("main.cwl"),
            record("tools/sort.cwl"),
            record("tools/grep.cwl"),
        ]
    }

    #[test]
    fn test_files_view_for_scenario() {
        let view = generate_files_view(&scenario(), &AppConfig::default()).unwrap();

        assert_eq!(view.total_files, 3);
        assert_eq!(view.primary_file.as_deref(), Some("main.cwl"));
        assert!(view.expanded.is_empty());
        assert!(view.diagnostics.is_empty());
        assert_eq!(view.tree.len(), 2);
    }

    #[test]
    fn test_expand_all_directories() {
        let config = AppConfig {
            expand_all_directories: true,
            ..Default::default()
        };
        let records = vec![record("a/b/c.wdl"), record("d/e.wdl")];

        let view = generate_files_view(&records, &config).unwrap();
        assert_eq!(view.expanded, vec!["a", "a/b", "d"]);
    }

    #[test]
    fn test_duplicate_policy() {
        let records = vec![record("main.nf"), record("main.nf")];

        let err = generate_files_view(&records, &AppConfig::default()).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateIdentifier { ref id } if id == "main.nf"));

        let config = AppConfig {
            duplicate_policy: DuplicatePolicy::Report,
            ..Default::default()
        };
        let view = generate_files_view(&records, &config).unwrap();
        assert_eq!(view.tree.len(), 2);
        assert_eq!(
            view.diagnostics,
            vec![BuildDiagnostic::DuplicateIdentifier {
                id: "main.nf".to_string()
            }]
        );
    }

    #[test]
    fn test_files_from_workflow_config_and_catalog_entry() {
        let config = json!({
            "workflow": {
                "name": "trimming_and_qc",
                "files": [
                    { "target": "main.cwl", "type": "primary", "url": "https://example.org/main.cwl" },
                    { "target": "tools/fastqc.cwl", "type": "secondary" },
                    { "url": "https://example.org/README.md" }
                ]
            }
        });

        let records = files_from_manifest(&config).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].kind, Some(FileKind::Primary));
        assert_eq!(records[0].source_url.as_deref(), Some("https://example.org/main.cwl"));
        assert_eq!(records[1].target, "tools/fastqc.cwl");
        assert_eq!(records[2].target, "");
        assert_eq!(records[2].kind, None);

        let entry = json!({ "config": config });
        assert_eq!(files_from_manifest(&entry).unwrap(), records);
    }

    #[test]
    fn test_manifest_without_files_and_malformed_files() {
        assert!(files_from_manifest(&json!({ "workflow": {} })).unwrap().is_empty());

        let err = files_from_manifest(&json!({ "workflow": { "files": "main.cwl" } })).unwrap_err();
        assert!(matches!(err, CoreError::InvalidManifest(_)));

        let err =
            files_from_manifest(&json!({ "workflow": { "files": [{ "type": "tertiary" }] } }))
                .unwrap_err();
        assert!(matches!(err, CoreError::InvalidManifest(_)));
    }
}
