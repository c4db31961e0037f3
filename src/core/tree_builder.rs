//! Builds a nested file hierarchy from a flat list of path-tagged records.

use std::collections::HashSet;

use hashlink::LinkedHashMap;
use serde::Serialize;

use super::error::CoreError;
use super::tree::{walk, NodeKind, TreeNode};
use super::FileRecord;

/// A utility struct for turning a workflow's file manifest into a tree.
///
/// This struct is stateless and provides methods as associated functions.
pub struct TreeBuilder;

/// A condition found while building a tree that the caller should know about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BuildDiagnostic {
    /// More than one node carries this identifier.
    DuplicateIdentifier { id: String },
    /// The record's target contains an empty path segment, so some node
    /// derived from it has an empty label.
    MalformedPath { target: String },
}

/// The outcome of a lenient build: the literal tree plus everything worth reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TreeBuild {
    pub nodes: Vec<TreeNode>,
    pub diagnostics: Vec<BuildDiagnostic>,
}

impl TreeBuild {
    /// Returns the first identifier reported as duplicated, if any.
    pub fn first_duplicate(&self) -> Option<&str> {
        self.diagnostics.iter().find_map(|d| match d {
            BuildDiagnostic::DuplicateIdentifier { id } => Some(id.as_str()),
            BuildDiagnostic::MalformedPath { .. } => None,
        })
    }
}

impl TreeBuilder {
    /// Builds the tree and rejects it if any two nodes share an identifier.
    ///
    /// A node whose identifier equals the normalized `root_prefix` counts as a
    /// duplicate too, since the root prefix names the node the tree hangs under.
    pub fn build(records: &[FileRecord], root_prefix: &str) -> Result<Vec<TreeNode>, CoreError> {
        let build = Self::build_with_diagnostics(records, root_prefix);
        if let Some(id) = build.first_duplicate() {
            return Err(CoreError::DuplicateIdentifier { id: id.to_string() });
        }
        Ok(build.nodes)
    }

    /// Builds the tree exactly as the records describe it and reports
    /// duplicate identifiers and malformed paths instead of failing.
    pub fn build_with_diagnostics(records: &[FileRecord], root_prefix: &str) -> TreeBuild {
        tracing::debug!(
            "Building file tree from {} records under prefix {:?}",
            records.len(),
            root_prefix
        );

        let mut diagnostics: Vec<BuildDiagnostic> = records
            .iter()
            .filter(|record| record.target.split('/').any(str::is_empty))
            .map(|record| {
                tracing::warn!("Malformed path in file manifest: {:?}", record.target);
                BuildDiagnostic::MalformedPath {
                    target: record.target.clone(),
                }
            })
            .collect();

        let nodes = Self::assemble(records, root_prefix);

        let mut seen = HashSet::new();
        seen.insert(Self::normalize(root_prefix));
        for node in walk(&nodes) {
            if !seen.insert(node.id.clone()) {
                tracing::warn!("Duplicate node identifier in file tree: {:?}", node.id);
                diagnostics.push(BuildDiagnostic::DuplicateIdentifier {
                    id: node.id.clone(),
                });
            }
        }

        tracing::debug!(
            "Built file tree with {} top-level nodes and {} diagnostics",
            nodes.len(),
            diagnostics.len()
        );
        TreeBuild { nodes, diagnostics }
    }

    /// Strips leading and trailing slashes. Doubled slashes inside are kept.
    pub fn normalize(path: &str) -> String {
        path.trim_matches('/').to_string()
    }

    /// Lays the records out level by level from an explicit work stack, then
    /// assembles the nested nodes bottom-up. Path depth never reaches the call
    /// stack.
    fn assemble(records: &[FileRecord], root_prefix: &str) -> Vec<TreeNode> {
        let mut arena: Vec<PendingNode> = Vec::new();
        let mut top = Vec::new();
        let mut work = vec![PendingLevel {
            slot: None,
            parent: root_prefix.to_string(),
            members: (0..records.len()).map(|index| (index, 0)).collect(),
        }];

        while let Some(level) = work.pop() {
            let slots =
                Self::extract_level(records, level.members, &level.parent, &mut arena, &mut work);
            match level.slot {
                Some(slot) => {
                    if let Some(PendingNode {
                        payload: Pending::Directory(children),
                        ..
                    }) = arena.get_mut(slot)
                    {
                        *children = slots;
                    }
                }
                None => top = slots,
            }
        }

        // Children are always laid out after their parent, so walking the
        // arena backwards finishes every subtree before it is claimed.
        let mut built: Vec<Option<TreeNode>> = std::iter::repeat_with(|| None)
            .take(arena.len())
            .collect();
        while let Some(pending) = arena.pop() {
            let slot = arena.len();
            let node = match pending.payload {
                Pending::File(index) => NodeKind::File {
                    kind: records[index].kind,
                    source_url: records[index].source_url.clone(),
                },
                Pending::Directory(children) => NodeKind::Directory {
                    children: children
                        .into_iter()
                        .filter_map(|child| built[child].take())
                        .collect(),
                },
            };
            built[slot] = Some(TreeNode {
                id: pending.id,
                label: pending.label,
                node,
            });
        }

        top.into_iter()
            .filter_map(|slot| built[slot].take())
            .collect()
    }

    /// Lays out one level of the tree: files first, then one directory per
    /// distinct first segment, each in first-seen order. Directories are
    /// queued on `work` and their slots returned alongside the files.
    fn extract_level<'a>(
        records: &'a [FileRecord],
        members: Vec<Member>,
        parent: &str,
        arena: &mut Vec<PendingNode>,
        work: &mut Vec<PendingLevel>,
    ) -> Vec<usize> {
        let mut slots = Vec::new();
        let mut dirs: LinkedHashMap<&'a str, Vec<Member>> = LinkedHashMap::new();

        for (index, offset) in members {
            let rest = &records[index].target[offset..];
            match rest.find('/') {
                Some(pos) => {
                    let head = &rest[..pos];
                    let member = (index, offset + pos + 1);
                    match dirs.get_mut(&head) {
                        Some(group) => group.push(member),
                        None => {
                            dirs.insert(head, vec![member]);
                        }
                    }
                }
                None => {
                    slots.push(arena.len());
                    arena.push(PendingNode {
                        id: Self::normalize(&format!("{parent}/{rest}")),
                        label: rest.to_string(),
                        payload: Pending::File(index),
                    });
                }
            }
        }

        for (dir, members) in dirs {
            let id = Self::normalize(&format!("{parent}/{dir}"));
            slots.push(arena.len());
            work.push(PendingLevel {
                slot: Some(arena.len()),
                parent: id.clone(),
                members,
            });
            arena.push(PendingNode {
                id,
                label: dir.to_string(),
                payload: Pending::Directory(Vec::new()),
            });
        }

        slots
    }
}

/// A record still being placed: its index and the byte offset where the
/// unconsumed part of its target starts.
type Member = (usize, usize);

/// A directory whose contents have not been laid out yet.
struct PendingLevel {
    /// Arena slot of the directory, or `None` for the top level.
    slot: Option<usize>,
    parent: String,
    members: Vec<Member>,
}

struct PendingNode {
    id: String,
    label: String,
    payload: Pending,
}

enum Pending {
    /// Index of the record the file came from.
    File(usize),
    /// Arena slots of the children, in display order.
    Directory(Vec<usize>),
}
