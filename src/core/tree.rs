//! The hierarchy produced from a workflow's file manifest.

use serde::{Deserialize, Serialize};

use super::FileKind;

/// A single node of the file tree handed to the tree widget.
///
/// `id` is the node's full path from the tree root and doubles as the widget key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: String,
    /// The final path segment this node represents.
    pub label: String,
    #[serde(flatten)]
    pub node: NodeKind,
}

/// File or directory payload of a [`TreeNode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "lowercase")]
pub enum NodeKind {
    File {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        kind: Option<FileKind>,
        #[serde(rename = "sourceUrl", default, skip_serializing_if = "Option::is_none")]
        source_url: Option<String>,
    },
    Directory {
        children: Vec<TreeNode>,
    },
}

impl TreeNode {
    pub fn is_file(&self) -> bool {
        matches!(self.node, NodeKind::File { .. })
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.node, NodeKind::Directory { .. })
    }

    /// Children of a directory; always empty for files.
    pub fn children(&self) -> &[TreeNode] {
        match &self.node {
            NodeKind::Directory { children } => children,
            NodeKind::File { .. } => &[],
        }
    }

    pub fn kind(&self) -> Option<FileKind> {
        match &self.node {
            NodeKind::File { kind, .. } => *kind,
            NodeKind::Directory { .. } => None,
        }
    }

    pub fn source_url(&self) -> Option<&str> {
        match &self.node {
            NodeKind::File { source_url, .. } => source_url.as_deref(),
            NodeKind::Directory { .. } => None,
        }
    }
}

// Paths can nest arbitrarily deep, so subtrees are torn down from a heap stack
// rather than through the recursive drop glue.
impl Drop for TreeNode {
    fn drop(&mut self) {
        let NodeKind::Directory { children } = &mut self.node else {
            return;
        };
        let mut pending = std::mem::take(children);
        while let Some(mut node) = pending.pop() {
            if let NodeKind::Directory { children } = &mut node.node {
                pending.append(children);
            }
        }
    }
}

/// Iterates over every node of the tree, depth-first, parents before children.
pub fn walk(nodes: &[TreeNode]) -> impl Iterator<Item = &TreeNode> {
    let mut stack: Vec<&TreeNode> = nodes.iter().rev().collect();
    std::iter::from_fn(move || {
        let node = stack.pop()?;
        stack.extend(node.children().iter().rev());
        Some(node)
    })
}

/// Looks up a node by its identifier.
pub fn find<'a>(nodes: &'a [TreeNode], id: &str) -> Option<&'a TreeNode> {
    walk(nodes).find(|node| node.id == id)
}

/// Returns the first file tagged as the primary workflow file, in walk order.
pub fn primary_file(nodes: &[TreeNode]) -> Option<&TreeNode> {
    walk(nodes).find(|node| node.kind() == Some(FileKind::Primary))
}

/// Collects the identifiers of all directories, in walk order.
pub fn directory_ids(nodes: &[TreeNode]) -> Vec<String> {
    walk(nodes)
        .filter(|node| node.is_directory())
        .map(|node| node.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(id: &str, label: &str) -> TreeNode {
        TreeNode {
            id: id.to_string(),
            label: label.to_string(),
            node: NodeKind::File {
                kind: None,
                source_url: None,
            },
        }
    }

    fn dir(id: &str, label: &str, children: Vec<TreeNode>) -> TreeNode {
        TreeNode {
            id: id.to_string(),
            label: label.to_string(),
            node: NodeKind::Directory { children },
        }
    }

    fn sample_tree() -> Vec<TreeNode> {
        vec![
            file("README.md", "README.md"),
            dir(
                "src",
                "src",
                vec![
                    file("src/main.wdl", "main.wdl"),
                    dir("src/tasks", "tasks", vec![file("src/tasks/align.wdl", "align.wdl")]),
                ],
            ),
            dir("test", "test", vec![file("test/inputs.json", "inputs.json")]),
        ]
    }

    #[test]
    fn test_walk_visits_parents_before_children() {
        let tree = sample_tree();
        let ids: Vec<&str> = walk(&tree).map(|n| n.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "README.md",
                "src",
                "src/main.wdl",
                "src/tasks",
                "src/tasks/align.wdl",
                "test",
                "test/inputs.json",
            ]
        );
    }

    #[test]
    fn test_find_nested_node() {
        let tree = sample_tree();
        let node = find(&tree, "src/tasks/align.wdl").expect("node should exist");
        assert_eq!(node.label, "align.wdl");
        assert!(node.is_file());
        assert!(find(&tree, "src/tasks/missing.wdl").is_none());
    }

    #[test]
    fn test_primary_file_picks_first_tagged() {
        let mut tree = sample_tree();
        assert!(primary_file(&tree).is_none());

        if let NodeKind::Directory { children } = &mut tree[1].node {
            children[0].node = NodeKind::File {
                kind: Some(FileKind::Primary),
                source_url: None,
            };
        }
        let primary = primary_file(&tree).expect("primary file should be found");
        assert_eq!(primary.id, "src/main.wdl");
    }

    #[test]
    fn test_dropping_a_deep_chain_does_not_recurse() {
        let mut node = file("leaf", "leaf");
        for _ in 0..200_000 {
            node = dir("", "", vec![node]);
        }
        assert_eq!(walk(std::slice::from_ref(&node)).count(), 200_001);
        drop(node);
    }

    #[test]
    fn test_directory_ids_and_file_accessors() {
        let tree = sample_tree();
        assert_eq!(directory_ids(&tree), vec!["src", "src/tasks", "test"]);
        assert!(tree[0].children().is_empty());
        assert_eq!(tree[0].kind(), None);
        assert_eq!(tree[1].kind(), None);
        assert_eq!(tree[1].children().len(), 2);
    }
}
