//! Tree node types

use serde::{Deserialize, Serialize};

/// Kind of tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// A file
    Blob,
    /// A directory
    Tree,
}

/// One file or directory in the source tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Normalized path, unique within the tree
    pub path: String,
    /// Final path component (`"."` for the root)
    pub name: String,
    /// Parent directory path (None for the root)
    pub parent_path: Option<String>,
    pub node_type: NodeType,
    /// Distance from the root (root = 0)
    pub depth: u32,
    /// Ordered children (directories only)
    #[serde(default)]
    pub child_paths: Vec<String>,
    /// Optional size metric
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_lines: Option<u64>,
}

impl TreeNode {
    /// Create a directory node with no children yet
    pub fn tree(path: impl Into<String>, parent_path: Option<String>, depth: u32) -> Self {
        let path = path.into();
        Self {
            name: name_of(&path),
            path,
            parent_path,
            node_type: NodeType::Tree,
            depth,
            child_paths: Vec::new(),
            num_lines: None,
        }
    }

    /// Create a file node
    pub fn blob(path: impl Into<String>, parent_path: Option<String>, depth: u32) -> Self {
        let path = path.into();
        Self {
            name: name_of(&path),
            path,
            parent_path,
            node_type: NodeType::Blob,
            depth,
            child_paths: Vec::new(),
            num_lines: None,
        }
    }

    pub fn with_num_lines(mut self, num_lines: u64) -> Self {
        self.num_lines = Some(num_lines);
        self
    }

    pub fn is_tree(&self) -> bool {
        self.node_type == NodeType::Tree
    }

    pub fn is_blob(&self) -> bool {
        self.node_type == NodeType::Blob
    }
}

fn name_of(path: &str) -> String {
    path.rsplit('/').next().unwrap_or(path).to_string()
}
