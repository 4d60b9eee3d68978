//! Validated flat source tree

use crate::error::{CityError, TreeError};
use crate::tree::node::{NodeType, TreeNode};
use crate::tree::path;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Path of the root directory
pub const ROOT_PATH: &str = ".";

/// Flat mapping from normalized path to node, rooted at `"."`
///
/// Construction validates the structure, so every `SourceTree` handed to the
/// layout engine has a root directory, no dangling children, consistent
/// parent links and no node reachable twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, TreeNode>",
    into = "BTreeMap<String, TreeNode>"
)]
pub struct SourceTree {
    nodes: BTreeMap<String, TreeNode>,
}

impl TryFrom<BTreeMap<String, TreeNode>> for SourceTree {
    type Error = TreeError;

    fn try_from(nodes: BTreeMap<String, TreeNode>) -> Result<Self, Self::Error> {
        Self::from_map(nodes)
    }
}

impl From<SourceTree> for BTreeMap<String, TreeNode> {
    fn from(tree: SourceTree) -> Self {
        tree.nodes
    }
}

impl SourceTree {
    /// Build from a list of nodes, keyed by their own path
    pub fn new(nodes: impl IntoIterator<Item = TreeNode>) -> Result<Self, TreeError> {
        let map = nodes
            .into_iter()
            .map(|node| (node.path.clone(), node))
            .collect();
        Self::from_map(map)
    }

    /// Build from an already keyed map
    pub fn from_map(nodes: BTreeMap<String, TreeNode>) -> Result<Self, TreeError> {
        let tree = Self { nodes };
        tree.validate()?;
        Ok(tree)
    }

    /// Build a tree from file paths; parent directories are synthesized and
    /// children are ordered by name.
    pub fn from_paths<I, S>(paths: I) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut nodes: BTreeMap<String, TreeNode> = BTreeMap::new();
        nodes.insert(ROOT_PATH.to_string(), TreeNode::tree(ROOT_PATH, None, 0));

        for raw in paths {
            let file_path = path::normalize_path_string(raw.as_ref());
            if file_path == ROOT_PATH {
                continue;
            }

            let mut ancestor = path::parent_of(&file_path);
            while let Some(dir) = ancestor {
                if dir == ROOT_PATH {
                    break;
                }
                match nodes.get(&dir) {
                    Some(existing) if existing.is_blob() => {
                        return Err(TreeError::InvalidPath(format!(
                            "{} is both a file and a directory",
                            dir
                        )));
                    }
                    Some(_) => {}
                    None => {
                        let node = TreeNode::tree(
                            dir.clone(),
                            path::parent_of(&dir),
                            path::depth_of(&dir),
                        );
                        nodes.insert(dir.clone(), node);
                    }
                }
                ancestor = path::parent_of(&dir);
            }

            match nodes.get(&file_path) {
                Some(existing) if existing.is_tree() => {
                    return Err(TreeError::InvalidPath(format!(
                        "{} is both a file and a directory",
                        file_path
                    )));
                }
                Some(_) => {}
                None => {
                    let node = TreeNode::blob(
                        file_path.clone(),
                        path::parent_of(&file_path),
                        path::depth_of(&file_path),
                    );
                    nodes.insert(file_path, node);
                }
            }
        }

        Self::from_unlinked(nodes)
    }

    /// Build from nodes whose `child_paths` are derived from their parent links
    pub(crate) fn from_unlinked(mut nodes: BTreeMap<String, TreeNode>) -> Result<Self, TreeError> {
        link_children(&mut nodes);
        Self::from_map(nodes)
    }

    /// Parse the flat JSON wire form (`{ "<path>": TreeNode, ... }`)
    pub fn from_json(json: &str) -> Result<Self, CityError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to the flat JSON wire form
    pub fn to_json(&self) -> Result<String, CityError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn root(&self) -> &TreeNode {
        // validate() guarantees the root exists
        &self.nodes[ROOT_PATH]
    }

    pub fn get(&self, path: &str) -> Option<&TreeNode> {
        self.nodes.get(path)
    }

    /// Look up a node, failing with `UnknownNode`
    pub fn node(&self, path: &str) -> Result<&TreeNode, TreeError> {
        self.nodes
            .get(path)
            .ok_or_else(|| TreeError::UnknownNode(path.to_string()))
    }

    /// Ordered children of a directory
    pub fn children(&self, path: &str) -> Result<Vec<&TreeNode>, TreeError> {
        let node = self.node(path)?;
        if !node.is_tree() {
            return Err(TreeError::NotADirectory(path.to_string()));
        }
        node.child_paths.iter().map(|child| self.node(child)).collect()
    }

    /// Number of nodes strictly below `path`
    pub fn count_descendants(&self, path: &str) -> Result<usize, TreeError> {
        let mut count = 0;
        let mut stack = vec![self.node(path)?];
        while let Some(node) = stack.pop() {
            for child in &node.child_paths {
                count += 1;
                stack.push(self.node(child)?);
            }
        }
        Ok(count)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &TreeNode> {
        self.nodes.values()
    }

    pub fn directories(&self) -> impl Iterator<Item = &TreeNode> {
        self.nodes.values().filter(|node| node.is_tree())
    }

    pub fn files(&self) -> impl Iterator<Item = &TreeNode> {
        self.nodes.values().filter(|node| node.is_blob())
    }

    fn validate(&self) -> Result<(), TreeError> {
        let root = self.nodes.get(ROOT_PATH).ok_or(TreeError::MissingRoot)?;
        if !root.is_tree() {
            return Err(TreeError::NotADirectory(ROOT_PATH.to_string()));
        }

        for (key, node) in &self.nodes {
            if *key != node.path {
                return Err(TreeError::InvalidPath(format!(
                    "Key {} holds node {}",
                    key, node.path
                )));
            }
            if node.node_type == NodeType::Blob && !node.child_paths.is_empty() {
                return Err(TreeError::NotADirectory(node.path.clone()));
            }
            for child_path in &node.child_paths {
                let child = self.nodes.get(child_path).ok_or_else(|| {
                    TreeError::DanglingChild {
                        parent: node.path.clone(),
                        child: child_path.clone(),
                    }
                })?;
                if child.parent_path.as_deref() != Some(node.path.as_str()) {
                    return Err(TreeError::ParentMismatch {
                        child: child_path.clone(),
                        expected: node.path.clone(),
                        actual: child.parent_path.clone(),
                    });
                }
            }
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let mut stack = vec![ROOT_PATH];
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                return Err(TreeError::Cycle(current.to_string()));
            }
            if let Some(node) = self.nodes.get(current) {
                stack.extend(node.child_paths.iter().map(String::as_str));
            }
        }

        if seen.len() != self.nodes.len() {
            if let Some(orphan) = self.nodes.keys().find(|path| !seen.contains(path.as_str())) {
                return Err(TreeError::Unreachable(orphan.clone()));
            }
        }

        Ok(())
    }
}

/// Fill `child_paths` from parent links, in path order
fn link_children(nodes: &mut BTreeMap<String, TreeNode>) {
    let links: Vec<(String, String)> = nodes
        .values()
        .filter_map(|node| {
            node.parent_path
                .as_ref()
                .map(|parent| (parent.clone(), node.path.clone()))
        })
        .collect();

    for node in nodes.values_mut() {
        node.child_paths.clear();
    }
    for (parent, child) in links {
        if let Some(parent_node) = nodes.get_mut(&parent) {
            parent_node.child_paths.push(child);
        }
    }
}
