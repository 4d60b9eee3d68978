//! Filesystem walker that turns a directory into a `SourceTree`

use crate::error::TreeError;
use crate::tree::node::TreeNode;
use crate::tree::path;
use crate::tree::source::{SourceTree, ROOT_PATH};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, trace};
use walkdir::{DirEntry, WalkDir};

/// Filesystem entry types, relative to the walk root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A file entry with its tree path and optional line count
    File { path: String, num_lines: Option<u64> },
    /// A directory entry with its tree path
    Directory { path: String },
}

impl Entry {
    pub fn path(&self) -> &str {
        match self {
            Entry::File { path, .. } | Entry::Directory { path } => path,
        }
    }
}

/// Filesystem walker configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkerConfig {
    /// Whether to follow symbolic links (default: false for determinism)
    #[serde(default)]
    pub follow_symlinks: bool,
    /// Path components to skip (e.g., ".git", "target", "node_modules")
    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,
    /// Maximum depth to traverse (None = unlimited)
    #[serde(default)]
    pub max_depth: Option<usize>,
}

fn default_ignore_patterns() -> Vec<String> {
    vec![
        ".git".to_string(),
        "target".to_string(),
        "node_modules".to_string(),
    ]
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            ignore_patterns: default_ignore_patterns(),
            max_depth: None,
        }
    }
}

/// Filesystem walker
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    /// Create a walker with custom configuration
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    /// Walk the filesystem and collect all entries below the root
    ///
    /// Returns entries sorted by path for determinism.
    pub fn walk(&self) -> Result<Vec<Entry>, TreeError> {
        let root = path::canonicalize_path(&self.root)?;
        let mut entries = Vec::new();

        let walker = WalkDir::new(&root)
            .follow_links(self.config.follow_symlinks)
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX))
            .into_iter()
            .filter_entry(|entry| !self.should_ignore(&root, entry));

        for entry in walker {
            let entry = entry.map_err(|e| {
                TreeError::IoError(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("Failed to walk directory: {}", e),
                ))
            })?;

            // Skip the root directory itself (we only want its contents)
            if entry.depth() == 0 {
                continue;
            }

            let tree_path = path::relative_tree_path(&root, entry.path())?;
            let file_type = entry.file_type();

            if file_type.is_dir() {
                entries.push(Entry::Directory { path: tree_path });
            } else if file_type.is_file() {
                let num_lines = count_lines(entry.path());
                trace!(path = %tree_path, ?num_lines, "Scanned file");
                entries.push(Entry::File {
                    path: tree_path,
                    num_lines,
                });
            }
            // Skip symlinks if not following them
        }

        entries.sort_by(|a, b| a.path().cmp(b.path()));
        Ok(entries)
    }

    /// Walk the filesystem and assemble a validated source tree
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn scan(&self) -> Result<SourceTree, TreeError> {
        let entries = self.walk()?;
        debug!(entry_count = entries.len(), "Walked filesystem");

        let mut nodes: BTreeMap<String, TreeNode> = BTreeMap::new();
        nodes.insert(ROOT_PATH.to_string(), TreeNode::tree(ROOT_PATH, None, 0));

        for entry in entries {
            let node = match entry {
                Entry::Directory { path: dir } => {
                    TreeNode::tree(dir.clone(), path::parent_of(&dir), path::depth_of(&dir))
                }
                Entry::File {
                    path: file,
                    num_lines,
                } => {
                    let node = TreeNode::blob(
                        file.clone(),
                        path::parent_of(&file),
                        path::depth_of(&file),
                    );
                    match num_lines {
                        Some(lines) => node.with_num_lines(lines),
                        None => node,
                    }
                }
            };
            nodes.insert(node.path.clone(), node);
        }

        SourceTree::from_unlinked(nodes)
    }

    /// Check if an entry should be ignored based on ignore patterns
    fn should_ignore(&self, root: &Path, entry: &DirEntry) -> bool {
        let Ok(rel) = entry.path().strip_prefix(root) else {
            return false;
        };

        rel.components().any(|component| match component {
            std::path::Component::Normal(name) => {
                let name = name.to_string_lossy();
                self.config
                    .ignore_patterns
                    .iter()
                    .any(|pattern| name == pattern.as_str())
            }
            _ => false,
        })
    }
}

/// Line count for UTF-8 text files; binary or unreadable files have none
///
/// Reads one line at a time, so memory stays bounded by the longest line.
fn count_lines(file: &Path) -> Option<u64> {
    let mut reader = BufReader::new(File::open(file).ok()?);
    let mut line = Vec::new();
    let mut count = 0;
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).ok()? == 0 {
            return Some(count);
        }
        std::str::from_utf8(&line).ok()?;
        count += 1;
    }
}
