//! Path canonicalization and normalization utilities

use crate::error::TreeError;
use std::path::{Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Canonicalize a filesystem root before scanning
///
/// Resolves symlinks, `..` and `.` through `dunce` so Windows paths stay
/// free of the `\\?\` prefix.
pub fn canonicalize_path(path: &Path) -> Result<PathBuf, TreeError> {
    dunce::canonicalize(path)
        .map_err(|e| TreeError::InvalidPath(format!("Failed to canonicalize path: {}", e)))
}

/// Normalize a tree-relative path string
///
/// This function:
/// 1. Normalizes Unicode to NFC
/// 2. Converts `\` separators to `/`
/// 3. Drops empty and `.` components (so `./src//lib.rs` becomes `src/lib.rs`)
/// 4. Maps the empty path to the root `"."`
pub fn normalize_path_string(path: &str) -> String {
    let normalized: String = path.nfc().collect();
    let normalized = normalized.replace('\\', "/");

    let parts: Vec<&str> = normalized
        .split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect();

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

/// Parent of a normalized path; the root has none
pub fn parent_of(path: &str) -> Option<String> {
    if path == "." {
        return None;
    }
    match path.rfind('/') {
        Some(idx) => Some(path[..idx].to_string()),
        None => Some(".".to_string()),
    }
}

/// Number of components below the root (root = 0)
pub fn depth_of(path: &str) -> u32 {
    if path == "." {
        0
    } else {
        path.split('/').count() as u32
    }
}

/// Convert a path below `root` into a normalized tree path
pub fn relative_tree_path(root: &Path, path: &Path) -> Result<String, TreeError> {
    let rel = path.strip_prefix(root).map_err(|_| {
        TreeError::InvalidPath(format!("{:?} is not under {:?}", path, root))
    })?;
    Ok(normalize_path_string(&rel.to_string_lossy()))
}
