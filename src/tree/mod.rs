//! Source Tree
//!
//! The hierarchical file/directory model the layout engine consumes: a flat
//! map from normalized path to node, rooted at `"."`.

pub mod node;
pub mod path;
pub mod source;
pub mod walker;

pub use node::{NodeType, TreeNode};
pub use source::{SourceTree, ROOT_PATH};
