//! Error types for the CodeCity layout engine.

use thiserror::Error;

/// Input tree errors
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("Tree has no root node \".\"")]
    MissingRoot,

    #[error("Node not found: {0}")]
    UnknownNode(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Directory {parent} lists missing child {child}")]
    DanglingChild { parent: String, child: String },

    #[error("Node {child} lists parent {actual:?}, expected {expected}")]
    ParentMismatch {
        child: String,
        expected: String,
        actual: Option<String>,
    },

    #[error("Node {0} is reachable more than once")]
    Cycle(String),

    #[error("Node {0} is not reachable from the root")]
    Unreachable(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Tree I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Rejected embedding of a child grid into a parent grid.
///
/// Both variants carry the first offending cell in parent coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CombineError {
    #[error("Child street crosses the parent road at ({x}, {y})")]
    OverlappingRoad { x: i64, y: i64 },

    #[error("Cell ({x}, {y}) is already occupied")]
    Occupied { x: i64, y: i64 },
}

impl CombineError {
    pub fn is_overlapping_road(&self) -> bool {
        matches!(self, CombineError::OverlappingRoad { .. })
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self, CombineError::Occupied { .. })
    }

    /// Offending cell as `(x, y)`.
    pub fn conflict(&self) -> (i64, i64) {
        match *self {
            CombineError::OverlappingRoad { x, y } | CombineError::Occupied { x, y } => (x, y),
        }
    }
}

/// Layout engine errors
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("No conflict-free anchor for {path} within {attempts} attempts")]
    ExhaustedSearch { path: String, attempts: usize },

    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    /// A builder step hit a cell it had checked as free
    #[error("Placement conflict: {0}")]
    Conflict(#[from] CombineError),
}

/// Application-level errors (CLI, config, serialization)
#[derive(Debug, Error)]
pub enum CityError {
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<config::ConfigError> for CityError {
    fn from(err: config::ConfigError) -> Self {
        CityError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for CityError {
    fn from(err: serde_json::Error) -> Self {
        CityError::SerializationError(err.to_string())
    }
}
