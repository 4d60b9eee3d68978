//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{CityError, LayoutError};

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &CityError) -> String {
    match e {
        CityError::Layout(LayoutError::ExhaustedSearch { path, attempts }) => format!(
            "Layout failed: no free anchor for '{}' after {} attempts \
             (raise layout.max_anchor_attempts or set layout.on_exhausted = \"omit\")",
            path, attempts
        ),
        other => other.to_string(),
    }
}
