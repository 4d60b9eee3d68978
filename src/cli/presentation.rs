//! CLI presentation: json, ascii and table formatters per command.

mod layout;
mod scan;

pub use layout::{format_layout_ascii, format_layout_json, format_layout_summary};
pub use scan::format_scan_summary;
