//! Scan command presentation: source tree totals.

use crate::tree::SourceTree;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Totals plus the top-level directories by descendant count
pub fn format_scan_summary(tree: &SourceTree) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", "Source tree".bold().underline()));

    let lines: u64 = tree.files().filter_map(|node| node.num_lines).sum();
    out.push_str(&format!("  Directories: {}\n", tree.directories().count()));
    out.push_str(&format!("  Files: {}\n", tree.files().count()));
    out.push_str(&format!("  Lines: {}\n", lines));
    let max_depth = tree.nodes().map(|node| node.depth).max().unwrap_or(0);
    out.push_str(&format!("  Max depth: {}\n", max_depth));

    let mut rows: Vec<(String, usize)> = tree
        .root()
        .child_paths
        .iter()
        .filter_map(|path| tree.get(path))
        .filter(|node| node.is_tree())
        .map(|node| {
            let count = tree.count_descendants(&node.path).unwrap_or(0);
            (node.path.clone(), count)
        })
        .collect();
    if !rows.is_empty() {
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Directory", "Nodes"]);
        for (path, count) in rows {
            table.add_row(vec![path, count.to_string()]);
        }
        out.push_str(&format!("\n{}\n", table));
    }
    out
}
