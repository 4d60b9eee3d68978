//! Layout command presentation: json, ascii grid and street table.

use crate::error::CityError;
use crate::layout::{CityLayout, Side, TileKind};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

pub fn format_layout_json(layout: &CityLayout) -> Result<String, CityError> {
    layout.to_json()
}

fn tile_char(kind: TileKind) -> char {
    match kind {
        TileKind::DirStart => 'S',
        TileKind::DirEnd => 'E',
        TileKind::Road => '#',
        TileKind::Crosswalk => ':',
        TileKind::Intersection => 'X',
        TileKind::Building => 'B',
    }
}

fn paint(kind: TileKind, c: char) -> String {
    match kind {
        TileKind::DirStart | TileKind::DirEnd => c.green().bold().to_string(),
        TileKind::Road => c.dimmed().to_string(),
        TileKind::Crosswalk => c.white().to_string(),
        TileKind::Intersection => c.yellow().bold().to_string(),
        TileKind::Building => c.blue().to_string(),
    }
}

/// One character per cell, north at the top
///
/// `S`/`E` mark street ends, `#` road, `:` crosswalk, `X` intersection and
/// `B` building. Trailing blanks are trimmed from every row.
pub fn format_layout_ascii(layout: &CityLayout, color: bool) -> String {
    let Some(bounds) = layout.grid.bounds() else {
        return String::new();
    };
    let mut rows = Vec::with_capacity(bounds.height() as usize);
    for y in (bounds.min_y..=bounds.max_y).rev() {
        let mut row = String::new();
        let mut pending_blanks = 0;
        for x in bounds.min_x..=bounds.max_x {
            match layout.grid.get(x, y) {
                Some(tile) => {
                    row.extend(std::iter::repeat(' ').take(pending_blanks));
                    pending_blanks = 0;
                    let c = tile_char(tile.kind);
                    if color {
                        row.push_str(&paint(tile.kind, c));
                    } else {
                        row.push(c);
                    }
                }
                None => pending_blanks += 1,
            }
        }
        rows.push(row);
    }
    rows.join("\n")
}

/// Street table plus grid totals
pub fn format_layout_summary(layout: &CityLayout) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", "City layout".bold().underline()));

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec![
        "Street", "Depth", "Nodes", "Tier", "Width", "Start", "End", "Side", "Length",
        "Tallest",
    ]);
    for street in layout.streets.values() {
        let side = match street.branch.as_ref().map(|b| b.side) {
            Some(Side::North) => "north",
            Some(Side::South) => "south",
            None => "-",
        };
        table.add_row(vec![
            street.path.clone(),
            street.depth.to_string(),
            street.num_descendants.to_string(),
            format!("{:?}", street.road_tier).to_lowercase(),
            format!("{}", street.road_width),
            format!("{:?}", street.start),
            format!("{:?}", street.end),
            side.to_string(),
            format!("{}", street.plan.length),
            street
                .buildings
                .values()
                .max()
                .map_or_else(|| "-".to_string(), |tiers| tiers.to_string()),
        ]);
    }
    out.push_str(&format!("{}\n\n", table));

    out.push_str(&format!("  Tiles: {}\n", layout.grid.len()));
    out.push_str(&format!(
        "  Buildings: {}\n",
        layout.grid.count_kind(TileKind::Building)
    ));
    out.push_str(&format!(
        "  Intersections: {}\n",
        layout.grid.count_kind(TileKind::Intersection)
    ));
    if let Some(bounds) = layout.grid.bounds() {
        out.push_str(&format!(
            "  Extent: {} x {} cells\n",
            bounds.width(),
            bounds.height()
        ));
    }
    if !layout.omitted.is_empty() {
        out.push_str(&format!("  Omitted: {}\n", layout.omitted.join(", ")));
    }
    out
}
