//! Layout configuration
//!
//! Every knob the engine reads is carried in `LayoutConfig` and passed
//! explicitly into each call; nothing is read from ambient state.

use crate::layout::transform::Side;
use serde::{Deserialize, Serialize};

/// Which side wins when both sides of the spine accept a child in the same
/// search iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    #[default]
    PreferNorth,
    PreferSouth,
    /// Even-numbered sibling subdirectories go north, odd ones south
    Alternate,
}

impl TieBreak {
    /// Side chosen for the `sibling_index`-th subdirectory of a parent
    pub fn choose(self, sibling_index: usize) -> Side {
        match self {
            TieBreak::PreferNorth => Side::North,
            TieBreak::PreferSouth => Side::South,
            TieBreak::Alternate if sibling_index % 2 == 0 => Side::North,
            TieBreak::Alternate => Side::South,
        }
    }
}

impl std::str::FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prefer_north" | "north" => Ok(TieBreak::PreferNorth),
            "prefer_south" | "south" => Ok(TieBreak::PreferSouth),
            "alternate" => Ok(TieBreak::Alternate),
            other => Err(format!(
                "Invalid tie break: {} (must be 'prefer_north', 'prefer_south' or 'alternate')",
                other
            )),
        }
    }
}

/// What happens when no anchor is found for a subtree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustedPolicy {
    /// Propagate `ExhaustedSearch` and fail the whole layout
    #[default]
    Abort,
    /// Leave the subtree's street out and record it in `CityLayout::omitted`
    Omit,
}

/// Layout engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// World units per grid cell
    #[serde(default = "default_cell_size")]
    pub cell_size: f64,

    /// Minimum world-unit clearance between intersections on one lane
    #[serde(default = "default_min_intersection_buffer")]
    pub min_intersection_buffer: f64,

    /// Deepest directory level expanded into a street (root = 0)
    #[serde(default)]
    pub max_depth: Option<u32>,

    /// Upper bound on anchor search iterations per subdirectory
    #[serde(default = "default_max_anchor_attempts")]
    pub max_anchor_attempts: usize,

    #[serde(default)]
    pub tie_break: TieBreak,

    #[serde(default)]
    pub on_exhausted: ExhaustedPolicy,
}

fn default_cell_size() -> f64 {
    6.0
}

fn default_min_intersection_buffer() -> f64 {
    1.0
}

fn default_max_anchor_attempts() -> usize {
    4096
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            cell_size: default_cell_size(),
            min_intersection_buffer: default_min_intersection_buffer(),
            max_depth: None,
            max_anchor_attempts: default_max_anchor_attempts(),
            tie_break: TieBreak::default(),
            on_exhausted: ExhaustedPolicy::default(),
        }
    }
}

impl LayoutConfig {
    /// Validate layout configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(format!(
                "cell_size must be a positive number, got {}",
                self.cell_size
            ));
        }
        if !self.min_intersection_buffer.is_finite() || self.min_intersection_buffer < 0.0 {
            return Err(format!(
                "min_intersection_buffer must be zero or positive, got {}",
                self.min_intersection_buffer
            ));
        }
        if self.max_anchor_attempts == 0 {
            return Err("max_anchor_attempts must be at least 1".to_string());
        }
        Ok(())
    }

    /// Whether a directory at `level` below the layout root is expanded
    pub fn expands(&self, level: u32) -> bool {
        self.max_depth.map_or(true, |max| level <= max)
    }
}
