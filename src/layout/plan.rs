//! Linear side-width plan of one street

use crate::layout::gap::{enforce_min_gap, Lane, LaneNode, Span};
use crate::layout::settings::LayoutConfig;
use crate::layout::transform::Side;
use serde::{Deserialize, Serialize};

/// A building fronting the street, in the street's local frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frontage {
    pub owner: String,
    pub x: i64,
    pub side: Side,
    /// Building height in stories
    pub tiers: u32,
}

/// Where a child street leaves this one, in the street's local frame
#[derive(Debug, Clone, PartialEq)]
pub struct Junction {
    pub owner: String,
    pub x: i64,
    pub side: Side,
    /// World width of the child's road
    pub road_width: f64,
}

/// A street's two sides as lanes of world-unit positions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreetPlan {
    /// Street length after clearance was inserted
    pub length: f64,
    pub north: Lane,
    pub south: Lane,
}

/// Lay out a street's junctions and buildings along its length
///
/// Each junction becomes a span of its child's road width centered on the
/// junction column; each building becomes a node at its column. Both lanes
/// are then spread to `config.min_intersection_buffer`, and the street grows
/// by whichever lane needed more room.
pub fn plan_street(
    end_x: i64,
    frontages: &[Frontage],
    junctions: &[Junction],
    config: &LayoutConfig,
) -> StreetPlan {
    let cell = config.cell_size;
    let mut north = Lane::default();
    let mut south = Lane::default();

    for junction in junctions {
        let center = junction.x as f64 * cell;
        let half = junction.road_width / 2.0;
        let span = Span::new(junction.owner.clone(), center - half, center + half);
        match junction.side {
            Side::North => north.spans.push(span),
            Side::South => south.spans.push(span),
        }
    }

    for frontage in frontages {
        let node = LaneNode::new(frontage.owner.clone(), frontage.x as f64 * cell);
        match frontage.side {
            Side::North => north.nodes.push(node),
            Side::South => south.nodes.push(node),
        }
    }

    let (north, north_inserted) = enforce_min_gap(&north, config.min_intersection_buffer);
    let (south, south_inserted) = enforce_min_gap(&south, config.min_intersection_buffer);

    StreetPlan {
        length: end_x as f64 * cell + north_inserted.max(south_inserted),
        north,
        south,
    }
}
