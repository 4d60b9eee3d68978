//! Gap enforcer: minimum clearance between intersection spans on one lane

use serde::{Deserialize, Serialize};

/// Interval a branch road's intersection takes up along a lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Path of the branching child
    pub owner: String,
    pub start: f64,
    pub end: f64,
}

impl Span {
    pub fn new(owner: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            owner: owner.into(),
            start,
            end,
        }
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// A point feature on a lane (a building frontage)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneNode {
    pub owner: String,
    pub position: f64,
}

impl LaneNode {
    pub fn new(owner: impl Into<String>, position: f64) -> Self {
        Self {
            owner: owner.into(),
            position,
        }
    }
}

/// One side of a street expressed as linear widths
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    pub spans: Vec<Span>,
    pub nodes: Vec<LaneNode>,
}

/// Spread a lane's spans so adjacent ones are at least `min_buffer` apart
///
/// Spans are sorted by `start` (stable, so equal starts keep their input
/// order). Every time a gap falls short, the missing distance is added to a
/// running shift that moves that span and everything after it, so fixing one
/// pair never makes a later pair collide. Nodes move by the shift in effect
/// at their original position. Returns the new lane and the total distance
/// inserted.
pub fn enforce_min_gap(lane: &Lane, min_buffer: f64) -> (Lane, f64) {
    let mut spans = lane.spans.clone();
    spans.sort_by(|a, b| a.start.total_cmp(&b.start));

    // (original start of the shifted span, cumulative shift from there on)
    let mut breakpoints: Vec<(f64, f64)> = Vec::new();
    let mut shift = 0.0;
    let mut previous_end: Option<f64> = None;

    for span in &mut spans {
        let original_start = span.start;
        if let Some(prev_end) = previous_end {
            // `prev_end` already carries the shift applied to the previous span
            let gap = (span.start + shift) - prev_end;
            if gap < min_buffer {
                shift += min_buffer - gap;
                breakpoints.push((original_start, shift));
            }
        }
        span.start += shift;
        span.end += shift;
        previous_end = Some(span.end);
    }

    let nodes = lane
        .nodes
        .iter()
        .map(|node| {
            let offset = breakpoints
                .iter()
                .rev()
                .find(|(at, _)| node.position >= *at)
                .map_or(0.0, |(_, shift)| *shift);
            LaneNode::new(node.owner.clone(), node.position + offset)
        })
        .collect();

    (Lane { spans, nodes }, shift)
}
