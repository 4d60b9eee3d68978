//! Anchor search: bounded retry loop driving the combiner on both sides of
//! a parent spine

use crate::error::{CombineError, LayoutError};
use crate::layout::combine::combine;
use crate::layout::grid::Grid;
use crate::layout::settings::LayoutConfig;
use crate::layout::transform::{Anchor, Side, Transform};
use tracing::{debug, trace};

/// An accepted embedding
#[derive(Debug, Clone)]
pub struct Placement {
    /// Parent grid with the child spliced in
    pub grid: Grid,
    pub anchor: Anchor,
    pub side: Side,
    /// Child frame to parent frame
    pub transform: Transform,
    /// Search iterations used, starting at 1
    pub attempts: usize,
}

/// One side's candidate position
#[derive(Debug, Clone, Copy)]
struct Candidate {
    side: Side,
    anchor: Anchor,
}

impl Candidate {
    fn new(side: Side, start_x: i64, reach: i64) -> Self {
        Self {
            side,
            anchor: Anchor::new(start_x, side.sign() * reach),
        }
    }

    /// Move after a rejection: outward on overlap, along the spine on
    /// occupancy
    fn advance(&mut self, err: &CombineError) {
        match err {
            CombineError::OverlappingRoad { .. } => self.anchor.y += self.side.sign(),
            CombineError::Occupied { .. } => self.anchor.x += 1,
        }
    }
}

/// Parameters for one child's search
#[derive(Debug, Clone, Copy)]
pub struct AnchorRequest<'a> {
    pub child_path: &'a str,
    pub parent_path: &'a str,
    /// First intersection column to try
    pub start_x: i64,
    /// Position of the child among its parent's subdirectories
    pub sibling_index: usize,
}

/// Find a conflict-free embedding of `child` into `parent`
///
/// Both sides start at `start_x` with lateral reach `child.spine_height()`.
/// Each iteration tries north and south at their current candidates; a side
/// rejected for overlap moves outward, a side rejected for occupancy moves
/// one column along the spine. The loop stops at the first iteration where
/// at least one side succeeds (ties resolved by `config.tie_break`) and
/// gives up after `config.max_anchor_attempts` iterations.
pub fn search_anchor(
    parent: &Grid,
    child: &Grid,
    request: AnchorRequest<'_>,
    config: &LayoutConfig,
) -> Result<Placement, LayoutError> {
    let reach = child.spine_height();
    let mut north = Candidate::new(Side::North, request.start_x, reach);
    let mut south = Candidate::new(Side::South, request.start_x, reach);

    for attempt in 1..=config.max_anchor_attempts {
        let north_result = try_candidate(parent, child, &request, north);
        let south_result = try_candidate(parent, child, &request, south);

        let accepted = match (north_result, south_result) {
            (Ok(north_grid), Ok(south_grid)) => {
                match config.tie_break.choose(request.sibling_index) {
                    Side::North => Some((north, north_grid)),
                    Side::South => Some((south, south_grid)),
                }
            }
            (Ok(north_grid), Err(_)) => Some((north, north_grid)),
            (Err(_), Ok(south_grid)) => Some((south, south_grid)),
            (Err(north_err), Err(south_err)) => {
                trace!(
                    child = request.child_path,
                    attempt,
                    north = %north_err,
                    south = %south_err,
                    "Anchor attempt rejected"
                );
                north.advance(&north_err);
                south.advance(&south_err);
                None
            }
        };

        if let Some((candidate, grid)) = accepted {
            debug!(
                child = request.child_path,
                parent = request.parent_path,
                x = candidate.anchor.x,
                y = candidate.anchor.y,
                side = ?candidate.side,
                attempts = attempt,
                "Anchor accepted"
            );
            return Ok(Placement {
                grid,
                anchor: candidate.anchor,
                side: candidate.side,
                transform: Transform::branch(candidate.anchor, candidate.side),
                attempts: attempt,
            });
        }
    }

    Err(LayoutError::ExhaustedSearch {
        path: request.child_path.to_string(),
        attempts: config.max_anchor_attempts,
    })
}

fn try_candidate(
    parent: &Grid,
    child: &Grid,
    request: &AnchorRequest<'_>,
    candidate: Candidate,
) -> Result<Grid, CombineError> {
    combine(
        parent,
        child,
        request.child_path,
        request.parent_path,
        candidate.anchor,
        candidate.side,
    )
}
