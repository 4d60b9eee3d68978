//! Recursive grid builder
//!
//! Lays out one directory at a time in its own frame: files become buildings
//! along the directory's road, subdirectories are built first and then
//! embedded through the anchor search. The finished root grid, plus one
//! [`Street`] per expanded directory, makes up a [`CityLayout`].

use crate::error::{CityError, LayoutError};
use crate::layout::anchor::{search_anchor, AnchorRequest, Placement};
use crate::layout::complexity::{building_tiers, road_tier, RoadTier};
use crate::layout::grid::Grid;
use crate::layout::plan::{plan_street, Frontage, Junction, StreetPlan};
use crate::layout::settings::{ExhaustedPolicy, LayoutConfig};
use crate::layout::tile::{Tile, TileKind};
use crate::layout::transform::{Anchor, Side, Transform};
use crate::tree::{SourceTree, TreeNode, ROOT_PATH};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// How a street leaves its parent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub side: Side,
    /// Junction cell in the parent street's own frame
    pub anchor: Anchor,
    pub parent: String,
}

/// Layout facts for one expanded directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Street {
    pub path: String,
    pub depth: u32,
    pub num_descendants: usize,
    pub road_tier: RoadTier,
    /// Road depth in grid units
    pub road_depth: u32,
    /// Road width in world units
    pub road_width: f64,
    /// Maps this street's local cells into the root frame
    pub frame: Transform,
    /// `DIR_START` cell in root coordinates
    pub start: (i64, i64),
    /// `DIR_END` cell in root coordinates
    pub end: (i64, i64),
    pub branch: Option<Branch>,
    pub plan: StreetPlan,
    /// Stories of each building fronting this street, by owner path
    pub buildings: BTreeMap<String, u32>,
}

impl Street {
    /// Carry the street one frame outward
    fn embed(&mut self, transform: &Transform) {
        self.frame = self.frame.then(transform);
        self.start = transform.apply(self.start);
        self.end = transform.apply(self.end);
    }
}

/// Result of laying out a whole tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityLayout {
    pub root: String,
    pub grid: Grid,
    pub streets: BTreeMap<String, Street>,
    /// Subtrees left out after an exhausted anchor search
    pub omitted: Vec<String>,
}

impl CityLayout {
    pub fn street(&self, path: &str) -> Option<&Street> {
        self.streets.get(path)
    }

    pub fn to_json(&self) -> Result<String, CityError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One directory laid out in its own frame; streets list the directory first
struct LocalLayout {
    grid: Grid,
    streets: Vec<Street>,
    omitted: Vec<String>,
}

impl LocalLayout {
    /// Empty result for a directory past the depth cutoff
    fn placeholder() -> Self {
        Self {
            grid: Grid::new(),
            streets: Vec::new(),
            omitted: Vec::new(),
        }
    }
}

/// Where an embedded child ended up
struct Embedding {
    anchor: Anchor,
    side: Side,
    transform: Transform,
}

/// Mutable state while one directory's road is being laid
struct StreetCursor<'a> {
    path: &'a str,
    parent: Option<&'a str>,
    grid: Grid,
    /// Next free spine column
    cursor: i64,
    /// Column whose north building is placed and south cell is still open
    open_slot: Option<i64>,
    leaf_index: usize,
    frontages: Vec<Frontage>,
    junctions: Vec<Junction>,
}

impl<'a> StreetCursor<'a> {
    fn new(path: &'a str, parent: Option<&'a str>) -> Self {
        Self {
            path,
            parent,
            grid: Grid::seeded(path, parent),
            cursor: 1,
            open_slot: None,
            leaf_index: 0,
            frontages: Vec::new(),
            junctions: Vec::new(),
        }
    }

    fn spine_tile(&self, kind: TileKind) -> Tile {
        Tile::new(kind, self.path, self.parent.map(str::to_string))
    }

    fn lay_spine(&mut self, x: i64) -> Result<(), LayoutError> {
        if !self.grid.is_occupied(x, 0) {
            let tile = self.spine_tile(TileKind::Road);
            self.grid.place(x, 0, tile)?;
        }
        Ok(())
    }

    fn put_building(
        &mut self,
        owner: &str,
        tiers: u32,
        x: i64,
        side: Side,
    ) -> Result<(), LayoutError> {
        let tile = Tile::new(TileKind::Building, owner, Some(self.path.to_string()));
        self.grid.place(x, side.sign(), tile)?;
        self.frontages.push(Frontage {
            owner: owner.to_string(),
            x,
            side,
            tiers,
        });
        Ok(())
    }

    /// Place a file (or an unexpanded directory) as a building
    ///
    /// Even leaves open a new column on the north side; odd leaves fill the
    /// south cell of that column. A column whose target cell is taken by an
    /// embedded street is skipped with plain road.
    fn place_leaf(&mut self, owner: &str, num_lines: Option<u64>) -> Result<(), LayoutError> {
        let tiers = building_tiers(num_lines);
        let side = if self.leaf_index % 2 == 0 {
            Side::North
        } else {
            Side::South
        };
        self.leaf_index += 1;

        if side == Side::South {
            if let Some(x) = self.open_slot.take() {
                if !self.grid.is_occupied(x, side.sign()) {
                    return self.put_building(owner, tiers, x, side);
                }
            }
        }

        loop {
            let x = self.cursor;
            self.cursor += 1;
            self.lay_spine(x)?;
            if !self.grid.is_occupied(x, side.sign()) {
                self.put_building(owner, tiers, x, side)?;
                if side == Side::North {
                    self.open_slot = Some(x);
                }
                return Ok(());
            }
        }
    }

    /// Search an anchor for `child` and splice it in
    fn embed(
        &mut self,
        child: &Grid,
        child_path: &str,
        sibling_index: usize,
        road_width: f64,
        config: &LayoutConfig,
    ) -> Result<Embedding, LayoutError> {
        self.open_slot = None;
        let request = AnchorRequest {
            child_path,
            parent_path: self.path,
            start_x: self.cursor + 1,
            sibling_index,
        };
        let Placement {
            grid,
            anchor,
            side,
            transform,
            ..
        } = search_anchor(&self.grid, child, request, config)?;

        self.grid = grid;
        for x in self.cursor..anchor.x - 1 {
            self.lay_spine(x)?;
        }
        self.cursor = anchor.x + 2;
        self.junctions.push(Junction {
            owner: child_path.to_string(),
            x: anchor.x,
            side,
            road_width,
        });
        Ok(Embedding {
            anchor,
            side,
            transform,
        })
    }

    /// Append `DIR_END`, preferring the spine and then the rows beside it
    fn close(&mut self) -> Result<(i64, i64), LayoutError> {
        self.open_slot = None;
        loop {
            let x = self.cursor;
            for y in [0, 1, -1] {
                if !self.grid.is_occupied(x, y) {
                    let tile = self.spine_tile(TileKind::DirEnd);
                    self.grid.place(x, y, tile)?;
                    return Ok((x, y));
                }
            }
            self.cursor += 1;
        }
    }
}

/// Builds a [`CityLayout`] from a validated source tree
pub struct LayoutBuilder {
    config: LayoutConfig,
}

impl LayoutBuilder {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out the whole tree, bottom-up from the leaves
    #[instrument(skip(self, tree), fields(root = ROOT_PATH, nodes = tree.len()))]
    pub fn build(&self, tree: &SourceTree) -> Result<CityLayout, LayoutError> {
        let start = Instant::now();
        info!("Starting layout build");

        let local = self.build_directory(tree, tree.root(), 0)?;
        let streets: BTreeMap<String, Street> = local
            .streets
            .into_iter()
            .map(|street| (street.path.clone(), street))
            .collect();

        info!(
            streets = streets.len(),
            tiles = local.grid.len(),
            omitted = local.omitted.len(),
            duration_ms = start.elapsed().as_millis(),
            "Layout build completed"
        );

        Ok(CityLayout {
            root: ROOT_PATH.to_string(),
            grid: local.grid,
            streets,
            omitted: local.omitted,
        })
    }

    fn build_directory(
        &self,
        tree: &SourceTree,
        node: &TreeNode,
        level: u32,
    ) -> Result<LocalLayout, LayoutError> {
        if !self.config.expands(level) {
            return Ok(LocalLayout::placeholder());
        }

        let mut street = StreetCursor::new(&node.path, node.parent_path.as_deref());
        let mut streets = Vec::new();
        let mut omitted = Vec::new();
        let mut sibling_index = 0;

        for child in tree.children(&node.path)? {
            if child.is_blob() {
                street.place_leaf(&child.path, child.num_lines)?;
                continue;
            }

            let sub = self.build_directory(tree, child, level + 1)?;
            if sub.grid.is_placeholder() {
                street.place_leaf(&child.path, None)?;
                continue;
            }

            let road_width = sub.streets.first().map_or(0.0, |s| s.road_width);
            let index = sibling_index;
            sibling_index += 1;

            match street.embed(&sub.grid, &child.path, index, road_width, &self.config) {
                Ok(placement) => {
                    for mut sub_street in sub.streets {
                        if sub_street.path == child.path {
                            sub_street.branch = Some(Branch {
                                side: placement.side,
                                anchor: placement.anchor,
                                parent: node.path.clone(),
                            });
                        }
                        sub_street.embed(&placement.transform);
                        streets.push(sub_street);
                    }
                    omitted.extend(sub.omitted);
                }
                Err(LayoutError::ExhaustedSearch { path, attempts })
                    if self.config.on_exhausted == ExhaustedPolicy::Omit =>
                {
                    warn!(path = %path, attempts, "Omitting subtree with no free anchor");
                    omitted.push(path);
                }
                Err(err) => return Err(err),
            }
        }

        let end = street.close()?;
        let num_descendants = tree.count_descendants(&node.path)?;
        let tier = road_tier(num_descendants);
        let plan = plan_street(end.0, &street.frontages, &street.junctions, &self.config);
        let buildings = street
            .frontages
            .iter()
            .map(|frontage| (frontage.owner.clone(), frontage.tiers))
            .collect();

        debug!(
            path = %node.path,
            tiles = street.grid.len(),
            buildings = street.frontages.len(),
            branches = street.junctions.len(),
            "Directory grid closed"
        );

        streets.insert(
            0,
            Street {
                path: node.path.clone(),
                depth: node.depth,
                num_descendants,
                road_tier: tier,
                road_depth: tier.depth(),
                road_width: tier.width(self.config.cell_size),
                frame: Transform::identity(),
                start: (0, 0),
                end,
                branch: None,
                plan,
                buildings,
            },
        );

        Ok(LocalLayout {
            grid: street.grid,
            streets,
            omitted,
        })
    }
}

/// Lay out `tree` with `config`
pub fn build_layout(tree: &SourceTree, config: &LayoutConfig) -> Result<CityLayout, LayoutError> {
    LayoutBuilder::new(config.clone()).build(tree)
}
