//! Branch geometry: sides, anchors and the child-to-parent cell mapping

use serde::{Deserialize, Serialize};

/// Lateral side of a parent spine a child street branches toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// `+y`
    North,
    /// `-y`
    South,
}

impl Side {
    /// Branch direction `d`: `+1` north, `-1` south
    pub fn sign(self) -> i64 {
        match self {
            Side::North => 1,
            Side::South => -1,
        }
    }
}

/// Parent-frame cell where a child street's junction is anchored
///
/// `x` is the intersection column on the parent spine; `y` is the signed
/// lateral distance at which the child's `DIR_START` lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Anchor {
    pub x: i64,
    pub y: i64,
}

impl Anchor {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Integer affine map `p' = M·p + offset`
///
/// Only rotations/reflections by quarter turns appear, so every map is
/// exact and invertible on the integer grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transform {
    m: [[i64; 2]; 2],
    offset: (i64, i64),
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            m: [[1, 0], [0, 1]],
            offset: (0, 0),
        }
    }

    /// Embedding of a child grid at `anchor` on `side`
    ///
    /// The child's road is first pushed out by `|anchor.y| - 1` filler cells,
    /// then `(cx, cy)` maps to `(ox - cy·d, d + cx'·d)` with `cx' = cx + shift`:
    /// the child's along-road axis becomes the parent's lateral axis.
    pub fn branch(anchor: Anchor, side: Side) -> Self {
        let d = side.sign();
        let shift = anchor.y.abs() - 1;
        Self {
            m: [[0, -d], [d, 0]],
            offset: (anchor.x, d * (1 + shift)),
        }
    }

    pub fn apply(&self, (x, y): (i64, i64)) -> (i64, i64) {
        (
            self.m[0][0] * x + self.m[0][1] * y + self.offset.0,
            self.m[1][0] * x + self.m[1][1] * y + self.offset.1,
        )
    }

    /// `outer ∘ self`: apply `self`, then `outer`
    pub fn then(&self, outer: &Transform) -> Transform {
        let a = &outer.m;
        let b = &self.m;
        let m = [
            [
                a[0][0] * b[0][0] + a[0][1] * b[1][0],
                a[0][0] * b[0][1] + a[0][1] * b[1][1],
            ],
            [
                a[1][0] * b[0][0] + a[1][1] * b[1][0],
                a[1][0] * b[0][1] + a[1][1] * b[1][1],
            ],
        ];
        let offset = outer.apply(self.offset);
        Transform { m, offset }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
