use std::fmt;

use serde::Serialize;

use crate::TileType;

/// Map coordinates referenced by scripts. Renders as `{x.y}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Cell {
    pub x: u8,
    pub y: u8,
}

impl Cell {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}.{}}}", self.x, self.y)
    }
}

/// An object materialized by a `SPAWN` action. Renders as `{TYPE-id-x.y}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Spawn {
    pub kind: TileType,
    pub id: u8,
    pub cell: Cell,
}

impl fmt::Display for Spawn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}-{}-{}.{}}}",
            self.kind, self.id, self.cell.x, self.cell.y
        )
    }
}
