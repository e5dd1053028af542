pub mod cell;
pub mod grammar;
pub mod keyword;
pub mod tile_type;

pub use cell::{Cell, Spawn};
pub use grammar::{ActionOp, ConditionOp, FieldKind};
pub use keyword::{AndOr, Order, Repeat};
pub use tile_type::{TileBits, TileCategory, TileType};
