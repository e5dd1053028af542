use raymap_script::{FormatError, SchemaViolation};
use raymap_types::TileType;

use crate::ids::PoolExhausted;

/// A fixed-width field of the map format cannot hold a value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CapacityError {
    #[error("map width {0} is outside 1..=255")]
    Width(usize),
    #[error("map height {0} is outside 1..=255")]
    Height(usize),
    #[error("{0} valid scripts, at most 255 can be saved")]
    ScriptCount(usize),
    #[error("script {index} encodes to {len} bytes, at most 65535 can be saved")]
    ScriptLength { index: usize, len: usize },
    #[error(transparent)]
    IdsExhausted(#[from] PoolExhausted),
}

#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("malformed map: {0}")]
    Format(#[from] FormatError),
    #[error(transparent)]
    Capacity(#[from] CapacityError),
    #[error("cell ({x}, {y}) is outside the {width}x{height} map")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    #[error("object id {id} at ({x}, {y}) is already used by another tile")]
    DuplicateObjectId { id: u8, x: usize, y: usize },
    #[error("{kind} cannot be stored in the {layer} layer at ({x}, {y})")]
    MisplacedTile {
        kind: TileType,
        layer: &'static str,
        x: usize,
        y: usize,
    },
    #[error("script cannot be saved: {0}")]
    Script(#[from] SchemaViolation),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<PoolExhausted> for MapError {
    fn from(err: PoolExhausted) -> Self {
        Self::Capacity(err.into())
    }
}

/// A recoverable problem found while loading; the document is still usable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadWarning {
    #[error("script {index} is corrupt and was dropped: {source}")]
    CorruptScript { index: usize, source: FormatError },
    #[error("{count} unread bytes after the last script")]
    TrailingBytes { count: usize },
    #[error("script {index} spawns object id {id}, which a tile already uses")]
    SpawnIdConflict { index: usize, id: u8 },
}
