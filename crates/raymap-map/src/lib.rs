//! Map documents for the ray map editor: a grid of tiles, the trigger
//! scripts attached to the map, and the object ids shared between them.

pub mod document;
pub mod error;
pub mod grid;
pub mod ids;

pub use document::MapDocument;
pub use error::{CapacityError, LoadWarning, MapError};
pub use grid::{Grid, Tile};
pub use ids::{IdPool, PoolExhausted};
