//! The editable map: tile grid, script lines and the object id pool.
//!
//! Map file layout, no header:
//!
//! ```text
//! width(1) height(1)
//! tile * width * height     background(1) object(1) [object_id(1) if object != EMPTY]
//! script_count(1)
//! script * script_count     len(2, big-endian) payload(len)
//! ```
//!
//! Tiles are row-major, `y` outer and `x` inner.

use std::collections::BTreeSet;
use std::path::Path;

use raymap_script::{ByteReader, FormatError, LineReport, Script, compile_lines};
use raymap_types::TileType;

use crate::error::{CapacityError, LoadWarning, MapError};
use crate::grid::{Grid, Tile};
use crate::ids::IdPool;

/// Largest width or height a map file can describe.
pub const MAX_DIMENSION: usize = u8::MAX as usize;
/// Most scripts a map file can hold.
pub const MAX_SCRIPTS: usize = u8::MAX as usize;
/// Longest encoded script a map file can hold.
pub const MAX_SCRIPT_LEN: usize = u16::MAX as usize;

fn check_dimensions(width: usize, height: usize) -> Result<(), CapacityError> {
    if !(1..=MAX_DIMENSION).contains(&width) {
        return Err(CapacityError::Width(width));
    }
    if !(1..=MAX_DIMENSION).contains(&height) {
        return Err(CapacityError::Height(height));
    }
    Ok(())
}

fn read_tile_type(r: &mut ByteReader<'_>) -> Result<TileType, FormatError> {
    let offset = r.position();
    let value = r.read_u8()?;
    TileType::from_repr(value).ok_or(FormatError::UnknownTileType { value, offset })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapDocument {
    grid: Grid,
    lines: Vec<LineReport>,
    ids: IdPool,
    warnings: Vec<LoadWarning>,
}

impl MapDocument {
    /// A blank map with no objects and no scripts.
    pub fn new(width: usize, height: usize) -> Result<Self, CapacityError> {
        check_dimensions(width, height)?;
        Ok(Self::from_grid(Grid::new(width, height)))
    }

    fn from_grid(grid: Grid) -> Self {
        Self {
            grid,
            lines: Vec::new(),
            ids: IdPool::new(),
            warnings: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn tile(&self, x: usize, y: usize) -> Option<&Tile> {
        self.grid.get(x, y)
    }

    pub fn ids(&self) -> &IdPool {
        &self.ids
    }

    /// Problems found by [`MapDocument::load`]. Cleared once the script text
    /// is replaced.
    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }

    pub fn object_count(&self) -> usize {
        self.grid.object_ids().count()
    }

    /// Paint one cell.
    ///
    /// Background types replace the background. Object types replace the
    /// object, allocating an id only if the cell had no object. `EMPTY`
    /// removes the object, `DELETE` clears the whole cell.
    pub fn place(&mut self, x: usize, y: usize, kind: TileType) -> Result<(), MapError> {
        let (width, height) = (self.width(), self.height());
        let tile = self.grid.get_mut(x, y).ok_or(MapError::OutOfBounds {
            x,
            y,
            width,
            height,
        })?;

        let released = match kind {
            TileType::Delete => {
                tile.background = TileType::Empty;
                tile.clear_object()
            }
            TileType::Empty => tile.clear_object(),
            kind if kind.is_object() => {
                if tile.object_id.is_none() {
                    tile.object_id = Some(self.ids.allocate()?);
                }
                tile.object = kind;
                None
            }
            kind => {
                tile.background = kind;
                None
            }
        };

        if let Some(id) = released
            && !self.spawn_ids().contains(&id)
        {
            self.ids.release(id);
        }
        Ok(())
    }

    /// Change the map size, keeping the overlapping region. Objects that no
    /// longer fit give up their ids.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), CapacityError> {
        check_dimensions(width, height)?;
        self.grid = self.grid.resized(width, height);
        self.reconcile_ids();
        Ok(())
    }

    /// Replace all script lines, compiling each one independently.
    pub fn set_script_text(&mut self, text: &str) -> &[LineReport] {
        self.lines = compile_lines(text);
        self.warnings.clear();
        self.reconcile_ids();
        &self.lines
    }

    /// Current script lines joined with `\n`, invalid ones included.
    pub fn script_text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn script_lines(&self) -> &[LineReport] {
        &self.lines
    }

    /// Scripts from the lines that compiled.
    pub fn scripts(&self) -> impl Iterator<Item = &Script> + '_ {
        self.lines.iter().filter_map(LineReport::script)
    }

    fn spawn_ids(&self) -> BTreeSet<u8> {
        self.scripts().flat_map(|script| script.spawn_ids()).collect()
    }

    /// Spawn ids named by more than one spawn entry, in one script or across
    /// several.
    fn repeated_spawn_ids(&self) -> BTreeSet<u8> {
        let mut seen = BTreeSet::new();
        self.scripts()
            .flat_map(|script| script.spawn_ids())
            .filter(|&id| !seen.insert(id))
            .collect()
    }

    /// Make the pool hold exactly the ids used by tiles and script spawns.
    fn reconcile_ids(&mut self) {
        let tile_ids: BTreeSet<u8> = self.grid.object_ids().collect();
        let spawn_ids = self.spawn_ids();
        for id in self.repeated_spawn_ids() {
            log::warn!("object id {id} is spawned by more than one script entry");
        }
        for &id in &spawn_ids {
            if tile_ids.contains(&id) {
                log::warn!("object id {id} is used by both a tile and a script spawn");
            }
            self.ids.reserve(id);
        }
        self.ids
            .retain(|id| tile_ids.contains(&id) || spawn_ids.contains(&id));
    }

    /// Parse a map file.
    ///
    /// The tile section must be intact. Script slots that fail to decode are
    /// dropped and reported through [`MapDocument::warnings`]; a slot whose
    /// length runs past the end of the data stops script loading.
    pub fn load(data: &[u8]) -> Result<Self, MapError> {
        let mut r = ByteReader::new(data);
        let width = r.read_u8()? as usize;
        let height = r.read_u8()? as usize;
        check_dimensions(width, height)?;

        let mut ids = IdPool::new();
        let mut tiles = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let background = read_tile_type(&mut r)?;
                if background.is_object() || background == TileType::Delete {
                    return Err(MapError::MisplacedTile {
                        kind: background,
                        layer: "background",
                        x,
                        y,
                    });
                }
                let object = read_tile_type(&mut r)?;
                let object_id = match object {
                    TileType::Empty => None,
                    kind if kind.is_object() => {
                        let id = r.read_u8()?;
                        if !ids.reserve(id) {
                            return Err(MapError::DuplicateObjectId { id, x, y });
                        }
                        Some(id)
                    }
                    kind => {
                        return Err(MapError::MisplacedTile {
                            kind,
                            layer: "object",
                            x,
                            y,
                        });
                    }
                };
                tiles.push(Tile {
                    background,
                    object,
                    object_id,
                });
            }
        }

        let mut lines = Vec::new();
        let mut warnings = Vec::new();
        // Maps saved before any script existed end after the tiles.
        if !r.is_empty() {
            let count = r.read_u8()? as usize;
            for index in 0..count {
                let payload = match r.read_u16().and_then(|len| r.read_bytes(len as usize)) {
                    Ok(payload) => payload,
                    Err(source) => {
                        warnings.push(LoadWarning::CorruptScript { index, source });
                        r.rest();
                        break;
                    }
                };
                match Script::decode(payload) {
                    Ok(script) => lines.push(LineReport {
                        number: lines.len() + 1,
                        text: script.to_string(),
                        result: Ok(script),
                    }),
                    Err(source) => warnings.push(LoadWarning::CorruptScript { index, source }),
                }
            }
            if !r.is_empty() {
                warnings.push(LoadWarning::TrailingBytes {
                    count: r.remaining(),
                });
            }
        }

        let tile_ids: BTreeSet<u8> = ids.iter().collect();
        for (index, line) in lines.iter().enumerate() {
            let Some(script) = line.script() else {
                continue;
            };
            for id in script.spawn_ids() {
                if tile_ids.contains(&id) {
                    warnings.push(LoadWarning::SpawnIdConflict { index, id });
                }
                ids.reserve(id);
            }
        }

        for warning in &warnings {
            log::warn!("{warning}");
        }
        log::debug!(
            "loaded {width}x{height} map: {} object ids, {} scripts, {} warnings",
            ids.len(),
            lines.len(),
            warnings.len()
        );

        let doc = Self {
            grid: Grid::from_tiles(width, height, tiles),
            lines,
            ids,
            warnings,
        };
        for id in doc.repeated_spawn_ids() {
            log::warn!("object id {id} is spawned by more than one script entry");
        }
        Ok(doc)
    }

    /// Serialize to a map file. Only lines that compiled are written.
    ///
    /// Nothing is produced unless every limit of the format holds.
    pub fn save(&self) -> Result<Vec<u8>, MapError> {
        let (width, height) = (self.width(), self.height());
        check_dimensions(width, height)?;

        let scripts: Vec<&Script> = self.scripts().collect();
        if scripts.len() > MAX_SCRIPTS {
            return Err(CapacityError::ScriptCount(scripts.len()).into());
        }
        let payloads = scripts
            .iter()
            .enumerate()
            .map(|(index, script)| -> Result<Vec<u8>, MapError> {
                let payload = script.encode()?;
                if payload.len() > MAX_SCRIPT_LEN {
                    return Err(CapacityError::ScriptLength {
                        index,
                        len: payload.len(),
                    }
                    .into());
                }
                Ok(payload)
            })
            .collect::<Result<Vec<_>, MapError>>()?;

        let mut out = vec![width as u8, height as u8];
        for (_, _, tile) in self.grid.iter() {
            out.push(tile.background as u8);
            out.push(tile.object as u8);
            if let Some(id) = tile.object_id {
                out.push(id);
            }
        }
        out.push(payloads.len() as u8);
        for payload in &payloads {
            out.extend_from_slice(&(payload.len() as u16).to_be_bytes());
            out.extend_from_slice(payload);
        }

        log::debug!(
            "saved {width}x{height} map: {} scripts, {} bytes",
            payloads.len(),
            out.len()
        );
        Ok(out)
    }

    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let data = std::fs::read(path)?;
        Self::load(&data)
    }

    pub fn save_file(&self, path: impl AsRef<Path>) -> Result<(), MapError> {
        let data = self.save()?;
        std::fs::write(path, data)?;
        Ok(())
    }
}
