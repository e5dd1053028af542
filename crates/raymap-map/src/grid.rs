use raymap_types::TileType;

/// One map cell: a background layer and an optional object on top of it.
///
/// `object_id` is set exactly when `object` is not [`TileType::Empty`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tile {
    pub(crate) background: TileType,
    pub(crate) object: TileType,
    pub(crate) object_id: Option<u8>,
}

impl Tile {
    pub fn background(&self) -> TileType {
        self.background
    }

    pub fn object(&self) -> TileType {
        self.object
    }

    pub fn object_id(&self) -> Option<u8> {
        self.object_id
    }

    pub fn has_object(&self) -> bool {
        self.object != TileType::Empty
    }

    /// Remove the object, returning its id.
    pub(crate) fn clear_object(&mut self) -> Option<u8> {
        self.object = TileType::Empty;
        self.object_id.take()
    }
}

/// Row-major tile storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::default(); width * height],
        }
    }

    /// Build from row-major tiles; `tiles.len()` must be `width * height`.
    pub(crate) fn from_tiles(width: usize, height: usize, tiles: Vec<Tile>) -> Self {
        debug_assert_eq!(tiles.len(), width * height);
        Self {
            width,
            height,
            tiles,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Tile> {
        self.index(x, y).map(|i| &self.tiles[i])
    }

    pub(crate) fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut Tile> {
        self.index(x, y).map(|i| &mut self.tiles[i])
    }

    /// Tiles with their coordinates, `y` outer and `x` inner.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Tile)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(|(i, tile)| (i % self.width, i / self.width, tile))
    }

    /// Ids of every object on the grid.
    pub fn object_ids(&self) -> impl Iterator<Item = u8> + '_ {
        self.tiles.iter().filter_map(|t| t.object_id)
    }

    /// A copy resized to `width` x `height`, keeping the overlapping region.
    pub fn resized(&self, width: usize, height: usize) -> Self {
        let mut grid = Self::new(width, height);
        for y in 0..height.min(self.height) {
            for x in 0..width.min(self.width) {
                grid.tiles[y * width + x] = self.tiles[y * self.width + x];
            }
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(kind: TileType, id: u8) -> Tile {
        Tile {
            background: TileType::BgFloor,
            object: kind,
            object_id: Some(id),
        }
    }

    #[test]
    fn bounds() {
        let grid = Grid::new(3, 2);
        assert!(grid.get(2, 1).is_some());
        assert!(grid.get(3, 0).is_none());
        assert!(grid.get(0, 2).is_none());
        assert_eq!(grid.iter().count(), 6);
    }

    #[test]
    fn iter_is_row_major() {
        let grid = Grid::new(2, 2);
        let coords: Vec<(usize, usize)> = grid.iter().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn resize_keeps_overlap() {
        let mut grid = Grid::new(3, 3);
        *grid.get_mut(0, 0).unwrap() = object(TileType::ObjItemKeyA, 1);
        *grid.get_mut(2, 2).unwrap() = object(TileType::ObjEnemyBoss, 2);

        let smaller = grid.resized(2, 2);
        assert_eq!(smaller.get(0, 0), grid.get(0, 0));
        assert_eq!(smaller.object_ids().collect::<Vec<_>>(), vec![1]);

        let larger = smaller.resized(4, 1);
        assert_eq!(larger.get(0, 0), grid.get(0, 0));
        assert_eq!(larger.get(3, 0), Some(&Tile::default()));
    }

    #[test]
    fn clear_object_keeps_background() {
        let mut tile = object(TileType::ObjItemBeam, 7);
        assert!(tile.has_object());
        assert_eq!(tile.clear_object(), Some(7));
        assert!(!tile.has_object());
        assert_eq!(tile.background(), TileType::BgFloor);
        assert_eq!(tile.object_id(), None);
    }
}
