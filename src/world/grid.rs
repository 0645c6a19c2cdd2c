use crate::error::{DescentError, Result};

/// Empty, walkable cell
pub const EMPTY: u8 = 0;

/// Row-major grid of tile ids. `0` is open floor, anything else is a wall
/// whose id selects its texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<u8>,
}

impl TileGrid {
    /// An all-empty grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![EMPTY; width * height],
        }
    }

    /// An empty grid closed off by a one-tile border of `wall`
    pub fn bordered(width: usize, height: usize, wall: u8) -> Self {
        let mut grid = Self::new(width, height);
        for x in 0..width {
            grid.set(x, 0, wall);
            grid.set(x, height.saturating_sub(1), wall);
        }
        for y in 0..height {
            grid.set(0, y, wall);
            grid.set(width.saturating_sub(1), y, wall);
        }
        grid
    }

    /// Build from rows of tile ids; rows must be non-empty and equal length
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 || height == 0 {
            return Err(DescentError::InvalidLevel("tile grid is empty".into()));
        }
        if let Some((y, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(DescentError::InvalidLevel(format!(
                "row {} has {} tiles, expected {}",
                y,
                row.len(),
                width
            )));
        }
        Ok(Self {
            width,
            height,
            tiles: rows.iter().flatten().copied().collect(),
        })
    }

    /// Rows of tile ids, the inverse of `from_rows`
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.tiles.chunks(self.width.max(1)).map(<[u8]>::to_vec).collect()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Tile id at a cell, `None` outside the grid
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.tiles[y as usize * self.width + x as usize])
    }

    pub fn set(&mut self, x: usize, y: usize, id: u8) {
        if x < self.width && y < self.height {
            self.tiles[y * self.width + x] = id;
        }
    }

    /// Walls and everything outside the grid block movement
    #[inline]
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.get(x, y).map_or(true, |id| id != EMPTY)
    }
}
