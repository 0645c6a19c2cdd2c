//! Level files
//!
//! A level is the tile grid (rows of tile ids, top row first), a spawn
//! point and the sprites placed in it, stored as JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{read_json, write_json};
use crate::error::{DescentError, Result};
use crate::math::Vec2;
use crate::texture::{SPRITE_BARREL, SPRITE_LAMP, SPRITE_PILLAR, SPRITE_PLANT};
use crate::world::{Sprite, TileGrid};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spawn {
    pub x: f32,
    pub y: f32,
    /// Facing in radians, 0 = +x
    #[serde(default)]
    pub angle: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub texture: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    #[serde(default)]
    pub name: String,
    pub tiles: Vec<Vec<u8>>,
    pub spawn: Spawn,
    #[serde(default)]
    pub sprites: Vec<Placement>,
}

/// Built-in map, one digit per tile id
const BUILTIN_ROWS: [&str; 20] = [
    "11111111111111111111",
    "10000000001000000001",
    "10000000001000000001",
    "10022000000000330001",
    "10020000001000030001",
    "10000000001000000001",
    "11110111111110111111",
    "10000000000000000001",
    "10000000000000000001",
    "10004440000000444001",
    "10004000000000004001",
    "10000000000000000001",
    "11111101111111011111",
    "10000000001000000001",
    "10000000001000000001",
    "10033000000000022001",
    "10030000001000002001",
    "10000000001000000001",
    "10000000001000000001",
    "11111111111111111111",
];

impl Level {
    /// Load and validate a level file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let level: Self = read_json(path.as_ref())?;
        level.validate()?;
        Ok(level)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        write_json(path.as_ref(), self)
    }

    /// 20x20 walled map with four rooms and a corridor
    pub fn builtin() -> Self {
        let tiles = BUILTIN_ROWS
            .iter()
            .map(|row| row.bytes().map(|b| b - b'0').collect())
            .collect();

        let sprites = [
            (4.5, 1.5, SPRITE_PILLAR),
            (7.5, 4.5, SPRITE_BARREL),
            (8.5, 4.5, SPRITE_BARREL),
            (15.5, 1.5, SPRITE_LAMP),
            (9.5, 8.0, SPRITE_LAMP),
            (2.5, 10.5, SPRITE_PLANT),
            (17.5, 10.5, SPRITE_PLANT),
            (5.5, 14.5, SPRITE_PILLAR),
            (14.5, 14.5, SPRITE_PILLAR),
            (11.5, 17.5, SPRITE_BARREL),
        ]
        .into_iter()
        .map(|(x, y, texture)| Placement { x, y, texture })
        .collect();

        Self {
            name: "builtin".into(),
            tiles,
            spawn: Spawn {
                x: 2.5,
                y: 8.5,
                angle: 0.0,
            },
            sprites,
        }
    }

    /// Tile grid for this level
    pub fn grid(&self) -> Result<TileGrid> {
        TileGrid::from_rows(&self.tiles)
    }

    /// Check the grid shape and that the spawn point is open floor
    pub fn validate(&self) -> Result<()> {
        let grid = self.grid()?;
        let spawn = self.spawn_pos();
        if !spawn.is_finite() || !self.spawn.angle.is_finite() {
            return Err(DescentError::InvalidLevel(format!(
                "spawn ({}, {}) is not a finite position",
                self.spawn.x, self.spawn.y
            )));
        }
        match grid.get(spawn.x.floor() as i32, spawn.y.floor() as i32) {
            Some(0) => Ok(()),
            Some(tile) => Err(DescentError::InvalidLevel(format!(
                "spawn ({}, {}) is inside wall tile {tile}",
                spawn.x, spawn.y
            ))),
            None => Err(DescentError::InvalidLevel(format!(
                "spawn ({}, {}) is outside the {}x{} grid",
                spawn.x,
                spawn.y,
                grid.width(),
                grid.height()
            ))),
        }
    }

    #[inline]
    pub fn spawn_pos(&self) -> Vec2 {
        Vec2::new(self.spawn.x, self.spawn.y)
    }

    /// Sprites in file order
    pub fn sprites(&self) -> impl Iterator<Item = Sprite> + '_ {
        self.sprites.iter().map(|p| Sprite::new(p.x, p.y, p.texture))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_valid_and_closed() {
        let level = Level::builtin();
        level.validate().unwrap();
        let grid = level.grid().unwrap();
        assert_eq!((grid.width(), grid.height()), (20, 20));
        for i in 0..20 {
            assert_ne!(grid.get(i, 0), Some(0));
            assert_ne!(grid.get(i, 19), Some(0));
            assert_ne!(grid.get(0, i), Some(0));
            assert_ne!(grid.get(19, i), Some(0));
        }
    }

    #[test]
    fn test_builtin_sprites_stand_on_floor() {
        let level = Level::builtin();
        let grid = level.grid().unwrap();
        for sprite in level.sprites() {
            assert_eq!(
                grid.get(sprite.pos.x as i32, sprite.pos.y as i32),
                Some(0),
                "{sprite:?}"
            );
        }
    }

    #[test]
    fn test_spawn_in_wall_rejected() {
        let mut level = Level::builtin();
        level.spawn = Spawn {
            x: 0.5,
            y: 0.5,
            angle: 0.0,
        };
        assert!(matches!(level.validate(), Err(DescentError::InvalidLevel(_))));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let json = r#"{"tiles": [[1, 1, 1], [1, 0]], "spawn": {"x": 1.5, "y": 1.5}}"#;
        let level: Level = serde_json::from_str(json).unwrap();
        assert!(matches!(level.validate(), Err(DescentError::InvalidLevel(_))));
    }

    #[test]
    fn test_minimal_json_level() {
        let json = r#"{"tiles": [[1, 1, 1], [1, 0, 1], [1, 1, 1]], "spawn": {"x": 1.5, "y": 1.5}}"#;
        let level: Level = serde_json::from_str(json).unwrap();
        level.validate().unwrap();
        assert!(level.sprites.is_empty());
        assert_eq!(level.spawn.angle, 0.0);
    }
}
