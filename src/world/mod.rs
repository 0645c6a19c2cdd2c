mod camera;
mod grid;
mod sprite;

pub use camera::{Camera, DEFAULT_FOV_SCALE};
pub use grid::TileGrid;
pub use sprite::{Sprite, SpriteList, SPRITE_CAPACITY};
