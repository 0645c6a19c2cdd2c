//! Game state
//!
//! Everything one tick reads or writes, allocated up front from the config.
//! The host owns a `GameState`, feeds button events into it between ticks
//! and hands it to `Renderer::tick`.

mod level;

pub use level::{Level, Placement, Spawn};

use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::input::ButtonState;
use crate::render::{DepthBuffer, PixelBuffer, SpriteScratch};
use crate::texture::TextureBank;
use crate::world::{Camera, Sprite, SpriteList, TileGrid};

pub struct GameState {
    pub pixels: PixelBuffer,
    /// Shared read-only with the render workers during a tick
    pub tiles: Arc<TileGrid>,
    pub textures: Arc<TextureBank>,
    pub sprites: SpriteList,
    pub depth: DepthBuffer,
    pub sprite_scratch: SpriteScratch,
    pub camera: Camera,
    pub buttons: ButtonState,
    /// Seconds covered by the next tick
    pub frame_delta: f32,
    /// Seconds simulated so far
    pub total_time: f32,
}

impl GameState {
    pub fn new(config: &Config, level: &Level, textures: TextureBank) -> Result<Self> {
        config.validate()?;
        level.validate()?;

        let tiles = level.grid()?;
        let mut sprites = SpriteList::with_capacity(config.sprite_capacity);
        for sprite in level.sprites() {
            sprites.push(sprite)?;
        }

        info!(
            level = %level.name,
            width = tiles.width(),
            height = tiles.height(),
            sprites = sprites.len(),
            textures = textures.len(),
            "level loaded"
        );

        Ok(Self {
            pixels: PixelBuffer::new(config.width, config.height),
            tiles: Arc::new(tiles),
            textures: Arc::new(textures),
            sprite_scratch: SpriteScratch::with_capacity(sprites.capacity()),
            sprites,
            depth: DepthBuffer::new(config.width),
            camera: Camera::looking(level.spawn_pos(), level.spawn.angle, config.fov),
            buttons: ButtonState::new(),
            frame_delta: 0.0,
            total_time: 0.0,
        })
    }

    /// Mutable grid access between ticks. Clones the grid only if a
    /// reference is still held elsewhere.
    pub fn tiles_mut(&mut self) -> &mut TileGrid {
        Arc::make_mut(&mut self.tiles)
    }

    /// Mutable texture bank access between ticks
    pub fn textures_mut(&mut self) -> &mut TextureBank {
        Arc::make_mut(&mut self.textures)
    }

    /// Place a sprite; fails once the sprite capacity is reached
    pub fn add_sprite(&mut self, sprite: Sprite) -> Result<usize> {
        self.sprites.push(sprite)
    }
}
