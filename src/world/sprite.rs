use crate::error::{DescentError, Result};
use crate::math::Vec2;

/// Default number of sprite slots
pub const SPRITE_CAPACITY: usize = 256;

/// A billboard placed in the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub pos: Vec2,
    pub texture: u16,
}

impl Sprite {
    pub const fn new(x: f32, y: f32, texture: u16) -> Self {
        Self {
            pos: Vec2::new(x, y),
            texture,
        }
    }
}

/// Sprites in insertion order, bounded by a capacity fixed at construction.
///
/// The backing storage is allocated once; `push` past capacity is rejected
/// so the per-tick scratch arrays sized from `capacity()` always suffice.
#[derive(Debug, Clone)]
pub struct SpriteList {
    sprites: Vec<Sprite>,
    capacity: usize,
}

impl SpriteList {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sprites: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, sprite: Sprite) -> Result<usize> {
        if self.sprites.len() >= self.capacity {
            return Err(DescentError::SpriteCapacity {
                capacity: self.capacity,
            });
        }
        self.sprites.push(sprite);
        Ok(self.sprites.len() - 1)
    }

    /// Remove a sprite, keeping the others in insertion order
    pub fn remove(&mut self, index: usize) -> Option<Sprite> {
        if index < self.sprites.len() {
            Some(self.sprites.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.sprites.clear();
    }

    /// The live sprites; nothing past the live count is ever visible
    #[inline]
    pub fn live(&self) -> &[Sprite] {
        &self.sprites
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
