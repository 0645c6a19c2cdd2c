//! Texture System
//!
//! Packed colors, tagged texels, square textures and the capacity-bounded
//! bank that tile ids and sprite texture ids index into.

mod procedural;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::error::{DescentError, Result};

pub use procedural::{
    barrel, brick, lamp, metal, pillar, plant, stone, wood, SPRITE_BARREL, SPRITE_LAMP,
    SPRITE_PILLAR, SPRITE_PLANT, TILE_BRICK, TILE_METAL, TILE_STONE, TILE_WOOD,
};

/// Number of texture slots in the default bank
pub const TEXTURE_CAPACITY: usize = 256;
/// Side length of the default textures, in texels
pub const TEXTURE_SIZE: usize = 16;

// ============================================================================
// Color
// ============================================================================

/// Packed `0x00RRGGBB` color, the framebuffer's native pixel format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[derive(Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
#[repr(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Self = Self(0x000000);
    pub const WHITE: Self = Self(0xFFFFFF);
    pub const MAGENTA: Self = Self(0xFF00FF);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    /// Multiply every channel by `factor` (clamped to 0..=1)
    #[inline]
    pub fn scale(self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        Self::rgb(
            (self.r() as f32 * f) as u8,
            (self.g() as f32 * f) as u8,
            (self.b() as f32 * f) as u8,
        )
    }

    /// Linear interpolation toward `other`
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t) as u8;
        Self::rgb(
            mix(self.r(), other.r()),
            mix(self.g(), other.g()),
            mix(self.b(), other.b()),
        )
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::rgb(r, g, b)
    }
}

impl From<Color> for [u8; 3] {
    fn from(c: Color) -> Self {
        [c.r(), c.g(), c.b()]
    }
}

// ============================================================================
// Texel / Texture
// ============================================================================

/// One texture cell. Sprites skip `Transparent`; walls never contain it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Texel {
    Opaque(Color),
    #[default]
    Transparent,
}

impl Texel {
    /// Color to paint when the texel must produce a pixel (walls)
    #[inline]
    pub fn color_or(self, fallback: Color) -> Color {
        match self {
            Self::Opaque(c) => c,
            Self::Transparent => fallback,
        }
    }
}

/// A square texture of `size x size` texels, indexed `[row][col]`
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    size: usize,
    texels: Vec<Texel>,
}

impl Texture {
    /// Create a fully transparent texture
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            size,
            texels: vec![Texel::Transparent; size * size],
        }
    }

    /// Create a texture filled with one opaque color
    pub fn solid(size: usize, color: Color) -> Self {
        let size = size.max(1);
        Self {
            size,
            texels: vec![Texel::Opaque(color); size * size],
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Set a texel (ignored when out of range)
    #[inline]
    pub fn set(&mut self, col: usize, row: usize, texel: Texel) {
        if col < self.size && row < self.size {
            self.texels[row * self.size + col] = texel;
        }
    }

    #[inline]
    pub fn set_color(&mut self, col: usize, row: usize, color: Color) {
        self.set(col, row, Texel::Opaque(color));
    }

    /// Nearest texel lookup; indices past the edge clamp to the last texel
    #[inline]
    pub fn texel(&self, col: usize, row: usize) -> Texel {
        let last = self.size - 1;
        self.texels[row.min(last) * self.size + col.min(last)]
    }

    /// Nearest sample with UV coordinates (0.0 to 1.0, wrapping)
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> Texel {
        let u = u.rem_euclid(1.0);
        let v = v.rem_euclid(1.0);
        let col = (u * self.size as f32) as usize;
        let row = (v * self.size as f32) as usize;
        self.texel(col, row)
    }

    /// True when at least one texel is transparent
    pub fn has_transparency(&self) -> bool {
        self.texels.iter().any(|t| *t == Texel::Transparent)
    }
}

// ============================================================================
// TextureBank
// ============================================================================

/// Fixed-capacity list of same-sized textures addressed by id
#[derive(Debug, Clone)]
pub struct TextureBank {
    size: usize,
    capacity: usize,
    textures: Vec<Texture>,
}

impl TextureBank {
    pub fn new(size: usize, capacity: usize) -> Self {
        Self {
            size: size.max(1),
            capacity,
            textures: Vec::with_capacity(capacity),
        }
    }

    /// The stock bank: slot `k` holds the wall texture for tile id `k`,
    /// followed by the billboard sprites. Slot 0 (tile id 0 = empty) is a
    /// placeholder so tile ids index the bank directly.
    pub fn standard(size: usize) -> Self {
        let mut bank = Self::new(size, TEXTURE_CAPACITY);
        bank.textures.push(Texture::solid(size, Color::BLACK));
        bank.textures.push(brick(size));
        bank.textures.push(stone(size));
        bank.textures.push(wood(size));
        bank.textures.push(metal(size));
        bank.textures.push(barrel(size));
        bank.textures.push(pillar(size));
        bank.textures.push(lamp(size));
        bank.textures.push(plant(size));
        bank
    }

    /// Add a texture and return its id
    pub fn push(&mut self, texture: Texture) -> Result<usize> {
        if texture.size() != self.size {
            return Err(DescentError::TextureSize {
                expected: self.size,
                actual: texture.size(),
            });
        }
        if self.textures.len() >= self.capacity {
            return Err(DescentError::TextureCapacity {
                capacity: self.capacity,
            });
        }
        self.textures.push(texture);
        Ok(self.textures.len() - 1)
    }

    #[inline]
    pub fn get(&self, id: usize) -> Option<&Texture> {
        self.textures.get(id)
    }

    #[inline]
    pub fn texture_size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
