//! Procedural texture generators
//!
//! Stand-ins for loaded art. Every generator works for any texture size;
//! patterns are laid out in fractions of the side length.

use super::{Color, Texel, Texture};
use crate::util::Rng;

pub const TILE_BRICK: u8 = 1;
pub const TILE_STONE: u8 = 2;
pub const TILE_WOOD: u8 = 3;
pub const TILE_METAL: u8 = 4;

pub const SPRITE_BARREL: u16 = 5;
pub const SPRITE_PILLAR: u16 = 6;
pub const SPRITE_LAMP: u16 = 7;
pub const SPRITE_PLANT: u16 = 8;

/// Brick wall with offset courses and warm tint
pub fn brick(size: usize) -> Texture {
    let mut tex = Texture::new(size);
    let brick_w = (size / 2).max(2);
    let brick_h = (size / 4).max(2);

    for y in 0..size {
        for x in 0..size {
            let row = y / brick_h;
            let offset = if row % 2 == 0 { 0 } else { brick_w / 2 };
            let bx = (x + offset) % brick_w;
            let by = y % brick_h;

            if bx == 0 || by == 0 {
                tex.set_color(x, y, Color::rgb(40, 38, 35));
            } else {
                let brick_id = (row * 13 + ((x + offset) / brick_w) * 29) & 0xFF;
                let v = (130 + (brick_id & 0x3F)).min(255) as u8;
                let g = (v as f32 * 0.75) as u8;
                let b = (v as f32 * 0.55) as u8;
                tex.set_color(x, y, Color::rgb(v, g, b));
            }
        }
    }
    tex
}

/// Speckled grey stone blocks
pub fn stone(size: usize) -> Texture {
    let mut tex = Texture::new(size);
    let mut rng = Rng::new(0x5709E);
    let block = (size / 2).max(2);

    for y in 0..size {
        for x in 0..size {
            let seam = x % block == 0 || y % block == 0;
            let grain = rng.range_f32(-18.0, 18.0);
            let base = if seam { 70.0 } else { 128.0 + grain };
            let v = base.clamp(0.0, 255.0) as u8;
            tex.set_color(x, y, Color::rgb(v, v, v.saturating_add(6)));
        }
    }
    tex
}

/// Vertical wooden planks
pub fn wood(size: usize) -> Texture {
    let mut tex = Texture::new(size);
    let plank = (size / 4).max(2);

    for y in 0..size {
        for x in 0..size {
            if x % plank == 0 {
                tex.set_color(x, y, Color::rgb(60, 36, 18));
                continue;
            }
            let ring = ((y as f32 * 0.9 + (x / plank) as f32 * 2.3).sin() * 0.5 + 0.5) * 30.0;
            let r = (120.0 + ring) as u8;
            let g = (76.0 + ring * 0.6) as u8;
            let b = (40.0 + ring * 0.3) as u8;
            tex.set_color(x, y, Color::rgb(r, g, b));
        }
    }
    tex
}

/// Riveted steel panel
pub fn metal(size: usize) -> Texture {
    let mut tex = Texture::new(size);
    let edge = size - 1;
    let inset = (size / 8).max(1);

    for y in 0..size {
        for x in 0..size {
            let border = x == 0 || y == 0 || x == edge || y == edge;
            let rivet = (x == inset || x == edge - inset) && (y == inset || y == edge - inset);
            let shine = (x + y) as f32 / (2 * size) as f32;
            let color = if border {
                Color::rgb(50, 56, 64)
            } else if rivet {
                Color::rgb(200, 205, 210)
            } else {
                Color::rgb(92, 104, 118).lerp(Color::rgb(150, 160, 172), shine)
            };
            tex.set_color(x, y, color);
        }
    }
    tex
}

/// Banded barrel standing on the floor
pub fn barrel(size: usize) -> Texture {
    let mut tex = Texture::new(size);
    let s = size as f32;
    let center = (s - 1.0) / 2.0;
    let radius = s * 0.35;
    let top = (s * 0.35) as usize;
    let band_a = (s * 0.5) as usize;
    let band_b = (s * 0.8) as usize;

    for y in top..size {
        for x in 0..size {
            let dx = (x as f32 - center) / radius;
            if dx.abs() > 1.0 {
                continue;
            }
            let light = 1.0 - dx.abs() * 0.5;
            let base = if y == band_a || y == band_b || y == top {
                Color::rgb(90, 90, 96)
            } else {
                Color::rgb(150, 60, 30)
            };
            tex.set_color(x, y, base.scale(light));
        }
    }
    tex
}

/// Stone column running floor to ceiling
pub fn pillar(size: usize) -> Texture {
    let mut tex = Texture::new(size);
    let s = size as f32;
    let center = (s - 1.0) / 2.0;
    let shaft = s * 0.22;
    let cap = s * 0.34;
    let cap_rows = (size / 8).max(1);

    for y in 0..size {
        let half_width = if y < cap_rows || y >= size - cap_rows {
            cap
        } else {
            shaft
        };
        for x in 0..size {
            let dx = x as f32 - center;
            if dx.abs() > half_width {
                continue;
            }
            let light = 1.0 - (dx / half_width).abs() * 0.4;
            tex.set_color(x, y, Color::rgb(190, 186, 170).scale(light));
        }
    }
    tex
}

/// Hanging ceiling lamp
pub fn lamp(size: usize) -> Texture {
    let mut tex = Texture::new(size);
    let s = size as f32;
    let center = (s - 1.0) / 2.0;
    let cord_end = (s * 0.2) as usize;
    let shade_end = (s * 0.35) as usize;

    for y in 0..shade_end {
        for x in 0..size {
            let dx = (x as f32 - center).abs();
            if y < cord_end {
                if dx < 0.75 {
                    tex.set_color(x, y, Color::rgb(30, 30, 30));
                }
            } else {
                let spread = 1.0 + (y - cord_end) as f32 * 1.2;
                if dx <= spread {
                    tex.set_color(x, y, Color::rgb(255, 230, 150));
                }
            }
        }
    }
    tex
}

/// Potted plant
pub fn plant(size: usize) -> Texture {
    let mut tex = Texture::new(size);
    let mut rng = Rng::new(0x91A47);
    let s = size as f32;
    let center = (s - 1.0) / 2.0;
    let pot_top = (s * 0.75) as usize;
    let leaf_top = (s * 0.3) as usize;

    for y in leaf_top..pot_top {
        let t = (y - leaf_top) as f32 / (pot_top - leaf_top).max(1) as f32;
        let half_width = s * (0.15 + 0.25 * (t * std::f32::consts::PI).sin());
        for x in 0..size {
            if (x as f32 - center).abs() > half_width {
                continue;
            }
            let g = rng.range_f32(110.0, 190.0) as u8;
            tex.set_color(x, y, Color::rgb(30, g, 40));
        }
    }
    for y in pot_top..size {
        for x in 0..size {
            if (x as f32 - center).abs() <= s * 0.2 {
                tex.set_color(x, y, Color::rgb(140, 80, 50));
            }
        }
    }
    tex
}
