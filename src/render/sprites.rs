//! Billboard sprite compositor
//!
//! Runs on the calling thread after the wall pass. Sprites are projected
//! into camera space, sorted far to near and drawn column by column; a
//! column is only touched where the sprite is strictly nearer than the
//! wall recorded in the depth buffer, and transparent texels are skipped.

use super::frame::{DepthBuffer, PixelBuffer};
use crate::texture::{Texel, Texture, TextureBank};
use crate::world::{Camera, Sprite};

/// Per-tick scratch for the sprite pass, sized to the sprite capacity so
/// compositing never allocates
#[derive(Debug, Clone)]
pub struct SpriteScratch {
    /// Squared distance from the camera, indexed like the sprite list
    pub distances: Vec<f32>,
    /// Draw order (indices into the sprite list), farthest first
    pub order: Vec<usize>,
}

impl SpriteScratch {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            distances: vec![0.0; capacity],
            order: vec![0; capacity],
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.distances.len().min(self.order.len())
    }
}

/// Screen-space footprint of one projected sprite
#[derive(Debug, Clone, Copy, PartialEq)]
struct Billboard {
    /// Camera-space depth
    depth: f32,
    /// Unclipped bounds; `right - left == size`, `bottom - top == size`
    left: i64,
    top: i64,
    size: i64,
}

/// Fill `scratch.order` with the draw order for `sprites` (farthest
/// first; equal distances keep insertion order) and return how many
/// entries are valid. Sprites past the scratch capacity are ignored.
pub fn sort_sprites(camera: &Camera, sprites: &[Sprite], scratch: &mut SpriteScratch) -> usize {
    let count = sprites.len().min(scratch.capacity());
    let SpriteScratch { distances, order } = scratch;

    for (i, sprite) in sprites.iter().take(count).enumerate() {
        distances[i] = (sprite.pos - camera.pos).length_squared();
        order[i] = i;
    }

    order[..count].sort_unstable_by(|&a, &b| {
        distances[b]
            .total_cmp(&distances[a])
            .then_with(|| a.cmp(&b))
    });
    count
}

/// Composite every live sprite into `pixels`, back to front
pub fn composite_sprites(
    camera: &Camera,
    sprites: &[Sprite],
    textures: &TextureBank,
    depth: &DepthBuffer,
    pixels: &mut PixelBuffer,
    scratch: &mut SpriteScratch,
) {
    if sprites.is_empty() || camera.is_degenerate() {
        return;
    }

    let count = sort_sprites(camera, sprites, scratch);
    for &index in &scratch.order[..count] {
        let sprite = &sprites[index];
        let Some(texture) = textures.get(sprite.texture as usize) else {
            continue;
        };
        let Some(billboard) = project(camera, sprite, pixels.width(), pixels.height()) else {
            continue;
        };
        draw_billboard(&billboard, texture, depth, pixels);
    }
}

/// Minimum camera-space depth a sprite must have to be drawn
const NEAR_PLANE: f32 = 1e-3;

fn project(camera: &Camera, sprite: &Sprite, width: usize, height: usize) -> Option<Billboard> {
    let t = camera.to_camera_space(sprite.pos)?;
    // Behind the camera or too close to it to have a bounded screen size
    if !t.is_finite() || t.y < NEAR_PLANE {
        return None;
    }

    let screen_x = (width as f32 / 2.0) * (1.0 + t.x / t.y);
    let size = (height as f32 / t.y).abs();
    if !screen_x.is_finite() || !size.is_finite() {
        return None;
    }
    // Entirely left or right of the frame
    if screen_x + size / 2.0 < 0.0 || screen_x - size / 2.0 > width as f32 {
        return None;
    }

    let size = size as i64;
    if size <= 0 {
        return None;
    }
    let center_x = screen_x.floor() as i64;
    Some(Billboard {
        depth: t.y,
        left: center_x - size / 2,
        top: height as i64 / 2 - size / 2,
        size,
    })
}

fn draw_billboard(
    billboard: &Billboard,
    texture: &Texture,
    depth: &DepthBuffer,
    pixels: &mut PixelBuffer,
) {
    let (w, h) = (pixels.width() as i64, pixels.height() as i64);
    let n = texture.size() as i64;
    let x0 = billboard.left.clamp(0, w);
    let x1 = (billboard.left + billboard.size).clamp(0, w);
    let y0 = billboard.top.clamp(0, h);
    let y1 = (billboard.top + billboard.size).clamp(0, h);

    for x in x0..x1 {
        if billboard.depth >= depth.at(x as usize) {
            continue;
        }
        let tex_col = ((x - billboard.left) * n / billboard.size).clamp(0, n - 1) as usize;
        for y in y0..y1 {
            let tex_row = ((y - billboard.top) * n / billboard.size).clamp(0, n - 1) as usize;
            if let Texel::Opaque(color) = texture.texel(tex_col, tex_row) {
                pixels.set(x as usize, y as usize, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2;
    use crate::texture::Color;

    const RED: Color = Color::rgb(255, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);

    fn bank() -> TextureBank {
        let mut bank = TextureBank::new(4, 8);
        bank.push(Texture::solid(4, RED)).unwrap();
        bank.push(Texture::solid(4, BLUE)).unwrap();
        let mut holed = Texture::solid(4, BLUE);
        for y in 0..4 {
            holed.set(0, y, Texel::Transparent);
        }
        bank.push(holed).unwrap();
        bank
    }

    fn camera() -> Camera {
        Camera::looking(Vec2::new(0.5, 0.5), 0.0, 0.66)
    }

    #[test]
    fn test_order_far_to_near_with_stable_ties() {
        let cam = camera();
        let sprites = [
            Sprite::new(3.5, 0.5, 0),
            Sprite::new(8.5, 0.5, 0),
            Sprite::new(3.5, 0.5, 1),
            Sprite::new(0.5, 5.5, 0),
        ];
        let mut scratch = SpriteScratch::with_capacity(8);
        let n = sort_sprites(&cam, &sprites, &mut scratch);
        assert_eq!(n, 4);
        assert_eq!(&scratch.order[..n], &[1, 3, 0, 2]);
    }

    #[test]
    fn test_nearer_sprite_painted_last() {
        let cam = camera();
        let sprites = [Sprite::new(2.5, 0.5, 0), Sprite::new(4.5, 0.5, 1)];
        let mut pixels = PixelBuffer::new(32, 32);
        let depth = DepthBuffer::new(32);
        let mut scratch = SpriteScratch::with_capacity(4);
        composite_sprites(&cam, &sprites, &bank(), &depth, &mut pixels, &mut scratch);
        assert_eq!(pixels.get(16, 16), Some(RED));
    }

    #[test]
    fn test_wall_occludes_sprite() {
        let cam = camera();
        let sprites = [Sprite::new(4.5, 0.5, 0)];
        let mut pixels = PixelBuffer::new(32, 32);
        let mut depth = DepthBuffer::new(32);
        // Wall in front on the left half only
        depth.as_mut_slice()[..16].fill(2.0);
        let mut scratch = SpriteScratch::with_capacity(4);
        composite_sprites(&cam, &sprites, &bank(), &depth, &mut pixels, &mut scratch);
        assert_eq!(pixels.get(15, 16), Some(Color::BLACK));
        assert_eq!(pixels.get(16, 16), Some(RED));
    }

    #[test]
    fn test_sprite_at_wall_depth_is_hidden() {
        let cam = camera();
        let sprites = [Sprite::new(4.5, 0.5, 0)];
        let mut pixels = PixelBuffer::new(32, 32);
        let mut depth = DepthBuffer::new(32);
        depth.as_mut_slice().fill(4.0);
        let mut scratch = SpriteScratch::with_capacity(4);
        composite_sprites(&cam, &sprites, &bank(), &depth, &mut pixels, &mut scratch);
        assert!(pixels.pixels().iter().all(|&c| c == Color::BLACK));
    }

    #[test]
    fn test_transparent_texels_show_background() {
        let cam = camera();
        // Depth 2 -> 16px wide sprite centered at column 16; texel column 0 is clear
        let sprites = [Sprite::new(2.5, 0.5, 2)];
        let mut pixels = PixelBuffer::new(32, 32);
        let depth = DepthBuffer::new(32);
        let mut scratch = SpriteScratch::with_capacity(4);
        composite_sprites(&cam, &sprites, &bank(), &depth, &mut pixels, &mut scratch);
        assert_eq!(pixels.get(8, 16), Some(Color::BLACK));
        assert_eq!(pixels.get(12, 16), Some(BLUE));
    }

    #[test]
    fn test_behind_camera_and_missing_texture_skipped() {
        let cam = camera();
        let sprites = [Sprite::new(-3.5, 0.5, 0), Sprite::new(3.5, 0.5, 99)];
        let mut pixels = PixelBuffer::new(16, 16);
        let depth = DepthBuffer::new(16);
        let mut scratch = SpriteScratch::with_capacity(4);
        composite_sprites(&cam, &sprites, &bank(), &depth, &mut pixels, &mut scratch);
        assert!(pixels.pixels().iter().all(|&c| c == Color::BLACK));
    }

    #[test]
    fn test_sprite_on_camera_plane_skipped() {
        let cam = Camera::looking(Vec2::new(0.0, 0.5), 0.0, 0.66);
        let sprites = [Sprite::new(1e-20, 0.5, 0), Sprite::new(1e-4, 0.5, 1)];
        let mut pixels = PixelBuffer::new(64, 48);
        let depth = DepthBuffer::new(64);
        let mut scratch = SpriteScratch::with_capacity(4);
        composite_sprites(&cam, &sprites, &bank(), &depth, &mut pixels, &mut scratch);
        assert!(pixels.pixels().iter().all(|&c| c == Color::BLACK));
    }

    #[test]
    fn test_sprite_far_off_to_the_side_skipped() {
        let cam = camera();
        let sprites = [Sprite::new(0.5 + 1e-3, 1e30, 0), Sprite::new(0.5 + 1e-3, -1e30, 1)];
        let mut pixels = PixelBuffer::new(32, 32);
        let depth = DepthBuffer::new(32);
        let mut scratch = SpriteScratch::with_capacity(4);
        composite_sprites(&cam, &sprites, &bank(), &depth, &mut pixels, &mut scratch);
        assert!(pixels.pixels().iter().all(|&c| c == Color::BLACK));
    }

    #[test]
    fn test_sprite_just_past_near_plane_fills_frame() {
        let cam = camera();
        let sprites = [Sprite::new(0.5 + 2e-3, 0.5, 0)];
        let mut pixels = PixelBuffer::new(32, 32);
        let depth = DepthBuffer::new(32);
        let mut scratch = SpriteScratch::with_capacity(4);
        composite_sprites(&cam, &sprites, &bank(), &depth, &mut pixels, &mut scratch);
        assert!(pixels.pixels().iter().all(|&c| c == RED));
    }
}
