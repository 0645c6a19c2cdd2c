use std::ops::Range;

use super::frame::{DepthBuffer, PixelBuffer, FAR_DEPTH};
use super::raycast::{render_column, WallPass};
use crate::texture::Color;

/// A contiguous run of screen columns rendered by one worker.
///
/// Pixels are stored column-major so each column is one contiguous slice;
/// the strip is copied into the shared framebuffer once every worker is
/// done. Allocated once and reused every tick.
#[derive(Debug, Clone)]
pub struct ColumnStrip {
    columns: Range<usize>,
    height: usize,
    pixels: Vec<Color>,
    depth: Vec<f32>,
}

impl ColumnStrip {
    pub fn new(columns: Range<usize>, height: usize) -> Self {
        let count = columns.len();
        Self {
            columns,
            height,
            pixels: vec![Color::BLACK; count * height],
            depth: vec![FAR_DEPTH; count],
        }
    }

    /// Depth values in column order
    #[inline]
    pub fn depth(&self) -> &[f32] {
        &self.depth
    }

    /// One rendered column, top row first. `x` is a screen column.
    pub fn column(&self, x: usize) -> Option<&[Color]> {
        if !self.columns.contains(&x) {
            return None;
        }
        let i = x - self.columns.start;
        Some(&self.pixels[i * self.height..(i + 1) * self.height])
    }

    /// Cast every column of the strip for a `width`-wide frame
    pub fn render(&mut self, pass: &WallPass, width: usize) {
        if self.height == 0 {
            self.depth.fill(FAR_DEPTH);
            return;
        }
        for ((x, column), depth) in self
            .columns
            .clone()
            .zip(self.pixels.chunks_exact_mut(self.height))
            .zip(self.depth.iter_mut())
        {
            *depth = render_column(pass, x, width, column);
        }
    }

    /// Copy the strip into its columns of the frame and depth buffer.
    /// Columns beyond the frame are dropped.
    pub fn blit(&self, frame: &mut PixelBuffer, depth: &mut DepthBuffer) {
        let end = self.columns.end.min(frame.width());
        if self.columns.start >= end {
            return;
        }
        let rows = self.height.min(frame.height());

        for y in 0..rows {
            let row = &mut frame.row_mut(y)[self.columns.start..end];
            for (i, pixel) in row.iter_mut().enumerate() {
                *pixel = self.pixels[i * self.height + y];
            }
        }

        let depth_end = end.min(depth.len());
        if self.columns.start < depth_end {
            let n = depth_end - self.columns.start;
            depth.as_mut_slice()[self.columns.start..depth_end].copy_from_slice(&self.depth[..n]);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::math::Vec2;
    use crate::render::shading::{Palette, Shading};
    use crate::texture::{TextureBank, TEXTURE_SIZE};
    use crate::world::{Camera, TileGrid};

    fn pass() -> WallPass {
        WallPass {
            camera: Camera::looking(Vec2::new(4.5, 4.5), 0.4, 0.66),
            tiles: Arc::new(TileGrid::bordered(9, 9, 2)),
            textures: Arc::new(TextureBank::standard(TEXTURE_SIZE)),
            palette: Palette::default(),
            shading: Shading::default(),
        }
    }

    #[test]
    fn test_strip_matches_direct_columns() {
        let pass = pass();
        let mut strip = ColumnStrip::new(10..20, 24);
        strip.render(&pass, 32);

        for x in 10..20 {
            let mut direct = vec![Color::BLACK; 24];
            let d = render_column(&pass, x, 32, &mut direct);
            assert_eq!(strip.column(x), Some(direct.as_slice()));
            assert_eq!(strip.depth()[x - 10], d);
        }
        assert_eq!(strip.column(20), None);
    }

    #[test]
    fn test_blit_writes_only_its_columns() {
        let pass = pass();
        let mut strip = ColumnStrip::new(4..8, 6);
        strip.render(&pass, 16);

        let mut frame = PixelBuffer::new(16, 6);
        frame.clear(Color::WHITE);
        let mut depth = DepthBuffer::new(16);
        strip.blit(&mut frame, &mut depth);

        for y in 0..6 {
            assert_eq!(frame.get(3, y), Some(Color::WHITE));
            assert_eq!(frame.get(8, y), Some(Color::WHITE));
            assert_eq!(frame.get(5, y), strip.column(5).map(|c| c[y]));
        }
        assert_eq!(depth.at(3), FAR_DEPTH);
        assert_eq!(depth.at(6), strip.depth()[2]);
    }
}
