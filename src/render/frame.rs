use crate::texture::Color;

/// Depth recorded for a column whose ray never reached a wall
pub const FAR_DEPTH: f32 = f32::INFINITY;

// ============================================================================
// PixelBuffer
// ============================================================================

/// Row-major framebuffer of packed colors.
/// Sized once at startup; the host reads it only between ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pixels: Vec<Color>,
    width: usize,
    height: usize,
}

impl PixelBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![Color::BLACK; width * height],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Clear to a solid color
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Read a pixel (bounds checked)
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Set a pixel (bounds checked)
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    /// One row of pixels
    #[inline]
    pub fn row(&self, y: usize) -> &[Color] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [Color] {
        &mut self.pixels[y * self.width..(y + 1) * self.width]
    }

    #[inline]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Raw bytes for texture upload (native-endian `0x00RRGGBB` words)
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Bytes per row
    #[inline]
    pub fn pitch(&self) -> usize {
        self.width * std::mem::size_of::<Color>()
    }
}

// ============================================================================
// DepthBuffer
// ============================================================================

/// One perpendicular wall distance per screen column
#[derive(Debug, Clone, PartialEq)]
pub struct DepthBuffer {
    depth: Vec<f32>,
}

impl DepthBuffer {
    pub fn new(width: usize) -> Self {
        Self {
            depth: vec![FAR_DEPTH; width],
        }
    }

    /// Forget last tick's walls
    pub fn reset(&mut self) {
        self.depth.fill(FAR_DEPTH);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.depth.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.depth.is_empty()
    }

    /// Depth at a column; columns outside the buffer are treated as blocked
    #[inline]
    pub fn at(&self, x: usize) -> f32 {
        self.depth.get(x).copied().unwrap_or(0.0)
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.depth
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.depth
    }
}
