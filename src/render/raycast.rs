//! Wall Raycaster
//!
//! One ray per screen column, walked through the tile grid with a DDA
//! (grid-stepping) state machine until it enters a wall cell or leaves the
//! grid. The hit yields the perpendicular distance that sizes the wall
//! slice and becomes the column's depth value.

use std::sync::Arc;

use super::frame::FAR_DEPTH;
use super::shading::{Palette, ShadeInput, Shader, Shading, Side};
use crate::math::Vec2;
use crate::texture::{Color, TextureBank};
use crate::world::{Camera, TileGrid};

/// Step length substituted for an axis the ray never crosses.
/// Finite so `0 * BIG_STEP` stays zero instead of NaN.
const BIG_STEP: f32 = 1e30;

/// Nearest wall distance used for slice sizing, avoids dividing by zero
const MIN_DISTANCE: f32 = 1e-4;

/// Everything a worker reads while drawing walls. Cloning is two reference
/// count bumps; the grid and textures are never written during a pass.
#[derive(Debug, Clone)]
pub struct WallPass {
    pub camera: Camera,
    pub tiles: Arc<TileGrid>,
    pub textures: Arc<TextureBank>,
    pub palette: Palette,
    pub shading: Shading,
}

// ============================================================================
// DDA state machine
// ============================================================================

/// A wall found by the grid walk
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallHit {
    pub tile: u8,
    pub cell: (i32, i32),
    pub side: Side,
    /// Distance along the camera's forward axis (no fisheye)
    pub distance: f32,
    /// Where along the face the ray landed, in [0, 1)
    pub wall_x: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarchOutcome {
    Hit(WallHit),
    /// Left the grid or ran out of steps without meeting a wall
    Escaped,
}

/// Grid walk state: current cell, distance along the ray to the next
/// vertical/horizontal grid line, the per-cell increments of those
/// distances and the step sign on each axis.
#[derive(Debug, Clone, Copy)]
pub struct RayMarch {
    origin: Vec2,
    dir: Vec2,
    cell: (i32, i32),
    side_dist: Vec2,
    delta: Vec2,
    step: (i32, i32),
    side: Side,
}

impl RayMarch {
    pub fn new(origin: Vec2, dir: Vec2) -> Self {
        let cell = (origin.x.floor() as i32, origin.y.floor() as i32);
        let delta = Vec2::new(axis_delta(dir.x), axis_delta(dir.y));

        let (step_x, side_x) = if dir.x < 0.0 {
            (-1, (origin.x - cell.0 as f32) * delta.x)
        } else {
            (1, (cell.0 as f32 + 1.0 - origin.x) * delta.x)
        };
        let (step_y, side_y) = if dir.y < 0.0 {
            (-1, (origin.y - cell.1 as f32) * delta.y)
        } else {
            (1, (cell.1 as f32 + 1.0 - origin.y) * delta.y)
        };

        Self {
            origin,
            dir,
            cell,
            side_dist: Vec2::new(side_x, side_y),
            delta,
            step: (step_x, step_y),
            side: Side::X,
        }
    }

    /// Move into the next cell along whichever axis reaches its grid line first
    #[inline]
    pub fn advance(&mut self) {
        if self.side_dist.x < self.side_dist.y {
            self.side_dist.x += self.delta.x;
            self.cell.0 += self.step.0;
            self.side = Side::X;
        } else {
            self.side_dist.y += self.delta.y;
            self.cell.1 += self.step.1;
            self.side = Side::Y;
        }
    }

    #[inline]
    pub fn cell(&self) -> (i32, i32) {
        self.cell
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Perpendicular distance to the grid line crossed by the last advance
    #[inline]
    pub fn perp_distance(&self) -> f32 {
        let d = match self.side {
            Side::X => self.side_dist.x - self.delta.x,
            Side::Y => self.side_dist.y - self.delta.y,
        };
        d.max(0.0)
    }

    /// Walk until a wall, the grid edge or `max_steps` cells
    pub fn run(mut self, grid: &TileGrid, max_steps: usize) -> MarchOutcome {
        for _ in 0..max_steps {
            self.advance();
            match grid.get(self.cell.0, self.cell.1) {
                None => return MarchOutcome::Escaped,
                Some(0) => {},
                Some(tile) => return MarchOutcome::Hit(self.hit(tile)),
            }
        }
        MarchOutcome::Escaped
    }

    fn hit(&self, tile: u8) -> WallHit {
        let distance = self.perp_distance();
        let along = match self.side {
            Side::X => self.origin.y + distance * self.dir.y,
            Side::Y => self.origin.x + distance * self.dir.x,
        };
        WallHit {
            tile,
            cell: self.cell,
            side: self.side,
            distance,
            wall_x: along - along.floor(),
        }
    }
}

#[inline]
fn axis_delta(component: f32) -> f32 {
    if component == 0.0 {
        BIG_STEP
    } else {
        (1.0 / component).abs().min(BIG_STEP)
    }
}

/// Upper bound on cells a ray can visit before it must have left the grid
#[inline]
pub fn max_steps(grid: &TileGrid) -> usize {
    grid.width() + grid.height() + 2
}

// ============================================================================
// Column rendering
// ============================================================================

/// Render screen column `x` of a `width`-wide frame into `column`
/// (top row first) and return the depth value for that column.
///
/// Degenerate cameras and rays that escape the grid produce a background
/// column and `FAR_DEPTH`.
pub fn render_column(pass: &WallPass, x: usize, width: usize, column: &mut [Color]) -> f32 {
    let camera = &pass.camera;
    if camera.is_degenerate() {
        column.fill(pass.palette.background);
        return FAR_DEPTH;
    }

    let dir = camera.ray_dir(x, width);
    if !dir.is_finite() || dir.length_squared() <= f32::EPSILON {
        column.fill(pass.palette.background);
        return FAR_DEPTH;
    }

    match RayMarch::new(camera.pos, dir).run(&pass.tiles, max_steps(&pass.tiles)) {
        MarchOutcome::Hit(hit) => {
            draw_slice(pass, &hit, dir, column);
            hit.distance
        },
        MarchOutcome::Escaped => {
            column.fill(pass.palette.background);
            FAR_DEPTH
        },
    }
}

/// On-screen rows of a wall slice: `(top, bottom, full_height)`, where
/// `top..bottom` is clipped to the column and `full_height` is unclipped
#[inline]
pub fn slice_span(height: usize, distance: f32) -> (i64, i64, i64) {
    let h = height as i64;
    let line = (height as f32 / distance.max(MIN_DISTANCE)) as i64;
    let top = h / 2 - line / 2;
    (top.clamp(0, h), (top + line).clamp(0, h), line.max(1))
}

fn draw_slice(pass: &WallPass, hit: &WallHit, dir: Vec2, column: &mut [Color]) {
    let height = column.len();
    let (top, bottom, line) = slice_span(height, hit.distance);
    let unclipped_top = height as i64 / 2 - line / 2;
    let (top, bottom) = (top as usize, bottom as usize);

    column[..top].fill(pass.palette.ceiling);
    column[bottom..].fill(pass.palette.floor);

    let input = ShadeInput {
        distance: hit.distance,
        side: hit.side,
    };

    let Some(texture) = pass.textures.get(hit.tile as usize) else {
        let missing = pass.shading.shade(pass.palette.missing, input);
        column[top..bottom].fill(missing);
        return;
    };

    let n = texture.size();
    let mut tex_col = ((hit.wall_x * n as f32) as usize).min(n - 1);
    // Keep textures reading left-to-right whichever way the face is seen
    if (hit.side == Side::X && dir.x > 0.0) || (hit.side == Side::Y && dir.y < 0.0) {
        tex_col = n - 1 - tex_col;
    }

    for (y, pixel) in column.iter_mut().enumerate().take(bottom).skip(top) {
        let tex_row = ((y as i64 - unclipped_top) * n as i64 / line).clamp(0, n as i64 - 1);
        let color = texture
            .texel(tex_col, tex_row as usize)
            .color_or(pass.palette.missing);
        *pixel = pass.shading.shade(color, input);
    }
}
