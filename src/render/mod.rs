//! Frame rendering
//!
//! A tick integrates input, runs the wall pass across the worker pool and
//! composites sprites on the calling thread. The framebuffer is complete
//! when `Renderer::tick` returns.

pub mod dispatch;
pub mod frame;
pub mod pool;
pub mod raycast;
pub mod shading;
pub mod sprites;
pub mod strip;

pub use dispatch::{partition_columns, ColumnDispatch, InlineDispatch};
pub use frame::{DepthBuffer, PixelBuffer, FAR_DEPTH};
pub use pool::WorkerPool;
pub use raycast::{render_column, WallPass};
pub use shading::{Palette, Shader, Shading, Side};
pub use sprites::{composite_sprites, SpriteScratch};
pub use strip::ColumnStrip;

use tracing::error;

use crate::config::Config;
use crate::error::Result;
use crate::game::GameState;
use crate::input::{integrate, MoveParams};

/// Per-tick driver around a column dispatcher
pub struct Renderer {
    dispatch: Box<dyn ColumnDispatch>,
    palette: Palette,
    shading: Shading,
    movement: MoveParams,
    size_mismatch_logged: bool,
}

impl Renderer {
    /// Renderer backed by a worker pool of `config.workers` threads
    pub fn new(config: &Config) -> Result<Self> {
        let pool = WorkerPool::new(config.workers, config.width, config.height)?;
        Ok(Self::with_dispatch(pool, config))
    }

    /// Renderer over any dispatcher, e.g. `InlineDispatch` for tests
    pub fn with_dispatch(dispatch: impl ColumnDispatch + 'static, config: &Config) -> Self {
        Self {
            dispatch: Box::new(dispatch),
            palette: config.palette,
            shading: config.shading,
            movement: config.move_params(),
            size_mismatch_logged: false,
        }
    }

    #[inline]
    pub fn worker_count(&self) -> usize {
        self.dispatch.worker_count()
    }

    /// Advance one tick: move the camera by `frame_delta` of held input,
    /// then draw the frame.
    pub fn tick(&mut self, state: &mut GameState) {
        integrate(
            &mut state.camera,
            &state.buttons,
            &state.tiles,
            &self.movement,
            state.frame_delta,
        );
        state.total_time += state.frame_delta;
        self.render(state);
    }

    /// Draw walls then sprites for the current camera without moving it
    pub fn render(&mut self, state: &mut GameState) {
        let frame = (state.pixels.width(), state.pixels.height());
        if frame != self.dispatch.frame_size() || state.depth.len() != frame.0 {
            if !self.size_mismatch_logged {
                error!(
                    frame = ?frame,
                    dispatch = ?self.dispatch.frame_size(),
                    "framebuffer does not match the column partition, frame skipped"
                );
                self.size_mismatch_logged = true;
            }
            state.pixels.clear(self.palette.background);
            state.depth.reset();
            return;
        }

        let pass = WallPass {
            camera: state.camera,
            tiles: state.tiles.clone(),
            textures: state.textures.clone(),
            palette: self.palette,
            shading: self.shading,
        };

        state.depth.reset();
        self.dispatch.run(&pass, &mut state.pixels, &mut state.depth);
        drop(pass);

        composite_sprites(
            &state.camera,
            state.sprites.live(),
            &state.textures,
            &state.depth,
            &mut state.pixels,
            &mut state.sprite_scratch,
        );
    }
}
