//! descent
//!
//! Wolfenstein-style software raycaster. A fixed pool of worker threads
//! renders textured walls column by column into a shared framebuffer and a
//! per-column depth buffer; billboard sprites are then composited back to
//! front against that depth buffer on the calling thread.

pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod math;
pub mod render;
pub mod texture;
pub mod util;
pub mod world;

pub use config::Config;
pub use error::DescentError;
pub use game::{GameState, Level};
pub use input::{Button, ButtonState};
pub use math::Vec2;
pub use render::{
    ColumnDispatch, DepthBuffer, InlineDispatch, PixelBuffer, Renderer, Shading, WorkerPool,
};
pub use texture::{Color, Texel, Texture, TextureBank};
pub use world::{Camera, Sprite, SpriteList, TileGrid};
