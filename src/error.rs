//! Error types
//!
//! Everything that can fail at startup or while loading content. The
//! per-tick render path never returns these; it degrades to fallback pixels.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DescentError {
    /// Config or level file could not be read or written.
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config or level file is not valid JSON for its schema.
    #[error("malformed json in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid level: {0}")]
    InvalidLevel(String),

    #[error("sprite capacity {capacity} exceeded")]
    SpriteCapacity { capacity: usize },

    #[error("texture capacity {capacity} exceeded")]
    TextureCapacity { capacity: usize },

    #[error("texture is {actual}x{actual}, bank holds {expected}x{expected}")]
    TextureSize { expected: usize, actual: usize },

    /// A worker thread could not be started. The pool is torn down.
    #[error("failed to spawn render worker {index}: {source}")]
    WorkerSpawn {
        index: usize,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, DescentError>;
