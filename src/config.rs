//! Runtime configuration
//!
//! Loaded from a JSON file (`descent.json` by default) and then overridden
//! by command-line flags. Every field has a default, so a partial file or
//! no file at all is fine.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{DescentError, Result};
use crate::input::MoveParams;
use crate::render::{Palette, Shading};
use crate::texture::TEXTURE_SIZE;
use crate::world::{DEFAULT_FOV_SCALE, SPRITE_CAPACITY};

pub const DEFAULT_CONFIG_PATH: &str = "descent.json";

/// Upper bound on render workers; more than this is almost certainly a typo
pub const MAX_WORKERS: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Framebuffer width in pixels
    pub width: usize,
    /// Framebuffer height in pixels
    pub height: usize,
    /// Wall-pass worker threads
    pub workers: usize,
    /// Side length of every texture in the bank
    pub texture_size: usize,
    pub sprite_capacity: usize,
    /// Camera plane length relative to the view direction
    pub fov: f32,
    /// Tiles per second
    pub move_speed: f32,
    /// Radians per second
    pub turn_speed: f32,
    pub collision_radius: f32,
    /// Ticks per second when not synced to the display
    pub tick_rate: u32,
    pub vsync: bool,
    pub fullscreen: bool,
    pub palette: Palette,
    pub shading: Shading,
    /// Level file; the built-in map is used when unset
    pub level: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let movement = MoveParams::default();
        Self {
            width: 640,
            height: 480,
            workers: 4,
            texture_size: TEXTURE_SIZE,
            sprite_capacity: SPRITE_CAPACITY,
            fov: DEFAULT_FOV_SCALE,
            move_speed: movement.move_speed,
            turn_speed: movement.turn_speed,
            collision_radius: movement.radius,
            tick_rate: 60,
            vsync: true,
            fullscreen: false,
            palette: Palette::default(),
            shading: Shading::default(),
            level: None,
        }
    }
}

impl Config {
    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config: Self = read_json(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    /// Like `load`, but a missing file yields the defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        match Self::load(path) {
            Err(DescentError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                Ok(Self::default())
            },
            other => other,
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        write_json(path.as_ref(), self)
    }

    /// Reject values the renderer cannot run with
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: String| Err(DescentError::InvalidConfig(msg));

        if self.width == 0 || self.height == 0 {
            return fail(format!("frame size {}x{} is empty", self.width, self.height));
        }
        if self.workers == 0 || self.workers > MAX_WORKERS {
            return fail(format!("workers must be 1..={MAX_WORKERS}, got {}", self.workers));
        }
        if self.texture_size == 0 {
            return fail("texture_size must be positive".into());
        }
        if !(self.fov.is_finite() && self.fov > 0.0) {
            return fail(format!("fov must be positive, got {}", self.fov));
        }
        for (name, value) in [
            ("move_speed", self.move_speed),
            ("turn_speed", self.turn_speed),
            ("collision_radius", self.collision_radius),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return fail(format!("{name} must be a non-negative number, got {value}"));
            }
        }
        if self.collision_radius >= 0.5 {
            return fail("collision_radius must be below half a tile".into());
        }
        if self.tick_rate == 0 {
            return fail("tick_rate must be positive".into());
        }
        Ok(())
    }

    pub fn move_params(&self) -> MoveParams {
        MoveParams {
            move_speed: self.move_speed,
            turn_speed: self.turn_speed,
            radius: self.collision_radius,
        }
    }
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = fs::read_to_string(path).map_err(|source| DescentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| DescentError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|source| DescentError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| DescentError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::Color;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("descent-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!((config.width, config.height), (640, 480));
        assert_eq!(config.workers, 4);
        assert_eq!(config.sprite_capacity, 256);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: Config = serde_json::from_str(
            r#"{"workers": 2, "palette": {"floor": [1, 2, 3]}, "shading": {"mode": "flat"}}"#,
        )
        .unwrap();
        assert_eq!(config.workers, 2);
        assert_eq!(config.width, 640);
        assert_eq!(config.palette.floor, Color::rgb(1, 2, 3));
        assert_eq!(config.palette.missing, Color::MAGENTA);
        assert_eq!(config.shading, Shading::Flat);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            Config { workers: 0, ..Config::default() },
            Config { width: 0, ..Config::default() },
            Config { fov: f32::NAN, ..Config::default() },
            Config { move_speed: -1.0, ..Config::default() },
            Config { collision_radius: 0.5, ..Config::default() },
            Config { tick_rate: 0, ..Config::default() },
        ];
        for config in bad {
            assert!(
                matches!(config.validate(), Err(DescentError::InvalidConfig(_))),
                "{config:?}"
            );
        }
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("config.json");
        let config = Config {
            workers: 3,
            level: Some(PathBuf::from("maps/e1m1.json")),
            ..Config::default()
        };
        config.save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load_or_default(temp_path("absent.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_malformed_file_is_reported() {
        let path = temp_path("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let err = Config::load(&path).unwrap_err();
        let _ = fs::remove_file(&path);
        assert!(matches!(err, DescentError::Json { .. }));
    }
}
