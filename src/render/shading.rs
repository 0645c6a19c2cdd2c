//! Wall shading and the fixed frame colors
//!
//! Shading is a plain function of the sampled texel, the wall distance and
//! the axis the ray crossed. `Shading` covers the configurable variants;
//! anything implementing `Shader` can stand in for it.

use serde::{Deserialize, Serialize};

use crate::texture::Color;

/// Grid axis whose line the ray crossed when it hit the wall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Crossed a vertical grid line (east/west face)
    X,
    /// Crossed a horizontal grid line (north/south face)
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadeInput {
    pub distance: f32,
    pub side: Side,
}

pub trait Shader {
    fn shade(&self, color: Color, input: ShadeInput) -> Color;
}

/// Built-in wall shading models
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Shading {
    /// Texels as stored
    Flat,
    /// North/south faces darkened by `dim`
    Side { dim: f32 },
    /// Side dimming plus linear falloff to `min` brightness at `range` tiles
    Fog { range: f32, min: f32, dim: f32 },
}

impl Default for Shading {
    fn default() -> Self {
        Self::Side { dim: 0.7 }
    }
}

impl Shader for Shading {
    #[inline]
    fn shade(&self, color: Color, input: ShadeInput) -> Color {
        let side_factor = |dim: f32| if input.side == Side::Y { dim } else { 1.0 };
        match *self {
            Self::Flat => color,
            Self::Side { dim } => color.scale(side_factor(dim)),
            Self::Fog { range, min, dim } => {
                let falloff = if range > 0.0 {
                    (1.0 - input.distance / range).max(min)
                } else {
                    1.0
                };
                color.scale(falloff * side_factor(dim))
            },
        }
    }
}

/// Fixed colors used around the textured walls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub ceiling: Color,
    pub floor: Color,
    /// Painted over whole columns that cannot be rendered
    pub background: Color,
    /// Wall color for tile ids with no texture in the bank
    pub missing: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            ceiling: Color::rgb(56, 56, 64),
            floor: Color::rgb(112, 112, 112),
            background: Color::BLACK,
            missing: Color::MAGENTA,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREY: Color = Color::rgb(200, 200, 200);

    fn input(distance: f32, side: Side) -> ShadeInput {
        ShadeInput { distance, side }
    }

    #[test]
    fn test_flat_is_identity() {
        assert_eq!(Shading::Flat.shade(GREY, input(50.0, Side::Y)), GREY);
    }

    #[test]
    fn test_side_dims_y_faces_only() {
        let s = Shading::Side { dim: 0.5 };
        assert_eq!(s.shade(GREY, input(3.0, Side::X)), GREY);
        assert_eq!(s.shade(GREY, input(3.0, Side::Y)), Color::rgb(100, 100, 100));
    }

    #[test]
    fn test_fog_falls_off_to_floor() {
        let s = Shading::Fog {
            range: 10.0,
            min: 0.25,
            dim: 1.0,
        };
        assert_eq!(s.shade(GREY, input(0.0, Side::X)), GREY);
        assert_eq!(s.shade(GREY, input(5.0, Side::X)), Color::rgb(100, 100, 100));
        assert_eq!(s.shade(GREY, input(500.0, Side::X)), Color::rgb(50, 50, 50));
    }

    #[test]
    fn test_shading_json() {
        let s: Shading = serde_json::from_str(r#"{"mode":"side","dim":0.5}"#).unwrap();
        assert_eq!(s, Shading::Side { dim: 0.5 });
        let s: Shading = serde_json::from_str(r#"{"mode":"flat"}"#).unwrap();
        assert_eq!(s, Shading::Flat);
    }
}
