//! Camera integration from held buttons
//!
//! Left/Right turn, Up/Down walk along the view direction. Collision is
//! resolved one axis at a time so the camera slides along walls.

use super::{Button, ButtonState};
use crate::world::{Camera, TileGrid};

/// Movement tuning, read from the config
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveParams {
    /// Tiles per second
    pub move_speed: f32,
    /// Radians per second
    pub turn_speed: f32,
    /// Minimum gap kept between the camera and a wall, in tiles
    pub radius: f32,
}

impl Default for MoveParams {
    fn default() -> Self {
        Self {
            move_speed: 3.0,
            turn_speed: 2.5,
            radius: 0.2,
        }
    }
}

/// Advance the camera by `dt` seconds of held input.
/// Nothing changes when no button is held or `dt` is zero.
pub fn integrate(
    camera: &mut Camera,
    buttons: &ButtonState,
    grid: &TileGrid,
    params: &MoveParams,
    dt: f32,
) {
    if dt <= 0.0 || !dt.is_finite() || !buttons.any_held() {
        return;
    }

    let mut turn = 0.0;
    if buttons.held(Button::Left) {
        turn -= 1.0;
    }
    if buttons.held(Button::Right) {
        turn += 1.0;
    }
    if turn != 0.0 {
        camera.rotate(turn * params.turn_speed * dt);
    }

    let mut walk = 0.0;
    if buttons.held(Button::Up) {
        walk += 1.0;
    }
    if buttons.held(Button::Down) {
        walk -= 1.0;
    }
    if walk == 0.0 {
        return;
    }

    let step = camera.dir * (walk * params.move_speed * dt);
    let pos = camera.pos;

    let probe_x = pos.x + step.x + params.radius * step.x.signum();
    if !grid.is_solid(probe_x.floor() as i32, pos.y.floor() as i32) {
        camera.pos.x += step.x;
    }
    let probe_y = pos.y + step.y + params.radius * step.y.signum();
    if !grid.is_solid(camera.pos.x.floor() as i32, probe_y.floor() as i32) {
        camera.pos.y += step.y;
    }
}
