//! End-to-end frame tests: config -> level -> state -> renderer.

use std::sync::Arc;

use descent::render::{partition_columns, FAR_DEPTH};
use descent::{
    Button, Camera, Color, Config, GameState, InlineDispatch, Level, Renderer, Sprite, Texture,
    TextureBank, TileGrid, Vec2, WorkerPool,
};

fn config(width: usize, height: usize, workers: usize) -> Config {
    Config {
        width,
        height,
        workers,
        ..Config::default()
    }
}

fn builtin_state(config: &Config) -> GameState {
    GameState::new(config, &Level::builtin(), TextureBank::standard(16)).unwrap()
}

fn render_inline(config: &Config, state: &mut GameState) {
    let dispatch = InlineDispatch::new(config.width, config.height, 1);
    Renderer::with_dispatch(dispatch, config).tick(state);
}

#[test]
fn test_worker_count_does_not_change_output() {
    let reference_config = config(161, 97, 1);
    let mut reference = builtin_state(&reference_config);
    reference.camera = Camera::looking(Vec2::new(3.3, 8.7), 0.35, 0.66);
    render_inline(&reference_config, &mut reference);

    for workers in [1, 3, 4, 7] {
        let cfg = config(161, 97, workers);
        let mut state = builtin_state(&cfg);
        state.camera = reference.camera;
        let mut renderer = Renderer::new(&cfg).unwrap();
        renderer.tick(&mut state);

        assert_eq!(state.pixels, reference.pixels, "workers = {workers}");
        assert_eq!(state.depth, reference.depth, "workers = {workers}");
    }
}

#[test]
fn test_every_column_written_with_valid_depth() {
    let cfg = config(120, 80, 4);
    let mut state = builtin_state(&cfg);
    let sentinel = Color::rgb(1, 2, 3);
    state.pixels.clear(sentinel);

    Renderer::new(&cfg).unwrap().tick(&mut state);

    assert!(state.pixels.pixels().iter().all(|&c| c != sentinel));
    for &d in state.depth.as_slice() {
        assert!(d >= 0.0 && !d.is_nan());
        // The built-in map is closed
        assert!(d < FAR_DEPTH);
    }
}

#[test]
fn test_idle_ticks_are_identical() {
    let cfg = config(96, 64, 3);
    let mut state = builtin_state(&cfg);
    let mut renderer = Renderer::new(&cfg).unwrap();

    renderer.tick(&mut state);
    let first = state.pixels.clone();
    let camera = state.camera;
    for _ in 0..5 {
        state.frame_delta = 1.0 / 60.0;
        renderer.tick(&mut state);
        assert_eq!(state.pixels, first);
        assert_eq!(state.camera, camera);
    }
    assert!((state.total_time - 5.0 / 60.0).abs() < 1e-5);
}

#[test]
fn test_held_button_moves_camera() {
    let cfg = config(64, 48, 2);
    let mut state = builtin_state(&cfg);
    let mut renderer = Renderer::new(&cfg).unwrap();
    let start = state.camera.pos;

    state.buttons.press(Button::Up);
    state.frame_delta = 0.1;
    renderer.tick(&mut state);
    assert!(state.camera.pos.x > start.x);

    state.buttons.release(Button::Up);
    let stopped = state.camera;
    renderer.tick(&mut state);
    assert_eq!(state.camera, stopped);
}

#[test]
fn test_flat_wall_slice_height() {
    // Head-on to a flat wall 4.5 tiles away: every slice is H/4.5 tall
    let rows: Vec<Vec<u8>> = (0..13)
        .map(|y| (0..12).map(|x| u8::from(y == 0 || y == 12 || x == 0 || x == 11)).collect())
        .collect();
    let level = Level {
        name: "hall".into(),
        tiles: rows,
        spawn: descent::game::Spawn {
            x: 6.5,
            y: 6.5,
            angle: 0.0,
        },
        sprites: Vec::new(),
    };
    let cfg = Config {
        shading: descent::Shading::Flat,
        ..config(64, 200, 2)
    };
    let mut state = GameState::new(&cfg, &level, TextureBank::standard(16)).unwrap();
    Renderer::new(&cfg).unwrap().tick(&mut state);

    let palette = cfg.palette;
    let expected = 200.0 / 4.5;
    let slice_rows = |x: usize| {
        (0..200)
            .filter(|&y| {
                let c = state.pixels.get(x, y).unwrap();
                c != palette.ceiling && c != palette.floor
            })
            .count()
    };

    let center = slice_rows(32);
    assert!((center as f32 - expected).abs() <= 1.0, "{center} vs {expected}");
    for x in 0..64 {
        assert!((state.depth.at(x) - 4.5).abs() < 1e-3, "column {x}");
        assert_eq!(slice_rows(x), center, "column {x}");
    }
}

#[test]
fn test_sprite_occluded_by_wall() {
    let mut bank = TextureBank::new(4, 8);
    bank.push(Texture::solid(4, Color::BLACK)).unwrap();
    bank.push(Texture::solid(4, Color::rgb(0, 80, 0))).unwrap();
    bank.push(Texture::solid(4, Color::rgb(255, 0, 0))).unwrap();

    // Pillar of wall at (5, 2); one sprite before it, one hidden behind it
    let mut rows = TileGrid::bordered(10, 5, 1).to_rows();
    rows[2][5] = 1;
    let level = Level {
        name: "occlusion".into(),
        tiles: rows,
        spawn: descent::game::Spawn {
            x: 1.5,
            y: 2.5,
            angle: 0.0,
        },
        sprites: Vec::new(),
    };
    let cfg = Config {
        shading: descent::Shading::Flat,
        ..config(64, 64, 2)
    };
    let mut state = GameState::new(&cfg, &level, bank).unwrap();

    state.add_sprite(Sprite::new(7.5, 2.5, 2)).unwrap();
    Renderer::new(&cfg).unwrap().tick(&mut state);
    let red = Color::rgb(255, 0, 0);
    assert!(state.pixels.pixels().iter().all(|&c| c != red));

    state.add_sprite(Sprite::new(3.5, 2.5, 2)).unwrap();
    Renderer::new(&cfg).unwrap().tick(&mut state);
    assert_eq!(state.pixels.get(32, 32), Some(red));
}

#[test]
fn test_workers_release_world_between_ticks() {
    let cfg = config(80, 60, 4);
    let mut state = builtin_state(&cfg);
    let mut renderer = Renderer::new(&cfg).unwrap();
    renderer.tick(&mut state);

    assert_eq!(Arc::strong_count(&state.tiles), 1);
    assert_eq!(Arc::strong_count(&state.textures), 1);

    // Editing the grid between ticks does not copy it
    let before = Arc::as_ptr(&state.tiles);
    state.tiles_mut().set(5, 5, 3);
    assert_eq!(Arc::as_ptr(&state.tiles), before);
    renderer.tick(&mut state);
}

#[test]
fn test_pool_partition_is_exact() {
    let pool = WorkerPool::new(4, 641, 10).unwrap();
    assert_eq!(pool.partition(), partition_columns(641, 4));
    let total: usize = pool.partition().iter().map(|r| r.len()).sum();
    assert_eq!(total, 641);
}

#[test]
fn test_degenerate_camera_renders_background() {
    let cfg = config(32, 24, 2);
    let mut state = builtin_state(&cfg);
    state.camera = Camera::new(Vec2::new(2.5, 8.5), Vec2::zero(), Vec2::zero());
    Renderer::new(&cfg).unwrap().tick(&mut state);

    let background = cfg.palette.background;
    assert!(state.pixels.pixels().iter().all(|&c| c == background));
    assert!(state.depth.as_slice().iter().all(|&d| d == FAR_DEPTH));
}

#[test]
fn test_mismatched_frame_is_cleared() {
    let cfg = config(32, 24, 1);
    let mut state = builtin_state(&cfg);
    state.pixels.clear(Color::rgb(1, 2, 3));
    state.depth.as_mut_slice().fill(0.5);

    let mut renderer = Renderer::with_dispatch(InlineDispatch::new(16, 24, 1), &cfg);
    renderer.tick(&mut state);
    renderer.tick(&mut state);

    let background = cfg.palette.background;
    assert!(state.pixels.pixels().iter().all(|&c| c == background));
    assert!(state.depth.as_slice().iter().all(|&d| d == FAR_DEPTH));
}
