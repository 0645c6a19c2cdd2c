mod display;

use std::path::PathBuf;
use std::process::ExitCode;

use descent::config::DEFAULT_CONFIG_PATH;
use descent::util::{FpsCounter, TickPacer};
use descent::{Button, Config, GameState, Level, Renderer, TextureBank};
use display::{Display, InputEvent, RenderTarget};
use sdl2::keyboard::Keycode;
use tracing::{debug, error, info, warn};

/// Longest simulated step; a stall (window drag, breakpoint) must not
/// teleport the camera through walls
const MAX_FRAME_DELTA: f32 = 0.1;

/// Command-line overrides applied on top of the config file
#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    level: Option<PathBuf>,
    width: Option<usize>,
    height: Option<usize>,
    workers: Option<usize>,
    no_vsync: bool,
    fullscreen: bool,
}

fn print_help() {
    println!("Usage: descent [OPTIONS]");
    println!();
    println!("Options:");
    println!(
        "  --config PATH, -c PATH  Config file (default: {})",
        DEFAULT_CONFIG_PATH
    );
    println!("  --level PATH, -l PATH   Level file (default: built-in map)");
    println!("  --width W, -w W         Framebuffer width");
    println!("  --height H, -h H        Framebuffer height");
    println!("  --workers N, -j N       Wall-pass worker threads");
    println!("  --no-vsync              Pace ticks with a timer instead of the display");
    println!("  --fullscreen            Start fullscreen");
    println!("  --help                  Show this help message");
    println!();
    println!("Controls:");
    println!("  Arrows / WASD  - Turn and walk");
    println!("  F11            - Toggle fullscreen");
    println!("  Escape         - Quit");
}

fn parse_args() -> Args {
    let argv: Vec<String> = std::env::args().collect();
    let mut args = Args::default();

    let mut i = 1;
    while i < argv.len() {
        let value = argv.get(i + 1);
        match argv[i].as_str() {
            "--no-vsync" => args.no_vsync = true,
            "--fullscreen" => args.fullscreen = true,
            "--config" | "-c" => {
                args.config = value.map(PathBuf::from);
                i += 1;
            },
            "--level" | "-l" => {
                args.level = value.map(PathBuf::from);
                i += 1;
            },
            "--width" | "-w" => {
                args.width = value.and_then(|v| v.parse().ok());
                i += 1;
            },
            "--height" | "-h" => {
                args.height = value.and_then(|v| v.parse().ok());
                i += 1;
            },
            "--workers" | "-j" => {
                args.workers = value.and_then(|v| v.parse().ok());
                i += 1;
            },
            "--help" => {
                print_help();
                std::process::exit(0);
            },
            other => warn!(arg = other, "ignoring unknown argument"),
        }
        i += 1;
    }

    args
}

fn load_config(args: &Args) -> descent::error::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(DEFAULT_CONFIG_PATH)?,
    };

    if let Some(level) = &args.level {
        config.level = Some(level.clone());
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if args.no_vsync {
        config.vsync = false;
    }
    if args.fullscreen {
        config.fullscreen = true;
    }

    config.validate()?;
    Ok(config)
}

fn button_for(key: Keycode) -> Option<Button> {
    match key {
        Keycode::Left | Keycode::A => Some(Button::Left),
        Keycode::Up | Keycode::W => Some(Button::Up),
        Keycode::Right | Keycode::D => Some(Button::Right),
        Keycode::Down | Keycode::S => Some(Button::Down),
        _ => None,
    }
}

fn run(config: Config) -> Result<(), String> {
    let level = match &config.level {
        Some(path) => Level::load(path).map_err(|e| e.to_string())?,
        None => Level::builtin(),
    };
    let textures = TextureBank::standard(config.texture_size);
    let mut state = GameState::new(&config, &level, textures).map_err(|e| e.to_string())?;
    let mut renderer = Renderer::new(&config).map_err(|e| e.to_string())?;

    let (width, height) = (config.width as u32, config.height as u32);
    let (mut display, texture_creator) =
        Display::with_options("descent", width, height, config.vsync, config.fullscreen)?;
    let mut target = RenderTarget::with_size(&texture_creator, width, height)?;

    info!(
        width,
        height,
        workers = renderer.worker_count(),
        vsync = config.vsync,
        level = %level.name,
        "descent started"
    );

    let mut fps_counter = FpsCounter::new(60);
    let mut pacer = (!config.vsync).then(|| TickPacer::new(config.tick_rate));
    let mut since_report = 0.0;

    'main: loop {
        let (dt, avg_fps) = fps_counter.tick();

        for event in display.poll_events() {
            match event {
                InputEvent::Quit | InputEvent::KeyDown(Keycode::Escape) => break 'main,
                InputEvent::KeyDown(Keycode::F11) => {
                    if let Err(e) = display.toggle_fullscreen() {
                        warn!(error = %e, "fullscreen toggle failed");
                    }
                },
                InputEvent::KeyDown(key) => {
                    if let Some(button) = button_for(key) {
                        state.buttons.press(button);
                    }
                },
                InputEvent::KeyUp(key) => {
                    if let Some(button) = button_for(key) {
                        state.buttons.release(button);
                    }
                },
                InputEvent::FocusLost => state.buttons.release_all(),
            }
        }

        state.frame_delta = dt.min(MAX_FRAME_DELTA);
        renderer.tick(&mut state);
        display.present(&mut target, &state.pixels)?;

        since_report += dt;
        if since_report >= 1.0 {
            since_report = 0.0;
            let (min_fps, max_fps) = fps_counter.min_max_fps();
            debug!(
                avg_fps = avg_fps as u32,
                min_fps = min_fps as u32,
                max_fps = max_fps as u32,
                frame_ms = fps_counter.avg_frame_time_ms(),
                pos = ?state.camera.pos,
                "frame stats"
            );
        }

        if let Some(pacer) = pacer.as_mut() {
            pacer.wait();
        }
    }

    info!(seconds = state.total_time, "descent stopped");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args();
    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "configuration rejected");
            return ExitCode::FAILURE;
        },
    };

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "descent failed");
            ExitCode::FAILURE
        },
    }
}
