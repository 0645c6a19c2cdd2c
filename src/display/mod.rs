//! SDL2 window, presentation and raw input
//!
//! Owns the window and event pump. The finished framebuffer is uploaded
//! to a streaming texture once per tick and stretched to the window.

use descent::PixelBuffer;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{FullscreenType, Window, WindowContext};
use sdl2::EventPump;

pub struct Display {
    canvas: Canvas<Window>,
    event_pump: EventPump,
    fullscreen: bool,
}

pub struct RenderTarget<'a> {
    texture: Texture<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    /// Includes auto-repeat
    KeyDown(Keycode),
    KeyUp(Keycode),
    /// Window lost keyboard focus; held keys will not see their key-up
    FocusLost,
}

impl Display {
    /// Open a centered window. `vsync` locks presentation to the monitor refresh.
    pub fn with_options(
        title: &str,
        width: u32,
        height: u32,
        vsync: bool,
        fullscreen: bool,
    ) -> Result<(Self, TextureCreator<WindowContext>), String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        let mut canvas_builder = window.into_canvas().accelerated();
        if vsync {
            canvas_builder = canvas_builder.present_vsync();
        }
        let mut canvas = canvas_builder.build().map_err(|e| e.to_string())?;
        // Keep the aspect ratio when the window is resized or fullscreen
        canvas
            .set_logical_size(width, height)
            .map_err(|e| e.to_string())?;

        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump()?;

        let mut display = Self {
            canvas,
            event_pump,
            fullscreen: false,
        };
        if fullscreen {
            display.toggle_fullscreen()?;
        }
        Ok((display, texture_creator))
    }

    /// Switch between windowed and desktop fullscreen
    pub fn toggle_fullscreen(&mut self) -> Result<(), String> {
        let mode = if self.fullscreen {
            FullscreenType::Off
        } else {
            FullscreenType::Desktop
        };
        self.canvas.window_mut().set_fullscreen(mode)?;
        self.fullscreen = !self.fullscreen;
        Ok(())
    }

    pub fn present(
        &mut self,
        target: &mut RenderTarget,
        buffer: &PixelBuffer,
    ) -> Result<(), String> {
        target
            .texture
            .update(None, buffer.as_bytes(), buffer.pitch())
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas.copy(&target.texture, None, None)?;
        self.canvas.present();
        Ok(())
    }

    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(InputEvent::Quit),
                Event::KeyDown {
                    keycode: Some(k), ..
                } => events.push(InputEvent::KeyDown(k)),
                Event::KeyUp {
                    keycode: Some(k), ..
                } => events.push(InputEvent::KeyUp(k)),
                Event::Window {
                    win_event: sdl2::event::WindowEvent::FocusLost,
                    ..
                } => events.push(InputEvent::FocusLost),
                _ => {},
            }
        }

        events
    }
}

impl<'a> RenderTarget<'a> {
    /// Streaming texture matching the framebuffer's packed `0x00RRGGBB` words
    pub fn with_size(
        texture_creator: &'a TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Self, String> {
        let texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::RGB888, width, height)
            .map_err(|e| e.to_string())?;
        Ok(Self { texture })
    }
}
