//! Desktop viewer for the rgeom engine.
//!
//! Opens one SDL2 window and shows a scene at a time: nested squares, the
//! Sierpinski triangle, the Koch snowflake, a rectangle bouncing among random
//! obstacles, an L-shaped figure posed through the transform pipeline, and a
//! line-drawn monogram. All geometry comes from the library; this binary only
//! decodes keys, keeps the frame clock and paints.

mod config;
mod render;
mod scene;

use crate::config::Args;
use crate::render::{draw_frame, draw_hud};
use crate::scene::{Command, Scene};
use anyhow::{Result, anyhow};
use clap::Parser;
use rgeom::Size;
use sdl2::event::Event;
use sdl2::keyboard::{Keycode, Mod};
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Window title displayed in the title bar
const TITLE: &str = "rgeom";
/// Point size of the HUD font
const FONT_SIZE: u16 = 18;

/// Maps a key press to a scene command.
///
/// # Arguments
///
/// * `keycode` - The key that went down
/// * `keymod` - Modifier state at the time of the press
fn command_for(keycode: Keycode, keymod: Mod) -> Option<Command> {
    let shift = keymod.intersects(Mod::LSHIFTMOD | Mod::RSHIFTMOD);
    let command = match keycode {
        Keycode::Tab if shift => Command::PreviousScene,
        Keycode::Tab => Command::NextScene,
        Keycode::Up => Command::More,
        Keycode::Down => Command::Less,
        Keycode::Left => Command::RotateLeft,
        Keycode::Right => Command::RotateRight,
        Keycode::Equals | Keycode::KpPlus => Command::Grow,
        Keycode::Minus | Keycode::KpMinus => Command::Shrink,
        Keycode::M => Command::ToggleMirror,
        Keycode::Space => Command::ToggleMotion,
        Keycode::C => Command::CenterCamera,
        Keycode::F => Command::ToggleFollow,
        Keycode::H => Command::Nudge(-1.0, 0.0),
        Keycode::L => Command::Nudge(1.0, 0.0),
        Keycode::K => Command::Nudge(0.0, -1.0),
        Keycode::J => Command::Nudge(0.0, 1.0),
        _ => return None,
    };
    Some(command)
}

/// Main entry point for the viewer.
///
/// Parses the command line, initializes SDL2, and runs the frame loop at the
/// configured rate until the window closes or Escape is pressed.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .without_time()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    args.validate()?;

    // Initialize SDL2 subsystems
    let sdl_context = sdl2::init().map_err(|e| anyhow!(e))?;
    let video_subsystem = sdl_context.video().map_err(|e| anyhow!(e))?;
    let ttf_context = sdl2::ttf::init().map_err(|e| anyhow!(e.to_string()))?;

    let window = video_subsystem
        .window(TITLE, args.width, args.height)
        .position_centered()
        .build()?;
    let font = match &args.font {
        Some(path) => match ttf_context.load_font(path, FONT_SIZE) {
            Ok(font) => Some(font),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not load font, HUD disabled");
                None
            }
        },
        None => None,
    };

    let mut canvas = window.into_canvas().build()?;
    let canvas_size = Size::new(args.width as f32, args.height as f32);
    let mut scene = Scene::new(args.scene, canvas_size, args.fps, args.seed);
    info!(scene = scene.kind().title(), width = args.width, height = args.height, "viewer started");

    let frame_time = Duration::from_secs_f32(1.0 / args.fps as f32);
    let mut last_frame_time = Instant::now();
    let mut event_pump = sdl_context.event_pump().map_err(|e| anyhow!(e))?;

    'running: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'running,
                Event::KeyDown {
                    keycode: Some(keycode),
                    keymod,
                    ..
                } => {
                    if let Some(command) = command_for(keycode, keymod) {
                        scene.handle(command)?;
                        if command == Command::ToggleMotion {
                            info!(moving = scene.is_moving(), "motion toggled");
                        }
                    }
                }
                Event::MouseMotion { x, y, .. } => scene.handle(Command::PointerAt(x as f32, y as f32))?,
                _ => {}
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(last_frame_time).as_secs_f32();
        last_frame_time = now;

        scene.update(dt)?;
        let drawing = scene.frame()?;
        draw_frame(&mut canvas, &drawing).map_err(|e| anyhow!(e))?;
        if let Some(font) = &font {
            draw_hud(&mut canvas, font, &drawing.hud).map_err(|e| anyhow!(e))?;
        }
        canvas.present();
        ::std::thread::sleep(frame_time);
    }
    info!("viewer closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_tab_goes_back() {
        assert_eq!(command_for(Keycode::Tab, Mod::LSHIFTMOD), Some(Command::PreviousScene));
        assert_eq!(command_for(Keycode::Tab, Mod::NOMOD), Some(Command::NextScene));
    }

    #[test]
    fn vim_keys_nudge() {
        assert_eq!(command_for(Keycode::H, Mod::NOMOD), Some(Command::Nudge(-1.0, 0.0)));
        assert_eq!(command_for(Keycode::J, Mod::NOMOD), Some(Command::Nudge(0.0, 1.0)));
        assert_eq!(command_for(Keycode::Q, Mod::NOMOD), None);
    }

    #[test]
    fn f_toggles_mouse_follow() {
        assert_eq!(command_for(Keycode::F, Mod::NOMOD), Some(Command::ToggleFollow));
    }
}
