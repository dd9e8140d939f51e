use crate::scene::SceneKind;
use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;

/// Interactive viewer for the rgeom fractals, transforms and bounce demo.
#[derive(Debug, Clone, Parser)]
#[command(name = "rgeom-viewer", version)]
pub struct Args {
    /// Window width in pixels
    #[arg(long, default_value_t = 1000)]
    pub width: u32,

    /// Window height in pixels
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Frames (and motion ticks) per second
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Scene shown on start-up
    #[arg(long, value_enum, default_value_t = SceneKind::Squares)]
    pub scene: SceneKind,

    /// TTF font for the parameter overlay; the overlay is skipped without one
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Seed for obstacle placement; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Args {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            bail!("window size must be positive, got {}x{}", self.width, self.height);
        }
        if self.width > i16::MAX as u32 || self.height > i16::MAX as u32 {
            bail!("window size must fit in {} pixels per side", i16::MAX);
        }
        if self.fps == 0 || self.fps > 1000 {
            bail!("fps must be in 1..=1000, got {}", self.fps);
        }
        Ok(())
    }
}
