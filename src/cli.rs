//! Command-line argument parsing.

use clap::Parser;
use std::path::PathBuf;

use crate::params::{PlaybackConfig, RenderConfig};
use crate::visualizer::VisualizerConfig;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "terrasonic")]
#[command(about = "Audio-reactive terrain and particle visualizer", long_about = None)]
pub struct Args {
    /// Preset track loaded at startup (0-4, keys 1-5 at runtime)
    #[arg(long, value_name = "INDEX")]
    pub preset: Option<usize>,

    /// WAV file loaded at startup instead of a preset
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Start in live capture mode
    #[arg(long)]
    pub capture: bool,

    /// Playback gain applied after each load
    #[arg(long, value_name = "LEVEL", default_value = "0.2")]
    pub gain: f32,

    /// Window width (pixels)
    #[arg(long, value_name = "PIXELS", default_value = "1280")]
    pub width: u32,

    /// Window height (pixels)
    #[arg(long, value_name = "PIXELS", default_value = "720")]
    pub height: u32,

    /// Seed for terrain noise and particles
    #[arg(long)]
    pub seed: Option<u64>,

    /// Show expanding energy rings
    #[arg(long)]
    pub waves: bool,

    /// Show orbit spheres
    #[arg(long)]
    pub orbs: bool,
}

impl Args {
    pub fn playback_config(&self) -> PlaybackConfig {
        let mut config = PlaybackConfig {
            gain: self.gain.clamp(0.0, 1.0),
            ..Default::default()
        };
        if let Some(preset) = self.preset {
            config.startup_preset = preset;
        }
        config
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            window_width: self.width.max(1),
            window_height: self.height.max(1),
            ..Default::default()
        }
    }

    pub fn visualizer_config(&self) -> VisualizerConfig {
        let render = self.render_config();
        let mut config = VisualizerConfig {
            canvas_width: render.window_width as f32,
            canvas_height: render.window_height as f32,
            show_waves: self.waves,
            show_orbs: self.orbs,
            seed: self.seed,
            ..Default::default()
        };
        if let Some(seed) = self.seed {
            // Noise seeds are 32-bit
            config.terrain.noise_seed = seed as u32;
        }
        config
    }
}
