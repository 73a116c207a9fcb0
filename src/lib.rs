//! terrasonic library - audio-reactive terrain and particle visualizer

pub mod audio;
pub mod cli;
pub mod noise;
pub mod palette;
pub mod params;
pub mod particles;
pub mod render;
pub mod terrain;
pub mod visualizer;
pub mod waves;
