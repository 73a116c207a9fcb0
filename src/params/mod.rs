//! Parameter definitions with units and documented semantics.
//!
//! All tuning constants of the visualizer live here with:
//! - Units (pixels, frames, decibels, milliseconds)
//! - Documented ranges and meanings
//! - `Default` values for the stock look

mod audio;
mod particles;
mod render;
mod terrain;

// Re-export all types
pub use audio::{AnalysisConfig, BeatParams, PlaybackConfig};
pub use particles::ParticleParams;
pub use render::{RenderConfig, SceneLayout};
pub use terrain::{TerrainLayering, TerrainParams};
