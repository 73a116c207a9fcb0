//! Coherent noise for terrain heights and particle coloring.
//!
//! Layered Perlin noise (4 octaves, each half the amplitude of the last),
//! remapped so every sample lies in [0, 1].

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

/// Octaves summed per sample
const OCTAVES: usize = 4;

/// Amplitude falloff between octaves
const FALLOFF: f64 = 0.5;

/// Seeded coherent noise generator
pub struct NoiseGenerator {
    fbm: Fbm<Perlin>,
}

impl NoiseGenerator {
    /// Create new noise generator with seed
    pub fn new(seed: u32) -> Self {
        Self {
            fbm: Fbm::<Perlin>::new(seed)
                .set_octaves(OCTAVES)
                .set_persistence(FALLOFF),
        }
    }

    /// Sample 3D noise at position
    ///
    /// Returns value in range [0, 1]
    pub fn sample(&self, x: f32, y: f32, z: f32) -> f32 {
        let raw = self.fbm.get([x as f64, y as f64, z as f64]);
        (((raw + 1.0) * 0.5) as f32).clamp(0.0, 1.0)
    }
}

/// Linearly remap `value` from one range to another (no clamping)
pub fn remap(value: f32, from_min: f32, from_max: f32, to_min: f32, to_max: f32) -> f32 {
    to_min + (value - from_min) / (from_max - from_min) * (to_max - to_min)
}
