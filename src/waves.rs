//! Expanding energy rings emitted on a fixed frame cadence.

use crate::audio::Spectrum;

/// Frames between two emitted waves
const EMIT_EVERY: u64 = 30;

/// Bins averaged into a wave's energy
const ENERGY_BINS: usize = 100;

const GROWTH_PER_FRAME: f32 = 5.0;
const FADE_PER_FRAME: f32 = 3.0;
const MAX_RADIUS: f32 = 300.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnergyWave {
    pub radius: f32,
    /// Remaining alpha (0-255)
    pub life: f32,
    /// Low-band energy captured when emitted
    pub energy: f32,
}

impl EnergyWave {
    /// Ring stroke width
    pub fn stroke_weight(&self) -> f32 {
        2.0 + self.energy * 0.05
    }
}

#[derive(Debug, Default)]
pub struct EnergyWaves {
    waves: Vec<EnergyWave>,
}

impl EnergyWaves {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit on cadence, then grow, fade, and drop finished waves
    pub fn update(&mut self, spectrum: &Spectrum, frame: u64) {
        if frame % EMIT_EVERY == 0 {
            let energy =
                (0..ENERGY_BINS).map(|i| spectrum.value(i)).sum::<f32>() / ENERGY_BINS as f32;
            self.waves.push(EnergyWave {
                radius: 0.0,
                life: 255.0,
                energy,
            });
        }

        for wave in &mut self.waves {
            wave.radius += GROWTH_PER_FRAME;
            wave.life -= FADE_PER_FRAME;
        }
        self.waves
            .retain(|wave| wave.life > 0.0 && wave.radius <= MAX_RADIUS);
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnergyWave> {
        self.waves.iter()
    }

    pub fn len(&self) -> usize {
        self.waves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emits_every_thirty_frames() {
        let mut waves = EnergyWaves::new();
        let spectrum = Spectrum::silent(1024);

        for frame in 0..30 {
            waves.update(&spectrum, frame);
        }
        assert_eq!(waves.len(), 1);

        waves.update(&spectrum, 30);
        assert_eq!(waves.len(), 2);
    }

    #[test]
    fn test_wave_expires_at_max_radius() {
        let mut waves = EnergyWaves::new();
        let spectrum = Spectrum::silent(1024);

        waves.update(&spectrum, 0);
        // Radius reaches 300 after 60 frames and is dropped on the 61st
        for frame in 1..60 {
            waves.update(&spectrum, frame * 1000 + 1);
        }
        assert_eq!(waves.len(), 1);
        assert_eq!(waves.iter().next().unwrap().radius, 300.0);

        waves.update(&spectrum, 60_001);
        assert!(waves.is_empty());
    }

    #[test]
    fn test_wave_energy_from_low_bins() {
        let mut waves = EnergyWaves::new();
        let spectrum = Spectrum::new((0..1024).map(|i| if i < 100 { 200 } else { 0 }).collect());

        waves.update(&spectrum, 0);
        let wave = waves.iter().next().unwrap();
        assert_eq!(wave.energy, 200.0);
        assert_eq!(wave.stroke_weight(), 12.0);
    }
}
