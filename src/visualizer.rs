//! Per-frame pipeline tying audio analysis to the animated scene.

use rand::{rngs::StdRng, SeedableRng};
use std::time::Duration;

use crate::audio::{extract, BandEnergies, BandLayout, BeatDetector, Spectrum};
use crate::noise::NoiseGenerator;
use crate::palette::Palette;
use crate::params::{BeatParams, ParticleParams, SceneLayout, TerrainLayering, TerrainParams};
use crate::particles::ParticleSystem;
use crate::render::{Canvas, SceneFrame, SceneRenderer};
use crate::terrain::{FlightInputs, TerrainField};
use crate::waves::EnergyWaves;

/// Everything needed to build a visualizer
#[derive(Debug, Clone)]
pub struct VisualizerConfig {
    /// Canvas size in pixels (fixed for the lifetime of the visualizer)
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub terrain: TerrainParams,
    pub layering: TerrainLayering,
    pub particles: ParticleParams,
    pub beat: BeatParams,
    pub layout: SceneLayout,
    pub show_waves: bool,
    pub show_orbs: bool,
    /// Seed for particle randomness; entropy when `None`
    pub seed: Option<u64>,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1280.0,
            canvas_height: 720.0,
            terrain: TerrainParams::default(),
            layering: TerrainLayering::default(),
            particles: ParticleParams::default(),
            beat: BeatParams::default(),
            layout: SceneLayout::default(),
            show_waves: false,
            show_orbs: false,
            seed: None,
        }
    }
}

/// What one frame computed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub energies: BandEnergies,
    pub beat: bool,
    pub inputs: FlightInputs,
}

/// Owns the animated state and advances it once per rendered frame
pub struct Visualizer {
    terrain: TerrainField,
    particles: ParticleSystem,
    beat: BeatDetector,
    waves: EnergyWaves,
    scene: SceneRenderer,
    color_noise: NoiseGenerator,
    show_waves: bool,
    frame_count: u64,
}

impl Visualizer {
    pub fn new(config: VisualizerConfig) -> Self {
        let VisualizerConfig {
            canvas_width,
            canvas_height,
            terrain,
            layering,
            particles,
            beat,
            layout,
            show_waves,
            show_orbs,
            seed,
        } = config;

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let color_noise = NoiseGenerator::new(terrain.noise_seed);
        let mut scene = SceneRenderer::new(layout, layering, Palette::default());
        scene.set_show_orbs(show_orbs);

        Self {
            terrain: TerrainField::new(terrain, canvas_width, canvas_height),
            particles: ParticleSystem::with_rng(particles, canvas_width, canvas_height, rng),
            beat: BeatDetector::new(beat),
            waves: EnergyWaves::new(),
            scene,
            color_noise,
            show_waves,
            frame_count: 0,
        }
    }

    /// Advance the simulation by one frame and draw it
    ///
    /// `now` is the time since start; it only drives beat spacing.
    pub fn frame<C: Canvas>(
        &mut self,
        spectrum: &Spectrum,
        layout: BandLayout,
        now: Duration,
        canvas: &mut C,
    ) -> FrameReport {
        let energies = extract(spectrum, layout);

        let beat = self.beat.check(energies.bass, now);
        if beat {
            self.particles.burst();
        }

        self.particles
            .update(energies.mid + energies.treble, energies.bass);
        if self.show_waves {
            self.waves.update(spectrum, self.frame_count);
        }
        let inputs = self
            .terrain
            .advance(energies.bass, energies.centroid, energies.treble);

        let frame = SceneFrame {
            spectrum,
            energies,
            frame: self.frame_count,
            terrain: &self.terrain,
            particles: &self.particles,
            waves: self.show_waves.then_some(&self.waves),
            noise: &self.color_noise,
        };
        self.scene.draw(canvas, &frame);

        self.frame_count += 1;

        FrameReport {
            energies,
            beat,
            inputs,
        }
    }

    pub fn toggle_waves(&mut self) -> bool {
        self.show_waves = !self.show_waves;
        self.show_waves
    }

    pub fn toggle_orbs(&mut self) -> bool {
        let show = !self.scene.show_orbs();
        self.scene.set_show_orbs(show);
        show
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn terrain(&self) -> &TerrainField {
        &self.terrain
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }
}
