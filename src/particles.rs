//! Beat-driven particle pool.
//!
//! Particles live in an insertion-ordered pool. Expired or escaped particles
//! are reset in place; only beat bursts grow the pool, and a burst that pushes
//! it past the cap trims the oldest slots.

use glam::Vec3;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::VecDeque;

use crate::noise::NoiseGenerator;
use crate::palette::{Color, Palette};
use crate::params::ParticleParams;

/// A single point drifting through the scene
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Sphere radius (pixels)
    pub size: f32,
    /// Remaining frames; also the particle's alpha
    pub life: i32,
}

impl Particle {
    fn is_out_of_bounds(&self, width: f32, height: f32, depth: f32) -> bool {
        self.position.x.abs() > width || self.position.y.abs() > height || self.position.z.abs() > depth
    }
}

/// Owner of the particle pool
pub struct ParticleSystem {
    params: ParticleParams,
    width: f32,
    height: f32,
    pool: VecDeque<Particle>,
    rng: StdRng,
}

impl ParticleSystem {
    /// Create the initial population for a canvas of the given size
    pub fn new(params: ParticleParams, width: f32, height: f32) -> Self {
        Self::with_rng(params, width, height, StdRng::from_entropy())
    }

    pub fn with_rng(params: ParticleParams, width: f32, height: f32, rng: StdRng) -> Self {
        let mut system = Self {
            pool: VecDeque::with_capacity(params.max_count + params.burst_size),
            params,
            width,
            height,
            rng,
        };

        // Staggered lifespans so the first generation does not recycle in lockstep
        for _ in 0..system.params.initial_count {
            let mut particle = system.fresh();
            let min = system.params.initial_lifespan_min;
            let max = system.params.lifespan;
            if min < max {
                particle.life = system.rng.gen_range(min..max);
            }
            system.pool.push_back(particle);
        }
        system
    }

    /// Add one particle with a full lifespan
    pub fn spawn(&mut self) {
        let particle = self.fresh();
        self.pool.push_back(particle);
    }

    /// Beat reaction: spawn a burst, then trim the oldest if over the cap
    pub fn burst(&mut self) {
        for _ in 0..self.params.burst_size {
            self.spawn();
        }
        if self.pool.len() > self.params.max_count {
            let trim = self.params.trim_count.min(self.pool.len());
            self.pool.drain(..trim);
        }
    }

    /// Advance every particle by one frame
    ///
    /// `energy_high` scales the planar jitter, `energy_bass` the depth jitter.
    pub fn update(&mut self, energy_high: f32, energy_bass: f32) {
        let jitter_xy = energy_high.max(0.0) * self.params.jitter_scale;
        let jitter_z = energy_bass.max(0.0) * self.params.jitter_scale;

        for i in 0..self.pool.len() {
            let jitter = Vec3::new(
                symmetric(&mut self.rng, jitter_xy),
                symmetric(&mut self.rng, jitter_xy),
                symmetric(&mut self.rng, jitter_z),
            );

            let particle = &mut self.pool[i];
            particle.position += particle.velocity + jitter;
            particle.life -= 1;

            let expired = particle.life <= 0
                || particle.is_out_of_bounds(self.width, self.height, self.params.depth_bound);
            if expired {
                let fresh = self.fresh();
                self.pool[i] = fresh;
            }
        }
    }

    /// Display color: bass-to-treble blend steered by noise over position and time
    pub fn color_of(
        &self,
        particle: &Particle,
        palette: &Palette,
        noise: &NoiseGenerator,
        frame: u64,
    ) -> Color {
        let t = noise.sample(
            particle.position.x * self.params.color_noise_scale,
            particle.position.y * self.params.color_noise_scale,
            frame as f32 * self.params.color_time_scale,
        );
        palette.bass[0]
            .lerp(palette.treble[1], t)
            .with_alpha(particle.life as f32)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.pool.iter()
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    fn fresh(&mut self) -> Particle {
        let p = &self.params;
        let rng = &mut self.rng;
        Particle {
            position: Vec3::new(
                symmetric(rng, self.width / 2.0),
                symmetric(rng, self.height / 2.0),
                symmetric(rng, p.spawn_depth),
            ),
            velocity: Vec3::new(
                symmetric(rng, p.planar_speed),
                symmetric(rng, p.planar_speed),
                symmetric(rng, p.depth_speed),
            ),
            size: if p.min_size < p.max_size {
                rng.gen_range(p.min_size..p.max_size)
            } else {
                p.min_size
            },
            life: p.lifespan,
        }
    }
}

/// Uniform sample in [-half, half] (0 for an empty range)
fn symmetric(rng: &mut StdRng, half: f32) -> f32 {
    if half > 0.0 && half.is_finite() {
        rng.gen_range(-half..=half)
    } else {
        0.0
    }
}
