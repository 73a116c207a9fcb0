//! Particle pool sizing and motion ranges.

/// Particle system parameters
#[derive(Debug, Clone)]
pub struct ParticleParams {
    /// Particles created at startup
    pub initial_count: usize,

    /// Pool size above which a burst trims the oldest particles
    pub max_count: usize,

    /// Particles spawned per detected beat
    pub burst_size: usize,

    /// Oldest particles removed when the pool exceeds `max_count`
    pub trim_count: usize,

    /// Spawn depth range (± pixels)
    pub spawn_depth: f32,

    /// Planar velocity range (± pixels per frame)
    pub planar_speed: f32,

    /// Depth velocity range (± pixels per frame)
    pub depth_speed: f32,

    /// Sphere radius range (pixels)
    pub min_size: f32,
    pub max_size: f32,

    /// Lifespan of a freshly spawned or reset particle (frames, also its alpha)
    pub lifespan: i32,

    /// Staggered lifespan range for the initial population
    pub initial_lifespan_min: i32,

    /// Depth beyond which a particle is recycled (± pixels)
    pub depth_bound: f32,

    /// Jitter amplitude per unit energy
    pub jitter_scale: f32,

    /// Spatial scale of the color noise
    pub color_noise_scale: f32,

    /// Temporal scale of the color noise (per frame)
    pub color_time_scale: f32,
}

impl Default for ParticleParams {
    fn default() -> Self {
        Self {
            initial_count: 200,
            max_count: 200,
            burst_size: 20,
            trim_count: 50,
            spawn_depth: 200.0,
            planar_speed: 2.0,
            depth_speed: 1.0,
            min_size: 2.0,
            max_size: 8.0,
            lifespan: 255,
            initial_lifespan_min: 100,
            depth_bound: 300.0,
            jitter_scale: 0.02,
            color_noise_scale: 0.01,
            color_time_scale: 0.01,
        }
    }
}
