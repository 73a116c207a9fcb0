//! Terrain field generation and layering parameters.

/// Terrain field parameters
#[derive(Debug, Clone)]
pub struct TerrainParams {
    /// Grid cell size in canvas pixels
    pub scale: f32,

    /// Height range the [0, 1] noise output is remapped to (pixels)
    pub min_height: f32,
    pub max_height: f32,

    /// Horizontal noise step per column (before centroid modulation)
    pub column_step: f32,

    /// Vertical noise step per row
    pub row_step: f32,

    /// Scrolling offset decrease per frame (before treble modulation)
    pub base_flight_speed: f32,

    /// Upper bound of the bass -> depth noise input mapping
    pub max_depth_input: f32,

    /// Upper bound of the centroid -> column step mapping
    pub max_column_increment: f32,

    /// Upper bound of the treble -> flight speed mapping
    pub max_flight_increment: f32,

    /// Treble energy that saturates the flight speed mapping
    pub treble_saturation: f32,

    /// Perlin noise seed
    pub noise_seed: u32,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            scale: 20.0,
            min_height: -150.0,
            max_height: 50.0,
            column_step: 0.04,
            row_step: 0.05,
            base_flight_speed: 0.006,
            max_depth_input: 0.02,
            max_column_increment: 0.01,
            max_flight_increment: 0.4,
            treble_saturation: 128.0,
            noise_seed: 0,
        }
    }
}

/// How the terrain is stacked into translucent layers when drawn
#[derive(Debug, Clone)]
pub struct TerrainLayering {
    /// Number of layers (bass, mid, treble)
    pub layers: usize,

    /// Distance each layer is pushed back (pixels)
    pub layer_depth: f32,

    /// Height added to each successive layer (pixels)
    pub layer_lift: f32,

    /// Alpha of the front layer (0-255)
    pub front_alpha: f32,

    /// Alpha of the back layer (0-255)
    pub back_alpha: f32,
}

impl Default for TerrainLayering {
    fn default() -> Self {
        Self {
            layers: 3,
            layer_depth: 30.0,
            layer_lift: 20.0,
            front_alpha: 100.0,
            back_alpha: 20.0,
        }
    }
}

impl TerrainLayering {
    /// Alpha for a given layer, linearly from front to back
    pub fn alpha(&self, layer: usize) -> f32 {
        if self.layers <= 1 {
            return self.front_alpha;
        }
        let t = layer as f32 / (self.layers - 1) as f32;
        self.front_alpha + (self.back_alpha - self.front_alpha) * t
    }
}
