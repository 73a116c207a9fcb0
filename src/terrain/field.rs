//! Terrain height grid regenerated every frame from coherent noise.

use crate::noise::{remap, NoiseGenerator};
use crate::params::TerrainParams;

/// Noise inputs derived from one frame's band energies
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlightInputs {
    /// Third noise coordinate, from bass (0..=max_depth_input)
    pub depth: f32,
    /// Extra horizontal noise step per column, from the centroid
    pub column_increment: f32,
    /// Extra scrolling speed, from treble
    pub flight_increment: f32,
}

impl FlightInputs {
    /// Map band energies onto noise inputs (each clamped to its range)
    pub fn from_energies(params: &TerrainParams, bass: f32, centroid: f32, treble: f32) -> Self {
        let unit = |value: f32, max: f32| {
            if value.is_finite() {
                (value / max).clamp(0.0, 1.0)
            } else {
                0.0
            }
        };
        Self {
            depth: unit(bass, 255.0) * params.max_depth_input,
            column_increment: unit(centroid, 255.0) * params.max_column_increment,
            flight_increment: unit(treble, params.treble_saturation) * params.max_flight_increment,
        }
    }
}

/// Height grid indexed `[column][row]`, plus the scrolling offset
pub struct TerrainField {
    params: TerrainParams,
    noise: NoiseGenerator,
    cols: usize,
    rows: usize,
    /// Column-major heights: `heights[col * rows + row]`
    heights: Vec<f32>,
    /// Scrolling offset (decreases every frame)
    flying: f32,
}

impl TerrainField {
    /// Create a flat field sized to the canvas (dimensions never change afterwards)
    pub fn new(params: TerrainParams, canvas_width: f32, canvas_height: f32) -> Self {
        let cols = ((canvas_width / params.scale) as usize).max(2);
        let rows = ((canvas_height / params.scale) as usize).max(2);

        Self {
            noise: NoiseGenerator::new(params.noise_seed),
            heights: vec![0.0; cols * rows],
            flying: 0.0,
            cols,
            rows,
            params,
        }
    }

    /// Regenerate the grid for one frame
    pub fn advance(&mut self, bass: f32, centroid: f32, treble: f32) -> FlightInputs {
        let inputs = FlightInputs::from_energies(&self.params, bass, centroid, treble);
        let p = &self.params;

        self.flying -= p.base_flight_speed + inputs.flight_increment;

        let column_step = p.column_step + inputs.column_increment;
        let mut yoff = self.flying;
        for row in 0..self.rows {
            let mut xoff = 0.0;
            for col in 0..self.cols {
                let n = self.noise.sample(xoff, yoff, inputs.depth);
                self.heights[col * self.rows + row] =
                    remap(n, 0.0, 1.0, p.min_height, p.max_height).clamp(p.min_height, p.max_height);
                xoff += column_step;
            }
            yoff += p.row_step;
        }

        inputs
    }

    pub fn height(&self, col: usize, row: usize) -> f32 {
        self.heights[col * self.rows + row]
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Grid cell size (canvas pixels)
    pub fn scale(&self) -> f32 {
        self.params.scale
    }

    /// Grid extent in canvas pixels (width, depth)
    pub fn extent(&self) -> (f32, f32) {
        (
            self.cols as f32 * self.params.scale,
            self.rows as f32 * self.params.scale,
        )
    }

    pub fn flying(&self) -> f32 {
        self.flying
    }
}
