//! Per-frame scene drawing against a `Canvas`.

use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, TAU};

use super::Canvas;
use crate::audio::{BandEnergies, Spectrum};
use crate::noise::NoiseGenerator;
use crate::palette::{Band, Color, Palette};
use crate::params::{SceneLayout, TerrainLayering};
use crate::particles::ParticleSystem;
use crate::terrain::TerrainField;
use crate::waves::EnergyWaves;

/// Darkest background, reached when all bands are silent
const BASE_BACKGROUND: Color = Color {
    r: 5.0,
    g: 5.0,
    b: 20.0,
    a: 255.0,
};

const WAVE_COLOR: Color = Color {
    r: 255.0,
    g: 100.0,
    b: 200.0,
    a: 255.0,
};

const ORB_ALPHA: f32 = 150.0;

/// Everything the scene reads for one frame
pub struct SceneFrame<'a> {
    pub spectrum: &'a Spectrum,
    pub energies: BandEnergies,
    pub frame: u64,
    pub terrain: &'a TerrainField,
    pub particles: &'a ParticleSystem,
    pub waves: Option<&'a EnergyWaves>,
    pub noise: &'a NoiseGenerator,
}

/// Draws terrain layers, particles, and decorations in a fixed order
pub struct SceneRenderer {
    layout: SceneLayout,
    layering: TerrainLayering,
    palette: Palette,
    show_orbs: bool,
    strip: Vec<Vec3>,
}

impl SceneRenderer {
    pub fn new(layout: SceneLayout, layering: TerrainLayering, palette: Palette) -> Self {
        Self {
            layout,
            layering,
            palette,
            show_orbs: false,
            strip: Vec::new(),
        }
    }

    pub fn set_show_orbs(&mut self, show: bool) {
        self.show_orbs = show;
    }

    pub fn show_orbs(&self) -> bool {
        self.show_orbs
    }

    pub fn draw<C: Canvas>(&mut self, canvas: &mut C, frame: &SceneFrame<'_>) {
        canvas.background(background_color(&frame.energies));

        // The tilt is never popped: everything below is drawn in tilted space
        canvas.translate(Vec3::from_array(self.layout.offset));
        canvas.rotate_x(self.layout.tilt);

        self.draw_terrain(canvas, frame);
        self.draw_particles(canvas, frame);
        if let Some(waves) = frame.waves {
            draw_waves(canvas, waves);
        }
        if self.show_orbs {
            self.draw_orbs(canvas, frame);
        }
        self.draw_floating(canvas, frame);
    }

    fn layer_color(&self, layer: usize, energies: &BandEnergies) -> Color {
        let (band, energy) = match layer % 3 {
            0 => (Band::Bass, energies.bass),
            1 => (Band::Mid, energies.mid),
            _ => (Band::Treble, energies.treble),
        };
        self.palette.energy_color(band, energy)
    }

    fn draw_terrain<C: Canvas>(&mut self, canvas: &mut C, frame: &SceneFrame<'_>) {
        let terrain = frame.terrain;
        let (width, depth) = terrain.extent();

        canvas.push();
        canvas.translate(Vec3::new(-width / 2.0, -depth / 2.0, 0.0));

        for layer in 0..self.layering.layers {
            let color = self
                .layer_color(layer, &frame.energies)
                .with_alpha(self.layering.alpha(layer));
            let lift = layer as f32 * self.layering.layer_lift;

            canvas.push();
            canvas.translate(Vec3::new(0.0, 0.0, -(layer as f32) * self.layering.layer_depth));
            for row in 0..terrain.strip_count() {
                terrain.row_strip(row, lift, &mut self.strip);
                canvas.triangle_strip(&self.strip, color);
            }
            canvas.pop();
        }

        canvas.pop();
    }

    fn draw_particles<C: Canvas>(&self, canvas: &mut C, frame: &SceneFrame<'_>) {
        for particle in frame.particles.iter() {
            let color = frame
                .particles
                .color_of(particle, &self.palette, frame.noise, frame.frame);
            canvas.push();
            canvas.translate(particle.position);
            canvas.sphere(particle.size, color);
            canvas.pop();
        }
    }

    fn draw_orbs<C: Canvas>(&self, canvas: &mut C, frame: &SceneFrame<'_>) {
        let f = frame.frame as f32;
        let count = self.layout.orb_count.max(1);

        canvas.push();
        canvas.rotate_x(FRAC_PI_2);
        for i in 0..count {
            let s = frame.spectrum.value(i * 4);
            let angle = f * 0.01 + i as f32 * TAU / count as f32;
            let orbit = 200.0 + s * 0.3;
            let z = (f * 0.02 + i as f32).sin() * 30.0;

            let layer = match i {
                0..=4 => 0,
                5..=10 => 1,
                _ => 2,
            };
            let color = self
                .layer_color(layer, &frame.energies)
                .with_alpha(ORB_ALPHA);

            canvas.push();
            canvas.translate(Vec3::new(angle.cos() * orbit, angle.sin() * orbit, z));
            canvas.sphere((s * 0.8 + 20.0) * 0.3, color);
            canvas.pop();
        }
        canvas.pop();
    }

    fn draw_floating<C: Canvas>(&self, canvas: &mut C, frame: &SceneFrame<'_>) {
        let f = frame.frame as f32;
        let count = self.layout.floating_count.max(1);

        for i in 0..count {
            let fi = i as f32;
            let s = frame.spectrum.value(i * 8);
            let angle = f * 0.02 + fi * TAU / count as f32;
            let orbit = self.layout.floating_radius + s * 0.5;
            let position = Vec3::new(
                angle.cos() * orbit,
                angle.sin() * orbit,
                (f * 0.01 + fi).sin() * 50.0 + 100.0,
            );

            let t = (f * 0.02 + fi).sin() * 0.5 + 0.5;
            let color = self.palette.bass[i % 3].lerp(self.palette.treble[i % 3], t);

            canvas.push();
            canvas.translate(position);
            canvas.rotate_y(f * 0.02 + fi);
            canvas.cube(10.0 + s * 0.1, color);
            canvas.pop();
        }
    }
}

fn draw_waves<C: Canvas>(canvas: &mut C, waves: &EnergyWaves) {
    for wave in waves.iter() {
        canvas.ring(wave.radius, wave.stroke_weight(), WAVE_COLOR.with_alpha(wave.life));
    }
}

/// Background tinted toward the band energies
pub fn background_color(energies: &BandEnergies) -> Color {
    let tint = Color::rgb(energies.bass * 0.7, energies.mid * 0.6, energies.treble * 0.9);
    BASE_BACKGROUND.lerp(tint, 0.9)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{ParticleParams, TerrainParams};
    use crate::render::{MeshCanvas, SPHERE_VERTICES};
    use rand::{rngs::StdRng, SeedableRng};

    /// Records calls instead of tessellating
    #[derive(Default)]
    struct RecordingCanvas {
        depth: i32,
        strips: usize,
        spheres: Vec<(f32, Color)>,
        cubes: Vec<(f32, Color)>,
        rings: Vec<(f32, f32, Color)>,
        background: Option<Color>,
    }

    impl Canvas for RecordingCanvas {
        fn background(&mut self, color: Color) {
            self.background = Some(color);
        }
        fn push(&mut self) {
            self.depth += 1;
        }
        fn pop(&mut self) {
            self.depth -= 1;
        }
        fn translate(&mut self, _offset: Vec3) {}
        fn rotate_x(&mut self, _angle: f32) {}
        fn rotate_y(&mut self, _angle: f32) {}
        fn triangle_strip(&mut self, _points: &[Vec3], _color: Color) {
            self.strips += 1;
        }
        fn sphere(&mut self, radius: f32, color: Color) {
            self.spheres.push((radius, color));
        }
        fn cube(&mut self, size: f32, color: Color) {
            self.cubes.push((size, color));
        }
        fn ring(&mut self, radius: f32, weight: f32, color: Color) {
            self.rings.push((radius, weight, color));
        }
    }

    struct Fixture {
        spectrum: Spectrum,
        terrain: TerrainField,
        particles: ParticleSystem,
        waves: EnergyWaves,
        noise: NoiseGenerator,
    }

    impl Fixture {
        fn new(level: u8) -> Self {
            let mut terrain = TerrainField::new(TerrainParams::default(), 200.0, 100.0);
            terrain.advance(level as f32, 10.0, level as f32);
            let params = ParticleParams {
                initial_count: 5,
                ..Default::default()
            };
            let mut waves = EnergyWaves::new();
            let spectrum = Spectrum::new(vec![level; 1024]);
            waves.update(&spectrum, 0);
            Self {
                spectrum,
                terrain,
                particles: ParticleSystem::with_rng(params, 200.0, 100.0, StdRng::seed_from_u64(3)),
                waves,
                noise: NoiseGenerator::new(0),
            }
        }

        fn frame(&self, energies: BandEnergies, with_waves: bool) -> SceneFrame<'_> {
            SceneFrame {
                spectrum: &self.spectrum,
                energies,
                frame: 10,
                terrain: &self.terrain,
                particles: &self.particles,
                waves: with_waves.then_some(&self.waves),
                noise: &self.noise,
            }
        }
    }

    fn renderer() -> SceneRenderer {
        SceneRenderer::new(
            SceneLayout::default(),
            TerrainLayering::default(),
            Palette::default(),
        )
    }

    #[test]
    fn test_background_for_silence() {
        let color = background_color(&BandEnergies::default());
        assert!((color.r - 0.5).abs() < 1e-4);
        assert!((color.g - 0.5).abs() < 1e-4);
        assert!((color.b - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_background_tracks_energy() {
        let energies = BandEnergies {
            bass: 255.0,
            mid: 0.0,
            treble: 0.0,
            centroid: 0.0,
        };
        let color = background_color(&energies);
        assert!((color.r - (0.5 + 0.9 * 178.5)).abs() < 1e-3);
    }

    #[test]
    fn test_draw_order_and_counts() {
        let fixture = Fixture::new(100);
        let mut scene = renderer();
        let mut canvas = RecordingCanvas::default();

        scene.draw(&mut canvas, &fixture.frame(BandEnergies::default(), false));

        // Balanced push/pop, tilt left applied at depth 0
        assert_eq!(canvas.depth, 0);
        assert!(canvas.background.is_some());
        assert_eq!(canvas.strips, 3 * fixture.terrain.strip_count());
        assert_eq!(canvas.spheres.len(), fixture.particles.len());
        assert_eq!(canvas.cubes.len(), 12);
        assert!(canvas.rings.is_empty());
    }

    #[test]
    fn test_floating_boxes_follow_spectrum() {
        let fixture = Fixture::new(200);
        let mut scene = renderer();
        let mut canvas = RecordingCanvas::default();
        scene.draw(&mut canvas, &fixture.frame(BandEnergies::default(), false));

        for (size, _) in &canvas.cubes {
            assert!((size - 30.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_optional_decorations() {
        let fixture = Fixture::new(50);
        let mut scene = renderer();
        scene.set_show_orbs(true);
        let mut canvas = RecordingCanvas::default();
        scene.draw(&mut canvas, &fixture.frame(BandEnergies::default(), true));

        assert_eq!(canvas.rings.len(), fixture.waves.len());
        let orbs = canvas.spheres.len() - fixture.particles.len();
        assert_eq!(orbs, 16);
        let (radius, color) = canvas.spheres[fixture.particles.len()];
        assert!((radius - (50.0 * 0.8 + 20.0) * 0.3).abs() < 1e-4);
        assert_eq!(color.a, ORB_ALPHA);
        assert_eq!(canvas.depth, 0);
    }

    #[test]
    fn test_layer_colors_follow_bands() {
        let scene = renderer();
        let energies = BandEnergies {
            bass: 255.0,
            mid: 0.0,
            treble: 255.0,
            centroid: 0.0,
        };
        let palette = Palette::default();
        assert_eq!(scene.layer_color(0, &energies), palette.bass[1]);
        assert_eq!(scene.layer_color(1, &energies), palette.mid[0]);
        assert_eq!(scene.layer_color(2, &energies), palette.treble[1]);
    }

    #[test]
    fn test_mesh_canvas_vertex_budget() {
        let fixture = Fixture::new(80);
        let mut scene = renderer();
        let mut canvas = MeshCanvas::new();
        canvas.begin_frame();
        scene.draw(&mut canvas, &fixture.frame(BandEnergies::default(), false));

        let strip_vertices = (2 * fixture.terrain.cols() - 2) * 3;
        let expected = 3 * fixture.terrain.strip_count() * strip_vertices
            + fixture.particles.len() * SPHERE_VERTICES
            + 12 * 36;
        assert_eq!(canvas.vertices().len(), expected);
    }
}
