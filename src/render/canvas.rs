//! Immediate-mode drawing surface with a transform stack.
//!
//! `Canvas` is the set of primitives the scene draws with. `MeshCanvas`
//! tessellates them on the CPU into one colored triangle list per frame,
//! which the GPU backend uploads and draws in a single pass.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use super::primitives::{self, RING_SEGMENTS, SPHERE_BANDS, SPHERE_SEGMENTS};
use crate::palette::Color;

/// Nesting depth past which pushes are reported as unbalanced
const MAX_STACK_DEPTH: usize = 32;

/// Vertex data for the scene mesh (world position, normal, color)
///
/// A zero normal marks unlit geometry.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

/// Drawing primitives available to the scene
pub trait Canvas {
    /// Clear color for the frame
    fn background(&mut self, color: Color);

    /// Save the current transform
    fn push(&mut self);

    /// Restore the last saved transform
    fn pop(&mut self);

    fn translate(&mut self, offset: Vec3);

    fn rotate_x(&mut self, angle: f32);

    fn rotate_y(&mut self, angle: f32);

    /// Triangle strip through `points` (unlit)
    fn triangle_strip(&mut self, points: &[Vec3], color: Color);

    /// Shaded sphere centered at the current origin
    fn sphere(&mut self, radius: f32, color: Color);

    /// Shaded cube with edge length `size` centered at the current origin
    fn cube(&mut self, size: f32, color: Color);

    /// Circle outline of `radius` in the local XY plane (unlit)
    fn ring(&mut self, radius: f32, weight: f32, color: Color);
}

/// CPU tessellating canvas
pub struct MeshCanvas {
    transform: Mat4,
    stack: Vec<Mat4>,
    clear: Color,
    vertices: Vec<Vertex>,
    sphere: Vec<Vec3>,
    cube: Vec<(Vec3, Vec3)>,
    scratch: Vec<Vec3>,
}

impl MeshCanvas {
    pub fn new() -> Self {
        Self {
            transform: Mat4::IDENTITY,
            stack: Vec::with_capacity(MAX_STACK_DEPTH),
            clear: Color::rgb(0.0, 0.0, 0.0),
            vertices: Vec::new(),
            sphere: primitives::unit_sphere(SPHERE_BANDS, SPHERE_SEGMENTS),
            cube: primitives::unit_cube(),
            scratch: Vec::new(),
        }
    }

    /// Reset transform and geometry for a new frame
    pub fn begin_frame(&mut self) {
        self.transform = Mat4::IDENTITY;
        if !self.stack.is_empty() {
            tracing::debug!("Discarding {} unbalanced push(es)", self.stack.len());
            self.stack.clear();
        }
        self.vertices.clear();
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn clear_color(&self) -> Color {
        self.clear
    }

    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    fn emit(&mut self, local: Vec3, normal: Vec3, color: [f32; 4]) {
        let position = self.transform.transform_point3(local);
        let normal = self.transform.transform_vector3(normal).normalize_or_zero();
        self.vertices.push(Vertex {
            position: position.to_array(),
            normal: normal.to_array(),
            color,
        });
    }
}

impl Default for MeshCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas for MeshCanvas {
    fn background(&mut self, color: Color) {
        self.clear = color;
    }

    fn push(&mut self) {
        // Still push so every pop stays paired with its push
        if self.stack.len() == MAX_STACK_DEPTH {
            tracing::warn!("Transform stack deeper than {}", MAX_STACK_DEPTH);
        }
        self.stack.push(self.transform);
    }

    fn pop(&mut self) {
        match self.stack.pop() {
            Some(transform) => self.transform = transform,
            None => tracing::warn!("Transform stack underflow"),
        }
    }

    fn translate(&mut self, offset: Vec3) {
        self.transform *= Mat4::from_translation(offset);
    }

    fn rotate_x(&mut self, angle: f32) {
        self.transform *= Mat4::from_rotation_x(angle);
    }

    fn rotate_y(&mut self, angle: f32) {
        self.transform *= Mat4::from_rotation_y(angle);
    }

    fn triangle_strip(&mut self, points: &[Vec3], color: Color) {
        let color = color.to_unit();
        for window in points.windows(3) {
            for &point in window {
                self.emit(point, Vec3::ZERO, color);
            }
        }
    }

    fn sphere(&mut self, radius: f32, color: Color) {
        let color = color.to_unit();
        let sphere = std::mem::take(&mut self.sphere);
        for &unit in &sphere {
            self.emit(unit * radius, unit, color);
        }
        self.sphere = sphere;
    }

    fn cube(&mut self, size: f32, color: Color) {
        let color = color.to_unit();
        let cube = std::mem::take(&mut self.cube);
        for &(unit, normal) in &cube {
            self.emit(unit * size, normal, color);
        }
        self.cube = cube;
    }

    fn ring(&mut self, radius: f32, weight: f32, color: Color) {
        let mut strip = std::mem::take(&mut self.scratch);
        strip.clear();
        strip.extend(primitives::ring_strip(radius, weight, RING_SEGMENTS));
        self.triangle_strip(&strip, color);
        self.scratch = strip;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn white() -> Color {
        Color::rgb(255.0, 255.0, 255.0)
    }

    #[test]
    fn test_strip_becomes_triangles() {
        let mut canvas = MeshCanvas::new();
        let points = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::ONE];
        canvas.triangle_strip(&points, white());

        assert_eq!(canvas.vertices().len(), 6);
        assert_eq!(canvas.vertices()[3].position, [1.0, 0.0, 0.0]);
        assert_eq!(canvas.vertices()[0].normal, [0.0, 0.0, 0.0]);
        assert_eq!(canvas.vertices()[0].color, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_push_pop_restores_transform() {
        let mut canvas = MeshCanvas::new();
        canvas.translate(Vec3::new(10.0, 0.0, 0.0));
        canvas.push();
        canvas.translate(Vec3::new(0.0, 5.0, 0.0));
        canvas.rotate_y(1.0);
        canvas.pop();

        assert_eq!(canvas.transform(), Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0)));
    }

    #[test]
    fn test_pop_underflow_is_harmless() {
        let mut canvas = MeshCanvas::new();
        canvas.translate(Vec3::Z);
        canvas.pop();
        assert_eq!(canvas.transform(), Mat4::from_translation(Vec3::Z));
    }

    #[test]
    fn test_deep_nesting_unwinds_to_each_level() {
        let mut canvas = MeshCanvas::new();
        let depth = MAX_STACK_DEPTH + 8;
        for _ in 0..depth {
            canvas.push();
            canvas.translate(Vec3::X);
        }
        assert_eq!(canvas.transform().w_axis.x, depth as f32);

        for level in (0..depth).rev() {
            canvas.pop();
            assert_eq!(canvas.transform().w_axis.x, level as f32);
        }
        assert_eq!(canvas.transform(), Mat4::IDENTITY);
    }

    #[test]
    fn test_transforms_apply_to_emitted_geometry() {
        let mut canvas = MeshCanvas::new();
        canvas.translate(Vec3::new(0.0, 0.0, 100.0));
        canvas.rotate_x(FRAC_PI_2);
        canvas.triangle_strip(&[Vec3::Y, Vec3::Y, Vec3::Y], white());

        // Rotating +Y by 90 degrees around X lands on +Z
        let p = Vec3::from_array(canvas.vertices()[0].position);
        assert!((p - Vec3::new(0.0, 0.0, 101.0)).length() < 1e-4);
    }

    #[test]
    fn test_sphere_and_cube_are_lit() {
        let mut canvas = MeshCanvas::new();
        canvas.sphere(4.0, white());
        let sphere_count = canvas.vertices().len();
        assert_eq!(sphere_count, SPHERE_BANDS * SPHERE_SEGMENTS * 6);

        canvas.cube(10.0, white());
        assert_eq!(canvas.vertices().len(), sphere_count + 36);
        assert!(canvas
            .vertices()
            .iter()
            .all(|v| Vec3::from_array(v.normal).length() > 0.99));
    }

    #[test]
    fn test_begin_frame_resets() {
        let mut canvas = MeshCanvas::new();
        canvas.push();
        canvas.translate(Vec3::X);
        canvas.cube(1.0, white());
        canvas.begin_frame();

        assert!(canvas.vertices().is_empty());
        assert_eq!(canvas.transform(), Mat4::IDENTITY);
    }

    #[test]
    fn test_background_sets_clear_color() {
        let mut canvas = MeshCanvas::new();
        canvas.background(Color::rgb(5.0, 5.0, 20.0));
        assert_eq!(canvas.clear_color(), Color::rgb(5.0, 5.0, 20.0));
    }

    #[test]
    fn test_ring_is_unlit_strip() {
        let mut canvas = MeshCanvas::new();
        canvas.ring(50.0, 2.0, white());
        assert_eq!(canvas.vertices().len(), ((RING_SEGMENTS + 1) * 2 - 2) * 3);
    }
}
