//! Scene rendering: canvas primitives, scene drawing, and the GPU backend.

mod canvas;
mod gpu;
mod primitives;
mod scene;

pub use canvas::{Canvas, MeshCanvas, Vertex};
pub use gpu::{canvas_view_proj, logical_size, RenderError, RenderSystem, Uniforms};
pub use scene::{background_color, SceneFrame, SceneRenderer};

/// Vertices emitted per sphere
pub const SPHERE_VERTICES: usize = primitives::SPHERE_BANDS * primitives::SPHERE_SEGMENTS * 6;
