//! Window, camera, and decoration configuration.

use std::f32::consts::PI;

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels), also the canvas width
    pub window_width: u32,

    /// Window height (pixels), also the canvas height
    pub window_height: u32,

    /// Vertical field of view (radians)
    /// PI/3 frames the whole canvas at depth 0
    pub fov_radians: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            fov_radians: PI / 3.0,
        }
    }
}

/// World tilt applied before the terrain is drawn (and kept for the rest of the frame)
#[derive(Debug, Clone)]
pub struct SceneLayout {
    /// Translation before tilting (pixels)
    pub offset: [f32; 3],

    /// Rotation around X (radians)
    pub tilt: f32,

    /// Number of floating boxes orbiting the scene
    pub floating_count: usize,

    /// Base orbit radius of the floating boxes (pixels)
    pub floating_radius: f32,

    /// Number of orbit spheres
    pub orb_count: usize,
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self {
            offset: [0.0, 30.0, 120.0],
            tilt: PI / 2.1,
            floating_count: 12,
            floating_radius: 150.0,
            orb_count: 16,
        }
    }
}
