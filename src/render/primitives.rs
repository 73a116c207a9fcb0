//! Unit meshes for spheres, cubes, and rings.

use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// Sphere latitude bands
pub const SPHERE_BANDS: usize = 6;

/// Sphere longitude segments
pub const SPHERE_SEGMENTS: usize = 10;

/// Segments used for a full ring
pub const RING_SEGMENTS: usize = 48;

/// Triangle list of a unit sphere (positions double as normals)
pub fn unit_sphere(bands: usize, segments: usize) -> Vec<Vec3> {
    let point = |band: usize, segment: usize| {
        let theta = PI * band as f32 / bands as f32;
        let phi = TAU * segment as f32 / segments as f32;
        Vec3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin())
    };

    let mut triangles = Vec::with_capacity(bands * segments * 6);
    for band in 0..bands {
        for segment in 0..segments {
            let p00 = point(band, segment);
            let p01 = point(band, segment + 1);
            let p10 = point(band + 1, segment);
            let p11 = point(band + 1, segment + 1);
            triangles.extend_from_slice(&[p00, p10, p11, p00, p11, p01]);
        }
    }
    triangles
}

/// Triangle list of a unit cube centered on the origin, as (position, normal)
pub fn unit_cube() -> Vec<(Vec3, Vec3)> {
    let faces = [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z];
    let mut triangles = Vec::with_capacity(36);

    for normal in faces {
        // Two in-plane axes perpendicular to the face normal
        let u = if normal.x.abs() > 0.5 { Vec3::Y } else { Vec3::X };
        let v = normal.cross(u);
        let center = normal * 0.5;
        let corner = |su: f32, sv: f32| center + u * (0.5 * su) + v * (0.5 * sv);

        let (a, b, c, d) = (
            corner(-1.0, -1.0),
            corner(1.0, -1.0),
            corner(1.0, 1.0),
            corner(-1.0, 1.0),
        );
        for position in [a, b, c, a, c, d] {
            triangles.push((position, normal));
        }
    }
    triangles
}

/// Closed annulus in the XY plane as a triangle strip
pub fn ring_strip(radius: f32, weight: f32, segments: usize) -> Vec<Vec3> {
    let inner = (radius - weight / 2.0).max(0.0);
    let outer = radius + weight / 2.0;

    let mut strip = Vec::with_capacity((segments + 1) * 2);
    for i in 0..=segments {
        let angle = TAU * i as f32 / segments as f32;
        let dir = Vec3::new(angle.cos(), angle.sin(), 0.0);
        strip.push(dir * inner);
        strip.push(dir * outer);
    }
    strip
}
