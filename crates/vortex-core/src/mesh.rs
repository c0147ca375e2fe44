//! Lathe geometry: the profile revolved around the vertical axis.

use crate::profile::ProfilePoint;
use glam::Vec3;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LatheVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

#[derive(Clone, Debug, Default)]
pub struct LatheMesh {
    pub vertices: Vec<LatheVertex>,
    pub indices: Vec<u32>,
}

impl LatheMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Revolve `profile` through a full turn in `segments` steps, scaling the result by `scale`.
///
/// Rings are laid out segment-major: vertex `j + i * profile.len()` is profile
/// point `j` at angle step `i`. The seam is duplicated so UVs wrap cleanly.
pub fn lathe(profile: &[ProfilePoint], segments: usize, scale: Vec3) -> LatheMesh {
    let segments = segments.max(1);
    let n = profile.len();
    if n < 2 {
        return LatheMesh::default();
    }
    let mut vertices = Vec::with_capacity((segments + 1) * n);
    for i in 0..=segments {
        let u = i as f32 / segments as f32;
        let (sin, cos) = (u * std::f32::consts::TAU).sin_cos();
        for (j, p) in profile.iter().enumerate() {
            vertices.push(LatheVertex {
                position: [
                    p.radius * sin * scale.x,
                    p.height * scale.y,
                    p.radius * cos * scale.z,
                ],
                uv: [u, j as f32 / (n - 1) as f32],
            });
        }
    }
    let mut indices = Vec::with_capacity(segments * (n - 1) * 6);
    for i in 0..segments {
        for j in 0..n - 1 {
            let base = (j + i * n) as u32;
            let a = base;
            let b = base + n as u32;
            let c = base + n as u32 + 1;
            let d = base + 1;
            indices.extend_from_slice(&[a, b, d, c, d, b]);
        }
    }
    LatheMesh { vertices, indices }
}
