// Host-side tests for the lathe meshes built from the profile.

use glam::Vec3;
use vortex_core::*;

fn vortex() -> Vortex {
    Vortex::new(ShapeParameters::default(), ProfileCurve::default()).expect("valid shape")
}

#[test]
fn core_mesh_has_a_ring_per_segment() {
    let v = vortex();
    let mesh = v.core_mesh();
    let n = PROFILE_SUBDIVISIONS + 1;
    assert_eq!(mesh.vertices.len(), (LATHE_SEGMENTS + 1) * n);
    assert_eq!(mesh.triangle_count(), LATHE_SEGMENTS * (n - 1) * 2);
    let max = mesh.vertices.len() as u32;
    assert!(mesh.indices.iter().all(|i| *i < max));
}

#[test]
fn first_ring_lies_on_the_profile() {
    let v = vortex();
    let mesh = v.core_mesh();
    for (vertex, p) in mesh.vertices.iter().zip(v.table().samples()) {
        assert!(vertex.position[0].abs() < 1e-6);
        assert!((vertex.position[1] - p.height).abs() < 1e-6);
        assert!((vertex.position[2] - p.radius).abs() < 1e-6);
    }
}

#[test]
fn shell_mesh_is_the_scaled_core() {
    let v = vortex();
    let shell = v.shell_mesh();
    for (vertex, p) in shell.vertices.iter().zip(v.table().samples()) {
        assert!((vertex.position[1] - p.height * 1.02).abs() < 1e-5);
        assert!((vertex.position[2] - p.radius * 1.05).abs() < 1e-5);
    }
    // the top of the shell stands above the core tip
    let top = shell
        .vertices
        .iter()
        .map(|v| v.position[1])
        .fold(f32::MIN, f32::max);
    assert!((top - 12.0 * 1.02).abs() < 1e-4);
}

#[test]
fn every_ring_keeps_its_radius() {
    let v = vortex();
    let mesh = v.core_mesh();
    let n = PROFILE_SUBDIVISIONS + 1;
    let j = 40;
    let expected = v.table().samples()[j].radius;
    for i in 0..=LATHE_SEGMENTS {
        let p = mesh.vertices[j + i * n].position;
        let r = (p[0] * p[0] + p[2] * p[2]).sqrt();
        assert!((r - expected).abs() < 1e-5, "segment {i}: {r} vs {expected}");
    }
}

#[test]
fn degenerate_profiles_give_empty_meshes() {
    assert_eq!(lathe(&[], 8, Vec3::ONE).vertices.len(), 0);
    let one = [ProfilePoint::new(1.0, 0.0)];
    assert_eq!(lathe(&one, 8, Vec3::ONE).triangle_count(), 0);
}

#[test]
fn vertices_cast_to_bytes() {
    let mesh = lathe(
        &[ProfilePoint::new(1.0, 0.0), ProfilePoint::new(0.0, 1.0)],
        4,
        Vec3::ONE,
    );
    let bytes: &[u8] = bytemuck::cast_slice(&mesh.vertices);
    assert_eq!(bytes.len(), mesh.vertices.len() * 20);
}
