//! Procedural UV sphere.

use std::f32::consts::PI;

use sdfgen_math::{Point3, Vec3};

use crate::TriangleMesh;

/// Generate a closed UV sphere centred on the origin.
///
/// `segments` is the number of latitude bands (clamped to at least 2); the
/// sphere uses twice as many longitude slices. Triangles are wound so that
/// `(b - a) × (c - a)` points away from the centre, and the zero-area
/// triangles that would touch the poles are omitted.
pub fn uv_sphere(segments: u32, radius: f32) -> TriangleMesh {
    let stacks = segments.max(2);
    let slices = stacks * 2;

    let mut positions = Vec::with_capacity(((stacks + 1) * (slices + 1)) as usize);
    let mut normals = Vec::with_capacity(positions.capacity());

    for i in 0..=stacks {
        let theta = i as f32 * PI / stacks as f32;
        let (sin_t, cos_t) = theta.sin_cos();
        for j in 0..=slices {
            let phi = j as f32 * 2.0 * PI / slices as f32;
            let (sin_p, cos_p) = phi.sin_cos();
            let n = Vec3::new(sin_t * cos_p, cos_t, sin_t * sin_p);
            positions.push(Point3::from(n * radius));
            normals.push(n);
        }
    }

    let row = slices + 1;
    let mut indices = Vec::with_capacity((stacks * slices * 6) as usize);
    for i in 0..stacks {
        for j in 0..slices {
            let v00 = i * row + j;
            let v01 = v00 + 1;
            let v10 = v00 + row;
            let v11 = v10 + 1;
            if i != 0 {
                indices.extend_from_slice(&[v00, v01, v10]);
            }
            if i != stacks - 1 {
                indices.extend_from_slice(&[v01, v11, v10]);
            }
        }
    }

    TriangleMesh {
        positions,
        indices,
        normals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_counts() {
        let mesh = uv_sphere(8, 1.0);
        assert_eq!(mesh.num_vertices(), 9 * 17);
        // Two triangles per quad, minus one per quad in the two polar bands
        assert_eq!(mesh.num_triangles(), 8 * 16 * 2 - 2 * 16);
        assert_eq!(mesh.normals.len(), mesh.positions.len());
    }

    #[test]
    fn test_sphere_outward_winding() {
        let mesh = uv_sphere(16, 1.0);
        let expected = 4.0 / 3.0 * std::f64::consts::PI;
        let vol = mesh.signed_volume();
        assert!(vol > 0.0, "expected outward winding, got volume {vol}");
        assert!((vol - expected).abs() < expected * 0.05, "expected ~{expected}, got {vol}");
    }

    #[test]
    fn test_sphere_radius() {
        let mesh = uv_sphere(6, 2.5);
        for p in &mesh.positions {
            assert!((p.coords.norm() - 2.5).abs() < 1e-5);
        }
    }

    #[test]
    fn test_sphere_no_degenerate_triangles() {
        let mesh = uv_sphere(4, 1.0);
        for tri in mesh.indices.chunks_exact(3) {
            let a = mesh.positions[tri[0] as usize];
            let b = mesh.positions[tri[1] as usize];
            let c = mesh.positions[tri[2] as usize];
            assert!((b - a).cross(&(c - a)).norm() > 1e-6);
        }
    }
}
