#![warn(missing_docs)]

//! Triangle mesh input for the sdfgen distance-field generator.
//!
//! A [`TriangleMesh`] is the snapshot handed to the BVH builder: vertex
//! positions, a flat triangle index list and one normal per vertex.
//! Meshes come from an OBJ file ([`obj::parse_obj`]) or from the
//! procedural [`sphere::uv_sphere`] generator.

pub mod error;
pub mod obj;
pub mod sphere;

pub use error::{MeshError, Result};
pub use obj::{parse_obj, parse_obj_file};
pub use sphere::uv_sphere;

use sdfgen_math::{Point3, Vec3};

/// An indexed triangle mesh with per-vertex normals.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub positions: Vec<Point3>,
    /// Flat triangle indices: `[i0, i1, i2, ...]`, consistently wound.
    pub indices: Vec<u32>,
    /// Vertex normals. Same length as `positions`.
    pub normals: Vec<Vec3>,
}

impl TriangleMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Axis-aligned bounds of the vertex positions, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Point3, Point3)> {
        let first = *self.positions.first()?;
        Some(
            self.positions
                .iter()
                .fold((first, first), |(lo, hi), p| (lo.inf(p), hi.sup(p))),
        )
    }

    /// Recompute smooth vertex normals from the triangle winding.
    ///
    /// Each face normal (`(b - a) × (c - a)`, so weighted by twice the
    /// triangle area) is added to its three vertices and the sums are
    /// normalized. Vertices not referenced by any triangle get a zero normal.
    pub fn compute_vertex_normals(&mut self) {
        let mut normals = vec![Vec3::zeros(); self.positions.len()];

        for tri in self.indices.chunks_exact(3) {
            let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let (Some(a), Some(b), Some(c)) = (
                self.positions.get(i0),
                self.positions.get(i1),
                self.positions.get(i2),
            ) else {
                continue;
            };
            let face = (b - a).cross(&(c - a));
            normals[i0] += face;
            normals[i1] += face;
            normals[i2] += face;
        }

        for n in &mut normals {
            let len = n.norm();
            if len > 1e-12 {
                *n /= len;
            }
        }

        self.normals = normals;
    }

    /// Signed volume enclosed by the mesh (divergence theorem).
    ///
    /// Positive when the triangles are wound so that `(b - a) × (c - a)`
    /// points outward.
    pub fn signed_volume(&self) -> f64 {
        let mut vol = 0.0f64;
        for tri in self.indices.chunks_exact(3) {
            let a = self.positions[tri[0] as usize].cast::<f64>();
            let b = self.positions[tri[1] as usize].cast::<f64>();
            let c = self.positions[tri[2] as usize].cast::<f64>();
            vol += a.coords.dot(&b.coords.cross(&c.coords));
        }
        vol / 6.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_triangle() -> TriangleMesh {
        TriangleMesh {
            positions: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            indices: vec![0, 1, 2],
            normals: Vec::new(),
        }
    }

    #[test]
    fn test_counts() {
        let mesh = unit_triangle();
        assert_eq!(mesh.num_triangles(), 1);
        assert_eq!(mesh.num_vertices(), 3);
    }

    #[test]
    fn test_compute_vertex_normals() {
        let mut mesh = unit_triangle();
        mesh.compute_vertex_normals();
        assert_eq!(mesh.normals.len(), 3);
        for n in &mesh.normals {
            assert_relative_eq!(n.z, 1.0);
        }
    }

    #[test]
    fn test_bounds() {
        assert!(TriangleMesh::new().bounds().is_none());
        let (lo, hi) = unit_triangle().bounds().unwrap();
        assert_eq!(lo, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(hi, Point3::new(1.0, 1.0, 0.0));
    }
}
