//! Triangle primitives stored in and used to build the hierarchy.

use sdfgen_math::{Point3, Vec3};

/// A mesh triangle as stored in the BVH: three positions and three
/// per-vertex normals, in the mesh's winding order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex.
    pub a: Point3,
    /// Second vertex.
    pub b: Point3,
    /// Third vertex.
    pub c: Point3,
    /// Normal at `a`.
    pub normal_a: Vec3,
    /// Normal at `b`.
    pub normal_b: Vec3,
    /// Normal at `c`.
    pub normal_c: Vec3,
}

impl Triangle {
    /// Create a triangle from positions and vertex normals.
    pub fn new(
        a: Point3,
        b: Point3,
        c: Point3,
        normal_a: Vec3,
        normal_b: Vec3,
        normal_c: Vec3,
    ) -> Self {
        Self {
            a,
            b,
            c,
            normal_a,
            normal_b,
            normal_c,
        }
    }

    /// Create a triangle whose vertex normals all equal the winding normal.
    pub fn flat(a: Point3, b: Point3, c: Point3) -> Self {
        let n = (b - a).cross(&(c - a)).try_normalize(0.0).unwrap_or_else(Vec3::zeros);
        Self::new(a, b, c, n, n, n)
    }

    /// Un-normalized winding normal `(b - a) × (c - a)`.
    pub fn winding_normal(&self) -> Vec3 {
        (self.b - self.a).cross(&(self.c - self.a))
    }

    /// Component-wise minimum of the three vertices.
    pub fn min(&self) -> Point3 {
        sdfgen_math::min3(&self.a, &self.b, &self.c)
    }

    /// Component-wise maximum of the three vertices.
    pub fn max(&self) -> Point3 {
        sdfgen_math::max3(&self.a, &self.b, &self.c)
    }
}

/// Build-time summary of one mesh triangle.
///
/// Only the centroid and bounds are needed to partition; `index` points
/// back at the triangle in the original index list so the final
/// [`Triangle`] array can be materialized in partitioned order.
#[derive(Debug, Clone, Copy)]
pub struct BuildTriangle {
    /// Centroid of the triangle.
    pub centre: Point3,
    /// Minimum corner of the triangle's bounds.
    pub min: Point3,
    /// Maximum corner of the triangle's bounds.
    pub max: Point3,
    /// Triangle number in the source mesh.
    pub index: u32,
}

impl BuildTriangle {
    /// Summarize the triangle `(a, b, c)` with source number `index`.
    pub fn new(a: &Point3, b: &Point3, c: &Point3, index: u32) -> Self {
        Self {
            centre: sdfgen_math::centroid(a, b, c),
            min: sdfgen_math::min3(a, b, c),
            max: sdfgen_math::max3(a, b, c),
            index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_flat_normal() {
        let t = Triangle::flat(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        assert_relative_eq!(t.normal_a.z, 1.0);
        assert_relative_eq!(t.winding_normal().z, 1.0);
    }

    #[test]
    fn test_flat_degenerate() {
        let p = Point3::new(1.0, 1.0, 1.0);
        let t = Triangle::flat(p, p, p);
        assert_eq!(t.normal_b, Vec3::zeros());
    }

    #[test]
    fn test_build_triangle() {
        let bt = BuildTriangle::new(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(3.0, 0.0, -3.0),
            &Point3::new(0.0, 3.0, 0.0),
            7,
        );
        assert_relative_eq!(bt.centre.x, 1.0);
        assert_relative_eq!(bt.centre.z, -1.0);
        assert_eq!(bt.min, Point3::new(0.0, 0.0, -3.0));
        assert_eq!(bt.max, Point3::new(3.0, 3.0, 0.0));
        assert_eq!(bt.index, 7);
    }
}
