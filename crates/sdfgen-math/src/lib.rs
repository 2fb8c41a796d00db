#![warn(missing_docs)]

//! Math types for the sdfgen crates.
//!
//! Thin wrappers around nalgebra providing the single-precision point and
//! vector types used by the BVH builder, the ray query, and the distance
//! field sampler, plus the handful of scalar helpers they share.

use nalgebra::Vector3;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f32>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f32>;

/// The golden ratio, `(1 + sqrt(5)) / 2`.
pub const GOLDEN_RATIO: f32 = 1.618_034;

/// Surface area of an axis-aligned box with edge lengths `size`.
///
/// Degenerate (flat) boxes have zero or partial area; this is what the
/// split cost model expects for zero-area triangles.
#[inline]
pub fn surface_area(size: &Vec3) -> f32 {
    2.0 * (size.x * size.y + size.x * size.z + size.y * size.z)
}

/// Linear interpolation between `a` and `b`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Component-wise minimum of three points.
#[inline]
pub fn min3(a: &Point3, b: &Point3, c: &Point3) -> Point3 {
    a.inf(b).inf(c)
}

/// Component-wise maximum of three points.
#[inline]
pub fn max3(a: &Point3, b: &Point3, c: &Point3) -> Point3 {
    a.sup(b).sup(c)
}

/// Centroid of a triangle.
#[inline]
pub fn centroid(a: &Point3, b: &Point3, c: &Point3) -> Point3 {
    Point3::from((a.coords + b.coords + c.coords) / 3.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_surface_area_unit_cube() {
        assert_relative_eq!(surface_area(&Vec3::new(1.0, 1.0, 1.0)), 6.0);
    }

    #[test]
    fn test_surface_area_flat_box() {
        // A box flat in z still has area on its two large faces
        assert_relative_eq!(surface_area(&Vec3::new(2.0, 3.0, 0.0)), 12.0);
        assert_eq!(surface_area(&Vec3::new(0.0, 0.0, 5.0)), 0.0);
    }

    #[test]
    fn test_lerp() {
        assert_relative_eq!(lerp(-1.0, 1.0, 0.5), 0.0);
        assert_relative_eq!(lerp(2.0, 8.0, 1.0 / 6.0), 3.0);
    }

    #[test]
    fn test_min_max_centroid() {
        let a = Point3::new(0.0, 5.0, -1.0);
        let b = Point3::new(3.0, -2.0, 0.0);
        let c = Point3::new(1.0, 1.0, 4.0);
        assert_eq!(min3(&a, &b, &c), Point3::new(0.0, -2.0, -1.0));
        assert_eq!(max3(&a, &b, &c), Point3::new(3.0, 5.0, 4.0));
        let m = centroid(&a, &b, &c);
        assert_relative_eq!(m.x, 4.0 / 3.0);
        assert_relative_eq!(m.y, 4.0 / 3.0);
        assert_relative_eq!(m.z, 1.0);
    }

    #[test]
    fn test_golden_ratio() {
        assert_relative_eq!(GOLDEN_RATIO, (1.0 + 5.0f32.sqrt()) / 2.0);
    }
}
