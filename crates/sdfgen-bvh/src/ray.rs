//! Ray representation and the ray-box / ray-triangle tests.

use sdfgen_math::{Point3, Vec3};

use crate::triangle::Triangle;

/// Determinants smaller than this mean the ray is parallel to the triangle.
const PARALLEL_EPSILON: f32 = 1e-8;

/// A ray in 3D space defined by origin and direction.
///
/// The direction is used as given, not normalized: hit distances are in
/// units of its length.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Origin point of the ray.
    pub origin: Point3,
    /// Direction of the ray.
    pub direction: Vec3,
    /// Per-axis reciprocal of the direction; exact zeros map to `+inf`.
    inv_direction: Vec3,
}

impl Ray {
    /// Create a new ray from origin and direction.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        let inv = |d: f32| if d == 0.0 { f32::INFINITY } else { 1.0 / d };
        Self {
            origin,
            direction,
            inv_direction: Vec3::new(inv(direction.x), inv(direction.y), inv(direction.z)),
        }
    }

    /// Evaluate the ray at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f32) -> Point3 {
        self.origin + self.direction * t
    }

    /// Slab test returning `(t_min, t_max)` along the ray.
    #[inline]
    fn slab(&self, box_min: &Point3, box_max: &Point3) -> (f32, f32) {
        let tx1 = (box_min.x - self.origin.x) * self.inv_direction.x;
        let tx2 = (box_max.x - self.origin.x) * self.inv_direction.x;
        let mut t_min = tx1.min(tx2);
        let mut t_max = tx1.max(tx2);

        let ty1 = (box_min.y - self.origin.y) * self.inv_direction.y;
        let ty2 = (box_max.y - self.origin.y) * self.inv_direction.y;
        t_min = t_min.max(ty1.min(ty2));
        t_max = t_max.min(ty1.max(ty2));

        let tz1 = (box_min.z - self.origin.z) * self.inv_direction.z;
        let tz2 = (box_max.z - self.origin.z) * self.inv_direction.z;
        t_min = t_min.max(tz1.min(tz2));
        t_max = t_max.min(tz1.max(tz2));

        (t_min, t_max)
    }

    /// Test ray-box intersection using the slab method.
    ///
    /// Returns the entry distance, or the exit distance when the origin is
    /// inside the box. Returns `None` if the box is missed or lies entirely
    /// behind the origin.
    #[inline]
    pub fn intersect_box(&self, box_min: &Point3, box_max: &Point3) -> Option<f32> {
        let (t_min, t_max) = self.slab(box_min, box_max);
        if t_max >= t_min && t_max > 0.0 {
            Some(if t_min > 0.0 { t_min } else { t_max })
        } else {
            None
        }
    }

    /// Lower bound on the distance to anything inside the box.
    ///
    /// This is the entry distance, `0` when the origin is inside the box and
    /// `+inf` on a miss. Traversal orders and prunes children by it, so a
    /// box the ray starts in is never skipped.
    #[inline]
    pub fn box_distance(&self, box_min: &Point3, box_max: &Point3) -> f32 {
        let (t_min, t_max) = self.slab(box_min, box_max);
        if t_max >= t_min && t_max > 0.0 {
            t_min.max(0.0)
        } else {
            f32::INFINITY
        }
    }

    /// Intersect the ray with a triangle.
    ///
    /// Back faces are reported, not culled: `backface` is set when the ray
    /// travels along the winding normal `(b - a) × (c - a)`, i.e. it
    /// approaches from the side opposite that normal. Points on edges count
    /// as inside.
    pub fn intersect_triangle(&self, tri: &Triangle) -> Option<TriangleHit> {
        let edge_ab = tri.b - tri.a;
        let edge_ac = tri.c - tri.a;
        let ao = self.origin - tri.a;
        let dao = ao.cross(&self.direction);
        let normal = edge_ab.cross(&edge_ac);

        let determinant = -self.direction.dot(&normal);
        if determinant.abs() < PARALLEL_EPSILON {
            return None;
        }
        let inv_det = 1.0 / determinant;

        let distance = ao.dot(&normal) * inv_det;
        let u = edge_ac.dot(&dao) * inv_det;
        let v = -edge_ab.dot(&dao) * inv_det;
        let w = 1.0 - u - v;

        if distance >= 0.0 && u >= 0.0 && v >= 0.0 && w >= 0.0 {
            Some(TriangleHit {
                distance,
                backface: determinant < 0.0,
            })
        } else {
            None
        }
    }
}

/// Result of a single ray-triangle test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    /// Parameter along the ray where the hit occurs.
    pub distance: f32,
    /// Whether the ray struck the back of the triangle.
    pub backface: bool,
}

/// Nearest hit found by a BVH query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Parameter along the ray where the hit occurs.
    pub distance: f32,
    /// 3D hit point, `origin + direction * distance`.
    pub point: Point3,
    /// Whether the ray struck the back of the triangle.
    pub backface: bool,
    /// Index of the hit triangle in [`Bvh::triangles`](crate::Bvh::triangles).
    pub triangle: usize,
}
