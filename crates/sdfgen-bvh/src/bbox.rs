//! Axis-aligned bounding box accumulator.

use sdfgen_math::{Point3, Vec3};

/// Axis-aligned bounding box in 3D.
///
/// Starts empty; the first [`grow_to_include`](Self::grow_to_include) sets
/// the bounds and later calls take the component-wise union, so a non-empty
/// box always has `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
    has_point: bool,
}

impl BoundingBox {
    /// Create an empty box. Its size is zero until something is included.
    pub fn empty() -> Self {
        Self {
            min: Point3::origin(),
            max: Point3::origin(),
            has_point: false,
        }
    }

    /// Create a box from min and max corners.
    pub fn new(min: Point3, max: Point3) -> Self {
        Self {
            min,
            max,
            has_point: true,
        }
    }

    /// Whether nothing has been included yet.
    pub fn is_empty(&self) -> bool {
        !self.has_point
    }

    /// Expand this box to include the box `[min, max]`.
    pub fn grow_to_include(&mut self, min: &Point3, max: &Point3) {
        if self.has_point {
            self.min = self.min.inf(min);
            self.max = self.max.sup(max);
        } else {
            self.has_point = true;
            self.min = *min;
            self.max = *max;
        }
    }

    /// Edge lengths of the box.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Centre of the box.
    pub fn centre(&self) -> Point3 {
        Point3::from((self.min.coords + self.max.coords) / 2.0)
    }

    /// Surface area of the box.
    pub fn surface_area(&self) -> f32 {
        sdfgen_math::surface_area(&self.size())
    }

    /// Whether `[min, max]` lies entirely within this box (boundaries inclusive).
    pub fn contains(&self, min: &Point3, max: &Point3) -> bool {
        (0..3).all(|axis| self.min[axis] <= min[axis] && max[axis] <= self.max[axis])
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}
