//! Dense signed distance grids and their sample positions.

use sdfgen_math::{Point3, Vec3};

use crate::error::{FieldError, Result};

/// World-space position of grid cell `(x, y, z)`.
///
/// Samples sit at `((i + 1) / (resolution + 1) - 0.5) * bounds_size` on each
/// axis, so they are strictly inside the cube and never on its faces.
#[inline]
pub fn sample_point(resolution: u32, bounds_size: f32, x: u32, y: u32, z: u32) -> Point3 {
    let scale = 1.0 / (resolution + 1) as f32;
    let coord = |i: u32| ((i + 1) as f32 * scale - 0.5) * bounds_size;
    Point3::new(coord(x), coord(y), coord(z))
}

/// All `resolution³` sample positions in storage order (x fastest, then y, then z).
pub fn sample_points(resolution: u32, bounds_size: f32) -> Vec<Point3> {
    let r = resolution as usize;
    let mut points = Vec::with_capacity(r * r * r);
    for z in 0..resolution {
        for y in 0..resolution {
            for x in 0..resolution {
                points.push(sample_point(resolution, bounds_size, x, y, z));
            }
        }
    }
    points
}

/// A dense 3D grid of signed distances.
///
/// Negative values are inside the mesh. Storage is row-major with x
/// varying fastest, then y, then z.
#[derive(Debug, Clone, PartialEq)]
pub struct SdfGrid {
    resolution: [usize; 3],
    bounds: Vec3,
    distances: Vec<f32>,
}

impl SdfGrid {
    /// Create a grid, checking that `distances` has one value per cell.
    pub fn new(resolution: [usize; 3], bounds: Vec3, distances: Vec<f32>) -> Result<Self> {
        let expected = cell_count(resolution)?;
        if distances.len() != expected {
            return Err(FieldError::TokenCount {
                expected,
                found: distances.len(),
            });
        }
        Ok(Self {
            resolution,
            bounds,
            distances,
        })
    }

    /// Caller guarantees `distances.len() == nx * ny * nz`.
    pub(crate) fn from_parts(resolution: [usize; 3], bounds: Vec3, distances: Vec<f32>) -> Self {
        debug_assert_eq!(
            Some(distances.len()),
            cell_count(resolution).ok(),
            "grid length mismatch"
        );
        Self {
            resolution,
            bounds,
            distances,
        }
    }

    /// Cells per axis `[nx, ny, nz]`.
    pub fn resolution(&self) -> [usize; 3] {
        self.resolution
    }

    /// World-space size of the sampled box per axis.
    pub fn bounds(&self) -> Vec3 {
        self.bounds
    }

    /// All distances in storage order.
    pub fn distances(&self) -> &[f32] {
        &self.distances
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// Whether the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Storage index of cell `(x, y, z)`, if in range.
    pub fn index(&self, x: usize, y: usize, z: usize) -> Option<usize> {
        let [nx, ny, nz] = self.resolution;
        (x < nx && y < ny && z < nz).then(|| x + nx * (y + ny * z))
    }

    /// Signed distance at cell `(x, y, z)`.
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<f32> {
        self.index(x, y, z).map(|i| self.distances[i])
    }

    /// Smallest and largest stored distance.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        let first = *self.distances.first()?;
        Some(
            self.distances
                .iter()
                .fold((first, first), |(lo, hi), &d| (lo.min(d), hi.max(d))),
        )
    }

    /// Number of cells classified as inside (negative distance).
    pub fn inside_count(&self) -> usize {
        self.distances.iter().filter(|&&d| d < 0.0).count()
    }
}

/// `nx * ny * nz`, failing on overflow.
pub(crate) fn cell_count(resolution: [usize; 3]) -> Result<usize> {
    let [nx, ny, nz] = resolution;
    nx.checked_mul(ny)
        .and_then(|n| n.checked_mul(nz))
        .ok_or_else(|| FieldError::Format(format!("grid size {nx}x{ny}x{nz} overflows")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sample_points_inside_cube() {
        let points = sample_points(4, 2.0);
        assert_eq!(points.len(), 64);
        for p in &points {
            for axis in 0..3 {
                assert!(p[axis] > -1.0 && p[axis] < 1.0);
            }
        }
        // First and last cells are symmetric about the origin
        assert_relative_eq!(points[0].x, -0.6);
        assert_relative_eq!(points[63].z, 0.6);
    }

    #[test]
    fn test_sample_points_x_fastest() {
        let points = sample_points(3, 4.0);
        assert!(points[1].x > points[0].x);
        assert_eq!(points[1].y, points[0].y);
        assert!(points[3].y > points[0].y);
        assert!(points[9].z > points[0].z);
    }

    #[test]
    fn test_single_cell_is_centre() {
        let p = sample_point(1, 10.0, 0, 0, 0);
        assert_relative_eq!(p.coords.norm(), 0.0);
    }

    #[test]
    fn test_grid_index() {
        let grid = SdfGrid::new([2, 3, 4], Vec3::repeat(1.0), (0..24).map(|i| i as f32).collect())
            .unwrap();
        assert_eq!(grid.index(1, 2, 3), Some(1 + 2 * (2 + 3 * 3)));
        assert_eq!(grid.get(1, 0, 0), Some(1.0));
        assert_eq!(grid.get(0, 1, 0), Some(2.0));
        assert_eq!(grid.get(0, 0, 1), Some(6.0));
        assert_eq!(grid.get(2, 0, 0), None);
    }

    #[test]
    fn test_grid_rejects_wrong_length() {
        let err = SdfGrid::new([2, 2, 2], Vec3::repeat(1.0), vec![0.0; 7]).unwrap_err();
        assert!(matches!(err, FieldError::TokenCount { expected: 8, found: 7 }));
    }

    #[test]
    fn test_min_max_inside() {
        let grid = SdfGrid::new([2, 1, 1], Vec3::repeat(1.0), vec![-0.5, 2.0]).unwrap();
        assert_eq!(grid.min_max(), Some((-0.5, 2.0)));
        assert_eq!(grid.inside_count(), 1);
    }
}
