//! Parallel signed distance sampling.

use std::time::Instant;

use rayon::prelude::*;
use sdfgen_bvh::Bvh;
use sdfgen_math::{Point3, Vec3};
use tracing::info;

use crate::directions::fibonacci_directions;
use crate::error::Result;
use crate::grid::{sample_points, SdfGrid};
use crate::settings::FieldSettings;

/// Casts a fixed direction set from every grid point through a [`Bvh`].
///
/// Sample points and directions depend only on the settings, so one sampler
/// can be reused for any number of meshes.
#[derive(Debug, Clone)]
pub struct FieldSampler {
    settings: FieldSettings,
    points: Vec<Point3>,
    directions: Vec<Vec3>,
}

impl FieldSampler {
    /// Validate `settings` and precompute sample points and directions.
    pub fn new(settings: FieldSettings) -> Result<Self> {
        settings.validate()?;
        let points = sample_points(settings.resolution, settings.bounds_size);
        let directions = fibonacci_directions(settings.direction_count);
        Ok(Self {
            settings,
            points,
            directions,
        })
    }

    /// Settings this sampler was built from.
    pub fn settings(&self) -> &FieldSettings {
        &self.settings
    }

    /// Sample positions in grid storage order.
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Ray directions cast from every sample.
    pub fn directions(&self) -> &[Vec3] {
        &self.directions
    }

    /// Signed distance from `point` to the surface in `bvh`.
    ///
    /// The magnitude is the nearest hit over all directions. The point is
    /// inside, and the result negative, when more rays strike back faces
    /// than front faces. If no ray hits anything the result is `f32::MAX`.
    pub fn estimate_distance(&self, bvh: &Bvh, point: Point3) -> f32 {
        let mut dst = f32::MAX;
        let mut frontface = 0u32;
        let mut backface = 0u32;

        for &dir in &self.directions {
            if let Some(hit) = bvh.query(point, dir) {
                dst = dst.min(hit.distance);
                if hit.backface {
                    backface += 1;
                } else {
                    frontface += 1;
                }
            }
        }

        if backface > frontface {
            -dst
        } else {
            dst
        }
    }

    /// Sample every grid point in parallel.
    ///
    /// Each cell is computed independently, so the result does not depend
    /// on scheduling.
    pub fn generate(&self, bvh: &Bvh) -> SdfGrid {
        let start = Instant::now();

        let distances: Vec<f32> = self
            .points
            .par_iter()
            .map(|&p| self.estimate_distance(bvh, p))
            .collect();

        info!(
            samples = distances.len(),
            directions = self.directions.len(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "generated distance field"
        );

        let r = self.settings.resolution as usize;
        SdfGrid::from_parts([r, r, r], Vec3::repeat(self.settings.bounds_size), distances)
    }
}

/// Sample a signed distance field for `bvh` with the given settings.
pub fn generate_field(bvh: &Bvh, settings: &FieldSettings) -> Result<SdfGrid> {
    let sampler = FieldSampler::new(settings.clone())?;
    Ok(sampler.generate(bvh))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sdfgen_mesh::uv_sphere;

    fn sphere_bvh(radius: f32) -> Bvh {
        let mesh = uv_sphere(24, radius);
        Bvh::build(&mesh.positions, &mesh.indices, &mesh.normals).unwrap()
    }

    #[test]
    fn test_centre_of_sphere_is_inside() {
        let bvh = sphere_bvh(1.0);
        let sampler = FieldSampler::new(FieldSettings::new(4, 2.0, 10)).unwrap();
        let d = sampler.estimate_distance(&bvh, Point3::new(0.01, 0.02, 0.03));
        assert!(d < 0.0);
        assert_relative_eq!(d, -1.0, epsilon = 0.1);
    }

    #[test]
    fn test_far_point_is_outside() {
        let bvh = sphere_bvh(1.0);
        let sampler = FieldSampler::new(FieldSettings::new(4, 2.0, 16)).unwrap();
        let d = sampler.estimate_distance(&bvh, Point3::new(10.0, 0.0, 0.0));
        assert!(d > 0.0);
        assert!(d >= 9.0 - 1e-3, "distance {d} is too small");
    }

    #[test]
    fn test_no_hits_is_sentinel() {
        let empty = Bvh::build(&[], &[], &[]).unwrap();
        let sampler = FieldSampler::new(FieldSettings::new(2, 1.0, 8)).unwrap();
        assert_eq!(sampler.estimate_distance(&empty, Point3::origin()), f32::MAX);
    }

    #[test]
    fn test_generate_grid_shape_and_signs() {
        let bvh = sphere_bvh(1.0);
        let grid = generate_field(&bvh, &FieldSettings::new(5, 2.5, 12)).unwrap();
        assert_eq!(grid.resolution(), [5, 5, 5]);
        assert_eq!(grid.len(), 125);
        assert_eq!(grid.bounds(), Vec3::repeat(2.5));

        // Middle cell sits at the origin
        let centre = grid.get(2, 2, 2).unwrap();
        assert!(centre < 0.0);
        // Corner cells lie outside the unit sphere
        let corner = grid.get(0, 0, 0).unwrap();
        assert!(corner > 0.0);
    }

    #[test]
    fn test_generate_matches_serial() {
        let bvh = sphere_bvh(0.8);
        let sampler = FieldSampler::new(FieldSettings::new(4, 2.0, 10)).unwrap();
        let grid = sampler.generate(&bvh);
        for (p, &d) in sampler.points().iter().zip(grid.distances()) {
            assert_eq!(sampler.estimate_distance(&bvh, *p).to_bits(), d.to_bits());
        }
    }

    #[test]
    fn test_generate_deterministic() {
        let bvh = sphere_bvh(1.0);
        let settings = FieldSettings::new(6, 2.0, 10);
        let a = generate_field(&bvh, &settings).unwrap();
        let b = generate_field(&bvh, &settings).unwrap();
        let bits = |g: &SdfGrid| g.distances().iter().map(|d| d.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn test_invalid_settings() {
        let bvh = sphere_bvh(1.0);
        assert!(generate_field(&bvh, &FieldSettings::new(0, 2.0, 10)).is_err());
    }
}
