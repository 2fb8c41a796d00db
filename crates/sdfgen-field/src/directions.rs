//! Quasi-uniform ray directions.

use std::f32::consts::TAU;

use sdfgen_math::{Vec3, GOLDEN_RATIO};

/// `count` unit directions spread over the sphere by a golden-ratio spiral.
///
/// For index `i`, `t = i / count`, inclination `acos(1 - 2t)` and azimuth
/// `i * 2π * φ`. The set is fully determined by `count`.
pub fn fibonacci_directions(count: u32) -> Vec<Vec3> {
    (0..count)
        .map(|i| {
            let t = i as f32 / count as f32;
            let inclination = (1.0 - 2.0 * t).acos();
            let azimuth = TAU * GOLDEN_RATIO * i as f32;

            let (sin_i, cos_i) = inclination.sin_cos();
            let (sin_a, cos_a) = azimuth.sin_cos();
            Vec3::new(sin_i * cos_a, sin_i * sin_a, cos_i)
        })
        .collect()
}
