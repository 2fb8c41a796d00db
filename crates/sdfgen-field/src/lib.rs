#![warn(missing_docs)]

//! Signed distance field generation from a triangle BVH.
//!
//! A cube centred on the origin is sampled on a regular grid. From every
//! sample a fixed Fibonacci-sphere set of rays is cast through the
//! hierarchy; the nearest hit gives the magnitude and a majority vote of
//! back-face versus front-face hits gives the sign.
//!
//! # Example
//!
//! ```ignore
//! use sdfgen_bvh::Bvh;
//! use sdfgen_field::{generate_field, FieldSettings};
//! use sdfgen_mesh::uv_sphere;
//!
//! let mesh = uv_sphere(32, 1.0);
//! let bvh = Bvh::build(&mesh.positions, &mesh.indices, &mesh.normals)?;
//! let grid = generate_field(&bvh, &FieldSettings::default())?;
//! grid.save("sphere.sdf.txt")?;
//! ```

pub mod directions;
pub mod error;
mod format;
pub mod grid;
mod sampler;
pub mod settings;

pub use directions::fibonacci_directions;
pub use error::{FieldError, Result};
pub use format::format_distance;
pub use grid::{sample_point, sample_points, SdfGrid};
pub use sampler::{generate_field, FieldSampler};
pub use settings::FieldSettings;
