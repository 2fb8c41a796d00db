#![warn(missing_docs)]

//! Triangle bounding volume hierarchy and nearest-hit ray queries.
//!
//! # Architecture
//!
//! - [`BoundingBox`] - Axis-aligned min/max accumulator
//! - [`Triangle`] / [`BuildTriangle`] - Stored and build-time triangle data
//! - [`Node`] / [`NodeList`] - Index-linked nodes in a single arena
//! - [`build`] - Cost-driven recursive partitioning
//! - [`Ray`] - Slab and ray-triangle tests
//! - [`Bvh`] - The frozen hierarchy and its stack-based query
//!
//! # Example
//!
//! ```ignore
//! use sdfgen_bvh::Bvh;
//! use sdfgen_math::{Point3, Vec3};
//! use sdfgen_mesh::uv_sphere;
//!
//! let mesh = uv_sphere(32, 1.0);
//! let bvh = Bvh::build(&mesh.positions, &mesh.indices, &mesh.normals)?;
//!
//! if let Some(hit) = bvh.query(Point3::origin(), Vec3::x()) {
//!     println!("hit at {} (backface: {})", hit.distance, hit.backface);
//! }
//! ```

pub mod bbox;
pub mod build;
mod bvh;
pub mod error;
pub mod node;
mod ray;
pub mod stats;
pub mod triangle;

pub use bbox::BoundingBox;
pub use bvh::Bvh;
pub use error::{BvhError, Result};
pub use node::{Node, NodeList};
pub use ray::{Ray, RayHit, TriangleHit};
pub use stats::BuildStats;
pub use triangle::{BuildTriangle, Triangle};
