//! Error types for BVH construction.

use thiserror::Error;

/// Errors that can occur while building a BVH from mesh arrays.
///
/// Construction performs no clamping or repair: any inconsistency between
/// the index list and the vertex/normal arrays is reported up front.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BvhError {
    /// The index list does not describe whole triangles.
    #[error("index count {0} is not a multiple of 3")]
    IndicesNotTriangles(usize),

    /// The normal array does not have one entry per vertex.
    #[error("mesh has {vertices} vertices but {normals} normals")]
    NormalCountMismatch {
        /// Number of vertex positions.
        vertices: usize,
        /// Number of vertex normals.
        normals: usize,
    },

    /// A triangle references a vertex outside the vertex array.
    #[error("triangle {triangle} references vertex {index}, out of range for {len} vertices")]
    IndexOutOfRange {
        /// Triangle number in the original mesh.
        triangle: usize,
        /// The offending vertex index.
        index: u32,
        /// Number of vertices available.
        len: usize,
    },
}

/// Result type for BVH operations.
pub type Result<T> = std::result::Result<T, BvhError>;
