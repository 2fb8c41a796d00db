//! Error types for mesh loading.

use thiserror::Error;

/// Errors that can occur while loading a mesh.
#[derive(Error, Debug)]
pub enum MeshError {
    /// IO error reading the mesh source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A line of the OBJ source could not be parsed.
    #[error("OBJ parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    /// A face refers to a vertex that does not exist.
    #[error("face on line {line} references vertex {index}, but only {count} vertices are defined")]
    VertexOutOfRange {
        /// 1-based line number.
        line: usize,
        /// The offending (1-based or relative) OBJ index.
        index: i64,
        /// Number of vertices defined so far.
        count: usize,
    },

    /// The mesh has no triangles.
    #[error("mesh is empty")]
    EmptyMesh,
}

/// Result type for mesh operations.
pub type Result<T> = std::result::Result<T, MeshError>;
