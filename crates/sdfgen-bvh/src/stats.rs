//! Build statistics.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Diagnostic counters collected while building a BVH.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildStats {
    /// Wall-clock build time in milliseconds.
    pub time_ms: f64,
    /// Triangles owned by leaves (equals the mesh triangle count).
    pub triangle_count: usize,
    /// Total number of nodes.
    pub total_node_count: usize,
    /// Number of leaf nodes.
    pub leaf_node_count: usize,
    /// Deepest leaf.
    pub leaf_depth_max: u32,
    /// Shallowest leaf.
    pub leaf_depth_min: u32,
    /// Sum of leaf depths, for the mean.
    pub leaf_depth_sum: u64,
    /// Most triangles in one leaf.
    pub leaf_max_tri_count: usize,
    /// Fewest triangles in one leaf.
    pub leaf_min_tri_count: usize,
}

impl BuildStats {
    /// Record one settled node.
    pub fn record_node(&mut self, depth: u32, is_leaf: bool, tri_count: usize) {
        self.total_node_count += 1;

        if is_leaf {
            self.leaf_node_count += 1;
            self.leaf_depth_sum += u64::from(depth);
            self.leaf_depth_min = self.leaf_depth_min.min(depth);
            self.leaf_depth_max = self.leaf_depth_max.max(depth);
            self.triangle_count += tri_count;

            self.leaf_max_tri_count = self.leaf_max_tri_count.max(tri_count);
            self.leaf_min_tri_count = self.leaf_min_tri_count.min(tri_count);
        }
    }

    /// Mean leaf depth.
    pub fn leaf_depth_mean(&self) -> f64 {
        if self.leaf_node_count == 0 {
            return 0.0;
        }
        self.leaf_depth_sum as f64 / self.leaf_node_count as f64
    }

    /// Mean triangles per leaf.
    pub fn leaf_tri_mean(&self) -> f64 {
        if self.leaf_node_count == 0 {
            return 0.0;
        }
        self.triangle_count as f64 / self.leaf_node_count as f64
    }
}

impl Default for BuildStats {
    fn default() -> Self {
        Self {
            time_ms: 0.0,
            triangle_count: 0,
            total_node_count: 0,
            leaf_node_count: 0,
            leaf_depth_max: 0,
            leaf_depth_min: u32::MAX,
            leaf_depth_sum: 0,
            leaf_max_tri_count: 0,
            leaf_min_tri_count: usize::MAX,
        }
    }
}

impl fmt::Display for BuildStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Time (BVH): {:.3} ms", self.time_ms)?;
        writeln!(f, "Triangles: {}", self.triangle_count)?;
        writeln!(f, "Node Count: {}", self.total_node_count)?;
        writeln!(f, "Leaf Count: {}", self.leaf_node_count)?;
        writeln!(f, "Leaf Depth:")?;
        writeln!(f, " - Min: {}", self.leaf_depth_min)?;
        writeln!(f, " - Max: {}", self.leaf_depth_max)?;
        writeln!(f, " - Mean: {:.4}", self.leaf_depth_mean())?;
        writeln!(f, "Leaf Tris:")?;
        writeln!(f, " - Min: {}", self.leaf_min_tri_count)?;
        writeln!(f, " - Max: {}", self.leaf_max_tri_count)?;
        write!(f, " - Mean: {:.4}", self.leaf_tri_mean())
    }
}
