//! Hierarchy nodes and the arena that owns them.

use std::ops::Range;

use sdfgen_math::{Point3, Vec3};

use crate::bbox::BoundingBox;

/// A BVH node, referenced by its index in a [`NodeList`].
///
/// - Leaf (`triangle_count > 0`): `start_index` is the offset of the first
///   owned triangle in the BVH triangle array.
/// - Interior (`triangle_count == 0`): `start_index` is the arena index of
///   the left child; the right child is always `start_index + 1`.
///
/// The bounds enclose everything beneath the node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    /// Minimum corner of the node bounds.
    pub bounds_min: Point3,
    /// Maximum corner of the node bounds.
    pub bounds_max: Point3,
    /// First child index (interior) or first triangle index (leaf).
    pub start_index: u32,
    /// Number of owned triangles; zero for interior nodes.
    pub triangle_count: u32,
}

impl Node {
    /// A node with the given bounds and no triangles assigned yet.
    pub fn new(bounds: &BoundingBox) -> Self {
        Self::with_range(bounds, 0, 0)
    }

    /// A node with the given bounds and triangle range.
    pub fn with_range(bounds: &BoundingBox, start_index: u32, triangle_count: u32) -> Self {
        Self {
            bounds_min: bounds.min,
            bounds_max: bounds.max,
            start_index,
            triangle_count,
        }
    }

    /// Whether this node owns triangles rather than children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.triangle_count > 0
    }

    /// Arena indices of the two children, for interior nodes.
    pub fn children(&self) -> Option<(usize, usize)> {
        if self.is_leaf() {
            None
        } else {
            let left = self.start_index as usize;
            Some((left, left + 1))
        }
    }

    /// Range of owned triangles, for leaf nodes.
    pub fn triangle_range(&self) -> Option<Range<usize>> {
        if self.is_leaf() {
            let start = self.start_index as usize;
            Some(start..start + self.triangle_count as usize)
        } else {
            None
        }
    }

    /// Edge lengths of the node bounds.
    pub fn bounds_size(&self) -> Vec3 {
        self.bounds_max - self.bounds_min
    }

    /// Centre of the node bounds.
    pub fn bounds_centre(&self) -> Point3 {
        Point3::from((self.bounds_min.coords + self.bounds_max.coords) / 2.0)
    }
}

/// Growable arena of nodes.
///
/// Nodes are only ever appended during construction and refer to each
/// other purely by index.
#[derive(Debug, Clone)]
pub struct NodeList {
    nodes: Vec<Node>,
}

impl NodeList {
    /// Initial arena capacity.
    pub const INITIAL_CAPACITY: usize = 256;

    /// Create an empty arena.
    pub fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(Self::INITIAL_CAPACITY),
        }
    }

    /// Append a node, returning its index.
    pub fn add(&mut self, node: Node) -> usize {
        let index = self.nodes.len();
        self.nodes.push(node);
        index
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node at `index`.
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> &mut Node {
        &mut self.nodes[index]
    }

    /// All nodes, in insertion order.
    pub fn as_slice(&self) -> &[Node] {
        &self.nodes
    }

    /// Freeze the arena into its node vector.
    pub fn into_vec(self) -> Vec<Node> {
        self.nodes
    }
}

impl Default for NodeList {
    fn default() -> Self {
        Self::new()
    }
}
