//! BVH construction.
//!
//! Top-down recursive partitioning with a simplified surface-area cost:
//! a node costs `surface_area(bounds) * triangle_count`. Each split tests
//! five evenly spaced planes per axis and is only taken when the summed
//! cost of the two halves beats the cost of keeping the node whole.

use sdfgen_math::{lerp, surface_area, Point3, Vec3};

use crate::bbox::BoundingBox;
use crate::error::{BvhError, Result};
use crate::node::{Node, NodeList};
use crate::stats::BuildStats;
use crate::triangle::{BuildTriangle, Triangle};

/// Hard bound on recursion depth.
pub const MAX_DEPTH: u32 = 32;

/// Candidate split planes tested per axis.
pub const NUM_SPLIT_TESTS: usize = 5;

/// Output of a finished build.
pub(crate) struct BuildOutput {
    pub nodes: Vec<Node>,
    pub triangles: Vec<Triangle>,
    pub source_indices: Vec<u32>,
    pub stats: BuildStats,
}

#[derive(Debug, Clone, Copy)]
struct SplitChoice {
    axis: usize,
    pos: f32,
    cost: f32,
}

/// Check that `indices` describes whole triangles over `vertices`/`normals`.
pub fn validate_mesh(vertices: &[Point3], indices: &[u32], normals: &[Vec3]) -> Result<()> {
    if indices.len() % 3 != 0 {
        return Err(BvhError::IndicesNotTriangles(indices.len()));
    }
    if normals.len() != vertices.len() {
        return Err(BvhError::NormalCountMismatch {
            vertices: vertices.len(),
            normals: normals.len(),
        });
    }
    if let Some(pos) = indices.iter().position(|&i| i as usize >= vertices.len()) {
        return Err(BvhError::IndexOutOfRange {
            triangle: pos / 3,
            index: indices[pos],
            len: vertices.len(),
        });
    }
    Ok(())
}

struct Builder {
    triangles: Vec<BuildTriangle>,
    nodes: NodeList,
    stats: BuildStats,
}

/// Build the node hierarchy and the reordered triangle array.
///
/// The mesh must already have passed [`validate_mesh`].
pub(crate) fn build(vertices: &[Point3], indices: &[u32], normals: &[Vec3]) -> BuildOutput {
    let start = std::time::Instant::now();

    let mut bounds = BoundingBox::empty();
    let triangles: Vec<BuildTriangle> = indices
        .chunks_exact(3)
        .enumerate()
        .map(|(i, tri)| {
            let bt = BuildTriangle::new(
                &vertices[tri[0] as usize],
                &vertices[tri[1] as usize],
                &vertices[tri[2] as usize],
                i as u32,
            );
            bounds.grow_to_include(&bt.min, &bt.max);
            bt
        })
        .collect();

    let mut builder = Builder {
        triangles,
        nodes: NodeList::new(),
        stats: BuildStats::default(),
    };

    let root = builder.nodes.add(Node::new(&bounds));
    let count = builder.triangles.len();
    builder.split(root, 0, count, 0);

    // Partitioning has settled; read the full triangles in their final order
    let vertex = |k: usize| vertices[indices[k] as usize];
    let normal = |k: usize| normals[indices[k] as usize];
    let final_triangles: Vec<Triangle> = builder
        .triangles
        .iter()
        .map(|bt| {
            let base = bt.index as usize * 3;
            Triangle::new(
                vertex(base),
                vertex(base + 1),
                vertex(base + 2),
                normal(base),
                normal(base + 1),
                normal(base + 2),
            )
        })
        .collect();
    let source_indices = builder.triangles.iter().map(|bt| bt.index).collect();

    let mut stats = builder.stats;
    stats.time_ms = start.elapsed().as_secs_f64() * 1000.0;

    BuildOutput {
        nodes: builder.nodes.into_vec(),
        triangles: final_triangles,
        source_indices,
        stats,
    }
}

impl Builder {
    /// Split node `parent_index`, which spans triangles `[start, start + count)`.
    fn split(&mut self, parent_index: usize, start: usize, count: usize, depth: u32) {
        let parent = self.nodes.as_slice()[parent_index];
        let parent_cost = node_cost(&parent.bounds_size(), count);
        let choice = self.choose_split(&parent, start, count);

        if choice.cost < parent_cost && depth < MAX_DEPTH {
            let mut bounds_left = BoundingBox::empty();
            let mut bounds_right = BoundingBox::empty();
            let mut num_left = 0;

            for i in start..start + count {
                let tri = self.triangles[i];
                if tri.centre[choice.axis] < choice.pos {
                    bounds_left.grow_to_include(&tri.min, &tri.max);
                    self.triangles.swap(start + num_left, i);
                    num_left += 1;
                } else {
                    bounds_right.grow_to_include(&tri.min, &tri.max);
                }
            }

            let num_right = count - num_left;
            let start_right = start + num_left;

            let left = self.nodes.add(Node::with_range(&bounds_left, start as u32, 0));
            let right = self.nodes.add(Node::with_range(&bounds_right, start_right as u32, 0));

            let node = self.nodes.get_mut(parent_index);
            node.start_index = left as u32;
            node.triangle_count = 0;
            self.stats.record_node(depth, false, 0);

            self.split(left, start, num_left, depth + 1);
            self.split(right, start_right, num_right, depth + 1);
        } else {
            let node = self.nodes.get_mut(parent_index);
            node.start_index = start as u32;
            node.triangle_count = count as u32;
            self.stats.record_node(depth, true, count);
        }
    }

    fn choose_split(&self, node: &Node, start: usize, count: usize) -> SplitChoice {
        if count <= 1 {
            return SplitChoice {
                axis: 0,
                pos: 0.0,
                cost: f32::INFINITY,
            };
        }

        let mut best = SplitChoice {
            axis: 0,
            pos: 0.0,
            cost: f32::MAX,
        };

        for axis in 0..3 {
            for i in 0..NUM_SPLIT_TESTS {
                let t = (i + 1) as f32 / (NUM_SPLIT_TESTS + 1) as f32;
                let pos = lerp(node.bounds_min[axis], node.bounds_max[axis], t);
                let cost = self.evaluate_split(axis, pos, start, count);
                if cost < best.cost {
                    best = SplitChoice { axis, pos, cost };
                }
            }
        }

        best
    }

    fn evaluate_split(&self, axis: usize, pos: f32, start: usize, count: usize) -> f32 {
        let mut bounds_left = BoundingBox::empty();
        let mut bounds_right = BoundingBox::empty();
        let mut num_left = 0;
        let mut num_right = 0;

        for tri in &self.triangles[start..start + count] {
            if tri.centre[axis] < pos {
                bounds_left.grow_to_include(&tri.min, &tri.max);
                num_left += 1;
            } else {
                bounds_right.grow_to_include(&tri.min, &tri.max);
                num_right += 1;
            }
        }

        node_cost(&bounds_left.size(), num_left) + node_cost(&bounds_right.size(), num_right)
    }
}

fn node_cost(size: &Vec3, num_triangles: usize) -> f32 {
    surface_area(size) * num_triangles as f32
}
