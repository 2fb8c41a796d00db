//! Bounding volume hierarchy over a triangle mesh.

use sdfgen_math::{Point3, Vec3};

use crate::build::{build, validate_mesh};
use crate::error::Result;
use crate::node::Node;
use crate::ray::{Ray, RayHit};
use crate::stats::BuildStats;
use crate::triangle::Triangle;

/// Initial traversal stack capacity; grows if a query needs more.
const STACK_CAPACITY: usize = 64;

/// An immutable triangle BVH.
///
/// Built once from a mesh snapshot, then only read. Queries take `&self`
/// and hold no interior state, so any number of threads can query one
/// hierarchy concurrently.
#[derive(Debug, Clone)]
pub struct Bvh {
    nodes: Vec<Node>,
    triangles: Vec<Triangle>,
    source_indices: Vec<u32>,
    stats: BuildStats,
}

impl Bvh {
    /// Build a BVH from mesh arrays.
    ///
    /// `indices` holds one triple per triangle; `normals` has one entry per
    /// vertex. Returns an error, without clamping, if any index is out of
    /// range or the array lengths disagree. The input arrays are only read
    /// during the call.
    pub fn build(vertices: &[Point3], indices: &[u32], normals: &[Vec3]) -> Result<Self> {
        validate_mesh(vertices, indices, normals)?;

        let out = build(vertices, indices, normals);
        tracing::debug!(
            triangles = out.stats.triangle_count,
            nodes = out.stats.total_node_count,
            leaves = out.stats.leaf_node_count,
            max_depth = out.stats.leaf_depth_max,
            time_ms = out.stats.time_ms,
            "built BVH"
        );

        Ok(Self {
            nodes: out.nodes,
            triangles: out.triangles,
            source_indices: out.source_indices,
            stats: out.stats,
        })
    }

    /// Find the nearest triangle hit by the ray from `origin` along `direction`.
    ///
    /// Distances are in units of `direction`'s length. Returns `None` when
    /// nothing is struck.
    pub fn query(&self, origin: Point3, direction: Vec3) -> Option<RayHit> {
        self.query_ray(&Ray::new(origin, direction))
    }

    /// Find the nearest triangle hit by `ray`.
    ///
    /// Traverses with an explicit stack. At interior nodes the farther child
    /// is pushed first so the nearer one is visited first, and a child whose
    /// box entry distance cannot beat the current best hit is never pushed.
    /// Among hits at exactly equal distance the first one found is kept.
    pub fn query_ray(&self, ray: &Ray) -> Option<RayHit> {
        if self.triangles.is_empty() {
            return None;
        }

        let mut stack: Vec<usize> = Vec::with_capacity(STACK_CAPACITY);
        stack.push(0);

        let mut min_dst = f32::INFINITY;
        let mut best: Option<RayHit> = None;

        while let Some(index) = stack.pop() {
            let node = &self.nodes[index];

            if let Some(range) = node.triangle_range() {
                for tri_index in range {
                    let Some(hit) = ray.intersect_triangle(&self.triangles[tri_index]) else {
                        continue;
                    };
                    if hit.distance < min_dst {
                        min_dst = hit.distance;
                        best = Some(RayHit {
                            distance: hit.distance,
                            point: ray.at(hit.distance),
                            backface: hit.backface,
                            triangle: tri_index,
                        });
                    }
                }
            } else {
                let left = node.start_index as usize;
                let right = left + 1;
                let child_a = &self.nodes[left];
                let child_b = &self.nodes[right];

                let dst_a = ray.box_distance(&child_a.bounds_min, &child_a.bounds_max);
                let dst_b = ray.box_distance(&child_b.bounds_min, &child_b.bounds_max);

                let ((near, near_dst), (far, far_dst)) = if dst_a > dst_b {
                    ((right, dst_b), (left, dst_a))
                } else {
                    ((left, dst_a), (right, dst_b))
                };

                if far_dst < min_dst {
                    stack.push(far);
                }
                if near_dst < min_dst {
                    stack.push(near);
                }
            }
        }

        best
    }

    /// Nearest hit found by testing every triangle, without the hierarchy.
    ///
    /// Reference implementation for checking [`query`](Self::query).
    pub fn query_linear(&self, origin: Point3, direction: Vec3) -> Option<RayHit> {
        let ray = Ray::new(origin, direction);
        let mut best: Option<RayHit> = None;
        for (tri_index, tri) in self.triangles.iter().enumerate() {
            let Some(hit) = ray.intersect_triangle(tri) else {
                continue;
            };
            if best.map_or(true, |b| hit.distance < b.distance) {
                best = Some(RayHit {
                    distance: hit.distance,
                    point: ray.at(hit.distance),
                    backface: hit.backface,
                    triangle: tri_index,
                });
            }
        }
        best
    }

    /// All nodes; index 0 is the root.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Triangles in hierarchy order. Leaves own contiguous ranges of this array.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Original mesh triangle number of the triangle at `index` in [`triangles`](Self::triangles).
    pub fn source_index(&self, index: usize) -> Option<usize> {
        self.source_indices.get(index).map(|&i| i as usize)
    }

    /// Statistics collected during the build.
    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    /// Bounds of the whole mesh, or `None` if it has no triangles.
    pub fn bounds(&self) -> Option<(Point3, Point3)> {
        if self.triangles.is_empty() {
            return None;
        }
        self.nodes.first().map(|root| (root.bounds_min, root.bounds_max))
    }
}
