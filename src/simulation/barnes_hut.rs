//! # Barnes–Hut Octree (3D)
//!
//! This module implements a **3D Barnes–Hut octree** used for the
//! asteroid-to-asteroid term once the live asteroid population reaches the
//! hybrid threshold. It replaces the `O(k²)` all-pairs sum with an
//! approximate `O(k log k)` traversal.
//!
//! ## Core Concepts
//!
//! - Space is recursively subdivided into 8 cubic octants.
//! - A node is a **leaf** when it holds at most [`LEAF_CAPACITY`] bodies (or
//!   the depth limit is hit); leaves keep their members and are always summed
//!   directly.
//! - Every node stores its total mass and center of mass (the monopole
//!   moment), computed bottom-up after the children are built.
//! - During traversal a node is collapsed into a single point mass when
//!   `size / distance < theta`. Nodes heavier than the "very massive" cutoff
//!   are tested against a tightened theta.
//! - A node whose box contains the body being evaluated is never collapsed,
//!   so a body cannot feel its own mass through an aggregate.
//!
//! The tree is rebuilt from scratch every step and only ever sees the body
//! indices it was built over, so dead bodies never contribute.

use crate::simulation::forces::GravityLaw;
use crate::simulation::states::{Body, NVec3};

/// Bodies a leaf may hold before it is split
pub const LEAF_CAPACITY: usize = 8;

/// Depth at which splitting stops, so coincident bodies end up in one leaf
pub const MAX_DEPTH: usize = 32;

/// Opening-angle test used while traversing the tree
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpeningCriterion {
    pub theta: f64, // node is a point mass when size / distance < theta
    pub massive_node_mass: f64, // above this aggregate mass...
    pub massive_theta_factor: f64, // ...theta is multiplied by this
}

impl OpeningCriterion {
    /// Opening angle to use against a node of the given aggregate mass
    pub fn theta_for(&self, node_mass: f64) -> f64 {
        if node_mass > self.massive_node_mass {
            self.theta * self.massive_theta_factor
        } else {
            self.theta
        }
    }

    /// True if a node of `size` and `mass` seen from `distance` may be
    /// replaced by its center of mass
    pub fn admits(&self, size: f64, distance: f64, mass: f64) -> bool {
        distance > 0.0 && size / distance < self.theta_for(mass)
    }
}

/// A single octree node.
///
/// Internal nodes have at least one child; leaves have none and own the
/// range `members` of [`BarnesHutTree3::order`].
#[derive(Debug, Clone)]
pub struct OctreeNode {
    pub mass: f64,
    pub com: NVec3,
    pub bbox_min: NVec3,
    pub bbox_max: NVec3,
    pub children: [Option<usize>; 8], // indices into BarnesHutTree3::nodes
    pub members: std::ops::Range<usize>, // leaf members, indices into order
}

impl OctreeNode {
    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(|c| c.is_none())
    }

    /// Edge length of the node's cube
    pub fn size(&self) -> f64 {
        let extent = self.bbox_max - self.bbox_min;
        extent.x.max(extent.y).max(extent.z)
    }

    /// True if `p` lies inside the node's box, faces included
    pub fn contains(&self, p: &NVec3) -> bool {
        (0..3).all(|k| p[k] >= self.bbox_min[k] && p[k] <= self.bbox_max[k])
    }
}

/// A complete octree built over a subset of a body slice.
///
/// Owns the nodes plus `order`, the body indices laid out so that every
/// leaf's members are contiguous. The body slice itself is borrowed again at
/// query time and must be the one the tree was built from.
#[derive(Debug, Clone, Default)]
pub struct BarnesHutTree3 {
    pub nodes: Vec<OctreeNode>,
    pub order: Vec<usize>,
    pub root: Option<usize>,
}

impl BarnesHutTree3 {
    /// Build an octree over `bodies[i]` for every `i` in `indices`.
    ///
    /// 1. Computes a cubic bounding box enclosing the selected bodies.
    /// 2. Recursively partitions them into octants until leaves are small.
    /// 3. Fills in mass and center of mass on the way back up.
    pub fn build(bodies: &[Body], indices: &[usize]) -> Self {
        let mut tree = BarnesHutTree3 {
            nodes: Vec::with_capacity(indices.len() / LEAF_CAPACITY * 2 + 1),
            order: Vec::with_capacity(indices.len()),
            root: None,
        };

        if indices.is_empty() {
            return tree;
        }

        let (bbox_min, bbox_max) = compute_bbox(bodies, indices);
        let root = tree.build_node(bodies, indices.to_vec(), bbox_min, bbox_max, 0);
        tree.root = Some(root);
        tree
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total mass held by the tree
    pub fn total_mass(&self) -> f64 {
        self.root.map_or(0.0, |r| self.nodes[r].mass)
    }

    pub fn center_of_mass(&self) -> Option<NVec3> {
        self.root.map(|r| self.nodes[r].com)
    }

    /// Approximate acceleration on body `i` from every other body in the tree.
    ///
    /// `i` does not have to be a member; if it is, it is skipped in its own
    /// leaf.
    pub fn force_on_body(
        &self,
        i: usize,
        bodies: &[Body],
        law: &GravityLaw,
        opening: &OpeningCriterion,
    ) -> NVec3 {
        let mut acc = NVec3::zeros();
        if let Some(root) = self.root {
            self.traverse_node(root, i, &bodies[i].position, bodies, law, opening, &mut acc);
        }
        acc
    }

    // helpers ==============================================================================

    /// Create the node covering `[bbox_min, bbox_max]` for `indices` and
    /// everything below it. Returns the node's index.
    fn build_node(
        &mut self,
        bodies: &[Body],
        indices: Vec<usize>,
        bbox_min: NVec3,
        bbox_max: NVec3,
        depth: usize,
    ) -> usize {
        let node_idx = self.nodes.len();
        self.nodes.push(OctreeNode {
            mass: 0.0,
            com: NVec3::zeros(),
            bbox_min,
            bbox_max,
            children: [None; 8],
            members: 0..0,
        });

        // Leaf: keep the members, sum them directly
        if indices.len() <= LEAF_CAPACITY || depth >= MAX_DEPTH {
            let (mass, com) = monopole(indices.iter().map(|&b| (bodies[b].mass, bodies[b].position)));
            let start = self.order.len();
            self.order.extend_from_slice(&indices);
            let end = self.order.len();
            let node = &mut self.nodes[node_idx];
            node.members = start..end;
            node.mass = mass;
            node.com = com;
            return node_idx;
        }

        // Internal: bucket by octant and recurse
        let mut octants: [Vec<usize>; 8] = Default::default();
        for b in indices {
            let k = child_index_for_point(&bodies[b].position, &bbox_min, &bbox_max);
            octants[k].push(b);
        }

        let mut children = [None; 8];
        for (k, members) in octants.into_iter().enumerate() {
            if members.is_empty() {
                continue;
            }
            let (cmin, cmax) = child_bbox(&bbox_min, &bbox_max, k);
            children[k] = Some(self.build_node(bodies, members, cmin, cmax, depth + 1));
        }

        // Bottom-up: aggregate from the finished children
        let (mass, com) = monopole(
            children
                .iter()
                .flatten()
                .map(|&c| (self.nodes[c].mass, self.nodes[c].com)),
        );

        let node = &mut self.nodes[node_idx];
        node.children = children;
        node.mass = mass;
        node.com = com;
        node_idx
    }

    /// Recursively accumulate the acceleration on `pos_i` from one subtree.
    ///
    /// - empty node: nothing
    /// - leaf: exact sum over its members, skipping `body_idx`
    /// - internal node: point mass at its COM if it does not contain `pos_i`
    ///   and the opening test passes, otherwise descend
    #[allow(clippy::too_many_arguments)]
    fn traverse_node(
        &self,
        node_idx: usize,
        body_idx: usize,
        pos_i: &NVec3,
        bodies: &[Body],
        law: &GravityLaw,
        opening: &OpeningCriterion,
        acc: &mut NVec3,
    ) {
        let node = &self.nodes[node_idx];

        if node.mass == 0.0 {
            return;
        }

        if node.is_leaf() {
            for &b in &self.order[node.members.clone()] {
                if b == body_idx {
                    continue; // don't self-interact
                }
                let other = &bodies[b];
                *acc += law.accel(pos_i, &other.position, other.mass);
            }
            return;
        }

        // A node around the target is always opened, whatever theta says
        let distance = (node.com - pos_i).norm();
        if !node.contains(pos_i) && opening.admits(node.size(), distance, node.mass) {
            *acc += law.accel(pos_i, &node.com, node.mass);
        } else {
            for child in node.children.iter().flatten() {
                self.traverse_node(*child, body_idx, pos_i, bodies, law, opening, acc);
            }
        }
    }
}

// helpers ===========================================================================

/// Total mass and mass-weighted center of a set of point masses
fn monopole(points: impl Iterator<Item = (f64, NVec3)>) -> (f64, NVec3) {
    let (mass, weighted) = points.fold((0.0, NVec3::zeros()), |(m, w), (pm, pos)| {
        (m + pm, w + pos * pm)
    });
    if mass > 0.0 {
        (mass, weighted / mass)
    } else {
        (0.0, NVec3::zeros())
    }
}

/// Cubic bounding box enclosing the selected bodies.
///
/// The axis-aligned box is expanded into a cube around its center so that a
/// node's size is a single number.
fn compute_bbox(bodies: &[Body], indices: &[usize]) -> (NVec3, NVec3) {
    let mut min = NVec3::repeat(f64::INFINITY);
    let mut max = NVec3::repeat(f64::NEG_INFINITY);

    for &i in indices {
        let p = &bodies[i].position;
        min = min.inf(p);
        max = max.sup(p);
    }

    let center = (min + max) * 0.5;
    let half = ((max - min) * 0.5).max();
    let half = NVec3::repeat(half);

    (center - half, center + half)
}

/// Octant of `p` within a box, one bit per axis:
/// bit 0 = x >= center.x, bit 1 = y >= center.y, bit 2 = z >= center.z
fn child_index_for_point(p: &NVec3, bbox_min: &NVec3, bbox_max: &NVec3) -> usize {
    let center = (bbox_min + bbox_max) * 0.5;
    let mut idx = 0;

    if p.x >= center.x { idx |= 1; }
    if p.y >= center.y { idx |= 2; }
    if p.z >= center.z { idx |= 4; }

    idx
}

/// Bounding box of octant `child_idx`, same bit layout as [`child_index_for_point`]
fn child_bbox(parent_min: &NVec3, parent_max: &NVec3, child_idx: usize) -> (NVec3, NVec3) {
    let center = (parent_min + parent_max) * 0.5;

    let mut min = *parent_min;
    let mut max = *parent_max;

    for axis in 0..3 {
        if child_idx & (1 << axis) == 0 {
            max[axis] = center[axis];
        } else {
            min[axis] = center[axis];
        }
    }

    (min, max)
}
