// Copyright 2025 the Pointcast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, updates, queries.

use glam::Affine3A;

use crate::ray::Ray;
use crate::types::{LocalNode, NodeFlags, NodeId, Shape};

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// Top-level scene tree.
pub struct Tree {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    epoch: u64,
    journal: Changes,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}

/// A single ray-cast result.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    /// The node whose shape was hit.
    pub node: NodeId,
    /// World-space distance from the ray origin (for unit-length ray directions).
    pub distance: f32,
}

/// Filters applied during ray casts.
///
/// Used by [`Tree::raycast`].
#[derive(Clone, Copy, Debug, Default)]
pub struct PickFilter {
    /// If true, only consider nodes marked [`NodeFlags::VISIBLE`].
    pub visible_only: bool,
    /// If true, only consider nodes marked [`NodeFlags::PICKABLE`].
    pub pickable_only: bool,
}

/// A node attached to the tree since the last commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Added {
    /// The attached node.
    pub node: NodeId,
    /// Its parent at the time of attachment, or `None` for a new root.
    pub parent: Option<NodeId>,
}

/// Structural changes recorded between two [`Tree::commit`] calls.
///
/// Hosts forward `added` entries to interested parties (for example an
/// interaction manager that registers every child of the scene root).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Changes {
    /// Attachments in the order they happened. Reparenting counts as an attachment.
    /// Nodes removed again before the commit are omitted.
    pub added: Vec<Added>,
    /// Removed nodes, including every node of removed subtrees.
    pub removed: Vec<NodeId>,
}

impl Changes {
    /// True if nothing was attached or removed.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Nodes attached directly under `parent`.
    pub fn added_under(&self, parent: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.added
            .iter()
            .filter(move |a| a.parent == Some(parent))
            .map(|a| a.node)
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: LocalNode,
    world: Affine3A,
}

impl Node {
    fn new(generation: u32, local: LocalNode) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            world: local.local_transform,
            local,
        }
    }
}

impl Tree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            epoch: 0,
            journal: Changes::default(),
        }
    }

    /// Insert a new node as a child of `parent` (or as a root if `None`).
    ///
    /// A stale `parent` inserts the node as a root.
    pub fn insert(&mut self, parent: Option<NodeId>, local: LocalNode) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, local));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId indices are 32-bit."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, local)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId indices are 32-bit."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        let parent = parent.filter(|p| self.is_alive(*p));
        if let Some(p) = parent {
            self.link_parent(id, p);
        }
        self.journal.added.push(Added { node: id, parent });
        id
    }

    /// Remove a node (and its subtree) from the tree.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        let children = self.node(id).children.clone();
        for child in children {
            self.remove(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
        self.journal.removed.push(id);
    }

    /// Reparent `id` under `new_parent` (or make it a root).
    ///
    /// Returns `false` without changing anything if either id is stale or if
    /// `new_parent` lies inside the subtree of `id`.
    pub fn reparent(&mut self, id: NodeId, new_parent: Option<NodeId>) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        if let Some(p) = new_parent
            && (!self.is_alive(p) || self.is_in_subtree(p, id))
        {
            return false;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        if let Some(p) = new_parent {
            self.link_parent(id, p);
        }
        self.journal.added.push(Added {
            node: id,
            parent: new_parent,
        });
        true
    }

    /// Update the lookup name.
    pub fn set_name(&mut self, id: NodeId, name: impl Into<String>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.name = name.into();
        }
    }

    /// Update local transform. Takes effect for picking after the next [`Tree::commit`].
    pub fn set_local_transform(&mut self, id: NodeId, tf: Affine3A) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.local_transform = tf;
        }
    }

    /// Update the pickable shape.
    pub fn set_shape(&mut self, id: NodeId, shape: Shape) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.shape = shape;
        }
    }

    /// Update node flags.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.flags = flags;
        }
    }

    /// Recompute world transforms and return the structural changes since the last commit.
    pub fn commit(&mut self) -> Changes {
        let roots: Vec<NodeId> = self.roots().collect();
        for root in roots {
            self.update_world_recursive(root, Affine3A::IDENTITY);
        }
        self.epoch = self.epoch.wrapping_add(1);
        let mut changes = core::mem::take(&mut self.journal);
        changes.added.retain(|a| self.is_alive(a.node));
        changes
    }

    /// Cast `ray` against `root` and, if `recursive`, all of its descendants.
    ///
    /// Hits are appended to `out` sorted by ascending distance. Uses the world
    /// transforms computed by the last [`Tree::commit`].
    pub fn raycast(
        &self,
        ray: &Ray,
        root: NodeId,
        recursive: bool,
        filter: PickFilter,
        out: &mut Vec<Hit>,
    ) {
        if !self.is_alive(root) {
            return;
        }
        let start = out.len();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes[id.idx()].as_ref() else {
                continue;
            };
            let flags = node.local.flags;
            let eligible = !(filter.visible_only && !flags.contains(NodeFlags::VISIBLE)
                || filter.pickable_only && !flags.contains(NodeFlags::PICKABLE));
            if eligible && let Some(distance) = ray.intersect_shape(&node.local.shape, &node.world)
            {
                out.push(Hit { node: id, distance });
            }
            if recursive {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out[start..].sort_by(|a, b| a.distance.total_cmp(&b.distance));
    }

    /// First node named `name` within the subtree of `root`, in pre-order.
    ///
    /// `root` itself is checked first.
    pub fn find_by_name(&self, root: NodeId, name: &str) -> Option<NodeId> {
        if !self.is_alive(root) {
            return None;
        }
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            if node.local.name == name {
                return Some(id);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }

    /// Returns true if `node` is `root` or one of its descendants.
    pub fn is_in_subtree(&self, node: NodeId, root: NodeId) -> bool {
        if !self.is_alive(node) || !self.is_alive(root) {
            return false;
        }
        let mut cur = Some(node);
        while let Some(id) = cur {
            if id == root {
                return true;
            }
            cur = self.node(id).parent;
        }
        false
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    /// See [`NodeId`] docs for the generational semantics.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Name of a live node.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.node_opt(id).map(|n| n.local.name.as_str())
    }

    /// Parent of a live node, `None` for roots and stale ids.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Children of a live node in insertion order; empty for stale ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// World transform as of the last commit.
    pub fn world_transform(&self, id: NodeId) -> Option<Affine3A> {
        self.node_opt(id).map(|n| n.world)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    /// True if the tree has no live nodes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate root nodes in slot order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().enumerate().filter_map(|(i, n)| match n {
            Some(n) if n.parent.is_none() =>
            {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "NodeId indices are 32-bit."
                )]
                Some(NodeId::new(i as u32, n.generation))
            }
            _ => None,
        })
    }

    // --- internals ---

    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }

    fn update_world_recursive(&mut self, id: NodeId, parent_tf: Affine3A) {
        let (world, children) = {
            let node = self.node_mut(id);
            node.world = parent_tf * node.local.local_transform;
            (node.world, node.children.clone())
        };
        for child in children {
            self.update_world_recursive(child, world);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn sphere(name: &str, x: f32, z: f32) -> LocalNode {
        LocalNode::named(name, Shape::Sphere { radius: 1.0 }).at(Vec3::new(x, 0.0, z))
    }

    fn forward_ray() -> Ray {
        Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z)
    }

    #[test]
    fn raycast_recursive_collects_sorted_hits() {
        let mut tree = Tree::new();
        let group = tree.insert(None, LocalNode::named("group", Shape::Empty));
        let far = tree.insert(Some(group), sphere("far", 0.0, -5.0));
        let near = tree.insert(Some(group), sphere("near", 0.0, 2.0));
        let _ = tree.commit();

        let mut hits = Vec::new();
        tree.raycast(&forward_ray(), group, true, PickFilter::default(), &mut hits);
        let order: Vec<NodeId> = hits.iter().map(|h| h.node).collect();
        assert_eq!(order, vec![near, far]);
        assert!((hits[0].distance - 7.0).abs() < 1e-4);

        let mut shallow = Vec::new();
        tree.raycast(&forward_ray(), group, false, PickFilter::default(), &mut shallow);
        assert!(shallow.is_empty(), "group has no shape of its own");
    }

    #[test]
    fn child_inherits_parent_transform_after_commit() {
        let mut tree = Tree::new();
        let parent = tree.insert(
            None,
            LocalNode::named("parent", Shape::Empty).at(Vec3::new(0.0, 0.0, -4.0)),
        );
        let child = tree.insert(Some(parent), sphere("child", 0.0, 0.0));
        let _ = tree.commit();
        let mut hits = Vec::new();
        tree.raycast(&forward_ray(), child, false, PickFilter::default(), &mut hits);
        assert!((hits[0].distance - 13.0).abs() < 1e-4);
    }

    #[test]
    fn pick_filter_skips_unpickable() {
        let mut tree = Tree::new();
        let a = tree.insert(None, sphere("a", 0.0, 0.0));
        tree.set_flags(a, NodeFlags::VISIBLE);
        let _ = tree.commit();
        let filter = PickFilter {
            visible_only: true,
            pickable_only: true,
        };
        let mut hits = Vec::new();
        tree.raycast(&forward_ray(), a, true, filter, &mut hits);
        assert!(hits.is_empty());
        tree.raycast(&forward_ray(), a, true, PickFilter::default(), &mut hits);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn find_by_name_is_preorder_and_includes_root() {
        let mut tree = Tree::new();
        let root = tree.insert(None, LocalNode::named("root", Shape::Empty));
        let a = tree.insert(Some(root), LocalNode::named("a", Shape::Empty));
        let dup_deep = tree.insert(Some(a), LocalNode::named("dup", Shape::Empty));
        let _dup_shallow = tree.insert(Some(root), LocalNode::named("dup", Shape::Empty));
        assert_eq!(tree.find_by_name(root, "root"), Some(root));
        assert_eq!(tree.find_by_name(root, "dup"), Some(dup_deep));
        assert_eq!(tree.find_by_name(a, "root"), None);
        assert_eq!(tree.find_by_name(root, "missing"), None);
    }

    #[test]
    fn commit_reports_attachments_and_removals() {
        let mut tree = Tree::new();
        let scene = tree.insert(None, LocalNode::named("scene", Shape::Empty));
        let _ = tree.commit();

        let a = tree.insert(Some(scene), sphere("a", 0.0, 0.0));
        let b = tree.insert(Some(a), sphere("b", 0.0, 0.0));
        let gone = tree.insert(Some(scene), sphere("gone", 0.0, 0.0));
        tree.remove(gone);
        let changes = tree.commit();
        assert_eq!(changes.added_under(scene).collect::<Vec<_>>(), vec![a]);
        assert_eq!(changes.added_under(a).collect::<Vec<_>>(), vec![b]);
        assert_eq!(changes.removed, vec![gone]);
        assert!(tree.commit().is_empty());
    }

    #[test]
    fn reparent_rejects_cycles() {
        let mut tree = Tree::new();
        let root = tree.insert(None, LocalNode::default());
        let child = tree.insert(Some(root), LocalNode::default());
        assert!(!tree.reparent(root, Some(child)));
        assert_eq!(tree.parent(child), Some(root));
        assert!(tree.reparent(child, None));
        assert_eq!(tree.parent(child), None);
        assert!(tree.children(root).is_empty());
    }

    #[test]
    fn liveness_insert_remove_reuse() {
        let mut tree = Tree::new();
        let root = tree.insert(None, LocalNode::default());
        let a = tree.insert(Some(root), LocalNode::default());
        assert!(tree.is_alive(root));
        assert!(tree.is_alive(a));

        tree.remove(root);
        assert!(!tree.is_alive(root));
        assert!(!tree.is_alive(a), "subtree goes with its root");
        assert!(tree.is_empty());

        let b = tree.insert(None, LocalNode::default());
        assert!(tree.is_alive(b));
        assert!(!tree.is_alive(a));
        assert!(!tree.is_alive(root));
        assert_eq!(tree.name(root), None);
    }

    #[test]
    fn subtree_membership() {
        let mut tree = Tree::new();
        let root = tree.insert(None, LocalNode::default());
        let a = tree.insert(Some(root), LocalNode::default());
        let other = tree.insert(None, LocalNode::default());
        assert!(tree.is_in_subtree(a, root));
        assert!(tree.is_in_subtree(root, root));
        assert!(!tree.is_in_subtree(root, a));
        assert!(!tree.is_in_subtree(other, root));
    }
}
