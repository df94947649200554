// Copyright 2025 the Pointcast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene: node identifiers, flags, shapes, and local data.

use glam::{Affine3A, Vec3};

/// Identifier for a node in the scene.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// ### Liveness
///
/// Use [`Tree::is_alive`](crate::Tree::is_alive) to check whether a `NodeId` still refers to a live node.
/// Stale `NodeId`s never alias a different live node because the generation must match.
///
/// The derived ordering (slot, then generation) carries no meaning beyond being
/// deterministic; it exists so ids can key ordered maps.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Node flags controlling visibility and picking.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is visible (rendered, and considered by visible-only picks).
        const VISIBLE  = 0b0000_0001;
        /// Node is pickable (participates in ray casts).
        const PICKABLE = 0b0000_0010;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// Pickable geometry attached to a node, in the node's local space.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Shape {
    /// No geometry; the node only groups its children.
    #[default]
    Empty,
    /// Sphere centered on the local origin.
    Sphere {
        /// Radius in local units.
        radius: f32,
    },
    /// Axis-aligned box centered on the local origin.
    Cuboid {
        /// Half size along each local axis.
        half_extents: Vec3,
    },
}

/// Local data for a node.
#[derive(Clone, Debug)]
pub struct LocalNode {
    /// Lookup name. Not required to be unique; [`Tree::find_by_name`](crate::Tree::find_by_name)
    /// returns the first match in pre-order.
    pub name: String,
    /// Geometry tested by ray casts.
    pub shape: Shape,
    /// Local transform relative to parent space.
    pub local_transform: Affine3A,
    /// Visibility and picking flags.
    pub flags: NodeFlags,
}

impl Default for LocalNode {
    fn default() -> Self {
        Self {
            name: String::new(),
            shape: Shape::Empty,
            local_transform: Affine3A::IDENTITY,
            flags: NodeFlags::default(),
        }
    }
}

impl LocalNode {
    /// A named node with the given shape and an identity transform.
    pub fn named(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
            ..Default::default()
        }
    }

    /// Set the local translation, keeping the rest of the transform.
    pub fn at(mut self, translation: Vec3) -> Self {
        self.local_transform.translation = translation.into();
        self
    }
}
