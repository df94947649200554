// Copyright 2025 the Pointcast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointcast Scene: a small 3D scene graph with ray picking.
//!
//! Pointcast Scene is the reference hit-test engine for `pointcast_interaction`.
//!
//! - Represents a hierarchy of named nodes with local transforms, simple shapes, and flags.
//! - Casts rays against a node and, optionally, its whole subtree, reporting world-space distances.
//! - Derives pick rays from normalized device coordinates with a [`PerspectiveCamera`].
//! - Batches structural changes and reports them from [`Tree::commit`], so hosts can
//!   forward "child added" notifications without callbacks.
//!
//! It does not render anything and has no notion of materials or meshes; shapes
//! exist only to be picked.
//!
//! ## API overview
//!
//! - [`Tree`]: container managing nodes, names, and world transforms.
//! - [`LocalNode`]: per-node local data (name, shape, transform, flags).
//! - [`Shape`]: pickable geometry (sphere or box).
//! - [`NodeFlags`]: visibility and picking controls.
//! - [`NodeId`]: generational handle of a node.
//! - [`PickFilter`]: restricts ray-cast results (visible/pickable).
//! - [`Ray`] and [`PerspectiveCamera`]: pick-ray math.
//!
//! ## Minimal usage
//!
//! ```
//! use glam::Vec3;
//! use pointcast_scene::{LocalNode, PerspectiveCamera, PickFilter, Shape, Tree};
//!
//! let mut tree = Tree::new();
//! let scene = tree.insert(None, LocalNode::named("scene", Shape::Empty));
//! let ball = tree.insert(
//!     Some(scene),
//!     LocalNode::named("ball", Shape::Sphere { radius: 1.0 }).at(Vec3::new(0.0, 0.0, -2.0)),
//! );
//!
//! // Synchronize world transforms and collect the attachments.
//! let changes = tree.commit();
//! assert_eq!(changes.added_under(scene).collect::<Vec<_>>(), vec![ball]);
//!
//! // Pick through the center of the view.
//! let camera = PerspectiveCamera::default();
//! let ray = camera.ray_through(0.0, 0.0);
//! let mut hits = Vec::new();
//! tree.raycast(&ray, scene, true, PickFilter::default(), &mut hits);
//! assert_eq!(hits[0].node, ball);
//! assert!((hits[0].distance - 11.0).abs() < 1e-4);
//! assert_eq!(tree.find_by_name(scene, "ball"), Some(ball));
//! ```

mod camera;
mod ray;
mod tree;
mod types;

pub use camera::PerspectiveCamera;
pub use ray::Ray;
pub use tree::{Added, Changes, Hit, PickFilter, Tree};
pub use types::{LocalNode, NodeFlags, NodeId, Shape};
