// Copyright 2025 the Pointcast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter for Pointcast Scene.
//!
//! ## Feature
//!
//! Enable with `scene_adapter`.
//!
//! ## Notes
//!
//! [`Stage`] bundles a [`Tree`], a [`PerspectiveCamera`], the surface rectangle
//! and per-node [`Listeners`], and implements every host trait the manager
//! needs. Handlers receive the tree mutably, so they can edit the scene; a node
//! they remove is skipped by the rest of the dispatch pass and pruned from the
//! registry on the next cycle.
//!
//! ```
//! use std::{cell::RefCell, rc::Rc};
//!
//! use glam::Vec3;
//! use kurbo::{Point, Rect};
//! use pointcast_interaction::adapters::scene::Stage;
//! use pointcast_interaction::config::InteractionConfig;
//! use pointcast_interaction::manager::InteractionManager;
//! use pointcast_interaction::types::EventKind;
//! use pointcast_scene::{LocalNode, Shape, Tree};
//!
//! let mut tree = Tree::new();
//! let scene = tree.insert(None, LocalNode::named("scene", Shape::Empty));
//! let ball = tree.insert(
//!     Some(scene),
//!     LocalNode::named("ball", Shape::Sphere { radius: 1.0 }).at(Vec3::new(0.0, 0.0, -2.0)),
//! );
//! tree.commit();
//!
//! let mut stage: Stage = Stage::new(tree);
//! stage.surface = Some(Rect::new(0.0, 0.0, 800.0, 800.0));
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let log = seen.clone();
//! stage.on(ball, EventKind::Over, move |ev, _tree| log.borrow_mut().push(ev.distance));
//!
//! let mut manager = InteractionManager::without_host(InteractionConfig::default());
//! manager.add(scene, &["ball"], &stage);
//! manager.set_pointer(Point::ZERO);
//! manager.update(&mut stage);
//! assert_eq!(seen.borrow().len(), 1);
//! assert!((seen.borrow()[0] - 11.0).abs() < 1e-4);
//! ```

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use pointcast_scene::{Changes, PerspectiveCamera, PickFilter, Ray, Tree};

pub use pointcast_scene::NodeId;

use crate::manager::InteractionManager;
use crate::types::{
    Environment, EventKind, EventTarget, InteractionEvent, RayCaster, RayHit, SceneLookup,
};

type Handler<O> = Box<dyn FnMut(&mut InteractionEvent<'_, O>, &mut Tree)>;

/// Per-node event handlers, run in registration order.
pub struct Listeners<O = ()> {
    by_node: BTreeMap<NodeId, Vec<(EventKind, Handler<O>)>>,
}

impl<O> Default for Listeners<O> {
    fn default() -> Self {
        Self {
            by_node: BTreeMap::new(),
        }
    }
}

impl<O> core::fmt::Debug for Listeners<O> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Listeners")
            .field("nodes", &self.by_node.len())
            .field("handlers", &self.len())
            .finish()
    }
}

impl<O> Listeners<O> {
    /// Register `handler` for `kind` events delivered to `node`.
    pub fn on(
        &mut self,
        node: NodeId,
        kind: EventKind,
        handler: impl FnMut(&mut InteractionEvent<'_, O>, &mut Tree) + 'static,
    ) {
        self.by_node
            .entry(node)
            .or_default()
            .push((kind, Box::new(handler)));
    }

    /// Drop every handler of `node`.
    pub fn remove_node(&mut self, node: NodeId) {
        self.by_node.remove(&node);
    }

    /// Keep only the handlers of nodes for which `keep` returns true.
    pub fn retain_nodes(&mut self, mut keep: impl FnMut(NodeId) -> bool) {
        self.by_node.retain(|node, _| keep(*node));
    }

    /// Total number of handlers.
    pub fn len(&self) -> usize {
        self.by_node.values().map(Vec::len).sum()
    }

    /// True if no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.by_node.is_empty()
    }

    /// Run every handler of `node` registered for the event's kind.
    ///
    /// All of a node's matching handlers run even if one of them stops
    /// propagation; that only affects later targets.
    pub fn emit(&mut self, node: NodeId, event: &mut InteractionEvent<'_, O>, tree: &mut Tree) {
        let Some(handlers) = self.by_node.get_mut(&node) else {
            return;
        };
        let kind = event.kind();
        for (_, handler) in handlers.iter_mut().filter(|(k, _)| *k == kind) {
            handler(event, tree);
        }
    }
}

/// A [`Tree`] plus everything needed to pick and deliver events in it.
#[derive(Debug)]
pub struct Stage<O = ()> {
    /// The scene.
    pub tree: Tree,
    /// Camera used to derive pick rays.
    pub camera: PerspectiveCamera,
    /// Surface bounds in client pixels; `None` while detached.
    pub surface: Option<Rect>,
    /// Restricts which nodes can be hit.
    pub filter: PickFilter,
    /// Per-node handlers.
    pub listeners: Listeners<O>,
}

impl<O> Stage<O> {
    /// A stage over `tree` with the default camera and no surface.
    pub fn new(tree: Tree) -> Self {
        Self {
            tree,
            camera: PerspectiveCamera::default(),
            surface: None,
            filter: PickFilter::default(),
            listeners: Listeners::default(),
        }
    }

    /// Register a handler; see [`Listeners::on`].
    pub fn on(
        &mut self,
        node: NodeId,
        kind: EventKind,
        handler: impl FnMut(&mut InteractionEvent<'_, O>, &mut Tree) + 'static,
    ) {
        self.listeners.on(node, kind, handler);
    }

    /// Drop handlers of nodes that no longer exist in the tree.
    pub fn prune_listeners(&mut self) {
        let tree = &self.tree;
        self.listeners.retain_nodes(|node| tree.is_alive(node));
    }
}

impl<O> SceneLookup<NodeId> for Stage<O> {
    fn name_of(&self, node: &NodeId) -> Option<&str> {
        self.tree.name(*node)
    }

    fn find_by_name(&self, root: &NodeId, name: &str) -> Option<NodeId> {
        self.tree.find_by_name(*root, name)
    }

    fn is_alive(&self, node: &NodeId) -> bool {
        self.tree.is_alive(*node)
    }
}

impl<O> RayCaster<NodeId> for Stage<O> {
    type Ray = Ray;

    #[expect(
        clippy::cast_possible_truncation,
        reason = "pick rays are computed in f32"
    )]
    fn ray_from_pointer(&self, pointer: Point) -> Ray {
        self.camera.ray_through(pointer.x as f32, pointer.y as f32)
    }

    fn intersect_subtree(
        &self,
        ray: &Ray,
        root: &NodeId,
        recursive: bool,
        out: &mut Vec<RayHit<NodeId>>,
    ) {
        let mut hits = Vec::new();
        self.tree
            .raycast(ray, *root, recursive, self.filter, &mut hits);
        out.extend(hits.into_iter().map(|h| RayHit {
            node: h.node,
            distance: f64::from(h.distance),
        }));
    }
}

impl<O> EventTarget<NodeId> for Stage<O> {
    type Original = O;

    fn dispatch_event(&mut self, target: &NodeId, event: &mut InteractionEvent<'_, O>) {
        self.listeners.emit(*target, event, &mut self.tree);
    }
}

impl<O> Environment<NodeId> for Stage<O> {
    fn surface_rect(&self) -> Option<Rect> {
        self.surface
    }
}

/// Feed the nodes attached directly under the manager's watched scene root to
/// [`InteractionManager::on_child_added`].
///
/// Returns the number of newly tracked nodes.
pub fn forward_attachments<O>(
    manager: &mut InteractionManager<NodeId>,
    changes: &Changes,
    stage: &Stage<O>,
) -> usize {
    let Some(scene) = manager.config().scene else {
        return 0;
    };
    changes
        .added_under(scene)
        .filter(|&node| manager.on_child_added(node, stage))
        .count()
}
