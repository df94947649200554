// Copyright 2025 the Pointcast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointcast Interaction: deterministic, `no_std` pointer interaction for 3D scenes.
//!
//! ## Overview
//!
//! This crate turns a stream of pointer samples and per-frame ray hits into a
//! consistent stream of interaction events for registered scene objects:
//! `Enter`/`Leave` when an object starts or stops being under the pointer,
//! `Over`/`Out` when the single closest object changes, and move, press,
//! release and click events routed from raw input.
//! It does not perform hit testing itself. The host supplies that, together with
//! name lookup and event delivery, through the traits in [`types`].
//!
//! ## Workflow
//!
//! 1) Build an [`InteractionManager`](crate::manager::InteractionManager) from an
//!    [`InteractionConfig`](crate::config::InteractionConfig), passing the host's
//!    [`HostEvents`](crate::host::HostEvents) so the manager can register its listeners
//!    (or [`NoHost`](crate::host::NoHost) when the host drives it directly).
//! 2) Register objects with `add`, either a node itself or named descendants of it.
//! 3) Forward raw input through `handle_input` and call `update` once per frame.
//!    Each cycle hit-tests every object, sorts by distance, and dispatches focus
//!    transitions before enter/leave transitions.
//! 4) Call `dispose` on teardown.
//!
//! ## Cancellation
//!
//! A handler may call [`stop_propagation`](crate::types::InteractionEvent::stop_propagation)
//! on the shared record of a pass; objects later in that pass are skipped, objects
//! already visited keep their delivery.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use pointcast_interaction::config::InteractionConfig;
//! use pointcast_interaction::manager::InteractionManager;
//! use pointcast_interaction::types::{
//!     Environment, EventKind, EventTarget, InteractionEvent, RayCaster, RayHit, SceneLookup,
//! };
//!
//! // Two "objects" on a line: node 1 is hit left of center, node 2 everywhere.
//! struct Host(Vec<(EventKind, u32)>);
//! impl SceneLookup<u32> for Host {
//!     fn name_of(&self, _n: &u32) -> Option<&str> { None }
//!     fn find_by_name(&self, _r: &u32, _n: &str) -> Option<u32> { None }
//! }
//! impl RayCaster<u32> for Host {
//!     type Ray = f64;
//!     fn ray_from_pointer(&self, p: Point) -> f64 { p.x }
//!     fn intersect_subtree(&self, x: &f64, n: &u32, _deep: bool, out: &mut Vec<RayHit<u32>>) {
//!         if *n == 2 || *x < 0.0 {
//!             out.push(RayHit { node: *n, distance: f64::from(*n) });
//!         }
//!     }
//! }
//! impl EventTarget<u32> for Host {
//!     type Original = ();
//!     fn dispatch_event(&mut self, n: &u32, ev: &mut InteractionEvent<'_, ()>) {
//!         self.0.push((ev.kind(), *n));
//!     }
//! }
//! impl Environment<u32> for Host {
//!     fn surface_rect(&self) -> Option<Rect> { None }
//! }
//!
//! let mut host = Host(Vec::new());
//! let mut manager = InteractionManager::without_host(InteractionConfig::default());
//! manager.add(1, &[], &host);
//! manager.add(2, &[], &host);
//!
//! // The default pointer sits at the top-left corner, left of center.
//! manager.update(&mut host);
//! assert_eq!(
//!     host.0,
//!     [(EventKind::Over, 1), (EventKind::Enter, 1), (EventKind::Enter, 2)]
//! );
//!
//! host.0.clear();
//! manager.set_pointer(Point::new(0.5, 0.0));
//! manager.update(&mut host);
//! assert_eq!(
//!     host.0,
//!     [(EventKind::Out, 1), (EventKind::Over, 2), (EventKind::Leave, 1)]
//! );
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards `std` to `kurbo`, `tracing` and `thiserror`.
//! - `libm`: `no_std` numeric support for `kurbo`.
//! - `scene_adapter`: [`adapters::scene`] glue for `pointcast_scene`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod config;
pub mod coords;
mod dispatch;
pub mod error;
pub mod evaluate;
pub mod focus;
pub mod host;
pub mod manager;
pub mod registry;
pub mod types;
