// Copyright 2025 the Pointcast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The interaction manager: update cycle and raw input routing.
//!
//! ## Update cycle
//!
//! [`InteractionManager::update`] runs these steps in a fixed order:
//!
//! 1. Prune entries whose target is no longer alive (silently, like `remove`).
//! 2. Derive the ray from the current pointer.
//! 3. Evaluate every tracked object against it.
//! 4. Stable-sort the registry by ascending distance.
//! 5. Pick the closest intersected object; if it changed, dispatch `Out` to the
//!    previous one and then `Over` to the new one.
//! 6. Dispatch one shared `Leave` record to every object that stopped intersecting.
//! 7. Dispatch one shared `Enter` record to every object that started intersecting.
//!
//! Evaluation finishes for all objects before any handler runs. Handlers only
//! receive the host environment, so they cannot reach the registry mid-pass;
//! a handler that deletes a scene node is honored through the liveness check
//! performed before every delivery.
//!
//! ## Input routing
//!
//! | Input | Maps position | Runs `update` | Delivered to |
//! |---|---|---|---|
//! | mouse/pointer/touch move | yes | no | every object |
//! | mouse/pointer down, touch start | yes | yes | intersected objects |
//! | mouse/pointer up | no | no | every object |
//! | touch end | yes | yes | every object |
//! | click | no | yes | intersected objects |
//!
//! Touch inputs map the first active touch; an empty touch list keeps the last pointer.

use alloc::vec::Vec;

use kurbo::{Point, Rect};
use tracing::{debug, trace, warn};

use crate::config::InteractionConfig;
use crate::coords::{DEFAULT_POINTER, map_to_point};
use crate::dispatch::{dispatch, dispatch_pass};
use crate::evaluate::evaluate;
use crate::focus::{FocusEvent, FocusState, Transition, transition};
use crate::host::{HostEvents, InputKind, ListenTarget, NoHost, RawInput, SubscriptionId, Topic};
use crate::registry::Registry;
use crate::types::{
    Environment, EventKind, InteractionEvent, RayHit, SceneLookup, TrackedId, TrackedObject,
};

/// What one [`update`](InteractionManager::update) cycle decided.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CycleSummary {
    /// The closest intersected object after the cycle.
    pub closest: Option<TrackedId>,
    /// Whether the closest object changed in this cycle.
    pub focus_changed: bool,
    /// Objects that started intersecting.
    pub entered: usize,
    /// Objects that stopped intersecting.
    pub left: usize,
}

/// Tracks objects under a pointer and turns hit-test results into interaction events.
///
/// `K` is the host's node handle. The scene itself, the camera and each node's
/// handlers live in the host and are reached through an [`Environment`] passed
/// to every entry point.
#[derive(Debug)]
pub struct InteractionManager<K> {
    registry: Registry<K>,
    focus: FocusState<TrackedId>,
    pointer: Point,
    config: InteractionConfig<K>,
    subscriptions: Vec<SubscriptionId>,
    hits: Vec<RayHit<K>>,
}

impl<K: Copy + Eq> InteractionManager<K> {
    /// Create a manager and register its input listeners with `host`.
    ///
    /// An inconsistent `config` is reported with a warning and corrected
    /// (auto-add is disabled); construction itself never fails.
    pub fn new<E>(config: InteractionConfig<K>, host: &mut E) -> Self
    where
        E: HostEvents + ?Sized,
    {
        let mut config = config;
        if let Err(err) = config.validate() {
            warn!(%err, "interaction config rejected");
            config.auto_add = false;
        }

        let moves = if config.bind_events_on_body_element {
            ListenTarget::Document
        } else {
            ListenTarget::Surface
        };
        let mut plan: Vec<(ListenTarget, Topic)> = Vec::with_capacity(11);
        plan.push((ListenTarget::Surface, Topic::Input(InputKind::Click)));
        if host.supports_pointer_events() {
            plan.push((moves, Topic::Input(InputKind::PointerMove)));
            plan.push((ListenTarget::Surface, Topic::Input(InputKind::PointerDown)));
            plan.push((ListenTarget::Surface, Topic::Input(InputKind::PointerUp)));
        }
        plan.push((moves, Topic::Input(InputKind::MouseMove)));
        for kind in [
            InputKind::MouseDown,
            InputKind::MouseUp,
            InputKind::TouchStart,
            InputKind::TouchMove,
            InputKind::TouchEnd,
        ] {
            plan.push((ListenTarget::Surface, Topic::Input(kind)));
        }
        if config.auto_add_effective() {
            plan.push((ListenTarget::Scene, Topic::ChildAdded));
        }

        let subscriptions: Vec<SubscriptionId> = plan
            .into_iter()
            .map(|(target, topic)| host.subscribe(target, topic))
            .collect();
        debug!(count = subscriptions.len(), "subscribed to host events");

        Self {
            registry: Registry::new(),
            focus: FocusState::new(),
            pointer: DEFAULT_POINTER,
            config,
            subscriptions,
            hits: Vec::new(),
        }
    }

    /// Create a manager for a host that drives the entry points directly.
    pub fn without_host(config: InteractionConfig<K>) -> Self {
        Self::new(config, &mut NoHost)
    }

    /// Unregister every host listener. Calling this again does nothing.
    pub fn dispose<E>(&mut self, host: &mut E)
    where
        E: HostEvents + ?Sized,
    {
        if self.subscriptions.is_empty() {
            return;
        }
        debug!(count = self.subscriptions.len(), "disposing host subscriptions");
        for id in self.subscriptions.drain(..) {
            host.unsubscribe(id);
        }
    }

    /// Effective configuration (after validation).
    pub fn config(&self) -> &InteractionConfig<K> {
        &self.config
    }

    /// Live host subscriptions, in registration order.
    pub fn subscriptions(&self) -> &[SubscriptionId] {
        &self.subscriptions
    }

    /// Switch touch relabeling at runtime. Takes effect with the next input.
    pub fn set_treat_touch_events_as_mouse_events(&mut self, on: bool) {
        self.config.treat_touch_events_as_mouse_events = on;
    }

    /// Current pointer in normalized device coordinates.
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Set the pointer directly in normalized device coordinates.
    pub fn set_pointer(&mut self, ndc: Point) {
        self.pointer = ndc;
    }

    /// Tracked objects.
    pub fn registry(&self) -> &Registry<K> {
        &self.registry
    }

    /// The closest intersected object as of the last cycle.
    pub fn closest(&self) -> Option<TrackedId> {
        self.focus.current()
    }

    /// Entry of the closest intersected object.
    pub fn closest_object(&self) -> Option<&TrackedObject<K>> {
        self.focus.current().and_then(|id| self.registry.get(id))
    }

    /// Track `object` (empty `child_names`) or each named descendant of it.
    ///
    /// Already tracked targets and unresolved names are skipped.
    pub fn add<S>(&mut self, object: K, child_names: &[&str], scene: &S) -> Vec<TrackedId>
    where
        S: SceneLookup<K> + ?Sized,
    {
        self.registry.add(object, child_names, scene)
    }

    /// Stop tracking `object` (empty `child_names`) or each named descendant of it.
    ///
    /// A removed object that held focus loses it without an `Out` event.
    pub fn remove<S>(&mut self, object: K, child_names: &[&str], scene: &S) -> Vec<TrackedId>
    where
        S: SceneLookup<K> + ?Sized,
    {
        let removed = self.registry.remove(object, child_names, scene);
        for &id in &removed {
            self.focus.forget(id);
        }
        removed
    }

    /// Auto-add hook for a node attached under the watched scene.
    ///
    /// Returns whether the node became tracked.
    pub fn on_child_added<S>(&mut self, node: K, scene: &S) -> bool
    where
        S: SceneLookup<K> + ?Sized,
    {
        if !self.config.auto_add_effective() {
            return false;
        }
        !self.registry.add(node, &[], scene).is_empty()
    }

    /// Run one update cycle against `env`.
    pub fn update<H>(&mut self, env: &mut H) -> CycleSummary
    where
        H: Environment<K> + ?Sized,
    {
        let pruned = self.registry.retain_alive(|k| env.is_alive(k));
        if !pruned.is_empty() {
            debug!(count = pruned.len(), "pruned dead targets");
            for &id in &pruned {
                self.focus.forget(id);
            }
        }

        let ray = env.ray_from_pointer(self.pointer);
        for object in self.registry.iter_mut() {
            evaluate(object, &*env, &ray, &mut self.hits);
        }
        self.hits.clear();
        self.registry.sort_by_distance();

        let closest = self.registry.first_intersected();
        let mut summary = CycleSummary {
            closest,
            ..CycleSummary::default()
        };

        if let Some(change) = self.focus.update(closest) {
            summary.focus_changed = true;
            for focus_event in change.events() {
                let (id, kind) = match focus_event {
                    FocusEvent::Out(id) => (id, EventKind::Out),
                    FocusEvent::Over(id) => (id, EventKind::Over),
                };
                let Some(object) = self.registry.get(id) else {
                    continue;
                };
                trace!(kind = kind.as_str(), name = %object.name, "focus transition");
                let mut event = InteractionEvent::new(kind, None);
                dispatch(env, object, self.pointer, &mut event);
            }
        }

        summary.left = self.transition_pass(env, Transition::Leave);
        summary.entered = self.transition_pass(env, Transition::Enter);
        summary
    }

    /// Dispatch one shared record to every object undergoing `which`.
    ///
    /// Returns the number of qualifying objects, delivered or not.
    fn transition_pass<H>(&self, env: &mut H, which: Transition) -> usize
    where
        H: Environment<K> + ?Sized,
    {
        let qualifies =
            |o: &TrackedObject<K>| transition(o.was_intersected, o.intersected) == Some(which);
        let count = self.registry.iter().filter(|o| qualifies(o)).count();
        if count == 0 {
            return 0;
        }
        let kind = match which {
            Transition::Enter => EventKind::Enter,
            Transition::Leave => EventKind::Leave,
        };
        let mut event = InteractionEvent::new(kind, None);
        dispatch_pass(env, self.registry.as_slice(), self.pointer, &mut event, qualifies);
        count
    }

    /// Route one raw host input. Returns the number of deliveries made for it
    /// (focus and enter/leave deliveries of an implied cycle are not counted).
    pub fn handle_input<H>(&mut self, input: &RawInput<'_, H::Original>, env: &mut H) -> usize
    where
        H: Environment<K> + ?Sized,
    {
        let kind = input
            .kind
            .event_kind(self.config.treat_touch_events_as_mouse_events);
        let mut event = InteractionEvent::new(kind, input.original);
        match input.kind {
            InputKind::MouseMove | InputKind::PointerMove | InputKind::TouchMove => {
                self.map_input(input, env.surface_rect());
                dispatch_pass(env, self.registry.as_slice(), self.pointer, &mut event, |_| true)
            }
            InputKind::MouseDown | InputKind::PointerDown | InputKind::TouchStart => {
                self.map_input(input, env.surface_rect());
                self.update(env);
                for object in self.registry.iter_mut() {
                    object.was_intersected_on_down = object.intersected;
                }
                dispatch_pass(env, self.registry.as_slice(), self.pointer, &mut event, |o| {
                    o.intersected
                })
            }
            InputKind::MouseUp | InputKind::PointerUp => {
                dispatch_pass(env, self.registry.as_slice(), self.pointer, &mut event, |_| true)
            }
            InputKind::TouchEnd => {
                self.map_input(input, env.surface_rect());
                self.update(env);
                dispatch_pass(env, self.registry.as_slice(), self.pointer, &mut event, |_| true)
            }
            InputKind::Click => {
                self.update(env);
                dispatch_pass(env, self.registry.as_slice(), self.pointer, &mut event, |o| {
                    o.intersected
                })
            }
        }
    }

    /// Map the input's client position into the pointer.
    ///
    /// A detached surface maps like a zero rectangle.
    fn map_input<O>(&mut self, input: &RawInput<'_, O>, rect: Option<Rect>) {
        if let Some(client) = input.position() {
            self.pointer = map_to_point(client, rect.unwrap_or(Rect::ZERO));
        }
    }
}
