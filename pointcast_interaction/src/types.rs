// Copyright 2025 the Pointcast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: tracked objects, event kinds and records, ray hits, and the host traits.
//!
//! ## Overview
//!
//! These types describe the interaction protocol and its inputs/outputs.
//! They are used by the [`manager`](crate::manager) and implemented by downstream hosts.
//! A host supplies three capabilities, bundled by [`Environment`]:
//!
//! - [`SceneLookup`]: names, descendant lookup by name, and liveness.
//! - [`RayCaster`]: derives a ray from the pointer and hit-tests a subtree.
//! - [`EventTarget`]: delivers an [`InteractionEvent`] to a node's own handlers.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};

/// Stable handle of a tracked object.
///
/// Handles are never reused by the [`Registry`](crate::registry::Registry) that issued them, so a
/// handle kept across cycles either resolves to the same object or to nothing.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TrackedId(pub(crate) u64);

/// A registered target participating in hit testing and event dispatch.
///
/// Fields are only mutated by the manager's update cycle.
#[derive(Clone, Debug)]
pub struct TrackedObject<K> {
    pub(crate) id: TrackedId,
    pub(crate) target: K,
    pub(crate) name: String,
    pub(crate) intersected: bool,
    pub(crate) was_intersected: bool,
    pub(crate) was_intersected_on_down: bool,
    pub(crate) distance: f64,
}

impl<K> TrackedObject<K> {
    pub(crate) fn new(id: TrackedId, target: K, name: String) -> Self {
        Self {
            id,
            target,
            name,
            intersected: false,
            was_intersected: false,
            was_intersected_on_down: false,
            distance: 0.0,
        }
    }

    /// Handle of this entry.
    pub fn id(&self) -> TrackedId {
        self.id
    }

    /// The scene node this entry tracks.
    pub fn target(&self) -> &K {
        &self.target
    }

    /// Name the object was registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the object was under the pointer in the last completed cycle.
    pub fn intersected(&self) -> bool {
        self.intersected
    }

    /// Value of [`intersected`](Self::intersected) one cycle earlier.
    pub fn was_intersected(&self) -> bool {
        self.was_intersected
    }

    /// Whether the object was under the pointer at the most recent press.
    pub fn was_intersected_on_down(&self) -> bool {
        self.was_intersected_on_down
    }

    /// Nearest hit distance of the last cycle that hit this object.
    ///
    /// Only meaningful while [`intersected`](Self::intersected) is true; otherwise stale.
    pub fn distance(&self) -> f64 {
        self.distance
    }
}

/// A single candidate returned by the hit-test engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit<K> {
    /// The node that was hit (the tracked root or one of its descendants).
    pub node: K,
    /// Distance along the ray; lower is nearer.
    pub distance: f64,
}

/// The fixed vocabulary of interaction events.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EventKind {
    /// The object became the closest intersected object.
    Over,
    /// The object stopped being the closest intersected object.
    Out,
    /// The pointer started intersecting the object.
    Enter,
    /// The pointer stopped intersecting the object.
    Leave,
    /// Mouse moved.
    MouseMove,
    /// Pointer moved.
    PointerMove,
    /// Touch point moved.
    TouchMove,
    /// Mouse button pressed over the object.
    MouseDown,
    /// Pointer pressed over the object.
    PointerDown,
    /// Touch started over the object.
    TouchStart,
    /// Mouse button released anywhere.
    MouseUp,
    /// Pointer released anywhere.
    PointerUp,
    /// Touch ended anywhere.
    TouchEnd,
    /// Click over the object.
    Click,
}

impl EventKind {
    /// Host-facing event name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Over => "mouseover",
            Self::Out => "mouseout",
            Self::Enter => "mouseenter",
            Self::Leave => "mouseleave",
            Self::MouseMove => "mousemove",
            Self::PointerMove => "pointermove",
            Self::TouchMove => "touchmove",
            Self::MouseDown => "mousedown",
            Self::PointerDown => "pointerdown",
            Self::TouchStart => "touchstart",
            Self::MouseUp => "mouseup",
            Self::PointerUp => "pointerup",
            Self::TouchEnd => "touchend",
            Self::Click => "click",
        }
    }

    /// True for the move family.
    pub const fn is_move(self) -> bool {
        matches!(self, Self::MouseMove | Self::PointerMove | Self::TouchMove)
    }

    /// True for the press family.
    pub const fn is_down(self) -> bool {
        matches!(self, Self::MouseDown | Self::PointerDown | Self::TouchStart)
    }

    /// True for the release family.
    pub const fn is_up(self) -> bool {
        matches!(self, Self::MouseUp | Self::PointerUp | Self::TouchEnd)
    }

    /// Map touch kinds to their mouse equivalents when `as_mouse` is set.
    pub const fn relabel_touch(self, as_mouse: bool) -> Self {
        if !as_mouse {
            return self;
        }
        match self {
            Self::TouchMove => Self::MouseMove,
            Self::TouchStart => Self::MouseDown,
            Self::TouchEnd => Self::MouseUp,
            other => other,
        }
    }
}

impl core::fmt::Display for EventKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event record delivered to an object's handlers.
///
/// One record is built per dispatch pass and reused for every target of that
/// pass; the snapshot fields are rewritten immediately before each delivery.
/// Calling [`stop_propagation`](Self::stop_propagation) suppresses delivery to
/// the targets the pass has not reached yet.
#[derive(Debug)]
pub struct InteractionEvent<'a, O = ()> {
    kind: EventKind,
    cancelled: bool,
    original: Option<&'a O>,
    /// Pointer position in normalized device coordinates.
    pub coords: Point,
    /// The target's nearest hit distance (stale unless `intersected`).
    pub distance: f64,
    /// Whether the target is under the pointer.
    pub intersected: bool,
    /// Whether the target was under the pointer one cycle earlier.
    pub was_intersected: bool,
    /// Whether the target was under the pointer at the most recent press.
    pub was_intersected_on_down: bool,
}

impl<'a, O> InteractionEvent<'a, O> {
    /// A fresh, uncancelled record.
    pub fn new(kind: EventKind, original: Option<&'a O>) -> Self {
        Self {
            kind,
            cancelled: false,
            original,
            coords: Point::ZERO,
            distance: 0.0,
            intersected: false,
            was_intersected: false,
            was_intersected_on_down: false,
        }
    }

    /// Kind of this event.
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// The raw host input that caused this event, if any.
    pub fn original(&self) -> Option<&'a O> {
        self.original
    }

    /// Stop delivering this record to further targets.
    pub fn stop_propagation(&mut self) {
        self.cancelled = true;
    }

    /// Whether [`stop_propagation`](Self::stop_propagation) was called.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

/// Name and hierarchy queries against the host scene.
pub trait SceneLookup<K> {
    /// Display name of `node`, if it has one.
    fn name_of(&self, node: &K) -> Option<&str>;

    /// A node named `name` within the subtree of `root` (`root` included).
    fn find_by_name(&self, root: &K, name: &str) -> Option<K>;

    /// Whether `node` still exists. Dead targets are never delivered events.
    fn is_alive(&self, _node: &K) -> bool {
        true
    }
}

/// The hit-test engine.
pub trait RayCaster<K> {
    /// Ray representation used by the engine.
    type Ray;

    /// Derive a ray from the camera through `pointer` (normalized device coordinates).
    fn ray_from_pointer(&self, pointer: Point) -> Self::Ray;

    /// Append every hit of `ray` against `root` (and its descendants when
    /// `recursive`) to `out`, in any order.
    fn intersect_subtree(
        &self,
        ray: &Self::Ray,
        root: &K,
        recursive: bool,
        out: &mut Vec<RayHit<K>>,
    );
}

/// Delivers events to a node's own handler registrations.
pub trait EventTarget<K> {
    /// Raw host input passed through to handlers untouched.
    type Original;

    /// Run the handlers `target` registered for `event.kind()`.
    fn dispatch_event(&mut self, target: &K, event: &mut InteractionEvent<'_, Self::Original>);
}

/// Everything the manager needs from the host during a cycle.
pub trait Environment<K>: SceneLookup<K> + RayCaster<K> + EventTarget<K> {
    /// Bounding rectangle of the rendering surface in client pixels, or
    /// `None` while the surface is not attached to a display.
    fn surface_rect(&self) -> Option<Rect>;
}
