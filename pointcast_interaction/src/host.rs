// Copyright 2025 the Pointcast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host input plumbing: raw input records and listener subscriptions.
//!
//! The manager never reads input on its own. A host either forwards each raw
//! notification through [`InteractionManager::handle_input`](crate::manager::InteractionManager::handle_input),
//! or drives [`update`](crate::manager::InteractionManager::update) directly and
//! passes [`NoHost`] at construction.

use kurbo::Point;

use crate::types::EventKind;

/// Raw input notifications the manager reacts to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum InputKind {
    /// Mouse moved.
    MouseMove,
    /// Pointer moved.
    PointerMove,
    /// A touch point moved.
    TouchMove,
    /// Mouse button pressed.
    MouseDown,
    /// Pointer pressed.
    PointerDown,
    /// A touch started.
    TouchStart,
    /// Mouse button released.
    MouseUp,
    /// Pointer released.
    PointerUp,
    /// A touch ended.
    TouchEnd,
    /// Click.
    Click,
}

impl InputKind {
    /// Event kind dispatched in response to this input.
    ///
    /// With `treat_touch_as_mouse`, touch inputs produce their mouse counterparts.
    pub const fn event_kind(self, treat_touch_as_mouse: bool) -> EventKind {
        let kind = match self {
            Self::MouseMove => EventKind::MouseMove,
            Self::PointerMove => EventKind::PointerMove,
            Self::TouchMove => EventKind::TouchMove,
            Self::MouseDown => EventKind::MouseDown,
            Self::PointerDown => EventKind::PointerDown,
            Self::TouchStart => EventKind::TouchStart,
            Self::MouseUp => EventKind::MouseUp,
            Self::PointerUp => EventKind::PointerUp,
            Self::TouchEnd => EventKind::TouchEnd,
            Self::Click => EventKind::Click,
        };
        kind.relabel_touch(treat_touch_as_mouse)
    }

    /// True for inputs whose position comes from the touch list.
    pub const fn is_touch(self) -> bool {
        matches!(self, Self::TouchMove | Self::TouchStart | Self::TouchEnd)
    }
}

/// Where a subscription is attached.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ListenTarget {
    /// The document that owns the rendering surface.
    Document,
    /// The rendering surface element itself.
    Surface,
    /// The scene root, for structural notifications.
    Scene,
}

/// What a subscription listens for.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Topic {
    /// A raw input notification.
    Input(InputKind),
    /// A node was attached somewhere under the scene root.
    ChildAdded,
}

/// Opaque handle returned by [`HostEvents::subscribe`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// Listener registration in the host event system.
pub trait HostEvents {
    /// Start delivering `topic` notifications from `target`.
    fn subscribe(&mut self, target: ListenTarget, topic: Topic) -> SubscriptionId;

    /// Stop a subscription made by [`subscribe`](Self::subscribe).
    fn unsubscribe(&mut self, id: SubscriptionId);

    /// Whether the host emits pointer (as opposed to only mouse) events.
    fn supports_pointer_events(&self) -> bool {
        false
    }
}

/// A host without an event system; every subscription is a no-op.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoHost;

impl HostEvents for NoHost {
    fn subscribe(&mut self, _target: ListenTarget, _topic: Topic) -> SubscriptionId {
        SubscriptionId(0)
    }

    fn unsubscribe(&mut self, _id: SubscriptionId) {}
}

/// One raw input notification.
///
/// `client` is the pointer position in client pixels for mouse/pointer inputs.
/// Touch inputs take their position from the first entry of `touches`; an
/// empty list keeps the last known pointer.
#[derive(Copy, Clone, Debug)]
pub struct RawInput<'a, O = ()> {
    /// Which notification this is.
    pub kind: InputKind,
    /// Client-space pointer position.
    pub client: Point,
    /// Active touch points in client space.
    pub touches: &'a [Point],
    /// The host's own event object, passed through to handlers.
    pub original: Option<&'a O>,
}

impl<'a, O> RawInput<'a, O> {
    /// A mouse, pointer or click input at `client`.
    pub fn at(kind: InputKind, client: Point) -> Self {
        Self {
            kind,
            client,
            touches: &[],
            original: None,
        }
    }

    /// A touch input with the given active touch points.
    pub fn touch(kind: InputKind, touches: &'a [Point]) -> Self {
        Self {
            kind,
            client: Point::ZERO,
            touches,
            original: None,
        }
    }

    /// Attach the host's event object.
    pub fn with_original(mut self, original: &'a O) -> Self {
        self.original = Some(original);
        self
    }

    /// Client position used for mapping, if this input carries one.
    pub fn position(&self) -> Option<Point> {
        if self.kind.is_touch() {
            self.touches.first().copied()
        } else {
            Some(self.client)
        }
    }
}
