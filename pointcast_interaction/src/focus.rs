// Copyright 2025 the Pointcast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Closest-object focus: compute out/over transitions from focus changes.
//!
//! Exactly one object at a time can hold focus: the nearest intersected one.
//! [`FocusState`] remembers it across cycles and reports the change when a
//! different object (or nothing) takes its place.
//!
//! ## Minimal example
//!
//! ```
//! use pointcast_interaction::focus::{FocusEvent, FocusState};
//! let mut f: FocusState<u32> = FocusState::new();
//! let change = f.update(Some(1)).unwrap();
//! assert_eq!(change.events().collect::<Vec<_>>(), vec![FocusEvent::Over(1)]);
//! let change = f.update(Some(2)).unwrap();
//! assert_eq!(
//!     change.events().collect::<Vec<_>>(),
//!     vec![FocusEvent::Out(1), FocusEvent::Over(2)]
//! );
//! assert!(f.update(Some(2)).is_none());
//! ```
//!
//! Per-object enter/leave transitions are independent of focus; see [`transition`].

/// Tracks which object currently holds focus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FocusState<K: Copy + Eq> {
    current: Option<K>,
}

impl<K: Copy + Eq> Default for FocusState<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// A focus transition event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FocusEvent<K> {
    /// Focus leaves the given object.
    Out(K),
    /// Focus arrives at the given object.
    Over(K),
}

/// The result of a focus change: at most one out followed by at most one over.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FocusChange<K> {
    /// Object that lost focus.
    pub out: Option<K>,
    /// Object that gained focus.
    pub over: Option<K>,
}

impl<K: Copy> FocusChange<K> {
    /// Transition events in delivery order: out first, then over.
    pub fn events(&self) -> impl Iterator<Item = FocusEvent<K>> + '_ {
        self.out
            .map(FocusEvent::Out)
            .into_iter()
            .chain(self.over.map(FocusEvent::Over))
    }
}

impl<K: Copy + Eq> FocusState<K> {
    /// Create a state with nothing focused.
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// The focused object, if any.
    pub fn current(&self) -> Option<K> {
        self.current
    }

    /// Move focus to `next`. Returns `None` when focus did not change.
    pub fn update(&mut self, next: Option<K>) -> Option<FocusChange<K>> {
        if self.current == next {
            return None;
        }
        let out = core::mem::replace(&mut self.current, next);
        Some(FocusChange { out, over: next })
    }

    /// Drop focus from `k` without producing a transition.
    ///
    /// Used when the focused object stops being tracked. Returns whether `k` was focused.
    pub fn forget(&mut self, k: K) -> bool {
        if self.current == Some(k) {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// Clear focus, returning the out transition if something was focused.
    pub fn clear(&mut self) -> Option<FocusChange<K>> {
        self.update(None)
    }
}

/// Per-object intersection transition between two consecutive cycles.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Not intersected before, intersected now.
    Enter,
    /// Intersected before, not intersected now.
    Leave,
}

/// Classify a `was` → `is` intersection change.
pub const fn transition(was: bool, is: bool) -> Option<Transition> {
    match (was, is) {
        (false, true) => Some(Transition::Enter),
        (true, false) => Some(Transition::Leave),
        _ => None,
    }
}
