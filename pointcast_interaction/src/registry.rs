// Copyright 2025 the Pointcast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The set of tracked objects.
//!
//! ## Membership
//!
//! - Adding is idempotent by identity: a target that is already tracked is skipped.
//! - Names given to [`Registry::add`] / [`Registry::remove`] are resolved against the
//!   object's subtree through [`SceneLookup::find_by_name`]; names that do not resolve
//!   are skipped silently (a scene that is still loading routinely lacks children).
//! - Removing a non-member does nothing.
//!
//! ## Order
//!
//! Entries keep insertion order until the first cycle sorts them by distance.
//! The sort is stable, so equal distances keep their previous relative order.

use alloc::string::String;
use alloc::vec::Vec;

use tracing::debug;

use crate::types::{SceneLookup, TrackedId, TrackedObject};

/// Ordered collection of [`TrackedObject`]s.
#[derive(Clone, Debug)]
pub struct Registry<K> {
    objects: Vec<TrackedObject<K>>,
    next_id: u64,
}

impl<K> Default for Registry<K> {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
            next_id: 0,
        }
    }
}

impl<K: Copy + Eq> Registry<K> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tracked objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True if nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate entries in current order (distance order after a cycle).
    pub fn iter(&self) -> core::slice::Iter<'_, TrackedObject<K>> {
        self.objects.iter()
    }

    /// Entry for a handle, if still tracked.
    pub fn get(&self, id: TrackedId) -> Option<&TrackedObject<K>> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Entry tracking `target`, if any.
    pub fn find(&self, target: &K) -> Option<&TrackedObject<K>> {
        self.objects.iter().find(|o| o.target == *target)
    }

    /// Whether `target` is tracked.
    pub fn contains(&self, target: &K) -> bool {
        self.find(target).is_some()
    }

    /// Track `target` under `name`. Returns `None` if it is already tracked.
    pub fn track(&mut self, target: K, name: impl Into<String>) -> Option<TrackedId> {
        if self.contains(&target) {
            return None;
        }
        let id = TrackedId(self.next_id);
        self.next_id += 1;
        let name = name.into();
        debug!(name = %name, "tracking object");
        self.objects.push(TrackedObject::new(id, target, name));
        Some(id)
    }

    /// Stop tracking `target`. Returns the removed handle, if it was tracked.
    pub fn untrack(&mut self, target: &K) -> Option<TrackedId> {
        let pos = self.objects.iter().position(|o| o.target == *target)?;
        let removed = self.objects.remove(pos);
        debug!(name = %removed.name, "untracking object");
        Some(removed.id)
    }

    /// Register `object` itself (empty `child_names`) or each named descendant.
    ///
    /// Returns the handles of newly tracked entries.
    pub fn add<S>(&mut self, object: K, child_names: &[&str], scene: &S) -> Vec<TrackedId>
    where
        S: SceneLookup<K> + ?Sized,
    {
        let mut added = Vec::new();
        if child_names.is_empty() {
            let name = scene.name_of(&object).unwrap_or_default();
            added.extend(self.track(object, name));
            return added;
        }
        for &name in child_names {
            if let Some(child) = scene.find_by_name(&object, name) {
                added.extend(self.track(child, name));
            }
        }
        added
    }

    /// Unregister `object` itself (empty `child_names`) or each named descendant.
    ///
    /// Returns the handles of removed entries.
    pub fn remove<S>(&mut self, object: K, child_names: &[&str], scene: &S) -> Vec<TrackedId>
    where
        S: SceneLookup<K> + ?Sized,
    {
        if child_names.is_empty() {
            return self.untrack(&object).into_iter().collect();
        }
        child_names
            .iter()
            .filter_map(|name| scene.find_by_name(&object, name))
            .filter_map(|child| self.untrack(&child))
            .collect()
    }

    /// Drop entries whose target fails `is_alive`, returning their handles.
    pub(crate) fn retain_alive(&mut self, mut is_alive: impl FnMut(&K) -> bool) -> Vec<TrackedId> {
        let mut dropped = Vec::new();
        self.objects.retain(|o| {
            let keep = is_alive(&o.target);
            if !keep {
                dropped.push(o.id);
            }
            keep
        });
        dropped
    }

    pub(crate) fn iter_mut(&mut self) -> core::slice::IterMut<'_, TrackedObject<K>> {
        self.objects.iter_mut()
    }

    pub(crate) fn as_slice(&self) -> &[TrackedObject<K>] {
        &self.objects
    }

    /// Stable sort by ascending distance. NaN distances compare equal to everything.
    pub(crate) fn sort_by_distance(&mut self) {
        self.objects.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(core::cmp::Ordering::Equal)
        });
    }

    /// The first intersected entry in current order.
    ///
    /// After a cycle's sort this is the closest intersected object.
    pub fn first_intersected(&self) -> Option<TrackedId> {
        self.objects.iter().find(|o| o.intersected).map(|o| o.id)
    }
}
