// Copyright 2025 the Pointcast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-object intersection evaluation.
//!
//! A tracked object is hit-tested as a whole subtree; however many candidates
//! the engine reports, the object keeps a single record: intersected or not,
//! and the nearest distance.

use alloc::vec::Vec;

use crate::types::{RayCaster, RayHit, TrackedObject};

/// Smallest distance among `hits`, or `None` if there are none.
///
/// NaN distances are ignored unless every candidate is NaN.
pub fn nearest_distance<K>(hits: &[RayHit<K>]) -> Option<f64> {
    hits.iter().map(|h| h.distance).reduce(f64::min)
}

/// Hit-test `object`'s subtree with `ray` and update its intersection state.
///
/// The previous `intersected` is kept in `was_intersected`. A miss leaves the
/// stored distance untouched.
pub(crate) fn evaluate<K, C>(
    object: &mut TrackedObject<K>,
    caster: &C,
    ray: &C::Ray,
    scratch: &mut Vec<RayHit<K>>,
) where
    C: RayCaster<K> + ?Sized,
{
    scratch.clear();
    caster.intersect_subtree(ray, &object.target, true, scratch);
    object.was_intersected = object.intersected;
    match nearest_distance(scratch) {
        Some(distance) => {
            object.intersected = true;
            object.distance = distance;
        }
        None => object.intersected = false,
    }
}
