// Copyright 2025 the Pointcast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event delivery with cancellable propagation.

use kurbo::Point;
use tracing::trace;

use crate::types::{EventTarget, InteractionEvent, SceneLookup, TrackedObject};

/// Deliver `event` to `object` unless the event is cancelled or the target is dead.
///
/// The snapshot fields are refreshed from `object` and `pointer` right before
/// delivery. Returns whether the handler ran.
pub(crate) fn dispatch<K, H>(
    env: &mut H,
    object: &TrackedObject<K>,
    pointer: Point,
    event: &mut InteractionEvent<'_, H::Original>,
) -> bool
where
    H: SceneLookup<K> + EventTarget<K> + ?Sized,
{
    if event.is_cancelled() || !env.is_alive(&object.target) {
        return false;
    }
    event.coords = pointer;
    event.distance = object.distance;
    event.intersected = object.intersected;
    event.was_intersected = object.was_intersected;
    event.was_intersected_on_down = object.was_intersected_on_down;
    trace!(kind = event.kind().as_str(), name = %object.name, "deliver");
    env.dispatch_event(&object.target, event);
    true
}

/// Deliver one shared `event` to every object accepted by `filter`, in order.
///
/// Stops at the first cancellation; targets already visited keep their delivery.
/// Returns the number of deliveries.
pub(crate) fn dispatch_pass<K, H>(
    env: &mut H,
    objects: &[TrackedObject<K>],
    pointer: Point,
    event: &mut InteractionEvent<'_, H::Original>,
    mut filter: impl FnMut(&TrackedObject<K>) -> bool,
) -> usize
where
    H: SceneLookup<K> + EventTarget<K> + ?Sized,
{
    let mut delivered = 0;
    for object in objects {
        if event.is_cancelled() {
            break;
        }
        if filter(object) && dispatch(env, object, pointer, event) {
            delivered += 1;
        }
    }
    delivered
}
