// Copyright 2025 the Pointcast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end scenarios against a scripted host.

use std::collections::HashMap;

use kurbo::{Point, Rect};
use pointcast_interaction::config::InteractionConfig;
use pointcast_interaction::host::{InputKind, RawInput};
use pointcast_interaction::manager::InteractionManager;
use pointcast_interaction::types::{
    Environment, EventKind, EventTarget, InteractionEvent, RayCaster, RayHit, SceneLookup,
};

const A: u32 = 1;
const B: u32 = 2;

/// Nodes hit while the pointer's x is negative, at fixed distances.
/// Node `10 * p + i` is a child of `p`, named `c{i}`.
struct Host {
    distance: HashMap<u32, f64>,
    log: Vec<(EventKind, u32)>,
    snapshots: Vec<(EventKind, u32, Point, bool, bool)>,
}

impl Host {
    fn new(distance: &[(u32, f64)]) -> Self {
        Self {
            distance: distance.iter().copied().collect(),
            log: Vec::new(),
            snapshots: Vec::new(),
        }
    }

    fn take(&mut self) -> Vec<(EventKind, u32)> {
        std::mem::take(&mut self.log)
    }
}

impl SceneLookup<u32> for Host {
    fn name_of(&self, node: &u32) -> Option<&str> {
        match node {
            1 => Some("a"),
            2 => Some("b"),
            _ => None,
        }
    }

    fn find_by_name(&self, root: &u32, name: &str) -> Option<u32> {
        let i: u32 = name.strip_prefix('c')?.parse().ok()?;
        Some(root * 10 + i)
    }
}

impl RayCaster<u32> for Host {
    type Ray = f64;

    fn ray_from_pointer(&self, pointer: Point) -> f64 {
        pointer.x
    }

    fn intersect_subtree(&self, x: &f64, root: &u32, recursive: bool, out: &mut Vec<RayHit<u32>>) {
        if *x >= 0.0 {
            return;
        }
        let candidates = [*root, root * 10 + 1, root * 10 + 2];
        let reach = if recursive { 3 } else { 1 };
        for node in &candidates[..reach] {
            if let Some(&distance) = self.distance.get(node) {
                out.push(RayHit {
                    node: *node,
                    distance,
                });
            }
        }
    }
}

impl EventTarget<u32> for Host {
    type Original = &'static str;

    fn dispatch_event(&mut self, target: &u32, event: &mut InteractionEvent<'_, &'static str>) {
        self.log.push((event.kind(), *target));
        self.snapshots.push((
            event.kind(),
            *target,
            event.coords,
            event.intersected,
            event.was_intersected_on_down,
        ));
    }
}

impl Environment<u32> for Host {
    fn surface_rect(&self) -> Option<Rect> {
        Some(Rect::new(0.0, 0.0, 100.0, 100.0))
    }
}

fn tracking(host: &Host, nodes: &[u32]) -> InteractionManager<u32> {
    let mut m = InteractionManager::without_host(InteractionConfig::default());
    for &n in nodes {
        m.add(n, &[], host);
    }
    m
}

const ON: Point = Point::new(-0.5, 0.0);
const OFF: Point = Point::new(0.5, 0.0);

#[test]
fn pointer_over_both_focuses_the_nearer() {
    let mut host = Host::new(&[(A, 5.0), (B, 2.0)]);
    let mut m = tracking(&host, &[A, B]);
    m.set_pointer(ON);
    let summary = m.update(&mut host);

    assert_eq!(summary.entered, 2);
    assert_eq!(m.closest_object().map(|o| *o.target()), Some(B));
    let log = host.take();
    assert_eq!(log.iter().filter(|(k, _)| *k == EventKind::Over).count(), 1);
    assert_eq!(
        log,
        vec![(EventKind::Over, B), (EventKind::Enter, B), (EventKind::Enter, A)]
    );
}

#[test]
fn pointer_off_both_leaves_both() {
    let mut host = Host::new(&[(A, 5.0), (B, 2.0)]);
    let mut m = tracking(&host, &[A, B]);
    m.set_pointer(ON);
    m.update(&mut host);
    host.take();

    m.set_pointer(OFF);
    let summary = m.update(&mut host);
    assert_eq!(summary.left, 2);
    assert_eq!(m.closest(), None);
    assert_eq!(
        host.take(),
        vec![(EventKind::Out, B), (EventKind::Leave, B), (EventKind::Leave, A)]
    );
}

#[test]
fn removing_the_closest_picks_a_new_one_silently() {
    let mut host = Host::new(&[(A, 5.0), (B, 2.0)]);
    let mut m = tracking(&host, &[A, B]);
    m.set_pointer(ON);
    m.update(&mut host);
    host.take();

    m.remove(B, &[], &host);
    m.update(&mut host);
    let log = host.take();
    assert!(!log.contains(&(EventKind::Out, B)));
    assert_eq!(log, vec![(EventKind::Over, A)]);
    assert_eq!(m.closest_object().map(|o| *o.target()), Some(A));
}

#[test]
fn named_children_are_tracked_under_their_names() {
    let mut host = Host::new(&[(11, 4.0), (12, 3.0)]);
    let mut m: InteractionManager<u32> = InteractionManager::without_host(InteractionConfig::default());
    let ids = m.add(A, &["c1", "c2", "missing"], &host);
    assert_eq!(ids.len(), 2);
    assert_eq!(m.registry().find(&11).map(|o| o.name()), Some("c1"));

    m.set_pointer(ON);
    m.update(&mut host);
    assert_eq!(m.closest_object().map(|o| *o.target()), Some(12));

    assert_eq!(m.remove(A, &["c2"], &host).len(), 1);
    assert_eq!(m.closest(), None);
    assert_eq!(m.registry().len(), 1);
}

#[test]
fn hierarchy_produces_one_record_at_the_nearest_distance() {
    let mut host = Host::new(&[(A, 9.0), (11, 4.0), (12, 6.0)]);
    let mut m = tracking(&host, &[A]);
    m.set_pointer(ON);
    m.update(&mut host);
    assert_eq!(host.take(), vec![(EventKind::Over, A), (EventKind::Enter, A)]);
    assert_eq!(m.registry().find(&A).map(|o| o.distance()), Some(4.0));
}

#[test]
fn press_drag_off_and_click() {
    let mut host = Host::new(&[(A, 1.0)]);
    let mut m = tracking(&host, &[A]);

    // Press over A at client (25, 50), i.e. x = -0.5.
    let press = RawInput::at(InputKind::MouseDown, Point::new(25.0, 50.0)).with_original(&"press");
    assert_eq!(m.handle_input(&press, &mut host), 1);
    assert_eq!(
        host.take(),
        vec![(EventKind::Over, A), (EventKind::Enter, A), (EventKind::MouseDown, A)]
    );

    // Drag off: move events are broadcast regardless of hits.
    let drag = RawInput::at(InputKind::MouseMove, Point::new(75.0, 50.0));
    assert_eq!(m.handle_input(&drag, &mut host), 1);
    assert_eq!(host.take(), vec![(EventKind::MouseMove, A)]);

    // Release is global and does not run a cycle.
    let release = RawInput::at(InputKind::MouseUp, Point::new(75.0, 50.0));
    assert_eq!(m.handle_input(&release, &mut host), 1);
    assert_eq!(host.take(), vec![(EventKind::MouseUp, A)]);
    let (_, _, _, intersected, on_down) = host.snapshots.last().copied().unwrap();
    assert!(intersected, "no cycle ran since the press");
    assert!(on_down);

    // The click runs a cycle first; A is no longer under the pointer.
    let click = RawInput::at(InputKind::Click, Point::new(75.0, 50.0));
    assert_eq!(m.handle_input(&click, &mut host), 0);
    assert_eq!(host.take(), vec![(EventKind::Out, A), (EventKind::Leave, A)]);
}

#[test]
fn touch_sequence_as_mouse_and_as_touch() {
    for as_mouse in [true, false] {
        let mut host = Host::new(&[(A, 1.0)]);
        let config = InteractionConfig::default().with_treat_touch_events_as_mouse_events(as_mouse);
        let mut m = InteractionManager::without_host(config);
        m.add(A, &[], &host);

        let start = [Point::new(25.0, 75.0)];
        m.handle_input(&RawInput::touch(InputKind::TouchStart, &start), &mut host);
        m.handle_input(&RawInput::touch(InputKind::TouchMove, &start), &mut host);
        m.handle_input(&RawInput::touch(InputKind::TouchEnd, &[]), &mut host);

        let (down, moved, up) = if as_mouse {
            (EventKind::MouseDown, EventKind::MouseMove, EventKind::MouseUp)
        } else {
            (EventKind::TouchStart, EventKind::TouchMove, EventKind::TouchEnd)
        };
        assert_eq!(
            host.take(),
            vec![
                (EventKind::Over, A),
                (EventKind::Enter, A),
                (down, A),
                (moved, A),
                (up, A),
            ]
        );
        assert_eq!(m.pointer(), Point::new(-0.5, -0.5));
    }
}

#[test]
fn snapshot_carries_pointer_and_state() {
    let mut host = Host::new(&[(A, 3.0), (B, 3.0)]);
    let mut m = tracking(&host, &[A, B]);
    m.handle_input(&RawInput::at(InputKind::PointerMove, Point::new(0.0, 100.0)), &mut host);
    assert_eq!(m.pointer(), Point::new(-1.0, -1.0));
    for (kind, _, coords, intersected, _) in &host.snapshots {
        assert_eq!(*kind, EventKind::PointerMove);
        assert_eq!(*coords, Point::new(-1.0, -1.0));
        assert!(!intersected, "no cycle has run yet");
    }

    // Equal distances keep registration order.
    m.update(&mut host);
    let order: Vec<u32> = m.registry().iter().map(|o| *o.target()).collect();
    assert_eq!(order, vec![A, B]);
    assert_eq!(m.closest_object().map(|o| *o.target()), Some(A));
}
