// Copyright 2025 the Pointcast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Press, release and click with auto-added targets.
//!
//! A toy host event system records which listeners the manager registers, then
//! replays a short input script through it. Targets are attached to the scene
//! after the manager exists and picked up through auto-add. A click counts as
//! "clean" only if the target was also under the pointer at the press.
//!
//! Run:
//! - `cargo run -p pointcast_demos --example click_targets`

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;
use kurbo::{Point, Rect};
use pointcast_interaction::adapters::scene::{Stage, forward_attachments};
use pointcast_interaction::config::InteractionConfig;
use pointcast_interaction::host::{
    HostEvents, InputKind, ListenTarget, RawInput, SubscriptionId, Topic,
};
use pointcast_interaction::manager::InteractionManager;
use pointcast_interaction::types::EventKind;
use pointcast_scene::{LocalNode, Shape, Tree};

/// Listener table of a pretend windowing system.
#[derive(Default)]
struct Window {
    next: u64,
    listeners: Vec<(SubscriptionId, ListenTarget, Topic)>,
}

impl Window {
    fn listens_for(&self, kind: InputKind) -> bool {
        self.listeners
            .iter()
            .any(|(_, _, topic)| *topic == Topic::Input(kind))
    }
}

impl HostEvents for Window {
    fn subscribe(&mut self, target: ListenTarget, topic: Topic) -> SubscriptionId {
        self.next += 1;
        let id = SubscriptionId(self.next);
        self.listeners.push((id, target, topic));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.listeners.retain(|(sub, ..)| *sub != id);
    }

    fn supports_pointer_events(&self) -> bool {
        true
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut tree = Tree::new();
    let scene = tree.insert(None, LocalNode::named("scene", Shape::Empty));
    tree.commit();

    let mut window = Window::default();
    let config = InteractionConfig::default()
        .with_auto_add(scene)
        .bind_events_on_body_element(false);
    let mut manager = InteractionManager::new(config, &mut window);
    println!("registered {} listeners", window.listeners.len());

    // Attach targets after the manager exists.
    let button = tree.insert(
        Some(scene),
        LocalNode::named(
            "button",
            Shape::Cuboid {
                half_extents: Vec3::new(1.5, 0.5, 0.2),
            },
        ),
    );
    let changes = tree.commit();

    let mut stage: Stage<&'static str> = Stage::new(tree);
    stage.surface = Some(Rect::new(0.0, 0.0, 400.0, 400.0));
    let added = forward_attachments(&mut manager, &changes, &stage);
    println!("auto-added {added} target(s)");

    let clicks = Rc::new(RefCell::new(Vec::new()));
    let log = clicks.clone();
    stage.on(button, EventKind::Click, move |ev, _| {
        let clean = ev.was_intersected_on_down;
        let source = ev.original().copied().unwrap_or("?");
        log.borrow_mut().push(clean);
        println!("click from {source}: clean = {clean}");
    });
    stage.on(button, EventKind::MouseUp, |ev, _| {
        println!("release, still over button = {}", ev.intersected);
    });

    let center = Point::new(200.0, 200.0);
    let corner = Point::new(10.0, 10.0);
    let script = [
        (InputKind::MouseDown, center, "press"),
        (InputKind::MouseUp, center, "release"),
        (InputKind::Click, center, "click"),
        (InputKind::MouseDown, corner, "press off"),
        (InputKind::MouseMove, center, "drag on"),
        (InputKind::MouseUp, center, "release"),
        (InputKind::Click, center, "click"),
    ];
    for (kind, client, label) in script {
        if !window.listens_for(kind) {
            continue;
        }
        let input = RawInput::at(kind, client).with_original(&label);
        manager.handle_input(&input, &mut stage);
    }

    assert_eq!(*clicks.borrow(), vec![true, false]);

    manager.dispose(&mut window);
    manager.dispose(&mut window);
    println!("listeners after dispose: {}", window.listeners.len());
    assert!(window.listeners.is_empty());
}
