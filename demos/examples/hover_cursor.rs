// Copyright 2025 the Pointcast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cursor feedback from closest-object focus.
//!
//! Three spheres sit at different depths along a row. The pointer sweeps from
//! left to right; `Over`/`Out` switch a shared cursor, while `Enter`/`Leave`
//! are logged per sphere. Where two spheres overlap on screen only the nearer
//! one holds focus.
//!
//! Run:
//! - `RUST_LOG=pointcast_interaction=trace cargo run -p pointcast_demos --example hover_cursor`

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec3;
use kurbo::{Point, Rect};
use pointcast_interaction::adapters::scene::Stage;
use pointcast_interaction::config::InteractionConfig;
use pointcast_interaction::host::{InputKind, RawInput};
use pointcast_interaction::manager::InteractionManager;
use pointcast_interaction::types::EventKind;
use pointcast_scene::{LocalNode, Shape, Tree};
use tracing::info;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Cursor {
    Default,
    Pointer,
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
    let spheres = [("left", -1.2, 0.0), ("middle", -0.2, -3.0), ("right", 1.2, 1.0)];
    for (name, x, z) in spheres {
        tree.insert(
            Some(scene),
            LocalNode::named(name, Shape::Sphere { radius: 0.8 }).at(Vec3::new(x, 0.0, z)),
        );
    }
    tree.commit();

    let mut stage: Stage = Stage::new(tree);
    stage.surface = Some(Rect::new(0.0, 0.0, 640.0, 480.0));
    stage.camera.aspect = 640.0 / 480.0;

    let cursor = Rc::new(Cell::new(Cursor::Default));
    for (name, ..) in spheres {
        let Some(node) = stage.tree.find_by_name(scene, name) else {
            continue;
        };
        let c = cursor.clone();
        stage.on(node, EventKind::Over, move |ev, _| {
            c.set(Cursor::Pointer);
            info!(sphere = name, distance = ev.distance, "focus");
        });
        let c = cursor.clone();
        stage.on(node, EventKind::Out, move |_, _| c.set(Cursor::Default));
        stage.on(node, EventKind::Enter, move |_, _| info!(sphere = name, "enter"));
        stage.on(node, EventKind::Leave, move |_, _| info!(sphere = name, "leave"));
    }

    let mut manager = InteractionManager::without_host(InteractionConfig::default());
    let names: Vec<&str> = spheres.iter().map(|(name, ..)| *name).collect();
    manager.add(scene, &names, &stage);

    let mut last = Cursor::Default;
    for step in 0..=32 {
        let client = Point::new(f64::from(step) * 20.0, 240.0);
        manager.handle_input(&RawInput::at(InputKind::MouseMove, client), &mut stage);
        // A frame tick.
        manager.update(&mut stage);
        if cursor.get() != last {
            last = cursor.get();
            println!("x = {:>3} px: cursor {:?}", client.x, last);
        }
    }

    assert_eq!(cursor.get(), Cursor::Default, "the sweep ends off every sphere");
}
