// Copyright 2025 the Pointcast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use glam::Vec3;
use kurbo::{Point, Rect};
use pointcast_interaction::adapters::scene::Stage;
use pointcast_interaction::config::InteractionConfig;
use pointcast_interaction::host::{InputKind, RawInput};
use pointcast_interaction::manager::InteractionManager;
use pointcast_scene::{LocalNode, NodeId, Shape, Tree};

/// An `n x n` grid of unit spheres in the `z = 0` plane, each with a small child
/// cube, all tracked by one manager.
fn grid_stage(n: usize, spacing: f32) -> (Stage, InteractionManager<NodeId>) {
    let mut tree = Tree::new();
    let scene = tree.insert(None, LocalNode::named("scene", Shape::Empty));
    let half = (n as f32 - 1.0) * spacing * 0.5;
    let mut tracked = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let at = Vec3::new(x as f32 * spacing - half, y as f32 * spacing - half, 0.0);
            let ball = tree.insert(
                Some(scene),
                LocalNode::named(format!("ball_{x}_{y}"), Shape::Sphere { radius: 0.5 }).at(at),
            );
            tree.insert(
                Some(ball),
                LocalNode::named(
                    "cap",
                    Shape::Cuboid {
                        half_extents: Vec3::splat(0.2),
                    },
                )
                .at(Vec3::new(0.0, 0.0, 0.6)),
            );
            tracked.push(ball);
        }
    }
    tree.commit();

    let mut stage: Stage = Stage::new(tree);
    stage.camera.eye = Vec3::new(0.0, 0.0, 4.0 * n as f32);
    stage.surface = Some(Rect::new(0.0, 0.0, 1024.0, 768.0));
    let mut manager = InteractionManager::without_host(InteractionConfig::default());
    for ball in tracked {
        manager.add(ball, &[], &stage);
    }
    (stage, manager)
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");
    for &n in &[4_usize, 16, 32] {
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("steady_n{}", n), |b| {
            let (mut stage, mut manager) = grid_stage(n, 1.5);
            manager.set_pointer(Point::ZERO);
            manager.update(&mut stage);
            b.iter(|| black_box(manager.update(&mut stage)));
        });
        group.bench_function(format!("sweep_n{}", n), |b| {
            b.iter_batched(
                || grid_stage(n, 1.5),
                |(mut stage, mut manager)| {
                    for step in 0..16 {
                        let x = -1.0 + f64::from(step) / 8.0;
                        manager.set_pointer(Point::new(x, 0.0));
                        black_box(manager.update(&mut stage));
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_input(c: &mut Criterion) {
    let mut group = c.benchmark_group("input");
    let n = 16;
    group.throughput(Throughput::Elements((n * n) as u64));
    group.bench_function("move_broadcast", |b| {
        let (mut stage, mut manager) = grid_stage(n, 1.5);
        let input = RawInput::at(InputKind::PointerMove, Point::new(512.0, 384.0));
        b.iter(|| black_box(manager.handle_input(&input, &mut stage)));
    });
    group.bench_function("click", |b| {
        let (mut stage, mut manager) = grid_stage(n, 1.5);
        let down = RawInput::at(InputKind::MouseDown, Point::new(512.0, 384.0));
        let click = RawInput::at(InputKind::Click, Point::new(512.0, 384.0));
        b.iter(|| {
            manager.handle_input(&down, &mut stage);
            black_box(manager.handle_input(&click, &mut stage))
        });
    });
    group.finish();
}

criterion_group!(benches, bench_update, bench_input);
criterion_main!(benches);
