//! Benchmarks for per-frame menu work.
//!
//! Run with: cargo bench -p kmenu-widgets

use std::cell::Cell;
use std::hint::black_box;
use std::rc::Rc;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use kmenu_core::geometry::Rect;
use kmenu_widgets::{Menu, MenuNumber, MenuTree, Node};

/// `breadth` rows per level, `depth` levels of plain submenus under row 0.
fn build(breadth: usize, depth: usize, draws: &Rc<Cell<u64>>) -> MenuTree {
    let counter = Rc::clone(draws);
    let root = Menu::new(Rect::new(0.0, 0.0, 240.0, 20.0 * breadth as f32), 20.0)
        .with_node_render(move |_, _, rect, alpha| {
            counter.set(counter.get() + 1);
            black_box((rect, alpha));
        });
    let mut tree = MenuTree::new(root);
    let mut parent = tree.root();
    for level in 0..depth {
        let sub = tree
            .take(
                parent,
                Node::menu(Menu::new(Rect::new(240.0, 0.0, 240.0, 20.0 * breadth as f32), 20.0))
                    .with_text(format!("level {level}")),
            )
            .unwrap();
        for i in 1..breadth {
            tree.take(parent, Node::new(format!("row {level}.{i}"))).unwrap();
        }
        parent = sub;
    }
    for i in 0..breadth {
        let number = MenuNumber::new(60.0, 20.0, 0.0, 0.0, 100.0, 1.0);
        tree.take(parent, Node::menu(number).with_text(format!("n{i}")))
            .unwrap();
    }
    tree.render();
    for _ in 0..=depth {
        tree.press();
    }
    tree
}

// ============================================================================
// Frame loop
// ============================================================================

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("menu/update");
    for (breadth, depth) in [(8, 2), (32, 4), (128, 6)] {
        let draws = Rc::new(Cell::new(0));
        let mut tree = build(breadth, depth, &draws);
        group.bench_with_input(
            BenchmarkId::new("tick", format!("{breadth}x{depth}")),
            &(),
            |b, _| {
                b.iter(|| {
                    tree.update(black_box(1.0 / 60.0));
                })
            },
        );
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("menu/render");
    for (breadth, depth) in [(8, 2), (32, 4), (128, 6)] {
        let draws = Rc::new(Cell::new(0));
        let mut tree = build(breadth, depth, &draws);
        group.bench_with_input(
            BenchmarkId::new("open_path", format!("{breadth}x{depth}")),
            &(),
            |b, _| {
                b.iter(|| {
                    tree.render();
                    black_box(draws.get());
                })
            },
        );
    }
    group.finish();
}

fn bench_navigation(c: &mut Criterion) {
    let mut group = c.benchmark_group("menu/input");
    let draws = Rc::new(Cell::new(0));
    let mut tree = build(32, 4, &draws);
    group.bench_function("down_deep", |b| {
        b.iter(|| black_box(tree.down()));
    });
    group.bench_function("number_up_down", |b| {
        b.iter(|| {
            tree.press();
            tree.up();
            tree.down();
            tree.back();
        });
    });
    group.finish();
}

criterion_group!(benches, bench_update, bench_render, bench_navigation);
criterion_main!(benches);
