use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::StatefulWidget;
use video_index_tree::{
    ChapterNode, IndexNode, SegmentNode, TimeSpan, Timestamp, Tree, TreeItem, TreeState,
    VideoIndex,
};

fn example_index(chapters: u8, segments: u8) -> VideoIndex {
    let children = (0..chapters)
        .map(|chapter| {
            let children = (0..segments)
                .map(|segment| SegmentNode {
                    title: format!("Segment {chapter}.{segment}"),
                    description: "Synthetic segment for benchmarking".to_owned(),
                    time_span: TimeSpan::new(
                        Timestamp::new(chapter, segment),
                        Timestamp::new(chapter, segment + 1),
                    )
                    .expect("start is before end"),
                })
                .collect();
            IndexNode::Chapter(ChapterNode {
                title: format!("Chapter {chapter}"),
                summary: "Synthetic chapter for benchmarking".to_owned(),
                children,
            })
        })
        .collect();
    VideoIndex {
        video_title: "Synthetic video".to_owned(),
        overview: "Generated index used by the benchmarks".to_owned(),
        children,
    }
}

fn example_items() -> Vec<TreeItem<'static, String>> {
    let item = example_index(60, 40)
        .tree_item()
        .expect("all item identifiers are unique");
    vec![item]
}

fn init(criterion: &mut Criterion) {
    let items = example_items();
    let mut group = criterion.benchmark_group("init");

    group.bench_function("initial-collapse", |bencher| {
        bencher.iter_batched(
            TreeState::<String>::default,
            |mut state| state.collapse_initial(black_box(&items)),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("flatten", |bencher| {
        let mut state = TreeState::default();
        state.collapse_initial(&items);
        bencher.iter(|| state.flatten(black_box(&items)));
    });

    group.finish();
}

fn renders(criterion: &mut Criterion) {
    let items = example_items();
    let buffer_size = Rect::new(0, 0, 120, 60);
    let mut group = criterion.benchmark_group("render");

    let tree = Tree::new(items.clone()).expect("all item identifiers are unique");
    group.bench_function("initial", |bencher| {
        bencher.iter_batched(
            || {
                let mut state = TreeState::default();
                state.collapse_initial(&items);
                (tree.clone(), state)
            },
            |(tree, mut state)| {
                let mut buffer = Buffer::empty(buffer_size);
                black_box(tree).render(buffer_size, black_box(&mut buffer), &mut state);
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("everything-expanded", |bencher| {
        bencher.iter_batched(
            || (tree.clone(), TreeState::default()),
            |(tree, mut state)| {
                let mut buffer = Buffer::empty(buffer_size);
                black_box(tree).render(buffer_size, black_box(&mut buffer), &mut state);
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

/// Create flamegraphs with `cargo bench --bench bench -- --profile-time=5`
#[cfg(unix)]
fn profiled() -> Criterion {
    use pprof::criterion::{Output, PProfProfiler};
    Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
}
#[cfg(not(unix))]
fn profiled() -> Criterion {
    Criterion::default()
}

criterion_group! {
    name = benches;
    config = profiled();
    targets = init, renders
}
criterion_main!(benches);
