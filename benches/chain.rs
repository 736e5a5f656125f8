use chain_collections::{AnyMapMut, ChainedMap, ChainedView};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use std::collections::HashMap;

fn layered(depth: usize, width: usize) -> Vec<HashMap<i32, i32>> {
    (0..depth)
        .map(|layer| {
            (0..width)
                .map(|i| ((layer * width / 2 + i) as i32, layer as i32))
                .collect()
        })
        .collect()
}

fn bench_get(c: &mut Criterion) {
    let width = 64;
    let mut group = c.benchmark_group("HashMap vs ChainedMap (Get 64)");

    let flat: HashMap<i32, i32> = (0..width as i32).map(|i| (i, i)).collect();
    group.bench_function("std::collections::HashMap", |b| {
        b.iter(|| {
            for i in 0..width as i32 {
                black_box(flat.get(&black_box(i)));
            }
        })
    });

    for depth in [1, 4] {
        let mut layers = layered(depth, width);
        let chain = ChainedMap::from_maps(layers.iter_mut());
        group.bench_function(format!("ChainedMap ({depth} layers)"), |b| {
            b.iter(|| {
                for i in 0..width as i32 {
                    black_box(chain.get(&black_box(i)));
                }
            })
        });
    }
    group.finish();
}

fn bench_len(c: &mut Criterion) {
    let mut group = c.benchmark_group("ChainedView len (shadow resolution)");
    for depth in [1, 2, 8] {
        let layers = layered(depth, 64);
        let view = ChainedView::from_maps(layers.iter());
        group.bench_function(format!("{depth} layers"), |b| b.iter(|| black_box(view.len())));
    }
    group.finish();
}

fn bench_insert_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("ChainedMap write path (64 keys, 4 layers)");

    group.bench_function("insert", |b| {
        let mut layers = layered(4, 64);
        b.iter(|| {
            let backing = layers
                .iter_mut()
                .map(|layer| layer as &mut dyn AnyMapMut<i32, i32>);
            let mut chain = ChainedMap::with_capacity(64, backing);
            for i in 0..64 {
                black_box(chain.insert(black_box(i), i));
            }
            chain.into_front()
        })
    });

    group.bench_function("remove", |b| {
        b.iter_batched(
            || layered(4, 64),
            |mut layers| {
                let mut chain = ChainedMap::from_maps(layers.iter_mut());
                for i in 0..64 {
                    black_box(chain.remove(&black_box(i)).ok());
                }
            },
            criterion::BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_get, bench_len, bench_insert_remove);
criterion_main!(benches);
