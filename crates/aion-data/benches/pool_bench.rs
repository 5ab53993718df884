use aion_data::{LifetimeManager, SlotPool};
use aion_core::Generation;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

#[derive(Debug, Clone, Copy)]
struct Texture {
    width: u32,
    height: u32,
}

fn bench_pool(c: &mut Criterion) {
    let mut group = c.benchmark_group("Slot Pool");

    group.bench_function("Add 10k / retire in one pass", |b| {
        b.iter(|| {
            let mut pool = SlotPool::with_capacity(16_384);
            let generation = Generation::new(1);
            for i in 0..10_000u32 {
                let handle = pool
                    .add(
                        Texture {
                            width: i,
                            height: i,
                        },
                        generation,
                    )
                    .unwrap();
                black_box(handle);
            }
            black_box(pool.dispose_all(generation));
        });
    });

    group.bench_function("Validity check (hot path)", |b| {
        let mut pool = SlotPool::new();
        let handle = pool
            .add(
                Texture {
                    width: 64,
                    height: 64,
                },
                Generation::new(1),
            )
            .unwrap();
        b.iter(|| black_box(pool.is_valid(black_box(handle))));
    });

    group.bench_function("Dereference (hot path)", |b| {
        let mut pool = SlotPool::new();
        let handle = pool
            .add(
                Texture {
                    width: 64,
                    height: 64,
                },
                Generation::new(1),
            )
            .unwrap();
        b.iter(|| {
            let texture = pool.get(black_box(handle)).unwrap();
            black_box(texture.width * texture.height)
        });
    });

    group.finish();
}

fn bench_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("Lifetime Frames");

    group.bench_function("Push / add 100 / pop", |b| {
        let mut lifetimes = LifetimeManager::with_capacity(256);
        b.iter(|| {
            lifetimes.push_frame("bench");
            for i in 0..100u32 {
                let handle = lifetimes
                    .add(Texture {
                        width: i,
                        height: i,
                    })
                    .unwrap();
                black_box(handle);
            }
            lifetimes.pop_frame();
        });
    });

    group.finish();
}

criterion_group!(benches, bench_pool, bench_frames);
criterion_main!(benches);
