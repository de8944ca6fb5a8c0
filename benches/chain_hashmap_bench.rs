use chain_hashmap::ChainHashMap;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> Vec<u8> {
    format!("k{:016x}", n).into_bytes()
}

fn bench_insert_fresh_100k(c: &mut Criterion) {
    c.bench_function("chain::insert_fresh_100k_cap_64k", |b| {
        b.iter_batched(
            || ChainHashMap::<u64>::new(1 << 16),
            |mut m| {
                for (i, x) in lcg(1).take(100_000).enumerate() {
                    m.insert_owned(key(x), i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit_10k(c: &mut Criterion) {
    c.bench_function("chain::get_hit_10k_on_100k", |b| {
        let mut m = ChainHashMap::<u64>::new(1 << 16);
        let keys: Vec<_> = lcg(7).take(100_000).map(key).collect();
        for (i, k) in keys.iter().enumerate() {
            m.insert(k, i as u64);
        }
        let probes: Vec<_> = keys.iter().step_by(10).take(10_000).cloned().collect();
        b.iter(|| {
            let mut acc = 0u64;
            for k in &probes {
                if let Some(v) = m.get(k) {
                    acc = acc.wrapping_add(*v);
                }
            }
            black_box(acc)
        })
    });
}

fn bench_get_miss_10k(c: &mut Criterion) {
    c.bench_function("chain::get_miss_10k_on_100k", |b| {
        let mut m = ChainHashMap::<u64>::new(1 << 16);
        for (i, x) in lcg(11).take(100_000).enumerate() {
            m.insert_owned(key(x), i as u64);
        }
        // Disjoint key space: a distinct prefix guarantees misses.
        let probes: Vec<Vec<u8>> = lcg(13)
            .take(10_000)
            .map(|x| format!("m{:016x}", x).into_bytes())
            .collect();
        b.iter(|| {
            let mut hits = 0usize;
            for k in &probes {
                if m.get(k).is_some() {
                    hits += 1;
                }
            }
            black_box(hits)
        })
    });
}

fn bench_remove_10k_of_100k(c: &mut Criterion) {
    c.bench_function("chain::remove_10k_of_100k", |b| {
        b.iter_batched(
            || {
                let mut m = ChainHashMap::<u64>::new(1 << 16);
                let keys: Vec<_> = lcg(17).take(100_000).map(key).collect();
                for (i, k) in keys.iter().enumerate() {
                    m.insert(k, i as u64);
                }
                let to_remove: Vec<_> = keys.iter().step_by(10).take(10_000).cloned().collect();
                (m, to_remove)
            },
            |(mut m, to_remove)| {
                for k in &to_remove {
                    let _ = m.remove(k);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_single_bucket_1k(c: &mut Criterion) {
    c.bench_function("chain::single_bucket_insert_get_1k", |b| {
        b.iter_batched(
            || ChainHashMap::<u64>::new(1),
            |mut m| {
                for (i, x) in lcg(23).take(1_000).enumerate() {
                    m.insert_owned(key(x), i as u64);
                }
                let mut acc = 0u64;
                for x in lcg(23).take(1_000) {
                    if let Some(v) = m.get(&key(x)) {
                        acc = acc.wrapping_add(*v);
                    }
                }
                black_box((m, acc))
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_insert_fresh_100k,
    bench_get_hit_10k,
    bench_get_miss_10k,
    bench_remove_10k_of_100k,
    bench_single_bucket_1k
);
criterion_main!(benches);
