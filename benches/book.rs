//! Benchmarks for the depth book.
//!
//! | Group         | What it measures                                 |
//! |---------------|--------------------------------------------------|
//! | apply         | one depth update against books of various sizes  |
//! | top_n         | ladder reads at display depths                   |
//! | throughput    | a batch of 10k random updates                    |
//! | decode        | Binance frame to `DepthUpdate`                   |
//! | snapshot      | full snapshot plus state root                    |
//!
//! ## Running Benchmarks
//!
//! ```bash
//! cargo bench
//! cargo bench -- top_n
//! ```
//!
//! Results are saved to `target/criterion/` with HTML reports.

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use depth_book::feed::binance::decode_depth;
use depth_book::{DepthUpdate, PriceLevelBook, Side};

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// 0.01 in fixed-point
const TICK: u64 = 1_000_000;

/// 50000.00
const MID: u64 = 5_000_000_000_000;

/// Book with `levels` asks above and `levels` bids below `MID`.
fn populated_book(levels: usize) -> PriceLevelBook {
    let mut book = PriceLevelBook::new();
    let asks = (1..=levels as u64).map(|i| (MID + i * TICK, 100_000_000)).collect();
    let bids = (0..levels as u64).map(|i| (MID - i * TICK, 100_000_000)).collect();
    book.apply(&DepthUpdate::from_levels(asks, bids));
    book
}

fn random_side(rng: &mut ChaCha8Rng, up: bool) -> Vec<(u64, u64)> {
    (0..rng.gen_range(1..=10))
        .map(|_| {
            let offset = rng.gen_range(1..=1_000) * TICK;
            let price = if up { MID + offset } else { MID - offset };
            let size = if rng.gen_bool(0.2) { 0 } else { rng.gen_range(1..=500_000_000) };
            (price, size)
        })
        .collect()
}

/// Random updates touching the inner 1000 ticks of each side.
fn generate_update_batch(count: usize, seed: u64) -> Vec<DepthUpdate> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let asks = random_side(&mut rng, true);
            let bids = random_side(&mut rng, false);
            DepthUpdate::from_levels(asks, bids)
        })
        .collect()
}

// ============================================================================
// BENCHMARKS
// ============================================================================

fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply");

    for levels in [100usize, 1_000, 10_000] {
        let base = populated_book(levels);
        let update = generate_update_batch(1, 7).remove(0);

        group.bench_with_input(BenchmarkId::new("random_update", levels), &levels, |b, _| {
            b.iter_batched(
                || base.clone(),
                |mut book| {
                    black_box(book.apply(black_box(&update)));
                    book
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_top_n(c: &mut Criterion) {
    let mut group = c.benchmark_group("top_n");
    let book = populated_book(10_000);

    for n in [1usize, 10, 20, 100] {
        group.bench_with_input(BenchmarkId::new("ask", n), &n, |b, &n| {
            b.iter(|| black_box(book.top_n(Side::Ask, black_box(n))));
        });
        group.bench_with_input(BenchmarkId::new("bid", n), &n, |b, &n| {
            b.iter(|| black_box(book.top_n(Side::Bid, black_box(n))));
        });
    }

    group.bench_function("best_of", |b| {
        b.iter(|| black_box((book.best_of(Side::Bid), book.best_of(Side::Ask))));
    });

    group.finish();
}

fn bench_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("throughput");
    const BATCH: usize = 10_000;
    let updates = generate_update_batch(BATCH, 42);

    group.throughput(Throughput::Elements(BATCH as u64));
    group.bench_function("10k_updates", |b| {
        b.iter_batched(
            || populated_book(1_000),
            |mut book| {
                for update in &updates {
                    book.apply(update);
                }
                book
            },
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    let frame = r#"{"stream":"btcusdt@depth","data":{"e":"depthUpdate","E":1703577600000,"T":1703577599990,"s":"BTCUSDT","U":100,"u":105,"pu":99,"b":[["43250.00","3.000"],["43249.90","0.250"],["43249.80","0"]],"a":[["43250.10","1.200"],["43250.20","0.500"],["43250.30","0"]]}}"#;

    group.throughput(Throughput::Bytes(frame.len() as u64));
    group.bench_function("combined_stream_frame", |b| {
        b.iter(|| black_box(decode_depth(black_box(frame))));
    });

    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");

    for levels in [100usize, 1_000] {
        let book = populated_book(levels);
        group.bench_with_input(BenchmarkId::new("state_root", levels), &levels, |b, _| {
            b.iter(|| black_box(book.full_snapshot().state_root()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_apply,
    bench_top_n,
    bench_throughput,
    bench_decode,
    bench_snapshot
);

criterion_main!(benches);
