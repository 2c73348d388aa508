//! Benchmarks comparing the side storage strategies.
//!
//! Each group runs the same workload on the map, heap and vector books:
//!
//! | Group | Workload |
//! |-------|----------|
//! | insert | rest N orders over 51 ticks |
//! | amend | resize every 10th resting order |
//! | delete | cancel every 10th resting order |
//! | top_of_book | alternate best bid / best ask queries |
//! | stale_heap | top of book right after the best level empties |
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run one group
//! cargo bench -- top_of_book
//! ```
//!
//! Results are saved to `target/criterion/` with HTML reports.

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use tickbook::{HeapSide, MapSide, Order, OrderBook, Side, SideBook, VecSide};

// ============================================================================
// HELPER FUNCTIONS - Deterministic order generation
// ============================================================================

/// Generate orders over 10000..=10050 ticks, alternating sides
fn generate_orders(count: usize, seed: u64) -> Vec<Order> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    (0..count)
        .map(|i| {
            let side = if i % 2 == 1 { Side::Buy } else { Side::Sell };
            Order::new(i as u64, side, rng.gen_range(10_000..=10_050), 10)
        })
        .collect()
}

/// Build a book holding `orders`
fn populated<S: SideBook>(orders: &[Order]) -> OrderBook<S> {
    let mut book = OrderBook::with_capacity(orders.len());
    for order in orders {
        // Generated ids are unique and quantities non-zero
        let _ = book.new_order(*order);
    }
    book
}

// ============================================================================
// BENCHMARK BODIES (generic over strategy)
// ============================================================================

fn insert<S: SideBook>(c: &mut Criterion, size: usize) {
    let orders = generate_orders(size, 42);
    let mut group = c.benchmark_group("insert");
    group.throughput(Throughput::Elements(size as u64));

    group.bench_with_input(BenchmarkId::new(S::NAME, size), &orders, |b, orders| {
        b.iter_batched(
            || OrderBook::<S>::with_capacity(orders.len()),
            |mut book| {
                for order in orders {
                    black_box(book.new_order(*order)).ok();
                }
                book.len()
            },
            BatchSize::LargeInput,
        );
    });
    group.finish();
}

fn amend<S: SideBook>(c: &mut Criterion, size: usize) {
    let orders = generate_orders(size, 42);
    let mut group = c.benchmark_group("amend");
    group.throughput(Throughput::Elements((size / 10) as u64));

    group.bench_with_input(BenchmarkId::new(S::NAME, size), &orders, |b, orders| {
        b.iter_batched(
            || populated::<S>(orders),
            |mut book| {
                for order in orders.iter().step_by(10) {
                    black_box(book.amend_order(order.id, order.quantity + 5)).ok();
                }
                book.len()
            },
            BatchSize::LargeInput,
        );
    });
    group.finish();
}

fn delete<S: SideBook>(c: &mut Criterion, size: usize) {
    let orders = generate_orders(size, 42);
    let mut group = c.benchmark_group("delete");
    group.throughput(Throughput::Elements((size / 10) as u64));

    group.bench_with_input(BenchmarkId::new(S::NAME, size), &orders, |b, orders| {
        b.iter_batched(
            || populated::<S>(orders),
            |mut book| {
                for order in orders.iter().step_by(10) {
                    black_box(book.delete_order(order.id)).ok();
                }
                book.len()
            },
            BatchSize::LargeInput,
        );
    });
    group.finish();
}

fn top_of_book<S: SideBook>(c: &mut Criterion, size: usize) {
    let orders = generate_orders(size, 42);
    let mut book = populated::<S>(&orders);
    let mut group = c.benchmark_group("top_of_book");

    group.bench_function(BenchmarkId::new(S::NAME, size), |b| {
        let mut flip = false;
        b.iter(|| {
            flip = !flip;
            let side = if flip { Side::Buy } else { Side::Sell };
            black_box(book.top_of_book(side))
        });
    });
    group.finish();
}

fn stale_heap<S: SideBook>(c: &mut Criterion) {
    let mut group = c.benchmark_group("stale_heap");

    group.bench_function(S::NAME, |b| {
        let mut book = OrderBook::<S>::with_capacity(1_024);
        let _ = book.new_order(Order::buy(0, 10_000, 10));
        let mut id = 1u64;

        b.iter(|| {
            let _ = book.new_order(Order::buy(id, 10_000 + (id % 64) + 1, 1));
            let _ = book.delete_order(id);
            id += 1;
            black_box(book.top_of_book(Side::Buy))
        });
    });
    group.finish();
}

// ============================================================================
// GROUP DRIVERS
// ============================================================================

const SIZES: [usize; 2] = [10_000, 100_000];

fn bench_insert(c: &mut Criterion) {
    for size in SIZES {
        insert::<MapSide>(c, size);
        insert::<HeapSide>(c, size);
        insert::<VecSide>(c, size);
    }
}

fn bench_amend(c: &mut Criterion) {
    for size in SIZES {
        amend::<MapSide>(c, size);
        amend::<HeapSide>(c, size);
        amend::<VecSide>(c, size);
    }
}

fn bench_delete(c: &mut Criterion) {
    for size in SIZES {
        delete::<MapSide>(c, size);
        delete::<HeapSide>(c, size);
        delete::<VecSide>(c, size);
    }
}

fn bench_top_of_book(c: &mut Criterion) {
    for size in SIZES {
        top_of_book::<MapSide>(c, size);
        top_of_book::<HeapSide>(c, size);
        top_of_book::<VecSide>(c, size);
    }
}

fn bench_stale_heap(c: &mut Criterion) {
    stale_heap::<MapSide>(c);
    stale_heap::<HeapSide>(c);
    stale_heap::<VecSide>(c);
}

// ============================================================================
// CRITERION ENTRY POINT
// ============================================================================

fn config() -> Criterion {
    Criterion::default().measurement_time(Duration::from_secs(5))
}

criterion_group!(
    name = benches;
    config = config();
    targets = bench_insert, bench_amend, bench_delete, bench_top_of_book, bench_stale_heap
);

criterion_main!(benches);
