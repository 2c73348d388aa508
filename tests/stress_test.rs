//! Stress tests for the order book.
//!
//! These tests verify:
//! 1. All strategies stay correct under high event volume
//! 2. Determinism: the same seed gives the same state root, on every strategy
//! 3. Retained empty levels can be reclaimed with `compact`
//!
//! ## Running Stress Tests
//!
//! ```bash
//! # Run all stress tests (release mode recommended)
//! cargo test --release --test stress_test -- --nocapture
//!
//! # Run specific test
//! cargo test --release --test stress_test stress_1m_events -- --nocapture
//! ```

use std::time::Instant;

use tickbook::{HeapSide, MapSide, Order, OrderBook, OrderId, Side, SideBook, VecSide};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

/// Number of events for the 1M stress test
const STRESS_EVENT_COUNT: usize = 1_000_000;

/// Base price in ticks
const BASE_PRICE: u64 = 10_000;

/// Price band in ticks (10000..=10050, same as the benchmarks)
const PRICE_BAND: u64 = 51;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Book event
#[derive(Debug, Clone, Copy)]
enum Event {
    New(Order),
    Amend(OrderId, u64),
    Delete(OrderId),
}

/// Generate a deterministic event stream.
///
/// Roughly 60% new orders, 20% amends, 20% deletes of live orders.
/// Same seed = same events.
fn generate_deterministic_events(count: usize, seed: u64) -> Vec<Event> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut events = Vec::with_capacity(count);
    let mut live: Vec<OrderId> = Vec::new();
    let mut next_id: OrderId = 1;

    for _ in 0..count {
        let roll: u32 = rng.gen_range(0..10);
        let event = if live.is_empty() || roll < 6 {
            let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
            let price = BASE_PRICE + rng.gen_range(0..PRICE_BAND);
            let quantity = rng.gen_range(1..=100);
            live.push(next_id);
            next_id += 1;
            Event::New(Order::new(next_id - 1, side, price, quantity))
        } else if roll < 8 {
            let id = live[rng.gen_range(0..live.len())];
            Event::Amend(id, rng.gen_range(1..=100))
        } else {
            let idx = rng.gen_range(0..live.len());
            Event::Delete(live.swap_remove(idx))
        };
        events.push(event);
    }

    events
}

/// Apply events, panicking on any rejection (the generator only emits valid events)
fn replay<S: SideBook>(book: &mut OrderBook<S>, events: &[Event]) {
    for event in events {
        let result = match *event {
            Event::New(order) => book.new_order(order),
            Event::Amend(id, qty) => book.amend_order(id, qty).map(|_| ()),
            Event::Delete(id) => book.delete_order(id).map(|_| ()),
        };
        assert!(result.is_ok(), "valid event rejected: {:?} -> {:?}", event, result);
    }
}

/// Run a deterministic event sequence and return the final state root.
fn run_deterministic_sequence<S: SideBook>(seed: u64, count: usize) -> [u8; 32] {
    let events = generate_deterministic_events(count, seed);
    let mut book: OrderBook<S> = OrderBook::with_capacity(count);
    replay(&mut book, &events);
    book.compute_state_root().expect("state root")
}

fn run_and_report<S: SideBook>(events: &[Event]) -> [u8; 32] {
    let mut book: OrderBook<S> = OrderBook::with_capacity(events.len());

    let start = Instant::now();
    replay(&mut book, events);
    let elapsed = start.elapsed();

    let query_start = Instant::now();
    for i in 0..100_000 {
        let side = if i & 1 == 1 { Side::Buy } else { Side::Sell };
        assert!(!book.top_of_book(side).is_sentinel());
    }
    let query_elapsed = query_start.elapsed();

    let throughput = events.len() as f64 / elapsed.as_secs_f64();
    let top_ns = query_elapsed.as_nanos() as f64 / 100_000.0;
    let state_root = book.compute_state_root().expect("state root");

    println!(
        "  [{:>6}] {:>10.2?}  {:>12.0} events/sec  {:>8.1} ns/top  {} orders",
        book.strategy(),
        elapsed,
        throughput,
        top_ns,
        book.len()
    );

    assert!(book.invariants_hold(), "{} invariants broken", book.strategy());
    state_root
}

// ============================================================================
// STRESS TESTS
// ============================================================================

/// Main stress test: 1 million mixed events on every strategy.
///
/// # Verification
/// - No rejection of a valid event
/// - Invariants hold at the end
/// - All strategies finish with the same state root
#[test]
fn stress_1m_events() {
    println!("\n=== STRESS TEST: 1 Million Events ===\n");

    let events = generate_deterministic_events(STRESS_EVENT_COUNT, 42);

    let map_root = run_and_report::<MapSide>(&events);
    let heap_root = run_and_report::<HeapSide>(&events);
    let vec_root = run_and_report::<VecSide>(&events);

    println!("\n  State root: {}", hex::encode(map_root));

    assert_eq!(map_root, heap_root, "heap strategy diverged");
    assert_eq!(map_root, vec_root, "vector strategy diverged");

    println!("\n=== STRESS TEST PASSED ===\n");
}

/// Verify determinism: same sequence produces identical state root.
#[test]
fn verify_determinism() {
    const TEST_COUNT: usize = 10_000;
    const SEED: u64 = 12345;

    let root1 = run_deterministic_sequence::<MapSide>(SEED, TEST_COUNT);
    let root2 = run_deterministic_sequence::<MapSide>(SEED, TEST_COUNT);
    assert_eq!(root1, root2, "State roots must match for determinism");

    // Strategy must not matter
    assert_eq!(root1, run_deterministic_sequence::<HeapSide>(SEED, TEST_COUNT));
    assert_eq!(root1, run_deterministic_sequence::<VecSide>(SEED, TEST_COUNT));

    // Different seeds should produce different roots
    let root3 = run_deterministic_sequence::<MapSide>(SEED + 1, TEST_COUNT);
    assert_ne!(root1, root3, "Different seeds should produce different roots");
}

/// Heap strategy under adversarial cancellation: a fresh best bid appears
/// above a resting floor and is cancelled before the next query.
#[test]
fn stress_heap_cancellation_churn() {
    const ROUNDS: u64 = 200_000;

    let mut book: OrderBook<HeapSide> = OrderBook::with_capacity(1_024);
    book.new_order(Order::buy(0, BASE_PRICE, 10)).unwrap();

    for i in 1..=ROUNDS {
        book.new_order(Order::buy(i, BASE_PRICE + i, 1)).unwrap();
        assert_eq!(book.top_of_book(Side::Buy).price(), BASE_PRICE + i);
        book.delete_order(i).unwrap();
        assert_eq!(book.top_of_book(Side::Buy).price(), BASE_PRICE);
    }

    let bids = book.side(Side::Buy);
    assert_eq!(bids.purged_count(), ROUNDS);
    assert_eq!(bids.candidate_count(), 1);
}

/// Emptied levels are retained until compacted.
#[test]
fn stress_level_retention_and_compaction() {
    const ROUNDS: u64 = 50_000;

    let mut book: OrderBook<MapSide> = OrderBook::with_capacity(1_024);
    for i in 0..ROUNDS {
        book.new_order(Order::sell(i, BASE_PRICE + i, 1)).unwrap();
        book.delete_order(i).unwrap();
    }

    assert!(book.is_empty());
    assert_eq!(book.level_count(Side::Sell), ROUNDS as usize);

    assert_eq!(book.compact(), ROUNDS as usize);
    assert_eq!(book.level_count(Side::Sell), 0);
    assert!(book.top_of_book(Side::Sell).is_sentinel());
}
