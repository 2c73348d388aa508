//! tickbook - demo binary
//!
//! Replays a short fixed event stream against each side storage strategy and
//! prints top of book and the resulting state root. Identical roots across
//! strategies are the quickest smoke check that they agree.
//!
//! Set `RUST_LOG=tickbook=debug` (or `trace`) to see rejections and heap purges.

use tickbook::{
    BookError, HeapOrderBook, MapOrderBook, Order, OrderBook, Side, SideBook, VecOrderBook,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn replay<S: SideBook>(mut book: OrderBook<S>) -> tickbook::Result<String> {
    let events = [
        Order::sell(1, 10_000, 5),
        Order::sell(2, 10_001, 3),
        Order::buy(3, 9_999, 10),
        Order::buy(4, 9_998, 2),
    ];
    for order in events {
        book.new_order(order)?;
    }

    book.amend_order(3, 7)?;
    book.delete_order(1)?;

    // Rejections are reported, not fatal
    if let Err(err) = book.amend_order(999, 5) {
        warn!(strategy = book.strategy(), %err, "expected rejection");
    }

    let bid = book.top_of_book(Side::Buy);
    let ask = book.top_of_book(Side::Sell);
    let digest = book.digest()?;

    println!(
        "  [{:>6}] best bid: {} x {} ({} orders)",
        book.strategy(),
        bid.price(),
        bid.total_quantity(),
        bid.order_count()
    );
    println!(
        "  [{:>6}] best ask: {} x {} ({} orders)",
        book.strategy(),
        ask.price(),
        ask.total_quantity(),
        ask.order_count()
    );
    println!(
        "  [{:>6}] state root: {}",
        book.strategy(),
        digest.state_root_hex()
    );

    Ok(digest.state_root_hex())
}

fn main() -> Result<(), BookError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tickbook=info")),
        )
        .init();

    println!("===========================================");
    println!("  tickbook - price-level order book");
    println!("===========================================");
    println!();

    let roots = [
        replay(MapOrderBook::with_capacity(64))?,
        replay(HeapOrderBook::with_capacity(64))?,
        replay(VecOrderBook::with_capacity(64))?,
    ];

    println!();
    if roots.iter().all(|root| *root == roots[0]) {
        info!("all strategies agree");
        println!("All strategies produced the same state root.");
    } else {
        warn!(?roots, "strategies disagree");
        println!("Strategies DISAGREE - see state roots above.");
    }

    Ok(())
}
