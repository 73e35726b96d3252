//! Price-domain polymorphism example.
//!
//! The engine never does arithmetic on prices; everything goes through
//! the injected strict-less comparator. This demo clears the same shape
//! of book over three different price domains.

use call_auction::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  call-auction: Price Domain Examples     ║");
    println!("╚══════════════════════════════════════════╝\n");

    // --- Floating point, infinities included ---
    println!("━━━ f64 prices (market-style extremes) ━━━\n");

    let asks = [
        (f64::NEG_INFINITY, 10),
        (-20.0, 10),
        (f64::INFINITY, 10),
    ]
    .map(Order::from);
    let bids = [
        (f64::INFINITY, 10),
        (-20.0, 10),
        (f64::NEG_INFINITY, 10),
    ]
    .map(Order::from);

    match clear_range(asks, bids, |a, b| a < b) {
        Some(result) => println!("Cleared {}\n", result),
        None => println!("No match.\n"),
    }

    // --- Exact decimals ---
    println!("━━━ Decimal prices ━━━\n");

    let asks = [dec!(50.25), dec!(60.50)].map(|price| Order::new(price, 100));
    let bids = [dec!(99.99), dec!(75.00)].map(|price| Order::new(price, 100));

    match clear(asks, bids, |a: &Decimal, b: &Decimal| a < b) {
        Some(execution) => println!("Cleared {}\n", execution),
        None => println!("No match.\n"),
    }

    // --- Integer ticks ---
    println!("━━━ Integer tick prices ━━━\n");

    let asks = [(5u64, 10), (15, 10), (25, 10)].map(Order::from);
    let bids = [(30u64, 15), (20, 10), (10, 10)].map(Order::from);

    match clear_range(asks, bids, |a, b| a < b) {
        Some(result) => println!("Cleared {}", result),
        None => println!("No match."),
    }
}
