//! Basic uniform-price clearing example.
//!
//! Demonstrates how the engine finds the volume-maximising price of a
//! small book and how the cleared volume is distributed over orders.

use call_auction::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn dec_less(a: &Decimal, b: &Decimal) -> bool {
    a < b
}

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  call-auction: Basic Clearing Example    ║");
    println!("╚══════════════════════════════════════════╝\n");

    // --- Scenario 1: A balanced cross ---
    println!("━━━ Scenario 1: Balanced Cross ━━━\n");

    let mut book = Book::new();
    book.add_ask(Order::new(dec!(50), 100));
    book.add_ask(Order::new(dec!(60), 100));
    book.add_ask(Order::new(dec!(70), 100));
    book.add_bid(Order::new(dec!(100), 100));
    book.add_bid(Order::new(dec!(90), 100));
    book.add_bid(Order::new(dec!(80), 100));
    book.sort(dec_less);

    let execution = book.clear(dec_less).expect("book crosses");
    let ranged = book.clear_range(dec_less).expect("book crosses");

    println!("Cleared:        {}", execution);
    println!("Optimal range:  {}", ranged.range);
    println!();

    println!("Fills:");
    for fill in allocate(&book, &execution, dec_less) {
        println!("  {}", fill);
    }
    println!();

    // --- Scenario 2: One ask against a ladder of bids ---
    println!("━━━ Scenario 2: Bid Ladder with a Partial Fill ━━━\n");

    let mut book = Book::new();
    book.add_ask(Order::new(dec!(20), 100));
    for price in [100, 90, 80, 70, 60, 50, 40] {
        book.add_bid(Order::new(Decimal::from(price), 20));
    }
    book.sort(dec_less);

    let execution = book.clear(dec_less).expect("book crosses");
    let ranged = book.clear_range(dec_less).expect("book crosses");

    println!("Cleared:        {}", execution);
    println!("Optimal range:  {}", ranged.range);
    println!();

    println!("Fills:");
    for fill in allocate(&book, &execution, dec_less) {
        println!("  {}", fill);
    }
    println!();

    // --- Scenario 3: Nothing crosses ---
    println!("━━━ Scenario 3: Gapped Book ━━━\n");

    let mut book = Book::new();
    book.add_ask(Order::new(dec!(80), 100));
    book.add_bid(Order::new(dec!(70), 100));
    book.sort(dec_less);

    match book.clear(dec_less) {
        Some(execution) => println!("Cleared: {}", execution),
        None => println!("No match: best bid sits below best ask."),
    }
}
