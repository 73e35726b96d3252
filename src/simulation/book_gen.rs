//! Random book generation for the clearing engine.
//!
//! Produces order books with configurable depth and price dispersion to
//! exercise the clearing walk under load in benches and from the CLI.

use crate::core::book::Book;
use crate::core::order::{Order, Volume};
use rand::Rng;
use rust_decimal::Decimal;

/// Configuration for generating a random order book.
#[derive(Debug, Clone)]
pub struct BookConfig {
    /// Number of sell orders.
    pub ask_count: usize,
    /// Number of buy orders.
    pub bid_count: usize,
    /// Lowest price either side may quote.
    pub min_price: Decimal,
    /// Highest price either side may quote.
    pub max_price: Decimal,
    /// Smallest order volume. Zero is allowed, and the default keeps it
    /// at zero so that empty orders show up in generated books.
    pub min_volume: Volume,
    /// Largest order volume.
    pub max_volume: Volume,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            ask_count: 100,
            bid_count: 100,
            min_price: Decimal::ONE,
            max_price: Decimal::from(1_000),
            min_volume: 0,
            max_volume: 1_000,
        }
    }
}

/// Generate a random order book.
///
/// Orders are returned in arrival order; callers sort before clearing.
pub fn generate_random_book(config: &BookConfig) -> Book<Decimal> {
    let mut rng = rand::thread_rng();
    let mut book = Book::new();

    let min_price: f64 = config.min_price.to_string().parse().unwrap_or(1.0);
    let max_price: f64 = config.max_price.to_string().parse().unwrap_or(1_000.0);

    let random_price = |rng: &mut rand::rngs::ThreadRng| {
        let raw = rng.gen_range(min_price..=max_price);
        Decimal::from_f64_retain(raw).unwrap_or(Decimal::ONE).round_dp(2)
    };

    for _ in 0..config.ask_count {
        let price = random_price(&mut rng);
        let volume = rng.gen_range(config.min_volume..=config.max_volume);
        book.add_ask(Order::new(price, volume));
    }
    for _ in 0..config.bid_count {
        let price = random_price(&mut rng);
        let volume = rng.gen_range(config.min_volume..=config.max_volume);
        book.add_bid(Order::new(price, volume));
    }

    book
}
