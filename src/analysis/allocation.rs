use crate::clearing::uniform::Execution;
use crate::core::book::{Book, OrderId};
use crate::core::order::{Side, Volume};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One order's share of a cleared execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fill {
    pub order: OrderId,
    pub side: Side,
    /// Units this order trades at the uniform price.
    pub filled: Volume,
    /// Units left unmatched on this order.
    pub remaining: Volume,
}

impl Fill {
    pub fn is_partial(&self) -> bool {
        self.remaining > 0
    }
}

impl fmt::Display for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} filled {} (remaining {})",
            self.side, self.order, self.filled, self.remaining
        )
    }
}

/// Distribute a cleared execution over the orders of a sorted [`Book`].
///
/// Price priority on both sides: asks fill from the lowest price up, bids
/// from the highest price down, and the book's stable sort means arrival
/// order breaks ties at equal prices. Only orders priced at or better
/// than the uniform price are eligible, the volumes filled on each side
/// both sum to the execution's volume, and at most the last order on each
/// side is partial. Orders that receive nothing do not appear.
///
/// # Examples
///
/// ```
/// use call_auction::prelude::*;
///
/// let mut book = Book::new();
/// book.add_ask(Order::new(5, 10));
/// book.add_ask(Order::new(15, 10));
/// book.add_ask(Order::new(25, 10));
/// book.add_bid(Order::new(30, 15));
/// book.add_bid(Order::new(20, 10));
/// book.add_bid(Order::new(10, 10));
/// book.sort(|a, b| a < b);
///
/// let execution = book.clear(|a, b| a < b).unwrap();
/// let fills = allocate(&book, &execution, |a, b| a < b);
///
/// let ask_total: u64 = fills
///     .iter()
///     .filter(|fill| fill.side == Side::Ask)
///     .map(|fill| fill.filled)
///     .sum();
/// assert_eq!(u128::from(ask_total), execution.volume);
/// ```
pub fn allocate<P, F>(book: &Book<P>, execution: &Execution<P>, less: F) -> Vec<Fill>
where
    F: Fn(&P, &P) -> bool,
{
    let mut fills = Vec::new();

    let mut budget = execution.volume;
    for entry in book.asks() {
        if budget == 0 || less(&execution.price, &entry.order.price) {
            // Asks are non-descending: every later ask is also above the
            // uniform price.
            break;
        }
        let take = u128::from(entry.order.volume).min(budget);
        if take == 0 {
            continue;
        }
        budget -= take;
        // take is bounded by a u64 order volume.
        let filled = take as Volume;
        fills.push(Fill {
            order: entry.id,
            side: Side::Ask,
            filled,
            remaining: entry.order.volume - filled,
        });
    }

    let mut budget = execution.volume;
    for entry in book.bids() {
        if budget == 0 || less(&entry.order.price, &execution.price) {
            break;
        }
        let take = u128::from(entry.order.volume).min(budget);
        if take == 0 {
            continue;
        }
        budget -= take;
        let filled = take as Volume;
        fills.push(Fill {
            order: entry.id,
            side: Side::Bid,
            filled,
            remaining: entry.order.volume - filled,
        });
    }

    fills
}
