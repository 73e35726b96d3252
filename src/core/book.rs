use crate::clearing::uniform::{self, Execution, RangeExecution};
use crate::core::order::{Order, Side};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for an order resting in a [`Book`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an id from a specific UUID (useful for testing / determinism).
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Violations of the ordering contract the clearing engine trusts.
#[derive(Debug, Error)]
pub enum BookError {
    #[error("ask at index {index} is priced below its predecessor")]
    AsksUnsorted { index: usize },
    #[error("bid at index {index} is priced above its predecessor")]
    BidsUnsorted { index: usize },
}

/// An order together with the id it was assigned on entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookEntry<P> {
    pub id: OrderId,
    pub order: Order<P>,
}

/// Both sides of one trading pair's book, collected ahead of a clearing run.
///
/// The clearing engine itself only consumes iterators; this container is
/// the convenience layer that collects orders in arrival order, sorts each
/// side into the contract the engine trusts (asks non-descending, bids
/// non-ascending, arrival order breaking price ties), and forwards to the
/// engine.
///
/// # Examples
///
/// ```
/// use call_auction::prelude::*;
///
/// let mut book = Book::new();
/// book.add_ask(Order::new(50.0, 100));
/// book.add_bid(Order::new(100.0, 60));
/// book.add_bid(Order::new(90.0, 60));
/// book.sort(|a, b| a < b);
///
/// let execution = book.clear(|a, b| a < b).unwrap();
/// assert_eq!(execution.volume, 100);
/// assert_eq!(execution.price, 90.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book<P> {
    asks: Vec<BookEntry<P>>,
    bids: Vec<BookEntry<P>>,
}

impl<P> Book<P> {
    pub fn new() -> Self {
        Self {
            asks: Vec::new(),
            bids: Vec::new(),
        }
    }

    /// Add a sell order. Returns the id assigned to it.
    pub fn add_ask(&mut self, order: Order<P>) -> OrderId {
        let id = OrderId::generate();
        self.asks.push(BookEntry { id, order });
        id
    }

    /// Add a buy order. Returns the id assigned to it.
    pub fn add_bid(&mut self, order: Order<P>) -> OrderId {
        let id = OrderId::generate();
        self.bids.push(BookEntry { id, order });
        id
    }

    /// Add an order on the given side.
    pub fn add(&mut self, side: Side, order: Order<P>) -> OrderId {
        match side {
            Side::Ask => self.add_ask(order),
            Side::Bid => self.add_bid(order),
        }
    }

    pub fn asks(&self) -> &[BookEntry<P>] {
        &self.asks
    }

    pub fn bids(&self) -> &[BookEntry<P>] {
        &self.bids
    }

    /// Total number of orders on both sides.
    pub fn len(&self) -> usize {
        self.asks.len() + self.bids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.asks.is_empty() && self.bids.is_empty()
    }

    /// Sort both sides into clearing order: asks non-descending by price,
    /// bids non-ascending. The sort is stable, so orders at equal prices
    /// keep their arrival order.
    pub fn sort<F>(&mut self, less: F)
    where
        F: Fn(&P, &P) -> bool,
    {
        self.asks
            .sort_by(|a, b| ordering(&less, &a.order.price, &b.order.price));
        self.bids
            .sort_by(|a, b| ordering(&less, &b.order.price, &a.order.price));
    }

    /// Verify the ordering contract, reporting the first offending index.
    ///
    /// The clearing engine trusts its callers and does not run this check
    /// itself; it is available for debug assertions and for validating
    /// externally supplied books.
    pub fn ensure_sorted<F>(&self, less: F) -> Result<(), BookError>
    where
        F: Fn(&P, &P) -> bool,
    {
        for (index, pair) in self.asks.windows(2).enumerate() {
            if less(&pair[1].order.price, &pair[0].order.price) {
                return Err(BookError::AsksUnsorted { index: index + 1 });
            }
        }
        for (index, pair) in self.bids.windows(2).enumerate() {
            if less(&pair[0].order.price, &pair[1].order.price) {
                return Err(BookError::BidsUnsorted { index: index + 1 });
            }
        }
        Ok(())
    }

    /// Run the uniform-price clearing over this book.
    ///
    /// Both sides must already be in clearing order (see [`Book::sort`]).
    pub fn clear<F>(&self, less: F) -> Option<Execution<P>>
    where
        P: Clone,
        F: Fn(&P, &P) -> bool,
    {
        debug_assert!(self.ensure_sorted(&less).is_ok());
        uniform::clear(
            self.asks.iter().map(|entry| entry.order.clone()),
            self.bids.iter().map(|entry| entry.order.clone()),
            less,
        )
    }

    /// Run the clearing and report the full optimal price range.
    ///
    /// Both sides must already be in clearing order (see [`Book::sort`]).
    pub fn clear_range<F>(&self, less: F) -> Option<RangeExecution<P>>
    where
        P: Clone,
        F: Fn(&P, &P) -> bool,
    {
        debug_assert!(self.ensure_sorted(&less).is_ok());
        uniform::clear_range(
            self.asks.iter().map(|entry| entry.order.clone()),
            self.bids.iter().map(|entry| entry.order.clone()),
            less,
        )
    }

    /// Total resting volume on one side.
    pub fn side_volume(&self, side: Side) -> u128 {
        let entries = match side {
            Side::Ask => &self.asks,
            Side::Bid => &self.bids,
        };
        entries
            .iter()
            .map(|entry| u128::from(entry.order.volume))
            .sum()
    }
}

impl<P> Default for Book<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> FromIterator<(Side, Order<P>)> for Book<P> {
    fn from_iter<T: IntoIterator<Item = (Side, Order<P>)>>(iter: T) -> Self {
        let mut book = Self::new();
        for (side, order) in iter {
            book.add(side, order);
        }
        book
    }
}

/// Strict-less lifted to a total ordering, with incomparable treated as equal.
fn ordering<P, F>(less: &F, a: &P, b: &P) -> Ordering
where
    F: Fn(&P, &P) -> bool,
{
    if less(a, b) {
        Ordering::Less
    } else if less(b, a) {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}
