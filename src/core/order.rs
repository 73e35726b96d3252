use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-order volume in indivisible units.
///
/// Cumulative totals across a whole side are carried in `u128` by the
/// clearing walk, so sums of `u64` order volumes cannot overflow for any
/// input a caller can physically produce.
pub type Volume = u64;

/// Which side of the book an order sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    Ask,
    Bid,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ask => write!(f, "ASK"),
            Self::Bid => write!(f, "BID"),
        }
    }
}

/// A limit order: an offer to trade up to `volume` units at `price` or better.
///
/// The price domain `P` is opaque to the engine. No arithmetic is ever
/// performed on it; every comparison goes through the caller-supplied
/// strict `less` predicate. Floating-point prices (including negative
/// values and the infinities), exact decimals, and integer ticks are all
/// equally valid domains.
///
/// A `volume` of zero is legal. Zero-volume orders are admitted by the
/// clearing walk like any other order and can shift the selected price
/// and range without contributing volume.
///
/// # Examples
///
/// ```
/// use call_auction::core::order::Order;
///
/// let ask = Order::new(50.0, 100);
/// let bid = Order::from((80.0, 60));
/// assert_eq!(ask.volume, 100);
/// assert!(ask.price < bid.price);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order<P> {
    /// Limit price.
    pub price: P,
    /// Volume on offer. May be zero.
    pub volume: Volume,
}

impl<P> Order<P> {
    /// Create a new limit order.
    pub fn new(price: P, volume: Volume) -> Self {
        Self { price, volume }
    }
}

impl<P> From<(P, Volume)> for Order<P> {
    fn from((price, volume): (P, Volume)) -> Self {
        Self::new(price, volume)
    }
}

impl<P: fmt::Display> fmt::Display for Order<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.volume, self.price)
    }
}
