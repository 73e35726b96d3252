use crate::clearing::walk;
use crate::core::order::Order;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A cleared execution: the uniform price and the matched volume.
///
/// Every matched order on either side settles at `price`, whatever its own
/// limit was. `volume` is always at least 1; a book in which nothing can
/// cross produces no `Execution` at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Execution<P> {
    pub price: P,
    pub volume: u128,
}

/// Closed interval of prices at which the maximum volume clears.
///
/// `low` never exceeds `high` under the comparator the clearing ran with,
/// and both endpoints are prices of orders the walk admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange<P> {
    pub low: P,
    pub high: P,
}

/// A cleared execution reported with its full optimal price range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeExecution<P> {
    pub range: PriceRange<P>,
    pub volume: u128,
}

impl<P: fmt::Display> fmt::Display for Execution<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.volume, self.price)
    }
}

impl<P: fmt::Display> fmt::Display for PriceRange<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}

impl<P: fmt::Display> fmt::Display for RangeExecution<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.volume, self.range)
    }
}

/// Clear one pair of presorted order streams at a single uniform price.
///
/// `asks` must be non-descending and `bids` non-ascending under `less`,
/// a strict comparator on the price domain; the engine trusts that
/// contract and consults nothing else about prices. Each order is pulled
/// at most once and the pass uses constant extra memory.
///
/// The selected price maximises the matched volume. When the walk ends
/// with bid volume above ask volume, the ask side is the binding
/// constraint and the price is the last admitted bid's; otherwise it is
/// the last admitted ask's. `None` means no positive volume can cross:
/// an empty side, a gap between best bid and best ask, or volumes that
/// never overlap all report the same way.
///
/// # Examples
///
/// ```
/// use call_auction::prelude::*;
///
/// let asks = [(50.0, 100), (60.0, 100), (70.0, 100)].map(Order::from);
/// let bids = [(100.0, 100), (90.0, 100), (80.0, 100)].map(Order::from);
///
/// let execution = clear(asks, bids, |a, b| a < b).unwrap();
/// assert_eq!(execution.price, 70.0);
/// assert_eq!(execution.volume, 300);
/// ```
pub fn clear<P, A, B, F>(asks: A, bids: B, less: F) -> Option<Execution<P>>
where
    P: Clone,
    A: IntoIterator<Item = Order<P>>,
    B: IntoIterator<Item = Order<P>>,
    F: Fn(&P, &P) -> bool,
{
    let state = walk::run(asks.into_iter(), bids.into_iter(), &less)?;
    let volume = state.ask_volume.min(state.bid_volume);
    if volume == 0 {
        return None;
    }
    let price = if state.bid_volume > state.ask_volume {
        state.bid_price?
    } else {
        state.ask_price
    };
    Some(Execution { price, volume })
}

/// Clear one pair of presorted order streams and report the whole closed
/// price interval over which the maximum volume is achievable.
///
/// Same input contract as [`clear`]. The low endpoint is the last
/// admitted ask's price and the high endpoint the outermost admitted bid
/// whose volume the cleared total draws on; [`clear`]'s price always lies
/// within the interval, and the two entry points agree on volume and on
/// when no match exists.
///
/// # Examples
///
/// ```
/// use call_auction::prelude::*;
///
/// let asks = [(20.0, 100)].map(Order::from);
/// let bids = [
///     (100.0, 20), (90.0, 20), (80.0, 20), (70.0, 20),
///     (60.0, 20), (50.0, 20), (40.0, 20),
/// ]
/// .map(Order::from);
///
/// let result = clear_range(asks, bids, |a, b| a < b).unwrap();
/// assert_eq!(result.volume, 100);
/// assert_eq!((result.range.low, result.range.high), (20.0, 60.0));
/// ```
pub fn clear_range<P, A, B, F>(asks: A, bids: B, less: F) -> Option<RangeExecution<P>>
where
    P: Clone,
    A: IntoIterator<Item = Order<P>>,
    B: IntoIterator<Item = Order<P>>,
    F: Fn(&P, &P) -> bool,
{
    let state = walk::run(asks.into_iter(), bids.into_iter(), &less)?;
    let volume = state.ask_volume.min(state.bid_volume);
    if volume == 0 {
        return None;
    }
    let high = state.range_bid?;
    Some(RangeExecution {
        range: PriceRange {
            low: state.ask_price,
            high,
        },
        volume,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orders(pairs: &[(f64, u64)]) -> Vec<Order<f64>> {
        pairs.iter().map(|&(p, v)| Order::new(p, v)).collect()
    }

    fn lt(a: &f64, b: &f64) -> bool {
        a < b
    }

    #[test]
    fn test_balanced_cross_prices_at_last_ask() {
        let execution = clear(
            orders(&[(50.0, 100), (60.0, 100)]),
            orders(&[(100.0, 100), (90.0, 100)]),
            lt,
        )
        .unwrap();
        assert_eq!(execution.price, 60.0);
        assert_eq!(execution.volume, 200);
    }

    #[test]
    fn test_bid_overshoot_prices_at_last_bid() {
        let execution = clear(
            orders(&[(50.0, 100)]),
            orders(&[(100.0, 60), (90.0, 60), (80.0, 60)]),
            lt,
        )
        .unwrap();
        assert_eq!(execution.price, 90.0);
        assert_eq!(execution.volume, 100);
    }

    #[test]
    fn test_empty_sides_never_match() {
        assert!(clear(orders(&[]), orders(&[(10.0, 5)]), lt).is_none());
        assert!(clear(orders(&[(10.0, 5)]), orders(&[]), lt).is_none());
        assert!(clear_range(orders(&[]), orders(&[]), lt).is_none());
    }

    #[test]
    fn test_zero_volume_overlap_is_no_match() {
        assert!(clear(orders(&[(10.0, 0)]), orders(&[(20.0, 0)]), lt).is_none());
        assert!(clear_range(orders(&[(10.0, 0)]), orders(&[(20.0, 0)]), lt).is_none());
    }

    #[test]
    fn test_integer_price_domain() {
        let asks: Vec<Order<u64>> = vec![Order::new(5, 10), Order::new(7, 10)];
        let bids: Vec<Order<u64>> = vec![Order::new(9, 10), Order::new(8, 10)];
        let execution = clear(asks, bids, |a, b| a < b).unwrap();
        assert_eq!(execution.price, 7);
        assert_eq!(execution.volume, 20);
    }

    #[test]
    fn test_infinite_prices_are_ordinary_values() {
        let asks = orders(&[(f64::NEG_INFINITY, 10), (-20.0, 10), (f64::INFINITY, 10)]);
        let bids = orders(&[(f64::INFINITY, 10), (-20.0, 10), (f64::NEG_INFINITY, 10)]);
        let execution = clear(asks.clone(), bids.clone(), lt).unwrap();
        assert_eq!(execution.price, -20.0);
        assert_eq!(execution.volume, 20);

        let ranged = clear_range(asks, bids, lt).unwrap();
        assert_eq!((ranged.range.low, ranged.range.high), (-20.0, -20.0));
        assert_eq!(ranged.volume, 20);
    }

    #[test]
    fn test_display_formats() {
        let execution = Execution { price: 70, volume: 300u128 };
        assert_eq!(format!("{}", execution), "300 @ 70");
        let ranged = RangeExecution {
            range: PriceRange { low: 70, high: 80 },
            volume: 300u128,
        };
        assert_eq!(format!("{}", ranged), "300 @ [70, 80]");
    }
}
