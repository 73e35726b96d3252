use crate::core::book::Book;
use crate::core::order::Order;

/// Cumulative depth of one book: the supply and demand step functions.
///
/// Supply at a price `p` is the total ask volume offered at prices at or
/// below `p`; demand is the total bid volume sought at prices at or above
/// `p`. The volume executable at `p` is the smaller of the two, and the
/// uniform clearing price maximises exactly that quantity. The curve is
/// the independent, brute-force view of the same book the one-pass walk
/// clears, which makes it useful both as a diagnostic and as an oracle
/// when validating clearing results.
///
/// # Examples
///
/// ```
/// use call_auction::analysis::depth::DepthCurve;
/// use call_auction::core::order::Order;
///
/// let curve = DepthCurve::from_sides(
///     [(50, 100), (60, 100)].map(Order::from),
///     [(90, 100), (80, 100)].map(Order::from),
/// );
/// let lt = |a: &i32, b: &i32| a < b;
/// assert_eq!(curve.supply_at(&55, &lt), 100);
/// assert_eq!(curve.demand_at(&55, &lt), 200);
/// assert_eq!(curve.max_executable(&lt), 200);
/// ```
#[derive(Debug, Clone)]
pub struct DepthCurve<P> {
    /// Ascending prices with cumulative ask volume at or below each.
    asks: Vec<(P, u128)>,
    /// Descending prices with cumulative bid volume at or above each.
    bids: Vec<(P, u128)>,
}

impl<P> DepthCurve<P> {
    /// Build the curve from sides already in clearing order (asks
    /// non-descending, bids non-ascending).
    pub fn from_sides<A, B>(asks: A, bids: B) -> Self
    where
        A: IntoIterator<Item = Order<P>>,
        B: IntoIterator<Item = Order<P>>,
    {
        let mut cumulative = 0u128;
        let asks = asks
            .into_iter()
            .map(|order| {
                cumulative += u128::from(order.volume);
                (order.price, cumulative)
            })
            .collect();
        let mut cumulative = 0u128;
        let bids = bids
            .into_iter()
            .map(|order| {
                cumulative += u128::from(order.volume);
                (order.price, cumulative)
            })
            .collect();
        Self { asks, bids }
    }

    /// Build the curve from a sorted [`Book`].
    pub fn from_book(book: &Book<P>) -> Self
    where
        P: Clone,
    {
        Self::from_sides(
            book.asks().iter().map(|entry| entry.order.clone()),
            book.bids().iter().map(|entry| entry.order.clone()),
        )
    }

    /// Lowest ask price, if any asks exist.
    pub fn best_ask(&self) -> Option<&P> {
        self.asks.first().map(|(price, _)| price)
    }

    /// Highest bid price, if any bids exist.
    pub fn best_bid(&self) -> Option<&P> {
        self.bids.first().map(|(price, _)| price)
    }

    /// Total ask volume at prices at or below `price`.
    pub fn supply_at<F>(&self, price: &P, less: &F) -> u128
    where
        F: Fn(&P, &P) -> bool,
    {
        let mut total = 0;
        for (ask, cumulative) in &self.asks {
            if less(price, ask) {
                break;
            }
            total = *cumulative;
        }
        total
    }

    /// Total bid volume at prices at or above `price`.
    pub fn demand_at<F>(&self, price: &P, less: &F) -> u128
    where
        F: Fn(&P, &P) -> bool,
    {
        let mut total = 0;
        for (bid, cumulative) in &self.bids {
            if less(bid, price) {
                break;
            }
            total = *cumulative;
        }
        total
    }

    /// Volume executable at `price`: the smaller of supply and demand.
    pub fn executable_at<F>(&self, price: &P, less: &F) -> u128
    where
        F: Fn(&P, &P) -> bool,
    {
        self.supply_at(price, less).min(self.demand_at(price, less))
    }

    /// The maximum executable volume over all prices.
    ///
    /// Supply only steps up at ask prices and demand only steps down just
    /// past bid prices, so the maximum of their pointwise minimum is
    /// always attained at some order's price; scanning the order prices
    /// is exhaustive. Quadratic in book size, which is fine for a
    /// diagnostic; the clearing walk finds the same value in one pass.
    pub fn max_executable<F>(&self, less: &F) -> u128
    where
        F: Fn(&P, &P) -> bool,
    {
        let candidates = self
            .asks
            .iter()
            .chain(self.bids.iter())
            .map(|(price, _)| price);
        candidates
            .map(|price| self.executable_at(price, less))
            .max()
            .unwrap_or(0)
    }
}
