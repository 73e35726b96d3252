use crate::core::order::Order;

/// Terminal state of the crossing walk over one pair of order streams.
///
/// Everything both result forms need is captured here: the two price
/// frontiers, the cumulative admitted volumes, and the bid-side endpoint
/// of the optimal price interval.
#[derive(Debug, Clone)]
pub(crate) struct WalkState<P> {
    /// Price of the most recently admitted ask: the ask-side frontier and
    /// the low endpoint of the optimal price interval.
    pub ask_price: P,
    /// Price of the most recently admitted bid, if any was admitted.
    pub bid_price: Option<P>,
    /// Bid-side endpoint of the optimal price interval: the last admitted
    /// bid whose volume the cleared total still draws on.
    pub range_bid: Option<P>,
    /// Cumulative volume of admitted asks.
    pub ask_volume: u128,
    /// Cumulative volume of admitted bids.
    pub bid_volume: u128,
}

/// Coordinated two-pointer walk over the ask and bid streams.
///
/// Asks must be non-descending and bids non-ascending in price; the walk
/// trusts that contract. Each element is pulled at most once and nothing
/// is buffered, so the walk runs in one pass with constant extra memory.
///
/// # Algorithm
///
/// 1. Pull the first ask; an empty ask stream means no state at all.
/// 2. For each bid: stop if it is priced strictly below the ask frontier;
///    otherwise admit it, then pull asks while cumulative ask volume lags
///    cumulative bid volume, stopping the whole walk when the ask stream
///    runs dry or the next ask is priced strictly above the admitting bid.
/// 3. The loop-head invariant `ask_volume >= bid_volume` holds before each
///    bid is admitted; only the final bid may leave it violated.
///
/// The bid-side range endpoint is recorded when a bid verifiably joins the
/// cleared total: immediately when admitted under a strict invariant
/// (cumulative asks already exceed cumulative bids), and otherwise only
/// once the inner loop admits actual ask volume on top of the pre-bid ask
/// total. A bid that arrives at balanced volumes and is never re-covered
/// by ask volume stays outside the interval.
pub(crate) fn run<P, A, B, F>(mut asks: A, mut bids: B, less: &F) -> Option<WalkState<P>>
where
    P: Clone,
    A: Iterator<Item = Order<P>>,
    B: Iterator<Item = Order<P>>,
    F: Fn(&P, &P) -> bool,
{
    let first = asks.next()?;
    let mut state = WalkState {
        ask_price: first.price,
        bid_price: None,
        range_bid: None,
        ask_volume: u128::from(first.volume),
        bid_volume: 0,
    };

    'walk: while let Some(bid) = bids.next() {
        if less(&bid.price, &state.ask_price) {
            // The best remaining bid is below the ask frontier; nothing
            // further can cross.
            break;
        }

        let covered = state.ask_volume > state.bid_volume;
        let asks_before = state.ask_volume;
        state.bid_volume += u128::from(bid.volume);
        state.bid_price = Some(bid.price.clone());
        if covered {
            state.range_bid = Some(bid.price.clone());
        }

        while state.ask_volume < state.bid_volume {
            let Some(ask) = asks.next() else {
                break 'walk;
            };
            if less(&bid.price, &ask.price) {
                break 'walk;
            }
            state.ask_price = ask.price;
            state.ask_volume += u128::from(ask.volume);
            if !covered && state.ask_volume > asks_before {
                state.range_bid = Some(bid.price.clone());
            }
        }
    }

    Some(state)
}
