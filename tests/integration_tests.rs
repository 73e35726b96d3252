use call_auction::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn orders(pairs: &[(f64, u64)]) -> Vec<Order<f64>> {
    pairs.iter().map(|&(price, volume)| Order::new(price, volume)).collect()
}

fn lt(a: &f64, b: &f64) -> bool {
    a < b
}

fn dec_less(a: &Decimal, b: &Decimal) -> bool {
    a < b
}

#[test]
fn one_ask_absorbs_a_ladder_of_bids() {
    let asks = &[(20.0, 100)];
    let bids = &[
        (100.0, 20),
        (90.0, 20),
        (80.0, 20),
        (70.0, 20),
        (60.0, 20),
        (50.0, 20),
        (40.0, 20),
    ];

    let execution = clear(orders(asks), orders(bids), lt).unwrap();
    assert_eq!((execution.price, execution.volume), (50.0, 100));

    let ranged = clear_range(orders(asks), orders(bids), lt).unwrap();
    assert_eq!((ranged.range.low, ranged.range.high), (20.0, 60.0));
    assert_eq!(ranged.volume, 100);
}

#[test]
fn overshooting_bids_price_at_the_last_admitted_bid() {
    let asks = &[(50.0, 100)];
    let bids = &[(100.0, 60), (90.0, 60), (80.0, 60)];

    let execution = clear(orders(asks), orders(bids), lt).unwrap();
    assert_eq!((execution.price, execution.volume), (90.0, 100));

    let ranged = clear_range(orders(asks), orders(bids), lt).unwrap();
    assert_eq!((ranged.range.low, ranged.range.high), (50.0, 90.0));
    assert_eq!(ranged.volume, 100);
}

#[test]
fn balanced_three_level_cross_prices_at_the_last_ask() {
    let asks = &[(50.0, 100), (60.0, 100), (70.0, 100)];
    let bids = &[(100.0, 100), (90.0, 100), (80.0, 100)];

    let execution = clear(orders(asks), orders(bids), lt).unwrap();
    assert_eq!((execution.price, execution.volume), (70.0, 300));

    let ranged = clear_range(orders(asks), orders(bids), lt).unwrap();
    assert_eq!((ranged.range.low, ranged.range.high), (70.0, 80.0));
    assert_eq!(ranged.volume, 300);
}

#[test]
fn gapped_book_never_matches() {
    let asks = &[(80.0, 100), (90.0, 100), (100.0, 100)];
    let bids = &[(70.0, 100), (60.0, 100), (50.0, 100)];

    assert!(clear(orders(asks), orders(bids), lt).is_none());
    assert!(clear_range(orders(asks), orders(bids), lt).is_none());
}

#[test]
fn partially_covered_bid_sets_the_price() {
    let asks = &[(5.0, 10), (15.0, 10), (25.0, 10)];
    let bids = &[(30.0, 15), (20.0, 10), (10.0, 10)];

    let execution = clear(orders(asks), orders(bids), lt).unwrap();
    assert_eq!((execution.price, execution.volume), (20.0, 20));

    let ranged = clear_range(orders(asks), orders(bids), lt).unwrap();
    assert_eq!((ranged.range.low, ranged.range.high), (15.0, 20.0));
    assert_eq!(ranged.volume, 20);
}

#[test]
fn infinite_and_negative_prices_are_ordinary_values() {
    let asks = &[(f64::NEG_INFINITY, 10), (-20.0, 10), (f64::INFINITY, 10)];
    let bids = &[(f64::INFINITY, 10), (-20.0, 10), (f64::NEG_INFINITY, 10)];

    let execution = clear(orders(asks), orders(bids), lt).unwrap();
    assert_eq!((execution.price, execution.volume), (-20.0, 20));

    let ranged = clear_range(orders(asks), orders(bids), lt).unwrap();
    assert_eq!((ranged.range.low, ranged.range.high), (-20.0, -20.0));
    assert_eq!(ranged.volume, 20);
}

#[test]
fn unreached_zero_volume_ask_is_left_alone() {
    let asks = &[(10.0, 5), (15.0, 0)];
    let bids = &[(20.0, 5)];

    let execution = clear(orders(asks), orders(bids), lt).unwrap();
    assert_eq!((execution.price, execution.volume), (10.0, 5));

    let ranged = clear_range(orders(asks), orders(bids), lt).unwrap();
    assert_eq!((ranged.range.low, ranged.range.high), (10.0, 20.0));
    assert_eq!(ranged.volume, 5);
}

#[test]
fn admitted_zero_volume_ask_cannot_cover_the_final_bid() {
    let asks = &[(10.0, 10), (10.0, 0)];
    let bids = &[(30.0, 10), (25.0, 10)];

    let execution = clear(orders(asks), orders(bids), lt).unwrap();
    assert_eq!((execution.price, execution.volume), (25.0, 10));

    let ranged = clear_range(orders(asks), orders(bids), lt).unwrap();
    assert_eq!((ranged.range.low, ranged.range.high), (10.0, 30.0));
    assert_eq!(ranged.volume, 10);
}

#[test]
fn empty_sides_report_no_match() {
    assert!(clear(orders(&[]), orders(&[(10.0, 5)]), lt).is_none());
    assert!(clear(orders(&[(10.0, 5)]), orders(&[]), lt).is_none());
    assert!(clear(orders(&[]), orders(&[]), lt).is_none());
    assert!(clear_range(orders(&[]), orders(&[(10.0, 5)]), lt).is_none());
    assert!(clear_range(orders(&[(10.0, 5)]), orders(&[]), lt).is_none());
}

/// Full pipeline over a decimal-priced book: collect, sort, validate,
/// clear, and distribute fills.
#[test]
fn full_pipeline_decimal_book() {
    let mut book = Book::new();
    book.add_ask(Order::new(dec!(60), 100));
    book.add_ask(Order::new(dec!(50), 100));
    book.add_ask(Order::new(dec!(70), 100));
    book.add_bid(Order::new(dec!(80), 100));
    book.add_bid(Order::new(dec!(100), 100));
    book.add_bid(Order::new(dec!(90), 100));

    book.sort(dec_less);
    assert!(book.ensure_sorted(dec_less).is_ok());

    let execution = book.clear(dec_less).unwrap();
    assert_eq!(execution.price, dec!(70));
    assert_eq!(execution.volume, 300);

    let ranged = book.clear_range(dec_less).unwrap();
    assert_eq!(ranged.range.low, dec!(70));
    assert_eq!(ranged.range.high, dec!(80));
    assert_eq!(ranged.volume, 300);

    let fills = allocate(&book, &execution, dec_less);
    for side in [Side::Ask, Side::Bid] {
        let total: u128 = fills
            .iter()
            .filter(|fill| fill.side == side)
            .map(|fill| u128::from(fill.filled))
            .sum();
        assert_eq!(total, execution.volume);
    }
    assert!(fills.iter().all(|fill| !fill.is_partial()));
}

#[test]
fn book_convenience_matches_free_functions() {
    let mut book = Book::new();
    book.add_ask(Order::new(dec!(50), 100));
    book.add_bid(Order::new(dec!(100), 60));
    book.add_bid(Order::new(dec!(90), 60));
    book.add_bid(Order::new(dec!(80), 60));
    book.sort(dec_less);

    let from_book = book.clear(dec_less);
    let from_streams = clear(
        book.asks().iter().map(|entry| entry.order),
        book.bids().iter().map(|entry| entry.order),
        dec_less,
    );
    assert_eq!(from_book, from_streams);
}

#[test]
fn unsorted_book_is_reported_before_clearing() {
    let mut book = Book::new();
    book.add_ask(Order::new(dec!(70), 1));
    book.add_ask(Order::new(dec!(50), 1));
    assert!(matches!(
        book.ensure_sorted(dec_less),
        Err(BookError::AsksUnsorted { index: 1 })
    ));
}

#[test]
fn depth_curve_agrees_with_clearing() {
    let mut book = Book::new();
    book.add_ask(Order::new(dec!(5), 10));
    book.add_ask(Order::new(dec!(15), 10));
    book.add_ask(Order::new(dec!(25), 10));
    book.add_bid(Order::new(dec!(30), 15));
    book.add_bid(Order::new(dec!(20), 10));
    book.add_bid(Order::new(dec!(10), 10));
    book.sort(dec_less);

    let curve = DepthCurve::from_book(&book);
    let execution = book.clear(dec_less).unwrap();
    assert_eq!(curve.max_executable(&dec_less), execution.volume);
    assert_eq!(curve.executable_at(&execution.price, &dec_less), execution.volume);
}

/// JSON round-trip of the execution report.
#[test]
fn execution_serializes_to_json() {
    let execution = clear(
        orders(&[(50.0, 100)]),
        orders(&[(100.0, 60), (90.0, 60), (80.0, 60)]),
        lt,
    )
    .unwrap();

    let json = serde_json::to_string(&execution).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["price"], 90.0);
    assert_eq!(parsed["volume"], 100);
}

/// JSON round-trip of a whole decimal book, ids included.
#[test]
fn book_round_trips_through_json() {
    let mut book = Book::new();
    book.add_ask(Order::new(dec!(50.25), 100));
    book.add_bid(Order::new(dec!(90.75), 60));

    let json = serde_json::to_string(&book).unwrap();
    let restored: Book<Decimal> = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.asks().len(), 1);
    assert_eq!(restored.bids().len(), 1);
    assert_eq!(restored.asks()[0].id, book.asks()[0].id);
    assert_eq!(restored.asks()[0].order.price, dec!(50.25));
    assert_eq!(restored.bids()[0].order.volume, 60);
}
