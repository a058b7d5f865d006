//! Book behaviour through the public API: the reference scenarios and
//! property tests over random update sequences.

use depth_book::types::price::to_fixed;
use depth_book::{BookQuery, DepthUpdate, PriceLevel, PriceLevelBook, SharedBook, Side};

use proptest::collection::vec;
use proptest::prelude::*;

fn px(s: &str) -> u64 {
    to_fixed(s).expect("valid decimal")
}

fn level(price: &str, size: &str) -> PriceLevel {
    PriceLevel::new(px(price), px(size))
}

fn parse(asks: &[(&str, &str)], bids: &[(&str, &str)]) -> DepthUpdate {
    DepthUpdate::parse(asks, bids).expect("valid update")
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn scenario_a_first_update_sets_both_sides() {
    let mut book = PriceLevelBook::new();
    book.apply(&parse(&[("100.00", "1.5")], &[("99.50", "2.0")]));

    assert_eq!(book.best_of(Side::Ask), Some(level("100.00", "1.5")));
    assert_eq!(book.best_of(Side::Bid), Some(level("99.50", "2.0")));
}

#[test]
fn scenario_b_zero_size_removes_ask_only() {
    let mut book = PriceLevelBook::new();
    book.apply(&parse(&[("100.00", "1.5")], &[("99.50", "2.0")]));
    book.apply(&parse(&[("100.00", "0")], &[]));

    assert_eq!(book.best_of(Side::Ask), None);
    assert_eq!(book.best_of(Side::Bid), Some(level("99.50", "2.0")));
}

#[test]
fn scenario_c_top_n_ascending_and_truncated() {
    let mut book = PriceLevelBook::new();
    book.apply(&parse(&[("101.00", "1"), ("100.50", "2"), ("100.00", "3")], &[]));

    assert_eq!(
        book.top_n(Side::Ask, 2),
        vec![level("100.00", "3"), level("100.50", "2")]
    );
}

#[test]
fn equal_prices_with_different_spelling_share_a_level() {
    let mut book = PriceLevelBook::new();
    book.apply(&parse(&[], &[("99.5", "1")]));
    book.apply(&parse(&[], &[("99.50000", "4")]));

    assert_eq!(book.level_count(Side::Bid), 1);
    assert_eq!(book.best_of(Side::Bid), Some(level("99.5", "4")));
}

#[test]
fn repeated_price_in_one_message_last_wins() {
    let mut book = PriceLevelBook::new();
    book.apply(&parse(&[("100", "1"), ("100", "0"), ("100", "7")], &[]));
    assert_eq!(book.top_n(Side::Ask, 10), vec![level("100", "7")]);

    book.apply(&parse(&[("100", "2"), ("100", "0")], &[]));
    assert!(book.is_empty());
}

#[test]
fn query_through_trait_object_and_shared_handle() {
    let shared = SharedBook::new();
    shared.apply(&parse(&[("100.00", "1")], &[("99.00", "1")]));

    let owned = shared.clone_book();
    let views: [&dyn BookQuery; 2] = [&shared, &owned];
    for view in views {
        assert_eq!(view.spread(), Some(px("1.00")));
        assert_eq!(view.top_n(Side::Bid, 0), Vec::new());
        assert_eq!(view.best_of(Side::Ask), Some(level("100.00", "1")));
    }
}

// ============================================================================
// Properties
// ============================================================================

/// A (price, size) entry drawn from a narrow band so prices collide often.
fn entry() -> impl Strategy<Value = (u64, u64)> {
    (1u64..=40, prop_oneof![1 => Just(0u64), 3 => 1u64..1_000])
}

fn update() -> impl Strategy<Value = DepthUpdate> {
    (vec(entry(), 0..8), vec(entry(), 0..8))
        .prop_map(|(asks, bids)| DepthUpdate::from_levels(asks, bids))
}

fn book_from(updates: &[DepthUpdate]) -> PriceLevelBook {
    let mut book = PriceLevelBook::new();
    for u in updates {
        book.apply(u);
    }
    book
}

proptest! {
    #[test]
    fn prop_sides_stay_sorted_without_zero_levels(
        updates in vec(update(), 0..40),
        k in 0usize..50,
    ) {
        let book = book_from(&updates);

        let bids = book.top_n(Side::Bid, k);
        let asks = book.top_n(Side::Ask, k);
        prop_assert!(bids.windows(2).all(|w| w[0].price > w[1].price));
        prop_assert!(asks.windows(2).all(|w| w[0].price < w[1].price));
        prop_assert!(bids.iter().chain(asks.iter()).all(|l| l.size > 0));
    }

    #[test]
    fn prop_top_n_length_is_bounded(updates in vec(update(), 0..40), n in 0usize..60) {
        let book = book_from(&updates);
        for side in Side::ALL {
            let count = book.level_count(side);
            prop_assert_eq!(book.top_n(side, n).len(), n.min(count));
        }
    }

    #[test]
    fn prop_zero_size_removes_exactly_one_level(
        updates in vec(update(), 1..30),
        price in 1u64..=40,
    ) {
        let mut book = book_from(&updates);
        let before = book.clone();
        let existed = book.level_at(Side::Ask, price).is_some();

        book.apply(&DepthUpdate::new().with_ask(price, 0));

        if existed {
            prop_assert_eq!(book.level_count(Side::Ask), before.level_count(Side::Ask) - 1);
            prop_assert!(book.level_at(Side::Ask, price).is_none());
            let rest: Vec<_> = before
                .top_n(Side::Ask, usize::MAX)
                .into_iter()
                .filter(|l| l.price != price)
                .collect();
            prop_assert_eq!(book.top_n(Side::Ask, usize::MAX), rest);
        } else {
            prop_assert_eq!(&book, &before);
        }
        prop_assert_eq!(book.top_n(Side::Bid, usize::MAX), before.top_n(Side::Bid, usize::MAX));
    }

    #[test]
    fn prop_overwrite_is_idempotent(
        updates in vec(update(), 0..30),
        price in 1u64..=40,
        size in 1u64..1_000,
    ) {
        let mut book = book_from(&updates);
        let single = DepthUpdate::new().with_bid(price, size);

        book.apply(&single);
        let once = book.clone();
        book.apply(&single);

        prop_assert_eq!(&book, &once);
        prop_assert_eq!(book.level_at(Side::Bid, price), Some(PriceLevel::new(price, size)));
    }

    #[test]
    fn prop_no_cross_side_leakage(
        updates in vec(update(), 0..30),
        asks in vec(entry(), 0..10),
    ) {
        let mut book = book_from(&updates);
        let bids_before = book.top_n(Side::Bid, usize::MAX);

        book.apply(&DepthUpdate::from_levels(asks, Vec::new()));

        prop_assert_eq!(book.top_n(Side::Bid, usize::MAX), bids_before);
    }

    #[test]
    fn prop_equal_books_have_equal_state_roots(updates in vec(update(), 0..30)) {
        let a = book_from(&updates);
        let b = book_from(&updates);
        prop_assert_eq!(
            a.full_snapshot().state_root().expect("encode"),
            b.full_snapshot().state_root().expect("encode")
        );
    }
}
