//! Property tests for deal detection and reveal order.
//!
//! Properties tested:
//! - The deal key ignores seat order and hand order
//! - Moving the dealer changes the deal key
//! - Visible cards per seat add up to the cards dealt so far
//! - No seat ever shows more than it holds

include!("../../common/proptest_prelude.rs");

use proptest::prelude::*;
use table_client::services::deal_animation::{deal_key, is_round_start, DealPlan};

use crate::support::gens::seat_ids;
use crate::support::snapshots::TableBuilder;

proptest! {
    #![proptest_config(proptest_prelude_config())]

    #[test]
    fn prop_deal_key_ignores_seat_and_hand_order(
        ids in seat_ids(),
        hand_size in 1usize..=5,
        rotate in 0usize..4,
    ) {
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let snapshot = TableBuilder::new(&refs).hand_size(hand_size).build();

        let mut shuffled = snapshot.clone();
        let n = shuffled.players.len();
        shuffled.players.rotate_left(rotate % n);
        for player in &mut shuffled.players {
            player.hand.reverse();
        }

        prop_assert!(is_round_start(&snapshot));
        prop_assert_eq!(deal_key(&snapshot), deal_key(&shuffled));
    }

    #[test]
    fn prop_dealer_is_part_of_deal_key(ids in seat_ids(), dealer in 1usize..4) {
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let base = TableBuilder::new(&refs);
        let moved = base.clone().dealer(dealer % refs.len()).build();
        prop_assume!(moved.current_dealer_index != 0);
        prop_assert_ne!(deal_key(&base.build()), deal_key(&moved));
    }

    #[test]
    fn prop_visible_counts_sum_to_dealt(
        players in 2usize..=4,
        hand_size in 1usize..=7,
        dealer in 0usize..4,
        dealt_frac in 0.0f64..=1.0,
    ) {
        let plan = DealPlan { players, hand_size, dealer_index: dealer % players };
        let dealt = ((plan.total_cards() as f64) * dealt_frac).round() as usize;

        let counts: Vec<usize> = (0..players).map(|seat| plan.visible_count(seat, dealt)).collect();
        prop_assert_eq!(counts.iter().sum::<usize>(), dealt);
        prop_assert!(counts.iter().all(|c| *c <= hand_size));

        // Seats served earlier never trail seats served later.
        let first = (plan.dealer_index + 1) % players;
        let last = (plan.dealer_index + players) % players;
        prop_assert!(counts[first] >= counts[last]);
    }
}
