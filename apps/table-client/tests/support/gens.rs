// Proptest strategies for cards and tables.

use proptest::prelude::*;
use table_client::domain::{Card, Rank, Suit};

pub fn card() -> impl Strategy<Value = Card> {
    (0..Rank::ALL.len(), 0..Suit::ALL.len()).prop_map(|(r, s)| Card::new(Rank::ALL[r], Suit::ALL[s]))
}

/// Distinct cards, in the order they were picked.
pub fn distinct_cards(max: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::collection::vec(card(), 1..=max).prop_map(|cards| {
        let mut seen = Vec::with_capacity(cards.len());
        for card in cards {
            if !seen.contains(&card) {
                seen.push(card);
            }
        }
        seen
    })
}

/// Seat ids for a 2 to 4 player table.
pub fn seat_ids() -> impl Strategy<Value = Vec<String>> {
    (2usize..=4).prop_map(|n| (0..n).map(|i| format!("p{i}")).collect())
}
