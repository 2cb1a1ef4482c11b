//! Short card tokens (e.g., "AS", "7H", "KD") for logs and deal keys.

use std::fmt::{Display, Formatter, Result as FmtResult};

use super::cards_types::{Card, Rank, Suit};

impl Display for Card {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let rank = match self.rank {
            Rank::Ace => 'A',
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
        };
        let suit = match self.suit {
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
            Suit::Spades => 'S',
        };
        write!(f, "{rank}{suit}")
    }
}
