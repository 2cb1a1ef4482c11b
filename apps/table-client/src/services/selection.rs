use crate::domain::Card;

/// Cards picked from the local hand, in the order they were chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardSelection {
    cards: Vec<Card>,
    hit_mode: bool,
}

impl CardSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.iter().any(|c| c.same_identity(card))
    }

    pub fn is_hit_mode(&self) -> bool {
        self.hit_mode
    }

    /// Picking a selected card deselects it. Otherwise hit mode replaces the
    /// selection and normal mode adds to it.
    pub fn toggle(&mut self, card: Card) {
        if let Some(index) = self.cards.iter().position(|c| c.same_identity(&card)) {
            self.cards.remove(index);
            return;
        }
        if self.hit_mode {
            self.cards.clear();
        }
        self.cards.push(card);
    }

    /// Enter hit mode, keeping only the most recently chosen card.
    pub fn enter_hit_mode(&mut self) {
        if let Some(last) = self.cards.last().copied() {
            self.cards.clear();
            self.cards.push(last);
        }
        self.hit_mode = true;
    }

    pub fn exit_hit_mode(&mut self) {
        self.hit_mode = false;
    }

    /// The single hit card, if hit mode holds exactly one.
    pub fn hit_card(&self) -> Option<Card> {
        match (self.hit_mode, self.cards.as_slice()) {
            (true, [card]) => Some(*card),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.cards.clear();
        self.hit_mode = false;
    }
}
