//! Deck, hand, and discard pile lifecycle.
//!
//! Every card in an encounter is in exactly one of the three piles at
//! all times; the total count never changes for the duration of a
//! battle. Draw order is the only place order matters semantically —
//! the hand's order is display-relevant but not meaningful to
//! resolution.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::BattleRng;

/// The three card piles of one battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPiles {
    /// Face-down draw pile; the top is the end of the vec.
    draw: Vec<CardId>,
    /// The player's hand, in display order.
    hand: Vec<CardId>,
    /// Face-up discard pile.
    discard: Vec<CardId>,
    /// Card count fixed at initialization; every operation preserves it.
    expected_total: usize,
}

impl CardPiles {
    /// Load the draw pile with the starting deck. Call
    /// [`CardPiles::shuffle`] before the first draw.
    #[must_use]
    pub fn new(deck: Vec<CardId>) -> Self {
        let expected_total = deck.len();
        Self {
            draw: deck,
            hand: Vec::new(),
            discard: Vec::new(),
            expected_total,
        }
    }

    /// Shuffle the draw pile.
    pub fn shuffle(&mut self, rng: &mut BattleRng) {
        rng.shuffle(&mut self.draw);
    }

    /// Draw up to `count` cards into the hand.
    ///
    /// When the draw pile empties with cards in the discard, the discard
    /// is reshuffled into the draw pile and drawing continues. With both
    /// piles empty the draw stops early; the return value is the number
    /// actually drawn, which may be less than requested.
    pub fn draw(&mut self, count: usize, rng: &mut BattleRng) -> usize {
        let mut drawn = 0;

        for _ in 0..count {
            if self.draw.is_empty() {
                if self.discard.is_empty() {
                    break;
                }
                self.reshuffle_discard(rng);
            }

            if let Some(card) = self.draw.pop() {
                self.hand.push(card);
                drawn += 1;
            }
        }

        debug_assert_eq!(self.total(), self.expected_total);
        drawn
    }

    /// Move the discard pile into the draw pile and shuffle.
    fn reshuffle_discard(&mut self, rng: &mut BattleRng) {
        self.draw.append(&mut self.discard);
        rng.shuffle(&mut self.draw);
    }

    /// Play a card: remove it from the hand and place it on the discard
    /// pile.
    ///
    /// Returns `false` without mutation if the card is not in hand. The
    /// pile move happens *before* effect resolution so effects always
    /// observe a consistent post-play pile state.
    pub fn play_card(&mut self, card: CardId) -> bool {
        let Some(pos) = self.hand.iter().position(|&c| c == card) else {
            return false;
        };
        self.hand.remove(pos);
        self.discard.push(card);

        debug_assert_eq!(self.total(), self.expected_total);
        true
    }

    /// Discard one card from the hand. Returns `false` if not in hand.
    pub fn discard_card(&mut self, card: CardId) -> bool {
        let Some(pos) = self.hand.iter().position(|&c| c == card) else {
            return false;
        };
        self.hand.remove(pos);
        self.discard.push(card);

        debug_assert_eq!(self.total(), self.expected_total);
        true
    }

    /// Discard the entire hand. Returns the number of cards moved.
    pub fn discard_hand(&mut self) -> usize {
        let moved = self.hand.len();
        self.discard.append(&mut self.hand);

        debug_assert_eq!(self.total(), self.expected_total);
        moved
    }

    /// The hand, in display order.
    #[must_use]
    pub fn hand(&self) -> &[CardId] {
        &self.hand
    }

    /// Check if a card is currently in hand.
    #[must_use]
    pub fn hand_contains(&self, card: CardId) -> bool {
        self.hand.contains(&card)
    }

    /// Cards remaining in the draw pile.
    #[must_use]
    pub fn draw_size(&self) -> usize {
        self.draw.len()
    }

    /// Cards in the discard pile.
    #[must_use]
    pub fn discard_size(&self) -> usize {
        self.discard.len()
    }

    /// Total cards across all three piles (constant for the battle).
    #[must_use]
    pub fn total(&self) -> usize {
        self.draw.len() + self.hand.len() + self.discard.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck(n: u32) -> Vec<CardId> {
        (1..=n).map(CardId::new).collect()
    }

    #[test]
    fn test_draw_moves_cards_to_hand() {
        let mut piles = CardPiles::new(deck(10));
        let mut rng = BattleRng::new(42);
        piles.shuffle(&mut rng);

        let drawn = piles.draw(5, &mut rng);

        assert_eq!(drawn, 5);
        assert_eq!(piles.hand().len(), 5);
        assert_eq!(piles.draw_size(), 5);
        assert_eq!(piles.total(), 10);
    }

    #[test]
    fn test_draw_reshuffles_discard_when_empty() {
        let mut piles = CardPiles::new(deck(5));
        let mut rng = BattleRng::new(42);

        piles.draw(5, &mut rng);
        for card in piles.hand().to_vec() {
            assert!(piles.play_card(card));
        }
        assert_eq!(piles.draw_size(), 0);
        assert_eq!(piles.discard_size(), 5);

        let drawn = piles.draw(3, &mut rng);

        assert_eq!(drawn, 3);
        assert_eq!(piles.discard_size(), 0); // Reshuffle emptied the discard
        assert_eq!(piles.draw_size(), 2);
        assert_eq!(piles.hand().len(), 3);
        assert_eq!(piles.total(), 5);
    }

    #[test]
    fn test_draw_exhaustion_returns_short_count() {
        let mut piles = CardPiles::new(deck(3));
        let mut rng = BattleRng::new(42);

        let drawn = piles.draw(5, &mut rng);

        assert_eq!(drawn, 3);
        assert_eq!(piles.hand().len(), 3);

        // Everything is in hand; nothing left to draw anywhere
        let drawn = piles.draw(2, &mut rng);
        assert_eq!(drawn, 0);
        assert_eq!(piles.total(), 3);
    }

    #[test]
    fn test_play_card_moves_to_discard() {
        let mut piles = CardPiles::new(deck(5));
        let mut rng = BattleRng::new(42);
        piles.draw(3, &mut rng);

        let card = piles.hand()[0];
        assert!(piles.play_card(card));

        assert_eq!(piles.hand().len(), 2);
        assert_eq!(piles.discard_size(), 1);
        assert!(!piles.hand_contains(card));
    }

    #[test]
    fn test_play_card_not_in_hand_is_rejected() {
        let mut piles = CardPiles::new(deck(5));
        let mut rng = BattleRng::new(42);
        piles.draw(2, &mut rng);

        let before_hand = piles.hand().to_vec();
        assert!(!piles.play_card(CardId::new(99)));

        assert_eq!(piles.hand(), before_hand.as_slice());
        assert_eq!(piles.discard_size(), 0);
    }

    #[test]
    fn test_discard_hand() {
        let mut piles = CardPiles::new(deck(8));
        let mut rng = BattleRng::new(42);
        piles.draw(5, &mut rng);

        let moved = piles.discard_hand();

        assert_eq!(moved, 5);
        assert!(piles.hand().is_empty());
        assert_eq!(piles.discard_size(), 5);
        assert_eq!(piles.total(), 8);
    }

    #[test]
    fn test_duplicate_ids_remove_one_instance() {
        let cards = vec![CardId::new(1), CardId::new(1), CardId::new(1)];
        let mut piles = CardPiles::new(cards);
        let mut rng = BattleRng::new(42);
        piles.draw(3, &mut rng);

        assert!(piles.play_card(CardId::new(1)));

        assert_eq!(piles.hand().len(), 2);
        assert_eq!(piles.discard_size(), 1);
        assert_eq!(piles.total(), 3);
    }

    #[test]
    fn test_empty_deck_draws_nothing() {
        let mut piles = CardPiles::new(vec![]);
        let mut rng = BattleRng::new(42);

        assert_eq!(piles.draw(5, &mut rng), 0);
        assert_eq!(piles.total(), 0);
    }
}
