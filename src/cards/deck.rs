//! Shuffled draw order over a 16-card deck.
//!
//! ## Draw cycle
//!
//! The first draw, and every draw after the cycle is used up, reshuffles:
//! a Fisher-Yates permutation of every card index except the deck's
//! Get Out of Jail Free card while a player holds it. The cycle length
//! is fixed when the shuffle happens, so no card repeats within a cycle
//! and a draw always yields a card.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::{Card, CardEffect, DeckKind, DECK_SIZE};
use crate::core::GameRng;

/// Current permutation and cursor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckState {
    /// Card indices for this cycle, in draw order.
    pub order: SmallVec<[u8; DECK_SIZE]>,
    /// Next position in `order` to draw.
    pub cursor: usize,
    /// Completed shuffles.
    pub shuffles: u32,
}

impl DeckState {
    /// Draws left before the next reshuffle.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.order.len().saturating_sub(self.cursor)
    }
}

/// A deck's cards plus its draw state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub kind: DeckKind,
    cards: Vec<Card>,
    state: DeckState,
}

impl Deck {
    /// Wrap a card table. Nothing is shuffled until the first draw.
    #[must_use]
    pub fn new(kind: DeckKind, cards: Vec<Card>) -> Self {
        Self {
            kind,
            cards,
            state: DeckState::default(),
        }
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn state(&self) -> &DeckState {
        &self.state
    }

    /// Index of this deck's Get Out of Jail Free card, if it has one.
    #[must_use]
    pub fn jail_card_index(&self) -> Option<u8> {
        self.cards
            .iter()
            .position(|c| c.effect == CardEffect::GetOutOfJailFree)
            .map(|i| i as u8)
    }

    /// Draw the next card, reshuffling first if the cycle is used up.
    ///
    /// `jail_card_held` excludes the jail card from a reshuffle. Returns
    /// `None` only for a deck with no drawable cards.
    pub fn draw(&mut self, jail_card_held: bool, rng: &mut GameRng) -> Option<Card> {
        if self.state.cursor >= self.state.order.len() {
            self.shuffle(jail_card_held, rng);
        }
        let idx = *self.state.order.get(self.state.cursor)?;
        self.state.cursor += 1;
        let card = self.cards.get(idx as usize)?.clone();
        log::debug!("{} draw {}: {}", self.kind, card.id, card.description);
        Some(card)
    }

    /// Start a new cycle.
    pub fn shuffle(&mut self, jail_card_held: bool, rng: &mut GameRng) {
        let excluded = if jail_card_held { self.jail_card_index() } else { None };
        let mut order: SmallVec<[u8; DECK_SIZE]> = (0..self.cards.len() as u8)
            .filter(|&i| Some(i) != excluded)
            .collect();
        rng.shuffle(&mut order);

        self.state.order = order;
        self.state.cursor = 0;
        self.state.shuffles += 1;
        log::debug!("{} reshuffled ({} cards)", self.kind, self.state.order.len());
    }

    /// Replace the current cycle with a fixed order.
    ///
    /// For replays and scripted scenarios. Returns `false` and leaves the
    /// deck untouched if any index is out of range.
    pub fn arrange(&mut self, order: &[u8]) -> bool {
        if order.iter().any(|&i| i as usize >= self.cards.len()) {
            return false;
        }
        self.state.order = order.iter().copied().collect();
        self.state.cursor = 0;
        true
    }

    /// Put the next card with `id` on top of the current cycle.
    ///
    /// Returns `false` if no card has that id.
    pub fn stack_next(&mut self, id: u8) -> bool {
        match self.cards.iter().position(|c| c.id == id) {
            Some(idx) => {
                let mut order: SmallVec<[u8; DECK_SIZE]> = SmallVec::new();
                order.push(idx as u8);
                order.extend(
                    self.state.order[self.state.cursor.min(self.state.order.len())..]
                        .iter()
                        .copied()
                        .filter(|&i| i as usize != idx),
                );
                self.state.order = order;
                self.state.cursor = 0;
                true
            }
            None => false,
        }
    }
}
