//! Card system: definitions, standard decks and draw order.
//!
//! ## Key Types
//!
//! - `Card`: id, description and one `CardEffect`
//! - `DeckKind`: Chance or Community Chest
//! - `Deck`: a card table plus its `DeckState` (permutation and cursor)

pub mod deck;
pub mod definition;
pub mod standard;

pub use deck::{Deck, DeckState};
pub use definition::{Card, CardEffect, DeckKind, DECK_SIZE};
pub use standard::{standard_chance, standard_community_chest};
