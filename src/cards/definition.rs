//! Card definitions - static card data.
//!
//! A `Card` pairs a numeric id and the text read aloud with exactly one
//! `CardEffect`. Effects are executed by `effects::CardResolver`.

use serde::{Deserialize, Serialize};

use crate::board::PropertyKind;
use crate::core::Money;

/// Cards per deck.
pub const DECK_SIZE: usize = 16;

/// Which of the two decks a card belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeckKind {
    Chance,
    CommunityChest,
}

impl std::fmt::Display for DeckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeckKind::Chance => f.write_str("Chance"),
            DeckKind::CommunityChest => f.write_str("Community Chest"),
        }
    }
}

/// What a card does when drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CardEffect {
    /// Move forward to a square, collecting GO salary if the move wraps.
    AdvanceTo { position: u8 },
    /// Move forward to the next railroad or utility. An owned railroad
    /// charges double rent; an owned utility charges ten times the dice.
    AdvanceToNearest { kind: PropertyKind },
    /// Move by a signed number of squares. Backward moves never pay salary.
    MoveRelative { spaces: i8 },
    Collect { amount: Money },
    Pay { amount: Money },
    /// Collect from every other solvent player.
    CollectFromEachPlayer { amount: Money },
    /// Pay every other solvent player.
    PayEachPlayer { amount: Money },
    GetOutOfJailFree,
    GoToJail,
    /// Assessment per house and per hotel owned.
    Repairs { per_house: Money, per_hotel: Money },
}

/// A Chance or Community Chest card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: u8,
    pub description: String,
    pub effect: CardEffect,
}

impl Card {
    pub fn new(id: u8, description: impl Into<String>, effect: CardEffect) -> Self {
        Self {
            id,
            description: description.into(),
            effect,
        }
    }
}
