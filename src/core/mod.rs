//! Core engine types: players, dice, RNG, settings, errors and game state.
//!
//! Everything here is data. Rules operate on it from `rules`; the turn
//! flow drives it from `flow`.

pub mod config;
pub mod dice;
pub mod error;
mod invariants;
pub mod player;
pub mod rng;
pub mod state;

pub use config::{GameSettings, MIN_PLAYERS};
pub use dice::Dice;
pub use error::{GameError, InvariantViolation, RulesError};
pub use player::{Money, Piece, Player, PlayerId, PlayerMap, MAX_PLAYERS, PROPERTY_LIST_CAPACITY};
pub use rng::{GameRng, GameRngState};
pub use state::{init_game, GameData, Notification};
