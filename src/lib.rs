//! # monopoly-engine
//!
//! Rules and turn flow for a Monopoly-style board game, with no rendering
//! or input handling of its own.
//!
//! ## Design Principles
//!
//! 1. **Tick-Driven**: A front end calls `GameFlow::run_current_phase`
//!    once per frame and posts one decision at a time. Nothing blocks.
//!
//! 2. **Data and Rules Apart**: `GameData` is plain state. `RulesEngine`,
//!    `BankruptcyResolver`, `TurnSequencer` and `CardResolver` are
//!    namespaces of operations over it.
//!
//! 3. **Fail Loudly**: Refused requests are `RulesError`s the player can
//!    retry; running out of money is handled by liquidation and
//!    bankruptcy; anything that should be impossible is an
//!    `InvariantViolation` returned from the tick.
//!
//! ## Modules
//!
//! - `core`: Players, dice, RNG, settings, errors, game state
//! - `board`: Squares, property records and the static tables
//! - `cards`: Card definitions, the standard decks and draw order
//! - `rules`: Purchase, rent, building, mortgages, trades, bankruptcy, turns
//! - `effects`: Executing drawn cards
//! - `phases`: The six turn phases
//! - `flow`: The phase stack, input mailbox and per-tick entry point

pub mod board;
pub mod cards;
pub mod core;
pub mod effects;
pub mod flow;
pub mod phases;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    init_game, Dice, GameData, GameError, GameRng, GameSettings, InvariantViolation, Money,
    Notification, Piece, Player, PlayerId, PlayerMap, RulesError,
};

pub use crate::board::{
    ColorGroup, GameTables, Owner, Property, PropertyDefinition, PropertyId, PropertyKind,
    SquareKind,
};

pub use crate::cards::{Card, CardEffect, Deck, DeckKind};

pub use crate::rules::{
    BankruptcyResolver, Creditor, Payment, RentModifier, RentOutcome, RulesEngine, TradeOffer,
    TurnSequencer,
};

pub use crate::effects::{CardOutcome, CardResolver};

pub use crate::phases::{Phase, PhaseResult, PhaseStep, PhaseTag, Prompt};

pub use crate::flow::{GameFlow, MAX_PHASE_DEPTH};
