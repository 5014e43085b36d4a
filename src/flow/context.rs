//! State shared by every phase: the game, the mailbox and the turn.

use crate::core::{Dice, GameData, PlayerId};
use crate::rules::TurnSequencer;

use super::input::InputMailbox;

/// How a jail visit ended, read by the turn menu when jail pops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JailOutcome {
    /// Rolled doubles; move by this roll.
    RolledOut(Dice),
    /// Paid or used a card; take a normal turn.
    Released,
    /// Still jailed, or just paid the forced fine; the turn is over.
    TurnOver,
}

/// Turn-scoped bookkeeping, reset when the turn passes.
#[derive(Clone, Debug, Default)]
pub struct TurnState {
    /// Consecutive doubles this turn.
    pub doubles_rolled: u8,
    pub jail_outcome: Option<JailOutcome>,
}

/// What a phase gets to work with on each tick.
#[derive(Debug)]
pub struct FlowContext {
    pub game: GameData,
    pub input: InputMailbox,
    pub turn: TurnState,
}

impl FlowContext {
    #[must_use]
    pub fn new(game: GameData) -> Self {
        Self {
            game,
            input: InputMailbox::default(),
            turn: TurnState::default(),
        }
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.game.current_player
    }

    /// Pass the turn on and forget this turn's bookkeeping.
    pub fn end_turn(&mut self) {
        self.turn = TurnState::default();
        if self.game.running {
            TurnSequencer::advance_turn(&mut self.game);
        }
    }
}
