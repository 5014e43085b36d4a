//! The phase machine: a stack of phases driven one tick at a time.
//!
//! `GameFlow` owns the game, the active phase and the suspended phases
//! beneath it. The driver calls [`GameFlow::run_current_phase`] once per
//! frame and posts decisions through the input mailbox whenever
//! [`GameFlow::is_waiting_for_input`] says a phase is blocked.
//!
//! ## Tick
//!
//! 1. Count the notification down.
//! 2. Step the active phase once.
//! 3. Apply the one transition it asked for (push, pop or replace).
//! 4. Check the game invariants.
//!
//! ## Example
//!
//! ```
//! use monopoly_engine::board::GameTables;
//! use monopoly_engine::core::{init_game, Dice, GameSettings};
//! use monopoly_engine::flow::GameFlow;
//! use monopoly_engine::phases::PhaseTag;
//!
//! let mut game = init_game(GameSettings::default().with_seed(7), GameTables::standard()).unwrap();
//! game.script_rolls([Dice::new(2, 3)]);
//! let mut flow = GameFlow::new(game, ());
//!
//! assert!(flow.is_waiting_for_input());
//! flow.set_input_int(1);
//! flow.run_current_phase(0.016).unwrap();
//! assert_eq!(flow.current_phase_tag(), Some(PhaseTag::PostRoll));
//! ```

mod context;
mod input;

pub use context::{FlowContext, JailOutcome, TurnState};
pub use input::{Input, InputMailbox, INPUT_TEXT_CAPACITY};

use crate::core::{GameData, GameError, InvariantViolation, Notification, PlayerId};
use crate::phases::{
    AuctionSnapshot, Phase, PhaseResult, PhaseStep, PhaseTag, PreRollPhase, Prompt, TradeSnapshot,
};

/// Most phases that may be suspended at once.
pub const MAX_PHASE_DEPTH: usize = 16;

/// Drives one game.
///
/// `C` is an opaque value owned on behalf of the front end (a window
/// handle, an input device); the engine never looks at it.
#[derive(Debug)]
pub struct GameFlow<C = ()> {
    ctx: FlowContext,
    current: Option<Phase>,
    stack: Vec<Phase>,
    input_context: C,
    elapsed: f64,
}

impl<C> GameFlow<C> {
    /// Start the flow on the first player's turn menu.
    pub fn new(game: GameData, input_context: C) -> Self {
        log::debug!("flow starts with {} to move", game.current_player);
        Self {
            ctx: FlowContext::new(game),
            current: Some(PreRollPhase::new().into()),
            stack: Vec::with_capacity(MAX_PHASE_DEPTH),
            input_context,
            elapsed: 0.0,
        }
    }

    /// Run one tick. Does nothing once the game has stopped.
    pub fn run_current_phase(&mut self, dt: f32) -> Result<(), GameError> {
        if !self.ctx.game.running {
            return Ok(());
        }
        self.elapsed += f64::from(dt);
        self.ctx.game.tick_notification(dt);

        let phase = self.current.as_mut().ok_or(InvariantViolation::NoActivePhase)?;
        let result = phase.step(&mut self.ctx, dt)?;
        match result {
            PhaseResult::Running => {}
            PhaseResult::Complete => {
                self.pop_phase();
            }
            PhaseResult::Push(next) => self.push_phase(next)?,
            PhaseResult::Replace(next) => self.replace_phase(next),
        }

        self.ctx.game.validate_invariants()?;
        Ok(())
    }

    /// Suspend the active phase and start `phase` on top of it.
    pub fn push_phase(&mut self, phase: Phase) -> Result<(), InvariantViolation> {
        if self.stack.len() >= MAX_PHASE_DEPTH {
            log::error!("phase stack overflow pushing {:?}", phase.tag());
            return Err(InvariantViolation::PhaseStackOverflow(self.stack.len() + 1));
        }
        log::trace!("push {:?} (depth {})", phase.tag(), self.stack.len() + 1);
        if let Some(suspended) = self.current.replace(phase) {
            self.stack.push(suspended);
        }
        Ok(())
    }

    /// Drop the active phase and resume the one beneath it.
    ///
    /// With nothing suspended this is a no-op and returns `false`.
    pub fn pop_phase(&mut self) -> bool {
        match self.stack.pop() {
            Some(resumed) => {
                log::trace!("pop back to {:?} (depth {})", resumed.tag(), self.stack.len());
                self.current = Some(resumed);
                true
            }
            None => {
                log::warn!("pop with no suspended phase ignored");
                false
            }
        }
    }

    fn replace_phase(&mut self, phase: Phase) {
        log::trace!("replace with {:?}", phase.tag());
        self.current = Some(phase);
    }

    // === Input ===

    pub fn set_input_int(&mut self, value: i32) {
        self.ctx.input.set_int(value);
    }

    /// Post text. Anything past the buffer size is cut off.
    pub fn set_input_string(&mut self, text: &str) {
        self.ctx.input.set_string(text);
    }

    pub fn clear_input(&mut self) {
        self.ctx.input.clear();
    }

    /// Whether the active phase is blocked on a decision nobody has posted.
    #[must_use]
    pub fn is_waiting_for_input(&self) -> bool {
        self.ctx.game.running && !self.ctx.input.has_pending() && self.prompt().is_some()
    }

    // === Queries ===

    #[must_use]
    pub fn current_phase_tag(&self) -> Option<PhaseTag> {
        self.current.as_ref().map(|p| p.tag())
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.ctx.game.current_player
    }

    #[must_use]
    pub fn game(&self) -> &GameData {
        &self.ctx.game
    }

    /// Mutable access for setup and tests. Changes are checked against
    /// the invariants on the next tick.
    pub fn game_mut(&mut self) -> &mut GameData {
        &mut self.ctx.game
    }

    #[must_use]
    pub fn notification(&self) -> &Notification {
        &self.ctx.game.notification
    }

    #[must_use]
    pub fn prompt(&self) -> Option<Prompt> {
        self.current.as_ref().and_then(|p| p.prompt(&self.ctx))
    }

    #[must_use]
    pub fn turn_state(&self) -> &TurnState {
        &self.ctx.turn
    }

    /// The auction in progress, if the active phase is one.
    #[must_use]
    pub fn auction_snapshot(&self) -> Option<AuctionSnapshot> {
        match &self.current {
            Some(Phase::Auction(auction)) => Some(auction.snapshot()),
            _ => None,
        }
    }

    /// The trade in progress, if the active phase is one.
    #[must_use]
    pub fn trade_snapshot(&self) -> Option<TradeSnapshot> {
        match &self.current {
            Some(Phase::Trade(trade)) => Some(trade.snapshot()),
            _ => None,
        }
    }

    /// Suspended phases beneath the active one.
    #[must_use]
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    #[must_use]
    pub fn input_context(&self) -> &C {
        &self.input_context
    }

    pub fn input_context_mut(&mut self) -> &mut C {
        &mut self.input_context
    }

    /// Seconds of game time run so far.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.ctx.game.running
    }
}
