//! Start of a turn: the action menu.

use crate::core::{InvariantViolation, RulesError};
use crate::flow::{FlowContext, JailOutcome};
use crate::rules::{RulesEngine, TurnSequencer};

use super::{
    JailPhase, PhaseResult, PhaseStep, PhaseTag, PostRollPhase, PropertyManagementPhase, Prompt,
    TradePhase,
};

/// Turn menu for the current player. Jailed players are sent to `Jail`
/// first; what happened there is picked up when it pops.
#[derive(Debug, Default)]
pub struct PreRollPhase;

impl PreRollPhase {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn status(ctx: &FlowContext) -> Result<String, RulesError> {
        let id = ctx.player();
        let worth = RulesEngine::net_worth(&ctx.game, id)?;
        let player = ctx.game.player(id);
        Ok(format!(
            "{id} ({}): ${} cash, net worth ${worth}, {} properties, on {}",
            player.piece,
            player.money,
            player.properties.len(),
            ctx.game.square_name(player.position)
        ))
    }
}

impl PhaseStep for PreRollPhase {
    fn step(&mut self, ctx: &mut FlowContext, _dt: f32) -> Result<PhaseResult, InvariantViolation> {
        match ctx.turn.jail_outcome.take() {
            Some(JailOutcome::RolledOut(dice)) => {
                return Ok(PhaseResult::Replace(PostRollPhase::from_jail(dice).into()));
            }
            Some(JailOutcome::TurnOver) => {
                ctx.end_turn();
                return Ok(PhaseResult::Replace(PreRollPhase::new().into()));
            }
            Some(JailOutcome::Released) | None => {}
        }

        let player = ctx.player();
        if ctx.game.player(player).is_bankrupt {
            ctx.end_turn();
            return Ok(PhaseResult::Replace(PreRollPhase::new().into()));
        }
        if ctx.game.player(player).is_in_jail() {
            return Ok(PhaseResult::Push(JailPhase::new().into()));
        }

        let Some(input) = ctx.input.take() else {
            return Ok(PhaseResult::Running);
        };
        match input.as_int() {
            Some(1) => {
                let dice = TurnSequencer::roll_dice(&mut ctx.game);
                ctx.game.notify(format!("{player} rolled {dice}"));
                Ok(PhaseResult::Replace(PostRollPhase::new(dice).into()))
            }
            Some(2) => Ok(PhaseResult::Push(PropertyManagementPhase::new().into())),
            Some(3) => Ok(PhaseResult::Push(TradePhase::new(player).into())),
            Some(4) => {
                let status = Self::status(ctx).map_err(InvariantViolation::UnexpectedRejection)?;
                ctx.game.notify(status);
                Ok(PhaseResult::Running)
            }
            _ => {
                ctx.game.notify("Invalid choice");
                Ok(PhaseResult::Running)
            }
        }
    }

    fn tag(&self) -> PhaseTag {
        PhaseTag::PreRoll
    }

    fn prompt(&self, ctx: &FlowContext) -> Option<Prompt> {
        let player = ctx.game.player(ctx.player());
        if ctx.turn.jail_outcome.is_some() || player.is_bankrupt || player.is_in_jail() {
            None
        } else {
            Some(Prompt::TurnMenu)
        }
    }
}
